//! Terminal rendering of process results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use jcc2_report::{analyze_application_patterns, mean, summarize_all_sections};

use crate::types::ProcessResult;

pub fn print_process_summary(result: &ProcessResult, max_errors: usize) {
    let survey = &result.survey;
    let dataset = survey.dataset();

    println!("File: {}", survey.source().display());
    println!("Format: {}", survey.format());
    println!("Rows: {}", dataset.row_count());
    println!("Columns: {}", dataset.column_count());
    println!("Sections: {}", survey.sections().len());
    if let Some(path) = &result.summary_path {
        println!("Summary: {}", path.display());
    }

    print_section_table(result);
    print_application_table(result);
    print_warning_table(result);
    print_validation_table(result, max_errors);
}

fn print_section_table(result: &ProcessResult) {
    let survey = &result.survey;
    let summaries =
        summarize_all_sections(survey.dataset(), survey.schema(), survey.sections());
    if summaries.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Fields"),
        header_cell("Responses"),
        header_cell("Completion"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_fields = 0usize;
    let mut total_responses = 0usize;
    let mut all_rates = Vec::new();
    for summary in summaries.values() {
        let responses: usize = summary
            .field_summaries
            .values()
            .map(|field| field.non_null_count)
            .sum();
        let rates: Vec<f64> = summary
            .field_summaries
            .values()
            .map(|field| field.completion_rate)
            .collect();
        total_fields += summary.total_fields;
        total_responses += responses;
        all_rates.extend_from_slice(&rates);
        table.add_row(vec![
            Cell::new(&summary.section)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.total_fields),
            Cell::new(responses),
            completion_cell(mean(&rates)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_fields).add_attribute(Attribute::Bold),
        Cell::new(total_responses).add_attribute(Attribute::Bold),
        completion_cell(mean(&all_rates)).add_attribute(Attribute::Bold),
    ]);

    println!();
    println!("Sections:");
    println!("{table}");
}

fn print_application_table(result: &ProcessResult) {
    let survey = &result.survey;
    let patterns = analyze_application_patterns(survey.dataset(), survey.schema());
    if patterns.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Application"),
        header_cell("Fields"),
        header_cell("Avg responses"),
        header_cell("Total responses"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for (application, pattern) in &patterns {
        table.add_row(vec![
            Cell::new(application),
            Cell::new(pattern.total_fields),
            Cell::new(format!("{:.1}", pattern.avg_responses)),
            Cell::new(pattern.total_responses),
        ]);
    }

    println!();
    println!("Application usage:");
    println!("{table}");
}

fn print_warning_table(result: &ProcessResult) {
    let warnings = result.survey.warnings();
    if warnings.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Warning")]);
    apply_table_style(&mut table);
    for warning in warnings {
        let column_cell = match warning.column.as_deref() {
            Some(column) => Cell::new(column),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            column_cell,
            Cell::new(&warning.message).fg(Color::Yellow),
        ]);
    }

    println!();
    println!("Load warnings:");
    println!("{table}");
}

fn print_validation_table(result: &ProcessResult, max_errors: usize) {
    println!();
    if result.errors.is_empty() {
        println!("No validation findings.");
        return;
    }
    println!("Validation findings: {}", result.errors.len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Check"),
        header_cell("Detail"),
    ]);
    apply_findings_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for error in result.errors.iter().take(max_errors) {
        table.add_row(vec![
            Cell::new(error.row_index),
            Cell::new(&error.column_name),
            Cell::new(error.kind.as_str()).fg(Color::Red),
            Cell::new(&error.detail),
        ]);
    }
    println!("{table}");

    if result.errors.len() > max_errors {
        println!("({} more not shown)", result.errors.len() - max_errors);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_findings_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(40)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn completion_cell(rate: Option<f64>) -> Cell {
    match rate {
        Some(rate) => Cell::new(format!("{:.1}%", rate * 100.0)),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

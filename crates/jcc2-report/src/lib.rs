pub mod analyzer;
pub mod applications;
pub mod data_collection;
pub mod export;
pub mod questionnaire;
pub mod sections;
pub mod stats;
pub mod viz;

pub use analyzer::{FormatSummary, format_summary};
pub use applications::{APPLICATIONS, ApplicationPattern, analyze_application_patterns};
pub use data_collection::{
    DataCollectionSummary, PerformancePatterns, TaskMetrics, WorkaroundAnalysis,
    WorkaroundCorrelation, analyze_performance_patterns, summarize_data_collection,
};
pub use export::{
    MAX_EXPORTED_ERRORS, SUMMARY_SCHEMA, SUMMARY_SCHEMA_VERSION, SummaryMetadata, SurveySummary,
    build_summary, export_summary, summary_file_name,
};
pub use questionnaire::{
    QuestionnaireSummary, SusSummary, effectiveness_score, nps_score, summarize_questionnaire,
    sus_scores,
};
pub use sections::{
    FieldSummary, NumericSummary, SectionSummary, summarize_all_sections, summarize_section,
};
pub use stats::{ValueCount, mean, median, multi_value_counts, sample_std, value_counts};
pub use viz::{
    ApplicationUsageRow, EffectivenessCount, EffectivenessHeatmapRow, FrequencyRow,
    TaskPerformanceRow, VisualizationData, WorkaroundFrequencyRow, prepare_visualization_data,
};

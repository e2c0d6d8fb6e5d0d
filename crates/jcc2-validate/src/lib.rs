pub mod checks;

pub use checks::validate_dataset;

pub mod bivariate_analysis;
pub mod descriptive_stats;
pub mod import_dataset;
pub mod quality_audit;
pub mod reliability;
pub mod session;
pub mod type_inference;

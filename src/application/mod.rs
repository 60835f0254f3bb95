pub mod use_cases;

pub use use_cases::bivariate_analysis::BivariateAnalysisUseCase;
pub use use_cases::descriptive_stats::DescriptiveStatsUseCase;
pub use use_cases::import_dataset::{ImportDatasetUseCase, ImportSummary};
pub use use_cases::quality_audit::QualityAuditUseCase;
pub use use_cases::reliability::ReliabilityUseCase;
pub use use_cases::session::DatasetSession;

use std::sync::Mutex;

use crate::application::{
    BivariateAnalysisUseCase, DatasetSession, DescriptiveStatsUseCase, ImportDatasetUseCase,
    QualityAuditUseCase, ReliabilityUseCase,
};
use crate::infrastructure::config::AppConfig;

/// Shared application state behind the HTTP handlers.
///
/// The dataset session is the single mutable slot; use cases themselves
/// are stateless and read whatever dataset the session holds at call time.
pub struct AppState {
    pub import_use_case: ImportDatasetUseCase,
    pub quality_use_case: QualityAuditUseCase,
    pub descriptives_use_case: DescriptiveStatsUseCase,
    pub analysis_use_case: BivariateAnalysisUseCase,
    pub reliability_use_case: ReliabilityUseCase,
    pub session: Mutex<DatasetSession>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            import_use_case: ImportDatasetUseCase::new(config.max_import_rows),
            quality_use_case: QualityAuditUseCase::new(),
            descriptives_use_case: DescriptiveStatsUseCase::new(),
            analysis_use_case: BivariateAnalysisUseCase::new(),
            reliability_use_case: ReliabilityUseCase::new(),
            session: Mutex::new(DatasetSession::new()),
        }
    }
}

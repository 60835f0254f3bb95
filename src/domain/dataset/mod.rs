// ============================================================
// DATASET DOMAIN LAYER
// ============================================================
// Core types for imported tabular data
// No I/O, no async, no external collaborators

mod column_type;
#[allow(clippy::module_inception)]
mod dataset;
mod value;

pub use column_type::ColumnType;
pub use dataset::{Dataset, DatasetMeta};
pub use value::CellValue;

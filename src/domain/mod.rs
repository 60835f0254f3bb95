pub mod analysis;
pub mod dataset;
pub mod descriptives;
pub mod error;
pub mod quality;
pub mod reliability;

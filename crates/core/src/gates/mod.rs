pub mod aspect_ratio;
pub mod composition;
pub mod compression;
pub mod evaluator;
pub mod pose;
pub mod report;

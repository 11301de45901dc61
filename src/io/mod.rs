pub mod geometry;
pub mod metric_csv;
pub mod report;

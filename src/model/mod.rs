pub mod fips;
pub mod records;

pub use fips::{normalize_state, Fips, FIPS_WIDTH};
pub use records::{GeometryRecord, MergedRecord, MetricKind, MetricRecord, RankedRow};

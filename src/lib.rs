pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;

pub use error::{FetchError, LoadError, RenderError};
pub use model::{Fips, GeometryRecord, MergedRecord, MetricKind, MetricRecord, RankedRow};
pub use pipeline::{render, DataSources, RenderResult};

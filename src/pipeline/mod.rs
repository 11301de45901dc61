pub mod merge;
pub mod rank;
pub mod render;

pub use merge::merge;
pub use rank::{format_thousands, top_n, TOP_N};
pub use render::{assemble, render, ChoroplethSpec, DataSources, RenderResult};

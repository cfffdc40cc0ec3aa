//! Data-transformation pipeline behind the campus waste dashboard.
//!
//! The loader turns the raw CSV into validated [`types::WasteRecord`]s;
//! the pipeline modules fold those records into the three shapes the
//! dashboard renders: a per-year time series, a category → material
//! composition tree, and a material → category flow graph. Rendering is
//! someone else's job; everything exported here is plain serializable data.

pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod types;

//! Data model for company metric datasets.
//!
//! [`CompanyRecord`] rows are collected into an immutable [`Dataset`]
//! snapshot. A [`DatasetHandle`] shares the current snapshot between
//! concurrent readers and swaps it atomically on reload. The
//! [`MetricCatalog`] describes how each raw metric is normalized.

mod company;
mod metric;
mod value;

pub use company::{CompanyRecord, Dataset, DatasetHandle};
pub use metric::{MetricCatalog, MetricDefinition, MetricSpec};
pub use value::RawValue;

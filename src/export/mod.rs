//! Triple export of the dataset, independent of ranking.

mod turtle;

pub use turtle::{export_turtle, write_turtle};

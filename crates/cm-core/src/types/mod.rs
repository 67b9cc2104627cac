//! Common types used across cm-* crates

pub mod identifier;
pub mod time;

pub use identifier::{MetricSelection, ReferenceKind, split_identifiers};
pub use time::{TimeAgg, Timestamp, check_time_range};

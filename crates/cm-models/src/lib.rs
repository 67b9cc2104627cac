//! # cm-models
//!
//! Data models for Coin Metrics API responses.
//!
//! ## Features
//!
//! - **Type Safety**: info and catalog payloads are strongly typed, with
//!   unrecognised fields kept in an `extra` map
//! - **Decimal Precision**: metric values keep their exact wire text and
//!   convert to `BigDecimal` on demand
//! - **Normalization**: row records and a float table built from a
//!   [`SeriesResult`]
//!
//! ## Usage
//!
//! ```ignore
//! use cm_models::{SeriesResult, normalize};
//!
//! let data: SeriesResult = serde_json::from_str(&response_json)?;
//! for record in normalize(&data) {
//!     println!("{} {:?}", record.time, record.get("PriceUSD"));
//! }
//! ```

#![warn(clippy::all)]

pub mod catalog;
mod fields;
pub mod info;
pub mod normalize;
pub mod series;

pub use catalog::*;
pub use info::*;
pub use normalize::{Record, Table, Tabular, normalize};
pub use series::{MetricValue, SeriesResult, SeriesRow};

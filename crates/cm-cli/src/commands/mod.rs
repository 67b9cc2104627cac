pub mod catalog;
pub mod data;
pub mod reference;

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print `value` as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
  println!("{text}");
  Ok(())
}

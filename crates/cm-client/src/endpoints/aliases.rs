//! Named accessors for well-known metrics
//!
//! The `metric_accessors!` table below is the single source for both the
//! generated `get_<name>` methods and the name lookup behind
//! [`MetricDataEndpoints::get_metric`]. Every accessor, its friendly name
//! (the method name without `get_`), its compact spellings and the metric
//! code itself resolve to the same code.

use super::metric_data::MetricDataEndpoints;
use cm_core::{Error, Result, TimeAgg, Timestamp};
use cm_models::SeriesResult;
use std::collections::HashMap;

/// One row of the accessor table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricAccessor {
  /// Generated method name
  pub name: &'static str,
  /// Metric code sent to the service
  pub code: &'static str,
  /// Additional spellings accepted by the name lookup
  pub aliases: &'static [&'static str],
}

impl MetricAccessor {
  /// Every name this accessor answers to
  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    let friendly = self.name.strip_prefix("get_");
    [self.name, self.code].into_iter().chain(friendly).chain(self.aliases.iter().copied())
  }
}

macro_rules! metric_accessors {
  ($($(#[$doc:meta])* $method:ident => $code:literal $([$($alias:literal),* $(,)?])?;)*) => {
    /// Accessor table: method name, metric code and extra aliases
    pub const METRIC_ACCESSORS: &[MetricAccessor] = &[
      $(MetricAccessor { name: stringify!($method), code: $code, aliases: &[$($($alias),*)?] },)*
    ];

    impl MetricDataEndpoints {
      $(
        $(#[$doc])*
        pub async fn $method(
          &self,
          asset: &str,
          start: impl Into<Timestamp>,
          end: impl Into<Timestamp>,
        ) -> Result<SeriesResult> {
          self.get_metric_data(asset, $code, start, end, TimeAgg::Day).await
        }
      )*
    }
  };
}

metric_accessors! {
  /// Unique addresses active in the network that day (`AdrActCnt`)
  get_active_addresses => "AdrActCnt" ["activeaddresses"];
  /// Blocks created that day (`BlkCnt`)
  get_block_count => "BlkCnt" ["blockcount"];
  /// Mean size in bytes of the day's blocks (`BlkSizeMeanByte`)
  get_mean_block_size => "BlkSizeMeanByte" ["get_meanblocksize", "meanblocksize"];
  /// Market value to realized value ratio (`CapMVRVCur`)
  get_mvrv_cur => "CapMVRVCur" ["get_mvrvcur", "mvrvcur"];
  /// Realized capitalization in USD (`CapRealUSD`)
  get_real_cap => "CapRealUSD" ["get_realcap", "realized_cap"];
  /// Mean mining difficulty (`DiffMean`)
  get_diff_mean => "DiffMean" ["get_diffmean"];
  /// Mean transaction fee in USD (`FeeMeanUSD`)
  get_fee_mean => "FeeMeanUSD" ["get_feemean"];
  /// Median transaction fee in USD (`FeeMedUSD`)
  get_median_fee => "FeeMedUSD" ["get_medianfee"];
  /// Total fees in USD (`FeeTotUSD`)
  get_fee_total => "FeeTotUSD" ["get_feetotal", "fees"];
  /// New native units issued that day (`IssContNtv`)
  get_units_issued => "IssContNtv" ["get_unitsissued"];
  /// Annualized issuance as a percentage of supply (`IssContPctAnn`)
  get_units_issued_ann_pct => "IssContPctAnn" ["get_unitsannpct", "units_ann_pct"];
  /// USD value of all new units issued (`IssTotUSD`)
  get_units_issued_usd => "IssTotUSD" ["get_unitsissuedusd"];
  /// Network value to adjusted transaction volume (`NVTAdj`)
  get_nvt_adj => "NVTAdj" ["get_nvtadj"];
  /// NVT using a 90-day rolling transaction volume (`NVTAdj90`)
  get_nvt_adj_90 => "NVTAdj90" ["get_nvtadj90"];
  /// Fixed closing price in BTC (`PriceBTC`)
  get_price_btc => "PriceBTC" ["get_pricebtc"];
  /// Fixed closing price in USD (`PriceUSD`)
  get_price_usd => "PriceUSD" ["get_priceusd", "price"];
  /// Current supply in native units (`SplyCur`)
  get_cur_sply => "SplyCur" ["get_cursply", "supply"];
  /// Transactions that day (`TxCnt`)
  get_tx_count => "TxCnt" ["get_txcount"];
  /// Transfers of native units (`TxTfr`)
  get_txtfr_count => "TxTfr" ["get_txtfrcount"];
  /// Adjusted transfer value in native units (`TxTfrValAdjNtv`)
  get_txtfr_val_adj => "TxTfrValAdjNtv" ["get_txtfrvaladj"];
  /// Adjusted transfer value in USD (`TxTfrValAdjUSD`)
  get_txtfr_val_adj_usd => "TxTfrValAdjUSD" ["get_txtfrvaladjusd"];
  /// Mean transfer value in native units (`TxTfrValMeanNtv`)
  get_txtfr_val_mean => "TxTfrValMeanNtv" ["get_txtfrvalmean"];
  /// Mean transfer value in USD (`TxTfrValMeanUSD`)
  get_txtfr_val_mean_usd => "TxTfrValMeanUSD" ["get_txtfrvalmeanusd"];
  /// Median transfer value in native units (`TxTfrValMedNtv`)
  get_txtfr_val_med => "TxTfrValMedNtv" ["get_txtfrvalmed"];
  /// Median transfer value in USD (`TxTfrValMedUSD`)
  get_txtfr_val_med_usd => "TxTfrValMedUSD" ["get_txtfrvalmedusd"];
  /// Total transfer value in native units (`TxTfrValNtv`)
  get_txtfr_val => "TxTfrValNtv" ["get_txtfrval"];
  /// Total transfer value in USD (`TxTfrValUSD`)
  get_txtfr_val_usd => "TxTfrValUSD" ["get_txtfrvalusd"];
  /// 180-day volatility of daily returns (`VtyDayRet180d`)
  get_vty_ret_180d => "VtyDayRet180d" ["get_vtyret180d"];
  /// 30-day volatility of daily returns (`VtyDayRet30d`)
  get_vty_ret_30d => "VtyDayRet30d" ["get_vtyret30d"];
  /// 60-day volatility of daily returns (`VtyDayRet60d`)
  get_vty_ret_60d => "VtyDayRet60d" ["get_vtyret60d"];
}

/// Name → metric code lookup built from an accessor table
#[derive(Debug, Clone)]
pub struct AliasTable {
  entries: &'static [MetricAccessor],
  by_name: HashMap<&'static str, &'static str>,
}

impl AliasTable {
  /// Build the lookup, failing on any name claimed by two different codes
  pub fn build(entries: &'static [MetricAccessor]) -> Result<Self> {
    let mut by_name = HashMap::new();
    for entry in entries {
      for name in entry.names() {
        match by_name.insert(name, entry.code) {
          Some(previous) if previous != entry.code => {
            return Err(Error::Config(format!(
              "metric alias '{}' maps to both '{}' and '{}'",
              name, previous, entry.code
            )));
          }
          _ => {}
        }
      }
    }
    Ok(Self { entries, by_name })
  }

  /// The table behind the generated accessors
  pub fn standard() -> Result<Self> {
    Self::build(METRIC_ACCESSORS)
  }

  /// Metric code for an accessor name, alias or code
  pub fn resolve(&self, name: &str) -> Result<&'static str> {
    self
      .by_name
      .get(name)
      .copied()
      .ok_or_else(|| Error::InvalidMetric { metric: name.to_string(), asset: None })
  }

  /// Every name resolving to `code`, sorted
  pub fn names_for(&self, code: &str) -> Vec<&'static str> {
    let mut names: Vec<_> = self.by_name.iter().filter(|(_, c)| **c == code).map(|(n, _)| *n).collect();
    names.sort_unstable();
    names
  }

  pub fn entries(&self) -> &'static [MetricAccessor] {
    self.entries
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_standard_table_has_no_ambiguity() {
    let table = AliasTable::standard().unwrap();
    assert_eq!(table.entries().len(), 30);
  }

  #[test]
  fn test_all_spellings_resolve_to_one_code() {
    let table = AliasTable::standard().unwrap();
    for name in ["get_price_usd", "price_usd", "get_priceusd", "price", "PriceUSD"] {
      assert_eq!(table.resolve(name).unwrap(), "PriceUSD", "{name}");
    }
    assert_eq!(table.resolve("get_txtfr_val_adj_usd").unwrap(), "TxTfrValAdjUSD");
    assert_eq!(table.resolve("get_txtfr_val_adj").unwrap(), "TxTfrValAdjNtv");
    assert_eq!(table.resolve("get_price_btc").unwrap(), "PriceBTC");
    assert_eq!(table.resolve("cur_sply").unwrap(), "SplyCur");
  }

  #[test]
  fn test_unknown_name_is_invalid_metric() {
    let table = AliasTable::standard().unwrap();
    assert!(matches!(table.resolve("nope"), Err(Error::InvalidMetric { .. })));
  }

  #[test]
  fn test_conflicting_alias_is_flagged() {
    static CLASH: &[MetricAccessor] = &[
      MetricAccessor { name: "get_price_btc", code: "PriceBTC", aliases: &[] },
      MetricAccessor { name: "get_nvt_adj_90", code: "NVTAdj90", aliases: &["get_price_btc"] },
    ];
    let err = AliasTable::build(CLASH).unwrap_err();
    assert!(matches!(err, Error::Config(ref msg) if msg.contains("get_price_btc")));
  }

  #[test]
  fn test_names_for_code() {
    let table = AliasTable::standard().unwrap();
    assert_eq!(table.names_for("BlkCnt"), vec!["BlkCnt", "block_count", "blockcount", "get_block_count"]);
  }
}

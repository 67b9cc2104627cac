/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::Result;
use clap::{Parser, Subcommand};
use cm_client::{CoinMetricsClient, ErrorKind, ReferenceKind};
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{
  catalog::{self, CatalogArgs},
  data::{self, MetricArgs, MetricDataArgs},
  reference::{self, InfoArgs},
};

mod config;
use config::ConnectionArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "cm")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  connection: ConnectionArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// List every asset id
  Assets,
  /// List every metric code
  Metrics,
  /// List every exchange id
  Exchanges,
  /// List every market id
  Markets,
  /// Asset info entries
  AssetInfo(InfoArgs),
  /// Exchange info entries
  ExchangeInfo(InfoArgs),
  /// Metric info entries
  MetricInfo(InfoArgs),
  /// Market info entries
  MarketInfo(InfoArgs),
  /// Metrics available for one asset
  AssetMetrics {
    /// Asset id
    asset: String,
  },
  /// Validated metric data for one asset
  MetricData(MetricDataArgs),
  /// One metric by accessor name or alias
  Metric(MetricArgs),
  /// Accessor names and aliases per metric code
  Aliases {
    /// Only this metric code
    code: Option<String>,
  },
  /// Catalog listings
  Catalog(CatalogArgs),
  /// Raw index values
  IndexValues {
    /// Index id, e.g. CMBI10
    index_id: String,
  },
}

#[tokio::main]
async fn main() -> ExitCode {
  // Load environment variables
  dotenv().ok();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      let code = if e.use_stderr() { 1 } else { 0 };
      e.print().ok();
      return ExitCode::from(code);
    }
  };

  // Logs go to stderr; stdout carries the JSON output
  let log_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("Error: {:#}", e);
      let client_error = e.chain().find_map(|cause| cause.downcast_ref::<cm_client::Error>());
      if let Some(subject) = client_error.and_then(cm_client::Error::subject) {
        eprintln!("{}", subject);
      }
      ExitCode::from(client_error.map_or(1, |err| exit_code(err.kind())))
    }
  }
}

async fn run(cli: Cli) -> Result<()> {
  let config = cli.connection.config()?;
  let client = CoinMetricsClient::new(config)?;

  match cli.command {
    Commands::Assets => reference::list(&client, ReferenceKind::Asset).await,
    Commands::Metrics => reference::list(&client, ReferenceKind::Metric).await,
    Commands::Exchanges => reference::list(&client, ReferenceKind::Exchange).await,
    Commands::Markets => reference::list(&client, ReferenceKind::Market).await,
    Commands::AssetInfo(args) => reference::info(&client, ReferenceKind::Asset, args).await,
    Commands::ExchangeInfo(args) => reference::info(&client, ReferenceKind::Exchange, args).await,
    Commands::MetricInfo(args) => reference::info(&client, ReferenceKind::Metric, args).await,
    Commands::MarketInfo(args) => reference::info(&client, ReferenceKind::Market, args).await,
    Commands::AssetMetrics { asset } => reference::asset_metrics(&client, &asset).await,
    Commands::MetricData(args) => data::metric_data(&client, args).await,
    Commands::Metric(args) => data::metric(&client, args).await,
    Commands::Aliases { code } => data::aliases(&client, code.as_deref()),
    Commands::Catalog(args) => catalog::execute(&client, args).await,
    Commands::IndexValues { index_id } => catalog::index_values(&client, &index_id).await,
  }
}

fn exit_code(kind: ErrorKind) -> u8 {
  match kind {
    ErrorKind::InvalidAsset => 2,
    ErrorKind::InvalidMetric => 3,
    ErrorKind::InvalidExchange => 4,
    ErrorKind::InvalidMarket => 5,
    ErrorKind::InvalidTimeRange => 6,
    ErrorKind::Transport => 7,
    ErrorKind::MissingField => 8,
    ErrorKind::Config => 9,
    ErrorKind::Parse => 10,
  }
}

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

use anyhow::{Context, Result};
use clap::Args;
use cm_core::Config;

/// Connection flags shared by every subcommand. Each overrides the matching
/// `COINMETRICS_*` environment variable.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
  /// Pro API key; switches to the Pro API
  #[arg(long, global = true)]
  pub api_key: Option<String>,

  /// Header the API key is sent in
  #[arg(long, global = true)]
  pub api_key_header: Option<String>,

  /// Base URL override
  #[arg(long, global = true)]
  pub base_url: Option<String>,

  /// Requests per minute
  #[arg(long, global = true)]
  pub rate_limit: Option<u32>,
}

impl ConnectionArgs {
  /// Environment configuration with the command-line overrides applied
  pub fn config(&self) -> Result<Config> {
    let mut config = Config::from_env().context("Failed to load COINMETRICS_* configuration")?;
    apply(&mut config, self);
    config.validate().context("Invalid connection options")?;
    Ok(config)
  }
}

fn apply(config: &mut Config, args: &ConnectionArgs) {
  if let Some(header) = &args.api_key_header {
    config.api_key_header = header.clone();
  }

  if let Some(key) = args.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
    if !config.is_pro() {
      // Community defaults give way to Pro ones; explicit settings are kept
      if config.base_url == cm_core::COMMUNITY_BASE_URL {
        config.base_url = cm_core::PRO_BASE_URL.to_string();
      }
      if config.rate_limit == cm_core::DEFAULT_RATE_LIMIT {
        config.rate_limit = cm_core::PRO_RATE_LIMIT;
      }
    }
    config.api_key = Some(key.to_string());
  }

  if let Some(base_url) = &args.base_url {
    config.base_url = base_url.clone();
  }
  if let Some(rate_limit) = args.rate_limit {
    config.rate_limit = rate_limit;
  }
}

/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

pub mod dashboard;
pub mod interactive;
pub mod offline;

use crate::render::{render_dashboard, DEFAULT_CHART_WIDTH};
use crate::source::{DataRequest, DataSource};
use anyhow::{Context, Result};
use clap::Args;
use jq_analysis::build_report;
use tracing::debug;

/// Output options shared by every command
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
  /// Print the report as JSON instead of the terminal dashboard
  #[arg(long)]
  pub json: bool,

  /// Width of bar charts and the price sparkline
  #[arg(long, default_value_t = DEFAULT_CHART_WIDTH, env = "JQDASH_CHART_WIDTH")]
  pub chart_width: usize,
}

/// Response cache options of the API-backed commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct CacheArgs {
  /// Always go to the API, bypassing the response cache
  #[arg(long, conflicts_with = "refresh")]
  pub no_cache: bool,

  /// Re-fetch every response, then cache the fresh copies
  #[arg(long)]
  pub refresh: bool,
}

/// Fetch one dataset, run the pipeline and format the result
pub async fn load_and_render(
  source: &dyn DataSource,
  request: &DataRequest,
  output: &OutputArgs,
) -> Result<String> {
  let dataset = source.fetch(request).await?;
  debug!("Fetched dataset for {} from {}", request.code, source.name());

  let report = build_report(&dataset)
    .with_context(|| format!("building the dashboard for security {}", request.code))?;

  if output.json {
    Ok(serde_json::to_string_pretty(&report)?)
  } else {
    Ok(render_dashboard(&report, request.range.as_ref(), output.chart_width))
  }
}

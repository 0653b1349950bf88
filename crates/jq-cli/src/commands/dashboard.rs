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

use super::{load_and_render, CacheArgs, OutputArgs};
use crate::config::Config;
use crate::period::SearchWindow;
use crate::source::{ApiSource, DataRequest};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use jq_core::SecurityCode;
use tracing::info;

#[derive(Args, Debug)]
pub struct DashboardCommand {
  /// Security code (1000-9999)
  #[arg(short, long, default_value_t = SecurityCode::default())]
  code: SecurityCode,

  /// First quote date (YYYY-MM-DD), defaults to the start of the searchable window
  #[arg(long)]
  from: Option<NaiveDate>,

  /// Last quote date (YYYY-MM-DD), defaults to the end of the searchable window
  #[arg(long)]
  to: Option<NaiveDate>,

  #[command(flatten)]
  pub(crate) cache: CacheArgs,

  #[command(flatten)]
  output: OutputArgs,
}

pub async fn execute(cmd: DashboardCommand, config: Config) -> Result<()> {
  let window = SearchWindow::current();
  let range = window.select(cmd.from, cmd.to)?;
  info!("Loading security {} for {}", cmd.code, range);

  let source = ApiSource::new(config.client(&cmd.cache)?, window);
  let request = DataRequest { code: cmd.code, range: Some(range) };

  println!("{}", load_and_render(&source, &request, &cmd.output).await?);
  Ok(())
}

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

use super::{load_and_render, OutputArgs};
use crate::period::DateRange;
use crate::source::{DataRequest, FileSource};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Args;
use jq_core::SecurityCode;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OfflineCommand {
  /// `listed/info` response file
  #[arg(long)]
  info: PathBuf,

  /// `prices/daily_quotes` response file
  #[arg(long)]
  quotes: PathBuf,

  /// `fins/statements` response file
  #[arg(long)]
  statements: PathBuf,

  /// Security code the files belong to
  #[arg(short, long, default_value_t = SecurityCode::default())]
  code: SecurityCode,

  /// Drop quotes before this date
  #[arg(long)]
  from: Option<NaiveDate>,

  /// Drop quotes after this date
  #[arg(long)]
  to: Option<NaiveDate>,

  #[command(flatten)]
  output: OutputArgs,
}

pub async fn execute(cmd: OfflineCommand) -> Result<()> {
  let range = quote_range(cmd.from, cmd.to)?;
  let source = FileSource { info: cmd.info, quotes: cmd.quotes, statements: cmd.statements };
  let request = DataRequest { code: cmd.code, range };

  println!("{}", load_and_render(&source, &request, &cmd.output).await?);
  Ok(())
}

/// Files are not bound to the searchable window; either bound may be open
fn quote_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Option<DateRange>> {
  if from.is_none() && to.is_none() {
    return Ok(None);
  }

  let range =
    DateRange { from: from.unwrap_or(NaiveDate::MIN), to: to.unwrap_or(NaiveDate::MAX) };
  if range.from > range.to {
    bail!("range starts after it ends: {} > {}", range.from, range.to);
  }
  Ok(Some(range))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_open_ended_ranges() {
    let day = NaiveDate::from_ymd_opt(2023, 3, 31).unwrap();
    assert_eq!(quote_range(None, None).unwrap(), None);

    let range = quote_range(Some(day), None).unwrap().unwrap();
    assert!(range.contains(day));
    assert!(!range.contains(day.pred_opt().unwrap()));

    assert!(quote_range(Some(day), day.pred_opt()).is_err());
  }
}

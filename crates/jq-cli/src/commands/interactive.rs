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
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

#[derive(Args, Debug)]
pub struct InteractiveCommand {
  /// First quote date (YYYY-MM-DD)
  #[arg(long)]
  from: Option<NaiveDate>,

  /// Last quote date (YYYY-MM-DD)
  #[arg(long)]
  to: Option<NaiveDate>,

  #[command(flatten)]
  cache: CacheArgs,

  #[command(flatten)]
  output: OutputArgs,
}

#[derive(Debug, PartialEq)]
enum Input {
  Quit,
  Code(SecurityCode),
  Invalid(String),
}

fn parse_input(line: &str) -> Input {
  let line = line.trim();
  if line.is_empty() || line.eq_ignore_ascii_case("q") {
    return Input::Quit;
  }
  match line.parse() {
    Ok(code) => Input::Code(code),
    Err(e) => Input::Invalid(e.to_string()),
  }
}

/// Render one dashboard per code read from stdin
///
/// The client, with its tokens and response cache, is kept for the whole
/// session. A failed load is reported and the prompt comes back.
pub async fn execute(cmd: InteractiveCommand, config: Config) -> Result<()> {
  let window = SearchWindow::current();
  let range = window.select(cmd.from, cmd.to)?;
  let source = ApiSource::new(config.client(&cmd.cache)?, window);

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    print!("security code [{}-{}, empty or q quits]: ", SecurityCode::MIN, SecurityCode::MAX);
    std::io::stdout().flush()?;

    let Some(line) = lines.next_line().await? else {
      break;
    };

    match parse_input(&line) {
      Input::Quit => break,
      Input::Invalid(message) => eprintln!("{}", message),
      Input::Code(code) => {
        let request = DataRequest { code, range: Some(range) };
        match load_and_render(&source, &request, &cmd.output).await {
          Ok(output) => println!("{}", output),
          Err(e) => error!("{:#}", e),
        }
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_input() {
    assert_eq!(parse_input(""), Input::Quit);
    assert_eq!(parse_input(" Q \n"), Input::Quit);
    assert_eq!(parse_input("7203"), Input::Code(SecurityCode::new(7203).unwrap()));
    assert!(matches!(parse_input("999"), Input::Invalid(_)));
    assert!(matches!(parse_input("nintendo"), Input::Invalid(_)));
  }
}

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

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod period;
mod render;
mod source;

use commands::{
  dashboard::DashboardCommand, interactive::InteractiveCommand, offline::OfflineCommand,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "jqdash")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Fetch a security from J-Quants and render its dashboard
  Dashboard(DashboardCommand),
  /// Render a dashboard from saved J-Quants responses
  Offline(OfflineCommand),
  /// Render dashboards for security codes typed on stdin
  Interactive(InteractiveCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging; RUST_LOG overrides the default level
  let log_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  // Execute command; offline rendering needs no credentials
  match cli.command {
    Commands::Dashboard(cmd) => {
      commands::dashboard::execute(cmd, config::Config::from_env()?).await?
    }
    Commands::Offline(cmd) => commands::offline::execute(cmd).await?,
    Commands::Interactive(cmd) => {
      commands::interactive::execute(cmd, config::Config::from_env()?).await?
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_code_is_validated() {
    assert!(Cli::try_parse_from(["jqdash", "dashboard", "--code", "7974"]).is_ok());
    assert!(Cli::try_parse_from(["jqdash", "dashboard", "--code", "123"]).is_err());
  }

  #[test]
  fn test_cache_flags() {
    let cli = Cli::try_parse_from(["jqdash", "dashboard", "--refresh"]).unwrap();
    let Commands::Dashboard(cmd) = cli.command else {
      panic!("expected the dashboard command");
    };
    assert!(cmd.cache.refresh);
    assert!(!cmd.cache.no_cache);

    assert!(Cli::try_parse_from(["jqdash", "interactive", "--refresh"]).is_ok());
    assert!(Cli::try_parse_from(["jqdash", "dashboard", "--no-cache", "--refresh"]).is_err());
  }

  #[test]
  fn test_offline_requires_files() {
    assert!(Cli::try_parse_from(["jqdash", "offline", "--info", "i.json"]).is_err());
  }
}

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

//! Where a dashboard's records come from

use crate::period::{DateRange, SearchWindow};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use jq_analysis::RawDataset;
use jq_client::JQuantsClient;
use jq_core::{Endpoint, SecurityCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What to load: one security over one quote range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRequest {
  pub code: SecurityCode,
  /// `None` keeps every quote the source has
  pub range: Option<DateRange>,
}

/// A provider of the three record collections
#[async_trait]
pub trait DataSource: Send + Sync {
  /// Load company info, quotes and statements for a request
  async fn fetch(&self, request: &DataRequest) -> Result<RawDataset>;

  /// Short name for logs
  fn name(&self) -> &'static str;
}

/// Live J-Quants API
pub struct ApiSource {
  client: JQuantsClient,
  window: SearchWindow,
}

impl ApiSource {
  pub fn new(client: JQuantsClient, window: SearchWindow) -> Self {
    Self { client, window }
  }
}

#[async_trait]
impl DataSource for ApiSource {
  async fn fetch(&self, request: &DataRequest) -> Result<RawDataset> {
    let range = request.range.unwrap_or_else(|| self.window.full());
    let (listed, prices, statements) =
      (self.client.listed(), self.client.prices(), self.client.statements());

    let (company, quotes, statements) = futures::try_join!(
      listed.info(request.code, Some(range.to)),
      prices.daily_quotes(request.code, range.from, range.to),
      statements.statements(request.code),
    )
    .with_context(|| format!("loading security {} from J-Quants", request.code))?;

    info!(
      code = %request.code,
      quotes = quotes.len(),
      statements = statements.len(),
      "Loaded dataset from {}",
      self.name()
    );
    Ok(RawDataset { company, quotes, statements })
  }

  fn name(&self) -> &'static str {
    "J-Quants API"
  }
}

/// J-Quants shaped JSON files on disk
///
/// Each file holds either the API response object (`{"statements": [...]}`)
/// or the bare record array.
#[derive(Debug, Clone)]
pub struct FileSource {
  pub info: PathBuf,
  pub quotes: PathBuf,
  pub statements: PathBuf,
}

#[async_trait]
impl DataSource for FileSource {
  async fn fetch(&self, request: &DataRequest) -> Result<RawDataset> {
    let company = read_records(&self.info, Endpoint::ListedInfo).await?;
    let mut quotes: Vec<jq_models::DailyQuote> =
      read_records(&self.quotes, Endpoint::DailyQuotes).await?;
    let statements = read_records(&self.statements, Endpoint::Statements).await?;

    if let Some(range) = request.range {
      let before = quotes.len();
      quotes.retain(|quote| quote.parsed_date().is_some_and(|date| range.contains(date)));
      debug!("Kept {} of {} quotes within {}", quotes.len(), before, range);
    }

    Ok(RawDataset { company, quotes, statements })
  }

  fn name(&self) -> &'static str {
    "local files"
  }
}

async fn read_records<T: DeserializeOwned>(path: &Path, endpoint: Endpoint) -> Result<Vec<T>> {
  let text = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("reading {}", path.display()))?;
  let key = endpoint.collection_key().ok_or_else(|| anyhow!("{} has no records", endpoint))?;

  parse_records(&text, key).with_context(|| format!("parsing {}", path.display()))
}

fn parse_records<T: DeserializeOwned>(text: &str, key: &str) -> Result<Vec<T>> {
  let records = match serde_json::from_str::<Value>(text)? {
    Value::Object(mut body) => {
      body.remove(key).ok_or_else(|| anyhow!("no \"{}\" array in response object", key))?
    }
    array @ Value::Array(_) => array,
    _ => bail!("expected a JSON object or array"),
  };

  Ok(serde_json::from_value(records)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use jq_core::{Config, Credentials};
  use serde_json::json;
  use std::io::Write;
  use tempfile::NamedTempFile;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn write_json(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
  }

  fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  #[tokio::test]
  async fn test_api_source_requests_company_info_as_of_range_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/token/auth_refresh"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "idToken": "id-1" })))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/listed/info"))
      .and(query_param("date", "2023-06-30"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "info": [] })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/prices/daily_quotes"))
      .and(query_param("from", "2023-01-04"))
      .and(query_param("to", "2023-06-30"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "daily_quotes": [] })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/fins/statements"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "statements": [] })))
      .mount(&server)
      .await;

    let config = Config::default_with_credentials(Credentials::RefreshToken("rt".to_string()))
      .with_base_url(server.uri());
    let client = JQuantsClient::new(config).unwrap();
    let window = SearchWindow::as_of(date("2024-12-31"));
    let range = DateRange { from: date("2023-01-04"), to: date("2023-06-30") };

    let source = ApiSource::new(client, window);
    let request = DataRequest { code: SecurityCode::default(), range: Some(range) };
    let dataset = source.fetch(&request).await.unwrap();
    assert!(dataset.company.is_empty());
    assert!(dataset.quotes.is_empty());
  }

  #[tokio::test]
  async fn test_file_source_reads_both_shapes() {
    let info = write_json(r#"{"info": [{"Code": "79740", "CompanyName": "任天堂"}]}"#);
    let quotes = write_json(
      r#"[{"Date": "2023-03-30", "AdjustmentClose": 5600},
          {"Date": "2023-03-31", "AdjustmentClose": 5700}]"#,
    );
    let statements = write_json(
      r#"{"statements": [{"CurrentPeriodEndDate": "2023-03-31", "TypeOfCurrentPeriod": "FY",
          "NetSales": "100"}]}"#,
    );

    let source = FileSource {
      info: info.path().to_path_buf(),
      quotes: quotes.path().to_path_buf(),
      statements: statements.path().to_path_buf(),
    };
    let request = DataRequest { code: SecurityCode::default(), range: None };
    let dataset = source.fetch(&request).await.unwrap();

    assert_eq!(dataset.company[0].company_name, "任天堂");
    assert_eq!(dataset.quotes.len(), 2);
    assert_eq!(dataset.statements[0].type_of_current_period, "FY");
  }

  #[tokio::test]
  async fn test_file_source_filters_quotes_by_range() {
    let info = write_json("[]");
    let quotes = write_json(r#"[{"Date": "2023-03-30"}, {"Date": "2023-03-31"}]"#);
    let statements = write_json("[]");

    let source = FileSource {
      info: info.path().to_path_buf(),
      quotes: quotes.path().to_path_buf(),
      statements: statements.path().to_path_buf(),
    };
    let range = DateRange { from: date("2023-03-31"), to: date("2023-04-30") };
    let request = DataRequest { code: SecurityCode::default(), range: Some(range) };
    let dataset = source.fetch(&request).await.unwrap();

    assert_eq!(dataset.quotes.len(), 1);
    assert_eq!(dataset.quotes[0].date, "2023-03-31");
  }

  #[test]
  fn test_parse_records_errors() {
    assert!(parse_records::<jq_models::CompanyInfo>(r#"{"other": []}"#, "info").is_err());
    assert!(parse_records::<jq_models::CompanyInfo>("42", "info").is_err());
    assert!(parse_records::<jq_models::CompanyInfo>("not json", "info").is_err());
  }

  #[tokio::test]
  async fn test_missing_file_is_reported() {
    let source = FileSource {
      info: PathBuf::from("/nonexistent/info.json"),
      quotes: PathBuf::from("/nonexistent/quotes.json"),
      statements: PathBuf::from("/nonexistent/statements.json"),
    };
    let request = DataRequest { code: SecurityCode::default(), range: None };
    let error = source.fetch(&request).await.unwrap_err();
    assert!(format!("{:#}", error).contains("/nonexistent/info.json"));
  }
}

use std::fmt;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Cell, Store, StoreError, Table};

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// OAuth access token, needed for writes
    Bearer(String),
    /// API key, only enough to read a public sheet
    ApiKey(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(_) => f.write_str("Bearer(***)"),
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Cell>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<Cell>>,
}

/// Google Sheets v4 values API
pub struct GoogleSheets {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    credentials: Credentials,
}

impl GoogleSheets {
    pub fn new(
        base_url: &str,
        spreadsheet_id: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, StoreError> {
        let base_url =
            Url::parse(base_url).map_err(|e| StoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        })
    }

    fn values_url(&self, range: &str) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Bearer(token) => request.bearer_auth(token),
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Sheets answered {}: {}", status, body);
            Err(StoreError::Status { status, body })
        }
    }
}

/// A1 notation for a whole worksheet, quoted so names with spaces work
fn sheet_range(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

fn header_text(cell: &Cell) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[tonic::async_trait]
impl Store for GoogleSheets {
    async fn read(&self, worksheet: &str) -> Result<Table, StoreError> {
        let url = self.values_url(&sheet_range(worksheet))?;
        debug!("Reading worksheet '{}'", worksheet);

        let request = self.client.get(url).query(&[
            ("majorDimension", "ROWS"),
            ("valueRenderOption", "UNFORMATTED_VALUE"),
        ]);
        let range: ValueRange = self.send(request).await?.json().await?;

        let mut values = range.values.into_iter();
        let header = values
            .next()
            .map(|row| row.iter().map(header_text).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<Cell>> = values.collect();
        debug!("Read {} row(s) from '{}'", rows.len(), worksheet);

        Ok(Table { header, rows })
    }

    async fn overwrite(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        let range = sheet_range(worksheet);

        // The sheet may hold more rows than we are about to write
        let clear = self.values_url(&format!("{}:clear", range))?;
        self.send(self.client.post(clear).json(&json!({}))).await?;

        let mut values: Vec<Vec<Cell>> = Vec::with_capacity(table.rows.len() + 1);
        values.push(table.header.iter().cloned().map(Value::String).collect());
        values.extend(table.rows.iter().cloned());

        let body = ValueRangeBody {
            range: &range,
            major_dimension: "ROWS",
            values,
        };
        let update = self.values_url(&range)?;
        self.send(
            self.client
                .put(update)
                .query(&[("valueInputOption", "RAW")])
                .json(&body),
        )
        .await?;

        debug!("Wrote {} row(s) to '{}'", table.rows.len(), worksheet);
        Ok(())
    }
}

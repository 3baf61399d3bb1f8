use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::repository::schema::COLUMNS;
use crate::store::{Store, StoreError, Table};

pub const WORKSHEET: &str = "Sheet1";

pub fn init() {
    let _ = env_logger::builder()
        .write_style(env_logger::WriteStyle::Always)
        .filter(Some("mangashelf"), log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

#[derive(Default)]
struct Sheets {
    tables: HashMap<String, Table>,
    reads: usize,
    writes: usize,
    unreachable: bool,
}

/// In-process stand-in for the spreadsheet, shared between clones
#[derive(Clone, Default)]
pub struct MemoryStore {
    sheets: Arc<Mutex<Sheets>>,
}

impl MemoryStore {
    pub fn with_table(table: Table) -> Self {
        let store = Self::default();
        store.put(table);
        store
    }

    /// Write behind the repository's back, like another client would
    pub fn put(&self, table: Table) {
        self.sheets.lock().unwrap().tables.insert(WORKSHEET.to_string(), table);
    }

    pub fn table(&self) -> Table {
        self.sheets
            .lock()
            .unwrap()
            .tables
            .get(WORKSHEET)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reads(&self) -> usize {
        self.sheets.lock().unwrap().reads
    }

    pub fn writes(&self) -> usize {
        self.sheets.lock().unwrap().writes
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.sheets.lock().unwrap().unreachable = unreachable;
    }
}

fn unreachable() -> StoreError {
    StoreError::Status {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: String::from("connection refused"),
    }
}

#[tonic::async_trait]
impl Store for MemoryStore {
    async fn read(&self, worksheet: &str) -> Result<Table, StoreError> {
        let mut sheets = self.sheets.lock().unwrap();
        if sheets.unreachable {
            return Err(unreachable());
        }
        sheets.reads += 1;
        Ok(sheets.tables.get(worksheet).cloned().unwrap_or_default())
    }

    async fn overwrite(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        let mut sheets = self.sheets.lock().unwrap();
        if sheets.unreachable {
            return Err(unreachable());
        }
        sheets.writes += 1;
        sheets.tables.insert(worksheet.to_string(), table.clone());
        Ok(())
    }
}

/// Sheet in the legacy layout (no id column) with (title, type, status, chapter) rows
pub fn legacy_table(rows: &[(&str, &str, &str, u32)]) -> Table {
    Table {
        header: COLUMNS.iter().map(|column| column.to_string()).collect(),
        rows: rows
            .iter()
            .map(|(title, kind, status, chapter)| {
                vec![json!(title), json!(kind), json!(status), json!(chapter), json!(0), json!(""), json!("")]
            })
            .collect(),
    }
}

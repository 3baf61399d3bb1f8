use std::collections::HashSet;

use entity::{Collection, Item, ItemId, Kind, Status};
use serde_json::{json, Value};
use thiserror::Error;

use crate::store::{Cell, Table};

/// Columns every worksheet needs, in the order they are written
pub const COLUMNS: [&str; 7] = ["title", "type", "status", "chapter", "rating", "link", "image"];
/// Written after the required columns, optional on read
pub const ID_COLUMN: &str = "id";

/// The worksheet was reachable but could not be used as-is
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaWarning {
    #[error("The worksheet seems empty, check its header row")]
    Empty,
    #[error("The worksheet is missing column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
    #[error("Row {row} has an invalid {column}: '{value}'")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl SchemaWarning {
    /// Saving over a sheet with unreadable cells would erase the rows around them
    pub fn blocks_writes(&self) -> bool {
        matches!(self, SchemaWarning::InvalidCell { .. })
    }
}

/// Column index of every field in the stored header
struct Layout {
    required: [usize; 7],
    id: Option<usize>,
}

impl Layout {
    fn from_header(header: &[String]) -> Result<Self, SchemaWarning> {
        let find = |name: &str| header.iter().position(|column| column.trim() == name);

        let missing: Vec<&'static str> = COLUMNS
            .iter()
            .copied()
            .filter(|column| find(*column).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaWarning::MissingColumns(missing));
        }

        let mut required = [0; 7];
        for (slot, column) in required.iter_mut().zip(COLUMNS) {
            *slot = find(column).unwrap_or_default();
        }

        Ok(Self {
            required,
            id: find(ID_COLUMN),
        })
    }
}

fn text(cell: &Cell) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn optional_text(cell: &Cell) -> Option<String> {
    Some(text(cell)).filter(|value| !value.trim().is_empty())
}

fn whole_number(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}

fn chapter(cell: &Cell) -> Option<u32> {
    match cell {
        Value::Null => Some(0),
        Value::Number(n) => match n.as_u64() {
            Some(n) => u32::try_from(n).ok(),
            None => n.as_f64().and_then(whole_number),
        },
        Value::String(s) if s.trim().is_empty() => Some(0),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().and_then(whole_number)),
        _ => None,
    }
}

fn rating(cell: &Cell) -> Option<f64> {
    match cell {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|r| r.is_finite()),
        _ => None,
    }
}

fn decode_row(position: usize, row: &[Cell], layout: &Layout) -> Result<Item, SchemaWarning> {
    let null = Value::Null;
    let cell = |index: usize| row.get(index).unwrap_or(&null);
    let invalid = |column: &'static str, index: usize| SchemaWarning::InvalidCell {
        // Header is row 1
        row: position + 2,
        column,
        value: text(cell(index)),
    };
    let [title, kind, status, chapter_at, rating_at, link, image] = layout.required;

    let title = text(cell(title));
    let id = match layout.id.map(cell).and_then(optional_text) {
        Some(id) => id
            .parse::<ItemId>()
            .map_err(|_| invalid(ID_COLUMN, layout.id.unwrap_or_default()))?,
        None => ItemId::legacy(position, &title),
    };

    Ok(Item {
        id,
        kind: Kind::from_stored(&text(cell(kind))),
        status: Status::from_stored(&text(cell(status))),
        chapter: chapter(cell(chapter_at)).ok_or_else(|| invalid("chapter", chapter_at))?,
        rating: rating(cell(rating_at)).ok_or_else(|| invalid("rating", rating_at))?,
        link: optional_text(cell(link)),
        image: optional_text(cell(image)),
        title,
    })
}

/// Turn a worksheet into a collection. Any problem rejects the whole table.
pub fn decode(table: &Table) -> Result<Collection, SchemaWarning> {
    if table.header.is_empty() || table.rows.is_empty() {
        return Err(SchemaWarning::Empty);
    }

    let layout = Layout::from_header(&table.header)?;
    let extra = table
        .header
        .len()
        .saturating_sub(COLUMNS.len() + usize::from(layout.id.is_some()));
    if extra > 0 {
        warn!("Ignoring {} unknown column(s) in the worksheet", extra);
    }

    let mut seen = HashSet::new();
    table
        .rows
        .iter()
        .enumerate()
        .map(|(position, row)| {
            let mut item = decode_row(position, row, &layout)?;
            if !seen.insert(item.id) {
                // A row copied together with its id; it needs an id of its own
                let id = ItemId::legacy(position, &item.title);
                warn!(
                    "Row {} repeats id {}, using {} instead",
                    position + 2,
                    item.id,
                    id
                );
                item.id = id;
                seen.insert(id);
            }
            Ok(item)
        })
        .collect()
}

pub fn encode(collection: &Collection) -> Table {
    let mut header: Vec<String> = COLUMNS.iter().map(|column| column.to_string()).collect();
    header.push(ID_COLUMN.to_string());

    let rows = collection
        .iter()
        .map(|item| {
            vec![
                json!(item.title),
                json!(item.kind.as_str()),
                json!(item.status.as_str()),
                json!(item.chapter),
                json!(item.rating),
                json!(item.link.as_deref().unwrap_or_default()),
                json!(item.image.as_deref().unwrap_or_default()),
                json!(item.id.to_string()),
            ]
        })
        .collect();

    Table { header, rows }
}

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::tag::{Kind, Status};

/// Namespace for ids of rows that were written before the sheet had an id column
const LEGACY_NAMESPACE: Uuid = Uuid::from_u128(0x6d61_6e67_6173_6865_6c66_2d6c_6567_6163);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id for a row without one, so two loads of the same sheet agree
    pub fn legacy(position: usize, title: &str) -> Self {
        Self(Uuid::new_v5(
            &LEGACY_NAMESPACE,
            format!("{}:{}", position, title).as_bytes(),
        ))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub kind: Kind,
    pub status: Status,
    pub chapter: u32,
    /// Not editable through any operation yet
    pub rating: f64,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl Item {
    /// Card caption, e.g. "12 ch. • InProgress"
    pub fn caption(&self) -> String {
        format!("{} ch. • {}", self.chapter, self.status)
    }
}

/// Everything the add form collects
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub kind: Kind,
    pub status: Status,
    pub chapter: u32,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl NewItem {
    pub const DEFAULT_CHAPTER: u32 = 1;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: Kind::default(),
            status: Status::default(),
            chapter: Self::DEFAULT_CHAPTER,
            link: None,
            image: None,
        }
    }

    /// `None` when the title is blank
    pub fn into_item(self) -> Option<Item> {
        if self.title.trim().is_empty() {
            return None;
        }

        Some(Item {
            id: ItemId::new(),
            title: self.title,
            kind: self.kind,
            status: self.status,
            chapter: self.chapter,
            rating: 0.0,
            link: non_blank(self.link),
            image: non_blank(self.image),
        })
    }
}

pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

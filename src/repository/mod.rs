use entity::Collection;

use crate::cache::TableCache;
use crate::store::{Store, StoreError};

use self::schema::SchemaWarning;

pub mod schema;

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub collection: Collection,
    /// Set when the worksheet was unusable and an empty collection was used instead
    pub warning: Option<SchemaWarning>,
}

/// Full-table persistence of the collection in one worksheet
pub struct Repository {
    store: Box<dyn Store>,
    cache: Box<dyn TableCache>,
    worksheet: String,
}

impl Repository {
    pub fn new(
        store: impl Store + 'static,
        cache: impl TableCache + 'static,
        worksheet: impl Into<String>,
    ) -> Self {
        Self {
            store: Box::new(store),
            cache: Box::new(cache),
            worksheet: worksheet.into(),
        }
    }

    /// Load the whole worksheet. Only an unreachable store is an error.
    pub async fn load(&mut self) -> Result<Loaded, StoreError> {
        let table = match self.cache.get(&self.worksheet) {
            Some(table) => {
                debug!("Using cached copy of '{}'", self.worksheet);
                table
            }
            None => {
                let table = self.store.read(&self.worksheet).await?;
                self.cache.insert(&self.worksheet, table.clone());
                table
            }
        };

        match schema::decode(&table) {
            Ok(collection) => Ok(Loaded {
                collection,
                warning: None,
            }),
            Err(warning) => {
                warn!("Worksheet '{}' can not be used: {}", self.worksheet, warning);
                Ok(Loaded {
                    collection: Collection::default(),
                    warning: Some(warning),
                })
            }
        }
    }

    /// Replace the whole worksheet with `collection`
    pub async fn save(&mut self, collection: &Collection) -> Result<(), StoreError> {
        let table = schema::encode(collection);
        let saved = self.store.overwrite(&self.worksheet, &table).await;

        // Even a failed write may have cleared the sheet
        self.cache.invalidate(&self.worksheet);

        if saved.is_ok() {
            info!("Saved {} item(s) to '{}'", collection.len(), self.worksheet);
        }
        saved
    }
}

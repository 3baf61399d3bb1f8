use std::sync::Arc;

use entity::{Collection, ItemId, NewItem};
use tokio::sync::Mutex;

use crate::error::ShelfError;
use crate::repository::schema::SchemaWarning;
use crate::repository::{Loaded, Repository};
use crate::util::filter::Selection;

pub const ADDED_NOTICE: &str = "Added!";

/// One shelf for the whole server. Holding the lock serializes interaction cycles.
pub type SharedShelf = Arc<Mutex<Shelf>>;

/// Result of an interaction cycle: the freshly loaded collection and what to show of it
#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    pub collection: Collection,
    pub selection: Selection,
    pub warning: Option<SchemaWarning>,
    pub notice: Option<String>,
}

pub struct Shelf {
    repository: Repository,
}

impl Shelf {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn shared(self) -> SharedShelf {
        Arc::new(Mutex::new(self))
    }

    /// Load and select. A missing facet selection selects all of its values.
    pub async fn gallery(
        &mut self,
        types: Option<Vec<String>>,
        statuses: Option<Vec<String>>,
    ) -> Result<Gallery, ShelfError> {
        let Loaded {
            collection,
            warning,
        } = self.repository.load().await?;
        let selection = Selection::resolve(&collection, types, statuses);

        Ok(Gallery {
            collection,
            selection,
            warning,
            notice: None,
        })
    }

    /// Load for a mutation. An empty or badly shaped sheet may be replaced, one with
    /// unreadable cells may not.
    async fn load_writable(&mut self) -> Result<Collection, ShelfError> {
        let Loaded {
            collection,
            warning,
        } = self.repository.load().await?;

        match warning {
            Some(warning) if warning.blocks_writes() => Err(ShelfError::Unwritable(warning)),
            _ => Ok(collection),
        }
    }

    pub async fn add(&mut self, new: NewItem) -> Result<Gallery, ShelfError> {
        let mut collection = self.load_writable().await?;

        let notice = match collection.add(new) {
            Some(item) => {
                info!("Adding '{}' ({})", item.title, item.id);
                self.repository.save(&collection).await?;
                Some(ADDED_NOTICE.to_string())
            }
            None => {
                debug!("Ignoring an item without a title");
                None
            }
        };

        let mut gallery = self.gallery(None, None).await?;
        gallery.notice = notice;
        Ok(gallery)
    }

    pub async fn increment_chapter(&mut self, id: ItemId) -> Result<Gallery, ShelfError> {
        let mut collection = self.load_writable().await?;

        let item = collection
            .increment_chapter(id)
            .ok_or(ShelfError::NotFound(id))?;
        info!("'{}' is now at chapter {}", item.title, item.chapter);
        self.repository.save(&collection).await?;

        self.gallery(None, None).await
    }

    pub async fn delete(&mut self, id: ItemId) -> Result<Gallery, ShelfError> {
        let mut collection = self.load_writable().await?;

        let item = collection.remove(id).ok_or(ShelfError::NotFound(id))?;
        info!("Deleting '{}' ({})", item.title, item.id);
        self.repository.save(&collection).await?;

        self.gallery(None, None).await
    }
}

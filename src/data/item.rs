use entity::{Item, Kind, NewItem, Status};

use crate::error::ShelfError;
use crate::proto::{ItemReply, ItemRequest};

impl From<&Item> for ItemReply {
    fn from(value: &Item) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title.clone(),
            r#type: value.kind.to_string(),
            status: value.status.to_string(),
            chapter: value.chapter,
            rating: value.rating,
            link: value.link.clone(),
            image: value.image.clone(),
        }
    }
}

/// Blank means "not chosen"
fn chosen(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl TryFrom<ItemRequest> for NewItem {
    type Error = ShelfError;

    /// Tags have to be one of the known choices, unlike what is read from the sheet
    fn try_from(value: ItemRequest) -> Result<Self, Self::Error> {
        let kind = chosen(value.r#type)
            .map(|kind| kind.parse::<Kind>())
            .transpose()?
            .unwrap_or_default();
        let status = chosen(value.status)
            .map(|status| status.parse::<Status>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            title: value.title,
            kind,
            status,
            chapter: value.chapter.unwrap_or(NewItem::DEFAULT_CHAPTER),
            link: chosen(value.link),
            image: chosen(value.image),
        })
    }
}

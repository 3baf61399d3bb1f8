use entity::Item;

use crate::proto::{CardReply, GalleryReply};
use crate::shelf::Gallery;
use crate::util::filter::{self, Facet};

/// Shown instead of a cover when an item has no image
pub const PLACEHOLDER_COVER: &str = "📘";
pub const GALLERY_COLUMNS: usize = 3;

/// `position` counts shown cards only, so a filtered gallery has no gaps
fn card(position: usize, item: &Item) -> CardReply {
    CardReply {
        item: Some(item.into()),
        caption: item.caption(),
        column: (position % GALLERY_COLUMNS) as u32,
        cover: item
            .image
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_COVER.to_string()),
        has_image: item.image.is_some(),
        read_link: item.link.clone(),
    }
}

impl From<Gallery> for GalleryReply {
    fn from(value: Gallery) -> Self {
        let cards = filter::apply(&value.collection, &value.selection)
            .into_iter()
            .enumerate()
            .map(|(position, item)| card(position, item))
            .collect();

        Self {
            cards,
            available_types: filter::available_values(&value.collection, Facet::Type),
            available_statuses: filter::available_values(&value.collection, Facet::Status),
            selected_types: value.selection.types,
            selected_statuses: value.selection.statuses,
            warning: value.warning.map(|warning| warning.to_string()),
            notice: value.notice,
        }
    }
}

#[macro_use]
extern crate log;

pub mod collection;
pub mod item;
pub mod tag;

pub use collection::Collection;
pub use item::{Item, ItemId, NewItem};
pub use tag::{Kind, ParseTagError, Status};

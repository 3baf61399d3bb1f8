use entity::{ItemId, ParseTagError};
use thiserror::Error;
use tonic::Status;

use crate::repository::schema::SchemaWarning;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Connection error: {0}")]
    Connection(#[from] StoreError),
    #[error("Item {0} not found")]
    NotFound(ItemId),
    #[error(transparent)]
    InvalidTag(#[from] ParseTagError),
    #[error("Refusing to write until the worksheet is fixed: {0}")]
    Unwritable(SchemaWarning),
}

impl From<ShelfError> for Status {
    fn from(value: ShelfError) -> Self {
        match value {
            ShelfError::Connection(_) => {
                error!("{}", value);
                Status::unavailable(value.to_string())
            }
            ShelfError::NotFound(_) => Status::not_found(value.to_string()),
            ShelfError::InvalidTag(_) => Status::invalid_argument(value.to_string()),
            ShelfError::Unwritable(_) => {
                warn!("{}", value);
                Status::failed_precondition(value.to_string())
            }
        }
    }
}

use tonic::{Request, Status};

use crate::shelf::SharedShelf;

pub trait ShelfRequest {
    fn shelf(&self) -> Result<&SharedShelf, Status>;
}

impl<T> ShelfRequest for Request<T> {
    fn shelf(&self) -> Result<&SharedShelf, Status> {
        self.extensions()
            .get::<SharedShelf>()
            .ok_or(Status::internal("Lost track of the collection :("))
    }
}

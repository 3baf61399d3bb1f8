use entity::{ItemId, Kind, NewItem, Status as ReadingStatus};
use tonic::{Request, Response, Status};

use crate::proto::collection_server::{Collection, CollectionServer};
use crate::proto::{
    Empty, FacetReply, FacetRequest, FilterRequest, FormReply, GalleryReply, Id, ItemRequest,
};
use crate::util::filter::{self, Facet};
use crate::util::shelf::ShelfRequest;

fn parse_id(id: &str) -> Result<ItemId, Status> {
    id.parse()
        .map_err(|_| Status::invalid_argument(format!("'{}' is not a valid item id", id)))
}

#[derive(Debug, Default)]
pub struct MyCollection {}

#[tonic::async_trait]
impl Collection for MyCollection {
    /// Choices for the add form
    async fn form(&self, _request: Request<Empty>) -> Result<Response<FormReply>, Status> {
        Ok(Response::new(FormReply {
            types: Kind::CHOICES.iter().map(|kind| kind.to_string()).collect(),
            statuses: ReadingStatus::CHOICES
                .iter()
                .map(|status| status.to_string())
                .collect(),
            default_chapter: NewItem::DEFAULT_CHAPTER,
        }))
    }

    /// Gallery of the current collection
    async fn index(
        &self,
        request: Request<FilterRequest>,
    ) -> Result<Response<GalleryReply>, Status> {
        let shelf = request.shelf()?;
        let req = request.get_ref();

        let gallery = shelf
            .lock()
            .await
            .gallery(
                req.types.clone().map(|selection| selection.values),
                req.statuses.clone().map(|selection| selection.values),
            )
            .await?;

        Ok(Response::new(gallery.into()))
    }

    /// Values a facet currently has
    async fn facet(&self, request: Request<FacetRequest>) -> Result<Response<FacetReply>, Status> {
        let shelf = request.shelf()?;
        let facet = Facet::from_name(&request.get_ref().name)?;

        let gallery = shelf.lock().await.gallery(None, None).await?;

        Ok(Response::new(FacetReply {
            values: filter::available_values(&gallery.collection, facet),
        }))
    }

    /// Add an item at the end
    async fn create(
        &self,
        request: Request<ItemRequest>,
    ) -> Result<Response<GalleryReply>, Status> {
        let shelf = request.shelf()?.clone();
        let new = NewItem::try_from(request.into_inner())?;

        let gallery = shelf.lock().await.add(new).await?;

        Ok(Response::new(gallery.into()))
    }

    /// Read one more chapter
    async fn increment_chapter(
        &self,
        request: Request<Id>,
    ) -> Result<Response<GalleryReply>, Status> {
        let shelf = request.shelf()?;
        let id = parse_id(&request.get_ref().id)?;

        let gallery = shelf.lock().await.increment_chapter(id).await?;

        Ok(Response::new(gallery.into()))
    }

    async fn delete(&self, request: Request<Id>) -> Result<Response<GalleryReply>, Status> {
        let shelf = request.shelf()?;
        let id = parse_id(&request.get_ref().id)?;

        let gallery = shelf.lock().await.delete(id).await?;

        Ok(Response::new(gallery.into()))
    }
}

crate::export_server!(CollectionServer, MyCollection);

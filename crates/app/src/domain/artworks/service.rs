//! Artworks service.

use std::sync::Arc;

use async_trait::async_trait;
use atelier::{
    artworks::Artwork,
    catalog::HomeCollection,
    documents::{FromDocument, collections},
};
use mockall::automock;

use crate::{
    domain::artworks::errors::ArtworksServiceError,
    gateway::{DocumentStore, Filter, Query, fetch_by_ids, parse_documents},
};

/// Field linking an artwork to its category.
pub const CATEGORY_ID_FIELD: &str = "categoryId";

/// Field linking an artwork to its artist.
pub const ARTIST_ID_FIELD: &str = "artistId";

#[derive(Clone)]
pub struct GatewayArtworksService {
    store: Arc<dyn DocumentStore>,
}

impl GatewayArtworksService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn find(&self, query: Query) -> Result<Vec<Artwork>, ArtworksServiceError> {
        let documents = self.store.query(Artwork::COLLECTION, &query).await?;

        Ok(parse_documents(&documents))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Artwork>, ArtworksServiceError> {
        let documents = fetch_by_ids(self.store.as_ref(), collections::PRODUCTS, ids).await?;

        Ok(parse_documents(&documents))
    }
}

impl std::fmt::Debug for GatewayArtworksService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayArtworksService").finish_non_exhaustive()
    }
}

#[async_trait]
impl ArtworksService for GatewayArtworksService {
    async fn get_artwork(&self, id: &str) -> Result<Artwork, ArtworksServiceError> {
        let document = self
            .store
            .get(Artwork::COLLECTION, id)
            .await?
            .ok_or(ArtworksServiceError::NotFound)?;

        Ok(document.parse()?)
    }

    async fn list_artworks(&self) -> Result<Vec<Artwork>, ArtworksServiceError> {
        self.find(Query::all()).await
    }

    async fn related_artworks(
        &self,
        artwork: &Artwork,
    ) -> Result<Vec<Artwork>, ArtworksServiceError> {
        self.find_by_ids(&artwork.related_products).await
    }

    async fn artworks_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Artwork>, ArtworksServiceError> {
        self.find(Query::all().filter(Filter::equal(CATEGORY_ID_FIELD, category_id)))
            .await
    }

    async fn artworks_by_artist(
        &self,
        artist_id: &str,
    ) -> Result<Vec<Artwork>, ArtworksServiceError> {
        self.find(Query::all().filter(Filter::equal(ARTIST_ID_FIELD, artist_id)))
            .await
    }

    async fn collection_artworks(
        &self,
        collection: &HomeCollection,
    ) -> Result<Vec<Artwork>, ArtworksServiceError> {
        self.find_by_ids(&collection.product_ids).await
    }
}

#[automock]
#[async_trait]
pub trait ArtworksService: Send + Sync {
    /// Retrieve a single artwork.
    async fn get_artwork(&self, id: &str) -> Result<Artwork, ArtworksServiceError>;

    /// Retrieves all artworks.
    async fn list_artworks(&self) -> Result<Vec<Artwork>, ArtworksServiceError>;

    /// Retrieve the artworks listed as related, in the listed order.
    async fn related_artworks(
        &self,
        artwork: &Artwork,
    ) -> Result<Vec<Artwork>, ArtworksServiceError>;

    /// Retrieve the artworks in a category.
    async fn artworks_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Artwork>, ArtworksServiceError>;

    /// Retrieve the artworks by an artist.
    async fn artworks_by_artist(
        &self,
        artist_id: &str,
    ) -> Result<Vec<Artwork>, ArtworksServiceError>;

    /// Retrieve the members of a curated home page collection, in collection order.
    async fn collection_artworks(
        &self,
        collection: &HomeCollection,
    ) -> Result<Vec<Artwork>, ArtworksServiceError>;
}

#[cfg(test)]
mod tests {
    use atelier::documents::DocumentError;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        gateway::{FilterOp, GatewayError, MockDocumentStore},
        test::helpers::{artwork_document, document},
    };

    use super::*;

    fn service(store: MockDocumentStore) -> GatewayArtworksService {
        GatewayArtworksService::new(Arc::new(store))
    }

    fn names(artworks: &[Artwork]) -> Vec<&str> {
        artworks.iter().map(|artwork| artwork.name.as_str()).collect()
    }

    #[tokio::test]
    async fn get_artwork_parses_document() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_get()
            .withf(|collection, id| {
                collection.to_string() == collections::PRODUCTS && id.to_string() == "art-1"
            })
            .times(1)
            .returning(|_, id| Ok(Some(artwork_document(id, 1200))));

        let artwork = service(store).get_artwork("art-1").await?;

        assert_eq!(artwork.id, "art-1");
        assert_eq!(artwork.name, "Artwork art-1");

        Ok(())
    }

    #[tokio::test]
    async fn get_artwork_reports_missing_document() {
        let mut store = MockDocumentStore::new();
        store.expect_get().returning(|_, _| Ok(None));

        let result = service(store).get_artwork("gone").await;

        assert!(matches!(result, Err(ArtworksServiceError::NotFound)));
    }

    #[tokio::test]
    async fn gateway_document_errors_surface_as_invalid_document() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .returning(|_, _| Err(GatewayError::Document(DocumentError::MissingId)));

        let result = service(store).get_artwork("art-1").await;

        assert!(matches!(
            result,
            Err(ArtworksServiceError::InvalidDocument(DocumentError::MissingId))
        ));
    }

    #[tokio::test]
    async fn related_artworks_follow_declared_order() -> TestResult {
        let mut store = MockDocumentStore::new();

        store.expect_query().times(1).returning(|_, _| {
            Ok(vec![
                artwork_document("c", 300),
                artwork_document("a", 100),
            ])
        });

        let mut artwork: Artwork = document(json!({ "id": "main" })).parse()?;
        artwork.related_products = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let related = service(store).related_artworks(&artwork).await?;

        assert_eq!(names(&related), vec!["Artwork a", "Artwork c"]);

        Ok(())
    }

    #[tokio::test]
    async fn artworks_by_category_filters_on_category_id() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_query()
            .withf(|_, query| {
                query.filters().iter().any(|filter| {
                    filter.field == CATEGORY_ID_FIELD
                        && filter.op == FilterOp::Equal
                        && filter.value == json!("cat-sketch")
                })
            })
            .times(1)
            .returning(|_, _| Ok(vec![artwork_document("s1", 450)]));

        let artworks = service(store).artworks_by_category("cat-sketch").await?;

        assert_eq!(names(&artworks), vec!["Artwork s1"]);

        Ok(())
    }

    #[tokio::test]
    async fn artworks_by_artist_filters_on_artist_id() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_query()
            .withf(|_, query| {
                query
                    .filters()
                    .iter()
                    .any(|filter| filter.field == ARTIST_ID_FIELD && filter.value == json!("meera"))
            })
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        assert!(service(store).artworks_by_artist("meera").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn collection_artworks_resolve_product_ids() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_query()
            .times(1)
            .returning(|_, _| Ok(vec![artwork_document("p2", 10), artwork_document("p1", 20)]));

        let collection: HomeCollection = document(json!({
            "id": "featured",
            "productIds": ["p1", "p2"]
        }))
        .parse()?;

        let artworks = service(store).collection_artworks(&collection).await?;

        assert_eq!(names(&artworks), vec!["Artwork p1", "Artwork p2"]);

        Ok(())
    }

    #[tokio::test]
    async fn gateway_failures_propagate() {
        let mut store = MockDocumentStore::new();
        store.expect_query().returning(|_, _| {
            Err(GatewayError::UnexpectedResponse("boom".to_string()))
        });

        let result = service(store).list_artworks().await;

        assert!(matches!(result, Err(ArtworksServiceError::Gateway(_))));
    }
}

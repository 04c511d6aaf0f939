//! Catalog store.
//!
//! Holds the collections the storefront browses, each in its own [`FetchState`]. Fetches
//! replace the whole state; concurrent readers see either the previous or the new one.

use std::sync::Arc;

use atelier::{
    artworks::Artwork,
    catalog::{
        Artist, Banner, Category, HomeCollection, StoreConfiguration, sort_by_display_order,
    },
    categories::{MenuItem, TreeNode, build_tree},
    documents::FromDocument,
};
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::{
    domain::catalog::state::FetchState,
    gateway::{DocumentStore, Filter, GatewayError, Query, parse_documents},
};

/// Field marking categories, banners and collections as visible.
pub const IS_ACTIVE_FIELD: &str = "isActive";

/// Field marking categories rendered as home page sections.
pub const IS_SECTION_FIELD: &str = "isSection";

type Ordering<T> = Option<fn(&T) -> f64>;

/// Catalog collections fetched from the document store, each with its own fetch state.
pub struct CatalogStore {
    store: Arc<dyn DocumentStore>,
    categories: RwLock<FetchState<Vec<Category>>>,
    section_categories: RwLock<FetchState<Vec<Category>>>,
    products: RwLock<FetchState<Vec<Artwork>>>,
    menus: RwLock<FetchState<Vec<MenuItem>>>,
    configuration: RwLock<FetchState<StoreConfiguration>>,
    artists: RwLock<FetchState<Vec<Artist>>>,
    banners: RwLock<FetchState<Vec<Banner>>>,
    home_collections: RwLock<FetchState<Vec<HomeCollection>>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore").finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Create a store with every collection idle.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            categories: RwLock::default(),
            section_categories: RwLock::default(),
            products: RwLock::default(),
            menus: RwLock::default(),
            configuration: RwLock::default(),
            artists: RwLock::default(),
            banners: RwLock::default(),
            home_collections: RwLock::default(),
        }
    }

    async fn load<T>(
        &self,
        slot: &RwLock<FetchState<Vec<T>>>,
        query: Query,
        ordering: Ordering<T>,
    ) -> FetchState<Vec<T>>
    where
        T: FromDocument + Clone,
    {
        *slot.write().await = FetchState::Loading;

        let result = self
            .store
            .query(T::COLLECTION, &query)
            .await
            .map(|documents| {
                let mut records: Vec<T> = parse_documents(&documents);

                if let Some(order) = ordering {
                    sort_by_display_order(&mut records, order);
                }

                records
            });

        let state = settle(T::COLLECTION, result);

        *slot.write().await = state.clone();

        state
    }

    /// Fetch active categories.
    pub async fn fetch_categories(&self) -> FetchState<Vec<Category>> {
        let query = Query::all().filter(Filter::equal(IS_ACTIVE_FIELD, true));

        self.load(&self.categories, query, Some(|c: &Category| c.display_order))
            .await
    }

    /// Fetch categories rendered as home page sections.
    pub async fn fetch_section_categories(&self) -> FetchState<Vec<Category>> {
        let query = Query::all().filter(Filter::equal(IS_SECTION_FIELD, true));

        self.load(
            &self.section_categories,
            query,
            Some(|c: &Category| c.display_order),
        )
        .await
    }

    /// Fetch every artwork.
    pub async fn fetch_products(&self) -> FetchState<Vec<Artwork>> {
        self.load(&self.products, Query::all(), None).await
    }

    /// Fetch navigation menu items.
    pub async fn fetch_menus(&self) -> FetchState<Vec<MenuItem>> {
        self.load(&self.menus, Query::all(), Some(|m: &MenuItem| m.display_order))
            .await
    }

    /// Fetch artists.
    pub async fn fetch_artists(&self) -> FetchState<Vec<Artist>> {
        self.load(&self.artists, Query::all(), None).await
    }

    /// Fetch active banners.
    pub async fn fetch_banners(&self) -> FetchState<Vec<Banner>> {
        let query = Query::all().filter(Filter::equal(IS_ACTIVE_FIELD, true));

        self.load(&self.banners, query, Some(|b: &Banner| b.display_order))
            .await
    }

    /// Fetch active curated home page collections.
    pub async fn fetch_home_collections(&self) -> FetchState<Vec<HomeCollection>> {
        let query = Query::all().filter(Filter::equal(IS_ACTIVE_FIELD, true));

        self.load(
            &self.home_collections,
            query,
            Some(|h: &HomeCollection| h.display_order),
        )
        .await
    }

    /// Fetch the store configuration. A missing document yields the defaults.
    pub async fn fetch_configuration(&self) -> FetchState<StoreConfiguration> {
        *self.configuration.write().await = FetchState::Loading;

        let result = self
            .store
            .query(StoreConfiguration::COLLECTION, &Query::all())
            .await
            .map(|documents| {
                parse_documents::<StoreConfiguration>(&documents)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| {
                        debug!("no configuration document, using defaults");
                        StoreConfiguration::default()
                    })
            });

        let state = settle(StoreConfiguration::COLLECTION, result);

        *self.configuration.write().await = state.clone();

        state
    }

    /// Fetch every collection concurrently.
    pub async fn fetch_all(&self) {
        tokio::join!(
            self.fetch_categories(),
            self.fetch_section_categories(),
            self.fetch_products(),
            self.fetch_menus(),
            self.fetch_configuration(),
            self.fetch_artists(),
            self.fetch_banners(),
            self.fetch_home_collections(),
        );
    }

    /// Current state of the active categories.
    pub async fn categories(&self) -> FetchState<Vec<Category>> {
        self.categories.read().await.clone()
    }

    /// Current state of the home page section categories.
    pub async fn section_categories(&self) -> FetchState<Vec<Category>> {
        self.section_categories.read().await.clone()
    }

    /// Current state of the artworks.
    pub async fn products(&self) -> FetchState<Vec<Artwork>> {
        self.products.read().await.clone()
    }

    /// Current state of the flat menu items.
    pub async fn menus(&self) -> FetchState<Vec<MenuItem>> {
        self.menus.read().await.clone()
    }

    /// Menu items arranged as a display-ordered forest.
    pub async fn menu_tree(&self) -> FetchState<Vec<TreeNode<MenuItem>>> {
        self.menus().await.map(build_tree)
    }

    /// Current state of the store configuration.
    pub async fn configuration(&self) -> FetchState<StoreConfiguration> {
        self.configuration.read().await.clone()
    }

    /// Current state of the artists.
    pub async fn artists(&self) -> FetchState<Vec<Artist>> {
        self.artists.read().await.clone()
    }

    /// Current state of the active banners.
    pub async fn banners(&self) -> FetchState<Vec<Banner>> {
        self.banners.read().await.clone()
    }

    /// Current state of the active home page collections.
    pub async fn home_collections(&self) -> FetchState<Vec<HomeCollection>> {
        self.home_collections.read().await.clone()
    }
}

fn settle<T>(collection: &str, result: Result<T, GatewayError>) -> FetchState<T> {
    if let Err(error) = &result {
        error!(collection, %error, "failed to fetch collection");
    }

    result.into()
}

#[cfg(test)]
mod tests {
    use atelier::documents::collections;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        gateway::{FilterOp, MockDocumentStore},
        test::helpers::document,
    };

    use super::*;

    fn catalog(store: MockDocumentStore) -> CatalogStore {
        CatalogStore::new(Arc::new(store))
    }

    #[tokio::test]
    async fn collections_start_idle() {
        let catalog = catalog(MockDocumentStore::new());

        assert_eq!(catalog.categories().await, FetchState::Idle);
        assert_eq!(catalog.configuration().await, FetchState::Idle);
        assert_eq!(format!("{catalog:?}"), "CatalogStore { .. }");
    }

    #[tokio::test]
    async fn categories_are_filtered_active_and_ordered() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_query()
            .withf(|collection, query| {
                collection.to_string() == collections::PRODUCT_CATEGORIES
                    && query.filters().iter().any(|filter| {
                        filter.field == IS_ACTIVE_FIELD
                            && filter.op == FilterOp::Equal
                            && filter.value == json!(true)
                    })
            })
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    document(json!({ "id": "c2", "name": "Sketches", "displayOrder": 2 })),
                    document(json!({ "id": "c1", "name": "Paintings", "displayOrder": 1 })),
                ])
            });

        let catalog = catalog(store);
        catalog.fetch_categories().await;

        let state = catalog.categories().await;
        let names: Vec<&str> = state
            .data()
            .ok_or("categories should be loaded")?
            .iter()
            .map(|category| category.name.as_str())
            .collect();

        assert_eq!(names, vec!["Paintings", "Sketches"]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_stores_error_message() {
        let mut store = MockDocumentStore::new();

        store
            .expect_query()
            .returning(|_, _| Err(GatewayError::UnexpectedResponse("offline".to_string())));

        let catalog = catalog(store);
        let state = catalog.fetch_banners().await;

        assert_eq!(
            state.error(),
            Some("unexpected response from document store: offline")
        );
        assert_eq!(catalog.banners().await, state);
    }

    #[tokio::test]
    async fn refetch_replaces_previous_error() -> TestResult {
        let mut store = MockDocumentStore::new();
        let mut calls = 0;

        store.expect_query().times(2).returning(move |_, _| {
            calls += 1;

            if calls == 1 {
                Err(GatewayError::UnexpectedResponse("offline".to_string()))
            } else {
                Ok(vec![document(json!({ "id": "a1", "name": "Meera Iyer" }))])
            }
        });

        let catalog = catalog(store);

        assert!(catalog.fetch_artists().await.error().is_some());
        assert_eq!(
            catalog.fetch_artists().await.data().map(Vec::len),
            Some(1)
        );

        Ok(())
    }

    #[tokio::test]
    async fn menu_tree_is_built_from_loaded_menus() -> TestResult {
        let mut store = MockDocumentStore::new();

        store.expect_query().times(1).returning(|_, _| {
            Ok(vec![
                document(json!({ "id": "1", "name": "Shop", "displayOrder": 2 })),
                document(json!({ "id": "2", "name": "Home", "displayOrder": 1 })),
                document(json!({ "id": "3", "name": "Prints", "parentId": "2" })),
            ])
        });

        let catalog = catalog(store);
        catalog.fetch_menus().await;

        let tree = catalog.menu_tree().await;
        let roots = tree.data().ok_or("menus should be loaded")?;

        let ids: Vec<&str> = roots.iter().map(|node| node.item.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(roots.first().map(|node| node.children.len()), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn missing_configuration_uses_defaults() -> TestResult {
        let mut store = MockDocumentStore::new();
        store.expect_query().returning(|_, _| Ok(Vec::new()));

        let catalog = catalog(store);
        let state = catalog.fetch_configuration().await;

        assert_eq!(state.data(), Some(&StoreConfiguration::default()));

        Ok(())
    }

    #[tokio::test]
    async fn fetch_all_loads_every_collection() {
        let mut store = MockDocumentStore::new();
        store.expect_query().times(8).returning(|_, _| Ok(Vec::new()));

        let catalog = catalog(store);
        catalog.fetch_all().await;

        assert!(catalog.products().await.data().is_some());
        assert!(catalog.section_categories().await.data().is_some());
        assert!(catalog.home_collections().await.data().is_some());
        assert!(catalog.configuration().await.data().is_some());
    }
}

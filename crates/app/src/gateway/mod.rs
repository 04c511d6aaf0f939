//! Remote data gateway
//!
//! Read-only access to the named collections of the document store. Everything returned here
//! is an untyped [`Document`]; mapping into domain records happens at the call site.

use async_trait::async_trait;
use atelier::documents::{Document, FromDocument};
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::warn;

pub mod errors;
mod http;

pub use errors::GatewayError;
pub use http::{HttpDocumentStore, HttpDocumentStoreConfig};

/// Largest number of values the store accepts in one `in` filter.
pub const MAX_IN_FILTER_VALUES: usize = 10;

/// Field holding the document id in queries.
pub const ID_FIELD: &str = "id";

/// Filter comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOp {
    /// Field equals value
    #[serde(rename = "==")]
    Equal,

    /// Field is one of the listed values
    #[serde(rename = "in")]
    In,
}

/// A single field filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    /// Field name
    pub field: String,

    /// Operator
    pub op: FilterOp,

    /// Operand
    pub value: Value,
}

impl Filter {
    /// Equality filter.
    pub fn equal(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Equal,
            value: value.into(),
        }
    }

    /// Membership filter.
    pub fn one_of(field: &str, values: &[String]) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::In,
            value: Value::from(values.to_vec()),
        }
    }
}

/// Conjunction of filters. An empty query matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: SmallVec<[Filter; 2]>,
}

impl Query {
    /// Query matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Filters, in the order they were added.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by id. Returns `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, GatewayError>;

    /// Fetch every document matching the query.
    async fn query(&self, collection: &str, query: &Query)
    -> Result<Vec<Document>, GatewayError>;
}

/// Fetch documents by id in batches the store accepts, returning them in the order given.
///
/// Duplicate ids are fetched once. Ids the store does not return are skipped.
///
/// # Errors
///
/// Returns the first [`GatewayError`] raised by a batch.
pub async fn fetch_by_ids(
    store: &dyn DocumentStore,
    collection: &str,
    ids: &[String],
) -> Result<Vec<Document>, GatewayError> {
    let mut seen = FxHashSet::default();
    let unique: Vec<String> = ids
        .iter()
        .filter(|id| !id.is_empty() && seen.insert(id.as_str()))
        .cloned()
        .collect();

    let mut found: FxHashMap<String, Document> = FxHashMap::default();

    for batch in unique.chunks(MAX_IN_FILTER_VALUES) {
        let query = Query::all().filter(Filter::one_of(ID_FIELD, batch));

        for document in store.query(collection, &query).await? {
            found.insert(document.id.clone(), document);
        }
    }

    Ok(unique
        .iter()
        .filter_map(|id| {
            let document = found.remove(id);

            if document.is_none() {
                warn!(collection, id = %id, "document not found");
            }

            document
        })
        .collect())
}

/// Map documents into records, skipping any that are rejected.
pub fn parse_documents<T: FromDocument>(documents: &[Document]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|document| match document.parse() {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(collection = T::COLLECTION, id = %document.id, %error, "skipping document");
                None
            }
        })
        .collect()
}

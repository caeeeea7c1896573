use std::sync::Arc;
use tokio::sync::RwLock;

/// Initial search text: the parking lot name filter with an empty value.
pub const DEFAULT_SEARCH_QUERY: &str = "parkingLotName=";

/// SearchStore
///
/// The portal's current search text. Cloning the store clones the handle, not the text,
/// so every holder sees the same value. It is created by the application root and handed
/// to whatever needs it; nothing is persisted.
///
/// The string is opaque here. Callers build and interpret its `key=value` shape.
#[derive(Clone, Debug)]
pub struct SearchStore {
    query: Arc<RwLock<String>>,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::with_query(DEFAULT_SEARCH_QUERY)
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Arc::new(RwLock::new(query.into())),
        }
    }

    pub async fn search_query(&self) -> String {
        self.query.read().await.clone()
    }

    /// Replaces the whole search text. No validation.
    pub async fn set_search_query(&self, query: impl Into<String>) {
        *self.query.write().await = query.into();
    }
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new()
    }
}

pub mod client;
pub mod payload;
pub mod query;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::MenuItem;

pub use client::HttpMenuApi;
pub use query::{ComboQuery, ItemQuery, QueryParams};

/// The menu service as seen by the combo session.
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// Restaurant names, in service order.
    async fn restaurants(&self) -> Result<Vec<String>>;

    /// Category names for one restaurant.
    async fn categories(&self, restaurant: &str) -> Result<Vec<String>>;

    /// Items matching the filters.
    async fn items(&self, query: &ItemQuery) -> Result<Vec<MenuItem>>;

    /// Items whose combined macros fit the budget in `query`.
    async fn combo(&self, query: &ComboQuery) -> Result<Vec<MenuItem>>;
}

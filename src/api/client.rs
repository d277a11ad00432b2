use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::api::payload::{parse_menu_items, parse_string_list};
use crate::api::query::{ComboQuery, ItemQuery, QueryParams};
use crate::api::MenuApi;
use crate::config::Settings;
use crate::error::Result;
use crate::models::MenuItem;

const RESTAURANTS_PATH: &str = "/api/get_restaurants";
const CATEGORIES_PATH: &str = "/api/categories";
const MENU_PATH: &str = "/api/menu";
const COMBO_PATH: &str = "/api/combo";

/// `MenuApi` over HTTP.
pub struct HttpMenuApi {
    http_client: Client,
    server_url: String,
}

impl HttpMenuApi {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            server_url: settings.server_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str, params: &QueryParams) -> Result<Value> {
        let url = format!("{}{}", self.server_url, path);
        debug!(%url, params = ?params.pairs(), "GET");

        let body = self
            .http_client
            .get(&url)
            .query(params.pairs())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(body)
    }
}

#[async_trait]
impl MenuApi for HttpMenuApi {
    async fn restaurants(&self) -> Result<Vec<String>> {
        let body = self.get_json(RESTAURANTS_PATH, &QueryParams::new()).await?;
        Ok(parse_string_list(body))
    }

    async fn categories(&self, restaurant: &str) -> Result<Vec<String>> {
        let mut params = QueryParams::new();
        params.push_str("restaurant", Some(restaurant));
        let body = self.get_json(CATEGORIES_PATH, &params).await?;
        Ok(parse_string_list(body))
    }

    async fn items(&self, query: &ItemQuery) -> Result<Vec<MenuItem>> {
        let body = self.get_json(MENU_PATH, &query.to_params()).await?;
        Ok(parse_menu_items(body))
    }

    async fn combo(&self, query: &ComboQuery) -> Result<Vec<MenuItem>> {
        let body = self.get_json(COMBO_PATH, &query.to_params()).await?;
        Ok(parse_menu_items(body))
    }
}

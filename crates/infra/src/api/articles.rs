//! Article endpoints: listing, CRUD, and publishing.

use std::sync::Arc;

use backoffice_domain::constants::ARTICLES_ENDPOINT;
use backoffice_domain::{Article, ArticleCreate, ArticleQuery, ArticleUpdate, PaginatedResponse};
use reqwest::Method;
use serde_json::Value;

use crate::http::{GatewayResult, HttpGateway, RequestOptions};

/// Client for `/backoffice/articles`
#[derive(Clone)]
pub struct ArticlesApi {
    gateway: Arc<HttpGateway>,
}

impl ArticlesApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &ArticleQuery) -> GatewayResult<PaginatedResponse<Article>> {
        let options = RequestOptions::new().query_pairs(query.query_pairs());
        self.gateway.get(ARTICLES_ENDPOINT, options).await
    }

    pub async fn get(&self, id: &str) -> GatewayResult<Article> {
        self.gateway.get(&item_path(id), RequestOptions::new()).await
    }

    pub async fn create(&self, article: &ArticleCreate) -> GatewayResult<Article> {
        self.gateway.post(ARTICLES_ENDPOINT, article, RequestOptions::new()).await
    }

    pub async fn update(&self, id: &str, article: &ArticleUpdate) -> GatewayResult<Article> {
        self.gateway.put(&item_path(id), article, RequestOptions::new()).await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        let _: Value = self.gateway.delete(&item_path(id), RequestOptions::new()).await?;
        Ok(())
    }

    /// Move a draft to published; the server stamps `publishedAt`.
    pub async fn publish(&self, id: &str) -> GatewayResult<Article> {
        let path = format!("{}/publish", item_path(id));
        self.gateway.request::<(), _>(Method::POST, &path, None, RequestOptions::new()).await
    }
}

fn item_path(id: &str) -> String {
    format!("{ARTICLES_ENDPOINT}/{id}")
}

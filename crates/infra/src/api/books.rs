//! Book endpoints.

use std::sync::Arc;

use backoffice_domain::constants::BOOKS_ENDPOINT;
use backoffice_domain::{Book, BookCreate, BookQuery, BookUpdate, PaginatedResponse};
use serde_json::Value;

use crate::http::{GatewayResult, HttpGateway, RequestOptions};

/// Client for `/backoffice/books`
#[derive(Clone)]
pub struct BooksApi {
    gateway: Arc<HttpGateway>,
}

impl BooksApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &BookQuery) -> GatewayResult<PaginatedResponse<Book>> {
        let options = RequestOptions::new().query_pairs(query.query_pairs());
        self.gateway.get(BOOKS_ENDPOINT, options).await
    }

    pub async fn get(&self, id: &str) -> GatewayResult<Book> {
        self.gateway.get(&item_path(id), RequestOptions::new()).await
    }

    /// The backend answers creation without a usable body.
    pub async fn create(&self, book: &BookCreate) -> GatewayResult<()> {
        let _: Value = self.gateway.post(BOOKS_ENDPOINT, book, RequestOptions::new()).await?;
        Ok(())
    }

    pub async fn update(&self, id: &str, book: &BookUpdate) -> GatewayResult<Book> {
        self.gateway.put(&item_path(id), book, RequestOptions::new()).await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        let _: Value = self.gateway.delete(&item_path(id), RequestOptions::new()).await?;
        Ok(())
    }
}

fn item_path(id: &str) -> String {
    format!("{BOOKS_ENDPOINT}/{id}")
}

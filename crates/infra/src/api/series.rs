//! Series endpoints: listing and CRUD.

use std::sync::Arc;

use backoffice_domain::constants::SERIES_ENDPOINT;
use backoffice_domain::{Serie, SerieCreate, SerieList, SerieUpdate, SeriesQuery};
use serde_json::Value;

use crate::http::{GatewayResult, HttpGateway, RequestOptions};

/// Client for `/backoffice/series`
#[derive(Clone)]
pub struct SeriesApi {
    gateway: Arc<HttpGateway>,
}

impl SeriesApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &SeriesQuery) -> GatewayResult<SerieList> {
        let options = RequestOptions::new().query_pairs(query.query_pairs());
        self.gateway.get(SERIES_ENDPOINT, options).await
    }

    pub async fn create(&self, serie: &SerieCreate) -> GatewayResult<Serie> {
        self.gateway.post(SERIES_ENDPOINT, serie, RequestOptions::new()).await
    }

    pub async fn update(&self, id: &str, serie: &SerieUpdate) -> GatewayResult<Serie> {
        self.gateway.put(&format!("{SERIES_ENDPOINT}/{id}"), serie, RequestOptions::new()).await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        let path = format!("{SERIES_ENDPOINT}/{id}");
        let _: Value = self.gateway.delete(&path, RequestOptions::new()).await?;
        Ok(())
    }
}

//! API client for the public Pokemon catalog.
//!
//! Two read-only routes are used: the paged collection and the by-id detail
//! record. No retries happen here; callers decide what to do with a failure.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::models::{Pokemon, PokemonPage, RawPokemon};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the catalog API
pub const API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// HTTP request timeout in milliseconds.
pub const REQUEST_TIMEOUT_MS: u64 = 5000;

/// Page size used when the caller does not pick one
pub const DEFAULT_LIMIT: u32 = 20;

/// Source of catalog data. Implemented by `CatalogClient` over HTTP and by
/// fakes in tests.
pub trait Catalog: Send + Sync {
    /// Fetch one page of the collection. Entries come back without ids.
    fn list_page(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<PokemonPage, ApiError>> + Send;

    /// Fetch and normalize one detail record.
    fn get_detail(&self, id: u32) -> impl Future<Output = Result<Pokemon, ApiError>> + Send;
}

/// API client for the catalog.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resource URL for an id, in the same shape the collection endpoint uses
    pub fn pokemon_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}/", self.base_url, id)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, u32)]) -> Result<T, ApiError> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(ApiError::from_send)?;

        let response = Self::check_response(response).await?;

        let text = response.text().await.map_err(ApiError::from_send)?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }
}

impl Catalog for CatalogClient {
    async fn list_page(&self, offset: u32, limit: u32) -> Result<PokemonPage, ApiError> {
        let url = format!("{}/pokemon", self.base_url);
        debug!(offset, limit, "Fetching pokemon page");
        self.get(&url, &[("offset", offset), ("limit", limit)]).await
    }

    async fn get_detail(&self, id: u32) -> Result<Pokemon, ApiError> {
        let url = format!("{}/pokemon/{}", self.base_url, id);
        debug!(id, "Fetching pokemon detail");
        let raw: RawPokemon = self.get(&url, &[]).await?;
        Ok(raw.into_pokemon())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> CatalogClient {
        CatalogClient::with_base_url(&server.url(), Duration::from_millis(REQUEST_TIMEOUT_MS))
            .expect("Failed to build test client")
    }

    #[test]
    fn test_pokemon_url() {
        let client = CatalogClient::with_base_url("https://pokeapi.co/api/v2/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(client.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(client.pokemon_url(25), "https://pokeapi.co/api/v2/pokemon/25/");
    }

    #[tokio::test]
    async fn test_list_page_sends_offset_and_limit() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}]
        });
        let mock = server
            .mock("GET", "/pokemon")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("offset".into(), "3".into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let page = client_for(&server).list_page(3, 1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.count, 1);
        assert_eq!(page.next, None);
        assert_eq!(page.results[0].name, "charmander");
    }

    #[tokio::test]
    async fn test_list_page_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pokemon")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let result = client_for(&server).list_page(0, DEFAULT_LIMIT).await;
        assert!(matches!(result, Err(ApiError::ServerError(_))));
    }

    #[tokio::test]
    async fn test_get_detail_normalizes_response() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "id": 1,
            "name": "bulbasaur",
            "types": [{"type": {"name": "grass"}}, {"type": {"name": "poison"}}],
            "height": 7,
            "weight": 69,
            "sprites": {"front_default": "https://example.com/bulbasaur.png"}
        });
        let mock = server
            .mock("GET", "/pokemon/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let pokemon = client_for(&server).get_detail(1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            pokemon,
            Pokemon {
                id: 1,
                name: "bulbasaur".to_string(),
                types: "grass, poison".to_string(),
                height: 7,
                weight: 69,
                image: Some("https://example.com/bulbasaur.png".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_get_detail_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pokemon/999")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let result = client_for(&server).get_detail(999).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_detail_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pokemon/1")
            .with_status(200)
            .with_body(r#"{"id": 1, "name": "bulbasaur"}"#)
            .create_async()
            .await;

        let result = client_for(&server).get_detail(1).await;
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }
}

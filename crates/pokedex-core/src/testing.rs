//! Test doubles shared by the cache and store tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::api::{ApiError, Catalog};
use crate::models::{ListingEntry, Pokemon, PokemonPage, SimplePokemon};
use crate::utils::sync::lock;

/// In-memory catalog that records every call. Each call yields once before
/// answering so overlapping calls actually interleave.
#[derive(Default)]
pub struct FakeCatalog {
    pages: Mutex<HashMap<(u32, u32), PokemonPage>>,
    details: Mutex<HashMap<u32, Pokemon>>,
    list_calls: Mutex<Vec<(u32, u32)>>,
    detail_calls: Mutex<Vec<u32>>,
    fail: AtomicBool,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, offset: u32, limit: u32, page: PokemonPage) -> Self {
        lock(&self.pages).insert((offset, limit), page);
        self
    }

    pub fn with_detail(self, pokemon: Pokemon) -> Self {
        lock(&self.details).insert(pokemon.id, pokemon);
        self
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        lock(&self.list_calls).clone()
    }

    pub fn detail_calls(&self) -> Vec<u32> {
        lock(&self.detail_calls).clone()
    }
}

impl Catalog for FakeCatalog {
    async fn list_page(&self, offset: u32, limit: u32) -> Result<PokemonPage, ApiError> {
        lock(&self.list_calls).push((offset, limit));
        tokio::task::yield_now().await;
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::ServerError("API Error".to_string()));
        }
        lock(&self.pages)
            .get(&(offset, limit))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("page {} {}", offset, limit)))
    }

    async fn get_detail(&self, id: u32) -> Result<Pokemon, ApiError> {
        lock(&self.detail_calls).push(id);
        tokio::task::yield_now().await;
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::ServerError("API Error".to_string()));
        }
        lock(&self.details)
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("pokemon {}", id)))
    }
}

pub fn entry(id: u32, name: &str) -> SimplePokemon {
    SimplePokemon {
        id,
        name: name.to_string(),
        url: format!("https://pokeapi.co/api/v2/pokemon/{}/", id),
    }
}

pub fn page(entries: &[SimplePokemon], count: u32, next: Option<&str>) -> PokemonPage {
    PokemonPage {
        count,
        next: next.map(String::from),
        previous: None,
        results: entries
            .iter()
            .map(|e| ListingEntry {
                name: e.name.clone(),
                url: e.url.clone(),
            })
            .collect(),
    }
}

pub fn bulbasaur() -> Pokemon {
    Pokemon {
        id: 1,
        name: "bulbasaur".to_string(),
        types: "grass, poison".to_string(),
        height: 7,
        weight: 69,
        image: Some("https://example.com/bulbasaur.png".to_string()),
    }
}

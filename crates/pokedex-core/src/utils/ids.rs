//! Identifier derivation for listing entries.
//!
//! The collection endpoint only returns `{name, url}` pairs. The numeric id
//! is the last path segment of a resource URL shaped like
//! `.../pokemon/<id>/`, so the trailing slash is part of the contract.

use crate::error::IntegrityError;
use crate::models::{ListingEntry, SimplePokemon};

/// Parse the id out of a `.../<resource>/<id>/` URL.
pub fn id_from_resource_url(url: &str) -> Result<u32, IntegrityError> {
    // Splitting ".../pokemon/4/" yields [.., "pokemon", "4", ""]; the id is second from the end.
    url.rsplit('/')
        .nth(1)
        .and_then(|segment| segment.parse::<u32>().ok())
        .ok_or_else(|| IntegrityError::MalformedResourceUrl(url.to_string()))
}

/// Attach derived ids to a page of listing entries, preserving order.
pub fn add_ids(entries: Vec<ListingEntry>) -> Result<Vec<SimplePokemon>, IntegrityError> {
    entries
        .into_iter()
        .map(|entry| {
            let id = id_from_resource_url(&entry.url)?;
            Ok(SimplePokemon {
                id,
                name: entry.name,
                url: entry.url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_resource_url() {
        assert_eq!(id_from_resource_url("https://pokeapi.co/api/v2/pokemon/4/"), Ok(4));
        assert_eq!(id_from_resource_url("https://pokeapi.co/api/v2/pokemon/1025/"), Ok(1025));
        assert_eq!(id_from_resource_url("/pokemon/7/"), Ok(7));
    }

    #[test]
    fn test_id_from_resource_url_rejects_bad_shapes() {
        // Missing trailing slash puts the resource name where the id should be
        assert!(id_from_resource_url("https://pokeapi.co/api/v2/pokemon/4").is_err());
        assert!(id_from_resource_url("https://pokeapi.co/api/v2/pokemon/abc/").is_err());
        assert!(id_from_resource_url("").is_err());
        assert_eq!(
            id_from_resource_url("nope"),
            Err(IntegrityError::MalformedResourceUrl("nope".to_string()))
        );
    }

    #[test]
    fn test_add_ids() {
        let entries = vec![ListingEntry {
            name: "charmander".to_string(),
            url: "https://pokeapi.co/api/v2/pokemon/4/".to_string(),
        }];

        let enriched = add_ids(entries).unwrap();
        assert_eq!(
            enriched,
            vec![SimplePokemon {
                id: 4,
                name: "charmander".to_string(),
                url: "https://pokeapi.co/api/v2/pokemon/4/".to_string(),
            }]
        );
    }

    #[test]
    fn test_add_ids_fails_on_first_bad_entry() {
        let entries = vec![
            ListingEntry {
                name: "bulbasaur".to_string(),
                url: "https://pokeapi.co/api/v2/pokemon/1/".to_string(),
            },
            ListingEntry {
                name: "broken".to_string(),
                url: "https://pokeapi.co/api/v2/pokemon/".to_string(),
            },
        ];

        assert!(add_ids(entries).is_err());
    }
}

//! Data models for catalog entities.
//!
//! - `SimplePokemon`, `ListingEntry`: listing entries with and without a derived id
//! - `Pokemon`: normalized detail record
//! - `RawPokemon` and friends: the detail payload as the catalog sends it
//! - `Paginate`, `PokemonPage`, `AllPokemonsResponse`: paging metadata and pages

pub mod page;
pub mod pokemon;

pub use page::{AllPokemonsResponse, Paginate, PokemonPage};
pub use pokemon::{ListingEntry, NamedResource, Pokemon, RawPokemon, RawSprites, RawTypeSlot, SimplePokemon};

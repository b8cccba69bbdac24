use serde::{Deserialize, Serialize};

use crate::utils::format::{capitalize, format_tenths, join_type_names};

/// A listing entry with its id derived from the resource URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePokemon {
    pub id: u32,
    pub name: String,
    pub url: String,
}

/// A listing entry exactly as the collection endpoint returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
}

/// Normalized detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Type names joined with ", "
    #[serde(rename = "type")]
    pub types: String,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub image: Option<String>,
}

impl Pokemon {
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }

    pub fn height_display(&self) -> String {
        format_tenths(self.height, "m")
    }

    pub fn weight_display(&self) -> String {
        format_tenths(self.weight, "kg")
    }
}

// ============================================================================
// Raw API payloads
// ============================================================================

/// Detail payload from `GET /pokemon/{id}`. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<RawTypeSlot>,
    pub sprites: RawSprites,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
}

impl RawPokemon {
    /// Convert to the normalized detail shape.
    pub fn into_pokemon(self) -> Pokemon {
        let types = join_type_names(self.types.iter().map(|t| t.type_ref.name.as_str()));
        Pokemon {
            id: self.id,
            name: self.name,
            types,
            height: self.height,
            weight: self.weight,
            image: self.sprites.front_default,
        }
    }
}

impl From<RawPokemon> for Pokemon {
    fn from(raw: RawPokemon) -> Self {
        raw.into_pokemon()
    }
}

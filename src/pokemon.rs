// pokemon.rs
// Wire models for the PokeAPI resources touched by one lookup, plus the
// Entity snapshot built from the root resource.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NamedAPIResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pokemon {
    pub id: i32,
    pub name: String,
    pub sprites: PokemonSprites,
    pub types: Vec<PokemonType>,
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
    pub species: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonType {
    pub slot: i32,
    pub r#type: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonStat {
    pub base_stat: i32,
    pub stat: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonMove {
    pub r#move: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonSpecies {
    pub generation: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Generation {
    pub main_region: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Move {
    pub name: String,
    #[serde(default)]
    pub names: Vec<Name>,
    pub r#type: NamedAPIResource,
    pub power: Option<i32>,
    #[serde(default)]
    pub effect_entries: Vec<VerboseEffect>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Name {
    pub name: String,
    pub language: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VerboseEffect {
    pub short_effect: String,
    pub language: NamedAPIResource,
}

/// One (stat name, base value) pair, in API order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatValue {
    pub name: String,
    pub base: i32,
}

/// Immutable snapshot of the root creature record for one query cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: i32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub stats: Vec<StatValue>,
    pub move_urls: Vec<String>,
    pub species_url: String,
}

impl From<Pokemon> for Entity {
    fn from(pokemon: Pokemon) -> Self {
        let mut types = pokemon.types;
        types.sort_by_key(|t| t.slot);

        Self {
            id: pokemon.id,
            name: pokemon.name,
            sprite: pokemon.sprites.front_default,
            types: types.into_iter().map(|t| t.r#type.name).collect(),
            stats: pokemon
                .stats
                .into_iter()
                .map(|s| StatValue {
                    name: s.stat.name,
                    base: s.base_stat,
                })
                .collect(),
            move_urls: pokemon.moves.into_iter().map(|m| m.r#move.url).collect(),
            species_url: pokemon.species.url,
        }
    }
}

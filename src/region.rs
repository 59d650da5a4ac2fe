use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::fetcher::{Fetcher, fetch_as};
use crate::pokemon::{Generation, PokemonSpecies};

pub const UNKNOWN_REGION: &str = "unknown";

/// Main region of an entity's generation, or the fallback when it can't be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionName {
    Known(String),
    Unknown,
}

impl RegionName {
    pub fn as_str(&self) -> &str {
        match self {
            RegionName::Known(name) => name,
            RegionName::Unknown => UNKNOWN_REGION,
        }
    }
}

impl std::fmt::Display for RegionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RegionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Species → generation → main region. Never fails; any error at either hop
/// is logged and yields [`RegionName::Unknown`].
pub async fn resolve_region(fetcher: &dyn Fetcher, species_url: &str) -> RegionName {
    match lookup_region(fetcher, species_url).await {
        Ok(name) => RegionName::Known(name),
        Err(e) => {
            tracing::warn!("Failed to resolve region from {}: {}", species_url, e);
            RegionName::Unknown
        }
    }
}

async fn lookup_region(fetcher: &dyn Fetcher, species_url: &str) -> Result<String> {
    let species: PokemonSpecies = fetch_as(fetcher, species_url).await?;
    let generation: Generation = fetch_as(fetcher, &species.generation.url).await?;
    Ok(generation.main_region.name)
}

//! JSON shapes returned by the upstream character API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::character::{
    CharacterDetail as DomainCharacterDetail, CharacterPage as DomainCharacterPage,
    CharacterSummary as DomainCharacterSummary, Place as DomainPlace,
};
use crate::domain::types::{CharacterId, TypeConstraintError};

#[derive(Debug, Clone, Deserialize)]
/// Body of `GET /character/?page=..&name=..`.
pub struct ApiCharacterList {
    pub info: ApiPageInfo,
    #[serde(default)]
    pub results: Vec<ApiCharacter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPageInfo {
    #[serde(default)]
    pub count: usize,
    pub pages: usize,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlace {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
/// Body of `GET /character/{id}` and one entry of a listing.
///
/// Listing conversion only needs `id`, `name` and `image`, so the remaining
/// fields default when absent.
pub struct ApiCharacter {
    pub id: i32,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub gender: String,
    pub origin: Option<ApiPlace>,
    pub location: Option<ApiPlace>,
    pub created: Option<String>,
    #[serde(default)]
    pub episode: Vec<String>,
}

impl From<ApiPlace> for DomainPlace {
    fn from(place: ApiPlace) -> Self {
        Self { name: place.name }
    }
}

fn place_or_unknown(place: Option<ApiPlace>) -> DomainPlace {
    place.map(DomainPlace::from).unwrap_or(DomainPlace {
        name: "unknown".to_string(),
    })
}

impl TryFrom<ApiCharacter> for DomainCharacterSummary {
    type Error = TypeConstraintError;

    fn try_from(character: ApiCharacter) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CharacterId::new(character.id)?,
            name: character.name,
            image: character.image,
        })
    }
}

impl TryFrom<ApiCharacter> for DomainCharacterDetail {
    type Error = TypeConstraintError;

    fn try_from(character: ApiCharacter) -> Result<Self, Self::Error> {
        let created = character
            .created
            .as_deref()
            .ok_or_else(|| TypeConstraintError::InvalidValue("missing created".to_string()))
            .and_then(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| TypeConstraintError::InvalidValue(format!("created: {e}")))
            })?;

        Ok(Self {
            id: CharacterId::new(character.id)?,
            name: character.name,
            image: character.image,
            status: character.status,
            species: character.species,
            gender: character.gender,
            origin: place_or_unknown(character.origin),
            location: place_or_unknown(character.location),
            created,
            episode: character.episode,
        })
    }
}

impl TryFrom<ApiCharacterList> for DomainCharacterPage {
    type Error = TypeConstraintError;

    fn try_from(list: ApiCharacterList) -> Result<Self, Self::Error> {
        let characters = list
            .results
            .into_iter()
            .map(DomainCharacterSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(characters, list.info.pages))
    }
}

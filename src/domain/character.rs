use chrono::{DateTime, Locale, Utc};
use serde::Serialize;

use crate::domain::types::CharacterId;

/// Listing card shape.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub image: String,
}

/// Named place a character originates from or was last seen at.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Place {
    pub name: String,
}

/// Full record shown on the detail page.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CharacterDetail {
    pub id: CharacterId,
    pub name: String,
    pub image: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub origin: Place,
    pub location: Place,
    pub created: DateTime<Utc>,
    /// Episode URLs in airing order. Only the count is displayed.
    pub episode: Vec<String>,
}

impl CharacterDetail {
    pub fn episode_count(&self) -> usize {
        self.episode.len()
    }

    /// Creation timestamp in French long form, e.g. `samedi 4 novembre 2017 à 18:48:46`.
    pub fn created_display(&self) -> String {
        self.created
            .format_localized("%A %-d %B %Y à %H:%M:%S", Locale::fr_FR)
            .to_string()
    }
}

/// One page of a listing query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterPage {
    pub characters: Vec<CharacterSummary>,
    /// Total number of pages for the query, at least one.
    pub total_pages: usize,
}

impl CharacterPage {
    #[must_use]
    pub fn new(characters: Vec<CharacterSummary>, total_pages: usize) -> Self {
        Self {
            characters,
            total_pages: total_pages.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_detail() -> CharacterDetail {
        CharacterDetail {
            id: CharacterId::new(1).expect("valid id"),
            name: "Rick Sanchez".to_string(),
            image: "https://rickandmortyapi.com/api/character/avatar/1.jpeg".to_string(),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            gender: "Male".to_string(),
            origin: Place {
                name: "Earth (C-137)".to_string(),
            },
            location: Place {
                name: "Citadel of Ricks".to_string(),
            },
            created: Utc
                .with_ymd_and_hms(2017, 11, 4, 18, 48, 46)
                .single()
                .expect("valid timestamp"),
            episode: vec![
                "https://rickandmortyapi.com/api/episode/1".to_string(),
                "https://rickandmortyapi.com/api/episode/2".to_string(),
            ],
        }
    }

    #[test]
    fn created_display_is_french_long_form() {
        let display = sample_detail().created_display();
        assert!(display.contains("4 novembre 2017"), "got {display}");
        assert!(display.ends_with("18:48:46"), "got {display}");
    }

    #[test]
    fn episode_count_uses_list_length() {
        assert_eq!(sample_detail().episode_count(), 2);
    }

    #[test]
    fn page_total_is_never_zero() {
        let page = CharacterPage::new(Vec::new(), 0);
        assert_eq!(page.total_pages, 1);
    }
}

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tera::Tera;

use characters_web::domain::character::{
    CharacterDetail, CharacterPage, CharacterSummary, Place,
};
use characters_web::domain::types::CharacterId;
use characters_web::upstream::errors::{UpstreamError, UpstreamResult};
use characters_web::upstream::{CharacterListQuery, CharacterReader};

/// In-memory character source recording every listing query.
pub struct StubReader {
    /// `None` makes every listing fail like an unreachable upstream.
    listing: Option<CharacterPage>,
    detail: Option<CharacterDetail>,
    list_calls: Mutex<Vec<CharacterListQuery>>,
}

impl StubReader {
    pub fn new(listing: Option<CharacterPage>, detail: Option<CharacterDetail>) -> Arc<Self> {
        Arc::new(Self {
            listing,
            detail,
            list_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn list_calls(&self) -> Vec<CharacterListQuery> {
        self.list_calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl CharacterReader for StubReader {
    async fn list_characters(&self, query: CharacterListQuery) -> UpstreamResult<CharacterPage> {
        self.list_calls.lock().expect("lock").push(query);
        self.listing
            .clone()
            .ok_or_else(|| UpstreamError::Transport("connection refused".to_string()))
    }

    async fn get_character(&self, id: CharacterId) -> UpstreamResult<Option<CharacterDetail>> {
        Ok(self.detail.clone().filter(|detail| detail.id == id))
    }
}

pub fn reader_data(stub: &Arc<StubReader>) -> web::Data<dyn CharacterReader> {
    let reader: Arc<dyn CharacterReader> = stub.clone();
    web::Data::from(reader)
}

pub fn tera_data() -> web::Data<Tera> {
    web::Data::new(Tera::new("templates/**/*.html").expect("templates parse"))
}

pub fn cards(count: i32) -> Vec<CharacterSummary> {
    (1..=count)
        .map(|id| CharacterSummary {
            id: CharacterId::new(id).expect("valid id"),
            name: format!("Character {id}"),
            image: format!("https://example.test/avatar/{id}.jpeg"),
        })
        .collect()
}

pub fn rick() -> CharacterDetail {
    CharacterDetail {
        id: CharacterId::new(1).expect("valid id"),
        name: "Rick Sanchez".to_string(),
        image: "https://example.test/avatar/1.jpeg".to_string(),
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
        episode: (1..=51)
            .map(|n| format!("https://example.test/episode/{n}"))
            .collect(),
    }
}

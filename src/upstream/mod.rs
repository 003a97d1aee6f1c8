//! Access to the third-party character resource.

use async_trait::async_trait;

use crate::domain::character::{CharacterDetail, CharacterPage};
use crate::domain::types::{CharacterId, PageNumber, SearchTerm};
use crate::upstream::errors::UpstreamResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpCharacterReader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterListQuery {
    pub search: SearchTerm,
    pub page: PageNumber,
}

impl CharacterListQuery {
    pub fn new(page: PageNumber) -> Self {
        Self {
            search: SearchTerm::default(),
            page,
        }
    }

    pub fn search(mut self, search: impl Into<SearchTerm>) -> Self {
        self.search = search.into();
        self
    }
}

#[async_trait]
pub trait CharacterReader: Send + Sync {
    /// Fetches one page of characters, optionally filtered by name.
    async fn list_characters(&self, query: CharacterListQuery) -> UpstreamResult<CharacterPage>;
    /// Fetches a single character; `Ok(None)` when the resource has no such record.
    async fn get_character(&self, id: CharacterId) -> UpstreamResult<Option<CharacterDetail>>;
}

//! reqwest-backed implementation of [`CharacterReader`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::domain::character::{CharacterDetail, CharacterPage};
use crate::domain::types::CharacterId;
use crate::models::upstream::{ApiCharacter, ApiCharacterList};
use crate::upstream::errors::{UpstreamError, UpstreamResult};
use crate::upstream::{CharacterListQuery, CharacterReader};

#[derive(Clone)]
pub struct HttpCharacterReader {
    client: Client,
    base_url: String,
}

impl HttpCharacterReader {
    pub fn new(base_url: &str, timeout: Duration) -> UpstreamResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn listing_url(&self) -> String {
        format!("{}/character/", self.base_url)
    }

    fn detail_url(&self, id: CharacterId) -> String {
        format!("{}/character/{id}", self.base_url)
    }
}

/// Query pairs for a listing request. `name` is omitted when the term is empty.
pub(crate) fn listing_params(query: &CharacterListQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("page", query.page.to_string())];
    if !query.search.is_empty() {
        params.push(("name", query.search.as_str().to_string()));
    }
    params
}

#[async_trait]
impl CharacterReader for HttpCharacterReader {
    async fn list_characters(&self, query: CharacterListQuery) -> UpstreamResult<CharacterPage> {
        let url = self.listing_url();
        let response = self
            .client
            .get(&url)
            .query(&listing_params(&query))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                status: response.status().as_u16(),
                url: response.url().to_string(),
            });
        }

        let list: ApiCharacterList = response.json().await?;
        Ok(CharacterPage::try_from(list)?)
    }

    async fn get_character(&self, id: CharacterId) -> UpstreamResult<Option<CharacterDetail>> {
        let url = self.detail_url(id);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let character: ApiCharacter = response.json().await?;
                Ok(Some(CharacterDetail::try_from(character)?))
            }
            status => Err(UpstreamError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

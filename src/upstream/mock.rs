//! Mock character source for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::character::{CharacterDetail, CharacterPage};
use crate::domain::types::CharacterId;
use crate::upstream::errors::UpstreamResult;
use crate::upstream::{CharacterListQuery, CharacterReader};

mock! {
    pub Upstream {}

    #[async_trait]
    impl CharacterReader for Upstream {
        async fn list_characters(&self, query: CharacterListQuery) -> UpstreamResult<CharacterPage>;
        async fn get_character(&self, id: CharacterId) -> UpstreamResult<Option<CharacterDetail>>;
    }
}

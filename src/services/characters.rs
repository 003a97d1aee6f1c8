use crate::domain::types::{CharacterId, PageNumber, SearchTerm};
use crate::dto::characters::{
    DetailPageData, DetailQuery, ListPageData, ListQuery, TransitionData,
};
use crate::forms::characters::{ListActionForm, ListTransition};
use crate::services::{ServiceError, ServiceResult};
use crate::state::{FetchOutcome, ListContext, ListViewState};
use crate::upstream::{CharacterListQuery, CharacterReader};

/// Runs one listing fetch and folds any upstream error into a failed outcome.
async fn fetch_outcome<R>(reader: &R, page: PageNumber, search: &SearchTerm) -> FetchOutcome
where
    R: CharacterReader + ?Sized,
{
    let query = CharacterListQuery::new(page).search(search.clone());
    match reader.list_characters(query).await {
        Ok(page) => FetchOutcome::Loaded(page),
        Err(err) => FetchOutcome::Failed(err.to_string()),
    }
}

fn encode_context(context: &ListContext) -> ServiceResult<String> {
    context
        .to_query()
        .map_err(|err| ServiceError::Internal(format!("Failed to encode query: {err}")))
}

/// Loads the list page for a direct request, deep links included.
///
/// Upstream failures never surface as errors: they are logged and the page
/// renders an empty single-page list.
pub async fn load_list_page<R>(reader: &R, query: ListQuery) -> ServiceResult<ListPageData>
where
    R: CharacterReader + ?Sized,
{
    let page = PageNumber::parse_lenient(query.page.as_deref());
    let search = SearchTerm::new(query.name.unwrap_or_default());

    let mut state = ListViewState::new(search, page, Vec::new(), 1);
    let ticket = state.begin_fetch();
    let outcome = fetch_outcome(reader, ticket.page, &ticket.search).await;
    state.complete(&ticket, outcome);

    let context_query = encode_context(&state.context())?;

    Ok(ListPageData {
        state,
        context_query,
    })
}

/// Applies one search or page action posted by the list page script and,
/// when the `(page, name)` key changed, fetches the matching listing.
pub async fn apply_list_transition<R>(
    reader: &R,
    form: ListActionForm,
) -> ServiceResult<TransitionData>
where
    R: CharacterReader + ?Sized,
{
    let ListTransition {
        seq,
        mut state,
        action,
    } = ListTransition::try_from(form).map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::from(err)
    })?;

    let changed = state.apply(action);
    if changed {
        let ticket = state.begin_fetch();
        let outcome = fetch_outcome(reader, ticket.page, &ticket.search).await;
        state.complete(&ticket, outcome);
    }

    let query = state
        .sync_query()
        .map_err(|err| ServiceError::Internal(format!("Failed to encode query: {err}")))?;

    Ok(TransitionData {
        seq,
        changed,
        state,
        query,
    })
}

/// Loads one character and the list context its back link restores.
///
/// An unparsable id, a missing record and an upstream failure all yield
/// `character: None`.
pub async fn load_detail_page<R>(
    reader: &R,
    raw_id: &str,
    query: DetailQuery,
) -> ServiceResult<DetailPageData>
where
    R: CharacterReader + ?Sized,
{
    let back = ListContext::new(
        PageNumber::parse_lenient(query.page.as_deref()),
        SearchTerm::new(query.name.unwrap_or_default()),
    );
    let back_query = encode_context(&back)?;

    let character = match raw_id.parse::<CharacterId>() {
        Ok(id) => match reader.get_character(id).await {
            Ok(character) => character,
            Err(err) => {
                log::error!("Failed to fetch character {id}: {err}");
                None
            }
        },
        Err(err) => {
            log::warn!("Rejected character id {raw_id:?}: {err}");
            None
        }
    };

    Ok(DetailPageData {
        character,
        back,
        back_query,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::character::{CharacterDetail, CharacterPage, CharacterSummary, Place};
    use crate::upstream::errors::UpstreamError;
    use crate::upstream::mock::MockUpstream;

    fn cards(count: i32) -> Vec<CharacterSummary> {
        (1..=count)
            .map(|id| CharacterSummary {
                id: CharacterId::new(id).expect("valid id"),
                name: format!("Character {id}"),
                image: format!("https://example.test/{id}.jpeg"),
            })
            .collect()
    }

    fn detail(id: i32) -> CharacterDetail {
        CharacterDetail {
            id: CharacterId::new(id).expect("valid id"),
            name: "Rick Sanchez".to_string(),
            image: "https://example.test/1.jpeg".to_string(),
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
            episode: vec!["https://example.test/episode/1".to_string()],
        }
    }

    fn action_form(action: &str, page: usize, total_pages: usize) -> ListActionForm {
        ListActionForm {
            seq: 1,
            name: String::new(),
            page,
            total_pages,
            action: action.to_string(),
            term: String::new(),
        }
    }

    /// Deep links fetch exactly the requested page and name.
    #[actix_web::test]
    async fn list_page_uses_query_parameters() {
        let mut reader = MockUpstream::new();
        reader
            .expect_list_characters()
            .withf(|query| query.page.get() == 3 && query.search.as_str() == "Morty")
            .times(1)
            .returning(|_| Ok(CharacterPage::new(cards(20), 5)));

        let data = load_list_page(
            &reader,
            ListQuery {
                page: Some("3".to_string()),
                name: Some("Morty".to_string()),
            },
        )
        .await
        .expect("page loads");

        assert_eq!(data.state.current_page().get(), 3);
        assert_eq!(data.state.characters().len(), 20);
        assert_eq!(data.context_query, "page=3&name=Morty");
    }

    /// Malformed page numbers fall back to the first page.
    #[actix_web::test]
    async fn list_page_defaults_malformed_page() {
        let mut reader = MockUpstream::new();
        reader
            .expect_list_characters()
            .withf(|query| query.page == PageNumber::FIRST && query.search.is_empty())
            .times(1)
            .returning(|_| Ok(CharacterPage::new(cards(2), 1)));

        let data = load_list_page(
            &reader,
            ListQuery {
                page: Some("abc".to_string()),
                name: None,
            },
        )
        .await
        .expect("page loads");

        assert_eq!(data.state.current_page(), PageNumber::FIRST);
    }

    /// Upstream failures degrade to an empty single-page list.
    #[actix_web::test]
    async fn list_page_survives_upstream_failure() {
        let mut reader = MockUpstream::new();
        reader
            .expect_list_characters()
            .times(1)
            .returning(|_| Err(UpstreamError::Transport("connection refused".to_string())));

        let data = load_list_page(&reader, ListQuery::default())
            .await
            .expect("page loads");

        assert!(data.state.characters().is_empty());
        assert_eq!(data.state.total_pages(), 1);
        assert_eq!(data.state.current_page(), PageNumber::FIRST);
        assert!(!data.state.is_loading());
    }

    /// A deep link that fails keeps its page so previous stays usable.
    #[actix_web::test]
    async fn failed_deep_link_keeps_requested_page() {
        let mut reader = MockUpstream::new();
        reader
            .expect_list_characters()
            .withf(|query| query.page.get() == 4)
            .times(1)
            .returning(|_| {
                Err(UpstreamError::Status {
                    status: 500,
                    url: "https://example.test/character/".to_string(),
                })
            });

        let data = load_list_page(
            &reader,
            ListQuery {
                page: Some("4".to_string()),
                name: Some("Rick".to_string()),
            },
        )
        .await
        .expect("page loads");

        assert_eq!(data.state.current_page().get(), 4);
        assert_eq!(data.state.total_pages(), 1);
        assert!(data.state.has_previous());
        assert!(!data.state.has_next());
        assert_eq!(data.context_query, "page=4&name=Rick");
    }

    /// Searching from page 3 restarts at page 1 before fetching.
    #[actix_web::test]
    async fn search_transition_fetches_first_page() {
        let mut reader = MockUpstream::new();
        reader
            .expect_list_characters()
            .withf(|query| query.page == PageNumber::FIRST && query.search.as_str() == "Morty")
            .times(1)
            .returning(|_| Ok(CharacterPage::new(cards(20), 2)));
        let mut form = action_form("search", 3, 5);
        form.term = "Morty".to_string();

        let data = apply_list_transition(&reader, form)
            .await
            .expect("transition applies");

        assert!(data.changed);
        assert_eq!(data.state.current_page(), PageNumber::FIRST);
        assert_eq!(data.state.total_pages(), 2);
        assert_eq!(data.query, "page=1&name=Morty");
    }

    /// Next at the last page neither changes state nor fetches.
    #[actix_web::test]
    async fn next_at_last_page_is_a_no_op() {
        let mut reader = MockUpstream::new();
        reader.expect_list_characters().times(0);

        let data = apply_list_transition(&reader, action_form("next", 5, 5))
            .await
            .expect("transition applies");

        assert!(!data.changed);
        assert_eq!(data.state.current_page().get(), 5);
        assert_eq!(data.query, "page=5&name=");
    }

    /// Invalid forms are rejected without touching the upstream.
    #[actix_web::test]
    async fn invalid_action_is_rejected() {
        let mut reader = MockUpstream::new();
        reader.expect_list_characters().times(0);

        let result = apply_list_transition(&reader, action_form("jump", 1, 5)).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    /// The back link keeps exactly the incoming context.
    #[actix_web::test]
    async fn detail_page_keeps_back_context() {
        let mut reader = MockUpstream::new();
        reader
            .expect_get_character()
            .withf(|id| id.get() == 1)
            .times(1)
            .returning(|id| Ok(Some(detail(id.get()))));

        let data = load_detail_page(
            &reader,
            "1",
            DetailQuery {
                page: Some("4".to_string()),
                name: Some("Rick".to_string()),
            },
        )
        .await
        .expect("page loads");

        assert_eq!(data.character.map(|c| c.name), Some("Rick Sanchez".to_string()));
        assert_eq!(data.back.page.get(), 4);
        assert_eq!(data.back_query, "page=4&name=Rick");
    }

    /// Unknown ids render the not-found state.
    #[actix_web::test]
    async fn detail_page_not_found() {
        let mut reader = MockUpstream::new();
        reader
            .expect_get_character()
            .times(1)
            .returning(|_| Ok(None));

        let data = load_detail_page(&reader, "9999", DetailQuery::default())
            .await
            .expect("page loads");

        assert!(data.character.is_none());
        assert_eq!(data.back_query, "page=1&name=");
    }

    /// Non-numeric ids never reach the upstream.
    #[actix_web::test]
    async fn detail_page_rejects_bad_id() {
        let mut reader = MockUpstream::new();
        reader.expect_get_character().times(0);

        let data = load_detail_page(&reader, "rick", DetailQuery::default())
            .await
            .expect("page loads");

        assert!(data.character.is_none());
    }
}

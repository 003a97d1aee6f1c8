use serde::Serialize;

use crate::domain::character::CharacterDetail;
use crate::state::{ListContext, ListViewState};

/// Query parameters accepted by the list page service.
#[derive(Debug, Default)]
pub struct ListQuery {
    /// Raw `page` parameter; parsed leniently.
    pub page: Option<String>,
    /// Raw `name` parameter.
    pub name: Option<String>,
}

/// Query parameters accepted by the detail page service.
#[derive(Debug, Default)]
pub struct DetailQuery {
    pub page: Option<String>,
    pub name: Option<String>,
}

/// First value of `key`; later repetitions are ignored.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value.clone())
}

impl ListQuery {
    /// Picks `page` and `name` out of raw query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: first_value(pairs, "page"),
            name: first_value(pairs, "name"),
        }
    }
}

impl DetailQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: first_value(pairs, "page"),
            name: first_value(pairs, "name"),
        }
    }
}

/// Data required to render the list template.
pub struct ListPageData {
    pub state: ListViewState,
    /// `page=..&name=..` for the detail links and the address bar.
    pub context_query: String,
}

/// Data required to render the detail template.
pub struct DetailPageData {
    /// `None` renders the not-found state.
    pub character: Option<CharacterDetail>,
    /// List context restored by the back link.
    pub back: ListContext,
    /// Encoded form of `back`.
    pub back_query: String,
}

/// Outcome of one list transition requested by the page script.
pub struct TransitionData {
    /// Client sequence number, echoed so stale responses can be dropped.
    pub seq: u64,
    /// Whether the action changed the `(page, name)` key.
    pub changed: bool,
    pub state: ListViewState,
    /// Query string the address bar must be rewritten to.
    pub query: String,
}

/// JSON body returned to the list page script after a transition.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub seq: u64,
    pub changed: bool,
    pub search_term: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub query: String,
    /// Rendered list fragment replacing the page's card grid.
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let query = ListQuery::from_pairs(&pairs(&[
            ("page", "2"),
            ("page", "3"),
            ("name", "Rick"),
            ("name", "Morty"),
        ]));

        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.name.as_deref(), Some("Rick"));
    }

    #[test]
    fn missing_keys_stay_unset() {
        let query = DetailQuery::from_pairs(&pairs(&[("other", "1")]));

        assert!(query.page.is_none());
        assert!(query.name.is_none());
    }
}

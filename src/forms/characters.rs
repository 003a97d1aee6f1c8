//! Form posted by the list page script for every search or page action.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{PageNumber, SearchTerm};
use crate::forms::FormError;
use crate::state::{ListAction, ListViewState};

#[derive(Debug, Deserialize, Validate)]
pub struct ListActionForm {
    /// Client-side request counter, echoed in the response.
    pub seq: u64,
    /// Search term currently held by the page.
    #[serde(default)]
    pub name: String,
    /// Page currently shown.
    #[validate(range(min = 1))]
    pub page: usize,
    /// Total pages reported by the last fetch.
    #[validate(range(min = 1))]
    pub total_pages: usize,
    /// One of `search`, `next`, `previous`.
    pub action: String,
    /// New raw input value for `search`.
    #[serde(default)]
    pub term: String,
}

/// Validated transition request: the restored state plus the action to apply.
pub struct ListTransition {
    pub seq: u64,
    pub state: ListViewState,
    pub action: ListAction,
}

impl TryFrom<ListActionForm> for ListTransition {
    type Error = FormError;

    fn try_from(form: ListActionForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let action = match form.action.as_str() {
            "search" => ListAction::Search(form.term),
            "next" => ListAction::NextPage,
            "previous" => ListAction::PreviousPage,
            other => return Err(FormError::InvalidAction(other.to_string())),
        };
        let page = PageNumber::new(form.page).map_err(|_| FormError::InvalidPage)?;

        Ok(Self {
            seq: form.seq,
            state: ListViewState::new(SearchTerm::new(form.name), page, Vec::new(), form.total_pages),
            action,
        })
    }
}

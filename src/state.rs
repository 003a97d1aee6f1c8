//! State machine behind the character list page.
//!
//! A [`ListViewState`] owns the search term, the current page and the last
//! fetched page of results. User actions change the `(current_page,
//! search_term)` key; every key change must be followed by two effects:
//! one fetch ([`ListViewState::begin_fetch`] / [`ListViewState::complete`])
//! and one URL rewrite ([`ListViewState::sync_query`]). Both effects read the
//! same key, so the settled state does not depend on which runs first.
//!
//! Fetches carry a monotonically increasing token. Only the outcome of the
//! most recently issued fetch is applied; older outcomes are dropped so that
//! a slow response can never overwrite newer user intent.

use serde::{Deserialize, Serialize};

use crate::domain::character::{CharacterPage, CharacterSummary};
use crate::domain::types::{PageNumber, SearchTerm};

/// User interaction on the list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// The search input now holds this raw value.
    Search(String),
    NextPage,
    PreviousPage,
}

/// Result of a listing fetch, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(CharacterPage),
    /// The fetch failed; the reason is kept for the operator log.
    Failed(String),
}

/// Handle for one in-flight listing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub page: PageNumber,
    pub search: SearchTerm,
}

/// `page` and `name` query parameters shared by the list URL, the detail
/// links and the detail page's back link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContext {
    pub page: PageNumber,
    pub name: SearchTerm,
}

impl ListContext {
    pub fn new(page: PageNumber, name: SearchTerm) -> Self {
        Self { page, name }
    }

    /// Encodes the context as `page=..&name=..`.
    pub fn to_query(&self) -> Result<String, serde_html_form::ser::Error> {
        serde_html_form::to_string(self)
    }
}

/// Client-held state of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewState {
    search_term: SearchTerm,
    current_page: PageNumber,
    total_pages: usize,
    characters: Vec<CharacterSummary>,
    is_loading: bool,
    issued_token: u64,
}

impl ListViewState {
    /// Builds the state from explicitly passed initial values rather than an
    /// ambient router. `initial_total_pages` below one is raised to one.
    pub fn new(
        initial_search_term: SearchTerm,
        initial_page: PageNumber,
        initial_results: Vec<CharacterSummary>,
        initial_total_pages: usize,
    ) -> Self {
        Self {
            search_term: initial_search_term,
            current_page: initial_page,
            total_pages: initial_total_pages.max(1),
            characters: initial_results,
            is_loading: false,
            issued_token: 0,
        }
    }

    pub fn search_term(&self) -> &SearchTerm {
        &self.search_term
    }

    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn characters(&self) -> &[CharacterSummary] {
        &self.characters
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the previous-page control is enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page.get() > 1
    }

    /// Whether the next-page control is enabled.
    pub fn has_next(&self) -> bool {
        self.current_page.get() < self.total_pages
    }

    /// Current `(page, name)` pair.
    pub fn context(&self) -> ListContext {
        ListContext::new(self.current_page, self.search_term.clone())
    }

    /// Applies one user action. Returns `true` when the `(current_page,
    /// search_term)` key changed, meaning a fetch and a URL sync must follow.
    pub fn apply(&mut self, action: ListAction) -> bool {
        let before = (self.current_page, self.search_term.clone());

        match action {
            ListAction::Search(raw) => {
                self.search_term = SearchTerm::new(raw);
                self.current_page = PageNumber::FIRST;
            }
            ListAction::NextPage => {
                if self.has_next() {
                    self.current_page = self.current_page.next();
                }
            }
            ListAction::PreviousPage => {
                if self.has_previous() {
                    self.current_page = self.current_page.previous();
                }
            }
        }

        before != (self.current_page, self.search_term.clone())
    }

    /// Starts a fetch for the current key. The list is hidden until the
    /// matching [`complete`](Self::complete) call.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_token += 1;
        self.is_loading = true;
        FetchTicket {
            token: self.issued_token,
            page: self.current_page,
            search: self.search_term.clone(),
        }
    }

    /// Applies a fetch outcome if `ticket` is the latest one issued.
    ///
    /// On failure the list is emptied and `total_pages` drops to one while
    /// `current_page` is kept, so the previous-page control stays usable.
    /// Returns `false` when the outcome was stale and discarded.
    pub fn complete(&mut self, ticket: &FetchTicket, outcome: FetchOutcome) -> bool {
        if ticket.token != self.issued_token {
            log::debug!(
                "Discarding stale listing result {} (latest is {})",
                ticket.token,
                self.issued_token
            );
            return false;
        }

        match outcome {
            FetchOutcome::Loaded(page) => {
                self.characters = page.characters;
                self.total_pages = page.total_pages.max(1);
            }
            FetchOutcome::Failed(reason) => {
                log::error!(
                    "Failed to fetch characters (page {}, name {:?}): {reason}",
                    ticket.page,
                    ticket.search.as_str()
                );
                self.characters = Vec::new();
                self.total_pages = 1;
            }
        }
        self.is_loading = false;
        true
    }

    /// Query string the address bar must show for the current state.
    pub fn sync_query(&self) -> Result<String, serde_html_form::ser::Error> {
        self.context().to_query()
    }
}

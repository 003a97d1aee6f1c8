use serde::Serialize;

use crate::domain::character::CharacterSummary;
use crate::state::ListViewState;

/// Template-facing view of one page of items and its navigation controls.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let total_pages = total_pages.max(1);

        Self {
            items,
            page: current_page,
            total_pages,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }
}

impl From<&ListViewState> for Paginated<CharacterSummary> {
    fn from(state: &ListViewState) -> Self {
        Self::new(
            state.characters().to_vec(),
            state.current_page().get(),
            state.total_pages(),
        )
    }
}

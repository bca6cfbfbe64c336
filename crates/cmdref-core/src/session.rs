use crate::criteria::{FacetChoice, FilterCriteria};
use crate::error::Error;
use crate::facet::{FacetCache, Facets};
use crate::filter::filter;
use crate::model::{Record, RecordKind};
use crate::store::RecordStore;
use tracing::debug;

/// What to show instead of a result list when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub hint: Option<String>,
}

/// Browsing state for one record store: the criteria being edited, the
/// record picked for the detail view and whether that view is open.
#[derive(Debug)]
pub struct BrowseSession<T> {
    store: RecordStore<T>,
    criteria: FilterCriteria,
    selected: Option<String>,
    detail_open: bool,
    facets: FacetCache,
}

impl<T: Record> BrowseSession<T> {
    pub fn new(store: RecordStore<T>) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            selected: None,
            detail_open: false,
            facets: FacetCache::new(),
        }
    }

    pub fn store(&self) -> &RecordStore<T> {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_category(&mut self, category: impl Into<FacetChoice>) {
        self.criteria.category = category.into();
    }

    pub fn set_difficulty(&mut self, difficulty: impl Into<FacetChoice>) {
        self.criteria.difficulty = difficulty.into();
    }

    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn facets(&mut self) -> &Facets {
        self.facets.get(&self.store)
    }

    pub fn visible(&self) -> Vec<&T> {
        filter(self.store.records(), &self.criteria)
    }

    /// Select a record by id and open the detail view.
    pub fn select(&mut self, id: &str) -> Result<&T, Error> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| Error::UnknownRecord(id.to_string()))?;
        debug!("Selected {} '{}'", T::KIND.singular(), id);
        self.selected = Some(id.to_string());
        self.detail_open = true;
        Ok(record)
    }

    /// Close the detail view and forget the selection.
    pub fn clear_selection(&mut self) {
        self.detail_open = false;
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    /// `None` while something is visible, or when no command constraint is active.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible().is_empty() {
            return None;
        }
        empty_state_for(T::KIND, &self.criteria)
    }
}

pub fn empty_state_for(kind: RecordKind, criteria: &FilterCriteria) -> Option<EmptyState> {
    match kind {
        RecordKind::Command => {
            let term = &criteria.search_term;
            let message = match (&criteria.category, term.is_empty()) {
                (FacetChoice::All, true) => return None,
                (FacetChoice::All, false) => format!("No commands found matching \"{}\"", term),
                (FacetChoice::Only(category), false) => format!(
                    "No commands found matching \"{}\" in category \"{}\"",
                    term, category
                ),
                (FacetChoice::Only(category), true) => {
                    format!("No commands found in category \"{}\"", category)
                }
            };
            Some(EmptyState {
                message,
                hint: None,
            })
        }
        RecordKind::Scenario => Some(EmptyState {
            message: "No scenarios found matching your criteria.".to_string(),
            hint: Some("Try adjusting your search terms or filters.".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_empty_state_messages() {
        let none = FilterCriteria::new();
        assert_eq!(empty_state_for(RecordKind::Command, &none), None);

        let term = FilterCriteria::new().with_search_term("zzz");
        assert_eq!(
            empty_state_for(RecordKind::Command, &term).unwrap().message,
            "No commands found matching \"zzz\""
        );

        let both = term.clone().with_category("Storage");
        assert_eq!(
            empty_state_for(RecordKind::Command, &both).unwrap().message,
            "No commands found matching \"zzz\" in category \"Storage\""
        );

        let category = FilterCriteria::new().with_category("Storage");
        assert_eq!(
            empty_state_for(RecordKind::Command, &category).unwrap().message,
            "No commands found in category \"Storage\""
        );
    }

    #[test]
    fn test_scenario_empty_state_always_present() {
        let state = empty_state_for(RecordKind::Scenario, &FilterCriteria::new()).unwrap();
        assert_eq!(state.message, "No scenarios found matching your criteria.");
        assert!(state.hint.is_some());
    }
}

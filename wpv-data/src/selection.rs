//! Map and search driven well selection.

use crate::catalog::WellCatalog;
use std::collections::BTreeSet;
use wpv_core::WellId;

/// How a search result list turns into a selection.
///
/// There is no default; the host UI picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPolicy {
    /// Searching only lists matches; picking a list entry acts as a click.
    ListOnly,
    /// Every search replaces the selection with all matches. An empty query
    /// clears the selection instead of selecting the whole field.
    SelectMatches,
}

/// The set of selected wells plus the focus (last clicked) well.
///
/// Every mutating call advances [`generation`](Self::generation), even when
/// membership ends up unchanged, so that each call maps to exactly one
/// refresh downstream.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: BTreeSet<WellId>,
    focus: Option<WellId>,
    generation: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain click: the selection becomes exactly `{id}`.
    ///
    /// Unknown ids leave both the set and the focus untouched.
    pub fn click_well(&mut self, catalog: &WellCatalog, id: &str) {
        self.generation += 1;
        if !catalog.contains(id) {
            log::debug!("[WPV] selection: ignoring click on unknown well {}", id);
            return;
        }
        self.selected.clear();
        self.selected.insert(id.to_string());
        self.focus = Some(id.to_string());
    }

    /// Ctrl-click: toggle membership of `id` and focus it.
    pub fn ctrl_click_well(&mut self, catalog: &WellCatalog, id: &str) {
        self.generation += 1;
        if !catalog.contains(id) {
            log::debug!("[WPV] selection: ignoring ctrl-click on unknown well {}", id);
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.focus = Some(id.to_string());
    }

    /// Replace the selection with `ids`, dropping unknown ones.
    ///
    /// The focus survives only if it is still selected.
    pub fn search_select<I, T>(&mut self, catalog: &WellCatalog, ids: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.generation += 1;
        self.selected = ids
            .into_iter()
            .filter(|id| catalog.contains(id.as_ref()))
            .map(|id| id.as_ref().to_string())
            .collect();
        if let Some(focus) = &self.focus {
            if !self.selected.contains(focus) {
                self.focus = None;
            }
        }
    }

    /// Add `ids` to the selection without removing anything.
    pub fn extend<I, T>(&mut self, catalog: &WellCatalog, ids: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.generation += 1;
        for id in ids {
            let id = id.as_ref();
            if catalog.contains(id) {
                self.selected.insert(id.to_string());
            }
        }
    }

    /// Empty the selection and drop the focus.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.selected.clear();
        self.focus = None;
    }

    /// Read-only snapshot of the selected ids.
    pub fn current(&self) -> &BTreeSet<WellId> {
        &self.selected
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    fn ids(selection: &SelectionState) -> Vec<&str> {
        selection.current().iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn click_replaces_with_singleton_and_focuses() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        selection.click_well(&catalog, "W1:HS");
        selection.click_well(&catalog, "W2:UI");
        assert_eq!(ids(&selection), vec!["W2:UI"]);
        assert_eq!(selection.focus(), Some("W2:UI"));
    }

    #[test]
    fn ctrl_click_toggles_membership() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        selection.click_well(&catalog, "W1:HS");
        selection.ctrl_click_well(&catalog, "W2:UI");
        assert_eq!(ids(&selection), vec!["W1:HS", "W2:UI"]);
        assert_eq!(selection.focus(), Some("W2:UI"));

        selection.ctrl_click_well(&catalog, "W1:HS");
        assert_eq!(ids(&selection), vec!["W2:UI"]);
        assert_eq!(selection.focus(), Some("W1:HS"));
    }

    #[test]
    fn ctrl_click_twice_restores_membership() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        selection.search_select(&catalog, ["W12:UI", "W2:UI"]);
        let before = selection.current().clone();

        for id in ["W12:UI", "W1:HS"] {
            selection.ctrl_click_well(&catalog, id);
            selection.ctrl_click_well(&catalog, id);
            assert_eq!(selection.current(), &before);
        }
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        selection.click_well(&catalog, "W1:HS");
        selection.click_well(&catalog, "GHOST");
        selection.ctrl_click_well(&catalog, "GHOST");
        assert_eq!(ids(&selection), vec!["W1:HS"]);
        assert_eq!(selection.focus(), Some("W1:HS"));

        selection.search_select(&catalog, ["GHOST", "W2:UI"]);
        assert_eq!(ids(&selection), vec!["W2:UI"]);

        selection.extend(&catalog, ["GHOST"]);
        assert_eq!(ids(&selection), vec!["W2:UI"]);
    }

    #[test]
    fn search_select_replaces_and_drops_stale_focus() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        selection.click_well(&catalog, "W1:HS");
        selection.search_select(&catalog, vec!["W12:UI".to_string(), "W2:UI".to_string()]);
        assert_eq!(ids(&selection), vec!["W12:UI", "W2:UI"]);
        assert_eq!(selection.focus(), None);

        selection.click_well(&catalog, "W2:UI");
        selection.search_select(&catalog, ["W2:UI", "W1:HS"]);
        assert_eq!(selection.focus(), Some("W2:UI"));
    }

    #[test]
    fn extend_adds_without_removing() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        selection.click_well(&catalog, "W1:HS");
        selection.extend(&catalog, ["W2:UI", "W1:HS"]);
        assert_eq!(ids(&selection), vec!["W1:HS", "W2:UI"]);
        assert_eq!(selection.focus(), Some("W1:HS"));
    }

    #[test]
    fn clear_empties_set_and_focus() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        selection.click_well(&catalog, "W1:HS");
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.focus(), None);
    }

    #[test]
    fn every_mutation_advances_generation() {
        let catalog = sample_catalog();
        let mut selection = SelectionState::new();
        assert_eq!(selection.generation(), 0);
        selection.click_well(&catalog, "W1:HS");
        selection.click_well(&catalog, "GHOST");
        selection.ctrl_click_well(&catalog, "W2:UI");
        selection.search_select(&catalog, ["W2:UI"]);
        selection.extend(&catalog, Vec::<String>::new());
        selection.clear();
        assert_eq!(selection.generation(), 6);
    }
}

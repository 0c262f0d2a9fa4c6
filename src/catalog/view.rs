use crate::controls::ControlHandle;

use super::criteria::CriteriaState;
use super::filter;
use super::{Record, RecordStore};

/// Where input focus should land after a reset operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Search,
    FirstFilter,
}

/// The gallery view owns the record store and the criteria state; child
/// controls only ever see read-only snapshots. Every criteria change
/// recomputes the filtered result synchronously, before the next render.
pub struct GalleryView {
    store: RecordStore,
    criteria: CriteriaState,
    filtered: Vec<Record>,
    search_handle: Option<Box<dyn ControlHandle>>,
    first_filter_handle: Option<Box<dyn ControlHandle>>,
    pending_focus: Option<FocusTarget>,
}

impl GalleryView {
    pub fn new(store: RecordStore) -> Self {
        let filtered = store.records().to_vec();
        Self {
            store,
            criteria: CriteriaState::default(),
            filtered,
            search_handle: None,
            first_filter_handle: None,
            pending_focus: None,
        }
    }

    pub fn set_search_handle(&mut self, handle: Box<dyn ControlHandle>) {
        self.search_handle = Some(handle);
    }

    pub fn set_first_filter_handle(&mut self, handle: Box<dyn ControlHandle>) {
        self.first_filter_handle = Some(handle);
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn criteria(&self) -> &CriteriaState {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn pending_focus(&self) -> Option<FocusTarget> {
        self.pending_focus
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.criteria.search = query.into();
        self.recompute();
    }

    pub fn set_taxa(&mut self, taxa: impl Into<String>) {
        self.criteria.taxa = taxa.into();
        self.recompute();
    }

    pub fn set_species(&mut self, species: impl Into<String>) {
        self.criteria.species = species.into();
        self.recompute();
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.criteria.origin = origin.into();
        self.recompute();
    }

    /// Resets every facet, clears the search control, and focuses it
    /// immediately. Total and idempotent.
    pub fn clear_all(&mut self) {
        self.criteria.clear_all();
        self.recompute();
        self.pending_focus = None;
        if let Some(handle) = self.search_handle.as_mut() {
            handle.clear();
            handle.focus();
        }
    }

    /// Resets only the categorical facets. Focus of the first filter
    /// control is deferred until the next [`refresh`](Self::refresh),
    /// once the control is interactable again.
    pub fn clear_filters(&mut self) {
        self.criteria.clear_categorical();
        self.recompute();
        self.pending_focus = Some(FocusTarget::FirstFilter);
    }

    /// Called after a re-render; fires any deferred focus request.
    pub fn refresh(&mut self) {
        if let Some(FocusTarget::FirstFilter) = self.pending_focus.take() {
            if let Some(handle) = self.first_filter_handle.as_mut() {
                handle.focus();
            }
        }
    }

    fn recompute(&mut self) {
        self.filtered = filter::apply(self.store.records(), &self.criteria);
    }
}

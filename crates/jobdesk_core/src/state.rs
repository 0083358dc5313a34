use std::collections::BTreeMap;

use crate::view_model::PageView;
use crate::{ConsoleSettings, ElementId, Page};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    page: Page,
    settings: ConsoleSettings,
    next_request_id: RequestId,
    in_flight: BTreeMap<RequestId, ElementId>,
    unloaded: bool,
    dirty: bool,
}

impl AppState {
    pub fn new(page: Page, settings: ConsoleSettings) -> Self {
        Self {
            page,
            settings,
            next_request_id: 1,
            in_flight: BTreeMap::new(),
            unloaded: false,
            dirty: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable page access for host-driven edits (typing, file selection).
    pub fn page_mut(&mut self) -> &mut Page {
        self.dirty = true;
        &mut self.page
    }

    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    pub fn view(&self) -> PageView {
        PageView {
            in_flight: self.in_flight.len(),
            confirmed: self
                .page
                .elements_with_class(&self.settings.indicator.confirmed_class),
            dirty: self.dirty,
        }
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    /// Returns whether the page changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn split_mut(&mut self) -> (&mut Page, &ConsoleSettings) {
        (&mut self.page, &self.settings)
    }

    pub(crate) fn begin_request(&mut self, trigger: ElementId) -> RequestId {
        // A default-constructed state starts at zero; ids only need to be unique.
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight.insert(request_id, trigger);
        request_id
    }

    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> Option<ElementId> {
        self.in_flight.remove(&request_id)
    }

    /// Forget every outstanding request; their responses will never be applied.
    pub(crate) fn unload(&mut self) {
        self.unloaded = true;
        self.in_flight.clear();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

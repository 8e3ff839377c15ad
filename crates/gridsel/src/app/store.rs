//! Per-resource selection state.

use std::collections::BTreeMap;

use crate::app::selection::reduce_selection;
use crate::domain::model::{Message, MessageKind, RowId};

/// Owns one independent selection state per resource name.
///
/// Dispatch takes `&mut self`, so messages are applied one at a time in the order they arrive.
#[derive(Debug, Default, Clone)]
pub struct SelectionStore {
    resources: BTreeMap<String, Vec<RowId>>,
}

impl SelectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tracked resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns whether no resource is tracked.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Start tracking `resource` with an empty selection. Existing state is kept.
    pub fn register(&mut self, resource: impl Into<String>) {
        self.resources.entry(resource.into()).or_default();
    }

    /// Stop tracking `resource`, returning its last selection.
    pub fn remove(&mut self, resource: &str) -> Option<Vec<RowId>> {
        self.resources.remove(resource)
    }

    /// Names of the tracked resources in sorted order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Current selection of `resource`; unknown resources have nothing selected.
    pub fn selection(&self, resource: &str) -> &[RowId] {
        self.resources
            .get(resource)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Apply a message. Routed messages reach only their resource, which is created on first
    /// use; messages without a resource never reach any selection.
    pub fn dispatch(&mut self, message: &Message) {
        match message.resource() {
            Some(resource) => {
                let previous = self.resources.remove(resource);
                let next = reduce_selection(previous, message);
                tracing::debug!(
                    resource,
                    kind = message.kind.as_str(),
                    selected = next.len(),
                    "dispatched message"
                );
                self.resources.insert(resource.to_owned(), next);
            }
            None => {
                if message.kind == MessageKind::SetResourceSelection {
                    tracing::warn!(
                        resources = self.resources.len(),
                        "ignoring selection message without resource"
                    );
                }
            }
        }
    }

    /// Copy of every tracked selection.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<RowId>> {
        self.resources.clone()
    }

    /// Drop every tracked resource.
    pub fn clear(&mut self) {
        self.resources.clear();
    }
}

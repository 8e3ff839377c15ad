//! Building selection messages and reducing them into selection state.

use std::collections::BTreeSet;

use crate::domain::model::{Message, MessageKind, RowId, SelectionDirective, SelectionMessage};

/// Resolve `directive` against the displayed `list_ids` and package the result for the reducer.
///
/// Index directives keep the order of `list_ids`, not the order of the indices. Duplicate and
/// out-of-range indices are ignored.
pub fn build_selection_message(
    list_ids: &[RowId],
    resource: &str,
    directive: &SelectionDirective,
) -> SelectionMessage {
    let payload = match directive {
        SelectionDirective::All => list_ids.to_vec(),
        SelectionDirective::None => Vec::new(),
        SelectionDirective::Indices(indices) => {
            let wanted: BTreeSet<usize> = indices.iter().copied().collect();
            list_ids
                .iter()
                .enumerate()
                .filter(|(index, _)| wanted.contains(index))
                .map(|(_, id)| id.clone())
                .collect()
        }
    };

    tracing::debug!(
        resource,
        directive = directive.kind(),
        rows = list_ids.len(),
        selected = payload.len(),
        "resolved selection directive"
    );

    SelectionMessage::new(resource, payload)
}

/// Apply `message` to the selection state of one resource.
///
/// A selection message replaces the state wholesale; every other kind leaves it untouched.
/// A missing previous state starts out empty.
pub fn reduce_selection(previous: Option<Vec<RowId>>, message: &Message) -> Vec<RowId> {
    match message.kind {
        MessageKind::SetResourceSelection => message.payload.clone(),
        MessageKind::Other(_) => previous.unwrap_or_default(),
    }
}

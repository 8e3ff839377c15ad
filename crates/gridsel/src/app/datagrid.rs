//! Headless grid binding: ties the displayed rows of a resource to selection and row actions.

use serde::{Deserialize, Serialize};

use crate::app::selection::build_selection_message;
use crate::domain::errors::DomainError;
use crate::domain::model::{RowId, SelectionDirective, SelectionMessage};

/// Bulk operation offered over the selected rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAction {
    pub label: String,
    /// Prompt shown before running the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_text: Option<String>,
}

impl RowAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confirm_text: None,
        }
    }

    pub fn with_confirmation(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    pub fn needs_confirmation(&self) -> bool {
        self.confirm_text.is_some()
    }
}

/// Request emitted when a row action is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionRequest {
    pub action: String,
    pub resource: String,
    pub ids: Vec<RowId>,
}

/// The rows currently displayed for one resource.
#[derive(Debug, Clone, Default)]
pub struct Datagrid {
    resource: String,
    list_ids: Vec<RowId>,
    row_actions: Vec<RowAction>,
}

impl Datagrid {
    pub fn new(resource: impl Into<String>, list_ids: Vec<RowId>) -> Self {
        Self {
            resource: resource.into(),
            list_ids,
            row_actions: Vec::new(),
        }
    }

    pub fn with_row_actions(mut self, row_actions: Vec<RowAction>) -> Self {
        self.row_actions = row_actions;
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn list_ids(&self) -> &[RowId] {
        &self.list_ids
    }

    pub fn row_actions(&self) -> &[RowAction] {
        &self.row_actions
    }

    pub fn has_row_actions(&self) -> bool {
        !self.row_actions.is_empty()
    }

    /// Rows can only be checked when there is something to do with them.
    pub fn multi_selectable(&self) -> bool {
        self.has_row_actions()
    }

    /// Selection callback bound to this grid's rows and resource.
    pub fn on_selection_change(&self, directive: &SelectionDirective) -> SelectionMessage {
        build_selection_message(&self.list_ids, &self.resource, directive)
    }

    pub fn is_row_selected(&self, selection: &[RowId], id: &RowId) -> bool {
        selection.contains(id)
    }

    /// Positions of the selected rows within the displayed list, in list order.
    pub fn selected_indices(&self, selection: &[RowId]) -> Vec<usize> {
        self.list_ids
            .iter()
            .enumerate()
            .filter(|(_, id)| selection.contains(*id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Find a row action by label, ignoring case.
    pub fn row_action(&self, label: &str) -> Result<&RowAction, DomainError> {
        self.row_actions
            .iter()
            .find(|action| action.label.eq_ignore_ascii_case(label))
            .ok_or_else(|| DomainError::UnknownRowAction(label.to_owned()))
    }

    /// Build the bulk request for `action` over the current selection.
    pub fn row_action_click(&self, action: &RowAction, selection: &[RowId]) -> BulkActionRequest {
        tracing::info!(
            resource = %self.resource,
            action = %action.label,
            rows = selection.len(),
            "row action requested"
        );
        BulkActionRequest {
            action: action.label.clone(),
            resource: self.resource.clone(),
            ids: selection.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Datagrid {
        let ids = ["a", "b", "c"].into_iter().map(RowId::from).collect();
        Datagrid::new("posts", ids)
    }

    #[test]
    fn checkboxes_require_row_actions() {
        let plain = grid();
        assert!(!plain.multi_selectable());

        let with_actions = grid().with_row_actions(vec![RowAction::new("Delete")]);
        assert!(with_actions.has_row_actions());
        assert!(with_actions.multi_selectable());
    }

    #[test]
    fn selection_change_is_bound_to_rows() {
        let grid = grid();
        let message = grid.on_selection_change(&SelectionDirective::Indices(vec![0, 2]));
        assert_eq!(message.resource(), "posts");
        assert_eq!(message.payload, vec![RowId::from("a"), RowId::from("c")]);
        assert_eq!(grid.selected_indices(&message.payload), vec![0, 2]);
        assert!(grid.is_row_selected(&message.payload, &RowId::from("c")));
        assert!(!grid.is_row_selected(&message.payload, &RowId::from("b")));
    }

    #[test]
    fn stale_ids_do_not_map_to_indices() {
        let grid = grid();
        let selection = vec![RowId::from("gone"), RowId::from("b")];
        assert_eq!(grid.selected_indices(&selection), vec![1]);
    }

    #[test]
    fn row_action_click_carries_selection() {
        let grid = grid().with_row_actions(vec![
            RowAction::new("Delete").with_confirmation("Delete the selected posts?"),
        ]);
        let action = grid.row_action("delete").unwrap();
        assert!(action.needs_confirmation());

        let request = grid.row_action_click(action, &[RowId::from("b")]);
        assert_eq!(request.action, "Delete");
        assert_eq!(request.resource, "posts");
        assert_eq!(request.ids, vec![RowId::from("b")]);

        assert!(matches!(
            grid.row_action("archive"),
            Err(DomainError::UnknownRowAction(label)) if label == "archive"
        ));
    }
}

//! Todo State
//!
//! Canonical in-memory mirror of the remote list plus the transient UI state around it.
//! Every mutation is a named transition; the async controller pairs a `begin_*` with the
//! matching `settle_*` around each network call. Derived views are recomputed on demand.

use std::collections::HashMap;

use crate::error::TodoError;
use crate::models::{Filter, Todo};

/// How long an error stays on screen, in milliseconds
pub const ERROR_DISPLAY_MS: u32 = 3_000;

/// In-flight operation on a single todo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Deleting,
    Updating,
}

/// Error currently shown in the banner.
///
/// `seq` grows with every error so a stale dismissal timer can tell it was superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveError {
    pub kind: TodoError,
    pub seq: u64,
}

/// What committing an edit amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPlan {
    /// Trimmed title is empty: behaves exactly like pressing delete
    Delete,
    /// Trimmed title equals the current one: no request
    Unchanged,
    Rename(String),
}

/// Targets chosen when a toggle-all starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleAllPlan {
    pub targets: Vec<u32>,
    /// Targets covered the entire list, so server echoes replace the items
    pub whole_list: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TodoState {
    todos: Vec<Todo>,
    filter: Filter,
    error: Option<ActiveError>,
    error_seq: u64,
    placeholder: Option<Todo>,
    submitting: bool,
    toggling_all: bool,
    pending: HashMap<u32, PendingOp>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Read access
    // ========================

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn error(&self) -> Option<ActiveError> {
        self.error
    }

    pub fn placeholder(&self) -> Option<&Todo> {
        self.placeholder.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_toggling_all(&self) -> bool {
        self.toggling_all
    }

    pub fn pending(&self, id: u32) -> Option<PendingOp> {
        self.pending.get(&id).copied()
    }

    pub fn get(&self, id: u32) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    // ========================
    // Derived views
    // ========================

    pub fn visible_todos(&self) -> Vec<Todo> {
        self.todos.iter().filter(|todo| self.filter.matches(todo)).cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_ids(&self) -> Vec<u32> {
        self.todos.iter().filter(|todo| todo.completed).map(|todo| todo.id).collect()
    }

    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|todo| todo.completed)
    }

    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.active_count() == 0
    }

    // ========================
    // Error lifecycle
    // ========================

    /// Show `kind`, replacing whatever was shown. Returns the sequence number of the new error.
    pub fn set_error(&mut self, kind: TodoError) -> u64 {
        self.error_seq += 1;
        self.error = Some(ActiveError { kind, seq: self.error_seq });
        self.error_seq
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Timer expiry: clears the error only if it is still the one the timer was started for.
    pub fn expire_error(&mut self, seq: u64) -> bool {
        match self.error {
            Some(active) if active.seq == seq => {
                self.error = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    // ========================
    // Load
    // ========================

    pub fn settle_load(&mut self, loaded: Option<Vec<Todo>>) {
        match loaded {
            Some(todos) => {
                self.todos.clear();
                for todo in todos {
                    self.upsert(todo);
                }
            }
            None => {
                self.set_error(TodoError::LoadFailed);
            }
        }
    }

    // ========================
    // Add
    // ========================

    /// Start an add. Returns the normalized title to send, or `None` when nothing should be sent.
    pub fn begin_add(&mut self, raw_title: &str, user_id: u32) -> Option<String> {
        let title = raw_title.trim();
        if title.is_empty() {
            self.set_error(TodoError::EmptyTitle);
            return None;
        }
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.placeholder = Some(Todo::placeholder(title, user_id));
        Some(title.to_string())
    }

    pub fn settle_add(&mut self, created: Option<Todo>) -> bool {
        self.submitting = false;
        self.placeholder = None;
        match created {
            Some(todo) => {
                self.upsert(todo);
                true
            }
            None => {
                self.set_error(TodoError::AddFailed);
                false
            }
        }
    }

    // ========================
    // Per-item operations
    // ========================

    /// Mark `id` as busy with `op`. Refused when the id is unknown or already busy.
    pub fn begin_op(&mut self, id: u32, op: PendingOp) -> bool {
        if self.get(id).is_none() || self.pending.contains_key(&id) {
            return false;
        }
        self.pending.insert(id, op);
        true
    }

    /// Start toggling one todo. Returns the completion value to request.
    pub fn begin_toggle(&mut self, id: u32) -> Option<bool> {
        let target = !self.get(id)?.completed;
        self.begin_op(id, PendingOp::Updating).then_some(target)
    }

    /// Settle a toggle or rename of `id` with the server echo.
    pub fn settle_update(&mut self, id: u32, updated: Option<Todo>) -> bool {
        self.pending.remove(&id);
        match updated {
            Some(todo) => {
                self.replace(todo);
                true
            }
            None => {
                self.set_error(TodoError::UpdateFailed);
                false
            }
        }
    }

    pub fn settle_delete(&mut self, id: u32, removed: bool) -> bool {
        self.pending.remove(&id);
        if removed {
            self.todos.retain(|todo| todo.id != id);
        } else {
            self.set_error(TodoError::DeleteFailed);
        }
        removed
    }

    pub fn plan_edit(&self, id: u32, raw_title: &str) -> Option<EditPlan> {
        let current = self.get(id)?;
        let title = raw_title.trim();
        Some(if title.is_empty() {
            EditPlan::Delete
        } else if title == current.title {
            EditPlan::Unchanged
        } else {
            EditPlan::Rename(title.to_string())
        })
    }

    // ========================
    // Bulk operations
    // ========================

    /// Start a toggle-all: every active todo, or the whole list when none is active.
    /// Todos with an operation already in flight are left out of the batch.
    pub fn begin_toggle_all(&mut self) -> Option<ToggleAllPlan> {
        if self.toggling_all || self.todos.is_empty() {
            return None;
        }
        let any_active = self.todos.iter().any(|todo| !todo.completed);
        let targets: Vec<u32> = self
            .todos
            .iter()
            .filter(|todo| !any_active || !todo.completed)
            .filter(|todo| !self.pending.contains_key(&todo.id))
            .map(|todo| todo.id)
            .collect();
        if targets.is_empty() {
            return None;
        }
        let whole_list = targets.len() == self.todos.len();
        self.toggling_all = true;
        for id in &targets {
            self.pending.insert(*id, PendingOp::Updating);
        }
        Some(ToggleAllPlan { targets, whole_list })
    }

    /// Settle a toggle-all. `results` is `None` if any request in the batch failed.
    pub fn settle_toggle_all(&mut self, plan: &ToggleAllPlan, results: Option<Vec<Todo>>) {
        self.toggling_all = false;
        for id in &plan.targets {
            self.pending.remove(id);
        }
        match results {
            Some(updated) if plan.whole_list => {
                for todo in updated {
                    self.replace(todo);
                }
            }
            Some(_) => {
                for todo in self.todos.iter_mut().filter(|todo| plan.targets.contains(&todo.id)) {
                    todo.completed = true;
                }
            }
            None => {
                self.set_error(TodoError::UpdateFailed);
            }
        }
    }

    /// Start clearing completed todos. Returns the ids to delete.
    pub fn begin_clear_completed(&mut self) -> Vec<u32> {
        let ids: Vec<u32> = self
            .completed_ids()
            .into_iter()
            .filter(|id| !self.pending.contains_key(id))
            .collect();
        for id in &ids {
            self.pending.insert(*id, PendingOp::Deleting);
        }
        ids
    }

    /// Drop every id whose delete succeeded; any failure reports once.
    pub fn settle_clear_completed(&mut self, outcomes: &[(u32, bool)]) {
        let mut failed = false;
        for &(id, removed) in outcomes {
            self.pending.remove(&id);
            if removed {
                self.todos.retain(|todo| todo.id != id);
            } else {
                failed = true;
            }
        }
        if failed {
            self.set_error(TodoError::DeleteFailed);
        }
    }

    // ========================
    // Helpers
    // ========================

    /// Replace the todo with the same id in place; unknown ids are ignored.
    fn replace(&mut self, updated: Todo) {
        if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == updated.id) {
            *todo = updated;
        }
    }

    /// Replace in place if the id is known, append otherwise.
    fn upsert(&mut self, todo: Todo) {
        match self.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => *existing = todo,
            None => self.todos.push(todo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn todo(id: u32, title: &str, completed: bool) -> Todo {
        Todo { id, user_id: 471, title: title.to_string(), completed }
    }

    fn loaded(todos: Vec<Todo>) -> TodoState {
        let mut state = TodoState::new();
        state.settle_load(Some(todos));
        state
    }

    fn ids(state: &TodoState) -> Vec<u32> {
        state.todos().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_load_failure_sets_error_and_keeps_list() {
        let mut state = TodoState::new();
        state.settle_load(None);
        assert!(state.todos().is_empty());
        assert_eq!(state.error().map(|e| e.kind), Some(TodoError::LoadFailed));
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let state = loaded(vec![todo(1, "A", false), todo(1, "A again", true), todo(2, "B", false)]);
        assert_eq!(ids(&state), vec![1, 2]);
    }

    #[test]
    fn test_whitespace_title_is_rejected() {
        let mut state = TodoState::new();
        assert_eq!(state.begin_add("   \t", 471), None);
        assert!(!state.is_submitting());
        assert!(state.placeholder().is_none());
        assert_eq!(state.error().map(|e| e.kind), Some(TodoError::EmptyTitle));
    }

    #[test]
    fn test_add_lifecycle() {
        let mut state = TodoState::new();
        assert_eq!(state.begin_add("  Buy milk ", 471), Some("Buy milk".to_string()));
        assert!(state.is_submitting());
        assert_eq!(state.placeholder(), Some(&Todo::placeholder("Buy milk", 471)));
        assert!(state.todos().is_empty());

        // second add while one is in flight
        assert_eq!(state.begin_add("Other", 471), None);

        assert!(state.settle_add(Some(todo(42, "Buy milk", false))));
        assert!(!state.is_submitting());
        assert!(state.placeholder().is_none());
        assert_eq!(state.todos(), &[todo(42, "Buy milk", false)]);
    }

    #[test]
    fn test_failed_add_leaves_list_unchanged() {
        let mut state = loaded(vec![todo(1, "A", false)]);
        state.begin_add("B", 471);
        assert!(!state.settle_add(None));
        assert_eq!(ids(&state), vec![1]);
        assert!(state.placeholder().is_none());
        assert_eq!(state.error().map(|e| e.kind), Some(TodoError::AddFailed));
    }

    #[test]
    fn test_add_echo_with_existing_id_does_not_duplicate() {
        let mut state = loaded(vec![todo(1, "A", false)]);
        state.begin_add("B", 471);
        state.settle_add(Some(todo(1, "B", false)));
        assert_eq!(state.todos(), &[todo(1, "B", false)]);
    }

    #[test]
    fn test_toggle_replaces_in_place() {
        let mut state = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        assert_eq!(state.begin_toggle(1), Some(true));
        assert_eq!(state.pending(1), Some(PendingOp::Updating));
        // busy item refuses a second operation
        assert_eq!(state.begin_toggle(1), None);

        state.settle_update(1, Some(todo(1, "A", true)));
        assert_eq!(state.pending(1), None);
        assert_eq!(state.todos(), &[todo(1, "A", true), todo(2, "B", false)]);
    }

    #[test]
    fn test_failed_update_keeps_item() {
        let mut state = loaded(vec![todo(1, "A", false)]);
        state.begin_toggle(1);
        assert!(!state.settle_update(1, None));
        assert_eq!(state.todos(), &[todo(1, "A", false)]);
        assert_eq!(state.pending(1), None);
        assert_eq!(state.error().map(|e| e.kind), Some(TodoError::UpdateFailed));
    }

    #[test]
    fn test_delete_lifecycle() {
        let mut state = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        assert!(state.begin_op(2, PendingOp::Deleting));
        assert!(!state.settle_delete(2, false));
        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.error().map(|e| e.kind), Some(TodoError::DeleteFailed));

        assert!(state.begin_op(2, PendingOp::Deleting));
        assert!(state.settle_delete(2, true));
        assert_eq!(ids(&state), vec![1]);
        assert_eq!(state.pending(2), None);
    }

    #[test]
    fn test_unknown_id_is_refused() {
        let mut state = loaded(vec![todo(1, "A", false)]);
        assert!(!state.begin_op(9, PendingOp::Deleting));
        assert_eq!(state.begin_toggle(9), None);
        assert_eq!(state.plan_edit(9, "x"), None);
    }

    #[test]
    fn test_plan_edit() {
        let state = loaded(vec![todo(1, "A", false)]);
        assert_eq!(state.plan_edit(1, "   "), Some(EditPlan::Delete));
        assert_eq!(state.plan_edit(1, " A "), Some(EditPlan::Unchanged));
        assert_eq!(state.plan_edit(1, " B "), Some(EditPlan::Rename("B".into())));
    }

    #[test]
    fn test_toggle_all_with_active_items_synthesizes_completed_list() {
        let mut state = loaded(vec![todo(1, "A", true), todo(2, "B", false), todo(3, "C", false)]);
        let plan = state.begin_toggle_all().unwrap();
        assert_eq!(plan, ToggleAllPlan { targets: vec![2, 3], whole_list: false });
        assert!(state.is_toggling_all());
        assert_eq!(state.begin_toggle_all(), None);

        state.settle_toggle_all(&plan, Some(vec![todo(2, "B", true), todo(3, "C", true)]));
        assert!(!state.is_toggling_all());
        assert!(state.todos().iter().all(|t| t.completed));
        assert_eq!(state.pending(2), None);
    }

    #[test]
    fn test_toggle_all_when_all_completed_targets_whole_list() {
        let mut state = loaded(vec![todo(1, "A", true), todo(2, "B", true)]);
        let plan = state.begin_toggle_all().unwrap();
        assert_eq!(plan, ToggleAllPlan { targets: vec![1, 2], whole_list: true });

        state.settle_toggle_all(&plan, Some(vec![todo(1, "A", true), todo(2, "B", true)]));
        assert_eq!(state.todos(), &[todo(1, "A", true), todo(2, "B", true)]);
    }

    #[test]
    fn test_toggle_all_failure_keeps_last_known_list() {
        let mut state = loaded(vec![todo(1, "A", false), todo(2, "B", true)]);
        let before = state.todos().to_vec();
        let plan = state.begin_toggle_all().unwrap();
        state.settle_toggle_all(&plan, None);
        assert_eq!(state.todos(), before.as_slice());
        assert!(!state.is_toggling_all());
        assert_eq!(state.error().map(|e| e.kind), Some(TodoError::UpdateFailed));
    }

    #[test]
    fn test_toggle_all_skips_busy_items() {
        let mut state = loaded(vec![todo(1, "A", false), todo(2, "B", false), todo(3, "C", false)]);
        assert!(state.begin_op(2, PendingOp::Deleting));

        let plan = state.begin_toggle_all().unwrap();
        assert_eq!(plan, ToggleAllPlan { targets: vec![1, 3], whole_list: false });
        assert_eq!(state.pending(2), Some(PendingOp::Deleting));

        assert!(state.settle_delete(2, true));
        state.settle_toggle_all(&plan, Some(vec![todo(1, "A", true), todo(3, "C", true)]));
        assert_eq!(state.todos(), &[todo(1, "A", true), todo(3, "C", true)]);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_single_toggle_settling_keeps_batch_flags() {
        let mut state = loaded(vec![todo(1, "A", false), todo(2, "B", false)]);
        assert_eq!(state.begin_toggle(1), Some(true));
        let plan = state.begin_toggle_all().unwrap();
        assert_eq!(plan.targets, vec![2]);

        state.settle_update(1, Some(todo(1, "A", true)));
        assert_eq!(state.pending(2), Some(PendingOp::Updating));
        assert!(state.is_toggling_all());
    }

    #[test]
    fn test_toggle_all_with_every_item_busy_is_noop() {
        let mut state = loaded(vec![todo(1, "A", false)]);
        assert!(state.begin_op(1, PendingOp::Updating));
        assert_eq!(state.begin_toggle_all(), None);
        assert!(!state.is_toggling_all());
    }

    #[test]
    fn test_repeated_error_restarts_display_window() {
        let mut state = TodoState::new();
        let first = state.set_error(TodoError::UpdateFailed);
        assert!(state.expire_error(first));
        let second = state.set_error(TodoError::UpdateFailed);
        let third = state.set_error(TodoError::UpdateFailed);
        // the timer started for the second error fires while the third is showing
        assert!(!state.expire_error(second));
        assert_eq!(state.error(), Some(ActiveError { kind: TodoError::UpdateFailed, seq: third }));
        assert!(state.expire_error(third));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_toggle_all_on_empty_list_is_noop() {
        let mut state = TodoState::new();
        assert_eq!(state.begin_toggle_all(), None);
        assert!(!state.is_toggling_all());
    }

    #[test]
    fn test_clear_completed_partial_failure() {
        let mut state = loaded(vec![todo(1, "A", true), todo(2, "B", false), todo(3, "C", true)]);
        let targets = state.begin_clear_completed();
        assert_eq!(targets, vec![1, 3]);
        assert_eq!(state.pending(3), Some(PendingOp::Deleting));

        state.settle_clear_completed(&[(1, true), (3, false)]);
        assert_eq!(ids(&state), vec![2, 3]);
        assert_eq!(state.pending(3), None);
        assert_eq!(state.error().map(|e| e.kind), Some(TodoError::DeleteFailed));
    }

    #[test]
    fn test_derived_views() {
        let mut state = loaded(vec![todo(1, "A", true), todo(2, "B", false), todo(3, "C", true)]);
        assert_eq!(state.active_count(), 1);
        assert_eq!(state.completed_ids(), vec![1, 3]);
        assert!(!state.all_completed());

        state.set_filter(Filter::Active);
        assert_eq!(state.visible_todos(), vec![todo(2, "B", false)]);
        state.set_filter(Filter::Completed);
        assert_eq!(state.visible_todos().len(), 2);
        state.set_filter(Filter::All);
        assert_eq!(state.visible_todos().len(), 3);
    }

    #[test]
    fn test_newer_error_survives_stale_timer() {
        let mut state = TodoState::new();
        let first = state.set_error(TodoError::AddFailed);
        let second = state.set_error(TodoError::DeleteFailed);
        assert!(!state.expire_error(first));
        assert_eq!(state.error(), Some(ActiveError { kind: TodoError::DeleteFailed, seq: second }));
        assert!(state.expire_error(second));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_dismiss_clears_immediately() {
        let mut state = TodoState::new();
        let seq = state.set_error(TodoError::LoadFailed);
        state.dismiss_error();
        assert_eq!(state.error(), None);
        assert!(!state.expire_error(seq));
    }
}

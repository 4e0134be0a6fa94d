//! Todo Controller
//!
//! Owns the reactive todo state and runs every user intent against the service:
//! begin the transition locally, await the request, settle the result back into the state.
//! Continuations that run after the owning view is gone find the signal disposed and do nothing.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use leptos::prelude::*;

use crate::api::TodoGateway;
use crate::models::Filter;
use crate::service::TodoService;
use crate::state::{EditPlan, PendingOp, TodoState};


/// Result of committing an inline edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Edit mode can be left
    Closed,
    /// The request failed or was refused; stay in edit mode
    KeepEditing,
}

pub struct TodoController<G: 'static> {
    state: RwSignal<TodoState>,
    service: StoredValue<Arc<TodoService<G>>>,
}

impl<G: 'static> Clone for TodoController<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: 'static> Copy for TodoController<G> {}

impl<G> TodoController<G>
where
    G: TodoGateway + Send + Sync + 'static,
{
    pub fn new(service: TodoService<G>) -> Self {
        Self {
            state: RwSignal::new(TodoState::new()),
            service: StoredValue::new(Arc::new(service)),
        }
    }

    /// Tracked read access for views
    pub fn with<R>(&self, f: impl FnOnce(&TodoState) -> R) -> R {
        self.state.with(f)
    }

    pub fn with_untracked<R>(&self, f: impl FnOnce(&TodoState) -> R) -> R {
        self.state.with_untracked(f)
    }

    fn service(&self) -> Option<Arc<TodoService<G>>> {
        self.service.try_get_value()
    }

    fn update<R>(&self, f: impl FnOnce(&mut TodoState) -> R) -> Option<R> {
        self.state.try_update(f)
    }

    // ========================
    // Intents
    // ========================

    /// Initial fetch; replaces the list wholesale.
    pub async fn load(&self) {
        let Some(service) = self.service() else { return };
        let loaded = match service.fetch_all().await {
            Ok(todos) => {
                log::info!("loaded {} todos", todos.len());
                Some(todos)
            }
            Err(e) => {
                log::warn!("load failed: {}", e);
                None
            }
        };
        self.update(|s| s.settle_load(loaded));
    }

    /// Submit a new title. Returns true once the server has stored it and the input can be cleared.
    pub async fn add(&self, raw_title: &str) -> bool {
        let Some(service) = self.service() else { return false };
        let user_id = service.user_id();
        let Some(title) = self.update(|s| s.begin_add(raw_title, user_id)).flatten() else {
            return false;
        };
        log::debug!("adding {:?}", title);

        let created = service
            .add(&title)
            .await
            .map_err(|e| log::warn!("add failed: {}", e))
            .ok();
        self.update(|s| s.settle_add(created)).unwrap_or(false)
    }

    /// Flip completion of one todo; the checkbox follows the server echo.
    pub async fn toggle(&self, id: u32) {
        let Some(service) = self.service() else { return };
        let Some(completed) = self.update(|s| s.begin_toggle(id)).flatten() else { return };
        log::debug!("toggling {} to completed={}", id, completed);

        let updated = service
            .set_completed(id, completed)
            .await
            .map_err(|e| log::warn!("toggle of {} failed: {}", id, e))
            .ok();
        self.update(|s| s.settle_update(id, updated));
    }

    /// Complete every active todo, or re-send the whole list when none is active.
    pub async fn toggle_all(&self) {
        let Some(service) = self.service() else { return };
        let Some(plan) = self.update(|s| s.begin_toggle_all()).flatten() else { return };
        log::debug!("toggling all: {} targets", plan.targets.len());

        let results = join_all(plan.targets.iter().map(|&id| service.set_completed(id, true))).await;
        let updated = results
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| log::warn!("toggle all failed: {}", e))
            .ok();
        self.update(|s| s.settle_toggle_all(&plan, updated));
    }

    /// Delete one todo. Returns true if it is gone.
    pub async fn delete(&self, id: u32) -> bool {
        let Some(service) = self.service() else { return false };
        if !self.update(|s| s.begin_op(id, PendingOp::Deleting)).unwrap_or(false) {
            return false;
        }
        log::debug!("deleting {}", id);

        let removed = match service.remove(id).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("delete of {} failed: {}", id, e);
                false
            }
        };
        self.update(|s| s.settle_delete(id, removed)).unwrap_or(false)
    }

    /// Commit an inline edit of `id`.
    pub async fn commit_edit(&self, id: u32, raw_title: &str) -> EditOutcome {
        let Some(plan) = self.with_untracked(|s| s.plan_edit(id, raw_title)) else {
            return EditOutcome::Closed;
        };
        match plan {
            EditPlan::Unchanged => EditOutcome::Closed,
            EditPlan::Delete => {
                if self.delete(id).await {
                    EditOutcome::Closed
                } else {
                    EditOutcome::KeepEditing
                }
            }
            EditPlan::Rename(title) => self.rename(id, &title).await,
        }
    }

    async fn rename(&self, id: u32, title: &str) -> EditOutcome {
        let Some(service) = self.service() else { return EditOutcome::KeepEditing };
        if !self.update(|s| s.begin_op(id, PendingOp::Updating)).unwrap_or(false) {
            return EditOutcome::KeepEditing;
        }
        log::debug!("renaming {} to {:?}", id, title);

        let updated = service
            .rename_title(id, title)
            .await
            .map_err(|e| log::warn!("rename of {} failed: {}", id, e))
            .ok();
        match self.update(|s| s.settle_update(id, updated)) {
            Some(true) => EditOutcome::Closed,
            _ => EditOutcome::KeepEditing,
        }
    }

    /// Delete every completed todo concurrently.
    pub async fn clear_completed(&self) {
        let Some(service) = self.service() else { return };
        let Some(ids) = self.update(|s| s.begin_clear_completed()) else { return };
        if ids.is_empty() {
            return;
        }
        log::debug!("clearing {} completed todos", ids.len());

        let results = join_all(ids.iter().map(|&id| service.remove(id))).await;
        let outcomes: Vec<(u32, bool)> = ids
            .iter()
            .zip(results)
            .map(|(&id, result)| {
                if let Err(e) = &result {
                    log::warn!("delete of {} failed: {}", id, e);
                }
                (id, result.is_ok())
            })
            .collect();
        self.update(|s| s.settle_clear_completed(&outcomes));
    }

    pub fn set_filter(&self, filter: Filter) {
        self.update(|s| s.set_filter(filter));
    }

    pub fn dismiss_error(&self) {
        self.update(|s| s.dismiss_error());
    }

    /// Wait for `timer`, then clear the error numbered `seq` if it is still the one shown.
    /// A newer error has a new number, so its own timer governs it.
    pub async fn auto_dismiss(&self, seq: u64, timer: impl Future<Output = ()>) {
        timer.await;
        self.expire_error(seq);
    }

    pub fn expire_error(&self, seq: u64) {
        self.update(|s| s.expire_error(seq));
    }
}

//! Local task store
//!
//! Owns the in-memory task and category collections on behalf of the
//! view layer. `load` replaces the collection wholesale; mutations
//! patch it by id after a successful backend response. Last write wins;
//! there is no staleness check and no rollback, because no optimistic
//! mutation is applied before success.

use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use taskhive_core::{
    Category, CategoryDraft, CategoryId, CategoryPatch, Task, TaskDraft, TaskId, TaskPatch,
    TaskView, ViewQuery, view,
};

use crate::backend::TaskBackend;
use crate::error::{ClientError, Result};

/// Load status of the task collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing fetched yet
    #[default]
    Idle,
    Loading,
    Ready,
    /// The fetch failed; holds the message to show next to the retry
    /// affordance. Retry by calling `load` again.
    Failed(String),
}

/// Owner of the local task and category collections
pub struct TaskStore {
    backend: Arc<dyn TaskBackend>,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    state: LoadState,
}

impl TaskStore {
    pub fn new(backend: Arc<dyn TaskBackend>) -> Self {
        Self {
            backend,
            tasks: Vec::new(),
            categories: Vec::new(),
            state: LoadState::Idle,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Look up a task in the local collection
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Derive the renderable projection for the given query
    pub fn view(&self, query: &ViewQuery) -> TaskView<'_> {
        view::derive_view(&self.tasks, &self.categories, query)
    }

    /// Fetch both collections, replacing local state wholesale
    ///
    /// On failure the previous collection is kept and the state moves to
    /// `Failed`; calling `load` again is the retry.
    pub async fn load(&mut self) -> Result<()> {
        self.state = LoadState::Loading;

        let tasks = match self.backend.list_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "task load failed");
                self.state = LoadState::Failed(e.message());
                return Err(e);
            }
        };
        let categories = match self.backend.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "category load failed");
                self.state = LoadState::Failed(e.message());
                return Err(e);
            }
        };

        info!(tasks = tasks.len(), categories = categories.len(), "collections loaded");
        self.tasks = tasks;
        self.categories = categories;
        self.state = LoadState::Ready;
        Ok(())
    }

    /// Create a task and prepend it to the local collection
    pub async fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = self.backend.create_task(draft).await?;
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Update a task and merge the response by id (last write wins)
    pub async fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let task = self.backend.update_task(id, patch).await?;
        self.merge(task.clone());
        Ok(task)
    }

    /// Toggle completion, computing the completion timestamp client-side
    pub async fn toggle_completed(&mut self, id: TaskId) -> Result<Task> {
        let current = self
            .task(id)
            .ok_or_else(|| ClientError::not_found("Task", id))?;

        let now_completed = !current.completed;
        let patch = TaskPatch::new()
            .completed(now_completed)
            .completed_at(now_completed.then(Local::now));

        self.update(id, patch).await
    }

    /// Delete a task and drop it from the local collection
    pub async fn delete(&mut self, id: TaskId) -> Result<()> {
        self.backend.delete_task(id).await?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Create a category and add it to the local collection
    pub async fn create_category(&mut self, draft: CategoryDraft) -> Result<Category> {
        let category = self.backend.create_category(draft).await?;
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Update a category and merge the response by id
    pub async fn update_category(&mut self, id: CategoryId, patch: CategoryPatch) -> Result<Category> {
        let category = self.backend.update_category(id, patch).await?;
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(slot) => *slot = category.clone(),
            None => self.categories.push(category.clone()),
        }
        Ok(category)
    }

    /// Delete a category; tasks referencing it keep their now-dangling
    /// weak reference and render as uncategorized
    pub async fn delete_category(&mut self, id: CategoryId) -> Result<()> {
        self.backend.delete_category(id).await?;
        self.categories.retain(|c| c.id != id);
        Ok(())
    }

    /// Merge a response record into the local collection by id. A record
    /// for an id no longer present (e.g. a stale response after a local
    /// delete) is appended rather than dropped: last write wins.
    fn merge(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }
}

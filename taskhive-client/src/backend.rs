//! Repository backend contract
//!
//! The CRUD façade the rest of the system consumes. Implemented by the
//! hosted HTTP backend and the in-memory fixture backend; the store and
//! everything above it only ever see canonical [`Task`]/[`Category`]
//! records.

use async_trait::async_trait;

use taskhive_core::{
    Category, CategoryDraft, CategoryId, CategoryPatch, Task, TaskDraft, TaskId, TaskPatch,
};

use crate::error::Result;

/// Async CRUD contract over the external record store
///
/// Semantics shared by all implementations:
/// - ids are assigned by the backend on create and never reused within
///   a session
/// - `created_at` is set once on create and immutable afterwards
/// - updates are partial field replacement; absent patch fields are
///   left untouched
/// - calls have no automatic retry and no cancellation; a failure
///   surfaces immediately as an error
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    async fn get_task(&self, id: TaskId) -> Result<Task>;

    async fn create_task(&self, draft: TaskDraft) -> Result<Task>;

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task>;

    async fn delete_task(&self, id: TaskId) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn get_category(&self, id: CategoryId) -> Result<Category>;

    async fn create_category(&self, draft: CategoryDraft) -> Result<Category>;

    async fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category>;

    async fn delete_category(&self, id: CategoryId) -> Result<()>;
}

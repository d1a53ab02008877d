//! In-memory fixture backend
//!
//! Implements the same contract as the hosted backend against a local
//! map. Used by tests and by the CLI when no backend URL is configured.
//! Ids are monotonically increasing and never reused within a session.

use std::collections::HashMap;

use chrono::Local;
use tokio::sync::Mutex;
use tracing::debug;

use async_trait::async_trait;
use taskhive_core::{
    Category, CategoryDraft, CategoryId, CategoryPatch, Priority, Task, TaskDraft, TaskId,
    TaskPatch, Urgency,
};

use crate::backend::TaskBackend;
use crate::error::{ClientError, Result};

#[derive(Debug, Default)]
struct Inner {
    tasks: HashMap<u32, Task>,
    categories: HashMap<u32, Category>,
    next_task_id: u32,
    next_category_id: u32,
}

/// Local fixture implementation of [`TaskBackend`]
#[derive(Debug)]
pub struct InMemoryBackend {
    inner: Mutex<Inner>,
}

impl InMemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_task_id: 1,
                next_category_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Create a backend seeded from existing records
    ///
    /// Id counters resume past the highest seeded id so seeded ids are
    /// never handed out again.
    pub fn with_records(tasks: Vec<Task>, categories: Vec<Category>) -> Self {
        let next_task_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        let next_category_id = categories.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                tasks: tasks.into_iter().map(|t| (t.id.0, t)).collect(),
                categories: categories.into_iter().map(|c| (c.id.0, c)).collect(),
                next_task_id,
                next_category_id,
            }),
        }
    }

    /// Create a backend seeded with demo fixture data
    pub fn sample() -> Self {
        let today = Local::now().date_naive();
        let categories = vec![
            Category::new(1, "Work").with_color("blue"),
            Category::new(2, "Personal").with_color("green"),
        ];
        let tasks = vec![
            Task::new(1, "Review quarterly report")
                .with_priority(Priority::High)
                .with_urgency(Urgency::Urgent)
                .with_due_date(today.pred_opt())
                .with_category(Some(CategoryId(1))),
            Task::new(2, "Buy groceries")
                .with_description("Milk, eggs, coffee")
                .with_due_date(Some(today))
                .with_category(Some(CategoryId(2))),
            Task::new(3, "Plan team offsite")
                .with_priority(Priority::Low)
                .with_due_date(today.checked_add_days(chrono::Days::new(7)))
                .with_category(Some(CategoryId(1))),
            Task::new(4, "Renew library books").with_completed(true),
        ];
        Self::with_records(tasks, categories)
    }
}

#[async_trait]
impl TaskBackend for InMemoryBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let inner = self.inner.lock().await;
        let mut tasks: Vec<Task> = inner.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        let inner = self.inner.lock().await;
        inner
            .tasks
            .get(&id.0)
            .cloned()
            .ok_or_else(|| ClientError::not_found("Task", id))
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        draft.validate()?;
        let mut inner = self.inner.lock().await;

        let id = inner.next_task_id;
        inner.next_task_id += 1;

        let now = Local::now();
        let mut task = Task::new(id, draft.title)
            .with_description(draft.description)
            .with_priority(draft.priority)
            .with_urgency(draft.urgency)
            .with_due_date(draft.due_date)
            .with_category(draft.category_id)
            .with_created_at(now);
        if draft.completed {
            task.set_completed(true, now);
        }
        debug!(id, "created task");

        inner.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;
        let mut inner = self.inner.lock().await;

        let task = inner
            .tasks
            .get_mut(&id.0)
            .ok_or_else(|| ClientError::not_found("Task", id))?;
        patch.apply_to(task);
        // Pairing invariant, regardless of what the patch carried
        if task.completed && task.completed_at.is_none() {
            task.completed_at = Some(Local::now());
        }
        debug!(%id, "updated task");
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .tasks
            .remove(&id.0)
            .map(|_| debug!(%id, "deleted task"))
            .ok_or_else(|| ClientError::not_found("Task", id))
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let inner = self.inner.lock().await;
        let mut categories: Vec<Category> = inner
            .categories
            .values()
            .cloned()
            .map(|mut c| {
                // task_count is a cached hint; refresh it on the way out
                c.task_count = inner
                    .tasks
                    .values()
                    .filter(|t| t.category_id == Some(c.id))
                    .count() as u32;
                c
            })
            .collect();
        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category> {
        let inner = self.inner.lock().await;
        inner
            .categories
            .get(&id.0)
            .cloned()
            .ok_or_else(|| ClientError::not_found("Category", id))
    }

    async fn create_category(&self, draft: CategoryDraft) -> Result<Category> {
        draft.validate()?;
        let mut inner = self.inner.lock().await;

        let id = inner.next_category_id;
        inner.next_category_id += 1;

        let category = Category::new(id, draft.name).with_color(draft.color);
        inner.categories.insert(id, category.clone());
        debug!(id, "created category");
        Ok(category)
    }

    async fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category> {
        patch.validate()?;
        let mut inner = self.inner.lock().await;

        let category = inner
            .categories
            .get_mut(&id.0)
            .ok_or_else(|| ClientError::not_found("Category", id))?;
        patch.apply_to(category);
        Ok(category.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.categories.remove(&id.0).is_none() {
            return Err(ClientError::not_found("Category", id));
        }
        // Tasks keep their weak reference; a dangling category renders
        // as uncategorized downstream
        Ok(())
    }
}

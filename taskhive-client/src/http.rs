//! HTTP repository backend
//!
//! Thin reqwest wrapper over the hosted record store. This is where
//! wire records get canonicalized: the service historically served both
//! a flat field shape and a legacy `_c`-suffixed shape for the same
//! logical fields, and lookup references arrive either as a bare id or
//! as an embedded record. Serde aliases collapse all of that into the
//! one canonical schema here, so nothing past this module ever sees a
//! wire shape.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use taskhive_core::{
    Category, CategoryDraft, CategoryId, CategoryPatch, Priority, Task, TaskDraft, TaskId,
    TaskPatch, Urgency,
};

use crate::backend::TaskBackend;
use crate::error::{ClientError, Result};

/// Backend talking to the hosted record store over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for the given base URL (e.g. `https://api.example.com/v1`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turn a response into `T`, surfacing backend failures as a single
    /// human-readable message
    async fn decode<T: for<'de> Deserialize<'de>>(
        resp: reqwest::Response,
        context: &str,
    ) -> Result<T> {
        if !resp.status().is_success() {
            let message = resp.text().await.unwrap_or_default();
            let message = if message.trim().is_empty() {
                format!("{} failed", context)
            } else {
                message
            };
            return Err(ClientError::api(message));
        }
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::http(format!("decoding {} response", context), e))
    }

    async fn check(resp: reqwest::Response, context: &str) -> Result<()> {
        if !resp.status().is_success() {
            let message = resp.text().await.unwrap_or_default();
            let message = if message.trim().is_empty() {
                format!("{} failed", context)
            } else {
                message
            };
            return Err(ClientError::api(message));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskBackend for HttpBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        debug!("fetching task collection");
        let resp = self
            .client
            .get(self.url("tasks"))
            .send()
            .await
            .map_err(|e| ClientError::http("listing tasks", e))?;
        let records: Vec<TaskRecord> = Self::decode(resp, "listing tasks").await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        debug!(%id, "fetching task");
        let resp = self
            .client
            .get(self.url(&format!("tasks/{}", id)))
            .send()
            .await
            .map_err(|e| ClientError::http("fetching task", e))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("Task", id));
        }
        let record: TaskRecord = Self::decode(resp, "fetching task").await?;
        Ok(record.into())
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        draft.validate()?;
        debug!(title = %draft.title, "creating task");
        let resp = self
            .client
            .post(self.url("tasks"))
            .json(&draft)
            .send()
            .await
            .map_err(|e| ClientError::http("creating task", e))?;
        let record: TaskRecord = Self::decode(resp, "creating task").await?;
        Ok(record.into())
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;
        debug!(%id, "updating task");
        let resp = self
            .client
            .patch(self.url(&format!("tasks/{}", id)))
            .json(&patch)
            .send()
            .await
            .map_err(|e| ClientError::http("updating task", e))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("Task", id));
        }
        let record: TaskRecord = Self::decode(resp, "updating task").await?;
        Ok(record.into())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        debug!(%id, "deleting task");
        let resp = self
            .client
            .delete(self.url(&format!("tasks/{}", id)))
            .send()
            .await
            .map_err(|e| ClientError::http("deleting task", e))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("Task", id));
        }
        Self::check(resp, "deleting task").await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        debug!("fetching categories");
        let resp = self
            .client
            .get(self.url("categories"))
            .send()
            .await
            .map_err(|e| ClientError::http("listing categories", e))?;
        let records: Vec<CategoryRecord> = Self::decode(resp, "listing categories").await?;
        Ok(records.into_iter().map(Category::from).collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category> {
        debug!(%id, "fetching category");
        let resp = self
            .client
            .get(self.url(&format!("categories/{}", id)))
            .send()
            .await
            .map_err(|e| ClientError::http("fetching category", e))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("Category", id));
        }
        let record: CategoryRecord = Self::decode(resp, "fetching category").await?;
        Ok(record.into())
    }

    async fn create_category(&self, draft: CategoryDraft) -> Result<Category> {
        draft.validate()?;
        debug!(name = %draft.name, "creating category");
        let resp = self
            .client
            .post(self.url("categories"))
            .json(&draft)
            .send()
            .await
            .map_err(|e| ClientError::http("creating category", e))?;
        let record: CategoryRecord = Self::decode(resp, "creating category").await?;
        Ok(record.into())
    }

    async fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category> {
        patch.validate()?;
        debug!(%id, "updating category");
        let resp = self
            .client
            .patch(self.url(&format!("categories/{}", id)))
            .json(&patch)
            .send()
            .await
            .map_err(|e| ClientError::http("updating category", e))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("Category", id));
        }
        let record: CategoryRecord = Self::decode(resp, "updating category").await?;
        Ok(record.into())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<()> {
        debug!(%id, "deleting category");
        let resp = self
            .client
            .delete(self.url(&format!("categories/{}", id)))
            .send()
            .await
            .map_err(|e| ClientError::http("deleting category", e))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::not_found("Category", id));
        }
        Self::check(resp, "deleting category").await
    }
}

/// A category reference as it appears on the wire: either a bare id or
/// an embedded lookup record
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum CategoryRef {
    Id(u32),
    Record {
        #[serde(alias = "Id")]
        id: u32,
    },
}

impl From<CategoryRef> for CategoryId {
    fn from(r: CategoryRef) -> Self {
        match r {
            CategoryRef::Id(id) => CategoryId(id),
            CategoryRef::Record { id } => CategoryId(id),
        }
    }
}

/// Task record as served by the backend, in either field shape
#[derive(Deserialize, Debug)]
struct TaskRecord {
    #[serde(alias = "Id")]
    id: u32,
    #[serde(alias = "title_c")]
    title: String,
    #[serde(default, alias = "description_c")]
    description: String,
    #[serde(default, alias = "completed_c")]
    completed: bool,
    #[serde(default, alias = "priority_c")]
    priority: Priority,
    #[serde(default, alias = "urgency_c")]
    urgency: Urgency,
    #[serde(default, alias = "due_date_c")]
    due_date: Option<NaiveDate>,
    #[serde(default, alias = "category_id_c")]
    category_id: Option<CategoryRef>,
    #[serde(alias = "created_at_c")]
    created_at: DateTime<Local>,
    #[serde(default, alias = "completed_at_c")]
    completed_at: Option<DateTime<Local>>,
}

impl From<TaskRecord> for Task {
    fn from(r: TaskRecord) -> Self {
        // A completed record without a timestamp still has to satisfy
        // the pairing invariant; fall back to the created timestamp
        let completed_at = match (r.completed, r.completed_at) {
            (true, Some(at)) => Some(at),
            (true, None) => Some(r.created_at),
            (false, _) => None,
        };
        Task {
            id: TaskId(r.id),
            title: r.title,
            description: r.description,
            completed: r.completed,
            priority: r.priority,
            urgency: r.urgency,
            due_date: r.due_date,
            category_id: r.category_id.map(CategoryId::from),
            created_at: r.created_at,
            completed_at,
        }
    }
}

/// Category record as served by the backend, in either field shape
#[derive(Deserialize, Debug)]
struct CategoryRecord {
    #[serde(alias = "Id")]
    id: u32,
    #[serde(alias = "Name")]
    name: String,
    #[serde(default, alias = "color_c")]
    color: String,
    #[serde(default, alias = "task_count_c")]
    task_count: u32,
}

impl From<CategoryRecord> for Category {
    fn from(r: CategoryRecord) -> Self {
        Category {
            id: CategoryId(r.id),
            name: r.name,
            color: r.color,
            task_count: r.task_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalizes_suffixed_record_shape() {
        let record: TaskRecord = serde_json::from_str(
            r#"{
                "Id": 12,
                "title_c": "Legacy shape",
                "description_c": "from the old table",
                "completed_c": false,
                "priority_c": "high",
                "due_date_c": "2024-04-01",
                "category_id_c": {"Id": 3},
                "created_at_c": "2024-03-01T08:00:00+00:00"
            }"#,
        )
        .unwrap();
        let task = Task::from(record);

        assert_eq!(task.id, TaskId(12));
        assert_eq!(task.title, "Legacy shape");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category_id, Some(CategoryId(3)));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 4, 1));
    }

    #[test]
    fn test_canonicalizes_flat_record_shape() {
        let record: TaskRecord = serde_json::from_str(
            r#"{
                "id": 5,
                "title": "Flat shape",
                "completed": true,
                "category_id": 7,
                "created_at": "2024-03-01T08:00:00+00:00"
            }"#,
        )
        .unwrap();
        let task = Task::from(record);

        assert_eq!(task.id, TaskId(5));
        assert_eq!(task.category_id, Some(CategoryId(7)));
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.urgency, Urgency::Normal);
        // Completed record without a timestamp: pairing invariant holds
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(task.created_at));
    }

    #[test]
    fn test_category_record_shapes() {
        let record: CategoryRecord =
            serde_json::from_str(r#"{"Id": 2, "Name": "Work", "color_c": "red", "task_count_c": 9}"#)
                .unwrap();
        let category = Category::from(record);
        assert_eq!(category.id, CategoryId(2));
        assert_eq!(category.name, "Work");
        assert_eq!(category.color, "red");

        let record: CategoryRecord =
            serde_json::from_str(r#"{"id": 4, "name": "Home", "color": "blue"}"#).unwrap();
        let category = Category::from(record);
        assert_eq!(category.id, CategoryId(4));
        assert_eq!(category.task_count, 0);
    }
}

//! Task and category domain model
//!
//! Pure domain types with no I/O operations. The repository client
//! canonicalizes whatever the backend sends into these shapes; nothing
//! downstream ever sees a wire record.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Maximum length of a task title
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a task description
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Newtype wrapper for task IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl From<u32> for TaskId {
    fn from(id: u32) -> Self {
        TaskId(id)
    }
}

impl From<TaskId> for u32 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype wrapper for category IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u32);

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        CategoryId(id)
    }
}

impl From<CategoryId> for u32 {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority level
///
/// Unrecognized values deserialize to `Low` (the lowest-certainty weight);
/// the default for newly created tasks is `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    /// Parse from string (case-insensitive); unknown values fall back to `Low`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }

    /// The lowercase token used by route filters and the wire contract
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::parse(&s)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task urgency level
///
/// Unrecognized values deserialize to `Normal`. This fallback is
/// deliberately different from [`Priority`]'s (see `Urgency::weight`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Urgency {
    Urgent,
    Normal,
    Low,
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

impl Urgency {
    /// Parse from string (case-insensitive); unknown values fall back to `Normal`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "urgent" => Urgency::Urgent,
            "low" => Urgency::Low,
            _ => Urgency::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Urgent => "urgent",
            Urgency::Normal => "normal",
            Urgency::Low => "low",
        }
    }
}

impl From<String> for Urgency {
    fn from(s: String) -> Self {
        Urgency::parse(&s)
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task
///
/// Invariants:
/// - `completed == false` implies `completed_at == None`
/// - `completed == true` implies `completed_at == Some(t)` with `t >= created_at`
/// - `category_id` is a weak reference and may dangle; consumers render
///   dangling references as uncategorized
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub urgency: Urgency,
    /// Calendar due date, no time component
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Category this task belongs to (None = uncategorized)
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Set once by the repository on creation, immutable after
    pub created_at: DateTime<Local>,
    /// Set when `completed` transitions false -> true, cleared on true -> false
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    /// Create a new task with the given title, stamped now
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            completed: false,
            priority: Priority::default(),
            urgency: Urgency::default(),
            due_date: None,
            category_id: None,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    /// Builder method to set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method to set urgency
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Builder method to set due date
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Builder method to set category
    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Builder method to set the created timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Local>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builder method to set completion status, maintaining the
    /// completed/completed_at pairing
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.set_completed(completed, Local::now());
        self
    }

    /// Set completion status; `at` is used as the completion timestamp
    /// when transitioning to completed
    pub fn set_completed(&mut self, completed: bool, at: DateTime<Local>) {
        self.completed = completed;
        self.completed_at = if completed { Some(at) } else { None };
    }
}

/// A task category
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Display color token (e.g. "red", "blue"); purely presentational
    #[serde(default)]
    pub color: String,
    /// Cached task count hint. Never authoritative; recomputed by the
    /// backend and not to be trusted as a source of truth.
    #[serde(default)]
    pub task_count: u32,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            task_count: 0,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CoreError::validation("title", "must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::validation(
            "title",
            format!("must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::validation(
            "description",
            format!("must be at most {} characters", MAX_DESCRIPTION_LEN),
        ));
    }
    Ok(())
}

/// Fields accepted when creating a task
///
/// `created_at` is repository-assigned and therefore absent here.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Validate draft fields before issuing a create
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_description(&self.description)
    }
}

/// Partial field replacement for a task update
///
/// `None` fields are left untouched. `created_at` is immutable
/// post-creation and cannot appear here; `completed_at` is computed by
/// the caller when toggling completion.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    /// `Some(None)` clears the due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    /// `Some(None)` moves the task to uncategorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<CategoryId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<DateTime<Local>>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn completed_at(mut self, completed_at: Option<DateTime<Local>>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.urgency.is_none()
            && self.due_date.is_none()
            && self.category_id.is_none()
            && self.completed_at.is_none()
    }

    /// Validate patch fields before issuing an update
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }

    /// Apply this patch to a task, field by field
    ///
    /// Clearing `completed` also clears `completed_at` so the pairing
    /// invariant holds regardless of what the patch carries.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(urgency) = self.urgency {
            task.urgency = urgency;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(category_id) = self.category_id {
            task.category_id = category_id;
        }
        if let Some(completed_at) = self.completed_at {
            task.completed_at = completed_at;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
            if !completed {
                task.completed_at = None;
            }
        }
    }
}

/// Fields accepted when creating a category
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: String::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("name", "must not be empty"));
        }
        Ok(())
    }
}

/// Partial field replacement for a category update
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CoreError::validation("name", "must not be empty"));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation_defaults() {
        let task = Task::new(1, "Test task");

        assert_eq!(task.id, TaskId(1));
        assert_eq!(task.title, "Test task");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.urgency, Urgency::Normal);
        assert!(task.due_date.is_none());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_completed_pairing() {
        let mut task = Task::new(1, "Test");
        let now = Local::now();

        task.set_completed(true, now);
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(now));
        assert!(task.completed_at.unwrap() >= task.created_at);

        task.set_completed(false, now);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_priority_fallback_is_low() {
        assert_eq!(Priority::parse("high"), Priority::High);
        assert_eq!(Priority::parse("HIGH"), Priority::High);
        assert_eq!(Priority::parse("banana"), Priority::Low);
        assert_eq!(Priority::parse(""), Priority::Low);
    }

    #[test]
    fn test_urgency_fallback_is_normal() {
        assert_eq!(Urgency::parse("urgent"), Urgency::Urgent);
        assert_eq!(Urgency::parse("banana"), Urgency::Normal);
        assert_eq!(Urgency::parse(""), Urgency::Normal);
    }

    #[test]
    fn test_unknown_enum_values_deserialize_with_fallback() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Odd record",
                "priority": "critical",
                "urgency": "whenever",
                "created_at": "2024-01-01T09:00:00+00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.urgency, Urgency::Normal);
        assert!(task.description.is_empty());
        assert!(task.category_id.is_none());
    }

    #[test]
    fn test_draft_validation() {
        assert!(TaskDraft::new("Valid").validate().is_ok());
        assert!(TaskDraft::new("").validate().is_err());
        assert!(TaskDraft::new("   ").validate().is_err());
        assert!(TaskDraft::new("x".repeat(201)).validate().is_err());
        assert!(
            TaskDraft::new("ok")
                .with_description("y".repeat(1001))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_patch_apply_clears_completed_at() {
        let mut task = Task::new(1, "Test").with_completed(true);
        assert!(task.completed_at.is_some());

        let patch = TaskPatch::new().completed(false);
        patch.apply_to(&mut task);

        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_patch_apply_partial() {
        let mut task = Task::new(1, "Before").with_priority(Priority::Low);
        let created = task.created_at;

        let patch = TaskPatch::new()
            .title("After")
            .due_date(NaiveDate::from_ymd_opt(2024, 6, 1));
        patch.apply_to(&mut task);

        assert_eq!(task.title, "After");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(task.created_at, created);
    }

    #[test]
    fn test_patch_clear_category() {
        let mut task = Task::new(1, "Test").with_category(Some(CategoryId(4)));

        let patch = TaskPatch::new().category(None);
        patch.apply_to(&mut task);

        assert!(task.category_id.is_none());
    }
}

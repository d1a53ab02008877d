//! Taskhive Core - Pure domain logic for task management
//!
//! This crate contains no I/O operations. Fetching and persistence
//! are handled by the repository client in consuming crates.

pub mod date;
pub mod error;
pub mod rank;
pub mod task;
pub mod view;

pub use date::DueClass;
pub use error::{CoreError, Result};
pub use rank::BadgeStyle;
pub use task::{
    Category, CategoryDraft, CategoryId, CategoryPatch, Priority, Task, TaskDraft, TaskId,
    TaskPatch, Urgency,
};
pub use view::{RouteFilter, SortKey, TaskView, ViewQuery, derive_view, derive_view_on};

//! Task view-model derivation
//!
//! Turns the full task collection plus the active filter state into the
//! ordered, filtered projection the presentation layer renders, along
//! with derived counts and page metadata. Pure: no mutation, no I/O,
//! never panics on malformed input (unknown tokens widen to "all tasks").

use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::date::classify_on;
use crate::rank::compare_by_priority;
use crate::task::{Category, CategoryId, Priority, Task};

// Route token for a category scope: "category:5"
static CATEGORY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^category:(\d+)$").expect("Invalid category token pattern")
});

/// View-scoping selector derived from the current navigation location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteFilter {
    /// Default route: all tasks
    #[default]
    All,
    /// Tasks in a specific category (exact match on the weak reference)
    Category(CategoryId),
    /// Tasks with a specific priority
    Priority(Priority),
    /// Incomplete tasks whose due date is overdue
    Overdue,
    /// Incomplete tasks due today
    Today,
    /// Incomplete tasks with a due date strictly beyond today
    Upcoming,
    /// Completed tasks
    Completed,
}

impl RouteFilter {
    /// Parse a route token ("overdue", "category:5", "high", ...)
    ///
    /// Unknown tokens fall back to `All`, the widest-scope rendering.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim().to_lowercase();

        if let Some(caps) = CATEGORY_TOKEN.captures(&token) {
            if let Some(id) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                return RouteFilter::Category(CategoryId(id));
            }
            return RouteFilter::All;
        }

        match token.as_str() {
            "overdue" => RouteFilter::Overdue,
            "today" => RouteFilter::Today,
            "upcoming" => RouteFilter::Upcoming,
            "completed" => RouteFilter::Completed,
            "high" => RouteFilter::Priority(Priority::High),
            "medium" => RouteFilter::Priority(Priority::Medium),
            "low" => RouteFilter::Priority(Priority::Low),
            _ => RouteFilter::All,
        }
    }

    fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            RouteFilter::All => true,
            RouteFilter::Category(id) => task.category_id == Some(*id),
            RouteFilter::Priority(priority) => task.priority == *priority,
            RouteFilter::Overdue => {
                !task.completed && classify_on(task.due_date, today).is_overdue
            }
            RouteFilter::Today => !task.completed && classify_on(task.due_date, today).is_today,
            RouteFilter::Upcoming => {
                !task.completed
                    && task.due_date.is_some()
                    && classify_on(task.due_date, today).is_upcoming
            }
            RouteFilter::Completed => task.completed,
        }
    }
}

/// Sort order for the visible task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Created timestamp, newest first
    #[default]
    Created,
    /// Priority weight descending, urgency as tie-break
    Priority,
    /// Due date ascending, tasks without a date last
    Due,
    /// Title, case-aware lexical ascending
    Alphabetical,
    /// On the option surface but without a dedicated comparator; orders
    /// like `Created`
    Today,
    /// On the option surface but without a dedicated comparator; orders
    /// like `Created`
    Overdue,
}

impl SortKey {
    /// Parse from string (case-insensitive); unknown values default to `Created`
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "priority" => SortKey::Priority,
            "due" => SortKey::Due,
            "alphabetical" => SortKey::Alphabetical,
            "today" => SortKey::Today,
            "overdue" => SortKey::Overdue,
            _ => SortKey::Created,
        }
    }
}

/// The filter state a view derivation runs against
#[derive(Debug, Clone)]
pub struct ViewQuery {
    pub route: RouteFilter,
    /// Free-text search; empty is a no-op
    pub search: String,
    /// Exact-match priority filter; `None` is a no-op
    pub priority: Option<Priority>,
    /// When false, completed tasks are dropped from the visible list
    pub show_completed: bool,
    pub sort: SortKey,
}

impl Default for ViewQuery {
    /// Default query: all tasks, completed shown, newest first
    fn default() -> Self {
        Self {
            route: RouteFilter::All,
            search: String::new(),
            priority: None,
            show_completed: true,
            sort: SortKey::Created,
        }
    }
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: RouteFilter) -> Self {
        self.route = route;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_show_completed(mut self, show_completed: bool) -> Self {
        self.show_completed = show_completed;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// The derived, read-only projection ready for rendering
#[derive(Debug, Clone)]
pub struct TaskView<'a> {
    /// Filtered and ordered tasks
    pub visible: Vec<&'a Task>,
    /// Size of the unfiltered collection
    pub total_count: usize,
    pub visible_count: usize,
    pub page_title: String,
    pub empty_title: String,
    pub empty_description: String,
}

/// Derive the view against an explicit "today"
///
/// The filtering stages run in a fixed order (route, search, priority,
/// completed visibility); each narrows the previous stage's output.
pub fn derive_view_on<'a>(
    tasks: &'a [Task],
    categories: &[Category],
    query: &ViewQuery,
    today: NaiveDate,
) -> TaskView<'a> {
    // Stage 1: route scope
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| query.route.matches(t, today))
        .collect();

    // Stage 2: free-text search on title or non-empty description
    if !query.search.is_empty() {
        let needle = query.search.to_lowercase();
        visible.retain(|t| {
            t.title.to_lowercase().contains(&needle)
                || (!t.description.is_empty() && t.description.to_lowercase().contains(&needle))
        });
    }

    // Stage 3: exact priority match
    if let Some(priority) = query.priority {
        visible.retain(|t| t.priority == priority);
    }

    // Stage 4: completed visibility
    if !query.show_completed {
        visible.retain(|t| !t.completed);
    }

    match query.sort {
        SortKey::Priority => visible.sort_by(|a, b| compare_by_priority(a, b)),
        SortKey::Due => visible.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortKey::Alphabetical => visible.sort_by(|a, b| a.title.cmp(&b.title)),
        // Today and Overdue have no dedicated comparator; they fall back
        // to the default created-descending order
        SortKey::Created | SortKey::Today | SortKey::Overdue => {
            visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
    }

    // Completed tasks go after incomplete ones, order within each group
    // preserved (sort_by_key is stable)
    visible.sort_by_key(|t| t.completed);

    let visible_count = visible.len();

    TaskView {
        visible,
        total_count: tasks.len(),
        visible_count,
        page_title: page_title(&query.route, categories),
        empty_title: empty_title(&query.route, &query.search),
        empty_description: empty_description(&query.route, &query.search),
    }
}

/// Derive the view against the local calendar day
pub fn derive_view<'a>(
    tasks: &'a [Task],
    categories: &[Category],
    query: &ViewQuery,
) -> TaskView<'a> {
    derive_view_on(tasks, categories, query, Local::now().date_naive())
}

fn page_title(route: &RouteFilter, categories: &[Category]) -> String {
    match route {
        RouteFilter::Category(id) => categories
            .iter()
            .find(|c| c.id == *id)
            .map(|c| c.name.clone())
            // Dangling category reference: generic label, never a failure
            .unwrap_or_else(|| "Category".to_string()),
        RouteFilter::Priority(Priority::High) => "High Priority Tasks".to_string(),
        RouteFilter::Priority(Priority::Medium) => "Medium Priority Tasks".to_string(),
        RouteFilter::Priority(Priority::Low) => "Low Priority Tasks".to_string(),
        RouteFilter::Overdue => "Overdue Tasks".to_string(),
        RouteFilter::Today => "Due Today".to_string(),
        RouteFilter::Upcoming => "Upcoming Tasks".to_string(),
        RouteFilter::Completed => "Completed Tasks".to_string(),
        RouteFilter::All => "All Tasks".to_string(),
    }
}

fn empty_title(route: &RouteFilter, search: &str) -> String {
    match route {
        RouteFilter::Overdue => "No overdue tasks".to_string(),
        RouteFilter::Today => "Nothing due today".to_string(),
        RouteFilter::Upcoming => "No upcoming tasks".to_string(),
        RouteFilter::Completed => "No completed tasks yet".to_string(),
        RouteFilter::Priority(priority) => format!("No {} priority tasks", priority),
        RouteFilter::Category(_) => "No tasks in this category".to_string(),
        RouteFilter::All if !search.is_empty() => "No tasks match your search".to_string(),
        RouteFilter::All => "No tasks yet".to_string(),
    }
}

fn empty_description(route: &RouteFilter, search: &str) -> String {
    // An active search takes precedence over the route in messaging
    if !search.is_empty() {
        return "Try adjusting your search terms or create a new task.".to_string();
    }
    match route {
        RouteFilter::Completed => "Complete some tasks to see them here!".to_string(),
        _ => "Create your first task to get started!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Urgency;
    use chrono::{Duration, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn task(id: u32, title: &str, created_day: u32) -> Task {
        Task::new(id, title).with_created_at(
            Local
                .with_ymd_and_hms(2024, 1, created_day, 12, 0, 0)
                .unwrap(),
        )
    }

    fn ids(view: &TaskView) -> Vec<u32> {
        view.visible.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_default_query_returns_everything_newest_first() {
        let tasks = vec![task(1, "A", 1), task(2, "B", 3), task(3, "C", 2)];
        let view = derive_view_on(&tasks, &[], &ViewQuery::new(), today());

        assert_eq!(view.visible_count, tasks.len());
        assert_eq!(view.total_count, tasks.len());
        assert_eq!(ids(&view), vec![2, 3, 1]);
        assert_eq!(view.page_title, "All Tasks");
    }

    #[test]
    fn test_route_token_parsing() {
        assert_eq!(RouteFilter::from_token("overdue"), RouteFilter::Overdue);
        assert_eq!(
            RouteFilter::from_token("category:5"),
            RouteFilter::Category(CategoryId(5))
        );
        assert_eq!(
            RouteFilter::from_token("high"),
            RouteFilter::Priority(Priority::High)
        );
        // Unknown tokens widen to the default route
        assert_eq!(RouteFilter::from_token("bogus"), RouteFilter::All);
        assert_eq!(RouteFilter::from_token("category:x"), RouteFilter::All);
    }

    #[test]
    fn test_category_route_tolerates_dangling_reference() {
        let tasks =
            vec![task(1, "A", 1).with_category(Some(CategoryId(9)))];
        let query = ViewQuery::new().with_route(RouteFilter::Category(CategoryId(9)));
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(view.visible_count, 1);
        assert_eq!(view.page_title, "Category");
    }

    #[test]
    fn test_category_route_resolves_name() {
        let categories = vec![Category::new(9, "Errands")];
        let tasks = vec![
            task(1, "A", 1).with_category(Some(CategoryId(9))),
            task(2, "B", 2),
        ];
        let query = ViewQuery::new().with_route(RouteFilter::Category(CategoryId(9)));
        let view = derive_view_on(&tasks, &categories, &query, today());

        assert_eq!(ids(&view), vec![1]);
        assert_eq!(view.page_title, "Errands");
    }

    #[test]
    fn test_overdue_route_excludes_completed_and_today() {
        let tasks = vec![
            task(1, "past", 1).with_due_date(Some(today() - Duration::days(2))),
            task(2, "past done", 1)
                .with_due_date(Some(today() - Duration::days(2)))
                .with_completed(true),
            task(3, "due today", 1).with_due_date(Some(today())),
            task(4, "no date", 1),
        ];
        let query = ViewQuery::new().with_route(RouteFilter::Overdue);
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(ids(&view), vec![1]);
        assert_eq!(view.empty_title, "No overdue tasks");
    }

    #[test]
    fn test_upcoming_route_requires_future_due_date() {
        let tasks = vec![
            task(1, "future", 1).with_due_date(Some(today() + Duration::days(3))),
            task(2, "today", 1).with_due_date(Some(today())),
            task(3, "undated", 1),
            task(4, "future done", 1)
                .with_due_date(Some(today() + Duration::days(3)))
                .with_completed(true),
        ];
        let query = ViewQuery::new().with_route(RouteFilter::Upcoming);
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn test_search_matches_title_and_description_case_insensitive() {
        let tasks = vec![
            task(1, "Food shopping", 1),
            task(2, "Bar", 2),
            task(3, "Other", 3).with_description("needs FOO supplies"),
        ];
        let query = ViewQuery::new().with_search("foo");
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(ids(&view), vec![3, 1]);
    }

    #[test]
    fn test_search_ignores_empty_description() {
        let tasks = vec![task(1, "Bar", 1)];
        let query = ViewQuery::new().with_search("foo");
        let view = derive_view_on(&tasks, &[], &query, today());

        assert!(view.visible.is_empty());
        assert_eq!(view.empty_title, "No tasks match your search");
        assert_eq!(
            view.empty_description,
            "Try adjusting your search terms or create a new task."
        );
    }

    #[test]
    fn test_priority_filter_is_exact() {
        let tasks = vec![
            task(1, "A", 1).with_priority(Priority::High),
            task(2, "B", 2).with_priority(Priority::Low),
        ];
        let query = ViewQuery::new().with_priority(Some(Priority::High));
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn test_hidden_completed_still_counts_toward_total() {
        let tasks = vec![
            task(1, "A", 1),
            task(2, "B", 2),
            task(3, "C", 3).with_completed(true),
        ];
        let query = ViewQuery::new().with_show_completed(false);
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(ids(&view), vec![2, 1]);
        assert_eq!(view.total_count, 3);
        assert_eq!(view.visible_count, 2);
    }

    #[test]
    fn test_priority_sort() {
        let tasks = vec![
            task(1, "A", 1).with_priority(Priority::Low),
            task(2, "B", 2).with_priority(Priority::High),
        ];
        let query = ViewQuery::new().with_sort(SortKey::Priority);
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(ids(&view), vec![2, 1]);
    }

    #[test]
    fn test_priority_sort_urgency_tiebreak_then_stable() {
        let tasks = vec![
            task(1, "A", 1).with_urgency(Urgency::Low),
            task(2, "B", 2).with_urgency(Urgency::Urgent),
            task(3, "C", 3).with_urgency(Urgency::Urgent),
        ];
        let query = ViewQuery::new().with_sort(SortKey::Priority);
        let view = derive_view_on(&tasks, &[], &query, today());

        // 2 and 3 tie exactly; input order between them is preserved
        assert_eq!(ids(&view), vec![2, 3, 1]);
    }

    #[test]
    fn test_due_sort_places_undated_last() {
        let tasks = vec![
            task(1, "no date", 3),
            task(2, "later", 1).with_due_date(Some(today() + Duration::days(5))),
            task(3, "sooner", 2).with_due_date(Some(today() + Duration::days(1))),
        ];
        let query = ViewQuery::new().with_sort(SortKey::Due);
        let view = derive_view_on(&tasks, &[], &query, today());

        assert_eq!(ids(&view), vec![3, 2, 1]);
    }

    #[test]
    fn test_alphabetical_sort_is_case_aware() {
        let tasks = vec![task(1, "pear", 1), task(2, "Apple", 2), task(3, "", 3)];
        let query = ViewQuery::new().with_sort(SortKey::Alphabetical);
        let view = derive_view_on(&tasks, &[], &query, today());

        // Lexical byte order: "" < "Apple" < "pear"
        assert_eq!(ids(&view), vec![3, 2, 1]);
    }

    #[test]
    fn test_today_and_overdue_sort_keys_fall_back_to_created() {
        let tasks = vec![task(1, "A", 1), task(2, "B", 2)];

        for key in ["today", "overdue"] {
            let query = ViewQuery::new().with_sort(SortKey::from_str(key));
            let view = derive_view_on(&tasks, &[], &query, today());
            assert_eq!(ids(&view), vec![2, 1]);
        }
    }

    #[test]
    fn test_completed_tasks_sink_to_the_end() {
        let tasks = vec![
            task(1, "done early", 4).with_completed(true),
            task(2, "open", 3),
            task(3, "done late", 2).with_completed(true),
            task(4, "open too", 1),
        ];
        let view = derive_view_on(&tasks, &[], &ViewQuery::new(), today());

        // Created desc within each group, completed after incomplete
        assert_eq!(ids(&view), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_unknown_sort_token_defaults_to_created() {
        assert_eq!(SortKey::from_str("banana"), SortKey::Created);
        assert_eq!(SortKey::from_str("PRIORITY"), SortKey::Priority);
    }
}

//! Task view rendering
//!
//! Renders the derived TaskView with colored badges and date labels.

use colored::{Color, Colorize};

use taskhive_core::{BadgeStyle, Category, Task, TaskView, date};

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn badge_color(token: &str) -> Color {
    match token {
        "red" => Color::Red,
        "yellow" => Color::Yellow,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "gray" => Color::BrightBlack,
        _ => Color::White,
    }
}

fn badge(style: BadgeStyle, use_color: bool) -> String {
    if use_color {
        format!("[{}]", style.label)
            .color(badge_color(style.color))
            .to_string()
    } else {
        format!("[{}]", style.label)
    }
}

/// Format a single task line
pub fn format_task(task: &Task, categories: &[Category], use_color: bool) -> String {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };

    let title = if use_color && task.completed {
        task.title.green().to_string()
    } else {
        task.title.clone()
    };

    let due_str = match task.due_date {
        Some(_) => {
            let label = date::format_short(task.due_date);
            let class = date::classify(task.due_date);
            if use_color && !task.completed {
                if class.is_overdue {
                    format!("({})", label).red().bold().to_string()
                } else if class.is_today {
                    format!("({})", label).yellow().to_string()
                } else {
                    format!("({})", label)
                }
            } else {
                format!("({})", label)
            }
        }
        None => String::new(),
    };

    // A dangling category reference renders as uncategorized
    let category_str = task
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| format!(" @{}", c.name))
        .unwrap_or_default();

    let mut line = format!(
        "{} [{}] {} {}",
        checkbox,
        task.id,
        title,
        badge(task.priority.badge(), use_color)
    );
    if !due_str.is_empty() {
        line.push(' ');
        line.push_str(&due_str);
    }
    line.push_str(&category_str);
    line
}

/// Render the full task view: header, task lines or empty state
pub fn render_view(view: &TaskView, categories: &[Category], use_color: bool) -> String {
    let mut out = String::new();

    let title = if use_color {
        view.page_title.bold().to_string()
    } else {
        view.page_title.clone()
    };
    out.push_str(&title);
    out.push('\n');
    out.push_str(&format!(
        "{} of {} tasks\n",
        view.visible_count, view.total_count
    ));

    if view.visible.is_empty() {
        out.push('\n');
        out.push_str(&view.empty_title);
        out.push('\n');
        out.push_str(&view.empty_description);
        out.push('\n');
        return out;
    }

    out.push('\n');
    for task in &view.visible {
        out.push_str(&format_task(task, categories, use_color));
        out.push('\n');
    }
    out
}

/// Render the category list with task-count hints
pub fn render_categories(categories: &[Category], use_color: bool) -> String {
    if categories.is_empty() {
        return "No categories yet\n".to_string();
    }

    let mut out = String::new();
    for category in categories {
        let name = if use_color {
            category
                .name
                .color(badge_color(&category.color))
                .to_string()
        } else {
            category.name.clone()
        };
        out.push_str(&format!(
            "[{}] {} ({} tasks)\n",
            category.id, name, category.task_count
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhive_core::{CategoryId, Priority, Task, ViewQuery, derive_view};

    #[test]
    fn test_format_task_plain() {
        let task = Task::new(3, "Write report").with_priority(Priority::High);
        let line = format_task(&task, &[], false);

        assert!(line.starts_with("[ ] [3] Write report"));
        assert!(line.contains("[High Priority]"));
    }

    #[test]
    fn test_dangling_category_renders_uncategorized() {
        let task = Task::new(1, "Orphan").with_category(Some(CategoryId(42)));
        let line = format_task(&task, &[], false);

        assert!(!line.contains('@'));
    }

    #[test]
    fn test_render_empty_view() {
        let tasks: Vec<Task> = Vec::new();
        let view = derive_view(&tasks, &[], &ViewQuery::new());
        let out = render_view(&view, &[], false);

        assert!(out.contains("All Tasks"));
        assert!(out.contains("0 of 0 tasks"));
        assert!(out.contains("No tasks yet"));
    }
}

//! Taskhive CLI entry point

mod cli;
mod config;
mod display;
mod error;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskhive_client::{HttpBackend, InMemoryBackend, TaskBackend, TaskStore};
use taskhive_core::{
    CategoryId, RouteFilter, TaskDraft, TaskId, TaskPatch, ViewQuery, date,
};

use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = config::load()?;

    let backend: Arc<dyn TaskBackend> = if config.backend_url.is_empty() {
        Arc::new(InMemoryBackend::sample())
    } else {
        Arc::new(HttpBackend::new(&config.backend_url))
    };
    let mut store = TaskStore::new(backend);

    let use_color = config.color.unwrap_or_else(display::supports_color);

    match args.command {
        Commands::List {
            route,
            search,
            priority,
            hide_completed,
            sort,
        } => {
            load_or_retry_hint(&mut store).await?;

            let query = ViewQuery::new()
                .with_route(RouteFilter::from_token(&route))
                .with_search(search.unwrap_or_default())
                .with_priority(priority.map(Into::into))
                .with_show_completed(!hide_completed)
                .with_sort(sort.into());

            print!("{}", display::render_view(&store.view(&query), store.categories(), use_color));
        }

        Commands::Add {
            title,
            due,
            desc,
            priority,
            urgency,
            category,
        } => {
            let due_date = match due.as_deref() {
                Some(input) => {
                    let parsed = date::parse_due(input);
                    if parsed.is_none() {
                        eprintln!("Warning: could not parse date '{}', ignoring", input);
                    }
                    parsed
                }
                None => None,
            };

            let mut draft = TaskDraft::new(title.join(" "))
                .with_due_date(due_date)
                .with_category(category.map(CategoryId));
            if let Some(desc) = desc {
                draft = draft.with_description(desc);
            }
            if let Some(priority) = priority {
                draft = draft.with_priority(priority.into());
            }
            if let Some(urgency) = urgency {
                draft = draft.with_urgency(urgency.into());
            }

            let task = store.create(draft).await?;
            println!("Created task #{}: {}", task.id, task.title);
        }

        Commands::Done { id } => {
            load_or_retry_hint(&mut store).await?;
            let task = store.toggle_completed(TaskId(id)).await?;
            if task.completed {
                println!("Task #{} completed", task.id);
            } else {
                println!("Task #{} marked as incomplete", task.id);
            }
        }

        Commands::Edit {
            id,
            title,
            desc,
            due,
            priority,
            urgency,
            category,
        } => {
            load_or_retry_hint(&mut store).await?;

            let mut patch = TaskPatch::new();
            if let Some(title) = title {
                patch = patch.title(title);
            }
            if let Some(desc) = desc {
                patch = patch.description(desc);
            }
            if let Some(due) = due.as_deref() {
                if due.trim().is_empty() {
                    patch = patch.due_date(None);
                } else {
                    match date::parse_due(due) {
                        Some(parsed) => patch = patch.due_date(Some(parsed)),
                        None => {
                            return Err(error::CliError::parse(format!(
                                "could not parse date '{}'",
                                due
                            )));
                        }
                    }
                }
            }
            if let Some(priority) = priority {
                patch = patch.priority(priority.into());
            }
            if let Some(urgency) = urgency {
                patch = patch.urgency(urgency.into());
            }
            if let Some(category) = category {
                // 0 moves the task to uncategorized
                let reference = (category != 0).then_some(CategoryId(category));
                patch = patch.category(reference);
            }

            if patch.is_empty() {
                println!("Nothing to change");
                return Ok(());
            }

            let task = store.update(TaskId(id), patch).await?;
            println!("Updated task #{}: {}", task.id, task.title);
        }

        Commands::Rm { id } => {
            store.delete(TaskId(id)).await?;
            println!("Task #{} deleted", id);
        }

        Commands::Categories => {
            load_or_retry_hint(&mut store).await?;
            print!("{}", display::render_categories(store.categories(), use_color));
        }
    }

    Ok(())
}

/// Load the collections; a failed load is recoverable by rerunning
async fn load_or_retry_hint(store: &mut TaskStore) -> Result<()> {
    if let Err(e) = store.load().await {
        eprintln!("Failed to load tasks: {}", e.message());
        eprintln!("Please try again.");
        return Err(e.into());
    }
    Ok(())
}

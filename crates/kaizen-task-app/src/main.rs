/*
[INPUT]:  CLI arguments and YAML configuration file
[OUTPUT]: Coordinator actions with printed notifications and snapshots
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the action flow
*/

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use kaizen_task_app::config::FileCredentialSource;
use kaizen_task_app::{AppConfig, Coordinator, NewTaskInput, Notification};
use kaizen_task_client::{ClientConfig, KaizenClient, Task, TaskId};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kaizen-task", version, about = "Kaizen personal task tracker")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", default_value = "kaizen-task.yaml")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks with derived lateness
    List,
    /// Create a task
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Due date, RFC 3339 (e.g. 2026-09-01T17:00:00Z)
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Duration estimate in minutes
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        priority: Option<u32>,
    },
    /// Delete a task by id
    Delete { task_id: TaskId },
    /// Run a countdown against a task's duration estimate
    Timer {
        task_id: TaskId,
        /// Mark the task complete once the countdown finishes
        #[arg(long)]
        complete_on_finish: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = AppConfig::load(&args.config_path)?;
    info!(base_url = %config.store.base_url, "configuration loaded");

    let client = KaizenClient::with_config_and_base_url(
        ClientConfig::default(),
        &config.store.base_url,
    )?;
    let credentials = FileCredentialSource::new(&args.config_path);
    let (mut coordinator, mut notifications) =
        Coordinator::new(Arc::new(client), Arc::new(credentials));

    match args.command {
        Command::List => {
            coordinator.refresh().await;
            drain_notifications(&mut notifications);
            print_tasks(coordinator.tasks());
        }
        Command::Add {
            title,
            description,
            due,
            duration,
            priority,
        } => {
            coordinator
                .add_task(NewTaskInput {
                    title,
                    description,
                    due_date: due,
                    duration_minutes: duration,
                    priority,
                })
                .await;
            drain_notifications(&mut notifications);
            print_tasks(coordinator.tasks());
        }
        Command::Delete { task_id } => {
            coordinator.delete_task(task_id).await;
            drain_notifications(&mut notifications);
        }
        Command::Timer {
            task_id,
            complete_on_finish,
        } => {
            coordinator.refresh().await;
            coordinator.start_timer(task_id);
            if !coordinator.timer_state().is_active() {
                drain_notifications(&mut notifications);
                return Ok(());
            }

            let minutes = coordinator.timer_state().initial_seconds() / 60;
            println!("timer started: task {task_id}, {minutes} min");

            while let Some(notification) = notifications.recv().await {
                match notification {
                    Notification::TimerFinished { task_id } => {
                        println!("time is up for task {task_id}");
                        if complete_on_finish {
                            coordinator.complete_timed_task().await;
                        } else {
                            coordinator.stop_timer();
                        }
                        drain_notifications(&mut notifications);
                        break;
                    }
                    other => print_notification(other),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

fn drain_notifications(notifications: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        print_notification(notification);
    }
}

fn print_notification(notification: Notification) {
    match notification {
        Notification::Info(message) => println!("ok: {message}"),
        Notification::Error(message) => eprintln!("error: {message}"),
        Notification::TimerFinished { task_id } => println!("time is up for task {task_id}"),
    }
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        let done = if task.completed { "x" } else { " " };
        let mut extras = Vec::new();
        if let Some(due) = task.due_date {
            extras.push(format!("due {}", due.format("%Y-%m-%d %H:%M")));
        }
        if let Some(minutes) = task.duration_minutes {
            extras.push(format!("{minutes} min"));
        }
        if let Some(priority) = task.priority.filter(|p| *p > 0) {
            extras.push(format!("priority {priority}"));
        }
        if task.is_late {
            extras.push("LATE".to_string());
        }
        if extras.is_empty() {
            println!("[{done}] {:>4}  {}", task.id, task.title);
        } else {
            println!("[{done}] {:>4}  {}  ({})", task.id, task.title, extras.join(", "));
        }
    }
}

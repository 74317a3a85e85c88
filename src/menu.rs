//! Interactive numbered menu.
//!
//! Reads choices line-by-line from stdin and mutates the task store. All
//! user-facing output goes to stdout; tracing stays on stderr so the menu
//! surface remains clean. Exiting (menu option or stdin EOF) returns to the
//! caller, which owns the cooperative scheduler shutdown.

use crate::error::Result;
use crate::store::{CompleteOutcome, TaskStore};
use crate::task::{self, Priority, Recurrence, Task};
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tracing::debug;

/// Run the menu loop until the user chooses to exit or stdin closes.
pub async fn run(store: &TaskStore) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);

    loop {
        print_menu();
        let Some(choice) = read_trimmed_line(&mut reader, "Enter your choice (1-6): ").await?
        else {
            println!("\nInput closed; exiting.");
            return Ok(());
        };

        match choice.as_str() {
            "1" => add_task(store, &mut reader).await?,
            "2" => print_tasks(&store.pending()?),
            "3" => complete_task(store, &mut reader).await?,
            "4" => print_tasks(&store.history()?),
            "5" => delete_task(store, &mut reader).await?,
            "6" => {
                println!("Exiting also stops due-date reminders. Exit? (y/n)");
                match read_trimmed_line(&mut reader, "").await? {
                    Some(answer) if answer.eq_ignore_ascii_case("y") => {
                        println!("Exiting the application.");
                        return Ok(());
                    }
                    Some(_) => println!("Returning to the main menu."),
                    None => return Ok(()),
                }
            }
            "" => {}
            other => {
                debug!("invalid menu choice: {other:?}");
                println!("Invalid choice. Please try again.");
            }
        }
    }
}

fn print_menu() {
    println!();
    println!("1. Add Task");
    println!("2. View Tasks");
    println!("3. Mark Task as Complete");
    println!("4. View Task History");
    println!("5. Delete Task");
    println!("6. Exit");
}

/// Prompt and read one line. `None` means stdin reached EOF.
async fn read_trimmed_line(
    reader: &mut BufReader<Stdin>,
    prompt: &str,
) -> Result<Option<String>> {
    use std::io::Write;

    if !prompt.is_empty() {
        print!("{prompt}");
        std::io::stdout().flush()?;
    }

    let mut line = String::new();
    let bytes_read = reader.read_line(&mut line).await?;
    if bytes_read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

async fn add_task(store: &TaskStore, reader: &mut BufReader<Stdin>) -> Result<()> {
    let Some(name) = read_trimmed_line(reader, "Enter task name: ").await? else {
        return Ok(());
    };
    if name.is_empty() {
        println!("Task name cannot be empty.");
        return Ok(());
    }

    let Some(due_input) =
        read_trimmed_line(reader, "Enter due date (YYYY-MM-DD HH:MM): ").await?
    else {
        return Ok(());
    };
    let due_date = match task::parse_due_date(&due_input) {
        Ok(due) => due,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    let Some(category) = read_trimmed_line(reader, "Enter category: ").await? else {
        return Ok(());
    };

    let Some(priority_input) =
        read_trimmed_line(reader, "Enter priority (High/Medium/Low): ").await?
    else {
        return Ok(());
    };
    let priority: Priority = match priority_input.parse() {
        Ok(p) => p,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    let Some(recurrence_input) =
        read_trimmed_line(reader, "Enter recurrence (daily/weekly/monthly/none): ").await?
    else {
        return Ok(());
    };
    let recurrence: Recurrence = match recurrence_input.parse() {
        Ok(r) => r,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    let Some(notes) = read_trimmed_line(reader, "Enter additional notes (optional): ").await?
    else {
        return Ok(());
    };

    store.add(Task::new(&name, due_date, category, priority, recurrence, notes))?;
    println!("Task '{name}' added successfully!");
    Ok(())
}

async fn complete_task(store: &TaskStore, reader: &mut BufReader<Stdin>) -> Result<()> {
    let Some(name) = read_trimmed_line(reader, "Enter task name to mark as complete: ").await?
    else {
        return Ok(());
    };

    match store.mark_complete(&name)? {
        CompleteOutcome::Completed { successor } => {
            println!("Task '{name}' marked as completed!");
            if let Some(next) = successor {
                println!(
                    "New recurring task '{}' added, due {}.",
                    next.name,
                    next.due_date.format(task::DUE_DATE_FORMAT)
                );
            }
        }
        CompleteOutcome::NotFound => {
            println!("Task '{name}' not found or already completed.");
        }
    }
    Ok(())
}

async fn delete_task(store: &TaskStore, reader: &mut BufReader<Stdin>) -> Result<()> {
    let Some(name) = read_trimmed_line(reader, "Enter task name to delete: ").await? else {
        return Ok(());
    };

    if store.delete(&name)? {
        println!("Task '{name}' deleted successfully!");
    } else {
        println!("Task '{name}' not found.");
    }
    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks to display.");
        return;
    }

    let now = Local::now().naive_local();
    for task in tasks {
        print!("{}", format_task(task, now));
    }
}

/// Render one task card in the listing format.
fn format_task(task: &Task, now: chrono::NaiveDateTime) -> String {
    use std::fmt::Write;

    let status = if task.completed { "Completed" } else { "Pending" };
    let mut out = String::new();
    let _ = writeln!(out, "--------------------");
    let _ = writeln!(out, "Name: {}", task.name);
    let _ = writeln!(out, "Due Date: {}", task.due_date.format(task::DUE_DATE_FORMAT));
    let _ = writeln!(out, "Category: {}", task.category);
    let _ = writeln!(out, "Priority: {}", task.priority);
    let _ = writeln!(out, "Recurrence: {}", task.recurrence);
    let _ = writeln!(out, "Status: {status}");
    if task.is_overdue(now) {
        let _ = writeln!(out, "OVERDUE!");
    }
    let _ = writeln!(out, "Notes: {}", task.notes);
    let _ = writeln!(out, "--------------------");
    out
}

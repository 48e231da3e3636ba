//! task-cli - a personal task list stored in a JSON file.

use clap::Parser;
use devtrack::cli::{TaskCli, TaskCommands};
use devtrack::commands::{self, Output};
use devtrack::config::{OutputFormat, TaskOverrides, TaskSettings, resolve_task_settings};
use devtrack::logging;
use devtrack::models::TaskStatus;
use devtrack::storage::JsonStore;
use std::process;

fn main() {
    logging::init();
    let cli = TaskCli::parse();

    let overrides = TaskOverrides {
        file: cli.file,
        output_format: cli.json.then_some(OutputFormat::Json),
    };

    let mut format = overrides.output_format.unwrap_or_default();

    let result = resolve_task_settings(&overrides).and_then(|settings| {
        tracing::debug!(
            file = %settings.store_path.value.display(),
            file_source = %settings.store_path.source,
            output = %settings.output_format.value,
            output_source = %settings.output_format.source,
            "resolved settings"
        );
        format = settings.output_format.value;
        run_command(cli.command, &settings)
    });

    if let Err(e) = result {
        report_error(&e, format);
        process::exit(1);
    }
}

fn report_error(err: &devtrack::Error, format: OutputFormat) {
    match format {
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": err.to_string() })),
        OutputFormat::Human => eprintln!("Error: {}", err),
    }
}

fn run_command(command: TaskCommands, settings: &TaskSettings) -> Result<(), devtrack::Error> {
    let format = settings.output_format.value;
    let mut store = JsonStore::open(&settings.store_path.value)?;

    match command {
        TaskCommands::List { status } => {
            let result = commands::task_list(&store, status);
            output(&result, format);
        }

        TaskCommands::Add { description } => {
            let result = commands::task_add(&mut store, description)?;
            output(&result, format);
        }

        TaskCommands::Update { id, description } => {
            let result = commands::task_update(&mut store, id, description)?;
            output(&result, format);
        }

        TaskCommands::MarkInProgress { id } => {
            let result = commands::task_mark(&mut store, id, TaskStatus::InProgress)?;
            output(&result, format);
        }

        TaskCommands::MarkDone { id } => {
            let result = commands::task_mark(&mut store, id, TaskStatus::Done)?;
            output(&result, format);
        }

        TaskCommands::MarkTodo { id } => {
            let result = commands::task_mark(&mut store, id, TaskStatus::Todo)?;
            output(&result, format);
        }

        TaskCommands::Delete { id } => {
            let result = commands::task_delete(&mut store, id)?;
            output(&result, format);
        }
    }

    Ok(())
}

fn output<T: Output>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Human => println!("{}", result.to_human()),
        OutputFormat::Json => println!("{}", result.to_json()),
    }
}

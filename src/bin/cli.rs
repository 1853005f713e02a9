use clap::Parser;
use prenatal_schedule::format::render_text;
use prenatal_schedule::{
    MilestoneTable, ScheduleBundle, calculate_from_input_with, load_table_from_csv,
    load_table_from_json, save_table_to_csv, save_table_to_json,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Reads REPL commands from stdin; flags only tune logging.
#[derive(Parser, Debug)]
#[command(
    name = "cli",
    version,
    about = "Interactive prenatal milestone calculator"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// `RUST_LOG` wins over the `-v` count if set.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("prenatal_schedule={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  <YYYY-MM-DD>                       Calculate the schedule for a due date\n  <empty line>                       Clear the schedule\n  show                               Show the current schedule\n  weeks <on|off>                     Toggle gestational week annotations\n  json                               Print the current schedule as JSON\n  table show                         Show the active milestone table\n  table <standard|friday>            Switch to a built-in milestone table\n  table load <json|csv> <path>       Load a milestone table from disk\n  table save <json|csv> <path>       Save the active milestone table to disk\n  quit|exit                          Exit"
    );
}

fn print_schedule(bundle: Option<&ScheduleBundle>, show_weeks: bool) {
    match bundle {
        Some(bundle) => println!("{}", render_text(bundle, show_weeks)),
        None => println!("No schedule. Enter a due date (YYYY-MM-DD) to calculate one."),
    }
}

fn print_table(table: &MilestoneTable) {
    println!("Table            : {}", table.name);
    println!("Rotation anchor  : {}", table.rotation_anchor);
    for spec in &table.milestones {
        println!("  {:<32} {}", spec.title, spec.rule.name());
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut table = MilestoneTable::standard();
    let mut due_input = String::new();
    let mut schedule: Option<ScheduleBundle> = None;
    let mut show_weeks = true;

    println!("Prenatal Schedule (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_schedule(schedule.as_ref(), show_weeks),
            "weeks" => match parts.next() {
                Some("on") => {
                    show_weeks = true;
                    print_schedule(schedule.as_ref(), show_weeks);
                }
                Some("off") => {
                    show_weeks = false;
                    print_schedule(schedule.as_ref(), show_weeks);
                }
                _ => println!("Usage: weeks <on|off>"),
            },
            "json" => match &schedule {
                Some(bundle) => match serde_json::to_string_pretty(bundle) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("No schedule."),
            },
            "table" => {
                let sub = parts.next();
                let format = parts.next();
                let path = parts.next();
                match (sub, format, path) {
                    (Some("show"), _, _) => print_table(&table),
                    (Some("load"), Some(format), Some(path)) => {
                        let loaded = match format {
                            "json" => load_table_from_json(path),
                            "csv" => load_table_from_csv(path),
                            _ => {
                                println!("Usage: table load <json|csv> <path>");
                                continue;
                            }
                        };
                        match loaded {
                            Ok(new_table) => {
                                table = new_table;
                                println!("Table '{}' loaded from {}", table.name, path);
                                schedule = recalculate(&table, &due_input);
                                print_schedule(schedule.as_ref(), show_weeks);
                            }
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    (Some("save"), Some(format), Some(path)) => {
                        let saved = match format {
                            "json" => save_table_to_json(&table, path),
                            "csv" => save_table_to_csv(&table, path),
                            _ => {
                                println!("Usage: table save <json|csv> <path>");
                                continue;
                            }
                        };
                        match saved {
                            Ok(()) => println!("Table saved to {path}"),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    (Some(name), None, None) => match MilestoneTable::builtin(name) {
                        Some(builtin) => {
                            table = builtin;
                            println!("Using table '{}'", table.name);
                            schedule = recalculate(&table, &due_input);
                            print_schedule(schedule.as_ref(), show_weeks);
                        }
                        None => println!("Unknown table '{name}'"),
                    },
                    _ => println!("Usage: table <show|standard|friday|load|save> ..."),
                }
            }
            _ => {
                // Anything else is the due-date field; blank clears it.
                due_input = input.to_string();
                match calculate_from_input_with(&table, &due_input) {
                    Ok(bundle) => {
                        schedule = bundle;
                        print_schedule(schedule.as_ref(), show_weeks);
                    }
                    Err(e) => {
                        schedule = None;
                        println!("Error: {e}");
                    }
                }
            }
        }
    }
}

fn recalculate(table: &MilestoneTable, due_input: &str) -> Option<ScheduleBundle> {
    calculate_from_input_with(table, due_input).ok().flatten()
}

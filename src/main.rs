use crate::demand::DemandEstimate;
use crate::diagnostics::Diagnostic;
use crate::flight::Category;
use crate::scenario::Scenario;
use crate::time::Time;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio, exit};
use tabled::Tabled;
use tabled::settings::Style;

mod config;
mod demand;
mod diagnostics;
mod error;
mod export;
mod flight;
mod scenario;
mod time;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Include domestic bus operations
    #[arg(short, long)]
    domestic: bool,

    /// Override the configured bus capacity
    #[arg(long, value_name = "PAX")]
    bus_capacity: Option<u32>,

    /// Write the time series to a CSV file
    #[arg(short, long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Print the result and exit without starting the console
    #[arg(short, long)]
    batch: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

#[derive(Tabled)]
struct SeriesRow {
    time: String,
    departure: f64,
    arrival: f64,
    domestic: f64,
    total: f64,
}

#[derive(Tabled)]
struct ProfileRow {
    category: Category,
    flight: String,
    trips: u32,
    max_trips: u32,
    buses: u32,
    window: String,
    split: String,
}

#[derive(Tabled)]
struct DiagnosticRow {
    category: Category,
    flight: String,
    issue: String,
}

impl From<&Diagnostic> for DiagnosticRow {
    fn from(d: &Diagnostic) -> Self {
        DiagnosticRow {
            category: d.category,
            flight: d.flight_id.as_deref().unwrap_or("-").to_string(),
            issue: d.issue.to_string(),
        }
    }
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match pager {
        Ok(pager) => pager,
        Err(e) => {
            log::debug!("No pager available: {}", e);
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn show<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        println!("Nothing to show.");
        return;
    }
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows.len() > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn category_filter(arg: Option<&str>) -> Option<Category> {
    match arg {
        Some("a") | Some("arrival") => Some(Category::Arrival),
        Some("d") | Some("departure") => Some(Category::Departure),
        Some("m") | Some("domestic") => Some(Category::Domestic),
        _ => None,
    }
}

/// Rows with any demand for the chosen category, or the total when none is given.
fn series_rows(estimate: &DemandEstimate, only: Option<Category>) -> Vec<SeriesRow> {
    estimate
        .total
        .iter()
        .enumerate()
        .filter(|(i, (_, total))| match only {
            Some(c) => estimate.series(c).values()[*i] > 0.0,
            None => *total > 0.0,
        })
        .map(|(i, (time, total))| SeriesRow {
            time: time.to_string(),
            departure: estimate.series(Category::Departure).values()[i],
            arrival: estimate.series(Category::Arrival).values()[i],
            domestic: estimate.series(Category::Domestic).values()[i],
            total,
        })
        .collect()
}

fn profile_rows(estimate: &DemandEstimate, only: Option<Category>) -> Vec<ProfileRow> {
    estimate
        .profiles
        .iter()
        .filter(|(c, _)| only.is_none_or(|o| o == **c))
        .flat_map(|(c, profiles)| profiles.iter().map(move |p| (*c, p)))
        .map(|(category, p)| ProfileRow {
            category,
            flight: p.flight_id.to_string(),
            trips: p.trips_needed,
            max_trips: p.max_trips_per_window,
            buses: p.buses_needed,
            window: format!("{} - {}", p.window_start, p.window_end),
            split: if p.is_odd() {
                format!("{} + 1 until {}", p.full_level(), p.midpoint)
            } else {
                "-".to_string()
            },
        })
        .collect()
}

fn print_summary(estimate: &DemandEstimate) {
    println!(
        "{} {}",
        "Peak buses required:".green().bold(),
        estimate.peak.to_string().green().bold()
    );
    for category in Category::ALL {
        println!(
            "  {:<10} peak {} ({} flights, from {})",
            category.to_string(),
            estimate.series(category).max(),
            estimate.profiles.get(&category).map_or(0, |p| p.len()),
            category.anchor_event()
        );
    }
    if !estimate.diagnostics.is_empty() {
        println!(
            "{}",
            format!(
                "{} data quality issues, {} flights skipped",
                estimate.diagnostics.len(),
                estimate.skipped()
            )
            .yellow()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder().parse_env("LOG").init();
    let args = Args::parse();

    let mut scenario = Scenario::load_from_file(&args.scenario.to_string_lossy())?;
    if let Some(capacity) = args.bus_capacity {
        scenario.config.bus_capacity = capacity;
    }
    println!("Loaded schedule from {}", args.scenario.display());

    let estimate = match scenario.estimate(args.domestic) {
        Ok(estimate) => estimate,
        Err(e) => {
            log::error!("Could not estimate bus demand: {}", e);
            exit(1);
        }
    };
    print_summary(&estimate);
    if !estimate.diagnostics.is_empty() {
        show(&estimate.diagnostics.iter().map(DiagnosticRow::from).collect::<Vec<_>>());
    }

    if let Some(path) = &args.export {
        export::export_to_file(&estimate, &path.to_string_lossy())?;
        println!("Time series written to {}", path.display());
    }

    if args.batch {
        return Ok(());
    }

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["peak", "ls", "at", "flights", "issues", "export", "help", "exit"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "peak" => print_summary(&estimate),
                    "ls" => show(&series_rows(&estimate, category_filter(parts.get(1).copied()))),
                    "at" => match parts[1..].join(" ").parse::<Time>() {
                        Ok(t) => {
                            let snapped = t.floor_to_step(estimate.grid.step);
                            if let Some(total) = estimate.total.at(snapped) {
                                println!("{}: {} buses", snapped, total);
                                for category in Category::ALL {
                                    println!(
                                        "  {:<10} {}",
                                        category.to_string(),
                                        estimate.series(category).at(snapped).unwrap_or_default()
                                    );
                                }
                            } else {
                                println!("{} is outside {} - {}", t, estimate.grid.start, estimate.grid.end);
                            }
                        },
                        Err(e) => println!("Usage: at <time> ({})", e),
                    },
                    "flights" => show(&profile_rows(&estimate, category_filter(parts.get(1).copied()))),
                    "issues" => show(&estimate.diagnostics.iter().map(DiagnosticRow::from).collect::<Vec<_>>()),
                    "export" => {
                        if let Some(path) = parts.get(1) {
                            match export::export_to_file(&estimate, path) {
                                Ok(()) => println!("Time series written to {}", path),
                                Err(e) => println!("{}", e.to_string().red()),
                            }
                        } else {
                            println!("Usage: export <file>");
                        }
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  peak            - Show the peak and per category maxima");
                        println!("  ls [category]   - List time slots with demand: a - arrival, d - departure, m - domestic");
                        println!("  at <time>       - Show demand at a time, e.g. 'at 10:35' or 'at DAY2 07:00'");
                        println!("  flights [cat]   - List per flight bus profiles");
                        println!("  issues          - List skipped and flagged flights");
                        println!("  export <file>   - Write the time series to a CSV file");
                        println!("  help / ?        - Show this help menu");
                        println!("  exit / quit     - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

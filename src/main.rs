//! u-invigilate CLI.
//!
//! Generate an invigilation schedule from a roster document, or look up a
//! teacher's duties in a saved schedule.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_invigilate::fitness::conflicts;
use u_invigilate::lookup::{parse_teacher_id, Timetable, TeacherLookup};
use u_invigilate::models::{Roster, Schedule};
use u_invigilate::persistence::{ScheduleStore, DEFAULT_DIR, DEFAULT_FILE};
use u_invigilate::sa::{AnnealingConfig, AnnealingRunner};

#[derive(Parser)]
#[command(name = "u-invigilate")]
#[command(about = "Exam invigilation scheduling with simulated annealing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, optimize, and save a schedule.
    Generate {
        /// Roster document (JSON)
        #[arg(short, long)]
        roster: PathBuf,
        /// Exam day to schedule; repeat for several. Defaults to every roster day.
        #[arg(short, long)]
        day: Vec<String>,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Starting temperature
        #[arg(long)]
        initial_temperature: Option<f64>,
        /// Temperature decay per iteration
        #[arg(long)]
        cooling_rate: Option<f64>,
        /// Iteration budget
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Directory for the saved schedule
        #[arg(short, long, default_value = DEFAULT_DIR)]
        output_dir: PathBuf,
    },

    /// Show the sittings a teacher invigilates.
    Lookup {
        /// Teacher id
        #[arg(short, long)]
        teacher: Option<String>,
        /// Schedule document (JSON)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            roster,
            day,
            seed,
            initial_temperature,
            cooling_rate,
            max_iterations,
            output_dir,
        } => {
            let loaded = Roster::from_path(&roster)
                .with_context(|| format!("loading roster {}", roster.display()))?;
            let selected = if day.is_empty() {
                loaded
            } else {
                loaded.for_days(day.as_slice())?
            };

            let mut config = selected.annealing.clone().unwrap_or_default();
            if let Some(t) = initial_temperature {
                config = config.with_initial_temperature(t);
            }
            if let Some(rate) = cooling_rate {
                config = config.with_cooling_rate(rate);
            }
            if let Some(n) = max_iterations {
                config = config.with_max_iterations(n);
            }
            if let Some(s) = seed {
                config = config.with_seed(s);
            }

            run_generate(&selected, &config, ScheduleStore::new(output_dir))
        }
        Commands::Lookup { teacher, file } => {
            let file = file.unwrap_or_else(|| PathBuf::from(DEFAULT_DIR).join(DEFAULT_FILE));
            run_lookup(teacher.as_deref().unwrap_or(""), file)
        }
    }
}

fn run_generate(roster: &Roster, config: &AnnealingConfig, store: ScheduleStore) -> Result<()> {
    info!(
        teachers = roster.teachers.len(),
        rooms = roster.rooms.len(),
        days = roster.days.len(),
        slots = roster.slots.len(),
        "generating schedule"
    );

    let result = AnnealingRunner::optimize(roster, config)?;
    let path = store.save(&result.schedule)?;

    print_schedule(roster, &result.schedule);
    println!(
        "Fitness: {} (initial {}), {} understaffed room(s)",
        result.fitness,
        result.initial_fitness,
        result.schedule.understaffed_count()
    );
    for c in conflicts(&result.schedule) {
        warn!(
            day = %c.day,
            slot = %c.slot,
            room = %c.room,
            teacher = c.teacher_id,
            "double-booked"
        );
    }
    println!("Saved to {}", path.display());
    Ok(())
}

fn run_lookup(raw_id: &str, file: PathBuf) -> Result<()> {
    let id = parse_teacher_id(raw_id)?;
    let lookup = TeacherLookup::open(&file)?;
    let entries = lookup.entries_for(id);

    if entries.is_empty() {
        println!("No schedule found for teacher {id}.");
        return Ok(());
    }

    for e in &entries {
        println!("{} | {} | {}", e.day, e.slot, e.room);
    }
    println!();
    print!("{}", Timetable::by_day_slot(entries));
    Ok(())
}

/// Prints one slot × room grid per day, with teacher ids in each cell.
fn print_schedule(roster: &Roster, schedule: &Schedule) {
    for day in &roster.days {
        println!("{day}");
        print!("Slot");
        for room in &roster.rooms {
            print!(" | {room}");
        }
        println!();
        for slot in &roster.slots {
            print!("{slot}");
            for room in &roster.rooms {
                let cell = schedule
                    .entry_at(day, slot, room)
                    .filter(|e| !e.teachers.is_empty())
                    .map(|e| {
                        e.teachers
                            .iter()
                            .map(|id| id.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_else(|| "-".to_string());
                print!(" | {cell}");
            }
            println!();
        }
        println!();
    }
}

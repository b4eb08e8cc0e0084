//! clinic-sim: run a patient roster through the consultation scheduler
//! and print the output log with its summary.

mod args;
mod telemetry;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use clinic_simulator_core_rs::report::{render_table, Summary};
use clinic_simulator_core_rs::{load_roster, Event, Scheduler, SchedulerConfig};
use std::fs;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SchedulerConfig::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SchedulerConfig::default(),
    };

    let roster = load_roster(&args.roster)
        .with_context(|| format!("loading roster {}", args.roster.display()))?;
    tracing::info!(patients = roster.len(), roster = %args.roster.display(), "roster loaded");

    let mut scheduler = Scheduler::new(config, roster).context("configuring scheduler")?;
    scheduler.run().context("running scheduler")?;

    let log = scheduler.output_log();
    let summary = Summary::from_log(log);

    if args.json {
        let output = serde_json::json!({
            "records": log,
            "summary": summary,
            "digest": log.digest(),
            "final_tick": scheduler.current_tick(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_table(log));
        println!();
        println!("{summary}");
        println!(
            "finished at tick {} (digest {})",
            scheduler.current_tick(),
            &log.digest()[..16]
        );
    }

    if args.events {
        println!();
        for event in scheduler.event_log().events() {
            println!("{}", describe(event));
        }
    }

    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::Admitted { tick, patient_id, line } => {
            format!("[{tick:>4}] {patient_id} admitted to {line}")
        }
        Event::PromotionApplied { tick, patient_id } => {
            format!("[{tick:>4}] {patient_id} re-admitted with priority")
        }
        Event::ConsultationStarted {
            tick,
            patient_id,
            track,
            line,
            origin,
            wait,
            ..
        } => format!(
            "[{tick:>4}] {patient_id} enters {track} consultation from {line} (origin {origin}) after {wait}"
        ),
        Event::Promoted {
            tick,
            patient_id,
            wait,
        } => format!("[{tick:>4}] {patient_id} promoted after waiting {wait}"),
        Event::Departed {
            tick,
            patient_id,
            track,
        } => format!("[{tick:>4}] {patient_id} leaves {track} consultation"),
    }
}

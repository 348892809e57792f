// Command-line entry point: lay out pins for a wall described in a JSON job

use pin_layout::{Job, PinLayout, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let job_path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            log::error!("usage: pin-layout <job.json>");
            std::process::exit(2);
        }
    };

    let job = Job::load(&job_path)?;
    let (wall, config) = job.into_wall()?;

    let layout = PinLayout::new(config);
    let outcome = layout.run_with(&wall.host, &wall)?;
    let placements = layout.frame(&wall.host, &outcome.points)?;

    log::info!("Report: {:?}", outcome.report);
    println!("{}", serde_json::to_string_pretty(&placements)?);

    Ok(())
}

//! Cosmic Leap - headless planet-hopping demo
//!
//! Usage: `cosmic-leap [--write-config] [KEY|INDEX]...`
//! With no destinations, visits every profile in catalog order.

use anyhow::Result;
use game::{App, GameConfig, SelectionReport};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut write_config = false;
    let mut destinations = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--write-config" => write_config = true,
            _ => destinations.push(arg),
        }
    }

    let config = GameConfig::load();
    if write_config {
        config.save();
        log::info!("Wrote config.ron");
    }
    let dwell = config.demo_seconds_per_selection;

    let mut app = App::from_config(config);
    if destinations.is_empty() {
        destinations = app
            .orchestrator()
            .profiles()
            .iter()
            .map(|p| p.key.clone())
            .collect();
    }

    for destination in &destinations {
        let selection = match destination.parse::<i32>() {
            Ok(index) => app.select_index(index),
            Err(_) => app.select_key(destination),
        };
        match selection {
            Ok(report) => log_report(&report),
            Err(e) => {
                log::error!("Cannot travel to {:?}: {}", destination, e);
                continue;
            }
        }
        for (entity, impact) in app.run_for(dwell) {
            log::info!("  touchdown {:?} at {:.2} m/s", entity, impact.speed);
        }
        let pose = app.avatar_pose();
        log::info!(
            "  after {:.1}s: gravity {:.3} m/s², avatar at ({:.2}, {:.2}, {:.2})",
            app.clock().elapsed_seconds(),
            -app.orchestrator().gravity().y,
            pose.position.x,
            pose.position.y,
            pose.position.z
        );
    }

    log::info!(
        "Visited {} destinations in {} frames",
        destinations.len(),
        app.clock().frame_count()
    );
    Ok(())
}

fn log_report(report: &SelectionReport) {
    log::info!(
        "Arrived at {}: environment {:?}, gravity target {:.3} ({:?}), avatar {:?}",
        report.key,
        report.environment,
        report.gravity_target.length(),
        report.gravity,
        report.avatar
    );
}

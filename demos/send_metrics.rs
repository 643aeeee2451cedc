//! Basic metrics example: construct a monitor and report a few metrics.
//!
//! Run with a DogStatsD agent listening locally:
//! ```bash
//! DD_AGENT_HOST=127.0.0.1 cargo run --example send_metrics
//! ```

use integrations_monitoring::{Monitor, MonitorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = MonitorConfig::from_env()?.with_app("demo");
    let monitor = Monitor::new(config)?;

    println!("monitor id: {}", monitor.id());
    println!("constant tags: {:?}", monitor.tags());

    monitor.incr("requests", &["route:index".to_string()], 1.0)?;
    monitor.count("jobs.processed", 5, &[], 1.0)?;
    monitor.gauge("queue.depth", 42.0, &[], 1.0)?;

    // Sampled metric: sent roughly half the time, rate encoded so the
    // agent scales it back up.
    monitor.incr("hot.path", &[], 0.5)?;

    monitor.event("demo finished", "all metrics sent")?;
    println!("metrics sent");

    Ok(())
}

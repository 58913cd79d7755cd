use anyhow::{ensure, Result};
use clap::Parser;
use log::info;

use scenario::{Scenario, Settings};

mod plant;
mod scenario;

#[derive(Parser, Debug)]
#[command(
    name = "sitl",
    version,
    about = "Runs the control library against a simulated plant"
)]
struct Args {
    #[arg(value_enum, long, default_value = "example")]
    scenario: Scenario,

    /// Loop period in seconds
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Simulated time in seconds
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Step reference for the closed-loop scenarios
    #[arg(long, default_value_t = 0.5)]
    reference: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(args.duration >= 0.0, "duration must not be negative");

    info!("running {:?} scenario at dt={}s", args.scenario, args.dt);
    scenario::run(
        args.scenario,
        Settings {
            dt: args.dt,
            duration: args.duration,
            reference: args.reference,
        },
    )
}

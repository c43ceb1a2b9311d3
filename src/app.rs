use crate::counter::{CounterTelemetry, QueryDirection};
use crate::duel::Duel;
use anyhow::{Context, Result};
use serde::Serialize;

/// Roster used when no values are passed on the command line.
const DEMO_ROSTER: [u32; 5] = [5_013, 2_488, 2_495, 3_321, 8_492];

/// Summary printed after a demo session.
#[derive(Debug, Serialize)]
struct SessionReport {
    roster: Vec<u32>,
    size: usize,
    collisions_up: u32,
    collisions_down: u32,
    inversions: u32,
    counters: Vec<CounterTelemetry>,
}

/// Runs one duel session: a collision pass in each direction, then an
/// inversion pass, reported as pretty-printed JSON on stdout.
pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let roster = parse_roster(&args)?;
    let mut duel = Duel::new(&roster).context("assembling duel roster")?;

    let collisions_up = duel.count_collisions(QueryDirection::Up);
    let collisions_down = duel.count_collisions(QueryDirection::Down);
    let inversions = duel.count_inversions();

    let report = SessionReport {
        size: duel.size(),
        collisions_up,
        collisions_down,
        inversions,
        counters: duel.counters().iter().map(|c| c.telemetry()).collect(),
        roster,
    };
    let rendered =
        serde_json::to_string_pretty(&report).context("rendering session report")?;
    println!("{rendered}");
    Ok(())
}

fn parse_roster(args: &[String]) -> Result<Vec<u32>> {
    if args.is_empty() {
        return Ok(DEMO_ROSTER.to_vec());
    }
    args.iter()
        .map(|arg| {
            arg.parse::<u32>()
                .with_context(|| format!("invalid counter value {arg:?}"))
        })
        .collect()
}

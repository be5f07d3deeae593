//! Interactive simulation: populates a random grid and reports the events closest to
//! the coordinates typed by the user.
//!
//! Usage: `events_simulation [seed]`. Enter `x,y` at the prompt, `q` or EOF to quit.

use grid_events::{closest_events, Grid, Populator, SimulationConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn parse_position(line: &str) -> Option<[i32; 2]> {
    let (x, y) = line.split_once(',')?;
    Some([x.trim().parse().ok()?, y.trim().parse().ok()?])
}

/// Prompts for coordinates until `q`/`quit` or end of input. Every problem with a line
/// is reported on `output`, then the prompt repeats.
fn run(
    grid: &Grid,
    config: &SimulationConfig,
    input: impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        writeln!(output, "Please Input Coordinates:\n")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let Some(pos) = parse_position(line) else {
            debug!(input = line, "unparseable coordinates");
            writeln!(output, "Invalid input {:?}, expected coordinates as x,y\n", line)?;
            continue;
        };

        match closest_events(grid, config, pos, config.nearest_count) {
            Ok(summaries) => {
                writeln!(output, "\nClosest Events to ({},{}):\n", pos[0], pos[1])?;
                for summary in summaries {
                    writeln!(output, "{}\n", summary)?;
                }
            }
            Err(e) => {
                debug!(error = %e, "query rejected");
                writeln!(output, "{}\n", e)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut rng = match std::env::args().nth(1) {
        Some(seed) => StdRng::seed_from_u64(seed.parse()?),
        None => StdRng::from_entropy(),
    };

    let config = SimulationConfig::default();
    let mut grid = Grid::new(config.radius);
    let placed = Populator::new().populate(&mut grid, &config, &mut rng)?;
    info!(events = placed, radius = config.radius, "world generated");
    debug!("\n{}", grid);

    run(&grid, &config, io::stdin().lock(), &mut io::stdout())?;
    Ok(())
}

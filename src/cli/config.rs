//! Settings of the benchmark run.
//!
//! Values are read from the environment, after loading a `.env` file from the
//! working directory if there is one. Flags given on the command line take
//! precedence over both.

use log::debug;

const DEFAULT_ENTRIES: usize = 10_000;
const DEFAULT_ROUNDS: usize = 100;
const DEFAULT_POOL_SIZE: usize = 100;

const ENTRIES_VAR: &str = "COBALT_BENCH_ENTRIES";
const ROUNDS_VAR: &str = "COBALT_BENCH_ROUNDS";
const POOL_SIZE_VAR: &str = "COBALT_BENCH_POOL";

pub struct BenchConfig {
    /// Number of addresses, and separately of users, to create.
    pub entries: usize,
    pub rounds: usize,
    /// Number of distinct names, streets and districts to draw from.
    pub pool_size: usize,
}

impl BenchConfig {
    pub fn from_env() -> Result<BenchConfig, String> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("loaded environment from {}", path.display());
        }

        Ok(BenchConfig {
            entries: read_var(ENTRIES_VAR, DEFAULT_ENTRIES)?,
            rounds: read_var(ROUNDS_VAR, DEFAULT_ROUNDS)?,
            pool_size: read_var(POOL_SIZE_VAR, DEFAULT_POOL_SIZE)?,
        })
    }

    pub fn with_overrides(self, entries: Option<usize>, rounds: Option<usize>) -> BenchConfig {
        BenchConfig {
            entries: entries.unwrap_or(self.entries),
            rounds: rounds.unwrap_or(self.rounds),
            ..self
        }
    }
}

fn read_var(name: &str, default: usize) -> Result<usize, String> {
    match dotenvy::var(name) {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(format!(
                "invalid value {}: {} must be a positive number",
                value, name
            )),
        },
        Err(_) => Ok(default),
    }
}

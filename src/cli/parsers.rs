//! The place where the command line parser is defined.

use clap::{Parser, Subcommand, ValueEnum};

use cobalt_engine::persistence::Direction;

#[derive(Parser)]
#[command(name = "cobalt")]
#[command(about = "An in-memory indexed record store", long_about = None)]
pub struct CliParser {
    #[command(subcommand)]
    pub mode: CliMode,
}

#[derive(Subcommand)]
pub enum CliMode {
    /// Run the sample queries over a handful of users and addresses.
    Demo {
        /// Print the rows as JSON instead of table lines.
        #[arg(long)]
        json: bool,

        /// Order in which users are listed by name.
        #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
        order: SortOrder,
    },

    /// Time the queries over randomly generated users and addresses.
    Bench {
        /// Number of addresses and of users to create.
        #[arg(long)]
        entries: Option<usize>,

        /// Number of times each query is repeated.
        #[arg(long)]
        rounds: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for Direction {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Direction::Ascending,
            SortOrder::Desc => Direction::Descending,
        }
    }
}

//! A timing harness for the query algebra.
//!
//! It fills a [`Database`] with random addresses and users drawn from small
//! pools of names, so filters hit realistic bucket sizes, and reports the
//! average time of each query in microseconds.

use std::time::Instant;

use cobalt_engine::accounts::Database;
use cobalt_engine::persistence::{Direction, StoreResult};
use log::info;
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::cli::config::BenchConfig;
use crate::cli::messages::{highlight_argument, system_message};

const WORD_LENGTH: usize = 10;
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn run_bench(config: &BenchConfig) -> StoreResult<()> {
    println!(
        "{}",
        system_message(
            "bench",
            format!("#entries = {}", highlight_argument(&config.entries.to_string()))
        )
    );

    let db = populate(config)?;
    db.log_sizes()?;

    print_timing("address.with_id", config.rounds, || {
        db.get_addresses().with_id(Uuid::new_v4()).fetch().map(|_| ())
    })?;
    print_timing("address.in_district", config.rounds, || {
        db.get_addresses().in_district("abc").fetch().map(|_| ())
    })?;
    print_timing("user.from_district", config.rounds, || {
        db.get_users().from_district("test").fetch().map(|_| ())
    })?;
    print_timing("user.increase_login_count", config.rounds, || {
        db.get_users().increase_login_count().map(|_| ())
    })?;
    print_timing("user.count", config.rounds, || {
        db.get_users().len().map(|_| ())
    })?;
    print_timing("user.ordered_by_name", config.rounds, || {
        db.get_users()
            .ordered_by_name(Direction::Ascending)
            .fetch()
            .map(|_| ())
    })?;

    Ok(())
}

fn populate(config: &BenchConfig) -> StoreResult<Database> {
    let mut rng = rand::thread_rng();
    let names = word_pool(&mut rng, config.pool_size);
    let streets = word_pool(&mut rng, config.pool_size);
    let districts = word_pool(&mut rng, config.pool_size);

    let db = Database::new()?;

    let mut address_ids = Vec::with_capacity(config.entries);
    for _ in 0..config.entries {
        let street = pick(&mut rng, &streets);
        let district = pick(&mut rng, &districts);
        address_ids.push(db.create_address(street, district)?.id);
    }
    info!("created {} addresses", config.entries);

    for _ in 0..config.entries {
        let name = pick(&mut rng, &names);
        if let Some(address) = address_ids.choose(&mut rng) {
            db.create_user(name, *address)?;
        }
    }
    info!("created {} users", config.entries);

    Ok(db)
}

fn word_pool<R: Rng>(rng: &mut R, size: usize) -> Vec<String> {
    (0..size)
        .map(|_| {
            (0..WORD_LENGTH)
                .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
                .collect()
        })
        .collect()
}

fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [String]) -> &'a str {
    pool.choose(rng).map(String::as_str).unwrap_or_default()
}

fn print_timing<F>(label: &str, rounds: usize, mut function: F) -> StoreResult<()>
where
    F: FnMut() -> StoreResult<()>,
{
    let start = Instant::now();
    for _ in 0..rounds {
        function()?;
    }
    let average = start.elapsed().as_secs_f64() * 1_000_000.0 / rounds.max(1) as f64;

    println!("{:28} {:>12.2} \u{03BC}s", label, average);
    Ok(())
}

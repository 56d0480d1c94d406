//! Example narrowing a value domain concurrently.
//!
//! This example shows how to:
//! - Create a `ValueSet` over a range given on the command line
//! - Fill it from several threads with batched `add` calls
//! - Narrow it from several threads with batched `remove` calls, here by sieving
//!   out every composite number so that only primes remain
//! - Inspect the result with `len` and `values`
//!
//! # Usage
//!
//! ```sh
//! cargo run --example narrow_domain
//! ```
//!
//! Choose the range and the parallelism:
//!
//! ```sh
//! cargo run --example narrow_domain -- --min 1000 --max 200000 --threads 8 --chunk 512
//! ```
//!
//! Set `RUST_LOG=trace` to see each applied batch.

use std::{error::Error, process};

use clap::Parser;
use rayon::prelude::*;
use valueset::ValueSet;

/// Largest `max - min` the demo will fill, since it materializes the whole range.
const MAX_SPAN: i64 = 100_000_000;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Lower bound of the domain, inclusive.
    #[arg(long, default_value_t = 1)]
    min: i64,

    /// Upper bound of the domain, inclusive.
    #[arg(long, default_value_t = 10_000)]
    max: i64,

    /// Number of worker threads (0 lets rayon decide).
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Number of values per batch.
    #[arg(long, default_value_t = 256)]
    chunk: usize,

    /// Number of members to print.
    #[arg(long, default_value_t = 20)]
    show: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    if args.min < 0 {
        eprintln!("--min must not be negative.");
        process::exit(2);
    }
    if args.max.checked_sub(args.min).is_none_or(|span| span > MAX_SPAN) {
        eprintln!("--max must be at most {MAX_SPAN} above --min.");
        process::exit(2);
    }
    if args.chunk == 0 {
        eprintln!("--chunk must be at least 1.");
        process::exit(2);
    }

    let set = ValueSet::new(args.min, args.max)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()?;

    let added = pool.install(|| fill(&set, args.chunk))?;
    log::info!("filled {} with {added} values", set.bounds());

    let removed = pool.install(|| sieve(&set, args.chunk))?;
    log::info!("sieved out {removed} values");

    let members = set.values();
    println!("Domain: {}", set.bounds());
    println!("Primes: {}", set.len());
    let shown = members
        .iter()
        .take(args.show)
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    println!("First {}: {}", shown.len(), shown.join(", "));

    Ok(())
}

fn fill(set: &ValueSet, chunk: usize) -> Result<usize, valueset::OutOfRangeError> {
    let all = (set.min()..=set.max()).collect::<Vec<_>>();
    all.par_chunks(chunk)
        .map(|batch| set.add(batch).map(|changed| changed.len()))
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

fn sieve(set: &ValueSet, chunk: usize) -> Result<usize, valueset::OutOfRangeError> {
    let (min, max) = (set.min(), set.max());
    let below_two = (min..=max.min(1)).collect::<Vec<_>>();
    let mut removed = set.remove(&below_two)?.len();

    let factors = (2_i64..)
        .take_while(|p| p.checked_mul(*p).is_some_and(|square| square <= max))
        .collect::<Vec<_>>();
    removed += factors
        .par_iter()
        .map(|&p| {
            let Some(first) = first_composite(min, p) else {
                return Ok(0);
            };
            let step = usize::try_from(p).unwrap_or(usize::MAX);
            let multiples = (first..=max).step_by(step).collect::<Vec<_>>();
            multiples
                .chunks(chunk)
                .map(|batch| set.remove(batch).map(|changed| changed.len()))
                .sum::<Result<usize, _>>()
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    Ok(removed)
}

/// Returns the first multiple of `p` that is at least `min` and at least `p * p`,
/// or `None` if it does not fit in `i64`.
///
/// `min` must be non-negative and `p` at least 2.
fn first_composite(min: i64, p: i64) -> Option<i64> {
    let multiple = (min / p + i64::from(min % p != 0)).checked_mul(p)?;
    Some(multiple.max(p.checked_mul(p)?))
}

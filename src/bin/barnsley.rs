// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use log::info;
use std::path::Path;
use std::str::FromStr;

use barnsley::{sink, TreeConfig};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_size(s: &str) -> Result<(), String> {
    match parse_pair::<usize>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => Ok(()),
        Some(_) => Err("Image dimensions must be non-zero".to_string()),
        None => Err("Could not parse output image size".to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const SEED: &str = "seed";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("barnsley")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Barnsley tree renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("tree")
                .help("Output file name, without extension; writes .png and .jpg"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1280x1920")
                .validator(|s| validate_size(&s))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    u64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse seed".to_string())
                })
                .help("Random seed; drawn from the OS when absent"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of independent sampling chains"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), barnsley::RenderError> {
    // The validators have already vetted every value.
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair(s, 'x'))
        .unwrap_or((barnsley::config::WIDTH, barnsley::config::HEIGHT));
    let threads = matches
        .value_of(THREADS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or(1);
    let seed = match matches.value_of(SEED).and_then(|s| u64::from_str(s).ok()) {
        Some(seed) => seed,
        None => barnsley::entropy_seed()?,
    };
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("tree"));

    info!(
        "Rendering {}x{} with seed {} on {} thread(s)",
        width, height, seed, threads
    );
    let config = TreeConfig::with_size(width, height);
    let image = barnsley::render(&config, seed, threads)?;
    sink::write_all(output, &image)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}

//! This is the command line tool that loads an input file, keeps only its
//! ASCII characters and saves the result.

extern crate clap;
extern crate env_logger;
extern crate log;

use anyhow::{bail, Context as _};
use asciistream::filter::AsciiFilter;
use asciistream::utils::ascii::is_ascii_only;
use asciistream::utils::stream::copy;
use asciistream::Context;
use clap::{value_parser, Arg, ArgAction, Command};

use std::fs;
use std::process::ExitCode;
use std::time::Instant;

/// The extension of the files that the tool writes.
const FILE_EXTENSION: &str = ".ascii";

fn save_file(data: &[u8], path: &str) -> anyhow::Result<()> {
    fs::write(path, data).with_context(|| format!("Can't write {}", path))?;
    log::info!("Wrote {}.", &path);
    Ok(())
}

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

fn run() -> anyhow::Result<()> {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Verify that the output contains only ASCII characters")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("buffer-size")
                .short('b')
                .long("buffer-size")
                .value_name("BYTES")
                .help("Size of the buffer used for reading the stream")
                .value_parser(value_parser!(usize))
                .num_args(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let cli_checked_mode = matches.get_flag("checked");
    let ctx = match matches.get_one::<usize>("buffer-size") {
        Some(size) => Context::new(*size),
        None => Context::default(),
    };

    let Some(input_path) = matches.get_one::<String>("INPUT") else {
        bail!("Missing input file");
    };
    let input = fs::read(input_path)
        .with_context(|| format!("Can't open the input file {}", input_path))?;

    // Come up with a file name.
    let out = match matches.get_one::<String>("output") {
        Some(path) => path.clone(),
        None => input_path.clone() + FILE_EXTENSION,
    };

    let timer = Timer::new();
    log::info!("Filtering {} using {} byte reads", input_path, ctx.buffer_size());

    let mut dest = Vec::new();
    let mut filter = AsciiFilter::from_bytes(&input);
    let written = copy(&mut filter, &mut dest, ctx)
        .with_context(|| format!("Can't filter {}", input_path))?;

    log::info!("Filtered from {} to {} bytes.", input.len(), written);
    if !input.is_empty() {
        log::info!(
            "Kept {:.2}% of the input.",
            100.0 * written as f64 / input.len() as f64
        );
    }

    if cli_checked_mode {
        if !is_ascii_only(&dest) {
            bail!("Incorrect! The output contains non-ASCII bytes");
        }
        log::info!("Correct!");
    }

    save_file(&dest, &out)?;
    drop(timer);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

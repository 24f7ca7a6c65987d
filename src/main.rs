use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;

use prequel::{Detection, Detector, Result, SeriesMap};

/// Tell whether a movie is a sequel, and which one to watch first.
#[derive(Parser, Debug)]
#[command(name = "prequel", version)]
struct Cli {
    /// Movie title. Reads one title per line from stdin when omitted.
    title: Vec<String>,

    /// JSON series map merged over the bundled one
    #[arg(long, env = "PREQUEL_SERIES")]
    series: Option<PathBuf>,

    /// Ignore the bundled series map
    #[arg(long, default_value_t = false)]
    no_bundled: bool,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        Builder::from_default_env().target(Target::Stderr).init();
    } else {
        Builder::new()
            .target(Target::Stderr)
            .filter_level(LevelFilter::Warn)
            .init();
    }
}

fn load_series(cli: &Cli) -> Result<SeriesMap> {
    let mut map = if cli.no_bundled {
        SeriesMap::new()
    } else {
        SeriesMap::bundled().clone()
    };

    if let Some(path) = &cli.series {
        map.merge(SeriesMap::from_path(path)?);
    }

    Ok(map)
}

fn print_detection(out: &mut impl Write, detection: &Detection, pretty: bool) -> io::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(detection)
    } else {
        serde_json::to_string(detection)
    }
    .map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

fn run(cli: Cli) -> Result<()> {
    let detector = Detector::new(load_series(&cli)?);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.title.is_empty() {
        let title = cli.title.join(" ");
        print_detection(&mut out, &detector.detect(&title), cli.pretty)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let title = line.trim();
        if title.is_empty() {
            continue;
        }
        print_detection(&mut out, &detector.detect(title), cli.pretty)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

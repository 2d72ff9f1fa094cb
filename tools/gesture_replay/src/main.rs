use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gesture_replay::{
    check_expected, parse_expected, parse_trace, render_csv, replay, DEFAULT_GAP_US,
};
use log::{LevelFilter, Log, Metadata, Record};
use saokey::{GestureDetector, KeyMap};

#[derive(Debug, Parser)]
#[command(name = "gesture_replay")]
#[command(about = "Replay captured touch traces through the gesture detector")]
struct Cli {
    /// Serial capture with `<timestamp_us>, <x>, <y>, <z>` lines.
    trace: PathBuf,
    /// File with one `kind:direction:cell` token per expected gesture.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// Timestamp gap (µs) treated as a lift between contacts.
    #[arg(long, default_value_t = DEFAULT_GAP_US)]
    gap_us: u32,
    /// Print detector logs to stderr.
    #[arg(long, short)]
    verbose: bool,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
        log::set_max_level(LevelFilter::Trace);
    }

    let samples = parse_trace(&cli.trace)?;
    log::info!("loaded {} samples from {}", samples.len(), cli.trace.display());

    let mut detector = GestureDetector::default();
    let keymap = KeyMap::default();
    let events = replay(&samples, &mut detector, &keymap, cli.gap_us);
    print!("{}", render_csv(&events));

    if let Some(expect_path) = cli.expect {
        let expected = parse_expected(&expect_path)?;
        check_expected(&events, &expected)?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

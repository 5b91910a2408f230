mod cli;
mod config;
mod keys;
mod playback;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing::info;

use flashread_core::config::load_dotenv;
use flashread_core::{Features, Reader};

use crate::cli::CliArgs;
use crate::config::CliConfig;
use crate::playback::Playback;
use crate::terminal::{spawn_key_reader, Terminal};

/// One line of `--dump` output.
#[derive(Serialize)]
struct DumpLine<'a> {
    index: usize,
    #[serde(flatten)]
    features: &'a Features,
}

fn dump(reader: &Reader, out: &mut impl Write) -> Result<()> {
    for (index, chunk) in reader.word_list().iter().enumerate() {
        let features = reader.features(chunk);
        let line = serde_json::to_string(&DumpLine {
            index,
            features: &features,
        })
        .context("failed to serialize chunk")?;
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    // Load config
    let config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    let settings = config.resolve_settings(&args)?;
    settings.log_summary();

    let reader = Reader::open(&args.file, settings)
        .with_context(|| format!("failed to open '{}'", args.file.display()))?;

    if args.dump {
        return dump(&reader, &mut io::stdout().lock());
    }

    if reader.is_empty() {
        println!(
            "Nothing to read in '{}' with {} word(s) per frame.",
            args.file.display(),
            settings.wpf
        );
        return Ok(());
    }

    let (tx, rx) = mpsc::channel(32);
    let mut session = Playback::new(reader, config.wpm_step);

    let result = {
        let mut screen = Terminal::enter().context("failed to set up terminal")?;
        spawn_key_reader(tx);
        playback::run(&mut session, &mut screen, rx, config.progress_ticks).await
    };

    info!(
        position = session.position(),
        chunks = session.reader().len(),
        paused = session.is_paused(),
        "Reader closed"
    );
    result
}

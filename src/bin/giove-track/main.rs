mod cli;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use serde::Deserialize;

use giove_track::{Candidate, FrameEstimate, LayerBuilder, SpotsTracker, TrackerSettings};

use cli::Cli;

/// One input line: the detector output for a frame.
#[derive(Debug, Deserialize)]
struct FrameRecord {
    frame_num: i64,
    timestamp: f64,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    debug!("Started; args: {:?}", cli);

    let mut settings = match &cli.settings_path {
        Some(path) => TrackerSettings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => TrackerSettings::default(),
    };
    if let Some(depth) = cli.dynamic_depth {
        settings.dynamic_depth = depth;
    }
    info!("Tracker settings: {:?}", settings);

    let mut tracker = SpotsTracker::new(settings).context("invalid tracker settings")?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) if path.as_os_str() != "-" => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        _ => Box::new(BufReader::new(io::stdin())),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    let mut frames = 0usize;
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = serde_json::from_str(&line)
            .with_context(|| format!("malformed frame record on line {}", line_num + 1))?;

        let mut builder = LayerBuilder::new(record.frame_num, record.timestamp)
            .candidates(record.candidates);
        if let Some(limit) = cli.max_candidates {
            builder = builder.max_candidates(limit);
        }

        let estimates = tracker
            .push_and_emit(builder.build())
            .with_context(|| format!("cannot track frame {}", record.frame_num))?;
        write_estimates(&mut out, &estimates)?;
        frames += 1;
    }

    if !cli.no_flush {
        let estimates = tracker.flush().context("cannot flush the tracking window")?;
        write_estimates(&mut out, &estimates)?;
    }
    out.flush().context("failed to write output")?;

    info!("Processed {} frames", frames);
    Ok(())
}

fn write_estimates(out: &mut impl Write, estimates: &[FrameEstimate]) -> Result<()> {
    for estimate in estimates {
        serde_json::to_writer(&mut *out, estimate).context("failed to encode estimate")?;
        writeln!(out).context("failed to write output")?;
    }
    Ok(())
}

//! waypost - Run one viewport pass over a marker dataset
//!
//! Loads a JSON marker dataset, derives the viewport from a map center and
//! zoom, and prints the culled and clustered marker list as JSON. With
//! `--select` the given marker's details are resolved and the selected
//! marker is printed instead.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::Level;
use waypost_core::dataset::load_markers_from_path;
use waypost_core::loader::{DetailSource, HttpDetailSource, MemoryDetailSource};
use waypost_core::{EngineParams, MapView, Marker, MarkerDetails, Viewport, ViewportChange};

/// Run one viewport pass over a marker dataset and print the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "waypost")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON marker dataset
    dataset: PathBuf,

    /// Map center latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Map center longitude
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Zoom level
    #[arg(short = 'z', long, allow_hyphen_values = true)]
    zoom: f64,

    /// Camera bearing (carried through, does not affect bounds)
    #[arg(long, default_value = "0")]
    bearing: f64,

    /// Camera pitch (carried through, does not affect bounds)
    #[arg(long, default_value = "0")]
    pitch: f64,

    /// Zoom at and above which clustering is skipped
    #[arg(long = "max-cluster-zoom", default_value = "15")]
    max_cluster_zoom: f64,

    /// Half-width/half-height of the viewport rectangle in degrees
    #[arg(long = "bounds-offset", default_value = "0.02")]
    bounds_offset: f64,

    /// Frame budget in milliseconds for the filter+cluster pass
    #[arg(long = "frame-budget-ms", default_value = "16")]
    frame_budget_ms: u64,

    /// Base URL for marker detail lookups (GET <url>/<id>)
    #[arg(long = "details-url", conflicts_with = "details_file")]
    details_url: Option<String>,

    /// JSON file mapping marker id to its detail object
    #[arg(long = "details-file")]
    details_file: Option<PathBuf>,

    /// Timeout in seconds for each detail lookup
    #[arg(long = "timeout-secs", default_value = "10")]
    timeout_secs: u64,

    /// Select this marker id and print it with its details
    #[arg(long)]
    select: Option<String>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

#[derive(Serialize)]
struct PassOutput<'a> {
    viewport: Viewport,
    count: usize,
    markers: &'a [Marker],
}

#[derive(Serialize)]
struct SelectOutput<'a> {
    current: bool,
    marker: &'a Marker,
}

/// Build EngineParams from command line arguments.
fn build_params(args: &Args) -> anyhow::Result<EngineParams> {
    if args.timeout_secs == 0 {
        bail!("--timeout-secs must be at least 1");
    }
    Ok(EngineParams::new(
        args.max_cluster_zoom,
        args.bounds_offset,
        Duration::from_millis(args.frame_budget_ms),
        Duration::from_secs(args.timeout_secs),
    )?)
}

/// Build the detail source selected on the command line.
fn build_source(args: &Args, params: &EngineParams) -> anyhow::Result<Arc<dyn DetailSource>> {
    if let Some(url) = &args.details_url {
        return Ok(Arc::new(HttpDetailSource::new(url, params.fetch_timeout)?));
    }
    if let Some(path) = &args.details_file {
        let file = File::open(path)
            .with_context(|| format!("failed to open details file {}", path.display()))?;
        let details: HashMap<String, MarkerDetails> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse details file {}", path.display()))?;
        return Ok(Arc::new(details.into_iter().collect::<MemoryDetailSource>()));
    }
    Ok(Arc::new(MemoryDetailSource::new()))
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = build_params(&args)?;
    let source = build_source(&args, &params)?;

    let dataset = load_markers_from_path(&args.dataset)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;
    if !dataset.skipped.is_empty() {
        tracing::warn!(skipped = dataset.skipped.len(), "dataset records skipped");
    }

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    let mut view = MapView::mount(dataset.markers, params, source);
    let change = ViewportChange {
        latitude: args.lat,
        longitude: args.lon,
        zoom: args.zoom,
        bearing: args.bearing,
        pitch: args.pitch,
    };
    let markers = view.on_viewport_change(&change);

    match &args.select {
        Some(id) => {
            let selection = view.select_by_id(id).await?;
            let out = SelectOutput {
                current: selection.is_current(),
                marker: selection.marker(),
            };
            serde_json::to_writer_pretty(&mut output, &out)?;
        }
        None => {
            let viewport = view
                .viewport()
                .unwrap_or_else(|| change.to_viewport(view.params().bounds_offset));
            let out = PassOutput {
                viewport,
                count: markers.len(),
                markers: &markers,
            };
            serde_json::to_writer_pretty(&mut output, &out)?;
        }
    }
    writeln!(output)?;
    output.flush()?;

    view.unmount();
    Ok(())
}

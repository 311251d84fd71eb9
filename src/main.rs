// CLI binary entry point for nmf
//
// Thin inspection tool over the nmf library: dumps container structure and
// walks cluster streams. All path handling and exit plumbing lives here,
// outside the codec itself.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::process;

use nmf::{fourcc, Cluster, Container, JfifParams, TrackKind};

/// nmf - NMF container inspection tool
#[derive(Parser, Debug)]
#[command(name = "nmf")]
#[command(about = "Inspect NMF media container files", long_about = None)]
#[command(version)]
struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the container's header, track table, and index
    Info {
        /// NMF file path
        file: String,
    },
    /// Walk the cluster stream after the container's fixed part
    Clusters {
        /// NMF file path
        file: String,

        /// Stop after this many clusters
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

fn main() {
    let config = Config::parse();

    let result = match &config.command {
        Commands::Info { file } => command_info(file, config.format),
        Commands::Clusters { file, limit } => command_clusters(file, *limit, config.format),
    };

    if let Err(e) = result {
        eprintln!("✗ {:#}", e);
        process::exit(1);
    }
}

fn command_info(path: &str, format: OutputFormat) -> Result<()> {
    let container = read_container(path)?.0;

    let tracks: Vec<_> = container.tracks.iter().map(describe_track).collect();
    let value = json!({
        "duration": container.header.duration,
        "track_num": container.header.track_num,
        "tracks": tracks,
        "index": {
            "fp": container.index.fp,
            "scale": container.index.scale,
            "count": container.index.count,
        },
    });
    print_value(&value, format)
}

fn command_clusters(path: &str, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let (_, mut reader) = read_container(path)?;

    let mut clusters = Vec::new();
    while reader.fill_buf().context("reading cluster stream")?.len() > 0 {
        let cluster = Cluster::read(&mut reader)
            .with_context(|| format!("cluster {} is malformed", clusters.len()))?;
        clusters.push(json!({
            "stamp": cluster.stamp,
            "frames": cluster
                .frames
                .iter()
                .map(|f| json!({ "track": f.track, "words": f.payload.len() }))
                .collect::<Vec<_>>(),
        }));
        if limit.is_some_and(|l| clusters.len() >= l) {
            break;
        }
    }

    let value = json!({ "count": clusters.len(), "clusters": clusters });
    print_value(&value, format)
}

fn read_container(path: &str) -> Result<(Container, BufReader<File>)> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path))?;
    let mut reader = BufReader::new(file);
    let container =
        Container::read(&mut reader).with_context(|| format!("cannot parse {}", path))?;
    Ok((container, reader))
}

fn describe_track(track: &nmf::Track) -> serde_json::Value {
    let mut entry = json!({
        "index": track.index,
        "kind": format!("{:?}", track.kind),
        "codec": fourcc_string(track.codec),
        "payload_words": track.payload.len(),
    });
    if track.kind == TrackKind::Video && track.codec == fourcc::MJPG {
        if let Ok(params) = JfifParams::parse(&track.payload) {
            entry["video_params"] = json!({
                "width": params.width,
                "height": params.height,
                "format": format!("{:?}", params.format),
                "interval_ns": params.interval,
            });
        }
    }
    entry
}

/// Render a fourcc as text when printable, hex otherwise
fn fourcc_string(codec: u32) -> String {
    let bytes = codec.to_le_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        bytes.iter().map(|&b| b as char).collect()
    } else {
        format!("{:#010x}", codec)
    }
}

fn print_value(value: &serde_json::Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
    }
    Ok(())
}

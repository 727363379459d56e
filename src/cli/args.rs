//! Command-line argument parsing for netpredict
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::metrics::{parse_metric_input, MetricField};
use crate::site::Section;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// netpredict - NetworkAI network health predictor
#[derive(Parser, Debug)]
#[command(name = "netpredict")]
#[command(version)]
#[command(about = "Predict network issues from latency, packet loss, jitter and bandwidth usage", long_about = None)]
pub struct Args {
    /// Classification service base URL (overrides config)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Per-request timeout in seconds, 0 disables (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only the outcome is printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one set of metrics
    Predict(PredictArgs),

    /// Probe the service and show its status
    Status,

    /// Show the service's expected input format
    Format,

    /// Start the interactive predictor form
    Start,

    /// Show a landing page section
    About {
        /// home, predictor, about or contact (all when omitted)
        section: Option<Section>,
    },

    /// Display current configuration
    Config,
}

/// Metrics for a one-shot prediction
#[derive(clap::Args, Debug, Clone)]
pub struct PredictArgs {
    /// Latency in milliseconds (>= 0)
    #[arg(long, default_value = "0", value_parser = parse_latency)]
    pub latency: f64,

    /// Packet loss percentage (0-100)
    #[arg(long, default_value = "0", value_parser = parse_packet_loss)]
    pub packet_loss: f64,

    /// Jitter in milliseconds (>= 0)
    #[arg(long, default_value = "0", value_parser = parse_jitter)]
    pub jitter: f64,

    /// Bandwidth usage percentage (0-100)
    #[arg(long, default_value = "0", value_parser = parse_bandwidth)]
    pub bandwidth: f64,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn metrics(&self) -> crate::metrics::NetworkMetrics {
        crate::metrics::NetworkMetrics::new(self.latency, self.packet_loss, self.jitter, self.bandwidth)
    }
}

/// Lenient parse followed by the input-layer bounds check
pub fn parse_bounded(field: MetricField, raw: &str) -> Result<f64, String> {
    let value = parse_metric_input(raw);
    field.check_bounds(value)?;
    Ok(value)
}

fn parse_latency(raw: &str) -> Result<f64, String> {
    parse_bounded(MetricField::LatencyMs, raw)
}

fn parse_packet_loss(raw: &str) -> Result<f64, String> {
    parse_bounded(MetricField::PacketLossPct, raw)
}

fn parse_jitter(raw: &str) -> Result<f64, String> {
    parse_bounded(MetricField::JitterMs, raw)
}

fn parse_bandwidth(raw: &str) -> Result<f64, String> {
    parse_bounded(MetricField::BandwidthUsagePct, raw)
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Verbosity from flags; `fallback` applies when no flag is given
    pub fn verbosity(&self, fallback: Verbosity) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => fallback,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log filter directive for the tracing subscriber
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show spinners and banners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show detailed events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}

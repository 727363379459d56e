//! Terminal rendering for the predictor
//!
//! Turns the rendering contract (status badge, form, submit control, result
//! panel) into colored terminal output, with spinners for network waits.

use crate::client::FormatHints;
use crate::metrics::{MetricField, NetworkMetrics};
use crate::predictor::view::{format_rows, Icon};
use crate::predictor::{ResultPanel, ServerStatus, SubmitControl, Tone};
use crate::repl::history::PredictionRecord;
use crate::site::{Block, Section, BRAND};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Display manager for predictor output
pub struct DisplayManager {
    show_spinner: bool,
    update_interval: Duration,
}

fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Success => text.green(),
        Tone::Danger => text.red(),
        Tone::Pending => text.yellow(),
        Tone::Info => text.blue(),
    }
}

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Check => "✓",
        Icon::Warning => "⚠",
        Icon::Spinner => "…",
        Icon::Activity => "⚡",
        Icon::Server => "●",
        Icon::Info => "ℹ",
    }
}

impl DisplayManager {
    pub fn new(color_output: bool, show_spinner: bool) -> Self {
        if !color_output {
            colored::control::set_override(false);
        }
        DisplayManager {
            show_spinner,
            update_interval: Duration::from_millis(100),
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, base_url: &str) {
        let width = 64;
        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", format!("  {} Network Health Predictor {}", BRAND, version).bold().cyan());
        println!("{}", format!("  Service: {}", base_url).dimmed());
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Set metrics with {} then run {} ({} for commands, {} to quit)\n",
            "/set <field> <value>".green(),
            "/predict".green(),
            "/help".green(),
            "/exit".green()
        );
    }

    /// Spinner for a network wait; hidden when spinners are off
    pub fn start_spinner(&self, message: &str) -> ProgressBar {
        if !self.show_spinner {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.update_interval);
        pb
    }

    /// Server status badge
    pub fn show_status(&self, status: ServerStatus) {
        println!("{}", status_line(status));
    }

    /// "Expected Input Format" panel; nothing when hints are absent
    pub fn show_format(&self, hints: Option<&FormatHints>) {
        if let Some(hints) = hints {
            for line in format_lines(hints) {
                println!("{}", line);
            }
        }
    }

    /// Current form values with labels and help text
    pub fn show_form(&self, metrics: &NetworkMetrics) {
        for field in MetricField::ALL {
            println!(
                "  {:<30} {:>10}  {}",
                field.label().bold(),
                format_value(metrics.get(field)),
                field_help(field).dimmed()
            );
        }
    }

    /// Submit button
    pub fn show_submit_control(&self, control: &SubmitControl) {
        let text = format!("{} {}", glyph(control.icon), control.label);
        if control.enabled {
            println!("  {}", text.bold().blue());
        } else {
            println!("  {} {}", text.dimmed(), "(disabled)".dimmed());
        }
    }

    /// Result panel; nothing when empty
    pub fn show_result(&self, panel: &ResultPanel) {
        for line in result_lines(panel) {
            println!("{}", line);
        }
    }

    /// History of this session's submissions
    pub fn show_history(&self, records: &[PredictionRecord]) {
        if records.is_empty() {
            println!("{}", "No predictions yet.".dimmed());
            return;
        }
        for (i, record) in records.iter().enumerate() {
            println!("{:>3}. {}", i + 1, record.summary());
        }
    }

    /// Landing page section
    pub fn show_section(&self, section: Section) {
        println!("{}", format!("# {}", section.anchor()).dimmed());
        for block in section.content() {
            for line in block_lines(&block) {
                println!("{}", line);
            }
        }
        println!();
    }

    pub fn show_info(&self, message: &str) {
        println!("{} {}", glyph(Icon::Info).blue(), message);
    }

    pub fn show_warning(&self, message: &str) {
        println!("{} {}", glyph(Icon::Warning).yellow(), message.yellow());
    }

    pub fn show_error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Show the input prompt marker
    pub fn show_prompt(&self) -> io::Result<()> {
        io::stdout().flush()
    }

    /// Clear the terminal
    pub fn clear(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0)
        )
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Metric value without a trailing `.0` for whole numbers
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Key, description and example value shown beside a form field
pub fn field_help(field: MetricField) -> String {
    format!(
        "[{}] {} (e.g. {})",
        field.key(),
        field.description(),
        field.placeholder()
    )
}

pub fn status_line(status: ServerStatus) -> String {
    let icon = match status {
        ServerStatus::Checking => Icon::Spinner,
        _ => Icon::Server,
    };
    format!("{} {}", paint(glyph(icon), status.tone()), paint(status.label(), status.tone()))
}

pub fn format_lines(hints: &FormatHints) -> Vec<String> {
    let mut lines = vec![format!("{} {}", glyph(Icon::Info).blue(), "Expected Input Format".bold().blue())];
    for (label, hint) in format_rows(hints) {
        lines.push(format!("  {} {}", format!("{}:", label).blue(), hint));
    }
    lines
}

pub fn result_lines(panel: &ResultPanel) -> Vec<String> {
    let (Some(title), Some(body)) = (panel.title(), panel.body()) else {
        return Vec::new();
    };
    let tone = panel.tone();
    let icon = panel.icon().map(glyph).unwrap_or_default();

    let mut lines = vec![
        String::new(),
        format!("{} {}", paint(icon, tone), paint(title, tone).bold()),
        format!("  {}", paint(body, tone)),
    ];
    if let Some(note) = panel.footnote() {
        lines.push(format!("  {}", note.dimmed()));
    }
    lines
}

fn block_lines(block: &Block) -> Vec<String> {
    let mut lines = vec![String::new(), block.heading.bold().to_string()];
    for paragraph in &block.paragraphs {
        lines.push(format!("  {}", paragraph));
    }
    for (title, detail) in &block.items {
        if detail.is_empty() {
            lines.push(format!("  • {}", title));
        } else {
            lines.push(format!("  • {}: {}", title.bold(), detail.dimmed()));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::view::{HEALTHY_TITLE, ISSUE_EXPLANATION};
    use crate::predictor::Verdict;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(68.0), "68");
        assert_eq!(format_value(45.2), "45.2");
    }

    #[test]
    fn test_result_lines_empty_panel() {
        assert!(result_lines(&ResultPanel::Empty).is_empty());
    }

    #[test]
    fn test_result_lines_contain_copy() {
        let healthy = result_lines(&ResultPanel::Outcome {
            verdict: Verdict::Healthy,
            value: 0.0,
        });
        assert!(healthy.iter().any(|l| l.contains(HEALTHY_TITLE)));

        let issue = result_lines(&ResultPanel::Outcome {
            verdict: Verdict::IssueDetected,
            value: 1.0,
        });
        assert!(issue.iter().any(|l| l.contains(ISSUE_EXPLANATION)));
        assert!(issue.iter().any(|l| l.contains("Issue Detected (1)")));
    }

    #[test]
    fn test_field_help_shows_example() {
        let help = field_help(MetricField::PacketLossPct);
        assert!(help.starts_with("[packet_loss_pct]"));
        assert!(help.ends_with("(e.g. 0.3)"));
    }

    #[test]
    fn test_status_line() {
        assert!(status_line(ServerStatus::Offline).contains("Server Offline"));
    }
}

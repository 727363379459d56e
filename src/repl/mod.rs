//! Interactive predictor form
//!
//! A read-eval-print loop over one `PredictorSession`: the user edits the
//! four metrics, submits, resets, and sees the same status badge, submit
//! control and result panel the web form shows.

pub mod commands;
pub mod display;
pub mod history;
pub mod input;

use crate::client::PredictionService;
use crate::errors::{PredictorError, Result};
use crate::predictor::{PredictorSession, ServerStatus};
use crate::site::Section;
use colored::*;
use std::path::PathBuf;

use crate::cli::args::parse_bounded;
use crate::repl::commands::{help_entries, is_command, Command};
pub use crate::repl::display::DisplayManager;
use crate::repl::history::{PredictionHistory, PredictionRecord, RecordOutcome};
use crate::repl::input::InputHandler;

/// REPL session coordinator
pub struct ReplSession<S: PredictionService> {
    input: InputHandler,
    display: DisplayManager,
    predictor: PredictorSession<S>,
    history: PredictionHistory,
}

impl<S: PredictionService> ReplSession<S> {
    /// Create REPL session with persistent line history
    pub fn with_history(
        predictor: PredictorSession<S>,
        display: DisplayManager,
        history_path: PathBuf,
    ) -> Result<Self> {
        Ok(Self {
            input: InputHandler::with_history(history_path)?,
            display,
            predictor,
            history: PredictionHistory::new(),
        })
    }

    /// Wake the server, then loop until `/exit`, EOF or cancellation
    pub async fn run(&mut self, version: &str, base_url: &str) -> Result<()> {
        self.display.show_banner(version, base_url);
        self.wake().await?;
        self.show_form();

        loop {
            self.display.show_prompt()?;
            let Some(line) = self.input.read_line()? else {
                break;
            };
            if line.is_empty() {
                continue;
            }

            match self.handle_input(&line).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(PredictorError::Cancelled) => {
                    self.display.show_warning("Session cancelled.");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        self.input.save_history()?;
        Ok(())
    }

    /// Handle one line. Returns false when the session should end.
    pub async fn handle_input(&mut self, input: &str) -> Result<bool> {
        if !is_command(input) {
            self.display
                .show_warning(&format!("Unknown input: {} (type /help)", input));
            return Ok(true);
        }

        match commands::parse(input) {
            Command::Help => self.show_help(),
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                return Ok(false);
            }
            Command::Set { field, raw } => match parse_bounded(field, &raw) {
                Ok(value) => {
                    self.predictor.set_value(field, value);
                    self.display.show_info(&format!(
                        "{} = {}",
                        field.short_label(),
                        display::format_value(value)
                    ));
                }
                Err(reason) => self.display.show_warning(&reason),
            },
            Command::Show => self.show_form(),
            Command::Predict => self.predict().await?,
            Command::Reset => {
                self.predictor.reset()?;
                self.display.show_info("Form reset.");
                self.show_form();
            }
            Command::Status => self.display.show_status(self.predictor.server_status()),
            Command::Format => match self.predictor.format_hints() {
                Some(hints) => self.display.show_format(Some(hints)),
                None => self.display.show_info("The server has not provided a format description."),
            },
            Command::Wake => {
                self.wake().await?;
            }
            Command::History { limit } => {
                self.display
                    .show_history(self.history.recent(limit.unwrap_or(10)));
            }
            Command::About { section } => match section {
                Some(section) => self.display.show_section(section),
                None => Section::ALL
                    .iter()
                    .for_each(|s| self.display.show_section(*s)),
            },
            Command::Clear => self.display.clear()?,
            Command::Unknown { input } => {
                self.display
                    .show_warning(&format!("Unknown command: {} (type /help)", input));
            }
        }

        Ok(true)
    }

    async fn wake(&mut self) -> Result<()> {
        let spinner = self.display.start_spinner(ServerStatus::Checking.label());
        let status = self.predictor.wake().await;
        spinner.finish_and_clear();

        self.display.show_status(status?);
        self.display.show_format(self.predictor.format_hints());
        Ok(())
    }

    async fn predict(&mut self) -> Result<()> {
        let control = self.predictor.submit_control();
        if !control.enabled {
            self.display.show_submit_control(&control);
            if self.predictor.server_status() == ServerStatus::Offline {
                self.display
                    .show_warning("The server is offline. Use /wake to check it again.");
            } else {
                self.display
                    .show_warning("The server has not been checked yet. Use /wake first.");
            }
            return Ok(());
        }

        let metrics = *self.predictor.metrics();
        let spinner = self.display.start_spinner("Analyzing Network...");
        let result = self.predictor.submit().await;
        spinner.finish_and_clear();

        let outcome = match result {
            Ok(classification) => RecordOutcome::Classified(classification),
            Err(PredictorError::Cancelled) => return Err(PredictorError::Cancelled),
            Err(e) if e.is_user_facing() => RecordOutcome::Error(e.to_string()),
            Err(e) => return Err(e),
        };
        self.history.push(PredictionRecord::new(metrics, outcome));
        self.display.show_result(&self.predictor.result_panel());
        Ok(())
    }

    fn show_form(&self) {
        println!();
        self.display.show_form(self.predictor.metrics());
        self.display
            .show_submit_control(&self.predictor.submit_control());
        self.display.show_result(&self.predictor.result_panel());
        println!();
    }

    fn show_help(&self) {
        println!("\n{}", "Commands".bold());
        for (usage, description) in help_entries() {
            println!("  {:<24} {}", usage.cyan(), description);
        }
        println!();
    }

    pub fn predictor(&self) -> &PredictorSession<S> {
        &self.predictor
    }

    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }
}

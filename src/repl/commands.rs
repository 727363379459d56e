//! REPL command parsing
//!
//! Slash commands plus a `field=value` shorthand for editing the form.

use crate::metrics::MetricField;
use crate::site::Section;

/// REPL command types
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    /// Edit one field; `raw` is parsed leniently by the session
    Set { field: MetricField, raw: String },
    Show,
    Predict,
    Reset,
    Status,
    Format,
    Wake,
    History { limit: Option<usize> },
    About { section: Option<Section> },
    Clear,
    Exit,
    Unknown { input: String },
}

/// Check if input is a command or a field assignment
pub fn is_command(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.starts_with('/') || trimmed.contains('=')
}

/// Parse input string into a command
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    let unknown = || Command::Unknown {
        input: input.to_string(),
    };

    if let Some((name, value)) = trimmed.split_once('=') {
        if !trimmed.starts_with('/') {
            return match name.parse::<MetricField>() {
                Ok(field) => Command::Set {
                    field,
                    raw: value.trim().to_string(),
                },
                Err(_) => unknown(),
            };
        }
    }

    let Some(body) = trimmed.strip_prefix('/') else {
        return unknown();
    };
    let parts: Vec<&str> = body.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return unknown();
    };

    match name.to_lowercase().as_str() {
        "help" | "h" | "?" => Command::Help,
        "exit" | "quit" | "q" => Command::Exit,
        "set" => match parts.get(1).map(|f| f.parse::<MetricField>()) {
            Some(Ok(field)) => Command::Set {
                field,
                raw: parts.get(2..).map(|rest| rest.join(" ")).unwrap_or_default(),
            },
            _ => unknown(),
        },
        "show" | "form" => Command::Show,
        "predict" | "submit" | "p" => Command::Predict,
        "reset" => Command::Reset,
        "status" => Command::Status,
        "format" => Command::Format,
        "wake" => Command::Wake,
        "history" => Command::History {
            limit: parts.get(1).and_then(|s| s.parse().ok()),
        },
        "about" => match parts.get(1) {
            None => Command::About { section: None },
            Some(s) => match s.parse::<Section>() {
                Ok(section) => Command::About {
                    section: Some(section),
                },
                Err(_) => unknown(),
            },
        },
        "clear" | "cls" => Command::Clear,
        _ => unknown(),
    }
}

/// Help text lines: (usage, description)
pub fn help_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/set <field> <value>", "Set a metric (latency, packet_loss, jitter, bandwidth)"),
        ("<field>=<value>", "Shorthand for /set"),
        ("/show", "Show the form"),
        ("/predict", "Predict network health from the form"),
        ("/reset", "Reset the form and clear the result"),
        ("/status", "Show server status"),
        ("/format", "Show the expected input format"),
        ("/wake", "Probe the server again"),
        ("/history [n]", "Show recent predictions"),
        ("/about [section]", "Show home, predictor, about or contact"),
        ("/clear", "Clear the screen"),
        ("/exit", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_command() {
        assert!(is_command("/help"));
        assert!(is_command("latency=4"));
        assert!(!is_command("hello"));
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse("/set latency 45.2"),
            Command::Set {
                field: MetricField::LatencyMs,
                raw: "45.2".to_string()
            }
        );
        assert_eq!(
            parse("/set jitter"),
            Command::Set {
                field: MetricField::JitterMs,
                raw: String::new()
            }
        );
        assert_eq!(
            parse("packet_loss = 0.3"),
            Command::Set {
                field: MetricField::PacketLossPct,
                raw: "0.3".to_string()
            }
        );
        assert!(matches!(parse("/set speed 4"), Command::Unknown { .. }));
        assert!(matches!(parse("speed=4"), Command::Unknown { .. }));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("/predict"), Command::Predict);
        assert_eq!(parse("/RESET"), Command::Reset);
        assert_eq!(parse("/quit"), Command::Exit);
        assert_eq!(parse("/history 5"), Command::History { limit: Some(5) });
        assert_eq!(parse("/history"), Command::History { limit: None });
        assert_eq!(
            parse("/about contact"),
            Command::About {
                section: Some(Section::Contact)
            }
        );
        assert!(matches!(parse("/"), Command::Unknown { .. }));
        assert!(matches!(parse("/frobnicate"), Command::Unknown { .. }));
    }
}

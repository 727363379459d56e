//! Telemetry for netpredict
//!
//! Collects predictor events in memory and prints a session summary.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Events kept in memory; older ones are dropped, stats keep counting
pub const MAX_EVENTS: usize = 500;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    StateTransition {
        from: String,
        to: String,
        timestamp: Instant,
    },
    ProbeCompleted {
        retry: bool,
        success: bool,
        duration_ms: u64,
        timestamp: Instant,
    },
    FormatFetched {
        success: bool,
        timestamp: Instant,
    },
    PredictionCompleted {
        success: bool,
        duration_ms: u64,
        timestamp: Instant,
    },
    FormReset {
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub state_transitions: usize,
    pub probes: usize,
    pub probes_failed: usize,
    pub retry_probes: usize,
    pub format_fetches: usize,
    pub predictions_succeeded: usize,
    pub predictions_failed: usize,
    pub resets: usize,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<VecDeque<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = lock(&self.stats);
            match &event {
                TelemetryEvent::StateTransition { .. } => {
                    stats.state_transitions += 1;
                }
                TelemetryEvent::ProbeCompleted { retry, success, .. } => {
                    stats.probes += 1;
                    if *retry {
                        stats.retry_probes += 1;
                    }
                    if !*success {
                        stats.probes_failed += 1;
                    }
                }
                TelemetryEvent::FormatFetched { success, .. } => {
                    if *success {
                        stats.format_fetches += 1;
                    }
                }
                TelemetryEvent::PredictionCompleted { success, .. } => {
                    if *success {
                        stats.predictions_succeeded += 1;
                    } else {
                        stats.predictions_failed += 1;
                    }
                }
                TelemetryEvent::FormReset { .. } => {
                    stats.resets += 1;
                }
            }
        }

        let mut events = lock(&self.events);
        if events.len() == MAX_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        lock(&self.stats).clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = lock(&self.events);
        let start = events.len().saturating_sub(n);
        events.iter().skip(start).cloned().collect()
    }

    /// Share of completed predictions that succeeded
    pub fn prediction_success_rate(&self) -> f64 {
        let stats = lock(&self.stats);
        let total = stats.predictions_succeeded + stats.predictions_failed;
        if total == 0 {
            1.0
        } else {
            stats.predictions_succeeded as f64 / total as f64
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple telemetry display
pub struct TelemetryDisplay {
    collector: TelemetryCollector,
    verbosity: crate::cli::Verbosity,
}

impl TelemetryDisplay {
    pub fn new(collector: TelemetryCollector, verbosity: crate::cli::Verbosity) -> Self {
        Self {
            collector,
            verbosity,
        }
    }

    /// Display summary statistics
    pub fn display_summary(&self) {
        if !self.verbosity.show_events() {
            return;
        }

        let stats = self.collector.get_stats();
        let elapsed = self.collector.elapsed();

        println!("\n📊 Session Summary");
        println!("─────────────────────────────────────");
        println!("Duration:          {:?}", elapsed);
        println!("Probes:            {} ({} retries, {} failed)", stats.probes, stats.retry_probes, stats.probes_failed);
        println!("Predictions:       {}", stats.predictions_succeeded + stats.predictions_failed);
        println!("Success rate:      {:.1}%", self.collector.prediction_success_rate() * 100.0);
        println!("Resets:            {}", stats.resets);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_creation() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.event_count(), 0);
        assert_eq!(collector.get_stats().probes, 0);
    }

    #[test]
    fn test_probe_events() {
        let collector = TelemetryCollector::new();
        collector.record(TelemetryEvent::ProbeCompleted {
            retry: false,
            success: false,
            duration_ms: 12,
            timestamp: Instant::now(),
        });
        collector.record(TelemetryEvent::ProbeCompleted {
            retry: true,
            success: true,
            duration_ms: 40,
            timestamp: Instant::now(),
        });

        let stats = collector.get_stats();
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.retry_probes, 1);
        assert_eq!(stats.probes_failed, 1);
    }

    #[test]
    fn test_prediction_success_rate() {
        let collector = TelemetryCollector::new();
        assert_eq!(collector.prediction_success_rate(), 1.0);

        for success in [true, true, false] {
            collector.record(TelemetryEvent::PredictionCompleted {
                success,
                duration_ms: 100,
                timestamp: Instant::now(),
            });
        }

        let rate = collector.prediction_success_rate();
        assert!((rate - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let collector = TelemetryCollector::new();
        for _ in 0..MAX_EVENTS + 25 {
            collector.record(TelemetryEvent::FormReset {
                timestamp: Instant::now(),
            });
        }

        assert_eq!(collector.event_count(), MAX_EVENTS);
        assert_eq!(collector.get_stats().resets, MAX_EVENTS + 25);
    }

    #[test]
    fn test_recent_events() {
        let collector = TelemetryCollector::new();
        for _ in 0..10 {
            collector.record(TelemetryEvent::FormReset {
                timestamp: Instant::now(),
            });
        }

        assert_eq!(collector.recent_events(3).len(), 3);
        assert_eq!(collector.get_stats().resets, 10);
    }
}

//! Telemetry system for symptomcheck
//!
//! Collects per-session events from the CLI and prints a summary.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Which pipeline produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Structured,
    Text,
}

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    TranslationRequested {
        source: String,
        timestamp: Instant,
    },
    SymptomsExtracted {
        count: usize,
        timestamp: Instant,
    },
    PredictionCompleted {
        pipeline: Pipeline,
        duration_ms: u64,
        success: bool,
        timestamp: Instant,
    },
    RecommendationServed {
        results: usize,
        timestamp: Instant,
    },
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub translations: usize,
    pub symptoms_extracted: usize,
    pub structured_predictions: usize,
    pub text_predictions: usize,
    pub predictions_failed: usize,
    pub prediction_time_ms: u64,
    pub recommendations: usize,
    pub hospitals_returned: usize,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = lock(&self.stats);
            match &event {
                TelemetryEvent::TranslationRequested { .. } => {
                    stats.translations += 1;
                }
                TelemetryEvent::SymptomsExtracted { count, .. } => {
                    stats.symptoms_extracted += count;
                }
                TelemetryEvent::PredictionCompleted {
                    pipeline,
                    duration_ms,
                    success,
                    ..
                } => {
                    stats.prediction_time_ms += duration_ms;
                    if !*success {
                        stats.predictions_failed += 1;
                    } else {
                        match pipeline {
                            Pipeline::Structured => stats.structured_predictions += 1,
                            Pipeline::Text => stats.text_predictions += 1,
                        }
                    }
                }
                TelemetryEvent::RecommendationServed { results, .. } => {
                    stats.recommendations += 1;
                    stats.hospitals_returned += results;
                }
            }
        }

        lock(&self.events).push(event);
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

    /// Mean wall time per prediction, failed ones included
    pub fn average_prediction_ms(&self) -> f64 {
        let stats = lock(&self.stats);
        let total = stats.structured_predictions + stats.text_predictions + stats.predictions_failed;
        if total == 0 {
            0.0
        } else {
            stats.prediction_time_ms as f64 / total as f64
        }
    }

    /// Fraction of predictions that succeeded
    pub fn prediction_success_rate(&self) -> f64 {
        let stats = lock(&self.stats);
        let succeeded = stats.structured_predictions + stats.text_predictions;
        let total = succeeded + stats.predictions_failed;
        if total == 0 {
            1.0
        } else {
            succeeded as f64 / total as f64
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
    /// Create a new display
    pub fn new(collector: TelemetryCollector, verbosity: crate::cli::Verbosity) -> Self {
        Self {
            collector,
            verbosity,
        }
    }

    /// Display summary statistics
    pub fn display_summary(&self) {
        let stats = self.collector.get_stats();
        let elapsed = self.collector.elapsed();

        println!("\n📊 Session Summary");
        println!("─────────────────────────────────────");
        println!("Duration:            {:?}", elapsed);
        println!("Events:              {}", self.collector.event_count());
        println!("Structured:          {}", stats.structured_predictions);
        println!("Text:                {}", stats.text_predictions);
        println!("Translations:        {}", stats.translations);
        println!("Symptoms extracted:  {}", stats.symptoms_extracted);
        println!("Recommendations:     {}", stats.recommendations);
        println!("Hospitals returned:  {}", stats.hospitals_returned);
        println!("Avg prediction:      {:.1} ms", self.collector.average_prediction_ms());
        println!("Success rate:        {:.1}%", self.collector.prediction_success_rate() * 100.0);
        println!();
    }

    /// Check if should show detailed output
    pub fn should_show_details(&self) -> bool {
        self.verbosity.show_events()
    }
}

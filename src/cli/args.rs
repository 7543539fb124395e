//! Command-line argument parsing for symptomcheck
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use crate::translate::Language;
use crate::vocabulary::SymptomPresence;

/// symptomcheck - Predict diseases from symptoms and find hospitals
#[derive(Parser, Debug)]
#[command(name = "symptomcheck")]
#[command(version)]
#[command(about = "Predict diseases from symptoms and recommend hospitals", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the exported model artifacts
    #[arg(long, global = true)]
    pub artifacts_dir: Option<PathBuf>,

    /// Translate with the built-in phrase table instead of the online service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict a disease from symptom flags (e.g. `fever cough headache=0`)
    Symptoms {
        /// Symptom name, optionally with `=0` or `=1` (default 1)
        #[arg(value_name = "SYMPTOM", required = true, value_parser = parse_symptom_flag)]
        symptoms: Vec<(String, u8)>,
    },

    /// Predict a disease from a free-text description
    Text {
        /// Description of how the patient feels
        #[arg(value_name = "TEXT")]
        text: String,

        /// Language of the description
        #[arg(short, long, value_enum, default_value_t = Language::English)]
        lang: Language,
    },

    /// Recommend hospitals
    Recommend {
        /// Medical specialty (e.g. Cardiology)
        #[arg(long)]
        specialty: Option<String>,

        /// District (e.g. Ernakulam)
        #[arg(long)]
        district: Option<String>,

        /// Cost tier (e.g. Paid/Private)
        #[arg(long)]
        cost: Option<String>,

        /// Maximum number of hospitals (defaults to the configured value)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },

    /// Run one example of each operation
    Demo,

    /// Check that all artifacts are present
    Check,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

/// Parse `name` or `name=value` into a presence entry
pub fn parse_symptom_flag(raw: &str) -> Result<(String, u8), String> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => {
            let value = value
                .trim()
                .parse::<u8>()
                .map_err(|_| format!("Invalid presence value in '{}'", raw))?;
            (name.trim(), value)
        }
        None => (raw.trim(), 1),
    };

    if name.is_empty() {
        return Err(format!("Missing symptom name in '{}'", raw));
    }

    Ok((name.to_string(), value))
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

/// Collect symptom flags into a presence map; later flags win
pub fn presence_map(symptoms: &[(String, u8)]) -> SymptomPresence {
    symptoms.iter().cloned().collect()
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

    /// Parse a configured verbosity name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "symptomcheck=info",
            Verbosity::VeryVerbose => "symptomcheck=debug",
        }
    }

    /// Check if should show progress bars
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show detailed events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> Args {
        Args {
            config: None,
            artifacts_dir: None,
            offline: false,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(args(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(args(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(args(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(args(2, false).verbosity(), Verbosity::VeryVerbose);
        assert_eq!(args(2, true).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());

        assert!(!Verbosity::Normal.show_events());
        assert!(Verbosity::Verbose.show_events());

        assert_eq!(Verbosity::from_name(Verbosity::VeryVerbose.as_str()), Some(Verbosity::VeryVerbose));
        assert_eq!(Verbosity::from_name("loud"), None);
    }

    #[test]
    fn test_parse_symptom_flag() {
        assert_eq!(parse_symptom_flag("fever").unwrap(), ("fever".to_string(), 1));
        assert_eq!(parse_symptom_flag("headache=0").unwrap(), ("headache".to_string(), 0));
        assert_eq!(parse_symptom_flag(" sore throat = 1 ").unwrap(), ("sore throat".to_string(), 1));
        assert!(parse_symptom_flag("=1").is_err());
        assert!(parse_symptom_flag("fever=yes").is_err());
    }

    #[test]
    fn test_presence_map_last_wins() {
        let map = presence_map(&[
            ("fever".to_string(), 1),
            ("cough".to_string(), 1),
            ("fever".to_string(), 0),
        ]);
        assert_eq!(map.get("fever"), Some(&0));
        assert_eq!(map.get("cough"), Some(&1));
    }

    #[test]
    fn test_parse_text_command() {
        let args = Args::try_parse_from(["symptomcheck", "text", "ചുമ", "--lang", "ml"]).unwrap();
        match args.command {
            Some(Commands::Text { text, lang }) => {
                assert_eq!(text, "ചുമ");
                assert_eq!(lang, Language::Malayalam);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_symptoms_command() {
        let args = Args::try_parse_from(["symptomcheck", "-v", "symptoms", "fever", "cough=0"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::Verbose);
        match args.command {
            Some(Commands::Symptoms { symptoms }) => {
                assert_eq!(symptoms, vec![("fever".to_string(), 1), ("cough".to_string(), 0)]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_symptoms_requires_names() {
        assert!(Args::try_parse_from(["symptomcheck", "symptoms"]).is_err());
    }

    #[test]
    fn test_parse_recommend_command() {
        let args = Args::try_parse_from([
            "symptomcheck", "recommend", "--specialty", "Cardiology", "-n", "2",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Recommend { specialty, district, top_n, .. }) => {
                assert_eq!(specialty.as_deref(), Some("Cardiology"));
                assert!(district.is_none());
                assert_eq!(top_n, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

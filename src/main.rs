//! symptomcheck - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use symptomcheck::{
    artifacts::{ArtifactStatus, ArtifactStore, EXIT_CODE_SETUP_NEEDED},
    cli::{presence_map, Args, Commands, Config, Verbosity},
    models::RecommendationQuery,
    telemetry::{Pipeline, TelemetryCollector, TelemetryDisplay, TelemetryEvent},
    translate, DiagnosisEngine, Language, SymptomPresence,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.clone())?;
    if let Some(dir) = &args.artifacts_dir {
        config.artifacts.dir = dir.to_string_lossy().into_owned();
    }
    if args.offline {
        config.translator.offline = true;
    }

    let verbosity = effective_verbosity(&args, &config);
    init_logging(verbosity);
    if !config.telemetry.color_output {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Symptoms { symptoms }) => {
            let session = Session::start(&config, verbosity)?;
            let result = session.predict_structured(&presence_map(symptoms));
            session.finish();
            result?;
        }
        Some(Commands::Text { text, lang }) => {
            let session = Session::start(&config, verbosity)?;
            let result = session.predict_text(text, *lang).await;
            session.finish();
            result?;
        }
        Some(Commands::Recommend {
            specialty,
            district,
            cost,
            top_n,
        }) => {
            let session = Session::start(&config, verbosity)?;
            let query = RecommendationQuery {
                specialty: specialty.clone(),
                district: district.clone(),
                cost: cost.clone(),
                top_n: top_n.unwrap_or(config.recommender.default_top_n),
            };
            let result = session.recommend(&query);
            session.finish();
            result?;
        }
        Some(Commands::Demo) => {
            let session = Session::start(&config, verbosity)?;
            let result = run_demo(&session).await;
            session.finish();
            result?;
        }
        Some(Commands::Check) => {
            run_check(&config);
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
        None => {
            println!("symptomcheck v{}", env!("CARGO_PKG_VERSION"));
            println!("\nUsage:");
            println!("  symptomcheck symptoms fever cough          Predict from symptom flags");
            println!("  symptomcheck text \"I have a fever\"         Predict from free text");
            println!("  symptomcheck text \"പനി\" --lang ml          Predict from Malayalam text");
            println!("  symptomcheck recommend --specialty S       Recommend hospitals");
            println!("  symptomcheck demo                          Run example calls");
            println!("  symptomcheck check                         Check artifacts");
            println!("  symptomcheck config                        Show configuration");
            println!();
        }
    }

    Ok(())
}

/// CLI flags win over the configured default
fn effective_verbosity(args: &Args, config: &Config) -> Verbosity {
    if args.quiet || args.verbose > 0 {
        return args.verbosity();
    }
    Verbosity::from_name(&config.telemetry.default_verbosity).unwrap_or(Verbosity::Normal)
}

fn init_logging(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Loaded engine plus per-run telemetry
struct Session {
    engine: DiagnosisEngine,
    telemetry: TelemetryCollector,
    verbosity: Verbosity,
}

impl Session {
    /// Check and load artifacts, exiting with setup instructions when some
    /// are missing
    fn start(config: &Config, verbosity: Verbosity) -> Result<Self> {
        let store = ArtifactStore::from_config(config);
        if let ArtifactStatus::Missing(missing) = store.check() {
            store.show_missing_instructions(&missing);
            std::process::exit(EXIT_CODE_SETUP_NEEDED);
        }

        let pb = if verbosity.show_progress() {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")?,
            );
            pb.set_message("Loading model artifacts...");
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let loaded = store.load();
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let engine = DiagnosisEngine::new(loaded?, translate::from_config(&config.translator)?);

        Ok(Self {
            engine,
            telemetry: TelemetryCollector::new(),
            verbosity,
        })
    }

    fn record_prediction(&self, pipeline: Pipeline, started: Instant, success: bool) {
        self.telemetry.record(TelemetryEvent::PredictionCompleted {
            pipeline,
            duration_ms: started.elapsed().as_millis() as u64,
            success,
            timestamp: Instant::now(),
        });
    }

    fn predict_structured(&self, presence: &SymptomPresence) -> Result<()> {
        let started = Instant::now();
        let result = self.engine.predict_from_structured_input(presence);
        self.record_prediction(Pipeline::Structured, started, result.is_ok());

        let label = result.context("Structured prediction failed")?;
        println!("{} {}", "Symptom model prediction:".bold(), label.green());
        Ok(())
    }

    async fn predict_text(&self, text: &str, language: Language) -> Result<()> {
        let started = Instant::now();
        if !language.is_english() {
            self.telemetry.record(TelemetryEvent::TranslationRequested {
                source: language.code().to_string(),
                timestamp: Instant::now(),
            });
        }

        let prepared = match self.engine.prepare_text(text, language).await {
            Ok(prepared) => prepared,
            Err(e) => {
                self.record_prediction(Pipeline::Text, started, false);
                return Err(e).context("Text preparation failed");
            }
        };

        self.telemetry.record(TelemetryEvent::SymptomsExtracted {
            count: prepared.symptoms.len(),
            timestamp: Instant::now(),
        });

        if self.verbosity.show_events() {
            if !language.is_english() {
                println!("  {} {}", "Translated:".dimmed(), prepared.english);
            }
            if prepared.has_symptoms() {
                println!("  {} {}", "Symptoms:".dimmed(), prepared.symptoms.join(", "));
            } else {
                println!("  {}", "No known symptoms found, using full text".dimmed());
            }
        }

        let result = self.engine.classify_prepared(&prepared);
        self.record_prediction(Pipeline::Text, started, result.is_ok());

        let label = result.context("Text prediction failed")?;
        println!(
            "{} {}",
            format!("NLP prediction ({}):", language.code().to_uppercase()).bold(),
            label.green()
        );
        Ok(())
    }

    fn recommend(&self, query: &RecommendationQuery) -> Result<()> {
        let hospitals = self
            .engine
            .recommend(query)
            .context("Recommendation failed")?;

        self.telemetry.record(TelemetryEvent::RecommendationServed {
            results: hospitals.len(),
            timestamp: Instant::now(),
        });

        if hospitals.is_empty() {
            println!("No hospitals match the given filters.");
        } else {
            println!("{}", "Recommended hospitals:".bold());
            for (rank, hospital) in hospitals.iter().enumerate() {
                println!("  {}. {}", rank + 1, hospital);
            }
        }
        Ok(())
    }

    fn finish(&self) {
        let display = TelemetryDisplay::new(self.telemetry.clone(), self.verbosity);
        if display.should_show_details() {
            display.display_summary();
        }
    }
}

/// One call of each operation; stops at the first failure
async fn run_demo(session: &Session) -> Result<()> {
    let presence: SymptomPresence = [("fever", 1), ("cough", 1), ("headache", 0)]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    session.predict_structured(&presence)?;

    session
        .predict_text("I have fever and cough", Language::English)
        .await?;
    session
        .predict_text("എനിക്ക് പനി കൂടാതെ ചുമയുണ്ട്", Language::Malayalam)
        .await?;

    let query = RecommendationQuery::default()
        .with_specialty("Cardiology")
        .with_district("Ernakulam")
        .with_cost("Paid/Private");
    session.recommend(&query)
}

fn run_check(config: &Config) {
    let store = ArtifactStore::from_config(config);

    println!("\nChecking artifacts in {}...\n", store.dir().display());

    match store.check() {
        ArtifactStatus::Ready => {
            println!("{}", "✓ All artifacts present".green());
            println!();
        }
        ArtifactStatus::Missing(missing) => {
            store.show_missing_instructions(&missing);
            std::process::exit(EXIT_CODE_SETUP_NEEDED);
        }
    }
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    println!("\nsymptomcheck configuration");
    println!("──────────────────────────");

    match (&args.config, Config::default_path()) {
        (Some(path), _) => println!("Source: {}", path.display()),
        (None, Some(path)) if path.exists() => println!("Source: {}", path.display()),
        _ => println!("Source: built-in defaults"),
    }
    println!("Artifacts: {}", config.artifacts_dir().display());
    println!();

    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

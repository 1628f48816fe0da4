use crate::config::toml_config::QuizConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ear-quiz")]
#[command(about = "Grade taps on an ear diagram against authored reference points")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Catalog source: a CSV path or `bundled:<name>`
    #[arg(short, long)]
    pub source: Option<String>,

    /// Grading tolerance as a fraction of the image span
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every point in the catalog
    List,
    /// Find the authored point nearest to a tap
    Nearest {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
    },
    /// Grade a guessed name for a tap
    Grade {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(short, long)]
        guess: String,
    },
    /// Write the parsed catalog back out as CSV
    Export {
        #[arg(short, long)]
        out: String,
    },
}

impl CliConfig {
    /// The TOML configuration, or defaults when no file was given.
    pub fn load_config(&self) -> Result<QuizConfig> {
        match &self.config {
            Some(path) => QuizConfig::from_file(path),
            None => Ok(QuizConfig::default()),
        }
    }

    /// Applies `--source` and `--tolerance`. Call after the logger is set up
    /// so the overrides show up in verbose output.
    pub fn apply_overrides(&self, config: &mut QuizConfig) {
        if let Some(source) = &self.source {
            tracing::debug!("Catalog source overridden to {}", source);
            config.catalog.source = source.clone();
        }
        if let Some(tolerance) = self.tolerance {
            tracing::debug!("Tolerance overridden to {}", tolerance);
            config.grading.tolerance = Some(tolerance);
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        if let Some(tolerance) = self.tolerance {
            validation::validate_tolerance("tolerance", tolerance)?;
        }
        match &self.command {
            Command::Nearest { x, y } | Command::Grade { x, y, .. } => {
                validation::validate_range("x", *x, 0.0, 1.0)?;
                validation::validate_range("y", *y, 0.0, 1.0)?;
            }
            Command::Export { out } => validation::validate_path("out", out)?,
            Command::List => {}
        }
        if let Command::Grade { guess, .. } = &self.command {
            validation::validate_non_empty_string("guess", guess)?;
        }
        Ok(())
    }
}

use crate::adapters::source::{BUNDLED_PREFIX, DEFAULT_BUNDLED_CATALOG};
use crate::core::matcher::DEFAULT_TOLERANCE;
use crate::utils::error::{QuizError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// File path, or `bundled:<name>` for a catalog compiled into the binary.
    pub source: String,
    pub base_path: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: format!("{}{}", BUNDLED_PREFIX, DEFAULT_BUNDLED_CATALOG),
            base_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl QuizConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuizError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| QuizError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn source(&self) -> &str {
        &self.catalog.source
    }

    pub fn base_path(&self) -> &str {
        self.catalog.base_path.as_deref().unwrap_or(".")
    }

    pub fn tolerance(&self) -> f64 {
        self.grading.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for QuizConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("catalog.source", &self.catalog.source)?;
        if !self.catalog.source.starts_with(BUNDLED_PREFIX) {
            validation::validate_path("catalog.source", &self.catalog.source)?;
        }
        if let Some(base_path) = &self.catalog.base_path {
            validation::validate_path("catalog.base_path", base_path)?;
        }
        validation::validate_tolerance("grading.tolerance", self.tolerance())?;
        validation::validate_log_level("logging.level", self.log_level())?;
        Ok(())
    }
}

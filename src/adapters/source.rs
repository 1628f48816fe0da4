use crate::domain::ports::SourceLoader;
use crate::utils::error::{QuizError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const BUNDLED_PREFIX: &str = "bundled:";
pub const DEFAULT_BUNDLED_CATALOG: &str = "ear_points";

const EAR_POINTS_CSV: &str = include_str!("../../assets/ear_points.csv");

fn not_found(source_id: &str) -> QuizError {
    QuizError::SourceRead {
        source_id: source_id.to_string(),
        source: std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("No catalog named '{}'", source_id),
        ),
    }
}

/// Reads catalogs from files, resolving relative ids against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    base_path: PathBuf,
}

impl LocalSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, source_id: &str) -> PathBuf {
        let path = Path::new(source_id);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl SourceLoader for LocalSource {
    async fn load_raw_text(&self, source_id: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(source_id);
        tracing::debug!("Reading catalog file {}", full_path.display());

        tokio::fs::read(&full_path)
            .await
            .map_err(|source| QuizError::SourceRead {
                source_id: source_id.to_string(),
                source,
            })
    }
}

/// Catalogs compiled into the binary or registered in memory.
#[derive(Debug, Clone)]
pub struct BundledSource {
    catalogs: HashMap<String, Vec<u8>>,
}

impl BundledSource {
    pub fn empty() -> Self {
        Self {
            catalogs: HashMap::new(),
        }
    }

    pub fn with_catalog(mut self, name: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        self.catalogs.insert(name.into(), text.into());
        self
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for BundledSource {
    fn default() -> Self {
        Self::empty().with_catalog(DEFAULT_BUNDLED_CATALOG, EAR_POINTS_CSV)
    }
}

impl SourceLoader for BundledSource {
    async fn load_raw_text(&self, source_id: &str) -> Result<Vec<u8>> {
        let name = source_id.strip_prefix(BUNDLED_PREFIX).unwrap_or(source_id);
        self.catalogs
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(source_id))
    }
}

/// Where a catalog comes from: a bundled name or a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Bundled(String),
    File(PathBuf),
}

impl SourceSpec {
    pub fn parse(source: &str) -> Self {
        match source.strip_prefix(BUNDLED_PREFIX) {
            Some(name) => SourceSpec::Bundled(name.to_string()),
            None => SourceSpec::File(PathBuf::from(source)),
        }
    }

    pub fn id(&self) -> String {
        match self {
            SourceSpec::Bundled(name) => format!("{}{}", BUNDLED_PREFIX, name),
            SourceSpec::File(path) => path.display().to_string(),
        }
    }
}

/// Dispatches to a bundled or file source based on the id prefix.
#[derive(Debug, Clone, Default)]
pub struct AnySource {
    pub local: LocalSource,
    pub bundled: BundledSource,
}

impl SourceLoader for AnySource {
    async fn load_raw_text(&self, source_id: &str) -> Result<Vec<u8>> {
        match SourceSpec::parse(source_id) {
            SourceSpec::Bundled(_) => self.bundled.load_raw_text(source_id).await,
            SourceSpec::File(_) => self.local.load_raw_text(source_id).await,
        }
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkemiError};
use crate::search::Tokenization;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl Config {
    /// Defaults, then either the explicit file (`--config` / `SKEMI_CONFIG`)
    /// or global + project files, then `SKEMI_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKEMI_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides(&|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Parse a complete config document; absent keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| SkemiError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|err| SkemiError::Config(format!("serialize config: {err}")))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let path = dirs::config_dir()
            .ok_or_else(|| SkemiError::MissingConfig("config directory not found".to_string()))?
            .join("skemi/config.toml");
        Self::load_patch(&path)
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkemiError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SkemiError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.corpus {
            self.corpus.merge(patch);
        }
        if let Some(patch) = patch.embedding {
            self.embedding.merge(patch);
        }
        if let Some(patch) = patch.matching {
            self.matching.merge(patch);
        }
    }

    /// Apply `SKEMI_<SECTION>_<KEY>` overrides read through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("SKEMI_CORPUS_SOURCE") {
            self.corpus.source = value;
        }
        if let Some(value) = env_u64(lookup, "SKEMI_CORPUS_TIMEOUT_SECS")? {
            self.corpus.timeout_secs = value;
        }

        if let Some(value) = lookup("SKEMI_EMBEDDING_TOKENIZATION") {
            self.embedding.tokenization = value.parse()?;
        }

        if let Some(value) = env_usize(lookup, "SKEMI_MATCHING_TOP_K")? {
            self.matching.top_k = value;
        }
        if let Some(value) = env_bool(lookup, "SKEMI_MATCHING_PARALLEL") {
            self.matching.parallel = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// File path or http(s) URL of the `{ "topics": [...] }` document.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            source: "Train/VectorData.json".to_string(),
            timeout_secs: 10,
        }
    }
}

impl CorpusConfig {
    fn merge(&mut self, patch: CorpusPatch) {
        if let Some(value) = patch.source {
            self.source = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub tokenization: Tokenization,
}

impl EmbeddingConfig {
    fn merge(&mut self, patch: EmbeddingPatch) {
        if let Some(value) = patch.tokenization {
            self.tokenization = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Topics listed per query when `--top` is not given.
    #[serde(default)]
    pub top_k: usize,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_k: 1,
            parallel: true,
        }
    }
}

impl MatchingConfig {
    fn merge(&mut self, patch: MatchingPatch) {
        if let Some(value) = patch.top_k {
            self.top_k = value;
        }
        if let Some(value) = patch.parallel {
            self.parallel = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub corpus: Option<CorpusPatch>,
    pub embedding: Option<EmbeddingPatch>,
    pub matching: Option<MatchingPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CorpusPatch {
    pub source: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EmbeddingPatch {
    pub tokenization: Option<Tokenization>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MatchingPatch {
    pub top_k: Option<usize>,
    pub parallel: Option<bool>,
}

fn env_bool(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_u64(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match lookup(key) {
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| SkemiError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_usize(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<usize>> {
    match lookup(key) {
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| SkemiError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

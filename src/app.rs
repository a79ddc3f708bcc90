use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::corpus::{CorpusLoader, CorpusSource, LoadedCorpus};
use crate::error::{Result, SkemiError};
use crate::search::{HashEmbedder, TopicMatcher};

pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var("SKEMI_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(|| default_config_path(&root));
        let config = Config::load(cli.config.as_deref(), &root)?;

        Ok(Self {
            root,
            config_path,
            config,
            robot_mode: cli.robot,
        })
    }

    pub const fn embedder(&self) -> HashEmbedder {
        HashEmbedder::new(self.config.embedding.tokenization)
    }

    pub const fn matcher(&self) -> TopicMatcher {
        TopicMatcher::new(self.embedder()).with_parallel(self.config.matching.parallel)
    }

    /// `explicit` (a `--corpus` flag) wins over the configured source.
    pub fn corpus_source(&self, explicit: Option<&str>) -> CorpusSource {
        CorpusSource::parse(explicit.unwrap_or(&self.config.corpus.source))
    }

    pub fn load_corpus(&self, explicit: Option<&str>) -> Result<LoadedCorpus> {
        let source = self.corpus_source(explicit);
        CorpusLoader::new(Duration::from_secs(self.config.corpus.timeout_secs)).load(&source)
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("SKEMI_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".skemi") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SkemiError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("skemi"))
    }
}

fn default_config_path(root: &Path) -> PathBuf {
    if root.ends_with(".skemi") {
        root.join("config.toml")
    } else {
        dirs::config_dir()
            .unwrap_or_else(|| root.to_path_buf())
            .join("skemi/config.toml")
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_dir())
}

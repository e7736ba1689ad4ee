use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    CardError,
    Side,
};

pub const CONFIG_FILE: &str = "cards.hjson";

/// External program that turns snippet source into the script embedded in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Where the build reads its inputs and writes its outputs.
///
/// Directories are relative to `root` unless absolute. Every field has a default, so a project
/// without a `cards.hjson` builds from the conventional layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    #[serde(skip)]
    pub root: PathBuf,
    pub templates_dir: PathBuf,
    pub snippets_dir: PathBuf,
    pub output_dir: PathBuf,
    pub shared_snippet: String,
    pub snippet_extension: String,
    /// `None` embeds snippets verbatim.
    pub compiler: Option<CommandSpec>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            templates_dir: PathBuf::from("templates"),
            snippets_dir: PathBuf::from("snippets"),
            output_dir: PathBuf::from("code_cards"),
            shared_snippet: "common.js".to_string(),
            snippet_extension: "js".to_string(),
            compiler: None,
        }
    }
}

impl BuildConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), ..Self::default() }
    }

    /// Loads `config_path`, or `<root>/cards.hjson` when no path is given.
    ///
    /// An explicitly named file must exist; the conventional one is optional.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, CardError> {
        let (path, required) = match config_path {
            Some(path) => (path.to_path_buf(), true),
            None => (root.join(CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(CardError::FailedToRead {
                    path: path.display().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
            return Ok(Self::with_root(root));
        }

        let content = fs::read_to_string(&path).map_err(|e| CardError::FailedToRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut config = Self::parse(&content)?;
        config.root = root.to_path_buf();
        tracing::debug!("Loaded build config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, CardError> {
        Ok(serde_hjson::from_str::<BuildConfig>(content)?)
    }

    pub fn skeleton_path(&self, side: Side) -> PathBuf {
        self.root
            .join(&self.templates_dir)
            .join(format!("{}_template_base.html", side.file_stem()))
    }

    pub fn shared_snippet_path(&self) -> PathBuf {
        self.root.join(&self.snippets_dir).join(&self.shared_snippet)
    }

    pub fn side_snippet_path(&self, side: Side) -> PathBuf {
        self.root
            .join(&self.snippets_dir)
            .join(format!("{}_template.{}", side.file_stem(), self.snippet_extension))
    }

    pub fn output_path(&self, side: Side) -> PathBuf {
        self.root.join(&self.output_dir).join(format!("{}_template.html", side.file_stem()))
    }
}

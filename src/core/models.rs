use std::{
    fmt,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

/// One of the two rendered views of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Question,
    Answer,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Question, Side::Answer];

    /// Anki calls the two templates "front" and "back"; file names follow that.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Side::Question => "front",
            Side::Answer => "back",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Question => "question",
            Side::Answer => "answer",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetKind {
    Shared,
    SideSpecific(Side),
}

/// A unit of behavior source that gets compiled into a finished document.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub kind: SnippetKind,
    pub origin: PathBuf,
    pub source: String,
}

impl Snippet {
    pub fn new(kind: SnippetKind, origin: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self { kind, origin: origin.into(), source: source.into() }
    }

    pub fn display_name(&self) -> String {
        self.origin
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| match self.kind {
                SnippetKind::Shared => "shared snippet".to_string(),
                SnippetKind::SideSpecific(side) => format!("{} snippet", side),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinishedDocument {
    pub side: Side,
    pub output_path: PathBuf,
    pub content: String,
}

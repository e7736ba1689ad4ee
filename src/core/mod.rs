pub mod config;
pub mod errors;
pub mod models;

pub use config::{
    BuildConfig,
    CommandSpec,
};
pub use errors::CardError;
pub use models::{
    FinishedDocument,
    Side,
    Snippet,
    SnippetKind,
};

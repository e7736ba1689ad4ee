use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HJson error: {0}")]
    HJson(#[from] serde_hjson::Error),

    #[error("Failed to read {path}: {reason}")]
    FailedToRead { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    FailedToWrite { path: String, reason: String },

    #[error("Skeleton is missing the {0} marker")]
    MissingMarker(&'static str),

    #[error("Skeleton markers overlap")]
    OverlappingMarkers,

    #[error("Failed to compile {snippet}: {reason}")]
    Compile { snippet: String, reason: String },

    #[error("The {0} side has already been activated")]
    SideAlreadyActive(&'static str),
}

impl From<std::io::Error> for CardError {
    fn from(error: std::io::Error) -> Self {
        CardError::Io(Box::new(error))
    }
}

//! Carries the question side's captured answers over to the answer side.

use std::{
    cell::RefCell,
    path::{
        Path,
        PathBuf,
    },
};

use super::capture::{
    AnswerMap,
    CapturedAnswers,
};
use crate::{
    core::CardError,
    persistence,
};

pub const ANSWERS_FILE: &str = "submitted_answers.json";

pub trait AnswerStore {
    /// Called when capture starts and again after every edit.
    fn stash(&self, answers: &CapturedAnswers) -> Result<(), CardError>;

    fn retrieve(&self) -> Result<Option<AnswerMap>, CardError>;

    fn clear(&self) -> Result<(), CardError>;
}

/// Keeps the live handle, for hosts that render both sides in the same process.
#[derive(Debug, Default)]
pub struct SessionStore {
    answers: RefCell<Option<CapturedAnswers>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnswerStore for SessionStore {
    fn stash(&self, answers: &CapturedAnswers) -> Result<(), CardError> {
        *self.answers.borrow_mut() = Some(answers.clone());
        Ok(())
    }

    fn retrieve(&self) -> Result<Option<AnswerMap>, CardError> {
        Ok(self.answers.borrow().as_ref().map(CapturedAnswers::snapshot))
    }

    fn clear(&self) -> Result<(), CardError> {
        self.answers.borrow_mut().take();
        Ok(())
    }
}

/// Persists a JSON snapshot, for hosts that tear the question document down before the answer
/// side is rendered.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stores under [`ANSWERS_FILE`] in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(ANSWERS_FILE))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl AnswerStore for JsonFileStore {
    fn stash(&self, answers: &CapturedAnswers) -> Result<(), CardError> {
        persistence::save_json(&answers.snapshot(), &self.path)
    }

    fn retrieve(&self) -> Result<Option<AnswerMap>, CardError> {
        persistence::load_json(&self.path)
    }

    fn clear(&self) -> Result<(), CardError> {
        persistence::delete_data_file(&self.path)
    }
}

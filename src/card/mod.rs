//! Runtime behavior embedded in each card side: tag labels, answer capture, grading.

pub mod capture;
pub mod handoff;
pub mod normalize;
pub mod reveal;
pub mod sides;
pub mod tags;

pub use capture::{
    capture,
    AnswerMap,
    CapturedAnswers,
};
pub use handoff::{
    AnswerStore,
    JsonFileStore,
    SessionStore,
};
pub use normalize::normalize;
pub use reveal::{
    reveal,
    RevealSummary,
};
pub use sides::{
    ActiveMode,
    SideSession,
    SideState,
};
pub use tags::{
    display_tags,
    prettify,
    render_tags,
    set_link_text,
};

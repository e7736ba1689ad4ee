pub mod card;
pub mod composer;
pub mod core;
pub mod page;
pub mod persistence;

pub use crate::core::{
    BuildConfig,
    CardError,
    FinishedDocument,
    Side,
};

//! Learning - failure diagnosis for the learning pipeline.
//!
//! The classifier turns a failed tool call into a [`ClassifiedError`] whose
//! [`ErrorKind`] decides which learning artifact the failure improves.

mod classifier;
mod error_kind;

pub use classifier::{
    classify, classify_message, summarize_input, truncate_chars, ClassifiedError,
    SUMMARY_MAX_CHARS,
};
pub use error_kind::ErrorKind;

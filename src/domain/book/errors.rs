//! Book Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("{0} number must be positive")]
    InvalidNumber(&'static str),

    #[error("paragraph text cannot be empty")]
    EmptyParagraph,

    #[error("chapter has no paragraphs: {0}")]
    EmptyChapter(String),
}

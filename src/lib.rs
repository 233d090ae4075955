pub mod config;
pub mod docx;
pub mod error;
pub mod extract;
pub mod preview;
pub mod progress;

pub use error::{Error, Result};
pub use extract::{extract, ExtractedElement};

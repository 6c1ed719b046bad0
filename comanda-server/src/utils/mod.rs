//! Cross-cutting utilities: errors, responses, logging

mod error;
mod logger;

pub use error::{ok, ok_with_message, AppError, AppResponse, AppResult};
pub use logger::{init_logger, init_logger_with_file};

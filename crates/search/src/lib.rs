//! sixres search crate - combo continuation search, foresight and bot glue.

mod bot;
mod combo;
mod config;
mod foresight;

pub use bot::{Bot, Turn};
pub use combo::{ComboSearch, ContinuationPly, Decision};
pub use config::{ConfigError, SearchConfig, Style, ValidationError};
pub use foresight::{ForesightEvaluator, Support};

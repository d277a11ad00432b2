pub mod api;
pub mod cli;
pub mod combo;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod session;

pub use error::{NycError, Result};
pub use models::{FilterState, Macro, MenuItem};
pub use session::{ComboSession, Mode};

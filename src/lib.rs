//! `CityScout` - Pittsburgh points of interest at the terminal
//!
//! Fetches restaurants, public art and events from their sources, normalizes
//! them into typed records, and lets the user filter each dataset
//! interactively, showing the matches as a map or a table.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod predicate;
pub mod present;
pub mod prompt;
pub mod query;
pub mod session;
pub mod sources;

// Re-export core types for public API
pub use self::config::CityScoutConfig;
pub use error::CityScoutError;
pub use models::{ArtRecord, Dataset, EventRecord, RestaurantRecord};
pub use present::{ConsolePresenter, Presenter, View};
pub use prompt::{ConsolePrompter, Prompted, Prompter};
pub use query::{LoopOutcome, QueryLoop};
pub use session::{Session, Sources};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CityScoutError>;

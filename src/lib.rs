// Kumite Desk - Core Library
// Exposes all modules for use in the desk TUI, the web server, and tests

pub mod bracket;
pub mod entities;
pub mod scoring;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use bracket::{Bracket, BracketEdge, BracketNode};
pub use entities::{
    Athlete, AthleteRegistry, Belt, Category, CategoryKind, CategoryRegistry, Gender,
    RegistrySummary, COUNTRY_OPTIONS,
};
pub use scoring::{Competitor, CompetitorSlot, CounterKind, ScorePanel};
pub use session::{SessionError, SessionGuard, SessionUser};
pub use validation::{AthleteForm, ValidationError, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

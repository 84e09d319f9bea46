//! Chroniclr Engine library.
//!
//! Server-side code for the Chroniclr session assistant.
//!
//! ## Structure
//!
//! - `use_cases/` - Calendar, event, ticker, and lifecycle operations
//! - `infrastructure/` - Ports and their SQLite adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;

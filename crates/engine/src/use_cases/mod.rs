//! Use cases - orchestration over the ports.
//!
//! Each module covers one area of the assistant; use cases hold the repo
//! ports they need and expose a single `execute`.

pub mod calendar;
pub mod events;
pub mod management;
pub mod tickers;

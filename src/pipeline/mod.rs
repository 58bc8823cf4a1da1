//! The pure ingestion pipeline: rows → records → filtered, grouped views.
//!
//! Everything here is side-effect free; the client feeds it fetched rows and
//! the state reducer recomputes derived views from it on demand.

pub mod filter;
pub mod group;
pub mod ident;
pub mod parse;

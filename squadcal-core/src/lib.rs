//! Core of the squadcal team calendar.
//!
//! - `compose` builds new training sessions and games from form input
//! - `filter`, `search` and `visibility` drive the calendar's filter panel
//! - `presenter` formats event details and forwards event actions
//! - `roster` normalizes athlete records handed to the creation drawers
//!
//! Nothing here does I/O except `config` and the JSON loaders, and nothing
//! holds the event collection: callers own it and pass it in.

pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod filter;
pub mod presenter;
pub mod roster;
pub mod search;
pub mod visibility;

pub use event::*;

//! kuku-core: times-table drill engine.
//!
//! This crate holds everything below the terminal: the multiplication fact
//! table and its validator, level catalogs, problem generation, the drill
//! session and its countdown timer, and result scoring.

pub mod error;
pub mod facts;
pub mod generator;
pub mod levels;
pub mod model;
pub mod scoring;
pub mod session;
pub mod time_format;
pub mod timer;
pub mod traits;
pub mod validator;

//! Browser-independent pieces of the emotion detection dashboard: the wire
//! models, response interpretation, job tracking and table derivation.

pub mod config;
pub mod error;
pub mod job;
pub mod models;
pub mod refresh;
pub mod responses;
pub mod status;
pub mod table;
pub mod tracker;
pub mod utils;

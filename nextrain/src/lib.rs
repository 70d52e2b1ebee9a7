//! Live train departures between two stations.
//!
//! A command-line client for the Transport API: it answers "what leaves
//! here soon that also calls there?" with one line per departure.

pub mod credentials;
pub mod domain;
pub mod format;
pub mod transport_api;

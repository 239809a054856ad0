//! Transcelerator core: checking-question identity and key-term rules for a
//! Bible-translation comprehension-question tool.
//!
//! - `question`: question keys (ranged / unranged) and identity matching
//! - `key_terms`: term-name normalization, rule lookup, occurrences, renderings
//! - `sections`, `translations`: the catalog and translator data built on them
//! - `routes`: a small Axum JSON API over the loaded project

pub mod config;
pub mod error;
pub mod key_terms;
pub mod logic;
pub mod protocol;
pub mod question;
pub mod reference;
pub mod routes;
pub mod sections;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod translations;
pub mod util;

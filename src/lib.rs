//! subpick - subtitle stream selection for burn-in workflows
//!
//! Picks one subtitle stream from a media file's stream list by codec,
//! language and prioritized title keywords, with an optional positional
//! fallback, and maps it to the subtitle-relative index the encoder's
//! `subtitles` filter expects.
//!
//! # Architecture
//!
//! - `domain`: stream model, selection and index mapping rules, filename
//!   normalization and burn planning. Pure and synchronous.
//! - `ports`: traits for probing and job logging.
//! - `adapters`: ffprobe, captured JSON, TOML config and log sinks.
//! - `app`: interactors for single-file, burn and batch use cases.
//! - `cli`: clap front end.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod utils;

pub use domain::errors::DomainError;
pub use domain::model::{
    DerivedIndices, FallbackIndex, MatchReason, NoMatchReason, SelectionPolicy, SelectionResult,
    StreamRecord, SubtitleSelection,
};
pub use domain::rules::{IndexMapper, StreamSelector};

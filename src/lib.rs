// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::config::RhymeConfig;
pub use crate::core::engine::RhymeEngine;
pub use crate::core::types::{
    DepthOption, Document, DocumentRef, MatchCandidate, PhoneticForm, QueryOutcome, RhymeGroup,
    RhymeResult,
};
pub use crate::error::{Result, RhymeError};

//! Core domain models for Pipeline
//!
//! This module defines the data structures that represent a pipeline
//! being edited: ordered stages of ordered jobs.

pub mod config;
pub mod job;
pub mod pipeline;
pub mod seed;
pub mod stage;

pub use job::*;
pub use pipeline::*;
pub use stage::*;

//! pipeline-editor - In-memory editing model for CI/CD pipelines

pub mod cli;
pub mod core;
pub mod editor;

// Re-export commonly used types
pub use crate::core::{Job, JobType, Pipeline, Stage};
pub use crate::core::config::{EditorConfig, IdStyle, PipelineConfig};
pub use editor::{resolve, EditEvent, EditorSession, PipelineStore, Selection};

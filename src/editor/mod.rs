//! Pipeline editing: store, selection, session and panel rules

pub mod ids;
pub mod panel;
pub mod selection;
pub mod session;
pub mod store;

pub use ids::{IdSource, SequentialIds, UuidIds};
pub use selection::{resolve, Selection};
pub use session::{EditEvent, EditSummary, EditorSession};
pub use store::{EditorDefaults, PipelineStore};

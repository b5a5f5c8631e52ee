//! Linework Core Library
//!
//! Document model for a small line-and-rectangle drawing editor: shapes kept
//! in groups, rectangle selection, draw/select/move gestures, a native text
//! format and XML export. Hosts drive everything through [`Canvas`].

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::{Canvas, ChangeSet, Document, EditError};
pub use config::{ConfigError, EditorConfig, Stroke};
pub use error::{Error, Result};
pub use geometry::BoundingBox;
pub use render::RenderIds;
pub use selection::Selection;
pub use shapes::{CornerStyle, Group, GroupId, Shape, ShapeId, ShapeKind, ShapeTrait};
pub use storage::{StorageError, StorageResult};
pub use tools::{ToolKind, ToolManager, ToolOutcome, ToolState};

//! Domain logic - pure rules for turning user input into a publish job

pub mod coordinates;
pub mod job;
pub mod module_path;
pub mod reference;

pub use coordinates::{ArtifactCoordinates, SourceLocation};
pub use job::PublishJob;
pub use module_path::ModulePath;
pub use reference::Reference;

//! User interface module - terminal output for the publish workflow.

pub mod formatter;

pub use formatter::{
    display_error, display_plan, display_publishing, display_status, display_success,
    publishing_line,
};

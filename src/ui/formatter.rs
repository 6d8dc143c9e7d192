//! Pure formatting functions for UI output.
//!
//! Everything a user or a wrapping script reads goes to standard output. Styling
//! is dropped automatically when stdout is not a terminal.

use console::style;

use crate::domain::{ArtifactCoordinates, PublishJob};
use crate::process::Invocation;

/// Print a fatal diagnostic in red.
pub fn display_error(message: &str) {
    println!("{}", style(message).red());
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// The line announcing which artifact goes where.
pub fn publishing_line(coordinates: &ArtifactCoordinates, repository_url: &str) -> String {
    format!("Publishing \"{}\" to {}", coordinates, repository_url)
}

/// Print the publishing announcement verbatim.
pub fn display_publishing(coordinates: &ArtifactCoordinates, repository_url: &str) {
    println!("{}", publishing_line(coordinates, repository_url));
}

/// Display what a dry run would do.
///
/// # Arguments
/// * `job` - The resolved job
/// * `workspace` - Where the checkout would live
/// * `commands` - External commands in the order they would run
pub fn display_plan(job: &PublishJob, workspace: &std::path::Path, commands: &[Invocation]) {
    println!("\n{}", style("Dry run:").bold());
    println!("  Source:    {} ({})", job.url, job.reference);
    println!("  Checkout:  {}", job.checkout_target());
    println!("  Module:    {}", job.module);
    println!("  Workspace: {}", workspace.display());
    if let Some(version) = &job.gradle_version {
        println!("  Gradle:    wrapper {}", version);
    }

    println!("\n{}", style("Commands:").underlined());
    for (i, command) in commands.iter().enumerate() {
        println!("  {}. {}", i + 1, command);
    }
}

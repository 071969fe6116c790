//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, white for text
//! - **Standardized spacing**: Newline before and after messages
//! - **Pipe-friendly selections**: Plain paths go to stdout without decoration

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow(), message.white());
}

/// Formats and prints a success message
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

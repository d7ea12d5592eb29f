//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use studyhall_catalog::{category_label, ModuleDescriptor};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// One module line: completion mark, id, name and summary
pub fn module_line(module: &ModuleDescriptor, completed: bool) {
    let mark = if completed {
        "✓".green().to_string()
    } else {
        "·".dimmed().to_string()
    };
    println!(
        "  {} {:<28} {:<26} {}",
        mark,
        module.id,
        module.name.bold(),
        module.description.dimmed()
    );
}

/// Full detail card for one module
pub fn module_card(module: &ModuleDescriptor, completed: bool, prerequisites: &[ModuleDescriptor]) {
    Status::header(&module.name);
    println!("  {:<14} {}", "id".dimmed(), module.id);
    println!("  {:<14} {}", "level".dimmed(), module.level);
    println!("  {:<14} {}", "category".dimmed(), category_label(module.category));
    println!("  {:<14} {}", "launch target".dimmed(), module.launch_target);
    println!(
        "  {:<14} {}",
        "completed".dimmed(),
        if completed { "yes".green().to_string() } else { "no".to_string() }
    );
    println!();
    println!("  {}", module.description);
    if !module.long_description.is_empty() {
        println!();
        println!("  {}", module.long_description);
    }
    if !prerequisites.is_empty() {
        println!();
        println!("  {}", "Prerequisites".bold());
        for prerequisite in prerequisites {
            println!("    - {} ({})", prerequisite.name, prerequisite.id);
        }
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Render a completion ratio as a percentage
pub fn format_percent(done: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{}%", done * 100 / total)
}

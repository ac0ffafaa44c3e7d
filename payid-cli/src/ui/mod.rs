//! Terminal UI utilities

use colored::Colorize;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print a section header
pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print a separator line
pub fn separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// Print JSON prettily
pub fn json<T: serde::Serialize>(value: &T) {
    if let Ok(pretty) = serde_json::to_string_pretty(value) {
        println!("{}", pretty);
    }
}

/// Print one address as an indented block
pub fn address(index: usize, address: &payid_lib::Address) {
    let env = address.environment.as_deref().unwrap_or("-");
    println!(
        "  {} {} {}",
        format!("[{}]", index).dimmed(),
        address.payment_network.bold(),
        env
    );
    println!("      {}", address.details);
    if let Some(sig) = &address.identity_key_signature {
        println!("      {} {}", "signed:".dimmed(), sig);
    }
}

//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for messages only shown with `--verbose`
//! - an attribute form of both macros for structured `key=value` context
//!
//! # Example
//!
//! ```ignore
//! // Simple logging
//! log!("assets"; "copied {} files", count);
//!
//! // Message with attributes
//! log!("assets"; "copying resources"; count = assets.len());
//! debug!("assets"; "copying resource"; source = src.display(), target = dst.display());
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// log!("module"; "message"; key = value, other = value);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {{
        $crate::logger::log_with(
            $module,
            &format!($fmt $(, $arg)*),
            &[$((stringify!($key), $value.to_string())),+],
        )
    }};
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// debug!("module"; "debug info"; key = value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log_with(
                $module,
                &format!($fmt $(, $arg)*),
                &[$((stringify!($key), $value.to_string())),+],
            )
        }
    }};
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    log_with(module, message, &[]);
}

/// Log a message followed by `key=value` attributes.
///
/// Logs go to stderr; stdout carries command output only.
pub fn log_with(module: &str, message: &str, attrs: &[(&str, String)]) {
    write_log(&mut stderr().lock(), module, message, attrs).ok();
}

fn write_log<W: Write>(
    out: &mut W,
    module: &str,
    message: &str,
    attrs: &[(&str, String)],
) -> std::io::Result<()> {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);
    let line = format_line(message, attrs);

    execute!(out, Clear(ClearType::UntilNewLine))?;
    writeln!(out, "{prefix} {line}")?;
    out.flush()
}

/// Join a message and its attributes into one line.
fn format_line(message: &str, attrs: &[(&str, String)]) -> String {
    if attrs.is_empty() {
        return message.to_string();
    }

    let mut line = message.to_string();
    for (key, value) in attrs {
        line.push(' ');
        line.push_str(&format!("{key}={}", quote_value(value)).dimmed().to_string());
    }
    line
}

/// Quote attribute values containing whitespace so lines stay parseable.
fn quote_value(value: &str) -> String {
    if value.is_empty() || value.contains(char::is_whitespace) {
        format!("{value:?}")
    } else {
        value.to_string()
    }
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "find" => prefix.bright_blue().bold().to_string(),
        "clean" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

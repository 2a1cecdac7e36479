//! Logging utilities with colored module prefixes.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for diagnostics, silent unless `--debug` was passed
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "compiling {} files", count);
//! debug!("config"; "expanded {} glob patterns", patterns.len());
//! ```

use colored::{ColoredString, Colorize};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Whether `debug!` output is enabled (set once from the CLI).
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable `debug!` output for the rest of the process.
pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Whether `debug!` output is currently enabled.
pub fn debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a diagnostic message, shown only when `--debug` is active.
///
/// Arguments are not formatted unless debug output is enabled.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::debug_enabled() {
            $crate::logger::debug_log($module, &format!($($arg)*));
        }
    }};
}

/// Log a message with a colored module prefix.
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Log a diagnostic message if debug output is enabled.
#[inline]
pub fn debug_log(module: &str, message: &str) {
    if DEBUG_ENABLED.load(Ordering::Relaxed) {
        let prefix = format!("[{module}]").dimmed();
        let mut stdout = stdout().lock();
        writeln!(stdout, "{prefix} {message}").ok();
        stdout.flush().ok();
    }
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # Command Dispatcher
//!
//! The single entry point every front-end calls with whatever the user
//! typed. It decides what the text means and always answers with a
//! [`DispatchResult`]; printer faults are reported in the result, never
//! returned as errors.
//!
//! ## Parse Order
//!
//! First match wins:
//!
//! | Input | Action |
//! |-------|--------|
//! | empty / whitespace | print a blank line |
//! | `cut` | feed bottom margin and cut |
//! | `exit`, `quit` | tell the front-end to stop, no printing |
//! | `help`, `shortcuts` | list keywords, no printing |
//! | a shortcut keyword (`!` optional) | print the shortcut |
//! | anything else | print it, word-wrapped |

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, TyperError};
use crate::printer::Printer;
use crate::shortcuts::{self, ShortcutRegistry};

/// Outcome of one dispatch, shown to the user by the front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    /// Something went to the printer.
    pub printed: bool,
    /// Feedback for the user.
    pub message: String,
    /// Something went wrong; `message` says what.
    pub error: bool,
    /// The user asked to leave.
    pub is_exit: bool,
}

impl DispatchResult {
    fn printed(message: impl Into<String>) -> Self {
        Self {
            printed: true,
            message: message.into(),
            ..Default::default()
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    fn failed(err: &TyperError) -> Self {
        Self {
            message: format!("Printer error: {}", err),
            error: true,
            ..Default::default()
        }
    }

    fn exit() -> Self {
        Self {
            message: "Goodbye!".to_string(),
            is_exit: true,
            ..Default::default()
        }
    }
}

/// Built-in command words, shown after the shortcut list in `help`.
pub const BUILTIN_COMMANDS: &[&str] = &["cut", "exit", "help"];

/// Printer plus shortcuts, bundled for front-ends.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    printer: Arc<Printer>,
    registry: Arc<ShortcutRegistry>,
}

impl Dispatcher {
    pub fn new(printer: Arc<Printer>, registry: Arc<ShortcutRegistry>) -> Self {
        Self { printer, registry }
    }

    pub fn printer(&self) -> &Arc<Printer> {
        &self.printer
    }

    pub fn registry(&self) -> &Arc<ShortcutRegistry> {
        &self.registry
    }

    /// Parse and act on `text`. May block while the printer reconnects.
    pub fn dispatch(&self, text: &str) -> DispatchResult {
        dispatch(text, &self.printer, &self.registry)
    }
}

/// Parse and act on `text` against an explicit printer and registry.
pub fn dispatch(text: &str, printer: &Printer, registry: &ShortcutRegistry) -> DispatchResult {
    let input = text.trim();
    let lower = input.to_lowercase();

    if input.is_empty() {
        debug!("dispatch: blank line");
        return report(printer.print_text("", false), "(blank line printed)");
    }

    match lower.as_str() {
        "cut" => {
            debug!("dispatch: cut");
            let lines = printer.config().bottom_margin_lines;
            return report(printer.cut(Some(lines)), "Paper cut.");
        }
        "exit" | "quit" => return DispatchResult::exit(),
        "help" | "shortcuts" => return DispatchResult::info(help_text(registry)),
        _ => {}
    }

    if let Some(shortcut) = registry.resolve(&lower) {
        let name = shortcuts::normalize(&lower);
        debug!(shortcut = %name, raw = shortcut.raw, "dispatch: shortcut");
        return report(
            printer.print_text(&shortcut.text, shortcut.raw),
            format!("Shortcut '{}' printed.", name),
        );
    }

    debug!(len = input.len(), "dispatch: plain text");
    report(printer.print_text(input, false), "Printed.")
}

/// Listing shown for `help`.
pub fn help_text(registry: &ShortcutRegistry) -> String {
    let mut lines = vec!["Available shortcuts:".to_string()];
    lines.extend(registry.list_shortcuts().iter().map(|name| format!("  !{}", name)));
    lines.push(String::new());
    lines.push(format!("Commands: {}", BUILTIN_COMMANDS.join(", ")));
    lines.join("\n")
}

fn report(outcome: Result<()>, success: impl Into<String>) -> DispatchResult {
    match outcome {
        Ok(()) => DispatchResult::printed(success),
        Err(e) => {
            warn!(error = %e, "Print failed");
            DispatchResult::failed(&e)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

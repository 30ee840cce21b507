//! Console output for editing sessions.
//!
//! # Output Format
//!
//! ## Session events
//!
//! Every line leads with what happened, with the image size or the reason as
//! indented context:
//!
//! ```text
//! Set Brightness To 40
//!     Image: 640x480
//! Undo Action
//!     Image: 640x480
//! ! There are no more undo actions.
//! ? make it pop
//!     unrecognized phrase: make it pop
//! ```
//!
//! ## Summary
//!
//! ```text
//! Session: 2 applied, 0 ignored, 1 refused undo
//!     History: 2 snapshots
//!     Saved: edited.png (640x480)
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure, with no I/O.

use crate::session::{SessionEvent, SessionStats};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn dimensions(width: u32, height: u32) -> String {
    format!("{width}x{height}")
}

/// Format a single session event as display lines.
pub fn format_session_event(event: &SessionEvent) -> Vec<String> {
    match event {
        SessionEvent::Rendered {
            description,
            width,
            height,
        } => vec![
            description.clone(),
            format!("{}Image: {}", indent(1), dimensions(*width, *height)),
        ],
        SessionEvent::Notice { message } => vec![format!("! {message}")],
        SessionEvent::Rejected { text, reason } => {
            vec![format!("? {text}"), format!("{}{reason}", indent(1))]
        }
    }
}

pub fn print_session_event(event: &SessionEvent) {
    for line in format_session_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-session summary.
///
/// `saved` is the output path and final dimensions, when the result was
/// written.
pub fn format_summary(
    stats: &SessionStats,
    history_len: usize,
    saved: Option<(&Path, (u32, u32))>,
) -> Vec<String> {
    let mut lines = vec![format!("Session: {}", stats)];
    let noun = if history_len == 1 {
        "snapshot"
    } else {
        "snapshots"
    };
    lines.push(format!("{}History: {} {}", indent(1), history_len, noun));
    if let Some((path, (w, h))) = saved {
        lines.push(format!(
            "{}Saved: {} ({})",
            indent(1),
            path.display(),
            dimensions(w, h)
        ));
    }
    lines
}

pub fn print_summary(stats: &SessionStats, history_len: usize, saved: Option<(&Path, (u32, u32))>) {
    for line in format_summary(stats, history_len, saved) {
        println!("{}", line);
    }
}

/// Format the phrase vocabulary and supported file types.
pub fn format_vocabulary(phrases: &[&str], extensions: &[&str]) -> Vec<String> {
    let mut lines = vec!["Phrases".to_string()];
    lines.extend(phrases.iter().map(|p| format!("{}{}", indent(1), p)));
    lines.push(String::new());
    lines.push("Image formats".to_string());
    lines.push(format!("{}{}", indent(1), extensions.join(", ")));
    lines
}

pub fn print_vocabulary(phrases: &[&str], extensions: &[&str]) {
    for line in format_vocabulary(phrases, extensions) {
        println!("{}", line);
    }
}

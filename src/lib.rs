//! # Vox Edit
//!
//! A phrase-driven image editor. Short spoken (or typed) phrases such as
//! "Set Brightness To 40" or "Crop Image" are turned into commands and applied
//! to an image one at a time, with every visible state kept on an undo stack.
//!
//! # Architecture: Phrase → Command → Snapshot
//!
//! ```text
//! 1. Recognize   transcript   →  Command       (phrases::parse)
//! 2. Queue       Command      →  Session        (bounded channel, one consumer)
//! 3. Apply       Command      →  new snapshot   (editor state machine + imaging)
//! 4. Render      snapshot     →  sinks          (console, tests, a GUI)
//! ```
//!
//! The editor core never talks to a recognizer or a screen. Commands arrive
//! from any thread through [`session::command_queue`]; results leave through
//! the [`session::RenderSink`] and [`session::NotificationSink`] traits.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`command`] | The `Command` enum and `CommandEvent` (command + source text) |
//! | [`phrases`] | Phrase vocabulary: transcript text to `Command`, named colors |
//! | [`editor`] | Idle/Cropping state machine deciding what each command does |
//! | [`history`] | Undo stack of snapshots, never empty |
//! | [`imaging`] | Pixel transforms, crop geometry, image file loading and saving |
//! | [`session`] | Command queue consumer wired to render and notification sinks |
//! | [`config`] | `vox-edit.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting for session events and summaries |
//!
//! # Design Decisions
//!
//! ## Whole Snapshots, Not Diffs
//!
//! Each change pushes a full RGB copy of the image. Undo is then a pop, and a
//! crop preview can be thrown away by popping it without recomputing anything.
//!
//! ## Crop Previews Live on the Stack
//!
//! Entering a crop session pushes a shaded preview. Moving, resizing,
//! cancelling, or confirming first pops it, so the preview never survives into
//! the edit history and "Undo Action" during a crop simply leaves the session.

pub mod command;
pub mod config;
pub mod editor;
pub mod history;
pub mod imaging;
pub mod output;
pub mod phrases;
pub mod session;

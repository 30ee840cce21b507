//! Editing session: the single consumer between recognition and the editor.
//!
//! Command events may be produced on any thread (a recognizer callback, a
//! stdin reader, a script). They are funneled through a bounded channel from
//! [`command_queue`] into [`Session::run`], which applies them one at a time,
//! in arrival order, each to completion (transform, history update, sink
//! notification) before taking the next.
//!
//! Sinks are outputs only: the session never reads anything back from them.
//!
//! - [`RenderSink`] receives the current image after every change, including
//!   crop previews, together with the text of the command that caused it.
//! - [`NotificationSink`] receives short status messages meant for the user:
//!   the "no more undo" notice and input that did not parse.
//!
//! Rejected input travels through the same queue as commands, so it is
//! reported in the position it was typed or spoken.

use crate::command::CommandEvent;
use crate::editor::{Editor, Mode, Outcome};
use crate::history::EmptyHistory;
use crate::phrases;
use image::RgbImage;
use std::io::BufRead;
use std::sync::mpsc::{Receiver, Sender, SyncSender, sync_channel};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("command queue closed")]
    QueueClosed,
}

/// Receives the image to display.
pub trait RenderSink {
    fn render(&mut self, image: &RgbImage, description: &str);
}

/// Receives user-facing status messages.
pub trait NotificationSink {
    fn notify(&mut self, message: &str);

    /// Input `text` could not be turned into a command.
    fn reject(&mut self, text: &str, reason: &str) {
        self.notify(&format!("{text}: {reason}"));
    }
}

/// One item on the command queue.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueItem {
    Command(CommandEvent),
    Rejected { text: String, reason: String },
}

/// Producer half of the command queue. Cheap to clone; one per input source.
#[derive(Debug, Clone)]
pub struct CommandSender {
    inner: SyncSender<QueueItem>,
}

impl CommandSender {
    /// Enqueue an event, blocking while the queue is full.
    pub fn submit(&self, event: impl Into<CommandEvent>) -> Result<(), SessionError> {
        self.send(QueueItem::Command(event.into()))
    }

    /// Enqueue a notice for input that did not parse.
    pub fn reject(&self, text: impl Into<String>, reason: impl Into<String>) -> Result<(), SessionError> {
        self.send(QueueItem::Rejected {
            text: text.into(),
            reason: reason.into(),
        })
    }

    fn send(&self, item: QueueItem) -> Result<(), SessionError> {
        self.inner.send(item).map_err(|_| SessionError::QueueClosed)
    }
}

/// Create the bounded queue feeding [`Session::run`]. A capacity of 0 is
/// raised to 1.
pub fn command_queue(capacity: usize) -> (CommandSender, Receiver<QueueItem>) {
    let (tx, rx) = sync_channel(capacity.max(1));
    (CommandSender { inner: tx }, rx)
}

/// Parse each input line and enqueue it, in order. Lines that do not parse
/// are enqueued as rejections; blank lines and `#` comments are skipped.
///
/// Returns once input ends or the session has gone away.
pub fn feed_lines(input: impl BufRead, sender: &CommandSender) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let queued = match phrases::parse(text) {
            Ok(command) => sender.submit(CommandEvent::new(command, text)),
            Err(e) => {
                warn!(phrase = text, error = %e, "phrase not recognized");
                sender.reject(text, e.to_string())
            }
        };
        if queued.is_err() {
            break;
        }
    }
    Ok(())
}

/// Counters for a finished (or running) session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub applied: usize,
    pub ignored: usize,
    pub nothing_to_undo: usize,
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} applied, {} ignored, {} refused undo",
            self.applied, self.ignored, self.nothing_to_undo
        )
    }
}

/// An [`Editor`] wired to its output sinks.
pub struct Session<R, N> {
    editor: Editor,
    renderer: R,
    notifier: N,
    stats: SessionStats,
}

impl<R: RenderSink, N: NotificationSink> Session<R, N> {
    pub fn new(editor: Editor, renderer: R, notifier: N) -> Self {
        Self {
            editor,
            renderer,
            notifier,
            stats: SessionStats::default(),
        }
    }

    /// Apply one event and notify the sinks.
    pub fn dispatch(&mut self, event: &CommandEvent) -> Outcome {
        let outcome = self.editor.apply(&event.command);
        match outcome {
            Outcome::Changed => {
                self.stats.applied += 1;
                debug!(
                    command = %event.command,
                    history = self.editor.history().len(),
                    cropping = matches!(self.editor.mode(), Mode::Cropping(_)),
                    "applied"
                );
                self.renderer.render(self.editor.current(), &event.text);
            }
            Outcome::Ignored => {
                self.stats.ignored += 1;
                debug!(command = %event.command, mode = ?self.editor.mode(), "ignored in current mode");
            }
            Outcome::NothingToUndo => {
                self.stats.nothing_to_undo += 1;
                self.notifier.notify(&EmptyHistory.to_string());
            }
        }
        outcome
    }

    /// Consume queue items until every [`CommandSender`] has been dropped.
    pub fn run(&mut self, items: Receiver<QueueItem>) -> SessionStats {
        info!("session started");
        for item in items {
            match item {
                QueueItem::Command(event) => {
                    self.dispatch(&event);
                }
                QueueItem::Rejected { text, reason } => self.notifier.reject(&text, &reason),
            }
        }
        info!(stats = %self.stats, "session finished");
        self.stats
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn into_editor(self) -> Editor {
        self.editor
    }
}

/// Something the console should show, produced by the session or its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The displayed image changed.
    Rendered {
        description: String,
        width: u32,
        height: u32,
    },
    /// A status message for the user.
    Notice { message: String },
    /// Input text that did not parse into a command.
    Rejected { text: String, reason: String },
}

/// Sink that forwards everything to a channel as [`SessionEvent`]s.
///
/// Implements both sink traits so one clone can serve as renderer and another
/// as notifier; a printer thread on the receiving end formats the events.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    tx: Sender<SessionEvent>,
}

impl ConsoleSink {
    pub fn new(tx: Sender<SessionEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: SessionEvent) {
        // The printer going away only loses console output
        let _ = self.tx.send(event);
    }
}

impl RenderSink for ConsoleSink {
    fn render(&mut self, image: &RgbImage, description: &str) {
        self.send(SessionEvent::Rendered {
            description: description.to_string(),
            width: image.width(),
            height: image.height(),
        });
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, message: &str) {
        self.send(SessionEvent::Notice {
            message: message.to_string(),
        });
    }

    fn reject(&mut self, text: &str, reason: &str) {
        self.send(SessionEvent::Rejected {
            text: text.to_string(),
            reason: reason.to_string(),
        });
    }
}

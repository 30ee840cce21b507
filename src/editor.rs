//! Command interpreter and mode state machine.
//!
//! The [`Editor`] owns the edit history and the current [`Mode`]. Feeding it a
//! [`Command`] applies the matching transform to the current image, pushes or
//! pops snapshots, and moves between modes:
//!
//! ```text
//!            InitCrop (push overlay)
//!   Idle ───────────────────────────────▶ Cropping(rect)
//!    ▲  ◀── ConfirmCrop (pop, push crop) ──┘   │ SetCropPosition / SetCropSize
//!    │  ◀── CancelCrop  (pop)  ──────────────  │ (pop overlay, push new overlay)
//!    │  ◀── Undo        (pop)  ──────────────  ┘
//!    └── adjustments push one snapshot; Undo pops one
//! ```
//!
//! Undo is checked first in every mode. Crop adjustments received while idle
//! and whole-image edits received while cropping are ignored: recognition runs
//! asynchronously, so a command aimed at the previous mode is expected and not
//! an error.
//!
//! While cropping, exactly one overlay snapshot sits on top of the image that
//! was current when the crop session began.

use crate::command::Command;
use crate::history::{EmptyHistory, HistoryStack, Snapshot};
use crate::imaging::transforms::{crop, crop_overlay};
use crate::imaging::{Brightness, Contrast, CropRect, Edit, Shade, apply_edit, default_crop_rect};

/// Crop rectangle being adjusted, relative to the image beneath the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSession {
    pub rect: CropRect,
}

/// Interpreter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Cropping(CropSession),
}

/// What a command did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The current image changed; the new top should be rendered.
    Changed,
    /// Not valid in the current mode; nothing changed.
    Ignored,
    /// Undo with only the base image left; nothing changed.
    NothingToUndo,
}

/// Edit history plus the interpreter state that drives it.
#[derive(Debug, Clone)]
pub struct Editor {
    history: HistoryStack,
    mode: Mode,
    shade: Shade,
}

impl Editor {
    /// Start editing `base` with the default preview shade.
    pub fn new(base: Snapshot) -> Self {
        Self::with_shade(base, Shade::default())
    }

    pub fn with_shade(base: Snapshot, shade: Shade) -> Self {
        Self {
            history: HistoryStack::new(base),
            mode: Mode::Idle,
            shade,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active crop session, if cropping.
    pub fn crop_session(&self) -> Option<CropSession> {
        match self.mode {
            Mode::Cropping(session) => Some(session),
            Mode::Idle => None,
        }
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// The image to display (the overlay while cropping).
    pub fn current(&self) -> &Snapshot {
        self.history.top()
    }

    /// Apply one command.
    pub fn apply(&mut self, command: &Command) -> Outcome {
        if let Command::Undo = command {
            return self.undo();
        }

        match self.mode {
            Mode::Idle => self.apply_idle(command),
            Mode::Cropping(session) => self.apply_cropping(session, command),
        }
    }

    fn undo(&mut self) -> Outcome {
        match self.history.pop_if_more_than_one() {
            Ok(_) => {
                self.mode = Mode::Idle;
                Outcome::Changed
            }
            Err(EmptyHistory) => Outcome::NothingToUndo,
        }
    }

    fn apply_idle(&mut self, command: &Command) -> Outcome {
        let edit = match *command {
            Command::InitCrop => {
                let rect = default_crop_rect(self.history.top().dimensions());
                self.begin_crop(rect);
                return Outcome::Changed;
            }
            Command::SetBrightness { delta } => Edit::Brightness(Brightness::new(delta)),
            Command::SetContrast { delta } => Edit::Contrast(Contrast::new(delta)),
            Command::Grayscale => Edit::Grayscale,
            Command::Invert => Edit::Invert,
            Command::ColorFilter { color } => Edit::ColorFilter(color),
            Command::Flip => Edit::Flip,
            Command::Rotate => Edit::Rotate,
            Command::ConfirmCrop
            | Command::SetCropPosition { .. }
            | Command::SetCropSize { .. }
            | Command::CancelCrop
            | Command::Undo => return Outcome::Ignored,
        };

        let result = apply_edit(self.history.top(), edit);
        self.history.push(result);
        Outcome::Changed
    }

    fn apply_cropping(&mut self, session: CropSession, command: &Command) -> Outcome {
        match *command {
            Command::ConfirmCrop => {
                self.discard_overlay();
                let cropped = crop(self.history.top(), session.rect);
                self.history.push(cropped);
                self.mode = Mode::Idle;
                Outcome::Changed
            }
            Command::SetCropPosition { x, y } => {
                self.discard_overlay();
                self.begin_crop(CropRect { x, y, ..session.rect });
                Outcome::Changed
            }
            Command::SetCropSize { width, height } => {
                self.discard_overlay();
                self.begin_crop(CropRect {
                    width,
                    height,
                    ..session.rect
                });
                Outcome::Changed
            }
            Command::CancelCrop => {
                self.discard_overlay();
                self.mode = Mode::Idle;
                Outcome::Changed
            }
            Command::InitCrop
            | Command::SetBrightness { .. }
            | Command::SetContrast { .. }
            | Command::Grayscale
            | Command::Invert
            | Command::ColorFilter { .. }
            | Command::Flip
            | Command::Rotate
            | Command::Undo => Outcome::Ignored,
        }
    }

    /// Push an overlay for `rect` over the current top and enter cropping mode.
    fn begin_crop(&mut self, rect: CropRect) {
        let overlay = crop_overlay(self.history.top(), rect, self.shade);
        self.history.push(overlay);
        self.mode = Mode::Cropping(CropSession { rect });
    }

    /// Drop the overlay pushed by `begin_crop`.
    ///
    /// Only called while cropping, where the overlay always sits above the
    /// image it previews, so the pop cannot hit the base.
    fn discard_overlay(&mut self) {
        let popped = self.history.pop_if_more_than_one();
        debug_assert!(popped.is_ok(), "crop overlay missing from history");
    }
}

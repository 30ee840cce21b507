//! Typed command events consumed by the editor.
//!
//! A [`Command`] is one parsed instruction with its parameters. A
//! [`CommandEvent`] pairs it with the text that produced it, which is echoed
//! back as the status line once the command has been applied.

use image::Rgb;
use std::fmt;

/// One user instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start a crop session with the default centered rectangle.
    InitCrop,
    /// Crop to the current rectangle and leave the crop session.
    ConfirmCrop,
    /// Move the crop rectangle's top-left corner.
    SetCropPosition { x: u32, y: u32 },
    /// Resize the crop rectangle.
    SetCropSize { width: u32, height: u32 },
    /// Leave the crop session without cropping.
    CancelCrop,
    SetBrightness { delta: i32 },
    SetContrast { delta: f64 },
    Grayscale,
    Invert,
    ColorFilter { color: Rgb<u8> },
    Flip,
    Rotate,
    Undo,
}

/// Canonical phrase for the command, as accepted by [`crate::phrases::parse`].
///
/// Colors without a known name are written as `#rrggbb`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::InitCrop => write!(f, "Init Crop"),
            Command::ConfirmCrop => write!(f, "Crop Image"),
            Command::SetCropPosition { x, y } => write!(f, "Set Crop Position To {x} And {y}"),
            Command::SetCropSize { width, height } => {
                write!(f, "Set Crop Width To {width} And Height To {height}")
            }
            Command::CancelCrop => write!(f, "Cancel Crop"),
            Command::SetBrightness { delta } => write!(f, "Set Brightness To {delta}"),
            Command::SetContrast { delta } => write!(f, "Set Contrast To {delta}"),
            Command::Grayscale => write!(f, "Convert To Grayscale"),
            Command::Invert => write!(f, "Invert Image"),
            Command::ColorFilter { color } => match crate::phrases::color_name(*color) {
                Some(name) => write!(f, "Set Filter {name}"),
                None => {
                    let [r, g, b] = color.0;
                    write!(f, "Set Filter #{r:02x}{g:02x}{b:02x}")
                }
            },
            Command::Flip => write!(f, "Flip Image"),
            Command::Rotate => write!(f, "Rotate Image"),
            Command::Undo => write!(f, "Undo Action"),
        }
    }
}

/// A command plus the human-readable text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEvent {
    pub command: Command,
    pub text: String,
}

impl CommandEvent {
    pub fn new(command: Command, text: impl Into<String>) -> Self {
        Self {
            command,
            text: text.into(),
        }
    }
}

impl From<Command> for CommandEvent {
    /// Uses the canonical phrase as the event text.
    fn from(command: Command) -> Self {
        Self {
            text: command.to_string(),
            command,
        }
    }
}

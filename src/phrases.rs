//! Spoken-phrase vocabulary.
//!
//! Turns a recognized transcript such as `"Set Brightness To 50"` into a typed
//! [`Command`]. Matching is case-insensitive and ignores extra whitespace.
//! Numeric slots accept the same ranges a recognizer grammar would offer, so a
//! phrase outside them is rejected here instead of being clamped later.
//!
//! ```text
//! Init Crop | Crop Image | Cancel Crop
//! (Change|Set) Crop Position To <x> And <y>
//! (Change|Set) Crop Width To <w> And Height To <h>
//! (Change|Set) Brightness To <-255..255>
//! (Change|Set) Contrast To <-100..100>
//! (Change|Convert) To Grayscale
//! (Add|Set) Filter <color name | #rrggbb>
//! Invert Image | Flip Image | Rotate Image | Undo Action
//! ```

use crate::command::Command;
use crate::imaging::{Brightness, Contrast};
use image::Rgb;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhraseError {
    #[error("empty phrase")]
    Empty,
    #[error("unrecognized phrase: {0}")]
    Unrecognized(String),
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: String },
    #[error("unknown color: {0}")]
    UnknownColor(String),
}

/// Phrase templates, one per command, for help output.
pub const VOCABULARY: &[&str] = &[
    "Init Crop",
    "Crop Image",
    "Cancel Crop",
    "(Change|Set) Crop Position To <x> And <y>",
    "(Change|Set) Crop Width To <width> And Height To <height>",
    "(Change|Set) Brightness To <-255..255>",
    "(Change|Set) Contrast To <-100..100>",
    "(Change|Convert) To Grayscale",
    "Invert Image",
    "(Add|Set) Filter <color>",
    "Flip Image",
    "Rotate Image",
    "Undo Action",
];

/// Parse one transcript line into a command.
pub fn parse(text: &str) -> Result<Command, PhraseError> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let unrecognized = || PhraseError::Unrecognized(text.trim().to_string());

    match words.as_slice() {
        [] => Err(PhraseError::Empty),
        ["init", "crop"] => Ok(Command::InitCrop),
        ["crop", "image"] => Ok(Command::ConfirmCrop),
        ["cancel", "crop"] => Ok(Command::CancelCrop),
        ["invert", "image"] => Ok(Command::Invert),
        ["flip", "image"] => Ok(Command::Flip),
        ["rotate", "image"] => Ok(Command::Rotate),
        ["undo", "action"] => Ok(Command::Undo),
        ["change" | "convert", "to", "grayscale"] => Ok(Command::Grayscale),
        ["change" | "set", "crop", "position", "to", x, "and", y] => Ok(Command::SetCropPosition {
            x: parse_coordinate("crop x", x)?,
            y: parse_coordinate("crop y", y)?,
        }),
        ["change" | "set", "crop", "width", "to", w, "and", "height", "to", h] => {
            Ok(Command::SetCropSize {
                width: parse_coordinate("crop width", w)?,
                height: parse_coordinate("crop height", h)?,
            })
        }
        ["change" | "set", "brightness", "to", value] => Ok(Command::SetBrightness {
            delta: parse_brightness(value)?,
        }),
        ["change" | "set", "contrast", "to", value] => Ok(Command::SetContrast {
            delta: parse_contrast(value)?,
        }),
        ["add" | "set", "filter", color @ ..] if !color.is_empty() => Ok(Command::ColorFilter {
            color: parse_color(&color.concat())?,
        }),
        _ => Err(unrecognized()),
    }
}

fn parse_coordinate(what: &'static str, word: &str) -> Result<u32, PhraseError> {
    word.parse::<u32>().map_err(|_| PhraseError::OutOfRange {
        what,
        value: word.to_string(),
    })
}

fn parse_brightness(word: &str) -> Result<i32, PhraseError> {
    word.parse::<i32>()
        .ok()
        .filter(|v| (Brightness::MIN..=Brightness::MAX).contains(v))
        .ok_or_else(|| PhraseError::OutOfRange {
            what: "brightness",
            value: word.to_string(),
        })
}

fn parse_contrast(word: &str) -> Result<f64, PhraseError> {
    word.parse::<f64>()
        .ok()
        .filter(|v| (Contrast::MIN..=Contrast::MAX).contains(v))
        .ok_or_else(|| PhraseError::OutOfRange {
            what: "contrast",
            value: word.to_string(),
        })
}

/// Resolve a color name (spaces removed, any case) or `#rrggbb` literal.
fn parse_color(word: &str) -> Result<Rgb<u8>, PhraseError> {
    if let Some(hex) = word.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| PhraseError::UnknownColor(word.to_string()));
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
        .map(|(_, argb)| rgb_from_u32(*argb))
        .ok_or_else(|| PhraseError::UnknownColor(word.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(rgb_from_u32)
}

fn rgb_from_u32(value: u32) -> Rgb<u8> {
    Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

/// Canonical name of a color, if it is in the named-color table.
///
/// Colors sharing a value (Aqua/Cyan, Fuchsia/Magenta) resolve to the first.
pub fn color_name(color: Rgb<u8>) -> Option<&'static str> {
    let [r, g, b] = color.0;
    let value = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
    NAMED_COLORS
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(name, _)| *name)
}

/// Named colors accepted by the filter phrase (the standard web color set).
pub const NAMED_COLORS: &[(&str, u32)] = &[
    ("AliceBlue", 0xF0F8FF),
    ("AntiqueWhite", 0xFAEBD7),
    ("Aqua", 0x00FFFF),
    ("Aquamarine", 0x7FFFD4),
    ("Azure", 0xF0FFFF),
    ("Beige", 0xF5F5DC),
    ("Bisque", 0xFFE4C4),
    ("Black", 0x000000),
    ("BlanchedAlmond", 0xFFEBCD),
    ("Blue", 0x0000FF),
    ("BlueViolet", 0x8A2BE2),
    ("Brown", 0xA52A2A),
    ("BurlyWood", 0xDEB887),
    ("CadetBlue", 0x5F9EA0),
    ("Chartreuse", 0x7FFF00),
    ("Chocolate", 0xD2691E),
    ("Coral", 0xFF7F50),
    ("CornflowerBlue", 0x6495ED),
    ("Cornsilk", 0xFFF8DC),
    ("Crimson", 0xDC143C),
    ("Cyan", 0x00FFFF),
    ("DarkBlue", 0x00008B),
    ("DarkCyan", 0x008B8B),
    ("DarkGoldenrod", 0xB8860B),
    ("DarkGray", 0xA9A9A9),
    ("DarkGreen", 0x006400),
    ("DarkKhaki", 0xBDB76B),
    ("DarkMagenta", 0x8B008B),
    ("DarkOliveGreen", 0x556B2F),
    ("DarkOrange", 0xFF8C00),
    ("DarkOrchid", 0x9932CC),
    ("DarkRed", 0x8B0000),
    ("DarkSalmon", 0xE9967A),
    ("DarkSeaGreen", 0x8FBC8F),
    ("DarkSlateBlue", 0x483D8B),
    ("DarkSlateGray", 0x2F4F4F),
    ("DarkTurquoise", 0x00CED1),
    ("DarkViolet", 0x9400D3),
    ("DeepPink", 0xFF1493),
    ("DeepSkyBlue", 0x00BFFF),
    ("DimGray", 0x696969),
    ("DodgerBlue", 0x1E90FF),
    ("Firebrick", 0xB22222),
    ("FloralWhite", 0xFFFAF0),
    ("ForestGreen", 0x228B22),
    ("Fuchsia", 0xFF00FF),
    ("Gainsboro", 0xDCDCDC),
    ("GhostWhite", 0xF8F8FF),
    ("Gold", 0xFFD700),
    ("Goldenrod", 0xDAA520),
    ("Gray", 0x808080),
    ("Green", 0x008000),
    ("GreenYellow", 0xADFF2F),
    ("Honeydew", 0xF0FFF0),
    ("HotPink", 0xFF69B4),
    ("IndianRed", 0xCD5C5C),
    ("Indigo", 0x4B0082),
    ("Ivory", 0xFFFFF0),
    ("Khaki", 0xF0E68C),
    ("Lavender", 0xE6E6FA),
    ("LavenderBlush", 0xFFF0F5),
    ("LawnGreen", 0x7CFC00),
    ("LemonChiffon", 0xFFFACD),
    ("LightBlue", 0xADD8E6),
    ("LightCoral", 0xF08080),
    ("LightCyan", 0xE0FFFF),
    ("LightGoldenrodYellow", 0xFAFAD2),
    ("LightGray", 0xD3D3D3),
    ("LightGreen", 0x90EE90),
    ("LightPink", 0xFFB6C1),
    ("LightSalmon", 0xFFA07A),
    ("LightSeaGreen", 0x20B2AA),
    ("LightSkyBlue", 0x87CEFA),
    ("LightSlateGray", 0x778899),
    ("LightSteelBlue", 0xB0C4DE),
    ("LightYellow", 0xFFFFE0),
    ("Lime", 0x00FF00),
    ("LimeGreen", 0x32CD32),
    ("Linen", 0xFAF0E6),
    ("Magenta", 0xFF00FF),
    ("Maroon", 0x800000),
    ("MediumAquamarine", 0x66CDAA),
    ("MediumBlue", 0x0000CD),
    ("MediumOrchid", 0xBA55D3),
    ("MediumPurple", 0x9370DB),
    ("MediumSeaGreen", 0x3CB371),
    ("MediumSlateBlue", 0x7B68EE),
    ("MediumSpringGreen", 0x00FA9A),
    ("MediumTurquoise", 0x48D1CC),
    ("MediumVioletRed", 0xC71585),
    ("MidnightBlue", 0x191970),
    ("MintCream", 0xF5FFFA),
    ("MistyRose", 0xFFE4E1),
    ("Moccasin", 0xFFE4B5),
    ("NavajoWhite", 0xFFDEAD),
    ("Navy", 0x000080),
    ("OldLace", 0xFDF5E6),
    ("Olive", 0x808000),
    ("OliveDrab", 0x6B8E23),
    ("Orange", 0xFFA500),
    ("OrangeRed", 0xFF4500),
    ("Orchid", 0xDA70D6),
    ("PaleGoldenrod", 0xEEE8AA),
    ("PaleGreen", 0x98FB98),
    ("PaleTurquoise", 0xAFEEEE),
    ("PaleVioletRed", 0xDB7093),
    ("PapayaWhip", 0xFFEFD5),
    ("PeachPuff", 0xFFDAB9),
    ("Peru", 0xCD853F),
    ("Pink", 0xFFC0CB),
    ("Plum", 0xDDA0DD),
    ("PowderBlue", 0xB0E0E6),
    ("Purple", 0x800080),
    ("Red", 0xFF0000),
    ("RosyBrown", 0xBC8F8F),
    ("RoyalBlue", 0x4169E1),
    ("SaddleBrown", 0x8B4513),
    ("Salmon", 0xFA8072),
    ("SandyBrown", 0xF4A460),
    ("SeaGreen", 0x2E8B57),
    ("SeaShell", 0xFFF5EE),
    ("Sienna", 0xA0522D),
    ("Silver", 0xC0C0C0),
    ("SkyBlue", 0x87CEEB),
    ("SlateBlue", 0x6A5ACD),
    ("SlateGray", 0x708090),
    ("Snow", 0xFFFAFA),
    ("SpringGreen", 0x00FF7F),
    ("SteelBlue", 0x4682B4),
    ("Tan", 0xD2B48C),
    ("Teal", 0x008080),
    ("Thistle", 0xD8BFD8),
    ("Tomato", 0xFF6347),
    ("Turquoise", 0x40E0D0),
    ("Violet", 0xEE82EE),
    ("Wheat", 0xF5DEB3),
    ("White", 0xFFFFFF),
    ("WhiteSmoke", 0xF5F5F5),
    ("Yellow", 0xFFFF00),
    ("YellowGreen", 0x9ACD32),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fixed_phrases() {
        assert_eq!(parse("Init Crop"), Ok(Command::InitCrop));
        assert_eq!(parse("crop image"), Ok(Command::ConfirmCrop));
        assert_eq!(parse("  CANCEL   crop "), Ok(Command::CancelCrop));
        assert_eq!(parse("Invert Image"), Ok(Command::Invert));
        assert_eq!(parse("Flip Image"), Ok(Command::Flip));
        assert_eq!(parse("Rotate Image"), Ok(Command::Rotate));
        assert_eq!(parse("Undo Action"), Ok(Command::Undo));
        assert_eq!(parse("Convert To Grayscale"), Ok(Command::Grayscale));
        assert_eq!(parse("Change To Grayscale"), Ok(Command::Grayscale));
    }

    #[test]
    fn parse_crop_position_and_size() {
        assert_eq!(
            parse("Set Crop Position To 10 And 20"),
            Ok(Command::SetCropPosition { x: 10, y: 20 })
        );
        assert_eq!(
            parse("Change Crop Width To 64 And Height To 48"),
            Ok(Command::SetCropSize {
                width: 64,
                height: 48
            })
        );
    }

    #[test]
    fn parse_negative_crop_position_is_rejected() {
        assert!(matches!(
            parse("Set Crop Position To -1 And 2"),
            Err(PhraseError::OutOfRange { what: "crop x", .. })
        ));
    }

    #[test]
    fn parse_brightness_range() {
        assert_eq!(
            parse("Set Brightness To -255"),
            Ok(Command::SetBrightness { delta: -255 })
        );
        assert_eq!(
            parse("change brightness to 255"),
            Ok(Command::SetBrightness { delta: 255 })
        );
        assert!(matches!(
            parse("Set Brightness To 256"),
            Err(PhraseError::OutOfRange {
                what: "brightness",
                ..
            })
        ));
    }

    #[test]
    fn parse_contrast_range() {
        assert_eq!(
            parse("Set Contrast To -100"),
            Ok(Command::SetContrast { delta: -100.0 })
        );
        assert!(parse("Set Contrast To 101").is_err());
        assert!(parse("Set Contrast To lots").is_err());
    }

    #[test]
    fn parse_color_filter_by_name() {
        assert_eq!(
            parse("Add Filter Red"),
            Ok(Command::ColorFilter {
                color: Rgb([255, 0, 0])
            })
        );
        assert_eq!(
            parse("Set Filter light blue"),
            Ok(Command::ColorFilter {
                color: Rgb([0xAD, 0xD8, 0xE6])
            })
        );
    }

    #[test]
    fn parse_color_filter_by_hex() {
        assert_eq!(
            parse("Set Filter #102030"),
            Ok(Command::ColorFilter {
                color: Rgb([0x10, 0x20, 0x30])
            })
        );
        assert!(matches!(
            parse("Set Filter #12"),
            Err(PhraseError::UnknownColor(_))
        ));
    }

    #[test]
    fn parse_unknown_color() {
        assert_eq!(
            parse("Add Filter Blurple"),
            Err(PhraseError::UnknownColor("blurple".to_string()))
        );
    }

    #[test]
    fn parse_empty_and_garbage() {
        assert_eq!(parse("   "), Err(PhraseError::Empty));
        assert_eq!(
            parse("Make It Pop"),
            Err(PhraseError::Unrecognized("Make It Pop".to_string()))
        );
        assert!(matches!(parse("Add Filter"), Err(PhraseError::Unrecognized(_))));
    }

    #[test]
    fn canonical_phrases_parse_back() {
        let commands = [
            Command::InitCrop,
            Command::ConfirmCrop,
            Command::SetCropPosition { x: 3, y: 4 },
            Command::SetCropSize {
                width: 5,
                height: 6,
            },
            Command::CancelCrop,
            Command::SetBrightness { delta: -7 },
            Command::SetContrast { delta: 8.0 },
            Command::Grayscale,
            Command::Invert,
            Command::ColorFilter {
                color: Rgb([255, 165, 0]),
            },
            Command::ColorFilter {
                color: Rgb([1, 2, 3]),
            },
            Command::Flip,
            Command::Rotate,
            Command::Undo,
        ];
        for command in commands {
            assert_eq!(parse(&command.to_string()), Ok(command), "{command}");
        }
    }

    #[test]
    fn color_name_lookup() {
        assert_eq!(color_name(Rgb([255, 165, 0])), Some("Orange"));
        assert_eq!(color_name(Rgb([0, 255, 255])), Some("Aqua"));
        assert_eq!(color_name(Rgb([1, 2, 3])), None);
    }

    #[test]
    fn vocabulary_covers_every_command() {
        assert_eq!(VOCABULARY.len(), 13);
    }
}

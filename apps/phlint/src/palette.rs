//! Severity-to-color mapping for report rendering.

use crate::models::Status;
use crate::sink::Ink;

/// A bright accent ink paired with the plain body ink of the same hue.
///
/// The accent styles severity labels and the highlighted gutter prefix; the
/// body styles message text and highlighted source lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
    pub bright: Ink,
    pub base: Ink,
}

/// Total mapping from status to display colors. Any status without an
/// explicit arm takes the error colors.
pub fn color_for(status: Status) -> ColorPair {
    match status {
        Status::Ok => ColorPair {
            bright: Ink::BrightGreen,
            base: Ink::Green,
        },
        Status::Notice => ColorPair {
            bright: Ink::BrightBlue,
            base: Ink::Blue,
        },
        Status::Warning => ColorPair {
            bright: Ink::BrightYellow,
            base: Ink::Yellow,
        },
        _ => ColorPair {
            bright: Ink::BrightRed,
            base: Ink::Red,
        },
    }
}

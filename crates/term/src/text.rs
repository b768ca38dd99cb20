//! Text measurement for terminal layout.

use crate::types::TextMetrics;

/// Plain terminal text: every char is one column wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalText;

impl TextMetrics for TerminalText {
    fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32
    }
}

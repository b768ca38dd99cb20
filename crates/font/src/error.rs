//! Error types for font decoding

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for font operations
pub type Result<T> = std::result::Result<T, FontError>;

/// Errors that can occur while loading a compiled font
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blob does not start with `MFNT`
    #[error("not a compiled font (bad magic)")]
    BadMagic,

    /// The blob ended inside a record
    #[error("font data truncated while reading {what} at byte {offset}")]
    Truncated {
        /// Field being read
        what: &'static str,
        /// Byte offset where the read started
        offset: usize,
    },

    /// An encoding record names an invalid Unicode scalar value
    #[error("invalid codepoint {0:#x} in encoding table")]
    BadCodepoint(u32),

    /// An encoding record points outside the glyph table
    #[error("encoding for {ch:?} points at missing glyph {index}")]
    BadGlyphIndex { ch: char, index: u32 },

    /// Nothing follows the encoding table
    #[error("font has no texture data")]
    MissingTexture,
}

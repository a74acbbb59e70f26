//! Program image loader.
//!
//! This module reads program images from disk. It supports:
//! 1. **Binary images:** Raw bytes, loaded verbatim (`.bin` files).
//! 2. **Text images:** Byte values separated by whitespace or commas, decimal or
//!    `0x`-prefixed hex, with `#` starting a comment that runs to end of line.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::error::{Result, SimError};

/// On-disk encoding of a program image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raw bytes.
    Binary,
    /// Whitespace/comma separated byte values.
    Text,
}

impl ImageFormat {
    /// Picks the format from the file extension: `.bin` is binary, anything
    /// else is text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Loads a program image, choosing the format from the file extension.
pub fn load_image(path: &Path) -> Result<Vec<u8>> {
    load_image_as(path, ImageFormat::from_path(path))
}

/// Loads a program image in the given format.
///
/// # Arguments
///
/// * `path` - Image file.
/// * `format` - How the file is encoded.
///
/// # Returns
///
/// The image bytes, or an error if the file cannot be read or parsed.
pub fn load_image_as(path: &Path, format: ImageFormat) -> Result<Vec<u8>> {
    let image = match format {
        ImageFormat::Binary => fs::read(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?,
        ImageFormat::Text => {
            let text = fs::read_to_string(path).map_err(|source| SimError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_text_image(&text)?
        }
    };
    debug!(path = %path.display(), ?format, len = image.len(), "loaded program image");
    Ok(image)
}

/// Parses a text program image.
///
/// # Examples
///
/// ```
/// use clockbus_core::sim::loader::parse_text_image;
///
/// let image = parse_text_image("0, 8  # LOAD A #8\n0x04 0\n").unwrap();
/// assert_eq!(image, vec![0, 8, 4, 0]);
/// ```
pub fn parse_text_image(text: &str) -> Result<Vec<u8>> {
    let mut image = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default();
        for token in code
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            image.push(parse_byte(token).ok_or_else(|| SimError::ParseImage {
                line: index + 1,
                token: token.to_owned(),
            })?);
        }
    }
    Ok(image)
}

fn parse_byte(token: &str) -> Option<u8> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

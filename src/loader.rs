//! # Program Image Loader
//!
//! Parses LS-8 program images: text files holding one instruction byte per
//! line, written as an 8-digit binary literal.
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```
//!
//! A line contributes a byte only if its very first character is `0` or `1`;
//! everything else (blank lines, comments, indented text) is skipped. Anything
//! after the eighth column is ignored.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Width of a byte literal in the image format.
const BYTE_WIDTH: usize = 8;

/// Errors raised while reading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("failed to read program: {0}")]
    Io(#[from] io::Error),

    /// A data line does not start with eight binary digits.
    #[error("line {line}: expected an 8-digit binary literal, got {text:?}")]
    InvalidLine {
        /// 1-based line number
        line: usize,
        /// Offending line, verbatim
        text: String,
    },
}

/// Parses program image text into bytes, in file order.
///
/// # Errors
///
/// `LoadError::InvalidLine` for a line that starts with `0` or `1` but whose
/// first eight characters are not all binary digits.
///
/// # Examples
///
/// ```
/// use ls8::parse_program;
///
/// let bytes = parse_program("# comment\n\n10000010 # LDI\n00000000\n00001000\n").unwrap();
/// assert_eq!(bytes, vec![0b1000_0010, 0, 8]);
/// ```
pub fn parse_program(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if !matches!(line.as_bytes().first(), Some(b'0' | b'1')) {
            continue;
        }

        let byte = line
            .get(..BYTE_WIDTH)
            .filter(|digits| digits.bytes().all(|c| c == b'0' || c == b'1'))
            .and_then(|digits| u8::from_str_radix(digits, 2).ok())
            .ok_or_else(|| LoadError::InvalidLine {
                line: index + 1,
                text: line.to_string(),
            })?;

        program.push(byte);
    }

    Ok(program)
}

/// Reads and parses the program image at `path`.
pub fn load_program_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_program(&text)
}

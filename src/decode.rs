//! Decode context.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Possible errors that can arise during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    UnexpectedEndOfInput,
    UnexpectedInput,
    UnterminatedString,
    InvalidEscapeCharacter,
    InvalidUnicodeEscape,
    InvalidNumber,
    InvalidUtf8,
    MissingRequiredFields,
}

impl Display for DecodeErrorKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeErrorKind::UnexpectedEndOfInput => write!(f, "Unexpected end of input"),
            DecodeErrorKind::UnexpectedInput => write!(f, "Unexpected input"),
            DecodeErrorKind::UnterminatedString => write!(f, "Unterminated string"),
            DecodeErrorKind::InvalidEscapeCharacter => write!(f, "Invalid escape character"),
            DecodeErrorKind::InvalidUnicodeEscape => write!(f, "\\u must be followed by 4 hex digits"),
            DecodeErrorKind::InvalidNumber => write!(f, "Invalid number"),
            DecodeErrorKind::InvalidUtf8 => write!(f, "Invalid UTF-8"),
            DecodeErrorKind::MissingRequiredFields => write!(f, "Missing required field(s)"),
        }
    }
}

/// This type represents error that can arise during decoding.
///
/// `pos` is the byte offset into the input at which the error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    pos: usize,
}

impl DecodeError {
    #[inline]
    pub fn new(kind: DecodeErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    #[inline]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Display for DecodeError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.kind, self.pos)
    }
}

impl Error for DecodeError {}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Cursor over the input bytes of a single decode invocation.
///
/// The input is borrowed, never copied. The cursor only moves forward;
/// each codec leaves it on the byte after the value it decoded.
pub struct DecodeContext<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DecodeContext<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        DecodeContext { bytes, pos: 0 }
    }

    /// Number of bytes between the cursor and the end of input.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Byte offset of the cursor from the beginning of input, displaced
    /// by `d`. Used to report errors against a byte the cursor has
    /// already moved past.
    #[inline]
    pub fn offset(&self, d: isize) -> usize {
        debug_assert!(d >= 0 || self.pos as isize + d >= 0);
        (self.pos as isize + d) as usize
    }

    /// The full input, independent of the cursor.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos += n;
    }

    #[inline]
    pub(crate) fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos)
    }

    #[inline]
    pub(crate) fn error_at(&self, kind: DecodeErrorKind, d: isize) -> DecodeError {
        DecodeError::new(kind, self.offset(d))
    }
}

//! Scanner primitives.
//!
//! Position-advancing helpers every codec builds on. All of them operate
//! on a [`DecodeContext`] and report failures as a [`DecodeError`] carrying
//! the byte offset at which the problem was detected.

use crate::decode::{DecodeContext, DecodeErrorKind, DecodeResult};

/// Returns the byte under the cursor without advancing, or `0x00` when the
/// input is exhausted. A `0x00` return is not itself an error; callers
/// decide whether it is legal at that point.
#[inline]
pub fn peek(ctx: &DecodeContext) -> u8 {
    ctx.bytes().get(ctx.position()).copied().unwrap_or(0)
}

/// Consumes and returns one byte; fails with `err` when none remain.
#[inline]
pub fn next(ctx: &mut DecodeContext, err: DecodeErrorKind) -> DecodeResult<u8> {
    if ctx.remaining() == 0 {
        return Err(ctx.error(err));
    }
    let byte = ctx.bytes()[ctx.position()];
    ctx.advance(1);
    Ok(byte)
}

/// Advances `n` bytes; fails when fewer remain.
#[inline]
pub fn skip(ctx: &mut DecodeContext, n: usize) -> DecodeResult<()> {
    if ctx.remaining() < n {
        return Err(ctx.error(DecodeErrorKind::UnexpectedEndOfInput));
    }
    ctx.advance(n);
    Ok(())
}

/// Advances while the cursor is on a JSON whitespace byte (space, tab,
/// line feed, carriage return). Never fails; stops at end of input.
#[inline]
pub fn skip_past_whitespace(ctx: &mut DecodeContext) {
    while matches!(peek(ctx), b' ' | b'\t' | b'\n' | b'\r') {
        ctx.advance(1);
    }
}

/// Consumes one byte and requires it to equal `c`.
#[inline]
pub fn advance_past(ctx: &mut DecodeContext, c: u8) -> DecodeResult<()> {
    if next(ctx, DecodeErrorKind::UnexpectedEndOfInput)? != c {
        return Err(ctx.error_at(DecodeErrorKind::UnexpectedInput, -1));
    }
    Ok(())
}

/// Consumes four bytes and requires them to equal `s`.
#[inline]
pub fn advance_past_four(ctx: &mut DecodeContext, s: &[u8; 4]) -> DecodeResult<()> {
    if ctx.remaining() < 4 {
        return Err(ctx.error(DecodeErrorKind::UnexpectedEndOfInput));
    }
    let pos = ctx.position();
    if &ctx.bytes()[pos..pos + 4] != s {
        return Err(ctx.error(DecodeErrorKind::UnexpectedInput));
    }
    ctx.advance(4);
    Ok(())
}

#[inline]
pub fn advance_past_true(ctx: &mut DecodeContext) -> DecodeResult<()> {
    advance_past_four(ctx, b"true")
}

/// The caller must already have seen the `f` under the cursor.
#[inline]
pub fn advance_past_false(ctx: &mut DecodeContext) -> DecodeResult<()> {
    ctx.advance(1);
    advance_past_four(ctx, b"alse")
}

#[inline]
pub fn advance_past_null(ctx: &mut DecodeContext) -> DecodeResult<()> {
    advance_past_four(ctx, b"null")
}

/// Consumes the tail of a `\` escape: the escape character itself, plus
/// four hex digits when it is `u`.
fn advance_past_string_escape_after_slash(ctx: &mut DecodeContext) -> DecodeResult<()> {
    match next(ctx, DecodeErrorKind::UnterminatedString)? {
        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(()),
        b'u' => {
            if ctx.remaining() < 4 {
                return Err(ctx.error(DecodeErrorKind::InvalidUnicodeEscape));
            }
            let pos = ctx.position();
            let hex_digits = &ctx.bytes()[pos..pos + 4];
            ctx.advance(4);
            if !hex_digits.iter().all(u8::is_ascii_hexdigit) {
                return Err(ctx.error(DecodeErrorKind::InvalidUnicodeEscape));
            }
            Ok(())
        }
        _ => Err(ctx.error_at(DecodeErrorKind::InvalidEscapeCharacter, -1)),
    }
}

/// Advances past a complete JSON string without producing its value.
/// Escape sequences are validated but not decoded.
pub fn advance_past_string(ctx: &mut DecodeContext) -> DecodeResult<()> {
    advance_past(ctx, b'"')?;
    loop {
        let pos = ctx.position();
        match memchr::memchr2(b'"', b'\\', &ctx.bytes()[pos..]) {
            None => {
                ctx.advance(ctx.remaining());
                return Err(ctx.error(DecodeErrorKind::UnterminatedString));
            }
            Some(i) => {
                ctx.advance(i + 1);
                if ctx.bytes()[pos + i] == b'"' {
                    return Ok(());
                }
                advance_past_string_escape_after_slash(ctx)?;
            }
        }
    }
}

/// Driver for the comma-separated interiors of objects and arrays.
/// Consumes `intro`, invokes `parse` once per element with the cursor on
/// its first byte, requires a `,` between elements, and consumes `outro`.
/// Trailing commas are rejected.
///
/// `parse` must either advance the cursor past one element or fail; a
/// parser that does neither would keep this loop from terminating.
pub fn advance_past_comma_separated<'a, F>(
    ctx: &mut DecodeContext<'a>,
    intro: u8,
    outro: u8,
    mut parse: F,
) -> DecodeResult<()>
where
    F: FnMut(&mut DecodeContext<'a>) -> DecodeResult<()>,
{
    advance_past(ctx, intro)?;
    skip_past_whitespace(ctx);

    if peek(ctx) != outro {
        parse(ctx)?;
        skip_past_whitespace(ctx);

        while peek(ctx) != outro {
            advance_past(ctx, b',')?;
            skip_past_whitespace(ctx);
            parse(ctx)?;
            skip_past_whitespace(ctx);
        }
    }

    ctx.advance(1);
    Ok(())
}

/// Advances past a number token and returns its bytes. The token is an
/// optional sign, an integer part, an optional fraction and an optional
/// exponent; each digit run must be non-empty.
pub fn advance_past_number<'a>(ctx: &mut DecodeContext<'a>) -> DecodeResult<&'a [u8]> {
    let start = ctx.position();

    if peek(ctx) == b'-' {
        ctx.advance(1);
    }
    advance_past_digits(ctx)?;

    if peek(ctx) == b'.' {
        ctx.advance(1);
        advance_past_digits(ctx)?;
    }

    if matches!(peek(ctx), b'e' | b'E') {
        ctx.advance(1);
        if matches!(peek(ctx), b'+' | b'-') {
            ctx.advance(1);
        }
        advance_past_digits(ctx)?;
    }

    Ok(&ctx.bytes()[start..ctx.position()])
}

#[inline]
fn advance_past_digits(ctx: &mut DecodeContext) -> DecodeResult<()> {
    if !peek(ctx).is_ascii_digit() {
        return Err(ctx.error(DecodeErrorKind::InvalidNumber));
    }
    while peek(ctx).is_ascii_digit() {
        ctx.advance(1);
    }
    Ok(())
}

/// Advances past one well-formed JSON value of any type without producing
/// it. Dispatches on the first non-whitespace byte.
pub fn skip_value(ctx: &mut DecodeContext) -> DecodeResult<()> {
    skip_past_whitespace(ctx);
    match peek(ctx) {
        b'{' => advance_past_comma_separated(ctx, b'{', b'}', |ctx| {
            advance_past_string(ctx)?;
            skip_past_whitespace(ctx);
            advance_past(ctx, b':')?;
            skip_past_whitespace(ctx);
            skip_value(ctx)
        }),
        b'[' => advance_past_comma_separated(ctx, b'[', b']', skip_value),
        b'"' => advance_past_string(ctx),
        b't' => advance_past_true(ctx),
        b'f' => advance_past_false(ctx),
        b'n' => advance_past_null(ctx),
        b'-' | b'0'..=b'9' => advance_past_number(ctx).map(|_| ()),
        _ if ctx.remaining() == 0 => Err(ctx.error(DecodeErrorKind::UnexpectedEndOfInput)),
        _ => Err(ctx.error(DecodeErrorKind::UnexpectedInput)),
    }
}

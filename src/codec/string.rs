//! String codec.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeError, DecodeErrorKind, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;
use memchr::memchr2;

/// Codec for JSON strings.
///
/// Decoding applies the full escape rules, combining adjacent
/// `\uXXXX` surrogate pairs into their supplementary-plane character;
/// an unpaired surrogate decodes as U+FFFD. Encoding escapes `"`, `\`
/// and the control bytes below 0x20; everything else, including
/// non-ASCII, passes through literally.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<String> {
        decode_string(ctx)
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, value: &String) -> EncodeResult<()> {
        encode_string(ctx, value);
        Ok(())
    }
}

fn decode_string(ctx: &mut DecodeContext) -> DecodeResult<String> {
    let start = ctx.offset(0);
    scanner::advance_past(ctx, b'"')?;

    let mut buf = Vec::new();
    loop {
        let pos = ctx.position();
        let rest = &ctx.bytes()[pos..];
        match memchr2(b'"', b'\\', rest) {
            None => {
                ctx.advance(rest.len());
                return Err(ctx.error(DecodeErrorKind::UnterminatedString));
            }
            Some(i) => {
                buf.extend_from_slice(&rest[..i]);
                ctx.advance(i + 1);
                if rest[i] == b'"' {
                    break;
                }
                decode_escape(ctx, &mut buf)?;
            }
        }
    }

    String::from_utf8(buf).map_err(|_| DecodeError::new(DecodeErrorKind::InvalidUtf8, start))
}

/// Decodes the escape tail after a `\` into `buf`.
fn decode_escape(ctx: &mut DecodeContext, buf: &mut Vec<u8>) -> DecodeResult<()> {
    match scanner::next(ctx, DecodeErrorKind::UnterminatedString)? {
        b'"' => buf.push(b'"'),
        b'\\' => buf.push(b'\\'),
        b'/' => buf.push(b'/'),
        b'b' => buf.push(0x08),
        b'f' => buf.push(0x0C),
        b'n' => buf.push(b'\n'),
        b'r' => buf.push(b'\r'),
        b't' => buf.push(b'\t'),
        b'u' => decode_unicode_escape(ctx, buf)?,
        _ => return Err(ctx.error_at(DecodeErrorKind::InvalidEscapeCharacter, -1)),
    }
    Ok(())
}

fn decode_unicode_escape(ctx: &mut DecodeContext, buf: &mut Vec<u8>) -> DecodeResult<()> {
    let unit = decode_hex4(ctx)?;
    if !(0xD800..=0xDBFF).contains(&unit) {
        push_unit(buf, unit);
        return Ok(());
    }

    // A high surrogate pairs with an immediately following \uXXXX low
    // surrogate; anything else leaves it unpaired.
    let pos = ctx.position();
    let rest = &ctx.bytes()[pos..];
    if rest.len() < 2 || rest[0] != b'\\' || rest[1] != b'u' {
        push_char(buf, char::REPLACEMENT_CHARACTER);
        return Ok(());
    }

    ctx.advance(2);
    let low = decode_hex4(ctx)?;
    if (0xDC00..=0xDFFF).contains(&low) {
        let scalar = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
        push_char(buf, char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
    } else {
        push_char(buf, char::REPLACEMENT_CHARACTER);
        push_unit(buf, low);
    }
    Ok(())
}

fn decode_hex4(ctx: &mut DecodeContext) -> DecodeResult<u16> {
    if ctx.remaining() < 4 {
        return Err(ctx.error(DecodeErrorKind::InvalidUnicodeEscape));
    }
    let pos = ctx.position();
    let digits = &ctx.bytes()[pos..pos + 4];
    ctx.advance(4);

    let mut unit: u16 = 0;
    for &byte in digits {
        match (byte as char).to_digit(16) {
            Some(digit) => unit = unit << 4 | digit as u16,
            None => return Err(ctx.error(DecodeErrorKind::InvalidUnicodeEscape)),
        }
    }
    Ok(unit)
}

#[inline]
fn push_unit(buf: &mut Vec<u8>, unit: u16) {
    // Surrogate code units are not scalar values; they decode as U+FFFD.
    push_char(buf, char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
}

#[inline]
fn push_char(buf: &mut Vec<u8>, c: char) {
    let mut utf8 = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
}

const BB: &[u8] = b"\\b"; // \x08
const TT: &[u8] = b"\\t"; // \x09
const NN: &[u8] = b"\\n"; // \x0A
const FF: &[u8] = b"\\f"; // \x0C
const RR: &[u8] = b"\\r"; // \x0D
const QU: &[u8] = b"\\\""; // \x22
const BS: &[u8] = b"\\\\"; // \x5C
const __: &[u8] = b"";

// Lookup table of escape sequences. A value of b"x" at index i means that
// byte i is escaped as "x". A value of b"" means that byte i has no named
// escape; control bytes among them fall back to \u00XX.
static ESCAPE: [&[u8]; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    __, __, __, __, __, __, __, __, BB, TT, NN, __, FF, RR, __, __, // 0
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
    __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Appends the JSON encoding of `value`, quotes included.
pub(crate) fn encode_string(ctx: &mut EncodeContext, value: &str) {
    ctx.append(b'"');

    let bytes = value.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape.is_empty() && byte >= 0x20 {
            continue;
        }

        if start < i {
            ctx.append_bytes(&bytes[start..i]);
        }
        if escape.is_empty() {
            append_unicode_escape(ctx, byte);
        } else {
            ctx.append_bytes(escape);
        }
        start = i + 1;
    }
    if start != bytes.len() {
        ctx.append_bytes(&bytes[start..]);
    }

    ctx.append(b'"');
}

#[inline]
fn append_unicode_escape(ctx: &mut EncodeContext, byte: u8) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    ctx.append_bytes(b"\\u00");
    ctx.append(HEX[(byte >> 4) as usize]);
    ctx.append(HEX[(byte & 0x0F) as usize]);
}

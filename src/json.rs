//! Decode and encode entry points.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeErrorKind, DecodeResult};
use crate::default_codec::DefaultCodec;
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;

/// Decodes a complete JSON document into `T` using its default codec.
///
/// The whole input must be consumed: anything but whitespace after the
/// root value is an error.
#[inline]
pub fn decode<T, B>(input: B) -> DecodeResult<T>
where
    T: DefaultCodec,
    B: AsRef<[u8]>,
{
    decode_with(&T::default_codec(), input)
}

/// Decodes a complete JSON document with an explicit codec.
pub fn decode_with<C, B>(codec: &C, input: B) -> DecodeResult<C::Value>
where
    C: Codec,
    B: AsRef<[u8]>,
{
    let mut ctx = DecodeContext::new(input.as_ref());
    scanner::skip_past_whitespace(&mut ctx);
    let value = codec.decode(&mut ctx)?;
    scanner::skip_past_whitespace(&mut ctx);
    if ctx.remaining() != 0 {
        return Err(ctx.error(DecodeErrorKind::UnexpectedInput));
    }
    Ok(value)
}

/// Encodes `value` as compact JSON text using its default codec.
#[inline]
pub fn encode<T: DefaultCodec>(value: &T) -> EncodeResult<String> {
    encode_with(&T::default_codec(), value)
}

/// Encodes `value` as compact JSON text with an explicit codec.
pub fn encode_with<C: Codec>(codec: &C, value: &C::Value) -> EncodeResult<String> {
    let mut ctx = EncodeContext::new();
    codec.encode(&mut ctx, value)?;
    Ok(ctx.into_string())
}

/// Encodes `value` as compact JSON bytes using its default codec.
#[inline]
pub fn encode_to_vec<T: DefaultCodec>(value: &T) -> EncodeResult<Vec<u8>> {
    encode_to_vec_with(&T::default_codec(), value)
}

/// Encodes `value` as compact JSON bytes with an explicit codec.
pub fn encode_to_vec_with<C: Codec>(codec: &C, value: &C::Value) -> EncodeResult<Vec<u8>> {
    let mut ctx = EncodeContext::new();
    codec.encode(&mut ctx, value)?;
    Ok(ctx.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;

    #[test]
    fn test_decode() {
        assert_eq!(decode::<i64, _>("42").unwrap(), 42);
        assert_eq!(decode::<i64, _>(" \n 42 \t ").unwrap(), 42);
        assert_eq!(decode::<Vec<bool>, _>("[true,false]").unwrap(), vec![true, false]);
        assert_eq!(decode::<Option<String>, _>("null").unwrap(), None);
    }

    #[test]
    fn test_decode_rejects_trailing_garbage() {
        assert_eq!(
            decode::<i64, _>("42 x"),
            Err(DecodeError::new(DecodeErrorKind::UnexpectedInput, 3))
        );
        assert!(decode::<i64, _>("42 43").is_err());
        assert!(decode::<Vec<i64>, _>("[1],").is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&42i64).unwrap(), "42");
        assert_eq!(encode(&vec![1i64, 2, 3]).unwrap(), "[1,2,3]");
        assert_eq!(encode(&"ok".to_string()).unwrap(), r#""ok""#);
        assert_eq!(encode_to_vec(&true).unwrap(), b"true");
    }
}

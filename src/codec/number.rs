//! Number codecs.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeError, DecodeErrorKind, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;
use decimal_rs::{Decimal, DecimalParseError};
use std::fmt::Write;
use std::marker::PhantomData;
use std::str::FromStr;

mod sealed {
    pub trait Sealed {}
}

/// Numeric primitives a [`NumberCodec`] can target.
pub trait JsonNumber: sealed::Sealed + Copy {
    #[doc(hidden)]
    fn from_token(token: &str) -> Option<Self>;
    #[doc(hidden)]
    fn write_json(self, ctx: &mut EncodeContext);
}

macro_rules! integer_json_number {
    ($($t:ty)*) => {$(
        impl sealed::Sealed for $t {}

        impl JsonNumber for $t {
            #[inline]
            fn from_token(token: &str) -> Option<Self> {
                token.parse().ok()
            }

            #[inline]
            fn write_json(self, ctx: &mut EncodeContext) {
                let _ = write!(ctx, "{}", self);
            }
        }
    )*};
}

macro_rules! float_json_number {
    ($($t:ty)*) => {$(
        impl sealed::Sealed for $t {}

        impl JsonNumber for $t {
            #[inline]
            fn from_token(token: &str) -> Option<Self> {
                token.parse().ok()
            }

            #[inline]
            fn write_json(self, ctx: &mut EncodeContext) {
                if self.is_finite() {
                    let _ = write!(ctx, "{}", self);
                } else {
                    ctx.append_bytes(b"null");
                }
            }
        }
    )*};
}

integer_json_number!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);
float_json_number!(f32 f64);

/// Codec for a native numeric primitive.
///
/// Decoding scans one number token and parses it with the target type's
/// `FromStr`; a token the type cannot represent (fraction or exponent for
/// an integer, out of range, negative for unsigned) is a decode error.
#[derive(Debug, Default)]
pub struct NumberCodec<T> {
    _marker: PhantomData<T>,
}

impl<T> NumberCodec<T> {
    #[inline]
    pub const fn new() -> Self {
        NumberCodec { _marker: PhantomData }
    }
}

impl<T> Clone for NumberCodec<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NumberCodec<T> {}

impl<T: JsonNumber> Codec for NumberCodec<T> {
    type Value = T;

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<T> {
        let start = ctx.offset(0);
        let token = scanner::advance_past_number(ctx)?;
        // SAFETY: the scanner only admits ASCII bytes into a number token.
        let token = unsafe { std::str::from_utf8_unchecked(token) };
        T::from_token(token).ok_or_else(|| DecodeError::new(DecodeErrorKind::InvalidNumber, start))
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> EncodeResult<()> {
        value.write_json(ctx);
        Ok(())
    }
}

/// Codec for arbitrary-precision numbers backed by [`Decimal`].
///
/// Magnitudes below the representable range collapse to zero; magnitudes
/// above it are a decode error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalCodec;

impl Codec for DecimalCodec {
    type Value = Decimal;

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<Decimal> {
        let start = ctx.offset(0);
        let token = scanner::advance_past_number(ctx)?;
        // SAFETY: the scanner only admits ASCII bytes into a number token.
        let token = unsafe { std::str::from_utf8_unchecked(token) };
        match Decimal::from_str(token) {
            Ok(value) => Ok(value),
            Err(DecimalParseError::Underflow) => Ok(Decimal::ZERO),
            Err(_) => Err(DecodeError::new(DecodeErrorKind::InvalidNumber, start)),
        }
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, value: &Decimal) -> EncodeResult<()> {
        // The context's writer is infallible, so formatting cannot fail.
        value.format_to_json(ctx).expect("failed to format number");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode<C: Codec>(codec: C, input: &str) -> DecodeResult<C::Value> {
        let mut ctx = DecodeContext::new(input.as_bytes());
        codec.decode(&mut ctx)
    }

    fn encode<C: Codec>(codec: C, value: C::Value) -> String {
        let mut ctx = EncodeContext::new();
        codec.encode(&mut ctx, &value).unwrap();
        String::from_utf8(ctx.into_bytes()).unwrap()
    }

    #[test]
    fn test_decode_integers() {
        assert_eq!(decode(NumberCodec::<i32>::new(), "0").unwrap(), 0);
        assert_eq!(decode(NumberCodec::<i32>::new(), "-123").unwrap(), -123);
        assert_eq!(decode(NumberCodec::<u8>::new(), "255").unwrap(), 255);
        assert_eq!(
            decode(NumberCodec::<i64>::new(), "9007199254740993").unwrap(),
            9007199254740993
        );

        assert!(decode(NumberCodec::<u8>::new(), "256").is_err());
        assert!(decode(NumberCodec::<u32>::new(), "-1").is_err());
        assert!(decode(NumberCodec::<i32>::new(), "1.5").is_err());
        assert!(decode(NumberCodec::<i32>::new(), "1e3").is_err());
    }

    #[test]
    fn test_decode_floats() {
        assert_eq!(decode(NumberCodec::<f64>::new(), "12.75").unwrap(), 12.75);
        assert_eq!(decode(NumberCodec::<f64>::new(), "-2.5e2").unwrap(), -250.0);
        assert_eq!(decode(NumberCodec::<f32>::new(), "0.25").unwrap(), 0.25);
        assert_eq!(decode(NumberCodec::<f64>::new(), "3").unwrap(), 3.0);
    }

    #[test]
    fn test_decode_error_offset() {
        let mut ctx = DecodeContext::new(b"1.");
        let err = NumberCodec::<f64>::new().decode(&mut ctx).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::InvalidNumber);
        assert_eq!(err.position(), 2);

        // range errors point at the token start
        let mut ctx = DecodeContext::new(b"999");
        let err = NumberCodec::<u8>::new().decode(&mut ctx).unwrap_err();
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn test_encode_integers() {
        assert_eq!(encode(NumberCodec::<i32>::new(), -42), "-42");
        assert_eq!(encode(NumberCodec::<u64>::new(), 18446744073709551615), "18446744073709551615");
    }

    #[test]
    fn test_encode_floats() {
        assert_eq!(encode(NumberCodec::<f64>::new(), 12.75), "12.75");
        assert_eq!(encode(NumberCodec::<f64>::new(), -0.5), "-0.5");
        assert_eq!(encode(NumberCodec::<f64>::new(), 3.0), "3");
        assert_eq!(encode(NumberCodec::<f64>::new(), f64::NAN), "null");
        assert_eq!(encode(NumberCodec::<f64>::new(), f64::INFINITY), "null");
    }

    #[test]
    fn test_decimal() {
        let value = decode(DecimalCodec, "1234567890.123456789").unwrap();
        assert_eq!(value, Decimal::from_str("1234567890.123456789").unwrap());

        // underflow collapses to zero, overflow fails
        assert_eq!(decode(DecimalCodec, "1e-150").unwrap(), Decimal::ZERO);
        assert!(decode(DecimalCodec, "1e150").is_err());

        assert_eq!(encode(DecimalCodec, Decimal::from(123)), "123");
        assert_eq!(
            encode(DecimalCodec, Decimal::from_str("-12.5").unwrap()),
            "-12.5"
        );
    }
}

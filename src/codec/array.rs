//! Array codec.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;

/// Codec for a JSON array of homogeneous elements, backed by `Vec`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCodec<C> {
    element: C,
}

impl<C> ArrayCodec<C> {
    #[inline]
    pub const fn new(element: C) -> Self {
        ArrayCodec { element }
    }
}

impl<C: Codec> Codec for ArrayCodec<C> {
    type Value = Vec<C::Value>;

    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<Vec<C::Value>> {
        let mut values = Vec::new();
        scanner::advance_past_comma_separated(ctx, b'[', b']', |ctx| {
            values.push(self.element.decode(ctx)?);
            Ok(())
        })?;
        Ok(values)
    }

    fn encode(&self, ctx: &mut EncodeContext, values: &Vec<C::Value>) -> EncodeResult<()> {
        ctx.append(b'[');
        for value in values {
            self.element.encode(ctx, value)?;
            ctx.append(b',');
        }
        ctx.append_or_replace(b',', b']');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NumberCodec;

    #[test]
    fn test_decode() {
        let codec = ArrayCodec::new(NumberCodec::<i32>::new());

        let mut ctx = DecodeContext::new(b"[]");
        assert_eq!(codec.decode(&mut ctx).unwrap(), Vec::<i32>::new());

        let mut ctx = DecodeContext::new(b"[ 1 , 2 , 3 ]");
        assert_eq!(codec.decode(&mut ctx).unwrap(), vec![1, 2, 3]);

        let mut ctx = DecodeContext::new(b"[1,]");
        assert!(codec.decode(&mut ctx).is_err());
    }

    #[test]
    fn test_decode_nested() {
        let codec = ArrayCodec::new(ArrayCodec::new(NumberCodec::<i32>::new()));
        let mut ctx = DecodeContext::new(b"[[1,2],[],[3]]");
        assert_eq!(codec.decode(&mut ctx).unwrap(), vec![vec![1, 2], vec![], vec![3]]);
    }

    #[test]
    fn test_encode() {
        let codec = ArrayCodec::new(NumberCodec::<i32>::new());

        let mut ctx = EncodeContext::new();
        codec.encode(&mut ctx, &vec![]).unwrap();
        assert_eq!(ctx.data(), b"[]");

        let mut ctx = EncodeContext::new();
        codec.encode(&mut ctx, &vec![1, 2, 3]).unwrap();
        assert_eq!(ctx.data(), b"[1,2,3]");
    }
}

//! Boolean codec.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeErrorKind, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;

/// Codec for the `true` and `false` literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    type Value = bool;

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<bool> {
        match scanner::peek(ctx) {
            b't' => {
                scanner::advance_past_true(ctx)?;
                Ok(true)
            }
            b'f' => {
                scanner::advance_past_false(ctx)?;
                Ok(false)
            }
            _ => Err(ctx.error(DecodeErrorKind::UnexpectedInput)),
        }
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, value: &bool) -> EncodeResult<()> {
        ctx.append_bytes(if *value { b"true" } else { b"false" });
        Ok(())
    }
}

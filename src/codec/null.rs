//! Null codec.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;

/// Codec for the `null` literal, represented in memory as `()`.
///
/// Useful as the child codec of a field that must be present but carries
/// no data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCodec;

impl Codec for NullCodec {
    type Value = ();

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<()> {
        scanner::advance_past_null(ctx)
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, _value: &()) -> EncodeResult<()> {
        ctx.append_bytes(b"null");
        Ok(())
    }
}

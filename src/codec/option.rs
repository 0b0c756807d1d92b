//! Optional codec.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeResult};
use crate::encode::{EncodeContext, EncodeError, EncodeResult};
use crate::scanner;

/// Codec wrapping another codec's value in `Option`.
///
/// `null` decodes as `None`. A `None` suppresses its key in a containing
/// object rather than emitting `null`; encoding a bare `None` is an
/// error.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionCodec<C> {
    inner: C,
}

impl<C> OptionCodec<C> {
    #[inline]
    pub const fn new(inner: C) -> Self {
        OptionCodec { inner }
    }
}

impl<C: Codec> Codec for OptionCodec<C> {
    type Value = Option<C::Value>;

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<Option<C::Value>> {
        if scanner::peek(ctx) == b'n' {
            scanner::advance_past_null(ctx)?;
            Ok(None)
        } else {
            Ok(Some(self.inner.decode(ctx)?))
        }
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, value: &Option<C::Value>) -> EncodeResult<()> {
        match value {
            Some(inner) => self.inner.encode(ctx, inner),
            None => Err(EncodeError::UninitializedOptional),
        }
    }

    #[inline]
    fn should_encode(&self, value: &Option<C::Value>) -> bool {
        match value {
            Some(inner) => self.inner.should_encode(inner),
            None => false,
        }
    }
}

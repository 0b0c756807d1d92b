//! Map codec.

use crate::codec::string::encode_string;
use crate::codec::{advance_past_object, Codec};
use crate::decode::{DecodeContext, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use std::marker::PhantomData;

/// Codec for a JSON object with arbitrary string keys and homogeneous
/// values, backed by any string-keyed map (`HashMap`, `BTreeMap`).
///
/// Duplicate keys on decode resolve to the last occurrence. Entries whose
/// value fails the inner codec's `should_encode` are suppressed on
/// encode, just like object fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapCodec<C, M> {
    inner: C,
    _marker: PhantomData<M>,
}

impl<C, M> MapCodec<C, M> {
    #[inline]
    pub const fn new(inner: C) -> Self {
        MapCodec {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<C, M> Codec for MapCodec<C, M>
where
    C: Codec,
    M: Default + Extend<(String, C::Value)>,
    for<'m> &'m M: IntoIterator<Item = (&'m String, &'m C::Value)>,
{
    type Value = M;

    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<M> {
        let mut map = M::default();
        advance_past_object(ctx, |ctx, key| {
            let value = self.inner.decode(ctx)?;
            map.extend(std::iter::once((key, value)));
            Ok(())
        })?;
        Ok(map)
    }

    fn encode(&self, ctx: &mut EncodeContext, map: &M) -> EncodeResult<()> {
        ctx.append(b'{');
        for (key, value) in map {
            if self.inner.should_encode(value) {
                encode_string(ctx, key);
                ctx.append(b':');
                self.inner.encode(ctx, value)?;
                ctx.append(b',');
            }
        }
        ctx.append_or_replace(b',', b'}');
        Ok(())
    }
}

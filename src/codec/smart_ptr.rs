//! Smart pointer codecs.

use crate::codec::Codec;
use crate::decode::{DecodeContext, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use std::marker::PhantomData;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

/// Codec decoding into an owning pointer around the inner codec's value.
///
/// Works for any pointer type that can be built from the value and
/// dereferences back to it; `should_encode` sees through the pointer, so
/// wrapping does not change emission behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartPtrCodec<C, P> {
    inner: C,
    _marker: PhantomData<P>,
}

pub type BoxCodec<C> = SmartPtrCodec<C, Box<<C as Codec>::Value>>;
pub type RcCodec<C> = SmartPtrCodec<C, Rc<<C as Codec>::Value>>;
pub type ArcCodec<C> = SmartPtrCodec<C, Arc<<C as Codec>::Value>>;

impl<C, P> SmartPtrCodec<C, P> {
    #[inline]
    pub const fn new(inner: C) -> Self {
        SmartPtrCodec {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<C, P> Codec for SmartPtrCodec<C, P>
where
    C: Codec,
    P: Deref<Target = C::Value> + From<C::Value>,
{
    type Value = P;

    #[inline]
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<P> {
        Ok(P::from(self.inner.decode(ctx)?))
    }

    #[inline]
    fn encode(&self, ctx: &mut EncodeContext, value: &P) -> EncodeResult<()> {
        self.inner.encode(ctx, &**value)
    }

    #[inline]
    fn should_encode(&self, value: &P) -> bool {
        self.inner.should_encode(&**value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{NumberCodec, OptionCodec, StringCodec};

    #[test]
    fn test_box() {
        let codec = BoxCodec::<StringCodec>::new(StringCodec);

        let mut ctx = DecodeContext::new(br#""boxed""#);
        assert_eq!(*codec.decode(&mut ctx).unwrap(), "boxed");

        let mut ctx = EncodeContext::new();
        codec.encode(&mut ctx, &Box::new("boxed".to_string())).unwrap();
        assert_eq!(ctx.data(), br#""boxed""#);
    }

    #[test]
    fn test_rc_and_arc() {
        let codec = RcCodec::<NumberCodec<i32>>::new(NumberCodec::new());
        let mut ctx = DecodeContext::new(b"7");
        assert_eq!(*codec.decode(&mut ctx).unwrap(), 7);

        let codec = ArcCodec::<NumberCodec<i32>>::new(NumberCodec::new());
        let mut ctx = DecodeContext::new(b"7");
        assert_eq!(*codec.decode(&mut ctx).unwrap(), 7);
    }

    #[test]
    fn test_should_encode_sees_through() {
        let codec = BoxCodec::<OptionCodec<NumberCodec<i32>>>::new(OptionCodec::new(NumberCodec::new()));
        assert!(!codec.should_encode(&Box::new(None)));
        assert!(codec.should_encode(&Box::new(Some(1))));
    }
}

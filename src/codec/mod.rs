//! Codecs.

mod array;
mod boolean;
mod map;
mod null;
mod number;
mod object;
mod option;
mod smart_ptr;
mod string;

pub use array::ArrayCodec;
pub use boolean::BooleanCodec;
pub use map::MapCodec;
pub use null::NullCodec;
pub use number::{DecimalCodec, JsonNumber, NumberCodec};
pub use object::ObjectCodec;
pub use option::OptionCodec;
pub use smart_ptr::{ArcCodec, BoxCodec, RcCodec, SmartPtrCodec};
pub use string::StringCodec;

use crate::decode::{DecodeContext, DecodeResult};
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;

/// The contract every codec obeys.
///
/// A codec pairs a decoder and an encoder for one statically known value
/// type, plus a predicate that lets optional-like codecs suppress their
/// key in a containing object. Codecs are immutable after construction
/// and compose freely: an [`OptionCodec`] wraps a codec for its inner
/// type, an [`ArrayCodec`] wraps a codec for its element type, and an
/// [`ObjectCodec`] wraps one codec per field.
pub trait Codec {
    /// The in-memory type this codec reads and writes.
    type Value;

    /// Decodes one JSON value with the cursor on its first byte, leaving
    /// the cursor on the byte after it.
    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<Self::Value>;

    /// Appends the compact JSON encoding of `value` to the context.
    fn encode(&self, ctx: &mut EncodeContext, value: &Self::Value) -> EncodeResult<()>;

    /// Whether a containing object should emit this value at all. When
    /// this returns `false` the object suppresses both the key and the
    /// value.
    #[inline]
    fn should_encode(&self, _value: &Self::Value) -> bool {
        true
    }
}

/// Drives the key/value pairs of a JSON object. Each key is decoded
/// through the string codec (escapes fully applied), the `:` is consumed,
/// and `entry` is invoked with the cursor on the first byte of the value.
pub(crate) fn advance_past_object<'a, F>(ctx: &mut DecodeContext<'a>, mut entry: F) -> DecodeResult<()>
where
    F: FnMut(&mut DecodeContext<'a>, String) -> DecodeResult<()>,
{
    scanner::advance_past_comma_separated(ctx, b'{', b'}', |ctx| {
        let key = StringCodec.decode(ctx)?;
        scanner::skip_past_whitespace(ctx);
        scanner::advance_past(ctx, b':')?;
        scanner::skip_past_whitespace(ctx);
        entry(ctx, key)
    })
}

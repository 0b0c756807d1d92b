//! Default codec resolution.

use crate::codec::{
    ArrayCodec, BooleanCodec, Codec, DecimalCodec, MapCodec, NullCodec, NumberCodec, OptionCodec, SmartPtrCodec,
    StringCodec,
};
use decimal_rs::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

/// Types with a canonical codec.
///
/// The resolution is type-directed and composes structurally: the codec
/// for `Vec<T>` wraps the codec for `T`, the codec for `Option<T>` wraps
/// the codec for `T`, and so on. A user record type participates by
/// implementing this trait to return its [`ObjectCodec`]; object fields
/// registered without an explicit codec resolve their child codec here.
///
/// Every implementation round-trips its values losslessly, subject to the
/// value type's own precision limits.
///
/// [`ObjectCodec`]: crate::ObjectCodec
pub trait DefaultCodec: Sized {
    type Codec: Codec<Value = Self>;

    fn default_codec() -> Self::Codec;
}

/// Resolves the canonical codec for `T`.
#[inline]
pub fn default_codec<T: DefaultCodec>() -> T::Codec {
    T::default_codec()
}

impl DefaultCodec for bool {
    type Codec = BooleanCodec;

    #[inline]
    fn default_codec() -> BooleanCodec {
        BooleanCodec
    }
}

macro_rules! number_default_codec {
    ($($t:ty)*) => {$(
        impl DefaultCodec for $t {
            type Codec = NumberCodec<$t>;

            #[inline]
            fn default_codec() -> NumberCodec<$t> {
                NumberCodec::new()
            }
        }
    )*};
}

number_default_codec!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize f32 f64);

impl DefaultCodec for Decimal {
    type Codec = DecimalCodec;

    #[inline]
    fn default_codec() -> DecimalCodec {
        DecimalCodec
    }
}

impl DefaultCodec for String {
    type Codec = StringCodec;

    #[inline]
    fn default_codec() -> StringCodec {
        StringCodec
    }
}

impl DefaultCodec for () {
    type Codec = NullCodec;

    #[inline]
    fn default_codec() -> NullCodec {
        NullCodec
    }
}

impl<T: DefaultCodec> DefaultCodec for Vec<T> {
    type Codec = ArrayCodec<T::Codec>;

    #[inline]
    fn default_codec() -> Self::Codec {
        ArrayCodec::new(T::default_codec())
    }
}

impl<T: DefaultCodec> DefaultCodec for Option<T> {
    type Codec = OptionCodec<T::Codec>;

    #[inline]
    fn default_codec() -> Self::Codec {
        OptionCodec::new(T::default_codec())
    }
}

impl<V: DefaultCodec> DefaultCodec for HashMap<String, V> {
    type Codec = MapCodec<V::Codec, HashMap<String, V>>;

    #[inline]
    fn default_codec() -> Self::Codec {
        MapCodec::new(V::default_codec())
    }
}

impl<V: DefaultCodec> DefaultCodec for BTreeMap<String, V> {
    type Codec = MapCodec<V::Codec, BTreeMap<String, V>>;

    #[inline]
    fn default_codec() -> Self::Codec {
        MapCodec::new(V::default_codec())
    }
}

impl<T: DefaultCodec> DefaultCodec for Box<T> {
    type Codec = SmartPtrCodec<T::Codec, Box<T>>;

    #[inline]
    fn default_codec() -> Self::Codec {
        SmartPtrCodec::new(T::default_codec())
    }
}

impl<T: DefaultCodec> DefaultCodec for Rc<T> {
    type Codec = SmartPtrCodec<T::Codec, Rc<T>>;

    #[inline]
    fn default_codec() -> Self::Codec {
        SmartPtrCodec::new(T::default_codec())
    }
}

impl<T: DefaultCodec> DefaultCodec for Arc<T> {
    type Codec = SmartPtrCodec<T::Codec, Arc<T>>;

    #[inline]
    fn default_codec() -> Self::Codec {
        SmartPtrCodec::new(T::default_codec())
    }
}

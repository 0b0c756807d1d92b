//! Object codec.

use crate::codec::string::encode_string;
use crate::codec::{advance_past_object, Codec};
use crate::decode::{DecodeContext, DecodeErrorKind, DecodeResult};
use crate::default_codec::DefaultCodec;
use crate::encode::{EncodeContext, EncodeResult};
use crate::scanner;
use std::collections::HashMap;

/// Presence tracking of required fields uses a single 64-bit word.
const MAX_REQUIRED_FIELDS: usize = 64;

/// Schema-describing codec that decodes a JSON object into a record of
/// type `T` and encodes it back.
///
/// The schema is built by registering fields, each binding a JSON key to
/// an accessor on `T` and a child codec for the field's value type.
/// Unknown keys in the input are skipped; duplicate keys are allowed and
/// the last occurrence wins; decoding fails unless every required key
/// appeared at least once. Fields are emitted in registration order,
/// each key pre-escaped once at registration.
///
/// Registering the same key twice, or more than 64 required fields, is a
/// schema bug and panics.
///
/// An `ObjectCodec` is immutable once built and can be shared across
/// threads.
pub struct ObjectCodec<T> {
    construct: Construct<T>,
    fields: Vec<FieldEntry<T>>,
    index: HashMap<String, usize>,
    num_required: usize,
}

enum Construct<T> {
    Default(fn() -> T),
    Factory(Box<dyn Fn() -> T + Send + Sync>),
}

struct FieldEntry<T> {
    /// Key pre-encoded as a JSON string plus the trailing `:`.
    escaped_key: Box<[u8]>,
    /// Dense index in `[0, num_required)` when the field is required.
    required_index: Option<usize>,
    field: Box<dyn Field<T> + Send + Sync>,
}

/// Per-field dispatch, type-erased over the field's value type and codec.
trait Field<T> {
    fn decode(&self, ctx: &mut DecodeContext, target: &mut T) -> DecodeResult<()>;
    fn encode(&self, ctx: &mut EncodeContext, escaped_key: &[u8], target: &T) -> EncodeResult<()>;
}

/// How a field's value is read from and written into the target record.
enum Access<T, V> {
    Member {
        get: fn(&T) -> &V,
        set: fn(&mut T) -> &mut V,
    },
    Property {
        get: fn(&T) -> V,
        set: fn(&mut T, V),
    },
    Custom {
        get: Box<dyn Fn(&T) -> V + Send + Sync>,
        set: Box<dyn Fn(&mut T, V) + Send + Sync>,
    },
}

struct BoundField<C: Codec, T> {
    codec: C,
    access: Access<T, C::Value>,
}

impl<C: Codec, T> BoundField<C, T> {
    fn encode_value(&self, ctx: &mut EncodeContext, escaped_key: &[u8], value: &C::Value) -> EncodeResult<()> {
        if self.codec.should_encode(value) {
            ctx.append_bytes(escaped_key);
            self.codec.encode(ctx, value)?;
            ctx.append(b',');
        }
        Ok(())
    }
}

impl<C: Codec, T> Field<T> for BoundField<C, T> {
    fn decode(&self, ctx: &mut DecodeContext, target: &mut T) -> DecodeResult<()> {
        let value = self.codec.decode(ctx)?;
        match &self.access {
            Access::Member { set, .. } => *set(target) = value,
            Access::Property { set, .. } => set(target, value),
            Access::Custom { set, .. } => set(target, value),
        }
        Ok(())
    }

    fn encode(&self, ctx: &mut EncodeContext, escaped_key: &[u8], target: &T) -> EncodeResult<()> {
        match &self.access {
            Access::Member { get, .. } => self.encode_value(ctx, escaped_key, get(target)),
            Access::Property { get, .. } => self.encode_value(ctx, escaped_key, &get(target)),
            Access::Custom { get, .. } => self.encode_value(ctx, escaped_key, &get(target)),
        }
    }
}

/// Field with a codec but no storage in the target record: decodes and
/// discards on the way in, emits a default-constructed sentinel on the
/// way out.
struct DummyField<C> {
    codec: C,
}

impl<C, T> Field<T> for DummyField<C>
where
    C: Codec,
    C::Value: Default,
{
    fn decode(&self, ctx: &mut DecodeContext, _target: &mut T) -> DecodeResult<()> {
        self.codec.decode(ctx)?;
        Ok(())
    }

    fn encode(&self, ctx: &mut EncodeContext, escaped_key: &[u8], _target: &T) -> EncodeResult<()> {
        let value = C::Value::default();
        if self.codec.should_encode(&value) {
            ctx.append_bytes(escaped_key);
            self.codec.encode(ctx, &value)?;
            ctx.append(b',');
        }
        Ok(())
    }
}

impl<T: Default> ObjectCodec<T> {
    /// Creates an object codec for a default-constructible target.
    #[inline]
    pub fn new() -> Self {
        Self::with_construct(Construct::Default(T::default))
    }
}

impl<T: Default> Default for ObjectCodec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectCodec<T> {
    /// Creates an object codec whose decode builds the target record
    /// through `factory`. Required when `T` is not default-constructible.
    #[inline]
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::with_construct(Construct::Factory(Box::new(factory)))
    }

    fn with_construct(construct: Construct<T>) -> Self {
        ObjectCodec {
            construct,
            fields: Vec::new(),
            index: HashMap::new(),
            num_required: 0,
        }
    }

    #[inline]
    fn construct(&self) -> T {
        match &self.construct {
            Construct::Default(default) => default(),
            Construct::Factory(factory) => factory(),
        }
    }

    /// Number of registered fields.
    #[inline]
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Number of registered required fields.
    #[inline]
    pub fn num_required_fields(&self) -> usize {
        self.num_required
    }
}

impl<T: 'static> ObjectCodec<T> {
    /// Registers a required field stored as a plain member of `T`,
    /// using the value type's default codec.
    pub fn required<V>(&mut self, key: &str, get: fn(&T) -> &V, set: fn(&mut T) -> &mut V) -> &mut Self
    where
        V: DefaultCodec + 'static,
        V::Codec: Send + Sync + 'static,
    {
        self.required_with(key, get, set, V::default_codec())
    }

    /// Registers an optional field stored as a plain member of `T`,
    /// using the value type's default codec.
    pub fn optional<V>(&mut self, key: &str, get: fn(&T) -> &V, set: fn(&mut T) -> &mut V) -> &mut Self
    where
        V: DefaultCodec + 'static,
        V::Codec: Send + Sync + 'static,
    {
        self.optional_with(key, get, set, V::default_codec())
    }

    /// Registers a required member field with an explicit child codec.
    pub fn required_with<C>(
        &mut self,
        key: &str,
        get: fn(&T) -> &C::Value,
        set: fn(&mut T) -> &mut C::Value,
        codec: C,
    ) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: 'static,
    {
        self.add_field(key, true, Access::Member { get, set }, codec)
    }

    /// Registers an optional member field with an explicit child codec.
    pub fn optional_with<C>(
        &mut self,
        key: &str,
        get: fn(&T) -> &C::Value,
        set: fn(&mut T) -> &mut C::Value,
        codec: C,
    ) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: 'static,
    {
        self.add_field(key, false, Access::Member { get, set }, codec)
    }

    /// Registers a required field accessed through a by-value getter and
    /// setter pair, using the value type's default codec.
    pub fn required_property<V>(&mut self, key: &str, get: fn(&T) -> V, set: fn(&mut T, V)) -> &mut Self
    where
        V: DefaultCodec + 'static,
        V::Codec: Send + Sync + 'static,
    {
        self.required_property_with(key, get, set, V::default_codec())
    }

    /// Registers an optional field accessed through a by-value getter and
    /// setter pair, using the value type's default codec.
    pub fn optional_property<V>(&mut self, key: &str, get: fn(&T) -> V, set: fn(&mut T, V)) -> &mut Self
    where
        V: DefaultCodec + 'static,
        V::Codec: Send + Sync + 'static,
    {
        self.optional_property_with(key, get, set, V::default_codec())
    }

    /// Registers a required getter/setter field with an explicit codec.
    pub fn required_property_with<C>(
        &mut self,
        key: &str,
        get: fn(&T) -> C::Value,
        set: fn(&mut T, C::Value),
        codec: C,
    ) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: 'static,
    {
        self.add_field(key, true, Access::Property { get, set }, codec)
    }

    /// Registers an optional getter/setter field with an explicit codec.
    pub fn optional_property_with<C>(
        &mut self,
        key: &str,
        get: fn(&T) -> C::Value,
        set: fn(&mut T, C::Value),
        codec: C,
    ) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: 'static,
    {
        self.add_field(key, false, Access::Property { get, set }, codec)
    }

    /// Registers a required field accessed through arbitrary reader and
    /// writer closures, using the value type's default codec.
    pub fn required_custom<V, G, S>(&mut self, key: &str, get: G, set: S) -> &mut Self
    where
        V: DefaultCodec + 'static,
        V::Codec: Send + Sync + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.required_custom_with(key, get, set, V::default_codec())
    }

    /// Registers an optional field accessed through arbitrary reader and
    /// writer closures, using the value type's default codec.
    pub fn optional_custom<V, G, S>(&mut self, key: &str, get: G, set: S) -> &mut Self
    where
        V: DefaultCodec + 'static,
        V::Codec: Send + Sync + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.optional_custom_with(key, get, set, V::default_codec())
    }

    /// Registers a required reader/writer field with an explicit codec.
    pub fn required_custom_with<C, G, S>(&mut self, key: &str, get: G, set: S, codec: C) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: 'static,
        G: Fn(&T) -> C::Value + Send + Sync + 'static,
        S: Fn(&mut T, C::Value) + Send + Sync + 'static,
    {
        self.add_field(
            key,
            true,
            Access::Custom {
                get: Box::new(get),
                set: Box::new(set),
            },
            codec,
        )
    }

    /// Registers an optional reader/writer field with an explicit codec.
    pub fn optional_custom_with<C, G, S>(&mut self, key: &str, get: G, set: S, codec: C) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: 'static,
        G: Fn(&T) -> C::Value + Send + Sync + 'static,
        S: Fn(&mut T, C::Value) + Send + Sync + 'static,
    {
        self.add_field(
            key,
            false,
            Access::Custom {
                get: Box::new(get),
                set: Box::new(set),
            },
            codec,
        )
    }

    /// Registers a required field with no storage in the target record.
    /// The value is decoded and discarded; encoding emits the codec's
    /// default-constructed sentinel.
    pub fn required_dummy<C>(&mut self, key: &str, codec: C) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: Default,
    {
        self.save_field(key, true, Box::new(DummyField { codec }))
    }

    /// Registers an optional field with no storage in the target record.
    pub fn optional_dummy<C>(&mut self, key: &str, codec: C) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: Default,
    {
        self.save_field(key, false, Box::new(DummyField { codec }))
    }

    fn add_field<C>(&mut self, key: &str, required: bool, access: Access<T, C::Value>, codec: C) -> &mut Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: 'static,
    {
        self.save_field(key, required, Box::new(BoundField { codec, access }))
    }

    fn save_field(&mut self, key: &str, required: bool, field: Box<dyn Field<T> + Send + Sync>) -> &mut Self {
        assert!(!self.index.contains_key(key), "duplicate field key `{key}`");

        let required_index = if required {
            assert!(
                self.num_required < MAX_REQUIRED_FIELDS,
                "more than {MAX_REQUIRED_FIELDS} required fields"
            );
            let index = self.num_required;
            self.num_required += 1;
            Some(index)
        } else {
            None
        };

        self.index.insert(key.to_string(), self.fields.len());
        self.fields.push(FieldEntry {
            escaped_key: escape_key(key),
            required_index,
            field,
        });
        self
    }
}

/// Pre-encodes a field key with its trailing `:` for single-append
/// emission.
fn escape_key(key: &str) -> Box<[u8]> {
    let mut ctx = EncodeContext::new();
    encode_string(&mut ctx, key);
    ctx.append(b':');
    ctx.into_bytes().into_boxed_slice()
}

impl<T> Codec for ObjectCodec<T> {
    type Value = T;

    fn decode(&self, ctx: &mut DecodeContext) -> DecodeResult<T> {
        let mut seen_required: u64 = 0;
        let mut unique_seen_required: usize = 0;
        let mut output = self.construct();

        advance_past_object(ctx, |ctx, key| {
            let entry = match self.index.get(key.as_str()) {
                Some(&index) => &self.fields[index],
                None => return scanner::skip_value(ctx),
            };

            entry.field.decode(ctx, &mut output)?;
            if let Some(index) = entry.required_index {
                let bit = 1u64 << index;
                // duplicate required keys only count once
                unique_seen_required += usize::from(seen_required & bit == 0);
                seen_required |= bit;
            }
            Ok(())
        })?;

        if unique_seen_required != self.num_required {
            return Err(ctx.error(DecodeErrorKind::MissingRequiredFields));
        }
        Ok(output)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> EncodeResult<()> {
        ctx.append(b'{');
        for entry in &self.fields {
            entry.field.encode(ctx, &entry.escaped_key, value)?;
        }
        ctx.append_or_replace(b',', b'}');
        Ok(())
    }
}

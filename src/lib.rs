//! Schema-driven JSON encoding and decoding for statically known types.
//!
//! This crate parses textual JSON directly into user-defined records and
//! serializes them back, without building an intermediate value tree. The
//! shape of a value is described declaratively with composable codecs: a
//! codec for a record with named fields, for an optional, for a map, for
//! a numeric scalar. Describing the shape once yields both directions.
//!
//! ## Scalars and containers
//!
//! Types with a canonical JSON form decode and encode through
//! [`decode`] and [`encode`] directly:
//!
//! ```rust
//! let values: Vec<i64> = jato::decode("[1, 2, 3]").unwrap();
//! assert_eq!(values, vec![1, 2, 3]);
//! assert_eq!(jato::encode(&values).unwrap(), "[1,2,3]");
//! ```
//!
//! ## Records
//!
//! An [`ObjectCodec`] binds JSON keys to fields of a record. Implementing
//! [`DefaultCodec`] registers the schema as the type's canonical codec,
//! which lets it nest inside other schemas:
//!
//! ```rust
//! use jato::{DefaultCodec, ObjectCodec};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! impl DefaultCodec for Person {
//!     type Codec = ObjectCodec<Person>;
//!
//!     fn default_codec() -> ObjectCodec<Person> {
//!         let mut codec = ObjectCodec::new();
//!         codec.required("name", |p: &Person| &p.name, |p: &mut Person| &mut p.name);
//!         codec.optional("age", |p: &Person| &p.age, |p: &mut Person| &mut p.age);
//!         codec
//!     }
//! }
//!
//! let ada: Person = jato::decode(r#"{"name":"Ada","extra":[1,2],"age":36}"#).unwrap();
//! assert_eq!(ada, Person { name: "Ada".to_string(), age: Some(36) });
//!
//! // absent optionals are suppressed, fields emit in registration order
//! let bob = Person { name: "Bob".to_string(), age: None };
//! assert_eq!(jato::encode(&bob).unwrap(), r#"{"name":"Bob"}"#);
//! ```
//!
//! Decoding is strict: malformed input fails with a message and the byte
//! offset of the problem, required fields are enforced, and trailing
//! garbage after the root value is rejected. Unknown keys are skipped,
//! since JSON payloads tend to grow new fields. Encoding always produces
//! compact output.
//!
//! Codecs are immutable after construction and can be shared across
//! threads; each decode or encode invocation owns its context
//! exclusively.

mod decode;
mod default_codec;
mod encode;
mod json;

pub mod codec;
pub mod scanner;

pub use self::{
    codec::{
        ArcCodec, ArrayCodec, BooleanCodec, BoxCodec, Codec, DecimalCodec, JsonNumber, MapCodec, NullCodec,
        NumberCodec, ObjectCodec, OptionCodec, RcCodec, SmartPtrCodec, StringCodec,
    },
    decode::{DecodeContext, DecodeError, DecodeErrorKind, DecodeResult},
    default_codec::{default_codec, DefaultCodec},
    encode::{EncodeContext, EncodeError, EncodeResult},
    json::{decode, decode_with, encode, encode_to_vec, encode_to_vec_with, encode_with},
};
pub use decimal_rs::Decimal as Number;

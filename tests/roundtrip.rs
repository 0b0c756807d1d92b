//! Round-trip and canonical form tests.

use jato::{DefaultCodec, ObjectCodec};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq)]
struct Track {
    title: String,
    duration_ms: u64,
    explicit: bool,
    rating: Option<f64>,
    tags: Vec<String>,
    plays: BTreeMap<String, u64>,
}

impl DefaultCodec for Track {
    type Codec = ObjectCodec<Track>;

    fn default_codec() -> ObjectCodec<Track> {
        let mut codec = ObjectCodec::new();
        codec.required("title", |t: &Track| &t.title, |t: &mut Track| &mut t.title);
        codec.required(
            "duration_ms",
            |t: &Track| &t.duration_ms,
            |t: &mut Track| &mut t.duration_ms,
        );
        codec.optional("explicit", |t: &Track| &t.explicit, |t: &mut Track| &mut t.explicit);
        codec.optional("rating", |t: &Track| &t.rating, |t: &mut Track| &mut t.rating);
        codec.optional("tags", |t: &Track| &t.tags, |t: &mut Track| &mut t.tags);
        codec.optional("plays", |t: &Track| &t.plays, |t: &mut Track| &mut t.plays);
        codec
    }
}

fn sample_track() -> Track {
    Track {
        title: "Idioteque \"live\"".to_string(),
        duration_ms: 309_000,
        explicit: false,
        rating: Some(4.5),
        tags: vec!["electronic".to_string(), "idm".to_string()],
        plays: BTreeMap::from([("se".to_string(), 12), ("us".to_string(), 7)]),
    }
}

#[test]
fn test_value_roundtrip() {
    let track = sample_track();
    let encoded = jato::encode(&track).unwrap();
    let decoded: Track = jato::decode(&encoded).unwrap();
    assert_eq!(decoded, track);
}

#[test]
fn test_reencode_stability() {
    // compact encoding is canonical: decode∘encode is idempotent
    let inputs = [
        r#"{ "title" : "a", "duration_ms": 1 }"#,
        r#"{"title":"A","duration_ms":1,"rating":2.50e0}"#,
        r#"{"unknown":[1,{"k":null}],"title":"a","duration_ms":1}"#,
        r#"{"title":"a","title":"b","duration_ms":1}"#,
    ];

    for input in inputs {
        let once: Track = jato::decode(input).unwrap();
        let first = jato::encode(&once).unwrap();
        let twice: Track = jato::decode(&first).unwrap();
        let second = jato::encode(&twice).unwrap();
        assert_eq!(first, second, "re-encoding {input:?} changed the output");
    }
}

#[test]
fn test_output_is_valid_json() {
    let track = sample_track();
    let encoded = jato::encode(&track).unwrap();

    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "title": "Idioteque \"live\"",
            "duration_ms": 309000,
            "explicit": false,
            "rating": 4.5,
            "tags": ["electronic", "idm"],
            "plays": {"se": 12, "us": 7},
        })
    );
}

#[test]
fn test_agrees_with_serde_json_on_strings() {
    for raw in [
        "plain",
        "quote \" backslash \\",
        "control \u{1} \u{1f}",
        "tab\t newline\n",
        "unicode \u{6d4b}\u{8bd5} \u{1F600}",
    ] {
        let mine = jato::encode(&raw.to_string()).unwrap();
        let decoded: String = serde_json::from_str(&mine).unwrap();
        assert_eq!(decoded, raw, "serde_json disagreed on {mine}");

        let theirs = serde_json::to_string(raw).unwrap();
        let back: String = jato::decode(&theirs).unwrap();
        assert_eq!(back, raw, "failed to decode serde_json output {theirs}");
    }
}

#[test]
fn test_agrees_with_serde_json_on_numbers() {
    for raw in ["0", "-1", "123456789", "0.5", "-2.25", "1e3"] {
        let mine: f64 = jato::decode(raw).unwrap();
        let theirs: f64 = serde_json::from_str(raw).unwrap();
        assert_eq!(mine, theirs);
    }
}

#[test]
fn test_whitespace_and_duplicates_normalize() {
    let messy = "\n{\t\"duration_ms\" : 2 ,\r\n\"title\":\"x\", \"duration_ms\":3}";
    let track: Track = jato::decode(messy).unwrap();
    assert_eq!(track.duration_ms, 3);
    assert_eq!(
        jato::encode(&track).unwrap(),
        r#"{"title":"x","duration_ms":3,"explicit":false,"tags":[],"plays":{}}"#
    );
}

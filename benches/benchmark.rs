//! jato benchmark

use bencher::{benchmark_group, benchmark_main, black_box, Bencher};
use jato::{decode_with, encode_with, DecodeContext, DefaultCodec, ObjectCodec};

#[derive(Debug, Default, PartialEq)]
struct Track {
    title: String,
    duration_ms: u64,
    explicit: bool,
    rating: Option<f64>,
    tags: Vec<String>,
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
        codec
    }
}

const TRACK_JSON: &str =
    r#"{"title":"Idioteque","duration_ms":309000,"explicit":false,"rating":4.5,"tags":["electronic","idm"]}"#;

const NOISY_TRACK_JSON: &str = r#"{"title":"Idioteque","analysis":{"bars":[[0.1,0.2],[0.3,0.4]],"sections":{"count":12}},"duration_ms":309000,"popularity":[64,65,66,67,68,69,70,71]}"#;

fn bench_decode_object(bench: &mut Bencher) {
    let codec = Track::default_codec();
    bench.iter(|| {
        black_box(decode_with(&codec, black_box(TRACK_JSON)).unwrap());
    })
}

fn bench_decode_object_with_unknown_fields(bench: &mut Bencher) {
    let codec = Track::default_codec();
    bench.iter(|| {
        black_box(decode_with(&codec, black_box(NOISY_TRACK_JSON)).unwrap());
    })
}

fn bench_encode_object(bench: &mut Bencher) {
    let codec = Track::default_codec();
    let track = decode_with(&codec, TRACK_JSON).unwrap();
    bench.iter(|| {
        black_box(encode_with(&codec, black_box(&track)).unwrap());
    })
}

fn bench_decode_number_array(bench: &mut Bencher) {
    let input = "[1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16]";
    bench.iter(|| {
        black_box(jato::decode::<Vec<i64>, _>(black_box(input)).unwrap());
    })
}

fn bench_skip_value(bench: &mut Bencher) {
    bench.iter(|| {
        let mut ctx = DecodeContext::new(black_box(NOISY_TRACK_JSON.as_bytes()));
        jato::scanner::skip_value(&mut ctx).unwrap();
        black_box(ctx.remaining());
    })
}

fn bench_decode_string_with_escapes(bench: &mut Bencher) {
    let input = r#""a long string with \"escapes\" and é accents and \n newlines in it""#;
    bench.iter(|| {
        black_box(jato::decode::<String, _>(black_box(input)).unwrap());
    })
}

benchmark_group!(
    benches,
    bench_decode_object,
    bench_decode_object_with_unknown_fields,
    bench_encode_object,
    bench_decode_number_array,
    bench_skip_value,
    bench_decode_string_with_escapes,
);
benchmark_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jce_wire::{Decoder, Encoder, Result};

fn write_sample<W: std::io::Write>(enc: &mut Encoder<W>) -> Result<()> {
    enc.write_u32(70_000, 0)?;
    enc.write_string("bench-name", 1)?;
    enc.write_bytes(&[0x5a; 512], 2)?;
    enc.write_list_header(32, 3)?;
    for i in 0..32i64 {
        enc.write_i64(i * 1_000_003, 0)?;
    }
    enc.write_struct_field_begin(4)?;
    enc.write_string("nested", 0)?;
    enc.write_f64(0.5, 1)?;
    enc.write_struct_field_end()?;
    enc.write_bool(true, 20)
}

fn sample_wire() -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    write_sample(&mut enc).expect("sample must encode");
    enc.into_inner().expect("sample must flush")
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("jce_wire/encode_sample", |b| {
        b.iter(|| {
            let mut enc = Encoder::new(Vec::with_capacity(1024));
            write_sample(&mut enc).expect("encode should succeed");
            black_box(enc.into_inner().expect("flush should succeed"));
        });
    });
}

fn bench_decode_all_fields(c: &mut Criterion) {
    let wire = sample_wire();
    c.bench_function("jce_wire/decode_all_fields", |b| {
        b.iter(|| {
            let mut dec = Decoder::new(black_box(&wire[..]));
            let mut id = 0u32;
            let mut name = String::new();
            let mut blob = Vec::new();
            let mut flag = false;
            dec.read_u32(&mut id, 0, true).expect("id");
            dec.read_string(&mut name, 1, true).expect("name");
            dec.read_bytes(&mut blob, 2, true).expect("blob");
            let count = dec
                .read_list_len(3, true)
                .expect("list")
                .unwrap_or_default();
            for _ in 0..count {
                black_box(dec.read_int::<i64>(0, true).expect("element"));
            }
            if dec.read_struct_field(4, true).expect("struct") {
                dec.skip_to_struct_end().expect("struct end");
            }
            dec.read_bool(&mut flag, 20, true).expect("flag");
            black_box((id, name, blob, flag));
        });
    });
}

fn bench_skip_to_last_tag(c: &mut Criterion) {
    let wire = sample_wire();
    c.bench_function("jce_wire/skip_to_last_tag", |b| {
        b.iter(|| {
            let mut dec = Decoder::new(black_box(&wire[..]));
            let mut flag = false;
            dec.read_bool(&mut flag, 20, true).expect("skip");
            black_box(flag);
        });
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode_all_fields,
    bench_skip_to_last_tag
);
criterion_main!(benches);

//! StringBuilder benchmark: Measure per-frame text assembly.
//!
//! Target: no allocation once the buffer is warm, < 100ns per status line

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write;
use strand::{Case, StringBuilder};

fn builder_append_char(c: &mut Criterion) {
    c.bench_function("builder_append_char", |b| {
        let mut sb = StringBuilder::new();
        b.iter(|| {
            if sb.len() > 4096 {
                sb.clear();
            }
            sb.append_char(black_box('x'));
        });
    });
}

fn builder_append_int(c: &mut Criterion) {
    c.bench_function("builder_append_int", |b| {
        let mut sb = StringBuilder::new();
        b.iter(|| {
            sb.clear().append_int(black_box(-1_234_567_i32));
        });
    });
}

fn builder_append_float(c: &mut Criterion) {
    c.bench_function("builder_append_f32", |b| {
        let mut sb = StringBuilder::new();
        b.iter(|| {
            sb.clear().append_f32(black_box(16.666_666));
        });
    });
}

fn status_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("status_line");

    let mut sb = StringBuilder::new();
    group.bench_function("strand", |b| {
        b.iter(|| {
            sb.clear()
                .append("frame ")
                .append_int(black_box(48_213_u32))
                .append(" | ")
                .append_f32(black_box(16.67))
                .append(" ms");
            black_box(sb.as_str().len())
        });
    });

    let mut line = String::with_capacity(64);
    group.bench_function("string_write", |b| {
        b.iter(|| {
            line.clear();
            let _ = write!(line, "frame {} | {} ms", black_box(48_213_u32), black_box(16.67_f32));
            black_box(line.len())
        });
    });

    group.bench_function("format", |b| {
        b.iter(|| {
            let line = format!("frame {} | {} ms", black_box(48_213_u32), black_box(16.67_f32));
            black_box(line.len())
        });
    });

    group.finish();
}

fn builder_edits(c: &mut Criterion) {
    let text = "the quick brown fox jumps over the lazy dog ".repeat(20);

    c.bench_function("builder_insert_remove_middle", |b| {
        let mut sb = StringBuilder::from(text.as_str());
        b.iter(|| {
            sb.insert(black_box(400), "inserted").unwrap();
            sb.remove(black_box(400), 8).unwrap();
        });
    });

    c.bench_function("builder_replace_growing", |b| {
        let mut sb = StringBuilder::with_capacity(4096);
        b.iter(|| {
            sb.clear().append(&text);
            sb.replace(black_box("the"), "THE!").unwrap();
        });
    });

    c.bench_function("builder_replace_shrinking", |b| {
        let mut sb = StringBuilder::with_capacity(4096);
        b.iter(|| {
            sb.clear().append(&text);
            sb.replace(black_box("quick"), "q").unwrap();
        });
    });
}

fn builder_search(c: &mut Criterion) {
    let sb = StringBuilder::from("the quick brown fox jumps over the lazy dog ".repeat(20).as_str());

    c.bench_function("builder_index_of", |b| {
        b.iter(|| sb.index_of(black_box("lazy dog the"), 0, Case::Sensitive));
    });

    c.bench_function("builder_index_of_ignore_case", |b| {
        b.iter(|| sb.index_of(black_box("LAZY DOG THE"), 0, Case::Insensitive));
    });
}

fn builder_scale_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder_scale");

    for char_count in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("append_chars", char_count),
            &char_count,
            |b, &count| {
                b.iter(|| {
                    let mut sb = StringBuilder::with_capacity(1);
                    for _ in 0..count {
                        sb.append_char('x');
                    }
                    black_box(sb.capacity())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    builder_append_char,
    builder_append_int,
    builder_append_float,
    status_line,
    builder_edits,
    builder_search,
    builder_scale_comparison,
);
criterion_main!(benches);

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bandscore_core::model::{Section, WritingRubric};
use bandscore_core::scoring::{overall_band, score_answers, WritingScorer};
use bandscore_core::statistics::band_from_fraction;

fn make_essay(words: usize) -> String {
    let mut out = String::new();
    for i in 0..words {
        if i == 3 {
            out.push_str("however ");
        }
        out.push_str("lorem");
        out.push(if i % 15 == 14 { '.' } else { ' ' });
        out.push(' ');
    }
    out
}

fn make_sheet(n: usize) -> (HashMap<String, String>, HashMap<String, String>) {
    let key: HashMap<String, String> = (0..n)
        .map(|i| (format!("q{i}"), format!("answer {i}")))
        .collect();
    let answers = key
        .iter()
        .map(|(k, v)| {
            let v = if k.ends_with('3') {
                "wrong".to_string()
            } else {
                v.to_uppercase()
            };
            (k.clone(), v)
        })
        .collect();
    (answers, key)
}

fn bench_writing(c: &mut Criterion) {
    let mut group = c.benchmark_group("writing");
    let scorer = WritingScorer::new(WritingRubric::default()).unwrap();

    group.bench_function("short_150", |b| {
        let essay = make_essay(150);
        b.iter(|| scorer.score(black_box(&essay), black_box(250)))
    });

    group.bench_function("task2_300", |b| {
        let essay = make_essay(300);
        b.iter(|| scorer.score(black_box(&essay), black_box(250)))
    });

    group.bench_function("long_1000", |b| {
        let essay = make_essay(1000);
        b.iter(|| scorer.score(black_box(&essay), black_box(250)))
    });

    group.bench_function("build_scorer", |b| {
        b.iter(|| WritingScorer::new(black_box(WritingRubric::default())))
    });

    group.finish();
}

fn bench_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("answers");

    group.bench_function("reading_40", |b| {
        let (answers, key) = make_sheet(40);
        b.iter(|| score_answers(Section::Reading, black_box(&answers), black_box(&key)))
    });

    group.bench_function("band_from_fraction", |b| {
        b.iter(|| band_from_fraction(black_box(27), black_box(40)))
    });

    group.bench_function("overall_band", |b| {
        b.iter(|| overall_band(black_box(&[6.5, 7.0, 5.5, 6.0])))
    });

    group.finish();
}

criterion_group!(benches, bench_writing, bench_answers);
criterion_main!(benches);

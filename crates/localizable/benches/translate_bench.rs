//! Benchmarks for template formatting and key translation.
//!
//! Run with: cargo bench -p localizable --bench translate_bench

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use localizable::{DictionarySet, LanguageTable, Localizer, format};

const KEYS: usize = 500;

fn build_localizer() -> Localizer {
    let mut set = DictionarySet::new();
    for language in ["en-US", "sv-SE", "es-ES"] {
        let table: LanguageTable = (0..KEYS)
            .map(|i| (format!("Key{i}"), format!("{language} message {i}: {{0}} and {{1}}")))
            .collect();
        set.insert_language(language, table);
    }
    Localizer::new(set, "sv-SE")
}

fn bench_format(c: &mut Criterion) {
    let template = "Hello {0}, thank you for the {1}. {2}{3}{4}";
    c.bench_function("format/five_placeholders", |b| {
        b.iter(|| format(black_box(template), &[&"Björn", &"fish", &1, &2.5, &'!']));
    });
    c.bench_function("format/no_placeholders", |b| {
        b.iter(|| format(black_box("A plain sentence with no braces at all."), &[]));
    });
}

fn bench_translate(c: &mut Criterion) {
    let localizer = build_localizer();
    c.bench_function("translate/hit", |b| {
        b.iter(|| localizer.translate(black_box("Key250"), &[&"a", &"b"]));
    });
    c.bench_function("translate/miss", |b| {
        b.iter(|| localizer.translate(black_box("Missing"), &[]));
    });
}

criterion_group!(benches, bench_format, bench_translate);
criterion_main!(benches);

//! Performance benchmarks for Keyword Miner

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use keyword_miner::engine::{
    Lexicon, MinerConfig, ProductRecord, analyze,
    tags::{TagSelector, UsedTerms, count_raw_tags},
};

const TITLE_WORDS: &[&str] = &[
    "전지분유", "탈지분유", "자판기우유", "대용량", "국산", "가루", "우유", "커피", "간식",
    "선물", "1kg", "500g", "업소용", "스틱", "믹스",
];
const ATTRIBUTES: &[&str] = &["분말", "국산", "수입", "스틱", "대용량", "소포장"];
const TAGS: &[&str] = &[
    "우유", "자판기", "자판기우유", "분유", "우유분말", "간식", "커피믹스", "선물세트",
    "대용량분유", "업소용우유", "2kg", "가루우유",
];

/// Deterministic synthetic corpus
fn corpus(records: usize) -> Vec<ProductRecord> {
    (0..records)
        .map(|i| {
            let title: Vec<&str> = (0..6).map(|j| TITLE_WORDS[(i * 7 + j * 3) % TITLE_WORDS.len()]).collect();
            let attributes: Vec<&str> = (0..3).map(|j| ATTRIBUTES[(i + j * 2) % ATTRIBUTES.len()]).collect();
            let tags: Vec<&str> = (0..5).map(|j| TAGS[(i * 5 + j) % TAGS.len()]).collect();
            ProductRecord::new(title.join(" "), attributes.join("|"), tags.join(","))
        })
        .collect()
}

fn config() -> MinerConfig {
    MinerConfig {
        manual_keyword_groups: vec!["전지분유 대용량".to_string()],
        compound_dictionary: vec!["분유".to_string(), "우유".to_string(), "자판기".to_string()],
        ..MinerConfig::default()
    }
}

fn benchmark_tokenize(c: &mut Criterion) {
    let lexicon = Lexicon::from_config(&config());
    c.bench_function("tokenize_title", |b| {
        b.iter(|| lexicon.tokenize(black_box("전지분유 1kg 자판기우유 [무료배송] 대용량 국산")))
    });
}

fn benchmark_tag_selection(c: &mut Criterion) {
    let config = config();
    let lexicon = Lexicon::from_config(&config);
    let records = corpus(1_000);
    let raw = count_raw_tags(records.iter().map(|r| r.tags.as_deref()), &config.tag_separator);
    let used = UsedTerms::new(["전지분유", "대용량", "국산"]);
    let selector = TagSelector::new(&lexicon, &config);

    c.bench_function("select_tags_1000", |b| {
        b.iter(|| selector.select(black_box(&raw), black_box(&used)))
    });
}

fn benchmark_analyze(c: &mut Criterion) {
    let config = config();
    let mut group = c.benchmark_group("analyze");
    for size in [100, 1_000, 10_000] {
        let records = corpus(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| analyze(black_box(records), &config))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_tag_selection,
    benchmark_analyze
);
criterion_main!(benches);

//! Benchmarks for label reconciliation and scoring.
//!
//! Run with: cargo bench -p visualflickr-core

use std::fmt::Write;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use visualflickr_core::config::ScoringConfig;
use visualflickr_core::ontology::{Header, ScoreTable};
use visualflickr_core::{accumulate, LabelReconciler, OntologyStore, ScoringEngine};

const ADJECTIVES: &[&str] = &["old", "sacred", "lost", "tiny", "gothic", "holy", "stone", "elite"];
const NOUNS: &[&str] = &["buses", "music", "souls", "lights", "building", "ground", "statue"];

fn labels() -> Vec<String> {
    let mut labels = Vec::new();
    for round in 0..20 {
        for adjective in ADJECTIVES {
            for noun in NOUNS {
                labels.push(format!("{adjective}{round}_{noun}"));
            }
        }
    }
    labels
}

fn store(labels: &[String]) -> OntologyStore {
    let mut sentiment = String::new();
    let mut emotion = String::from("ANP,joy,fear,trust,sadness\n");
    for (i, label) in labels.iter().enumerate() {
        let v = (i % 100) as f64 / 100.0;
        let _ = writeln!(sentiment, "{label},{}", v * 2.0 - 1.0);
        let _ = writeln!(emotion, "{label},{v},{},{v},{}", 1.0 - v, v / 2.0);
    }

    let fields = Header::Fields(vec!["ANP".to_string(), "sentiment".to_string()]);
    let sentiment = ScoreTable::parse(&sentiment, fields, "bench").unwrap();
    let emotion = ScoreTable::parse(&emotion, Header::FirstLine, "bench").unwrap();
    OntologyStore::from_tables("MVSO", "english", sentiment, emotion)
}

fn engine() -> ScoringEngine {
    let labels = labels();
    let store = store(&labels);
    let reconciler = LabelReconciler::build(&labels, store.labels());
    ScoringEngine::new(Arc::new(store), Arc::new(reconciler), ScoringConfig::default())
}

fn user_tags() -> Vec<String> {
    vec![
        "Old3 Buses".to_string(),
        "sacred7music".to_string(),
        "america".to_string(),
        "lost12_souls".to_string(),
        "sunset".to_string(),
        "tiny0 lights".to_string(),
    ]
}

fn benchmark_build_vocabulary(c: &mut Criterion) {
    let labels = labels();

    c.bench_function("build_vocabulary", |b| {
        b.iter(|| LabelReconciler::build(black_box(&labels), black_box(&labels)))
    });
}

fn benchmark_reconcile(c: &mut Criterion) {
    let engine = engine();
    let tags = user_tags();

    c.bench_function("reconcile_user_tags", |b| {
        b.iter(|| engine.reconcile(black_box(&tags)))
    });
}

fn benchmark_score_image(c: &mut Criterion) {
    let engine = engine();
    let tags = user_tags();
    let visual: Vec<String> = [
        "old3_buses",
        "lost12_souls",
        "holy5_ground",
        "tiny0_lights",
        "stone1_statue",
    ]
    .iter()
    .map(|l| l.to_string())
    .collect();

    c.bench_function("score_image", |b| {
        b.iter(|| engine.score_image(black_box(&visual), black_box(&tags)))
    });
}

fn benchmark_aggregate(c: &mut Criterion) {
    let engine = engine();
    let tags = user_tags();
    let visual = vec!["old3_buses".to_string(), "lost12_souls".to_string()];
    let results: Vec<_> = (0..500)
        .map(|_| engine.score_image(&visual, &tags).0)
        .collect();

    c.bench_function("aggregate_500_photos", |b| {
        b.iter(|| accumulate(black_box(&results)))
    });
}

criterion_group!(
    benches,
    benchmark_build_vocabulary,
    benchmark_reconcile,
    benchmark_score_image,
    benchmark_aggregate,
);
criterion_main!(benches);

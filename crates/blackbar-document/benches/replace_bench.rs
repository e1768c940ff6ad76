// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the blackbar-document crate: replacement text
// computation over a page-sized OCR transcript, and full-frame rendering of
// a letter-size page at 200 DPI.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use blackbar_core::ReplacementConfig;
use blackbar_document::{Page, RedactionRenderer, ReplacementPolicy};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Roughly one page of invoice-like text with a phone number per line.
fn transcript() -> String {
    (0..60)
        .map(|i| format!("Line {i}: call Jane Doe on 555-01{i:02} about order {}\n", 1000 + i))
        .collect()
}

fn policy(pattern: Option<&str>, synthetic: bool) -> ReplacementPolicy {
    let config = ReplacementConfig {
        literal_text: "X".into(),
        pattern: pattern.map(Into::into),
        use_synthetic: synthetic,
        ..ReplacementConfig::default()
    };
    ReplacementPolicy::from_config(&config).expect("benchmark pattern compiles")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_replacement(c: &mut Criterion) {
    let text = transcript();
    let literal_pattern = policy(Some(r"\d{3}-\d{4}"), false);
    let synthetic_pattern = policy(Some(r"\d{3}-\d{4}"), true);

    c.bench_function("replace pattern literal (60 lines)", |b| {
        b.iter(|| black_box(literal_pattern.compute(black_box(&text))));
    });

    c.bench_function("replace pattern synthetic (60 lines)", |b| {
        b.iter(|| black_box(synthetic_pattern.compute(black_box(&text))));
    });
}

/// 8.5 x 11 in at 200 DPI.
fn bench_render(c: &mut Criterion) {
    let page = Page::from_dynamic(
        1,
        DynamicImage::ImageRgb8(RgbImage::from_pixel(1700, 2200, Rgb([250, 250, 250]))),
    );
    let renderer = RedactionRenderer::default();

    c.bench_function("render full frame (1700x2200)", |b| {
        b.iter(|| black_box(renderer.render(black_box(&page))));
    });
}

criterion_group!(benches, bench_replacement, bench_render);
criterion_main!(benches);

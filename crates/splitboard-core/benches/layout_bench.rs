//! Criterion benchmarks for layout construction and the per-keystroke path.
//!
//! Layout building and splitting run once per keyboard; the state machine
//! and visual-state refresh run on every button press.
//!
//! Run with:
//! ```bash
//! cargo bench --package splitboard-core --bench layout_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use splitboard_core::{
    build_full_layout, encode, split_layout, visual_state, vk, KeyEncoding, KeyStroke,
    ModifierState, StaticScanTable,
};

// ── Benchmarks: layout construction ──────────────────────────────────────────

fn bench_build_full_layout(c: &mut Criterion) {
    c.bench_function("build_full_layout", |b| {
        b.iter(|| build_full_layout(black_box(&StaticScanTable)))
    });
}

fn bench_split_layout(c: &mut Criterion) {
    let full = build_full_layout(&StaticScanTable);
    c.bench_function("split_layout", |b| b.iter(|| split_layout(black_box(&full))));
}

// ── Benchmarks: per-keystroke path ───────────────────────────────────────────

/// Shift press, letter tap, Shift release: the state machine plus encoding.
fn bench_shifted_letter(c: &mut Criterion) {
    let full = build_full_layout(&StaticScanTable);
    let shift = full
        .keys()
        .find(|k| k.key_code == vk::LSHIFT)
        .expect("layout has left shift")
        .clone();
    let letter = full
        .keys()
        .find(|k| k.key_code == vk::ascii(b'A'))
        .expect("layout has A")
        .clone();

    let mut group = c.benchmark_group("keystroke");
    for encoding in [KeyEncoding::VirtualKey, KeyEncoding::ScanCode] {
        group.bench_with_input(
            BenchmarkId::new("shifted_letter", format!("{encoding:?}")),
            &encoding,
            |b, &encoding| {
                b.iter(|| {
                    let mut state = ModifierState::default();
                    let transitions = [
                        state.on_press(&shift),
                        state.on_press(&letter),
                        state.on_release(&letter),
                        state.on_release(&shift),
                    ];
                    transitions
                        .iter()
                        .flat_map(|t| t.strokes.iter())
                        .filter_map(|s: &KeyStroke| encode(s, encoding))
                        .count()
                })
            },
        );
    }
    group.finish();
}

fn bench_visual_state_refresh(c: &mut Criterion) {
    let full = build_full_layout(&StaticScanTable);
    let mut state = ModifierState::default();
    if let Some(shift) = full.keys().find(|k| k.key_code == vk::LSHIFT) {
        state.on_press(shift);
    }

    c.bench_function("visual_state_full_layout", |b| {
        b.iter(|| visual_state(black_box(&state), full.keys()))
    });
}

criterion_group!(
    benches,
    bench_build_full_layout,
    bench_split_layout,
    bench_shifted_letter,
    bench_visual_state_refresh,
);
criterion_main!(benches);

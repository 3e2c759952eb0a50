use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ratatui::layout::Rect;
use stenomaster::keyboard::steno::{self, Chord};
use stenomaster::session::scorer::PracticeScorer;

const TEXT: &str = "The art of stenography requires dedicated practice and precise finger movements.";

/// Every prefix of the text with roughly one typo in nine keystrokes.
fn keystroke_buffers(text: &str) -> Vec<String> {
    let mut buffer = String::new();
    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            buffer.push(if i % 9 == 4 { '#' } else { ch });
            buffer.clone()
        })
        .collect()
}

fn bench_full_run(c: &mut Criterion) {
    let buffers = keystroke_buffers(TEXT);

    c.bench_function("submit_input full run (80 chars)", |b| {
        b.iter(|| {
            let mut scorer = PracticeScorer::new(TEXT);
            let t0 = Instant::now();
            for (i, buf) in buffers.iter().enumerate() {
                scorer.submit_input_at(black_box(buf), t0 + Duration::from_millis(i as u64 * 120));
            }
            scorer
        })
    });
}

fn bench_live_stats(c: &mut Criterion) {
    let buffers = keystroke_buffers(TEXT);
    let mut scorer = PracticeScorer::new(TEXT);
    let t0 = Instant::now();
    scorer.submit_input_at(&buffers[0], t0);
    scorer.submit_input_at(&buffers[60], t0 + Duration::from_secs(12));
    let now = t0 + Duration::from_secs(13);

    c.bench_function("live_stats_at mid-run", |b| {
        b.iter(|| black_box(&scorer).live_stats_at(black_box(now)))
    });
}

fn bench_key_hit_test(c: &mut Criterion) {
    let area = Rect::new(0, 0, 118, 6);
    let mut chord = Chord::default();

    c.bench_function("key_at over keyboard rows", |b| {
        b.iter(|| {
            for row in 0..4 {
                for col in (0..118).step_by(3) {
                    if let Some(label) = steno::key_at(area, black_box(col), black_box(row)) {
                        chord.toggle(label);
                    }
                }
            }
        })
    });
}

criterion_group!(benches, bench_full_run, bench_live_stats, bench_key_hit_test);
criterion_main!(benches);

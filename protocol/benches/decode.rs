use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use buddy_protocol::{GameStatus, decode_json, revealed_positions};

fn sample_status_json(guesses: usize) -> Vec<u8> {
    let letters: Vec<String> = ('A'..='Z').take(guesses).map(|c| format!("\"{c}\"")).collect();
    format!(
        r#"{{
            "mode": "daily",
            "date": "2026-10-19",
            "category": "Science - Solar System",
            "masked_word": "_ U _ I _ E _",
            "attempts_left": 4,
            "guesses": [{}],
            "game_over": false,
            "win": false,
            "hint": "Largest planet",
            "learning": {{"subject": "Science", "fun_fact": "It has dozens of moons."}},
            "streak_current": 3,
            "streak_best": 9
        }}"#,
        letters.join(",")
    )
    .into_bytes()
}

fn bench_decode_status(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_status");
    for guesses in [0usize, 8, 26] {
        let body = sample_status_json(guesses);
        group.bench_with_input(BenchmarkId::from_parameter(guesses), &body, |b, body| {
            b.iter(|| {
                let status: GameStatus = decode_json(black_box(body)).unwrap();
                black_box(status);
            })
        });
    }
    group.finish();
}

fn bench_reveal_diff(c: &mut Criterion) {
    c.bench_function("revealed_positions", |b| {
        b.iter(|| {
            black_box(revealed_positions(
                black_box("_ _ _ _ _ _ _ _ _ _"),
                black_box("_ A _ A _ _ A _ _ A"),
                'A',
            ))
        })
    });
}

criterion_group!(benches, bench_decode_status, bench_reveal_diff);
criterion_main!(benches);

use std::time::Duration;

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use patchwork::core::GameRng;
use patchwork::mcts::{MCTSConfig, MCTSSearch};
use patchwork::rules::{Patchwork, RulesEngine};

fn bench_valid_actions(c: &mut Criterion) {
    let engine = Patchwork::new();
    let state = engine.initial_state(Some(0));
    c.bench_function("valid_actions (opening)", |b| {
        b.iter(|| black_box(engine.valid_actions(black_box(&state))))
    });
}

fn bench_apply(c: &mut Criterion) {
    let engine = Patchwork::new();
    let state = engine.initial_state(Some(0));
    let actions = engine.valid_actions(&state);
    c.bench_function("apply (all opening actions)", |b| {
        b.iter(|| {
            for action in &actions {
                black_box(engine.apply(&state, action).ok());
            }
        })
    });
}

fn bench_rollout(c: &mut Criterion) {
    let engine = Patchwork::new();
    let state = engine.initial_state(Some(0));
    let mut rng = GameRng::new(7);
    c.bench_function("random rollout", |b| {
        b.iter(|| {
            let mut current = state.clone();
            while !engine.is_terminated(&current) {
                let action = engine.sample_random_action(&current, &mut rng);
                match engine.apply(&current, &action) {
                    Ok(next) => current = next,
                    Err(_) => break,
                }
            }
            black_box(engine.termination(&current))
        })
    });
}

fn bench_mcts(c: &mut Criterion) {
    let mut group = c.benchmark_group("MCTS");
    group
        .sample_size(10)
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(2));
    let engine = Patchwork::new();
    let state = engine.initial_state(Some(0));
    group.bench_function("search 500 iterations", |b| {
        b.iter(|| {
            let config = MCTSConfig::default().with_iterations(500);
            MCTSSearch::new(engine, config)
                .and_then(|mut search| search.search(&state))
                .ok()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_valid_actions,
    bench_apply,
    bench_rollout,
    bench_mcts
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sim_core::config::Difficulty;
use sim_runtime::Game;

fn bench_year_of_turns(c: &mut Criterion) {
    c.bench_function("48 turns with a small company", |b| {
        b.iter(|| {
            let mut game = Game::new(42, Difficulty::Normal).unwrap();
            game.hire();
            game.hire();
            game.hire();
            game.develop_product();
            for _ in 0..48 {
                if game.next_turn().is_err() {
                    break;
                }
                if let Some(doc) = game.desk.queue.first() {
                    let id = doc.id;
                    game.decide_document(id, sim_desk::Verdict::Reject);
                }
            }
            black_box(game.snapshot());
        })
    });
}

criterion_group!(benches, bench_year_of_turns);
criterion_main!(benches);

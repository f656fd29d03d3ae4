use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sim_ai::{Competitor, PlayerAction};
use sim_core::{Dice, GameConfig};

fn bench_competitor_turn(c: &mut Criterion) {
    let config = GameConfig::standard();
    let roster = Competitor::roster(&config.competitors);
    c.bench_function("competitor roster x 100 turns", |b| {
        b.iter(|| {
            let mut dice = Dice::from_seed(42);
            let mut comps = roster.clone();
            for _ in 0..100 {
                for comp in comps.iter_mut() {
                    comp.update_alert_level(black_box(12.0));
                    let _ = comp.react_to_player_action(PlayerAction::Marketing, &mut dice);
                    let _ = comp.perform_autonomous_action(&mut dice);
                    comp.update_market_share(&mut dice);
                }
            }
            black_box(comps);
        })
    });
}

criterion_group!(benches, bench_competitor_turn);
criterion_main!(benches);

use adventuria::core::config::{LeastBlessedRule, WorldConfig};
use adventuria::simulation::punish_least_blessed;
use adventuria::world::World;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn world_with(population: usize) -> World {
    World::new(&WorldConfig {
        seed: Some(42),
        initial_population: population,
        ..WorldConfig::default()
    })
    .expect("default config is valid")
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for population in [10usize, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, &population| {
                b.iter_batched(
                    || world_with(population),
                    |mut world| {
                        black_box(world.tick().expect("tick"));
                        world
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_punishment(c: &mut Criterion) {
    let mut group = c.benchmark_group("punish_least_blessed");
    for rule in [LeastBlessedRule::Threshold(-1), LeastBlessedRule::TrueMinimum] {
        group.bench_function(format!("{:?}", rule), |b| {
            b.iter_batched(
                || {
                    let mut world = world_with(1000);
                    world.least_blessed_rule = rule;
                    for (i, actor) in world.population.iter_mut().enumerate() {
                        actor.blessing = (i % 7) as i64 - 3;
                    }
                    world
                },
                |mut world| {
                    black_box(punish_least_blessed(&mut world, 1.0).expect("punish"));
                    world
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick, bench_punishment);
criterion_main!(benches);

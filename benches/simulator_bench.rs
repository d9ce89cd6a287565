//! Resolver throughput benchmarks: rounds per second and bot-vs-bot matches per second.
//!
//! Run with: `cargo bench`

use arcana::bots::{BotKind, Player};
use arcana::combat::{play_round, Character, CharacterKind, MatchConfig, Rng, Stats};
use arcana::data::{AssignmentEntry, CharacterRecord, MemoryStore, TeamData};
use arcana::ranked::play_bot_match;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

fn stats(hp: f64, armor: f64, physical: f64, magic: f64) -> Stats {
    Stats {
        current_hp: hp,
        total_hp: hp,
        armor,
        magic_resistance: armor / 2.0,
        physical_power: physical,
        magic_power: magic,
        special_trigger_chance: 15.0,
    }
}

fn team() -> Vec<Character> {
    vec![
        Character::new(CharacterKind::Ninja, stats(120.0, 10.0, 35.0, 5.0)),
        Character::new(CharacterKind::Mage, stats(90.0, 5.0, 5.0, 45.0)),
        Character::new(CharacterKind::Warrior, stats(220.0, 30.0, 25.0, 0.0)),
    ]
}

fn team_data() -> TeamData {
    TeamData {
        characters: team()
            .into_iter()
            .map(|character| {
                AssignmentEntry::bare(CharacterRecord::new(
                    character.kind(),
                    *character.base_stats(),
                ))
            })
            .collect(),
        items: Vec::new(),
    }
}

fn bench_simulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulator");
    group.sample_size(100);
    group.throughput(Throughput::Elements(1));

    group.bench_function("round_3v3", |b| {
        let mut seed = 0u64;
        b.iter_batched(
            || {
                seed = seed.wrapping_add(1);
                (team(), team(), Rng::new(seed))
            },
            |(yours, theirs, mut rng)| black_box(play_round(yours, theirs, true, &mut rng)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("bot_match_head_on_vs_random", |b| {
        let mut seed = 0u64;
        b.iter_batched(
            || {
                seed = seed.wrapping_add(1);
                (
                    Player::new(BotKind::HeadOn.build(), MemoryStore::new(team_data())),
                    Player::new(BotKind::Random.build(), MemoryStore::new(team_data())),
                    Rng::new(seed),
                )
            },
            |(mut yours, mut theirs, mut rng)| {
                black_box(play_bot_match(&mut yours, &mut theirs, MatchConfig::default(), &mut rng))
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_simulator);
criterion_main!(benches);

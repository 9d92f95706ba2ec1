use criterion::{black_box, criterion_group, criterion_main, Criterion};
use profile_matching_engine::{
    ranking::{ProfileMatchingRanker, Ranker},
    Player, ProfileMatchingSettings,
};

const CERTIFICATES: [Option<&str>; 4] = [Some("Nasional"), Some("Provinsi"), Some("Kota"), None];

fn create_test_players(count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| {
            let mut player = Player::new(
                i as i64,
                format!("Player {}", i),
                "Mid",
                40.0 + (i % 60) as f64,
                450.0 + (i % 100) as f64,
                1.0 + (i % 9) as f64 * 0.75,
            );
            player.tournament_certificate = CERTIFICATES[i % 4].map(str::to_string);
            player.tournament_experience_count = Some((i % 30) as u32);
            player
        })
        .collect()
}

fn bench_profile_matching_ranking(c: &mut Criterion) {
    let ranker = ProfileMatchingRanker::new();
    let settings = ProfileMatchingSettings::default();

    let players_100 = create_test_players(100);
    let players_1000 = create_test_players(1_000);
    let players_10000 = create_test_players(10_000);

    c.bench_function("profile_matching_rank_100", |b| {
        b.iter(|| black_box(ranker.rank(&settings, &players_100).unwrap()));
    });

    c.bench_function("profile_matching_rank_1000", |b| {
        b.iter(|| black_box(ranker.rank(&settings, &players_1000).unwrap()));
    });

    c.bench_function("profile_matching_rank_10000", |b| {
        b.iter(|| black_box(ranker.rank(&settings, &players_10000).unwrap()));
    });
}

criterion_group!(benches, bench_profile_matching_ranking);
criterion_main!(benches);

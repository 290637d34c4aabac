// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use barnsley::{tonemap, ChaosGame, TreeConfig};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample_small_tree(c: &mut Criterion) {
    c.bench_function("sample 128x192", |b| {
        let config = TreeConfig::with_size(128, 192);
        let game = ChaosGame::new(&config).unwrap();
        b.iter(|| game.sample_single(1))
    });
}

fn finish_small_tree(c: &mut Criterion) {
    c.bench_function("tone map 128x192", |b| {
        let config = TreeConfig::with_size(128, 192);
        let histogram = ChaosGame::new(&config).unwrap().sample_single(1);
        b.iter(|| tonemap::finish(&histogram, &config).unwrap())
    });
}

criterion_group!(benches, sample_small_tree, finish_small_tree);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeSet;
use tree_collections::bst::{BalanceMode, BstSet};

const NUM_OF_OPERATIONS: usize = 1000;

const MODES: [(&str, BalanceMode); 2] = [
    ("plain", BalanceMode::Plain),
    ("balanced", BalanceMode::Balanced),
];

fn bench_btreeset_insert(c: &mut Criterion) {
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = BTreeSet::new();
            for _ in 0..NUM_OF_OPERATIONS {
                set.insert(rng.next_u32());
            }
        })
    });
}

fn bench_bst_set_insert(c: &mut Criterion) {
    for &(name, mode) in MODES.iter() {
        c.bench_function(&format!("bench bst_set {} insert", name), move |b| {
            b.iter(|| {
                let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                let mut set = BstSet::new(mode);
                for _ in 0..NUM_OF_OPERATIONS {
                    set.insert(rng.next_u32());
                }
            })
        });
    }
}

fn bench_bst_set_contains(c: &mut Criterion) {
    for &(name, mode) in MODES.iter() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut set = BstSet::new(mode);
        let mut keys = Vec::new();
        for _ in 0..NUM_OF_OPERATIONS {
            let key = rng.next_u32();
            set.insert(key);
            keys.push(key);
        }

        c.bench_function(&format!("bench bst_set {} contains", name), move |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(set.contains(key));
                }
            })
        });
    }
}

criterion_group!(
    benches,
    bench_btreeset_insert,
    bench_bst_set_insert,
    bench_bst_set_contains,
);
criterion_main!(benches);

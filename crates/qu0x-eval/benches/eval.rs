//! Benchmarks for expression evaluation and hint search.
//!
//! - **`evaluate`**: parses and evaluates a few representative expressions.
//! - **`closest`**: runs the hint search over the dice of several days.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench eval
//! ```

use std::{hint, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use qu0x_core::{DiceSet, Expression, OperatorSet, Target};
use qu0x_eval::{evaluate, search};

const EXPRESSIONS: [&str; 3] = ["3^(5-2+1)+1", "(6+3)*(2+4)-3!", "((1+5)!!!!!/4)^4-3"];

const PUZZLES: [([u8; 5], u32); 3] = [
    ([3, 2, 5, 1, 1], 82),
    ([6, 3, 2, 4, 3], 46),
    ([1, 1, 1, 1, 1], 100),
];

fn bench_evaluate(c: &mut Criterion) {
    for (i, text) in EXPRESSIONS.into_iter().enumerate() {
        let expr: Expression = text.parse().unwrap();
        c.bench_with_input(BenchmarkId::new("evaluate", format!("expr_{i}")), &expr, |b, expr| {
            b.iter(|| evaluate(hint::black_box(expr)));
        });
    }
}

fn bench_closest(c: &mut Criterion) {
    for (i, (values, target)) in PUZZLES.into_iter().enumerate() {
        let dice = DiceSet::from_values(values).unwrap();
        let target = Target::new(target);
        c.bench_with_input(
            BenchmarkId::new("closest", format!("puzzle_{i}")),
            &(dice, target),
            |b, (dice, target)| {
                b.iter(|| search::closest(hint::black_box(dice), *target, OperatorSet::all()));
            },
        );
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(8));
    targets = bench_evaluate, bench_closest
);
criterion_main!(benches);

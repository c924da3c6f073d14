#[macro_use]
extern crate criterion;
extern crate lll_rs;
extern crate rug;

mod benchmarks {
    use criterion::Criterion;

    use lll_rs::{reduce, reduce_ultra, Int, IntMatrix, LllParams};

    fn bad_basis() -> IntMatrix {
        IntMatrix::from_matrix(vec![
            vec![
                Int::from(1) << 10000,
                Int::from(0),
                Int::from(0),
                Int::from(1345) << 789,
            ],
            vec![
                Int::from(0),
                Int::from(1) << 500,
                Int::from(0),
                Int::from(35) << 3505,
            ],
            vec![
                Int::from(0),
                Int::from(0),
                Int::from(1) << 1000,
                Int::from(154) << 5000,
            ],
            vec![Int::from(0), Int::from(0), Int::from(0), Int::from(1)],
        ])
    }

    pub fn bench_big_int_reduction(c: &mut Criterion) {
        let params = LllParams::default();

        c.bench_function("reduce (wrapper, huge entries)", move |b| {
            b.iter_batched(bad_basis, |mut basis| reduce(&mut basis, &params), criterion::BatchSize::SmallInput)
        });
    }

    pub fn bench_big_int_reduction_ultra(c: &mut Criterion) {
        let params = LllParams::default();

        c.bench_function("reduce_ultra (huge entries)", move |b| {
            b.iter_batched(bad_basis, |mut basis| reduce_ultra(&mut basis, &params), criterion::BatchSize::SmallInput)
        });
    }
}

criterion_group!(
    big_reduce,
    benchmarks::bench_big_int_reduction,
    benchmarks::bench_big_int_reduction_ultra
);
criterion_main!(big_reduce);

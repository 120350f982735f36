//! Benchmarks for the complex normal form rewriter.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use calcite::{Ca, CaCtx, CaExtHead};

/// `Sin(π/n)` as a formal node.
fn formal_sin_pi_over(ctx: &mut CaCtx, n: i64) -> Ca {
    let pi = ctx.pi();
    let t = ctx.mul(&pi, &Ca::from_ratio(1, n));
    ctx.formal(CaExtHead::Sin, &[t])
}

fn bench_trig_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite_sin_pi_over_n");

    for n in [3, 5, 6, 8, 12] {
        group.bench_with_input(BenchmarkId::new("deep", n), &n, |b, &n| {
            b.iter(|| {
                let mut ctx = CaCtx::new();
                let x = formal_sin_pi_over(&mut ctx, n);
                black_box(ctx.rewrite_complex_normal_form(&x, true))
            });
        });
    }

    group.finish();
}

fn bench_cyclotomic_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite_sqrt");

    for n in [2, 3, 5, 6] {
        group.bench_with_input(BenchmarkId::new("sqrt", n), &n, |b, &n| {
            b.iter(|| {
                let mut ctx = CaCtx::new();
                let x = ctx.sqrt(&Ca::from(n));
                black_box(ctx.rewrite_complex_normal_form(&x, false))
            });
        });
    }

    group.finish();
}

fn bench_mixed_field(c: &mut Criterion) {
    c.bench_function("rewrite_re_exp_plus_pi", |b| {
        b.iter(|| {
            let mut ctx = CaCtx::new();
            let e = ctx.exp(&Ca::gaussian(1, 1));
            let re = ctx.formal(CaExtHead::Re, &[e]);
            let pi = ctx.pi();
            let x = ctx.add(&re, &pi);
            black_box(ctx.rewrite_complex_normal_form(&x, true))
        });
    });
}

criterion_group!(
    benches,
    bench_trig_rewrite,
    bench_cyclotomic_detection,
    bench_mixed_field
);
criterion_main!(benches);

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mogep::{
    error::Result,
    evolution::{Challenge, EvolutionLauncher, EvolutionOptions, LogLevel},
    functions,
    gene::{ColumnarDataset, Dataset, SymbolTable},
    rng::RandomNumberGenerator,
};

/// Fits `x² + y` while keeping the expression short.
struct FitAndSize;

impl Challenge<ColumnarDataset> for FitAndSize {
    fn num_objectives(&self) -> usize {
        2
    }

    fn score(&self, outputs: &[Vec<f64>], data: &ColumnarDataset) -> Result<Vec<f64>> {
        let target = data.column("target").unwrap_or(&[]);
        let error = outputs[0]
            .iter()
            .zip(target)
            .map(|(g, t)| (g - t).powi(2))
            .sum::<f64>();
        let spread = outputs[0].iter().map(|v| v.abs()).sum::<f64>();
        Ok(vec![error, spread])
    }
}

fn dataset(rows: usize) -> ColumnarDataset {
    let mut rng = RandomNumberGenerator::from_seed(5);
    let x = rng.fetch_uniform(-3.0, 3.0, rows);
    let y = rng.fetch_uniform(-3.0, 3.0, rows);
    let target = x.iter().zip(&y).map(|(x, y)| x * x + y).collect();
    ColumnarDataset::from_columns([("x", x), ("y", y), ("target", target)]).unwrap()
}

fn bench_generation(c: &mut Criterion) {
    let symbols = Arc::new(
        SymbolTable::builder()
            .functions(functions::arithmetic())
            .terminals(["x", "y"])
            .build()
            .unwrap(),
    );

    let mut group = c.benchmark_group("next_generation");
    group.sample_size(20);
    for (size, threshold) in [(100, usize::MAX), (1000, usize::MAX), (1000, 1)] {
        let launcher = EvolutionLauncher::builder()
            .with_symbols(Arc::clone(&symbols))
            .with_challenge(FitAndSize)
            .with_dataset(dataset(200))
            .with_options(
                EvolutionOptions::builder()
                    .population_size(size)
                    .head_length(7)
                    .num_genes(2)
                    .num_elites(2)
                    .parallel_threshold(threshold)
                    .log_level(LogLevel::None)
                    .build(),
            )
            .build()
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(9);
        let population = launcher.initial_population(&mut rng).unwrap();
        let label = if threshold == 1 { "parallel" } else { "sequential" };

        group.bench_with_input(BenchmarkId::new(label, size), &population, |b, population| {
            b.iter(|| launcher.next_generation(black_box(population), &mut rng))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);

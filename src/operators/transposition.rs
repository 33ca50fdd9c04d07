//! Insertion-sequence, root and gene transposition.
//!
//! IS and RIS copy a short run of alleles from one gene into the head of
//! another, shifting the rest of the head downstream. Whatever is pushed past
//! the head boundary is dropped, so the tail never changes.

use std::sync::Arc;

use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::gene::{Allele, Gene};
use crate::rng::RandomNumberGenerator;

/// With probability `rate`, inserts up to `length` alleles copied from a random
/// gene position at a random non-root head position of a random gene.
pub fn transpose_is(
    chromosome: &Arc<Chromosome>,
    length: usize,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Arc<Chromosome>> {
    let head = chromosome.head_length();
    if head < 2 || length == 0 || !rng.trial(rate) {
        return Ok(Arc::clone(chromosome));
    }

    let genes = chromosome.genes();
    let source = &genes[rng.gen_index(genes.len())];
    let target = rng.gen_index(genes.len());
    let start = rng.gen_index(source.len());
    let offset = rng.gen_index_in(1, head);

    let end = (start + length).min(source.len());
    let sequence = &source.alleles()[start..end];
    insert_into_head(chromosome, target, sequence, offset)
}

/// With probability `rate`, copies up to `length` alleles starting at a
/// function to the root of a random gene.
///
/// The scan for a function starts at a random position of a random source gene
/// and moves forward; if it finds none the chromosome is returned unchanged.
pub fn transpose_ris(
    chromosome: &Arc<Chromosome>,
    length: usize,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Arc<Chromosome>> {
    if length == 0 || !rng.trial(rate) {
        return Ok(Arc::clone(chromosome));
    }

    let genes = chromosome.genes();
    let source = &genes[rng.gen_index(genes.len())];
    let target = rng.gen_index(genes.len());
    let scan_from = rng.gen_index(source.head_length());

    let Some(start) = source.alleles()[scan_from..]
        .iter()
        .position(Allele::is_function)
        .map(|p| scan_from + p)
    else {
        return Ok(Arc::clone(chromosome));
    };

    let end = (start + length).min(source.len());
    let sequence = &source.alleles()[start..end];
    insert_into_head(chromosome, target, sequence, 0)
}

/// With probability `rate`, swaps the first gene with another random gene.
pub fn transpose_gene(
    chromosome: &Arc<Chromosome>,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Arc<Chromosome>> {
    let count = chromosome.genes().len();
    if count < 2 || !rng.trial(rate) {
        return Ok(Arc::clone(chromosome));
    }

    let other = rng.gen_index_in(1, count);
    let mut genes = chromosome.genes().to_vec();
    genes.swap(0, other);
    chromosome.new_instance(genes)
}

fn insert_into_head(
    chromosome: &Arc<Chromosome>,
    target: usize,
    sequence: &[Allele],
    offset: usize,
) -> Result<Arc<Chromosome>> {
    let gene: &Arc<Gene> = &chromosome.genes()[target];
    let head = gene.head_length();
    let take = sequence.len().min(head - offset);

    let mut replacement = Vec::with_capacity(head - offset);
    replacement.extend_from_slice(&sequence[..take]);
    replacement.extend_from_slice(&gene.alleles()[offset..head - take]);

    let mut genes = chromosome.genes().to_vec();
    genes[target] = gene.derive(&[(offset, replacement)])?;
    chromosome.new_instance(genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Linker;
    use crate::functions;
    use crate::gene::{GeneKind, SymbolTable};

    fn table() -> Arc<SymbolTable> {
        Arc::new(
            SymbolTable::builder()
                .functions(functions::arithmetic())
                .terminals(["x", "y"])
                .build()
                .unwrap(),
        )
    }

    fn parse(table: &Arc<SymbolTable>, symbols: &[&str]) -> Arc<Gene> {
        let alleles = symbols
            .iter()
            .map(|s| table.function_by_tag(s).or_else(|| table.terminal(s)).unwrap())
            .collect();
        Arc::new(Gene::new(Arc::clone(table), alleles, 3, GeneKind::Karva).unwrap())
    }

    fn random(seed: u64, genes: usize) -> Arc<Chromosome> {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        Arc::new(
            Chromosome::random(&table(), 6, genes, GeneKind::Karva, Linker::Sum, &mut rng).unwrap(),
        )
    }

    #[test]
    fn test_insert_shifts_head_and_keeps_tail() {
        let table = table();
        let gene = parse(&table, &["+", "-", "*", "x", "y", "x", "y"]);
        let chromosome = Arc::new(Chromosome::new(vec![gene], 3, Linker::Identity).unwrap());
        let y = table.terminal("y").unwrap();

        let result = insert_into_head(&chromosome, 0, &[y], 1).unwrap();
        assert_eq!(result.genes()[0].to_string(), "[+][y][-][x][y][x][y]");

        // A sequence longer than the space left is truncated at the head boundary.
        let x = table.terminal("x").unwrap();
        let result = insert_into_head(&chromosome, 0, &[y, x, y, x], 1).unwrap();
        assert_eq!(result.genes()[0].to_string(), "[+][y][x][x][y][x][y]");
    }

    #[test]
    fn test_is_keeps_root_and_tail() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        for seed in 0..30 {
            let original = random(seed, 2);
            let result = transpose_is(&original, 3, 1.0, &mut rng).unwrap();
            for (before, after) in original.genes().iter().zip(result.genes()) {
                assert_eq!(before.alleles()[0], after.alleles()[0]);
                assert_eq!(before.alleles()[6..], after.alleles()[6..]);
            }
        }
    }

    #[test]
    fn test_ris_puts_function_at_root() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        for seed in 0..30 {
            let original = random(seed, 1);
            let result = transpose_ris(&original, 2, 1.0, &mut rng).unwrap();
            if !Arc::ptr_eq(&original, &result) {
                assert!(result.genes()[0].alleles()[0].is_function());
            }
            let gene = &result.genes()[0];
            assert!(gene.alleles()[6..].iter().all(|a| !a.is_function()));
        }
    }

    #[test]
    fn test_ris_without_functions_is_identity() {
        let table = table();
        let gene = parse(&table, &["x", "y", "x", "x", "y", "x", "y"]);
        let chromosome = Arc::new(Chromosome::new(vec![gene], 3, Linker::Identity).unwrap());
        let mut rng = RandomNumberGenerator::from_seed(1);
        for _ in 0..10 {
            let result = transpose_ris(&chromosome, 3, 1.0, &mut rng).unwrap();
            assert!(Arc::ptr_eq(&chromosome, &result));
        }
    }

    #[test]
    fn test_gene_transposition() {
        let table = table();
        let a = parse(&table, &["+", "x", "y", "x", "y", "x", "y"]);
        let b = parse(&table, &["-", "x", "y", "x", "y", "x", "y"]);
        let chromosome = Arc::new(
            Chromosome::new(vec![Arc::clone(&a), Arc::clone(&b)], 3, Linker::Identity).unwrap(),
        );
        let mut rng = RandomNumberGenerator::from_seed(3);
        let result = transpose_gene(&chromosome, 1.0, &mut rng).unwrap();
        assert!(Arc::ptr_eq(&result.genes()[0], &b));
        assert!(Arc::ptr_eq(&result.genes()[1], &a));

        let single = Arc::new(Chromosome::new(vec![a], 3, Linker::Identity).unwrap());
        assert!(Arc::ptr_eq(&single, &transpose_gene(&single, 1.0, &mut rng).unwrap()));
    }
}

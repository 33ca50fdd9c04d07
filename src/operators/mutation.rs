//! Point mutation and inversion.

use std::sync::Arc;

use crate::chromosome::Chromosome;
use crate::error::Result;
use crate::gene::Edit;
use crate::rng::RandomNumberGenerator;

/// Replaces each allele independently with probability `rate`.
///
/// Head positions draw from every symbol, tail positions from the terminals
/// only. Replacements that redraw the current symbol are dropped, so a
/// mutation that changes nothing returns `chromosome` itself.
pub fn mutate(
    chromosome: &Arc<Chromosome>,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Arc<Chromosome>> {
    if rate <= 0.0 {
        return Ok(Arc::clone(chromosome));
    }

    let symbols = chromosome.symbols();
    let mut genes = Vec::with_capacity(chromosome.genes().len());
    for gene in chromosome.genes() {
        let mut edits: Vec<Edit> = Vec::new();
        for (idx, current) in gene.alleles().iter().enumerate() {
            if !rng.trial(rate) {
                continue;
            }
            let replacement = if idx < gene.head_length() {
                symbols.random_head_allele(rng)
            } else {
                symbols.random_tail_allele(rng)
            };
            if replacement != *current {
                edits.push((idx, vec![replacement]));
            }
        }
        genes.push(gene.derive(&edits)?);
    }

    chromosome.new_instance(genes)
}

/// With probability `rate`, reverses a random sub-range of one gene's head.
///
/// The range always spans at least two positions and never reaches into the tail.
pub fn invert(
    chromosome: &Arc<Chromosome>,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Arc<Chromosome>> {
    if !rng.trial(rate) {
        return Ok(Arc::clone(chromosome));
    }
    let Some((start, end)) = rng.distinct_pair(chromosome.head_length()) else {
        return Ok(Arc::clone(chromosome));
    };

    let target = rng.gen_index(chromosome.genes().len());
    let gene = &chromosome.genes()[target];
    let mut segment = gene.alleles()[start..=end].to_vec();
    segment.reverse();

    let mut genes = chromosome.genes().to_vec();
    genes[target] = gene.derive(&[(start, segment)])?;
    chromosome.new_instance(genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Linker;
    use crate::functions;
    use crate::gene::{GeneKind, SymbolTable};

    fn chromosome(seed: u64) -> Arc<Chromosome> {
        let table = Arc::new(
            SymbolTable::builder()
                .functions(functions::arithmetic())
                .terminals(["x", "y"])
                .build()
                .unwrap(),
        );
        let mut rng = RandomNumberGenerator::from_seed(seed);
        Arc::new(Chromosome::random(&table, 5, 2, GeneKind::Karva, Linker::Sum, &mut rng).unwrap())
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let original = chromosome(1);
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mutated = mutate(&original, 0.0, &mut rng).unwrap();
        assert!(Arc::ptr_eq(&original, &mutated));
    }

    #[test]
    fn test_mutation_rate_one_keeps_tail_legal() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        for seed in 0..20 {
            let original = chromosome(seed);
            let mutated = mutate(&original, 1.0, &mut rng).unwrap();
            for gene in mutated.genes() {
                assert!(gene.alleles()[gene.head_length()..]
                    .iter()
                    .all(|a| !a.is_function()));
            }
            assert_eq!(mutated.len(), original.len());
        }
    }

    #[test]
    fn test_inversion_reverses_head_only() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        for seed in 0..20 {
            let original = chromosome(seed);
            let inverted = invert(&original, 1.0, &mut rng).unwrap();
            for (before, after) in original.genes().iter().zip(inverted.genes()) {
                let head = before.head_length();
                assert_eq!(before.alleles()[head..], after.alleles()[head..]);
                let mut a = before.alleles()[..head].to_vec();
                let mut b = after.alleles()[..head].to_vec();
                a.sort_by_key(|x| format!("{:?}", x));
                b.sort_by_key(|x| format!("{:?}", x));
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_inversion_rate_zero_is_identity() {
        let original = chromosome(9);
        let mut rng = RandomNumberGenerator::from_seed(9);
        assert!(Arc::ptr_eq(&original, &invert(&original, 0.0, &mut rng).unwrap()));
    }
}

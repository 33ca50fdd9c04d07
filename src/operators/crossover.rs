//! Recombination of two parents.
//!
//! Both parents must have the same number of genes, head length and gene length, so
//! every exchanged segment lands at the same gene positions it left and no
//! function allele can reach a tail.

use std::sync::Arc;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

type Offspring = (Arc<Chromosome>, Arc<Chromosome>);

/// Exchanges the suffix of one gene from a random locus onward.
pub fn crossover_one_point(
    first: &Arc<Chromosome>,
    second: &Arc<Chromosome>,
    rng: &mut RandomNumberGenerator,
) -> Result<Offspring> {
    check_compatible(first, second)?;

    let gene = rng.gen_index(first.genes().len());
    let a = &first.genes()[gene];
    let b = &second.genes()[gene];
    let point = rng.gen_index(a.len());

    let mut genes_a = first.genes().to_vec();
    let mut genes_b = second.genes().to_vec();
    genes_a[gene] = a.derive(&[(point, b.alleles()[point..].to_vec())])?;
    genes_b[gene] = b.derive(&[(point, a.alleles()[point..].to_vec())])?;

    Ok((first.new_instance(genes_a)?, second.new_instance(genes_b)?))
}

/// Exchanges the segment between two random chromosome-wide loci.
///
/// Loci are counted over the concatenated genes. Genes lying wholly inside the
/// segment are swapped as a unit; the two cut genes exchange the part that
/// falls inside the segment.
pub fn crossover_two_points(
    first: &Arc<Chromosome>,
    second: &Arc<Chromosome>,
    rng: &mut RandomNumberGenerator,
) -> Result<Offspring> {
    check_compatible(first, second)?;

    let Some((from, to)) = rng.distinct_pair(first.len()) else {
        return Ok((Arc::clone(first), Arc::clone(second)));
    };

    let gene_len = first.genes()[0].len();
    let (first_gene, first_locus) = (from / gene_len, from % gene_len);
    let (last_gene, last_locus) = (to / gene_len, to % gene_len);

    let mut genes_a = first.genes().to_vec();
    let mut genes_b = second.genes().to_vec();
    for k in first_gene..=last_gene {
        let lo = if k == first_gene { first_locus } else { 0 };
        let hi = if k == last_gene { last_locus } else { gene_len };
        if lo >= hi {
            continue;
        }
        if lo == 0 && hi == gene_len {
            std::mem::swap(&mut genes_a[k], &mut genes_b[k]);
            continue;
        }
        let a = &first.genes()[k];
        let b = &second.genes()[k];
        genes_a[k] = a.derive(&[(lo, b.alleles()[lo..hi].to_vec())])?;
        genes_b[k] = b.derive(&[(lo, a.alleles()[lo..hi].to_vec())])?;
    }

    Ok((first.new_instance(genes_a)?, second.new_instance(genes_b)?))
}

/// Swaps one random gene between the parents.
pub fn crossover_gene(
    first: &Arc<Chromosome>,
    second: &Arc<Chromosome>,
    rng: &mut RandomNumberGenerator,
) -> Result<Offspring> {
    check_compatible(first, second)?;

    let gene = rng.gen_index(first.genes().len());
    let mut genes_a = first.genes().to_vec();
    let mut genes_b = second.genes().to_vec();
    std::mem::swap(&mut genes_a[gene], &mut genes_b[gene]);

    Ok((first.new_instance(genes_a)?, second.new_instance(genes_b)?))
}

/// Draws disjoint mating pairs from `0..pop_size`.
///
/// Each index is picked independently with probability `rate`; the picks are
/// shuffled and paired in order, and an odd one out is dropped.
///
/// # Errors
///
/// Returns a `Configuration` error if `rate` is not in `(0, 1]`.
pub fn crossover_pairs(
    pop_size: usize,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<(usize, usize)>> {
    if !(rate > 0.0 && rate <= 1.0) {
        return Err(GeneticError::Configuration(format!(
            "Crossover rate must be in (0, 1], got {}",
            rate
        )));
    }

    let mut picked: Vec<usize> = (0..pop_size).filter(|_| rng.trial(rate)).collect();
    rng.shuffle(&mut picked);
    Ok(picked.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

fn check_compatible(first: &Chromosome, second: &Chromosome) -> Result<()> {
    if first.genes().len() != second.genes().len() || first.head_length() != second.head_length()
    {
        return Err(GeneticError::Evolution(format!(
            "Cannot cross chromosomes of shape {}x{} and {}x{}",
            first.genes().len(),
            first.head_length(),
            second.genes().len(),
            second.head_length()
        )));
    }
    // Tables with a different maximum arity give genes of different length.
    if let Some((a, b)) = first
        .genes()
        .iter()
        .zip(second.genes())
        .find(|(a, b)| a.len() != b.len())
    {
        return Err(GeneticError::Evolution(format!(
            "Cannot cross genes of length {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Linker;
    use crate::functions;
    use crate::gene::{Function, Gene, GeneKind, SymbolTable};

    fn table() -> Arc<SymbolTable> {
        Arc::new(
            SymbolTable::builder()
                .functions(functions::arithmetic())
                .terminals(["x", "y"])
                .build()
                .unwrap(),
        )
    }

    fn uniform(table: &Arc<SymbolTable>, head: &str, tail: &str, genes: usize) -> Arc<Chromosome> {
        let h = table.function_by_tag(head).unwrap();
        let t = table.terminal(tail).unwrap();
        let genes = (0..genes)
            .map(|_| {
                Arc::new(Gene::new(Arc::clone(table), vec![h, h, t, t, t], 2, GeneKind::Karva).unwrap())
            })
            .collect();
        Arc::new(Chromosome::new(genes, 2, Linker::Identity).unwrap())
    }

    fn flatten(chromosome: &Chromosome) -> Vec<String> {
        chromosome
            .genes()
            .iter()
            .flat_map(|g| g.alleles().iter().map(|a| g.symbols().symbol_name(*a).to_string()))
            .collect()
    }

    #[test]
    fn test_two_points_conserves_alleles() {
        let table = table();
        let a = uniform(&table, "+", "x", 3);
        let b = uniform(&table, "-", "y", 3);
        let mut rng = RandomNumberGenerator::from_seed(17);

        for _ in 0..50 {
            let (c, d) = crossover_two_points(&a, &b, &mut rng).unwrap();
            let (fc, fd) = (flatten(&c), flatten(&d));
            let (fa, fb) = (flatten(&a), flatten(&b));
            // Each locus of a child comes from the same locus of one parent, and
            // the two children take complementary parents at every locus.
            for i in 0..fa.len() {
                assert!(
                    (fc[i] == fa[i] && fd[i] == fb[i]) || (fc[i] == fb[i] && fd[i] == fa[i])
                );
            }
            let swapped: Vec<bool> = (0..fa.len()).map(|i| fc[i] == fb[i]).collect();
            let changes = swapped.windows(2).filter(|w| w[0] != w[1]).count();
            assert!(changes <= 2);
        }
    }

    #[test]
    fn test_one_point_and_gene_crossover_keep_tails_legal() {
        let table = table();
        let mut rng = RandomNumberGenerator::from_seed(4);
        for seed in 0..20 {
            let mut r = RandomNumberGenerator::from_seed(seed);
            let a = Arc::new(
                Chromosome::random(&table, 4, 2, GeneKind::Karva, Linker::Sum, &mut r).unwrap(),
            );
            let b = Arc::new(
                Chromosome::random(&table, 4, 2, GeneKind::Karva, Linker::Sum, &mut r).unwrap(),
            );
            let (c, d) = crossover_one_point(&a, &b, &mut rng).unwrap();
            let (e, f) = crossover_gene(&c, &d, &mut rng).unwrap();
            for chromosome in [c, d, e, f] {
                for gene in chromosome.genes() {
                    assert!(gene.alleles()[4..].iter().all(|a| !a.is_function()));
                }
            }
        }
    }

    #[test]
    fn test_gene_crossover_swaps_whole_gene() {
        let table = table();
        let a = uniform(&table, "+", "x", 1);
        let b = uniform(&table, "-", "y", 1);
        let mut rng = RandomNumberGenerator::from_seed(0);
        let (c, d) = crossover_gene(&a, &b, &mut rng).unwrap();
        assert!(Arc::ptr_eq(&c.genes()[0], &b.genes()[0]));
        assert!(Arc::ptr_eq(&d.genes()[0], &a.genes()[0]));
    }

    #[test]
    fn test_incompatible_parents() {
        let table = table();
        let a = uniform(&table, "+", "x", 1);
        let b = uniform(&table, "-", "y", 2);
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert!(matches!(
            crossover_gene(&a, &b, &mut rng),
            Err(GeneticError::Evolution(_))
        ));
    }

    #[test]
    fn test_parents_with_different_gene_lengths() {
        let binary = table();
        let ternary = Arc::new(
            SymbolTable::builder()
                .functions(functions::arithmetic())
                .function(Function::new("sum3", 3, |a| a[0] + a[1] + a[2]))
                .terminals(["x", "y"])
                .build()
                .unwrap(),
        );
        let mut rng = RandomNumberGenerator::from_seed(12);
        let a = uniform(&binary, "+", "x", 2);
        let b = Arc::new(
            Chromosome::random(&ternary, 2, 2, GeneKind::Karva, Linker::Identity, &mut rng)
                .unwrap(),
        );
        assert_ne!(a.genes()[0].len(), b.genes()[0].len());

        for _ in 0..20 {
            assert!(matches!(
                crossover_one_point(&a, &b, &mut rng),
                Err(GeneticError::Evolution(_))
            ));
            assert!(matches!(
                crossover_two_points(&b, &a, &mut rng),
                Err(GeneticError::Evolution(_))
            ));
            assert!(matches!(
                crossover_gene(&a, &b, &mut rng),
                Err(GeneticError::Evolution(_))
            ));
        }
    }

    #[test]
    fn test_crossover_pairs() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        let pairs = crossover_pairs(11, 1.0, &mut rng).unwrap();
        assert_eq!(pairs.len(), 5);
        let mut seen: Vec<usize> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 10);

        for rate in [0.0, -0.5, 1.5, f64::NAN] {
            match crossover_pairs(10, rate, &mut rng) {
                Err(GeneticError::Configuration(_)) => {}
                _ => panic!("Expected Configuration error for rate {}", rate),
            }
        }
    }
}

//! Integration tests for descmatch.
//!
//! End-to-end tests exercising the public facade over both element types.
//!
//! Coverage:
//! 1. Result invariants (`best_distance <= second_distance`, distinct
//!    indices) across randomized sweeps
//! 2. Scalar/SIMD agreement: bit-exact for `i16`, within-epsilon for `f32`,
//!    including adversarial all-equal and all-maximal inputs
//! 3. Determinism of repeated queries
//! 4. Quantized boundary and clamp behavior
//! 5. Float identical/orthogonal unit vectors and the 2.0 -> 1.0 clamp
//! 6. Empty and single-descriptor indexes
//! 7. Concurrent reads against one shared index
//! 8. Error propagation (construction and query contract violations)

use descmatch::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

const SWEEP_ROUNDS: usize = 50;

fn random_quantized(rng: &mut StdRng, count: usize, dim: usize) -> Vec<i16> {
    (0..count * dim).map(|_| rng.gen_range(-127..=127)).collect()
}

fn random_unit(rng: &mut StdRng, count: usize, dim: usize) -> Vec<f32> {
    let mut elements: Vec<f32> = (0..count * dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
    for descriptor in elements.chunks_exact_mut(dim) {
        let norm = descriptor.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in descriptor {
                *x /= norm;
            }
        }
    }
    elements
}

fn scalar_index<E: DescriptorElement>(
    elements: &[E],
    dim: usize,
) -> DescriptorIndex<'_, E> {
    DescriptorIndex::with_config(elements, dim, KernelConfig::scalar_only())
        .expect("scalar index")
}

// ═══════════════════════════════════════════════════════════════════════════
// Result invariants
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn best_distance_bounded_by_second_across_random_sweeps() {
    let mut rng = StdRng::seed_from_u64(11);
    for round in 0..SWEEP_ROUNDS {
        let count = rng.gen_range(2..40);
        let elements = random_quantized(&mut rng, count, 16);
        let query = random_quantized(&mut rng, 1, 16);
        let index = DescriptorIndex::new(&elements, 16).expect("index");
        let pair = index.find(&query).expect("find");
        assert!(
            pair.best_distance <= pair.second_distance,
            "round {round}: best {} > second {}",
            pair.best_distance,
            pair.second_distance
        );
        assert_ne!(
            pair.best_index, pair.second_index,
            "round {round}: duplicate index with {count} descriptors"
        );
    }
}

#[test]
fn float_invariants_hold_across_random_sweeps() {
    let mut rng = StdRng::seed_from_u64(12);
    for round in 0..SWEEP_ROUNDS {
        let count = rng.gen_range(2..40);
        let elements = random_unit(&mut rng, count, 8);
        let query = random_unit(&mut rng, 1, 8);
        let index = DescriptorIndex::new(&elements, 8).expect("index");
        let pair = index.find(&query).expect("find");
        assert!(
            pair.best_distance <= pair.second_distance,
            "round {round}: best {} > second {}",
            pair.best_distance,
            pair.second_distance
        );
        assert_ne!(pair.best_index, pair.second_index, "round {round}");
        assert!((0.0..=1.0).contains(&pair.best_distance), "round {round}");
        assert!((0.0..=1.0).contains(&pair.second_distance), "round {round}");
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scalar/SIMD agreement
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn quantized_kernels_agree_bit_exact() {
    let mut rng = StdRng::seed_from_u64(21);
    for round in 0..SWEEP_ROUNDS {
        let count = rng.gen_range(1..60);
        let elements = random_quantized(&mut rng, count, 32);
        let query = random_quantized(&mut rng, 1, 32);

        let simd = DescriptorIndex::new(&elements, 32).expect("index");
        assert_eq!(simd.kernel(), Kernel::Simd);
        let scalar = scalar_index(&elements, 32);

        let simd_pair = simd.find(&query).expect("find");
        let scalar_pair = scalar.find(&query).expect("find");
        assert_eq!(simd_pair, scalar_pair, "round {round}");
    }
}

#[test]
fn float_kernels_agree_within_epsilon() {
    let mut rng = StdRng::seed_from_u64(22);
    for round in 0..SWEEP_ROUNDS {
        let count = rng.gen_range(1..60);
        let elements = random_unit(&mut rng, count, 16);
        let query = random_unit(&mut rng, 1, 16);

        let simd = DescriptorIndex::new(&elements, 16).expect("index");
        assert_eq!(simd.kernel(), Kernel::Simd);
        let scalar = scalar_index(&elements, 16);

        let simd_pair = simd.find(&query).expect("find");
        let scalar_pair = scalar.find(&query).expect("find");
        assert_eq!(simd_pair.best_index, scalar_pair.best_index, "round {round}");
        assert_eq!(
            simd_pair.second_index, scalar_pair.second_index,
            "round {round}"
        );
        assert!(
            (simd_pair.best_distance - scalar_pair.best_distance).abs() < 1e-5,
            "round {round}: simd {} vs scalar {}",
            simd_pair.best_distance,
            scalar_pair.best_distance
        );
        assert!(
            (simd_pair.second_distance - scalar_pair.second_distance).abs() < 1e-5,
            "round {round}: simd {} vs scalar {}",
            simd_pair.second_distance,
            scalar_pair.second_distance
        );
    }
}

#[test]
fn kernels_agree_on_all_equal_descriptors() {
    // Every candidate ties; both kernels must pick indices 0 and 1.
    let elements = vec![64_i16; 10 * 8];
    let query = vec![64_i16; 8];

    let simd = DescriptorIndex::new(&elements, 8).expect("index");
    let scalar = scalar_index(&elements, 8);
    let simd_pair = simd.find(&query).expect("find");
    let scalar_pair = scalar.find(&query).expect("find");

    assert_eq!(simd_pair, scalar_pair);
    assert_eq!(simd_pair.best_index, 0);
    assert_eq!(simd_pair.second_index, 1);
}

#[test]
fn kernels_agree_on_all_maximal_descriptors() {
    let elements = vec![127_i16; 6 * 16];
    let query = vec![127_i16; 16];

    let simd = DescriptorIndex::new(&elements, 16).expect("index");
    let scalar = scalar_index(&elements, 16);
    let simd_pair = simd.find(&query).expect("find");
    let scalar_pair = scalar.find(&query).expect("find");

    assert_eq!(simd_pair, scalar_pair);
    // 16 * 127^2 far exceeds the clamp bound; distance clamps to 0.
    assert_eq!(simd_pair.best_distance, 0);
    assert_eq!(simd_pair.second_distance, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Determinism
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn repeated_finds_return_identical_results() {
    let mut rng = StdRng::seed_from_u64(31);
    let elements = random_quantized(&mut rng, 50, 24);
    let query = random_quantized(&mut rng, 1, 24);
    let index = DescriptorIndex::new(&elements, 24).expect("index");

    let first = index.find(&query).expect("find");
    for _ in 0..20 {
        assert_eq!(index.find(&query).expect("find"), first);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Distance transforms
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn quantized_boundary_case() {
    let elements: Vec<i16> = vec![
        127, 0, 0, 0, 0, 0, 0, 0, //
        0, 127, 0, 0, 0, 0, 0, 0,
    ];
    let index = DescriptorIndex::new(&elements, 8).expect("index");
    let pair = index.find(&[127, 0, 0, 0, 0, 0, 0, 0]).expect("find");
    assert_eq!(pair.best_index, 0);
    assert_eq!(pair.best_distance, 0);
    assert_eq!(pair.second_index, 1);
    assert_eq!(pair.second_distance, 32258);
}

#[test]
fn quantized_distances_stay_in_range_for_malformed_components() {
    // Components outside [-127, 127] overrun the nominal inner-product
    // bound; the distance must still land in [0, 32258].
    let elements: Vec<i16> = vec![
        300, 300, 300, 300, 300, 300, 300, 300, //
        -300, -300, -300, -300, -300, -300, -300, -300,
    ];
    let index = DescriptorIndex::new(&elements, 8).expect("index");
    let pair = index.find(&[300_i16; 8]).expect("find");
    assert!((0..=32258).contains(&pair.best_distance));
    assert!((0..=32258).contains(&pair.second_distance));
    assert_eq!(pair.best_distance, 0);
    assert_eq!(pair.second_distance, 32258);
}

#[test]
fn float_identical_unit_vectors_have_distance_zero() {
    let elements: Vec<f32> = vec![1.0, 0.0, 0.0, 0.0];
    let index = DescriptorIndex::new(&elements, 4).expect("index");
    let pair = index.find(&[1.0, 0.0, 0.0, 0.0]).expect("find");
    assert!(pair.best_distance.abs() < f32::EPSILON);
}

#[test]
fn float_orthogonal_unit_vectors_clamp_to_one() {
    // Raw squared distance between orthogonal unit vectors is 2.0; the
    // [0, 1] clamp caps the reported value at 1.0.
    let elements: Vec<f32> = vec![0.0, 1.0, 0.0, 0.0];
    let index = DescriptorIndex::new(&elements, 4).expect("index");
    let pair = index.find(&[1.0, 0.0, 0.0, 0.0]).expect("find");
    assert!((pair.best_distance - 1.0).abs() < f32::EPSILON);
}

// ═══════════════════════════════════════════════════════════════════════════
// Degenerate datasets
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_index_returns_sentinels_for_both_types() {
    let index = DescriptorIndex::<i16>::new(&[], 8).expect("index");
    assert!(index.is_empty());
    let pair = index.find(&[0_i16; 8]).expect("find");
    assert_eq!((pair.best_index, pair.second_index), (0, 0));
    assert_eq!(pair.best_distance, 32258);
    assert_eq!(pair.second_distance, 32258);

    let index = DescriptorIndex::<f32>::new(&[], 4).expect("index");
    let pair = index.find(&[0.0_f32; 4]).expect("find");
    assert_eq!((pair.best_index, pair.second_index), (0, 0));
    assert!((pair.best_distance - 1.0).abs() < f32::EPSILON);
    assert!((pair.second_distance - 1.0).abs() < f32::EPSILON);
}

#[test]
fn single_descriptor_keeps_runner_up_sentinel() {
    let elements = [50_i16, -50, 50, -50, 50, -50, 50, -50];
    let index = DescriptorIndex::new(&elements, 8).expect("index");
    let pair = index.find(&[1_i16; 8]).expect("find");
    assert_eq!(pair.best_index, 0);
    assert_eq!(pair.second_index, 0);
    assert_eq!(pair.second_distance, 32258);

    let elements = [1.0_f32, 0.0, 0.0, 0.0];
    let index = DescriptorIndex::new(&elements, 4).expect("index");
    let pair = index.find(&[0.0_f32, 1.0, 0.0, 0.0]).expect("find");
    assert_eq!(pair.best_index, 0);
    assert_eq!(pair.second_index, 0);
    assert!((pair.second_distance - 1.0).abs() < f32::EPSILON);
}

// ═══════════════════════════════════════════════════════════════════════════
// Concurrency
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn concurrent_reads_share_one_index() {
    let mut rng = StdRng::seed_from_u64(41);
    let elements = random_unit(&mut rng, 100, 16);
    let index = DescriptorIndex::new(&elements, 16).expect("index");
    let queries: Vec<Vec<f32>> = (0..8).map(|_| random_unit(&mut rng, 1, 16)).collect();

    let expected: Vec<NearestPair<f32>> = queries
        .iter()
        .map(|q| index.find(q).expect("find"))
        .collect();

    std::thread::scope(|scope| {
        let index = &index;
        for (query, expected) in queries.iter().zip(&expected) {
            scope.spawn(move || {
                let pair = index.find(query).expect("find");
                assert_eq!(pair, *expected);
            });
        }
    });
}

#[test]
fn batch_results_match_sequential_finds() {
    let mut rng = StdRng::seed_from_u64(42);
    let elements = random_quantized(&mut rng, 80, 8);
    let index = DescriptorIndex::new(&elements, 8).expect("index");
    let queries: Vec<Vec<i16>> = (0..32).map(|_| random_quantized(&mut rng, 1, 8)).collect();

    let batch = index.find_batch(&queries).expect("batch");
    for (query, pair) in queries.iter().zip(&batch) {
        assert_eq!(index.find(query).expect("find"), *pair);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Error propagation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn construction_contract_violations_are_rejected() {
    assert!(matches!(
        DescriptorIndex::<i16>::new(&[1, 2], 0),
        Err(MatchError::InvalidDimension { .. })
    ));
    assert!(matches!(
        DescriptorIndex::<f32>::new(&[1.0; 10], 4),
        Err(MatchError::BufferSizeMismatch { .. })
    ));
}

#[test]
fn query_dimension_mismatch_is_rejected() {
    let elements = [0.0_f32; 16];
    let index = DescriptorIndex::new(&elements, 4).expect("index");
    let err = index.find(&[0.0_f32; 5]).unwrap_err();
    assert!(matches!(
        err,
        MatchError::DimensionMismatch {
            expected: 4,
            found: 5
        }
    ));
}

//! Basic matching example: build an index over quantized descriptors and
//! run the ratio test against the best/second-best distances.
//!
//! Run with: `cargo run --example basic_match`

use descmatch::prelude::*;

fn main() {
    // Eight-dimensional quantized descriptors, components in [-127, 127].
    // In a real pipeline these come from a feature extractor, one per
    // keypoint.
    let descriptors: Vec<i16> = vec![
        127, 0, 0, 0, 0, 0, 0, 0, // 0: axis-aligned
        0, 127, 0, 0, 0, 0, 0, 0, // 1: orthogonal to 0
        120, 10, 0, 0, 0, 0, 0, 0, // 2: near 0
        90, 90, 0, 0, 0, 0, 0, 0, // 3: diagonal
    ];

    // ── Step 1: Build the index ───────────────────────────────────────────
    let index = DescriptorIndex::new(&descriptors, 8).expect("build index");
    println!(
        "Indexed {} descriptors of dimension {} ({} kernel)",
        index.len(),
        index.dimensions(),
        index.kernel()
    );

    // ── Step 2: Query ─────────────────────────────────────────────────────
    let query: [i16; 8] = [125, 5, 0, 0, 0, 0, 0, 0];
    let pair = index.find(&query).expect("find");
    println!(
        "Best match: descriptor {} at squared distance {}",
        pair.best_index, pair.best_distance
    );
    println!(
        "Runner-up:  descriptor {} at squared distance {}",
        pair.second_index, pair.second_distance
    );

    // ── Step 3: Ratio test ────────────────────────────────────────────────
    // Accept the correspondence only when the best match is clearly better
    // than the runner-up.
    let ratio = pair.ratio();
    let accepted = ratio < 0.64;
    println!(
        "Distance ratio {ratio:.3} -> match {}",
        if accepted { "accepted" } else { "rejected" }
    );

    // ── Step 4: Batch queries ─────────────────────────────────────────────
    let queries: Vec<[i16; 8]> = vec![
        [0, 127, 0, 0, 0, 0, 0, 0],
        [64, 64, 0, 0, 0, 0, 0, 0],
    ];
    let pairs = index.find_batch(&queries).expect("batch");
    for (query_index, pair) in pairs.iter().enumerate() {
        println!(
            "Query {}: best descriptor {} (distance {}), ratio {:.3}",
            query_index,
            pair.best_index,
            pair.best_distance,
            pair.ratio()
        );
    }
}

//! Skin Resolution Tests
//!
//! Tests for:
//! - SkinInfluence four-slot reduction (sorting, truncation,
//!   renormalization, canonical empty default)
//! - transform_position weighted palette application

use glam::{Mat4, Vec3};

use manikin::mesh::{SkinInfluence, transform_position};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// SkinInfluence::from_influences
// ============================================================================

#[test]
fn weights_sum_to_one_for_nonempty_input() {
    let cases: &[&[(u16, f32)]] = &[
        &[(0, 1.0)],
        &[(0, 0.5), (1, 0.5)],
        &[(0, 0.2), (1, 0.3), (2, 0.4), (3, 0.1)],
        &[(0, 3.0), (1, 1.0)], // unnormalized input
        &[(0, 0.3), (1, 0.25), (2, 0.2), (3, 0.15), (4, 0.1)], // more than four
    ];

    for influences in cases {
        let influence = SkinInfluence::from_influences(influences);
        assert!(
            approx(influence.weight_sum(), 1.0),
            "weights {:?} sum to {}",
            influence.weights,
            influence.weight_sum()
        );
    }
}

#[test]
fn empty_input_yields_canonical_default() {
    let influence = SkinInfluence::from_influences(&[]);
    assert_eq!(influence.indices, [0, 0, 0, 0]);
    assert_eq!(influence.weights, [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn zero_weight_input_yields_canonical_default() {
    // All-zero weights carry no influence: same as empty
    let influence = SkinInfluence::from_influences(&[(3, 0.0), (5, 0.0)]);
    assert_eq!(influence.indices, [0, 0, 0, 0]);
    assert_eq!(influence.weights, [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn slots_sorted_by_descending_weight() {
    let influence = SkinInfluence::from_influences(&[(2, 0.1), (9, 0.7), (4, 0.2)]);

    assert_eq!(influence.indices[0], 9);
    assert_eq!(influence.indices[1], 4);
    assert_eq!(influence.indices[2], 2);
    assert!(influence.weights[0] >= influence.weights[1]);
    assert!(influence.weights[1] >= influence.weights[2]);
}

#[test]
fn truncation_keeps_heaviest_four() {
    let influence = SkinInfluence::from_influences(&[
        (0, 0.05),
        (1, 0.4),
        (2, 0.3),
        (3, 0.15),
        (4, 0.1),
    ]);

    // Bone 0 carried the smallest weight and is dropped
    assert!(!influence.indices.contains(&0) || influence.weights[3] > 0.0);
    assert_eq!(influence.indices[0], 1);
    assert!(approx(influence.weight_sum(), 1.0));
}

// ============================================================================
// transform_position
// ============================================================================

#[test]
fn identity_palette_is_identity() {
    let palette = [Mat4::IDENTITY, Mat4::IDENTITY];
    let position = Vec3::new(1.0, 2.0, 3.0);

    // Any influence whose weights sum to 1 leaves the position unchanged
    let full = SkinInfluence::from_influences(&[(0, 1.0)]);
    assert!(vec3_approx(transform_position(position, &palette, &full), position));

    let split = SkinInfluence::from_influences(&[(0, 0.5), (1, 0.5)]);
    assert!(vec3_approx(transform_position(position, &palette, &split), position));
}

#[test]
fn weighted_blend_of_two_translations() {
    let palette = [
        Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)),
        Mat4::from_translation(Vec3::new(0.0, 4.0, 0.0)),
    ];
    let influence = SkinInfluence::from_influences(&[(0, 0.5), (1, 0.5)]);

    let out = transform_position(Vec3::ZERO, &palette, &influence);
    assert!(vec3_approx(out, Vec3::new(1.0, 2.0, 0.0)), "got {out}");
}

#[test]
fn zero_weight_slots_are_skipped() {
    // Slot 1 has zero weight and points at a wild joint index; it must
    // not contribute or read out of range
    let influence = SkinInfluence {
        indices: [0, 999, 0, 0],
        weights: [1.0, 0.0, 0.0, 0.0],
    };
    let palette = [Mat4::from_translation(Vec3::X)];

    let out = transform_position(Vec3::ZERO, &palette, &influence);
    assert!(vec3_approx(out, Vec3::X));
}

#[test]
fn out_of_range_joint_indices_are_skipped() {
    let influence = SkinInfluence {
        indices: [0, 7, 0, 0],
        weights: [0.5, 0.5, 0.0, 0.0],
    };
    let palette = [Mat4::IDENTITY];

    // Only the valid slot contributes
    let out = transform_position(Vec3::new(2.0, 0.0, 0.0), &palette, &influence);
    assert!(vec3_approx(out, Vec3::new(1.0, 0.0, 0.0)), "got {out}");
}

//! Animation Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation and clamping
//! - AnimatableProperty default fallback and sparse curve binding
//! - AnimationPlayer loop modes (Once, Loop, PingPong)

use std::f32::consts::PI;

use glam::{Quat, Vec3};

use manikin::animation::{
    AnimatableProperty, AnimationPlayer, InterpolationMode, KeyframeTrack, LoopMode,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// KeyframeTrack: Linear Interpolation
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    let val = track.sample(0.5).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframes() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    assert!(approx(track.sample(0.0).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 10.0));
    assert!(approx(track.sample(2.0).unwrap(), 20.0));
}

#[test]
fn track_linear_f32_clamp_beyond_range() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 10.0],
        InterpolationMode::Linear,
    );

    // Sampling far outside the keyframe range clamps to the end values
    assert!(approx(track.sample(5.0).unwrap(), 10.0));
    assert!(approx(track.sample(-5.0).unwrap(), 0.0));
}

#[test]
fn track_linear_f32_before_first() {
    let track = KeyframeTrack::new(
        vec![1.0, 2.0],
        vec![10.0_f32, 20.0],
        InterpolationMode::Linear,
    );

    let val = track.sample(0.5).unwrap();
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

#[test]
fn track_linear_vec3() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let val = track.sample(0.5).unwrap();
    assert!(approx(val.x, 5.0));
    assert!(approx(val.y, 10.0));
    assert!(approx(val.z, 15.0));
}

#[test]
fn track_linear_quat_is_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let val = track.sample(0.5).unwrap();
    let expected = q0.slerp(q1, 0.5);
    let angle = val.angle_between(expected);
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
}

// ============================================================================
// KeyframeTrack: Step Interpolation
// ============================================================================

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    assert!(approx(track.sample(0.0).unwrap(), 0.0));
    assert!(approx(track.sample(0.5).unwrap(), 0.0));
    assert!(approx(track.sample(0.99).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 100.0));
    assert!(approx(track.sample(1.5).unwrap(), 100.0));
}

// ============================================================================
// KeyframeTrack: Cubic Spline Interpolation
// ============================================================================

#[test]
fn track_cubic_f32_endpoints() {
    // CubicSpline: values = [in_tangent, value, out_tangent] per frame
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 1.0, // frame 0: in_tangent=0, value=0, out_tangent=1
            1.0, 10.0, 0.0, // frame 1: in_tangent=1, value=10, out_tangent=0
        ],
        InterpolationMode::CubicSpline,
    );

    let v0 = track.sample(0.0).unwrap();
    assert!(approx(v0, 0.0), "got {v0}");
    let v1 = track.sample(1.0).unwrap();
    assert!(approx(v1, 10.0), "got {v1}");
}

#[test]
fn track_cubic_f32_smooth_midpoint() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 0.0, // frame 0: zero tangents, value=0
            0.0, 10.0, 0.0, // frame 1: zero tangents, value=10
        ],
        InterpolationMode::CubicSpline,
    );

    // With zero tangents, the Hermite midpoint lands near 5.0
    let val = track.sample(0.5).unwrap();
    assert!((val - 5.0).abs() < 1.0, "Cubic midpoint expected ~5.0, got {val}");
}

// ============================================================================
// KeyframeTrack: Degenerate Tracks
// ============================================================================

#[test]
fn track_single_keyframe_is_constant() {
    let track = KeyframeTrack::new(vec![0.0], vec![42.0_f32], InterpolationMode::Linear);
    assert!(approx(track.sample(5.0).unwrap(), 42.0));
    assert!(approx(track.sample(-5.0).unwrap(), 42.0));
}

#[test]
fn track_empty_samples_to_none() {
    let track: KeyframeTrack<f32> = KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    assert!(track.is_empty());
    assert!(track.sample(0.0).is_none());
    assert!(approx(track.duration(), 0.0));
}

#[test]
fn track_duration_is_last_key_time() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.5, 3.0],
        vec![0.0_f32, 1.0, 2.0],
        InterpolationMode::Linear,
    );
    assert!(approx(track.duration(), 3.0));
}

// ============================================================================
// AnimatableProperty: Default Fallback
// ============================================================================

#[test]
fn property_unbound_returns_default() {
    let property = AnimatableProperty::new(7.5_f32);

    for t in [-10.0, 0.0, 0.3, 100.0] {
        assert!(approx(property.value_at(0, t), 7.5));
        assert!(approx(property.value_at(3, t), 7.5));
        assert!(approx(property.value_at(usize::MAX, t), 7.5));
    }
}

#[test]
fn property_bound_curve_evaluates() {
    let mut property = AnimatableProperty::new(Vec3::ZERO);
    property.set_curve(
        0,
        KeyframeTrack::new(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            InterpolationMode::Linear,
        ),
    );

    let val = property.value_at(0, 0.5);
    assert!(approx(val.x, 5.0));
}

#[test]
fn property_sparse_gap_returns_default() {
    let mut property = AnimatableProperty::new(1.0_f32);
    // Binding track 2 grows the list; tracks 0 and 1 stay unbound
    property.set_curve(
        2,
        KeyframeTrack::new(vec![0.0], vec![99.0_f32], InterpolationMode::Linear),
    );

    assert_eq!(property.track_count(), 3);
    assert!(!property.has_curve(0));
    assert!(!property.has_curve(1));
    assert!(property.has_curve(2));

    assert!(approx(property.value_at(0, 0.5), 1.0));
    assert!(approx(property.value_at(1, 0.5), 1.0));
    assert!(approx(property.value_at(2, 0.5), 99.0));
}

#[test]
fn property_empty_curve_returns_default() {
    let mut property = AnimatableProperty::new(4.0_f32);
    property.set_curve(0, KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear));

    assert!(approx(property.value_at(0, 0.0), 4.0));
}

// ============================================================================
// AnimationPlayer Loop Modes
// ============================================================================

#[test]
fn player_loop_mode_once() {
    let mut player = AnimationPlayer::new(0);
    player.loop_mode = LoopMode::Once;

    // Advance past end
    player.advance(3.0, 2.0);
    assert!(
        approx(player.time, 2.0),
        "Once: should clamp to duration, got {}",
        player.time
    );
    assert!(player.paused, "Once: should auto-pause at end");
}

#[test]
fn player_loop_mode_loop() {
    let mut player = AnimationPlayer::new(0);
    player.loop_mode = LoopMode::Loop;

    // Advance past end by 0.5
    player.advance(2.5, 2.0);
    assert!(
        approx(player.time, 0.5),
        "Loop: should wrap to 0.5, got {}",
        player.time
    );
    assert!(!player.paused, "Loop: should NOT auto-pause");
}

#[test]
fn player_loop_reverse_playback() {
    let mut player = AnimationPlayer::new(0);
    player.loop_mode = LoopMode::Loop;
    player.time_scale = -1.0;
    player.time = 0.5;

    // time = 0.5 - 1.0 = -0.5 → wraps to 1.5
    player.advance(1.0, 2.0);
    assert!(
        player.time > 0.0 && player.time <= 2.0,
        "Loop reverse: time should stay within [0, duration], got {}",
        player.time
    );
}

#[test]
fn player_ping_pong_mirrors() {
    let mut player = AnimationPlayer::new(0);
    player.loop_mode = LoopMode::PingPong;

    // Advance to 2.5 of a 2.0 clip: mirrored back to 1.5
    player.advance(2.5, 2.0);
    assert!(
        approx(player.time, 1.5),
        "PingPong: expected 1.5, got {}",
        player.time
    );
}

#[test]
fn player_paused_no_update() {
    let mut player = AnimationPlayer::new(0);
    player.paused = true;
    player.time = 0.5;

    player.advance(1.0, 2.0);
    assert!(approx(player.time, 0.5), "Paused player should not advance");
}

#[test]
fn player_time_scale() {
    let mut player = AnimationPlayer::new(0);
    player.loop_mode = LoopMode::Once;
    player.time_scale = 2.0;

    player.advance(1.0, 4.0); // effective dt = 2.0
    assert!(approx(player.time, 2.0), "Expected 2.0, got {}", player.time);
}

#[test]
fn player_blend_input_carries_state() {
    let mut player = AnimationPlayer::new(3);
    player.time = 1.25;
    player.weight = 0.75;

    let input = player.blend_input();
    assert_eq!(input.track, 3);
    assert!(approx(input.time, 1.25));
    assert!(approx(input.weight, 0.75));
}

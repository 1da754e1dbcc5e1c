//! Universal properties that must hold for every valid input.

use knurl_types::{Axis, BorderSpec, PatternSpec, ShapeKind};
use pattern_engine::WorkpiecePatterns;
use pretty_assertions::assert_eq;
use shape_ops::Workpiece;
use test_harness::{assert_near, planar_area_at, relative_error};

/// Identity: an empty usable region leaves the solid's bounding box alone.
#[test]
fn empty_usable_region_is_identity() {
    let plate = Workpiece::cuboid(20.0, 20.0, 5.0).unwrap().faces(">Z");
    let spec = PatternSpec {
        shape: ShapeKind::Circle,
        width: 2.0,
        border: 15.0,
        ..PatternSpec::default()
    };
    let cut = plate.cut_pattern(&spec).unwrap();
    let before = plate.bounding_box().unwrap();
    let after = cut.bounding_box().unwrap();
    assert_eq!(before.min, after.min);
    assert_eq!(before.max, after.max);
}

/// Monotonic volume: cutting never adds material.
#[test]
fn cutting_never_adds_material() {
    let plate = Workpiece::cuboid(16.0, 12.0, 4.0).unwrap().faces(">Z");
    let spec = PatternSpec {
        shape: ShapeKind::Square,
        width: 3.0,
        depth: Some(1.0),
        ..PatternSpec::default()
    };
    let cut = plate.cut_pattern(&spec).unwrap();
    assert!(cut.volume().unwrap() <= plate.volume().unwrap());
}

/// Determinism: identical inputs produce identical volume and bbox.
#[test]
fn repeat_calls_are_deterministic() {
    let plate = Workpiece::cuboid(14.0, 10.0, 4.0).unwrap().faces(">Z");
    let spec = PatternSpec {
        shape: ShapeKind::Circle,
        width: 2.0,
        depth: Some(1.5),
        ..PatternSpec::default()
    };
    let a = plate.cut_pattern(&spec).unwrap();
    let b = plate.cut_pattern(&spec).unwrap();
    assert_eq!(a.volume().unwrap(), b.volume().unwrap());
    let (ba, bb) = (a.bounding_box().unwrap(), b.bounding_box().unwrap());
    assert_eq!(ba.min, bb.min);
    assert_eq!(ba.max, bb.max);
}

/// Face-orientation invariance: rotating the scene by 90°, cutting the
/// corresponding face, and rotating back matches cutting in place.
#[test]
fn quarter_turned_scene_cuts_congruently() {
    let spec = PatternSpec {
        shape: ShapeKind::Circle,
        width: 2.0,
        spacing: Some(4.0),
        depth: Some(1.0),
        border: 2.0,
        ..PatternSpec::default()
    };

    let upright = Workpiece::cuboid(12.0, 8.0, 3.0).unwrap().faces(">Z");
    let cut_upright = upright.cut_pattern(&spec).unwrap();

    // Rotating +90° about X sends the +Z face to -Y.
    let turned = Workpiece::cuboid(12.0, 8.0, 3.0)
        .unwrap()
        .rotate(Axis::X, 90.0)
        .unwrap()
        .faces("<Y");
    let cut_turned = turned
        .cut_pattern(&spec)
        .unwrap()
        .rotate(Axis::X, -90.0)
        .unwrap();

    let va = cut_upright.volume().unwrap();
    let vb = cut_turned.volume().unwrap();
    assert!(
        relative_error(vb, va) < 0.01,
        "turned-scene volume {vb} vs {va}"
    );
}

/// Spacing law, measured through the real cut rather than the layout.
#[test]
fn line_count_follows_the_spacing_law() {
    // L = 20 across the lines, w = 1, s = 3, b = 2 =>
    // max(1, floor((20 - 4) / 4) + 1) = 5 lines
    let plate = Workpiece::cuboid(30.0, 20.0, 6.0).unwrap().faces(">Z");
    let spec = PatternSpec {
        shape: ShapeKind::Line,
        width: 1.0,
        spacing: Some(3.0),
        depth: Some(0.5),
        border: 2.0,
        ..PatternSpec::default()
    };
    let before = plate.volume().unwrap();
    let cut = plate.cut_pattern(&spec).unwrap();
    let removed = before - cut.volume().unwrap();
    let per_line = 26.0 * 1.0 * 0.5;
    assert!(
        relative_error(removed, 5.0 * per_line) < 0.02,
        "removed {removed}, expected 5 lines of {per_line}"
    );
}

/// Border closure: the frame area on top equals the perimeter-frame area.
#[test]
fn border_closure_on_a_rectangular_plate() {
    let (x, y, h, b) = (24.0, 18.0, 4.0, 2.5);
    let plate = Workpiece::cuboid(x, y, h).unwrap().faces(">Z");
    let cut = plate.cut_border(&BorderSpec {
        width: b,
        depth: None,
    })
    .unwrap();

    let mesh = cut.to_mesh(0.01).unwrap();
    let frame = planar_area_at(&mesh, h, 1e-6);
    let expected = x * y - (x - 2.0 * b) * (y - 2.0 * b);
    assert_near(frame, expected, 0.5, "frame area");
}

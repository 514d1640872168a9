//! Terrain regression tests.
//!
//! Pins the output of a small reference configuration so changes to the
//! noise table, shuffle, fractal sum or triangulation show up as failures.

use terrasynth::noise::GradientNoise;
use terrasynth::{HeightfieldSynthesizer, ParameterHistory, TerrainError, TerrainParameters};

/// Seed 123, 4x4 grid, one octave
fn reference_params() -> TerrainParameters {
    TerrainParameters {
        width: 4,
        height: 4,
        octaves: 1,
        persistence: 0.5,
        lacunarity: 2.0,
        base_amplitude: 0.5,
        base_frequency: 0.4,
    }
}

/// Heights in grid order from a reference run
const REFERENCE_HEIGHTS: [f32; 16] = [
    0.143_537_06,
    0.176_243_3,
    0.206_622_33,
    0.244_543_48,
    0.176_243_3,
    0.215_685_52,
    0.249_911_08,
    0.291_200_2,
    0.205_456_81,
    0.248_666_29,
    0.283_244_2,
    0.324_686_02,
    0.222_717_36,
    0.268_083_84,
    0.302_766_14,
    0.344_208,
];

#[test]
fn test_reference_table_prefix() {
    let noise = GradientNoise::new(123);
    assert_eq!(
        &noise.table().as_slice()[..8],
        &[232u8, 172, 68, 78, 53, 208, 40, 251]
    );
}

#[test]
fn test_reference_scenario() {
    let synth = HeightfieldSynthesizer::new(123);
    let mesh = synth.synthesize(&reference_params()).unwrap();

    assert_eq!(mesh.vertices.len(), 16);
    assert_eq!(mesh.indices.len(), 18);
    assert_eq!(mesh.degenerate_faces, 0);

    assert!((mesh.vertices[0].position[1] - 0.143_537_06).abs() < 1e-5);
    for (vertex, expected) in mesh.vertices.iter().zip(REFERENCE_HEIGHTS) {
        assert!(
            (vertex.position[1] - expected).abs() < 1e-5,
            "height {} != {}",
            vertex.position[1],
            expected
        );
    }

    let n0 = mesh.vertices[0].normal;
    let expected_n0 = [-0.097_187_55, 0.990_509_5, -0.097_187_55];
    for (a, b) in n0.iter().zip(expected_n0) {
        assert!((a - b).abs() < 1e-5, "normal {:?} != {:?}", n0, expected_n0);
    }

    let n15 = mesh.vertices[15].normal;
    let expected_n15 = [-0.123_167_89, 0.990_688_3, -0.058_020_6];
    for (a, b) in n15.iter().zip(expected_n15) {
        assert!((a - b).abs() < 1e-5, "normal {:?} != {:?}", n15, expected_n15);
    }
}

#[test]
fn test_reference_scenario_is_stable_across_runs() {
    let first = HeightfieldSynthesizer::new(123)
        .synthesize(&reference_params())
        .unwrap();
    for _ in 0..3 {
        let again = HeightfieldSynthesizer::new(123)
            .synthesize(&reference_params())
            .unwrap();
        assert_eq!(first.vertices, again.vertices);
        assert_eq!(first.indices, again.indices);
    }
}

#[test]
fn test_mesh_invariants_across_sizes() {
    let synth = HeightfieldSynthesizer::new(31);
    for &(w, h) in &[(2, 2), (2, 9), (13, 5), (40, 40)] {
        let params = TerrainParameters {
            width: w,
            height: h,
            octaves: 4,
            ..reference_params()
        };
        let mesh = synth.synthesize(&params).unwrap();

        assert_eq!(mesh.vertices.len(), (w * h) as usize);
        assert_eq!(mesh.indices.len(), 6 * ((w - 1) * (h - 1)) as usize);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        for v in &mesh.vertices {
            let len = v.normal.iter().map(|c| c * c).sum::<f32>().sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal length {}", len);
        }
    }
}

#[test]
fn test_default_entry_point_rejects_bad_input() {
    let bad_width = TerrainParameters {
        width: 1,
        ..reference_params()
    };
    let bad_octaves = TerrainParameters {
        octaves: 0,
        ..reference_params()
    };
    for params in [bad_width, bad_octaves] {
        assert!(matches!(
            terrasynth::synthesize_terrain(params),
            Err(TerrainError::InvalidParameter { .. })
        ));
    }

    let mesh = terrasynth::synthesize_terrain(reference_params()).unwrap();
    assert!((mesh.vertices[0].position[1] - REFERENCE_HEIGHTS[0]).abs() < 1e-5);
}

#[test]
fn test_rejects_parameters_that_overflow_geometry() {
    let runaway_frequency = TerrainParameters {
        octaves: 3,
        lacunarity: 1e200,
        ..reference_params()
    };
    let runaway_amplitude = TerrainParameters {
        base_amplitude: 1e39,
        ..reference_params()
    };
    let huge_grid = TerrainParameters {
        width: u32::MAX,
        height: 0,
        ..reference_params()
    }
    .clamped();

    for params in [runaway_frequency, runaway_amplitude] {
        assert!(matches!(
            terrasynth::synthesize_terrain(params),
            Err(TerrainError::InvalidParameter { .. })
        ));
    }
    assert!(huge_grid.vertex_count() <= terrasynth::params::MAX_VERTICES as usize);
    assert!(matches!(
        terrasynth::synthesize_terrain(TerrainParameters {
            width: u32::MAX / 2,
            height: 2,
            ..reference_params()
        }),
        Err(TerrainError::MeshTooLarge { .. })
    ));
}

#[test]
fn test_history_round_trip_around_synthesis() {
    let p = reference_params();
    let q = TerrainParameters { octaves: 3, ..p };
    let mut history = ParameterHistory::new();

    history.push(p);
    terrasynth::synthesize_terrain(q).unwrap();
    assert_eq!(history.pop(), Some(p));
    assert_eq!(history.pop(), None);
    assert!(history.is_empty());
}

// Host-side tests for the scene store, geometry and configuration.

use glam::Vec3;
use neon_core::geometry::{grid_lines, hsl_to_rgb, icosphere_triangles, icosphere_wireframe};
use neon_core::*;
use std::f32::consts::TAU;

fn populated() -> (SceneStore, SceneHandles) {
    let mut store = SceneStore::new(Viewport::new(800, 600, 1.0));
    let handles = store.populate(&SceneConfig::default()).unwrap();
    (store, handles)
}

#[test]
fn default_scene_has_expected_objects() {
    let (store, handles) = populated();
    assert_eq!(store.get(ObjectKind::Particles).count(), 1);
    assert_eq!(store.get(ObjectKind::Sphere).count(), 2);
    assert_eq!(store.get(ObjectKind::Grid).count(), 1);
    // ambient + primary + three neon
    assert_eq!(store.get(ObjectKind::Light).count(), 5);
    assert_eq!(handles.neon_lights.len(), 3);
    assert!(handles.outer_sphere.is_some() && handles.inner_sphere.is_some());
}

#[test]
fn camera_starts_at_z5_with_viewport_aspect() {
    let (store, _) = populated();
    assert_eq!(store.camera.position, Vec3::new(0.0, 0.0, 5.0));
    assert!((store.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    assert!((store.camera.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
}

#[test]
fn neon_phases_are_distinct_and_evenly_spaced() {
    let (store, _) = populated();
    let neon = store.neon_lights();
    let phases: Vec<f32> = neon.iter().map(|l| l.orbit.unwrap().phase()).collect();
    assert_eq!(phases.len(), 3);
    for w in phases.windows(2) {
        assert!((w[1] - w[0] - TAU / 3.0).abs() < 1e-6);
    }
    // starting point (sin, cos) on the vertical circle
    assert!((neon[0].position - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-5);
}

#[test]
fn add_and_remove_objects() {
    let (mut store, handles) = populated();
    let before = store.len();
    let id = store.add_object(SceneObject::Light(Light::point(
        0xffffff,
        1.0,
        10.0,
        Vec3::ZERO,
    )));
    assert_eq!(store.len(), before + 1);
    assert_eq!(store.get(ObjectKind::Light).count(), 6);

    let removed = store.remove_object(id).expect("object was present");
    assert_eq!(removed.kind(), ObjectKind::Light);
    assert!(store.remove_object(id).is_none());

    let sphere = store.remove_object(handles.outer_sphere.unwrap()).unwrap();
    assert_eq!(sphere.kind(), ObjectKind::Sphere);
    assert!(store.mesh(handles.outer_sphere.unwrap()).is_none());
    assert_eq!(store.len(), before - 1);
}

#[test]
fn removed_sphere_makes_rotation_a_no_op() {
    let mut sched =
        FrameScheduler::new(&SceneConfig::default(), Viewport::new(100, 100, 1.0)).unwrap();
    let outer = sched.handles.outer_sphere.unwrap();
    sched.store.remove_object(outer);
    sched.advance(std::time::Duration::ZERO);
    let inner = sched.store.mesh(sched.handles.inner_sphere.unwrap()).unwrap();
    assert!((inner.transform.rotation.x + 0.002).abs() < 1e-7);
}

#[test]
fn particles_are_seeded_and_within_spread() {
    let (a, _) = populated();
    let (b, _) = populated();
    let pa = a.particles().next().unwrap();
    let pb = b.particles().next().unwrap();
    assert_eq!(pa.positions(), pb.positions());
    assert!(pa.positions().iter().all(|v| v.abs() <= 25.0));
    assert!(pa.sizes().iter().all(|s| (0.0..2.0).contains(s)));
    assert!(pa.colors().iter().all(|c| (0.0..=1.0).contains(c)));
    assert!((pa.material.size - 0.1).abs() < f32::EPSILON);
}

#[test]
fn icosphere_vertices_lie_on_the_radius() {
    let tris = icosphere_triangles(2.0, 4);
    assert_eq!(tris.len(), 20 * 25);
    for tri in &tris {
        for v in tri {
            assert!((v.length() - 2.0).abs() < 1e-4);
        }
    }
    let wire = icosphere_wireframe(1.8, 2);
    assert_eq!(wire.segment_count(), 20 * 9 * 3);
}

#[test]
fn grid_has_two_lines_per_division_step() {
    let grid = grid_lines(100.0, 100);
    assert_eq!(grid.segment_count(), 101 * 2);
    let first = grid.vertices[0].position;
    assert_eq!(first, [-50.0, 0.0, -50.0]);
}

#[test]
fn grid_sits_below_the_spheres() {
    let (store, _) = populated();
    let grid = store
        .objects()
        .find_map(|(_, o)| match o {
            SceneObject::Grid(g) => Some(g),
            _ => None,
        })
        .unwrap();
    assert_eq!(grid.transform.position.y, -5.0);
}

#[test]
fn hsl_primary_hues() {
    let red = hsl_to_rgb(0.0, 1.0, 0.5);
    assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
    let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
    assert!((green[1] - 1.0).abs() < 1e-5 && green[0].abs() < 1e-5);
    let grey = hsl_to_rgb(0.7, 0.0, 0.25);
    assert_eq!(grey, [0.25, 0.25, 0.25]);
}

#[test]
fn hex_colors_unpack() {
    assert_eq!(hex_rgb(0x00ffff), [0.0, 1.0, 1.0]);
    assert_eq!(hex_rgb(0xff0066), [1.0, 0.0, 0.4]);
}

#[test]
fn config_validation_rejects_degenerate_scenes() {
    assert!(SceneConfig::default().validate().is_ok());
    let empty = SceneConfig {
        particle_count: 0,
        ..SceneConfig::default()
    };
    assert_eq!(empty.validate(), Err(SceneError::EmptyParticleCloud));
    let bad_spread = SceneConfig {
        particle_spread: f32::NAN,
        ..SceneConfig::default()
    };
    assert!(matches!(
        bad_spread.validate(),
        Err(SceneError::InvalidDimension {
            field: "particle_spread",
            ..
        })
    ));
    let too_many = SceneConfig {
        neon_lights: 7,
        ..SceneConfig::default()
    };
    assert!(matches!(
        too_many.validate(),
        Err(SceneError::NeonCount { count: 7, .. })
    ));
    assert!(FrameScheduler::new(&empty, Viewport::new(1, 1, 1.0)).is_err());
}

#[test]
fn viewport_ignores_bogus_pixel_ratio() {
    let vp = Viewport::new(100, 50, f64::NAN);
    assert_eq!(vp.pixel_ratio, 1.0);
    assert_eq!(vp.drawing_buffer_size(), (100, 50));
}

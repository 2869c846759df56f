//! Scene graph store: every renderable object, the camera and the viewport.
//!
//! The store has no behaviour of its own. Animators and the input reactor
//! mutate it between frames; the render pipeline reads the whole store each
//! frame, so anything added here is drawn on the next render without extra
//! registration.

use crate::config::{SceneConfig, SceneError};
use crate::constants::*;
use crate::geometry::{self, LineGeometry};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Perspective camera looking down -Z. Moving it translates the view.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::from(CAMERA_START),
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Window size in CSS pixels plus the capped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        let pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing-store size of the canvas in physical pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let w = (self.width as f64 * self.pixel_ratio).floor() as u32;
        let h = (self.height as f64 * self.pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_rotation_translation(q, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct PointsMaterial {
    pub size: f32,
    pub opacity: f32,
}

/// The particle field. Buffer lengths are fixed at creation.
#[derive(Clone, Debug)]
pub struct ParticleCloud {
    positions: Box<[f32]>,
    base_y: Box<[f32]>,
    colors: Box<[f32]>,
    sizes: Box<[f32]>,
    pub material: PointsMaterial,
    dirty: bool,
}

impl ParticleCloud {
    pub fn generate(count: usize, spread: f32, size: f32, rng: &mut impl Rng) -> Self {
        let mut positions = vec![0.0_f32; count * 3];
        let mut colors = vec![0.0_f32; count * 3];
        let mut sizes = vec![0.0_f32; count];
        for i in 0..count {
            for axis in 0..3 {
                positions[i * 3 + axis] = (rng.gen::<f32>() - 0.5) * spread;
            }
            let rgb = geometry::hsl_to_rgb(rng.gen::<f32>(), 1.0, 0.5);
            colors[i * 3..i * 3 + 3].copy_from_slice(&rgb);
            sizes[i] = rng.gen::<f32>() * PARTICLE_SIZE_ATTR_MAX;
        }
        let base_y = positions.chunks_exact(3).map(|p| p[1]).collect();
        Self {
            positions: positions.into_boxed_slice(),
            base_y,
            colors: colors.into_boxed_slice(),
            sizes: sizes.into_boxed_slice(),
            material: PointsMaterial {
                size,
                opacity: PARTICLE_OPACITY,
            },
            dirty: true,
        }
    }

    pub fn count(&self) -> usize {
        self.sizes.len()
    }
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }
    /// Mutable view of the positions; the length cannot change.
    pub fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }
    pub fn base_y(&self) -> &[f32] {
        &self.base_y
    }
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
    /// Returns whether an upload is pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[derive(Clone, Debug)]
pub struct LineMaterial {
    pub color: [f32; 3],
    pub opacity: f32,
    /// Lit meshes respond to the scene lights; unlit lines draw flat colour.
    pub lit: bool,
}

#[derive(Clone, Debug)]
pub struct WireMesh {
    pub geometry: LineGeometry,
    pub material: LineMaterial,
    pub transform: Transform,
}

impl WireMesh {
    pub fn icosphere(radius: f32, detail: u32, color: u32, opacity: f32) -> Self {
        Self {
            geometry: geometry::icosphere_wireframe(radius, detail),
            material: LineMaterial {
                color: hex_rgb(color),
                opacity,
                lit: true,
            },
            transform: Transform::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    pub geometry: LineGeometry,
    pub material: LineMaterial,
    pub transform: Transform,
}

impl Grid {
    pub fn new(size: f32, divisions: u32, color: u32) -> Self {
        Self {
            geometry: geometry::grid_lines(size, divisions),
            material: LineMaterial {
                color: hex_rgb(color),
                opacity: 1.0,
                lit: false,
            },
            transform: Transform::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    Point { range: f32 },
}

/// Slot of an orbiting neon light; the phase is derived from it and fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSlot {
    pub index: usize,
    pub of: usize,
}

impl OrbitSlot {
    pub fn phase(&self) -> f32 {
        self.index as f32 * TAU / self.of.max(1) as f32
    }
}

#[derive(Clone, Debug)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub orbit: Option<OrbitSlot>,
}

impl Light {
    pub fn ambient(color: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: hex_rgb(color),
            intensity,
            position: Vec3::ZERO,
            orbit: None,
        }
    }

    pub fn point(color: u32, intensity: f32, range: f32, position: Vec3) -> Self {
        Self {
            kind: LightKind::Point { range },
            color: hex_rgb(color),
            intensity,
            position,
            orbit: None,
        }
    }

    /// Neon light `index` of `of`, placed on its orbit's starting point.
    pub fn neon(index: usize, of: usize) -> Self {
        let slot = OrbitSlot { index, of };
        let phase = slot.phase();
        let color = NEON_COLORS[index % NEON_COLORS.len()];
        let position = Vec3::new(
            phase.sin() * NEON_ORBIT_RADIUS,
            phase.cos() * NEON_ORBIT_RADIUS,
            0.0,
        );
        Self {
            orbit: Some(slot),
            ..Self::point(color, NEON_INTENSITY, NEON_RANGE, position)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Particles,
    Sphere,
    Light,
    Grid,
}

#[derive(Clone, Debug)]
pub enum SceneObject {
    Particles(ParticleCloud),
    Sphere(WireMesh),
    Light(Light),
    Grid(Grid),
}

impl SceneObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Particles(_) => ObjectKind::Particles,
            SceneObject::Sphere(_) => ObjectKind::Sphere,
            SceneObject::Light(_) => ObjectKind::Light,
            SceneObject::Grid(_) => ObjectKind::Grid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

/// Ids of the objects the default scene wires into its animators.
#[derive(Clone, Debug, Default)]
pub struct SceneHandles {
    pub outer_sphere: Option<ObjectId>,
    pub inner_sphere: Option<ObjectId>,
    pub particles: Option<ObjectId>,
    pub neon_lights: SmallVec<[ObjectId; 3]>,
}

pub struct SceneStore {
    objects: Vec<(ObjectId, SceneObject)>,
    next_id: u32,
    pub camera: Camera,
    pub viewport: Viewport,
}

impl SceneStore {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            objects: Vec::new(),
            next_id: 0,
            camera: Camera::new(viewport.aspect()),
            viewport,
        }
    }

    /// Build the default scene: lights, particles, the two spheres and the grid.
    pub fn populate(&mut self, config: &SceneConfig) -> Result<SceneHandles, SceneError> {
        config.validate()?;
        let mut handles = SceneHandles::default();

        self.add_object(SceneObject::Light(Light::ambient(
            AMBIENT_COLOR,
            AMBIENT_INTENSITY,
        )));
        self.add_object(SceneObject::Light(Light::point(
            PRIMARY_LIGHT_COLOR,
            PRIMARY_LIGHT_INTENSITY,
            PRIMARY_LIGHT_RANGE,
            Vec3::from(PRIMARY_LIGHT_POSITION),
        )));
        for i in 0..config.neon_lights {
            let id = self.add_object(SceneObject::Light(Light::neon(i, config.neon_lights)));
            handles.neon_lights.push(id);
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let cloud = ParticleCloud::generate(
            config.particle_count,
            config.particle_spread,
            config.particle_size,
            &mut rng,
        );
        handles.particles = Some(self.add_object(SceneObject::Particles(cloud)));

        handles.outer_sphere = Some(self.add_object(SceneObject::Sphere(WireMesh::icosphere(
            OUTER_SPHERE_RADIUS,
            OUTER_SPHERE_DETAIL,
            OUTER_SPHERE_COLOR,
            OUTER_SPHERE_OPACITY,
        ))));
        handles.inner_sphere = Some(self.add_object(SceneObject::Sphere(WireMesh::icosphere(
            INNER_SPHERE_RADIUS,
            INNER_SPHERE_DETAIL,
            INNER_SPHERE_COLOR,
            INNER_SPHERE_OPACITY,
        ))));

        let mut grid = Grid::new(GRID_SIZE, GRID_DIVISIONS, GRID_COLOR);
        grid.transform.position.y = GRID_Y;
        self.add_object(SceneObject::Grid(grid));

        log::info!(
            "[scene] objects={} particles={} neon_lights={}",
            self.objects.len(),
            config.particle_count,
            config.neon_lights
        );
        Ok(handles)
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let idx = self.objects.iter().position(|(oid, _)| *oid == id)?;
        Some(self.objects.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, o)| o)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, o)| o)
    }

    /// Live objects of one kind, in insertion order.
    pub fn get(&self, kind: ObjectKind) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .filter(move |(_, o)| o.kind() == kind)
            .map(|(id, o)| (*id, o))
    }

    pub fn get_mut(
        &mut self,
        kind: ObjectKind,
    ) -> impl Iterator<Item = (ObjectId, &mut SceneObject)> {
        self.objects
            .iter_mut()
            .filter(move |(_, o)| o.kind() == kind)
            .map(|(id, o)| (*id, o))
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, o)| (*id, o))
    }

    pub fn particles(&self) -> impl Iterator<Item = &ParticleCloud> {
        self.objects.iter().filter_map(|(_, o)| match o {
            SceneObject::Particles(p) => Some(p),
            _ => None,
        })
    }

    pub fn particles_mut(&mut self) -> impl Iterator<Item = &mut ParticleCloud> {
        self.objects.iter_mut().filter_map(|(_, o)| match o {
            SceneObject::Particles(p) => Some(p),
            _ => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.objects.iter().filter_map(|(_, o)| match o {
            SceneObject::Light(l) => Some(l),
            _ => None,
        })
    }

    pub fn lights_mut(&mut self) -> impl Iterator<Item = &mut Light> {
        self.objects.iter_mut().filter_map(|(_, o)| match o {
            SceneObject::Light(l) => Some(l),
            _ => None,
        })
    }

    pub fn mesh(&self, id: ObjectId) -> Option<&WireMesh> {
        match self.object(id)? {
            SceneObject::Sphere(m) => Some(m),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, id: ObjectId) -> Option<&mut WireMesh> {
        match self.object_mut(id)? {
            SceneObject::Sphere(m) => Some(m),
            _ => None,
        }
    }

    pub fn light(&self, id: ObjectId) -> Option<&Light> {
        match self.object(id)? {
            SceneObject::Light(l) => Some(l),
            _ => None,
        }
    }

    /// Orbiting lights ordered by their slot index.
    pub fn neon_lights(&self) -> Vec<&Light> {
        let mut lights: Vec<&Light> = self.lights().filter(|l| l.orbit.is_some()).collect();
        lights.sort_by_key(|l| l.orbit.map(|o| o.index));
        lights
    }
}

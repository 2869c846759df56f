//! Line-list geometry for the wireframe meshes and the grid floor.
//!
//! Everything here is produced once at scene construction. Lines are stored
//! as vertex pairs so the renderer can draw them with a `LineList` topology
//! and no index buffer.

use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct LineGeometry {
    pub vertices: Vec<LineVertex>,
}

impl LineGeometry {
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    fn push_segment(&mut self, a: Vec3, b: Vec3, na: Vec3, nb: Vec3) {
        self.vertices.push(LineVertex {
            position: a.to_array(),
            normal: na.to_array(),
        });
        self.vertices.push(LineVertex {
            position: b.to_array(),
            normal: nb.to_array(),
        });
    }
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_corners() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Triangles of an icosphere where every base face is split into
/// `(detail + 1)^2` triangles and projected onto the sphere.
pub fn icosphere_triangles(radius: f32, detail: u32) -> Vec<[Vec3; 3]> {
    let corners = icosahedron_corners();
    let cols = detail as usize + 1;
    let mut out = Vec::with_capacity(20 * cols * cols);
    for face in ICOSAHEDRON_FACES {
        let (a, b, c) = (corners[face[0]], corners[face[1]], corners[face[2]]);
        // grid[i][j]: row i walks from the a-b edge toward c
        let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let f = i as f32 / cols as f32;
            let aj = a.lerp(c, f);
            let bj = b.lerp(c, f);
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| {
                    if rows == 0 {
                        aj
                    } else {
                        aj.lerp(bj, j as f32 / rows as f32)
                    }
                })
                .collect();
            grid.push(row);
        }
        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                out.push(tri.map(|v| v.normalize() * radius));
            }
        }
    }
    out
}

/// Wireframe icosphere: three edges per triangle, normals point outward.
pub fn icosphere_wireframe(radius: f32, detail: u32) -> LineGeometry {
    let tris = icosphere_triangles(radius, detail);
    let mut geo = LineGeometry {
        vertices: Vec::with_capacity(tris.len() * 6),
    };
    for [a, b, c] in tris {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            geo.push_segment(p, q, p.normalize_or_zero(), q.normalize_or_zero());
        }
    }
    geo
}

/// Square grid on the XZ plane centred at the origin.
pub fn grid_lines(size: f32, divisions: u32) -> LineGeometry {
    let half = size / 2.0;
    let step = size / divisions.max(1) as f32;
    let mut geo = LineGeometry {
        vertices: Vec::with_capacity((divisions as usize + 1) * 4),
    };
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        geo.push_segment(
            Vec3::new(-half, 0.0, k),
            Vec3::new(half, 0.0, k),
            Vec3::Y,
            Vec3::Y,
        );
        geo.push_segment(
            Vec3::new(k, 0.0, -half),
            Vec3::new(k, 0.0, half),
            Vec3::Y,
            Vec3::Y,
        );
    }
    geo
}

/// HSL to RGB, all channels in 0..1.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;
    let hue = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            q + (p - q) * 6.0 * t
        } else if t < 0.5 {
            p
        } else if t < 2.0 / 3.0 {
            q + (p - q) * 6.0 * (2.0 / 3.0 - t)
        } else {
            q
        }
    };
    [hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0)]
}

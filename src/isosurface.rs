//! Isosurface extraction from a sampled scalar volume.
//!
//! Each grid cell is split into six tetrahedra around its main diagonal. A
//! tetrahedron whose corners straddle the level yields one triangle (one
//! corner apart from the others) or two (two corners on each side), with
//! vertices interpolated linearly along the crossing edges.

use ndarray::{ArrayView1, ArrayView3};

/// A triangle mesh in world coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<[f64; 3]>,
    /// Vertex indices of each triangle.
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of every triangle.
    pub fn faces(&self) -> impl Iterator<Item = [[f64; 3]; 3]> + '_ {
        self.triangles
            .iter()
            .map(|&[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    fn push_triangle(&mut self, corners: [[f64; 3]; 3]) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&corners);
        self.triangles.push([base, base + 1, base + 2]);
    }
}

/// Cube corner offsets, numbered so that 0 and 6 are opposite.
const CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Six tetrahedra sharing the 0-6 diagonal.
const TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 5, 1, 6],
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
];

/// Linear interpolation of an axis at a fractional index.
fn axis_at(axis: ArrayView1<'_, f64>, index: f64) -> f64 {
    let n = axis.len();
    if n == 0 {
        return index;
    }
    if n == 1 {
        return axis[0];
    }
    let i = (index.floor().max(0.0) as usize).min(n - 2);
    let frac = index - i as f64;
    axis[i] + frac * (axis[i + 1] - axis[i])
}

/// A tetrahedron corner: position in index space and field value.
type Corner = ([f64; 3], f64);

fn crossing(a: Corner, b: Corner, level: f64) -> [f64; 3] {
    let (pa, va) = a;
    let (pb, vb) = b;
    let t = if (vb - va).abs() > f64::EPSILON {
        ((level - va) / (vb - va)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    [
        pa[0] + t * (pb[0] - pa[0]),
        pa[1] + t * (pb[1] - pa[1]),
        pa[2] + t * (pb[2] - pa[2]),
    ]
}

/// Emit the triangles of one tetrahedron, in index space.
fn polygonize(tet: [Corner; 4], level: f64, out: &mut Vec<[[f64; 3]; 3]>) {
    let (inside, outside): (Vec<Corner>, Vec<Corner>) = tet.into_iter().partition(|(_, v)| *v >= level);
    match (inside.len(), outside.len()) {
        (1, 3) | (3, 1) => {
            let (apex, base) = if inside.len() == 1 {
                (inside[0], outside)
            } else {
                (outside[0], inside)
            };
            out.push([
                crossing(apex, base[0], level),
                crossing(apex, base[1], level),
                crossing(apex, base[2], level),
            ]);
        },
        (2, 2) => {
            // The crossing edges form a quad: a0-b0, a0-b1, a1-b1, a1-b0.
            let p00 = crossing(inside[0], outside[0], level);
            let p01 = crossing(inside[0], outside[1], level);
            let p11 = crossing(inside[1], outside[1], level);
            let p10 = crossing(inside[1], outside[0], level);
            out.push([p00, p01, p11]);
            out.push([p00, p11, p10]);
        },
        _ => {},
    }
}

/// Extract the surface where `volume` crosses `level`.
///
/// `volume` is indexed `[x, y, z]`; vertex positions are mapped onto the
/// given axis vectors, so every vertex lies within their ranges. Cells with
/// non-finite samples are skipped.
pub fn extract(
    volume: ArrayView3<'_, f64>,
    level: f64,
    x: ArrayView1<'_, f64>,
    y: ArrayView1<'_, f64>,
    z: ArrayView1<'_, f64>,
) -> Mesh {
    let (nx, ny, nz) = volume.dim();
    let mut mesh = Mesh::default();
    if nx < 2 || ny < 2 || nz < 2 || !level.is_finite() {
        return mesh;
    }

    let mut triangles = Vec::new();
    for i in 0..nx - 1 {
        for j in 0..ny - 1 {
            for k in 0..nz - 1 {
                let corners: [Corner; 8] = CORNERS.map(|[di, dj, dk]| {
                    let (ci, cj, ck) = (i + di, j + dj, k + dk);
                    ([ci as f64, cj as f64, ck as f64], volume[[ci, cj, ck]])
                });
                if corners.iter().any(|(_, v)| !v.is_finite()) {
                    continue;
                }
                let above = corners.iter().filter(|(_, v)| *v >= level).count();
                if above == 0 || above == 8 {
                    continue;
                }
                for tet in TETRAHEDRA {
                    polygonize(tet.map(|c| corners[c]), level, &mut triangles);
                }
            }
        }
    }

    for triangle in triangles {
        mesh.push_triangle(triangle.map(|[fi, fj, fk]| [axis_at(x, fi), axis_at(y, fj), axis_at(z, fk)]));
    }
    mesh
}

/// Unit normal of a triangle, or `None` for a degenerate one.
pub fn normal([a, b, c]: [[f64; 3]; 3]) -> Option<[f64; 3]> {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    (len > 0.0).then(|| [n[0] / len, n[1] / len, n[2] / len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};

    fn sphere(n: usize) -> (Array3<f64>, Array1<f64>) {
        let axis = Array1::linspace(-1.0, 1.0, n);
        let volume = Array3::from_shape_fn((n, n, n), |(i, j, k)| {
            1.0 - (axis[i] * axis[i] + axis[j] * axis[j] + axis[k] * axis[k])
        });
        (volume, axis)
    }

    #[test]
    fn sphere_yields_mesh_inside_axis_ranges() {
        let (volume, axis) = sphere(12);
        let z = Array1::linspace(10.0, 20.0, 12);
        let mesh = extract(volume.view(), 0.5, axis.view(), axis.view(), z.view());
        assert!(!mesh.is_empty());
        for [x, y, zv] in &mesh.vertices {
            assert!((-1.0..=1.0).contains(x));
            assert!((-1.0..=1.0).contains(y));
            assert!((10.0..=20.0).contains(zv));
        }
        assert_eq!(mesh.vertices.len(), mesh.triangles.len() * 3);
    }

    #[test]
    fn sphere_vertices_sit_on_the_level_set() {
        let (volume, axis) = sphere(16);
        let mesh = extract(volume.view(), 0.5, axis.view(), axis.view(), axis.view());
        // Radius of the 0.5 level is sqrt(0.5); linear interpolation stays close.
        let target = 0.5f64.sqrt();
        for [x, y, z] in &mesh.vertices {
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - target).abs() < 0.05, "r = {r}");
        }
    }

    #[test]
    fn constant_field_yields_nothing() {
        let volume = Array3::from_elem((5, 5, 5), 0.3);
        let axis = Array1::linspace(0.0, 1.0, 5);
        assert!(extract(volume.view(), 0.7, axis.view(), axis.view(), axis.view()).is_empty());
        assert!(extract(volume.view(), 0.3 - 1.0, axis.view(), axis.view(), axis.view()).is_empty());
    }

    #[test]
    fn too_small_volume_yields_nothing() {
        let volume = Array3::from_elem((1, 4, 4), 1.0);
        let axis = Array1::linspace(0.0, 1.0, 4);
        assert!(extract(volume.view(), 0.5, axis.slice(ndarray::s![..1]), axis.view(), axis.view()).is_empty());
    }

    #[test]
    fn axis_interpolation() {
        let axis = Array1::from(vec![0.0, 10.0, 30.0]);
        assert_eq!(axis_at(axis.view(), 0.5), 5.0);
        assert_eq!(axis_at(axis.view(), 1.5), 20.0);
        assert_eq!(axis_at(axis.view(), 2.0), 30.0);
    }

    #[test]
    fn normal_of_unit_triangle() {
        let n = normal([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(n, Some([0.0, 0.0, 1.0]));
        assert_eq!(normal([[0.0; 3], [0.0; 3], [1.0, 1.0, 1.0]]), None);
    }
}

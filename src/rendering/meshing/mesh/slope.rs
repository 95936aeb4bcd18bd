//! Sloped terrain surfaces inside a cube.
//!
//! The top of a cube is folded along one diagonal into two triangles. A
//! triangle is drawn when its corners all rise above the cube but do not all
//! sit on the floor or all touch the ceiling. When only one half is drawn, a
//! vertical skirt closes the gap under the fold; when neither is drawn but the
//! fold runs along the ceiling, a wall bisects the whole cube.

use cgmath::{InnerSpace, Vector2, Vector3, Zero};

use crate::map::{
    cube_shape::{
        corner_z, height_fraction, CornerHeight, BELOW_CUBE_HEIGHT, CUBE_BOTTOM_HEIGHT,
        CUBE_TOP_HEIGHT, HALFCUBE,
    },
    face_shape::FaceShape,
};

use super::mesh_data::{MeshBuilder, MeshData};

/// One corner column of the cube.
struct Corner {
    height: CornerHeight,
    top: Vector3<f32>,
    bottom: Vector3<f32>,
    uv: Vector2<f32>,
}

impl Corner {
    fn new(height: CornerHeight, x: f32, y: f32) -> Self {
        Corner {
            height,
            top: Vector3::new(x, y, corner_z(height)),
            bottom: Vector3::new(x, y, -HALFCUBE),
            uv: Vector2::new(x + HALFCUBE, y + HALFCUBE),
        }
    }

    /// The surface end of this corner on a skirt or bisector texture row `v`.
    fn skirt_top(&self, v: f32) -> (Vector3<f32>, Vector2<f32>) {
        (self.top, Vector2::new(1.0 - height_fraction(self.height), v))
    }

    fn skirt_bottom(&self, v: f32) -> (Vector3<f32>, Vector2<f32>) {
        (self.bottom, Vector2::new(1.0, v))
    }

    fn above_floor(&self) -> bool {
        self.height > CUBE_BOTTOM_HEIGHT
    }

    fn below_floor(&self) -> bool {
        self.height < CUBE_BOTTOM_HEIGHT
    }

    fn below_top(&self) -> bool {
        self.height < CUBE_TOP_HEIGHT
    }

    fn at_top(&self) -> bool {
        self.height >= CUBE_TOP_HEIGHT
    }
}

/// Builds the sloped surface of a cube, with any skirt or bisector it needs.
///
/// A solid cube yields nothing. Both of its diagonals run along the ceiling,
/// so the bisector rule would otherwise emit a wall through the cube with a
/// zero normal; callers of `TileMeshCache::get` see `None` for it instead.
///
/// # Arguments
/// * `shape` - The face to build; only the source cube is read
///
/// # Returns
/// The patch, or `None` if the cube has no sloped surface
pub fn slope_face_mesh(shape: &FaceShape) -> Option<MeshData> {
    let cube = shape.source();
    if cube.is_solid() {
        return None;
    }

    let h = HALFCUBE;
    let south_west = Corner::new(cube.south_west(), -h, -h);
    let south_east = Corner::new(cube.south_east(), h, -h);
    let north_west = Corner::new(cube.north_west(), -h, h);
    let north_east = Corner::new(cube.north_east(), h, h);

    let mut builder = MeshBuilder::new();
    if cube.is_split() {
        fold_north_west_south_east(
            &mut builder,
            &north_east,
            &north_west,
            &south_east,
            &south_west,
        );
    } else {
        fold_south_west_north_east(
            &mut builder,
            &north_east,
            &north_west,
            &south_east,
            &south_west,
        );
    }
    builder.finish()
}

fn fold_north_west_south_east(
    builder: &mut MeshBuilder,
    ne: &Corner,
    nw: &Corner,
    se: &Corner,
    sw: &Corner,
) {
    let x = Vector3::unit_x();
    let y = Vector3::unit_y();

    let first = is_sloped([se, ne, nw]);
    if first {
        push_sloped_triangle(builder, [se, ne, nw]);
    }
    let second = is_sloped([nw, sw, se]);
    if second {
        push_sloped_triangle(builder, [nw, sw, se]);
    }

    if (first ^ second)
        && (nw.above_floor() || se.above_floor())
        && ((first && sw.below_top()) || (second && ne.below_top()))
    {
        if first {
            let normal = -x - y;
            if nw.above_floor() {
                builder.push_flat_triangle(
                    [se.skirt_top(1.0), nw.skirt_top(0.0), nw.skirt_bottom(0.0)],
                    normal,
                );
            }
            if se.above_floor() {
                builder.push_flat_triangle(
                    [nw.skirt_bottom(0.0), se.skirt_bottom(1.0), se.skirt_top(1.0)],
                    normal,
                );
            }
        }
        if second {
            let normal = x + y;
            if se.above_floor() {
                builder.push_flat_triangle(
                    [nw.skirt_top(0.0), se.skirt_top(1.0), se.skirt_bottom(1.0)],
                    normal,
                );
            }
            if nw.above_floor() {
                builder.push_flat_triangle(
                    [se.skirt_bottom(1.0), nw.skirt_bottom(0.0), nw.skirt_top(0.0)],
                    normal,
                );
            }
        }
    }

    if !first && !second && nw.at_top() && se.at_top() {
        let mut normal = Vector3::zero();
        if ne.below_floor() {
            normal = x + y;
        }
        if sw.below_floor() {
            normal = -x - y;
        }
        push_bisector(builder, nw, se, normal, ne.below_floor());
    }
}

fn fold_south_west_north_east(
    builder: &mut MeshBuilder,
    ne: &Corner,
    nw: &Corner,
    se: &Corner,
    sw: &Corner,
) {
    let x = Vector3::unit_x();
    let y = Vector3::unit_y();

    let first = is_sloped([ne, nw, sw]);
    if first {
        push_sloped_triangle(builder, [ne, nw, sw]);
    }
    let second = is_sloped([sw, se, ne]);
    if second {
        push_sloped_triangle(builder, [sw, se, ne]);
    }

    if (first ^ second)
        && (ne.above_floor() || sw.above_floor())
        && ((first && se.below_top()) || (second && nw.below_top()))
    {
        if first {
            let normal = x - y;
            if ne.above_floor() {
                builder.push_flat_triangle(
                    [sw.skirt_bottom(1.0), ne.skirt_bottom(0.0), ne.skirt_top(0.0)],
                    normal,
                );
            }
            if sw.above_floor() {
                builder.push_flat_triangle(
                    [ne.skirt_top(0.0), sw.skirt_top(1.0), sw.skirt_bottom(1.0)],
                    normal,
                );
            }
        }
        if second {
            let normal = y - x;
            if ne.above_floor() {
                builder.push_flat_triangle(
                    [sw.skirt_top(1.0), ne.skirt_top(0.0), ne.skirt_bottom(0.0)],
                    normal,
                );
            }
            if sw.above_floor() {
                builder.push_flat_triangle(
                    [ne.skirt_bottom(0.0), sw.skirt_bottom(1.0), sw.skirt_top(1.0)],
                    normal,
                );
            }
        }
    }

    if !first && !second && sw.at_top() && ne.at_top() {
        let mut normal = Vector3::zero();
        if se.below_floor() {
            normal = -x - y;
        }
        if nw.below_floor() {
            normal = x + y;
        }
        push_bisector(builder, ne, sw, normal, se.below_floor());
    }
}

/// All corners rise above the cube, and the half neither lies on the floor
/// nor presses against the ceiling.
fn is_sloped(corners: [&Corner; 3]) -> bool {
    corners.iter().all(|c| c.height > BELOW_CUBE_HEIGHT)
        && corners.iter().any(|c| c.above_floor())
        && corners.iter().any(|c| c.below_top())
}

/// Pushes a surface triangle; each vertex takes the normal of the triangle
/// seen from that vertex.
fn push_sloped_triangle(builder: &mut MeshBuilder, corners: [&Corner; 3]) {
    let [a, b, c] = corners;
    let start = builder.vertex_count();
    for (p, q, r) in [(a, b, c), (b, c, a), (c, a, b)] {
        let normal = (q.top - p.top).cross(r.top - p.top).normalize();
        builder.push_vertex(p.top, normal, p.uv);
    }
    builder.push_triangle(start, start + 1, start + 2);
}

/// Pushes a vertical quad from corner `a` to corner `b` through the cube.
///
/// With `flip` the quad winds towards the side of `a`'s missing neighbour.
fn push_bisector(
    builder: &mut MeshBuilder,
    a: &Corner,
    b: &Corner,
    normal: Vector3<f32>,
    flip: bool,
) {
    let start = builder.vertex_count();
    builder.push_vertex(a.top, normal, Vector2::new(0.0, 0.0));
    builder.push_vertex(b.top, normal, Vector2::new(0.0, 1.0));
    builder.push_vertex(a.bottom, normal, Vector2::new(1.0, 0.0));
    builder.push_vertex(b.bottom, normal, Vector2::new(1.0, 1.0));

    if flip {
        builder.push_triangle(start + 2, start, start + 1);
        builder.push_triangle(start + 1, start + 3, start + 2);
    } else {
        builder.push_triangle(start + 1, start, start + 2);
        builder.push_triangle(start + 2, start + 3, start + 1);
    }
}

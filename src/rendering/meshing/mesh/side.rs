//! Vertical walls between a cube and its lateral neighbour.
//!
//! A wall is a quad spanning from the lower to the higher of the two terrain
//! heights that meet on each edge of the shared face. Looking at the wall from
//! outside the source cube, "left" and "right" are the two ends of that edge.

use cgmath::{Vector2, Vector3};

use crate::map::{
    cube_shape::{
        height_fraction, CornerHeight, CubeShape, BELOW_CUBE_HEIGHT, CUBE_BOTTOM_HEIGHT,
        CUBE_TOP_HEIGHT, HALFCUBE,
    },
    direction::Direction,
    face_shape::FaceShape,
};

use super::mesh_data::{MeshBuilder, MeshData};

/// Where a wall sits and which corners meet along it.
struct WallEdges {
    left: Vector2<f32>,
    right: Vector2<f32>,
    left_corner: CornerHeight,
    right_corner: CornerHeight,
    left_adjacent: CornerHeight,
    right_adjacent: CornerHeight,
    normal: Vector3<f32>,
}

impl WallEdges {
    fn new(cube: &CubeShape, adjacent: &CubeShape, direction: Direction) -> Option<Self> {
        let h = HALFCUBE;
        let edges = match direction {
            Direction::South => WallEdges {
                left: Vector2::new(-h, -h),
                right: Vector2::new(h, -h),
                left_corner: cube.south_west(),
                right_corner: cube.south_east(),
                left_adjacent: adjacent.north_west(),
                right_adjacent: adjacent.north_east(),
                normal: -Vector3::unit_y(),
            },
            Direction::North => WallEdges {
                left: Vector2::new(h, h),
                right: Vector2::new(-h, h),
                left_corner: cube.north_east(),
                right_corner: cube.north_west(),
                left_adjacent: adjacent.south_east(),
                right_adjacent: adjacent.south_west(),
                normal: Vector3::unit_y(),
            },
            Direction::West => WallEdges {
                left: Vector2::new(-h, h),
                right: Vector2::new(-h, -h),
                left_corner: cube.north_west(),
                right_corner: cube.south_west(),
                left_adjacent: adjacent.north_east(),
                right_adjacent: adjacent.south_east(),
                normal: -Vector3::unit_x(),
            },
            Direction::East => WallEdges {
                left: Vector2::new(h, -h),
                right: Vector2::new(h, h),
                left_corner: cube.south_east(),
                right_corner: cube.north_east(),
                left_adjacent: adjacent.south_west(),
                right_adjacent: adjacent.north_west(),
                normal: Vector3::unit_x(),
            },
            Direction::Up | Direction::Down | Direction::None => return None,
        };
        Some(edges)
    }
}

/// Wall heights as fractions of the cube edge, `0.0` at the floor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallHeights {
    /// Bottom of the left edge
    pub left_bottom: f32,
    /// Top of the left edge
    pub left_top: f32,
    /// Bottom of the right edge
    pub right_bottom: f32,
    /// Top of the right edge
    pub right_top: f32,
}

impl WallHeights {
    fn new(shape: &FaceShape, edges: &WallEdges) -> Self {
        let cube = shape.source();
        let adjacent = shape.adjacent();

        let mut heights = WallHeights {
            left_bottom: clamped_fraction(edges.left_corner.min(edges.left_adjacent)),
            left_top: clamped_fraction(edges.left_corner.max(edges.left_adjacent)),
            right_bottom: clamped_fraction(edges.right_corner.min(edges.right_adjacent)),
            right_top: clamped_fraction(edges.right_corner.max(edges.right_adjacent)),
        };

        // Terrain next to open sky is walled down to the floor.
        if adjacent.is_sky() && cube.has_face(shape.direction()) && !cube.is_sky() {
            heights.left_bottom = height_fraction(CUBE_BOTTOM_HEIGHT);
            heights.right_bottom = height_fraction(CUBE_BOTTOM_HEIGHT);
        }

        heights
    }
}

/// The heights a lateral wall would span, or `None` for a non-lateral face.
pub fn wall_heights(shape: &FaceShape) -> Option<WallHeights> {
    let edges = WallEdges::new(shape.source(), shape.adjacent(), shape.direction())?;
    Some(WallHeights::new(shape, &edges))
}

/// Builds the wall on a lateral face of a cube.
///
/// The quad is always laid out as left-bottom, left-top, right-bottom,
/// right-top. Triangles are only emitted when the source cube stands at least
/// as high as its neighbour on one edge; recessed walls belong to the
/// neighbour and produce nothing here.
///
/// # Arguments
/// * `shape` - A face with a lateral direction
///
/// # Returns
/// The patch, or `None` if no triangle applies or the direction is not lateral
pub fn side_face_mesh(shape: &FaceShape) -> Option<MeshData> {
    let edges = WallEdges::new(shape.source(), shape.adjacent(), shape.direction())?;
    let heights = WallHeights::new(shape, &edges);

    let mut builder = MeshBuilder::new();
    let corner = |xy: Vector2<f32>, z: f32| Vector3::new(xy.x, xy.y, z - HALFCUBE);

    let left_bottom = builder.push_vertex(
        corner(edges.left, heights.left_bottom),
        edges.normal,
        Vector2::new(0.0, heights.left_bottom),
    );
    let left_top = builder.push_vertex(
        corner(edges.left, heights.left_top),
        edges.normal,
        Vector2::new(0.0, heights.left_top),
    );
    let right_bottom = builder.push_vertex(
        corner(edges.right, heights.right_bottom),
        edges.normal,
        Vector2::new(1.0, heights.right_bottom),
    );
    let right_top = builder.push_vertex(
        corner(edges.right, heights.right_top),
        edges.normal,
        Vector2::new(1.0, heights.right_top),
    );

    if edges.left_corner >= edges.left_adjacent || edges.right_corner >= edges.right_adjacent {
        if edges.left_corner > BELOW_CUBE_HEIGHT && edges.right_corner != BELOW_CUBE_HEIGHT {
            builder.push_triangle(right_top, left_top, left_bottom);
        }
        if edges.left_corner != BELOW_CUBE_HEIGHT && edges.right_corner > CUBE_BOTTOM_HEIGHT {
            builder.push_triangle(left_bottom, right_bottom, right_top);
        }
    }

    builder.finish()
}

fn clamped_fraction(height: CornerHeight) -> f32 {
    height_fraction(height.clamp(CUBE_BOTTOM_HEIGHT, CUBE_TOP_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_against_sky_reaches_the_floor() {
        let cube = CubeShape::new(6, 6, 4, 4, false).unwrap();
        let face = FaceShape::new(cube, CubeShape::SKY, Direction::South);

        let heights = wall_heights(&face).unwrap();
        assert_eq!(heights.left_bottom, 0.0);
        assert_eq!(heights.right_bottom, 0.0);
        assert_eq!(heights.left_top, 3.0 / 8.0);

        let mesh = side_face_mesh(&face).unwrap();
        assert_eq!(mesh.indices, vec![3, 1, 0, 0, 2, 3]);
        assert_eq!(mesh.vertices[0], Vector3::new(-0.5, -0.5, -0.5));
        assert_eq!(mesh.vertices[3], Vector3::new(0.5, -0.5, 3.0 / 8.0 - 0.5));
        assert!(mesh.normals.iter().all(|n| *n == -Vector3::unit_y()));
    }

    #[test]
    fn wall_spans_between_neighbour_heights() {
        let cube = CubeShape::flat(7).unwrap();
        let lower = CubeShape::flat(3).unwrap();
        let face = FaceShape::new(cube, lower, Direction::East);

        let heights = wall_heights(&face).unwrap();
        assert_eq!(heights.left_bottom, 2.0 / 8.0);
        assert_eq!(heights.right_top, 6.0 / 8.0);
        assert_eq!(side_face_mesh(&face).unwrap().triangle_count(), 2);
    }

    #[test]
    fn recessed_wall_is_not_built() {
        let cube = CubeShape::flat(3).unwrap();
        let higher = CubeShape::flat(7).unwrap();
        let face = FaceShape::new(cube, higher, Direction::West);
        assert_eq!(side_face_mesh(&face), None);
    }

    #[test]
    fn floor_level_edge_keeps_one_triangle() {
        // Right edge sits on the floor, so only the upper triangle is built.
        let cube = CubeShape::new(1, 1, 5, 5, false).unwrap();
        let face = FaceShape::new(cube, CubeShape::SKY, Direction::East);
        let mesh = side_face_mesh(&face).unwrap();
        assert_eq!(mesh.indices, vec![3, 1, 0]);
    }

    #[test]
    fn vertical_faces_are_not_walls() {
        let cube = CubeShape::flat(4).unwrap();
        let face = FaceShape::new(cube, CubeShape::SKY, Direction::Up);
        assert_eq!(wall_heights(&face), None);
        assert_eq!(side_face_mesh(&face), None);
    }
}

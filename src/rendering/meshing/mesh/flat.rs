//! Horizontal faces: the parts of a cube top that lie flat on the floor or
//! against the ceiling.

use cgmath::{Vector2, Vector3};

use crate::map::{
    cube_shape::{corner_z, CornerHeight, CUBE_BOTTOM_HEIGHT, CUBE_TOP_HEIGHT, HALFCUBE},
    face_shape::FaceShape,
};

use super::mesh_data::{MeshBuilder, MeshData};

/// Builds the flat floor or ceiling triangles of a cube.
///
/// Each split half is emitted when all three of its corners sit at the bottom
/// or all sit at the top of the cube. A solid cube yields nothing: its top is
/// covered by the cube above, and only the half-open shapes get a flat face.
///
/// # Arguments
/// * `shape` - The face to build; only the source cube is read
///
/// # Returns
/// The patch, or `None` if neither half is flat
pub fn flat_face_mesh(shape: &FaceShape) -> Option<MeshData> {
    let cube = shape.source();
    if cube.is_solid() {
        return None;
    }

    let ne_h = cube.north_east();
    let nw_h = cube.north_west();
    let se_h = cube.south_east();
    let sw_h = cube.south_west();

    let mut builder = MeshBuilder::new();
    let normal = Vector3::unit_z();
    let sw = builder.push_vertex(
        Vector3::new(-HALFCUBE, -HALFCUBE, corner_z(sw_h)),
        normal,
        Vector2::new(0.0, 0.0),
    );
    let se = builder.push_vertex(
        Vector3::new(HALFCUBE, -HALFCUBE, corner_z(se_h)),
        normal,
        Vector2::new(1.0, 0.0),
    );
    let nw = builder.push_vertex(
        Vector3::new(-HALFCUBE, HALFCUBE, corner_z(nw_h)),
        normal,
        Vector2::new(0.0, 1.0),
    );
    let ne = builder.push_vertex(
        Vector3::new(HALFCUBE, HALFCUBE, corner_z(ne_h)),
        normal,
        Vector2::new(1.0, 1.0),
    );

    if cube.is_split() {
        if is_level([se_h, ne_h, nw_h]) {
            builder.push_triangle(se, ne, nw);
        }
        if is_level([nw_h, sw_h, se_h]) {
            builder.push_triangle(nw, sw, se);
        }
    } else {
        if is_level([ne_h, nw_h, sw_h]) {
            builder.push_triangle(ne, nw, sw);
        }
        if is_level([sw_h, se_h, ne_h]) {
            builder.push_triangle(sw, se, ne);
        }
    }

    builder.finish()
}

fn is_level(corners: [CornerHeight; 3]) -> bool {
    corners.iter().all(|c| *c == CUBE_BOTTOM_HEIGHT)
        || corners.iter().all(|c| *c == CUBE_TOP_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{cube_shape::CubeShape, direction::Direction};

    fn up(cube: CubeShape) -> FaceShape {
        FaceShape::new(cube, CubeShape::SKY, Direction::Up)
    }

    #[test]
    fn floor_half_emits_one_triangle() {
        let cube = CubeShape::new(1, 1, 5, 1, false).unwrap();
        let mesh = flat_face_mesh(&up(cube)).unwrap();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![3, 2, 0]);
        assert!(mesh.normals.iter().all(|n| *n == Vector3::unit_z()));
        assert_eq!(mesh.vertices[0].z, -HALFCUBE);
    }

    #[test]
    fn ceiling_half_on_split_cube() {
        let cube = CubeShape::new(9, 9, 9, 0, true).unwrap();
        let mesh = flat_face_mesh(&up(cube)).unwrap();

        assert_eq!(mesh.indices, vec![1, 3, 2]);
        assert_eq!(mesh.vertices[3].z, HALFCUBE);
    }

    #[test]
    fn solid_cube_has_no_flat_face() {
        for split in [true, false] {
            let cube = CubeShape::new(9, 9, 9, 9, split).unwrap();
            assert_eq!(flat_face_mesh(&up(cube)), None);
        }
    }

    #[test]
    fn uneven_halves_have_no_flat_face() {
        let cube = CubeShape::new(3, 4, 5, 6, true).unwrap();
        assert_eq!(flat_face_mesh(&up(cube)), None);
    }
}

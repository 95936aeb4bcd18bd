/// Integration tests for the face generators
/// These tests check the geometry rules of the flat, wall and slope generators
/// through the public API, and sweep the whole corner height space for
/// structural soundness.
use cgmath::{Vector2, Vector3};
use terrain_mesh::map::{
    cube_shape::{CubeShape, BELOW_CUBE_HEIGHT, CUBE_TOP_HEIGHT, HALFCUBE},
    direction::Direction,
    face_shape::FaceShape,
};
use terrain_mesh::rendering::meshing::{
    flat_face_mesh, generate, side_face_mesh, slope_face_mesh, wall_heights, MeshData,
};

fn all_shapes() -> impl Iterator<Item = CubeShape> {
    let heights = BELOW_CUBE_HEIGHT..=CUBE_TOP_HEIGHT;
    heights.clone().flat_map(move |ne| {
        let heights = heights.clone();
        heights.clone().flat_map(move |nw| {
            let heights = heights.clone();
            heights.clone().flat_map(move |se| {
                heights.clone().flat_map(move |sw| {
                    [true, false]
                        .into_iter()
                        .map(move |split| CubeShape::new(ne, nw, se, sw, split).unwrap())
                })
            })
        })
    })
}

fn assert_well_formed(mesh: &MeshData, face: &FaceShape) {
    let n = mesh.vertices.len();
    assert_eq!(mesh.normals.len(), n, "{face:?}");
    assert_eq!(mesh.texture_coords.len(), n, "{face:?}");
    assert!(!mesh.indices.is_empty(), "{face:?}");
    assert_eq!(mesh.indices.len() % 3, 0, "{face:?}");
    assert!(mesh.indices.iter().all(|i| (*i as usize) < n), "{face:?}");

    // flat faces keep all four corners even when a triangle skips one
    for v in mesh.indices.iter().map(|i| mesh.vertices[*i as usize]) {
        for c in [v.x, v.y, v.z] {
            assert!((-HALFCUBE..=HALFCUBE).contains(&c), "{face:?}: {v:?}");
        }
    }
    for uv in &mesh.texture_coords {
        assert!((0.0..=1.0).contains(&uv.x), "{face:?}: {uv:?}");
        assert!((0.0..=1.0).contains(&uv.y), "{face:?}: {uv:?}");
    }
    for normal in &mesh.normals {
        assert!(normal.x.is_finite() && normal.y.is_finite() && normal.z.is_finite());
    }
}

#[test]
fn test_every_shape_produces_well_formed_geometry() {
    for cube in all_shapes() {
        for direction in Direction::all() {
            let face = FaceShape::new(cube, CubeShape::SKY, direction);
            if let Some(mesh) = generate(&face) {
                assert_well_formed(&mesh, &face);
            }
        }
    }
}

#[test]
fn test_flat_generator_never_caps_a_solid_cube() {
    for split in [true, false] {
        let solid = CubeShape::new(9, 9, 9, 9, split).unwrap();
        for direction in [Direction::Up, Direction::Down] {
            let face = FaceShape::new(solid, CubeShape::SKY, direction);
            assert!(flat_face_mesh(&face).is_none());
            assert!(generate(&face).is_none());
        }
    }
}

#[test]
fn test_flat_faces_point_up_and_lie_level() {
    for cube in all_shapes().filter(|c| c.has_floor() || c.has_ceiling()) {
        let face = FaceShape::new(cube, CubeShape::SKY, Direction::Up);
        let mesh = flat_face_mesh(&face).expect("a floor or ceiling half is flat");
        assert!(mesh.normals.iter().all(|n| *n == Vector3::unit_z()));
        for [a, b, c] in mesh.triangles() {
            assert!(a.z == b.z && b.z == c.z, "{cube:?}");
        }
    }
}

#[test]
fn test_wall_against_sky_always_reaches_the_floor() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let shapes: Vec<CubeShape> = all_shapes().collect();

    for _ in 0..2000 {
        let cube = shapes[rng.usize(..shapes.len())];
        let direction = Direction::lateral()[rng.usize(..4)];
        if cube.is_sky() || !cube.has_face(direction) {
            continue;
        }

        let face = FaceShape::new(cube, CubeShape::SKY, direction);
        let heights = wall_heights(&face).unwrap();
        assert_eq!(heights.left_bottom, 0.0, "{face:?}");
        assert_eq!(heights.right_bottom, 0.0, "{face:?}");

        if let Some(mesh) = side_face_mesh(&face) {
            assert_eq!(mesh.vertices[0].z, -HALFCUBE);
            assert_eq!(mesh.vertices[2].z, -HALFCUBE);
            assert!(mesh
                .normals
                .iter()
                .all(|n| *n == direction.to_vector()));
        }
    }
}

#[test]
fn test_slope_with_one_live_half_gets_a_skirt() {
    // SE=5, NE=5, NW=5, SW below the cube, split NW-SE
    let cube = CubeShape::new(5, 5, 5, 0, true).unwrap();
    let mesh = slope_face_mesh(&FaceShape::new(cube, CubeShape::SKY, Direction::None)).unwrap();

    // the SE-NE-NW surface triangle
    assert_eq!(mesh.vertices[0], Vector3::new(0.5, -0.5, 0.0));
    assert_eq!(mesh.vertices[1], Vector3::new(0.5, 0.5, 0.0));
    assert_eq!(mesh.vertices[2], Vector3::new(-0.5, 0.5, 0.0));
    assert!(mesh.normals[..3].iter().all(|n| *n == Vector3::unit_z()));

    // two skirt triangles along the fold, facing away from the missing SW half
    assert_eq!(mesh.triangle_count(), 3);
    let skirt = Vector3::new(-1.0, -1.0, 0.0);
    assert!(mesh.normals[3..].iter().all(|n| *n == skirt));
    assert!(mesh.vertices[3..]
        .iter()
        .all(|v| (v.x == 0.5 && v.y == -0.5) || (v.x == -0.5 && v.y == 0.5)));
    assert_eq!(mesh.texture_coords[4], Vector2::new(0.5, 0.0));
}

#[test]
fn test_slope_normals_face_upwards() {
    for cube in all_shapes() {
        let face = FaceShape::new(cube, CubeShape::SKY, Direction::None);
        let Some(mesh) = slope_face_mesh(&face) else {
            continue;
        };
        for (i, n) in mesh.normals.iter().enumerate() {
            // surface triangles are unit length; skirts and bisectors are horizontal
            if n.z != 0.0 {
                assert!(n.z > 0.0, "{cube:?} vertex {i}");
            }
        }
    }
}

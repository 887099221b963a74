use cgmath::{InnerSpace, Matrix4, Vector3, Zero};
use rt_render::shadow::{CUBE_FACES, ShadowTransforms};

const EPS: f32 = 1e-4;
const NEAR: f32 = 0.1;
const FAR: f32 = 25.0;

fn project(m: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let clip = *m * point.extend(1.0);
    clip.truncate() / clip.w
}

/// Where a direction lands on its face according to the cube-map addressing
/// table (s, t picked per major axis), in render target NDC where +y is the
/// top row.
fn cube_map_ndc(face: usize, d: Vector3<f32>) -> (f32, f32) {
    let (sc, tc, ma) = match face {
        0 => (-d.z, -d.y, d.x),
        1 => (d.z, -d.y, -d.x),
        2 => (d.x, d.z, d.y),
        3 => (d.x, -d.z, -d.y),
        4 => (d.x, -d.y, d.z),
        5 => (-d.x, -d.y, -d.z),
        _ => unreachable!(),
    };
    (sc / ma, -tc / ma)
}

#[test]
fn should_use_six_orthogonal_unit_axes() {
    let sum = CUBE_FACES
        .iter()
        .fold(Vector3::zero(), |acc, (direction, _)| acc + *direction);
    assert_eq!(sum, Vector3::zero());

    for (i, &(a, up)) in CUBE_FACES.iter().enumerate() {
        assert!((a.magnitude() - 1.0).abs() < EPS);
        assert_eq!(a.x.abs() + a.y.abs() + a.z.abs(), 1.0, "face {i} is not axis aligned");
        assert_eq!(a.dot(up), 0.0, "up vector of face {i} is not perpendicular");
        for (j, &(b, _)) in CUBE_FACES.iter().enumerate() {
            if i != j {
                let dot = a.dot(b);
                assert!(dot == 0.0 || dot == -1.0, "faces {i} and {j}");
            }
        }
    }
}

#[test]
fn should_follow_face_order() {
    let directions: Vec<_> = CUBE_FACES.iter().map(|(d, _)| *d).collect();
    assert_eq!(
        directions,
        vec![
            Vector3::unit_x(),
            -Vector3::unit_x(),
            Vector3::unit_y(),
            -Vector3::unit_y(),
            Vector3::unit_z(),
            -Vector3::unit_z(),
        ]
    );
}

#[test]
fn should_project_face_direction_to_face_centre() {
    let light = Vector3::new(1.5, -0.5, 2.0);
    let transforms = ShadowTransforms::new(light, NEAR, FAR);
    for (face, &(direction, _)) in CUBE_FACES.iter().enumerate() {
        let ndc = project(transforms.face(face), light + direction * 3.0);
        assert!(ndc.x.abs() < EPS && ndc.y.abs() < EPS, "face {face}: {ndc:?}");
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "face {face}: depth {}", ndc.z);
    }
}

#[test]
fn should_map_near_and_far_to_depth_range() {
    let light = Vector3::new(0.0, 1.0, 0.0);
    let transforms = ShadowTransforms::new(light, NEAR, FAR);
    for (face, &(direction, _)) in CUBE_FACES.iter().enumerate() {
        let near = project(transforms.face(face), light + direction * NEAR);
        let far = project(transforms.face(face), light + direction * FAR);
        assert!(near.z.abs() < EPS, "face {face}: near depth {}", near.z);
        assert!((far.z - 1.0).abs() < EPS, "face {face}: far depth {}", far.z);
    }
}

#[test]
fn should_agree_with_cube_map_addressing() {
    let light = Vector3::new(-0.75, 0.25, 0.5);
    let transforms = ShadowTransforms::new(light, NEAR, FAR);
    let offsets = [(0.5, 0.25), (-0.6, 0.3), (0.1, -0.9), (-0.4, -0.4)];

    for (face, &(direction, _)) in CUBE_FACES.iter().enumerate() {
        // Two in-face axes for this face.
        let (a, b) = if direction.x != 0.0 {
            (Vector3::unit_y(), Vector3::unit_z())
        } else if direction.y != 0.0 {
            (Vector3::unit_x(), Vector3::unit_z())
        } else {
            (Vector3::unit_x(), Vector3::unit_y())
        };
        for (s, t) in offsets {
            let d = direction + a * s + b * t;
            let ndc = project(transforms.face(face), light + d * 2.0);
            let (x, y) = cube_map_ndc(face, d);
            assert!(
                (ndc.x - x).abs() < EPS && (ndc.y - y).abs() < EPS,
                "face {face} direction {d:?}: got ({}, {}), expected ({x}, {y})",
                ndc.x,
                ndc.y
            );
        }
    }
}

#[test]
fn should_follow_light() {
    let a = ShadowTransforms::new(Vector3::new(0.0, 0.0, 0.0), NEAR, FAR);
    let b = ShadowTransforms::new(Vector3::new(2.0, 0.0, 0.0), NEAR, FAR);
    assert_ne!(a, b);
    assert_eq!(a.iter().count(), 6);
}

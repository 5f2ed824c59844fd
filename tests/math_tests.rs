use softras::math::{Mat4, Quaternion, Vec3, srt};

fn mat_approx_eq(a: &Mat4, b: &Mat4, eps: f32) {
    for r in 0..4 {
        for c in 0..4 {
            let diff = (a[r][c] - b[r][c]).abs();
            assert!(diff <= eps, "[{r}][{c}]: {} vs {}", a[r][c], b[r][c]);
        }
    }
}

fn sample_matrix() -> Mat4 {
    srt(
        Mat4::scaler(2.0, 0.5, 3.0),
        Mat4::rotation(30.0, -45.0, 160.0),
        Mat4::translation(1.0, -2.0, 5.0),
    )
}

#[test]
fn identity_is_neutral() {
    let m = sample_matrix();
    mat_approx_eq(&(m * Mat4::IDENTITY), &m, 0.0);
    mat_approx_eq(&(Mat4::IDENTITY * m), &m, 0.0);
}

#[test]
fn inverse_roundtrip() {
    let m = sample_matrix();
    mat_approx_eq(&(m * m.inverse()), &Mat4::IDENTITY, 1e-4);

    let t = Mat4::translation(10.0, -3.0, 0.25);
    mat_approx_eq(&(t.inverse() * t), &Mat4::IDENTITY, 1e-5);
}

#[test]
fn transpose_involution() {
    let m = sample_matrix();
    mat_approx_eq(&m.transposed().transposed(), &m, 0.0);
}

#[test]
fn cross_is_orthogonal() {
    let a = Vec3::new(0.3, -1.2, 2.5);
    let b = Vec3::new(-4.0, 0.1, 0.7);
    let c = a.cross(b);

    assert!(c.dot(a).abs() <= 1e-5);
    assert!(c.dot(b).abs() <= 1e-5);
}

#[test]
fn normalized_has_unit_length() {
    for v in [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-3.0, 4.0, 12.0),
        Vec3::new(1e-3, 2e-3, -5e-4),
    ] {
        assert!((v.normalized().length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn vec3_index_access() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v[0], 1.0);
    assert_eq!(v[1], 2.0);
    assert_eq!(v[2], 3.0);
}

#[test]
fn projection_layout() {
    let p = Mat4::projection(800, 600, 90.0, 0.1, 1000.0);

    // aspect * f with f = 1/tan(45°) = 1.
    assert!((p[0][0] - 0.75).abs() < 1e-5);
    assert!((p[1][1] - 1.0).abs() < 1e-5);
    assert!((p[2][2] - 1000.0 / 999.9).abs() < 1e-4);
    assert!((p[3][2] + 100.0 / 999.9).abs() < 1e-4);
    assert_eq!(p[2][3], 1.0);
    assert_eq!(p[3][3], 0.0);
}

#[test]
fn perspective_divide_in_point_transform() {
    let p = Mat4::projection(320, 240, 90.0, 0.1, 100.0);

    // A point two units out along the view axis: w = z = 2, so x and y are
    // halved after the divide.
    let out = p * Vec3::new(1.0, 1.0, 2.0);
    assert!((out.x - 0.75 / 2.0).abs() < 1e-5);
    assert!((out.y - 0.5).abs() < 1e-5);
}

#[test]
fn viewport_layout() {
    let v = Mat4::viewport(320, 240);
    assert_eq!(v[0][0], 160.0);
    assert_eq!(v[1][1], -120.0);
    assert_eq!(v[3][0], 160.0);
    assert_eq!(v[3][1], 120.0);
    assert_eq!(v[2][2], 1.0);

    // NDC origin maps to the canvas center; +Y NDC goes up the screen
    // (smaller pixel y).
    let center = v * Vec3::new(0.0, 0.0, 0.5);
    assert_eq!(center.x, 160.0);
    assert_eq!(center.y, 120.0);

    let top = v * Vec3::new(0.0, 1.0, 0.5);
    assert_eq!(top.y, 0.0);
}

#[test]
fn rotation_closed_form_matches_axis_product() {
    // The combined builder is the single-expression form of the three
    // per-axis rotations composed in sequence.
    let composed = Mat4::rotation(25.0, -40.0, 110.0);
    let product = Mat4::rotate_z(110.0) * Mat4::rotate_y(-40.0) * Mat4::rotate_x(25.0);

    mat_approx_eq(&composed, &product, 1e-4);
}

#[test]
fn rotate_y_quarter_turn() {
    let m = Mat4::rotate_y(90.0);
    let v = m * Vec3::new(0.0, 0.0, 1.0);

    assert!((v.x + 1.0).abs() < 1e-3);
    assert!(v.y.abs() < 1e-3);
    assert!(v.z.abs() < 1e-3);
}

#[test]
fn point_at_inverse_is_view_transform() {
    // A camera two units behind the origin looking at it: the view
    // transform pushes world points two units down +Z.
    let view = Mat4::point_at(
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::ZERO,
        Vec3::new(0.0, 1.0, 0.0),
    )
    .inverse();

    let p = view * Vec3::new(0.5, -0.5, 0.0);
    assert!((p.x - 0.5).abs() < 1e-5);
    assert!((p.y + 0.5).abs() < 1e-5);
    assert!((p.z - 2.0).abs() < 1e-5);
}

#[test]
fn quaternion_yaw_rotates_forward() {
    // 90° about Y carries +Z onto +X.
    let m = Quaternion::from_euler(0.0, 90.0, 0.0).to_mat4();
    let v = m * Vec3::new(0.0, 0.0, 1.0);

    assert!((v.x - 1.0).abs() < 1e-3);
    assert!(v.y.abs() < 1e-3);
    assert!(v.z.abs() < 1e-3);
}

#[test]
fn degenerate_inverse_is_finite() {
    let mut singular = Mat4::IDENTITY;
    singular[0][0] = 0.0;
    singular[1][1] = 0.0;
    singular[0][1] = 1.0;
    singular[1][0] = 1.0;
    singular[2][2] = 0.0; // rank-deficient

    let inv = singular.inverse();
    for r in 0..4 {
        for c in 0..4 {
            assert!(inv[r][c].is_finite());
        }
    }
}

use softras::math::{Vec2, Vec3};
use softras::{Color, FrameBuffers, Image, Triangle, Vertex};

fn screen_vertex(x: f32, y: f32, z: f32, u: f32, v: f32) -> Vertex {
    Vertex::new(Vec3::new(x, y, z), Vec3::new(0.0, 0.0, 1.0), Vec2::new(u, v))
}

/// Two triangles covering the full canvas at constant depth `z`.
fn canvas_quad(size: f32, z: f32) -> [Triangle<Vertex>; 2] {
    [
        Triangle::new(
            screen_vertex(0.0, 0.0, z, 0.0, 0.0),
            screen_vertex(size, 0.0, z, 1.0, 0.0),
            screen_vertex(0.0, size, z, 0.0, 1.0),
        ),
        Triangle::new(
            screen_vertex(size, 0.0, z, 1.0, 0.0),
            screen_vertex(size, size, z, 1.0, 1.0),
            screen_vertex(0.0, size, z, 0.0, 1.0),
        ),
    ]
}

#[test]
fn full_canvas_coverage() {
    let mut fb = FrameBuffers::new(16, 16);
    fb.clear();

    let color = Color::new(250, 128, 10);
    let texture = Image::from_pixels(2, 2, vec![color; 4]);

    for tri in &canvas_quad(16.0, 0.5) {
        fb.draw_textured_triangle(tri, &texture);
    }

    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(fb.pixel(x, y), color, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn depth_test_is_order_independent() {
    let red = Image::solid(Color::new(255, 0, 0));
    let blue = Image::solid(Color::new(0, 0, 255));

    let near = canvas_quad(16.0, 0.5);
    let far = canvas_quad(16.0, 0.9);

    let mut front_first = FrameBuffers::new(16, 16);
    front_first.clear();
    for tri in &near {
        front_first.draw_textured_triangle(tri, &red);
    }
    for tri in &far {
        front_first.draw_textured_triangle(tri, &blue);
    }

    let mut back_first = FrameBuffers::new(16, 16);
    back_first.clear();
    for tri in &far {
        back_first.draw_textured_triangle(tri, &blue);
    }
    for tri in &near {
        back_first.draw_textured_triangle(tri, &red);
    }

    assert_eq!(front_first, back_first);
    assert_eq!(front_first.pixel(8, 8), Color::new(255, 0, 0));
}

#[test]
fn redraw_is_idempotent() {
    let texture = Image::solid(Color::new(90, 200, 40));
    let tri = Triangle::new(
        screen_vertex(2.0, 1.0, 0.5, 0.0, 0.0),
        screen_vertex(13.0, 7.0, 0.5, 1.0, 0.0),
        screen_vertex(4.0, 14.0, 0.5, 0.0, 1.0),
    );

    let mut fb = FrameBuffers::new(16, 16);
    fb.clear();
    fb.draw_textured_triangle(&tri, &texture);

    let first_pass = fb.clone();
    // Equal depth values fail the strict test, so nothing changes.
    fb.draw_textured_triangle(&tri, &texture);

    assert_eq!(fb, first_pass);
}

#[test]
fn zero_height_triangle_draws_nothing() {
    let texture = Image::solid(Color::WHITE);
    let tri = Triangle::new(
        screen_vertex(2.0, 5.0, 0.5, 0.0, 0.0),
        screen_vertex(9.0, 5.0, 0.5, 1.0, 0.0),
        screen_vertex(14.0, 5.0, 0.5, 0.0, 1.0),
    );

    let mut fb = FrameBuffers::new(16, 16);
    fb.clear();
    fb.draw_textured_triangle(&tri, &texture);

    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(fb.pixel(x, y), FrameBuffers::CLEAR_COLOR);
        }
    }
}

#[test]
fn offscreen_spans_are_clipped_not_fatal() {
    let texture = Image::solid(Color::WHITE);
    // Hangs off every edge; the per-pixel guard clips it.
    let tri = Triangle::new(
        screen_vertex(-10.0, -5.0, 0.5, 0.0, 0.0),
        screen_vertex(30.0, 2.0, 0.5, 1.0, 0.0),
        screen_vertex(5.0, 25.0, 0.5, 0.0, 1.0),
    );

    let mut fb = FrameBuffers::new(16, 16);
    fb.clear();
    fb.draw_textured_triangle(&tri, &texture);

    // Some interior pixel got painted.
    assert_eq!(fb.pixel(8, 8), Color::WHITE);
}

#[test]
fn depth_line_respects_z_buffer() {
    let mut fb = FrameBuffers::new(16, 16);
    fb.clear();

    let red = Color::new(255, 0, 0);
    let blue = Color::new(0, 0, 255);

    fb.draw_line_depth(Vec3::new(2.0, 8.0, 0.4), Vec3::new(13.0, 8.0, 0.4), red);
    // Same segment further away: every write fails the depth test.
    fb.draw_line_depth(Vec3::new(2.0, 8.0, 0.8), Vec3::new(13.0, 8.0, 0.8), blue);

    assert_eq!(fb.pixel(8, 8), red);
    assert_eq!(fb.pixel(2, 8), red);
}

#[test]
fn subpixel_depth_line_is_skipped() {
    let mut fb = FrameBuffers::new(16, 16);
    fb.clear();

    fb.draw_line_depth(
        Vec3::new(5.2, 5.2, 0.5),
        Vec3::new(5.6, 5.6, 0.5),
        Color::WHITE,
    );

    assert_eq!(fb.pixel(5, 5), FrameBuffers::CLEAR_COLOR);
}

#[test]
fn plain_line_draws_between_endpoints() {
    let mut fb = FrameBuffers::new(16, 16);
    fb.clear();

    fb.draw_line(Vec2::new(1.0, 3.0), Vec2::new(10.0, 3.0), Color::WHITE);

    for x in 1..=10 {
        assert_eq!(fb.pixel(x, 3), Color::WHITE);
    }
    assert_eq!(fb.pixel(11, 3), FrameBuffers::CLEAR_COLOR);
}

#[test]
fn wireframe_outlines_without_filling() {
    let mut fb = FrameBuffers::new(32, 32);
    fb.clear();

    let tri = Triangle::new(
        screen_vertex(4.0, 4.0, 0.5, 0.0, 0.0),
        screen_vertex(28.0, 4.0, 0.5, 0.0, 0.0),
        screen_vertex(4.0, 28.0, 0.5, 0.0, 0.0),
    );
    fb.draw_wire_triangle(&tri);

    // An edge pixel is white, the interior untouched.
    assert_eq!(fb.pixel(16, 4), Color::WHITE);
    assert_eq!(fb.pixel(12, 12), FrameBuffers::CLEAR_COLOR);
}

#[test]
fn image_blit_clips_to_canvas() {
    let mut fb = FrameBuffers::new(8, 8);
    fb.clear();

    let c0 = Color::new(10, 20, 30);
    let c1 = Color::new(40, 50, 60);
    let img = Image::from_pixels(2, 1, vec![c0, c1]);

    fb.draw_image(6, 6, &img, 1.0, 1.0, false, false);
    assert_eq!(fb.pixel(6, 6), c0);
    assert_eq!(fb.pixel(7, 6), c1);

    // Placed so only the first column fits.
    fb.draw_image(7, 0, &img, 1.0, 1.0, false, false);
    assert_eq!(fb.pixel(7, 0), c0);
}

#[test]
fn image_blit_mirrors() {
    let mut fb = FrameBuffers::new(8, 8);
    fb.clear();

    let c0 = Color::new(10, 20, 30);
    let c1 = Color::new(40, 50, 60);
    let img = Image::from_pixels(2, 1, vec![c0, c1]);

    fb.draw_image(0, 0, &img, 1.0, 1.0, true, false);
    assert_eq!(fb.pixel(0, 0), c1);
    assert_eq!(fb.pixel(1, 0), c0);
}

#[test]
fn shader_fill_covers_canvas() {
    let mut fb = FrameBuffers::new(8, 8);
    fb.clear();

    fb.draw_with_shader(|x, y| Color::new(x as u8 * 10, y as u8 * 10, 0));

    assert_eq!(fb.pixel(0, 0), Color::new(0, 0, 0));
    assert_eq!(fb.pixel(7, 3), Color::new(70, 30, 0));
}

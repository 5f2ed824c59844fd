//! Pixel-level drawing on the frame buffers: Bresenham lines, the
//! perspective-correct scanline triangle filler, 2D image blits and the
//! full-canvas shader fill.

use crate::{
    color::Color,
    framebuffer::FrameBuffers,
    math::{Vec2, Vec3},
    meshes::{MeshVertex, Triangle},
    texture::Image,
};

const DEPTH_MAX: f32 = u16::MAX as f32;

impl FrameBuffers {
    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 {
            self.draw_pixel(x as usize, y as usize, color);
        }
    }

    /// Bresenham line between two screen-space points, no depth testing.
    /// Intended for debug overlays.
    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        let (x1, y1) = (p0.x as i32, p0.y as i32);
        let (x2, y2) = (p1.x as i32, p1.y as i32);

        let dx = x2 - x1;
        let dy = y2 - y1;
        let dx1 = dx.abs();
        let dy1 = dy.abs();
        let mut px = 2 * dy1 - dx1;
        let mut py = 2 * dx1 - dy1;

        if dy1 <= dx1 {
            let (mut x, mut y, xe) = if dx >= 0 { (x1, y1, x2) } else { (x2, y2, x1) };
            self.put(x, y, color);

            while x < xe {
                x += 1;
                if px < 0 {
                    px += 2 * dy1;
                } else {
                    if (dx < 0 && dy < 0) || (dx > 0 && dy > 0) {
                        y += 1;
                    } else {
                        y -= 1;
                    }
                    px += 2 * (dy1 - dx1);
                }
                self.put(x, y, color);
            }
        } else {
            let (mut x, mut y, ye) = if dy >= 0 { (x1, y1, y2) } else { (x2, y2, y1) };
            self.put(x, y, color);

            while y < ye {
                y += 1;
                if py <= 0 {
                    py += 2 * dx1;
                } else {
                    if (dx < 0 && dy < 0) || (dx > 0 && dy > 0) {
                        x += 1;
                    } else {
                        x -= 1;
                    }
                    py += 2 * (dx1 - dy1);
                }
                self.put(x, y, color);
            }
        }
    }

    /// Depth-tested line through screen space. The whole line shares one
    /// depth value taken from `p0`; sub-pixel lines are skipped.
    pub fn draw_line_depth(&mut self, p0: Vec3, p1: Vec3, color: Color) {
        let z_value = ((p0.z * DEPTH_MAX).abs()) as u16;

        let mut x1 = (p0.x + 0.5).floor() as i32;
        let mut x2 = (p1.x + 0.5).floor() as i32;
        let mut y1 = (p0.y + 0.5).floor() as i32;
        let mut y2 = (p1.y + 0.5).floor() as i32;

        if (x2 - x1).abs() < 1 && (y2 - y1).abs() < 1 {
            return;
        }

        // Draw top to bottom.
        if y1 > y2 {
            std::mem::swap(&mut y1, &mut y2);
            std::mem::swap(&mut x1, &mut x2);
        }

        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = (if dx > dy { dx } else { -dy }) / 2;

        let width = self.width();
        let height = self.height();
        let (colors, depth) = self.planes_mut();

        loop {
            if x1 >= 0 && y1 >= 0 && (x1 as usize) < width && (y1 as usize) < height {
                let index = y1 as usize * width + x1 as usize;
                if depth[index] > z_value {
                    depth[index] = z_value;
                    colors[index] = color;
                }
            }

            if x1 == x2 && y1 == y2 {
                break;
            }
            let e2 = err;
            if e2 > -dx {
                err -= dy;
                x1 += sx;
            }
            if e2 < dy {
                err += dx;
                y1 += sy;
            }
        }
    }

    /// The hot path: scanline fill of a screen-space triangle with
    /// perspective-correct texture lookup and a strict Z test per pixel.
    ///
    /// Vertex positions are expected post projection + viewport: x,y in
    /// pixels, z the non-linear depth. UVs are the original [0, 1] texture
    /// coordinates; they are divided by z up front since u/z, v/z and 1/z
    /// are the quantities that interpolate linearly across the screen.
    pub fn draw_textured_triangle<V: MeshVertex>(&mut self, tri: &Triangle<V>, texture: &Image) {
        let (a, b, c) = (tri.a.position(), tri.b.position(), tri.c.position());

        let mut x1 = (a.x + 0.5) as i32;
        let mut x2 = (b.x + 0.5) as i32;
        let mut x3 = (c.x + 0.5) as i32;
        let mut y1 = (a.y + 0.5) as i32;
        let mut y2 = (b.y + 0.5) as i32;
        let mut y3 = (c.y + 0.5) as i32;

        let mut z1_inv = 1.0 / a.z;
        let mut z2_inv = 1.0 / b.z;
        let mut z3_inv = 1.0 / c.z;

        let mut u1 = tri.a.uv().x * z1_inv;
        let mut u2 = tri.b.uv().x * z2_inv;
        let mut u3 = tri.c.uv().x * z3_inv;
        let mut v1 = tri.a.uv().y * z1_inv;
        let mut v2 = tri.b.uv().y * z2_inv;
        let mut v3 = tri.c.uv().y * z3_inv;

        // Sort by y, dragging every attribute along.
        if y1 > y2 {
            std::mem::swap(&mut y1, &mut y2);
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut u1, &mut u2);
            std::mem::swap(&mut v1, &mut v2);
            std::mem::swap(&mut z1_inv, &mut z2_inv);
        }
        if y1 > y3 {
            std::mem::swap(&mut y1, &mut y3);
            std::mem::swap(&mut x1, &mut x3);
            std::mem::swap(&mut u1, &mut u3);
            std::mem::swap(&mut v1, &mut v3);
            std::mem::swap(&mut z1_inv, &mut z3_inv);
        }
        if y2 > y3 {
            std::mem::swap(&mut y2, &mut y3);
            std::mem::swap(&mut x2, &mut x3);
            std::mem::swap(&mut u2, &mut u3);
            std::mem::swap(&mut v2, &mut v3);
            std::mem::swap(&mut z2_inv, &mut z3_inv);
        }

        let width = self.width();
        let height = self.height();
        let (colors, depth) = self.planes_mut();

        let mut dy1 = y2 - y1;
        let dx1 = x2 - x1;
        let dy2 = y3 - y1;
        let dx2 = x3 - x1;
        let mut du1 = u2 - u1;
        let mut dv1 = v2 - v1;
        let mut dz1 = z2_inv - z1_inv;
        let du2 = u3 - u1;
        let dv2 = v3 - v1;
        let dz2 = z3_inv - z1_inv;

        let step = |num: f32, dy: i32| if dy != 0 { num / dy.abs() as f32 } else { 0.0 };

        let mut dax_step = step(dx1 as f32, dy1);
        let dbx_step = step(dx2 as f32, dy2);
        let mut du1_step = step(du1, dy1);
        let mut dv1_step = step(dv1, dy1);
        let mut dz1_step = step(dz1, dy1);
        let du2_step = step(du2, dy2);
        let dv2_step = step(dv2, dy2);
        let dz2_step = step(dz2, dy2);

        // Upper half: long edge v1→v3, short edge v1→v2.
        if dy1 != 0 {
            for y in y1..=y2 {
                let span = y - y1;
                let ax = x1 + (span as f32 * dax_step) as i32;
                let bx = x1 + (span as f32 * dbx_step) as i32;

                draw_span(
                    colors,
                    depth,
                    width,
                    height,
                    texture,
                    y,
                    ax,
                    bx,
                    u1 + span as f32 * du1_step,
                    u1 + span as f32 * du2_step,
                    v1 + span as f32 * dv1_step,
                    v1 + span as f32 * dv2_step,
                    z1_inv + span as f32 * dz1_step,
                    z1_inv + span as f32 * dz2_step,
                );
            }
        }

        // Lower half: short edge becomes v2→v3; the long edge carries on.
        dy1 = y3 - y2;
        let dx1 = x3 - x2;
        du1 = u3 - u2;
        dv1 = v3 - v2;
        dz1 = z3_inv - z2_inv;

        dax_step = step(dx1 as f32, dy1);
        du1_step = step(du1, dy1);
        dv1_step = step(dv1, dy1);
        dz1_step = step(dz1, dy1);

        if dy1 != 0 {
            // y2 is deliberately rasterized by both halves; the depth test
            // keeps the duplicate row idempotent.
            for y in y2..=y3 {
                let short_span = y - y2;
                let long_span = y - y1;
                let ax = x2 + (short_span as f32 * dax_step) as i32;
                let bx = x1 + (long_span as f32 * dbx_step) as i32;

                draw_span(
                    colors,
                    depth,
                    width,
                    height,
                    texture,
                    y,
                    ax,
                    bx,
                    u2 + short_span as f32 * du1_step,
                    u1 + long_span as f32 * du2_step,
                    v2 + short_span as f32 * dv1_step,
                    v1 + long_span as f32 * dv2_step,
                    z2_inv + short_span as f32 * dz1_step,
                    z1_inv + long_span as f32 * dz2_step,
                );
            }
        }
    }

    /// Wireframe rendering of a screen-space triangle: three depth-tested
    /// white lines.
    pub fn draw_wire_triangle<V: MeshVertex>(&mut self, tri: &Triangle<V>) {
        self.draw_line_depth(tri.a.position(), tri.b.position(), Color::WHITE);
        self.draw_line_depth(tri.b.position(), tri.c.position(), Color::WHITE);
        self.draw_line_depth(tri.c.position(), tri.a.position(), Color::WHITE);
    }

    /// 2D blit of an image at (x, y), optionally scaled and mirrored.
    /// Clipped against the canvas; no depth interaction.
    pub fn draw_image(
        &mut self,
        x: usize,
        y: usize,
        img: &Image,
        x_scale: f32,
        y_scale: f32,
        invert_x: bool,
        invert_y: bool,
    ) {
        if x >= self.width() || y >= self.height() || x_scale <= 0.0 || y_scale <= 0.0 {
            return;
        }

        let scaled_w = (img.width as f32 * x_scale) as usize;
        let scaled_h = (img.height as f32 * y_scale) as usize;

        let end_x = (x + scaled_w).min(self.width());
        let end_y = (y + scaled_h).min(self.height());

        let start_img_x = if invert_x {
            (scaled_w.saturating_sub(1)) as f32 / x_scale
        } else {
            0.0
        };
        let mut img_y = if invert_y {
            (scaled_h.saturating_sub(1)) as f32 / y_scale
        } else {
            0.0
        };
        let x_step = if invert_x { -1.0 / x_scale } else { 1.0 / x_scale };
        let y_step = if invert_y { -1.0 / y_scale } else { 1.0 / y_scale };

        for j in y..end_y {
            let mut img_x = start_img_x;
            for i in x..end_x {
                self.draw_pixel(i, j, img.pixel(img_x as usize, img_y as usize));
                img_x += x_step;
            }
            img_y += y_step;
        }
    }

    /// Run a per-pixel function over the whole canvas — a software "pixel
    /// shader" entry point.
    pub fn draw_with_shader(&mut self, mut shader: impl FnMut(u16, u16) -> Color) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let color = shader(x as u16, y as u16);
                self.draw_pixel(x, y, color);
            }
        }
    }
}

/// One horizontal span of the triangle filler. Endpoint attributes arrive in
/// pre-divided u/z, v/z, 1/z form; each pixel blends linearly between them
/// and recovers the true texture coordinates by dividing back through 1/z.
#[allow(clippy::too_many_arguments)]
fn draw_span(
    colors: &mut [Color],
    depth: &mut [u16],
    width: usize,
    height: usize,
    texture: &Image,
    y: i32,
    mut ax: i32,
    mut bx: i32,
    mut su: f32,
    mut eu: f32,
    mut sv: f32,
    mut ev: f32,
    mut sz: f32,
    mut ez: f32,
) {
    if ax > bx {
        std::mem::swap(&mut ax, &mut bx);
        std::mem::swap(&mut su, &mut eu);
        std::mem::swap(&mut sv, &mut ev);
        std::mem::swap(&mut sz, &mut ez);
    }

    let span = bx - ax;
    if span == 0 {
        return;
    }

    let t_step = 1.0 / span as f32;
    let mut t = 0.0;

    for x in ax..bx {
        let u = su + t * (eu - su);
        let v = sv + t * (ev - sv);
        let z = sz + t * (ez - sz);
        t += t_step;

        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            continue;
        }

        let index = y as usize * width + x as usize;
        let z_value = ((1.0 / z) * DEPTH_MAX).abs() as u16;

        if depth[index] > z_value {
            depth[index] = z_value;
            colors[index] = texture.sample(u / z, v / z);
        }
    }
}

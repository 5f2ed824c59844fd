//! Handles keyboard and mouse input, eg for moving the camera.

use winit::{
    event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{camera::Camera, math::Vec3, types::InputSettings};

const LEFT_CLICK: u32 = 0;

/// Polled input state: which keys are held, where the cursor is, how far the
/// wheel turned this frame. Maintained by the event loop; read from user
/// callbacks.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    keys: Vec<KeyCode>,
    pub mouse_x: f32,
    pub mouse_y: f32,
    /// Accumulated over the frame, zeroed after the update callback runs.
    pub wheel_delta: f32,
}

impl InputState {
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub(crate) fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if !self.keys.contains(&code) {
                                self.keys.push(code);
                            }
                        }
                        ElementState::Released => {
                            self.keys.retain(|k| *k != code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_x = position.x as f32;
                self.mouse_y = position.y as f32;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.wheel_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
            }
            _ => {}
        }
    }
}

/// Movement and look commands distilled from raw device events; consumed by
/// the camera-adjust helpers below.
#[derive(Clone, Debug, Default)]
pub struct InputsCommanded {
    pub fwd: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub mouse_delta_x: f32,
    pub mouse_delta_y: f32,
    pub run: bool,
    pub free_look: bool,
}

impl InputsCommanded {
    /// Return true if there are any inputs.
    pub fn inputs_present(&self) -> bool {
        const EPS: f32 = 0.00001;
        // `run` and `free_look` are modifiers, not inputs of their own.
        self.fwd
            || self.back
            || self.left
            || self.right
            || self.up
            || self.down
            || self.mouse_delta_x.abs() > EPS
            || self.mouse_delta_y.abs() > EPS
    }

    /// Mouse deltas accumulate per event; the frame loop flushes them after
    /// the update callback has seen them.
    pub(crate) fn clear_deltas(&mut self) {
        self.mouse_delta_x = 0.0;
        self.mouse_delta_y = 0.0;
    }
}

/// Modifies the commanded inputs in place; triggered by a single device event.
pub(crate) fn add_input_cmd(event: &DeviceEvent, inputs: &mut InputsCommanded) {
    match event {
        DeviceEvent::Key(key) => {
            let pressed = key.state == ElementState::Pressed;

            if let PhysicalKey::Code(code) = key.physical_key {
                match code {
                    KeyCode::KeyW => inputs.fwd = pressed,
                    KeyCode::KeyS => inputs.back = pressed,
                    KeyCode::KeyA => inputs.left = pressed,
                    KeyCode::KeyD => inputs.right = pressed,
                    KeyCode::Space => inputs.up = pressed,
                    KeyCode::KeyC => inputs.down = pressed,
                    KeyCode::ShiftLeft => inputs.run = pressed,
                    _ => (),
                }
            }
        }
        DeviceEvent::Button { button, state } => {
            if *button == LEFT_CLICK {
                inputs.free_look = *state == ElementState::Pressed;
            }
        }
        DeviceEvent::MouseMotion { delta } => {
            inputs.mouse_delta_x += delta.0 as f32;
            inputs.mouse_delta_y += delta.1 as f32;
        }
        _ => (),
    }
}

/// Adjust the camera position and Euler rotation from the commanded inputs.
/// Returns whether anything changed, so the caller knows a view-matrix
/// update is due. dt is in seconds.
pub fn adjust_camera_free(
    cam: &mut Camera,
    inputs: &InputsCommanded,
    input_settings: &InputSettings,
    dt: f32,
) -> bool {
    let mut move_amt = input_settings.move_sens * dt;
    let rotate_amt = input_settings.rotate_sens * dt;

    if inputs.run {
        move_amt *= input_settings.run_factor;
    }

    let mut cam_moved = false;
    let mut cam_rotated = false;

    let fwd = cam.forward();
    let left = cam.left();
    let up = Vec3::new(0.0, 1.0, 0.0);

    if inputs.fwd {
        cam.position += fwd * move_amt;
        cam_moved = true;
    } else if inputs.back {
        cam.position -= fwd * move_amt;
        cam_moved = true;
    }

    if inputs.left {
        cam.position += left * move_amt;
        cam_moved = true;
    } else if inputs.right {
        cam.position -= left * move_amt;
        cam_moved = true;
    }

    if inputs.up {
        cam.position += up * move_amt;
        cam_moved = true;
    } else if inputs.down {
        cam.position -= up * move_amt;
        cam_moved = true;
    }

    let eps = 0.00001;
    if inputs.free_look && (inputs.mouse_delta_x.abs() > eps || inputs.mouse_delta_y.abs() > eps) {
        // Dragging right yaws right (negative yaw); dragging down pitches
        // down. Pitch clamping happens inside update_view_matrix.
        cam.rotation.y -= inputs.mouse_delta_x * rotate_amt;
        cam.rotation.x -= inputs.mouse_delta_y * rotate_amt;
        cam_rotated = true;
    }

    cam_moved || cam_rotated
}

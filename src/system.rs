//! The frame controller: owns the user state and callbacks, meters time and
//! FPS, and steps clear → update → present → buffer rotation once per redraw.
//! Window plumbing lives in `window.rs`.

use std::{sync::Arc, time::Instant};

use winit::{
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::{
    error::RenderError, graphics::Renderer, types::EngineSettings,
};

/// How much frame time to accumulate before re-deriving the FPS figure.
const FPS_WINDOW: f32 = 0.25;

pub struct State<T, FInit, FUpdate>
where
    FInit: FnMut(&mut T, &mut Renderer) -> Result<(), RenderError>,
    FUpdate: FnMut(&mut T, &mut Renderer, f32) -> Result<(), RenderError>,
{
    pub(crate) user_state: T,
    pub(crate) init_handler: FInit,
    pub(crate) update_handler: FUpdate,
    pub(crate) settings: EngineSettings,

    /// `renderer`, `window` and `surface` are None until the event loop
    /// delivers `resumed` and the window exists.
    pub(crate) renderer: Option<Renderer>,
    pub(crate) window: Option<Arc<Window>>,
    pub(crate) surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,

    pub(crate) last_frame_time: Instant,
    pub(crate) accumulated_time: f32,
    pub(crate) frame_count: usize,

    /// What `run` ultimately returns; set on fatal errors before the event
    /// loop is told to exit.
    pub(crate) outcome: Result<(), RenderError>,
}

impl<T, FInit, FUpdate> State<T, FInit, FUpdate>
where
    FInit: FnMut(&mut T, &mut Renderer) -> Result<(), RenderError>,
    FUpdate: FnMut(&mut T, &mut Renderer, f32) -> Result<(), RenderError>,
{
    fn new(user_state: T, settings: EngineSettings, init_handler: FInit, update_handler: FUpdate) -> Self {
        Self {
            user_state,
            init_handler,
            update_handler,
            settings,
            renderer: None,
            window: None,
            surface: None,
            last_frame_time: Instant::now(),
            accumulated_time: 0.0,
            frame_count: 0,
            outcome: Ok(()),
        }
    }

    /// One full frame. Called from the redraw event; any error is fatal and
    /// bubbles to `run`'s return value.
    pub(crate) fn step_frame(&mut self) -> Result<(), RenderError> {
        let renderer = self
            .renderer
            .as_mut()
            .ok_or(RenderError::BuffersNotAllocated)?;
        let surface = self
            .surface
            .as_mut()
            .ok_or(RenderError::BuffersNotAllocated)?;

        // Millisecond-resolution dt; very fast consecutive frames can
        // legitimately see zero.
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_millis() as f32 / 1000.0;
        self.last_frame_time = now;

        self.accumulated_time += dt;
        if self.accumulated_time > FPS_WINDOW {
            renderer.fps = (self.frame_count as f32 / self.accumulated_time) as usize;
            self.accumulated_time = 0.0;
            self.frame_count = 0;
        }

        if renderer.clear_screen {
            renderer.clear_frame();
        }

        (self.update_handler)(&mut self.user_state, renderer, dt)?;

        // Present: pack the finished back buffer into the surface and swap.
        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| RenderError::Surface(e.to_string()))?;
        renderer.buffers().present_into(&mut buffer, renderer.invert_y);
        buffer
            .present()
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        renderer.end_frame();

        if let (Some(window), Some(title)) = (&self.window, renderer.pending_title.take()) {
            window.set_title(&title);
        }

        self.frame_count += 1;
        Ok(())
    }
}

/// This is the entry point to the renderer: it builds the event loop, opens
/// the window, allocates the frame buffers, then hands control to the user
/// callbacks once per frame.
///
/// `user_state` is arbitrary application state the engine holds on to.
/// `init_handler` runs once, after the buffers exist — load assets here.
/// `update_handler` runs every frame with dt in seconds, and does all the
/// drawing through the `Renderer` it receives.
///
/// Returns when the window is closed (Ok) or on the first fatal error.
pub fn run<T, FInit, FUpdate>(
    user_state: T,
    settings: EngineSettings,
    init_handler: FInit,
    update_handler: FUpdate,
) -> Result<(), RenderError>
where
    FInit: FnMut(&mut T, &mut Renderer) -> Result<(), RenderError>,
    FUpdate: FnMut(&mut T, &mut Renderer, f32) -> Result<(), RenderError>,
{
    let settings = settings.clamped();
    let mut state = State::new(user_state, settings, init_handler, update_handler);

    let event_loop = EventLoop::new().map_err(|e| RenderError::Surface(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    event_loop
        .run_app(&mut state)
        .map_err(|e| RenderError::Surface(e.to_string()))?;

    state.outcome
}

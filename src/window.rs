//! Handles window initialization and events, using Winit. The finished BGR
//! frame is handed to a softbuffer surface; no GPU is involved at any point.

use std::{num::NonZeroU32, sync::Arc, time::Instant};

use log::error;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{WindowAttributes, WindowId},
};

use crate::{
    error::RenderError,
    graphics::Renderer,
    input::add_input_cmd,
    system::State,
};

impl<T, FInit, FUpdate> State<T, FInit, FUpdate>
where
    FInit: FnMut(&mut T, &mut Renderer) -> Result<(), RenderError>,
    FUpdate: FnMut(&mut T, &mut Renderer, f32) -> Result<(), RenderError>,
{
    fn fatal(&mut self, err: RenderError, event_loop: &ActiveEventLoop) {
        error!("{err}");
        self.outcome = Err(err);
        event_loop.exit();
    }
}

impl<T, FInit, FUpdate> ApplicationHandler for State<T, FInit, FUpdate>
where
    FInit: FnMut(&mut T, &mut Renderer) -> Result<(), RenderError>,
    FUpdate: FnMut(&mut T, &mut Renderer, f32) -> Result<(), RenderError>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            // Resumed again after a suspend; the buffers already exist.
            return;
        }

        let width = self.settings.window_width;
        let height = self.settings.window_height;

        let attributes = WindowAttributes::default()
            .with_title(&self.settings.window_title)
            // The canvas is sized once; rendering assumes fixed dimensions.
            .with_inner_size(PhysicalSize::new(width as u32, height as u32))
            .with_resizable(false);

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => return self.fatal(RenderError::Surface(e.to_string()), event_loop),
        };

        let context = match softbuffer::Context::new(window.clone()) {
            Ok(c) => c,
            Err(e) => return self.fatal(RenderError::Surface(e.to_string()), event_loop),
        };
        let mut surface = match softbuffer::Surface::new(&context, window.clone()) {
            Ok(s) => s,
            Err(e) => return self.fatal(RenderError::Surface(e.to_string()), event_loop),
        };

        let (Some(w), Some(h)) = (
            NonZeroU32::new(width as u32),
            NonZeroU32::new(height as u32),
        ) else {
            return self.fatal(RenderError::ZeroSizeRequest, event_loop);
        };
        if let Err(e) = surface.resize(w, h) {
            return self.fatal(RenderError::Surface(e.to_string()), event_loop);
        }

        let mut renderer = Renderer::new(width, height);

        if let Err(e) = (self.init_handler)(&mut self.user_state, &mut renderer) {
            return self.fatal(e, event_loop);
        }

        self.window = Some(window);
        self.surface = Some(surface);
        self.renderer = Some(renderer);
        self.last_frame_time = Instant::now();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(renderer) = self.renderer.as_mut() else {
            // May occur prior to init.
            return;
        };

        renderer.input.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                // The only cancellation path: in-flight frame work has
                // already completed, so this is a clean exit.
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                match self.step_frame() {
                    Ok(()) => {
                        if let Some(window) = &self.window {
                            // Poll mode: keep the frames coming.
                            window.request_redraw();
                        }
                    }
                    Err(e) => self.fatal(e, event_loop),
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(renderer) = self.renderer.as_mut() {
            add_input_cmd(&event, &mut renderer.inputs_commanded);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {}
}

use glium::glutin::{
    self,
    dpi::LogicalSize,
    event::{
        ElementState, Event, KeyboardInput, MouseScrollDelta, VirtualKeyCode, WindowEvent,
    },
    event_loop::{ControlFlow, EventLoop},
    window::{CursorGrabMode, WindowBuilder},
};
use std::time::Instant;

use super::{
    frame::{render_frame, DemoScene},
    input::{
        apply_held_keys, handle_cursor, handle_focus, handle_key, handle_pixel_scroll,
        handle_scroll, Key,
    },
    scene_state::SceneState,
    settings::Settings,
};
use crate::{
    backend::GliumBackend, lantern_error, lantern_info, lantern_trace, lantern_warn,
    shader::ShaderProgram,
};

pub struct Window {
    event_loop: EventLoop<()>,
    backend: &'static GliumBackend,
    clear_color: [f32; 3],
}

impl Window {
    pub fn new(settings: &Settings) -> Result<Window, glium::backend::glutin::DisplayCreationError> {
        // Create window and gl context
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_title(settings.title.clone())
            .with_inner_size(LogicalSize::new(
                settings.width as f64,
                settings.height as f64,
            ));
        // Vsync is an easy way to limit framerate to a sane range
        let context_builder = glutin::ContextBuilder::new()
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
            .with_gl_profile(glutin::GlProfile::Core)
            .with_depth_buffer(24)
            .with_vsync(true);
        let display = glium::Display::new(window_builder, context_builder, &event_loop)?;

        {
            let gl_window = display.gl_window();
            let window = gl_window.window();
            if let Err(why) = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
            {
                lantern_warn!("Failed to grab cursor: {}", why);
            }
            window.set_cursor_visible(false);
        }

        // Shader programs borrow the backend for as long as the event loop runs, which is
        // the rest of the process. Textures are never freed either.
        let backend: &'static GliumBackend = Box::leak(Box::new(GliumBackend::new(display)));

        Ok(Window {
            event_loop,
            backend,
            clear_color: settings.clear_color,
        })
    }

    pub fn backend(&self) -> &'static GliumBackend {
        self.backend
    }

    pub fn main_loop(
        self,
        shader: ShaderProgram<'static, GliumBackend>,
        scene: DemoScene<GliumBackend>,
        mut state: SceneState,
    ) -> ! {
        let Window {
            event_loop,
            backend,
            clear_color,
        } = self;

        let start = Instant::now();
        let mut last_frame = Instant::now();

        event_loop.run(move |event, _, control_flow| match event {
            Event::NewEvents(_) => {
                let now = Instant::now();
                apply_held_keys(&mut state, (now - last_frame).as_secs_f64());
                state.time = (now - start).as_secs_f32();
                last_frame = now;
            }
            Event::MainEventsCleared => {
                lantern_trace!("main_loop: MainEventsCleared");
                if state.exit_requested {
                    lantern_info!("main_loop: Exit requested");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                // Ran out of events so let's prepare to draw
                backend.display().gl_window().window().request_redraw();
            }
            Event::RedrawRequested(_) => {
                let redraw_start = Instant::now();

                backend.begin_frame(clear_color);
                render_frame(&shader, &state, &scene, backend.aspect_ratio());
                if let Err(why) = backend.end_frame() {
                    lantern_error!("main_loop: Failed to finish frame: {}", why);
                    *control_flow = ControlFlow::Exit;
                }

                let spent_millis = (redraw_start.elapsed().as_micros() as f32) * 1e-3;
                lantern_trace!("main_loop: RedrawRequested took {:4.2}ms", spent_millis);
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    lantern_trace!("main_loop: CloseRequested");
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    lantern_trace!("main_loop: Resized");
                    backend.display().gl_window().resize(size);
                }
                WindowEvent::Focused(focused) => handle_focus(&mut state, focused),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(code),
                            state: key_state,
                            ..
                        },
                    ..
                } => {
                    if let Some(key) = key_from_code(code) {
                        handle_key(&mut state, key, key_state == ElementState::Pressed);
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    handle_cursor(&mut state, position.x, position.y);
                }
                WindowEvent::MouseWheel {
                    delta: MouseScrollDelta::LineDelta(_, y),
                    ..
                } => handle_scroll(&mut state, y as f64),
                WindowEvent::MouseWheel {
                    delta: MouseScrollDelta::PixelDelta(position),
                    ..
                } => handle_pixel_scroll(&mut state, position.y),
                _ => {}
            },
            _ => {}
        })
    }
}

fn key_from_code(code: VirtualKeyCode) -> Option<Key> {
    match code {
        VirtualKeyCode::W => Some(Key::W),
        VirtualKeyCode::A => Some(Key::A),
        VirtualKeyCode::S => Some(Key::S),
        VirtualKeyCode::D => Some(Key::D),
        VirtualKeyCode::Space => Some(Key::Space),
        VirtualKeyCode::C => Some(Key::C),
        VirtualKeyCode::F => Some(Key::F),
        VirtualKeyCode::G => Some(Key::G),
        VirtualKeyCode::P => Some(Key::P),
        VirtualKeyCode::Q => Some(Key::Q),
        VirtualKeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

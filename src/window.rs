//! SDL2 window, keyboard input and frame pacing.
//!
//! Nothing here is global: the binary owns the window, the limiter and the
//! FPS counter and passes them around its loop.

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use tracing::debug;

use crate::input::InputIntent;

/// Key bindings, shown in the window title.
pub const CONTROLS: &str = "W/S move, A/D strafe, Space up, LShift down, arrows turn and look, \
                            R reset rotation, T reset position, Esc quit";

/// Window-level events other than key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowEvents {
    pub quit: bool,
    pub reset_rotation: bool,
    pub reset_position: bool,
    /// Latest size if the window was resized since the last poll.
    pub resized: Option<(u32, u32)>,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_target_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, fps_cap: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_target_ms: 1000 / u64::from(fps_cap.max(1)),
        }
    }

    /// Waits if necessary to maintain the frame rate and returns the time
    /// elapsed since the previous call, in seconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> f32 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < self.frame_target_ms {
            let time_to_wait = self.frame_target_ms - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time as f32 / 1000.0
    }
}

/// Counts presented frames and reports the rate once per second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start_ms: u64,
    frames: u32,
}

impl FpsCounter {
    pub fn new(now_ms: u64) -> Self {
        Self {
            window_start_ms: now_ms,
            frames: 0,
        }
    }

    /// Records one frame. Returns the frame count of the last second once a
    /// full second has elapsed.
    pub fn tick(&mut self, now_ms: u64) -> Option<u32> {
        self.frames += 1;
        let elapsed = now_ms.saturating_sub(self.window_start_ms);
        if elapsed < 1000 {
            return None;
        }
        let fps = (self.frames as u64 * 1000 / elapsed) as u32;
        self.frames = 0;
        self.window_start_ms = now_ms;
        Some(fps)
    }

    pub fn title(fps: u32) -> String {
        format!("Running at {fps} fps.")
    }

    /// [`Self::title`] followed by the key bindings.
    pub fn status_title(fps: u32) -> String {
        format!("{} | {CONTROLS}", Self::title(fps))
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before the creator so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        debug!(width, height, "window created");
        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains the event queue. Commands fire once per key press, not while
    /// the key is held.
    pub fn poll_events(&mut self) -> WindowEvents {
        let mut events = WindowEvents::default();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.quit = true,
                Event::KeyDown {
                    keycode: Some(Keycode::R),
                    repeat: false,
                    ..
                } => events.reset_rotation = true,
                Event::KeyDown {
                    keycode: Some(Keycode::T),
                    repeat: false,
                    ..
                } => events.reset_position = true,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => events.resized = Some((w.max(1) as u32, h.max(1) as u32)),
                _ => {}
            }
        }
        events
    }

    /// Samples held keys into this frame's intent.
    ///
    /// W/S move, A/D strafe, Space rises and Left Shift sinks, the arrow
    /// keys turn and look.
    pub fn input_intent(&self, events: &WindowEvents) -> InputIntent {
        let keys = self.event_pump.keyboard_state();
        let held = |code: Scancode| keys.is_scancode_pressed(code);

        InputIntent {
            forward: InputIntent::axis(held(Scancode::W), held(Scancode::S)),
            right: InputIntent::axis(held(Scancode::D), held(Scancode::A)),
            // Y grows downward.
            up: InputIntent::axis(held(Scancode::LShift), held(Scancode::Space)),
            yaw: InputIntent::axis(held(Scancode::Left), held(Scancode::Right)),
            pitch: InputIntent::axis(held(Scancode::Down), held(Scancode::Up)),
            reset_rotation: events.reset_rotation,
            reset_position: events.reset_position,
            quit: events.quit,
        }
    }

    pub fn present(&mut self, buffer: &[u8], pitch: usize) -> Result<(), String> {
        self.texture
            .update(None, buffer, pitch)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        debug!(width, height, "window resized");
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

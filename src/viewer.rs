//! Interactive SDL2 window around [`render_scene`].
//!
//! Keys: arrows move the query point in x/y, W/S move it along the viewing
//! direction, R puts it back where it started, Esc quits. The window title
//! shows the current clip coordinates and outcode.

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::math::vec3::Vec3;
use crate::probe::FrustumProbe;
use crate::render::{render_scene, Canvas};

const FRAME_TIME: Duration = Duration::from_millis(16);
/// Fraction of the frustum radius moved per key press.
const STEP_FRACTION: f32 = 0.02;

/// Opens the window and runs until it is closed.
pub fn run(probe: &FrustumProbe, start: Vec3, width: u32, height: u32) -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window("frustum-probe", width, height)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;

    let mut sdl_canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = sdl_canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
        .map_err(|e| e.to_string())?;
    let mut event_pump = sdl_context.event_pump()?;

    let mut canvas = Canvas::new(width, height);
    let step = probe.corners().radius() * STEP_FRACTION;
    let mut point = start;
    let mut dirty = true;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => {
                    let (w, h) = (w.max(1) as u32, h.max(1) as u32);
                    canvas.resize(w, h);
                    texture = texture_creator
                        .create_texture_streaming(PixelFormatEnum::ARGB8888, w, h)
                        .map_err(|e| e.to_string())?;
                    dirty = true;
                }
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Exposed,
                    ..
                } => dirty = true,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    let delta = match key {
                        Keycode::Left => Vec3::new(-step, 0.0, 0.0),
                        Keycode::Right => Vec3::new(step, 0.0, 0.0),
                        Keycode::Up => Vec3::new(0.0, step, 0.0),
                        Keycode::Down => Vec3::new(0.0, -step, 0.0),
                        Keycode::W => Vec3::FORWARD * step,
                        Keycode::S => -Vec3::FORWARD * step,
                        Keycode::R => start - point,
                        _ => continue,
                    };
                    point = point + delta;
                    log::debug!("query point moved to {point:?}");
                    dirty = true;
                }
                _ => {}
            }
        }

        if dirty {
            let report = render_scene(&mut canvas, probe, point);
            let title = format!(
                "frustum-probe | ({:.1}, {:.1}, {:.1}) | {}",
                point.x,
                point.y,
                point.z,
                report.to_string().replace('\n', " | ")
            );
            sdl_canvas
                .window_mut()
                .set_title(&title)
                .map_err(|e| e.to_string())?;

            texture
                .update(None, &canvas.to_argb_bytes(), canvas.width() as usize * 4)
                .map_err(|e| e.to_string())?;
            sdl_canvas.clear();
            sdl_canvas.copy(&texture, None, None)?;
            sdl_canvas.present();
            dirty = false;
        }

        std::thread::sleep(FRAME_TIME);
    }

    Ok(())
}

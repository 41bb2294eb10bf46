// Window glue: open it, feed it pixels, read the mouse.
// Visual effects provided here:
// 1) A window that shows the thresholded image (or a plain fill before any drop).
// 2) The window snaps to the image size whenever a new image is loaded.

use crate::error::Error;
use crate::types::{PixelBuffer, PointerPosition};
use minifb::{Key, MouseMode, Window, WindowOptions};
use tracing::info;

/// Shown while no image is loaded (light gray, like a drop target).
const EMPTY_FILL: u32 = 0x00_D3_D3_D3;

pub struct Drawer {
    window: Window, // the on-screen window you see
    title: String,
    fps: usize,
    scratch: Vec<u32>, // 0x00RRGGBB frame handed to minifb
}

impl Drawer {
    /// Create a window of the given size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let window = open_window(title, width, height, fps)?;
        Ok(Self { window, title: title.to_owned(), fps, scratch: Vec::new() })
    }

    /// Re-open the window at a new size (minifb can't resize from code on every platform).
    /// Visual: the window briefly closes and reappears at the image's size.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), Error> {
        if self.window.get_size() == (width, height) {
            return Ok(());
        }
        self.window = open_window(&self.title, width, height, self.fps)?;
        info!(width, height, "window recreated");
        Ok(())
    }

    /// Push the image for this frame to the screen.
    pub fn present(&mut self, image: &PixelBuffer) -> Result<(), Error> {
        self.scratch = image.to_rgb_u32();
        self.window
            .update_with_buffer(&self.scratch, image.width(), image.height())
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Fill the whole window with the "nothing loaded" colour.
    pub fn present_empty(&mut self) -> Result<(), Error> {
        let (w, h) = self.window.get_size();
        let (w, h) = (w.max(1), h.max(1));
        self.scratch.clear();
        self.scratch.resize(w * h, EMPTY_FILL);
        self.window
            .update_with_buffer(&self.scratch, w, h)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Pump window events without drawing (keeps the mouse and close button live).
    pub fn poll(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current pointer position in window coordinates, not clamped to the window.
    pub fn pointer(&self) -> Option<PointerPosition> {
        self.window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| PointerPosition { x: x as f64, y: y as f64 })
    }

    /// Width of the drawing surface in window pixels.
    pub fn view_width(&self) -> f64 {
        self.window.get_size().0 as f64
    }
}

fn open_window(title: &str, width: usize, height: usize, fps: usize) -> Result<Window, Error> {
    let mut window = Window::new(title, width.max(1), height.max(1), WindowOptions::default())
        .map_err(|e| Error::WindowInit(e.to_string()))?;
    window.set_target_fps(fps);
    Ok(window)
}

// The black/white threshold renderer.
// Visual: pixels brighter than the cutoff turn black, the rest white; moving the
// mouse to the right raises the cutoff so more of the image turns white.

use crate::math::map;
use crate::types::{Bgra, PixelBuffer, PointerPosition};

const BLACK: (u8, u8, u8) = (0, 0, 0);
const WHITE: (u8, u8, u8) = (255, 255, 255);

/// Unweighted average of R, G and B, floored.
#[inline]
pub fn brightness(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Brightness cutoff for a pointer x inside a view of `view_width` pixels.
/// Deliberately unclamped: a pointer left of the view gives a negative cutoff.
#[inline]
pub fn threshold_for(pointer_x: f64, view_width: f64) -> f64 {
    map(pointer_x, 0.0, view_width, 0.0, 255.0)
}

/// Everything the input handlers and the render pass share.
/// Destination exists if and only if source does, and always has the same size.
#[derive(Debug, Default)]
pub struct AppState {
    source: Option<PixelBuffer>,
    destination: Option<PixelBuffer>,
    pointer: PointerPosition,
    needs_redraw: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    pub fn destination(&self) -> Option<&PixelBuffer> {
        self.destination.as_ref()
    }

    pub fn pointer(&self) -> PointerPosition {
        self.pointer
    }

    /// Install a new source image and a matching (zeroed) destination.
    pub fn set_image(&mut self, source: PixelBuffer) {
        let (w, h) = source.dimensions();
        self.destination = Some(PixelBuffer::new(w, h));
        self.source = Some(source);
        self.needs_redraw = true;
    }

    /// Remember where the pointer is. No pixel work happens here.
    pub fn on_pointer_move(&mut self, position: PointerPosition) {
        self.pointer = position;
        self.needs_redraw = true;
    }

    /// Ask for a render pass without changing any state (e.g. after the window was recreated).
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Returns true once per batch of state changes and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Rewrite the destination from the source and the current pointer x.
    /// No-op while no image is loaded.
    pub fn recompute(&mut self, view_width: f64) {
        let (Some(src), Some(dst)) = (self.source.as_ref(), self.destination.as_mut()) else {
            return;
        };

        let threshold = threshold_for(self.pointer.x, view_width);

        for y in 0..src.height() {
            for x in 0..src.width() {
                let Some(px) = src.pixel(x, y) else { continue };
                let (b, g, r) = if brightness(px.r, px.g, px.b) as f64 > threshold { BLACK } else { WHITE };
                dst.set_pixel(x, y, Bgra::new(b, g, r, px.a));
            }
        }
    }
}

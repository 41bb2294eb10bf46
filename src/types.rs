// Core types shared by the loader, the renderer and the window.

/// One pixel in memory order: blue, green, red, alpha (8 bits each, premultiplied).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bgra {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra {
    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Pack as 0x00RRGGBB for minifb.
    #[inline]
    pub fn to_rgb_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Owned BGRA8 image, row-major.
/// `stride` is bytes per row and always equals `width * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    stride: usize,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    pub const CHANNELS: usize = 4;

    /// Zero-filled buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width * Self::CHANNELS;
        Self { width, height, stride, bytes: vec![0u8; stride * height] }
    }

    /// Wrap existing BGRA bytes. Returns None if the length doesn't match the size.
    pub fn from_bgra(width: usize, height: usize, bytes: Vec<u8>) -> Option<Self> {
        let stride = width * Self::CHANNELS;
        if bytes.len() != stride * height {
            return None;
        }
        Some(Self { width, height, stride, bytes })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.stride + x * Self::CHANNELS)
    }

    /// Read the pixel at (x,y); None outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Bgra> {
        let i = self.offset(x, y)?;
        let px = &self.bytes[i..i + Self::CHANNELS];
        Some(Bgra::new(px[0], px[1], px[2], px[3]))
    }

    /// Write the pixel at (x,y). Returns false (and writes nothing) outside the image.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: Bgra) -> bool {
        let Some(i) = self.offset(x, y) else {
            return false;
        };
        self.bytes[i..i + Self::CHANNELS].copy_from_slice(&[px.b, px.g, px.r, px.a]);
        true
    }

    /// All pixels packed as 0x00RRGGBB, ready for the window.
    pub fn to_rgb_u32(&self) -> Vec<u32> {
        self.as_bytes()
            .chunks_exact(self.stride().max(1))
            .flat_map(|row| row.chunks_exact(Self::CHANNELS))
            .map(|c| Bgra::new(c[0], c[1], c[2], c[3]).to_rgb_u32())
            .collect()
    }
}

/// Last known pointer position in view-local coordinates.
/// Not clamped: it may lie outside the view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

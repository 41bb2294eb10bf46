// Turns a dropped file into pixels the renderer can use.
// Visual expectation: after a successful drop the window snaps to the image's
// size and the thresholded picture appears on the next redraw.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};
use tracing::{debug, info};

use crate::error::Error;
use crate::threshold::AppState;
use crate::types::PixelBuffer;

/// Open `path`, decode it and convert to BGRA8 with premultiplied alpha.
/// The file handle is dropped when this returns, on success or failure.
pub fn load_image(path: &Path) -> Result<PixelBuffer, Error> {
    let file = File::open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;

    let decoded = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|source| Error::Open { path: path.to_path_buf(), source })?
        .decode()
        .map_err(|source| Error::Decode { path: path.to_path_buf(), source })?;

    Ok(to_bgra_premultiplied(&decoded.to_rgba8()))
}

/// Straight RGBA -> premultiplied BGRA.
pub fn to_bgra_premultiplied(rgba: &RgbaImage) -> PixelBuffer {
    let (w, h) = rgba.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize) * PixelBuffer::CHANNELS);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        out.extend_from_slice(&[premultiply(b, a), premultiply(g, a), premultiply(r, a), a]);
    }
    // Length is w*h*4 by construction.
    PixelBuffer::from_bgra(w as usize, h as usize, out).unwrap_or_else(|| PixelBuffer::new(w as usize, h as usize))
}

/// c * a / 255, rounded.
#[inline]
fn premultiply(c: u8, a: u8) -> u8 {
    ((c as u16 * a as u16 + 127) / 255) as u8
}

/// Handle one drop event.
///
/// Only the first path is used. `None` or an empty list is ignored without error.
/// On success the host is asked to resize to the image size and the image is
/// installed into `state`. Returns whether an image was installed.
pub fn handle_drop<F>(paths: Option<&[PathBuf]>, state: &mut AppState, mut resize: F) -> Result<bool, Error>
where
    F: FnMut(usize, usize) -> Result<(), Error>,
{
    let Some(first) = paths.and_then(|p| p.first()) else {
        debug!("drop without files ignored");
        return Ok(false);
    };
    if let Some(n) = paths.map(|p| p.len()).filter(|&n| n > 1) {
        debug!(ignored = n - 1, "only the first dropped file is used");
    }

    let image = load_image(first)?;
    let (w, h) = image.dimensions();
    info!(path = %first.display(), width = w, height = h, "image loaded");

    resize(w, h)?;
    state.set_image(image);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bgra;
    use image::Rgba;
    use std::io::Write;

    fn write_png(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn empty_or_missing_list_is_ignored() {
        let mut state = AppState::new();
        let mut calls = 0;
        assert!(!handle_drop(None, &mut state, |_, _| { calls += 1; Ok(()) }).unwrap());
        assert!(!handle_drop(Some(&[]), &mut state, |_, _| { calls += 1; Ok(()) }).unwrap());
        assert_eq!(calls, 0);
        assert!(!state.has_image());
        assert!(!state.take_redraw());
    }

    #[test]
    fn first_path_is_loaded_and_window_resized() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_png(dir.path(), "a.png", &RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255])));
        let second = write_png(dir.path(), "b.png", &RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 255])));

        let mut state = AppState::new();
        let mut sizes = Vec::new();
        let paths = vec![first, second];
        let loaded = handle_drop(Some(&paths), &mut state, |w, h| {
            sizes.push((w, h));
            Ok(())
        })
        .unwrap();

        assert!(loaded);
        assert_eq!(sizes, vec![(3, 2)]);
        assert_eq!(state.source().unwrap().dimensions(), (3, 2));
        assert_eq!(state.destination().unwrap().dimensions(), (3, 2));
        assert_eq!(state.source().unwrap().pixel(2, 1), Some(Bgra::new(30, 20, 10, 255)));
        assert!(state.take_redraw());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new();
        let paths = vec![dir.path().join("nope.png")];
        let err = handle_drop(Some(&paths), &mut state, |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
        assert!(err.is_recoverable());
        assert!(!state.has_image());
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"this is not an image at all").unwrap();
        drop(f);

        let mut state = AppState::new();
        let err = handle_drop(Some(&[path]), &mut state, |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(!state.has_image());
    }

    #[test]
    fn failed_drop_keeps_previous_image() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", &RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])));
        let mut state = AppState::new();
        handle_drop(Some(&[good]), &mut state, |_, _| Ok(())).unwrap();

        let bad = vec![dir.path().join("missing.bmp")];
        assert!(handle_drop(Some(&bad), &mut state, |_, _| Ok(())).is_err());
        assert_eq!(state.source().unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn resize_failure_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", &RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let mut state = AppState::new();
        let err = handle_drop(Some(&[good]), &mut state, |_, _| Err(Error::WindowInit("gone".into()))).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(!state.has_image());
    }

    #[test]
    fn alpha_is_premultiplied_into_bgra() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 128, 0, 128]));
        img.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
        let buf = to_bgra_premultiplied(&img);
        assert_eq!(buf.pixel(0, 0), Some(Bgra::new(0, 64, 128, 128)));
        assert_eq!(buf.pixel(1, 0), Some(Bgra::new(0, 0, 0, 0)));
    }
}

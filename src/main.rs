// What you SEE:
// • Drop an image file onto the executable: the window opens at the image's size.
// • The image is drawn in pure black/white. Pixels brighter than the cutoff are black.
// • Move the mouse left/right: the cutoff follows the pointer's x (left = 0, right = 255).
// • ESC quits.

mod config;
mod draw;
mod error;
mod loader;
mod logging;
mod math;
mod threshold;
mod types;

use clap::Parser;
use config::Args;
use draw::Drawer;
use error::Error;
use threshold::{AppState, threshold_for};
use tracing::{debug, error};

fn main() -> Result<(), Error> {
    let args = Args::parse();
    logging::init(args.debug);

    let mut drawer = Drawer::new(&args.title, args.width as usize, args.height as usize, args.fps as usize)?;
    let mut state = AppState::new();
    state.request_redraw(); // first frame: show the empty view

    /* --- The drop event ---
       Visual: on success the window reopens at the image size. */
    if let Err(e) = handle_drop(args.dropped(), &mut state, &mut drawer) {
        if !e.is_recoverable() {
            return Err(e);
        }
        error!("{e}");
    }

    let mut last_pointer = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // 1) Pointer moves only store the position and ask for a redraw.
        let pointer = drawer.pointer();
        if let Some(p) = pointer.filter(|p| Some(*p) != last_pointer) {
            state.on_pointer_move(p);
        }
        last_pointer = pointer;

        // 2) Render only when something changed; otherwise just pump events.
        if !state.take_redraw() {
            drawer.poll();
            continue;
        }

        let view_width = drawer.view_width();
        state.recompute(view_width);
        if !state.has_image() {
            drawer.present_empty()?;
            continue;
        }
        if let (Some(src), Some(image)) = (state.source(), state.destination()) {
            let p = state.pointer();
            debug!(
                x = p.x,
                y = p.y,
                threshold = threshold_for(p.x, view_width),
                size = ?src.dimensions(),
                "redraw"
            );
            drawer.present(image)?;
        }
    }

    Ok(())
}

/// Decode the dropped file and resize the window to match.
fn handle_drop(paths: Option<&[std::path::PathBuf]>, state: &mut AppState, drawer: &mut Drawer) -> Result<(), Error> {
    if loader::handle_drop(paths, state, |w, h| drawer.resize(w, h))? {
        // The window may be brand new; make sure it gets a frame.
        state.request_redraw();
    }
    Ok(())
}

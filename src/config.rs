// Command-line options.
// Files dropped onto the executable arrive here as positional paths.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live black/white threshold of a dropped image; the mouse x sets the cutoff")]
pub struct Args {
    /// Dropped image files (only the first one is shown)
    pub paths: Vec<PathBuf>,

    /// Window title
    #[arg(long, default_value = "Threshold View")]
    pub title: String,

    /// Window width before an image is loaded
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height before an image is loaded
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Window refresh rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Verbose logging (RUST_LOG overrides the level)
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// The drop event's path list; None when nothing was dropped.
    pub fn dropped(&self) -> Option<&[PathBuf]> {
        (!self.paths.is_empty()).then_some(self.paths.as_slice())
    }
}

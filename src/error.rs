// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating (or re-creating) the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// The dropped file could not be opened for reading.
    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dropped file is not an image the decoder understands.
    #[error("Cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl Error {
    /// Drop failures are reported and the app keeps running; window failures end it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Open { .. } | Error::Decode { .. })
    }
}

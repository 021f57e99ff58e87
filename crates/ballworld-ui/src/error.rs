use std::fmt;
use std::io;
use std::path::PathBuf;

use ballworld_scene::DecodeError;

/// Failure of a save or open.
///
/// Neither variant is fatal: the controller logs it and the scene stays as
/// it was before the attempt.
#[derive(Debug)]
pub enum DrawingError {
    /// The drawing file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The file was read but does not hold a valid drawing.
    Decode { path: PathBuf, source: DecodeError },
}

impl DrawingError {
    pub fn path(&self) -> &PathBuf {
        match self {
            DrawingError::Io { path, .. } | DrawingError::Decode { path, .. } => path,
        }
    }
}

impl fmt::Display for DrawingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawingError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            DrawingError::Decode { path, source } => {
                write!(f, "{} is not a valid drawing: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DrawingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawingError::Io { source, .. } => Some(source),
            DrawingError::Decode { source, .. } => Some(source),
        }
    }
}

use std::fmt;
use std::path::PathBuf;

use crate::skin::SkinPixmapId;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Decode {
        path: PathBuf,
        message: String,
    },
    Encode(String),
    InvalidSize {
        width: u32,
        height: u32,
    },
    MissingSheet(SkinPixmapId),
    NotToggle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Decode {
                path,
                message,
            } => write!(f, "cannot decode {}: {message}", path.display()),
            Error::Encode(message) => write!(f, "cannot encode PNG: {message}"),
            Error::InvalidSize {
                width,
                height,
            } => write!(f, "invalid surface size {width}x{height}"),
            Error::MissingSheet(id) => write!(f, "skin is missing required sheet '{}'", id.stem()),
            Error::NotToggle => write!(f, "operation is only valid on toggle buttons"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

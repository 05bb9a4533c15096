use std::error;
use std::fmt;
use std::result;

/// Errors returned by map operations.
///
/// A missing key is not an error: lookups and removals report it as `Ok(None)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key has no ordering against itself or against a key already in the map, e.g.
    /// `f64::NAN`.
    InvalidKey,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidKey => write!(f, "key is not comparable"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

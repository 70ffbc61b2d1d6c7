use std::fmt;

/// A marker type to indicate that a connection or read timed out.
#[derive(Debug)]
pub struct TimedOut;

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timed out")
    }
}

impl std::error::Error for TimedOut {}

/// A marker type to indicate that a URI scheme was bad.
#[derive(Debug)]
pub struct BadScheme(pub String);

impl fmt::Display for BadScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported daemon endpoint scheme '{}'", self.0)
    }
}

impl std::error::Error for BadScheme {}

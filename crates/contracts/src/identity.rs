//! Sink identity and the registration dedup rule

use std::fmt;

/// Closed set of sink variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// Standard output
    Console,
    /// Local file, identified by path
    File,
    /// Remote destination, identified by destination string
    Remote,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => write!(f, "console"),
            Self::File => write!(f, "file"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Identity carried by every sink
///
/// `PartialEq` is structural. Registration uses [`SinkIdentity::is_duplicate_of`],
/// which is coarser for remote sinks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SinkIdentity {
    Console,
    File(String),
    Remote(String),
}

impl SinkIdentity {
    /// Variant tag
    pub fn kind(&self) -> SinkKind {
        match self {
            Self::Console => SinkKind::Console,
            Self::File(_) => SinkKind::File,
            Self::Remote(_) => SinkKind::Remote,
        }
    }

    /// Destination path, for file sinks only
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::File(path) => Some(path.as_str()),
            _ => None,
        }
    }

    /// Whether registering a sink with `self` next to `other` would duplicate it
    ///
    /// Different variants never collide. File sinks collide on exact path
    /// equality (no normalization). Two console sinks always collide, and so do
    /// two remote sinks, whatever their destinations.
    pub fn is_duplicate_of(&self, other: &SinkIdentity) -> bool {
        match (self, other) {
            (Self::File(a), Self::File(b)) => a == b,
            (Self::Console, Self::Console) => true,
            (Self::Remote(_), Self::Remote(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SinkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => write!(f, "console"),
            Self::File(path) => write!(f, "file:{path}"),
            Self::Remote(destination) => write!(f, "remote:{destination}"),
        }
    }
}

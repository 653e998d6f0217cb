use std::path::PathBuf;

/// Host activity probe consulted before a pass may start.
pub trait HostGate {
    /// True while the host is compiling or in a play session.
    fn is_busy(&self) -> bool;
}

/// Gate backed by the host's editor lockfile.
#[derive(Debug, Clone)]
pub struct LockfileGate {
    path: PathBuf,
}

impl LockfileGate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HostGate for LockfileGate {
    fn is_busy(&self) -> bool {
        self.path.exists()
    }
}

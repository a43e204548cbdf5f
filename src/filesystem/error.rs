use snafu::Snafu;

/// Every way a filesystem operation can fail. None of them are fatal; the
/// snapshot that was current before the call stays current.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FsError {
    #[snafu(display("{path}: No such file or directory"))]
    NotFound { path: String },
    #[snafu(display("{path}: Not a directory"))]
    NotADirectory { path: String },
    #[snafu(display("{path}: Is a directory"))]
    NotAFile { path: String },
    #[snafu(display("{path}: File exists"))]
    AlreadyExists { path: String },
    /// A new entry's name is empty or contains `/`, or the operand names
    /// no entry at all (the root).
    #[snafu(display("{path}: Invalid name"))]
    InvalidName { path: String },
    /// A move whose destination lies inside the directory being moved.
    #[snafu(display("{path}: Cannot move a directory into itself"))]
    MoveIntoSelf { path: String },
}

impl FsError {
    /// The short phrase a shell prints after the operand.
    pub fn reason(&self) -> &'static str {
        match self {
            FsError::NotFound { .. } => "No such file or directory",
            FsError::NotADirectory { .. } => "Not a directory",
            FsError::NotAFile { .. } => "Is a directory",
            FsError::AlreadyExists { .. } => "File exists",
            FsError::InvalidName { .. } => "Invalid name",
            FsError::MoveIntoSelf { .. } => "Cannot move a directory into itself",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FsError::NotFound { path }
            | FsError::NotADirectory { path }
            | FsError::NotAFile { path }
            | FsError::AlreadyExists { path }
            | FsError::InvalidName { path }
            | FsError::MoveIntoSelf { path } => path,
        }
    }
}

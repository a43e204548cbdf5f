use std::fmt;

/// A normalized, absolute path inside the virtual filesystem.
///
/// Normalization only splits on `/` and drops empty segments. `.` and `..`
/// are kept as literal segment names; walking up the tree is left to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VirtualPath {
    segments: Vec<String>,
}

impl VirtualPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(path: impl AsRef<str>) -> Self {
        let segments = path
            .as_ref()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends `other` below this path. `other` is normalized first, so a
    /// multi-segment relative path adds several levels.
    pub fn join(&self, other: impl AsRef<str>) -> Self {
        let mut joined = self.clone();
        joined.segments.extend(Self::parse(other).segments);
        joined
    }

    /// The containing directory. The root is its own parent.
    pub fn parent(&self) -> Self {
        let mut parent = self.clone();
        parent.segments.pop();
        parent
    }

    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn starts_with(&self, prefix: &VirtualPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Normalizes a path string to its canonical display form.
pub fn normalize(path: impl AsRef<str>) -> String {
    VirtualPath::parse(path).to_string()
}

/// Whether `name` can be used as a single child name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/')
}

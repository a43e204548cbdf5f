use std::sync::Arc;

use snafu::{OptionExt, ensure};
use tracing::debug;

use super::error::{
    AlreadyExistsSnafu, FsError, InvalidNameSnafu, MoveIntoSelfSnafu, NotADirectorySnafu,
    NotAFileSnafu, NotFoundSnafu,
};
use super::path::{VirtualPath, is_valid_name};
use super::tree::{Children, DirEntry, Node};

/// An immutable view of the whole tree at one point in time.
///
/// Cloning is one reference-count bump. A snapshot never changes, no matter
/// what happens to the filesystem it was taken from afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    root: Arc<Node>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            root: Arc::new(Node::empty_directory()),
        }
    }
}

impl Snapshot {
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True when both snapshots are the very same tree, not merely equal ones.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    pub fn resolve(&self, path: impl AsRef<str>) -> Result<&Node, FsError> {
        self.lookup(&VirtualPath::parse(path)).map(Arc::as_ref)
    }

    pub fn list_directory(&self, path: impl AsRef<str>) -> Result<Vec<DirEntry>, FsError> {
        let path = VirtualPath::parse(path);
        self.lookup(&path)?
            .entries()
            .context(NotADirectorySnafu {
                path: path.to_string(),
            })
    }

    pub fn directory_exists(&self, path: impl AsRef<str>) -> bool {
        self.resolve(path).is_ok_and(Node::is_directory)
    }

    pub fn get_file_content(
        &self,
        parent: impl AsRef<str>,
        name: impl AsRef<str>,
    ) -> Result<&str, FsError> {
        let parent = VirtualPath::parse(parent);
        let name = name.as_ref();
        let path = child_display(&parent, name);

        let child = self
            .lookup(&parent)?
            .child(name)
            .context(NotFoundSnafu { path: path.clone() })?;
        child.content().context(NotAFileSnafu { path })
    }

    fn lookup(&self, path: &VirtualPath) -> Result<&Arc<Node>, FsError> {
        path.segments().iter().try_fold(&self.root, |node, segment| {
            node.child(segment).context(NotFoundSnafu {
                path: path.to_string(),
            })
        })
    }
}

/// How a mutation walks from the root to the directory it edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descent {
    /// Every directory on the way must exist; a file on the way reads as a
    /// missing entry.
    Strict,
    /// Missing directories are created; a file on the way is an error.
    CreateMissing,
}

/// Copies the spine from `node` down to the directory at `remaining`, runs
/// `edit` on that directory's (copied) children and returns the new top of
/// the spine. Siblings of the spine are shared with the old tree.
///
/// Nothing is published until the caller swaps the returned root in, so an
/// error anywhere leaves the previous tree as it was.
fn rebuild<T>(
    node: &Arc<Node>,
    remaining: &[String],
    target: &VirtualPath,
    descent: Descent,
    edit: impl FnOnce(&mut Children) -> Result<T, FsError>,
) -> Result<(Arc<Node>, T), FsError> {
    let Node::Directory { children } = &**node else {
        return if remaining.is_empty() || descent == Descent::CreateMissing {
            NotADirectorySnafu {
                path: target.to_string(),
            }
            .fail()
        } else {
            NotFoundSnafu {
                path: target.to_string(),
            }
            .fail()
        };
    };

    let Some((segment, rest)) = remaining.split_first() else {
        let mut children = children.clone();
        let value = edit(&mut children)?;
        return Ok((Arc::new(Node::Directory { children }), value));
    };

    let (child, value) = match (children.get(segment), descent) {
        (Some(child), _) => rebuild(child, rest, target, descent, edit)?,
        (None, Descent::CreateMissing) => {
            debug!("Creating missing directory '{}' on the way to {}", segment, target);
            rebuild(
                &Arc::new(Node::empty_directory()),
                rest,
                target,
                descent,
                edit,
            )?
        }
        (None, Descent::Strict) => {
            return NotFoundSnafu {
                path: target.to_string(),
            }
            .fail();
        }
    };

    let mut children = children.clone();
    children.replace(segment.clone(), child);
    Ok((Arc::new(Node::Directory { children }), value))
}

fn child_display(parent: &VirtualPath, name: &str) -> String {
    if parent.is_root() {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Operations addressing a child inside a parent report a parent that turns
/// out to be a file as the child being missing.
fn parent_file_as_missing(child: &str) -> impl FnOnce(FsError) -> FsError + '_ {
    move |error| match error {
        FsError::NotADirectory { .. } => FsError::NotFound {
            path: child.to_string(),
        },
        other => other,
    }
}

/// The mutable filesystem: one current [`Snapshot`] that every successful
/// mutation replaces with a new one.
#[derive(Debug, Clone, Default)]
pub struct VirtualFileSystem {
    current: Snapshot,
}

impl From<Children> for VirtualFileSystem {
    fn from(children: Children) -> Self {
        Self {
            current: Snapshot {
                root: Arc::new(Node::Directory { children }),
            },
        }
    }
}

impl VirtualFileSystem {
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    pub fn resolve(&self, path: impl AsRef<str>) -> Result<&Node, FsError> {
        self.current.resolve(path)
    }

    pub fn list_directory(&self, path: impl AsRef<str>) -> Result<Vec<DirEntry>, FsError> {
        self.current.list_directory(path)
    }

    pub fn directory_exists(&self, path: impl AsRef<str>) -> bool {
        self.current.directory_exists(path)
    }

    pub fn get_file_content(
        &self,
        parent: impl AsRef<str>,
        name: impl AsRef<str>,
    ) -> Result<&str, FsError> {
        self.current.get_file_content(parent, name)
    }

    pub fn create_directory(
        &mut self,
        parent: impl AsRef<str>,
        name: impl AsRef<str>,
    ) -> Result<(), FsError> {
        self.create_child(parent.as_ref(), name.as_ref(), Node::empty_directory())
    }

    pub fn create_file(
        &mut self,
        parent: impl AsRef<str>,
        name: impl AsRef<str>,
        content: impl Into<String>,
    ) -> Result<(), FsError> {
        self.create_child(parent.as_ref(), name.as_ref(), Node::file(content))
    }

    pub fn update_file_content(
        &mut self,
        parent: impl AsRef<str>,
        name: impl AsRef<str>,
        content: impl Into<String>,
    ) -> Result<(), FsError> {
        let parent = VirtualPath::parse(parent);
        let name = name.as_ref();
        let path = child_display(&parent, name);
        debug!("Updating file content of {}", path);

        let (root, ()) = rebuild(
            &self.current.root,
            parent.segments(),
            &parent,
            Descent::Strict,
            |children| {
                let slot = children
                    .get_mut(name)
                    .context(NotFoundSnafu { path: path.clone() })?;
                ensure!(slot.is_file(), NotAFileSnafu { path: path.clone() });
                *slot = Arc::new(Node::file(content));
                Ok(())
            },
        )
        .map_err(parent_file_as_missing(&path))?;

        self.commit(root);
        Ok(())
    }

    pub fn remove_item(
        &mut self,
        parent: impl AsRef<str>,
        name: impl AsRef<str>,
    ) -> Result<(), FsError> {
        let parent = VirtualPath::parse(parent);
        let name = name.as_ref();
        let path = child_display(&parent, name);
        debug!("Removing {}", path);

        let (root, removed) = rebuild(
            &self.current.root,
            parent.segments(),
            &parent,
            Descent::Strict,
            |children| {
                children
                    .remove(name)
                    .context(NotFoundSnafu { path: path.clone() })
            },
        )
        .map_err(parent_file_as_missing(&path))?;
        debug!("Removed {} node(s) under {}", removed.count(), path);

        self.commit(root);
        Ok(())
    }

    /// Moves the node at `source` (with its whole subtree) into the directory
    /// `destination`, keeping its name. An entry of the same name already in
    /// `destination` is replaced and keeps its listing position.
    ///
    /// Unlike [`VirtualFileSystem::create_directory`], directories missing
    /// along `destination` are created on the fly.
    pub fn move_item(
        &mut self,
        source: impl AsRef<str>,
        destination: impl AsRef<str>,
    ) -> Result<(), FsError> {
        let source = VirtualPath::parse(source);
        let destination = VirtualPath::parse(destination);
        debug!("Moving {} into {}", source, destination);

        let name = source.file_name().context(NotFoundSnafu {
            path: source.to_string(),
        })?;
        let moved = self.current.lookup(&source)?.clone();
        if destination.starts_with(&source) {
            return if moved.is_directory() {
                MoveIntoSelfSnafu {
                    path: source.to_string(),
                }
                .fail()
            } else {
                NotADirectorySnafu {
                    path: source.to_string(),
                }
                .fail()
            };
        }

        let source_parent = source.parent();
        let (detached, _) = rebuild(
            &self.current.root,
            source_parent.segments(),
            &source_parent,
            Descent::Strict,
            |children| {
                children.remove(name).context(NotFoundSnafu {
                    path: source.to_string(),
                })
            },
        )?;

        let (root, ()) = rebuild(
            &detached,
            destination.segments(),
            &destination,
            Descent::CreateMissing,
            |children| {
                if children.replace(name.to_string(), moved).is_some() {
                    debug!("Replaced {}", child_display(&destination, name));
                }
                Ok(())
            },
        )?;

        self.commit(root);
        Ok(())
    }

    fn create_child(&mut self, parent: &str, name: &str, node: Node) -> Result<(), FsError> {
        let parent = VirtualPath::parse(parent);
        let path = child_display(&parent, name);
        ensure!(is_valid_name(name), InvalidNameSnafu { path: path.clone() });
        debug!("Creating {} {}", node.kind(), path);

        let (root, ()) = rebuild(
            &self.current.root,
            parent.segments(),
            &parent,
            Descent::Strict,
            |children| {
                ensure!(
                    !children.contains_key(name),
                    AlreadyExistsSnafu { path: path.clone() }
                );
                children.insert(name.to_string(), Arc::new(node));
                Ok(())
            },
        )?;

        self.commit(root);
        Ok(())
    }

    fn commit(&mut self, root: Arc<Node>) {
        self.current = Snapshot { root };
    }
}

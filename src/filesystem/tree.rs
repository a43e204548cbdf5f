use std::sync::Arc;

use derive_more::{Display, IsVariant};
use hashlink::LinkedHashMap;

/// Child table of a directory. Iteration order is insertion order.
pub type Children = LinkedHashMap<String, Arc<Node>>;

/// A single filesystem entry.
///
/// A node does not know its own name: the name is the key under which its
/// parent stores it, which keeps sibling names unique by construction.
/// Children sit behind `Arc` so that snapshots can share every subtree a
/// mutation did not touch.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Node {
    File { content: String },
    Directory { children: Children },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
}

/// One line of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn empty_directory() -> Self {
        Node::Directory {
            children: LinkedHashMap::new(),
        }
    }

    pub fn file(content: impl Into<String>) -> Self {
        Node::File {
            content: content.into(),
        }
    }

    /// Builds a directory from `(name, node)` pairs, keeping their order.
    /// A repeated name keeps its first position and the last node.
    pub fn directory<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Node)>,
        S: Into<String>,
    {
        let mut children = LinkedHashMap::new();
        for (name, node) in entries {
            children.replace(name.into(), Arc::new(node));
        }
        Node::Directory { children }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File { .. } => NodeKind::File,
            Node::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Node::File { content } => Some(content),
            Node::Directory { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&Children> {
        match self {
            Node::File { .. } => None,
            Node::Directory { children } => Some(children),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Arc<Node>> {
        self.children().and_then(|children| children.get(name))
    }

    pub fn entries(&self) -> Option<Vec<DirEntry>> {
        self.children().map(|children| {
            children
                .iter()
                .map(|(name, node)| DirEntry {
                    name: name.clone(),
                    kind: node.kind(),
                })
                .collect()
        })
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn count(&self) -> usize {
        match self {
            Node::File { .. } => 1,
            Node::Directory { children } => 1 + children.values().map(|c| c.count()).sum::<usize>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::directory([
            ("b", Node::empty_directory()),
            ("a.txt", Node::file("alpha")),
            (
                "nested",
                Node::directory([("deep.txt", Node::file("deep"))]),
            ),
        ])
    }

    #[test]
    fn directory_keeps_insertion_order() {
        let names: Vec<_> = sample()
            .entries()
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["b", "a.txt", "nested"]);
    }

    #[test]
    fn files_have_content_and_no_children() {
        let node = Node::file("hello");
        assert!(node.is_file());
        assert_eq!(node.content(), Some("hello"));
        assert!(node.children().is_none());
        assert!(node.entries().is_none());
        assert_eq!(node.kind(), NodeKind::File);
    }

    #[test]
    fn directories_have_children_and_no_content() {
        let node = sample();
        assert!(node.is_directory());
        assert!(node.content().is_none());
        assert_eq!(node.child("a.txt").map(|c| c.kind()), Some(NodeKind::File));
        assert!(node.child("missing").is_none());
    }

    #[test]
    fn count_includes_every_descendant() {
        assert_eq!(sample().count(), 5);
        assert_eq!(Node::file("").count(), 1);
    }

    #[test]
    fn duplicate_names_keep_the_last_node() {
        let node = Node::directory([("x", Node::file("first")), ("x", Node::file("second"))]);
        assert_eq!(node.children().unwrap().len(), 1);
        assert_eq!(node.child("x").unwrap().content(), Some("second"));
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(NodeKind::Directory.to_string(), "directory");
        assert_eq!(NodeKind::File.to_string(), "file");
    }
}

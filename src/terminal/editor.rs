use crate::filesystem::VirtualPath;

pub const SAVE: &str = ":w";
pub const CANCEL: &str = ":q";
pub const PRINT: &str = ":p";
pub const DELETE_LINE: &str = ":d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Keep editing, showing these lines.
    Continue(Vec<String>),
    Save(String),
    Cancel,
}

/// A line-oriented `nano` session: typed lines are appended to the buffer
/// until the user saves or cancels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    parent: VirtualPath,
    name: String,
    buffer: Vec<String>,
    /// Whether the opened content ended in `\n`; restored on save.
    trailing_newline: bool,
}

impl EditorSession {
    pub fn open(parent: VirtualPath, name: impl Into<String>, content: &str) -> Self {
        Self {
            parent,
            name: name.into(),
            buffer: content.lines().map(str::to_string).collect(),
            trailing_newline: content.ends_with('\n'),
        }
    }

    pub fn parent(&self) -> &VirtualPath {
        &self.parent
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> String {
        let mut content = self.buffer.join("\n");
        if self.trailing_newline && !self.buffer.is_empty() {
            content.push('\n');
        }
        content
    }

    pub fn banner(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Editing {}. Type lines to append; {SAVE} save, {CANCEL} cancel, {PRINT} print, {DELETE_LINE} delete last line.",
            self.name
        )];
        lines.extend(self.numbered());
        lines
    }

    pub fn handle(&mut self, line: &str) -> EditorAction {
        match line.trim_end() {
            SAVE => EditorAction::Save(self.content()),
            CANCEL => EditorAction::Cancel,
            PRINT => EditorAction::Continue(self.numbered()),
            DELETE_LINE => {
                self.buffer.pop();
                EditorAction::Continue(Vec::new())
            }
            _ => {
                self.buffer.push(line.to_string());
                EditorAction::Continue(Vec::new())
            }
        }
    }

    fn numbered(&self) -> Vec<String> {
        self.buffer
            .iter()
            .enumerate()
            .map(|(index, line)| format!("{:>3} {line}", index + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(content: &str) -> EditorSession {
        EditorSession::open(VirtualPath::parse("/home/user"), "notes.txt", content)
    }

    #[test]
    fn appends_lines_and_saves() {
        let mut editor = session("first");
        assert_eq!(editor.handle("second"), EditorAction::Continue(vec![]));
        assert_eq!(editor.handle(""), EditorAction::Continue(vec![]));
        assert_eq!(
            editor.handle(":w"),
            EditorAction::Save("first\nsecond\n".to_string())
        );
    }

    #[test]
    fn trailing_newline_survives_an_unedited_save() {
        let mut editor = session("FILES=40\nBUFFERS=20\n");
        assert_eq!(
            editor.handle(":w"),
            EditorAction::Save("FILES=40\nBUFFERS=20\n".to_string())
        );

        let mut editor = session("one\n");
        editor.handle("two");
        assert_eq!(editor.handle(":w"), EditorAction::Save("one\ntwo\n".to_string()));
    }

    #[test]
    fn deletes_and_prints() {
        let mut editor = session("one\ntwo\n");
        editor.handle(":d");
        editor.handle("three");
        assert_eq!(
            editor.handle(":p"),
            EditorAction::Continue(vec!["  1 one".to_string(), "  2 three".to_string()])
        );
    }

    #[test]
    fn cancel_discards_the_buffer() {
        let mut editor = session("");
        editor.handle("draft");
        assert_eq!(editor.handle(":q  "), EditorAction::Cancel);
    }

    #[test]
    fn banner_lists_the_current_content() {
        let editor = session("a\nb");
        let banner = editor.banner();
        assert!(banner[0].starts_with("Editing notes.txt."));
        assert_eq!(&banner[1..], ["  1 a", "  2 b"]);
    }
}

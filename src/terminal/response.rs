#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Text,
    Directory,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub style: LineStyle,
    pub text: String,
}

/// Everything a single input line produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<OutputLine>,
    pub clear: bool,
    pub exit: bool,
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        let mut response = Self::default();
        response.push_text(text);
        response
    }

    pub fn error(text: impl Into<String>) -> Self {
        let mut response = Self::default();
        response.push_error(text);
        response
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.push(LineStyle::Text, text);
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push(LineStyle::Error, text);
    }

    pub fn push(&mut self, style: LineStyle, text: impl Into<String>) {
        self.lines.push(OutputLine {
            style,
            text: text.into(),
        });
    }

    pub fn extend_text(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.push_text(line);
        }
    }

    /// Plain text of every line, styles dropped.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}

use serde::{Deserialize, Serialize};

/// Byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// 1-based line and column (columns count characters, not bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of `text[index]`, where `text` starts at `self`
    pub fn advance(&self, text: &str, index: usize) -> Position {
        let prefix = &text[..index.min(text.len())];
        match prefix.rfind(['\n', '\r']) {
            Some(last_break) => Position {
                line: self.line + count_line_breaks(prefix),
                column: prefix[last_break + 1..].chars().count() + 1,
            },
            None => Position {
                line: self.line,
                column: self.column + prefix.chars().count(),
            },
        }
    }
}

/// Counts `\n`, `\r\n` and lone `\r` each as one break
pub fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut count = 0;
    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'\n' => count += 1,
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => count += 1,
            _ => {}
        }
    }
    count
}

/// Line terminator used by a stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn detect(source: &str) -> Self {
        if source.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Root stylesheet node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
    /// Whitespace after the last node
    pub after: String,
    pub line_ending: LineEnding,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            after: String::new(),
            line_ending: LineEnding::default(),
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

/// Any statement that can appear in a stylesheet or block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Rule(rule) => rule.span,
            Node::AtRule(at_rule) => at_rule.span,
            Node::Declaration(decl) => decl.span,
            Node::Comment(comment) => comment.span,
        }
    }
}

/// Style rule: `selector { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub before: String,
    pub selector: String,
    /// Whitespace between the selector and `{`
    pub between: String,
    pub nodes: Vec<Node>,
    /// Whitespace before the closing `}`
    pub after: String,
    pub span: Span,
    pub position: Position,
}

/// At-rule such as `@media (...) { ... }` or `@use "x";`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRule {
    pub before: String,
    /// Name without the leading `@`
    pub name: String,
    /// Raw text after the name, up to `between`
    pub params: String,
    pub between: String,
    pub block: Option<Block>,
    pub semicolon: bool,
    pub span: Span,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub nodes: Vec<Node>,
    pub after: String,
}

/// Property declaration: `before property between value trailing ;`
///
/// The raw pieces concatenate back to the exact source text of the
/// declaration, so a fixed record can be serialized without reformatting
/// anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Whitespace preceding the declaration (its indentation)
    pub before: String,
    pub property: String,
    /// Everything between the property and the value, colon included
    pub between: String,
    /// Raw value, trailing whitespace removed
    pub value: String,
    /// Whitespace between the value and the terminator
    pub trailing: String,
    pub semicolon: bool,
    pub span: Span,
    /// Location of the first character of `property`
    pub position: Position,
}

impl Declaration {
    /// `property` plus `between`: the text from the declaration start
    /// through the end of the separator
    pub fn prop_with_separator(&self) -> String {
        format!("{}{}", self.property, self.between)
    }

    pub fn is_variable(&self) -> bool {
        self.property.starts_with('$')
    }

    /// New record with a different separator; everything else is kept
    pub fn with_between(&self, between: impl Into<String>) -> Declaration {
        Declaration {
            between: between.into(),
            ..self.clone()
        }
    }
}

/// `/* ... */` or `// ...` comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub before: String,
    /// Raw comment text including delimiters
    pub text: String,
    pub inline: bool,
    pub span: Span,
    pub position: Position,
}

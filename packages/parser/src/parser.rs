use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, Token};
use std::ops::Range;
use tracing::debug;

/// How a statement ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    Block,
    CloseBrace,
    Eof,
}

/// Parser for SCSS stylesheets
///
/// Only statement structure is recognised: rules, at-rules, declarations and
/// comments. Selectors, at-rule params and values are kept as raw text so
/// that every node can be written back out unchanged.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
    line_starts: Vec<usize>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
            pos: 0,
            line_starts: line_starts(source),
        })
    }

    /// Parse a complete stylesheet
    pub fn parse_stylesheet(&mut self) -> ParseResult<Stylesheet> {
        let (nodes, after) = self.parse_nodes(false)?;

        Ok(Stylesheet {
            nodes,
            after,
            line_ending: LineEnding::detect(self.source),
        })
    }

    /// Parse statements until end of input, or until the `}` closing the
    /// current block when `nested` is set (the brace is consumed)
    fn parse_nodes(&mut self, nested: bool) -> ParseResult<(Vec<Node>, String)> {
        let mut nodes = Vec::new();

        loop {
            let before = self.take_before();

            match self.peek() {
                None => {
                    if nested {
                        return Err(ParseError::unexpected_eof(self.source.len(), "'}'"));
                    }
                    return Ok((nodes, before));
                }
                Some((Token::RBrace, range)) => {
                    if !nested {
                        return Err(ParseError::unexpected_token(range.start, "statement", "'}'"));
                    }
                    self.pos += 1;
                    return Ok((nodes, before));
                }
                Some((token, _)) if token.is_comment() => {
                    nodes.push(Node::Comment(self.parse_comment(before)));
                }
                Some(_) => {
                    nodes.push(self.parse_statement(before)?);
                }
            }
        }
    }

    /// Whitespace and stray semicolons preceding the next node
    fn take_before(&mut self) -> String {
        let start = self.current_offset();
        while let Some((Token::Whitespace | Token::Semicolon, _)) = self.peek() {
            self.pos += 1;
        }
        self.source[start..self.current_offset()].to_string()
    }

    fn parse_comment(&mut self, before: String) -> Comment {
        let (token, range) = self.tokens[self.pos].clone();
        self.pos += 1;

        Comment {
            before,
            text: self.source[range.clone()].to_string(),
            inline: token == Token::LineComment,
            span: Span::new(range.start, range.end),
            position: self.position_at(range.start),
        }
    }

    fn parse_statement(&mut self, before: String) -> ParseResult<Node> {
        let first = self.pos;
        let start = self.current_offset();
        let mut paren_depth = 0usize;
        let mut interpolation_depth = 0usize;

        let terminator = loop {
            let Some((token, _)) = self.peek() else {
                break Terminator::Eof;
            };

            match token {
                Token::LParen => paren_depth += 1,
                Token::RParen => paren_depth = paren_depth.saturating_sub(1),
                Token::InterpolationStart => interpolation_depth += 1,
                Token::LBrace if interpolation_depth > 0 => interpolation_depth += 1,
                Token::RBrace if interpolation_depth > 0 => interpolation_depth -= 1,
                Token::Semicolon if paren_depth == 0 => break Terminator::Semicolon,
                Token::LBrace if paren_depth == 0 => break Terminator::Block,
                Token::RBrace if paren_depth == 0 => break Terminator::CloseBrace,
                _ => {}
            }

            self.pos += 1;
        };

        if terminator == Terminator::Eof && (paren_depth > 0 || interpolation_depth > 0) {
            return Err(ParseError::invalid_syntax(start, "Unclosed bracket"));
        }

        let statement = first..self.pos;

        if self.tokens[first].0 == Token::AtWord {
            return self.finish_at_rule(before, statement, terminator).map(Node::AtRule);
        }

        if terminator == Terminator::Block {
            return self.finish_rule(before, statement).map(Node::Rule);
        }

        self.finish_declaration(before, statement, terminator)
            .map(Node::Declaration)
    }

    fn finish_rule(&mut self, before: String, statement: Range<usize>) -> ParseResult<Rule> {
        let start = self.token_start(statement.start);
        let header = &self.source[start..self.current_offset()];
        let selector = header.trim_end().to_string();
        let between = header[selector.len()..].to_string();

        self.pos += 1; // consume '{'
        let (nodes, after) = self.parse_nodes(true)?;

        Ok(Rule {
            before,
            selector,
            between,
            nodes,
            after,
            span: Span::new(start, self.previous_end()),
            position: self.position_at(start),
        })
    }

    fn finish_at_rule(
        &mut self,
        before: String,
        statement: Range<usize>,
        terminator: Terminator,
    ) -> ParseResult<AtRule> {
        let name_range = self.tokens[statement.start].1.clone();
        let start = name_range.start;
        let rest = &self.source[name_range.end..self.current_offset()];
        let params = rest.trim_end().to_string();
        let between = rest[params.len()..].to_string();

        let mut semicolon = false;
        let block = match terminator {
            Terminator::Block => {
                self.pos += 1; // consume '{'
                let (nodes, after) = self.parse_nodes(true)?;
                Some(Block { nodes, after })
            }
            Terminator::Semicolon => {
                self.pos += 1;
                semicolon = true;
                None
            }
            Terminator::CloseBrace | Terminator::Eof => None,
        };

        Ok(AtRule {
            before,
            name: self.source[start + 1..name_range.end].to_string(),
            params,
            between,
            block,
            semicolon,
            span: Span::new(start, self.previous_end().max(name_range.end)),
            position: self.position_at(start),
        })
    }

    fn finish_declaration(
        &mut self,
        before: String,
        statement: Range<usize>,
        terminator: Terminator,
    ) -> ParseResult<Declaration> {
        let start = self.token_start(statement.start);
        let end = self.current_offset();

        let colon = self.separator_colon(statement.clone()).ok_or_else(|| {
            let word = self.source[start..end].split_whitespace().next().unwrap_or("");
            ParseError::invalid_syntax(start, format!("Unknown word '{}'", word))
        })?;

        // The property stops at its last significant token; whitespace and
        // comments before the colon belong to the separator.
        let prop_end = (statement.start..colon)
            .rev()
            .find(|&i| !self.tokens[i].0.is_trivia())
            .map(|i| self.tokens[i].1.end)
            .unwrap_or(start);

        let value_start = (colon + 1..statement.end)
            .find(|&i| !self.tokens[i].0.is_trivia())
            .map(|i| self.tokens[i].1.start)
            .unwrap_or(end);

        let value_end = (colon + 1..statement.end)
            .rev()
            .find(|&i| self.tokens[i].0 != Token::Whitespace)
            .map(|i| self.tokens[i].1.end)
            .filter(|&offset| offset > value_start)
            .unwrap_or(value_start);

        let semicolon = terminator == Terminator::Semicolon;
        if semicolon {
            self.pos += 1;
        }

        Ok(Declaration {
            before,
            property: self.source[start..prop_end].to_string(),
            between: self.source[prop_end..value_start].to_string(),
            value: self.source[value_start..value_end].to_string(),
            trailing: self.source[value_end..end].to_string(),
            semicolon,
            span: Span::new(start, if semicolon { end + 1 } else { end }),
            position: self.position_at(start),
        })
    }

    /// First ':' of the statement outside parentheses and interpolation
    fn separator_colon(&self, statement: Range<usize>) -> Option<usize> {
        let mut paren_depth = 0usize;
        let mut interpolation_depth = 0usize;

        for i in statement {
            match self.tokens[i].0 {
                Token::LParen => paren_depth += 1,
                Token::RParen => paren_depth = paren_depth.saturating_sub(1),
                Token::InterpolationStart | Token::LBrace => interpolation_depth += 1,
                Token::RBrace => interpolation_depth = interpolation_depth.saturating_sub(1),
                Token::Colon if paren_depth == 0 && interpolation_depth == 0 => return Some(i),
                _ => {}
            }
        }

        None
    }

    fn peek(&self) -> Option<(Token, Range<usize>)> {
        self.tokens.get(self.pos).cloned()
    }

    fn current_offset(&self) -> usize {
        self.token_start(self.pos)
    }

    fn token_start(&self, index: usize) -> usize {
        self.tokens
            .get(index)
            .map(|(_, range)| range.start)
            .unwrap_or(self.source.len())
    }

    fn previous_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|(_, range)| range.end)
            .unwrap_or(0)
    }

    fn position_at(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        Position::new(line, self.source[line_start..offset].chars().count() + 1)
    }
}

/// Byte offsets where each line begins
fn line_starts(source: &str) -> Vec<usize> {
    let bytes = source.as_bytes();
    let mut starts = vec![0];

    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'\n' => starts.push(i + 1),
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
            _ => {}
        }
    }

    starts
}

/// Parse SCSS source into a stylesheet
pub fn parse(source: &str) -> ParseResult<Stylesheet> {
    let mut parser = Parser::new(source)?;
    let stylesheet = parser.parse_stylesheet()?;
    debug!(
        nodes = stylesheet.nodes.len(),
        bytes = source.len(),
        "parsed stylesheet"
    );
    Ok(stylesheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn first_declaration(sheet: &Stylesheet) -> &Declaration {
        fn find(nodes: &[Node]) -> Option<&Declaration> {
            nodes.iter().find_map(|node| match node {
                Node::Declaration(decl) => Some(decl),
                Node::Rule(rule) => find(&rule.nodes),
                Node::AtRule(at_rule) => at_rule.block.as_ref().and_then(|b| find(&b.nodes)),
                Node::Comment(_) => None,
            })
        }
        find(&sheet.nodes).expect("no declaration")
    }

    #[test]
    fn test_declaration_in_rule() {
        let sheet = parse("a { $var1 :100px; }").unwrap();
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected rule");
        };
        assert_eq!(rule.selector, "a");
        assert_eq!(rule.between, " ");
        assert_eq!(rule.after, " ");

        let decl = first_declaration(&sheet);
        assert_eq!(decl.before, " ");
        assert_eq!(decl.property, "$var1");
        assert_eq!(decl.between, " :");
        assert_eq!(decl.value, "100px");
        assert!(decl.semicolon);
        assert_eq!(decl.position, Position::new(1, 5));
        assert_eq!(decl.span, Span::new(4, 17));
    }

    #[test]
    fn test_separator_with_newlines() {
        let sheet = parse("a { $var1\n:\n100px }").unwrap();
        let decl = first_declaration(&sheet);
        assert_eq!(decl.property, "$var1");
        assert_eq!(decl.between, "\n:\n");
        assert_eq!(decl.value, "100px");
        assert_eq!(decl.trailing, " ");
        assert!(!decl.semicolon);
    }

    #[test]
    fn test_comment_before_colon_is_separator() {
        let sheet = parse("$a /* x: y */ : 1;").unwrap();
        let decl = first_declaration(&sheet);
        assert_eq!(decl.property, "$a");
        assert_eq!(decl.between, " /* x: y */ : ");
        assert_eq!(decl.value, "1");
    }

    #[test]
    fn test_root_level_map_value() {
        let source = "\n      $map: (\n        foo: 1,\n        bar: 2,\n      );\n      ";
        let sheet = parse(source).unwrap();
        let decl = first_declaration(&sheet);
        assert_eq!(decl.before, "\n      ");
        assert_eq!(decl.property, "$map");
        assert_eq!(decl.between, ": ");
        assert_eq!(decl.value, "(\n        foo: 1,\n        bar: 2,\n      )");
        assert_eq!(decl.position, Position::new(2, 7));
        assert_eq!(sheet.after, "\n      ");
    }

    #[test]
    fn test_url_value_with_semicolon() {
        let sheet = parse("$background:\n  url(data:application/font-woff;...);").unwrap();
        let decl = first_declaration(&sheet);
        assert_eq!(decl.between, ":\n  ");
        assert_eq!(decl.value, "url(data:application/font-woff;...)");
    }

    #[test]
    fn test_interpolated_property() {
        let sheet = parse("a { #{$side}-margin: 1px; }").unwrap();
        let decl = first_declaration(&sheet);
        assert_eq!(decl.property, "#{$side}-margin");
        assert_eq!(decl.value, "1px");
    }

    #[test]
    fn test_at_rules() {
        let sheet = parse("@use \"sass:math\";\n@media (min-width: 10px) {\n  $x: 1;\n}").unwrap();
        let Node::AtRule(use_rule) = &sheet.nodes[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(use_rule.name, "use");
        assert_eq!(use_rule.params, " \"sass:math\"");
        assert!(use_rule.semicolon);
        assert!(use_rule.block.is_none());

        let Node::AtRule(media) = &sheet.nodes[1] else {
            panic!("expected at-rule");
        };
        assert_eq!(media.name, "media");
        assert_eq!(media.params, " (min-width: 10px)");
        assert_eq!(media.block.as_ref().map(|b| b.nodes.len()), Some(1));
        assert_eq!(first_declaration(&sheet).position, Position::new(3, 3));
    }

    #[test]
    fn test_comments_are_nodes() {
        let sheet = parse("// note\n/* block */\n$a: 1;").unwrap();
        assert!(matches!(&sheet.nodes[0], Node::Comment(c) if c.inline));
        assert!(matches!(&sheet.nodes[1], Node::Comment(c) if !c.inline && c.before == "\n"));
        assert!(matches!(&sheet.nodes[2], Node::Declaration(_)));
    }

    #[test]
    fn test_crlf_positions() {
        let sheet = parse("a {\r\n  $x: 1;\r\n}").unwrap();
        assert_eq!(sheet.line_ending, LineEnding::CrLf);
        assert_eq!(first_declaration(&sheet).position, Position::new(2, 3));
    }

    #[test]
    fn test_unknown_word() {
        let err = parse("a { color }").unwrap_err();
        assert!(matches!(err, ParseError::InvalidSyntax { pos: 4, .. }));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("a { $x: 1;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_unexpected_close_brace() {
        let err = parse("$x: 1; }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { pos: 7, .. }));
    }
}

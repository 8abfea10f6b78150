use crate::ast::*;

/// Serializer converts a stylesheet back to source text
///
/// Every node keeps its raw text (leading whitespace, separators, trailing
/// whitespace), so a parsed stylesheet round-trips byte for byte. A node
/// replaced by a fixed copy is written with its new raws and nothing else
/// moves.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Serialize a stylesheet to source text
    pub fn serialize(mut self, stylesheet: &Stylesheet) -> String {
        self.write_nodes(&stylesheet.nodes);
        self.output.push_str(&stylesheet.after);
        self.output
    }

    fn write_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Rule(rule) => self.write_rule(rule),
                Node::AtRule(at_rule) => self.write_at_rule(at_rule),
                Node::Declaration(decl) => self.write_declaration(decl),
                Node::Comment(comment) => {
                    self.output.push_str(&comment.before);
                    self.output.push_str(&comment.text);
                }
            }
        }
    }

    fn write_rule(&mut self, rule: &Rule) {
        self.output.push_str(&rule.before);
        self.output.push_str(&rule.selector);
        self.output.push_str(&rule.between);
        self.write_block(&rule.nodes, &rule.after);
    }

    fn write_at_rule(&mut self, at_rule: &AtRule) {
        self.output.push_str(&at_rule.before);
        self.output.push('@');
        self.output.push_str(&at_rule.name);
        self.output.push_str(&at_rule.params);
        self.output.push_str(&at_rule.between);

        if let Some(block) = &at_rule.block {
            self.write_block(&block.nodes, &block.after);
        } else if at_rule.semicolon {
            self.output.push(';');
        }
    }

    fn write_block(&mut self, nodes: &[Node], after: &str) {
        self.output.push('{');
        self.write_nodes(nodes);
        self.output.push_str(after);
        self.output.push('}');
    }

    fn write_declaration(&mut self, decl: &Declaration) {
        self.output.push_str(&decl.before);
        self.output.push_str(&decl.property);
        self.output.push_str(&decl.between);
        self.output.push_str(&decl.value);
        self.output.push_str(&decl.trailing);
        if decl.semicolon {
            self.output.push(';');
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to serialize a stylesheet
pub fn serialize(stylesheet: &Stylesheet) -> String {
    Serializer::new().serialize(stylesheet)
}

use sassline_parser::ast::*;

/// Visitor pattern for traversing stylesheet nodes immutably
///
/// This trait provides default implementations that walk the entire tree in
/// document order. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_stylesheet(&mut self, stylesheet: &Stylesheet) {
        walk_stylesheet(self, stylesheet);
    }

    fn visit_rule(&mut self, rule: &Rule) {
        walk_nodes(self, &rule.nodes);
    }

    fn visit_at_rule(&mut self, at_rule: &AtRule) {
        if let Some(block) = &at_rule.block {
            walk_nodes(self, &block.nodes);
        }
    }

    fn visit_declaration(&mut self, _decl: &Declaration) {
        // Leaf node, no children to walk
    }

    fn visit_comment(&mut self, _comment: &Comment) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor pattern for transforming stylesheet nodes
///
/// Similar to Visitor, but provides mutable access to nodes. Callers that
/// must not disturb a shared tree run it over a clone.
pub trait VisitorMut: Sized {
    fn visit_stylesheet_mut(&mut self, stylesheet: &mut Stylesheet) {
        walk_stylesheet_mut(self, stylesheet);
    }

    fn visit_rule_mut(&mut self, rule: &mut Rule) {
        walk_nodes_mut(self, &mut rule.nodes);
    }

    fn visit_at_rule_mut(&mut self, at_rule: &mut AtRule) {
        if let Some(block) = &mut at_rule.block {
            walk_nodes_mut(self, &mut block.nodes);
        }
    }

    fn visit_declaration_mut(&mut self, _decl: &mut Declaration) {
        // Leaf node, no children to walk
    }

    fn visit_comment_mut(&mut self, _comment: &mut Comment) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations for immutable visitor

pub fn walk_stylesheet<V: Visitor>(visitor: &mut V, stylesheet: &Stylesheet) {
    walk_nodes(visitor, &stylesheet.nodes);
}

pub fn walk_nodes<V: Visitor>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Rule(rule) => visitor.visit_rule(rule),
            Node::AtRule(at_rule) => visitor.visit_at_rule(at_rule),
            Node::Declaration(decl) => visitor.visit_declaration(decl),
            Node::Comment(comment) => visitor.visit_comment(comment),
        }
    }
}

// Default walk implementations for mutable visitor

pub fn walk_stylesheet_mut<V: VisitorMut>(visitor: &mut V, stylesheet: &mut Stylesheet) {
    walk_nodes_mut(visitor, &mut stylesheet.nodes);
}

pub fn walk_nodes_mut<V: VisitorMut>(visitor: &mut V, nodes: &mut [Node]) {
    for node in nodes {
        match node {
            Node::Rule(rule) => visitor.visit_rule_mut(rule),
            Node::AtRule(at_rule) => visitor.visit_at_rule_mut(at_rule),
            Node::Declaration(decl) => visitor.visit_declaration_mut(decl),
            Node::Comment(comment) => visitor.visit_comment_mut(comment),
        }
    }
}

/// Call `f` for every declaration in document order
pub fn walk_declarations<F: FnMut(&Declaration)>(stylesheet: &Stylesheet, f: F) {
    struct Walker<F>(F);

    impl<F: FnMut(&Declaration)> Visitor for Walker<F> {
        fn visit_declaration(&mut self, decl: &Declaration) {
            (self.0)(decl);
        }
    }

    Walker(f).visit_stylesheet(stylesheet);
}

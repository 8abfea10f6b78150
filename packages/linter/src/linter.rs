use crate::diagnostic::Diagnostic;
use crate::rules::{LintRule, RuleRegistry};
use sassline_common::{walk_declarations, CommonResult, VisitorMut};
use sassline_parser::ast::{Declaration, LineEnding, Stylesheet};
use sassline_parser::{parse, serialize};
use tracing::{debug, instrument};

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,

    /// Rewrite violations instead of reporting them
    pub fix: bool,
}

/// Result of linting one stylesheet
#[derive(Debug, Clone)]
pub struct LintReport {
    /// Violations found; when fixing, only those no rule could fix
    pub diagnostics: Vec<Diagnostic>,

    /// Fixed copy of the stylesheet (fix mode only)
    pub fixed: Option<Stylesheet>,

    /// Number of declarations rewritten
    pub fixes: usize,
}

impl LintReport {
    /// Serialized fixed stylesheet, if any
    pub fn fixed_source(&self) -> Option<String> {
        self.fixed.as_ref().map(serialize)
    }
}

/// Lint a stylesheet and return diagnostics, or a fixed copy in fix mode.
///
/// Declarations are visited in document order and each is handled on its
/// own; a violation never stops the walk.
#[instrument(skip_all, fields(fix = options.fix))]
pub fn lint_stylesheet(stylesheet: &Stylesheet, options: LintOptions) -> LintReport {
    let registry = options.registry.unwrap_or_default();

    if options.fix {
        let mut fixer = Fixer {
            rules: registry.rules(),
            line_ending: stylesheet.line_ending,
            diagnostics: Vec::new(),
            fixes: 0,
        };
        let mut fixed = stylesheet.clone();
        fixer.visit_stylesheet_mut(&mut fixed);
        debug!(fixes = fixer.fixes, unfixed = fixer.diagnostics.len(), "fixed stylesheet");

        return LintReport {
            diagnostics: fixer.diagnostics,
            fixed: Some(fixed),
            fixes: fixer.fixes,
        };
    }

    let mut diagnostics = Vec::new();
    walk_declarations(stylesheet, |decl| {
        for rule in registry.rules() {
            diagnostics.extend(rule.check_declaration(decl));
        }
    });
    debug!(diagnostics = diagnostics.len(), "linted stylesheet");

    LintReport {
        diagnostics,
        fixed: None,
        fixes: 0,
    }
}

/// Parse and lint SCSS source
pub fn lint_source(source: &str, options: LintOptions) -> CommonResult<LintReport> {
    let stylesheet = parse(source)?;
    Ok(lint_stylesheet(&stylesheet, options))
}

/// Replaces each violating declaration with the fixed copy its rule returns
struct Fixer<'a> {
    rules: &'a [Box<dyn LintRule>],
    line_ending: LineEnding,
    diagnostics: Vec<Diagnostic>,
    fixes: usize,
}

impl VisitorMut for Fixer<'_> {
    fn visit_declaration_mut(&mut self, decl: &mut Declaration) {
        for rule in self.rules {
            let found = rule.check_declaration(decl);
            if found.is_empty() {
                continue;
            }

            match rule.fix_declaration(decl, self.line_ending) {
                Some(fixed) => {
                    *decl = fixed;
                    self.fixes += 1;
                }
                None => self.diagnostics.extend(found),
            }
        }
    }
}

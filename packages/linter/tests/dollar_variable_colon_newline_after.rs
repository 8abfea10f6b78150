use pretty_assertions::assert_eq;
use sassline_common::walk_declarations;
use sassline_linter::rules::dollar_variable_colon_newline_after::{
    expected_after, expected_after_multi_line,
};
use sassline_linter::{check_stylesheet, Diagnostic};
use sassline_parser::{parse, serialize};

struct Reject {
    code: &'static str,
    message: String,
    line: usize,
    column: usize,
}

fn check(code: &str, option: &str) -> Vec<Diagnostic> {
    let stylesheet = parse(code).unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", code, e));
    check_stylesheet(&stylesheet, option, false).unwrap().diagnostics
}

fn fix(code: &str, option: &str) -> String {
    let stylesheet = parse(code).unwrap();
    let outcome = check_stylesheet(&stylesheet, option, true).unwrap();
    serialize(&outcome.fixed.unwrap())
}

fn values(code: &str) -> Vec<String> {
    let stylesheet = parse(code).unwrap();
    let mut values = Vec::new();
    walk_declarations(&stylesheet, |decl| values.push(decl.value.clone()));
    values
}

fn assert_accepts(option: &str, codes: &[&str]) {
    for code in codes {
        let diagnostics = check(code, option);
        assert!(diagnostics.is_empty(), "{:?} should be accepted, got {:?}", code, diagnostics);
        assert_eq!(fix(code, option), *code, "fixing {:?} should change nothing", code);
    }
}

fn assert_rejects(option: &str, rejects: &[Reject]) {
    for reject in rejects {
        let diagnostics = check(reject.code, option);
        assert_eq!(diagnostics.len(), 1, "{:?} should have one violation", reject.code);
        assert_eq!(diagnostics[0].message, reject.message, "{:?}", reject.code);
        assert_eq!(
            (diagnostics[0].position.line, diagnostics[0].position.column),
            (reject.line, reject.column),
            "{:?}",
            reject.code
        );

        let fixed = fix(reject.code, option);
        assert!(check(&fixed, option).is_empty(), "fix of {:?} still violates: {:?}", reject.code, fixed);
        assert_eq!(values(&fixed), values(reject.code), "fix of {:?} changed a value", reject.code);
    }
}

fn reject(code: &'static str, message: String, line: usize, column: usize) -> Reject {
    Reject {
        code,
        message,
        line,
        column,
    }
}

#[test]
fn test_always_accepts() {
    assert_accepts(
        "always",
        &[
            "a {\n      $var1:\n        100px;\n    }",
            "a { $var1 :\n100px }",
            "a { $var1\n:\n100px }",
            "a { $var1\r\n:\r\n100px }",
            "a { $var1\n:\n(100px) }",
            "a { $var1\r\n:\r\n(100px) }",
            "a { width: 100px; }",
            "$background:\n  url(data:application/font-woff;...);",
            "\n      $map: (\n        foo: 1,\n        bar: 2,\n      );\n      ",
            "\n      $var: (\n        1 +\n        2 +\n        3\n      );\n      ",
            "$var1: \t\n  100px;",
            "$a /* x: y */ :\n  1;",
        ],
    );
}

#[test]
fn test_always_rejects() {
    assert_rejects(
        "always",
        &[
            reject("a { $var1 :100px; }", expected_after(), 1, 11),
            reject("a { $var1 :  100px; }", expected_after(), 1, 11),
            reject("a { $var1 :\\t100px; }", expected_after(), 1, 11),
            reject("a { $var1 :\t100px; }", expected_after(), 1, 11),
            reject("a { $var1 : 100px; }", expected_after(), 1, 11),
            reject("$var1 :100px;", expected_after(), 1, 7),
            reject("$var1 :  100px;", expected_after(), 1, 7),
            reject("$var1 :\\t100px;", expected_after(), 1, 7),
            reject("$var1 : 100px;", expected_after(), 1, 7),
            reject("$var1 : (100px);", expected_after(), 1, 7),
            reject("a {\n  $var1\n  : 100px;\n}", expected_after(), 3, 3),
            reject("$a /* x: y */ : 1;", expected_after(), 1, 15),
        ],
    );
}

#[test]
fn test_always_multi_line_accepts() {
    assert_accepts(
        "always-multi-line",
        &[
            "a {\n  $var1: 100px\n}",
            "  $box-shadow:\n    0 0 0 1px #5b9dd9,\n    0 0 2px 1px rgba(30, 140, 190, 0.8);",
            "a { $var1:100px }",
            "a { $var1: (100px) }",
            "a { $var1 :\t100px }",
            "a { $var1\n: 100px }",
            "a { $var1\r\n:  100px }",
            "  $box-shadow:\n    0 0 0 1px #5b9dd9, 0 0 2px 1px rgba(30, 140, 190, 0.8);",
            "a {\n  box-shadow: 0 0 0 1px #5b9dd9,\n 0 0 2px 1px rgb(30, 140, 190); }",
            "\n      $map:\n(\n        foo: 1,\n        bar: 2,\n      );\n      ",
            "\n      $var:\r\n(\n        1 +\n        2 +\n        3\n      );\n      ",
            "\n      $map: (\n        foo: 1,\n        bar: 2,\n      );\n      ",
            "\n      $var: (\n        1 +\n        2 +\n        3\n      );\n      ",
            "\n      $foo: 1;\n\n      $foo:\n        2,\n        3;\n\n      $foo: (\n        bar: 1,\n        qux: 2,\n      );\n      ",
        ],
    );
}

#[test]
fn test_always_multi_line_rejects() {
    assert_rejects(
        "always-multi-line",
        &[
            reject(
                "  $box-shadow: 0 0 0 1px #5b9dd9,\n    0 0 2px 1px rgba(30, 140, 190, 0.8);",
                expected_after_multi_line(),
                1,
                14,
            ),
            reject(
                "  $box-shadow:0 0 0 1px #5b9dd9,\n    0 0 2px 1px rgba(30, 140, 190, 0.8);",
                expected_after_multi_line(),
                1,
                14,
            ),
            reject(
                "$list: 1px\n  2px;",
                expected_after_multi_line(),
                1,
                6,
            ),
        ],
    );
}

#[test]
fn test_violations_do_not_stop_the_walk() {
    let code = "$a : 1;\n.b {\n  $c : 2;\n  @media print {\n    $d :3;\n  }\n}\n$e:\n  4;";
    let positions: Vec<_> = check(code, "always")
        .iter()
        .map(|d| (d.position.line, d.position.column))
        .collect();
    assert_eq!(positions, vec![(1, 4), (3, 6), (5, 8)]);
}

#[test]
fn test_fix_output() {
    assert_eq!(
        fix("a {\n  $var1 : 100px;\n  $var2: 1px;\n}", "always"),
        "a {\n  $var1 :\n  100px;\n  $var2:\n  1px;\n}"
    );
    assert_eq!(
        fix("$shadow: 0 0 0 1px #000,\n  1px 2px 3px #111;", "always-multi-line"),
        "$shadow:\n  0 0 0 1px #000,\n  1px 2px 3px #111;"
    );
}

#[test]
fn test_invalid_option() {
    let stylesheet = parse("$a : 1;").unwrap();
    assert!(check_stylesheet(&stylesheet, "always-single-line", false).is_err());
    assert!(check_stylesheet(&stylesheet, "", true).is_err());
}

#[test]
fn test_quoted_url_values_are_checked() {
    let icon = "$navbar-light-toggler-icon-bg: url(\"data:image/svg+xml,%3csvg stroke='rgba(0, 0, 0, 0.5)'%3e%3c/svg%3e\");";
    assert_rejects("always", &[reject(icon, expected_after(), 1, 30)]);
    assert_accepts("always-multi-line", &[icon]);
    assert_eq!(
        fix(icon, "always"),
        "$navbar-light-toggler-icon-bg:\nurl(\"data:image/svg+xml,%3csvg stroke='rgba(0, 0, 0, 0.5)'%3e%3c/svg%3e\");"
    );
}

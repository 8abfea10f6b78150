use pretty_assertions::assert_eq;
use sassline_parser::ast::Node;
use sassline_parser::{parse, serialize};

fn assert_roundtrip(source: &str) {
    let stylesheet = parse(source).unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", source, e));
    assert_eq!(serialize(&stylesheet), source);
}

#[test]
fn test_roundtrip_variables() {
    assert_roundtrip("$var1 :100px;");
    assert_roundtrip("a { $var1 :  100px; }");
    assert_roundtrip("a { $var1\r\n:\r\n(100px) }");
    assert_roundtrip("  $box-shadow: 0 0 0 1px #5b9dd9,\n    0 0 2px 1px rgba(30, 140, 190, 0.8);");
}

#[test]
fn test_roundtrip_maps_and_mixed_statements() {
    assert_roundtrip(
        r#"
      $foo: 1;

      $foo:
        2,
        3;

      $foo: (
        bar: 1,
        qux: 2,
      );
      "#,
    );
}

#[test]
fn test_roundtrip_nested_rules_and_at_rules() {
    assert_roundtrip(
        r#"@use "sass:math";

// Spacing scale
$base: 4px !default;

.card {
  /* padding: ignored */
  padding: math.div($base, 2);

  &:hover { color: red }

  @media (min-width: 600px) {
    $wide: 10px;
    margin: $wide;
  }

  @include shadow($base);;
}
"#,
    );
}

#[test]
fn test_roundtrip_interpolation_and_urls() {
    assert_roundtrip("a { #{$prop}-top: 1px; background: url(http://x.test/a;b.png) }");
    assert_roundtrip("@media #{$query} { a { b: c } }");
}

#[test]
fn test_stray_semicolons_are_kept() {
    let source = "a { b: c; };\n$x: 1;";
    let stylesheet = parse(source).unwrap();
    let Node::Declaration(decl) = &stylesheet.nodes[1] else {
        panic!("expected declaration");
    };
    assert_eq!(decl.before, ";\n");
    assert_eq!(serialize(&stylesheet), source);
}

#[test]
fn test_roundtrip_quoted_urls_with_parens() {
    assert_roundtrip(
        "$navbar-light-toggler-icon-bg: url(\"data:image/svg+xml,%3csvg stroke='rgba(0, 0, 0, 0.5)'%3e%3c/svg%3e\");",
    );
    assert_roundtrip("$a: url('x(1).png');\n.b { background: url( \"c(2).png\" ) no-repeat; }");
}

//! End-to-end scenarios (§8 S1-S6).

use msc_tac::render_listing;

fn tac_listing(source: &str) -> String {
    let output = msc_driver::compile(source).expect("expected successful compilation");
    render_listing(&output.tac)
}

#[test]
fn s1_declaration_and_print() {
    assert_eq!(tac_listing("var x = 10; print x;"), "  0: ASSIGN 10 x\n  1: PRINT x");
}

#[test]
fn s2_arithmetic_expression() {
    let listing = tac_listing("var x = 5; var y = 10; var z = x + y * 2;");
    assert!(listing.contains("= y * 2"));
    assert!(listing.contains("= x + t"));
    assert!(listing.trim_end().ends_with('z'));
}

#[test]
fn s3_if_else() {
    let listing = tac_listing("var x = 1; if (x == 1) { print 1; } else { print 2; }");
    for fragment in ["= x == 1", "IF_FALSE", "PRINT 1", "GOTO", "LABEL", "PRINT 2"] {
        assert!(listing.contains(fragment), "missing {fragment:?} in:\n{listing}");
    }
}

#[test]
fn s4_while_loop() {
    let listing = tac_listing("var i = 0; while (i < 10) { i = i + 1; }");
    for fragment in ["LABEL", "= i < 10", "IF_FALSE", "= i + 1", "ASSIGN", "GOTO"] {
        assert!(listing.contains(fragment), "missing {fragment:?} in:\n{listing}");
    }
}

#[test]
fn s5_function_declaration() {
    let listing = tac_listing("func add(a, b) { return a + b; }");
    for fragment in ["FUNCTION add", "PARAM a", "PARAM b", "= a + b", "RETURN"] {
        assert!(listing.contains(fragment), "missing {fragment:?} in:\n{listing}");
    }
}

#[test]
fn s6_undeclared_use_fails_compilation() {
    let err = msc_driver::compile("print y;").unwrap_err();
    assert!(matches!(err, msc_util::PipelineError::SemaFailed(_)));
}

#[test]
fn empty_source_compiles_to_nothing() {
    let output = msc_driver::compile("").expect("empty source should succeed");
    assert!(output.tac.is_empty());
    assert!(output.ast.statements.is_empty());
}

#[test]
fn unterminated_string_is_a_lexical_failure() {
    let err = msc_driver::compile("print \"abc;").unwrap_err();
    assert!(matches!(err, msc_util::PipelineError::LexFailed(_)));
}

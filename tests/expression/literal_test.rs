//! リテラルのテスト

use super::*;
use cppgen::expr::string_literal_type;
use cppgen::{DependencyContributor, Literal, Precedence, PrimitiveType, StringLiteral};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_case::test_case;

#[test]
fn test_string_literal_is_quoted_verbatim() {
    let expr = Expression::string("hi");
    assert_eq!(render(&expr), "\"hi\"");
}

#[test]
fn test_string_literal_payload_is_not_escaped() {
    // エスケープは呼び出し側の責任
    let expr = Expression::string("a\\n");
    assert_eq!(render(&expr), "\"a\\n\"");
}

#[test]
fn test_string_literals_share_one_type() {
    let a = Expression::string("a");
    let b = Expression::from(StringLiteral::new("b"));

    assert!(Arc::ptr_eq(a.ty(), b.ty()));
    assert!(Arc::ptr_eq(a.ty(), string_literal_type()));
}

#[test]
fn test_string_literal_type_is_const_pointer_to_const_char() {
    let mut fmt = CppFormatter::new();
    assert!(string_literal_type().write(&mut fmt));
    assert_eq!(fmt.as_str(), "const char * const");
    assert_eq!(
        **string_literal_type(),
        PrimitiveType::Char.ty().const_().const_ptr()
    );
}

#[test_case(Literal::int(42), "42" ; "int")]
#[test_case(Literal::int(-3), "-3" ; "negative int")]
#[test_case(Literal::unsigned(7), "7U" ; "unsigned")]
#[test_case(Literal::bool_(true), "true" ; "bool")]
#[test_case(Literal::char_('c'), "'c'" ; "char")]
#[test_case(Literal::float(1.0), "1.0" ; "float")]
#[test_case(Literal::float(f64::NAN), "NAN" ; "not a number")]
#[test_case(Literal::float(f64::INFINITY), "INFINITY" ; "positive infinity")]
#[test_case(Literal::float(f64::NEG_INFINITY), "-INFINITY" ; "negative infinity")]
#[test_case(Literal::null_ptr(), "nullptr" ; "null pointer")]
fn test_literal_rendering(literal: Literal, expected: &str) {
    assert_eq!(render(&Expression::literal(literal)), expected);
}

#[test]
fn test_literal_type_is_fixed_at_construction() {
    let ty = Arc::new(PrimitiveType::Long.ty());
    let expr = Expression::literal(Literal::new(Arc::clone(&ty), "10L"));
    assert!(Arc::ptr_eq(expr.ty(), &ty));
    assert_eq!(render(&expr), "10L");
}

#[test]
fn test_literals_have_no_dependencies() {
    let mut deps = DependencyList::new();
    assert!(Expression::literal(Literal::int(1)).add_dependencies(&mut deps));
    assert!(Expression::string("x").add_dependencies(&mut deps));
    assert!(deps.is_empty());
}

#[test]
fn test_literals_are_primary() {
    assert_eq!(Expression::literal(Literal::int(1)).precedence(), Precedence::Primary);
    assert_eq!(Expression::string("s").precedence(), Precedence::Primary);
}

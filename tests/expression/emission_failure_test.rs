//! 出力失敗時の打ち切りのテスト

use super::*;
use cppgen::{BinaryOp, Literal, PrimitiveType};
use pretty_assertions::assert_eq;

#[test]
fn test_failure_stops_and_keeps_partial_output() {
    let a = variable("a", PrimitiveType::Int.ty());
    let b = variable("b", PrimitiveType::Int.ty());
    let c = variable("c", PrimitiveType::Int.ty());
    let expr = Expression::binary(
        BinaryOp::Add,
        Expression::access(&a),
        Expression::binary(BinaryOp::Multiply, Expression::access(&b), Expression::access(&c)),
    );

    let mut sink = FailingSink::new(2);
    assert!(!expr.write(&mut sink));
    // 途中までの出力は巻き戻されない
    assert_eq!(sink.written, "a + ");
    // 失敗した書き込みの後は何も試行されない
    assert_eq!(sink.attempts, 3);
}

#[test]
fn test_string_literal_stops_after_opening_quote() {
    let expr = Expression::string("hi");
    let mut sink = FailingSink::new(1);
    assert!(!expr.write(&mut sink));
    assert_eq!(sink.written, "\"");
    assert_eq!(sink.attempts, 2);
}

#[test]
fn test_failure_inside_parentheses() {
    let a = variable("a", PrimitiveType::Int.ty());
    let expr = Expression::binary(
        BinaryOp::Multiply,
        Expression::binary(BinaryOp::Add, Expression::access(&a), Expression::literal(Literal::int(1))),
        Expression::literal(Literal::int(2)),
    );

    let mut sink = FailingSink::new(3);
    assert!(!expr.write(&mut sink));
    assert_eq!(sink.written, "(a + ");
    assert_eq!(sink.attempts, 4);
}

#[test]
fn test_enough_budget_succeeds() {
    let a = variable("a", PrimitiveType::Int.ty());
    let expr = Expression::binary(BinaryOp::Add, Expression::access(&a), Expression::literal(Literal::int(1)));

    let mut sink = FailingSink::new(3);
    assert!(expr.write(&mut sink));
    assert_eq!(sink.written, "a + 1");
}

//! 型解決とキャッシュのテスト

use super::*;
use cppgen::{BinaryOp, Literal, PrimitiveType, TypeDecl, TypeDeclKind, UnaryOp};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn type_text(ty: &Type) -> String {
    let mut fmt = CppFormatter::new();
    assert!(ty.write(&mut fmt));
    fmt.into_string()
}

#[test]
fn test_type_is_resolved_lazily_and_once() {
    let a = variable("a", PrimitiveType::Int.ty());
    let b = variable("b", PrimitiveType::Int.ty());
    let expr = Expression::binary(BinaryOp::Lt, Expression::access(&a), Expression::access(&b));

    assert!(!expr.is_type_resolved());
    let first = Arc::clone(expr.ty());
    assert!(expr.is_type_resolved());

    // 比較の型は解決のたびに新しく作られるので、同一性は再計算されていないことを示す
    let second = expr.ty();
    assert!(Arc::ptr_eq(&first, second));
    assert_eq!(**second, PrimitiveType::Bool.ty());
}

#[test]
fn test_emission_does_not_resolve_types() {
    let a = variable("a", PrimitiveType::Int.ty());
    let expr = Expression::unary(UnaryOp::Negate, Expression::access(&a));
    let _ = render(&expr);
    assert!(!expr.is_type_resolved());
}

#[test]
fn test_arithmetic_and_assignment_take_left_type() {
    let a = variable("a", PrimitiveType::Long.ty());
    let b = variable("b", PrimitiveType::Int.ty());

    let sum = Expression::binary(BinaryOp::Add, Expression::access(&a), Expression::access(&b));
    assert!(Arc::ptr_eq(sum.ty(), a.ty()));

    let assign = Expression::binary(BinaryOp::Assign, Expression::access(&b), Expression::access(&a));
    assert!(Arc::ptr_eq(assign.ty(), b.ty()));

    let comma = Expression::binary(BinaryOp::Comma, Expression::access(&b), Expression::access(&a));
    assert!(Arc::ptr_eq(comma.ty(), a.ty()));
}

#[test]
fn test_unary_types() {
    let x = variable("x", PrimitiveType::Int.ty());
    let p = variable("p", PrimitiveType::Char.ty().const_().ptr());

    let addr = Expression::unary(UnaryOp::AddressOf, Expression::access(&x));
    assert_eq!(type_text(addr.ty()), "int *");

    let deref = Expression::unary(UnaryOp::Deref, Expression::access(&p));
    assert_eq!(type_text(deref.ty()), "const char");

    // ポインタでないものの間接参照はオペランドの型のまま
    let bad_deref = Expression::unary(UnaryOp::Deref, Expression::access(&x));
    assert!(Arc::ptr_eq(bad_deref.ty(), x.ty()));

    let not = Expression::unary(UnaryOp::Not, Expression::access(&x));
    assert_eq!(**not.ty(), PrimitiveType::Bool.ty());

    let inc = Expression::unary(UnaryOp::PostIncrement, Expression::access(&x));
    assert!(Arc::ptr_eq(inc.ty(), x.ty()));
}

#[test]
fn test_call_member_cast_and_conditional_types() {
    let point = TypeDecl::new(Name::new("Point"), TypeDeclKind::Struct);
    let x = field("Point::x", PrimitiveType::Double.ty());
    let p = variable("p", Type::named(Arc::clone(&point)).ptr());
    let make = function("make", Type::function(Type::named(Arc::clone(&point)), vec![]));
    let flag = variable("flag", PrimitiveType::Bool.ty());

    let call = Expression::call(&make, vec![]);
    assert_eq!(type_text(call.ty()), "Point");

    let member = Expression::member(Expression::access(&p), &x, true);
    assert!(Arc::ptr_eq(member.ty(), x.ty()));

    let target = Arc::new(PrimitiveType::Int.ty());
    let cast = Expression::cast(Arc::clone(&target), Expression::access(&flag));
    assert!(Arc::ptr_eq(cast.ty(), &target));

    let cond = Expression::conditional(
        Expression::access(&flag),
        Expression::access(&p),
        Expression::literal(Literal::null_ptr()),
    );
    assert!(Arc::ptr_eq(cond.ty(), p.ty()));
}

#[test]
fn test_calling_a_non_function_keeps_declared_type() {
    let not_fn = variable("value", PrimitiveType::Int.ty());
    let call = Expression::call(&not_fn, vec![]);
    assert!(Arc::ptr_eq(call.ty(), not_fn.ty()));
}

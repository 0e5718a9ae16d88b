//! 複合式の依存関係のテスト

use super::*;
use cppgen::{BinaryOp, DependencyContributor, DependencyKind, PrimitiveType, TypeDecl, TypeDeclKind, UnaryOp};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn labels(deps: &DependencyList<'_>) -> Vec<String> {
    deps.iter().map(|d| d.to_string()).collect()
}

#[test]
fn test_dependencies_follow_pre_order() {
    let widget = TypeDecl::new(Name::new("Widget"), TypeDeclKind::Class);
    let a = variable("a", PrimitiveType::Int.ty());
    let w = variable("w", Type::named(Arc::clone(&widget)));
    let b = variable("app::b", PrimitiveType::Int.ty());

    let expr = Expression::binary(
        BinaryOp::Add,
        Expression::access(&a),
        Expression::binary(BinaryOp::Multiply, Expression::access(&w), Expression::access(&b)),
    );
    let mut deps = DependencyList::new();
    assert!(expr.add_dependencies(&mut deps));
    assert_eq!(
        labels(&deps),
        vec![
            "element a".to_string(),
            "element w".to_string(),
            "type Widget (definition)".to_string(),
            "element app::b".to_string(),
        ]
    );
}

#[test]
fn test_failure_stops_traversal() {
    let a = variable("a", PrimitiveType::Int.ty());
    let b = variable("b", PrimitiveType::Int.ty());
    let c = variable("c", PrimitiveType::Int.ty());

    let expr = Expression::binary(
        BinaryOp::Add,
        Expression::binary(BinaryOp::Add, Expression::access(&a), Expression::access(&b)),
        Expression::access(&c),
    );
    let mut registry = RecordingRegistry::rejecting("b");
    assert!(!expr.add_dependencies(&mut registry));

    // 失敗の前に登録されたものは残り、以降は訪れない
    assert_eq!(registry.attempts, vec!["element a".to_string(), "element b".to_string()]);
    assert!(registry.inner.contains_element(&a));
    assert!(!registry.inner.contains_element(&c));
}

#[test]
fn test_call_dependencies() {
    let widget = TypeDecl::new(Name::new("Widget"), TypeDeclKind::Class);
    let gadget = TypeDecl::new(Name::new("Gadget"), TypeDeclKind::Class);
    let draw = function(
        "gfx::draw",
        Type::function(
            PrimitiveType::Void.ty(),
            vec![Type::named(Arc::clone(&widget)).const_().reference()],
        ),
    );
    let g = variable("g", Type::named(Arc::clone(&gadget)));
    let w = variable("w", Type::named(Arc::clone(&widget)).ptr());

    let expr = Expression::call(
        &draw,
        vec![Expression::unary(UnaryOp::Deref, Expression::access(&w)), Expression::access(&g)],
    );
    let mut deps = DependencyList::new();
    assert!(expr.add_dependencies(&mut deps));
    assert_eq!(
        labels(&deps),
        vec![
            "element gfx::draw".to_string(),
            "type Widget (declaration)".to_string(),
            "element w".to_string(),
            "element g".to_string(),
            "type Gadget (definition)".to_string(),
        ]
    );
}

#[test]
fn test_member_access_requires_full_definition() {
    let widget = TypeDecl::new(Name::new("Widget"), TypeDeclKind::Class);
    let size = field("Widget::size", PrimitiveType::SizeT.ty());
    let w = variable("w", Type::named(Arc::clone(&widget)).ptr());

    let expr = Expression::member(Expression::access(&w), &size, true);
    let mut deps = DependencyList::new();
    assert!(expr.add_dependencies(&mut deps));

    // 前方宣言として登録された後、メンバアクセスで定義に格上げされる
    assert_eq!(deps.type_kind(&widget), Some(DependencyKind::Definition));
    assert_eq!(
        labels(&deps),
        vec!["element w".to_string(), "type Widget (definition)".to_string()]
    );
    assert!(!deps.contains_element(&size));
}

#[test]
fn test_cast_registers_target_type_first() {
    let widget = TypeDecl::new(Name::new("Widget"), TypeDeclKind::Class);
    let raw = variable("raw", PrimitiveType::Void.ty().ptr());

    let expr = Expression::cast(Type::named(Arc::clone(&widget)).ptr(), Expression::access(&raw));
    let mut deps = DependencyList::new();
    assert!(expr.add_dependencies(&mut deps));
    assert_eq!(
        labels(&deps),
        vec!["type Widget (declaration)".to_string(), "element raw".to_string()]
    );
}

#[test]
fn test_enum_through_pointer_needs_definition() {
    let color = TypeDecl::new(Name::scoped(["gfx"], "Color"), TypeDeclKind::Enum);
    let c = variable("c", Type::named(Arc::clone(&color)).ptr());

    let mut deps = DependencyList::new();
    assert!(Expression::access(&c).add_dependencies(&mut deps));
    assert_eq!(deps.type_kind(&color), Some(DependencyKind::Definition));
}

//! 式ノード
//!
//! 式は閉じた列挙型で表し、型解決・優先順位・依存関係・出力の
//! 4つの操作はすべて `ExprKind` の網羅的なマッチで振り分ける。
//!
//! 依存関係の収集と出力はどちらも深さ優先・左から右の前順走査で、
//! 最初に失敗した時点で打ち切られる。打ち切りまでに書き出された内容は
//! 出力先に残るので、`false` を受け取った呼び出し側はこの式の出力を
//! まるごと捨てること。

mod access;
mod literal;
mod operator;
mod precedence;

pub use access::{CallExpr, ElementAccess, MemberAccess};
pub use literal::{string_literal_type, Literal, StringLiteral};
pub use operator::{BinaryExpr, BinaryOp, CastExpr, ConditionalExpr, UnaryExpr, UnaryOp};
pub use precedence::{write_operand, Precedence};

use crate::dependency::{DependencyContributor, DependencyRegistry};
use crate::element::Element;
use crate::formatter::TextSink;
use crate::types::Type;
use std::cell::OnceCell;
use std::sync::Arc;

/// 式の種類
#[derive(Debug)]
pub enum ExprKind<'a> {
    Literal(Literal),
    StringLiteral(StringLiteral),
    ElementAccess(ElementAccess<'a>),
    MemberAccess(MemberAccess<'a>),
    Call(CallExpr<'a>),
    Unary(UnaryExpr<'a>),
    Binary(BinaryExpr<'a>),
    Conditional(ConditionalExpr<'a>),
    Cast(CastExpr<'a>),
}

/// 式ノード
///
/// 型は最初に問い合わせたときに一度だけ解決され、以後は同じ値を返す。
#[derive(Debug)]
pub struct Expression<'a> {
    kind: ExprKind<'a>,
    ty: OnceCell<Arc<Type>>,
}

impl<'a> Expression<'a> {
    pub fn new(kind: ExprKind<'a>) -> Self {
        Self {
            kind,
            ty: OnceCell::new(),
        }
    }

    pub fn literal(literal: Literal) -> Self {
        Self::new(ExprKind::Literal(literal))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::StringLiteral(StringLiteral::new(value)))
    }

    pub fn access(element: &'a Element) -> Self {
        Self::new(ExprKind::ElementAccess(ElementAccess::new(element)))
    }

    pub fn member(base: Expression<'a>, member: &'a Element, arrow: bool) -> Self {
        Self::new(ExprKind::MemberAccess(MemberAccess {
            base: Box::new(base),
            member,
            arrow,
        }))
    }

    pub fn call(function: &'a Element, args: Vec<Expression<'a>>) -> Self {
        Self::new(ExprKind::Call(CallExpr { function, args }))
    }

    pub fn unary(op: UnaryOp, operand: Expression<'a>) -> Self {
        Self::new(ExprKind::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
        }))
    }

    pub fn binary(op: BinaryOp, left: Expression<'a>, right: Expression<'a>) -> Self {
        Self::new(ExprKind::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    pub fn conditional(
        condition: Expression<'a>,
        then_expr: Expression<'a>,
        else_expr: Expression<'a>,
    ) -> Self {
        Self::new(ExprKind::Conditional(ConditionalExpr {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }))
    }

    pub fn cast(target: impl Into<Arc<Type>>, operand: Expression<'a>) -> Self {
        Self::new(ExprKind::Cast(CastExpr {
            target: target.into(),
            operand: Box::new(operand),
        }))
    }

    pub fn kind(&self) -> &ExprKind<'a> {
        &self.kind
    }

    /// 式の静的な型
    pub fn ty(&self) -> &Arc<Type> {
        self.ty.get_or_init(|| self.resolve_type())
    }

    /// 型が既に解決済みかどうか
    pub fn is_type_resolved(&self) -> bool {
        self.ty.get().is_some()
    }

    fn resolve_type(&self) -> Arc<Type> {
        match &self.kind {
            ExprKind::Literal(lit) => Arc::clone(lit.fixed_type()),
            ExprKind::StringLiteral(lit) => Arc::clone(lit.fixed_type()),
            ExprKind::ElementAccess(access) => access.resolve_type(),
            ExprKind::MemberAccess(member) => member.resolve_type(),
            ExprKind::Call(call) => call.resolve_type(),
            ExprKind::Unary(unary) => unary.resolve_type(),
            ExprKind::Binary(binary) => binary.resolve_type(),
            ExprKind::Conditional(cond) => cond.resolve_type(),
            ExprKind::Cast(cast) => cast.resolve_type(),
        }
    }

    pub fn precedence(&self) -> Precedence {
        match &self.kind {
            ExprKind::Literal(_) | ExprKind::StringLiteral(_) | ExprKind::ElementAccess(_) => {
                Precedence::Primary
            }
            ExprKind::MemberAccess(_) | ExprKind::Call(_) => Precedence::Postfix,
            ExprKind::Unary(unary) => unary.op.precedence(),
            ExprKind::Binary(binary) => binary.op.precedence(),
            ExprKind::Conditional(_) => Precedence::Assignment,
            ExprKind::Cast(_) => Precedence::Unary,
        }
    }

    /// 式をC++のテキストとして書き出す
    pub fn write(&self, fmt: &mut dyn TextSink) -> bool {
        match &self.kind {
            ExprKind::Literal(lit) => lit.write(fmt),
            ExprKind::StringLiteral(lit) => lit.write(fmt),
            ExprKind::ElementAccess(access) => access.write(fmt),
            ExprKind::MemberAccess(member) => member.write(fmt),
            ExprKind::Call(call) => call.write(fmt),
            ExprKind::Unary(unary) => unary.write(fmt),
            ExprKind::Binary(binary) => binary.write(fmt),
            ExprKind::Conditional(cond) => cond.write(fmt),
            ExprKind::Cast(cast) => cast.write(fmt),
        }
    }
}

impl<'a> DependencyContributor<'a> for Expression<'a> {
    fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        match &self.kind {
            // リテラルの型は通常プリミティブなので何も登録されない
            ExprKind::Literal(lit) => lit.fixed_type().add_dependencies(deps),
            ExprKind::StringLiteral(lit) => lit.fixed_type().add_dependencies(deps),
            ExprKind::ElementAccess(access) => access.add_dependencies(deps),
            ExprKind::MemberAccess(member) => member.add_dependencies(deps),
            ExprKind::Call(call) => call.add_dependencies(deps),
            ExprKind::Unary(unary) => unary.add_dependencies(deps),
            ExprKind::Binary(binary) => binary.add_dependencies(deps),
            ExprKind::Conditional(cond) => cond.add_dependencies(deps),
            ExprKind::Cast(cast) => cast.add_dependencies(deps),
        }
    }
}

impl From<Literal> for Expression<'_> {
    fn from(literal: Literal) -> Self {
        Expression::literal(literal)
    }
}

impl From<StringLiteral> for Expression<'_> {
    fn from(literal: StringLiteral) -> Self {
        Expression::new(ExprKind::StringLiteral(literal))
    }
}

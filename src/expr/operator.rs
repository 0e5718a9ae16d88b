//! 演算子式（二項・単項・条件・キャスト）

use super::precedence::{write_operand, Precedence};
use super::{ExprKind, Expression};
use crate::dependency::{DependencyContributor, DependencyRegistry};
use crate::formatter::TextSink;
use crate::types::{PrimitiveType, Type};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 二項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Multiply,
    Divide,
    Modulo,
    Add,
    Subtract,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    Comma,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubtractAssign => "-=",
            BinaryOp::MultiplyAssign => "*=",
            BinaryOp::DivideAssign => "/=",
            BinaryOp::Comma => ",",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => Precedence::Multiplicative,
            BinaryOp::Add | BinaryOp::Subtract => Precedence::Additive,
            BinaryOp::Shl | BinaryOp::Shr => Precedence::Shift,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => Precedence::Relational,
            BinaryOp::Eq | BinaryOp::Ne => Precedence::Equality,
            BinaryOp::BitAnd => Precedence::BitAnd,
            BinaryOp::BitXor => Precedence::BitXor,
            BinaryOp::BitOr => Precedence::BitOr,
            BinaryOp::And => Precedence::LogicalAnd,
            BinaryOp::Or => Precedence::LogicalOr,
            BinaryOp::Assign
            | BinaryOp::AddAssign
            | BinaryOp::SubtractAssign
            | BinaryOp::MultiplyAssign
            | BinaryOp::DivideAssign => Precedence::Assignment,
            BinaryOp::Comma => Precedence::Comma,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self.precedence() == Precedence::Assignment
    }

    /// 結果が `bool` になる演算子
    pub fn yields_bool(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::And
                | BinaryOp::Or
        )
    }

    /// 左右のオペランドに要求する優先順位
    fn operand_precedence(self) -> (Precedence, Precedence) {
        let own = self.precedence();
        if self.is_right_associative() {
            (own.stronger(), own)
        } else {
            (own, own.stronger())
        }
    }
}

/// 単項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Negate,
    BitNot,
    AddressOf,
    Deref,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::AddressOf => "&",
            UnaryOp::Deref => "*",
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement | UnaryOp::PostDecrement => "--",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostIncrement | UnaryOp::PostDecrement)
    }

    pub fn precedence(self) -> Precedence {
        if self.is_postfix() {
            Precedence::Postfix
        } else {
            Precedence::Unary
        }
    }
}

/// 二項演算式
#[derive(Debug)]
pub struct BinaryExpr<'a> {
    pub op: BinaryOp,
    pub left: Box<Expression<'a>>,
    pub right: Box<Expression<'a>>,
}

impl<'a> BinaryExpr<'a> {
    pub(crate) fn resolve_type(&self) -> Arc<Type> {
        if self.op.yields_bool() {
            return Arc::new(PrimitiveType::Bool.ty());
        }
        match self.op {
            BinaryOp::Comma => Arc::clone(self.right.ty()),
            _ => Arc::clone(self.left.ty()),
        }
    }

    pub(crate) fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        self.left.add_dependencies(deps) && self.right.add_dependencies(deps)
    }

    pub(crate) fn write(&self, fmt: &mut dyn TextSink) -> bool {
        let (left_prec, right_prec) = self.op.operand_precedence();
        let separator = match self.op {
            BinaryOp::Comma => ", ".to_string(),
            op => format!(" {} ", op.symbol()),
        };
        write_operand(fmt, &self.left, left_prec)
            && fmt.write_str(&separator)
            && write_operand(fmt, &self.right, right_prec)
    }
}

/// 単項演算式
#[derive(Debug)]
pub struct UnaryExpr<'a> {
    pub op: UnaryOp,
    pub operand: Box<Expression<'a>>,
}

impl<'a> UnaryExpr<'a> {
    pub(crate) fn resolve_type(&self) -> Arc<Type> {
        let operand = self.operand.ty();
        match self.op {
            UnaryOp::Not => Arc::new(PrimitiveType::Bool.ty()),
            UnaryOp::AddressOf => Arc::new(Type::clone(operand).ptr()),
            UnaryOp::Deref => match operand.pointee() {
                Some(pointee) => Arc::new(pointee.clone()),
                None => {
                    log::warn!("dereferencing a non-pointer operand, keeping its type");
                    Arc::clone(operand)
                }
            },
            _ => Arc::clone(operand),
        }
    }

    pub(crate) fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        self.operand.add_dependencies(deps)
    }

    pub(crate) fn write(&self, fmt: &mut dyn TextSink) -> bool {
        let symbol = self.op.symbol();
        if self.op.is_postfix() {
            return write_operand(fmt, &self.operand, Precedence::Postfix) && fmt.write_str(symbol);
        }
        // `- -x` が `--x` にならないように空白を挟む
        let glued = leading_char(&self.operand)
            .is_some_and(|c| symbol.ends_with(c) && matches!(c, '-' | '+' | '&'));
        fmt.write_str(symbol)
            && (!glued || fmt.write_char(' '))
            && write_operand(fmt, &self.operand, Precedence::Unary)
    }
}

/// 括弧なしで書き出したときの先頭文字（記号で始まる場合のみ）
///
/// 後置演算子やメンバアクセスは最も左のオペランドから書き出されるので、そこまで辿る。
/// 呼び出しは関数名から始まるので記号にならない。
fn leading_char(expr: &Expression<'_>) -> Option<char> {
    match expr.kind() {
        ExprKind::Literal(lit) => lit.value().chars().next().filter(|c| !c.is_alphanumeric()),
        ExprKind::Unary(unary) if !unary.op.is_postfix() => unary.op.symbol().chars().next(),
        ExprKind::Unary(unary) => leading_operand_char(&unary.operand, Precedence::Postfix),
        ExprKind::MemberAccess(member) => leading_operand_char(&member.base, Precedence::Postfix),
        _ => None,
    }
}

/// `required` の位置に置いたオペランドの先頭文字（括弧で囲まれるなら `(`）
fn leading_operand_char(operand: &Expression<'_>, required: Precedence) -> Option<char> {
    if operand.precedence().needs_parens(required) {
        Some('(')
    } else {
        leading_char(operand)
    }
}

/// 条件演算子（`c ? t : e`）
#[derive(Debug)]
pub struct ConditionalExpr<'a> {
    pub condition: Box<Expression<'a>>,
    pub then_expr: Box<Expression<'a>>,
    pub else_expr: Box<Expression<'a>>,
}

impl<'a> ConditionalExpr<'a> {
    pub(crate) fn resolve_type(&self) -> Arc<Type> {
        Arc::clone(self.then_expr.ty())
    }

    pub(crate) fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        self.condition.add_dependencies(deps)
            && self.then_expr.add_dependencies(deps)
            && self.else_expr.add_dependencies(deps)
    }

    pub(crate) fn write(&self, fmt: &mut dyn TextSink) -> bool {
        write_operand(fmt, &self.condition, Precedence::LogicalOr)
            && fmt.write_str(" ? ")
            && write_operand(fmt, &self.then_expr, Precedence::Comma)
            && fmt.write_str(" : ")
            && write_operand(fmt, &self.else_expr, Precedence::Assignment)
    }
}

/// Cスタイルのキャスト（`(T)x`）
#[derive(Debug)]
pub struct CastExpr<'a> {
    pub target: Arc<Type>,
    pub operand: Box<Expression<'a>>,
}

impl<'a> CastExpr<'a> {
    pub(crate) fn resolve_type(&self) -> Arc<Type> {
        Arc::clone(&self.target)
    }

    pub(crate) fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        self.target.add_dependencies(deps) && self.operand.add_dependencies(deps)
    }

    pub(crate) fn write(&self, fmt: &mut dyn TextSink) -> bool {
        fmt.write_char('(')
            && self.target.write(fmt)
            && fmt.write_char(')')
            && write_operand(fmt, &self.operand, Precedence::Unary)
    }
}

//! 要素アクセス・メンバアクセス・関数呼び出し

use super::precedence::{write_operand, Precedence};
use super::Expression;
use crate::dependency::{Dependency, DependencyContributor, DependencyRegistry};
use crate::element::Element;
use crate::formatter::TextSink;
use crate::types::Type;
use std::sync::Arc;

/// 宣言済み要素の読み出し
///
/// 要素は所有せず借用するだけ。
#[derive(Debug, Clone, Copy)]
pub struct ElementAccess<'a> {
    pub element: &'a Element,
}

impl<'a> ElementAccess<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }

    pub(crate) fn resolve_type(&self) -> Arc<Type> {
        Arc::clone(self.element.ty())
    }

    /// 要素自身を登録し、成功したときだけ要素の型の依存関係へ進む
    pub(crate) fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        deps.add(Dependency::element(self.element)) && self.element.ty().add_dependencies(deps)
    }

    pub(crate) fn write(&self, fmt: &mut dyn TextSink) -> bool {
        // アクセス式では修飾名を使わない
        fmt.write_str(self.element.name().identifier())
    }
}

/// メンバアクセス（`base.member` / `base->member`）
#[derive(Debug)]
pub struct MemberAccess<'a> {
    pub base: Box<Expression<'a>>,
    pub member: &'a Element,
    pub arrow: bool,
}

impl<'a> MemberAccess<'a> {
    pub(crate) fn resolve_type(&self) -> Arc<Type> {
        Arc::clone(self.member.ty())
    }

    /// メンバを参照するにはベースの型の完全な定義が必要
    pub(crate) fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        self.base.add_dependencies(deps)
            && self.base.ty().add_definition_dependencies(deps)
            && self.member.ty().add_dependencies(deps)
    }

    pub(crate) fn write(&self, fmt: &mut dyn TextSink) -> bool {
        write_operand(fmt, &self.base, Precedence::Postfix)
            && fmt.write_str(if self.arrow { "->" } else { "." })
            && fmt.write_str(self.member.name().identifier())
    }
}

/// 関数呼び出し
#[derive(Debug)]
pub struct CallExpr<'a> {
    pub function: &'a Element,
    pub args: Vec<Expression<'a>>,
}

impl<'a> CallExpr<'a> {
    pub(crate) fn resolve_type(&self) -> Arc<Type> {
        let fn_type = self.function.ty();
        match fn_type.return_type() {
            Some(ret) => Arc::new(ret.clone()),
            None => {
                log::warn!(
                    "call target {} is not a function, using its declared type",
                    self.function.name()
                );
                Arc::clone(fn_type)
            }
        }
    }

    pub(crate) fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        deps.add(Dependency::element(self.function))
            && self.function.ty().add_dependencies(deps)
            && self.args.iter().all(|arg| arg.add_dependencies(deps))
    }

    pub(crate) fn write(&self, fmt: &mut dyn TextSink) -> bool {
        fmt.write_str(self.function.name().identifier())
            && fmt.write_char('(')
            && self.args.iter().enumerate().all(|(i, arg)| {
                (i == 0 || fmt.write_str(", ")) && write_operand(fmt, arg, Precedence::Assignment)
            })
            && fmt.write_char(')')
    }
}

//! 宣言済みの要素
//!
//! 要素の寿命は生成パス全体で管理され、式ノードは借用するだけ。

use crate::name::Name;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 要素の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Variable,
    Parameter,
    Field,
    Function,
    Constant,
    Enumerator,
}

/// 名前と型を持つ宣言
#[derive(Debug)]
pub struct Element {
    name: Name,
    ty: Arc<Type>,
    kind: ElementKind,
}

impl Element {
    pub fn new(name: Name, ty: impl Into<Arc<Type>>, kind: ElementKind) -> Self {
        Self {
            name,
            ty: ty.into(),
            kind,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn ty(&self) -> &Arc<Type> {
        &self.ty
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

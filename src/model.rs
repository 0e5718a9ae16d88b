//! JSONで記述された式モデルの読み込み
//!
//! 型宣言・要素・式ツリーを1つのJSON文書で受け取り、
//! 要素を所有する `ModelArena` と、それを借用する式ツリーを組み立てる。
//!
//! ```json
//! {
//!   "types": [{ "name": "ui::Widget", "kind": "class" }],
//!   "elements": [{ "name": "w", "type": { "pointer": { "named": "ui::Widget" } } }],
//!   "expressions": [{ "access": "w" }]
//! }
//! ```

use crate::element::{Element, ElementKind};
use crate::error::ModelError;
use crate::expr::{BinaryOp, Expression, Literal, UnaryOp};
use crate::name::Name;
use crate::types::{PrimitiveType, Type, TypeDecl, TypeDeclKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// モデル文書全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    pub types: Vec<TypeDeclSpec>,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub expressions: Vec<ExprSpec>,
}

/// ユーザー定義型の宣言
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclSpec {
    pub name: String,
    pub kind: TypeDeclKind,
}

/// 要素の宣言
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeSpec,
    #[serde(default = "default_element_kind")]
    pub kind: ElementKind,
}

fn default_element_kind() -> ElementKind {
    ElementKind::Variable
}

/// 型の記述
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSpec {
    Primitive(PrimitiveType),
    Named(String),
    Pointer(Box<TypeSpec>),
    Reference(Box<TypeSpec>),
    Const(Box<TypeSpec>),
    Array {
        element: Box<TypeSpec>,
        #[serde(default)]
        size: Option<usize>,
    },
    Function {
        returns: Box<TypeSpec>,
        #[serde(default)]
        params: Vec<TypeSpec>,
    },
}

/// 式の記述
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprSpec {
    Int(i64),
    Unsigned(u64),
    Bool(bool),
    Char(char),
    Float(f64),
    NullPtr,
    String(String),
    Literal {
        #[serde(rename = "type")]
        ty: TypeSpec,
        value: String,
    },
    Access(String),
    Member {
        base: Box<ExprSpec>,
        member: String,
        #[serde(default)]
        arrow: bool,
    },
    Call {
        function: String,
        #[serde(default)]
        args: Vec<ExprSpec>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<ExprSpec>,
    },
    Binary {
        op: BinaryOp,
        left: Box<ExprSpec>,
        right: Box<ExprSpec>,
    },
    Conditional {
        condition: Box<ExprSpec>,
        then: Box<ExprSpec>,
        otherwise: Box<ExprSpec>,
    },
    Cast {
        #[serde(rename = "type")]
        ty: TypeSpec,
        operand: Box<ExprSpec>,
    },
}

/// 読み込んだモデルの型と要素を所有する領域
///
/// 式ツリーはこの領域を借用するので、生成パスの間は生かしておく。
#[derive(Debug, Default)]
pub struct ModelArena {
    types: IndexMap<String, Arc<TypeDecl>>,
    elements: IndexMap<String, Element>,
    expressions: Vec<ExprSpec>,
}

impl ModelArena {
    /// JSON文字列から読み込む
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        let model: ModelFile = serde_json::from_str(source).map_err(|e| ModelError::Json {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
            span: byte_span(source, e.line(), e.column()),
        })?;
        Self::from_model(model)
    }

    /// 解析済みのモデルから型と要素を登録する
    pub fn from_model(model: ModelFile) -> Result<Self, ModelError> {
        let mut arena = ModelArena::default();

        for decl in model.types {
            if arena.types.contains_key(&decl.name) {
                return Err(ModelError::DuplicateType { name: decl.name });
            }
            log::debug!("declare type {} ({:?})", decl.name, decl.kind);
            let type_decl = TypeDecl::new(Name::parse(&decl.name), decl.kind);
            arena.types.insert(decl.name, type_decl);
        }

        for spec in model.elements {
            if arena.elements.contains_key(&spec.name) {
                return Err(ModelError::DuplicateElement { name: spec.name });
            }
            let ty = arena.resolve_type(&spec.ty)?;
            log::debug!("declare element {} ({:?})", spec.name, spec.kind);
            let element = Element::new(Name::parse(&spec.name), ty, spec.kind);
            arena.elements.insert(spec.name, element);
        }

        arena.expressions = model.expressions;
        Ok(arena)
    }

    /// モデル中のすべての式ツリーを組み立てる
    pub fn build(&self) -> Result<Vec<Expression<'_>>, ModelError> {
        self.expressions
            .iter()
            .map(|spec| self.build_expression(spec))
            .collect()
    }

    /// 式の記述から式ツリーを組み立てる
    pub fn build_expression(&self, spec: &ExprSpec) -> Result<Expression<'_>, ModelError> {
        let expr = match spec {
            ExprSpec::Int(value) => Expression::literal(Literal::int(*value)),
            ExprSpec::Unsigned(value) => Expression::literal(Literal::unsigned(*value)),
            ExprSpec::Bool(value) => Expression::literal(Literal::bool_(*value)),
            ExprSpec::Char(value) => Expression::literal(Literal::char_(*value)),
            ExprSpec::Float(value) => Expression::literal(Literal::float(*value)),
            ExprSpec::NullPtr => Expression::literal(Literal::null_ptr()),
            ExprSpec::String(value) => Expression::string(value.clone()),
            ExprSpec::Literal { ty, value } => {
                Expression::literal(Literal::new(self.resolve_type(ty)?, value.clone()))
            }
            ExprSpec::Access(name) => Expression::access(self.lookup(name)?),
            ExprSpec::Member {
                base,
                member,
                arrow,
            } => Expression::member(self.build_expression(base)?, self.lookup(member)?, *arrow),
            ExprSpec::Call { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.build_expression(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Expression::call(self.lookup(function)?, args)
            }
            ExprSpec::Unary { op, operand } => {
                Expression::unary(*op, self.build_expression(operand)?)
            }
            ExprSpec::Binary { op, left, right } => Expression::binary(
                *op,
                self.build_expression(left)?,
                self.build_expression(right)?,
            ),
            ExprSpec::Conditional {
                condition,
                then,
                otherwise,
            } => Expression::conditional(
                self.build_expression(condition)?,
                self.build_expression(then)?,
                self.build_expression(otherwise)?,
            ),
            ExprSpec::Cast { ty, operand } => {
                Expression::cast(self.resolve_type(ty)?, self.build_expression(operand)?)
            }
        };
        Ok(expr)
    }

    fn lookup(&self, name: &str) -> Result<&Element, ModelError> {
        self.elements.get(name).ok_or_else(|| ModelError::UnknownElement {
            name: name.to_string(),
        })
    }

    fn resolve_type(&self, spec: &TypeSpec) -> Result<Type, ModelError> {
        let ty = match spec {
            TypeSpec::Primitive(p) => p.ty(),
            TypeSpec::Named(name) => {
                let decl = self.types.get(name).ok_or_else(|| ModelError::UnknownType {
                    name: name.clone(),
                })?;
                Type::named(Arc::clone(decl))
            }
            TypeSpec::Pointer(inner) => self.resolve_type(inner)?.ptr(),
            TypeSpec::Reference(inner) => self.resolve_type(inner)?.reference(),
            TypeSpec::Const(inner) => self.resolve_type(inner)?.const_(),
            TypeSpec::Array { element, size } => self.resolve_type(element)?.array(*size),
            TypeSpec::Function { returns, params } => {
                let params = params
                    .iter()
                    .map(|param| self.resolve_type(param))
                    .collect::<Result<Vec<_>, _>>()?;
                Type::function(self.resolve_type(returns)?, params)
            }
        };
        Ok(ty)
    }
}

/// serde_jsonの行・列（1始まり）をバイト範囲に変換
fn byte_span(source: &str, line: usize, column: usize) -> Option<std::ops::Range<usize>> {
    if line == 0 {
        return None;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let start = (line_start + column.saturating_sub(1)).min(source.len());
    let end = (start + 1).min(source.len());
    Some(start..end)
}

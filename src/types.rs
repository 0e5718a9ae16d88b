//! C++の型表現
//!
//! 型は不変で、式ノードからは `Arc<Type>` として共有される。
//! 型自身も依存関係を登録できる（`DependencyContributor`）。

use crate::dependency::{Dependency, DependencyContributor, DependencyKind, DependencyRegistry};
use crate::formatter::{CppFormatter, TextSink};
use crate::name::Name;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 組み込み型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Void,
    Bool,
    Char,
    Short,
    Int,
    Long,
    LongLong,
    UnsignedChar,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    UnsignedLongLong,
    Float,
    Double,
    SizeT,
}

impl PrimitiveType {
    /// C++のキーワード表記
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Void => "void",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::LongLong => "long long",
            PrimitiveType::UnsignedChar => "unsigned char",
            PrimitiveType::UnsignedShort => "unsigned short",
            PrimitiveType::UnsignedInt => "unsigned int",
            PrimitiveType::UnsignedLong => "unsigned long",
            PrimitiveType::UnsignedLongLong => "unsigned long long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::SizeT => "size_t",
        }
    }

    pub fn ty(self) -> Type {
        Type::new(TypeKind::Primitive(self))
    }
}

/// ユーザー定義型の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDeclKind {
    Class,
    Struct,
    Union,
    Enum,
    Typedef,
}

impl TypeDeclKind {
    /// 前方宣言だけで参照できるかどうか
    ///
    /// typedefとスコープなしenumは前方宣言できないので常に定義が必要。
    pub fn is_forward_declarable(self) -> bool {
        matches!(
            self,
            TypeDeclKind::Class | TypeDeclKind::Struct | TypeDeclKind::Union
        )
    }
}

/// ユーザー定義型の宣言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: Name,
    pub kind: TypeDeclKind,
}

impl TypeDecl {
    pub fn new(name: Name, kind: TypeDeclKind) -> Arc<Self> {
        Arc::new(Self { name, kind })
    }
}

/// 関数型
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub return_type: Box<Type>,
    pub params: Vec<Type>,
}

/// 型の形
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(PrimitiveType),
    Named(Arc<TypeDecl>),
    Pointer(Box<Type>),
    Reference(Box<Type>),
    Array(Box<Type>, Option<usize>),
    Function(FunctionType),
}

/// cv修飾付きの型
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub is_const: bool,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            is_const: false,
        }
    }

    pub fn named(decl: Arc<TypeDecl>) -> Self {
        Self::new(TypeKind::Named(decl))
    }

    pub fn function(return_type: Type, params: Vec<Type>) -> Self {
        Self::new(TypeKind::Function(FunctionType {
            return_type: Box::new(return_type),
            params,
        }))
    }

    /// const修飾した型
    pub fn const_(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// この型へのポインタ
    pub fn ptr(self) -> Self {
        Self::new(TypeKind::Pointer(Box::new(self)))
    }

    /// この型へのconstポインタ
    pub fn const_ptr(self) -> Self {
        self.ptr().const_()
    }

    pub fn reference(self) -> Self {
        Self::new(TypeKind::Reference(Box::new(self)))
    }

    pub fn array(self, size: Option<usize>) -> Self {
        Self::new(TypeKind::Array(Box::new(self), size))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// ポインタ・参照・配列の要素型
    pub fn pointee(&self) -> Option<&Type> {
        match &self.kind {
            TypeKind::Pointer(inner) | TypeKind::Reference(inner) | TypeKind::Array(inner, _) => {
                Some(inner)
            }
            _ => None,
        }
    }

    /// 関数型の戻り値型
    pub fn return_type(&self) -> Option<&Type> {
        match &self.kind {
            TypeKind::Function(f) => Some(&f.return_type),
            _ => None,
        }
    }

    /// 指定した強さで依存関係を登録する
    ///
    /// ポインタと参照の先は前方宣言で足りる。
    fn add_dependencies_as<'a>(
        &self,
        deps: &mut dyn DependencyRegistry<'a>,
        kind: DependencyKind,
    ) -> bool {
        match &self.kind {
            TypeKind::Primitive(_) => true,
            TypeKind::Named(decl) => {
                let kind = if decl.kind.is_forward_declarable() {
                    kind
                } else {
                    DependencyKind::Definition
                };
                deps.add(Dependency::Type {
                    decl: Arc::clone(decl),
                    kind,
                })
            }
            TypeKind::Pointer(inner) | TypeKind::Reference(inner) => {
                inner.add_dependencies_as(deps, DependencyKind::Declaration)
            }
            TypeKind::Array(inner, _) => inner.add_dependencies_as(deps, kind),
            TypeKind::Function(f) => {
                f.return_type.add_dependencies(deps)
                    && f.params.iter().all(|param| param.add_dependencies(deps))
            }
        }
    }

    /// 完全な定義が必要な依存関係を登録する
    ///
    /// メンバアクセスのように型の中身を使う場合に使う。
    /// ポインタ・参照は一段だけ剥がしてその先の定義を要求する。
    pub fn add_definition_dependencies<'a>(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        match &self.kind {
            TypeKind::Pointer(inner) | TypeKind::Reference(inner) => {
                inner.add_dependencies_as(deps, DependencyKind::Definition)
            }
            _ => self.add_dependencies_as(deps, DependencyKind::Definition),
        }
    }

    /// 型をC++の表記で書き出す（`void (*)(int)`, `int (&)[4]` など）
    pub fn write(&self, fmt: &mut dyn TextSink) -> bool {
        self.write_declarator(fmt, String::new(), false)
    }

    /// 抽象宣言子を外側から内側へ組み立て、基本型に達したところで書き出す
    ///
    /// `suffix` は宣言子が `[..]` または `(..)` の後置部分だけで始まることを表す。
    /// 配列や関数を指すポインタ・参照は `(*)` のように括弧でまとめる。
    fn write_declarator(&self, fmt: &mut dyn TextSink, declarator: String, suffix: bool) -> bool {
        match &self.kind {
            TypeKind::Primitive(p) => {
                self.write_specifier(fmt, p.keyword(), &declarator, suffix)
            }
            TypeKind::Named(decl) => {
                self.write_specifier(fmt, &decl.name.qualified(), &declarator, suffix)
            }
            TypeKind::Pointer(inner) | TypeKind::Reference(inner) => {
                let mut part = String::from(if self.is_pointer() { "*" } else { "&" });
                if self.is_pointer() && self.is_const {
                    part.push_str(" const");
                }
                if !declarator.is_empty() {
                    if !suffix {
                        part.push(' ');
                    }
                    part.push_str(&declarator);
                }
                if matches!(inner.kind, TypeKind::Array(..) | TypeKind::Function(_)) {
                    part = format!("({})", part);
                }
                inner.write_declarator(fmt, part, false)
            }
            TypeKind::Array(inner, size) => {
                let bound = size.map(|n| n.to_string()).unwrap_or_default();
                let part = format!("{}[{}]", declarator, bound);
                inner.write_declarator(fmt, part, suffix || declarator.is_empty())
            }
            TypeKind::Function(f) => {
                let params: Vec<String> = f.params.iter().map(Type::to_cpp).collect();
                let part = format!("{}({})", declarator, params.join(", "));
                f.return_type
                    .write_declarator(fmt, part, suffix || declarator.is_empty())
            }
        }
    }

    fn write_specifier(
        &self,
        fmt: &mut dyn TextSink,
        name: &str,
        declarator: &str,
        suffix: bool,
    ) -> bool {
        (!self.is_const || fmt.write_str("const "))
            && fmt.write_str(name)
            && (declarator.is_empty()
                || ((suffix || fmt.write_char(' ')) && fmt.write_str(declarator)))
    }

    /// C++表記の文字列
    pub fn to_cpp(&self) -> String {
        let mut fmt = CppFormatter::new();
        self.write(&mut fmt);
        fmt.into_string()
    }
}

impl<'a> DependencyContributor<'a> for Type {
    fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool {
        self.add_dependencies_as(deps, DependencyKind::Definition)
    }
}

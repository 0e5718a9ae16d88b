//! 依存関係の収集
//!
//! 式を出力する前に見えていなければならない宣言を登録する。
//! 登録先は `DependencyRegistry`、登録する側は `DependencyContributor`。

use crate::element::Element;
use crate::types::TypeDecl;
use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 型への依存の強さ
///
/// `Definition` は `Declaration` を包含する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependencyKind {
    /// 前方宣言で足りる
    Declaration,
    /// 完全な定義が必要
    Definition,
}

/// 1つの依存関係
#[derive(Debug, Clone)]
pub enum Dependency<'a> {
    /// 宣言済みの要素（変数・関数など）への依存
    Element(&'a Element),
    /// ユーザー定義型への依存
    Type {
        decl: Arc<TypeDecl>,
        kind: DependencyKind,
    },
}

impl<'a> Dependency<'a> {
    pub fn element(element: &'a Element) -> Self {
        Dependency::Element(element)
    }

    fn key(&self) -> DependencyKey<'a> {
        match self {
            Dependency::Element(element) => DependencyKey::Element(element),
            Dependency::Type { decl, .. } => DependencyKey::Type(Arc::clone(decl)),
        }
    }
}

impl PartialEq for Dependency<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dependency::Element(a), Dependency::Element(b)) => std::ptr::eq(*a, *b),
            (
                Dependency::Type { decl: a, kind: ka },
                Dependency::Type { decl: b, kind: kb },
            ) => Arc::ptr_eq(a, b) && ka == kb,
            _ => false,
        }
    }
}

impl Eq for Dependency<'_> {}

impl fmt::Display for Dependency<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Element(element) => write!(f, "element {}", element.name()),
            Dependency::Type { decl, kind } => {
                let kind = match kind {
                    DependencyKind::Declaration => "declaration",
                    DependencyKind::Definition => "definition",
                };
                write!(f, "type {} ({})", decl.name, kind)
            }
        }
    }
}

/// 依存先の同一性（名前ではなく宣言の実体で比較する）
#[derive(Debug, Clone)]
enum DependencyKey<'a> {
    Element(&'a Element),
    Type(Arc<TypeDecl>),
}

impl PartialEq for DependencyKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DependencyKey::Element(a), DependencyKey::Element(b)) => std::ptr::eq(*a, *b),
            (DependencyKey::Type(a), DependencyKey::Type(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for DependencyKey<'_> {}

impl Hash for DependencyKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            DependencyKey::Element(element) => {
                0u8.hash(state);
                std::ptr::hash(*element, state);
            }
            DependencyKey::Type(decl) => {
                1u8.hash(state);
                std::ptr::hash(Arc::as_ptr(decl), state);
            }
        }
    }
}

/// 依存関係の登録先
pub trait DependencyRegistry<'a> {
    /// 依存関係を追加する。同じものを二度追加してもエラーではない。
    fn add(&mut self, dep: Dependency<'a>) -> bool;
}

/// 依存関係を登録できるもの
pub trait DependencyContributor<'a> {
    fn add_dependencies(&self, deps: &mut dyn DependencyRegistry<'a>) -> bool;
}

/// 挿入順を保ち重複を除いた依存関係リスト
#[derive(Debug, Default)]
pub struct DependencyList<'a> {
    entries: IndexMap<DependencyKey<'a>, Dependency<'a>>,
}

impl<'a> DependencyList<'a> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 登録順に依存関係を列挙
    pub fn iter(&self) -> impl Iterator<Item = &Dependency<'a>> {
        self.entries.values()
    }

    /// 要素への依存が登録されているか
    pub fn contains_element(&self, element: &Element) -> bool {
        self.entries.values().any(|dep| match dep {
            Dependency::Element(e) => std::ptr::eq(*e, element),
            _ => false,
        })
    }

    /// 型への依存の強さ（未登録なら `None`）
    pub fn type_kind(&self, decl: &TypeDecl) -> Option<DependencyKind> {
        self.entries.values().find_map(|dep| match dep {
            Dependency::Type { decl: d, kind } if std::ptr::eq(Arc::as_ptr(d), decl) => Some(*kind),
            _ => None,
        })
    }
}

impl<'a> DependencyRegistry<'a> for DependencyList<'a> {
    fn add(&mut self, dep: Dependency<'a>) -> bool {
        let key = dep.key();
        match self.entries.get_mut(&key) {
            Some(Dependency::Type { kind: existing, .. }) => {
                // 定義が必要になったら前方宣言を格上げする（位置は保つ）
                if let Dependency::Type { kind, .. } = dep {
                    if kind > *existing {
                        log::trace!("upgrade dependency to {:?}: {}", kind, dep);
                        *existing = kind;
                    }
                }
            }
            Some(Dependency::Element(_)) => {}
            None => {
                log::trace!("add dependency: {}", dep);
                self.entries.insert(key, dep);
            }
        }
        true
    }
}

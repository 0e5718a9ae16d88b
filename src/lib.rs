//! C++ Expression Emission Library
//!
//! C++ソース生成器の式出力コア。式ツリーの型解決、
//! 出力に必要な宣言（依存関係）の収集、最小限の括弧での
//! テキスト出力を提供します。

pub mod compiler;
pub mod dependency;
pub mod element;
pub mod error;
pub mod expr;
pub mod formatter;
pub mod model;
pub mod name;
pub mod types;

// Re-export commonly used types
pub use compiler::{GenerationUnit, Rendered};
pub use dependency::{
    Dependency, DependencyContributor, DependencyKind, DependencyList, DependencyRegistry,
};
pub use element::{Element, ElementKind};
pub use error::{CppgenError, CppgenResult, ErrorCollector};
pub use expr::{BinaryOp, ExprKind, Expression, Literal, Precedence, StringLiteral, UnaryOp};
pub use formatter::{CppFormatter, TextSink, WriterSink};
pub use model::ModelArena;
pub use name::Name;
pub use types::{PrimitiveType, Type, TypeDecl, TypeDeclKind};

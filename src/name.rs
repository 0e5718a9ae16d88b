//! 名前（名前空間修飾付き識別子）

use std::fmt;

/// 名前空間で修飾された識別子
///
/// 宣言の文脈では `qualified()`、アクセス式では `identifier()` を使う。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub namespace: Vec<String>,
    pub identifier: String,
}

impl Name {
    /// グローバル名前空間の名前を作成
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            namespace: Vec::new(),
            identifier: identifier.into(),
        }
    }

    /// 名前空間付きの名前を作成
    pub fn scoped<I, S>(namespace: I, identifier: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.into_iter().map(Into::into).collect(),
            identifier: identifier.into(),
        }
    }

    /// `a::b::id` 形式の文字列を分解
    pub fn parse(qualified: &str) -> Self {
        let mut segments: Vec<String> = qualified.split("::").map(str::to_string).collect();
        let identifier = segments.pop().unwrap_or_default();
        Self {
            namespace: segments,
            identifier,
        }
    }

    /// 修飾なしの識別子
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// 完全修飾名
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            return self.identifier.clone();
        }
        format!("{}::{}", self.namespace.join("::"), self.identifier)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

//! 統一的なエラーハンドリングモジュール
//!
//! 式の走査そのものは `bool` で成否を返すだけで、エラー型は使わない。
//! このモジュールのエラー型は、モデルの読み込みや生成パスの駆動など
//! 走査の外側で使われる。

use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::ops::Range;
use thiserror::Error;

/// cppgenの統一エラー型
#[derive(Error, Debug, Clone)]
pub enum CppgenError {
    /// モデル読み込みエラー
    #[error("モデル読み込みエラー: {0}")]
    Model(#[from] ModelError),

    /// コード生成エラー
    #[error("コード生成エラー: {0}")]
    Codegen(#[from] CodegenError),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),
}

/// モデル読み込みエラーの詳細
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    #[error("JSONの構文エラー ({line}行{column}列): {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
        span: Option<Range<usize>>,
    },

    #[error("未定義の要素: {name}")]
    UnknownElement { name: String },

    #[error("未定義の型: {name}")]
    UnknownType { name: String },

    #[error("要素 {name} は既に定義されています")]
    DuplicateElement { name: String },

    #[error("型 {name} は既に定義されています")]
    DuplicateType { name: String },
}

/// コード生成エラーの詳細
#[derive(Error, Debug, Clone)]
pub enum CodegenError {
    #[error("式 #{index} の依存関係を登録できませんでした")]
    DependencyFailed { index: usize },

    #[error("式 #{index} を出力できませんでした（途中まで: {partial:?}）")]
    EmitFailed { index: usize, partial: String },

    #[error("出力先への書き込みに失敗しました: {message}")]
    Sink { message: String },
}

/// エラー情報とソースファイルを結びつけたもの
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: CppgenError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: CppgenError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.error {
            CppgenError::Model(ModelError::Json {
                span: Some(span), ..
            }) => vec![Label::primary(self.file_id, span.clone()).with_message("ここで解析に失敗しました")],
            _ => vec![],
        };

        Diagnostic::error()
            .with_message(self.error.to_string())
            .with_labels(labels)
    }
}

/// 複数のエラーを蓄積するためのコレクター
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<CppgenError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: impl Into<CppgenError>) {
        self.errors.push(error.into());
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// すべてのエラーを取得
    pub fn errors(&self) -> &[CppgenError] {
        &self.errors
    }
}

/// Result型のエイリアス
pub type CppgenResult<T> = Result<T, CppgenError>;

impl From<std::io::Error> for CppgenError {
    fn from(e: std::io::Error) -> Self {
        CppgenError::Io(e.to_string())
    }
}

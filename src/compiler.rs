//! 生成パスの駆動
//!
//! 1つの出力単位に属する式それぞれについて、依存関係パスと出力パスを
//! 順に実行し、結果と失敗を蓄積する。

use crate::dependency::{DependencyContributor, DependencyList, DependencyRegistry};
use crate::error::{CodegenError, CppgenResult, ErrorCollector};
use crate::expr::Expression;
use crate::formatter::{CppFormatter, TextSink, WriterSink};
use std::io::Write;

/// 1つの式の出力結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// 書き出されたテキスト（失敗した場合は途中まで）
    pub text: String,
    pub ok: bool,
}

/// 出力単位
///
/// 依存関係は単位全体で1つの登録先に集められる。
pub struct GenerationUnit<'a, R = DependencyList<'a>> {
    registry: R,
    rendered: Vec<Rendered>,
    errors: ErrorCollector,
    _marker: std::marker::PhantomData<&'a ()>,
}

impl<'a> GenerationUnit<'a> {
    pub fn new() -> Self {
        Self::with_registry(DependencyList::new())
    }

    pub fn dependencies(&self) -> &DependencyList<'a> {
        &self.registry
    }
}

impl<'a> Default for GenerationUnit<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R: DependencyRegistry<'a>> GenerationUnit<'a, R> {
    /// 任意の登録先を使う出力単位を作成
    pub fn with_registry(registry: R) -> Self {
        Self {
            registry,
            rendered: Vec::new(),
            errors: ErrorCollector::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// 式を1つ処理する
    ///
    /// 依存関係の登録に失敗した式は出力しない。
    /// 出力に失敗した場合は途中までのテキストをそのまま記録する。
    pub fn add_expression(&mut self, expr: &Expression<'a>) -> bool {
        let index = self.rendered.len();

        log::debug!("expression #{}: collecting dependencies", index);
        if !expr.add_dependencies(&mut self.registry) {
            self.errors.add_error(CodegenError::DependencyFailed { index });
            self.rendered.push(Rendered {
                text: String::new(),
                ok: false,
            });
            return false;
        }

        log::debug!("expression #{}: emitting", index);
        let mut fmt = CppFormatter::new();
        let ok = expr.write(&mut fmt);
        if !ok {
            self.errors.add_error(CodegenError::EmitFailed {
                index,
                partial: fmt.as_str().to_string(),
            });
        }
        self.rendered.push(Rendered {
            text: fmt.into_string(),
            ok,
        });
        ok
    }

    /// すべての式を処理する（失敗しても残りの式は続ける）
    pub fn add_all(&mut self, exprs: &[Expression<'a>]) -> bool {
        exprs
            .iter()
            .fold(true, |all_ok, expr| self.add_expression(expr) && all_ok)
    }

    /// 成功した式を1行ずつ出力先へ書き出す
    pub fn write_to(&self, sink: &mut dyn TextSink) -> bool {
        self.rendered
            .iter()
            .filter(|r| r.ok)
            .all(|r| sink.write_str(&r.text) && sink.write_char('\n'))
    }

    /// 成功した式を `io::Write` へ書き出し、フラッシュ済みのライターを返す
    ///
    /// 書き込みの失敗は `CodegenError::Sink`、フラッシュの失敗は `CppgenError::Io` になる。
    pub fn write_into<W: Write>(&self, writer: W) -> CppgenResult<W> {
        let mut sink = WriterSink::new(writer);
        if !self.write_to(&mut sink) {
            let message = sink
                .take_error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(CodegenError::Sink { message }.into());
        }
        let mut writer = sink.into_inner();
        writer.flush()?;
        Ok(writer)
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn rendered(&self) -> &[Rendered] {
        &self.rendered
    }

    pub fn errors(&self) -> &ErrorCollector {
        &self.errors
    }
}

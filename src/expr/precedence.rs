//! 演算子の優先順位と括弧付け
//!
//! 優先順位は部分式を括弧で囲むかどうかの判断にだけ使う。
//! 評価順序・依存関係・型解決には影響しない。

use super::Expression;
use crate::formatter::TextSink;

/// 結合の強さ（弱い順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Comma,
    /// 代入と条件演算子
    Assignment,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    /// 前置単項演算子とキャスト
    Unary,
    /// 関数呼び出し・メンバアクセス・後置インクリメント
    Postfix,
    /// 名前とリテラル
    Primary,
}

impl Precedence {
    /// 1段強い優先順位（`Primary` はそのまま）
    pub fn stronger(self) -> Self {
        match self {
            Precedence::Comma => Precedence::Assignment,
            Precedence::Assignment => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitOr,
            Precedence::BitOr => Precedence::BitXor,
            Precedence::BitXor => Precedence::BitAnd,
            Precedence::BitAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Postfix,
            Precedence::Postfix | Precedence::Primary => Precedence::Primary,
        }
    }

    /// この位置に置く部分式を括弧で囲む必要があるか
    pub fn needs_parens(self, required: Precedence) -> bool {
        self < required
    }
}

/// オペランドを書き出す
///
/// オペランドの結合が `required` より弱ければ括弧で囲む。
pub fn write_operand(fmt: &mut dyn TextSink, operand: &Expression<'_>, required: Precedence) -> bool {
    if operand.precedence().needs_parens(required) {
        fmt.write_char('(') && operand.write(fmt) && fmt.write_char(')')
    } else {
        operand.write(fmt)
    }
}

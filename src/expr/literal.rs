//! リテラル式

use crate::formatter::TextSink;
use crate::types::{PrimitiveType, Type};
use std::sync::{Arc, OnceLock};

/// 型と出力済みの値を固定したリテラル
#[derive(Debug, Clone)]
pub struct Literal {
    ty: Arc<Type>,
    value: String,
}

impl Literal {
    pub fn new(ty: impl Into<Arc<Type>>, value: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            value: value.into(),
        }
    }

    /// 整数リテラル（`int`）
    pub fn int(value: i64) -> Self {
        Self::new(PrimitiveType::Int.ty(), value.to_string())
    }

    /// 符号なし整数リテラル（`42U`）
    pub fn unsigned(value: u64) -> Self {
        Self::new(PrimitiveType::UnsignedInt.ty(), format!("{}U", value))
    }

    pub fn bool_(value: bool) -> Self {
        Self::new(PrimitiveType::Bool.ty(), if value { "true" } else { "false" })
    }

    /// 文字リテラル（エスケープは呼び出し側の責任）
    pub fn char_(value: char) -> Self {
        Self::new(PrimitiveType::Char.ty(), format!("'{}'", value))
    }

    /// 浮動小数点リテラル（`double`）
    ///
    /// NaNと無限大は `<cmath>` のマクロ（`NAN`, `INFINITY`）で表す。
    /// インクルードは呼び出し側の責任。
    pub fn float(value: f64) -> Self {
        let text = if value.is_nan() {
            "NAN".to_string()
        } else if value.is_infinite() {
            if value > 0.0 { "INFINITY" } else { "-INFINITY" }.to_string()
        } else {
            // Debug表記は常に小数点か指数を含む（1.0, 1e-7）
            format!("{:?}", value)
        };
        Self::new(PrimitiveType::Double.ty(), text)
    }

    pub fn null_ptr() -> Self {
        Self::new(PrimitiveType::Void.ty().ptr(), "nullptr")
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn fixed_type(&self) -> &Arc<Type> {
        &self.ty
    }

    pub fn write(&self, fmt: &mut dyn TextSink) -> bool {
        fmt.write_str(&self.value)
    }
}

/// 文字列リテラルの型（`const char * const`）
///
/// すべての文字列リテラルがこの1つの値を共有する。
pub fn string_literal_type() -> &'static Arc<Type> {
    static STRING_TYPE: OnceLock<Arc<Type>> = OnceLock::new();
    STRING_TYPE.get_or_init(|| Arc::new(PrimitiveType::Char.ty().const_().const_ptr()))
}

/// NUL終端の文字列リテラル（例: `"str"`）
///
/// 値はそのまま二重引用符で囲まれる。引用符や制御文字のエスケープは行わないので、
/// 出力文法にそのまま埋め込める値を渡すこと。
#[derive(Debug, Clone)]
pub struct StringLiteral {
    literal: Literal,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            literal: Literal::new(Arc::clone(string_literal_type()), value),
        }
    }

    pub fn value(&self) -> &str {
        self.literal.value()
    }

    pub(crate) fn fixed_type(&self) -> &Arc<Type> {
        self.literal.fixed_type()
    }

    pub fn write(&self, fmt: &mut dyn TextSink) -> bool {
        fmt.write_char('"') && self.literal.write(fmt) && fmt.write_char('"')
    }
}

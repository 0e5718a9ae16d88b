//! テキスト出力先
//!
//! 生成されたC++テキストを受け取る追記専用のシンク。
//! 書き込みは呼び出し順のまま保持され、失敗は `false` で通知される。

use std::io;

/// 追記専用のテキスト出力先
pub trait TextSink {
    /// 文字列片を書き込む
    fn write_str(&mut self, text: &str) -> bool;

    /// 1文字（記号）を書き込む
    fn write_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf))
    }
}

/// メモリ上に出力を蓄積するフォーマッタ
#[derive(Debug, Default, Clone)]
pub struct CppFormatter {
    buffer: String,
}

impl CppFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl TextSink for CppFormatter {
    fn write_str(&mut self, text: &str) -> bool {
        self.buffer.push_str(text);
        true
    }

    fn write_char(&mut self, c: char) -> bool {
        self.buffer.push(c);
        true
    }
}

/// 任意の `io::Write` へ直接書き出すシンク
///
/// I/Oエラーが起きると以降の書き込みはすべて `false` を返す。
/// エラー自体は `take_error` で取り出せる。
pub struct WriterSink<W: io::Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// 発生したI/Oエラーを取り出す
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> TextSink for WriterSink<W> {
    fn write_str(&mut self, text: &str) -> bool {
        if self.error.is_some() {
            return false;
        }
        match self.writer.write_all(text.as_bytes()) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("sink write failed: {}", e);
                self.error = Some(e);
                false
            }
        }
    }
}

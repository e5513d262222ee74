//! Log body rendering settings

use crate::text::WrapOptions;
use serde::Deserialize;

/// How the log body is wrapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapConfig {
    /// Columns of indentation for continuation lines of a wrapped line
    pub indent_wrapped: usize,
    /// Honor line breaks from the console output
    pub keep_newlines: bool,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            indent_wrapped: 0,
            keep_newlines: true,
        }
    }
}

/// `[wrap]` as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileWrap {
    pub indent_wrapped: Option<usize>,
    pub keep_newlines: Option<bool>,
}

impl WrapConfig {
    pub fn from_file(file: Option<FileWrap>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            indent_wrapped: file.indent_wrapped.unwrap_or(defaults.indent_wrapped),
            keep_newlines: file.keep_newlines.unwrap_or(defaults.keep_newlines),
        }
    }

    /// Engine options for a surface `width` columns wide
    pub fn options(&self, width: usize) -> WrapOptions {
        WrapOptions {
            limit: width,
            keep_newlines: self.keep_newlines,
            indent_wrapped: self.indent_wrapped,
        }
    }
}

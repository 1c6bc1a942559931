use serde::Deserialize;
use serde::Serialize;

/// Default answer applied to unstubbed calls when the mock settings name none.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAnswerKind {
    /// Null-like zero values
    #[default]
    ReturnsDefaults,
    SmartNulls,
    DeepStubs,
    CallsRealMethods,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StubbingConfig {
    #[serde(default)]
    pub default_answer: DefaultAnswerKind,

    /// Reject `then_return` / `do_return` values the declared return kind does not accept
    #[serde(default = "default_check_return_kinds")]
    pub check_return_kinds: bool,
}

impl Default for StubbingConfig {
    fn default() -> Self {
        Self {
            default_answer: DefaultAnswerKind::default(),
            check_return_kinds: default_check_return_kinds(),
        }
    }
}

fn default_check_return_kinds() -> bool {
    true
}

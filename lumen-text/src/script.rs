//! Script tags.
//!
//! Scripts are computed by an external segmentation pass and stored in the
//! model as runs; the model only answers "which script covers index i".

use lumen_core::StyleRun;

/// Writing system of a run of characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Script {
    Common,
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Devanagari,
    Bengali,
    Thai,
    Hangul,
    Han,
    Hiragana,
    Katakana,
    Emoji,
    #[default]
    Unknown,
}

impl Script {
    /// Scripts whose paragraphs default to right-to-left.
    pub fn is_right_to_left(self) -> bool {
        matches!(self, Script::Hebrew | Script::Arabic)
    }
}

/// A character run tagged with its script.
pub type ScriptRun = StyleRun<Script>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(Script::default(), Script::Unknown);
    }

    #[test]
    fn test_rtl_scripts() {
        assert!(Script::Arabic.is_right_to_left());
        assert!(Script::Hebrew.is_right_to_left());
        assert!(!Script::Latin.is_right_to_left());
        assert!(!Script::Unknown.is_right_to_left());
    }
}

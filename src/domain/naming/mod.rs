//! Output filename normalization
//!
//! Encoder filter arguments break on quotes, brackets and shell
//! metacharacters, so output stems are sanitized before they reach
//! the burn planner.

use serde::{Deserialize, Serialize};

/// Stem used when normalization leaves nothing behind
pub const EMPTY_NAME_FALLBACK: &str = "normalized_file";

/// Characters replaced when `remove_special_chars` is on
const SPECIAL_CHARS: &[char] = &[
    '\'', '"', '\\', '`', '[', ']', '{', '}', '(', ')', '&', '|', ';', '$', '<', '>', '*', '?', '~',
];

/// Filename normalization options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOptions {
    /// Replace characters that commonly break filter arguments
    pub remove_special_chars: bool,
    /// Replace whitespace runs
    pub replace_spaces: bool,
    /// Character used for every replacement
    pub replacement_char: char,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            remove_special_chars: true,
            replace_spaces: false,
            replacement_char: '_',
        }
    }
}

/// Original and normalized stem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub normalized: String,
}

impl NormalizedName {
    /// True when the fallback stem had to be used
    pub fn fell_back(&self) -> bool {
        self.normalized == EMPTY_NAME_FALLBACK && self.original != EMPTY_NAME_FALLBACK
    }
}

/// Filename normalizer
pub struct FilenameNormalizer;

impl FilenameNormalizer {
    /// Normalize a file stem (no extension)
    pub fn normalize(name: &str, options: &NamingOptions) -> NormalizedName {
        let replacement = options.replacement_char;
        let mut replaced = String::with_capacity(name.len());
        let mut in_whitespace = false;

        for c in name.chars() {
            if options.replace_spaces && c.is_whitespace() {
                if !in_whitespace {
                    replaced.push(replacement);
                }
                in_whitespace = true;
                continue;
            }
            in_whitespace = false;

            if options.remove_special_chars && SPECIAL_CHARS.contains(&c) {
                replaced.push(replacement);
            } else {
                replaced.push(c);
            }
        }

        let collapsed = Self::collapse_runs(&replaced, replacement);
        let trimmed = collapsed.trim_matches(replacement);

        let normalized = if trimmed.trim().is_empty() {
            EMPTY_NAME_FALLBACK.to_string()
        } else {
            trimmed.to_string()
        };

        NormalizedName {
            original: name.to_string(),
            normalized,
        }
    }

    fn collapse_runs(value: &str, c: char) -> String {
        let mut out = String::with_capacity(value.len());
        let mut previous_was_c = false;
        for ch in value.chars() {
            if ch == c {
                if !previous_was_c {
                    out.push(ch);
                }
                previous_was_c = true;
            } else {
                out.push(ch);
                previous_was_c = false;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_characters_replaced() {
        let name = FilenameNormalizer::normalize("Show (2019) [1080p] 'Final'", &NamingOptions::default());
        assert_eq!(name.normalized, "Show _2019_ _1080p_ _Final");
        assert_eq!(name.original, "Show (2019) [1080p] 'Final'");
    }

    #[test]
    fn test_runs_collapse_and_edges_trim() {
        let name = FilenameNormalizer::normalize("[Group]__Episode 01 (v2)", &NamingOptions::default());
        assert_eq!(name.normalized, "Group_Episode 01 _v2");
    }

    #[test]
    fn test_replace_spaces() {
        let options = NamingOptions {
            replace_spaces: true,
            ..NamingOptions::default()
        };
        let name = FilenameNormalizer::normalize("My  Show - S01E02 (1080p)", &options);
        assert_eq!(name.normalized, "My_Show_-_S01E02_1080p");
    }

    #[test]
    fn test_custom_replacement_char() {
        let options = NamingOptions {
            remove_special_chars: true,
            replace_spaces: true,
            replacement_char: '.',
        };
        let name = FilenameNormalizer::normalize("a & b", &options);
        assert_eq!(name.normalized, "a.b");
    }

    #[test]
    fn test_disabled_options_leave_name_untouched() {
        let options = NamingOptions {
            remove_special_chars: false,
            replace_spaces: false,
            replacement_char: '_',
        };
        let name = FilenameNormalizer::normalize("keep (this) as-is", &options);
        assert_eq!(name.normalized, "keep (this) as-is");
    }

    #[test]
    fn test_empty_result_uses_fallback_stem() {
        let name = FilenameNormalizer::normalize("()[]", &NamingOptions::default());
        assert_eq!(name.normalized, EMPTY_NAME_FALLBACK);
        assert!(name.fell_back());

        let name = FilenameNormalizer::normalize("   ", &NamingOptions::default());
        assert_eq!(name.normalized, EMPTY_NAME_FALLBACK);
    }
}

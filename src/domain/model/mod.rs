// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::errors::DomainError;

/// Default subtitle codec to look for
pub const DEFAULT_CODEC: &str = "ass";
/// Default subtitle language to look for
pub const DEFAULT_LANGUAGE: &str = "eng";
/// Default title keywords, highest priority first
pub const DEFAULT_KEYWORDS: [&str; 3] = ["dialogue", "full", "complete"];

/// Kind of elementary stream as reported by the prober
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    Subtitle,
    Other,
}

impl From<&str> for CodecType {
    fn from(value: &str) -> Self {
        match value {
            "video" => CodecType::Video,
            "audio" => CodecType::Audio,
            "subtitle" => CodecType::Subtitle,
            _ => CodecType::Other,
        }
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecType::Video => "video",
            CodecType::Audio => "audio",
            CodecType::Subtitle => "subtitle",
            CodecType::Other => "other",
        };
        f.write_str(name)
    }
}

/// One probed stream
///
/// `stream_index` is the absolute position among all streams in the file.
/// Records are produced once by a probe and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub stream_index: usize,
    pub codec_type: CodecType,
    pub codec_name: String,
    pub language: Option<String>,
    pub title: Option<String>,
}

impl StreamRecord {
    /// Create an untagged stream record
    pub fn new(stream_index: usize, codec_type: CodecType, codec_name: impl Into<String>) -> Self {
        Self {
            stream_index,
            codec_type,
            codec_name: codec_name.into(),
            language: None,
            title: None,
        }
    }

    /// Create an untagged subtitle stream record
    pub fn subtitle(stream_index: usize, codec_name: impl Into<String>) -> Self {
        Self::new(stream_index, CodecType::Subtitle, codec_name)
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_subtitle(&self) -> bool {
        self.codec_type == CodecType::Subtitle
    }

    /// True when the title is absent or whitespace only
    pub fn has_blank_title(&self) -> bool {
        self.title.as_deref().map_or(true, |t| t.trim().is_empty())
    }

    /// Case-insensitive substring test against the title.
    /// An absent title never matches.
    pub fn title_contains(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(&needle))
    }

    /// Diagnostic summary used in no-match reports
    pub fn summary(&self) -> StreamSummary {
        StreamSummary {
            stream_index: self.stream_index,
            codec_name: self.codec_name.clone(),
            language: self.language.clone(),
            title: self.title.clone(),
        }
    }
}

/// Condensed view of a subtitle stream for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub stream_index: usize,
    pub codec_name: String,
    pub language: Option<String>,
    pub title: Option<String>,
}

impl fmt::Display for StreamSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codec = if self.codec_name.is_empty() {
            "unknown"
        } else {
            &self.codec_name
        };
        write!(
            f,
            "Index {}: codec={}, language={}, title=\"{}\"",
            self.stream_index,
            codec,
            self.language.as_deref().unwrap_or("unknown"),
            self.title.as_deref().unwrap_or("no title"),
        )
    }
}

/// Positional fallback among codec+language candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackIndex {
    #[default]
    Disabled,
    Position(usize),
}

impl FallbackIndex {
    /// Map a signed setting to a fallback; negative values disable it
    pub fn from_signed(value: i64) -> Self {
        usize::try_from(value).map_or(FallbackIndex::Disabled, FallbackIndex::Position)
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            FallbackIndex::Disabled => None,
            FallbackIndex::Position(n) => Some(*n),
        }
    }
}

impl FromStr for FallbackIndex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("disabled") {
            return Ok(FallbackIndex::Disabled);
        }
        trimmed
            .parse::<i64>()
            .map(FallbackIndex::from_signed)
            .map_err(|_| {
                DomainError::BadArgs(format!(
                    "Invalid fallback index: {}. Expected a number or \"disabled\"",
                    s
                ))
            })
    }
}

impl fmt::Display for FallbackIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackIndex::Disabled => f.write_str("disabled"),
            FallbackIndex::Position(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for FallbackIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FallbackIndex::Disabled => serializer.serialize_str("disabled"),
            FallbackIndex::Position(n) => serializer.serialize_u64(*n as u64),
        }
    }
}

/// Caller-supplied selection criteria
///
/// Keywords are trimmed and blank entries dropped on construction, so an
/// empty keyword can never match every titled stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionPolicy {
    codec: String,
    language: String,
    keywords: Vec<String>,
    fallback_index: FallbackIndex,
}

impl SelectionPolicy {
    /// Create a policy with no keywords and fallback disabled
    pub fn new(codec: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            codec: codec.into(),
            language: language.into(),
            keywords: Vec::new(),
            fallback_index: FallbackIndex::Disabled,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    pub fn with_fallback(mut self, fallback_index: FallbackIndex) -> Self {
        self.fallback_index = fallback_index;
        self
    }

    pub fn codec(&self) -> &str {
        &self.codec
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn fallback_index(&self) -> FallbackIndex {
        self.fallback_index
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CODEC, DEFAULT_LANGUAGE).with_keywords(DEFAULT_KEYWORDS)
    }
}

/// Split a comma-separated keyword list, dropping blank entries
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Why a stream was selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    /// Exactly one codec+language candidate existed
    SingleCandidate,
    /// Title contained this keyword
    Keyword(String),
    /// Untitled candidate at this position was used
    Fallback(usize),
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::SingleCandidate => f.write_str("single-candidate"),
            MatchReason::Keyword(keyword) => write!(f, "keyword:{}", keyword),
            MatchReason::Fallback(index) => write!(f, "fallback:{}", index),
        }
    }
}

impl Serialize for MatchReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which rejection path produced a no-match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoMatchReason {
    NoSubtitleStreams,
    NoCandidates,
    NoKeywordMatch,
    FallbackOutOfBounds { index: usize, candidates: usize },
    FallbackTitled { index: usize, title: String },
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoMatchReason::NoSubtitleStreams => f.write_str("no subtitle streams in file"),
            NoMatchReason::NoCandidates => {
                f.write_str("no subtitle stream matches the requested codec and language")
            }
            NoMatchReason::NoKeywordMatch => {
                f.write_str("no keyword matched and fallback is disabled")
            }
            NoMatchReason::FallbackOutOfBounds { index, candidates } => write!(
                f,
                "fallback index {} out of bounds ({} codec/language candidates)",
                index, candidates
            ),
            NoMatchReason::FallbackTitled { index, title } => write!(
                f,
                "fallback index {} has title \"{}\"; only untitled streams may be used as fallback",
                index, title
            ),
        }
    }
}

/// Outcome of a selection call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectionResult {
    Matched {
        stream: StreamRecord,
        reason: MatchReason,
    },
    NoMatch {
        reason: NoMatchReason,
        diagnostics: Vec<StreamSummary>,
    },
}

impl SelectionResult {
    pub fn is_matched(&self) -> bool {
        matches!(self, SelectionResult::Matched { .. })
    }

    pub fn matched_stream(&self) -> Option<&StreamRecord> {
        match self {
            SelectionResult::Matched { stream, .. } => Some(stream),
            SelectionResult::NoMatch { .. } => None,
        }
    }
}

/// The two addressing conventions downstream tooling needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedIndices {
    /// Position among all streams in the file
    pub absolute_index: usize,
    /// 0-based rank among subtitle streams only
    pub subtitle_relative_index: usize,
}

/// Everything the burn planner needs about a selected subtitle stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleSelection {
    pub absolute_index: usize,
    pub subtitle_relative_index: usize,
    pub codec: String,
    pub language: String,
    pub keyword: String,
}

impl SubtitleSelection {
    pub fn new(indices: DerivedIndices, policy: &SelectionPolicy, reason: &MatchReason) -> Self {
        Self {
            absolute_index: indices.absolute_index,
            subtitle_relative_index: indices.subtitle_relative_index,
            codec: policy.codec().to_string(),
            language: policy.language().to_string(),
            keyword: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;

// Domain rules - Subtitle selection policy and index mapping

use crate::domain::errors::DomainError;
use crate::domain::model::*;

/// Business rules for picking one subtitle stream out of a probe result
pub struct StreamSelector;

impl StreamSelector {
    /// Select the subtitle stream that best satisfies `policy`.
    ///
    /// Order of precedence:
    /// 1. a lone codec+language candidate is taken as is,
    /// 2. keywords in priority order, first candidate whose title contains
    ///    the keyword,
    /// 3. the untitled candidate at the fallback position.
    ///
    /// Every rejection is reported as [`SelectionResult::NoMatch`] with a
    /// summary of all subtitle streams in the file.
    pub fn select(streams: &[StreamRecord], policy: &SelectionPolicy) -> SelectionResult {
        let subtitle_streams: Vec<&StreamRecord> =
            streams.iter().filter(|s| s.is_subtitle()).collect();

        if subtitle_streams.is_empty() {
            return Self::no_match(NoMatchReason::NoSubtitleStreams, &subtitle_streams);
        }

        let candidates: Vec<&StreamRecord> = subtitle_streams
            .iter()
            .copied()
            .filter(|s| Self::matches_codec_and_language(s, policy))
            .collect();

        match candidates.as_slice() {
            [] => return Self::no_match(NoMatchReason::NoCandidates, &subtitle_streams),
            [only] => {
                return SelectionResult::Matched {
                    stream: (*only).clone(),
                    reason: MatchReason::SingleCandidate,
                }
            }
            _ => {}
        }

        if let Some((stream, keyword)) = Self::match_keywords(&candidates, policy.keywords()) {
            return SelectionResult::Matched {
                stream: stream.clone(),
                reason: MatchReason::Keyword(keyword.to_string()),
            };
        }

        let position = match policy.fallback_index() {
            FallbackIndex::Disabled => {
                return Self::no_match(NoMatchReason::NoKeywordMatch, &subtitle_streams)
            }
            FallbackIndex::Position(position) => position,
        };

        let Some(fallback) = candidates.get(position) else {
            return Self::no_match(
                NoMatchReason::FallbackOutOfBounds {
                    index: position,
                    candidates: candidates.len(),
                },
                &subtitle_streams,
            );
        };

        if !fallback.has_blank_title() {
            return Self::no_match(
                NoMatchReason::FallbackTitled {
                    index: position,
                    title: fallback.title.clone().unwrap_or_default(),
                },
                &subtitle_streams,
            );
        }

        SelectionResult::Matched {
            stream: (*fallback).clone(),
            reason: MatchReason::Fallback(position),
        }
    }

    fn matches_codec_and_language(stream: &StreamRecord, policy: &SelectionPolicy) -> bool {
        stream.codec_name == policy.codec() && stream.language.as_deref() == Some(policy.language())
    }

    /// First keyword with any hit wins; later keywords are never consulted.
    fn match_keywords<'a, 'k>(
        candidates: &[&'a StreamRecord],
        keywords: &'k [String],
    ) -> Option<(&'a StreamRecord, &'k str)> {
        for keyword in keywords {
            if let Some(stream) = candidates.iter().find(|s| s.title_contains(keyword)) {
                return Some((*stream, keyword.as_str()));
            }
        }
        None
    }

    fn no_match(reason: NoMatchReason, subtitle_streams: &[&StreamRecord]) -> SelectionResult {
        SelectionResult::NoMatch {
            reason,
            diagnostics: subtitle_streams.iter().map(|s| s.summary()).collect(),
        }
    }
}

/// Derives the subtitle-only ordinal that filter syntax expects
pub struct IndexMapper;

impl IndexMapper {
    /// Map a selected subtitle stream to its absolute and subtitle-relative
    /// indices within `all_streams`.
    ///
    /// Passing a non-subtitle stream, or one that is not present in
    /// `all_streams`, is a caller bug and yields
    /// [`DomainError::InvariantViolation`].
    pub fn map_indices(
        all_streams: &[StreamRecord],
        selected: &StreamRecord,
    ) -> Result<DerivedIndices, DomainError> {
        if !selected.is_subtitle() {
            return Err(DomainError::InvariantViolation(format!(
                "stream {} is a {} stream, expected a subtitle stream",
                selected.stream_index, selected.codec_type
            )));
        }

        let position = all_streams
            .iter()
            .position(|s| s.stream_index == selected.stream_index)
            .ok_or_else(|| {
                DomainError::InvariantViolation(format!(
                    "stream {} is not present in the probed stream list",
                    selected.stream_index
                ))
            })?;

        if !all_streams[position].is_subtitle() {
            return Err(DomainError::InvariantViolation(format!(
                "stream {} is listed as {} in the probed stream list",
                selected.stream_index, all_streams[position].codec_type
            )));
        }

        let subtitle_relative_index = all_streams[..position]
            .iter()
            .filter(|s| s.is_subtitle())
            .count();

        Ok(DerivedIndices {
            absolute_index: selected.stream_index,
            subtitle_relative_index,
        })
    }
}

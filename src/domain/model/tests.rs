// Unit tests for domain models

use super::*;

#[test]
fn test_codec_type_from_probe_string() {
    assert_eq!(CodecType::from("video"), CodecType::Video);
    assert_eq!(CodecType::from("audio"), CodecType::Audio);
    assert_eq!(CodecType::from("subtitle"), CodecType::Subtitle);
    assert_eq!(CodecType::from("data"), CodecType::Other);
    assert_eq!(CodecType::from("attachment"), CodecType::Other);
}

#[test]
fn test_stream_record_builder() {
    let stream = StreamRecord::subtitle(3, "ass")
        .with_language("eng")
        .with_title("Full Dialogue");

    assert_eq!(stream.stream_index, 3);
    assert!(stream.is_subtitle());
    assert_eq!(stream.codec_name, "ass");
    assert_eq!(stream.language.as_deref(), Some("eng"));
    assert_eq!(stream.title.as_deref(), Some("Full Dialogue"));
}

#[test]
fn test_blank_title_detection() {
    assert!(StreamRecord::subtitle(0, "ass").has_blank_title());
    assert!(StreamRecord::subtitle(0, "ass").with_title("").has_blank_title());
    assert!(StreamRecord::subtitle(0, "ass").with_title("  \t ").has_blank_title());
    assert!(!StreamRecord::subtitle(0, "ass").with_title("Signs").has_blank_title());
}

#[test]
fn test_title_contains_is_case_insensitive() {
    let stream = StreamRecord::subtitle(0, "ass").with_title("Full DIALOGUE [Group]");
    assert!(stream.title_contains("dialogue"));
    assert!(stream.title_contains("Dialogue"));
    assert!(stream.title_contains("group"));
    assert!(!stream.title_contains("signs"));
}

#[test]
fn test_title_contains_absent_title() {
    let stream = StreamRecord::subtitle(0, "ass");
    assert!(!stream.title_contains("dialogue"));
}

#[test]
fn test_summary_display_for_untagged_stream() {
    let summary = StreamRecord::subtitle(4, "").summary();
    assert_eq!(
        summary.to_string(),
        "Index 4: codec=unknown, language=unknown, title=\"no title\""
    );
}

#[test]
fn test_fallback_index_parse() {
    assert_eq!("2".parse::<FallbackIndex>().unwrap(), FallbackIndex::Position(2));
    assert_eq!("0".parse::<FallbackIndex>().unwrap(), FallbackIndex::Position(0));
    assert_eq!("-1".parse::<FallbackIndex>().unwrap(), FallbackIndex::Disabled);
    assert_eq!("-7".parse::<FallbackIndex>().unwrap(), FallbackIndex::Disabled);
    assert_eq!("disabled".parse::<FallbackIndex>().unwrap(), FallbackIndex::Disabled);
    assert_eq!("".parse::<FallbackIndex>().unwrap(), FallbackIndex::Disabled);
    assert!("second".parse::<FallbackIndex>().is_err());
}

#[test]
fn test_fallback_index_display() {
    assert_eq!(FallbackIndex::Disabled.to_string(), "disabled");
    assert_eq!(FallbackIndex::Position(1).to_string(), "1");
}

#[test]
fn test_policy_defaults() {
    let policy = SelectionPolicy::default();
    assert_eq!(policy.codec(), "ass");
    assert_eq!(policy.language(), "eng");
    assert_eq!(policy.keywords(), ["dialogue", "full", "complete"]);
    assert_eq!(policy.fallback_index(), FallbackIndex::Disabled);
}

#[test]
fn test_policy_drops_blank_keywords() {
    let policy = SelectionPolicy::new("ass", "eng").with_keywords([" dialogue ", "", "   ", "full"]);
    assert_eq!(policy.keywords(), ["dialogue", "full"]);
}

#[test]
fn test_parse_keyword_list() {
    assert_eq!(parse_keyword_list("dialogue, full ,,complete"), vec!["dialogue", "full", "complete"]);
    assert!(parse_keyword_list(" , ").is_empty());
}

#[test]
fn test_match_reason_labels() {
    assert_eq!(MatchReason::SingleCandidate.to_string(), "single-candidate");
    assert_eq!(MatchReason::Keyword("dialogue".to_string()).to_string(), "keyword:dialogue");
    assert_eq!(MatchReason::Fallback(1).to_string(), "fallback:1");
}

#[test]
fn test_selection_result_serializes_with_outcome_tag() {
    let result = SelectionResult::Matched {
        stream: StreamRecord::subtitle(2, "ass").with_language("eng"),
        reason: MatchReason::Keyword("full".to_string()),
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"], "matched");
    assert_eq!(json["reason"], "keyword:full");
    assert_eq!(json["stream"]["codec_type"], "subtitle");

    let result = SelectionResult::NoMatch {
        reason: NoMatchReason::FallbackOutOfBounds { index: 2, candidates: 2 },
        diagnostics: vec![],
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"], "no_match");
    assert_eq!(json["reason"]["kind"], "fallback_out_of_bounds");
    assert_eq!(json["reason"]["candidates"], 2);
}

#[test]
fn test_subtitle_selection_from_indices() {
    let policy = SelectionPolicy::new("subrip", "jpn");
    let indices = DerivedIndices {
        absolute_index: 5,
        subtitle_relative_index: 1,
    };
    let selection = SubtitleSelection::new(indices, &policy, &MatchReason::Fallback(0));

    assert_eq!(selection.absolute_index, 5);
    assert_eq!(selection.subtitle_relative_index, 1);
    assert_eq!(selection.codec, "subrip");
    assert_eq!(selection.language, "jpn");
    assert_eq!(selection.keyword, "fallback:0");
}

//! Heuristic lecture summarization
//!
//! Content is split into sentences on runs of terminal punctuation. The
//! summary starts from the first sentence and pulls in sentences carrying
//! salience keywords; key points come from keyword and enumeration filters,
//! with a positional fallback when too few candidates survive. Everything here
//! is a total function of the input string.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Keywords marking a sentence as summary-worthy
const SALIENCE_KEYWORDS: &[&str] = &[
    "important",
    "key",
    "main",
    "critical",
    "essential",
    "fundamental",
    "primary",
    "significant",
    "conclude",
    "therefore",
    "thus",
    "result",
    "because",
    "since",
    "definition",
    "define",
    "means",
    "refers to",
];

/// Keywords marking a sentence as a key-point candidate
const INDICATOR_KEYWORDS: &[&str] = &[
    "important",
    "key",
    "main",
    "first",
    "second",
    "third",
    "primary",
    "essential",
    "fundamental",
    "remember",
    "note that",
    "it is crucial",
    "must understand",
    "definition",
    "principle",
    "law",
    "theory",
    "concept",
];

const MAX_KEYWORD_SENTENCES: usize = 3;
const SHORT_SUMMARY_WORDS: usize = 50;
const MIN_POINT_CHARS: usize = 20;
const MAX_POINT_CHARS: usize = 300;
const MAX_CANDIDATE_POINTS: usize = 8;
const MIN_POINTS_BEFORE_FALLBACK: usize = 3;
const FALLBACK_POINT_TARGET: usize = 5;
const FALLBACK_SEGMENTS: usize = 4;
const MAX_KEY_POINTS: usize = 6;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex: sentence break"));
static ENUMERATED_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9\-•*]").expect("Invalid regex: enumerated start"));
static SEQUENCE_WORD_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(first|second|third|finally|lastly|additionally)")
        .expect("Invalid regex: sequence word start")
});
static LEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9\-•*]+\.?\s*").expect("Invalid regex: leading marker"));

/// Summary and key points derived from one piece of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// Condensed multi-sentence summary, always ending in "."
    pub summary: String,
    /// Up to six key points in accumulation order
    pub key_points: Vec<String>,
}

/// Rule-based summary and key-point extractor
pub struct SummaryExtractor;

impl SummaryExtractor {
    /// Derive both the summary and the key points from `content`
    pub fn extract(content: &str) -> SummaryResult {
        let sentences = split_sentences(content);
        SummaryResult {
            summary: build_summary(&sentences),
            key_points: collect_key_points(&sentences),
        }
    }

    /// Condensed summary of `content`
    pub fn summarize(content: &str) -> String {
        build_summary(&split_sentences(content))
    }

    /// Key points of `content`
    pub fn key_points(content: &str) -> Vec<String> {
        collect_key_points(&split_sentences(content))
    }
}

/// Split on runs of `.`, `!` and `?`, dropping whitespace-only fragments.
///
/// Fragments are returned untrimmed and in source order. Text without
/// terminal punctuation is a single sentence.
pub fn split_sentences(content: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(content)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

fn contains_any(sentence: &str, keywords: &[&str]) -> bool {
    let lower = sentence.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

fn build_summary(sentences: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(first) = sentences.first() {
        parts.push(first.trim());
    }
    parts.extend(
        sentences
            .iter()
            .skip(1)
            .filter(|s| contains_any(s, SALIENCE_KEYWORDS))
            .take(MAX_KEYWORD_SENTENCES)
            .map(|s| s.trim()),
    );

    let mut summary = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(". ");

    if summary.split_whitespace().count() < SHORT_SUMMARY_WORDS && sentences.len() > 4 {
        let context = sentences[1..5]
            .iter()
            .map(|s| s.trim())
            .collect::<Vec<_>>()
            .join(". ");
        summary.push_str(". ");
        summary.push_str(&context);
    }

    let mut summary = summary.trim().to_string();
    if !summary.ends_with('.') {
        summary.push('.');
    }
    summary
}

fn is_enumerated(sentence: &str) -> bool {
    ENUMERATED_START.is_match(sentence) || SEQUENCE_WORD_START.is_match(sentence.trim())
}

fn strip_marker(sentence: &str) -> String {
    LEADING_MARKER
        .replace(sentence.trim(), "")
        .trim()
        .to_string()
}

fn collect_key_points(sentences: &[&str]) -> Vec<String> {
    let keyword_matches = sentences
        .iter()
        .filter(|s| contains_any(s, INDICATOR_KEYWORDS));
    let enumerated = sentences.iter().filter(|s| is_enumerated(s));

    let mut points: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for sentence in keyword_matches.chain(enumerated) {
        let cleaned = strip_marker(sentence);
        let len = cleaned.chars().count();
        if len > MIN_POINT_CHARS && len < MAX_POINT_CHARS && !seen.contains(&cleaned) {
            seen.insert(cleaned.clone());
            points.push(cleaned);
            if points.len() >= MAX_CANDIDATE_POINTS {
                break;
            }
        }
    }

    if points.len() < MIN_POINTS_BEFORE_FALLBACK {
        let segment_size = sentences.len() / FALLBACK_SEGMENTS;
        for i in 0..FALLBACK_SEGMENTS {
            if points.len() >= FALLBACK_POINT_TARGET {
                break;
            }
            let segment = &sentences[i * segment_size..(i + 1) * segment_size];
            let Some(longest) = longest_sentence(segment) else {
                continue;
            };
            let trimmed = longest.trim().to_string();
            if !seen.contains(&trimmed) {
                seen.insert(trimmed.clone());
                points.push(trimmed);
            }
        }
    }

    points.truncate(MAX_KEY_POINTS);
    points
}

/// Longest sentence by character count; ties go to the later sentence.
fn longest_sentence<'a>(segment: &[&'a str]) -> Option<&'a str> {
    segment.iter().copied().reduce(|a, b| {
        if a.chars().count() > b.chars().count() {
            a
        } else {
            b
        }
    })
}

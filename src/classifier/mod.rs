//! Request classification.
//!
//! Stateless predicates over free text. Every predicate is an independent,
//! case-insensitive pattern match or length heuristic; none depends on another.
//! The decision planner, the model router and the predictive engine all read
//! signals from here.
//!
//! # Signals
//!
//! | Signal | Example triggers |
//! |--------|------------------|
//! | explanation | "explain", "what is", "how does", "why" |
//! | code | "function", "fix", "refactor", `.rs`, code fences |
//! | creative | "story", "poem", "brainstorm" |
//! | speed | "quick", "asap", "tl;dr" |
//! | tool required | "run", "git", "file", "tests" |
//! | system knowledge | "architecture", "best practices", "team" |
//! | conceptual | "concept", "theory", "overview" |
//! | high precision | "exact", "precisely", "production" |
//! | complexity | complexity keyword, or more than 10 words |
//!
//! The numeric complexity score is
//! `min(word_count / 20 + 0.3 * complexity_keyword_hits, 1.0)`.

mod patterns;

pub use patterns::{
    SIGNAL_PATTERNS, STOP_WORDS, Signal, SignalPattern, TOOL_PATTERNS, ToolKind, ToolPattern,
};

use serde::{Deserialize, Serialize};

/// Word count above which a request counts as complex.
pub const COMPLEX_WORD_COUNT: usize = 10;

/// Maximum number of topics returned by [`extract_topics`].
pub const MAX_TOPICS: usize = 5;

/// Snapshot of every classifier signal for one request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestSignals {
    /// Asks for an explanation.
    pub explanation: bool,
    /// Concerns code.
    pub code: bool,
    /// Asks for creative output.
    pub creative: bool,
    /// Asks for a fast answer.
    pub speed: bool,
    /// Needs external tools.
    pub tool_required: bool,
    /// Concerns system-wide knowledge.
    pub system_knowledge: bool,
    /// Concerns concepts.
    pub conceptual: bool,
    /// Demands precision.
    pub high_precision: bool,
    /// Complexity keyword present or more than 10 words.
    pub complex: bool,
    /// Whitespace-separated word count.
    pub word_count: usize,
    /// Number of complexity patterns that matched.
    pub complexity_keyword_hits: usize,
    /// Numeric complexity in [0, 1].
    pub complexity_score: f32,
}

impl RequestSignals {
    /// Evaluates every predicate against the text.
    #[must_use]
    pub fn analyze(text: &str) -> Self {
        let word_count = word_count(text);
        let hits = complexity_keyword_hits(text);
        Self {
            explanation: is_explanation_request(text),
            code: is_code_request(text),
            creative: is_creative_request(text),
            speed: is_speed_request(text),
            tool_required: requires_tools(text),
            system_knowledge: needs_system_knowledge(text),
            conceptual: is_conceptual_request(text),
            high_precision: needs_high_precision(text),
            complex: hits > 0 || word_count > COMPLEX_WORD_COUNT,
            word_count,
            complexity_keyword_hits: hits,
            complexity_score: score(word_count, hits),
        }
    }

    /// Names of the boolean signals that fired, in declaration order.
    #[must_use]
    pub fn active(&self) -> Vec<&'static str> {
        [
            (self.explanation, Signal::Explanation),
            (self.code, Signal::Code),
            (self.creative, Signal::Creative),
            (self.speed, Signal::Speed),
            (self.tool_required, Signal::ToolRequired),
            (self.system_knowledge, Signal::SystemKnowledge),
            (self.conceptual, Signal::Conceptual),
            (self.high_precision, Signal::HighPrecision),
            (self.complex, Signal::Complexity),
        ]
        .into_iter()
        .filter_map(|(on, signal)| on.then_some(signal.as_str()))
        .collect()
    }
}

fn matches(signal: Signal, text: &str) -> bool {
    SIGNAL_PATTERNS
        .iter()
        .filter(|p| p.signal == signal)
        .any(|p| p.pattern.is_match(text))
}

/// Whitespace-separated word count.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether the request asks for an explanation.
#[must_use]
pub fn is_explanation_request(text: &str) -> bool {
    matches(Signal::Explanation, text)
}

/// Whether the request concerns code.
#[must_use]
pub fn is_code_request(text: &str) -> bool {
    matches(Signal::Code, text)
}

/// Whether the request asks for creative output.
#[must_use]
pub fn is_creative_request(text: &str) -> bool {
    matches(Signal::Creative, text)
}

/// Whether the request asks for a fast answer.
#[must_use]
pub fn is_speed_request(text: &str) -> bool {
    matches(Signal::Speed, text)
}

/// Whether the request needs external tools, i.e. [`detect_tools`] would
/// report at least one.
#[must_use]
pub fn requires_tools(text: &str) -> bool {
    TOOL_PATTERNS.iter().any(|p| p.pattern.is_match(text))
}

/// Whether the request concerns system-wide knowledge.
#[must_use]
pub fn needs_system_knowledge(text: &str) -> bool {
    matches(Signal::SystemKnowledge, text)
}

/// Whether the request concerns concepts rather than specifics.
#[must_use]
pub fn is_conceptual_request(text: &str) -> bool {
    matches(Signal::Conceptual, text)
}

/// Whether the request demands precision.
#[must_use]
pub fn needs_high_precision(text: &str) -> bool {
    matches(Signal::HighPrecision, text)
}

/// Number of complexity patterns that match.
#[must_use]
pub fn complexity_keyword_hits(text: &str) -> usize {
    SIGNAL_PATTERNS
        .iter()
        .filter(|p| p.signal == Signal::Complexity && p.pattern.is_match(text))
        .count()
}

/// Whether the request is complex (keyword, or more than 10 words).
#[must_use]
pub fn is_complex_request(text: &str) -> bool {
    complexity_keyword_hits(text) > 0 || word_count(text) > COMPLEX_WORD_COUNT
}

/// Numeric complexity in [0, 1].
#[must_use]
pub fn complexity_score(text: &str) -> f32 {
    score(word_count(text), complexity_keyword_hits(text))
}

#[allow(clippy::cast_precision_loss)]
fn score(word_count: usize, hits: usize) -> f32 {
    (word_count as f32 / 20.0 + 0.3 * hits as f32).min(1.0)
}

/// Tools the request mentions, in [`ToolKind`] order, without duplicates.
#[must_use]
pub fn detect_tools(text: &str) -> Vec<ToolKind> {
    let mut tools: Vec<ToolKind> = TOOL_PATTERNS
        .iter()
        .filter(|p| p.pattern.is_match(text))
        .map(|p| p.tool)
        .collect();
    tools.sort_unstable();
    tools.dedup();
    tools
}

/// Extracts up to five significant lowercase topics from the text.
///
/// Uses linear deduplication since the result holds at most five entries.
pub fn extract_topics(text: &str) -> Vec<String> {
    let mut topics = Vec::with_capacity(MAX_TOPICS);

    for word in text.split(|c: char| c.is_whitespace() || c == ',' || c == ';' || c == ':') {
        let cleaned = word
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '_')
            .to_lowercase();

        if cleaned.len() < 3
            || STOP_WORDS.contains(cleaned.as_str())
            || cleaned.chars().all(char::is_numeric)
            || topics.contains(&cleaned)
        {
            continue;
        }

        topics.push(cleaned);
        if topics.len() >= MAX_TOPICS {
            break;
        }
    }

    topics
}

//! Request classification patterns.
//!
//! Static pattern data for the request classifier. Every intent regex in the
//! crate lives here.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Intent signal detected by one or more patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Asks for an explanation.
    Explanation,
    /// Concerns code.
    Code,
    /// Asks for creative output.
    Creative,
    /// Asks for a fast answer.
    Speed,
    /// Needs external tools. Detected through [`TOOL_PATTERNS`].
    ToolRequired,
    /// Concerns system-wide knowledge.
    SystemKnowledge,
    /// Concerns concepts rather than specifics.
    Conceptual,
    /// Demands precision.
    HighPrecision,
    /// Complexity keyword.
    Complexity,
}

impl Signal {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Explanation => "explanation",
            Self::Code => "code",
            Self::Creative => "creative",
            Self::Speed => "speed",
            Self::ToolRequired => "tool_required",
            Self::SystemKnowledge => "system_knowledge",
            Self::Conceptual => "conceptual",
            Self::HighPrecision => "high_precision",
            Self::Complexity => "complexity",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tools a request may need prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Shell commands.
    Terminal,
    /// Version control.
    Git,
    /// Reading and writing files.
    FileSystem,
    /// Web or documentation search.
    WebSearch,
    /// Builds and test suites.
    TestRunner,
}

impl ToolKind {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Git => "git",
            Self::FileSystem => "file_system",
            Self::WebSearch => "web_search",
            Self::TestRunner => "test_runner",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A signal pattern.
#[derive(Debug)]
pub struct SignalPattern {
    /// The regex pattern to match.
    pub pattern: Regex,
    /// The signal this pattern indicates.
    pub signal: Signal,
    /// Human-readable description of the pattern.
    #[allow(dead_code)]
    pub description: &'static str,
}

/// A tool pattern.
#[derive(Debug)]
pub struct ToolPattern {
    /// The regex pattern to match.
    pub pattern: Regex,
    /// The tool this pattern indicates.
    pub tool: ToolKind,
}

fn signal(pattern: &str, signal: Signal, description: &'static str) -> SignalPattern {
    SignalPattern {
        pattern: Regex::new(pattern).expect("static regex: signal pattern"),
        signal,
        description,
    }
}

fn tool(pattern: &str, tool: ToolKind) -> ToolPattern {
    ToolPattern {
        pattern: Regex::new(pattern).expect("static regex: tool pattern"),
        tool,
    }
}

/// Static signal patterns grouped by signal.
///
/// Complexity patterns are counted individually: each matching pattern is one
/// keyword hit in the complexity score.
pub static SIGNAL_PATTERNS: LazyLock<Vec<SignalPattern>> = LazyLock::new(|| {
    vec![
        // Explanation
        signal(r"(?i)\b(explain|describe|clarify)\b", Signal::Explanation, "explain/describe"),
        signal(r"(?i)\bwhat\s+(is|are|does)\b", Signal::Explanation, "what is/are/does"),
        signal(r"(?i)\bhow\s+(does|do)\b", Signal::Explanation, "how does/do"),
        signal(r"(?i)\bwhy\b", Signal::Explanation, "why"),
        signal(
            r"(?i)\b(tell\s+me\s+about|walk\s+me\s+through|help\s+me\s+understand)\b",
            Signal::Explanation,
            "tell me about/walk me through",
        ),
        // Code
        signal(
            r"(?i)\b(code|coding|function|method|class|struct|variable|compiler?|syntax)\b",
            Signal::Code,
            "code vocabulary",
        ),
        signal(
            r"(?i)\b(refactor|implement|bug|debug|fix|script|api|endpoint)\b",
            Signal::Code,
            "code tasks",
        ),
        signal(r"(?i)\.(rs|py|ts|js|go|java|cpp|rb)\b", Signal::Code, "source file extension"),
        signal(r"```", Signal::Code, "code fence"),
        // Creative
        signal(
            r"(?i)\b(creative|creatively|imagine|brainstorm|invent)\b",
            Signal::Creative,
            "creative vocabulary",
        ),
        signal(
            r"(?i)\b(story|poem|fiction|slogan|lyrics)\b",
            Signal::Creative,
            "creative forms",
        ),
        signal(
            r"(?i)\bwrite\s+(a|an|me)\s+(song|tagline|narrative)\b",
            Signal::Creative,
            "write a song/tagline",
        ),
        // Speed
        signal(
            r"(?i)\b(quick|quickly|fast|asap|urgent|urgently|immediately|briefly)\b",
            Signal::Speed,
            "quick/fast/urgent",
        ),
        signal(r"(?i)\b(short\s+answer|tl;?dr|one\s+liner)\b", Signal::Speed, "short answer"),
        // System knowledge
        signal(
            r"(?i)\b(system|architecture|codebase|project-wide|organization|team)\b",
            Signal::SystemKnowledge,
            "system scope",
        ),
        signal(
            r"(?i)\b(best\s+practices?|conventions?|standards?|patterns?)\b",
            Signal::SystemKnowledge,
            "shared practices",
        ),
        // Conceptual
        signal(
            r"(?i)\b(concepts?|conceptual|theory|theoretical|principles?|paradigm|philosophy)\b",
            Signal::Conceptual,
            "concept vocabulary",
        ),
        signal(
            r"(?i)\b(big\s+picture|mental\s+model|overview|relationship|related\s+to)\b",
            Signal::Conceptual,
            "broad framing",
        ),
        // High precision
        signal(
            r"(?i)\b(exact|exactly|precise|precisely|accurate|accurately|verbatim)\b",
            Signal::HighPrecision,
            "precision vocabulary",
        ),
        signal(
            r"(?i)\b(specifically|must\s+be\s+correct|production)\b",
            Signal::HighPrecision,
            "correctness demands",
        ),
        // Complexity keywords, one hit each
        signal(r"(?i)\b(complex|complicated|intricate)\b", Signal::Complexity, "complex"),
        signal(r"(?i)\b(in\s+detail|detailed|in\s+depth)\b", Signal::Complexity, "in detail"),
        signal(r"(?i)\b(comprehensive|thorough|thoroughly)\b", Signal::Complexity, "thorough"),
        signal(r"(?i)\b(analy[sz]e|analysis)\b", Signal::Complexity, "analyze"),
        signal(r"(?i)\b(architecture|design)\b", Signal::Complexity, "architecture/design"),
        signal(r"(?i)\b(optimi[sz]e|optimization)\b", Signal::Complexity, "optimize"),
        signal(r"(?i)\balgorithms?\b", Signal::Complexity, "algorithm"),
        signal(r"(?i)\b(step\s+by\s+step|multi-step)\b", Signal::Complexity, "step by step"),
    ]
});

/// Static tool patterns. Any match means the request needs tools.
pub static TOOL_PATTERNS: LazyLock<Vec<ToolPattern>> = LazyLock::new(|| {
    vec![
        tool(r"(?i)\b(run|execute|terminal|shell|command|install|deploy)\b", ToolKind::Terminal),
        tool(r"(?i)\b(git|commit|branch|merge|rebase)\b", ToolKind::Git),
        tool(r"(?i)\b(file|files|directory|folder)\b", ToolKind::FileSystem),
        tool(
            r"(?i)\b(search\s+the\s+web|browse|fetch|download|look\s+up)\b",
            ToolKind::WebSearch,
        ),
        tool(r"(?i)\b(tests?|build)\b", ToolKind::TestRunner),
    ]
});

/// Common stop words to filter from topic extraction.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do",
        "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
        "need", "i", "you", "it", "we", "they", "me", "us", "them", "my", "your", "its", "our",
        "their", "this", "that", "these", "those", "what", "which", "who", "how", "when",
        "where", "why", "all", "each", "more", "most", "some", "such", "no", "not", "only",
        "so", "than", "too", "very", "just", "about", "also", "now", "here", "there", "if",
        "then", "into", "please", "explain", "describe", "tell",
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_signal_has_a_pattern() {
        let signals = [
            Signal::Explanation,
            Signal::Code,
            Signal::Creative,
            Signal::Speed,
            Signal::SystemKnowledge,
            Signal::Conceptual,
            Signal::HighPrecision,
            Signal::Complexity,
        ];
        for s in signals {
            assert!(
                SIGNAL_PATTERNS.iter().any(|p| p.signal == s),
                "no pattern for {s}"
            );
        }
    }

    #[test]
    fn test_tool_signal_lives_only_in_tool_patterns() {
        assert!(SIGNAL_PATTERNS.iter().all(|p| p.signal != Signal::ToolRequired));
        assert_eq!(TOOL_PATTERNS.len(), 5);
    }

    #[test]
    fn test_stop_words_lowercase() {
        assert!(STOP_WORDS.iter().all(|w| w.chars().all(char::is_lowercase)));
    }
}

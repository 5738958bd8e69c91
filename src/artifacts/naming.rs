//! Filename conventions for generated audio parts
//!
//! This is the only place that knows how part numbers are encoded in file
//! names. Two conventions are recognised:
//!
//! - suffix: `<base>_part<N>` (what the pipeline writes)
//! - prefix: `part<N>_<base>`
//!
//! Anything else is a complete, single-part episode. Suffix is tried before
//! prefix, so a name such as `part1_intro_part2` resolves to session
//! `part1_intro`, part 2.

use regex::Regex;
use std::sync::OnceLock;

/// Which naming convention produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartPattern {
    /// `<base>_part<N>`
    Suffix,
    /// `part<N>_<base>`
    Prefix,
    /// No convention matched; the whole stem is the session key
    Standalone,
}

/// Result of classifying one file stem
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Key shared by every part of the same episode
    pub session_key: String,
    /// Position of this file within its episode
    pub part: u32,
    /// Convention that matched
    pub pattern: PartPattern,
}

impl Classification {
    /// True when `other` was produced by the same convention for the same key
    pub fn same_session(&self, other: &Classification) -> bool {
        self.pattern == other.pattern && self.session_key == other.session_key
    }
}

fn suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Greedy base means the match is anchored on the last `_part`.
    RE.get_or_init(|| Regex::new(r"^(.+)_part([0-9]+)$").expect("valid suffix pattern"))
}

fn prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^part([0-9]+)_(.+)$").expect("valid prefix pattern"))
}

/// Classify a file stem (file name without extension)
///
/// Never fails: names that match neither convention, or whose part number
/// does not fit in a `u32`, are standalone sessions with part 1.
///
/// # Examples
///
/// ```
/// use blogcast::artifacts::naming::{classify, PartPattern};
///
/// let c = classify("code_and_culture_part4");
/// assert_eq!(c.session_key, "code_and_culture");
/// assert_eq!(c.part, 4);
/// assert_eq!(c.pattern, PartPattern::Suffix);
///
/// let c = classify("my_particle");
/// assert_eq!(c.session_key, "my_particle");
/// assert_eq!(c.part, 1);
/// ```
pub fn classify(stem: &str) -> Classification {
    if let Some(caps) = suffix_regex().captures(stem) {
        if let Ok(part) = caps[2].parse::<u32>() {
            return Classification {
                session_key: caps[1].to_string(),
                part,
                pattern: PartPattern::Suffix,
            };
        }
    }

    if let Some(caps) = prefix_regex().captures(stem) {
        if let Ok(part) = caps[1].parse::<u32>() {
            return Classification {
                session_key: caps[2].to_string(),
                part,
                pattern: PartPattern::Prefix,
            };
        }
    }

    Classification {
        session_key: stem.to_string(),
        part: 1,
        pattern: PartPattern::Standalone,
    }
}

/// Build the stem for one part of a multi-part episode
///
/// Produces names that [`classify`] maps back to `(base, part)`.
pub fn part_stem(base: &str, part: u32) -> String {
    format!("{}_part{}", base, part)
}

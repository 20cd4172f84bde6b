//! Academic / non-academic affiliation classification.
//!
//! A keyword heuristic: an affiliation counts as academic when it mentions any
//! of [`ACADEMIC_KEYWORDS`], case-insensitively. Everything else, including
//! empty strings, is treated as non-academic.

/// Keywords that mark an affiliation as academic.
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "research center",
    "academy",
];

/// Returns `true` if the affiliation mentions an academic keyword.
pub fn is_academic(affiliation: &str) -> bool {
    let lowered = affiliation.to_lowercase();
    ACADEMIC_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

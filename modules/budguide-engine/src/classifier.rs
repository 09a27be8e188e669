use serde::{Deserialize, Serialize};

/// Coarse classification of a user's stated wellness goal. Derived from the
/// need text at consultation time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedCategory {
    Sleep,
    Energy,
    Anxiety,
    Pain,
    Beginner,
    General,
}

impl std::fmt::Display for NeedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NeedCategory::Sleep => write!(f, "sleep"),
            NeedCategory::Energy => write!(f, "energy"),
            NeedCategory::Anxiety => write!(f, "anxiety"),
            NeedCategory::Pain => write!(f, "pain"),
            NeedCategory::Beginner => write!(f, "beginner"),
            NeedCategory::General => write!(f, "general"),
        }
    }
}

/// Ordered keyword rules, first match wins. The order is load-bearing:
/// "I'm new and in pain" must resolve to Pain because Pain is checked
/// before Beginner. Changing this order is a product decision.
const RULES: &[(NeedCategory, &[&str])] = &[
    (NeedCategory::Sleep, &["sleep", "insomnia"]),
    (NeedCategory::Energy, &["energy", "focus", "creative"]),
    (NeedCategory::Anxiety, &["anxiety", "stress", "relax"]),
    (NeedCategory::Pain, &["pain"]),
    (NeedCategory::Beginner, &["beginner", "first time", "new"]),
];

/// Map a free-text need statement to a category by case-insensitive
/// substring containment. Total over all strings; no match means General.
pub fn classify(text: &str) -> NeedCategory {
    let lowered = text.to_lowercase();
    for (category, keywords) in RULES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return *category;
        }
    }
    NeedCategory::General
}

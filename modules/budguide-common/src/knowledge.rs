use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::BudGuideError;

/// The strain/terpene/dosing reference text embedded ahead of every
/// consultation prompt. Versioned configuration data: domain facts change
/// without redeploying logic, so operators can override the built-in text
/// with a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    pub version: u32,
    pub text: String,
}

impl KnowledgeBase {
    /// The compiled-in reference text.
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VERSION,
            text: BUILTIN_TEXT.to_string(),
        }
    }

    /// Load an override from a TOML file with `version` and `text` keys.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BudGuideError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read knowledge file: {}", path.display()))?;
        let kb: KnowledgeBase = toml::from_str(&raw)
            .map_err(|e| BudGuideError::Knowledge(format!("invalid knowledge TOML: {e}")))?;
        if kb.text.trim().is_empty() {
            return Err(BudGuideError::Knowledge(format!(
                "knowledge file is empty: {}",
                path.display()
            )));
        }
        Ok(kb)
    }
}

const BUILTIN_VERSION: u32 = 3;

const BUILTIN_TEXT: &str = "\
STRAIN TYPES:
- INDICA: body-focused effects, relaxation, sedation, evening use, higher myrcene content
- SATIVA: head-focused effects, energy, creativity, daytime use, higher limonene/pinene
- HYBRID: balanced effects combining indica and sativa traits, versatile timing
- CBD-ONLY: non-intoxicating, calming, suitable for daytime and first-time users

THC POTENCY RANGES:
- LOW (0-15% THC): mild effects, good for beginners, functional use
- MEDIUM (15-25% THC): moderate effects, regular users, balanced experience
- HIGH (25%+ THC): strong effects, experienced users only, careful dosing

MAJOR CANNABINOIDS:
- THC: primary psychoactive compound, euphoria, pain relief, appetite stimulation
- CBD: non-psychoactive, anxiety relief, anti-inflammatory, balances THC effects
- CBN: sedating, sleep promotion, forms as THC degrades
- CBG: focus and energy, antibacterial properties

TERPENE PROFILES:
- MYRCENE: sedating, muscle relaxant, indica dominant
- LIMONENE: mood elevation, stress relief, citrus aroma, common in sativas
- PINENE: alertness, memory retention, counteracts THC anxiety
- LINALOOL: calming, sleep aid, lavender aroma, anxiety reduction
- CARYOPHYLLENE: anti-inflammatory, pain relief, spicy aroma

DOSING GUIDANCE:
- Edibles: onset 30-90 minutes, duration 4-8 hours; new users start at 2.5-5mg THC
- Flower and vapes: onset within minutes, duration 1-3 hours
- Start low and go slow; effects vary by individual
- Match potency to experience level; beginners stay under 10mg edibles / 20% flower";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_reference_sections() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.version >= 1);
        for section in [
            "STRAIN TYPES",
            "THC POTENCY RANGES",
            "MAJOR CANNABINOIDS",
            "TERPENE PROFILES",
            "DOSING GUIDANCE",
        ] {
            assert!(kb.text.contains(section), "missing section: {section}");
        }
    }

    #[test]
    fn from_file_rejects_empty_text() {
        let dir = std::env::temp_dir();
        let path = dir.join("budguide-knowledge-empty-test.toml");
        std::fs::write(&path, "version = 1\ntext = \"  \"\n").unwrap();
        let err = KnowledgeBase::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn from_file_parses_override() {
        let dir = std::env::temp_dir();
        let path = dir.join("budguide-knowledge-override-test.toml");
        std::fs::write(&path, "version = 9\ntext = \"CUSTOM FACTS\"\n").unwrap();
        let kb = KnowledgeBase::from_file(&path).unwrap();
        assert_eq!(kb.version, 9);
        assert_eq!(kb.text, "CUSTOM FACTS");
        std::fs::remove_file(&path).ok();
    }
}

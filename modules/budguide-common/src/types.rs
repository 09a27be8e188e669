use serde::{Deserialize, Serialize};

// --- Catalog Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Flower,
    Edibles,
    Vapes,
    Concentrates,
    Prerolls,
    Topicals,
    Tinctures,
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Flower => write!(f, "flower"),
            ProductCategory::Edibles => write!(f, "edibles"),
            ProductCategory::Vapes => write!(f, "vapes"),
            ProductCategory::Concentrates => write!(f, "concentrates"),
            ProductCategory::Prerolls => write!(f, "prerolls"),
            ProductCategory::Topicals => write!(f, "topicals"),
            ProductCategory::Tinctures => write!(f, "tinctures"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrainType {
    Indica,
    Sativa,
    Hybrid,
    CbdOnly,
}

impl std::fmt::Display for StrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrainType::Indica => write!(f, "indica"),
            StrainType::Sativa => write!(f, "sativa"),
            StrainType::Hybrid => write!(f, "hybrid"),
            StrainType::CbdOnly => write!(f, "cbd-only"),
        }
    }
}

// --- Potency ---

/// A cannabinoid measurement together with its unit. Flower and concentrates
/// are labeled in percent, edibles in milligrams per package — the unit is
/// part of the value and is never assumed from the category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Potency {
    Percent(f32),
    Milligrams(f32),
}

impl Potency {
    /// Numeric magnitude in the value's own unit.
    pub fn amount(&self) -> f32 {
        match self {
            Potency::Percent(v) | Potency::Milligrams(v) => *v,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Potency::Percent(_) => "%",
            Potency::Milligrams(_) => "mg",
        }
    }
}

impl std::fmt::Display for Potency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Potency::Percent(v) => write!(f, "{v}%"),
            Potency::Milligrams(v) => write!(f, "{v}mg"),
        }
    }
}

// --- Product ---

/// One catalog entry. Immutable after load; the `id` is what the
/// marker line in an AI response refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: ProductCategory,
    pub strain: StrainType,
    pub thc: Potency,
    pub cbd: Potency,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub dominant_terpene: Option<String>,
    pub price: f32,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub description: String,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Case-insensitive effect-tag check.
    pub fn has_effect(&self, tag: &str) -> bool {
        self.effects.iter().any(|e| e.eq_ignore_ascii_case(tag))
    }
}

// --- Consultation Values ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    New,
    #[default]
    Casual,
    Experienced,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::New => write!(f, "new"),
            ExperienceLevel::Casual => write!(f, "casual"),
            ExperienceLevel::Experienced => write!(f, "experienced"),
        }
    }
}

/// One user turn: what they said they need, and how experienced they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub need_text: String,
    #[serde(default)]
    pub experience: ExperienceLevel,
}

impl ConsultationRequest {
    pub fn new(need_text: impl Into<String>, experience: ExperienceLevel) -> Self {
        Self {
            need_text: need_text.into(),
            experience,
        }
    }
}

/// Whether the recommendations came from the AI response or from the
/// deterministic keyword path. Retained even though callers may not
/// display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Ai,
    Fallback,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Ai => write!(f, "ai"),
            Provenance::Fallback => write!(f, "fallback"),
        }
    }
}

/// The outcome of one consultation. `products` is always a subsequence of
/// the catalog the consultation ran against, capped at three entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultationResult {
    pub products: Vec<Product>,
    pub explanation: String,
    pub provenance: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn potency_tracks_unit() {
        let thc = Potency::Milligrams(10.0);
        assert_eq!(thc.amount(), 10.0);
        assert_eq!(thc.unit(), "mg");
        assert_eq!(thc.to_string(), "10mg");
        assert_eq!(Potency::Percent(22.5).to_string(), "22.5%");
    }

    #[test]
    fn strain_type_round_trips_kebab_case() {
        let json = serde_json::to_string(&StrainType::CbdOnly).unwrap();
        assert_eq!(json, "\"cbd-only\"");
        let back: StrainType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StrainType::CbdOnly);
    }

    #[test]
    fn product_effect_match_is_case_insensitive() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Granddaddy Purple",
            "brand": "Premo House",
            "category": "flower",
            "strain": "indica",
            "thc": {"percent": 19.2},
            "cbd": {"percent": 0.3},
            "effects": ["Sleepy", "relaxed"],
            "price": 52.0
        }))
        .unwrap();
        assert!(product.has_effect("sleepy"));
        assert!(product.has_effect("RELAXED"));
        assert!(!product.has_effect("energetic"));
        assert!(product.in_stock);
    }

    #[test]
    fn experience_level_defaults_to_casual() {
        let request: ConsultationRequest =
            serde_json::from_str(r#"{"need_text": "help me sleep"}"#).unwrap();
        assert_eq!(request.experience, ExperienceLevel::Casual);
    }
}

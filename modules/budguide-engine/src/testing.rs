// Test support for the consultation engine.
//
// MockGenerator matches the TextGenerator boundary: scripted replies keyed
// by prompt substring, an optional default reply, and a forced-failure mode
// for exercising the fallback path. Builder pattern: `.on_prompt_containing()`,
// `.with_default()`. Plus fixture constructors for catalog products.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use budguide_common::{Potency, Product, ProductCategory, StrainType};

use crate::traits::{GenerationParams, TextGenerator};

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

pub struct MockGenerator {
    inner: Mutex<MockGeneratorInner>,
}

struct MockGeneratorInner {
    replies: Vec<(String, String)>,
    default_reply: Option<String>,
    fail: bool,
    calls: u32,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockGeneratorInner {
                replies: Vec::new(),
                default_reply: None,
                fail: false,
                calls: 0,
            }),
        }
    }

    /// Shorthand for a generator that answers everything with one reply.
    pub fn with_reply(reply: &str) -> Self {
        Self::new().with_default(reply)
    }

    /// A generator whose every call errors, as a dead network would.
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().fail = true;
        mock
    }

    /// Register a reply for prompts containing `needle`. First match wins.
    pub fn on_prompt_containing(self, needle: &str, reply: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .replies
            .push((needle.to_string(), reply.to_string()));
        self
    }

    /// Reply for any prompt no registered needle matches.
    pub fn with_default(self, reply: &str) -> Self {
        self.inner.lock().unwrap().default_reply = Some(reply.to_string());
        self
    }

    pub fn calls(&self) -> u32 {
        self.inner.lock().unwrap().calls
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        _system: &str,
        prompt: &str,
        _params: GenerationParams,
    ) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        if inner.fail {
            bail!("MockGenerator: forced generation failure");
        }
        for (needle, reply) in &inner.replies {
            if prompt.contains(needle.as_str()) {
                return Ok(reply.clone());
            }
        }
        if let Some(ref reply) = inner.default_reply {
            return Ok(reply.clone());
        }
        bail!("MockGenerator: no reply registered for prompt");
    }
}

// ---------------------------------------------------------------------------
// Product fixtures
// ---------------------------------------------------------------------------

/// A flower product with percent potency and no effects.
pub fn flower(id: &str, name: &str, strain: StrainType, thc_pct: f32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: "House Brand".to_string(),
        category: ProductCategory::Flower,
        strain,
        thc: Potency::Percent(thc_pct),
        cbd: Potency::Percent(0.0),
        effects: Vec::new(),
        dominant_terpene: None,
        price: 40.0,
        in_stock: true,
        description: String::new(),
    }
}

/// An edible product with milligram potency and no effects.
pub fn edible(id: &str, name: &str, strain: StrainType, thc_mg: f32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: "House Brand".to_string(),
        category: ProductCategory::Edibles,
        strain,
        thc: Potency::Milligrams(thc_mg),
        cbd: Potency::Milligrams(0.0),
        effects: Vec::new(),
        dominant_terpene: None,
        price: 20.0,
        in_stock: true,
        description: String::new(),
    }
}

/// Attach effect tags to a fixture product.
pub fn with_effects(mut product: Product, effects: &[&str]) -> Product {
    product.effects = effects.iter().map(|e| e.to_string()).collect();
    product
}

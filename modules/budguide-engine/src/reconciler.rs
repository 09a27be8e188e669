use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use budguide_common::{
    ConsultationRequest, ConsultationResult, KnowledgeBase, Product, Provenance,
};

use crate::classifier;
use crate::marker;
use crate::prompt;
use crate::selector;
use crate::traits::{GenerationParams, TextGenerator};

/// Shown when the generation call itself fails and no model prose exists.
const FALLBACK_EXPLANATION: &str = "Based on what you're looking for, here are a few picks \
from the current menu. Every product is lab-tested; start low and go slow.";

/// Reconciles a generative response against the catalog: builds the prompt,
/// makes a single bounded call, parses the marker line, resolves ids, and
/// falls back to the deterministic keyword path when anything goes wrong.
/// `consult` never fails from the caller's point of view.
pub struct Reconciler {
    generator: Arc<dyn TextGenerator>,
    knowledge: KnowledgeBase,
    params: GenerationParams,
}

impl Reconciler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            knowledge: KnowledgeBase::builtin(),
            params: GenerationParams::default(),
        }
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Run one consultation against an immutable catalog snapshot.
    ///
    /// Single attempt against the generation service — retries and timeouts
    /// are the caller's concern. Dropping the returned future cancels the
    /// in-flight call; nothing is persisted part-way.
    pub async fn consult(
        &self,
        request: &ConsultationRequest,
        catalog: &[Product],
    ) -> ConsultationResult {
        let consultation_id = Uuid::new_v4();
        let system = prompt::build_system_prompt(&self.knowledge);
        let user = prompt::build_user_prompt(request, catalog);

        debug!(
            %consultation_id,
            experience = %request.experience,
            catalog_size = catalog.len(),
            prompt_chars = user.len(),
            "consultation prompt built"
        );

        match self.generator.generate(&system, &user, self.params).await {
            Ok(text) => self.reconcile(consultation_id, request, catalog, &text),
            Err(error) => {
                warn!(
                    %consultation_id,
                    error = %error,
                    "generation call failed, serving deterministic fallback"
                );
                ConsultationResult {
                    products: fallback_products(request, catalog),
                    explanation: FALLBACK_EXPLANATION.to_string(),
                    provenance: Provenance::Fallback,
                }
            }
        }
    }

    fn reconcile(
        &self,
        consultation_id: Uuid,
        request: &ConsultationRequest,
        catalog: &[Product],
        text: &str,
    ) -> ConsultationResult {
        let (ids, explanation) = match marker::parse_recommendations(text) {
            Some(parsed) => (parsed.ids, parsed.explanation),
            None => (Vec::new(), text.trim().to_string()),
        };

        let products = resolve(&ids, catalog);

        if products.is_empty() {
            info!(
                %consultation_id,
                marker_ids = ids.len(),
                "no marker ids resolved, serving keyword fallback"
            );
            let explanation = if explanation.is_empty() {
                FALLBACK_EXPLANATION.to_string()
            } else {
                explanation
            };
            return ConsultationResult {
                products: fallback_products(request, catalog),
                explanation,
                provenance: Provenance::Fallback,
            };
        }

        info!(
            %consultation_id,
            resolved = products.len(),
            "resolved AI recommendations"
        );
        ConsultationResult {
            products,
            explanation,
            provenance: Provenance::Ai,
        }
    }
}

/// Resolve marker ids against the catalog in marker order. Unknown ids are
/// dropped silently; duplicates resolve once; result is capped.
fn resolve(ids: &[String], catalog: &[Product]) -> Vec<Product> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| catalog.iter().find(|p| &p.id == id))
        .take(selector::DEFAULT_CAP)
        .cloned()
        .collect()
}

fn fallback_products(request: &ConsultationRequest, catalog: &[Product]) -> Vec<Product> {
    selector::select(
        classifier::classify(&request.need_text),
        catalog,
        selector::DEFAULT_CAP,
    )
}

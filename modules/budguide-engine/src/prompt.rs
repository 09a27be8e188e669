use serde::Serialize;

use budguide_common::{ConsultationRequest, KnowledgeBase, Product};

const PERSONA: &str = "You are Sage, a warm and knowledgeable budtender for a licensed \
dispensary. You help customers understand strain effects, potency and terpenes so they \
can make an informed choice. Educational, never clinical; no medical claims.";

/// The response-shaping contract. The reconciler parses exactly this form,
/// so the wording here and the grammar in `marker` move together.
const RESPONSE_INSTRUCTION: &str = "Answer in 2-4 sentences for this customer, grounded in \
the product list you were given. Then end your answer with one final line of exactly this \
form, using ids from the product list:\n\
RECOMMENDED_PRODUCTS=[id_1,id_2,id_3]\n\
Recommend at most 3 products. If nothing in the list fits, end with \
RECOMMENDED_PRODUCTS=[].";

/// Projection of a catalog entry to the fields the model needs. Price and
/// stock stay out of the prompt.
#[derive(Serialize)]
struct ProductPrompt<'a> {
    id: &'a str,
    name: &'a str,
    strain: String,
    thc: String,
    cbd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dominant_terpene: Option<&'a str>,
    effects: &'a [String],
    description: &'a str,
}

impl<'a> ProductPrompt<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            id: &p.id,
            name: &p.name,
            strain: p.strain.to_string(),
            thc: p.thc.to_string(),
            cbd: p.cbd.to_string(),
            dominant_terpene: p.dominant_terpene.as_deref(),
            effects: &p.effects,
            description: &p.description,
        }
    }
}

pub fn build_system_prompt(knowledge: &KnowledgeBase) -> String {
    format!("{PERSONA}\n\n{}\n\n{RESPONSE_INSTRUCTION}", knowledge.text)
}

pub fn build_user_prompt(request: &ConsultationRequest, catalog: &[Product]) -> String {
    let projection: Vec<ProductPrompt> = catalog.iter().map(ProductPrompt::from).collect();
    let products_json =
        serde_json::to_string_pretty(&projection).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Customer experience level: {}\nCustomer need: \"{}\"\n\nAvailable products:\n{}",
        request.experience,
        request.need_text.trim(),
        products_json
    )
}

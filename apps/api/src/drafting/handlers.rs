//! Axum route handlers for the NDA drafting API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drafting::compile_prompt;
use crate::drafting::context::ContextFields;
use crate::drafting::role::{NatureOfObligations, RoleKey};
use crate::drafting::rules::{Instruction, InstructionSpec};
use crate::errors::AppError;
use crate::state::AppState;

/// Bounds the form puts on the confidentiality duration. The compiler itself
/// accepts any value.
pub const MIN_DURATION_MONTHS: u32 = 1;
pub const MAX_DURATION_MONTHS: u32 = 60;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct DraftRequest {
    #[serde(flatten)]
    pub fields: ContextFields,
    /// One of "Receiving Party", "Disclosing Party", "Both (Bilateral)".
    pub party_role: String,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
    pub role_key: RoleKey,
    pub nature_of_obligations: NatureOfObligations,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub prompt: String,
    pub nda_text: String,
}

#[derive(Debug, Serialize)]
pub struct ClauseSummary {
    pub name: String,
    pub description: String,
    pub role_conditioned: bool,
}

/// Full instruction text of one topic. Uniform topics fill `instructions`,
/// role-conditioned ones fill `variants`.
#[derive(Debug, Serialize)]
pub struct ClauseDetail {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Instruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<ClauseVariants>,
}

#[derive(Debug, Serialize)]
pub struct ClauseVariants {
    pub disclosing: Instruction,
    pub receiving: Instruction,
    pub mutual: Instruction,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/nda/clauses
///
/// Lists the clause topics in the order they appear in the prompt.
pub async fn handle_list_clauses(State(state): State<AppState>) -> Json<Vec<ClauseSummary>> {
    Json(
        state
            .rules
            .iter()
            .map(|topic| ClauseSummary {
                name: topic.name.clone(),
                description: topic.description.clone(),
                role_conditioned: topic.spec.is_role_conditioned(),
            })
            .collect(),
    )
}

/// GET /api/v1/nda/clauses/:name
pub async fn handle_get_clause(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ClauseDetail>, AppError> {
    let topic = state
        .rules
        .topic(&name)
        .ok_or_else(|| AppError::NotFound(format!("Clause topic '{name}' not found")))?;

    let (instructions, variants) = match &topic.spec {
        InstructionSpec::Uniform(instruction) => (Some(instruction.clone()), None),
        InstructionSpec::RoleConditioned(v) => (
            None,
            Some(ClauseVariants {
                disclosing: v.disclosing.clone(),
                receiving: v.receiving.clone(),
                mutual: v.mutual.clone(),
            }),
        ),
    };

    Ok(Json(ClauseDetail {
        name: topic.name.clone(),
        description: topic.description.clone(),
        instructions,
        variants,
    }))
}

/// POST /api/v1/nda/prompt
///
/// Compiles the drafting prompt without calling the model. Useful for
/// reviewing exactly what would be sent.
pub async fn handle_compile_prompt(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    validate_request(&request)?;

    let prompt = compile_prompt(&state.rules, &request.fields, &request.party_role);

    Ok(Json(PromptResponse {
        prompt,
        role_key: RoleKey::resolve(&request.party_role),
        nature_of_obligations: NatureOfObligations::from_role_label(&request.party_role),
    }))
}

/// POST /api/v1/nda/draft
///
/// Compiles the prompt and sends it to the drafting model. Returns the prompt
/// alongside the generated contract text so the caller can show both.
pub async fn handle_draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    validate_request(&request)?;

    let prompt = compile_prompt(&state.rules, &request.fields, &request.party_role);

    info!(
        "Drafting NDA: client={:?}, counterparty={:?}, role={:?}",
        request.fields.client_name, request.fields.counterparty_name, request.party_role
    );

    let nda_text = state
        .drafter
        .draft(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("NDA drafting call failed: {e}")))?;

    info!("NDA drafted: {} chars", nda_text.len());

    Ok(Json(DraftResponse { prompt, nda_text }))
}

/// Form-level checks. The compiler accepts anything; these mirror what the
/// form itself enforces.
fn validate_request(request: &DraftRequest) -> Result<(), AppError> {
    let fields = &request.fields;

    if fields.client_name.trim().is_empty() {
        return Err(AppError::Validation("client_name cannot be empty".to_string()));
    }
    if fields.counterparty_name.trim().is_empty() {
        return Err(AppError::Validation(
            "counterparty_name cannot be empty".to_string(),
        ));
    }
    if !(MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&fields.duration) {
        return Err(AppError::Validation(format!(
            "duration must be between {MIN_DURATION_MONTHS} and {MAX_DURATION_MONTHS} months, got {}",
            fields.duration
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafting::context::sample_fields;

    fn request(duration: u32) -> DraftRequest {
        let mut fields = sample_fields();
        fields.duration = duration;
        DraftRequest {
            fields,
            party_role: "Receiving Party".to_string(),
        }
    }

    #[test]
    fn test_duration_bounds() {
        assert!(validate_request(&request(1)).is_ok());
        assert!(validate_request(&request(60)).is_ok());
        assert!(matches!(
            validate_request(&request(0)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_request(&request(61)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_party_names_rejected() {
        let mut r = request(36);
        r.fields.counterparty_name = "   ".to_string();
        let err = validate_request(&r).unwrap_err();
        assert!(err.to_string().contains("counterparty_name"));
    }

    #[test]
    fn test_draft_request_flattens_context_fields() {
        let json = serde_json::json!({
            "client_name": "OCP",
            "client_type_and_address": "Public Company, Casablanca, Morocco",
            "counterparty_name": "Tech Solutions Inc.",
            "counterparty_type_and_address": "Private Company, Paris, France",
            "purpose": "Evaluate a partnership.",
            "applicable_law": "English Law",
            "litigation": "Arbitration under LCIA Rules, seat in London",
            "duration": 24,
            "language": "French",
            "effective_date": "2025-09-01",
            "party_role": "Disclosing Party"
        });
        let r: DraftRequest = serde_json::from_value(json).unwrap();
        assert_eq!(r.party_role, "Disclosing Party");
        assert_eq!(r.fields.duration, 24);
        assert_eq!(r.fields.effective_date.as_deref(), Some("2025-09-01"));
    }
}

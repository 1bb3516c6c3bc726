use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use dsd_core::RouteId;
use dsd_logistics::RouteOption;

use crate::completion::{
    CompletionClient, CompletionRequest, DEFAULT_TIMEOUT, FieldKind, ResponseSchema, complete_within,
};
use crate::result::{AdviceFailure, AdviceSource, AdvisorError};

pub const FALLBACK_REASONING: &str =
    "AI route optimization unavailable (optimizer offline). Defaulting to first available route.";

/// The route the driver should take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecommendation {
    /// Always one of the candidate ids of the request.
    pub selected_route_id: RouteId,
    pub reasoning: String,
    pub source: AdviceSource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutePayload {
    #[serde(default)]
    selected_route_id: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Picks the best of a small set of route candidates.
#[derive(Clone)]
pub struct RouteAdvisor {
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl RouteAdvisor {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Recommend one of `candidates`.
    ///
    /// Fails only on an empty candidate list; remote problems and unknown
    /// route ids fall back to the first candidate.
    pub async fn optimize(&self, candidates: &[RouteOption]) -> Result<RouteRecommendation, AdvisorError> {
        let Some(first) = candidates.first() else {
            return Err(AdvisorError::InvalidInput(
                "at least one route candidate is required".to_string(),
            ));
        };

        match self.ask(candidates).await {
            Ok(rec) => {
                info!(
                    selected_route_id = %rec.selected_route_id,
                    candidates = candidates.len(),
                    "route recommendation produced"
                );
                Ok(rec)
            }
            Err(failure) => {
                warn!(
                    fallback_route_id = %first.id(),
                    error = %failure,
                    "route optimization unavailable; using first candidate"
                );
                Ok(RouteRecommendation {
                    selected_route_id: first.id().clone(),
                    reasoning: FALLBACK_REASONING.to_string(),
                    source: AdviceSource::Fallback(failure),
                })
            }
        }
    }

    async fn ask(&self, candidates: &[RouteOption]) -> Result<RouteRecommendation, AdviceFailure> {
        let prompt = route_prompt(candidates).map_err(|e| {
            AdviceFailure::MalformedResponse(format!("could not encode route candidates: {e}"))
        })?;
        let request = CompletionRequest::new(prompt, route_schema());
        debug!(prompt = %request.prompt, "requesting route optimization");

        let value = complete_within(self.client.as_ref(), &request, self.timeout).await?;
        select_candidate(candidates, value)
    }
}

/// Prompt embedding the candidate list verbatim as JSON.
pub fn route_prompt(candidates: &[RouteOption]) -> Result<String, serde_json::Error> {
    let routes = serde_json::to_string(candidates)?;
    Ok(format!(
        "Act as a Logistics Route Optimization Engine.\n\
         Evaluate the following routes for a heavy delivery truck.\n\
         Consider Traffic (avoid heavy), Weather (avoid storms), and Fuel Cost.\n\
         \n\
         Routes:\n\
         {routes}\n\
         \n\
         Select the best route ID and explain why in a short sentence."
    ))
}

pub fn route_schema() -> ResponseSchema {
    ResponseSchema::new()
        .optional("selectedRouteId", FieldKind::String, None)
        .optional("reasoning", FieldKind::String, None)
}

fn select_candidate(
    candidates: &[RouteOption],
    value: JsonValue,
) -> Result<RouteRecommendation, AdviceFailure> {
    let payload: RoutePayload = serde_json::from_value(value)
        .map_err(|e| AdviceFailure::MalformedResponse(e.to_string()))?;

    let claimed = payload
        .selected_route_id
        .ok_or_else(|| AdviceFailure::MalformedResponse("selectedRouteId missing".to_string()))?;

    let chosen = candidates
        .iter()
        .find(|c| c.id().as_str() == claimed)
        .ok_or_else(|| {
            AdviceFailure::ValidationFailure(format!("selectedRouteId {claimed:?} is not a candidate"))
        })?;

    let reasoning = payload
        .reasoning
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AdviceFailure::MalformedResponse("reasoning missing".to_string()))?;

    Ok(RouteRecommendation {
        selected_route_id: chosen.id().clone(),
        reasoning: reasoning.to_string(),
        source: AdviceSource::Ai,
    })
}

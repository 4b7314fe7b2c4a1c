use crate::errors::FitnessError;
use crate::models::{
    AssistRequest, FeedbackRequest, MealRequest, WorkoutFeedback, WorkoutPayload, WorkoutRequest,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{info, warn};

pub const GENERATE_WORKOUT_PATH: &str = "/api/ai/generate-workout";
pub const UPDATE_WORKOUT_PATH: &str = "/api/ai/update-workout-plan";
pub const MEAL_SUGGESTION_PATH: &str = "/api/ai/generate-meal-suggestion";
pub const ASSIST_PATH: &str = "/api/ai/assist";

/// JSON-over-HTTP client for the AI fitness backend. One request per call,
/// no retries.
#[derive(Clone)]
pub struct FitnessApi {
    http: Client,
    base_url: String,
}

impl FitnessApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FitnessError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate_workout(
        &self,
        request: &WorkoutRequest,
    ) -> Result<WorkoutPayload, FitnessError> {
        let body = self.post(GENERATE_WORKOUT_PATH, request).await?;
        let Some(plan) = body.get("updated_plan") else {
            return Err(FitnessError::missing("updated_plan"));
        };

        match plan.get("raw_response") {
            Some(Value::String(raw)) => Ok(WorkoutPayload::Raw(raw.clone())),
            Some(_) => Err(FitnessError::malformed(
                "updated_plan.raw_response is not a string",
            )),
            None if plan.is_object() => Ok(WorkoutPayload::Structured(plan.clone())),
            None => Err(FitnessError::missing("updated_plan.raw_response")),
        }
    }

    pub async fn update_workout_plan(
        &self,
        request: &FeedbackRequest,
    ) -> Result<WorkoutFeedback, FitnessError> {
        let mut body = self.post(UPDATE_WORKOUT_PATH, request).await?;
        Ok(WorkoutFeedback {
            explanation: string_field(&body, "explanation")?,
            updated_plan: body.remove("updated_plan").filter(|plan| !plan.is_null()),
        })
    }

    pub async fn generate_meal_suggestion(
        &self,
        request: &MealRequest,
    ) -> Result<String, FitnessError> {
        let body = self.post(MEAL_SUGGESTION_PATH, request).await?;
        string_field(&body, "suggestion")
    }

    pub async fn assist(&self, request: &AssistRequest) -> Result<String, FitnessError> {
        let body = self.post(ASSIST_PATH, request).await?;
        string_field(&body, "response")
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        request: &B,
    ) -> Result<Map<String, Value>, FitnessError> {
        let url = format!("{}{path}", self.base_url);
        info!("POST {url}");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{path} answered {status}");
            return Err(FitnessError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(body)) => Ok(body),
            Ok(_) => Err(FitnessError::malformed(format!(
                "{path} did not answer with a JSON object"
            ))),
            Err(err) => Err(FitnessError::malformed(format!(
                "{path} answered invalid JSON: {err}"
            ))),
        }
    }
}

fn string_field(body: &Map<String, Value>, key: &str) -> Result<String, FitnessError> {
    match body.get(key) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Null) | None => Err(FitnessError::missing(key)),
        Some(other) => Ok(other.to_string()),
    }
}

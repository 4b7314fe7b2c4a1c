use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub exercise: String,
    #[serde(deserialize_with = "flexible_string")]
    pub reps: String,
    pub form_tip: String,
    #[serde(
        default,
        deserialize_with = "optional_flexible_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sets: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_flexible_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_flexible_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub rest_seconds: Option<String>,
}

impl Exercise {
    pub fn new(
        exercise: impl Into<String>,
        reps: impl Into<String>,
        form_tip: impl Into<String>,
    ) -> Self {
        Self {
            exercise: exercise.into(),
            reps: reps.into(),
            form_tip: form_tip.into(),
            sets: None,
            duration: None,
            rest_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub plan_name: String,
    pub warm_up: Vec<Exercise>,
    pub main_workout: Vec<Exercise>,
    pub cool_down: Vec<Exercise>,
    #[serde(
        default,
        deserialize_with = "optional_flexible_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_duration_minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_adjustment_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_consideration_note: Option<String>,
}

impl WorkoutPlan {
    pub fn new(plan_name: impl Into<String>) -> Self {
        Self {
            plan_name: plan_name.into(),
            warm_up: Vec::new(),
            main_workout: Vec::new(),
            cool_down: Vec::new(),
            estimated_duration_minutes: None,
            focus: None,
            mood_adjustment_note: None,
            health_consideration_note: None,
        }
    }
}

/// What generate-workout handed back: either the annotated text or an
/// already structured plan object.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutPayload {
    Raw(String),
    Structured(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutFeedback {
    pub explanation: String,
    pub updated_plan: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRequest {
    pub goal: String,
    pub equipment: String,
    pub mood: String,
    pub focus: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub completed: String,
    pub difficulty_rating: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub completed: String,
    pub difficulty_rating: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub current_plan: Option<String>,
}

impl From<FeedbackForm> for FeedbackRequest {
    fn from(form: FeedbackForm) -> Self {
        // The hidden plan field is best effort; a mangled one is dropped.
        let current_plan = form
            .current_plan
            .filter(|text| !text.trim().is_empty())
            .and_then(|text| serde_json::from_str(&text).ok());
        Self {
            completed: form.completed,
            difficulty_rating: form.difficulty_rating,
            notes: form.notes,
            current_plan,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRequest {
    pub meal_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistRequest {
    pub message: String,
    pub level: String,
    pub mood: String,
    pub goal: String,
    pub performance: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub payload: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

fn scalar_to_string<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(E::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_string(Value::deserialize(deserializer)?)
}

fn optional_flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => scalar_to_string(value).map(Some),
    }
}

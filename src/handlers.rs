use crate::errors::{AppError, FitnessError};
use crate::models::{
    AssistRequest, FeedbackForm, FeedbackRequest, HealthResponse, MealRequest, RenderRequest,
    WorkoutPayload, WorkoutPlan, WorkoutRequest,
};
use crate::render::{PlanView, render_plan};
use crate::state::AppState;
use crate::ui::{NextPlan, Page, WorkoutStage, render_page};
use crate::unwrap::plan_from_value;
use crate::views::View;
use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;
use tracing::{info, warn};

pub async fn index() -> Html<String> {
    Html(render_page(&Page::new(View::Menu)))
}

pub async fn show_view(Path(button): Path<String>) -> Result<Html<String>, AppError> {
    let view = View::from_button(&button)
        .ok_or_else(|| AppError::not_found(format!("no view for button '{button}'")))?;
    Ok(Html(render_page(&Page::new(view))))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn render_payload(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<PlanView>, AppError> {
    let plan = state
        .unwrapper
        .unwrap_plan(&request.payload)
        .map_err(AppError::unprocessable)?;
    Ok(Json(render_plan(&plan)))
}

pub async fn submit_workout(
    State(state): State<AppState>,
    Form(request): Form<WorkoutRequest>,
) -> Response {
    let page = Page::new(View::Workout);
    match generate_plan(&state, &request).await {
        Ok(plan) => {
            info!(plan = %plan.plan_name, "rendering generated workout");
            let plan_json = serde_json::to_string(&plan).unwrap_or_default();
            let page = Page {
                workout: WorkoutStage::Planned {
                    plan: render_plan(&plan),
                    plan_json,
                },
                ..page
            };
            Html(render_page(&page)).into_response()
        }
        Err(err) => failure(page, "generate-workout", &err),
    }
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> Response {
    let page = Page::new(View::Workout);
    let request = FeedbackRequest::from(form);
    match state.api.update_workout_plan(&request).await {
        Ok(feedback) => {
            let next = feedback.updated_plan.and_then(next_plan);
            let page = Page {
                workout: WorkoutStage::Reviewed {
                    explanation: feedback.explanation,
                    next,
                },
                ..page
            };
            Html(render_page(&page)).into_response()
        }
        Err(err) => failure(page, "update-workout-plan", &err),
    }
}

pub async fn submit_meal(
    State(state): State<AppState>,
    Form(request): Form<MealRequest>,
) -> Response {
    let page = Page::new(View::Diet);
    match state.api.generate_meal_suggestion(&request).await {
        Ok(suggestion) => {
            let page = Page {
                meal_suggestion: Some(suggestion),
                ..page
            };
            Html(render_page(&page)).into_response()
        }
        Err(err) => failure(page, "generate-meal-suggestion", &err),
    }
}

pub async fn submit_assist(
    State(state): State<AppState>,
    Form(request): Form<AssistRequest>,
) -> Response {
    let page = Page::new(View::Menu);
    match state.api.assist(&request).await {
        Ok(reply) => {
            let page = Page {
                assist_reply: Some(reply),
                ..page
            };
            Html(render_page(&page)).into_response()
        }
        Err(err) => failure(page, "assist", &err),
    }
}

async fn generate_plan(
    state: &AppState,
    request: &WorkoutRequest,
) -> Result<WorkoutPlan, FitnessError> {
    match state.api.generate_workout(request).await? {
        WorkoutPayload::Raw(raw) => state.unwrapper.unwrap_plan(&raw),
        WorkoutPayload::Structured(value) => plan_from_value(value),
    }
}

/// The follow-up plan is either a full plan object or suggestion markup.
fn next_plan(value: Value) -> Option<NextPlan> {
    match value {
        Value::String(markup) if !markup.trim().is_empty() => Some(NextPlan::Markup(markup)),
        Value::Object(_) => match plan_from_value(value) {
            Ok(plan) => Some(NextPlan::Plan(render_plan(&plan))),
            Err(err) => {
                warn!("ignoring unreadable follow-up plan: {err}");
                None
            }
        },
        _ => None,
    }
}

fn failure(page: Page, call: &str, err: &FitnessError) -> Response {
    warn!("{call} failed: {err}");
    let page = page.with_error(err.user_message());
    (StatusCode::BAD_GATEWAY, Html(render_page(&page))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_plan_reads_markup_and_plans() {
        assert!(matches!(
            next_plan(json!("<p>Add a set</p>")),
            Some(NextPlan::Markup(markup)) if markup == "<p>Add a set</p>"
        ));
        assert!(matches!(
            next_plan(json!({
                "plan_name": "Progressed Legs",
                "warm_up": [],
                "main_workout": [],
                "cool_down": []
            })),
            Some(NextPlan::Plan(view)) if view.title == "Progressed Legs"
        ));
    }

    #[test]
    fn next_plan_skips_errors_and_blanks() {
        assert!(next_plan(json!({ "error": "AI response format incorrect" })).is_none());
        assert!(next_plan(json!("   ")).is_none());
        assert!(next_plan(Value::Null).is_none());
    }
}

//! Pulls the workout plan out of the AI's annotated response text.
//!
//! The AI producer wraps its JSON in markdown fences (and sometimes prose),
//! so the document has to be carved out before it can be parsed.

use crate::errors::FitnessError;
use crate::models::WorkoutPlan;
use serde_json::{Map, Value};

/// Length of the "```json" fence the producer emits before the document.
pub const DEFAULT_LEADING_TRIM: usize = 7;
/// Length of the closing "```" fence.
pub const DEFAULT_TRAILING_TRIM: usize = 3;

const PLAN_PHASES: [&str; 3] = ["warm_up", "main_workout", "cool_down"];
const EXERCISE_FIELDS: [&str; 3] = ["exercise", "reps", "form_tip"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extraction {
    /// Drop exactly `leading` characters from the front and `trailing` from the back.
    FixedTrim { leading: usize, trailing: usize },
    /// Take everything from the first `{` to the last `}`.
    #[default]
    Delimited,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseUnwrapper {
    extraction: Extraction,
}

impl ResponseUnwrapper {
    pub fn new(extraction: Extraction) -> Self {
        Self { extraction }
    }

    pub fn fixed(leading: usize, trailing: usize) -> Self {
        Self::new(Extraction::FixedTrim { leading, trailing })
    }

    pub fn extraction(&self) -> Extraction {
        self.extraction
    }

    /// Returns the slice of `payload` that should hold the JSON document.
    pub fn extract<'a>(&self, payload: &'a str) -> Result<&'a str, FitnessError> {
        match self.extraction {
            Extraction::FixedTrim { leading, trailing } => trim_chars(payload, leading, trailing),
            Extraction::Delimited => outer_braces(payload),
        }
    }

    pub fn unwrap_plan(&self, payload: &str) -> Result<WorkoutPlan, FitnessError> {
        let body = self.extract(payload)?;
        let value: Value = serde_json::from_str(body)
            .map_err(|err| FitnessError::malformed(format!("invalid JSON: {err}")))?;
        plan_from_value(value)
    }
}

/// Validates required keys, then decodes a plan from an already parsed document.
pub fn plan_from_value(value: Value) -> Result<WorkoutPlan, FitnessError> {
    let Some(object) = value.as_object() else {
        return Err(FitnessError::malformed("expected a JSON object"));
    };
    check_required(object)?;

    serde_json::from_value(value).map_err(|err| FitnessError::malformed(err.to_string()))
}

fn check_required(object: &Map<String, Value>) -> Result<(), FitnessError> {
    if !object.contains_key("plan_name") {
        return Err(FitnessError::missing("plan_name"));
    }

    for phase in PLAN_PHASES {
        let Some(entries) = object.get(phase) else {
            return Err(FitnessError::missing(phase));
        };
        // Type mismatches are reported by the decoder.
        let Some(entries) = entries.as_array() else {
            continue;
        };
        for (index, entry) in entries.iter().enumerate() {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            if let Some(field) = EXERCISE_FIELDS.iter().find(|field| !entry.contains_key(**field)) {
                return Err(FitnessError::missing(format!("{phase}[{index}].{field}")));
            }
        }
    }

    Ok(())
}

fn trim_chars(payload: &str, leading: usize, trailing: usize) -> Result<&str, FitnessError> {
    let length = payload.chars().count();
    let wrapper = leading.saturating_add(trailing);
    if length < wrapper {
        return Err(FitnessError::malformed(format!(
            "payload has {length} characters, wrapper needs {wrapper}"
        )));
    }

    let start = byte_offset(payload, leading);
    let end = byte_offset(payload, length - trailing);
    Ok(&payload[start..end])
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

fn outer_braces(payload: &str) -> Result<&str, FitnessError> {
    match (payload.find('{'), payload.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&payload[start..=end]),
        _ => Err(FitnessError::malformed("no JSON object found in payload")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;
    use serde_json::json;

    const LEG_DAY: &str = "```json\n{\"plan_name\":\"Leg Day\",\"warm_up\":[],\"main_workout\":[],\"cool_down\":[]}\n```";

    fn fenced(plan: &WorkoutPlan) -> String {
        format!("```json{}```", serde_json::to_string(plan).unwrap())
    }

    fn sample_plan() -> WorkoutPlan {
        let mut plan = WorkoutPlan::new("Beginner Home Workout - Day 1");
        plan.warm_up = vec![
            Exercise::new("Jumping Jacks", "60 seconds", "Land softly."),
            Exercise::new("Arm Circles", "10 each direction", "Keep arms straight."),
        ];
        let mut squat = Exercise::new("Bodyweight Squats", "12", "Keep chest up.");
        squat.sets = Some("3".into());
        squat.rest_seconds = Some("60".into());
        plan.main_workout = vec![squat];
        plan.cool_down = vec![Exercise::new("Quad Stretch", "30 seconds per leg", "Hold a wall.")];
        plan.focus = Some("Full Body".into());
        plan.estimated_duration_minutes = Some("30".into());
        plan
    }

    #[test]
    fn fixed_trim_reads_fenced_leg_day() {
        let unwrapper = ResponseUnwrapper::fixed(DEFAULT_LEADING_TRIM, DEFAULT_TRAILING_TRIM);
        let plan = unwrapper.unwrap_plan(LEG_DAY).unwrap();

        assert_eq!(plan.plan_name, "Leg Day");
        assert!(plan.warm_up.is_empty());
        assert!(plan.main_workout.is_empty());
        assert!(plan.cool_down.is_empty());
    }

    #[test]
    fn fixed_trim_round_trips_a_plan() {
        let unwrapper = ResponseUnwrapper::fixed(7, 3);
        let plan = sample_plan();

        assert_eq!(unwrapper.unwrap_plan(&fenced(&plan)).unwrap(), plan);
    }

    #[test]
    fn fixed_trim_counts_characters_not_bytes() {
        let unwrapper = ResponseUnwrapper::fixed(2, 2);
        assert_eq!(unwrapper.extract("éé{}üü").unwrap(), "{}");
    }

    #[test]
    fn short_payload_is_malformed() {
        let unwrapper = ResponseUnwrapper::fixed(7, 3);
        for payload in ["", "```", "```json\n{"] {
            let err = unwrapper.unwrap_plan(payload).unwrap_err();
            assert!(matches!(err, FitnessError::MalformedPayload(_)), "{payload:?}: {err}");
        }
    }

    #[test]
    fn exact_wrapper_length_leaves_empty_body() {
        let unwrapper = ResponseUnwrapper::fixed(7, 3);
        assert_eq!(unwrapper.extract("```json```").unwrap(), "");
        assert!(matches!(
            unwrapper.unwrap_plan("```json```"),
            Err(FitnessError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_warm_up_is_reported() {
        let unwrapper = ResponseUnwrapper::fixed(7, 3);
        let payload = "```json\n{\"plan_name\":\"Leg Day\",\"main_workout\":[],\"cool_down\":[]}\n```";

        match unwrapper.unwrap_plan(payload) {
            Err(FitnessError::MissingField(field)) => assert_eq!(field, "warm_up"),
            other => panic!("expected missing warm_up, got {other:?}"),
        }
    }

    #[test]
    fn missing_exercise_field_names_its_path() {
        let value = json!({
            "plan_name": "Push",
            "warm_up": [],
            "main_workout": [
                { "exercise": "Push-ups", "reps": "10", "form_tip": "Straight line." },
                { "exercise": "Dips", "form_tip": "Elbows back." }
            ],
            "cool_down": []
        });

        match plan_from_value(value) {
            Err(FitnessError::MissingField(field)) => assert_eq!(field, "main_workout[1].reps"),
            other => panic!("expected missing reps, got {other:?}"),
        }
    }

    #[test]
    fn wrong_types_are_malformed() {
        let value = json!({
            "plan_name": "Push",
            "warm_up": "jog a bit",
            "main_workout": [],
            "cool_down": []
        });
        assert!(matches!(plan_from_value(value), Err(FitnessError::MalformedPayload(_))));
        assert!(matches!(
            plan_from_value(json!(["not", "an", "object"])),
            Err(FitnessError::MalformedPayload(_))
        ));
    }

    #[test]
    fn delimited_ignores_surrounding_prose() {
        let plan = sample_plan();
        let payload = format!(
            "Here is your plan!\n```json\n{}\n```\nStay hydrated.",
            serde_json::to_string_pretty(&plan).unwrap()
        );

        assert_eq!(ResponseUnwrapper::default().unwrap_plan(&payload).unwrap(), plan);
    }

    #[test]
    fn delimited_accepts_plain_json() {
        let plan = ResponseUnwrapper::default()
            .unwrap_plan(r#"{"plan_name":"Leg Day","warm_up":[],"main_workout":[],"cool_down":[]}"#)
            .unwrap();
        assert_eq!(plan.plan_name, "Leg Day");
    }

    #[test]
    fn delimited_without_braces_is_malformed() {
        let unwrapper = ResponseUnwrapper::default();
        for payload in ["", "Sorry, I encountered an error.", "} backwards {"] {
            assert!(matches!(
                unwrapper.unwrap_plan(payload),
                Err(FitnessError::MalformedPayload(_))
            ));
        }
    }
}

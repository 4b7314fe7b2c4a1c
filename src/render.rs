//! Turns a [`WorkoutPlan`] into a view-model and markup.
//!
//! Nothing in here touches page state; `ui` decides where the markup goes.

use crate::models::{Exercise, WorkoutPlan};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseBlock {
    pub name: String,
    pub reps: String,
    pub form_tip: String,
    pub details: Vec<Detail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseView {
    pub title: &'static str,
    pub blocks: Vec<ExerciseBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    pub title: String,
    pub notes: Vec<Detail>,
    pub phases: Vec<PhaseView>,
}

pub fn render_plan(plan: &WorkoutPlan) -> PlanView {
    let notes = [
        ("Focus", &plan.focus),
        ("Duration (minutes)", &plan.estimated_duration_minutes),
        ("Mood", &plan.mood_adjustment_note),
        ("Health", &plan.health_consideration_note),
    ]
    .into_iter()
    .filter_map(|(label, value)| detail(label, value))
    .collect();

    PlanView {
        title: plan.plan_name.clone(),
        notes,
        phases: vec![
            phase("Warm-Up", &plan.warm_up),
            phase("Main Workout", &plan.main_workout),
            phase("Cool Down", &plan.cool_down),
        ],
    }
}

fn phase(title: &'static str, exercises: &[Exercise]) -> PhaseView {
    PhaseView {
        title,
        blocks: exercises.iter().map(exercise_block).collect(),
    }
}

fn exercise_block(exercise: &Exercise) -> ExerciseBlock {
    let details = [
        ("Sets", &exercise.sets),
        ("Duration", &exercise.duration),
        ("Rest (seconds)", &exercise.rest_seconds),
    ]
    .into_iter()
    .filter_map(|(label, value)| detail(label, value))
    .collect();

    ExerciseBlock {
        name: exercise.exercise.clone(),
        reps: exercise.reps.clone(),
        form_tip: exercise.form_tip.clone(),
        details,
    }
}

fn detail(label: &'static str, value: &Option<String>) -> Option<Detail> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| Detail {
            label,
            value: value.to_string(),
        })
}

impl PlanView {
    pub fn block_count(&self) -> usize {
        self.phases.iter().map(|phase| phase.blocks.len()).sum()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(html, r#"<h2 class="plan-title">{}</h2>"#, escape_html(&self.title));

        if !self.notes.is_empty() {
            html.push_str("<ul class=\"plan-notes\">\n");
            for note in &self.notes {
                let _ = writeln!(
                    html,
                    "<li><b>{}:</b> {}</li>",
                    note.label,
                    escape_html(&note.value)
                );
            }
            html.push_str("</ul>\n");
        }

        for phase in &self.phases {
            html.push_str("<section class=\"phase\">\n");
            let _ = writeln!(html, "<h3>{}:</h3>", phase.title);
            if phase.blocks.is_empty() {
                html.push_str("<p class=\"empty\">Nothing scheduled.</p>\n");
            }
            for block in &phase.blocks {
                write_block(&mut html, block);
            }
            html.push_str("</section>\n");
        }

        html
    }
}

fn write_block(html: &mut String, block: &ExerciseBlock) {
    html.push_str("<div class=\"exercise\">\n");
    let _ = writeln!(html, r#"<p class="exercise-name">{}</p>"#, escape_html(&block.name));
    let _ = writeln!(html, r#"<p class="reps">{}</p>"#, escape_html(&block.reps));
    let _ = writeln!(html, r#"<p class="form-tip">{}</p>"#, escape_html(&block.form_tip));
    for detail in &block.details {
        let _ = writeln!(
            html,
            r#"<p class="detail">{}: {}</p>"#,
            detail.label,
            escape_html(&detail.value)
        );
    }
    html.push_str("</div>\n");
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_warm_up(names: &[&str]) -> WorkoutPlan {
        let mut plan = WorkoutPlan::new("Morning Mobility");
        plan.warm_up = names
            .iter()
            .map(|name| Exercise::new(*name, "30 seconds", "Breathe steadily."))
            .collect();
        plan
    }

    #[test]
    fn warm_up_blocks_keep_input_order() {
        let names = ["Jumping Jacks", "Arm Circles", "Hip Openers", "Cat-Cow"];
        let view = render_plan(&plan_with_warm_up(&names));

        let warm_up = &view.phases[0];
        assert_eq!(warm_up.title, "Warm-Up");
        let rendered: Vec<&str> = warm_up.blocks.iter().map(|block| block.name.as_str()).collect();
        assert_eq!(rendered, names);
        assert_eq!(view.block_count(), names.len());
    }

    #[test]
    fn html_has_one_block_per_exercise_in_order() {
        let names = ["Jumping Jacks", "Arm Circles", "Hip Openers"];
        let html = render_plan(&plan_with_warm_up(&names)).to_html();

        assert_eq!(html.matches(r#"<div class="exercise">"#).count(), names.len());
        let positions: Vec<usize> = names.iter().map(|name| html.find(name).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn phases_render_in_fixed_order() {
        let html = render_plan(&WorkoutPlan::new("Rest Day")).to_html();

        let warm = html.find("<h3>Warm-Up:</h3>").unwrap();
        let main = html.find("<h3>Main Workout:</h3>").unwrap();
        let cool = html.find("<h3>Cool Down:</h3>").unwrap();
        assert!(warm < main && main < cool);
        assert_eq!(html.matches("Nothing scheduled.").count(), 3);
    }

    #[test]
    fn optional_fields_become_details_and_notes() {
        let mut plan = WorkoutPlan::new("Push Day");
        let mut press = Exercise::new("Bench Press", "8-10", "Feet planted.");
        press.sets = Some("4".into());
        press.duration = Some("   ".into());
        plan.main_workout.push(press);
        plan.focus = Some("Chest".into());

        let view = render_plan(&plan);
        assert_eq!(
            view.notes,
            vec![Detail {
                label: "Focus",
                value: "Chest".into()
            }]
        );
        let block = &view.phases[1].blocks[0];
        assert_eq!(
            block.details,
            vec![Detail {
                label: "Sets",
                value: "4".into()
            }]
        );
    }

    #[test]
    fn ai_text_is_escaped() {
        let mut plan = WorkoutPlan::new("<script>alert(1)</script>");
        plan.cool_down
            .push(Exercise::new("Stretch & Hold", "\"30\" seconds", "Don't bounce"));

        let html = render_plan(&plan).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Stretch &amp; Hold"));
        assert!(html.contains("&quot;30&quot; seconds"));
        assert!(html.contains("Don&#39;t bounce"));
    }
}

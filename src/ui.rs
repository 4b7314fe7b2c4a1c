use crate::render::{PlanView, escape_html};
use crate::views::View;

/// Where the workout panel is in its request -> plan -> feedback cycle.
#[derive(Debug, Clone, Default)]
pub enum WorkoutStage {
    #[default]
    Request,
    Planned {
        plan: PlanView,
        plan_json: String,
    },
    Reviewed {
        explanation: String,
        next: Option<NextPlan>,
    },
}

#[derive(Debug, Clone)]
pub enum NextPlan {
    Plan(PlanView),
    Markup(String),
}

#[derive(Debug, Clone)]
pub struct Page {
    pub view: View,
    pub workout: WorkoutStage,
    pub meal_suggestion: Option<String>,
    pub assist_reply: Option<String>,
    pub error: Option<String>,
}

impl Page {
    pub fn new(view: View) -> Self {
        Self {
            view,
            workout: WorkoutStage::Request,
            meal_suggestion: None,
            assist_reply: None,
            error: None,
        }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

pub fn render_page(page: &Page) -> String {
    let status = page
        .error
        .as_deref()
        .map(|message| {
            format!(
                r#"<div class="status" id="status" data-type="error" role="alert">{}</div>"#,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    let (content, plan_json, reviewed) = match &page.workout {
        WorkoutStage::Request => (String::new(), String::new(), String::new()),
        WorkoutStage::Planned { plan, plan_json } => {
            (plan.to_html(), escape_html(plan_json), String::new())
        }
        WorkoutStage::Reviewed { explanation, next } => {
            let mut html = format!("<div class=\"explanation\">{explanation}</div>\n");
            match next {
                Some(NextPlan::Plan(plan)) => {
                    html.push_str("<h3>Next session</h3>\n");
                    html.push_str(&plan.to_html());
                }
                Some(NextPlan::Markup(markup)) => {
                    html.push_str("<div class=\"next-steps\">");
                    html.push_str(markup);
                    html.push_str("</div>\n");
                }
                None => {}
            }
            (String::new(), String::new(), html)
        }
    };

    let workout_form = display(matches!(page.workout, WorkoutStage::Request));
    let planned = display(matches!(page.workout, WorkoutStage::Planned { .. }));
    let suggestion = page.meal_suggestion.clone().unwrap_or_default();
    let assist_reply = page
        .assist_reply
        .as_deref()
        .map(|reply| escape_html(reply).replace('\n', "<br>"))
        .unwrap_or_default();

    fill(
        INDEX_HTML,
        &[
            ("STATUS", status),
            ("MENU_DISPLAY", page.view.display_for(View::Menu).to_string()),
            ("WORKOUT_DISPLAY", page.view.display_for(View::Workout).to_string()),
            ("DIET_DISPLAY", page.view.display_for(View::Diet).to_string()),
            ("PROFILE_DISPLAY", page.view.display_for(View::Profile).to_string()),
            ("ABOUT_DISPLAY", page.view.display_for(View::About).to_string()),
            ("WORKOUT_FORM_DISPLAY", workout_form.to_string()),
            ("CONTENT_DISPLAY", planned.to_string()),
            ("CONTENT", content),
            ("FEEDBACK_FORM_DISPLAY", planned.to_string()),
            ("CURRENT_PLAN", plan_json),
            ("CONTENT2", reviewed),
            ("DIET_FORM_DISPLAY", display(page.meal_suggestion.is_none()).to_string()),
            ("INTRO_DIET_DISPLAY", display(page.meal_suggestion.is_some()).to_string()),
            ("CONTENT11", suggestion),
            ("ASSIST_REPLY", assist_reply),
        ],
    )
}

fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// Single pass over the template so text inserted for one placeholder is
/// never scanned for another.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>GymBro</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4f1;
      --bg-2: #b9dcc8;
      --ink: #1f2a27;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f1ea 60%, #f4f8f6 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    nav {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    nav a {
      border-radius: 999px;
      padding: 8px 14px;
      font-weight: 600;
      color: #4d5b57;
      text-decoration: none;
    }

    nav a:hover {
      background: white;
      color: var(--accent-2);
    }

    form {
      display: grid;
      gap: 12px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
      color: #5f5c57;
    }

    input, select, textarea {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .phase {
      display: grid;
      gap: 12px;
    }

    .exercise {
      background: white;
      border-radius: 18px;
      padding: 14px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .exercise p {
      margin: 4px 0;
    }

    .exercise-name {
      font-weight: 600;
      color: var(--accent-2);
    }

    .form-tip {
      color: #6b645d;
      font-style: italic;
    }

    .status[data-type="error"] {
      color: #c63b2b;
      background: rgba(198, 59, 43, 0.08);
      border-radius: 14px;
      padding: 12px 16px;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>GymBro</h1>
    </header>

    <nav>
      <a id="menu" href="/view/menu">Menu</a>
      <a id="workout" href="/view/workout">Workout</a>
      <a id="diet" href="/view/diet">Diet</a>
      <a id="profile" href="/view/profile">Profile</a>
      <a id="about" href="/view/about">About</a>
    </nav>

    {{STATUS}}

    <section id="menu-view" style="display: {{MENU_DISPLAY}};">
      <h2>Ask GymBro</h2>
      <form id="assist-form" method="post" action="/assist">
        <label>Message <textarea name="message" required></textarea></label>
        <label>Level
          <select name="level">
            <option value="beginner">Beginner</option>
            <option value="intermediate">Intermediate</option>
            <option value="advanced">Advanced</option>
          </select>
        </label>
        <label>Mood (1-10) <input name="mood" type="number" min="1" max="10" value="5" /></label>
        <label>Goal <input name="goal" value="general fitness" /></label>
        <label>Recent performance <input name="performance" value="average" /></label>
        <button type="submit">Ask</button>
      </form>
      <div id="assist-reply">{{ASSIST_REPLY}}</div>
    </section>

    <section id="workout-view" style="display: {{WORKOUT_DISPLAY}};">
      <form id="workout-form" method="post" action="/workout" style="display: {{WORKOUT_FORM_DISPLAY}};">
        <label>Goal <input name="goal" value="general fitness" /></label>
        <label>Equipment <input name="equipment" value="bodyweight" /></label>
        <label>Mood (1-10) <input name="mood" type="number" min="1" max="10" value="5" /></label>
        <label>Focus <input name="focus" value="full body" /></label>
        <label>Duration (minutes) <input name="duration" type="number" min="5" value="30" /></label>
        <button type="submit">Generate workout</button>
      </form>

      <div id="content" style="display: {{CONTENT_DISPLAY}};">
{{CONTENT}}
      </div>

      <form id="workout-form2" method="post" action="/workout/feedback" style="display: {{FEEDBACK_FORM_DISPLAY}};">
        <input type="hidden" name="current_plan" value="{{CURRENT_PLAN}}" />
        <label>Completed?
          <select name="completed">
            <option value="yes">Yes</option>
            <option value="partially">Partially</option>
            <option value="no">No</option>
          </select>
        </label>
        <label>Difficulty (1-10) <input name="difficulty_rating" type="number" min="1" max="10" value="5" /></label>
        <label>Notes <textarea name="notes"></textarea></label>
        <button type="submit">Send feedback</button>
      </form>

      <div id="content2">
{{CONTENT2}}
      </div>
    </section>

    <section id="diet-view" style="display: {{DIET_DISPLAY}};">
      <form id="diet-form" method="post" action="/diet" style="display: {{DIET_FORM_DISPLAY}};">
        <label>Meal
          <select name="meal_type">
            <option value="breakfast">Breakfast</option>
            <option value="lunch">Lunch</option>
            <option value="dinner">Dinner</option>
            <option value="snack">Snack</option>
          </select>
        </label>
        <button type="submit">Suggest a meal</button>
      </form>
      <div id="intro-diet" style="display: {{INTRO_DIET_DISPLAY}};">
        <div id="content11">{{CONTENT11}}</div>
        <a href="/view/diet">Another suggestion</a>
      </div>
    </section>

    <section id="profile-view" style="display: {{PROFILE_DISPLAY}};">
      <h2>Profile</h2>
      <p>Your level, goal and mood travel with each request you send.</p>
    </section>

    <section id="about-view" style="display: {{ABOUT_DISPLAY}};">
      <h2>About</h2>
      <p>GymBro builds workouts and meal ideas with an AI fitness coach. Suggestions are not medical advice.</p>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, WorkoutPlan};
    use crate::render::render_plan;

    #[test]
    fn only_the_active_section_is_visible() {
        let html = render_page(&Page::new(View::Diet));

        assert!(html.contains(r#"<section id="diet-view" style="display: block;">"#));
        for hidden in ["menu-view", "workout-view", "profile-view", "about-view"] {
            assert!(html.contains(&format!(r#"<section id="{hidden}" style="display: none;">"#)));
        }
        assert!(!html.contains("{{"));
    }

    #[test]
    fn planned_stage_swaps_forms_and_embeds_plan() {
        let mut plan = WorkoutPlan::new("Leg Day");
        plan.warm_up.push(Exercise::new("Leg Swings", "10 per side", "Hold a rail."));
        let mut page = Page::new(View::Workout);
        page.workout = WorkoutStage::Planned {
            plan: render_plan(&plan),
            plan_json: serde_json::to_string(&plan).unwrap(),
        };

        let html = render_page(&page);
        assert!(html.contains(r#"id="workout-form" method="post" action="/workout" style="display: none;""#));
        assert!(html.contains(r#"action="/workout/feedback" style="display: block;""#));
        assert!(html.contains("Leg Swings"));
        assert!(html.contains("&quot;plan_name&quot;:&quot;Leg Day&quot;"));
    }

    #[test]
    fn error_banner_is_escaped() {
        let html = render_page(&Page::new(View::Menu).with_error("<b>down</b>"));
        assert!(html.contains(r#"role="alert">&lt;b&gt;down&lt;/b&gt;</div>"#));
    }

    #[test]
    fn inserted_text_is_not_treated_as_placeholder() {
        let mut page = Page::new(View::Menu);
        page.assist_reply = Some("Try {{STATUS}} sets\nthen rest".into());

        let html = render_page(&page);
        assert!(html.contains("Try {{STATUS}} sets<br>then rest"));
    }

    #[test]
    fn fill_leaves_unknown_and_unterminated_placeholders() {
        assert_eq!(fill("a {{X}} b {{Y}}", &[("X", "1".into())]), "a 1 b {{Y}}");
        assert_eq!(fill("tail {{open", &[]), "tail {{open");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    Workout,
    Diet,
    Profile,
    About,
}

/// Navigation button id -> view it reveals.
const BUTTONS: [(&str, View); 5] = [
    ("menu", View::Menu),
    ("workout", View::Workout),
    ("diet", View::Diet),
    ("profile", View::Profile),
    ("about", View::About),
];

impl View {
    pub const ALL: [View; 5] = [View::Menu, View::Workout, View::Diet, View::Profile, View::About];

    pub fn from_button(id: &str) -> Option<View> {
        let id = id.trim();
        BUTTONS
            .iter()
            .find(|(button, _)| button.eq_ignore_ascii_case(id))
            .map(|(_, view)| *view)
    }

    pub fn button_id(self) -> &'static str {
        match self {
            View::Menu => "menu",
            View::Workout => "workout",
            View::Diet => "diet",
            View::Profile => "profile",
            View::About => "about",
        }
    }

    pub fn section_id(self) -> &'static str {
        match self {
            View::Menu => "menu-view",
            View::Workout => "workout-view",
            View::Diet => "diet-view",
            View::Profile => "profile-view",
            View::About => "about-view",
        }
    }

    /// CSS `display` value for `section` while `self` is the active view.
    pub fn display_for(self, section: View) -> &'static str {
        if self == section { "block" } else { "none" }
    }
}

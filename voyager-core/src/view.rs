/// Top-level screen shown by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Loading,
    Auth,
    Admin,
    Badge,
    Main,
}

/// Inputs the selector reads from controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewInputs {
    pub has_session: bool,
    pub is_bootstrapping: bool,
    pub is_admin: bool,
    pub show_badge: bool,
}

/// Pick the screen. Priority: Loading > Auth > Admin > Badge > Main.
#[must_use]
pub const fn select_view(inputs: ViewInputs) -> View {
    if inputs.is_bootstrapping {
        View::Loading
    } else if !inputs.has_session {
        View::Auth
    } else if inputs.is_admin {
        View::Admin
    } else if inputs.show_badge {
        View::Badge
    } else {
        View::Main
    }
}

use serde::{Deserialize, Serialize};

/// Which screen the presentation layer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Entry point; resolves to Dashboard or Login depending on the session.
    Home,
    Login,
    Register,
    Dashboard,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Dashboard => write!(f, "/dashboard"),
        }
    }
}

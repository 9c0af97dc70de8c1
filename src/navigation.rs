//! Routes between the login and home views

/// A destination in the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home { username: Option<String> },
}

impl Route {
    pub fn home(username: &str) -> Self {
        Route::Home {
            username: Some(username.to_string()),
        }
    }
}

/// Back stack of routes, rooted at [`Route::Login`]
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Login],
        }
    }

    pub fn current(&self) -> &Route {
        self.stack.last().unwrap_or(&Route::Login)
    }

    pub fn navigate(&mut self, route: Route) {
        log::debug!("Navigating to {:?}", route);
        self.stack.push(route);
    }

    /// Pop the current route. Returns `false` at the root.
    pub fn pop_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// What the user picked on the home view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    /// Back to the login view
    Logout,
    /// Close the app
    Exit,
}

/// The authenticated view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub username: Option<String>,
}

impl HomeView {
    pub fn new(username: Option<String>) -> Self {
        Self { username }
    }

    pub fn from_route(route: &Route) -> Option<Self> {
        match route {
            Route::Home { username } => Some(Self::new(username.clone())),
            Route::Login => None,
        }
    }

    pub fn greeting(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => format!("Welcome {}", name),
            _ => "Welcome".to_string(),
        }
    }
}

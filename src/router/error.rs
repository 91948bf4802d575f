use thiserror::Error;

/// Errors raised while building or resolving routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No entry matches the path
    #[error("No route matches '{path}'")]
    NotFound { path: String },

    /// A name was requested that the table does not define
    #[error("Unknown route '{name}'")]
    UnknownName { name: String },

    /// Building a path for a route lacked one of its parameters
    #[error("Route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },

    /// A parameter value cannot be placed in a single path segment
    #[error("Route '{route}' parameter '{param}' has unusable value '{value}'")]
    InvalidParam {
        route: String,
        param: String,
        value: String,
    },

    /// Redirects did not settle on a view
    #[error("Too many redirects resolving '{path}'")]
    RedirectLoop { path: String },

    /// The table violates one of its structural rules
    #[error("Invalid route table: {message}")]
    InvalidTable { message: String },
}

impl RouteError {
    pub fn error_type(&self) -> &'static str {
        match self {
            RouteError::NotFound { .. } => "route_not_found",
            RouteError::UnknownName { .. } => "unknown_route",
            RouteError::MissingParam { .. } => "missing_param",
            RouteError::InvalidParam { .. } => "invalid_param",
            RouteError::RedirectLoop { .. } => "redirect_loop",
            RouteError::InvalidTable { .. } => "invalid_route_table",
        }
    }
}

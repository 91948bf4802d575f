//! Views and the data actions they run when activated.
//!
//! A view never owns data: it asks the API adapter for it and writes the
//! result into the store, where any other view can read it.

mod location;
mod login;
mod map;

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::router::Resolved;
use crate::store::Store;

pub use location::{coordinates_of, load_location, load_tab};
pub use login::submit_login;
pub use map::{load_map, load_map_filtered};

/// Identifier of a displayable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Shell of the main application; hosts the routed views.
    App,
    Map,
    Location,
    Restaurants,
    Events,
    Login,
}

impl ViewId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::App => "app",
            ViewId::Map => "map",
            ViewId::Location => "location",
            ViewId::Restaurants => "restaurants",
            ViewId::Events => "events",
            ViewId::Login => "login",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Route '{route}' has no '{param}' parameter")]
    MissingParam { route: String, param: String },

    #[error("Location '{id}' has no coordinates")]
    MissingCoordinates { id: String },

    #[error("View '{view}' is not a location tab")]
    NotATab { view: ViewId },

    #[error("Failed to store payload: {0}")]
    Store(#[from] serde_json::Error),
}

impl ViewError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ViewError::Api(e) => e.error_type(),
            ViewError::MissingParam { .. } => "missing_param",
            ViewError::MissingCoordinates { .. } => "missing_coordinates",
            ViewError::NotATab { .. } => "not_a_tab",
            ViewError::Store(_) => "store_error",
        }
    }
}

/// Everything a view may touch.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub client: &'a ApiClient,
    pub store: &'a Store,
}

impl<'a> ViewContext<'a> {
    pub fn new(client: &'a ApiClient, store: &'a Store) -> Self {
        Self { client, store }
    }
}

/// Run the data action of the view selected by `route`, returning the
/// payload it stored. The shell has no data of its own and the login view
/// needs credentials, so activating either leaves the store untouched.
pub async fn activate(ctx: ViewContext<'_>, route: &Resolved) -> Result<Value, ViewError> {
    tracing::debug!(view = %route.view, route = %route.name, "activating view");
    match route.view {
        ViewId::Map => {
            load_map(ctx).await?;
        }
        ViewId::Location => {
            load_location(ctx, route).await?;
        }
        ViewId::Restaurants | ViewId::Events => {
            load_tab(ctx, route).await?;
        }
        ViewId::App | ViewId::Login => {}
    }
    Ok(ctx.store.payload())
}

fn required_param<'r>(route: &'r Resolved, param: &str) -> Result<&'r str, ViewError> {
    route.param(param).ok_or_else(|| ViewError::MissingParam {
        route: route.name.clone(),
        param: param.to_string(),
    })
}

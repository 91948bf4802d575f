//! Application bootstrap.
//!
//! Wires configuration, API client, store and router into a root view
//! descriptor and attaches it to a page's mount point. Two shapes exist:
//! the full application (router + store, root view [`ViewId::App`]) and
//! the minimal login application (root view [`ViewId::Login`], no router).

mod page;

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::config::{Config, ConfigError};
use crate::router::{Resolved, RouteError, RouteTable, RouteTarget, Router};
use crate::store::Store;
use crate::views::{self, ViewContext, ViewError, ViewId};

pub use page::Page;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    #[error("Routing error: {0}")]
    Route(#[from] RouteError),

    #[error("Mount point '{name}' not found on page")]
    MountPointMissing { name: String },

    #[error("An application is already mounted at '{name}'")]
    AlreadyMounted { name: String },

    #[error("This application has no router")]
    NoRouter,
}

impl BootstrapError {
    pub fn error_type(&self) -> &'static str {
        match self {
            BootstrapError::Config(e) => e.error_type(),
            BootstrapError::Api(e) => e.error_type(),
            BootstrapError::Route(e) => e.error_type(),
            BootstrapError::MountPointMissing { .. } => "mount_point_missing",
            BootstrapError::AlreadyMounted { .. } => "already_mounted",
            BootstrapError::NoRouter => "no_router",
        }
    }
}

/// Root view descriptor: the view attached to the mount point plus the
/// views it may display beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootView {
    pub view: ViewId,
    pub children: Vec<ViewId>,
}

impl RootView {
    /// Root for a routed application; children are every view in `table`.
    pub fn for_table(view: ViewId, table: &RouteTable) -> Self {
        let mut children = Vec::new();
        for entry in table.entries() {
            for e in std::iter::once(entry).chain(entry.children.iter()) {
                if let RouteTarget::View(v) = e.target {
                    if !children.contains(&v) {
                        children.push(v);
                    }
                }
            }
        }
        Self { view, children }
    }

    pub fn standalone(view: ViewId) -> Self {
        Self {
            view,
            children: Vec::new(),
        }
    }
}

/// A configured, not yet mounted application.
pub struct Application {
    config: Config,
    client: ApiClient,
    store: Store,
    router: Option<Router>,
    root: RootView,
}

impl Application {
    pub fn builder(config: Config) -> ApplicationBuilder {
        ApplicationBuilder {
            config,
            store: None,
            table: None,
            initial_path: "/".to_string(),
        }
    }

    /// Minimal variant: the login screen with a store and no router.
    pub fn login(config: Config) -> Result<Self, BootstrapError> {
        config.validate()?;
        let client = ApiClient::new(&config.api)?;
        Ok(Self {
            config,
            client,
            store: Store::new(),
            router: None,
            root: RootView::standalone(ViewId::Login),
        })
    }

    pub fn root(&self) -> &RootView {
        &self.root
    }

    /// Attach to the configured mount point. A mount point takes one
    /// application; mounting again fails with [`BootstrapError::AlreadyMounted`].
    pub fn mount(self, page: &mut Page) -> Result<MountedApp, BootstrapError> {
        let mount_point = self.config.app.mount_point.clone();
        page.attach(&mount_point, self.root.view)?;
        tracing::info!(
            mount_point = %mount_point,
            root = %self.root.view,
            route = self.router.as_ref().map(|r| r.current().name.as_str()).unwrap_or("-"),
            "application mounted"
        );

        Ok(MountedApp {
            mount_point,
            client: self.client,
            store: self.store,
            router: self.router,
            root: self.root,
        })
    }
}

pub struct ApplicationBuilder {
    config: Config,
    store: Option<Store>,
    table: Option<RouteTable>,
    initial_path: String,
}

impl ApplicationBuilder {
    /// Share an existing store instead of creating one.
    pub fn store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    /// Use `table` instead of [`RouteTable::letsmeet`].
    pub fn routes(mut self, table: RouteTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Path the router resolves at startup (default `/`).
    pub fn initial_path(mut self, path: &str) -> Self {
        self.initial_path = path.to_string();
        self
    }

    pub fn build(self) -> Result<Application, BootstrapError> {
        self.config.validate()?;
        let client = ApiClient::new(&self.config.api)?;

        let table = match self.table {
            Some(table) => {
                table.validate()?;
                table
            }
            None => RouteTable::letsmeet(),
        };
        let root = RootView::for_table(ViewId::App, &table);
        let router = Router::new(table, &self.config.app.fallback_route, &self.initial_path)?;

        Ok(Application {
            config: self.config,
            client,
            store: self.store.unwrap_or_default(),
            router: Some(router),
            root,
        })
    }
}

/// A running application attached to a page.
pub struct MountedApp {
    mount_point: String,
    client: ApiClient,
    store: Store,
    router: Option<Router>,
    root: RootView,
}

impl MountedApp {
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn root(&self) -> &RootView {
        &self.root
    }

    pub fn router(&self) -> Option<&Router> {
        self.router.as_ref()
    }

    /// The view currently shown: the active route's view, or the root
    /// view when there is no router.
    pub fn active_view(&self) -> ViewId {
        self.router
            .as_ref()
            .map(|r| r.current().view)
            .unwrap_or(self.root.view)
    }

    pub fn context(&self) -> ViewContext<'_> {
        ViewContext::new(&self.client, &self.store)
    }

    /// Navigate to `path`; unmatched paths land on the fallback route.
    pub fn navigate(&mut self, path: &str) -> Result<&Resolved, BootstrapError> {
        let router = self.router.as_mut().ok_or(BootstrapError::NoRouter)?;
        Ok(router.push(path)?)
    }

    /// Navigate to the route called `name` with `params`.
    pub fn navigate_named(
        &mut self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<&Resolved, BootstrapError> {
        let router = self.router.as_mut().ok_or(BootstrapError::NoRouter)?;
        Ok(router.push_named(name, params)?)
    }

    /// Run the active route's data action.
    pub async fn refresh(&self) -> Result<Value, ViewError> {
        match &self.router {
            Some(router) => views::activate(self.context(), router.current()).await,
            None => Ok(self.store.payload()),
        }
    }

    /// Submit credentials from the login view.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value, ViewError> {
        views::submit_login(self.context(), username, password).await
    }
}

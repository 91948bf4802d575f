//! Command line front end over the library.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::app::{Application, MountedApp, Page};
use crate::config::{Config, ConfigStore};
use crate::router::{Resolved, RouteEntry, RouteTarget};

/// Browse letsmeet map points and locations from the terminal
#[derive(Parser, Debug)]
#[command(name = "letsmeet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/letsmeet/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all map points
    Points {
        /// Keep roughly this share of points (server side)
        #[arg(long)]
        filter: Option<f32>,
    },

    /// Show one location by id
    Point { id: String },

    /// Log in with a username and password
    Login {
        username: String,

        #[arg(long, env = "LETSMEET_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Resolve a path against the route table
    Navigate {
        path: String,

        /// Also load the data of the resolved view
        #[arg(long)]
        fetch: bool,
    },

    /// Print the route table
    Routes,
}

impl Cli {
    /// Resolve configuration: file (or defaults) plus command line overrides.
    pub fn load_config(&self) -> Result<ConfigStore> {
        let path = self.config.clone().unwrap_or_else(Config::config_path);
        let config = Config::load_from(&path)?;
        let store = ConfigStore::new(config);

        if let Some(base_url) = &self.base_url {
            store.update(|c| c.api.base_url = base_url.clone())?;
        }
        Ok(store)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?.get();
    let mut page = Page::with_mount_points([config.app.mount_point.clone()]);

    match cli.command {
        Command::Points { filter } => {
            let app = mount_main(config, "/map", &mut page)?;
            let points = match filter {
                Some(f) => crate::views::load_map_filtered(app.context(), f).await?,
                None => crate::views::load_map(app.context()).await?,
            };
            for point in points {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    point.id, point.category, point.label, point.latitude, point.longitude
                );
            }
        }
        Command::Point { id } => {
            let mut app = mount_main(config, "/map", &mut page)?;
            app.navigate_named("location", &BTreeMap::from([("id".to_string(), id)]))?;
            print_json(&app.refresh().await?)?;
        }
        Command::Login { username, password } => {
            let app = Application::login(config)?.mount(&mut page)?;
            print_json(&app.login(&username, &password).await?)?;
        }
        Command::Navigate { path, fetch } => {
            let mut app = mount_main(config, "/", &mut page)?;
            let resolved = app.navigate(&path)?.clone();
            print_route(&resolved);
            if fetch {
                print_json(&app.refresh().await?)?;
            }
        }
        Command::Routes => {
            let app = mount_main(config, "/", &mut page)?;
            if let Some(router) = app.router() {
                for entry in router.table().entries() {
                    print_entry(entry, "");
                }
            }
        }
    }
    Ok(())
}

fn mount_main(config: Config, initial: &str, page: &mut Page) -> Result<MountedApp> {
    let app = Application::builder(config)
        .initial_path(initial)
        .build()
        .context("Failed to build application")?;
    Ok(app.mount(page)?)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_route(resolved: &Resolved) {
    println!("route: {}", resolved.name);
    println!("path: {}", resolved.path);
    println!("view: {}", resolved.view);
    for (key, value) in &resolved.params {
        println!("param: {}={}", key, value);
    }
    if let Some(from) = &resolved.redirected_from {
        println!("redirected from: {}", from);
    }
    if let Some(from) = &resolved.fallback_from {
        println!("fallback from: {}", from);
    }
}

fn print_entry(entry: &RouteEntry, indent: &str) {
    let name = entry.name.as_deref().unwrap_or("-");
    match &entry.target {
        RouteTarget::View(view) => println!("{}{}\t{}\t{}", indent, entry.path, name, view),
        RouteTarget::Redirect(to) => println!("{}{}\t{}\t-> {}", indent, entry.path, name, to),
    }
    for child in &entry.children {
        print_entry(child, "  ");
    }
}

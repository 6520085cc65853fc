//! # Route Tables
//!
//! Declarative route definitions loaded from YAML, TOML, or JSON.
//!
//! ```yaml
//! routes:
//!   - method: GET
//!     path: /users/:id
//!     handler: get_user
//!     handler_id: 1
//!   - method: GET
//!     path: /static/*
//!     handler: static_files
//! ```
//!
//! The TOML form uses an array of tables (`[[routes]]`) with the same keys.
//! `handler_id` defaults to `0`.
//!
//! A table names handlers by string. [`RouteTable::build_router`] turns those
//! names into real handlers through a resolver supplied by the caller.

use anyhow::{anyhow, bail, Context, Result};
use http::Method;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::router::{HandlerId, Router};
use crate::runtime_config::RuntimeConfig;

/// One route as written in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub method: String,
    pub path: String,
    pub handler: String,
    #[serde(default)]
    pub handler_id: HandlerId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// Supported file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Yaml,
    Toml,
    Json,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(TableFormat::Yaml),
            "toml" => Ok(TableFormat::Toml),
            "json" => Ok(TableFormat::Json),
            _ => bail!(
                "unsupported route table extension {:?} for {}",
                ext,
                path.display()
            ),
        }
    }
}

impl RouteTable {
    /// Load a table from disk, choosing the parser from the file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)?;
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        let table = Self::parse(&text, format)
            .with_context(|| format!("failed to parse route table {}", path.display()))?;

        info!(
            path = %path.display(),
            routes_count = table.routes.len(),
            "Loaded route table"
        );
        Ok(table)
    }

    pub fn parse(text: &str, format: TableFormat) -> Result<Self> {
        let table = match format {
            TableFormat::Yaml => serde_yaml::from_str(text)?,
            TableFormat::Toml => toml::from_str(text)?,
            TableFormat::Json => serde_json::from_str(text)?,
        };
        Ok(table)
    }

    /// Build a router, resolving each entry's handler name with `resolve`.
    ///
    /// Entries are registered in table order, so a later duplicate overrides an
    /// earlier one. Fails on an invalid method or an unresolved handler.
    pub fn build_router<H, F>(&self, config: RuntimeConfig, mut resolve: F) -> Result<Router<H>>
    where
        F: FnMut(&RouteEntry) -> Option<H>,
    {
        let mut router = Router::with_config(config);
        for entry in &self.routes {
            let method = parse_method(&entry.method)?;
            let handler = resolve(entry).ok_or_else(|| {
                anyhow!(
                    "no handler named {:?} for {} {}",
                    entry.handler,
                    entry.method,
                    entry.path
                )
            })?;
            router.add(method, &entry.path, handler, entry.handler_id);
        }
        Ok(router)
    }

    /// Build a router whose handlers are the handler names themselves.
    pub fn build_named_router(&self, config: RuntimeConfig) -> Result<Router<String>> {
        self.build_router(config, |entry| Some(entry.handler.clone()))
    }
}

/// Parse a method name, accepting any case (`get` → `GET`).
pub fn parse_method(name: &str) -> Result<Method> {
    Method::from_bytes(name.trim().to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method {name:?}"))
}

//! Exact-path lookup over a [`Document`].
//!
//! A lookup either returns the whole document (no segments) or one fully
//! specified environment (all three segments). Anything in between is
//! `NotFound`, including a repository-only path that names an existing
//! repository. Names are compared exactly and the first sibling with a
//! matching name wins.

use std::fmt;

use serde::Serialize;

use crate::errors::{ConfigStoreError, Result};
use crate::model::{Document, Environment};

/// Up to three lookup segments: repository, app, environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPath<'a> {
    pub repo: Option<&'a str>,
    pub app: Option<&'a str>,
    pub environment: Option<&'a str>,
}

impl<'a> ConfigPath<'a> {
    /// The empty path, selecting the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn repository(repo: &'a str) -> Self {
        Self {
            repo: Some(repo),
            ..Self::default()
        }
    }

    pub fn environment(repo: &'a str, app: &'a str, environment: &'a str) -> Self {
        Self {
            repo: Some(repo),
            app: Some(app),
            environment: Some(environment),
        }
    }
}

impl fmt::Display for ConfigPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let segments = [self.repo, self.app, self.environment];
        let mut first = true;
        for segment in segments.into_iter().flatten() {
            if !first {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

/// Successful lookup. Serializes as the bare document or environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolution<'a> {
    Document(&'a Document),
    Environment(&'a Environment),
}

/// Resolve `path` against `document`.
pub fn resolve<'d>(document: &'d Document, path: &ConfigPath<'_>) -> Result<Resolution<'d>> {
    let Some(repo_name) = path.repo else {
        return Ok(Resolution::Document(document));
    };

    let not_found = || ConfigStoreError::NotFound {
        path: path.to_string(),
    };

    let repo = document
        .repositories
        .iter()
        .find(|r| r.name == repo_name)
        .ok_or_else(not_found)?;

    // No repository- or app-level response exists.
    let (Some(app_name), Some(env_name)) = (path.app, path.environment) else {
        return Err(not_found());
    };

    let app = repo
        .apps
        .iter()
        .find(|a| a.app_name == app_name)
        .ok_or_else(not_found)?;

    app.environments
        .iter()
        .find(|e| e.name == env_name)
        .map(Resolution::Environment)
        .ok_or_else(not_found)
}

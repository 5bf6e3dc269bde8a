use std::{fmt, str::FromStr};

use axum::{response::Html, routing::get, Router};

use crate::include_res;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn base_path(self) -> &'static str {
        match self {
            BuildMode::Development => "/dev",
            BuildMode::Production => "",
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            other => Err(format!("unknown build mode {other:?}")),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Profile,
    Friends,
    OtherUsers,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Profile, Page::Friends, Page::OtherUsers];

    pub fn path(self) -> &'static str {
        use Page::*;
        match self {
            Profile => "/",
            Friends => "/friends/",
            OtherUsers => "/otherusers/",
        }
    }

    fn shell(self) -> &'static str {
        use Page::*;
        match self {
            Profile => include_res!(str, "/pages/profile.html"),
            Friends => include_res!(str, "/pages/friends.html"),
            OtherUsers => include_res!(str, "/pages/otherusers.html"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Routes {
    base: &'static str,
}

impl Routes {
    pub fn new(mode: BuildMode) -> Self {
        Routes { base: mode.base_path() }
    }

    pub fn href(&self, page: Page) -> String {
        format!("{}{}", self.base, page.path())
    }

    /// Exact match only.
    pub fn resolve(&self, path: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| self.href(*page) == path)
    }
}

/// Serves each page's shell at its path under the mode's base.
pub fn router(mode: BuildMode) -> Router {
    let routes = Routes::new(mode);
    let base = mode.base_path();

    Page::ALL.into_iter().fold(Router::new(), |app, page| {
        app.route(
            &routes.href(page),
            get(move || async move { Html(page.shell().replace("{base}", base)) }),
        )
    })
}

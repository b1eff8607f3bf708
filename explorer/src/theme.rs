// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;
use std::str::FromStr;

use axum::headers::Cookie;
use serde::Serialize;

/// Name of the cookie persisting the theme preference.
pub const THEME_COOKIE: &str = "theme";

/// Cookie lifetime in seconds (one year).
const THEME_COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

/// Colour theme of the explorer page.
///
/// Changing the theme reloads the whole page, the stylesheets and logo are never swapped on a
/// rendered page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default theme.
    #[default]
    Light,

    /// Dark editor and toolbar.
    Dark,
}

/// Unknown theme name.
#[derive(thiserror::Error, Debug)]
#[error("unknown theme '{0}', expected 'light' or 'dark'")]
pub struct ThemeError(pub String);

impl Theme {
    /// All themes in the order they are offered in the theme menu.
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Returns the persisted theme, falling back to the default for missing or unknown values.
    pub fn from_cookie(cookie: Option<&Cookie>) -> Self {
        cookie
            .and_then(|cookie| cookie.get(THEME_COOKIE))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Value of the `Set-Cookie` header persisting this theme.
    pub fn set_cookie_header(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            THEME_COOKIE, self, THEME_COOKIE_MAX_AGE
        )
    }

    /// Stylesheets to load, in order.
    pub fn stylesheets(&self) -> &'static [&'static str] {
        match self {
            Theme::Light => &["/assets/explorer.css"],
            Theme::Dark => &["/assets/explorer.css", "/assets/darktheme.css"],
        }
    }

    /// Logo shown in the toolbar.
    pub fn logo(&self) -> &'static str {
        match self {
            Theme::Light => "/assets/logo.svg",
            Theme::Dark => "/assets/logo-white.svg",
        }
    }

    /// Label shown in the theme menu.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ThemeError(value.to_string())),
        }
    }
}

//! PDF viewer display preferences.
//!
//! These ride along on the response configuration and reach the renderer
//! factory inside the settings snapshot. Engines that expose viewer
//! preferences apply them; engines without that channel ignore them.
//! Tokens are case-sensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Initial zoom applied when the document is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DisplayMode {
    /// Fit the whole page on screen (`"fullpage"`).
    FullPage,
    /// Fit the page width (`"fullwidth"`).
    FullWidth,
    /// Display at physical size (`"real"`).
    Real,
    /// Leave the choice to the viewer (`"default"`).
    Default,
    /// Fixed percentage zoom; any positive integer token.
    Zoom(u16),
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Default
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::FullPage => write!(f, "fullpage"),
            DisplayMode::FullWidth => write!(f, "fullwidth"),
            DisplayMode::Real => write!(f, "real"),
            DisplayMode::Default => write!(f, "default"),
            DisplayMode::Zoom(percent) => write!(f, "{percent}"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullpage" => Ok(DisplayMode::FullPage),
            "fullwidth" => Ok(DisplayMode::FullWidth),
            "real" => Ok(DisplayMode::Real),
            "default" => Ok(DisplayMode::Default),
            other => other
                .parse::<u16>()
                .ok()
                .filter(|percent| *percent > 0)
                .map(DisplayMode::Zoom)
                .ok_or_else(|| ConfigurationError::UnknownDisplayMode(s.to_string())),
        }
    }
}

impl From<DisplayMode> for String {
    fn from(mode: DisplayMode) -> Self {
        mode.to_string()
    }
}

impl TryFrom<String> for DisplayMode {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Page layout used by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DisplayLayout {
    /// One page at a time (`"single"`).
    Single,
    /// Pages in one scrolling column (`"continuous"`).
    Continuous,
    /// Two-page spreads (`"two"`).
    Two,
    /// Leave the choice to the viewer (`"default"`).
    Default,
}

impl Default for DisplayLayout {
    /// `Continuous`, the stock layout.
    fn default() -> Self {
        DisplayLayout::Continuous
    }
}

impl fmt::Display for DisplayLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayLayout::Single => write!(f, "single"),
            DisplayLayout::Continuous => write!(f, "continuous"),
            DisplayLayout::Two => write!(f, "two"),
            DisplayLayout::Default => write!(f, "default"),
        }
    }
}

impl FromStr for DisplayLayout {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(DisplayLayout::Single),
            "continuous" => Ok(DisplayLayout::Continuous),
            "two" => Ok(DisplayLayout::Two),
            "default" => Ok(DisplayLayout::Default),
            _ => Err(ConfigurationError::UnknownDisplayLayout(s.to_string())),
        }
    }
}

impl From<DisplayLayout> for String {
    fn from(layout: DisplayLayout) -> Self {
        layout.to_string()
    }
}

impl TryFrom<String> for DisplayLayout {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

//! Page margin value object.
//!
//! Margins travel on the response as the comma-separated string form
//! (`"top,right,bottom,left,header,footer"`, millimetres) and are parsed
//! into this struct when the renderer is built. Parsing is the only way
//! a malformed string is detected, so it happens before any backend work.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Margin field names, in positional parse order.
const FIELDS: [&str; 6] = ["top", "right", "bottom", "left", "header", "footer"];

/// The six page margins, in millimetres.
///
/// Every value is a strictly positive integer; [`Margins::parse`] rejects
/// anything else. The string forms accepted and produced here match the
/// [`PdfResponse::margins`](crate::PdfResponse) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Margins {
    /// Top page margin.
    pub top: u32,
    /// Right page margin.
    pub right: u32,
    /// Bottom page margin.
    pub bottom: u32,
    /// Left page margin.
    pub left: u32,
    /// Header distance from the page edge.
    pub header: u32,
    /// Footer distance from the page edge.
    pub footer: u32,
}

impl Margins {
    /// Parse the `"top,right,bottom,left,header,footer"` form.
    ///
    /// Tokens are trimmed before conversion. The string must hold exactly
    /// six values, each a strictly positive integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MarginCount`] on the wrong number of
    /// values and [`ConfigurationError::MarginValue`] on a token that is
    /// not a positive integer.
    pub fn parse(input: &str) -> Result<Self, ConfigurationError> {
        let tokens: Vec<&str> = input.split(',').collect();
        if tokens.len() != FIELDS.len() {
            return Err(ConfigurationError::MarginCount {
                count: tokens.len(),
            });
        }

        let mut values = [0u32; 6];
        for (position, raw) in tokens.iter().enumerate() {
            let token = raw.trim();
            let value = token
                .parse::<i64>()
                .ok()
                .filter(|parsed| *parsed > 0)
                .and_then(|parsed| u32::try_from(parsed).ok())
                .ok_or_else(|| ConfigurationError::MarginValue {
                    field: FIELDS[position],
                    value: token.to_string(),
                })?;
            values[position] = value;
        }

        Ok(Self {
            top: values[0],
            right: values[1],
            bottom: values[2],
            left: values[3],
            header: values[4],
            footer: values[5],
        })
    }
}

impl Default for Margins {
    /// The stock margins: `16,15,16,15,9,9`.
    fn default() -> Self {
        Self {
            top: 16,
            right: 15,
            bottom: 16,
            left: 15,
            header: 9,
            footer: 9,
        }
    }
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.top, self.right, self.bottom, self.left, self.header, self.footer
        )
    }
}

impl FromStr for Margins {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Margins> for String {
    fn from(margins: Margins) -> Self {
        margins.to_string()
    }
}

impl TryFrom<String> for Margins {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

//! Page format and orientation tokens.
//!
//! Formats mirror the named paper sizes understood by HTML-to-PDF
//! engines: the ISO A/B/C series, the oversized `4A0`/`2A0` sheets, the
//! RA/SRA raw print series, the common North American sizes, and the
//! British book trade sizes including the `A`/`B` paperback formats.
//! Tokens parse case-insensitively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A named paper size.
///
/// Indexed series variants carry the size number (`IsoA(4)` is `A4`).
/// [`FromStr`] accepts `A0`–`A10`, `B0`–`B10`, `C0`–`C10`, `RA0`–`RA4`
/// and `SRA0`–`SRA4`; values outside those ranges never parse, although
/// the variants themselves can hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PageFormat {
    /// ISO 216 A series (`A4` is 210 × 297 mm).
    IsoA(u8),
    /// ISO 216 B series.
    IsoB(u8),
    /// ISO 269 C series (envelope sizes).
    IsoC(u8),
    /// 4A0 oversize sheet, 1682 × 2378 mm.
    FourA0,
    /// 2A0 oversize sheet, 1189 × 1682 mm.
    TwoA0,
    /// ISO RA untrimmed print series.
    Ra(u8),
    /// ISO SRA untrimmed print series.
    Sra(u8),
    /// US Letter, 215.9 × 279.4 mm.
    Letter,
    /// US Legal, 215.9 × 355.6 mm.
    Legal,
    /// US Executive, 184.15 × 266.7 mm.
    Executive,
    /// Folio, 210 × 330 mm.
    Folio,
    /// Demy octavo book size, 138 × 216 mm.
    Demy,
    /// Royal octavo book size, 156 × 234 mm.
    Royal,
    /// Type A paperback, 111 × 178 mm.
    PaperbackA,
    /// Type B paperback, 128 × 198 mm.
    PaperbackB,
}

impl PageFormat {
    /// Portrait sheet dimensions in millimetres, `(width, height)`.
    ///
    /// ISO series sizes are derived by repeated halving of the series
    /// base sheet, rounding down, which reproduces the standard tables.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PageFormat::IsoA(n) => halved(841, 1189, *n),
            PageFormat::IsoB(n) => halved(1000, 1414, *n),
            PageFormat::IsoC(n) => halved(917, 1297, *n),
            PageFormat::FourA0 => (1682.0, 2378.0),
            PageFormat::TwoA0 => (1189.0, 1682.0),
            PageFormat::Ra(n) => halved(860, 1220, *n),
            PageFormat::Sra(n) => halved(900, 1280, *n),
            PageFormat::Letter => (215.9, 279.4),
            PageFormat::Legal => (215.9, 355.6),
            PageFormat::Executive => (184.15, 266.7),
            PageFormat::Folio => (210.0, 330.0),
            PageFormat::Demy => (138.0, 216.0),
            PageFormat::Royal => (156.0, 234.0),
            PageFormat::PaperbackA => (111.0, 178.0),
            PageFormat::PaperbackB => (128.0, 198.0),
        }
    }
}

/// Halve an ISO base sheet `n` times, rounding down each step.
fn halved(mut width: u32, mut height: u32, times: u8) -> (f64, f64) {
    for _ in 0..times {
        let next_width = height / 2;
        height = width;
        width = next_width;
    }
    (f64::from(width), f64::from(height))
}

impl Default for PageFormat {
    /// `A4`.
    fn default() -> Self {
        PageFormat::IsoA(4)
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageFormat::IsoA(n) => write!(f, "A{n}"),
            PageFormat::IsoB(n) => write!(f, "B{n}"),
            PageFormat::IsoC(n) => write!(f, "C{n}"),
            PageFormat::FourA0 => write!(f, "4A0"),
            PageFormat::TwoA0 => write!(f, "2A0"),
            PageFormat::Ra(n) => write!(f, "RA{n}"),
            PageFormat::Sra(n) => write!(f, "SRA{n}"),
            PageFormat::Letter => write!(f, "Letter"),
            PageFormat::Legal => write!(f, "Legal"),
            PageFormat::Executive => write!(f, "Executive"),
            PageFormat::Folio => write!(f, "Folio"),
            PageFormat::Demy => write!(f, "Demy"),
            PageFormat::Royal => write!(f, "Royal"),
            PageFormat::PaperbackA => write!(f, "A"),
            PageFormat::PaperbackB => write!(f, "B"),
        }
    }
}

impl FromStr for PageFormat {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_uppercase();
        let unknown = || ConfigurationError::UnknownPageFormat(s.to_string());

        match token.as_str() {
            "4A0" => return Ok(PageFormat::FourA0),
            "2A0" => return Ok(PageFormat::TwoA0),
            "LETTER" => return Ok(PageFormat::Letter),
            "LEGAL" => return Ok(PageFormat::Legal),
            "EXECUTIVE" => return Ok(PageFormat::Executive),
            "FOLIO" => return Ok(PageFormat::Folio),
            "DEMY" => return Ok(PageFormat::Demy),
            "ROYAL" => return Ok(PageFormat::Royal),
            "A" => return Ok(PageFormat::PaperbackA),
            "B" => return Ok(PageFormat::PaperbackB),
            _ => {}
        }

        let series_index = |rest: &str, max: u8| -> Option<u8> {
            rest.parse::<u8>().ok().filter(|n| *n <= max)
        };

        if let Some(rest) = token.strip_prefix("SRA") {
            return series_index(rest, 4).map(PageFormat::Sra).ok_or_else(unknown);
        }
        if let Some(rest) = token.strip_prefix("RA") {
            return series_index(rest, 4).map(PageFormat::Ra).ok_or_else(unknown);
        }
        if let Some(rest) = token.strip_prefix('A') {
            return series_index(rest, 10).map(PageFormat::IsoA).ok_or_else(unknown);
        }
        if let Some(rest) = token.strip_prefix('B') {
            return series_index(rest, 10).map(PageFormat::IsoB).ok_or_else(unknown);
        }
        if let Some(rest) = token.strip_prefix('C') {
            return series_index(rest, 10).map(PageFormat::IsoC).ok_or_else(unknown);
        }

        Err(unknown())
    }
}

impl From<PageFormat> for String {
    fn from(format: PageFormat) -> Self {
        format.to_string()
    }
}

impl TryFrom<String> for PageFormat {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Upright pages.
    #[default]
    Portrait,
    /// Rotated pages.
    Landscape,
}

impl Orientation {
    /// Single-letter code form (`"P"` / `"L"`).
    pub fn code(&self) -> &'static str {
        match self {
            Orientation::Portrait => "P",
            Orientation::Landscape => "L",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "p" | "portrait" => Ok(Orientation::Portrait),
            "l" | "landscape" => Ok(Orientation::Landscape),
            _ => Err(ConfigurationError::UnknownOrientation(s.to_string())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

//! Per-request inputs that get rendered into prompt text.
//!
//! None of these values change pipeline behaviour; they only show up as
//! descriptive filler inside the prompts.

use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device the request is assumed to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    #[default]
    Mobile,
    Desktop,
    Tablet,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "mobile",
            Device::Desktop => "desktop",
            Device::Tablet => "tablet",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of when and where a request happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    pub device: Device,
    pub location: String,
}

impl Context {
    pub fn at(time: NaiveTime) -> Self {
        Self {
            time: time.format("%H:%M").to_string(),
            device: Device::default(),
            location: "home".to_string(),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{time: {}, device: {}, location: {}}}",
            self.time, self.device, self.location
        )
    }
}

/// Build the context for a request happening now.
pub fn current_context() -> Context {
    Context::at(Local::now().time())
}

/// Languages offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Spanish,
    Mandarin,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Hindi,
        Language::Spanish,
        Language::Mandarin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Spanish => "Spanish",
            Language::Mandarin => "Mandarin",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown language '{s}', expected one of: {}",
                    Language::ALL.map(|l| l.as_str()).join(", ")
                )
            })
    }
}

/// User preferences for a single request.
///
/// `include_products` is carried into the prompt as text only. It does not
/// filter categories in either the prompt or the parsed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: Language,
    pub include_products: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::English,
            include_products: true,
        }
    }
}

impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{language: {}, include_products: {}}}",
            self.language, self.include_products
        )
    }
}

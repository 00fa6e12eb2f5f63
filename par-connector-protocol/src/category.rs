//! Tab categories.
//!
//! Every tab is backed by one feature area. The serialized form is the
//! `tabType` string the host process expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The feature area backing a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TabCategory {
    /// Generic chat.
    #[serde(rename = "cwc")]
    Chat,
    /// Feature development conversations.
    #[serde(rename = "featuredev")]
    FeatureDev,
    /// Code transformation jobs.
    #[serde(rename = "gumby")]
    CodeTransform,
    /// Not yet determined. Handled by the commons handler.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl TabCategory {
    /// The `tabType` string used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            TabCategory::Chat => "cwc",
            TabCategory::FeatureDev => "featuredev",
            TabCategory::CodeTransform => "gumby",
            TabCategory::Unknown => "unknown",
        }
    }

    /// Parse a `tabType` wire string. Returns `None` for unrecognized names.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "cwc" => Some(TabCategory::Chat),
            "featuredev" => Some(TabCategory::FeatureDev),
            "gumby" => Some(TabCategory::CodeTransform),
            "unknown" => Some(TabCategory::Unknown),
            _ => None,
        }
    }

    /// Whether this is the placeholder category of a freshly opened tab.
    pub fn is_unknown(self) -> bool {
        self == TabCategory::Unknown
    }

    /// All categories, concrete ones first.
    pub fn all() -> &'static [TabCategory] {
        &[
            TabCategory::Chat,
            TabCategory::FeatureDev,
            TabCategory::CodeTransform,
            TabCategory::Unknown,
        ]
    }
}

impl fmt::Display for TabCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for TabCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| format!("unknown tab category: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for category in TabCategory::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.wire_name()));
            assert_eq!(TabCategory::from_wire(category.wire_name()), Some(*category));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_names() {
        assert_eq!("gumby".parse::<TabCategory>(), Ok(TabCategory::CodeTransform));
        assert!("welcome".parse::<TabCategory>().is_err());
    }

    #[test]
    fn test_default_is_unknown() {
        assert!(TabCategory::default().is_unknown());
        assert!(!TabCategory::Chat.is_unknown());
    }
}

use serde::Serialize;

/// An oil product from the static catalog
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct OilRecommendation {
    /// Stable lowercase catalog identifier (e.g. "jojoba")
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

/// A generated hair care tip
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HairTip {
    pub title: &'static str,
    pub description: &'static str,
}

impl HairTip {
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

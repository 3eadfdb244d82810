//! Region tagging for job listings.
//!
//! Classification scans lowercased text against an ordered rule list and
//! returns the first group with a hit, so earlier groups win ties.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "🇺🇸 US")]
    Us,
    #[serde(rename = "🇬🇧 UK")]
    Uk,
    #[serde(rename = "🇨🇦 Canada")]
    Canada,
    #[serde(rename = "🇩🇪 Germany")]
    Germany,
    #[serde(rename = "🇨🇭 Switzerland")]
    Switzerland,
    #[serde(rename = "🇳🇱 Netherlands")]
    Netherlands,
    #[serde(rename = "🇸🇬 Singapore")]
    Singapore,
    #[serde(rename = "🇭🇰 Hong Kong")]
    HongKong,
    #[serde(rename = "🇦🇺 Australia")]
    Australia,
    #[serde(rename = "🇪🇺 Europe")]
    Europe,
    #[serde(rename = "🌏 Asia")]
    Asia,
    #[serde(rename = "🌐 Global")]
    Global,
}

impl Region {
    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Us => "🇺🇸 US",
            Region::Uk => "🇬🇧 UK",
            Region::Canada => "🇨🇦 Canada",
            Region::Germany => "🇩🇪 Germany",
            Region::Switzerland => "🇨🇭 Switzerland",
            Region::Netherlands => "🇳🇱 Netherlands",
            Region::Singapore => "🇸🇬 Singapore",
            Region::HongKong => "🇭🇰 Hong Kong",
            Region::Australia => "🇦🇺 Australia",
            Region::Europe => "🇪🇺 Europe",
            Region::Asia => "🌏 Asia",
            Region::Global => "🌐 Global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Patterns are matched as raw substrings of the lowercased text; the
// padding spaces and commas in some entries are significant.
const REGION_RULES: &[(Region, &[&str])] = &[
    (
        Region::Us,
        &[
            "united states", "usa", " us,", "california", "new york", "texas",
            "massachusetts", "georgia", "illinois", "washington", "virginia",
            "pennsylvania", "ohio", "michigan", "carnegie mellon", "mit ", "stanford",
            "berkeley", "cornell", "georgia tech", "purdue", "umich", "ucla", "uiuc",
        ],
    ),
    (
        Region::Uk,
        &[
            "united kingdom", " uk,", " uk ", "england", "london", "oxford", "cambridge",
            "imperial college", "edinburgh",
        ],
    ),
    (
        Region::Canada,
        &["canada", "toronto", "waterloo", "montreal", "vancouver", "british columbia"],
    ),
    (Region::Germany, &["germany", "munich", "berlin", "max planck"]),
    (Region::Switzerland, &["switzerland", "zurich", "eth ", "epfl"]),
    (
        Region::Netherlands,
        &["netherlands", "amsterdam", "delft", "eindhoven", "twente"],
    ),
    (Region::Singapore, &["singapore", "nus ", "ntu ", "smu ", "sutd"]),
    (
        Region::HongKong,
        &["hong kong", "hku", "cuhk", "hkust", "polyu", "cityu"],
    ),
    (
        Region::Australia,
        &["australia", "sydney", "melbourne", "queensland", "monash"],
    ),
    (
        Region::Europe,
        &["europe", "france", "italy", "spain", "sweden", "denmark", "norway", "finland"],
    ),
    (
        Region::Asia,
        &["china", "japan", "korea", "taiwan", "india", "beijing", "shanghai", "tokyo", "seoul"],
    ),
];

/// Classify free text into a region. Falls back to [`Region::Global`].
pub fn classify_region(text: &str) -> Region {
    let lower = text.to_lowercase();
    REGION_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map(|(region, _)| *region)
        .unwrap_or(Region::Global)
}

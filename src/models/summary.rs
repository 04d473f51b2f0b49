use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Standard,
    Budget,
    Luxury,
}

impl Variant {
    /// Generation and display order.
    pub const ALL: [Variant; 3] = [Variant::Standard, Variant::Budget, Variant::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Budget => "budget",
            Variant::Luxury => "luxury",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Variant::Standard),
            "budget" => Some(Variant::Budget),
            "luxury" => Some(Variant::Luxury),
            _ => None,
        }
    }

    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Variant::Standard => 1.0,
            Variant::Budget => 0.7,
            Variant::Luxury => 1.5,
        }
    }

    pub fn title_for(&self, destination: &str) -> String {
        match self {
            Variant::Standard => format!("{destination} Trip"),
            Variant::Budget => format!("Budget {destination} Trip"),
            Variant::Luxury => format!("Luxury {destination} Experience"),
        }
    }

    pub fn subtitle_suffix(&self) -> &'static str {
        match self {
            Variant::Standard => " • Balanced • Standard",
            Variant::Budget => " • Value • Budget-friendly",
            Variant::Luxury => " • Premium • Luxury",
        }
    }

    pub fn default_highlights(&self) -> [&'static str; 4] {
        match self {
            Variant::Standard => [
                "Explore local attractions",
                "Visit popular landmarks",
                "Experience local cuisine",
                "Cultural activities",
            ],
            Variant::Budget => [
                "Budget accommodations",
                "Free activities",
                "Affordable dining options",
                "Public transportation",
            ],
            Variant::Luxury => [
                "Premium accommodations",
                "Fine dining experiences",
                "Private tours",
                "Exclusive activities",
            ],
        }
    }

    /// Short phrase used when prompting for this framing.
    pub fn prompt_style(&self) -> &'static str {
        match self {
            Variant::Standard => "a balanced, mid-range",
            Variant::Budget => "a budget-friendly, value-focused",
            Variant::Luxury => "a premium, luxury",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSummary {
    pub variant: Variant,
    pub title: String,
    pub subtitle: String,
    pub destination: String,
    pub days: u32,
    pub total_cost: i64,
    pub highlights: Vec<String>,
    pub full_itinerary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parse_roundtrip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::parse(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::parse(" Luxury "), Some(Variant::Luxury));
        assert_eq!(Variant::parse("premium"), None);
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        let json = serde_json::to_string(&Variant::Budget).unwrap();
        assert_eq!(json, "\"budget\"");
    }

    #[test]
    fn test_default_highlights_are_distinct_per_variant() {
        assert_ne!(
            Variant::Standard.default_highlights(),
            Variant::Budget.default_highlights()
        );
        assert_ne!(
            Variant::Budget.default_highlights(),
            Variant::Luxury.default_highlights()
        );
    }
}

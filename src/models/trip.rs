use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::ItineraryDay;
use crate::parser::text::round_half_up;
use crate::parser::{DEFAULT_DAY_COUNT, MAX_DAY_COUNT};

pub const DEFAULT_BUDGET: f64 = 2000.0;
pub const MAX_TRAVELERS: u32 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TripPreferences {
    #[serde(default)]
    pub mountain: bool,
    #[serde(default)]
    pub trekking: bool,
    #[serde(default)]
    pub beach: bool,
    #[serde(default)]
    pub adventure: bool,
    #[serde(default)]
    pub cultural: bool,
}

impl TripPreferences {
    pub fn selected(&self) -> Vec<&'static str> {
        [
            (self.mountain, "mountains"),
            (self.trekking, "trekking"),
            (self.beach, "beaches"),
            (self.adventure, "adventure"),
            (self.cultural, "cultural experiences"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

/// Answers from the traveller-profile quiz, merged into the trip brief.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TravellerProfile {
    pub age_group: Option<String>,
    pub travel_style: Option<String>,
    pub interests: Vec<String>,
    pub transport_preference: Option<String>,
    pub bucket_list: Vec<String>,
}

impl TravellerProfile {
    /// Prompt sentences for the answered questions, in quiz order.
    pub fn brief(&self) -> Vec<String> {
        let mut brief = Vec::new();
        if let Some(age) = non_blank(&self.age_group) {
            brief.push(format!("Suit the pace to a traveller in the {age} age group."));
        }
        if let Some(style) = non_blank(&self.travel_style) {
            brief.push(format!("Their travel style is {style}."));
        }
        let interests = non_blank_items(&self.interests);
        if !interests.is_empty() {
            brief.push(format!("They are interested in {}.", interests.join(", ")));
        }
        if let Some(transport) = non_blank(&self.transport_preference) {
            brief.push(format!("Prefer getting around by {transport}."));
        }
        let bucket_list = non_blank_items(&self.bucket_list);
        if !bucket_list.is_empty() {
            brief.push(format!("Work in their bucket list: {}.", bucket_list.join(", ")));
        }
        brief
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn non_blank_items(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    #[serde(default = "default_budget")]
    pub budget: f64,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub preferences: TripPreferences,
    #[serde(default)]
    pub profile: Option<TravellerProfile>,
}

fn default_budget() -> f64 {
    DEFAULT_BUDGET
}

fn default_days() -> u32 {
    DEFAULT_DAY_COUNT
}

fn default_travelers() -> u32 {
    1
}

impl TripRequest {
    /// Clamps travelers to 1..=10 and the day count to 1..=MAX_DAY_COUNT (0 means unknown).
    pub fn normalized(mut self) -> Self {
        self.destination = self.destination.trim().to_string();
        self.travelers = self.travelers.clamp(1, MAX_TRAVELERS);
        self.days = normalize_day_count(self.days);
        if !self.budget.is_finite() || self.budget < 0.0 {
            self.budget = DEFAULT_BUDGET;
        }
        self
    }
}

pub fn normalize_day_count(days: u32) -> u32 {
    if days == 0 {
        DEFAULT_DAY_COUNT
    } else {
        days.min(MAX_DAY_COUNT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub destination: String,
    pub budget: f64,
    pub days: u32,
    pub start_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostBreakdown {
    pub transportation: i64,
    pub accommodation: i64,
    pub activities: i64,
    pub food: i64,
}

impl CostBreakdown {
    pub fn from_total(total: i64) -> Self {
        let total = total as f64;
        Self {
            transportation: round_half_up(total * 0.3),
            accommodation: round_half_up(total * 0.4),
            activities: round_half_up(total * 0.2),
            food: round_half_up(total * 0.1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDetails {
    pub title: String,
    pub dates: String,
    pub total_cost: i64,
    pub days: Vec<ItineraryDay>,
    pub cost_breakdown: CostBreakdown,
    pub raw_itinerary: String,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    pub time: String,
    pub title: String,
    pub description: String,
    /// Never known at extraction time.
    pub cost: Option<f64>,
}

impl ActivityRecord {
    pub fn new(
        time: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
            description: description.into(),
            cost: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub subtitle: String,
    pub activities: Vec<ActivityRecord>,
    pub raw_content: String,
}

impl ItineraryDay {
    pub fn day_id(number: u32) -> String {
        format!("day{number}")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItinerarySet {
    pub days: Vec<ItineraryDay>,
}

impl ItinerarySet {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

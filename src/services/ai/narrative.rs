use crate::models::{TripRequest, Variant};
use crate::parser::text::round_half_up;
use crate::services::ai::{LlmProvider, Message};

const PLANNER_PROMPT: &str = r#"You are a travel planner writing day-by-day itineraries.

Formatting rules:
- Open with one or two sentences that state the trip length as "<N> days".
- Start every day with a heading of the form "Day N: <short title>".
- Put a one-line summary of the day directly under the heading.
- List each activity on its own line as "H:MM AM - <activity>: <details>" when a time applies, otherwise as "- <activity>: <details>".
- Use plain text and simple "-" bullets. No tables, no JSON.
"#;

const EDITOR_PROMPT: &str = r#"You are editing an existing travel itinerary at the traveller's request.

Rules:
- Make the smallest change that satisfies the request.
- Keep every "Day N:" heading, bullet and time format exactly as it is.
- Leave untouched any day the request does not mention.
- Reply with the complete updated itinerary as plain text only: no preamble, no explanation, no code fences.
"#;

const GUIDE_PROMPT: &str = r#"You are a travel guide answering questions about a traveller's stored itinerary.

Rules:
- Answer from the itinerary; say so when it does not cover the question.
- Never rewrite or extend the itinerary itself.
- Reply with a single JSON object and nothing else:
  {"summary": "<brief direct answer>", "details": ["<key point>", ...], "proTips": ["<tip>", ...]}
"#;

pub fn generation_prompt(request: &TripRequest, variant: Variant) -> String {
    let budget = round_half_up(request.budget * variant.cost_multiplier());
    let mut prompt = format!(
        "Plan {style} {days}-day trip to {destination} for {travelers} traveller(s) with a total budget of about {budget}.",
        style = variant.prompt_style(),
        days = request.days,
        destination = request.destination,
        travelers = request.travelers,
    );

    let interests = request.preferences.selected();
    if !interests.is_empty() {
        prompt.push_str(&format!(" Focus on {}.", interests.join(", ")));
    }
    if let Some(mood) = request.mood.as_deref().filter(|m| !m.trim().is_empty()) {
        prompt.push_str(&format!(" The overall mood should be {}.", mood.trim()));
    }
    if let Some(profile) = &request.profile {
        for sentence in profile.brief() {
            prompt.push(' ');
            prompt.push_str(&sentence);
        }
    }
    if let Some(start) = request.start_date {
        prompt.push_str(&format!(" The trip starts on {}.", start.format("%B %-d, %Y")));
    }
    prompt.push_str(&format!(" Write exactly {} day sections.", request.days));
    prompt
}

pub fn edit_prompt(narrative: &str, instruction: &str) -> String {
    format!("Current itinerary:\n{narrative}\n\nRequested change:\n{}", instruction.trim())
}

pub fn guide_prompt(narrative: &str, query: &str) -> String {
    format!("Itinerary:\n{narrative}\n\nQuestion:\n{}", query.trim())
}

pub async fn generate_narrative(
    llm: &dyn LlmProvider,
    request: &TripRequest,
    variant: Variant,
) -> anyhow::Result<String> {
    let messages = [Message::user(generation_prompt(request, variant))];
    let response = llm.chat(PLANNER_PROMPT, &messages).await?;
    Ok(strip_code_fences(&response).to_string())
}

pub async fn request_edit(
    llm: &dyn LlmProvider,
    narrative: &str,
    instruction: &str,
) -> anyhow::Result<String> {
    let messages = [Message::user(edit_prompt(narrative, instruction))];
    let response = llm.chat(EDITOR_PROMPT, &messages).await?;
    Ok(strip_code_fences(&response).to_string())
}

/// Asks about a stored itinerary. The JSON object in the reply is returned as
/// is; a reply without one is wrapped as `{"summary": <text>}`.
pub async fn answer_question(
    llm: &dyn LlmProvider,
    narrative: &str,
    query: &str,
) -> anyhow::Result<serde_json::Value> {
    let messages = [Message::user(guide_prompt(narrative, query))];
    let response = llm.chat(GUIDE_PROMPT, &messages).await?;

    if let Some(answer) = extract_json_object(&response) {
        return Ok(answer);
    }
    let text = strip_code_fences(&response);
    anyhow::ensure!(!text.is_empty(), "guide reply was empty");
    Ok(serde_json::json!({ "summary": text }))
}

/// Parses the span from the first `{` to the last `}` as a JSON object.
pub fn extract_json_object(response: &str) -> Option<serde_json::Value> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(&response[start..=end])
        .ok()
        .filter(serde_json::Value::is_object)
}

/// Removes a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("```text", "```markdown") up to the first newline
    let inner = match inner.find('\n') {
        Some(idx) if !inner[..idx].contains(' ') => &inner[idx + 1..],
        _ => inner,
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TravellerProfile, TripPreferences};
    use chrono::NaiveDate;

    fn request() -> TripRequest {
        TripRequest {
            destination: "Rome".to_string(),
            budget: 2000.0,
            days: 5,
            travelers: 2,
            start_date: NaiveDate::from_ymd_opt(2025, 5, 15),
            mood: Some("relaxed".to_string()),
            preferences: TripPreferences {
                cultural: true,
                ..Default::default()
            },
            profile: Some(TravellerProfile {
                age_group: Some("55+".to_string()),
                travel_style: Some("slow and scenic".to_string()),
                transport_preference: Some("train".to_string()),
                bucket_list: vec!["Sistine Chapel".to_string()],
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_generation_prompt_scales_budget_per_variant() {
        let prompt = generation_prompt(&request(), Variant::Luxury);
        assert!(prompt.contains("a premium, luxury 5-day trip to Rome"));
        assert!(prompt.contains("about 3000"));
        assert!(prompt.contains("Focus on cultural experiences."));
        assert!(prompt.contains("mood should be relaxed"));
        assert!(prompt.contains("starts on May 15, 2025"));
        assert!(prompt.contains("traveller in the 55+ age group."));
        assert!(prompt.contains("Their travel style is slow and scenic."));
        assert!(prompt.contains("Prefer getting around by train."));
        assert!(prompt.contains("Work in their bucket list: Sistine Chapel."));
        assert!(prompt.ends_with("Write exactly 5 day sections."));

        let prompt = generation_prompt(&request(), Variant::Budget);
        assert!(prompt.contains("about 1400"));

        let without_profile = TripRequest {
            profile: None,
            ..request()
        };
        let prompt = generation_prompt(&without_profile, Variant::Standard);
        assert!(!prompt.contains("age group"));
    }

    #[test]
    fn test_edit_prompt_includes_narrative_and_instruction() {
        let prompt = edit_prompt("Day 1: Arrival", "  swap the museum for a beach  ");
        assert!(prompt.contains("Day 1: Arrival"));
        assert!(prompt.ends_with("swap the museum for a beach"));
    }

    #[test]
    fn test_guide_prompt_includes_narrative_and_query() {
        let prompt = guide_prompt("Day 1: Arrival", " Where do I eat?\n");
        assert!(prompt.starts_with("Itinerary:\nDay 1: Arrival"));
        assert!(prompt.ends_with("Question:\nWhere do I eat?"));
    }

    #[test]
    fn test_extract_json_object_from_chatty_reply() {
        let reply = "Sure! ```json\n{\"summary\": \"Take line 1\", \"details\": [\"Runs every 3 min\"]}\n``` Enjoy.";
        let answer = extract_json_object(reply).unwrap();
        assert_eq!(answer["summary"], "Take line 1");
        assert_eq!(answer["details"][0], "Runs every 3 min");
    }

    #[test]
    fn test_extract_json_object_rejects_non_objects() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("{not: valid}").is_none());
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("Day 1: Arrival"), "Day 1: Arrival");
        assert_eq!(strip_code_fences("```\nDay 1: Arrival\n```"), "Day 1: Arrival");
        assert_eq!(
            strip_code_fences("```markdown\nDay 1: Arrival\n- Walk\n```"),
            "Day 1: Arrival\n- Walk"
        );
        assert_eq!(strip_code_fences("  ```Day 1: Arrival```  "), "Day 1: Arrival");
    }
}

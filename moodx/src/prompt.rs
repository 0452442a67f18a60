use std::fmt::Write;

use crate::context::{Context, Preferences};
use crate::schema::{CATEGORIES, CategorySchema, ITEMS_PER_CATEGORY};

const MOOD_INSTRUCTION: &str = "Analyze the mood from this text in one short sentence:";

/// Prompt for the one-sentence mood summary.
pub fn mood_prompt(raw_text: &str) -> String {
    format!("{MOOD_INSTRUCTION}\n{raw_text}")
}

/// Prompt for one advisor persona.
pub fn advisor_prompt(agent_label: &str, mood: &str, context: &Context) -> String {
    format!(
        "Based on the current mood '{mood}' and context {context}, provide a concise recommendation \
         for enhancing the user's day using the '{agent_label}'. Include one actionable suggestion if possible."
    )
}

/// Render the multi-category recommendation prompt.
///
/// Output is fully determined by the inputs. `preferences.include_products`
/// only appears as text; every category block is always emitted.
pub fn build_recommendation_prompt(
    context: &Context,
    mood: &str,
    preferences: &Preferences,
) -> String {
    let mut prompt = format!(
        r#"
Generate recommendations based on the following details:
- Mood: {mood}
- Context: {context}
- Preferences: {preferences}

For each of the categories listed below, please provide exactly {ITEMS_PER_CATEGORY} recommendations in the format shown. If a valid URL is not available for any recommendation, output "N/A" for the URL field.
"#
    );

    for schema in CATEGORIES.iter() {
        prompt.push('\n');
        write_category_block(&mut prompt, schema);
    }
    prompt
}

fn write_category_block(out: &mut String, schema: &CategorySchema) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", schema.header());
    let _ = writeln!(out, "{}", schema.example_line(1));
    let _ = writeln!(out, "{}", schema.example_line(2));
    let _ = writeln!(out, "...");
    let _ = writeln!(out, "{}", schema.example_line(ITEMS_PER_CATEGORY));
}

//! Turn raw completion text into typed recommendation records.
//!
//! Parsing is best-effort: header lines move a category cursor, numbered
//! lines that match the active category's field layout become items, and
//! everything else is dropped without error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::schema::{Category, CategorySchema};

/// Text the model uses in place of a missing link.
const URL_SENTINELS: [&str; 2] = ["n/a", "not available"];

/// Outcome of matching one line against a category's field layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// Trimmed fields, exactly as many as the category's arity.
    Matched(Vec<String>),
    Unmatched,
}

impl LineMatch {
    pub fn against(schema: &CategorySchema, line: &str) -> Self {
        let Some(caps) = schema.line_pattern().captures(line) else {
            return LineMatch::Unmatched;
        };
        let fields: Vec<String> = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().trim().to_string())
            .collect();
        if fields.len() != schema.arity() || fields.iter().any(String::is_empty) {
            return LineMatch::Unmatched;
        }
        LineMatch::Matched(fields)
    }
}

/// Map a captured URL field to `None` when it holds the "N/A" sentinel.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();
    if trimmed.is_empty() || URL_SENTINELS.contains(&lowered.as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One parsed recommendation. The variant fixes the category and its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationItem {
    Video {
        title: String,
        url: Option<String>,
    },
    Movie {
        title: String,
        service: String,
        details: String,
        url: Option<String>,
    },
    Song {
        title: String,
        artist: String,
        url: Option<String>,
    },
    Product {
        name: String,
        url: Option<String>,
        reason: String,
    },
    Game {
        title: String,
        platform: String,
    },
    Article {
        title: String,
        url: Option<String>,
    },
    Connect {
        idea: String,
        url: Option<String>,
    },
    Travel {
        destination: String,
        url: Option<String>,
    },
    Food {
        meal: String,
        url: Option<String>,
    },
    CineMagic {
        title: String,
        service: String,
        url: Option<String>,
    },
}

impl RecommendationItem {
    /// Build an item from fields in schema order. Returns `None` when the
    /// field count does not match the category's arity.
    pub fn from_fields(category: Category, fields: Vec<String>) -> Option<Self> {
        if fields.len() != category.schema().arity() {
            return None;
        }
        let mut it = fields.into_iter();
        let mut next = move || it.next().unwrap_or_default();

        let item = match category {
            Category::Videos => RecommendationItem::Video {
                title: next(),
                url: normalize_url(&next()),
            },
            Category::Movies => RecommendationItem::Movie {
                title: next(),
                service: next(),
                details: next(),
                url: normalize_url(&next()),
            },
            Category::Songs => RecommendationItem::Song {
                title: next(),
                artist: next(),
                url: normalize_url(&next()),
            },
            Category::Products => RecommendationItem::Product {
                name: next(),
                url: normalize_url(&next()),
                reason: next(),
            },
            Category::Games => RecommendationItem::Game {
                title: next(),
                platform: next(),
            },
            Category::Articles => RecommendationItem::Article {
                title: next(),
                url: normalize_url(&next()),
            },
            Category::Connect => RecommendationItem::Connect {
                idea: next(),
                url: normalize_url(&next()),
            },
            Category::Travel => RecommendationItem::Travel {
                destination: next(),
                url: normalize_url(&next()),
            },
            Category::Food => RecommendationItem::Food {
                meal: next(),
                url: normalize_url(&next()),
            },
            Category::CineMagic => RecommendationItem::CineMagic {
                title: next(),
                service: next(),
                url: normalize_url(&next()),
            },
        };
        Some(item)
    }

    pub fn category(&self) -> Category {
        match self {
            RecommendationItem::Video { .. } => Category::Videos,
            RecommendationItem::Movie { .. } => Category::Movies,
            RecommendationItem::Song { .. } => Category::Songs,
            RecommendationItem::Product { .. } => Category::Products,
            RecommendationItem::Game { .. } => Category::Games,
            RecommendationItem::Article { .. } => Category::Articles,
            RecommendationItem::Connect { .. } => Category::Connect,
            RecommendationItem::Travel { .. } => Category::Travel,
            RecommendationItem::Food { .. } => Category::Food,
            RecommendationItem::CineMagic { .. } => Category::CineMagic,
        }
    }

    /// The leading field: title, name, idea, destination or meal.
    pub fn headline(&self) -> &str {
        match self {
            RecommendationItem::Video { title, .. }
            | RecommendationItem::Movie { title, .. }
            | RecommendationItem::Song { title, .. }
            | RecommendationItem::Game { title, .. }
            | RecommendationItem::Article { title, .. }
            | RecommendationItem::CineMagic { title, .. } => title,
            RecommendationItem::Product { name, .. } => name,
            RecommendationItem::Connect { idea, .. } => idea,
            RecommendationItem::Travel { destination, .. } => destination,
            RecommendationItem::Food { meal, .. } => meal,
        }
    }

    /// The link, if the category carries one and the model supplied it.
    pub fn url(&self) -> Option<&str> {
        match self {
            RecommendationItem::Video { url, .. }
            | RecommendationItem::Movie { url, .. }
            | RecommendationItem::Song { url, .. }
            | RecommendationItem::Product { url, .. }
            | RecommendationItem::Article { url, .. }
            | RecommendationItem::Connect { url, .. }
            | RecommendationItem::Travel { url, .. }
            | RecommendationItem::Food { url, .. }
            | RecommendationItem::CineMagic { url, .. } => url.as_deref(),
            RecommendationItem::Game { .. } => None,
        }
    }
}

/// Parsed items per category, in the order they appeared.
///
/// Categories that never appeared are absent. [`ParsedResult::items`]
/// returns an empty slice for them, so absent and empty read the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedResult {
    sections: BTreeMap<Category, Vec<RecommendationItem>>,
}

impl ParsedResult {
    pub fn items(&self, category: Category) -> &[RecommendationItem] {
        self.sections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether a header for `category` was seen.
    pub fn contains(&self, category: Category) -> bool {
        self.sections.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.keys().copied()
    }

    pub fn total_items(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}

/// Parse raw completion text into per-category items.
pub fn parse(raw_text: &str) -> ParsedResult {
    let mut result = ParsedResult::default();
    let mut current: Option<Category> = None;
    let mut dropped = 0usize;

    for line in raw_text.lines().map(str::trim) {
        if let Some(category) = Category::from_header_line(line) {
            // A repeated header keeps appending to the existing list.
            result.sections.entry(category).or_default();
            current = Some(category);
            continue;
        }

        let Some(category) = current else {
            continue;
        };
        if line.is_empty() {
            continue;
        }

        match LineMatch::against(category.schema(), line) {
            LineMatch::Matched(fields) => {
                if let Some(item) = RecommendationItem::from_fields(category, fields) {
                    result.sections.entry(category).or_default().push(item);
                }
            }
            LineMatch::Unmatched => dropped += 1,
        }
    }

    debug!(
        categories = result.sections.len(),
        items = result.total_items(),
        dropped,
        "Parsed completion text"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "🎵 Songs:\n1. Good Vibes - DJ Nova - https://example.com/a\n2. Calm Air - Sol - N/A\n🎮 Games:\n1. Dash - PC";

    #[test]
    fn parses_the_reference_scenario() {
        let parsed = parse(SCENARIO);

        assert_eq!(
            parsed.items(Category::Songs),
            &[
                RecommendationItem::Song {
                    title: "Good Vibes".into(),
                    artist: "DJ Nova".into(),
                    url: Some("https://example.com/a".into()),
                },
                RecommendationItem::Song {
                    title: "Calm Air".into(),
                    artist: "Sol".into(),
                    url: None,
                },
            ]
        );
        assert_eq!(
            parsed.items(Category::Games),
            &[RecommendationItem::Game {
                title: "Dash".into(),
                platform: "PC".into(),
            }]
        );
        assert_eq!(parsed.categories().count(), 2);
    }

    #[test]
    fn missing_category_is_absent_and_reads_as_empty() {
        let parsed = parse(SCENARIO);
        assert!(!parsed.contains(Category::Movies));
        assert!(parsed.items(Category::Movies).is_empty());
    }

    #[test]
    fn keeps_every_valid_line_in_order_regardless_of_count() {
        let mut raw = String::from("📖 Articles:\n");
        for i in 1..=13 {
            raw.push_str(&format!("{i}. Article {i} - https://example.com/{i}\n"));
        }
        let parsed = parse(&raw);
        let items = parsed.items(Category::Articles);
        assert_eq!(items.len(), 13);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.headline(), format!("Article {}", i + 1));
        }
    }

    #[test]
    fn malformed_lines_are_skipped_without_affecting_the_rest() {
        let raw = "\
🎵 Songs:
Here are some songs for you!
1. Only Title
2. Sunrise - Aurora - https://example.com/s
- Stray bullet - nobody - nowhere
3. Night Drive - Kavinsky - N/A
";
        let parsed = parse(raw);
        let titles: Vec<&str> = parsed
            .items(Category::Songs)
            .iter()
            .map(|i| i.headline())
            .collect();
        assert_eq!(titles, vec!["Sunrise", "Night Drive"]);
    }

    #[test]
    fn lines_before_any_header_are_ignored() {
        let raw = "Sure! Here you go.\n1. Orphan - https://x\n🎥 Videos:\n1. Lo-fi Beats - https://youtu.be/x";
        let parsed = parse(raw);
        assert_eq!(parsed.total_items(), 1);
        assert_eq!(parsed.items(Category::Videos)[0].headline(), "Lo-fi Beats");
    }

    #[test]
    fn header_without_items_yields_empty_list() {
        let parsed = parse("🛍️ Products:\n\n✈️ Travel:\n1. Lisbon - https://visitlisbon.com");
        assert!(parsed.contains(Category::Products));
        assert!(parsed.items(Category::Products).is_empty());
        assert_eq!(parsed.items(Category::Travel).len(), 1);
    }

    #[test]
    fn repeated_header_appends_to_existing_list() {
        let raw = "\
🍽️ Food:
1. Ramen - https://example.com/ramen
🎮 Games:
1. Celeste - Switch
🍽️ Food:
2. Tacos - N/A
";
        let parsed = parse(raw);
        let meals: Vec<&str> = parsed
            .items(Category::Food)
            .iter()
            .map(|i| i.headline())
            .collect();
        assert_eq!(meals, vec!["Ramen", "Tacos"]);
        assert_eq!(parsed.items(Category::Games).len(), 1);
    }

    #[test]
    fn header_line_with_trailing_text_still_switches_category() {
        let parsed = parse("💞 Connect: ideas for tonight\n1. Board game night - https://meetup.com");
        assert_eq!(parsed.items(Category::Connect).len(), 1);
    }

    #[test]
    fn whitespace_around_lines_and_fields_is_trimmed() {
        let raw = "   🍿 Cine Magic:   \n   1.   Arrival   -   Netflix   -   https://netflix.com/arrival   ";
        let parsed = parse(raw);
        assert_eq!(
            parsed.items(Category::CineMagic),
            &[RecommendationItem::CineMagic {
                title: "Arrival".into(),
                service: "Netflix".into(),
                url: Some("https://netflix.com/arrival".into()),
            }]
        );
    }

    #[test]
    fn last_field_may_contain_separator() {
        let parsed = parse("🛍️ Products:\n1. Calm App - N/A - Guided breathing - great for stress");
        assert_eq!(
            parsed.items(Category::Products),
            &[RecommendationItem::Product {
                name: "Calm App".into(),
                url: None,
                reason: "Guided breathing - great for stress".into(),
            }]
        );
    }

    #[test]
    fn movies_need_four_fields() {
        let raw = "\
🎬 Movies:
1. Dune - Max - Trending #1 - https://max.com/dune
2. Heat - Prime - 8.3 IMDb
";
        let parsed = parse(raw);
        assert_eq!(
            parsed.items(Category::Movies),
            &[RecommendationItem::Movie {
                title: "Dune".into(),
                service: "Max".into(),
                details: "Trending #1".into(),
                url: Some("https://max.com/dune".into()),
            }]
        );
    }

    #[test]
    fn url_sentinels_normalize_to_none() {
        for raw in ["N/A", "n/a", " Not Available ", "NOT AVAILABLE", "  n/A  "] {
            assert_eq!(normalize_url(raw), None, "{raw:?}");
        }
        assert_eq!(
            normalize_url(" https://example.com "),
            Some("https://example.com".to_string())
        );
        assert_eq!(normalize_url("example.com"), Some("example.com".to_string()));
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(parse(SCENARIO), parse(SCENARIO));
    }

    #[test]
    fn empty_input_gives_empty_result() {
        let parsed = parse("");
        assert!(parsed.is_empty());
        assert_eq!(parsed.categories().count(), 0);
    }

    #[test]
    fn line_match_reports_unmatched_for_wrong_arity() {
        let games = Category::Games.schema();
        assert_eq!(
            LineMatch::against(games, "1. Tetris - Game Boy"),
            LineMatch::Matched(vec!["Tetris".into(), "Game Boy".into()])
        );
        assert_eq!(LineMatch::against(games, "1. Tetris"), LineMatch::Unmatched);
        assert_eq!(LineMatch::against(games, "Tetris - Game Boy"), LineMatch::Unmatched);
    }

    #[test]
    fn from_fields_rejects_wrong_count() {
        assert!(RecommendationItem::from_fields(Category::Songs, vec!["a".into(), "b".into()]).is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let parsed = parse(SCENARIO);
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["songs"][0]["kind"], "song");
        assert_eq!(json["songs"][1]["url"], serde_json::Value::Null);
        assert_eq!(json["games"][0]["platform"], "PC");
    }
}

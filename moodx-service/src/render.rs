//! View model handed to whatever draws the result: fixed tab order, tab
//! titles, card layout per category and link labels.

use moodx::{Category, ParsedResult, RecommendationItem};
use serde::Serialize;
use std::fmt::Write;

/// Shown in place of a link when the model had no URL.
pub const LINK_COMING_SOON: &str = "Link Coming Soon";

#[derive(Debug, Clone, Copy)]
pub struct TabSpec {
    pub category: Category,
    pub title: &'static str,
}

/// Tabs in display order. Movies is parsed but has no tab.
pub const TABS: [TabSpec; 9] = [
    TabSpec { category: Category::CineMagic, title: "🍿 Cine Magic" },
    TabSpec { category: Category::Songs, title: "🎵 Jam Sessions" },
    TabSpec { category: Category::Products, title: "🛒 Hot Buys" },
    TabSpec { category: Category::Games, title: "🎮 Game On" },
    TabSpec { category: Category::Articles, title: "📚 Thoughtful Reads" },
    TabSpec { category: Category::Videos, title: "📹 Video Vibes" },
    TabSpec { category: Category::Connect, title: "💞 Social Sparks" },
    TabSpec { category: Category::Travel, title: "✈️ Wanderlust Escapes" },
    TabSpec { category: Category::Food, title: "🍽️ Mood Meals" },
];

/// Label on the link button for a category, if it has links at all.
pub fn link_label(category: Category) -> Option<&'static str> {
    match category {
        Category::CineMagic | Category::Videos | Category::Movies => Some("Watch Now"),
        Category::Songs => Some("Listen Now"),
        Category::Products => Some("View Product"),
        Category::Articles => Some("Read More"),
        Category::Connect => Some("Explore"),
        Category::Travel => Some("Discover"),
        Category::Food => Some("Explore Recipe"),
        Category::Games => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkView {
    Available { href: String, label: String },
    ComingSoon { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub category: Category,
    pub title: String,
    pub cards: Vec<Card>,
}

fn link_for(item: &RecommendationItem) -> Option<LinkView> {
    let label = link_label(item.category())?;
    Some(match item.url() {
        Some(href) => LinkView::Available {
            href: href.to_string(),
            label: label.to_string(),
        },
        None => LinkView::ComingSoon {
            label: LINK_COMING_SOON.to_string(),
        },
    })
}

pub fn card_for(item: &RecommendationItem) -> Card {
    let (subtitle, body) = match item {
        RecommendationItem::CineMagic { service, .. } => (Some(service.clone()), None),
        RecommendationItem::Movie {
            service, details, ..
        } => (Some(service.clone()), Some(details.clone())),
        RecommendationItem::Song { artist, .. } => (Some(format!("by {artist}")), None),
        RecommendationItem::Product { reason, .. } => (None, Some(reason.clone())),
        RecommendationItem::Game { platform, .. } => (Some(format!("Platform: {platform}")), None),
        RecommendationItem::Video { .. }
        | RecommendationItem::Article { .. }
        | RecommendationItem::Connect { .. }
        | RecommendationItem::Travel { .. }
        | RecommendationItem::Food { .. } => (None, None),
    };
    Card {
        headline: item.headline().to_string(),
        subtitle,
        body,
        link: link_for(item),
    }
}

/// Every tab in display order. A category the model never mentioned gets an
/// empty tab, same as one with a header and no valid lines.
pub fn render_tabs(parsed: &ParsedResult) -> Vec<TabView> {
    TABS.iter()
        .map(|tab| TabView {
            category: tab.category,
            title: tab.title.to_string(),
            cards: parsed.items(tab.category).iter().map(card_for).collect(),
        })
        .collect()
}

/// Plain-text rendering for terminals.
pub fn tabs_to_text(tabs: &[TabView]) -> String {
    let mut out = String::new();
    for tab in tabs {
        let _ = writeln!(out, "== {} ==", tab.title);
        if tab.cards.is_empty() {
            let _ = writeln!(out, "  (nothing here this time)");
        }
        for card in &tab.cards {
            let _ = writeln!(out, "  * {}", card.headline);
            if let Some(subtitle) = &card.subtitle {
                let _ = writeln!(out, "    {subtitle}");
            }
            if let Some(body) = &card.body {
                let _ = writeln!(out, "    {body}");
            }
            match &card.link {
                Some(LinkView::Available { href, label }) => {
                    let _ = writeln!(out, "    {label}: {href}");
                }
                Some(LinkView::ComingSoon { label }) => {
                    let _ = writeln!(out, "    {label}");
                }
                None => {}
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodx::parse;

    const RAW: &str = "\
🎵 Songs:
1. Good Vibes - DJ Nova - https://example.com/a
2. Calm Air - Sol - N/A
🎮 Games:
1. Dash - PC
🛍️ Products:
1. Journal - not available - Helps you reflect
";

    #[test]
    fn tabs_follow_display_order_and_skip_movies() {
        let tabs = render_tabs(&ParsedResult::default());
        let titles: Vec<&str> = tabs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "🍿 Cine Magic",
                "🎵 Jam Sessions",
                "🛒 Hot Buys",
                "🎮 Game On",
                "📚 Thoughtful Reads",
                "📹 Video Vibes",
                "💞 Social Sparks",
                "✈️ Wanderlust Escapes",
                "🍽️ Mood Meals",
            ]
        );
        assert!(tabs.iter().all(|t| t.category != Category::Movies));
        assert!(tabs.iter().all(|t| t.cards.is_empty()));
    }

    #[test]
    fn song_cards_carry_artist_and_fallback_link() {
        let tabs = render_tabs(&parse(RAW));
        let songs = &tabs[1];
        assert_eq!(songs.cards.len(), 2);
        assert_eq!(
            songs.cards[0],
            Card {
                headline: "Good Vibes".into(),
                subtitle: Some("by DJ Nova".into()),
                body: None,
                link: Some(LinkView::Available {
                    href: "https://example.com/a".into(),
                    label: "Listen Now".into(),
                }),
            }
        );
        assert_eq!(
            songs.cards[1].link,
            Some(LinkView::ComingSoon {
                label: LINK_COMING_SOON.into()
            })
        );
    }

    #[test]
    fn game_cards_have_platform_and_no_link() {
        let tabs = render_tabs(&parse(RAW));
        let game = &tabs[3].cards[0];
        assert_eq!(game.headline, "Dash");
        assert_eq!(game.subtitle.as_deref(), Some("Platform: PC"));
        assert!(game.link.is_none());
    }

    #[test]
    fn product_cards_show_reason() {
        let tabs = render_tabs(&parse(RAW));
        let product = &tabs[2].cards[0];
        assert_eq!(product.body.as_deref(), Some("Helps you reflect"));
        assert!(matches!(product.link, Some(LinkView::ComingSoon { .. })));
    }

    #[test]
    fn text_rendering_mentions_fallback_and_empty_tabs() {
        let text = tabs_to_text(&render_tabs(&parse(RAW)));
        assert!(text.contains("== 🎵 Jam Sessions =="));
        assert!(text.contains("Listen Now: https://example.com/a"));
        assert!(text.contains("Link Coming Soon"));
        assert!(text.contains("== 🍿 Cine Magic ==\n  (nothing here this time)"));
    }

    #[test]
    fn every_linked_category_has_a_label() {
        for category in [
            Category::Videos,
            Category::Movies,
            Category::Songs,
            Category::Products,
            Category::Articles,
            Category::Connect,
            Category::Travel,
            Category::Food,
            Category::CineMagic,
        ] {
            assert!(link_label(category).is_some(), "{category:?}");
        }
        assert!(link_label(Category::Games).is_none());
    }
}

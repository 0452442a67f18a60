//! The category table shared by the prompt composer and the parser.
//!
//! The composer renders every header and field placeholder from [`CATEGORIES`]
//! and the parser matches headers and field counts against the same entries,
//! so the two sides cannot drift apart.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Separator between fields on a recommendation line.
pub const FIELD_SEPARATOR: &str = " - ";

/// Number of items the prompt asks for in every category.
pub const ITEMS_PER_CATEGORY: usize = 10;

/// One of the fixed recommendation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Videos,
    Movies,
    Songs,
    Products,
    Games,
    Articles,
    Connect,
    Travel,
    Food,
    CineMagic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// May hold the "N/A" sentinel instead of a link.
    Url,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

const fn text(name: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        placeholder,
        kind: FieldKind::Text,
    }
}

const fn url(placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name: "url",
        placeholder,
        kind: FieldKind::Url,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CategorySchema {
    pub category: Category,
    /// Header label without the trailing colon, e.g. `🎵 Songs`.
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

impl CategorySchema {
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// The exact header line the model is asked to emit.
    pub fn header(&self) -> String {
        format!("{}:", self.label)
    }

    /// One example line in the prompt, e.g. `3. [Song Title] - [Artist] - [URL]`.
    pub fn example_line(&self, ordinal: usize) -> String {
        let fields: Vec<&str> = self.fields.iter().map(|f| f.placeholder).collect();
        format!("{ordinal}. {}", fields.join(FIELD_SEPARATOR))
    }

    /// Pattern for a numbered line with exactly this category's arity.
    pub fn line_pattern(&self) -> &'static Regex {
        line_pattern(self.arity())
    }
}

pub static CATEGORIES: [CategorySchema; 10] = [
    CategorySchema {
        category: Category::Videos,
        label: "🎥 Videos",
        fields: &[text("title", "[Video Title]"), url("[YouTube URL]")],
    },
    CategorySchema {
        category: Category::Movies,
        label: "🎬 Movies",
        fields: &[
            text("title", "[Movie Title]"),
            text("service", "[Streaming Service]"),
            text("details", "[Trending/Popularity/Rating Details]"),
            url("[URL]"),
        ],
    },
    CategorySchema {
        category: Category::Songs,
        label: "🎵 Songs",
        fields: &[
            text("title", "[Song Title]"),
            text("artist", "[Artist]"),
            url("[URL]"),
        ],
    },
    CategorySchema {
        category: Category::Products,
        label: "🛍️ Products",
        fields: &[
            text("name", "[Product/App Name]"),
            url("[URL]"),
            text("reason", "[Reason]"),
        ],
    },
    CategorySchema {
        category: Category::Games,
        label: "🎮 Games",
        fields: &[text("title", "[Game Title]"), text("platform", "[Platform]")],
    },
    CategorySchema {
        category: Category::Articles,
        label: "📖 Articles",
        fields: &[text("title", "[Article Title]"), url("[URL]")],
    },
    CategorySchema {
        category: Category::Connect,
        label: "💞 Connect",
        fields: &[text("idea", "[Social/Dating Idea]"), url("[URL]")],
    },
    CategorySchema {
        category: Category::Travel,
        label: "✈️ Travel",
        fields: &[text("destination", "[Destination]"), url("[URL]")],
    },
    CategorySchema {
        category: Category::Food,
        label: "🍽️ Food",
        fields: &[text("meal", "[Meal Idea]"), url("[URL]")],
    },
    CategorySchema {
        category: Category::CineMagic,
        label: "🍿 Cine Magic",
        fields: &[
            text("title", "[Movie/Show Title]"),
            text("service", "[Streaming Service]"),
            url("[URL]"),
        ],
    },
];

const MIN_ARITY: usize = 2;
const MAX_ARITY: usize = 4;

// Ordinal, period, optional whitespace, then fields split on " - ". Every
// field but the last is lazy so the last one keeps any further separators.
static LINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (MIN_ARITY..=MAX_ARITY)
        .map(|arity| {
            let mut pattern = String::from(r"^\d+\.\s*");
            for _ in 1..arity {
                pattern.push_str(r"(.+?)\s+-\s+");
            }
            pattern.push_str(r"(.+)$");
            Regex::new(&pattern).expect("Invalid regex")
        })
        .collect()
});

fn line_pattern(arity: usize) -> &'static Regex {
    let arity = arity.clamp(MIN_ARITY, MAX_ARITY);
    &LINE_PATTERNS[arity - MIN_ARITY]
}

impl Category {
    // CATEGORIES is laid out in declaration order.
    pub fn schema(&self) -> &'static CategorySchema {
        &CATEGORIES[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.schema().label
    }

    /// Find the category whose header label starts `line`.
    pub fn from_header_line(line: &str) -> Option<Category> {
        CATEGORIES
            .iter()
            .find(|s| line.starts_with(s.label))
            .map(|s| s.category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

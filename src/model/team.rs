/// A team as identified on WrestleStat: stable numeric id plus URL slug.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamRef {
    pub id: u32,
    pub slug: String,
}

impl TeamRef {
    pub fn new(id: u32, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
        }
    }

    /// Human-readable school name derived from the slug,
    /// e.g. `penn-state` -> `Penn State`.
    pub fn school_name(&self) -> String {
        display_name(&self.slug)
    }
}

/// Which rankings listing the team directory is resolved from.
#[derive(Debug, Clone, Copy, Default, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RankingStyle {
    #[default]
    Dual,
    Tournament,
}

/// Title-case a team slug into a display name, one word per `-` segment.
pub fn display_name(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

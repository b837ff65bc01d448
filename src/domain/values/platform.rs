use std::fmt;

/// Normalized presentation platform, derived from an offer's source label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Steam,
    Epic,
    Gog,
    Other,
}

impl Platform {
    /// Substring match on the lowercased source label. Anything that is not
    /// recognizably Steam/Epic/GOG falls through to `Other` and is excluded
    /// from the platform rails (but stays hero-eligible).
    pub fn from_source(source: &str) -> Self {
        let raw = source.to_lowercase();
        if raw.contains("steam") {
            Platform::Steam
        } else if raw.contains("epic") {
            Platform::Epic
        } else if raw.contains("gog") {
            Platform::Gog
        } else {
            Platform::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Steam => write!(f, "On Steam"),
            Platform::Epic => write!(f, "Epic Games"),
            Platform::Gog => write!(f, "GOG"),
            Platform::Other => write!(f, "Other Sources"),
        }
    }
}

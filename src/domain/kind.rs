use std::fmt;

/// The families of entities whose images are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Player,
    Tournament,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Player, AssetKind::Tournament];

    /// Subdirectory under `<output_root>/images` holding this kind's files
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Player => "players",
            AssetKind::Tournament => "tournaments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Player => "player",
            AssetKind::Tournament => "tournament",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_names_are_distinct() {
        assert_eq!(AssetKind::Player.dir_name(), "players");
        assert_eq!(AssetKind::Tournament.dir_name(), "tournaments");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(AssetKind::Tournament.to_string(), "tournament");
    }
}

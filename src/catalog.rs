//! Fixed selector tables shown by the search and filter flows

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub label: &'static str,
    pub generation: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Game {
    pub label: &'static str,
    pub version_group: &'static str,
}

pub const REGIONS: [Region; 9] = [
    Region {
        label: "Kanto (Generation I)",
        generation: 1,
    },
    Region {
        label: "Johto (Generation II)",
        generation: 2,
    },
    Region {
        label: "Hoenn (Generation III)",
        generation: 3,
    },
    Region {
        label: "Sinnoh (Generation IV)",
        generation: 4,
    },
    Region {
        label: "Unova (Generation V)",
        generation: 5,
    },
    Region {
        label: "Kalos (Generation VI)",
        generation: 6,
    },
    Region {
        label: "Alola (Generation VII)",
        generation: 7,
    },
    Region {
        label: "Galar (Generation VIII)",
        generation: 8,
    },
    Region {
        label: "Paldea (Generation IX)",
        generation: 9,
    },
];

pub const GAMES: [Game; 9] = [
    Game {
        label: "Red/Blue/Yellow",
        version_group: "red-blue",
    },
    Game {
        label: "Gold/Silver/Crystal",
        version_group: "gold-silver",
    },
    Game {
        label: "Ruby/Sapphire/Emerald",
        version_group: "ruby-sapphire",
    },
    Game {
        label: "Diamond/Pearl/Platinum",
        version_group: "diamond-pearl",
    },
    Game {
        label: "Black/White",
        version_group: "black-white",
    },
    Game {
        label: "X/Y",
        version_group: "x-y",
    },
    Game {
        label: "Sun/Moon",
        version_group: "sun-moon",
    },
    Game {
        label: "Sword/Shield",
        version_group: "sword-shield",
    },
    Game {
        label: "Scarlet/Violet",
        version_group: "scarlet-violet",
    },
];

pub const TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// Generation used when a game's version group cannot be looked up.
pub fn fallback_generation(game_index: usize) -> u8 {
    (game_index + 1) as u8
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub fn region_labels() -> Vec<String> {
    REGIONS.iter().map(|region| region.label.to_string()).collect()
}

pub fn game_labels() -> Vec<String> {
    GAMES.iter().map(|game| game.label.to_string()).collect()
}

pub fn type_labels() -> Vec<String> {
    TYPES.iter().map(|name| capitalize(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_map_to_generations_in_order() {
        for (index, region) in REGIONS.iter().enumerate() {
            assert_eq!(region.generation as usize, index + 1);
        }
        assert_eq!(REGIONS[8].label, "Paldea (Generation IX)");
    }

    #[test]
    fn test_fallback_generation_is_position_plus_one() {
        let scarlet = GAMES
            .iter()
            .position(|game| game.version_group == "scarlet-violet")
            .unwrap();
        assert_eq!(fallback_generation(scarlet), 9);
        assert_eq!(fallback_generation(0), 1);
    }

    #[test]
    fn test_type_labels_are_capitalized() {
        let labels = type_labels();
        assert_eq!(labels.len(), 18);
        assert_eq!(labels[1], "Fire");
        assert_eq!(labels[17], "Fairy");
        assert_eq!(labels[1].to_lowercase(), TYPES[1]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
        assert_eq!(capitalize("mr-mime"), "Mr-mime");
        assert_eq!(capitalize(""), "");
    }
}

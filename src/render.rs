//! Text rendering for listings and the detail view

use std::io::{self, Write};

use crate::catalog::capitalize;
use crate::state::{NamedEntry, PokedexEntry, PokemonDetail};

pub const DEFAULT_LIST_CAP: usize = 20;
pub const FALLBACK_LIST_CAP: usize = 15;
pub const LIST_RULE_WIDTH: usize = 50;
pub const DETAIL_RULE_WIDTH: usize = 40;

/// The two listing strategies. Sequential numbers rows 1, 2, 3 regardless of
/// any id; EntryNumbered shows each entry's own pokedex number as `#007`.
#[derive(Clone, Copy, Debug)]
pub enum Listing<'a> {
    Sequential(&'a [NamedEntry]),
    EntryNumbered(&'a [PokedexEntry]),
}

impl Listing<'_> {
    fn total(&self) -> usize {
        match self {
            Listing::Sequential(items) => items.len(),
            Listing::EntryNumbered(entries) => entries.len(),
        }
    }

    /// At most `cap` rows and nothing else.
    pub fn rows(&self, cap: usize) -> Vec<String> {
        match self {
            Listing::Sequential(items) => sequential_lines(items, cap),
            Listing::EntryNumbered(entries) => entry_numbered_lines(entries, cap),
        }
    }

    /// At most `cap` rows, plus one overflow line when the listing is longer.
    pub fn lines(&self, cap: usize, overflow_label: &str) -> Vec<String> {
        let mut lines = self.rows(cap);
        lines.extend(overflow_line(self.total(), cap, overflow_label));
        lines
    }

    pub fn write(&self, out: &mut dyn Write, cap: usize, overflow_label: &str) -> io::Result<()> {
        write_lines(out, self.lines(cap, overflow_label))
    }

    /// Like `write`, without the overflow line.
    pub fn write_rows(&self, out: &mut dyn Write, cap: usize) -> io::Result<()> {
        write_lines(out, self.rows(cap))
    }
}

fn write_lines(out: &mut dyn Write, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn sequential_lines(items: &[NamedEntry], cap: usize) -> Vec<String> {
    items
        .iter()
        .take(cap)
        .enumerate()
        .map(|(index, item)| format!("{}. {}", index + 1, capitalize(&item.name)))
        .collect()
}

fn entry_numbered_lines(entries: &[PokedexEntry], cap: usize) -> Vec<String> {
    entries
        .iter()
        .take(cap)
        .map(|entry| format!("#{:03} {}", entry.entry_number, capitalize(&entry.name)))
        .collect()
}

pub fn overflow_line(total: usize, cap: usize, label: &str) -> Option<String> {
    (total > cap).then(|| format!("... and {} more {label}!", total - cap))
}

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Integer tenths as a one-decimal string: 7 -> "0.7", 60 -> "6.0".
pub fn format_tenths(value: u32) -> String {
    format!("{}.{}", value / 10, value % 10)
}

pub fn detail_lines(detail: &PokemonDetail) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("✨ {} Details:", detail.name.to_uppercase()),
        rule(DETAIL_RULE_WIDTH),
        format!("ID: #{}", detail.id),
        format!("Height: {} m", format_tenths(detail.height)),
        format!("Weight: {} kg", format_tenths(detail.weight)),
        format!("Types: {}", detail.types.join(", ")),
        format!(
            "Base Experience: {}",
            detail
                .base_experience
                .map(|exp| exp.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        ),
        String::new(),
        "📊 Base Stats:".to_string(),
    ];
    lines.extend(
        detail
            .stats
            .iter()
            .map(|stat| format!("  {}: {}", stat.name, stat.value)),
    );
    lines.push(String::new());
    lines.push("🎯 Abilities:".to_string());
    lines.extend(detail.abilities.iter().map(|ability| {
        let hidden = if ability.is_hidden { " (Hidden)" } else { "" };
        format!("  - {}{hidden}", ability.name)
    }));
    lines
}

pub fn write_detail(out: &mut dyn Write, detail: &PokemonDetail) -> io::Result<()> {
    for line in detail_lines(detail) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PokemonAbility, PokemonStat};
    use pretty_assertions::assert_eq;

    fn named(names: &[&str]) -> Vec<NamedEntry> {
        names
            .iter()
            .map(|name| NamedEntry {
                name: name.to_string(),
                url: format!("https://pokeapi.co/api/v2/pokemon-species/{name}/"),
            })
            .collect()
    }

    fn numbered(count: u16) -> Vec<PokedexEntry> {
        (1..=count)
            .map(|n| PokedexEntry {
                entry_number: n,
                name: format!("mon{n}"),
                url: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_sequential_without_overflow() {
        let items = named(&["bulbasaur", "ivysaur", "venusaur"]);
        let lines = Listing::Sequential(&items).lines(20, "Pokémon");
        assert_eq!(lines, vec!["1. Bulbasaur", "2. Ivysaur", "3. Venusaur"]);
    }

    #[test]
    fn test_sequential_exactly_at_cap_has_no_overflow() {
        let names: Vec<String> = (0..20).map(|n| format!("mon{n}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let items = named(&refs);
        let lines = Listing::Sequential(&items).lines(20, "Pokémon");
        assert_eq!(lines.len(), 20);
        assert!(!lines.iter().any(|line| line.starts_with("...")));
    }

    #[test]
    fn test_sequential_overflow_counts_remainder() {
        let names: Vec<String> = (0..151).map(|n| format!("mon{n}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let items = named(&refs);
        let lines = Listing::Sequential(&items).lines(20, "Pokémon");
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[19], "20. Mon19");
        assert_eq!(lines[20], "... and 131 more Pokémon!");
        assert_eq!(
            lines.iter().filter(|line| line.starts_with("...")).count(),
            1
        );
    }

    #[test]
    fn test_sequential_ignores_underlying_ids() {
        // Type listings start mid-dex; numbering still starts at 1.
        let items = named(&["charmander", "charmeleon"]);
        let lines = Listing::Sequential(&items[1..]).lines(20, "fire type Pokémon");
        assert_eq!(lines, vec!["1. Charmeleon"]);
    }

    #[test]
    fn test_entry_numbered_pads_to_three_digits() {
        let entries = vec![
            PokedexEntry {
                entry_number: 7,
                name: "squirtle".into(),
                url: String::new(),
            },
            PokedexEntry {
                entry_number: 152,
                name: "chikorita".into(),
                url: String::new(),
            },
        ];
        let lines = Listing::EntryNumbered(&entries).lines(20, "entries");
        assert_eq!(lines, vec!["#007 Squirtle", "#152 Chikorita"]);
    }

    #[test]
    fn test_entry_numbered_overflow() {
        let entries = numbered(25);
        let lines = Listing::EntryNumbered(&entries).lines(20, "entries");
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], "#001 Mon1");
        assert_eq!(lines[20], "... and 5 more entries!");
    }

    #[test]
    fn test_rows_never_add_overflow() {
        let names: Vec<String> = (0..120).map(|n| format!("mon{n}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let items = named(&refs);
        let rows = Listing::Sequential(&items).rows(15);
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[14], "15. Mon14");
        assert!(!rows.iter().any(|line| line.starts_with("...")));
    }

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_tenths(7), "0.7");
        assert_eq!(format_tenths(60), "6.0");
        assert_eq!(format_tenths(0), "0.0");
        assert_eq!(format_tenths(9999), "999.9");
    }

    #[test]
    fn test_detail_lines_order() {
        let detail = PokemonDetail {
            id: 25,
            name: "pikachu".into(),
            height: 4,
            weight: 60,
            base_experience: Some(112),
            types: vec!["electric".into()],
            stats: vec![
                PokemonStat {
                    name: "hp".into(),
                    value: 35,
                },
                PokemonStat {
                    name: "speed".into(),
                    value: 90,
                },
            ],
            abilities: vec![
                PokemonAbility {
                    name: "static".into(),
                    is_hidden: false,
                },
                PokemonAbility {
                    name: "lightning-rod".into(),
                    is_hidden: true,
                },
            ],
            sprite_front_default: None,
        };

        assert_eq!(
            detail_lines(&detail),
            vec![
                "",
                "✨ PIKACHU Details:",
                "========================================",
                "ID: #25",
                "Height: 0.4 m",
                "Weight: 6.0 kg",
                "Types: electric",
                "Base Experience: 112",
                "",
                "📊 Base Stats:",
                "  hp: 35",
                "  speed: 90",
                "",
                "🎯 Abilities:",
                "  - static",
                "  - lightning-rod (Hidden)",
            ]
        );
    }

    #[test]
    fn test_missing_base_experience() {
        let detail = PokemonDetail {
            id: 10_001,
            name: "deoxys-attack".into(),
            height: 17,
            weight: 608,
            base_experience: None,
            types: vec!["psychic".into()],
            stats: Vec::new(),
            abilities: Vec::new(),
            sprite_front_default: None,
        };
        assert!(detail_lines(&detail).contains(&"Base Experience: unknown".to_string()));
    }
}

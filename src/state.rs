//! Application state and the records fetched from the API

use serde::{Deserialize, Serialize};

/// Minimal listing item returned by collection endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    /// Decimeters
    pub height: u32,
    /// Hectograms, shown as kilograms after dividing by ten
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub abilities: Vec<PokemonAbility>,
    pub sprite_front_default: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonAbility {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub name: String,
    pub main_region: Option<String>,
    pub species: Vec<NamedEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersionGroup {
    pub name: String,
    pub generation: String,
    pub versions: Vec<String>,
    pub pokedexes: Vec<NamedEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pokedex {
    pub name: String,
    pub entries: Vec<PokedexEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokedexEntry {
    pub entry_number: u16,
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeMembers {
    pub name: String,
    pub pokemon: Vec<NamedEntry>,
}

/// Top-level menu items, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuChoice {
    ViewAll,
    SearchByName,
    SearchByRegionOrGame,
    FilterByType,
    AddPokemon,
    UpdatePokemon,
    DeletePokemon,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::ViewAll,
        MenuChoice::SearchByName,
        MenuChoice::SearchByRegionOrGame,
        MenuChoice::FilterByType,
        MenuChoice::AddPokemon,
        MenuChoice::UpdatePokemon,
        MenuChoice::DeletePokemon,
        MenuChoice::Exit,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|choice| choice.label().to_string()).collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewAll => "View All Pokémon",
            MenuChoice::SearchByName => "Search Pokémon by Name",
            MenuChoice::SearchByRegionOrGame => "Search by Region or Game",
            MenuChoice::FilterByType => "Filter Pokémon by Type",
            MenuChoice::AddPokemon => "Add New Pokémon",
            MenuChoice::UpdatePokemon => "Update Existing Pokémon",
            MenuChoice::DeletePokemon => "Delete Pokémon",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Line printed as soon as the item is chosen.
    pub fn announcement(self) -> &'static str {
        match self {
            MenuChoice::ViewAll => "Viewing all Pokémon...",
            MenuChoice::SearchByName => "Searching Pokémon by name...",
            MenuChoice::SearchByRegionOrGame => "Searching by region or game...",
            MenuChoice::FilterByType => "Filtering Pokémon by type...",
            MenuChoice::AddPokemon => "Adding new Pokémon...",
            MenuChoice::UpdatePokemon => "Updating existing Pokémon...",
            MenuChoice::DeletePokemon => "Deleting Pokémon...",
            MenuChoice::Exit => "Exiting application. Goodbye!",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuPhase {
    #[default]
    AwaitingSelection,
    Running(MenuChoice),
    Exited,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuState {
    pub phase: MenuPhase,
    pub completed_flows: u32,
    pub failed_flows: u32,
    pub last_error: Option<String>,
}

impl MenuState {
    pub fn is_exited(&self) -> bool {
        self.phase == MenuPhase::Exited
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == MenuPhase::AwaitingSelection
    }
}

//! Interactive flows behind each menu item
//!
//! Every flow returns `Result<(), FlowError>`; the menu loop is the single
//! boundary that reports failures and carries on. "Not found" answers from the
//! API are expected and handled inside the flows as plain messages.

use std::io::{self, Write};

use crate::api::{self, ApiError, PokeApi, POKEMON_LIST_LIMIT};
use crate::catalog::{self, GAMES, REGIONS, TYPES};
use crate::prompt::{PromptError, Prompter};
use crate::render::{self, Listing, DEFAULT_LIST_CAP, FALLBACK_LIST_CAP, LIST_RULE_WIDTH};
use crate::sprite::SpriteMode;
use crate::state::MenuChoice;

pub const NAME_SEARCH_PROMPT: &str = "Enter Pokémon name to search:";
pub const NAME_SEARCH_EMPTY: &str = "Name cannot be empty";
pub const DETAIL_CONFIRM_PROMPT: &str =
    "Would you like to see detailed information for a specific Pokémon?";
pub const DETAIL_NAME_PROMPT: &str = "Enter the Pokémon name:";
pub const DETAIL_NAME_EMPTY: &str = "Pokémon name cannot be empty";

const SEARCH_MODE_PROMPT: &str = "What would you like to search by?";
const SEARCH_MODES: [&str; 3] = ["Region (Generation)", "Game Version", "Back to Main Menu"];

#[derive(thiserror::Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

impl FlowError {
    /// The user asked to leave; the menu loop should stop instead of
    /// reporting and carrying on.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlowError::Prompt(PromptError::Interrupted | PromptError::Closed)
        )
    }
}

/// Everything a flow touches, borrowed for the length of one menu action.
pub struct Session<'a> {
    pub api: &'a dyn PokeApi,
    pub prompter: &'a mut dyn Prompter,
    pub out: &'a mut dyn Write,
    pub sprites: SpriteMode,
}

impl Session<'_> {
    /// Dispatch a menu choice to its flow.
    pub async fn run(&mut self, choice: MenuChoice) -> Result<(), FlowError> {
        match choice {
            MenuChoice::ViewAll => self.view_all().await,
            MenuChoice::SearchByName => self.search_by_name().await,
            MenuChoice::SearchByRegionOrGame => self.search_by_region_or_game().await,
            MenuChoice::FilterByType => self.filter_by_type().await,
            MenuChoice::AddPokemon | MenuChoice::UpdatePokemon | MenuChoice::DeletePokemon => {
                writeln!(self.out, "This option is not available yet.")?;
                Ok(())
            }
            MenuChoice::Exit => Ok(()),
        }
    }

    pub async fn view_all(&mut self) -> Result<(), FlowError> {
        let entries = api::fetch_pokemon_list(self.api).await?;
        writeln!(self.out, "\n📋 Showing {} Pokémon:", entries.len())?;
        writeln!(self.out, "{}", render::rule(LIST_RULE_WIDTH))?;
        Listing::Sequential(&entries)
            .write(self.out, POKEMON_LIST_LIMIT, "Pokémon")?;
        Ok(())
    }

    pub async fn search_by_name(&mut self) -> Result<(), FlowError> {
        let name = self.prompter.input(NAME_SEARCH_PROMPT, NAME_SEARCH_EMPTY)?;
        self.show_details(&normalize_name(&name)).await
    }

    pub async fn search_by_region_or_game(&mut self) -> Result<(), FlowError> {
        let modes: Vec<String> = SEARCH_MODES.iter().map(|mode| mode.to_string()).collect();
        match self.prompter.select(SEARCH_MODE_PROMPT, &modes)? {
            0 => self.search_by_region().await,
            1 => self.search_by_game().await,
            _ => Ok(()),
        }
    }

    pub async fn search_by_region(&mut self) -> Result<(), FlowError> {
        let index = self
            .prompter
            .select("Select a region to explore:", &catalog::region_labels())?;
        let Some(region) = REGIONS.get(index) else {
            return Ok(());
        };

        writeln!(self.out, "\n🌍 Searching for Pokémon from {}...", region.label)?;
        let generation = api::fetch_generation(self.api, region.generation).await?;

        writeln!(self.out, "\n📊 Generation {} Information:", region.generation)?;
        writeln!(
            self.out,
            "Region: {}",
            generation.main_region.as_deref().unwrap_or("unknown")
        )?;
        writeln!(self.out, "Total Pokémon species: {}", generation.species.len())?;

        writeln!(self.out, "\n🎮 Pokémon from {}:", region.label)?;
        writeln!(self.out, "{}", render::rule(LIST_RULE_WIDTH))?;
        Listing::Sequential(&generation.species)
            .write(self.out, DEFAULT_LIST_CAP, "Pokémon")?;

        self.offer_details().await
    }

    pub async fn search_by_game(&mut self) -> Result<(), FlowError> {
        let index = self
            .prompter
            .select("Select a game version:", &catalog::game_labels())?;
        let Some(game) = GAMES.get(index) else {
            return Ok(());
        };

        writeln!(self.out, "\n🎮 Searching for Pokémon from {}...", game.label)?;
        if let Err(err) = self.list_game(index).await {
            if err.is_terminal() {
                return Err(err);
            }
            tracing::error!(game = game.version_group, error = %err, "game lookup failed");
            writeln!(self.out, "Error fetching game data: {err}")?;
        }

        self.offer_details().await
    }

    async fn list_game(&mut self, index: usize) -> Result<(), FlowError> {
        let game = &GAMES[index];
        let version_group = match api::fetch_version_group(self.api, game.version_group).await {
            Ok(version_group) => version_group,
            Err(err) if err.is_not_found() => {
                writeln!(
                    self.out,
                    "⚠️  Version group '{}' not found in API.",
                    game.version_group
                )?;
                writeln!(self.out, "Showing generation-based results instead...")?;
                return self.list_fallback_generation(index).await;
            }
            Err(err) => return Err(err.into()),
        };

        writeln!(self.out, "\n📱 Game Information:")?;
        writeln!(self.out, "Version Group: {}", version_group.name)?;
        writeln!(self.out, "Generation: {}", version_group.generation)?;
        writeln!(self.out, "Versions: {}", version_group.versions.join(", "))?;

        let Some(first) = version_group.pokedexes.first() else {
            writeln!(self.out, "No specific Pokédex found for this version group.")?;
            return Ok(());
        };
        let pokedex = api::fetch_pokedex(self.api, &first.url).await?;
        writeln!(self.out, "\n📖 {} Pokédex:", pokedex.name.to_uppercase())?;
        writeln!(self.out, "Total entries: {}", pokedex.entries.len())?;
        writeln!(self.out, "{}", render::rule(LIST_RULE_WIDTH))?;
        Listing::EntryNumbered(&pokedex.entries)
            .write(self.out, DEFAULT_LIST_CAP, "entries")?;
        Ok(())
    }

    async fn list_fallback_generation(&mut self, index: usize) -> Result<(), FlowError> {
        let game = &GAMES[index];
        let generation_index = catalog::fallback_generation(index);
        let generation = api::fetch_generation(self.api, generation_index).await?;
        writeln!(
            self.out,
            "\n🌍 Generation {generation_index} Pokémon (includes {}):",
            game.label
        )?;
        Listing::Sequential(&generation.species)
            .write_rows(self.out, FALLBACK_LIST_CAP)?;
        Ok(())
    }

    pub async fn filter_by_type(&mut self) -> Result<(), FlowError> {
        let index = self
            .prompter
            .select("Select a Pokémon type:", &catalog::type_labels())?;
        let Some(type_name) = TYPES.get(index) else {
            return Ok(());
        };
        let shout = type_name.to_uppercase();

        writeln!(self.out, "\n🔥 Searching for {shout} type Pokémon...")?;
        let members = api::fetch_type_members(self.api, type_name).await?;

        writeln!(
            self.out,
            "\n📊 Found {} {shout} type Pokémon:",
            members.pokemon.len()
        )?;
        writeln!(self.out, "{}", render::rule(LIST_RULE_WIDTH))?;
        let label = format!("{type_name} type Pokémon");
        Listing::Sequential(&members.pokemon)
            .write(self.out, DEFAULT_LIST_CAP, &label)?;

        self.offer_details().await
    }

    /// Optional drill-down offered after every listing.
    pub async fn offer_details(&mut self) -> Result<(), FlowError> {
        if !self.prompter.confirm(DETAIL_CONFIRM_PROMPT, false)? {
            return Ok(());
        }
        let name = self.prompter.input(DETAIL_NAME_PROMPT, DETAIL_NAME_EMPTY)?;
        self.show_details(&normalize_name(&name)).await
    }

    /// Detail view for one Pokémon. Not-found is a message, not an error, and
    /// a missing sprite never blocks the text.
    pub async fn show_details(&mut self, name: &str) -> Result<(), FlowError> {
        writeln!(self.out, "\n🔍 Fetching details for {name}...")?;
        let detail = match api::fetch_pokemon_detail(self.api, name).await {
            Ok(detail) => detail,
            Err(err) if err.is_not_found() => {
                writeln!(self.out, "❌ Pokémon '{name}' not found.")?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(url) = &detail.sprite_front_default {
            self.show_sprite(url).await?;
        }
        render::write_detail(self.out, &detail)?;
        Ok(())
    }

    async fn show_sprite(&mut self, url: &str) -> io::Result<()> {
        if self.sprites == SpriteMode::Disabled {
            return Ok(());
        }
        let rendered = match self.api.fetch_bytes(url).await {
            Ok(bytes) => self.sprites.render(self.out, &bytes),
            Err(err) => Err(err.to_string()),
        };
        if let Err(error) = rendered {
            tracing::warn!(url, %error, "sprite unavailable");
            writeln!(self.out, "⚠️ Couldn't fetch image.")?;
        }
        Ok(())
    }
}

pub fn normalize_name(input: &str) -> String {
    input.trim().to_lowercase()
}

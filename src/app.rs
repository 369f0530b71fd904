//! Main menu loop

use std::collections::VecDeque;
use std::io::Write;

use tui_dispatch::EffectStore;

use crate::action::Action;
use crate::api::PokeApi;
use crate::effect::Effect;
use crate::flows::{FlowError, Session};
use crate::prompt::{PromptError, Prompter};
use crate::reducer::reducer;
use crate::sprite::SpriteMode;
use crate::state::{MenuChoice, MenuState};

pub const MENU_PROMPT: &str = "Select an option:";

pub struct App<'a> {
    store: EffectStore<MenuState, Action, Effect>,
    session: Session<'a>,
}

impl<'a> App<'a> {
    pub fn new(
        api: &'a dyn PokeApi,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
        sprites: SpriteMode,
    ) -> Self {
        Self {
            store: EffectStore::new(MenuState::default(), reducer),
            session: Session {
                api,
                prompter,
                out,
                sprites,
            },
        }
    }

    pub fn state(&self) -> &MenuState {
        self.store.state()
    }

    /// Show the menu until Exit is chosen. Only an interrupted or closed
    /// prompt ends the loop early.
    pub async fn run(&mut self) -> Result<(), PromptError> {
        let labels = MenuChoice::labels();
        while !self.store.state().is_exited() {
            let index = self.session.prompter.select(MENU_PROMPT, &labels)?;
            let action = match MenuChoice::from_index(index) {
                Some(choice) => Action::MenuSelect(choice),
                None => Action::MenuInvalid(index),
            };
            self.dispatch(action).await?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, action: Action) -> Result<(), PromptError> {
        let mut queue = VecDeque::from([action]);

        while let Some(next_action) = queue.pop_front() {
            let result = self.store.dispatch(next_action);
            for effect in result.effects {
                self.handle_effect(effect, &mut queue).await?;
            }
        }
        Ok(())
    }

    async fn handle_effect(
        &mut self,
        effect: Effect,
        queue: &mut VecDeque<Action>,
    ) -> Result<(), PromptError> {
        match effect {
            Effect::RunFlow(choice) => {
                self.say(choice.announcement());
                let outcome = match self.session.run(choice).await {
                    Ok(()) => Action::FlowDidFinish,
                    Err(FlowError::Prompt(
                        err @ (PromptError::Interrupted | PromptError::Closed),
                    )) => {
                        return Err(err);
                    }
                    Err(err) => {
                        tracing::error!(flow = ?choice, error = %err, "flow failed");
                        self.say(&format!("{}: {err}", failure_context(choice)));
                        Action::FlowDidFail(err.to_string())
                    }
                };
                queue.push_back(outcome);
            }
            Effect::InvalidChoice(index) => {
                tracing::warn!(index, "menu selection out of range");
                self.say("Invalid choice. Please try again.");
            }
            Effect::Farewell => self.say(MenuChoice::Exit.announcement()),
        }
        Ok(())
    }

    fn say(&mut self, line: &str) {
        if let Err(err) = writeln!(self.session.out, "{line}") {
            tracing::warn!(error = %err, "failed to write to output");
        }
    }
}

fn failure_context(choice: MenuChoice) -> &'static str {
    match choice {
        MenuChoice::ViewAll => "Error fetching Pokémon list",
        MenuChoice::SearchByName => "Error searching Pokémon by name",
        MenuChoice::SearchByRegionOrGame => "Error searching by region or game",
        MenuChoice::FilterByType => "Error filtering by type",
        MenuChoice::AddPokemon | MenuChoice::UpdatePokemon | MenuChoice::DeletePokemon => {
            "Error running menu option"
        }
        MenuChoice::Exit => "Error exiting",
    }
}

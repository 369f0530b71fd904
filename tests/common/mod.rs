//! Scripted stand-ins for the network and the terminal
//!
//! `ScriptedApi` serves canned JSON keyed by request path (or absolute URL)
//! and records every request. `ScriptedPrompter` answers prompts from a queue
//! and applies the same validation as the terminal prompter.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use pokedex::api::{join_url, ApiError, PokeApi};
use pokedex::config::DEFAULT_API_URL;
use pokedex::prompt::{validate_non_empty, PromptError, Prompter};

#[derive(Default)]
pub struct ScriptedApi {
    json: HashMap<String, Value>,
    bytes: HashMap<String, Vec<u8>>,
    errors: HashMap<String, ApiError>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, key: impl Into<String>, value: Value) -> Self {
        self.json.insert(key.into(), value);
        self
    }

    pub fn with_bytes(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.bytes.insert(url.into(), bytes);
        self
    }

    pub fn with_error(mut self, key: impl Into<String>, error: ApiError) -> Self {
        self.errors.insert(key.into(), error);
        self
    }

    /// Every path or URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, key: &str) {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key.to_string());
    }

    fn lookup<T: Clone>(&self, table: &HashMap<String, T>, key: &str) -> Result<T, ApiError> {
        self.record(key);
        if let Some(error) = self.errors.get(key) {
            return Err(error.clone());
        }
        table.get(key).cloned().ok_or_else(|| ApiError::NotFound {
            url: if key.starts_with("http") {
                key.to_string()
            } else {
                join_url(DEFAULT_API_URL, key)
            },
        })
    }
}

#[async_trait]
impl PokeApi for ScriptedApi {
    async fn fetch_json(&self, path: &str) -> Result<Value, ApiError> {
        self.lookup(&self.json, path)
    }

    async fn fetch_url_json(&self, url: &str) -> Result<Value, ApiError> {
        self.lookup(&self.json, url)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.lookup(&self.bytes, url)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// Pick the choice with this exact label
    Choose(String),
    /// Pick by position, whether or not a choice exists there
    Index(usize),
    Text(String),
    Confirm(bool),
}

impl Answer {
    pub fn choose(label: &str) -> Self {
        Answer::Choose(label.to_string())
    }

    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Prompt messages in the order they were asked
    pub asked: Vec<String>,
    /// Validation messages shown for rejected text answers
    pub rejected: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Index(index)) => Ok(index),
            Some(Answer::Choose(label)) => choices
                .iter()
                .position(|choice| *choice == label)
                .ok_or(PromptError::Closed),
            _ => Err(PromptError::Closed),
        }
    }

    fn input(&mut self, message: &str, empty_message: &str) -> Result<String, PromptError> {
        self.asked.push(message.to_string());
        loop {
            match self.answers.pop_front() {
                Some(Answer::Text(value)) => match validate_non_empty(&value, empty_message) {
                    Ok(()) => return Ok(value),
                    Err(rejection) => self.rejected.push(rejection),
                },
                _ => return Err(PromptError::Closed),
            }
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, PromptError> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Confirm(answer)) => Ok(answer),
            _ => Err(PromptError::Closed),
        }
    }
}

fn resource(kind: &str, name: &str) -> Value {
    json!({ "name": name, "url": format!("{DEFAULT_API_URL}/{kind}/{name}/") })
}

fn species_names(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("{prefix}{n}")).collect()
}

pub fn pokemon_json(name: &str, id: u32, types: &[&str], sprite: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "base_experience": 112,
        "types": types
            .iter()
            .enumerate()
            .map(|(slot, name)| json!({ "slot": slot + 1, "type": resource("type", name) }))
            .collect::<Vec<_>>(),
        "stats": [
            { "base_stat": 35, "effort": 0, "stat": resource("stat", "hp") },
            { "base_stat": 55, "effort": 0, "stat": resource("stat", "attack") },
            { "base_stat": 90, "effort": 2, "stat": resource("stat", "speed") },
        ],
        "abilities": [
            { "ability": resource("ability", "static"), "is_hidden": false, "slot": 1 },
            { "ability": resource("ability", "lightning-rod"), "is_hidden": true, "slot": 3 },
        ],
        "sprites": { "front_default": sprite, "back_default": null },
    })
}

pub fn pokemon_list_json(count: usize) -> Value {
    json!({
        "count": 1302,
        "results": species_names("mon", count)
            .iter()
            .map(|name| resource("pokemon", name))
            .collect::<Vec<_>>(),
    })
}

pub fn generation_json(generation: u8, region: &str, species_count: usize) -> Value {
    json!({
        "id": generation,
        "name": format!("generation-{generation}"),
        "main_region": resource("region", region),
        "pokemon_species": species_names(region, species_count)
            .iter()
            .map(|name| resource("pokemon-species", name))
            .collect::<Vec<_>>(),
    })
}

pub fn type_json(name: &str, member_count: usize) -> Value {
    json!({
        "id": 10,
        "name": name,
        "pokemon": species_names(name, member_count)
            .iter()
            .enumerate()
            .map(|(slot, member)| {
                json!({ "slot": slot % 2 + 1, "pokemon": resource("pokemon", member) })
            })
            .collect::<Vec<_>>(),
    })
}

pub fn version_group_json(
    name: &str,
    generation: &str,
    versions: &[&str],
    pokedexes: &[&str],
) -> Value {
    json!({
        "id": 1,
        "name": name,
        "generation": resource("generation", generation),
        "versions": versions.iter().map(|v| resource("version", v)).collect::<Vec<_>>(),
        "pokedexes": pokedexes.iter().map(|p| resource("pokedex", p)).collect::<Vec<_>>(),
    })
}

pub fn pokedex_url(name: &str) -> String {
    format!("{DEFAULT_API_URL}/pokedex/{name}/")
}

pub fn pokedex_json(name: &str, entry_count: u16) -> Value {
    json!({
        "id": 2,
        "name": name,
        "pokemon_entries": (1..=entry_count)
            .map(|n| json!({
                "entry_number": n,
                "pokemon_species": resource("pokemon-species", &format!("{name}{n}")),
            }))
            .collect::<Vec<_>>(),
    })
}

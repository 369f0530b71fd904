//! PokeAPI client

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::state::{
    Generation, NamedEntry, Pokedex, PokedexEntry, PokemonAbility, PokemonDetail, PokemonStat,
    TypeMembers, VersionGroup,
};

pub const POKEMON_LIST_LIMIT: usize = 100;

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found: {url}")]
    NotFound { url: String },
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Transport seam. Paths are relative to the configured base URL; absolute
/// URLs come from earlier response bodies.
#[async_trait]
pub trait PokeApi: Send + Sync {
    async fn fetch_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn fetch_url_json(&self, url: &str) -> Result<Value, ApiError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        tracing::debug!(url, status = response.status().as_u16(), "GET");
        check_status(response.status(), url)?;
        Ok(response)
    }
}

#[async_trait]
impl PokeApi for HttpClient {
    async fn fetch_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(path);
        self.fetch_url_json(&url).await
    }

    async fn fetch_url_json(&self, url: &str) -> Result<Value, ApiError> {
        let response = self.get(url).await?;
        response.json().await.map_err(|err| ApiError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn check_status(status: StatusCode, url: &str) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(ApiError::NotFound {
            url: url.to_string(),
        })
    } else {
        Err(ApiError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

impl From<NamedResource> for NamedEntry {
    fn from(resource: NamedResource) -> Self {
        NamedEntry {
            name: resource.name,
            url: resource.url,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct GenerationResponse {
    name: String,
    main_region: Option<NamedResource>,
    pokemon_species: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct VersionGroupResponse {
    name: String,
    generation: NamedResource,
    versions: Vec<NamedResource>,
    #[serde(default)]
    pokedexes: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexResponse {
    name: String,
    pokemon_entries: Vec<PokedexEntryResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexEntryResponse {
    entry_number: u16,
    pokemon_species: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    name: String,
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    sprites: Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

pub async fn fetch_pokemon_list(api: &dyn PokeApi) -> Result<Vec<NamedEntry>, ApiError> {
    let path = format!("pokemon?limit={POKEMON_LIST_LIMIT}");
    let response: ListResponse = decode(&path, api.fetch_json(&path).await?)?;
    Ok(response.results.into_iter().map(NamedEntry::from).collect())
}

pub async fn fetch_generation(api: &dyn PokeApi, generation: u8) -> Result<Generation, ApiError> {
    let path = format!("generation/{generation}");
    let response: GenerationResponse = decode(&path, api.fetch_json(&path).await?)?;
    Ok(Generation {
        name: response.name,
        main_region: response.main_region.map(|region| region.name),
        species: response
            .pokemon_species
            .into_iter()
            .map(NamedEntry::from)
            .collect(),
    })
}

pub async fn fetch_version_group(api: &dyn PokeApi, id: &str) -> Result<VersionGroup, ApiError> {
    let path = format!("version-group/{id}");
    let response: VersionGroupResponse = decode(&path, api.fetch_json(&path).await?)?;
    Ok(VersionGroup {
        name: response.name,
        generation: response.generation.name,
        versions: response
            .versions
            .into_iter()
            .map(|version| version.name)
            .collect(),
        pokedexes: response.pokedexes.into_iter().map(NamedEntry::from).collect(),
    })
}

/// Pokedex entries keep the API's order.
pub async fn fetch_pokedex(api: &dyn PokeApi, url: &str) -> Result<Pokedex, ApiError> {
    let response: PokedexResponse = decode(url, api.fetch_url_json(url).await?)?;
    Ok(Pokedex {
        name: response.name,
        entries: response
            .pokemon_entries
            .into_iter()
            .map(|entry| PokedexEntry {
                entry_number: entry.entry_number,
                name: entry.pokemon_species.name,
                url: entry.pokemon_species.url,
            })
            .collect(),
    })
}

pub async fn fetch_type_members(api: &dyn PokeApi, name: &str) -> Result<TypeMembers, ApiError> {
    let path = format!("type/{name}");
    let response: TypeDetailResponse = decode(&path, api.fetch_json(&path).await?)?;
    Ok(TypeMembers {
        name: response.name,
        pokemon: response
            .pokemon
            .into_iter()
            .map(|entry| NamedEntry::from(entry.pokemon))
            .collect(),
    })
}

pub async fn fetch_pokemon_detail(
    api: &dyn PokeApi,
    name: &str,
) -> Result<PokemonDetail, ApiError> {
    let path = format!("pokemon/{name}");
    let response: PokemonResponse = decode(&path, api.fetch_json(&path).await?)?;

    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();
    let abilities = response
        .abilities
        .into_iter()
        .map(|slot| PokemonAbility {
            name: slot.ability.name,
            is_hidden: slot.is_hidden,
        })
        .collect();

    Ok(PokemonDetail {
        id: response.id,
        name: response.name,
        height: response.height,
        weight: response.weight,
        base_experience: response.base_experience,
        types,
        stats,
        abilities,
        sprite_front_default: pointer_string(&response.sprites, "/front_default"),
    })
}

fn decode<T: DeserializeOwned>(url: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}

fn pointer_string(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

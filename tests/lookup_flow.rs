// End-to-end lookups against a fake PokeAPI served over real HTTP.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use pokedex_lookup::{
    AppError, AppState, Config, CycleOutcome, HttpFetcher, Orchestrator, RegionName, Screen,
    ScreenSettings, router,
};
use serde_json::{Value, json};
use std::sync::Arc;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn pokemon(api: &str, id: i32, name: &str, species: &str, moves: &[u32]) -> Value {
    json!({
        "id": id,
        "name": name,
        "sprites": { "front_default": format!("https://sprites/{}.png", id) },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": format!("{}/type/12/", api) } },
            { "slot": 2, "type": { "name": "poison", "url": format!("{}/type/4/", api) } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "defense", "url": "" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "" } },
            { "base_stat": 65, "effort": 0, "stat": { "name": "special-defense", "url": "" } },
            { "base_stat": 45, "effort": 0, "stat": { "name": "speed", "url": "" } }
        ],
        "moves": moves.iter().map(|m| json!({
            "move": { "name": format!("move-{}", m), "url": format!("{}/move/{}/", api, m) }
        })).collect::<Vec<_>>(),
        "species": { "name": name, "url": format!("{}/pokemon-species/{}/", api, species) }
    })
}

fn move_resource(id: u32) -> Option<Value> {
    let (name, es, power, effect_es) = match id {
        13 => ("razor-wind", "Viento Cortante", json!(80), Some("Golpea en el segundo turno.")),
        14 => ("swords-dance", "Danza Espada", Value::Null, None),
        15 => ("cut", "Corte", json!(50), None),
        20 => ("bind", "Atadura", json!(15), None),
        _ => return None,
    };

    let mut effects = vec![json!({
        "effect": "long",
        "short_effect": format!("{} (en)", name),
        "language": { "name": "en", "url": "" }
    })];
    if let Some(text) = effect_es {
        effects.push(json!({
            "effect": "largo",
            "short_effect": text,
            "language": { "name": "es", "url": "" }
        }));
    }

    Some(json!({
        "id": id,
        "name": name,
        "names": [
            { "name": name.to_uppercase(), "language": { "name": "en", "url": "" } },
            { "name": es, "language": { "name": "es", "url": "" } }
        ],
        "type": { "name": "normal", "url": "" },
        "power": power,
        "effect_entries": effects
    }))
}

async fn pokemon_route(
    State(api): State<Arc<String>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    match name.as_str() {
        "bulbasaur" | "1" => Ok(Json(pokemon(&api, 1, "bulbasaur", "1", &[13, 14, 15, 20]))),
        "brokenmove" => Ok(Json(pokemon(&api, 900, "brokenmove", "1", &[13, 999]))),
        "lostspecies" => Ok(Json(pokemon(&api, 901, "lostspecies", "404", &[15]))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn species_route(
    State(api): State<Arc<String>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "1" => Ok(Json(json!({
            "generation": { "name": "generation-i", "url": format!("{}/generation/1/", api) }
        }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn generation_route() -> Json<Value> {
    Json(json!({ "main_region": { "name": "kanto", "url": "" } }))
}

async fn move_route(Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
    move_resource(id)
        .map(Json)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Starts the fake API and returns its `/api/v2` base URL.
async fn spawn_fake_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let api = format!("http://{}/api/v2", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/api/v2/pokemon/{name}", get(pokemon_route))
        .route("/api/v2/pokemon-species/{id}/", get(species_route))
        .route("/api/v2/generation/{id}/", get(generation_route))
        .route("/api/v2/move/{id}/", get(move_route))
        .with_state(Arc::new(api.clone()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    api
}

fn orchestrator(api: &str) -> Orchestrator<Screen> {
    let mut config = Config::default();
    config.pokeapi.api_url = api.to_string();
    let config = Arc::new(config);
    let screen = Screen::new(ScreenSettings::from(config.as_ref()));
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Orchestrator::new(Arc::new(HttpFetcher::with_client(client)), config, screen)
}

#[tokio::test]
async fn test_lookup_renders_full_view() {
    let api = spawn_fake_api().await;
    let orch = orchestrator(&api);

    let CycleOutcome::Rendered(view) = orch.submit("Bulbasaur").await else {
        panic!("bulbasaur should render");
    };
    assert_eq!(view.id, 1);
    assert_eq!(view.region, RegionName::Known("kanto".to_string()));
    assert_eq!(view.moves.len(), 3);

    orch.with_sink(|screen| {
        assert_eq!(screen.name, "Bulbasaur");
        assert_eq!(screen.id, "1");
        assert_eq!(screen.sprite, "https://sprites/1.png");
        assert_eq!(screen.region, "Kanto");
        assert_eq!(screen.types, "Grass, Poison");
        assert_eq!(screen.average_move_power, "65.00");
        assert_eq!(screen.average_base_stat, "53.00");

        let names: Vec<&str> = screen.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Viento Cortante", "Danza Espada", "Corte"]);
        assert_eq!(screen.moves[0].effect, "Golpea en el segundo turno.");
        assert_eq!(screen.moves[1].effect, "swords-dance (en)");
        assert_eq!(screen.moves[1].power, "N/A");

        let chart = screen.chart.as_ref().unwrap();
        assert_eq!(chart.ceiling, 200);
        assert_eq!(chart.axes.len(), 6);
    });
}

#[tokio::test]
async fn test_numeric_query() {
    let api = spawn_fake_api().await;
    let orch = orchestrator(&api);
    assert!(matches!(orch.submit(" 1 ").await, CycleOutcome::Rendered(_)));
}

#[tokio::test]
async fn test_unknown_entity_is_not_found() {
    let api = spawn_fake_api().await;
    let orch = orchestrator(&api);

    let outcome = orch.submit("agumon").await;
    assert!(matches!(outcome, CycleOutcome::Errored(AppError::NotFound(_))));
    orch.with_sink(|screen| assert!(screen.is_blank()));
}

#[tokio::test]
async fn test_failing_move_blanks_everything() {
    let api = spawn_fake_api().await;
    let orch = orchestrator(&api);

    assert!(matches!(orch.submit("bulbasaur").await, CycleOutcome::Rendered(_)));
    assert!(matches!(orch.submit("brokenmove").await, CycleOutcome::Errored(_)));

    orch.with_sink(|screen| {
        assert!(screen.is_blank());
        assert!(screen.moves.is_empty());
        assert!(screen.average_move_power.is_empty());
        assert!(screen.chart.is_none());
    });
}

#[tokio::test]
async fn test_missing_species_falls_back_to_unknown_region() {
    let api = spawn_fake_api().await;
    let orch = orchestrator(&api);

    let CycleOutcome::Rendered(view) = orch.submit("lostspecies").await else {
        panic!("region failures must not fail the lookup");
    };
    assert_eq!(view.region, RegionName::Unknown);
    orch.with_sink(|screen| {
        assert_eq!(screen.region, "Unknown");
        assert_eq!(screen.average_move_power, "50.00");
    });
}

#[tokio::test]
async fn test_http_front_end() {
    let api = spawn_fake_api().await;
    let state = Arc::new(AppState {
        orchestrator: orchestrator(&api),
    });
    let base = spawn(router(state)).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let response = client
        .get(format!("{}/query/BULBASAUR", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let screen: Value = response.json().await.unwrap();
    assert_eq!(screen["name"], "Bulbasaur");
    assert_eq!(screen["moves"].as_array().map(|m| m.len()), Some(3));

    let response = client
        .post(format!("{}/query", base))
        .json(&json!({ "query": "agumon" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let screen: Value = response.json().await.unwrap();
    assert_eq!(screen["message"], "Error! Pokémon not found");
    assert_eq!(screen["moves"], json!([]));
}

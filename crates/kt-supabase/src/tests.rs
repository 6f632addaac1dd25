//! Tests for `SupabaseStore` against a mocked PostgREST endpoint.

use kt_core::{
  record::{Game, NewPlayer, Player, RecordId, ReferenceItem},
  store::{DataStore, Table},
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use crate::{Error, SupabaseConfig, SupabaseStore};

const KEY: &str = "service-role-key";

async fn setup() -> (ServerGuard, SupabaseStore) {
  let server = Server::new_async().await;
  let store = SupabaseStore::new(SupabaseConfig::new(server.url(), KEY))
    .expect("store");
  (server, store)
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn rejects_unparseable_url() {
  let result = SupabaseStore::new(SupabaseConfig::new("not a url", KEY));
  assert!(matches!(result, Err(Error::InvalidUrl { .. })));
}

#[test]
fn rejects_non_http_scheme() {
  let result =
    SupabaseStore::new(SupabaseConfig::new("ftp://example.com", KEY));
  assert!(matches!(result, Err(Error::InvalidUrl { .. })));
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn select_all_sends_key_and_decodes_rows() {
  let (mut server, store) = setup().await;
  let mock = server
    .mock("GET", "/rest/v1/killteams")
    .match_query(Matcher::UrlEncoded("select".into(), "*".into()))
    .match_header("apikey", KEY)
    .match_header("authorization", format!("Bearer {KEY}").as_str())
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(
      json!([
        { "id": 1, "name": "Kommandos", "faction": "Orks" },
        { "id": 2, "name": "Kasrkin" }
      ])
      .to_string(),
    )
    .create_async()
    .await;

  let teams: Vec<ReferenceItem> = store.select_all(Table::Killteams).await.unwrap();

  mock.assert_async().await;
  assert_eq!(teams.len(), 2);
  assert_eq!(teams[0].id, RecordId::Int(1));
  assert_eq!(teams[1].name, "Kasrkin");
}

#[tokio::test]
async fn select_where_uses_eq_filter() {
  let (mut server, store) = setup().await;
  let mock = server
    .mock("GET", "/rest/v1/players")
    .match_query(Matcher::AllOf(vec![
      Matcher::UrlEncoded("select".into(), "*".into()),
      Matcher::UrlEncoded("playertag".into(), "eq.IronFist".into()),
    ]))
    .with_status(200)
    .with_body(json!([{ "id": 9, "playertag": "IronFist" }]).to_string())
    .create_async()
    .await;

  let players: Vec<Player> = store
    .select_where(Table::Players, "playertag", "IronFist")
    .await
    .unwrap();

  mock.assert_async().await;
  assert_eq!(players, vec![Player {
    id:        RecordId::Int(9),
    playertag: "IronFist".into(),
  }]);
}

#[tokio::test]
async fn wrong_row_shape_is_decode_error() {
  let (mut server, store) = setup().await;
  server
    .mock("GET", "/rest/v1/countries")
    .match_query(Matcher::Any)
    .with_status(200)
    .with_body(json!([{ "id": 1 }]).to_string())
    .create_async()
    .await;

  let result: Result<Vec<ReferenceItem>, _> =
    store.select_all(Table::Countries).await;
  assert!(matches!(
    result,
    Err(Error::Decode { table: Table::Countries, .. })
  ));
}

#[tokio::test]
async fn error_status_carries_body() {
  let (mut server, store) = setup().await;
  server
    .mock("GET", "/rest/v1/tacops")
    .match_query(Matcher::Any)
    .with_status(401)
    .with_body(r#"{"message":"Invalid API key"}"#)
    .create_async()
    .await;

  let err = store
    .select_all::<ReferenceItem>(Table::Tacops)
    .await
    .unwrap_err();
  match err {
    Error::Status { table, status, body } => {
      assert_eq!(table, Table::Tacops);
      assert_eq!(status.as_u16(), 401);
      assert!(body.contains("Invalid API key"));
    }
    other => panic!("expected status error, got {other:?}"),
  }
}

// ─── Writes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_requests_representation_and_returns_first_row() {
  let (mut server, store) = setup().await;
  let mock = server
    .mock("POST", "/rest/v1/players")
    .match_header("prefer", "return=representation")
    .match_header("apikey", KEY)
    .match_body(Matcher::Json(json!({ "playertag": "DarkReaper" })))
    .with_status(201)
    .with_body(json!([{ "id": 42, "playertag": "DarkReaper" }]).to_string())
    .create_async()
    .await;

  let player: Player = store
    .insert(Table::Players, &NewPlayer {
      playertag: "DarkReaper".into(),
    })
    .await
    .unwrap();

  mock.assert_async().await;
  assert_eq!(player.id, RecordId::Int(42));
}

#[tokio::test]
async fn insert_with_empty_representation_fails() {
  let (mut server, store) = setup().await;
  server
    .mock("POST", "/rest/v1/games")
    .with_status(201)
    .with_body("[]")
    .create_async()
    .await;

  let result: Result<Game, _> =
    store.insert(Table::Games, &json!({ "country_id": 1 })).await;
  assert!(matches!(
    result,
    Err(Error::EmptyInsertResponse(Table::Games))
  ));
}

#[tokio::test]
async fn insert_constraint_violation_is_status_error() {
  let (mut server, store) = setup().await;
  server
    .mock("POST", "/rest/v1/games")
    .with_status(409)
    .with_body(r#"{"code":"23503","message":"violates foreign key constraint"}"#)
    .create_async()
    .await;

  let result: Result<Game, _> =
    store.insert(Table::Games, &json!({ "country_id": 999 })).await;
  assert!(matches!(result, Err(Error::Status { .. })));
}

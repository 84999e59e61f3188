#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Nothing listens here; connecting fails immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            cargo_home,
            rustup_home,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("squadlink");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env("no_proxy", "127.0.0.1,localhost")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write_config(&self, body: &str) {
        let dir = self.home.join(".config/squadlink");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("config.toml"), body).expect("write config");
    }

    pub fn write_file(&self, name: &str, body: &str) -> PathBuf {
        let path = self.home.join(name);
        fs::write(&path, body).expect("write fixture file");
        path
    }
}

#[derive(Clone, Default)]
struct FixtureState {
    searches: Arc<AtomicUsize>,
    lookups: Arc<AtomicUsize>,
}

/// Connection service stand-in: an axum router on an ephemeral loopback port.
pub struct FixtureServer {
    pub url: String,
    state: FixtureState,
}

impl FixtureServer {
    pub fn players() -> Self {
        let state = FixtureState::default();
        let app = Router::new()
            .route("/api/players", get(players))
            .route("/api/find_connection", post(find_connection))
            .with_state(state.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
        listener
            .set_nonblocking(true)
            .expect("nonblocking fixture listener");
        let url = format!("http://{}", listener.local_addr().expect("fixture addr"));

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("fixture runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("fixture listener");
                axum::serve(listener, app).await.expect("fixture server");
            });
        });
        Self { url, state }
    }

    /// `/api/find_connection` calls received so far.
    pub fn search_requests(&self) -> usize {
        self.state.searches.load(Ordering::SeqCst)
    }

    /// `/api/players` calls received so far.
    pub fn lookup_requests(&self) -> usize {
        self.state.lookups.load(Ordering::SeqCst)
    }
}

#[derive(Deserialize)]
struct PlayersParams {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
struct FindConnectionBody {
    player1: String,
    player2: String,
}

type Reply = (StatusCode, [(header::HeaderName, &'static str); 1], String);

fn reply(status: StatusCode, body: String) -> Reply {
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn players(
    State(state): State<FixtureState>,
    Query(params): Query<PlayersParams>,
) -> Json<Vec<&'static str>> {
    state.lookups.fetch_add(1, Ordering::SeqCst);
    let term = params.q.to_lowercase();
    let names = ["Mesut Ozil", "Oscar", "Karim Benzema"]
        .into_iter()
        .filter(|n| n.to_lowercase().contains(&term))
        .collect();
    Json(names)
}

async fn find_connection(
    State(state): State<FixtureState>,
    Json(body): Json<FindConnectionBody>,
) -> Reply {
    state.searches.fetch_add(1, Ordering::SeqCst);
    let (p1, p2) = (body.player1.as_str(), body.player2.as_str());
    if p1 == "Slow A" {
        tokio::time::sleep(Duration::from_millis(800)).await;
    }
    if p1 == "Boom" || p2 == "Boom" {
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "internal"}).to_string(),
        );
    }
    if p1 == "Broken" || p2 == "Broken" {
        return reply(StatusCode::OK, "<html>not json</html>".to_string());
    }
    if let Some(name) = [p1, p2].into_iter().find(|n| *n == "Nobody") {
        let err = format!("Player not found: {name}");
        return reply(StatusCode::OK, json!({"success": false, "error": err}).to_string());
    }
    if p1 == "Lonely" || p2 == "Lonely" {
        let err = format!("No connection found between {p1} and {p2}");
        return reply(StatusCode::OK, json!({"success": false, "error": err}).to_string());
    }
    if p1 == "Mesut Ozil" && p2 == "Karim Benzema" {
        return reply(StatusCode::OK, ozil_benzema_body().to_string());
    }
    let body = json!({
        "success": true,
        "paths": [path(&[p1, p2], vec![link(p1, p2, &[("Arsenal", "2019-2020")])])]
    });
    reply(StatusCode::OK, body.to_string())
}

pub fn link(from: &str, to: &str, details: &[(&str, &str)]) -> Value {
    json!({
        "from": from,
        "to": to,
        "details": details
            .iter()
            .map(|(team, season)| json!({"team": team, "season": season}))
            .collect::<Vec<_>>(),
    })
}

pub fn path(names: &[&str], connections: Vec<Value>) -> Value {
    json!({
        "nodes": names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"id": format!("p{i}"), "name": name}))
            .collect::<Vec<_>>(),
        "connections": connections,
        "length": names.len() - 1,
    })
}

/// Two equally short routes from Ozil to Benzema.
pub fn ozil_benzema_body() -> Value {
    json!({
        "success": true,
        "paths": [
            path(
                &["Mesut Ozil", "Sami Khedira", "Karim Benzema"],
                vec![
                    link(
                        "Mesut Ozil",
                        "Sami Khedira",
                        &[
                            ("Real Madrid", "2010-2011"),
                            ("Real Madrid", "2012-2013"),
                            ("Germany", "2009-2010"),
                        ],
                    ),
                    link("Sami Khedira", "Karim Benzema", &[("Real Madrid", "2011-2012")]),
                ],
            ),
            path(
                &["Mesut Ozil", "Xabi Alonso", "Karim Benzema"],
                vec![
                    link("Mesut Ozil", "Xabi Alonso", &[]),
                    link("Xabi Alonso", "Karim Benzema", &[("Real Madrid", "2009-2010")]),
                ],
            ),
        ]
    })
}

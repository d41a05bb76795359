#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use crm_api::app::{app, AppState};
use crm_api::config::AppConfig;
use crm_api::database::Database;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    /// Direct handle on the same database, for arranging failures
    pub db: Database,
}

/// A trigger that makes every activity-log insert for one company fail.
/// Scoped to that company so concurrently running tests are unaffected.
pub struct FailingLogAppends {
    name: String,
}

/// A logged-in user
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Start the router in-process on a free port against `DATABASE_URL`.
/// Returns `None` (and the test should pass vacuously) when no database
/// is configured.
pub async fn spawn_server() -> Result<Option<TestServer>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database-backed test");
        return Ok(None);
    };

    let mut config = AppConfig::development();
    config.database.url = url;
    config.database.max_connections = 5;
    config.security.jwt_secret = "integration-test-secret".to_string();
    config.api.enable_request_logging = false;

    let db = Database::connect(&config.database).await?;
    db.migrate().await?;

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let router = app(AppState::new(db.clone(), config));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        db,
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}

pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Register a fresh user and log in as them.
    pub async fn new_session(&self, prefix: &str) -> Result<Session> {
        let username = unique_username(prefix);
        let res = self.register(&username, "secret1").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self.login(&username, "secret1").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        let token = body["token"].as_str().context("login returned no token")?.to_string();

        Ok(Session { username, token })
    }

    pub async fn get(&self, session: &Session, path: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(&session.token)
            .send()
            .await?)
    }

    pub async fn post(&self, session: &Session, path: &str, body: Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(&session.token)
            .json(&body)
            .send()
            .await?)
    }

    pub async fn put(&self, session: &Session, path: &str, body: Value) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(&session.token)
            .json(&body)
            .send()
            .await?)
    }

    pub async fn delete(&self, session: &Session, path: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(&session.token)
            .send()
            .await?)
    }

    /// Make activity-log inserts for `company_id` raise until cleared.
    pub async fn fail_log_appends(&self, company_id: &str) -> Result<FailingLogAppends> {
        let company_id = Uuid::parse_str(company_id)?;
        let name = format!("fail_log_{}", Uuid::new_v4().simple());

        sqlx::query(&format!(
            "CREATE FUNCTION \"{name}\"() RETURNS trigger LANGUAGE plpgsql AS $$ \
             BEGIN RAISE EXCEPTION 'activity log unavailable'; END $$"
        ))
        .execute(self.db.pool())
        .await?;
        sqlx::query(&format!(
            "CREATE TRIGGER \"{name}\" BEFORE INSERT ON activity_logs FOR EACH ROW \
             WHEN (NEW.company_id = '{company_id}') EXECUTE FUNCTION \"{name}\"()"
        ))
        .execute(self.db.pool())
        .await?;

        Ok(FailingLogAppends { name })
    }

    pub async fn restore_log_appends(&self, fault: FailingLogAppends) -> Result<()> {
        let name = fault.name;
        sqlx::query(&format!("DROP TRIGGER IF EXISTS \"{name}\" ON activity_logs"))
            .execute(self.db.pool())
            .await?;
        sqlx::query(&format!("DROP FUNCTION IF EXISTS \"{name}\"()"))
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    /// POST and return the created resource's JSON.
    pub async fn create(&self, session: &Session, path: &str, body: Value) -> Result<Value> {
        let res = self.post(session, path, body).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create {} failed: {}", path, res.status());
        Ok(res.json().await?)
    }
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn register_login_me_roundtrip() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let username = common::unique_username("alice");

    let res = server.register(&username, "secret1").await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["username"], username.as_str());
    assert!(created.get("password_hash").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let res = server.login(&username, "secret1").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<Value>().await?["token"].as_str().unwrap().to_string();

    let res = server
        .client
        .get(server.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let me: Value = res.json().await?;
    assert_eq!(me["id"], id.as_str());
    assert_eq!(me["username"], username.as_str());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_conflicts() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let username = common::unique_username("dup");

    assert_eq!(server.register(&username, "secret1").await?.status(), StatusCode::CREATED);
    let res = server.register(&username, "another1").await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["error"], "Username already taken");
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let username = common::unique_username("carol");
    server.register(&username, "secret1").await?;

    let wrong_password = server.login(&username, "wrong-pass").await?;
    let unknown_user = server.login(&common::unique_username("nobody"), "secret1").await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<Value>().await?,
        unknown_user.json::<Value>().await?
    );
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&serde_json::json!({ "username": "someone" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["details"][0]["field"], "password");
    Ok(())
}

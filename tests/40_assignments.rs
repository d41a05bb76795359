mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn assign_twice_conflicts() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let session = server.new_session("assign").await?;

    let company = server.create(&session, "/api/companies", json!({ "name": "Acme" })).await?;
    let person = server.create(&session, "/api/people", json!({ "name": "Jane" })).await?;
    let path = format!("/api/companies/{}/people", company["id"].as_str().unwrap());

    let res = server.post(&session, &path, json!({ "personId": person["id"], "role": "CEO" })).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let assignment: Value = res.json().await?;
    assert_eq!(assignment["personId"], person["id"]);
    assert_eq!(assignment["companyId"], company["id"]);
    assert_eq!(assignment["role"], "CEO");

    let res = server.post(&session, &path, json!({ "personId": person["id"] })).await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(
        res.json::<Value>().await?["error"],
        "This person is already assigned to this company"
    );
    Ok(())
}

#[tokio::test]
async fn simultaneous_assigns_admit_exactly_one() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let session = server.new_session("assign").await?;

    let company = server.create(&session, "/api/companies", json!({ "name": "Acme" })).await?;
    let person = server.create(&session, "/api/people", json!({ "name": "Jane" })).await?;
    let path = format!("/api/companies/{}/people", company["id"].as_str().unwrap());

    let (first, second) = tokio::join!(
        server.post(&session, &path, json!({ "personId": person["id"], "role": "CEO" })),
        server.post(&session, &path, json!({ "personId": person["id"], "role": "CTO" })),
    );
    let mut statuses = vec![first?.status(), second?.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let people: Value = server.get(&session, &path).await?.json().await?;
    assert_eq!(people.as_array().unwrap().len(), 1);

    let feed: Value = server.get(&session, "/api/activity-logs").await?.json().await?;
    let assigned = feed
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["eventDescription"].as_str().unwrap().contains("assigned to"))
        .count();
    assert_eq!(assigned, 1);
    Ok(())
}

#[tokio::test]
async fn list_and_unassign() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let session = server.new_session("assign").await?;

    let company = server.create(&session, "/api/companies", json!({ "name": "Acme" })).await?;
    let jane = server.create(&session, "/api/people", json!({ "name": "Jane" })).await?;
    let bob = server.create(&session, "/api/people", json!({ "name": "Bob" })).await?;
    let path = format!("/api/companies/{}/people", company["id"].as_str().unwrap());

    server.create(&session, &path, json!({ "personId": jane["id"], "role": "CTO" })).await?;
    server.create(&session, &path, json!({ "personId": bob["id"] })).await?;

    let people: Value = server.get(&session, &path).await?.json().await?;
    let people = people.as_array().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0]["name"], "Bob");
    assert!(people[0]["role"].is_null());
    assert_eq!(people[1]["name"], "Jane");
    assert_eq!(people[1]["role"], "CTO");

    let one = format!("{}/{}", path, jane["id"].as_str().unwrap());
    assert_eq!(server.delete(&session, &one).await?.status(), StatusCode::NO_CONTENT);
    assert_eq!(server.delete(&session, &one).await?.status(), StatusCode::NOT_FOUND);

    let people: Value = server.get(&session, &path).await?.json().await?;
    assert_eq!(people.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn assign_validates_person_id() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let session = server.new_session("assign").await?;

    let company = server.create(&session, "/api/companies", json!({ "name": "Acme" })).await?;
    let path = format!("/api/companies/{}/people", company["id"].as_str().unwrap());

    let res = server.post(&session, &path, json!({ "personId": "nope" })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["details"][0]["message"], "Invalid Person ID format");

    let res = server
        .post(&session, &path, json!({ "personId": uuid::Uuid::new_v4().to_string() }))
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "Person not found");
    Ok(())
}

#[tokio::test]
async fn deleting_a_person_removes_assignments() -> Result<()> {
    let Some(server) = common::spawn_server().await? else { return Ok(()) };
    let session = server.new_session("assign").await?;

    let company = server.create(&session, "/api/companies", json!({ "name": "Acme" })).await?;
    let person = server.create(&session, "/api/people", json!({ "name": "Jane" })).await?;
    let path = format!("/api/companies/{}/people", company["id"].as_str().unwrap());
    server.create(&session, &path, json!({ "personId": person["id"] })).await?;

    let person_path = format!("/api/people/{}", person["id"].as_str().unwrap());
    assert_eq!(server.delete(&session, &person_path).await?.status(), StatusCode::NO_CONTENT);

    let people: Value = server.get(&session, &path).await?.json().await?;
    assert!(people.as_array().unwrap().is_empty());
    Ok(())
}

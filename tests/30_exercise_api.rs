mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::TestApp;

async fn seed_type(app: &TestApp, token: &str, name: &str) -> Result<String> {
    let res = app
        .client
        .post(app.url("/exercise-type"))
        .bearer_auth(token)
        .json(&json!({ "name": name, "category": "Push" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    Ok(body["data"]["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn create_then_read_round_trip_with_owner_scoping() -> Result<()> {
    let app = common::spawn_app().await?;
    let alice = Uuid::new_v4();
    let token_a = common::bearer_for(alice, "alice");
    let token_b = common::bearer_for(Uuid::new_v4(), "bob");

    let type_id = seed_type(&app, &token_a, "Bench Press").await?;

    // Payload-supplied owner must be ignored
    let res = app
        .client
        .post(app.url("/exercise-user"))
        .bearer_auth(&token_a)
        .json(&json!({
            "type": type_id,
            "weight": [10.0, 20.0, 30.0],
            "rep": [10.0, 8.0, 6.0],
            "owner": Uuid::new_v4(),
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await?["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Owner reads it back
    let res = app
        .client
        .get(app.url(&format!("/exercise-user/{}", id)))
        .bearer_auth(&token_a)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let record = res.json::<Value>().await?["data"].clone();
    assert_eq!(record["type_id"], json!(type_id));
    assert_eq!(record["weight"], json!([10.0, 20.0, 30.0]));
    assert_eq!(record["rep"], json!([10.0, 8.0, 6.0]));
    assert_eq!(record["owner_id"], json!(alice));

    // A different caller gets the same outcome as a missing id
    let res = app
        .client
        .get(app.url(&format!("/exercise-user/{}", id)))
        .bearer_auth(&token_b)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .client
        .get(app.url(&format!("/exercise-user/{}", Uuid::new_v4())))
        .bearer_auth(&token_a)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn list_resolves_type_and_filters_by_owner() -> Result<()> {
    let app = common::spawn_app().await?;
    let token_a = common::bearer_for(Uuid::new_v4(), "alice");
    let token_b = common::bearer_for(Uuid::new_v4(), "bob");

    let type_id = seed_type(&app, &token_a, "Squat").await?;

    for token in [&token_a, &token_b] {
        let res = app
            .client
            .post(app.url("/exercise-user"))
            .bearer_auth(token)
            .json(&json!({ "type": type_id, "weight": [1.0, 2.0, 3.0], "rep": [3.0, 2.0, 1.0] }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app
        .client
        .get(app.url("/exercise-user"))
        .bearer_auth(&token_a)
        .send()
        .await?;
    let records = res.json::<Value>().await?["data"].clone();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1, "list must only return the caller's records");
    assert_eq!(records[0]["exercise_type"]["name"], "Squat");

    Ok(())
}

#[tokio::test]
async fn update_validates_before_touching_the_store() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = common::bearer_for(Uuid::new_v4(), "alice");
    let type_id = seed_type(&app, &token, "Deadlift").await?;

    let res = app
        .client
        .post(app.url("/exercise-user"))
        .bearer_auth(&token)
        .json(&json!({ "type": type_id, "weight": [10.0, 20.0, 30.0], "rep": [10.0, 8.0, 6.0] }))
        .send()
        .await?;
    let id = res.json::<Value>().await?["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let record_url = app.url(&format!("/exercise-user/{}", id));

    let cases = [
        (json!({ "weight": [10, 20, 30], "rep": [10, 8, 6] }), "MISSING_FIELDS"),
        (json!({ "type": type_id, "weight": [10, 20], "rep": [10, 8, 6] }), "LENGTH_MISMATCH"),
        (json!({ "type": type_id, "weight": [10, "x", 30], "rep": [10, 8, 6] }), "NOT_NUMERIC"),
        (json!({ "type": type_id, "weight": [10, 20], "rep": [10, 8] }), "WRONG_ARITY"),
    ];

    for (payload, code) in cases {
        let res = app
            .client
            .put(&record_url)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "expected 400 for {}", code);
        let body = res.json::<Value>().await?;
        assert_eq!(body["code"], code);

        // Stored record unchanged after every rejected payload
        let res = app.client.get(&record_url).bearer_auth(&token).send().await?;
        let record = res.json::<Value>().await?["data"].clone();
        assert_eq!(record["weight"], json!([10.0, 20.0, 30.0]));
        assert_eq!(record["rep"], json!([10.0, 8.0, 6.0]));
    }

    // Valid payload goes through with 202
    let res = app
        .client
        .put(&record_url)
        .bearer_auth(&token)
        .json(&json!({ "type": type_id, "weight": [50.0, 60.0, 70.0], "rep": [5.0, 4.0, 3.0] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let record = res.json::<Value>().await?["data"].clone();
    assert_eq!(record["weight"], json!([50.0, 60.0, 70.0]));

    Ok(())
}

#[tokio::test]
async fn update_is_owner_scoped() -> Result<()> {
    let app = common::spawn_app().await?;
    let token_a = common::bearer_for(Uuid::new_v4(), "alice");
    let token_b = common::bearer_for(Uuid::new_v4(), "bob");
    let type_id = seed_type(&app, &token_a, "Row").await?;

    let res = app
        .client
        .post(app.url("/exercise-user"))
        .bearer_auth(&token_a)
        .json(&json!({ "type": type_id, "weight": [10.0, 20.0, 30.0], "rep": [10.0, 8.0, 6.0] }))
        .send()
        .await?;
    let id = res.json::<Value>().await?["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Valid payload, wrong caller: indistinguishable from missing
    let res = app
        .client
        .put(app.url(&format!("/exercise-user/{}", id)))
        .bearer_auth(&token_b)
        .json(&json!({ "type": type_id, "weight": [1.0, 2.0, 3.0], "rep": [1.0, 2.0, 3.0] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .client
        .get(app.url(&format!("/exercise-user/{}", id)))
        .bearer_auth(&token_a)
        .send()
        .await?;
    let record = res.json::<Value>().await?["data"].clone();
    assert_eq!(record["weight"], json!([10.0, 20.0, 30.0]));

    Ok(())
}

#[tokio::test]
async fn delete_by_non_owner_is_401_and_leaves_record() -> Result<()> {
    let app = common::spawn_app().await?;
    let token_a = common::bearer_for(Uuid::new_v4(), "alice");
    let token_b = common::bearer_for(Uuid::new_v4(), "bob");
    let type_id = seed_type(&app, &token_a, "Press").await?;

    let res = app
        .client
        .post(app.url("/exercise-user"))
        .bearer_auth(&token_a)
        .json(&json!({ "type": type_id, "weight": [10.0, 20.0, 30.0], "rep": [10.0, 8.0, 6.0] }))
        .send()
        .await?;
    let id = res.json::<Value>().await?["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let record_url = app.url(&format!("/exercise-user/{}", id));

    let res = app.client.delete(&record_url).bearer_auth(&token_b).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Still present for the owner
    let res = app.client.get(&record_url).bearer_auth(&token_a).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Owner delete succeeds with no content
    let res = app.client.delete(&record_url).bearer_auth(&token_a).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.client.get(&record_url).bearer_auth(&token_a).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

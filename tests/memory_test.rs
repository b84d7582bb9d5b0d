mod helpers;

use serde_json::json;

#[tokio::test]
async fn store_search_delete_round_trip() {
    let mut engine = helpers::ready_engine(helpers::test_repo()).await;

    let (is_error, stored) = helpers::call_tool(
        &mut engine,
        "store_memory",
        json!({ "content": "moltbook security info", "category": "moltbook" }),
    )
    .await;
    assert!(!is_error);
    let id = stored["id"].as_i64().unwrap();
    assert_eq!(stored["importance"], 5);
    assert_eq!(stored["category"], "moltbook");
    assert_eq!(stored["created_at"], stored["updated_at"]);

    let (_, by_keyword) = helpers::call_tool(&mut engine, "search_memory", json!({ "keywords": ["moltbook"] })).await;
    assert_eq!(by_keyword["items"][0]["id"], id);

    let (_, by_category) =
        helpers::call_tool(&mut engine, "search_memory_by_category", json!({ "category": "moltbook" })).await;
    assert_eq!(by_category["items"][0]["id"], id);

    let (is_error, deleted) = helpers::call_tool(&mut engine, "delete_memory", json!({ "memory_id": id })).await;
    assert!(!is_error);
    assert_eq!(deleted, json!({ "id": id, "deleted": true }));

    let (_, by_keyword) = helpers::call_tool(&mut engine, "search_memory", json!({ "keywords": ["moltbook"] })).await;
    assert_eq!(by_keyword["items"], json!([]));
    let (_, by_category) =
        helpers::call_tool(&mut engine, "search_memory_by_category", json!({ "category": "moltbook" })).await;
    assert_eq!(by_category["items"], json!([]));
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let mut engine = helpers::ready_engine(helpers::test_repo()).await;
    let (_, stored) = helpers::call_tool(&mut engine, "store_memory", json!({ "content": "temporary" })).await;
    let id = stored["id"].clone();

    let (is_error, _) = helpers::call_tool(&mut engine, "delete_memory", json!({ "memory_id": id })).await;
    assert!(!is_error);
    let (is_error, body) = helpers::call_tool(&mut engine, "delete_memory", json!({ "memory_id": id })).await;
    assert!(is_error);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn repeated_search_is_identical() {
    let mut engine = helpers::ready_engine(helpers::test_repo()).await;
    for (content, importance) in [("alpha note", 3), ("alpha fact", 9), ("beta alpha", 9), ("gamma", 9)] {
        helpers::call_tool(
            &mut engine,
            "store_memory",
            json!({ "content": content, "importance": importance }),
        )
        .await;
    }

    let (_, first) = helpers::call_tool(&mut engine, "search_memory", json!({ "keywords": ["ALPHA"] })).await;
    let (_, second) = helpers::call_tool(&mut engine, "search_memory", json!({ "keywords": ["alpha"] })).await;
    assert_eq!(first, second);

    let items = first["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["importance"], 9);
    assert_eq!(items[2]["content"], "alpha note");
}

#[tokio::test]
async fn empty_keywords_are_invalid_arguments() {
    let mut engine = helpers::ready_engine(helpers::test_repo()).await;

    let (is_error, body) = helpers::call_tool(&mut engine, "search_memory", json!({ "keywords": [] })).await;
    assert!(is_error);
    assert_eq!(body["error"], "invalid_arguments");
    assert!(body["message"].as_str().unwrap().contains("keywords"));

    let (is_error, body) = helpers::call_tool(&mut engine, "search_memory", json!({ "keywords": ["", "  "] })).await;
    assert!(is_error);
    assert_eq!(body["error"], "invalid_arguments");
}

#[tokio::test]
async fn importance_out_of_range_is_rejected() {
    let mut engine = helpers::ready_engine(helpers::test_repo()).await;
    let (is_error, body) = helpers::call_tool(
        &mut engine,
        "store_memory",
        json!({ "content": "too important", "importance": 11 }),
    )
    .await;
    assert!(is_error);
    assert_eq!(body["error"], "invalid_arguments");
    assert!(body["message"].as_str().unwrap().contains("importance"));
}

#[tokio::test]
async fn blank_content_is_rejected() {
    let mut engine = helpers::ready_engine(helpers::test_repo()).await;
    let (is_error, body) = helpers::call_tool(&mut engine, "store_memory", json!({ "content": "   " })).await;
    assert!(is_error);
    assert_eq!(body["error"], "invalid_arguments");
}

#[tokio::test]
async fn category_match_is_exact() {
    let mut engine = helpers::ready_engine(helpers::test_repo()).await;
    helpers::call_tool(&mut engine, "store_memory", json!({ "content": "a", "category": "Work" })).await;
    helpers::call_tool(&mut engine, "store_memory", json!({ "content": "b", "category": "work" })).await;

    let (_, found) = helpers::call_tool(&mut engine, "search_memory_by_category", json!({ "category": "work" })).await;
    let items = found["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "b");
}

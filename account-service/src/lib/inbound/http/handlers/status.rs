use axum::Json;
use serde_json::json;
use serde_json::Value;

pub async fn index() -> &'static str {
    "Hello"
}

pub async fn users_test() -> Json<Value> {
    Json(json!({ "msg": "Users works" }))
}

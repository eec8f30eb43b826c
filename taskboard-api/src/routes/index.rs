/// Route discovery endpoint
///
/// GET / returns a static description of every route the service
/// exposes, so a caller can orient without documentation.

use axum::Json;
use serde_json::{json, Value};

/// GET / handler
pub async fn describe_routes() -> Json<Value> {
    Json(json!({
        "service": "taskboard-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "this document",
            "GET /health": "service and database health",
            "GET /users": "list accounts with embedded tasks",
            "POST /users": "create account (name, email)",
            "GET /users/:id": "get one account with its tasks",
            "PUT /users/:id": "update account (name?, email?)",
            "DELETE /users/:id": "delete account (fails while tasks remain)",
            "GET /tasks": "list tasks, filters: ownerId, completed=true|false",
            "POST /tasks": "create task (title, ownerId, description?)",
            "GET /tasks/:id": "get one task with reduced owner view",
            "PUT /tasks/:id": "update task (title?, description?, completed?)",
            "DELETE /tasks/:id": "delete task",
            "GET /stats": "summary report over accounts and tasks"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_describe_routes_lists_every_resource() {
        let Json(body) = describe_routes().await;

        let endpoints = body["endpoints"].as_object().unwrap();
        assert!(endpoints.contains_key("GET /users"));
        assert!(endpoints.contains_key("POST /tasks"));
        assert!(endpoints.contains_key("GET /stats"));
        assert_eq!(body["service"], "taskboard-api");
    }
}

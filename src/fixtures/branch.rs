use serde_json::{json, Value};

/// Branch answer carrying the head under `commit.id`.
pub fn get_branch_json_with_id(branch: &str, head: &str) -> Value {
    json!({
        "name": branch,
        "commit": {
            "id": head,
            "message": "update",
        },
        "protected": false,
    })
}

/// Branch answer carrying the head under `commit.sha`.
pub fn get_branch_json_with_sha(branch: &str, head: &str) -> Value {
    json!({
        "name": branch,
        "commit": {
            "sha": head,
            "url": format!("https://api.github.com/commits/{}", head),
        },
        "protected": false,
    })
}

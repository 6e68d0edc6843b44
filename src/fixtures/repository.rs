use serde_json::{json, Value};

/// A `GET /user/repos` item.
pub fn get_source_repo_json(owner: &str, name: &str, default_branch: Option<&str>) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "owner": {
            "login": owner,
            "id": 1,
            "type": "User",
        },
        "private": false,
        "fork": false,
        "html_url": format!("https://github.com/{}/{}", owner, name),
        "clone_url": format!("https://github.com/{}/{}.git", owner, name),
        "default_branch": default_branch,
    })
}

/// A full listing page of `count` repositories named `{prefix}-{index}`.
pub fn get_source_page_json(owner: &str, prefix: &str, start: usize, count: usize) -> Value {
    let items: Vec<Value> = (start..start + count)
        .map(|index| get_source_repo_json(owner, &format!("{}-{}", prefix, index), Some("main")))
        .collect();
    Value::Array(items)
}

/// A `GET /repos/{owner}/{repo}` answer on the destination.
pub fn get_destination_repo_json(owner: &str, name: &str, default_branch: &str) -> Value {
    json!({
        "id": 7,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "mirror": true,
        "empty": false,
        "default_branch": default_branch,
    })
}

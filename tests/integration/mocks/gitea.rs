use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::DESTINATION_TOKEN;

pub fn migrate_mock(status: u16) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/migrate"))
        .and(header(
            "Authorization",
            format!("token {}", DESTINATION_TOKEN).as_str(),
        ))
        .respond_with(ResponseTemplate::new(status))
}

pub fn mirror_sync_mock(owner: &str, repo: &str, status: u16) -> Mock {
    Mock::given(method("POST"))
        .and(path(format!(
            "/api/v1/repos/{owner}/{repo}/mirror-sync",
            owner = owner,
            repo = repo
        )))
        .respond_with(ResponseTemplate::new(status))
}

pub fn branch_mock(owner: &str, repo: &str, branch: &str, response: serde_json::Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/repos/{owner}/{repo}/branches/{branch}",
            owner = owner,
            repo = repo,
            branch = branch
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
}

pub fn missing_branch_mock(owner: &str, repo: &str, branch: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/repos/{owner}/{repo}/branches/{branch}",
            owner = owner,
            repo = repo,
            branch = branch
        )))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            serde_json::json!({"message": "branch does not exist [repo_id: 7 name: master]"}),
        ))
}

pub fn repo_mock(owner: &str, repo: &str, response: serde_json::Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/repos/{owner}/{repo}",
            owner = owner,
            repo = repo
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
}

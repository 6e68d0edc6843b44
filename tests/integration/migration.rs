use mirrorsync::gitea_provider::GiteaProvider;
use mirrorsync::migrate::{MigrationRequester, SyncTrigger};
use mirrorsync::model::{MigrationStatus, RepositoryDescriptor, Strategy, SyncOutcome};
use mirrorsync::provider::DestinationProvider;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::mocks::gitea::{migrate_mock, mirror_sync_mock};
use crate::mocks::{test_settings, ACCOUNT, DESTINATION_TOKEN, SOURCE_TOKEN};

fn descriptor(name: &str) -> RepositoryDescriptor {
    RepositoryDescriptor {
        name: name.to_string(),
        full_name: format!("{}/{}", ACCOUNT, name),
        owner: ACCOUNT.to_string(),
        is_private: true,
        clone_address: format!("https://github.com/{}/{}.git", ACCOUNT, name),
        default_branch: Some("main".to_string()),
    }
}

fn provider(mock_server: &MockServer) -> GiteaProvider {
    GiteaProvider::configure_provider(&mock_server.uri(), DESTINATION_TOKEN).unwrap()
}

#[tokio::test]
async fn second_request_acknowledges_existing_repository() {
    let mock_server = MockServer::start().await;

    migrate_mock(201)
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    migrate_mock(409).expect(1).mount(&mock_server).await;

    let settings = test_settings(&mock_server.uri(), "https://api.github.com");
    let destination = provider(&mock_server);
    let requester = MigrationRequester::new(&settings, &destination);

    let first = requester.request(&descriptor("foo")).await;
    let second = requester.request(&descriptor("foo")).await;

    assert_eq!(first.status, MigrationStatus::Created);
    assert_eq!(first.http_status, Some(201));
    assert_eq!(second.status, MigrationStatus::AlreadyExists);
    assert_eq!(second.http_status, Some(409));
    assert_eq!(second.message, None);

    mock_server.verify().await;
}

#[tokio::test]
async fn sends_the_migration_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/repos/migrate"))
        .and(body_json(json!({
            "clone_addr": "https://github.com/alice/foo.git",
            "repo_owner": "alice",
            "repo_name": "foo",
            "mirror": false,
            "private": true,
            "auth_username": ACCOUNT,
            "auth_password": SOURCE_TOKEN,
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut settings = test_settings(&mock_server.uri(), "https://api.github.com");
    settings.strategy = Strategy::Clone;
    settings.mirror_interval = Some("8h0m0s".to_string());
    let destination = provider(&mock_server);

    let outcome = MigrationRequester::new(&settings, &destination)
        .request(&descriptor("foo"))
        .await;

    assert_eq!(outcome.status, MigrationStatus::Created);

    mock_server.verify().await;
}

#[tokio::test]
async fn other_statuses_fail_with_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/repos/migrate"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"message": "You can not import from disallowed hosts."})),
        )
        .mount(&mock_server)
        .await;

    let settings = test_settings(&mock_server.uri(), "https://api.github.com");
    let destination = provider(&mock_server);

    let outcome = MigrationRequester::new(&settings, &destination)
        .request(&descriptor("foo"))
        .await;

    assert_eq!(outcome.status, MigrationStatus::Failed);
    assert_eq!(outcome.http_status, Some(422));
    assert_eq!(
        outcome.message.as_deref(),
        Some("You can not import from disallowed hosts.")
    );
}

#[tokio::test]
async fn unreachable_destination_is_a_failed_outcome() {
    let settings = test_settings("http://127.0.0.1:1", "https://api.github.com");
    let destination =
        GiteaProvider::configure_provider("http://127.0.0.1:1", DESTINATION_TOKEN).unwrap();

    let outcome = MigrationRequester::new(&settings, &destination)
        .request(&descriptor("foo"))
        .await;

    assert_eq!(outcome.status, MigrationStatus::Failed);
    assert_eq!(outcome.http_status, None);
    assert!(outcome.message.is_some());
}

#[tokio::test]
async fn mirror_sync_succeeds_only_on_200() {
    let mock_server = MockServer::start().await;

    mirror_sync_mock(ACCOUNT, "foo", 200)
        .expect(1)
        .mount(&mock_server)
        .await;
    mirror_sync_mock(ACCOUNT, "bar", 400)
        .expect(2)
        .mount(&mock_server)
        .await;

    let destination = provider(&mock_server);
    let trigger = SyncTrigger::new(&destination);

    assert_eq!(trigger.sync(ACCOUNT, "foo").await, SyncOutcome::Synced);
    assert!(matches!(
        trigger.sync(ACCOUNT, "bar").await,
        SyncOutcome::Failed {
            http_status: Some(400),
            ..
        }
    ));
    assert!(destination.mirror_sync(ACCOUNT, "bar").await.is_err());

    mock_server.verify().await;
}

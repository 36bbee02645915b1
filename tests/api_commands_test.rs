// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! API-backed subcommands exercised against a mock 24fire endpoint.

use firectl::api::{ApiError, FireClient, PowerMode};
use firectl::cli::{BackupAction, DnsAction, ServiceArg};
use firectl::commands::{account, dns, kvm, services, ApiContext};
use secrecy::SecretString;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with_catalogue() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/services"))
        .and(header("X-Fire-Apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "services": {
                    "KVM": [
                        {"name": "vps-main", "internal_id": "K1"},
                        {"name": "vps-test", "internal_id": "K2"}
                    ],
                    "DOMAIN": [
                        {"name": "example.de", "internal_id": "D1"}
                    ]
                }
            }
        })))
        .mount(&server)
        .await;
    server
}

fn context(server: &MockServer) -> ApiContext {
    let client = FireClient::new(
        SecretString::new("test-key".to_string()),
        &server.uri(),
        Duration::from_secs(5),
    )
    .unwrap();
    ApiContext::from_client(client)
}

fn target(service: &str) -> ServiceArg {
    ServiceArg {
        service: service.to_string(),
    }
}

fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "success",
        "message": "Request accepted"
    }))
}

#[tokio::test]
async fn test_restart_by_index_posts_power_mode() {
    let server = server_with_catalogue().await;
    Mock::given(method("POST"))
        .and(path("/kvm/K2/power"))
        .and(body_string("mode=restart"))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    kvm::power(&ctx, "2", PowerMode::Restart).await.unwrap();
}

#[tokio::test]
async fn test_power_on_domain_is_rejected_before_request() {
    let server = server_with_catalogue().await;
    Mock::given(method("POST"))
        .respond_with(accepted())
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server);
    let err = kvm::power(&ctx, "example.de", PowerMode::Stop)
        .await
        .unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::WrongServiceType { name, expected, .. }) => {
            assert_eq!(name, "example.de");
            assert_eq!(*expected, "KVM");
        }
        other => panic!("expected wrong service type, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_service_selector() {
    let server = server_with_catalogue().await;
    let ctx = context(&server);

    let err = kvm::traffic(&ctx, "9", false).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::UnknownService(selector)) if selector == "9"
    ));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = server_with_catalogue().await;
    Mock::given(method("POST"))
        .and(path("/kvm/K1/power"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": "error",
            "message": "Server is locked"
        })))
        .mount(&server)
        .await;

    let ctx = context(&server);
    let err = kvm::power(&ctx, "vps-main", PowerMode::Start)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Server is locked");
    assert_eq!(
        err.downcast_ref::<ApiError>().and_then(ApiError::status),
        Some(403)
    );
}

#[tokio::test]
async fn test_backup_create_sends_description() {
    let server = server_with_catalogue().await;
    Mock::given(method("PUT"))
        .and(path("/kvm/K1/backup/create"))
        .and(body_string_contains("description=before+upgrade"))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    let action = BackupAction::Create {
        target: target("K1"),
        description: Some("before upgrade".to_string()),
    };
    kvm::backup(&ctx, &action).await.unwrap();
}

#[tokio::test]
async fn test_backup_delete_uses_delete_method() {
    let server = server_with_catalogue().await;
    Mock::given(method("DELETE"))
        .and(path("/kvm/K1/backup/delete"))
        .and(body_string("backup_id=b-42"))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    let action = BackupAction::Delete {
        target: target("1"),
        backup_id: "b-42".to_string(),
    };
    kvm::backup(&ctx, &action).await.unwrap();
}

#[tokio::test]
async fn test_ddos_update_sends_both_layers() {
    let server = server_with_catalogue().await;
    Mock::given(method("POST"))
        .and(path("/kvm/K1/ddos"))
        .and(body_string("layer4=permanent&layer7=on"))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    kvm::ddos(&ctx, "vps-main", Some(("permanent", "on")))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dns_edit_sends_only_given_fields() {
    let server = server_with_catalogue().await;
    Mock::given(method("POST"))
        .and(path("/domain/D1/dns/edit"))
        .and(body_string("record_id=R1&data=1.2.3.4"))
        .respond_with(accepted())
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    let action = DnsAction::Edit {
        target: target("example.de"),
        record_id: "R1".to_string(),
        record_type: None,
        name: None,
        data: Some("1.2.3.4".to_string()),
    };
    dns::dns(&ctx, &action).await.unwrap();
}

#[tokio::test]
async fn test_dns_edit_without_changes_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(accepted())
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server);
    let action = DnsAction::Edit {
        target: target("example.de"),
        record_id: "R1".to_string(),
        record_type: None,
        name: None,
        data: None,
    };
    let err = dns::dns(&ctx, &action).await.unwrap_err();
    assert!(err.to_string().contains("Nothing to change"));
}

#[tokio::test]
async fn test_dns_on_kvm_service_is_rejected() {
    let server = server_with_catalogue().await;
    let ctx = context(&server);

    let err = dns::dns(&ctx, &DnsAction::List(target("vps-main")))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("requires a DOMAIN service"));
}

#[tokio::test]
async fn test_info_routes_by_service_type() {
    let server = server_with_catalogue().await;
    Mock::given(method("GET"))
        .and(path("/domain/D1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"domain": "example.de", "expires": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    services::show_info(&ctx, "3").await.unwrap();
}

#[tokio::test]
async fn test_account_tolerates_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server);
    account::show_account(&ctx).await.unwrap();
}

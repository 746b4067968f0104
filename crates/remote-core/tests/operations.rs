//! Typed operation tests against a scripted transport.

mod common;

use serde_json::json;

use remote_core::error::TransportError;
use remote_core::types::{BackupPart, StopKind};
use remote_core::{BackupRequest, CancellationToken, Error, SftpAuthRequest};

use common::{Reply, client};

// ============================================================================
// Configuration Retrieval
// ============================================================================

#[tokio::test]
async fn test_get_server_configuration() {
    let client = client(|req| {
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/servers/8d6f3c1e");
        Reply::json(
            200,
            json!({
                "settings": {"uuid": "8d6f3c1e", "invocation": "java -jar server.jar"},
                "process_configuration": {
                    "startup": {"done": ["Done ("]},
                    "stop": {"type": "signal", "value": "SIGTERM"},
                    "configs": [{"file": "server.properties", "parser": "properties"}]
                }
            }),
        )
    });
    let ctx = CancellationToken::new();

    let config = client
        .get_server_configuration(&ctx, "8d6f3c1e")
        .await
        .unwrap();

    assert_eq!(config.settings["invocation"], "java -jar server.jar");
    let process = config.process_configuration.unwrap();
    assert_eq!(process.stop.kind, Some(StopKind::Signal));
    assert_eq!(process.startup.done, vec!["Done (".to_string()]);
    assert_eq!(process.configs.len(), 1);
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_get_server_configuration_not_found() {
    let client = client(|_| Reply::panel_error(404, "NotFoundHttpException", "not found"));
    let ctx = CancellationToken::new();

    let err = client
        .get_server_configuration(&ctx, "missing")
        .await
        .unwrap_err();

    let remote = err.as_remote().unwrap();
    assert_eq!(remote.status, 404);
    assert_eq!(remote.code, "NotFoundHttpException");
    assert!(!err.is_invalid_credentials());
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_get_installation_script() {
    let client = client(|req| {
        assert_eq!(req.path, "/servers/abc/install");
        Reply::json(
            200,
            json!({
                "container_image": "ghcr.io/pterodactyl/installers:alpine",
                "entrypoint": "ash",
                "script": "#!/bin/ash\necho installing"
            }),
        )
    });
    let ctx = CancellationToken::new();

    let script = client.get_installation_script(&ctx, "abc").await.unwrap();

    assert_eq!(script.entrypoint, "ash");
    assert!(script.script.starts_with("#!/bin/ash"));
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_get_installation_script_malformed_body() {
    let client = client(|_| Reply::json(200, json!({"entrypoint": 12})));
    let ctx = CancellationToken::new();

    let err = client.get_installation_script(&ctx, "abc").await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_get_backup_remote_upload_urls() {
    let client = client(|req| {
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/backups/b-1");
        assert_eq!(req.query_param("size"), Some("5368709120"));
        Reply::json(
            200,
            json!({"parts": ["https://s3/part1", "https://s3/part2"], "part_size": 5368709120u64}),
        )
    });
    let ctx = CancellationToken::new();

    let upload = client
        .get_backup_remote_upload_urls(&ctx, "b-1", 5_368_709_120)
        .await
        .unwrap();

    assert_eq!(upload.parts.len(), 2);
    assert_eq!(upload.part_size, 5_368_709_120);
    client.transport().assert_all_released();
}

// ============================================================================
// Status Reports
// ============================================================================

#[tokio::test]
async fn test_set_installation_status() {
    let client = client(|req| {
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/servers/abc/install");
        assert_eq!(req.body, Some(json!({"successful": true})));
        Reply::empty(204)
    });
    let ctx = CancellationToken::new();

    client
        .set_installation_status(&ctx, "abc", true)
        .await
        .unwrap();

    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_set_archive_status_failure_reported() {
    let client = client(|req| {
        assert_eq!(req.path, "/servers/abc/archive");
        assert_eq!(req.body, Some(json!({"successful": false})));
        Reply::panel_error(422, "ValidationException", "server is not being transferred")
    });
    let ctx = CancellationToken::new();

    let err = client
        .set_archive_status(&ctx, "abc", false)
        .await
        .unwrap_err();

    assert_eq!(err.as_remote().unwrap().status, 422);
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_set_transfer_status_uses_path_state() {
    let client = client(|req| {
        assert_eq!(req.method, "GET");
        Reply::empty(204)
    });
    let ctx = CancellationToken::new();

    client.set_transfer_status(&ctx, "abc", true).await.unwrap();
    client.set_transfer_status(&ctx, "abc", false).await.unwrap();

    let paths: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(
        paths,
        vec!["/servers/abc/transfer/success", "/servers/abc/transfer/failure"]
    );
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_set_backup_status() {
    let client = client(|req| {
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/backups/b-9");
        assert_eq!(
            req.body,
            Some(json!({
                "checksum": "da39a3ee",
                "checksum_type": "sha1",
                "size": 1024,
                "successful": true,
                "parts": [{"etag": "\"e1\"", "part_number": 1}]
            }))
        );
        Reply::empty(204)
    });
    let ctx = CancellationToken::new();

    let mut request = BackupRequest::successful("da39a3ee", 1024);
    request.parts.push(BackupPart {
        etag: "\"e1\"".to_string(),
        part_number: 1,
    });
    client.set_backup_status(&ctx, "b-9", &request).await.unwrap();

    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_send_restoration_status() {
    let client = client(|req| {
        assert_eq!(req.path, "/backups/b-9/restore");
        assert_eq!(req.body, Some(json!({"successful": true})));
        Reply::empty(204)
    });
    let ctx = CancellationToken::new();

    client
        .send_restoration_status(&ctx, "b-9", true)
        .await
        .unwrap();

    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_reset_servers_state() {
    let client = client(|req| {
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/servers/reset");
        assert_eq!(req.body, None);
        Reply::empty(204)
    });
    let ctx = CancellationToken::new();

    client.reset_servers_state(&ctx).await.unwrap();

    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_reset_servers_state_wraps_transport_error() {
    let client = client(|_| Reply::connection_refused());
    let ctx = CancellationToken::new();

    let err = client.reset_servers_state(&ctx).await.unwrap_err();

    assert!(
        err.to_string()
            .starts_with("failed to reset server state on Panel: ")
    );
    match err {
        Error::Context { source, .. } => {
            assert!(matches!(
                *source,
                Error::Transport(TransportError::Connection { .. })
            ));
        }
        other => panic!("expected context error, got {other:?}"),
    }
}

// ============================================================================
// SFTP Credential Validation
// ============================================================================

fn sftp_request() -> SftpAuthRequest {
    SftpAuthRequest::new("alice.8d6f3c1e", "hunter2", "203.0.113.9")
}

#[tokio::test]
async fn test_sftp_valid_credentials() {
    let client = client(|req| {
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/sftp/auth");
        assert_eq!(
            req.body,
            Some(json!({
                "username": "alice.8d6f3c1e",
                "password": "hunter2",
                "ip": "203.0.113.9"
            }))
        );
        Reply::json(
            200,
            json!({"server": "8d6f3c1e", "permissions": ["file.read", "file.update"]}),
        )
    });
    let ctx = CancellationToken::new();

    let auth = client
        .validate_sftp_credentials(&ctx, &sftp_request())
        .await
        .unwrap();

    assert_eq!(auth.server, "8d6f3c1e");
    assert_eq!(auth.permissions, vec!["file.read", "file.update"]);
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_sftp_client_errors_are_invalid_credentials() {
    for status in [400, 401, 403, 404, 422] {
        let client = client(move |_| Reply::panel_error(status, "HttpForbiddenException", "bad"));
        let ctx = CancellationToken::new();

        let err = client
            .validate_sftp_credentials(&ctx, &sftp_request())
            .await
            .unwrap_err();

        assert!(
            matches!(err, Error::InvalidCredentials),
            "status {status} gave {err:?}"
        );
        assert!(err.as_remote().is_none());
        client.transport().assert_all_released();
    }
}

#[tokio::test]
async fn test_sftp_server_error_is_remote() {
    let client = client(|_| Reply::panel_error(500, "HttpException", "panel exploded"));
    let ctx = CancellationToken::new();

    let err = client
        .validate_sftp_credentials(&ctx, &sftp_request())
        .await
        .unwrap_err();

    assert!(!err.is_invalid_credentials());
    let remote = err.as_remote().unwrap();
    assert_eq!(remote.status, 500);
    assert_eq!(remote.detail, "panel exploded");
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_sftp_rate_limited_is_remote() {
    let client = client(|_| Reply::panel_error(429, "TooManyRequestsHttpException", "slow down"));
    let ctx = CancellationToken::new();

    let err = client
        .validate_sftp_credentials(&ctx, &sftp_request())
        .await
        .unwrap_err();

    assert!(!err.is_invalid_credentials());
    assert!(err.as_remote().unwrap().is_rate_limited());
    client.transport().assert_all_released();
}

#[tokio::test]
async fn test_sftp_transport_error_passes_through() {
    let client = client(|_| {
        Reply::Fail(TransportError::Timeout {
            duration_ms: 15_000,
        })
    });
    let ctx = CancellationToken::new();

    let err = client
        .validate_sftp_credentials(&ctx, &sftp_request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Timeout { duration_ms: 15_000 })
    ));
}

// ============================================================================
// Body Release
// ============================================================================

#[tokio::test]
async fn test_every_operation_releases_on_error_status() {
    let client = client(|_| Reply::panel_error(500, "HttpException", "boom"));
    let ctx = CancellationToken::new();

    assert!(client.get_servers(&ctx, 10).await.is_err());
    assert!(client.get_server_configuration(&ctx, "a").await.is_err());
    assert!(client.get_installation_script(&ctx, "a").await.is_err());
    assert!(client.set_installation_status(&ctx, "a", true).await.is_err());
    assert!(client.set_archive_status(&ctx, "a", true).await.is_err());
    assert!(client.set_transfer_status(&ctx, "a", true).await.is_err());
    assert!(
        client
            .validate_sftp_credentials(&ctx, &sftp_request())
            .await
            .is_err()
    );
    assert!(
        client
            .get_backup_remote_upload_urls(&ctx, "b", 1)
            .await
            .is_err()
    );
    assert!(
        client
            .set_backup_status(&ctx, "b", &BackupRequest::failed())
            .await
            .is_err()
    );
    assert!(client.send_restoration_status(&ctx, "b", false).await.is_err());
    assert!(client.reset_servers_state(&ctx).await.is_err());

    assert_eq!(client.transport().opened(), 11);
    assert_eq!(client.transport().released(), 11);
}

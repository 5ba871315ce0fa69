#![allow(clippy::unwrap_used)]
// Lifecycle tests: mappers driven through `Instance` against a wiremock server.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fluxprov_core::resources::{
    AuthorizationResource, AuthorizationStatus, BucketAttrs, BucketResource, DbrpMappingResource,
    LegacyAuthorizationResource, OrganizationAttrs, OrganizationResource, ScraperAttrs,
    ScraperResource,
};
use fluxprov_core::{
    Connection, CoreError, HealthCheck, Instance, ProviderConfig, Resource, ShardGroupDuration,
    decode_attrs,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Connection) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ready"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ready" })))
        .mount(&server)
        .await;

    let config = ProviderConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from("my-token"),
    );
    let conn = Connection::connect(&config).await.unwrap();
    (server, conn)
}

fn not_found(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({ "code": "not found", "message": message }))
}

fn declared_bucket() -> BucketAttrs {
    decode_attrs(
        "influxdb-v2_bucket",
        json!({
            "name": "telemetry",
            "description": "metrics",
            "org_id": "o1",
            "retention_rules": [
                { "every_seconds": 3640, "shard_group_duration_seconds": 3610 }
            ]
        }),
    )
    .unwrap()
}

fn server_bucket(name: &str, shard: i64) -> serde_json::Value {
    json!({
        "id": "b1",
        "name": name,
        "description": "metrics",
        "orgID": "o1",
        "type": "user",
        "retentionRules": [
            { "type": "expire", "everySeconds": 3640, "shardGroupDurationSeconds": shard }
        ],
        "createdAt": "2024-06-15T10:30:00Z",
        "updatedAt": "2024-06-15T10:30:00Z"
    })
}

// ── Bootstrap ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_check_failure_aborts_connect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let mut config = ProviderConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from("my-token"),
    );
    config.health_check = HealthCheck::Ping;

    let err = Connection::connect(&config).await.unwrap_err();
    assert!(matches!(err, CoreError::ConnectionFailed { endpoint: "/ping", .. }));
    assert_eq!(err.to_string(), "error pinging server on /ping: maintenance");
}

#[tokio::test]
async fn test_requests_carry_token() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/orgs/o1"))
        .and(header("Authorization", "Token my-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "o1",
            "name": "acme"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = decode_attrs("influxdb-v2_organization", json!({ "name": "acme" })).unwrap();
    let mut org = Instance::existing(OrganizationResource, "o1", prior);
    assert!(org.read(&conn).await.unwrap());
    assert_eq!(org.attrs().description, "");
}

// ── Bucket ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_bucket_create_round_trip() {
    let (server, conn) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/buckets"))
        .and(body_json(json!({
            "orgID": "o1",
            "name": "telemetry",
            "description": "metrics",
            "retentionRules": [
                { "type": "expire", "everySeconds": 3640, "shardGroupDurationSeconds": 3610 }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(server_bucket("telemetry", 3610)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/buckets/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_bucket("telemetry", 3610)))
        .expect(1)
        .mount(&server)
        .await;

    let mut bucket = Instance::new(BucketResource, declared_bucket());
    bucket.create(&conn).await.unwrap();

    assert_eq!(bucket.id(), Some("b1"));
    let attrs = bucket.attrs();
    assert_eq!(attrs.name, "telemetry");
    assert_eq!(attrs.org_id, "o1");
    assert_eq!(attrs.retention_rules.len(), 1);
    assert_eq!(attrs.retention_rules[0].every_seconds, 3640);
    assert_eq!(
        attrs.retention_rules[0].shard_group_duration_seconds,
        ShardGroupDuration::Explicit(3610)
    );
    assert_eq!(attrs.bucket_type.as_deref(), Some("user"));
    assert_eq!(attrs.created_at.as_deref(), Some("2024-06-15T10:30:00Z"));
}

#[tokio::test]
async fn test_bucket_default_shard_duration_is_derived() {
    let (server, conn) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/buckets"))
        .and(body_json(json!({
            "orgID": "o1",
            "name": "telemetry",
            "description": "",
            "retentionRules": [
                { "type": "expire", "everySeconds": 2_592_000, "shardGroupDurationSeconds": 86_400 },
                { "type": "expire", "everySeconds": 3600 }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "b2",
            "name": "telemetry",
            "orgID": "o1",
            "retentionRules": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/buckets/b2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "b2",
            "name": "telemetry",
            "orgID": "o1",
            "retentionRules": [
                { "type": "expire", "everySeconds": 2_592_000, "shardGroupDurationSeconds": 86_400 },
                { "type": "expire", "everySeconds": 3600, "shardGroupDurationSeconds": 3600 }
            ]
        })))
        .mount(&server)
        .await;

    let declared = decode_attrs(
        "influxdb-v2_bucket",
        json!({
            "name": "telemetry",
            "org_id": "o1",
            "retention_rules": [
                { "every_seconds": 2_592_000 },
                { "every_seconds": 3600, "shard_group_duration_seconds": -1 }
            ]
        }),
    )
    .unwrap();
    let mut bucket = Instance::new(BucketResource, declared);
    bucket.create(&conn).await.unwrap();

    let rules = &bucket.attrs().retention_rules;
    assert_eq!(rules[0].shard_group_duration_seconds, ShardGroupDuration::Default);
    assert_eq!(rules[1].shard_group_duration_seconds, ShardGroupDuration::Unmanaged);
}

#[tokio::test]
async fn test_bucket_deleted_out_of_band_reads_absent() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/buckets/b1"))
        .respond_with(not_found("bucket not found"))
        .mount(&server)
        .await;

    let mut bucket = Instance::existing(BucketResource, "b1", declared_bucket());
    let present = bucket.read(&conn).await.unwrap();

    assert!(!present);
    assert_eq!(bucket.id(), None);
}

#[tokio::test]
async fn test_bucket_read_other_error_propagates() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/buckets/b1"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "code": "internal error", "message": "boom" })),
        )
        .mount(&server)
        .await;

    let mut bucket = Instance::existing(BucketResource, "b1", declared_bucket());
    let err = bucket.read(&conn).await.unwrap_err();

    assert_eq!(err.to_string(), "error getting bucket: internal error: boom");
    assert_eq!(bucket.id(), Some("b1"));
}

#[tokio::test]
async fn test_bucket_update_patches_then_refreshes() {
    let (server, conn) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/buckets/b1"))
        .and(body_json(json!({
            "name": "telemetry-v2",
            "description": "metrics",
            "retentionRules": [
                { "type": "expire", "everySeconds": 3640, "shardGroupDurationSeconds": 3610 }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_bucket("telemetry-v2", 3610)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/buckets/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_bucket("telemetry-v2", 3610)))
        .expect(1)
        .mount(&server)
        .await;

    let mut bucket = Instance::existing(BucketResource, "b1", declared_bucket());
    let mut desired = declared_bucket();
    desired.name = "telemetry-v2".into();

    bucket.update(&conn, desired).await.unwrap();
    assert_eq!(bucket.attrs().name, "telemetry-v2");
    assert_eq!(bucket.attrs().created_at.as_deref(), Some("2024-06-15T10:30:00Z"));
}

#[tokio::test]
async fn test_force_new_change_makes_no_remote_call() {
    let (server, conn) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut bucket = Instance::existing(BucketResource, "b1", declared_bucket());
    let mut desired = declared_bucket();
    desired.org_id = "o2".into();

    let err = bucket.update(&conn, desired).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::RequiresReplacement { ref attributes, .. } if attributes == &["org_id"]
    ));
    assert_eq!(bucket.attrs().org_id, "o1");
}

#[tokio::test]
async fn test_delete_clears_identity() {
    let (server, conn) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/buckets/b1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut bucket = Instance::existing(BucketResource, "b1", declared_bucket());
    bucket.delete(&conn).await.unwrap();
    assert!(!bucket.is_present());

    let err = bucket.delete(&conn).await.unwrap_err();
    assert!(matches!(err, CoreError::NotPresent { operation: "delete", .. }));
}

// ── Authorization ───────────────────────────────────────────────────

#[tokio::test]
async fn test_authorization_create_captures_token() {
    let (server, conn) = setup().await;

    let server_auth = json!({
        "id": "a1",
        "token": "generated-token",
        "status": "active",
        "description": "ci",
        "orgID": "o1",
        "userID": "u1",
        "org": "acme",
        "permissions": [
            {
                "action": "read",
                "resource": { "type": "buckets", "orgID": "o1", "org": "acme" }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/api/v2/authorizations"))
        .and(body_json(json!({
            "orgID": "o1",
            "description": "ci",
            "status": "active",
            "permissions": [
                { "action": "read", "resource": { "type": "buckets", "orgID": "o1" } }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(server_auth.clone()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/authorizations/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_auth))
        .mount(&server)
        .await;

    let declared = decode_attrs(
        "influxdb-v2_authorization",
        json!({
            "org_id": "o1",
            "description": "ci",
            "permissions": [
                { "action": "read", "resource": { "type": "buckets", "org_id": "o1" } }
            ]
        }),
    )
    .unwrap();
    let mut auth = Instance::new(AuthorizationResource, declared);
    auth.create(&conn).await.unwrap();

    let attrs = auth.attrs();
    assert_eq!(attrs.status, AuthorizationStatus::Active);
    assert_eq!(attrs.user_id.as_deref(), Some("u1"));
    assert_eq!(attrs.user_org_id.as_deref(), Some("o1"));
    assert_eq!(attrs.token.as_ref().unwrap().expose_secret(), "generated-token");
    // Server-filled `org` does not leak into the declared permission shape.
    assert_eq!(attrs.permissions[0].resource.org, None);
}

// ── Legacy authorization ────────────────────────────────────────────

fn declared_legacy() -> serde_json::Value {
    json!({
        "org_id": "o1",
        "name": "telegraf",
        "password": "hunter22",
        "permissions": [
            { "action": "write", "resource": { "type": "buckets", "id": "b1", "org_id": "o1" } }
        ]
    })
}

#[tokio::test]
async fn test_legacy_password_failure_rolls_back() {
    let (server, conn) = setup().await;

    Mock::given(method("POST"))
        .and(path("/private/legacy/authorizations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "l1",
            "token": "telegraf",
            "orgID": "o1",
            "status": "active",
            "permissions": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/private/legacy/authorizations/l1/password"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "code": "invalid", "message": "password too short" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/private/legacy/authorizations/l1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let declared = decode_attrs("influxdb-v2_legacy_authorization", declared_legacy()).unwrap();
    let mut legacy = Instance::new(LegacyAuthorizationResource, declared);
    let err = legacy.create(&conn).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "error setting password for legacy authorization: invalid: password too short"
    );
    assert!(!legacy.is_present());
}

#[tokio::test]
async fn test_legacy_create_sets_password_and_keeps_it() {
    let (server, conn) = setup().await;

    let server_auth = json!({
        "id": "l1",
        "token": "telegraf",
        "orgID": "o1",
        "userID": "u1",
        "status": "active",
        "permissions": [
            { "action": "write", "resource": { "type": "buckets", "id": "b1", "orgID": "o1" } }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/private/legacy/authorizations"))
        .and(body_json(json!({
            "orgID": "o1",
            "token": "telegraf",
            "description": "",
            "status": "active",
            "permissions": [
                { "action": "write", "resource": { "type": "buckets", "id": "b1", "orgID": "o1" } }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(server_auth.clone()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/private/legacy/authorizations/l1/password"))
        .and(body_json(json!({ "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/private/legacy/authorizations/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_auth))
        .mount(&server)
        .await;

    let declared = decode_attrs("influxdb-v2_legacy_authorization", declared_legacy()).unwrap();
    let mut legacy = Instance::new(LegacyAuthorizationResource, declared);
    legacy.create(&conn).await.unwrap();

    assert_eq!(legacy.id(), Some("l1"));
    assert_eq!(legacy.attrs().password.expose_secret(), "hunter22");
    assert_eq!(legacy.attrs().user_id.as_deref(), Some("u1"));
}

#[tokio::test]
async fn test_legacy_read_404_is_absent() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/private/legacy/authorizations/l1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .mount(&server)
        .await;

    let declared = decode_attrs("influxdb-v2_legacy_authorization", declared_legacy()).unwrap();
    let mut legacy = Instance::existing(LegacyAuthorizationResource, "l1", declared);
    assert!(!legacy.read(&conn).await.unwrap());
    assert_eq!(legacy.id(), None);
}

// ── DBRP mapping ────────────────────────────────────────────────────

#[tokio::test]
async fn test_dbrp_read_passes_org_and_unwraps_content() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/dbrps/d1"))
        .and(query_param("orgID", "o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": {
                "id": "d1",
                "orgID": "o1",
                "bucketID": "b1",
                "database": "telegraf",
                "retentionPolicy": "autogen",
                "default": true,
                "virtual": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = decode_attrs(
        "influxdb-v2_dbrp_mapping",
        json!({
            "org_id": "o1",
            "bucket_id": "b1",
            "database": "telegraf",
            "retention_policy": "autogen"
        }),
    )
    .unwrap();
    let mut dbrp = Instance::existing(DbrpMappingResource, "d1", prior);
    assert!(dbrp.read(&conn).await.unwrap());
    assert_eq!(dbrp.attrs().default_policy, Some(true));
}

#[tokio::test]
async fn test_dbrp_not_found_reads_absent() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/dbrps/d1"))
        .respond_with(not_found("unable to find DBRP"))
        .mount(&server)
        .await;

    let prior = decode_attrs(
        "influxdb-v2_dbrp_mapping",
        json!({
            "org_id": "o1",
            "bucket_id": "b1",
            "database": "telegraf",
            "retention_policy": "autogen"
        }),
    )
    .unwrap();
    let mut dbrp = Instance::existing(DbrpMappingResource, "d1", prior);
    assert!(!dbrp.read(&conn).await.unwrap());
}

// ── Organization ────────────────────────────────────────────────────

fn server_org(name: &str, description: &str) -> serde_json::Value {
    json!({
        "id": "o1",
        "name": name,
        "description": description,
        "createdAt": "2024-06-15T10:30:00Z",
        "updatedAt": "2024-06-15T10:30:00Z"
    })
}

fn declared_org(name: &str, description: &str) -> OrganizationAttrs {
    decode_attrs(
        "influxdb-v2_organization",
        json!({ "name": name, "description": description }),
    )
    .unwrap()
}

#[tokio::test]
async fn test_organization_create_round_trip() {
    let (server, conn) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/orgs"))
        .and(body_json(json!({ "name": "acme", "description": "main" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(server_org("acme", "main")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/orgs/o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_org("acme", "main")))
        .expect(1)
        .mount(&server)
        .await;

    let mut org = Instance::new(OrganizationResource, declared_org("acme", "main"));
    org.create(&conn).await.unwrap();

    assert_eq!(org.id(), Some("o1"));
    assert_eq!(org.attrs().name, "acme");
    assert_eq!(org.attrs().created_at.as_deref(), Some("2024-06-15T10:30:00Z"));
}

#[tokio::test]
async fn test_organization_update_patches_then_refreshes() {
    let (server, conn) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/orgs/o1"))
        .and(body_json(json!({ "name": "acme-prod", "description": "renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_org("acme-prod", "renamed")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/orgs/o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_org("acme-prod", "renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let mut org = Instance::existing(OrganizationResource, "o1", declared_org("acme", "main"));
    org.update(&conn, declared_org("acme-prod", "renamed")).await.unwrap();

    assert_eq!(org.attrs().name, "acme-prod");
    assert_eq!(org.attrs().description, "renamed");
    assert_eq!(org.attrs().updated_at.as_deref(), Some("2024-06-15T10:30:00Z"));
}

#[tokio::test]
async fn test_organization_delete_clears_identity() {
    let (server, conn) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/orgs/o1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut org = Instance::existing(OrganizationResource, "o1", declared_org("acme", "main"));
    org.delete(&conn).await.unwrap();
    assert_eq!(org.id(), None);
}

#[tokio::test]
async fn test_organization_not_found_reads_absent() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/orgs/o1"))
        .respond_with(not_found("organization not found"))
        .mount(&server)
        .await;

    let mut org = Instance::existing(OrganizationResource, "o1", declared_org("acme", "main"));
    assert!(!org.read(&conn).await.unwrap());
    assert_eq!(org.id(), None);
}

// ── Authorization ───────────────────────────────────────────────────

#[tokio::test]
async fn test_authorization_not_found_reads_absent() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/authorizations/a1"))
        .respond_with(not_found("authorization not found"))
        .mount(&server)
        .await;

    let prior = decode_attrs(
        "influxdb-v2_authorization",
        json!({
            "org_id": "o1",
            "permissions": [
                { "action": "read", "resource": { "type": "buckets", "org_id": "o1" } }
            ]
        }),
    )
    .unwrap();
    let mut auth = Instance::existing(AuthorizationResource, "a1", prior);
    assert!(!auth.read(&conn).await.unwrap());
    assert_eq!(auth.id(), None);
}

// ── Scraper ─────────────────────────────────────────────────────────

fn declared_scraper() -> ScraperAttrs {
    decode_attrs(
        "influxdb-v2_scraper",
        json!({
            "name": "node",
            "org_id": "o1",
            "bucket_id": "b1",
            "url": "http://node-exporter:9100/metrics",
            "allow_insecure": false
        }),
    )
    .unwrap()
}

fn server_scraper() -> serde_json::Value {
    json!({
        "id": "s1",
        "name": "node",
        "type": "prometheus",
        "url": "http://node-exporter:9100/metrics",
        "orgID": "o1",
        "bucketID": "b1",
        "allowInsecure": false,
        "org": "acme",
        "bucket": "telemetry"
    })
}

#[tokio::test]
async fn test_scraper_create_round_trip() {
    let (server, conn) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/scrapers"))
        .and(body_json(json!({
            "name": "node",
            "type": "prometheus",
            "url": "http://node-exporter:9100/metrics",
            "orgID": "o1",
            "bucketID": "b1",
            "allowInsecure": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(server_scraper()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/scrapers/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_scraper()))
        .expect(1)
        .mount(&server)
        .await;

    let mut scraper = Instance::new(ScraperResource, declared_scraper());
    scraper.create(&conn).await.unwrap();

    assert_eq!(scraper.id(), Some("s1"));
    assert_eq!(scraper.attrs().target_type.as_deref(), Some("prometheus"));
    assert_eq!(scraper.attrs().url, "http://node-exporter:9100/metrics");
}

#[tokio::test]
async fn test_scraper_not_found_reads_absent() {
    let (server, conn) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/scrapers/s1"))
        .respond_with(not_found("Scraper not found"))
        .mount(&server)
        .await;

    let mut scraper = Instance::existing(ScraperResource, "s1", declared_scraper());
    assert!(!scraper.read(&conn).await.unwrap());
    assert_eq!(scraper.id(), None);
}

#[tokio::test]
async fn test_scraper_read_keeps_prior_type_when_server_omits_it() {
    let (server, conn) = setup().await;

    let mut sparse = server_scraper();
    sparse.as_object_mut().unwrap().remove("type");
    Mock::given(method("GET"))
        .and(path("/api/v2/scrapers/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sparse))
        .mount(&server)
        .await;

    let prior = ScraperAttrs {
        target_type: Some("prometheus".into()),
        ..declared_scraper()
    };
    let mut scraper = Instance::existing(ScraperResource, "s1", prior);
    assert!(scraper.read(&conn).await.unwrap());
    assert_eq!(scraper.attrs().target_type.as_deref(), Some("prometheus"));
}

#[tokio::test]
async fn test_scraper_update_sends_nothing() {
    let (server, conn) = setup().await;
    let before = server.received_requests().await.unwrap().len();

    ScraperResource
        .update(&conn, "s1", &declared_scraper())
        .await
        .unwrap();

    let mut scraper = Instance::existing(ScraperResource, "s1", declared_scraper());
    scraper.update(&conn, declared_scraper()).await.unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), before);
    assert_eq!(scraper.id(), Some("s1"));
}

#[tokio::test]
async fn test_scraper_url_change_requires_replacement() {
    let (server, conn) = setup().await;
    let before = server.received_requests().await.unwrap().len();

    let mut scraper = Instance::existing(ScraperResource, "s1", declared_scraper());
    let desired = ScraperAttrs {
        url: "http://node-exporter:9200/metrics".into(),
        ..declared_scraper()
    };
    let err = scraper.update(&conn, desired).await.unwrap_err();

    assert!(matches!(err, CoreError::RequiresReplacement { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

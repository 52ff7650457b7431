// Integration tests for `WaxClient` using wiremock.
#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use waxwing_api::{Error, Ssid, WaxClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, WaxClient) {
    let server = MockServer::start().await;
    let client = WaxClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        "admin".to_owned(),
        SecretString::from("hunter2"),
    );
    (server, client)
}

/// Mount the two login endpoints: the cookie handshake on `/` and the
/// credential POST on the RPC path, returning the token in the
/// `security` response header.
async fn mount_login(server: &MockServer, cookie: &str, token: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("lhttpdsid={cookie}; Path=/; HttpOnly")),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(json!({
            "system": { "basicSettings": { "adminName": "admin" } }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("security", token)
                .set_body_json(json!({ "status": 0 })),
        )
        .mount(server)
        .await;
}

fn ssid_get_body() -> serde_json::Value {
    json!({
        "system": { "wlanSettings": { "wlanSettingTable": { "ssidGetDetails": "" } } }
    })
}

// ── Login handshake ─────────────────────────────────────────────────

#[tokio::test]
async fn test_login_token_from_header() {
    let (server, client) = setup().await;
    mount_login(&server, "cookie-1", "token-1").await;

    client.login().await.unwrap();

    let (cookie, token) = client.auth_headers();
    assert_eq!(cookie, "cookie-1");
    assert_eq!(token, "token-1");
}

#[tokio::test]
async fn test_login_token_from_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "lhttpdsid=cookie-2; Path=/"),
        )
        .mount(&server)
        .await;

    // Newer firmware: no `security` header, token in the body instead.
    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "system": { "security_token": "token-2" }
        })))
        .mount(&server)
        .await;

    client.login().await.unwrap();

    let (cookie, token) = client.auth_headers();
    assert_eq!(cookie, "cookie-2");
    assert_eq!(token, "token-2");
}

#[tokio::test]
async fn test_login_without_session_cookie() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, Error::MissingSessionCookie), "{err:?}");
}

#[tokio::test]
async fn test_login_without_security_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "lhttpdsid=c"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 0 })))
        .mount(&server)
        .await;

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, Error::MissingSecurityToken), "{err:?}");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "lhttpdsid=c"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, Error::CredentialsRejected { .. }), "{err:?}");
}

// ── Re-login and retry policy ───────────────────────────────────────

#[tokio::test]
async fn test_http_401_triggers_single_relogin_and_retry() {
    let (server, client) = setup().await;

    // First attempt: expired session.
    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(ssid_get_body()))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    mount_login(&server, "fresh-cookie", "fresh-token").await;

    // Retry must carry the fresh session artifacts.
    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(ssid_get_body()))
        .and(header("cookie", "lhttpdsid=fresh-cookie"))
        .and(header("security", "fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "system": { "wlanSettings": { "wlanSettingTable": { "ssidGetDetails": {} } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ssids = client.get_ssids().await.unwrap();
    assert!(ssids.is_empty());
}

#[tokio::test]
async fn test_status_100_triggers_single_relogin_and_retry() {
    let (server, client) = setup().await;

    // HTTP 200, but the body says the session is gone.
    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(ssid_get_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 100 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    mount_login(&server, "fresh-cookie", "fresh-token").await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(ssid_get_body()))
        .and(header("security", "fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "system": { "wlanSettings": { "wlanSettingTable": { "ssidGetDetails": {} } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ssids = client.get_ssids().await.unwrap();
    assert!(ssids.is_empty());
}

#[tokio::test]
async fn test_second_401_surfaces_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(ssid_get_body()))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // Login succeeds, the retried request still comes back 401.
    mount_login(&server, "c", "t").await;

    let err = client.get_ssids().await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired), "{err:?}");
}

#[tokio::test]
async fn test_persistent_status_100_surfaces_device_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(ssid_get_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 100 })))
        .mount(&server)
        .await;

    mount_login(&server, "c", "t").await;

    let err = client.get_ssids().await.unwrap_err();
    assert!(matches!(err, Error::DeviceStatus { status: 100 }), "{err:?}");
}

// ── Device state ────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_state_parses_device_snapshot() {
    let (server, client) = setup().await;

    // Mixed integer/string numerics, as seen across firmware versions.
    let body = json!({
        "status": 0,
        "system": {
            "monitor": {
                "productId": "WAX610",
                "totalNumberOfDevices": "12",
                "sysSerialNumber": "SN123456",
                "ethernetMacAddress": "aa:bb:cc:dd:ee:ff",
                "sysVersion": "V10.8.1.4",
                "stats": {
                    "lan": { "traffic": "12.00 GB" },
                    "wlan0": { "traffic": "1.00 KB", "channelUtil": 42 },
                    "wlan1": { "traffic": "0.00 B", "channelUtil": "7" }
                }
            },
            "basicSettings": { "apName": "attic-ap" },
            "FwUpdate": { "ImageAvailable": 1, "ImageVersion": "V10.9.0.1" }
        }
    });

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(json!({
            "system": { "FwUpdate": { "ImageAvailable": "" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let state = client.get_state(true).await.unwrap();

    assert_eq!(state.device_name, "attic-ap");
    assert_eq!(state.model, "WAX610");
    assert_eq!(state.mac_address, "aa:bb:cc:dd:ee:ff");
    assert_eq!(state.serial_number, "SN123456");
    assert_eq!(state.firmware_version, "V10.8.1.4");
    assert!(state.firmware_update_available);
    assert_eq!(state.total_connected_clients, 12);

    assert_eq!(state.stats["lan"].bytes_transferred, 12_884_901_888);
    assert_eq!(state.stats["lan"].channel_utilization_percent, 0);
    assert_eq!(state.stats["wlan0"].bytes_transferred, 1024);
    assert_eq!(state.stats["wlan0"].channel_utilization_percent, 42);
    assert_eq!(state.stats["wlan1"].channel_utilization_percent, 7);
}

#[tokio::test]
async fn test_get_state_requests_connectivity_at_most_once_per_hour() {
    let (server, client) = setup().await;

    let body = json!({
        "status": 0,
        "system": {
            "monitor": {
                "productId": "WAX610",
                "totalNumberOfDevices": 1,
                "sysSerialNumber": "SN",
                "ethernetMacAddress": "mac",
                "sysVersion": "V1"
            },
            "basicSettings": { "apName": "ap" }
        }
    });

    // First poll carries the connectivity probe field.
    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(json!({
            "system": { "monitor": { "internetConnectivityStatus": "" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    // Subsequent polls inside the hour omit it and fall through here.
    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    client.get_state(false).await.unwrap();
    client.get_state(false).await.unwrap();
}

#[tokio::test]
async fn test_get_state_missing_identity_field_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "system": {
                "monitor": { "productId": "WAX610" },
                "basicSettings": {}
            }
        })))
        .mount(&server)
        .await;

    let err = client.get_state(false).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn test_get_state_missing_client_count_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "system": {
                "monitor": {
                    "productId": "WAX610",
                    "sysSerialNumber": "SN",
                    "ethernetMacAddress": "mac",
                    "sysVersion": "V1"
                },
                "basicSettings": { "apName": "ap" }
            }
        })))
        .mount(&server)
        .await;

    let err = client.get_state(false).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "{err:?}");
}

// ── SSID table ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_ssids_flattens_groups_and_radios() {
    let (server, client) = setup().await;

    let body = json!({
        "status": 0,
        "system": { "wlanSettings": { "wlanSettingTable": { "ssidGetDetails": {
            "SSID1": {
                "wlan0": { "vap1": { "vapProfileStatus": 1, "ssid": "Home" } },
                "wlan1": { "vap1": { "vapProfileStatus": "1", "ssid": "Home" } }
            },
            "SSID2": {
                "wlan1": { "vap2": { "vapProfileStatus": 0, "ssid": "Guest" } }
            }
        } } } }
    });

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_partial_json(ssid_get_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let ssids = client.get_ssids().await.unwrap();
    assert_eq!(ssids.len(), 3);

    let home: Vec<&Ssid> = ssids.iter().filter(|s| s.ssid_group_id == "SSID1").collect();
    assert_eq!(home.len(), 2);
    assert_eq!(home[0].wlan_id, "wlan0");
    assert_eq!(home[0].vap_slot, "vap1");
    assert_eq!(home[0].ssid_name, "Home");
    assert!(home[0].enabled);
    // Numeric-string status counts as enabled too.
    assert_eq!(home[1].wlan_id, "wlan1");
    assert!(home[1].enabled);

    let guest = ssids.iter().find(|s| s.ssid_group_id == "SSID2").unwrap();
    assert_eq!(guest.ssid_name, "Guest");
    assert_eq!(guest.wlan_id, "wlan1");
    assert_eq!(guest.vap_slot, "vap2");
    assert!(!guest.enabled);
}

#[tokio::test]
async fn test_enable_ssid_writes_both_bands_in_one_request() {
    let (server, client) = setup().await;

    let ssids = vec![
        Ssid {
            ssid_group_id: "SSID1".to_owned(),
            ssid_name: "Home".to_owned(),
            vap_slot: "vap1".to_owned(),
            wlan_id: "wlan0".to_owned(),
            enabled: true,
            ssid_index: "SSID1".to_owned(),
        },
        Ssid {
            ssid_group_id: "SSID1".to_owned(),
            ssid_name: "Home".to_owned(),
            vap_slot: "vap1".to_owned(),
            wlan_id: "wlan1".to_owned(),
            enabled: true,
            ssid_index: "SSID1".to_owned(),
        },
    ];

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .and(body_json(json!({
            "system": { "wlanSettings": { "wlanSettingTable": { "ssidSetDetails": {
                "SSID1": {
                    "wlan0": { "vap1": { "vapProfileStatus": "0", "ssid": "Home" } },
                    "wlan1": { "vap1": { "vapProfileStatus": "0", "ssid": "Home" } }
                }
            } } } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    client.enable_ssid(&ssids, false).await.unwrap();
}

#[tokio::test]
async fn test_enable_ssid_with_no_records_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/socketCommunication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 0 })))
        .expect(0)
        .mount(&server)
        .await;

    client.enable_ssid(&[], true).await.unwrap();
}

// ── Firmware check and logout ───────────────────────────────────────

#[tokio::test]
async fn test_check_firmware_updates_hits_logfile_endpoint() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/LogFile"))
        .and(body_json(json!({ "method": 5, "upgradeCheck": 0 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.check_firmware_updates().await.unwrap();
}

#[tokio::test]
async fn test_logout_posts_username_envelope() {
    let (server, client) = setup().await;
    mount_login(&server, "c", "t").await;
    client.login().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/logout"))
        .and(body_json(json!({ "admin": "admin" })))
        .and(header("cookie", "lhttpdsid=c"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

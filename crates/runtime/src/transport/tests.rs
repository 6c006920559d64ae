use std::time::Duration;

use tempfile::TempDir;

use super::*;

#[test]
fn display_target_hides_credentials() {
	let url = "http://pbx:8088/asterisk/rawman?action=Login&Username=admin&Secret=s3cret";
	assert_eq!(display_target(url), "http://pbx:8088/asterisk/rawman?action=Login");
}

#[test]
fn display_target_without_query() {
	assert_eq!(display_target("http://pbx:8088/asterisk/rawman"), "http://pbx:8088/asterisk/rawman");
	assert_eq!(display_target("http://pbx/rawman?Secret=x"), "http://pbx/rawman");
}

#[test]
fn transport_keeps_configured_timeout() {
	let tmp = TempDir::new().unwrap();
	let store = CookieStore::open(tmp.path().join("ajam_cookie")).unwrap();
	let transport = HttpTransport::new(store, Duration::from_millis(1500)).unwrap();
	assert_eq!(transport.timeout(), Duration::from_millis(1500));
	assert!(transport.cookie_store().path().ends_with("ajam_cookie"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
	let tmp = TempDir::new().unwrap();
	let store = CookieStore::open(tmp.path().join("ajam_cookie")).unwrap();
	let transport = HttpTransport::new(store, Duration::from_secs(2)).unwrap();

	// Port 9 (discard) on loopback is closed on any sane test host.
	let err = transport
		.request("http://127.0.0.1:9/asterisk/rawman?action=Login&Secret=hidden", SessionMode::ReadSession)
		.await
		.unwrap_err();

	assert!(!err.is_storage());
	let msg = err.to_string();
	assert!(!msg.contains("hidden"), "secret leaked: {msg}");
}

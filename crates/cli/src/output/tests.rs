use ajam::RawResult;

use super::*;

fn peers() -> RawResult {
	ajam::parse(
		"Response: Success\r\nMessage: Peer status list will follow\r\n\r\n\
		 Event: PeerEntry\r\nObjectName: 100\r\n\r\n\
		 Event: PeerlistComplete\r\n\r\n",
	)
}

#[test]
fn result_builder_success() {
	let result = ResultBuilder::new("exec").data(peers()).build();

	assert!(result.ok);
	assert_eq!(result.command, "exec");
	assert_eq!(result.schema_version, SCHEMA_VERSION);
	assert!(result.data.is_some());
	assert!(result.error.is_none());
	assert!(result.timings.is_some());
}

#[test]
fn result_builder_error() {
	let result: CommandResult<()> = ResultBuilder::new("ping")
		.error("TRANSPORT_ERROR", "request timed out after 10000ms")
		.build();

	assert!(!result.ok);
	assert!(result.data.is_none());
	assert_eq!(
		result.error,
		Some(CommandError {
			code: "TRANSPORT_ERROR".into(),
			message: "request timed out after 10000ms".into(),
		})
	);
}

#[test]
fn json_envelope_uses_camel_case() {
	let result = ResultBuilder::new("exec").data(peers()).build();
	let json: serde_json::Value = serde_json::from_str(&render(&result, OutputFormat::Json)).unwrap();

	assert_eq!(json["schemaVersion"], 1);
	assert_eq!(json["ok"], true);
	assert_eq!(json["data"]["headers"]["Response"], "Success");
	assert_eq!(json["data"]["data"][1]["ObjectName"], "100");
	assert!(json["timings"]["durationMs"].is_u64());
	assert!(json.get("error").is_none());
}

#[test]
fn text_lists_headers_then_blocks() {
	let result = ResultBuilder::new("exec").data(peers()).build();
	let text = render(&result, OutputFormat::Text);

	assert_eq!(
		text,
		"Response: Success\nMessage: Peer status list will follow\n\n[0]\n\n[1]\nEvent: PeerEntry\nObjectName: 100\n"
	);
}

#[test]
fn text_reports_conflicts() {
	let result = ajam::parse("Response: Follows\r\nline one\r\nKey: Value\r\n--END COMMAND--\r\n\r\n");
	let text = render(&ResultBuilder::new("exec").data(result).build(), OutputFormat::Text);

	assert!(text.contains("[0]\nline one\n"));
	assert!(text.contains("[warning] block 0 expected lines: Key: Value"));
}

#[test]
fn text_output_of_failure_is_empty() {
	let result: CommandResult<RawResult> = ResultBuilder::new("exec").error("AUTH_ERROR", "denied").build();
	assert!(render(&result, OutputFormat::Text).is_empty());
}

#[test]
fn login_text() {
	let data = LoginData {
		username: "admin".into(),
		auth_type: "md5".into(),
	};
	assert_eq!(data.to_text(), "Logged in as admin (md5)\n");
}

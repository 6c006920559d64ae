use ajam_protocol::{QueryBuilder, SessionMode};

use super::*;
use crate::error::Error;
use crate::testing::{AUTH_FAILED, BASE, NOT_LOGGED_IN, PONG, SUCCESS, ScriptedTransport};

const CHALLENGE_OK: &str = "Response: Success\r\nChallenge: abc123\r\n\r\n";

fn manager(auth_type: AuthType, transport: ScriptedTransport) -> SessionManager<ScriptedTransport> {
	let credentials = Credentials::new("admin", "test", auth_type);
	SessionManager::new(credentials, QueryBuilder::new(BASE), transport)
}

#[tokio::test]
async fn ping_success_means_live() {
	let transport = ScriptedTransport::new().reply(PONG);
	let mut session = manager(AuthType::Plaintext, transport.clone());

	assert!(session.is_live().await.unwrap());
	assert_eq!(session.state(), SessionState::LoggedIn);
	assert_eq!(transport.calls(), vec![(format!("{BASE}?action=Ping"), SessionMode::ReadSession)]);
}

#[tokio::test]
async fn ping_error_means_not_live() {
	let transport = ScriptedTransport::new().reply(NOT_LOGGED_IN);
	let mut session = manager(AuthType::Plaintext, transport);

	assert!(!session.is_live().await.unwrap());
	assert_eq!(session.state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn plaintext_login_sends_secret_in_write_session() {
	let transport = ScriptedTransport::new().reply(SUCCESS);
	let mut session = manager(AuthType::Plaintext, transport.clone());

	session.login().await.unwrap();

	assert_eq!(session.state(), SessionState::LoggedIn);
	assert_eq!(
		transport.calls(),
		vec![(
			format!("{BASE}?action=Login&Username=admin&Secret=test"),
			SessionMode::WriteSession
		)]
	);
}

#[tokio::test]
async fn md5_login_answers_the_challenge() {
	let transport = ScriptedTransport::new().reply(CHALLENGE_OK).reply(SUCCESS);
	let mut session = manager(AuthType::ChallengeMd5, transport.clone());

	session.login().await.unwrap();

	assert_eq!(
		transport.calls(),
		vec![
			(format!("{BASE}?action=Challenge&Authtype=md5"), SessionMode::WriteSession),
			(
				format!("{BASE}?action=Login&AuthType=MD5&Username=admin&Key=1512de80d8a1d2e3d5c87ff49aa29f6e"),
				SessionMode::WriteSession
			),
		]
	);
	assert!(!transport.calls().iter().any(|(url, _)| url.contains("Secret")));
}

#[tokio::test]
async fn rejected_login_carries_server_message() {
	let transport = ScriptedTransport::new().reply(AUTH_FAILED);
	let mut session = manager(AuthType::Plaintext, transport);

	let err = session.login().await.unwrap_err();
	match err {
		Error::Auth(AuthError::Rejected { username, message }) => {
			assert_eq!(username, "admin");
			assert_eq!(message, "Authentication failed");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(session.state(), SessionState::LoggedOut);
}

#[tokio::test]
async fn refused_challenge_skips_login() {
	let transport = ScriptedTransport::new().reply("Response: Error\r\nMessage: Must specify AuthType\r\n\r\n");
	let mut session = manager(AuthType::ChallengeMd5, transport.clone());

	let err = session.login().await.unwrap_err();
	assert!(matches!(
		err,
		Error::Auth(AuthError::ChallengeRefused { ref message }) if message == "Must specify AuthType"
	));
	assert_eq!(transport.count("Login"), 0);
}

#[tokio::test]
async fn challenge_without_nonce_is_an_auth_error() {
	let transport = ScriptedTransport::new().reply("Response: Success\r\n\r\n");
	let mut session = manager(AuthType::ChallengeMd5, transport.clone());

	let err = session.login().await.unwrap_err();
	assert!(matches!(err, Error::Auth(AuthError::MissingChallenge)));
	assert_eq!(transport.count("Login"), 0);
}

#[tokio::test]
async fn headerless_login_reply_is_rejected() {
	let transport = ScriptedTransport::new().reply("<html>gateway</html>\n");
	let mut session = manager(AuthType::Plaintext, transport);

	let err = session.login().await.unwrap_err();
	assert!(matches!(
		err,
		Error::Auth(AuthError::Rejected { ref message, .. }) if message == "no Response header"
	));
}

#[tokio::test]
async fn ensure_live_skips_login_when_session_is_valid() {
	let transport = ScriptedTransport::new().reply(PONG);
	let mut session = manager(AuthType::Plaintext, transport.clone());

	session.ensure_live().await.unwrap();
	assert_eq!(transport.actions(), vec!["Ping"]);
}

#[tokio::test]
async fn ensure_live_logs_in_once() {
	let transport = ScriptedTransport::new().reply(NOT_LOGGED_IN).reply(AUTH_FAILED);
	let mut session = manager(AuthType::Plaintext, transport.clone());

	assert!(matches!(session.ensure_live().await, Err(Error::Auth(_))));
	assert_eq!(transport.actions(), vec!["Ping", "Login"]);
}

#[tokio::test]
async fn ping_timeout_propagates_as_transport_error() {
	let transport = ScriptedTransport::new().time_out();
	let mut session = manager(AuthType::Plaintext, transport.clone());

	let err = session.ensure_live().await.unwrap_err();
	assert!(err.is_timeout());
	assert_eq!(transport.count("Login"), 0);
}

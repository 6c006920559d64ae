use ajam::{Client, Params, RawResult};
use tracing::info;

use crate::cli::{Cli, Commands, ExecArgs};
use crate::config_file;
use crate::error::Result;
use crate::output::{self, LoginData, OutputFormat, ResultBuilder};

/// Runs one invocation and prints its result.
///
/// Returns `Ok(false)` when the command ran but the server answered
/// `Response: Error`; the caller turns that into a non-zero exit status.
pub async fn dispatch(cli: Cli) -> Result<bool> {
	let config = config_file::resolve(&cli.connection)?;
	let mut client = Client::from_config(&config)?;
	let format = cli.format;

	match cli.command {
		Commands::Exec(args) => exec(&mut client, args, format).await,
		Commands::Ping => {
			let builder = ResultBuilder::new("ping");
			let result = client.ping().await?;
			Ok(report(builder, result, format))
		}
		Commands::Login => {
			let builder = ResultBuilder::new("login");
			client.login().await?;
			let credentials = client.session().credentials();
			let data = LoginData {
				username: credentials.username.clone(),
				auth_type: credentials.auth_type.to_string(),
			};
			output::print_result(&builder.data(data).build(), format);
			Ok(true)
		}
	}
}

async fn exec(client: &mut Client, args: ExecArgs, format: OutputFormat) -> Result<bool> {
	let builder = ResultBuilder::new("exec");
	let params: Params = args.params.into_iter().collect();
	let result = client.execute(&args.action, &params).await?;
	info!(
		target = "ajam",
		action = %args.action,
		response = result.response().unwrap_or_default(),
		"exec finished"
	);
	Ok(report(builder, result, format))
}

fn report(builder: ResultBuilder<RawResult>, result: RawResult, format: OutputFormat) -> bool {
	let accepted = result.response() != Some("Error");
	output::print_result(&builder.data(result).build(), format);
	accepted
}

use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use bank_accounts::Bank;
use bank_accounts::csv::{read_operations, write_accounts};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into()))
        .with_writer(io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: bank-accounts <operations.csv>");
        return ExitCode::FAILURE;
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let operations = match read_operations(Path::new(&path)) {
        Ok(operations) => operations,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut bank = Bank::new();
    let (op_sender, op_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in operations {
            match result {
                Ok(op) => {
                    if op_sender.send(op).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    bank.run(ReceiverStream::new(op_receiver)).await;

    if let Err(e) = write_accounts(io::stdout().lock(), bank.summaries()) {
        error!("failed to write accounts: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

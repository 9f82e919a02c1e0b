use std::process::ExitCode;

use colored::Colorize;
use strata_pack::CancelToken;
use strata_server::{ServerConfig, StrataServer};
use strata_sync::{fetch_ref, push_ref, HttpRemote, RefSpec, RemoteRepo, Repository, SyncError};

use crate::cli::*;

/// A command failure carrying its process exit code.
///
/// Push aborts (`NothingToPush`, `RemoteHasChanges`, `RemoteUnknownCommit`)
/// exit 3; usage errors exit 2 (handled by clap); everything else exits 1.
#[derive(Debug)]
pub struct CliError {
    message: String,
    code: u8,
}

impl CliError {
    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<SyncError> for CliError {
    fn from(e: SyncError) -> Self {
        let code = match e {
            SyncError::NothingToPush
            | SyncError::RemoteHasChanges
            | SyncError::RemoteUnknownCommit(_) => 3,
            _ => 1,
        };
        Self {
            message: e.to_string(),
            code,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        Self {
            message: e.to_string(),
            code: 1,
        }
    }
}

pub async fn run_command(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Fetch(args) => cmd_fetch(args).await,
        Command::Push(args) => cmd_push(args).await,
        Command::LsRemote(args) => cmd_ls_remote(args).await,
    }
}

async fn cmd_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = ServerConfig {
        bind_addr: args
            .bind
            .parse()
            .map_err(|e| anyhow::anyhow!("bad bind address {:?}: {e}", args.bind))?,
        history_send_limit: args.history_limit,
        pack_commit_limit: (args.pack_limit > 0).then_some(args.pack_limit),
        ..ServerConfig::default()
    };
    println!(
        "{} serving on {}",
        "strata".bold(),
        config.bind_addr.to_string().cyan()
    );
    let server = StrataServer::new(Repository::in_memory(), config);
    server
        .serve()
        .await
        .map_err(|e| anyhow::anyhow!(e).into())
}

async fn cmd_fetch(args: FetchArgs) -> Result<(), CliError> {
    let remote = HttpRemote::new(&args.url)?;
    let local = Repository::in_memory();
    let result = fetch_ref(
        &local,
        &remote,
        &args.remote_name,
        &args.branch,
        &CancelToken::new(),
    )
    .await?;
    println!(
        "{} fetched {} in {} round(s): {} new, {} existing",
        "✓".green().bold(),
        args.branch.yellow(),
        result.rounds,
        result.objects_inserted.to_string().bold(),
        result.objects_existing,
    );
    if let Some(tip) = result.tip {
        println!("  tip {}", tip.to_hex().dimmed());
    }
    Ok(())
}

async fn cmd_push(args: PushArgs) -> Result<(), CliError> {
    let spec = RefSpec::parse(&args.refspec).ok_or_else(|| CliError {
        message: format!("invalid refspec {:?}", args.refspec),
        code: 2,
    })?;
    let remote = HttpRemote::new(&args.url)?;
    let local = Repository::in_memory();
    match push_ref(&local, &remote, &spec, &CancelToken::new()).await {
        Ok(stats) => {
            println!(
                "{} pushed {}: {} object(s), {} commit(s)",
                "✓".green().bold(),
                spec.dst.yellow(),
                stats.objects_sent.to_string().bold(),
                stats.commits_sent,
            );
            Ok(())
        }
        Err(SyncError::NothingToPush) => {
            println!("{}", "nothing to push; remote is up to date".dimmed());
            Err(SyncError::NothingToPush.into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_ls_remote(args: LsRemoteArgs) -> Result<(), CliError> {
    let remote = HttpRemote::new(&args.url)?;
    remote.open().await?;
    let manifest = remote.manifest().await?;
    let _ = remote.close().await;
    for entry in manifest {
        match &entry.symref_target {
            Some(target) => println!(
                "{} {} {}",
                entry.name.bold(),
                target.yellow(),
                entry.id.to_hex().dimmed()
            ),
            None => println!("{} {}", entry.name.bold(), entry.id.to_hex().dimmed()),
        }
    }
    Ok(())
}

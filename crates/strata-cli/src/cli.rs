use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Strata — distributed version control for geospatial features",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve a repository to other peers over HTTP
    Serve(ServeArgs),
    /// Fetch a branch from a remote peer
    Fetch(FetchArgs),
    /// Push a refspec to a remote peer
    Push(PushArgs),
    /// List the refs a remote peer advertises
    LsRemote(LsRemoteArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8182")]
    pub bind: String,
    /// Commits per history probe response
    #[arg(long, default_value_t = 1000)]
    pub history_limit: usize,
    /// Commits per served pack round (0 = unbounded)
    #[arg(long, default_value_t = 10_000)]
    pub pack_limit: usize,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Base URL of the remote peer
    pub url: String,
    /// Branch to fetch
    #[arg(default_value = "master")]
    pub branch: String,
    /// Name recorded for the remote-tracking ref
    #[arg(long, default_value = "origin")]
    pub remote_name: String,
}

#[derive(Args)]
pub struct PushArgs {
    /// Base URL of the remote peer
    pub url: String,
    /// Refspec: [+][local][:remote]
    pub refspec: String,
}

#[derive(Args)]
pub struct LsRemoteArgs {
    /// Base URL of the remote peer
    pub url: String,
}

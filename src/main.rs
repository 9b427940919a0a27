//! rebase-bot binary entry point

use clap::Parser;
use owo_colors::OwoColorize;
use rebase_bot::config::{Args, resolve_context};
use rebase_bot::error::Error;
use rebase_bot::git::{GitOrchestrator, GitSettings, ProcessGitRunner};
use rebase_bot::platform::{GitHubClient, RetryPolicy};
use rebase_bot::{bot, platform::PlatformService};
use tracing_subscriber::EnvFilter;

const BANNER: &str = r"
             _                           _           _
   _ __ ___ | |__   __ _ ___  ___       | |__   ___ | |_
  | '__/ _ \| '_ \ / _` / __|/ _ \_____ | '_ \ / _ \| __|
  | | |  __/| |_) | (_| \__ \  __/_____|| |_) | (_) | |_
  |_|  \___||_.__/ \__,_|___/\___|      |_.__/ \___/ \__|
";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    anstream::println!("{}", BANNER.cyan());

    if let Err(err) = run(Args::parse()).await {
        render_error(&err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> rebase_bot::error::Result<()> {
    let ctx = resolve_context(args)?;

    let platform = GitHubClient::new(&ctx.token, &ctx.repository, ctx.host.as_deref())?;
    let settings = GitSettings {
        workdir: ctx.workdir.clone(),
        host: platform.web_host().to_string(),
        token: ctx.token.clone(),
        origin_repo: ctx.repository.clone(),
    };
    let mut git = GitOrchestrator::new(ProcessGitRunner::new(&ctx.workdir), settings);

    bot::run(&ctx, &platform, &mut git, &RetryPolicy::default()).await
}

/// Render a terminal error with its full diagnostic context. This is the
/// only place errors become text; the CI job log is the audit trail.
fn render_error(err: &Error) {
    anstream::eprintln!("{} {err}", "error:".red().bold());

    if let Error::Transport {
        status: Some(code), ..
    } = err
    {
        anstream::eprintln!("  HTTP status: {code}");
    }

    if let Some(output) = err.git_output() {
        if let Some(code) = output.exit_code {
            anstream::eprintln!("  exit code: {code}");
        }
        if !output.stdout.is_empty() {
            anstream::eprintln!("{}", output.stdout.trim_end());
        }
        if !output.stderr.is_empty() {
            anstream::eprintln!("{}", output.stderr.trim_end().dimmed());
        }
    }
}

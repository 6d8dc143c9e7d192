use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mvn_publish::cli::{run_publish_workflow, PublishWorkflowArgs};
use mvn_publish::config;
use mvn_publish::git::Git2Client;
use mvn_publish::process::SystemRunner;
use mvn_publish::ui;

#[derive(clap::Parser)]
#[command(
    name = "mvn-publish",
    about = "Build a Gradle module from a remote git repository and deploy it to a Maven repository",
    disable_version_flag = true,
    group = clap::ArgGroup::new("reference").multiple(false)
)]
struct Args {
    #[arg(short, long, default_value = "", help = "URL of the git repository to publish")]
    url: String,

    #[arg(short, long, group = "reference", help = "Publish the version at this tag")]
    tag: Option<String>,

    #[arg(short, long, group = "reference", help = "Publish the head of this branch")]
    branch: Option<String>,

    #[arg(short, long, group = "reference", help = "Publish this commit (short hash allowed)")]
    commit: Option<String>,

    #[arg(
        short,
        long,
        help = "Artifact version if it differs from the tag, branch, or commit"
    )]
    version: Option<String>,

    #[arg(
        short,
        long,
        default_value = "",
        help = "Gradle module to publish, colon separated (e.g. 'lib:dfu' or 'app'; ':' for the root project)"
    )]
    module: String,

    #[arg(long, help = "Gradle wrapper version to install before building")]
    gradle_version: Option<String>,

    #[arg(short, long, help = "Override the artifact group id")]
    group: Option<String>,

    #[arg(short, long, help = "Override the artifact id")]
    artifact: Option<String>,

    #[arg(long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Override the target repository id")]
    repository_id: Option<String>,

    #[arg(long, help = "Override the target repository URL")]
    repository_url: Option<String>,

    #[arg(long, help = "Leave the workspace on disk after the run")]
    keep_workspace: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Enable debug logging")]
    verbose: bool,
}

impl From<Args> for PublishWorkflowArgs {
    fn from(args: Args) -> Self {
        PublishWorkflowArgs {
            url: args.url,
            tag: args.tag,
            branch: args.branch,
            commit: args.commit,
            module: args.module,
            version: args.version,
            group: args.group,
            artifact: args.artifact,
            gradle_version: args.gradle_version,
            repository_id: args.repository_id,
            repository_url: args.repository_url,
            keep_workspace: args.keep_workspace,
            dry_run: args.dry_run,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let vcs = Git2Client::new();
    let runner = SystemRunner::new();

    match run_publish_workflow(args.into(), config, &vcs, &runner) {
        Ok(result) if result.published => {
            ui::display_success(&format!(
                "Published {} to {}",
                result.coordinates, result.repository_url
            ));
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}

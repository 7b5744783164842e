use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use lit::areas::repository::Repository;
use lit::artifacts::core::{PagerWriter, pager_enabled};
use lit::errors::{RepositoryError, user_error};
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive
const LOG_ENV: &str = "LIT_LOG";

#[derive(Parser)]
#[command(
    name = "lit",
    version = "0.1.0",
    about = "A small local version-control system",
    long_about = "lit snapshots the files of a directory into commits, keeps them on branches \
    and merges branches with a three-way merge. Everything lives in the .lit directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a repository in the current directory",
        long_about = "This command creates the .lit directory with an initial commit on the master branch."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command creates a new commit on the current branch from the head commit \
        and the staged additions and removals."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file, or stop tracking it and delete it")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of the commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show the branches and the staging area")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the head commit, \
        checkout <commit id> -- <file> restores it from the given commit, \
        checkout <branch> switches to the branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch and the files to a commit")]
    Reset {
        #[arg(index = 1)]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let command = match Cli::try_parse() {
        Ok(Cli {
            command: Some(command),
        }) => command,
        Ok(Cli { command: None }) => {
            println!("Please enter a command.");
            return ExitCode::SUCCESS;
        }
        Err(error) => return report_usage_error(error),
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match user_error(&error) {
            Some(user_error) => {
                println!("{}", user_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("fatal: {:#}", error);
                ExitCode::FAILURE
            }
        },
    }
}

fn report_usage_error(error: clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            if let Err(print_error) = error.print() {
                eprintln!("fatal: {}", print_error);
                return ExitCode::FAILURE;
            }
        }
        ErrorKind::InvalidSubcommand => println!("No command with that name exists."),
        _ => println!("{}", RepositoryError::IncorrectOperands),
    }

    ExitCode::SUCCESS
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    let pager = (command.is_paged() && pager_enabled()).then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };
    let mut repository = Repository::new(&pwd.to_string_lossy(), writer)?;

    match command {
        Commands::Init => repository.init().await?,
        Commands::Add { file } => repository.add(&file).await?,
        Commands::Commit { message } => repository.commit(&message).await?,
        Commands::Rm { file } => repository.rm(&file).await?,
        Commands::Log => repository.log().await?,
        Commands::GlobalLog => repository.global_log().await?,
        Commands::Find { message } => repository.find(&message).await?,
        Commands::Status => repository.status().await?,
        Commands::Checkout { target, file } => match (target, file) {
            (target, Some(file)) => repository.checkout_file(target.as_deref(), &file).await?,
            (Some(branch), None) => repository.checkout_branch(&branch).await?,
            (None, None) => return Err(RepositoryError::IncorrectOperands.into()),
        },
        Commands::Branch { name } => repository.branch(&name).await?,
        Commands::RmBranch { name } => repository.rm_branch(&name).await?,
        Commands::Reset { commit_id } => repository.reset(&commit_id).await?,
        Commands::Merge { branch } => {
            repository.merge(&branch).await?;
        }
    }

    repository.writer().flush()?;

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}

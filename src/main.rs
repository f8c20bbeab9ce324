use std::ffi::OsString;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};

use gitsem::cli::{run_bump_workflow, BumpArgs, WorkflowOutcome};
use gitsem::git::GitCli;
use gitsem::{config, logging, ui, GitsemError};

/// Long flags that may also be spelled with a single dash (`-tag=false`)
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["tag", "preview", "config", "message"];

#[derive(clap::Parser, Debug)]
#[command(
    name = "gitsem",
    version,
    about = "Bump the version in VERSION, commit it and tag the release"
)]
struct Args {
    #[arg(
        value_name = "VERSION",
        help = "One of: major | minor | patch | <literal semver> (a leading 'v' is allowed)"
    )]
    target: String,

    #[arg(
        short,
        long,
        value_name = "TEMPLATE",
        help = "Commit message for the version commit; %s becomes v<version> [default: %s]"
    )]
    message: Option<String>,

    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Whether to tag the version commit [default: true]"
    )]
    tag: Option<bool>,

    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        help = "Show the current and new version without modifying anything"
    )]
    preview: bool,

    #[arg(
        short = 'n',
        long = "no-clean-check",
        help = "Skip checking that the working tree is clean"
    )]
    no_clean_check: bool,

    #[arg(short, long, value_name = "PATH", help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, action = ArgAction::Count, help = "Log progress to stderr (-vv for more)")]
    verbose: u8,
}

fn main() {
    let args = match Args::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        if e
            .downcast_ref::<GitsemError>()
            .is_some_and(GitsemError::is_usage)
        {
            eprintln!("\n{}", Args::command().render_usage());
        }
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    let bump_args = BumpArgs {
        target: args.target,
        message: args.message.unwrap_or(config.message),
        tag: args.tag.unwrap_or(config.tag),
        preview: args.preview,
        skip_clean_check: args.no_clean_check || !config.clean_check,
    };

    let repo = GitCli::current_dir().context("cannot determine the current directory")?;

    match run_bump_workflow(&repo, bump_args)? {
        WorkflowOutcome::Preview {
            old_version,
            new_version,
            clean,
        } => ui::display_preview(&old_version, &new_version, clean),
        WorkflowOutcome::Committed { tag_name, .. } => ui::display_committed(&tag_name),
    }

    Ok(())
}

/// Rewrite single-dash long flags (`-tag`, `-preview=true`) to their
/// double-dash form. Everything after `--` is left alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split('=').next().unwrap_or(rest);
            SINGLE_DASH_LONG_FLAGS
                .contains(&name)
                .then(|| OsString::from(format!("--{}", rest)))
        });
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

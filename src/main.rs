use std::{fs::File, io, path::Path, time::SystemTime};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{error, info, span, warn, Level};
use tracing_subscriber::EnvFilter;

use objectsync::{util, S3Target, Target, TargetOptions, Writable};

fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let span = span!(Level::INFO, "main", context = "main");
    let _e = span.enter();
    info!("called");

    let target_arg = Arg::new("TARGET")
        .help("s3://bucket/root")
        .required(true)
        .index(1);
    let endpoint_arg = Arg::new("endpoint-url")
        .long("endpoint-url")
        .help("S3-compatible endpoint, uses path-style addressing");

    let matches = Command::new("objectsync")
        .version(clap::crate_version!())
        .subcommand_required(true)
        .subcommand(
            Command::new("ls")
                .about("List a directory of the target")
                .arg(target_arg.clone())
                .arg(Arg::new("DIR").index(2).default_value("."))
                .arg(
                    Arg::new("recursive")
                        .short('r')
                        .long("recursive")
                        .action(ArgAction::SetTrue),
                )
                .arg(endpoint_arg.clone()),
        )
        .subcommand(
            Command::new("put")
                .about("Upload a local file into the target")
                .arg(target_arg)
                .arg(Arg::new("FILE").required(true).index(2))
                .arg(Arg::new("dir").long("dir").default_value("."))
                .arg(
                    Arg::new("dry-run")
                        .short('n')
                        .long("dry-run")
                        .action(ArgAction::SetTrue),
                )
                .arg(endpoint_arg),
        )
        .get_matches();

    let res = match matches.subcommand() {
        Some(("ls", sub)) => list(sub),
        Some(("put", sub)) => put(sub),
        _ => unreachable!("subcommand is required"),
    };

    if let Err(err) = res {
        error!(error_message=%format!("{:#}", err), error_group="command");
        std::process::exit(1);
    }
}

fn new_target(matches: &ArgMatches, dry_run: bool) -> Result<S3Target> {
    let uri = matches
        .get_one::<String>("TARGET")
        .context("missing target")?;
    let options = TargetOptions::from_uri(uri, dry_run)?;
    info!(bucket = %options.bucket, root = %options.root, dry_run, "args");

    let config = util::poll::poll_until_ready(aws_config::load_from_env())?;
    let mut builder = aws_sdk_s3::config::Builder::from(&config);
    if let Some(endpoint) = matches.get_one::<String>("endpoint-url") {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    let client = aws_sdk_s3::Client::from_conf(builder.build());

    Ok(S3Target::new(Box::new(client), options))
}

fn format_mtime(mtime: Option<SystemTime>) -> String {
    mtime
        .and_then(|t| OffsetDateTime::from(t).format(&Rfc3339).ok())
        .unwrap_or_else(|| "-".to_string())
}

fn list(matches: &ArgMatches) -> Result<()> {
    let mut target = new_target(matches, false)?;
    target.open()?;

    if let Some(dir) = matches.get_one::<String>("DIR") {
        target.cwd(dir)?;
    }

    let entries = if matches.get_flag("recursive") {
        target.walk()?
    } else {
        let dir = target.pwd().to_string();
        target
            .get_dir()?
            .into_iter()
            .map(|entry| (dir.clone(), entry))
            .collect()
    };

    for (dir, entry) in entries {
        let kind = if entry.is_dir() { 'd' } else { '-' };
        let path = match util::path::relative_to(target.root(), &dir) {
            "." => entry.name().to_string(),
            rel => util::path::join(rel, entry.name()),
        };
        println!(
            "{} {:>12} {:>25} {}",
            kind,
            entry.size(),
            format_mtime(entry.modified()),
            path
        );
    }

    target.close()?;
    Ok(())
}

fn put(matches: &ArgMatches) -> Result<()> {
    let path = Path::new(matches.get_one::<String>("FILE").context("missing file")?);
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file name: {}", path.display()))?
        .to_string();

    let mut target = new_target(matches, matches.get_flag("dry-run"))?;
    target.open()?;

    if let Some(dir) = matches.get_one::<String>("dir") {
        target.mkdir(dir)?;
        target.cwd(dir)?;
    }

    let mut local =
        File::open(path).with_context(|| format!("failed to open: {}", path.display()))?;
    let metadata = local.metadata()?;

    let mut writable = target.open_writable(&name)?;
    let key = writable.key().to_string();
    io::copy(&mut local, &mut writable)
        .with_context(|| format!("failed to read: {}", path.display()))?;
    writable.close()?;
    info!(bucket = %target.bucket(), key = %key, size = metadata.len(), "uploaded");

    if target.supports_set_mtime() {
        target.set_mtime(&name, metadata.modified()?, metadata.len())?;
    } else {
        warn!(key = %key, "target keeps upload time, local mtime not preserved");
    }

    target.close()?;
    Ok(())
}

//! Command-line interface for the contributions-markdown binary.
//!
//! Every option can also be supplied through the environment variable named
//! in its help text, which is how CI workflows usually configure the tool.
//! The rendered document goes to stdout unless `--output` is given; logs and
//! diagnostics go to stderr.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process,
};

use clap::{Args, Parser};
use contributions_markdown::{
    Error, RawSettings, load_settings, render_markdown, resolve_config, write_error,
    write_markdown,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Render a GitHub user's contribution history as Markdown.
#[derive(Debug, Parser,)]
#[command(name = "contributions-markdown", version, about)]
struct Cli
{
    /// YAML file with default settings; flags and environment variables win.
    #[arg(long = "settings", env = "SETTINGS_PATH", value_name = "PATH")]
    settings: Option<PathBuf,>,

    /// Write the document to this file instead of stdout.
    #[arg(long = "output", env = "OUTPUT_PATH", value_name = "PATH")]
    output: Option<PathBuf,>,

    #[command(flatten)]
    options: SettingsArgs,
}

/// Options mirroring the keys of a settings file.
#[derive(Debug, Args, Default,)]
struct SettingsArgs
{
    /// Header template rendered for every repository.
    #[arg(long, env = "HEADER_FORMAT", value_name = "TEMPLATE")]
    header_format: Option<String,>,

    /// Template wrapping headers of highlighted repositories.
    #[arg(long, env = "HIGHLIGHT_FORMAT", value_name = "TEMPLATE")]
    highlight_format: Option<String,>,

    /// File placed before the report.
    #[arg(long, env = "FILE_BEFORE_PATH", value_name = "PATH")]
    file_before_path: Option<String,>,

    /// File placed after the report.
    #[arg(long, env = "FILE_AFTER_PATH", value_name = "PATH")]
    file_after_path: Option<String,>,

    /// Star count at which a repository is highlighted.
    #[arg(long, env = "MINIMUM_STARS_FOR_HIGHLIGHT", value_name = "COUNT")]
    minimum_stars_for_highlight: Option<String,>,

    /// Width of each contribution window in months (1-12).
    #[arg(long, env = "MONTHS_INTERVAL", value_name = "MONTHS")]
    months_interval: Option<String,>,

    /// Contribution source: REAL, EMPTY, SINGLE or MULTIPLE.
    #[arg(long, env = "GET_CONTRIBUTIONS_FN", value_name = "SOURCE")]
    get_contributions_fn: Option<String,>,

    /// Ordering inside each window: NONE, STARS, COMMITS or NAME.
    #[arg(long, env = "SORT_BY", value_name = "STRATEGY")]
    sort_by: Option<String,>,

    /// Comma-separated repository names to leave out.
    #[arg(long, env = "REPOS_TO_IGNORE", value_name = "NAMES")]
    repos_to_ignore: Option<String,>,

    /// GitHub login whose contributions are rendered.
    #[arg(long, env = "USERNAME", value_name = "LOGIN")]
    username: Option<String,>,

    /// GitHub personal access token.
    #[arg(long, env = "TOKEN", value_name = "TOKEN", hide_env_values = true)]
    token: Option<String,>,
}

impl From<SettingsArgs,> for RawSettings
{
    fn from(args: SettingsArgs,) -> Self
    {
        RawSettings {
            header_format:               args.header_format,
            highlight_format:            args.highlight_format,
            file_before_path:            args.file_before_path,
            file_after_path:             args.file_after_path,
            minimum_stars_for_highlight: args.minimum_stars_for_highlight,
            months_interval:             args.months_interval,
            get_contributions_fn:        args.get_contributions_fn,
            sort_by:                     args.sort_by,
            repos_to_ignore:             args.repos_to_ignore,
            username:                    args.username,
            token:                       args.token,
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),);
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr,),)
        .with(filter,)
        .try_init();
}

/// Executes the pipeline: settings, resolution, fetch, render, write.
///
/// # Errors
///
/// Propagates configuration, GitHub and output errors.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let raw = collect_settings(cli.settings, cli.options,)?;
    let config = resolve_config(&raw,)?;

    let groups = config.source.fetch(config.months_interval,).await?;
    let markdown = render_markdown(&groups, &config,);
    info!("Rendered {} bytes of markdown", markdown.len());

    match cli.output {
        Some(path,) => write_markdown(&path, &markdown,),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            let stdout_path = Path::new("<stdout>",);
            handle.write_all(markdown.as_bytes(),).map_err(|e| write_error(stdout_path, e,),)?;
            handle.flush().map_err(|e| write_error(stdout_path, e,),)
        }
    }
}

fn collect_settings(
    settings: Option<PathBuf,>,
    options: SettingsArgs,
) -> Result<RawSettings, Error,>
{
    let base = match settings {
        Some(path,) => load_settings(&path,)?,
        None => RawSettings::default(),
    };

    Ok(base.merge(options.into(),),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::Path};

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, SettingsArgs, collect_settings};

    #[test]
    fn cli_accepts_flags_for_every_setting()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--output",
            "out/contributions.md",
            "--header-format",
            "{repo_name}",
            "--minimum-stars-for-highlight",
            "500",
            "--get-contributions-fn",
            "MULTIPLE",
            "--sort-by",
            "STARS",
            "--repos-to-ignore",
            "a,b",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(cli.output.as_deref(), Some(Path::new("out/contributions.md")));
        assert_eq!(cli.options.header_format.as_deref(), Some("{repo_name}"));
        assert_eq!(cli.options.minimum_stars_for_highlight.as_deref(), Some("500"));
        assert_eq!(cli.options.get_contributions_fn.as_deref(), Some("MULTIPLE"));
        assert_eq!(cli.options.sort_by.as_deref(), Some("STARS"));
        assert_eq!(cli.options.repos_to_ignore.as_deref(), Some("a,b"));
    }

    #[test]
    fn flags_override_settings_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("settings.yaml",);
        fs::write(&path, "sort_by: NAME\nmonths_interval: 6\n",).expect("failed to write settings",);

        let options = SettingsArgs {
            sort_by: Some("STARS".to_owned(),),
            ..SettingsArgs::default()
        };

        let raw = collect_settings(Some(path,), options,).expect("settings should merge",);
        assert_eq!(raw.sort_by.as_deref(), Some("STARS"));
        assert_eq!(raw.months_interval.as_deref(), Some("6"));
    }

    #[test]
    fn missing_settings_file_is_reported()
    {
        let error = collect_settings(
            Some(Path::new("/nonexistent/settings.yaml",).to_path_buf(),),
            SettingsArgs::default(),
        )
        .expect_err("expected io error",);

        assert!(matches!(error, contributions_markdown::Error::Io { .. }));
    }
}

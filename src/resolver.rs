// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Resolution of raw settings into a validated [`ResolvedConfig`].
//!
//! Every recognized key maps to one typed field with an explicit default and
//! an explicit validator. Blank values are treated as absent, except for the
//! highlight template where a blank value disables highlighting. Numbers are
//! plain decimal digits; signs are rejected.

use std::{collections::BTreeSet, path::Path, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::{
    config::RawSettings,
    error::Error,
    file::read_template,
    source::{DataSource, SOURCE_SELECTORS, SourceSelector, Token},
};

/// Header template used when none is configured.
pub const DEFAULT_HEADER_FORMAT: &str = "[{repo_name}]({repo_url}) - [{commits}]({commits_url}) - \
                                         {primary_language}\n{repo_description}";
/// Highlight template used when none is configured.
pub const DEFAULT_HIGHLIGHT_FORMAT: &str = "⭐ {header}";
/// Star threshold used when none is configured.
pub const DEFAULT_MINIMUM_STARS: u64 = 1000;
/// Window width used when none is configured.
pub const DEFAULT_MONTHS_INTERVAL: u32 = 12;
/// GitHub rejects contribution ranges longer than a year.
const MAX_MONTHS_INTERVAL: u32 = 12;

static GITHUB_LOGIN: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,38}$",).expect("valid GitHub login pattern",)
},);

/// Ordering applied to repositories inside each window. All orderings are
/// stable, so ties keep the order reported by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub enum SortStrategy
{
    /// Keep source order.
    #[default]
    None,
    /// Most starred first.
    Stars,
    /// Most commits first.
    Commits,
    /// Alphabetical by name, byte-wise.
    Name,
}

impl SortStrategy
{
    /// Names accepted by [`SortStrategy::parse`].
    pub const NAMES: [&'static str; 4] = ["NONE", "STARS", "COMMITS", "NAME"];

    /// Parses a strategy name, ignoring ASCII case.
    pub fn parse(value: &str,) -> Option<Self,>
    {
        match value.to_ascii_uppercase().as_str() {
            "NONE" => Some(Self::None,),
            "STARS" => Some(Self::Stars,),
            "COMMITS" => Some(Self::Commits,),
            "NAME" => Some(Self::Name,),
            _ => None,
        }
    }
}

/// Fully defaulted configuration consumed by the renderer and the source.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ResolvedConfig
{
    /// Template rendered for every repository.
    pub header_template:      String,
    /// Template wrapping the header of highlighted repositories; `None`
    /// disables highlighting.
    pub highlight_template:   Option<String,>,
    /// Text placed once before the report.
    pub preamble:             Option<String,>,
    /// Text placed once after the report.
    pub postamble:            Option<String,>,
    /// Inclusive star threshold for highlighting.
    pub minimum_stars:        u64,
    /// Ordering inside each window.
    pub sort:                 SortStrategy,
    /// Repository names omitted from the report, matched exactly.
    pub ignored_repositories: BTreeSet<String,>,
    /// Where contributions come from.
    pub source:               DataSource,
    /// Width of each contribution window in months.
    pub months_interval:      u32,
}

/// Rendering defaults with the [`DataSource::Empty`] source.
///
/// Every field except `source` matches what [`resolve_config`] produces for
/// blank settings. The real GitHub source needs credentials, so it cannot be
/// a default here.
impl Default for ResolvedConfig
{
    fn default() -> Self
    {
        Self {
            header_template:      DEFAULT_HEADER_FORMAT.to_owned(),
            highlight_template:   Some(DEFAULT_HIGHLIGHT_FORMAT.to_owned(),),
            preamble:             None,
            postamble:            None,
            minimum_stars:        DEFAULT_MINIMUM_STARS,
            sort:                 SortStrategy::None,
            ignored_repositories: BTreeSet::new(),
            source:               DataSource::Empty,
            months_interval:      DEFAULT_MONTHS_INTERVAL,
        }
    }
}

/// Validates `raw` and fills in defaults.
///
/// Preamble and postamble paths are read eagerly so the renderer only ever
/// sees text.
///
/// # Errors
///
/// Returns [`Error::Validation`] for malformed numbers, unknown selectors,
/// or missing GitHub credentials, and [`Error::Io`] when a template file
/// cannot be read.
///
/// # Examples
///
/// ```
/// use contributions_markdown::{RawSettings, SortStrategy, resolve_config};
///
/// let raw = RawSettings {
///     get_contributions_fn: Some("SINGLE".to_owned(),),
///     sort_by: Some("stars".to_owned(),),
///     repos_to_ignore: Some("dotfiles, scratch".to_owned(),),
///     ..RawSettings::default()
/// };
/// let config = resolve_config(&raw,)?;
/// assert_eq!(config.sort, SortStrategy::Stars);
/// assert!(config.ignored_repositories.contains("scratch"));
///
/// let invalid = RawSettings {
///     minimum_stars_for_highlight: Some("asd".to_owned(),),
///     ..raw
/// };
/// assert!(resolve_config(&invalid,).is_err());
/// # Ok::<(), contributions_markdown::Error>(())
/// ```
pub fn resolve_config(raw: &RawSettings,) -> Result<ResolvedConfig, Error,>
{
    let header_template =
        present(&raw.header_format,).unwrap_or(DEFAULT_HEADER_FORMAT,).to_owned();

    let highlight_template = match raw.highlight_format.as_deref() {
        None => Some(DEFAULT_HIGHLIGHT_FORMAT.to_owned(),),
        Some(value,) if value.trim().is_empty() => None,
        Some(value,) => Some(value.to_owned(),),
    };

    let preamble = present(&raw.file_before_path,)
        .map(|path| read_template(Path::new(path,),),)
        .transpose()?;
    let postamble = present(&raw.file_after_path,)
        .map(|path| read_template(Path::new(path,),),)
        .transpose()?;

    let minimum_stars = present(&raw.minimum_stars_for_highlight,)
        .map(|value| parse_number::<u64,>(value, "MINIMUM_STARS_FOR_HIGHLIGHT",),)
        .transpose()?
        .unwrap_or(DEFAULT_MINIMUM_STARS,);

    let months_interval = present(&raw.months_interval,)
        .map(parse_months_interval,)
        .transpose()?
        .unwrap_or(DEFAULT_MONTHS_INTERVAL,);

    let sort = present(&raw.sort_by,)
        .map(|value| {
            SortStrategy::parse(value.trim(),).ok_or_else(|| {
                Error::validation(format!(
                    "SORT_BY must be one of {}, got '{value}'",
                    SortStrategy::NAMES.join(", ")
                ),)
            },)
        },)
        .transpose()?
        .unwrap_or_default();

    let ignored_repositories = present(&raw.repos_to_ignore,)
        .map(parse_ignore_list,)
        .unwrap_or_default();

    let source = resolve_source(raw,)?;

    let config = ResolvedConfig {
        header_template,
        highlight_template,
        preamble,
        postamble,
        minimum_stars,
        sort,
        ignored_repositories,
        source,
        months_interval,
    };
    debug!(
        "Resolved configuration: source={:?}, sort={:?}, minimum_stars={}, ignored={}",
        config.source,
        config.sort,
        config.minimum_stars,
        config.ignored_repositories.len()
    );

    Ok(config,)
}

fn present(value: &Option<String,>,) -> Option<&str,>
{
    value.as_deref().filter(|text| !text.trim().is_empty(),)
}

fn parse_number<T,>(value: &str, field: &str,) -> Result<T, Error,>
where
    T: std::str::FromStr,
{
    let invalid =
        || Error::validation(format!("{field} must be a non-negative integer, got '{value}'"),);
    let digits = value.trim();
    if !digits.bytes().all(|byte| byte.is_ascii_digit(),) {
        return Err(invalid(),);
    }
    digits.parse::<T,>().map_err(|_| invalid(),)
}

fn parse_months_interval(value: &str,) -> Result<u32, Error,>
{
    let months = parse_number::<u32,>(value, "MONTHS_INTERVAL",)?;
    if months == 0 || months > MAX_MONTHS_INTERVAL {
        return Err(Error::validation(format!(
            "MONTHS_INTERVAL must be between 1 and {MAX_MONTHS_INTERVAL}, got {months}"
        ),),);
    }
    Ok(months,)
}

fn parse_ignore_list(value: &str,) -> BTreeSet<String,>
{
    value
        .split(',',)
        .map(str::trim,)
        .filter(|name| !name.is_empty(),)
        .map(str::to_owned,)
        .collect()
}

fn resolve_source(raw: &RawSettings,) -> Result<DataSource, Error,>
{
    let selector = match present(&raw.get_contributions_fn,) {
        None => SourceSelector::Real,
        Some(value,) => SourceSelector::parse(value.trim(),).ok_or_else(|| {
            Error::validation(format!(
                "GET_CONTRIBUTIONS_FN must be one of {}, got '{value}'",
                SOURCE_SELECTORS.join(", ")
            ),)
        },)?,
    };

    match selector {
        SourceSelector::Real => {
            let username = present(&raw.username,)
                .map(str::trim,)
                .ok_or_else(|| Error::validation("USERNAME is required to fetch contributions",),)?;
            if !GITHUB_LOGIN.is_match(username,) {
                return Err(Error::validation(format!(
                    "USERNAME '{username}' is not a valid GitHub login"
                ),),);
            }
            let token = present(&raw.token,)
                .ok_or_else(|| Error::validation("TOKEN is required to fetch contributions",),)?;

            Ok(DataSource::Github {
                username: username.to_owned(),
                token:    Token::new(token.trim(),),
            },)
        }
        SourceSelector::Empty => Ok(DataSource::Empty,),
        SourceSelector::Single => Ok(DataSource::SingleYear,),
        SourceSelector::Multiple => Ok(DataSource::MultipleYears,),
    }
}

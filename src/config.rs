// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Raw, string-valued settings as supplied by users.
//!
//! Values arrive from a YAML settings file, CLI flags or environment
//! variables and are kept as unvalidated strings until
//! [`resolve_config`](crate::resolve_config) turns them into a
//! [`ResolvedConfig`](crate::ResolvedConfig).

use std::{fs, path::Path};

use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::debug;

use crate::error::{Error, io_error};

/// Sparse settings document. Every field is optional.
///
/// # Examples
///
/// ```
/// use contributions_markdown::parse_settings;
///
/// let yaml = r#"
/// minimum_stars_for_highlight: "500"
/// repos_to_ignore: "dotfiles, scratch"
/// "#;
/// let settings = parse_settings(yaml,).expect("valid settings",);
/// assert_eq!(settings.minimum_stars_for_highlight.as_deref(), Some("500"));
/// assert!(settings.header_format.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize,)]
#[serde(deny_unknown_fields)]
pub struct RawSettings
{
    /// Template rendered for every repository.
    #[serde(default)]
    pub header_format:               Option<String,>,
    /// Template wrapping headers of popular repositories.
    #[serde(default)]
    pub highlight_format:            Option<String,>,
    /// File whose content is placed before the report.
    #[serde(default)]
    pub file_before_path:            Option<String,>,
    /// File whose content is placed after the report.
    #[serde(default)]
    pub file_after_path:             Option<String,>,
    /// Star count at which a repository is highlighted.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub minimum_stars_for_highlight: Option<String,>,
    /// Width of each contribution window in months.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub months_interval:             Option<String,>,
    /// Contribution source selector.
    #[serde(default)]
    pub get_contributions_fn:        Option<String,>,
    /// Ordering applied to repositories within a window.
    #[serde(default)]
    pub sort_by:                     Option<String,>,
    /// Comma-separated repository names omitted from the report.
    #[serde(default)]
    pub repos_to_ignore:             Option<String,>,
    /// GitHub login whose contributions are fetched.
    #[serde(default)]
    pub username:                    Option<String,>,
    /// Personal access token used for the GitHub API.
    #[serde(default)]
    pub token:                       Option<String,>,
}

impl RawSettings
{
    /// Overlays `overrides` on top of `self`; present override values win.
    pub fn merge(self, overrides: RawSettings,) -> RawSettings
    {
        RawSettings {
            header_format:               overrides.header_format.or(self.header_format,),
            highlight_format:            overrides.highlight_format.or(self.highlight_format,),
            file_before_path:            overrides.file_before_path.or(self.file_before_path,),
            file_after_path:             overrides.file_after_path.or(self.file_after_path,),
            minimum_stars_for_highlight: overrides
                .minimum_stars_for_highlight
                .or(self.minimum_stars_for_highlight,),
            months_interval:             overrides.months_interval.or(self.months_interval,),
            get_contributions_fn:        overrides
                .get_contributions_fn
                .or(self.get_contributions_fn,),
            sort_by:                     overrides.sort_by.or(self.sort_by,),
            repos_to_ignore:             overrides.repos_to_ignore.or(self.repos_to_ignore,),
            username:                    overrides.username.or(self.username,),
            token:                       overrides.token.or(self.token,),
        }
    }
}

/// Accepts unquoted YAML numbers for numeric settings while keeping them as
/// strings for the resolver to validate.
fn scalar_as_string<'de, D,>(deserializer: D,) -> Result<Option<String,>, D::Error,>
where
    D: Deserializer<'de,>,
{
    match Option::<serde_yaml::Value,>::deserialize(deserializer,)? {
        None | Some(serde_yaml::Value::Null,) => Ok(None,),
        Some(serde_yaml::Value::String(value,),) => Ok(Some(value,),),
        Some(serde_yaml::Value::Number(value,),) => Ok(Some(value.to_string(),),),
        Some(other,) => {
            Err(de::Error::custom(format!("expected a number or string, found {other:?}"),),)
        }
    }
}

/// Parses a YAML settings document.
///
/// An empty document yields [`RawSettings::default`].
///
/// # Errors
///
/// Returns [`Error::Parse`] when the YAML is malformed or contains unknown
/// keys.
pub fn parse_settings(contents: &str,) -> Result<RawSettings, Error,>
{
    if contents.trim().is_empty() {
        return Ok(RawSettings::default(),);
    }

    let settings = serde_yaml::from_str(contents,)?;
    Ok(settings,)
}

/// Reads and parses a YAML settings file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Parse`]
/// when its content is not a valid settings document.
pub fn load_settings(path: &Path,) -> Result<RawSettings, Error,>
{
    debug!("Reading settings from {}", path.display());
    let contents = fs::read_to_string(path,).map_err(|source| io_error(path, source,),)?;
    parse_settings(&contents,)
}

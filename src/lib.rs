//! Renders a GitHub user's cross-repository contribution history as Markdown.
//!
//! The pipeline has three stages: raw string settings are resolved into a
//! validated [`ResolvedConfig`], contribution windows are fetched from the
//! configured [`DataSource`], and [`render_markdown`] turns both into the
//! final document. Only the GitHub source performs I/O; resolution and
//! rendering are deterministic.

mod config;
mod error;
mod file;
mod github;
mod model;
mod render;
mod resolver;
mod retry;
mod source;
mod template;

pub use config::{RawSettings, load_settings, parse_settings};
pub use error::{Error, io_error, write_error};
pub use file::{read_template, write_markdown};
pub use model::{ContributionYearGroup, RepositoryContribution};
pub use render::{NO_DESCRIPTION, NO_PRIMARY_LANGUAGE, pluralize_commits, render_markdown};
pub use resolver::{
    DEFAULT_HEADER_FORMAT, DEFAULT_HIGHLIGHT_FORMAT, DEFAULT_MINIMUM_STARS,
    DEFAULT_MONTHS_INTERVAL, ResolvedConfig, SortStrategy, resolve_config,
};
pub use retry::{RetryPolicy, retry_with_backoff};
pub use source::{DataSource, SOURCE_SELECTORS, SourceSelector, Token};
pub use template::{Placeholder, substitute};

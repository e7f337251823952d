// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Markdown rendering of contribution windows.
///
/// Rendering never fails: configuration is validated beforehand and absent
/// optional fields fall back to literal text.
use tracing::debug;

use crate::{
    model::{ContributionYearGroup, RepositoryContribution},
    resolver::{ResolvedConfig, SortStrategy},
    template::{Placeholder, substitute},
};

/// Rendered in place of a missing primary language.
pub const NO_PRIMARY_LANGUAGE: &str = "no primary language";
/// Rendered in place of a missing description.
pub const NO_DESCRIPTION: &str = "no description";

const SECTION_SEPARATOR: &str = "\n\n";

/// Renders `groups` into the final document.
///
/// Windows are emitted in input order; windows left empty after filtering
/// are omitted. When no window has content the result is empty, even if a
/// preamble or postamble is configured.
///
/// # Examples
///
/// ```
/// use contributions_markdown::{ResolvedConfig, render_markdown};
///
/// let markdown = render_markdown(&[], &ResolvedConfig::default(),);
/// assert!(markdown.is_empty());
/// ```
pub fn render_markdown(groups: &[ContributionYearGroup], config: &ResolvedConfig,) -> String
{
    let blocks: Vec<String,> =
        groups.iter().filter_map(|group| render_group(group, config,),).collect();

    debug!("Rendered {} of {} contribution windows", blocks.len(), groups.len());

    if blocks.is_empty() {
        return String::new();
    }

    let mut sections: Vec<&str,> = Vec::with_capacity(blocks.len() + 2,);
    if let Some(preamble,) = config.preamble.as_deref() {
        sections.push(preamble,);
    }
    sections.extend(blocks.iter().map(String::as_str,),);
    if let Some(postamble,) = config.postamble.as_deref() {
        sections.push(postamble,);
    }

    sections.join(SECTION_SEPARATOR,)
}

/// Renders one window, or `None` when nothing survives filtering.
fn render_group(group: &ContributionYearGroup, config: &ResolvedConfig,) -> Option<String,>
{
    let repositories = select_repositories(&group.repositories, config,);
    if repositories.is_empty() {
        return None;
    }

    let entries: Vec<String,> = repositories
        .into_iter()
        .map(|repository| format!("### {}", render_header(repository, config)),)
        .collect();

    Some(format!(
        "## {}\n\n<details>\n\n{}\n\n</details>",
        group.range_label(),
        entries.join(SECTION_SEPARATOR,)
    ),)
}

/// Applies the ignore list and the configured ordering.
fn select_repositories<'a,>(
    repositories: &'a [RepositoryContribution],
    config: &ResolvedConfig,
) -> Vec<&'a RepositoryContribution,>
{
    let mut selected: Vec<&RepositoryContribution,> = repositories
        .iter()
        .filter(|repository| !config.ignored_repositories.contains(&repository.name,),)
        .collect();

    match config.sort {
        SortStrategy::None => {}
        SortStrategy::Stars => selected.sort_by(|a, b| b.stars.cmp(&a.stars,),),
        SortStrategy::Commits => selected.sort_by(|a, b| b.commits.cmp(&a.commits,),),
        SortStrategy::Name => selected.sort_by(|a, b| a.name.cmp(&b.name,),),
    }

    selected
}

/// Substitutes the header template and applies the highlight wrap.
fn render_header(repository: &RepositoryContribution, config: &ResolvedConfig,) -> String
{
    let header = substitute(&config.header_template, |placeholder| match placeholder {
        Placeholder::Commits => Some(pluralize_commits(repository.commits,),),
        Placeholder::CommitsUrl => Some(repository.commits_url.clone(),),
        Placeholder::RepoName => Some(repository.name.clone(),),
        Placeholder::RepoUrl => Some(repository.url.clone(),),
        Placeholder::PrimaryLanguage => Some(
            repository.primary_language.clone().unwrap_or_else(|| NO_PRIMARY_LANGUAGE.to_owned(),),
        ),
        Placeholder::RepoDescription => {
            Some(repository.description.clone().unwrap_or_else(|| NO_DESCRIPTION.to_owned(),),)
        }
        Placeholder::Header => None,
    },);

    match config.highlight_template.as_deref() {
        Some(highlight,) if repository.stars >= config.minimum_stars => {
            substitute(highlight, |placeholder| {
                (placeholder == Placeholder::Header).then(|| header.clone(),)
            },)
        }
        _ => header,
    }
}

/// Formats a commit count, singular only for exactly one commit.
pub fn pluralize_commits(count: u64,) -> String
{
    if count == 1 { "1 commit".to_owned() } else { format!("{count} commits") }
}

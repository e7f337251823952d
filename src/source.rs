// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Closed set of contribution sources selected at configuration time.
//!
//! The GitHub variant performs network requests; the fixture variants return
//! fixed data so the full pipeline can be exercised without credentials.

use std::fmt;

use chrono::NaiveDate;
use tracing::info;

use crate::{
    error::Error,
    github,
    model::{ContributionYearGroup, RepositoryContribution},
};

/// Personal access token whose `Debug` output never reveals the secret.
#[derive(Clone, PartialEq, Eq,)]
pub struct Token(String,);

impl Token
{
    /// Wraps a raw token value.
    pub fn new(value: impl Into<String,>,) -> Self
    {
        Self(value.into(),)
    }

    /// Returns the raw token for authenticating API clients.
    pub fn expose(&self,) -> &str
    {
        &self.0
    }
}

impl fmt::Debug for Token
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str("Token(***)",)
    }
}

/// Selects where contribution data comes from.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum DataSource
{
    /// Live data from the GitHub GraphQL API.
    Github
    {
        /// Login whose contributions are fetched.
        username: String,
        /// Token used to authenticate requests.
        token:    Token,
    },
    /// Fixture without any contributions.
    Empty,
    /// Fixture with a single window.
    SingleYear,
    /// Fixture with several windows, one of them empty.
    MultipleYears,
}

/// Selector names accepted by [`SourceSelector::parse`], in display order.
pub const SOURCE_SELECTORS: [&str; 4] = ["REAL", "EMPTY", "SINGLE", "MULTIPLE"];

/// Parsed `GET_CONTRIBUTIONS_FN` value, before credentials are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum SourceSelector
{
    /// GitHub API.
    Real,
    /// [`DataSource::Empty`].
    Empty,
    /// [`DataSource::SingleYear`].
    Single,
    /// [`DataSource::MultipleYears`].
    Multiple,
}

impl SourceSelector
{
    /// Parses a selector name; matching is exact.
    pub fn parse(value: &str,) -> Option<Self,>
    {
        match value {
            "REAL" => Some(Self::Real,),
            "EMPTY" => Some(Self::Empty,),
            "SINGLE" => Some(Self::Single,),
            "MULTIPLE" => Some(Self::Multiple,),
            _ => None,
        }
    }
}

impl DataSource
{
    /// Fetches contribution windows, oldest first.
    ///
    /// # Errors
    ///
    /// Only the GitHub variant fails, with [`Error::Service`] when the API
    /// rejects the request or returns malformed data.
    pub async fn fetch(&self, months_interval: u32,) -> Result<Vec<ContributionYearGroup,>, Error,>
    {
        let groups = match self {
            Self::Github {
                username,
                token,
            } => github::fetch_contributions(username, token, months_interval,).await?,
            Self::Empty => Vec::new(),
            Self::SingleYear => single_year_fixture(),
            Self::MultipleYears => multiple_years_fixture(),
        };

        info!(
            "Fetched {} contribution windows with {} repositories",
            groups.len(),
            groups.iter().map(|group| group.repositories.len(),).sum::<usize>()
        );

        Ok(groups,)
    }
}

fn date(year: i32, month: u32, day: u32,) -> NaiveDate
{
    NaiveDate::from_ymd_opt(year, month, day,).expect("valid fixture date",)
}

fn single_year_fixture() -> Vec<ContributionYearGroup,>
{
    vec![ContributionYearGroup {
        start:        date(2019, 7, 10,),
        end:          date(2020, 7, 10,),
        repositories: vec![
            RepositoryContribution {
                name:             "First repo".to_owned(),
                url:              "https://www.google.com".to_owned(),
                commits:          123,
                commits_url:      "https://www.youtube.com".to_owned(),
                primary_language: Some("Python".to_owned(),),
                stars:            10,
                description:      Some("It's a cool repo".to_owned(),),
            },
            RepositoryContribution {
                name:             "second-repo".to_owned(),
                url:              "https://www.fast.com".to_owned(),
                commits:          1,
                commits_url:      "https://github.com".to_owned(),
                primary_language: None,
                stars:            1000,
                description:      None,
            },
        ],
    }]
}

fn multiple_years_fixture() -> Vec<ContributionYearGroup,>
{
    let mut groups = single_year_fixture();
    groups.push(ContributionYearGroup {
        start:        date(2020, 7, 10,),
        end:          date(2021, 7, 10,),
        repositories: Vec::new(),
    },);
    groups.push(ContributionYearGroup {
        start:        date(2021, 7, 10,),
        end:          date(2022, 7, 10,),
        repositories: vec![RepositoryContribution {
            name:             "fourth-repo".to_owned(),
            url:              "https://www.github.com/microsoft/vscode".to_owned(),
            commits:          600,
            commits_url:      "https://www.github.com/microsoft".to_owned(),
            primary_language: None,
            stars:            500,
            description:      None,
        }],
    },);
    groups
}

#[cfg(test)]
mod tests
{
    use super::{DataSource, SourceSelector, Token};

    #[test]
    fn token_debug_is_redacted()
    {
        let source = DataSource::Github {
            username: "octocat".to_owned(),
            token:    Token::new("ghp_secret",),
        };

        let debug = format!("{source:?}");
        assert!(debug.contains("octocat"));
        assert!(!debug.contains("ghp_secret"));
    }

    #[test]
    fn selector_matching_is_exact()
    {
        assert_eq!(SourceSelector::parse("MULTIPLE"), Some(SourceSelector::Multiple));
        assert_eq!(SourceSelector::parse("multiple"), None);
        assert_eq!(SourceSelector::parse("INVALID"), None);
    }

    #[tokio::test]
    async fn empty_fixture_has_no_groups()
    {
        let groups = DataSource::Empty.fetch(12,).await.expect("fixture never fails",);
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn multiple_fixture_is_chronological()
    {
        let groups = DataSource::MultipleYears.fetch(12,).await.expect("fixture never fails",);

        assert_eq!(groups.len(), 3);
        assert!(groups.windows(2,).all(|pair| pair[0].end <= pair[1].start));
        assert!(groups[1].repositories.is_empty());
        assert_eq!(groups[2].repositories[0].name, "fourth-repo");
    }

    #[tokio::test]
    async fn fixture_windows_carry_their_dates()
    {
        let groups = DataSource::MultipleYears.fetch(12,).await.expect("fixture never fails",);
        let labels: Vec<String,> = groups.iter().map(|group| group.range_label(),).collect();

        assert_eq!(labels, vec![
            "2019-07-10 -> 2020-07-10",
            "2020-07-10 -> 2021-07-10",
            "2021-07-10 -> 2022-07-10",
        ]);
    }
}

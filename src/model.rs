// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Normalized contribution records consumed by the renderer.
//!
//! Sources produce these values once per invocation; the renderer only reads
//! them and reorders references, it never mutates a record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Contributions made within one date window, oldest window first.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use contributions_markdown::ContributionYearGroup;
///
/// let group = ContributionYearGroup {
///     start:        NaiveDate::from_ymd_opt(2019, 7, 10,).expect("valid date",),
///     end:          NaiveDate::from_ymd_opt(2020, 7, 10,).expect("valid date",),
///     repositories: Vec::new(),
/// };
/// assert_eq!(group.range_label(), "2019-07-10 -> 2020-07-10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ContributionYearGroup
{
    /// First day of the window.
    pub start:        NaiveDate,
    /// Last day of the window.
    pub end:          NaiveDate,
    /// Repositories in the order reported by the source.
    #[serde(default)]
    pub repositories: Vec<RepositoryContribution,>,
}

impl ContributionYearGroup
{
    /// Returns the `start -> end` heading label with ISO-8601 dates.
    pub fn range_label(&self,) -> String
    {
        format!("{} -> {}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

/// One repository's commit summary inside a [`ContributionYearGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RepositoryContribution
{
    /// Display name used in headings and matched by the ignore list.
    pub name:             String,
    /// Repository home page.
    pub url:              String,
    /// Number of commits authored in the window.
    pub commits:          u64,
    /// Link to the commit history of the window.
    pub commits_url:      String,
    /// Primary language reported by GitHub, if any.
    #[serde(default)]
    pub primary_language: Option<String,>,
    /// Stargazer count used for highlighting and sorting.
    #[serde(default)]
    pub stars:            u64,
    /// Repository description, if any.
    #[serde(default)]
    pub description:      Option<String,>,
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;

    use super::{ContributionYearGroup, RepositoryContribution};

    #[test]
    fn range_label_pads_months_and_days()
    {
        let group = ContributionYearGroup {
            start:        NaiveDate::from_ymd_opt(2021, 1, 2,).expect("valid date",),
            end:          NaiveDate::from_ymd_opt(2022, 1, 2,).expect("valid date",),
            repositories: Vec::new(),
        };

        assert_eq!(group.range_label(), "2021-01-02 -> 2022-01-02");
    }

    #[test]
    fn optional_fields_default_when_absent_from_json()
    {
        let json = r#"{
            "name": "repo",
            "url": "https://github.com/octocat/repo",
            "commits": 3,
            "commits_url": "https://github.com/octocat/repo/commits"
        }"#;

        let record: RepositoryContribution =
            serde_json::from_str(json,).expect("record should deserialize",);
        assert_eq!(record.primary_language, None);
        assert_eq!(record.description, None);
        assert_eq!(record.stars, 0);
    }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Commit contributions fetched from the GitHub GraphQL API.
///
/// The contributions collection only accepts ranges of at most one year, so
/// the account lifetime is split into windows of `months_interval` months
/// walking backwards from today. Each window is requested separately.
use chrono::{DateTime, Months, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use masterror::AppError;
use octocrab::Octocrab;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    error::Error,
    model::{ContributionYearGroup, RepositoryContribution},
    retry::{RetryPolicy, retry_with_backoff},
    source::Token,
};

const ACCOUNT_QUERY: &str = r"
query($login: String!) {
  user(login: $login) {
    createdAt
  }
}";

const CONTRIBUTIONS_QUERY: &str = r"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      commitContributionsByRepository(maxRepositories: 100) {
        contributions {
          totalCount
        }
        repository {
          name
          url
          description
          stargazerCount
          primaryLanguage {
            name
          }
        }
      }
    }
  }
}";

#[derive(Debug, Deserialize,)]
struct GraphqlResponse<T,>
{
    data:   Option<T,>,
    #[serde(default)]
    errors: Vec<GraphqlError,>,
}

#[derive(Debug, Deserialize,)]
struct GraphqlError
{
    message: String,
}

#[derive(Debug, Deserialize,)]
struct UserData<T,>
{
    user: Option<T,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct Account
{
    created_at: DateTime<Utc,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ContributionsUser
{
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection
{
    commit_contributions_by_repository: Vec<RepositoryCommits,>,
}

#[derive(Debug, Deserialize,)]
struct RepositoryCommits
{
    contributions: TotalCount,
    repository:    RepositoryNode,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct TotalCount
{
    total_count: u64,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode
{
    name:             String,
    url:              String,
    description:      Option<String,>,
    stargazer_count:  u64,
    primary_language: Option<Language,>,
}

#[derive(Debug, Deserialize,)]
struct Language
{
    name: String,
}

/// Fetches every contribution window of `username`, oldest first.
///
/// # Errors
///
/// Returns [`Error::Service`] when the client cannot be built, the API keeps
/// failing after retries, reports GraphQL errors, or the user does not exist.
pub async fn fetch_contributions(
    username: &str,
    token: &Token,
    months_interval: u32,
) -> Result<Vec<ContributionYearGroup,>, Error,>
{
    let octocrab = Octocrab::builder().personal_token(token.expose().to_owned(),).build().map_err(|e| {
        AppError::unauthorized(format!("failed to initialize GitHub client: {e}"),)
    },)?;
    let policy = RetryPolicy::default();

    let account: Account = query_user(
        &octocrab,
        &policy,
        &format!("account lookup for {username}"),
        json!({ "query": ACCOUNT_QUERY, "variables": { "login": username } }),
    )
    .await?;

    let today = Utc::now().date_naive();
    let windows = plan_windows(account.created_at.date_naive(), today, months_interval,)?;
    info!("Fetching {} contribution windows for {}", windows.len(), username);

    let pb = ProgressBar::new(windows.len() as u64,);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {pos}/{len} {msg}",)
            .map_err(|e| AppError::internal(format!("invalid progress template: {e}"),),)?,
    );

    let mut groups = Vec::with_capacity(windows.len(),);
    for (start, end,) in windows {
        pb.set_message(format!("{start} -> {end}"),);
        debug!("Requesting contributions for {} between {} and {}", username, start, end);
        let (from, to,) = graphql_range(start, end,);

        let user: ContributionsUser = query_user(
            &octocrab,
            &policy,
            &format!("contributions of {username} for {start} -> {end}"),
            json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": {
                    "login": username,
                    "from": from,
                    "to": to,
                }
            }),
        )
        .await?;

        groups.push(to_group(username, start, end, user.contributions_collection,),);
        pb.inc(1,);
    }
    pb.finish_and_clear();

    groups.reverse();
    Ok(groups,)
}

async fn query_user<T,>(
    octocrab: &Octocrab,
    policy: &RetryPolicy,
    operation_name: &str,
    payload: serde_json::Value,
) -> Result<T, Error,>
where
    T: DeserializeOwned,
{
    let response: GraphqlResponse<UserData<T,>,> =
        retry_with_backoff(policy, operation_name, || {
            let octocrab = octocrab.clone();
            let payload = payload.clone();
            async move {
                octocrab
                    .graphql::<GraphqlResponse<UserData<T,>,>,>(&payload,)
                    .await
                    .map_err(|e| AppError::service(format!("GitHub GraphQL request failed: {e}"),),)
            }
        },)
        .await?;

    unwrap_user(response,)
}

fn unwrap_user<T,>(response: GraphqlResponse<UserData<T,>,>,) -> Result<T, Error,>
{
    if !response.errors.is_empty() {
        let messages: Vec<&str,> =
            response.errors.iter().map(|error| error.message.as_str(),).collect();
        return Err(Error::service(format!("GitHub GraphQL errors: {}", messages.join("; ")),),);
    }

    response
        .data
        .and_then(|data| data.user,)
        .ok_or_else(|| Error::service("GitHub user not found",),)
}

/// Splits `[created, today]` into windows of `months` months ending today,
/// newest first. Both dates of a window are included and consecutive windows
/// never share a day. The oldest window is the first one reaching back to or
/// before `created`.
fn plan_windows(
    created: NaiveDate,
    today: NaiveDate,
    months: u32,
) -> Result<Vec<(NaiveDate, NaiveDate,),>, Error,>
{
    if months == 0 {
        return Err(Error::validation("months interval must be at least 1",),);
    }

    let out_of_bounds =
        |date: NaiveDate| Error::service(format!("date range around {date} is out of bounds"),);

    let mut windows = Vec::new();
    let mut end = today;

    loop {
        let start = end
            .checked_sub_months(Months::new(months,),)
            .and_then(|date| date.succ_opt(),)
            .ok_or_else(|| out_of_bounds(end,),)?;
        windows.push((start, end,),);
        if start <= created {
            break;
        }
        end = start.pred_opt().ok_or_else(|| out_of_bounds(start,),)?;
    }

    Ok(windows,)
}

/// GraphQL `from`/`to` arguments covering whole days from `start` to `end`.
fn graphql_range(start: NaiveDate, end: NaiveDate,) -> (String, String,)
{
    (
        format!("{}T00:00:00Z", start.format("%Y-%m-%d")),
        format!("{}T23:59:59Z", end.format("%Y-%m-%d")),
    )
}

fn to_group(
    username: &str,
    start: NaiveDate,
    end: NaiveDate,
    collection: ContributionsCollection,
) -> ContributionYearGroup
{
    let repositories = collection
        .commit_contributions_by_repository
        .into_iter()
        .map(|entry| {
            let repository = entry.repository;
            let commits_url = format!(
                "{}/commits?author={}&since={}&until={}",
                repository.url,
                username,
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d"),
            );
            RepositoryContribution {
                name: repository.name,
                url: repository.url,
                commits: entry.contributions.total_count,
                commits_url,
                primary_language: repository.primary_language.map(|language| language.name,),
                stars: repository.stargazer_count,
                description: repository.description.filter(|text| !text.trim().is_empty(),),
            }
        },)
        .collect();

    ContributionYearGroup {
        start,
        end,
        repositories,
    }
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;

    use super::{
        Account, ContributionsUser, GraphqlResponse, UserData, graphql_range, plan_windows,
        to_group, unwrap_user,
    };
    use crate::Error;

    fn date(year: i32, month: u32, day: u32,) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(year, month, day,).expect("valid date",)
    }

    #[test]
    fn plans_windows_back_to_account_creation()
    {
        let windows =
            plan_windows(date(2020, 3, 1,), date(2022, 7, 10,), 12,).expect("windows planned",);

        assert_eq!(windows, vec![
            (date(2021, 7, 11,), date(2022, 7, 10,)),
            (date(2020, 7, 11,), date(2021, 7, 10,)),
            (date(2019, 7, 11,), date(2020, 7, 10,)),
        ]);
    }

    #[test]
    fn plans_single_window_for_recent_accounts()
    {
        let windows =
            plan_windows(date(2022, 6, 1,), date(2022, 7, 10,), 6,).expect("windows planned",);
        assert_eq!(windows, vec![(date(2022, 1, 11,), date(2022, 7, 10,))]);
    }

    #[test]
    fn rejects_zero_month_windows()
    {
        assert!(plan_windows(date(2022, 6, 1,), date(2022, 7, 10,), 0,).is_err());
    }

    #[test]
    fn newest_window_includes_today()
    {
        let today = date(2022, 7, 10,);
        let windows = plan_windows(date(2020, 3, 1,), today, 12,).expect("windows planned",);
        let (from, to,) = graphql_range(windows[0].0, windows[0].1,);

        assert_eq!(from, "2021-07-11T00:00:00Z");
        assert_eq!(to, "2022-07-10T23:59:59Z");
    }

    #[test]
    fn consecutive_windows_do_not_overlap()
    {
        let windows =
            plan_windows(date(2015, 1, 1,), date(2022, 2, 28,), 5,).expect("windows planned",);

        for pair in windows.windows(2,) {
            let (newer, older,) = (pair[0], pair[1],);
            assert_eq!(older.1.succ_opt(), Some(newer.0));
            let (_, older_to,) = graphql_range(older.0, older.1,);
            let (newer_from, _,) = graphql_range(newer.0, newer.1,);
            assert!(older_to < newer_from);
        }
    }

    #[test]
    fn maps_contributions_response_into_group()
    {
        let json = r#"{
            "data": { "user": { "contributionsCollection": {
                "commitContributionsByRepository": [{
                    "contributions": { "totalCount": 4 },
                    "repository": {
                        "name": "hello-world",
                        "url": "https://github.com/octocat/hello-world",
                        "description": "",
                        "stargazerCount": 42,
                        "primaryLanguage": { "name": "Rust" }
                    }
                }]
            } } }
        }"#;
        let response: GraphqlResponse<UserData<ContributionsUser,>,> =
            serde_json::from_str(json,).expect("response should deserialize",);
        let user = unwrap_user(response,).expect("user present",);

        let group =
            to_group("octocat", date(2021, 7, 10,), date(2022, 7, 10,), user.contributions_collection,);
        let record = &group.repositories[0];

        assert_eq!(record.name, "hello-world");
        assert_eq!(record.commits, 4);
        assert_eq!(record.stars, 42);
        assert_eq!(record.primary_language.as_deref(), Some("Rust"));
        assert_eq!(record.description, None);
        assert_eq!(
            record.commits_url,
            "https://github.com/octocat/hello-world/commits?author=octocat&since=2021-07-10&until=2022-07-10"
        );
    }

    #[test]
    fn graphql_errors_become_service_errors()
    {
        let json = r#"{ "data": null, "errors": [{ "message": "Bad credentials" }] }"#;
        let response: GraphqlResponse<UserData<Account,>,> =
            serde_json::from_str(json,).expect("response should deserialize",);

        let error = unwrap_user(response,).expect_err("errors reported",);
        assert!(matches!(error, Error::Service { ref message } if message.contains("Bad credentials")));
    }

    #[test]
    fn missing_user_is_reported()
    {
        let json = r#"{ "data": { "user": null } }"#;
        let response: GraphqlResponse<UserData<Account,>,> =
            serde_json::from_str(json,).expect("response should deserialize",);

        assert!(unwrap_user(response,).is_err());
    }
}

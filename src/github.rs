//! The recent-commits fragment, taken from the GitHub public events API.

use crate::client::Client;
use crate::config::Config;
use crate::fetch::Result;
use crate::fragment::Fragment;
use chrono::NaiveDate;
use serde::Deserialize;

fn events_url(user: &str) -> String {
    format!("https://api.github.com/users/{}/events/public", user)
}

#[derive(Deserialize)]
struct Event {
    repo: Repo,
    created_at: String,

    #[serde(default)]
    payload: Payload,
}

#[derive(Deserialize)]
struct Repo {
    name: String,
}

#[derive(Deserialize, Default)]
struct Payload {
    #[serde(default)]
    commits: Vec<Commit>,
}

#[derive(Deserialize)]
struct Commit {
    sha: String,
    message: String,

    // Whether the API considers the commit distinct is passed through as-is;
    // we don't try to interpret the flag locally.
    #[serde(default)]
    distinct: bool,
}

pub fn fragment(client: &Client, config: &Config) -> Result<Fragment> {
    let text = client
        .get(&events_url(&config.github_user))
        .header("Accept", "application/vnd.github.v3+json")
        .send()?
        .error_for_status()?
        .text()?;
    let events: Vec<Event> = serde_json::from_str(&text)?;
    Ok(Fragment::Html(render(
        &commit_rows(&events)?,
        &config.github_user,
    )))
}

/// One row of the rendered commits table.
struct CommitRow {
    repo: String,
    date: String,
    url: String,
    message: String,
}

/// Flattens the event stream into individual distinct commits, preserving the
/// API's arrival order (already reverse-chronological).
fn commit_rows(events: &[Event]) -> Result<Vec<CommitRow>> {
    let mut rows = Vec::new();
    for event in events {
        let date = event_date(&event.created_at)?;
        for commit in &event.payload.commits {
            if !commit.distinct {
                continue;
            }
            rows.push(CommitRow {
                repo: event.repo.name.clone(),
                date: date.clone(),
                url: format!(
                    "https://github.com/{}/commits/{}",
                    event.repo.name, commit.sha
                ),
                message: commit.message.clone(),
            });
        }
    }
    Ok(rows)
}

/// Formats the date part of an event's `created_at` timestamp, e.g.
/// `2021-03-14T09:26:53Z` becomes `Mar 14, 2021`.
fn event_date(created_at: &str) -> Result<String> {
    let date_part = created_at.split('T').next().unwrap_or(created_at);
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")?;
    Ok(date.format("%b %d, %Y").to_string())
}

fn render(rows: &[CommitRow], user: &str) -> String {
    let (latest, earlier) = rows.split_at(rows.len().min(3));
    let tbody = latest
        .iter()
        .map(|row| {
            format!(
                r#"<tr>
<td><a href="https://github.com/{repo}">{repo}</a></td>
<td>{date}</td>
<td><a href="{url}">{message}</a></td>
</tr>
"#,
                repo = row.repo,
                date = row.date,
                url = row.url,
                message = row.message,
            )
        })
        .collect::<Vec<String>>()
        .join("\n");
    format!(
        r#"<p>
<span class="latest">Recent commits</span>
<div class="table-container">
<table>
<thead>
<th>Repo</th>
<th>Date</th>
<th>Message</th>
</thead>
<tbody>
{tbody}
</tbody>
</table>
</div>
<span class="latest">...and <a href="https://github.com/{user}#js-contribution-activity">{count} more recent commits</a>.</span>
</p>
"#,
        tbody = tbody,
        user = user,
        count = earlier.len(),
    )
}

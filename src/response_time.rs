use crate::clock::Clock;
use crate::error::ResponseTimeError;
use crate::issue::CommentGetter;
use crate::types::{Comment, Issue, ResponseTime};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Resolves the first reply on `issue` and measures how long it took to arrive.
pub async fn first_response_time(
    issue: &dyn CommentGetter,
    repo: &str,
    clock: &dyn Clock,
    ignored_users: &HashSet<String>,
) -> Result<ResponseTime, ResponseTimeError> {
    let reply = issue.first_reply(ignored_users).await?;
    response_time(issue.issue(), repo, reply.as_ref(), clock)
}

/// Minutes from issue creation to `reply`, or to now if nobody has replied yet.
///
/// Rounded to the nearest whole minute, half away from zero, and clamped at zero.
pub fn response_time(
    issue: &Issue,
    repo: &str,
    reply: Option<&Comment>,
    clock: &dyn Clock,
) -> Result<ResponseTime, ResponseTimeError> {
    let (replied_at, reply_author) = match reply {
        Some(comment) => (
            parse_timestamp(&comment.created_at).map_err(ResponseTimeError::ReplyTime)?,
            comment.author().to_string(),
        ),
        None => {
            tracing::debug!(repo, number = issue.number, "No reply yet, measuring until now");
            (clock.now(), String::new())
        }
    };
    let created_at = parse_timestamp(&issue.created_at).map_err(ResponseTimeError::IssueTime)?;

    let elapsed = replied_at - created_at;
    let minutes = (elapsed.num_milliseconds() as f64 / 60_000.0).round().max(0.0);

    Ok(ResponseTime {
        repo: repo.to_string(),
        number: issue.number,
        author: issue.author().to_string(),
        reply_author,
        minutes,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|t| t.with_timezone(&Utc))
}

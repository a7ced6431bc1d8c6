use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::Id;
use super::poll::Poll;

/// Share of `total_votes` that `votes` represents, in percent.
///
/// An empty poll reports 0.0 for every option rather than dividing by zero.
pub fn percentage(votes: u32, total_votes: u32) -> f64 {
    if total_votes > 0 {
        votes as f64 / total_votes as f64 * 100.0
    } else {
        0.0
    }
}

/// Tally of a poll at a point in time, one row per option in option order.
#[derive(Serialize, Debug)]
pub struct PollResult<'a> {
    pub poll_id: Id,
    pub question: &'a str,
    pub evaluated_at: DateTime<Utc>,

    pub total_votes: u32,
    pub tally: Vec<OptionTally<'a>>,
}

#[derive(Serialize, Debug)]
pub struct OptionTally<'a> {
    pub option_id: Id,
    pub text: &'a str,
    pub votes: u32,
    pub percentage: f64,
}

impl<'a> PollResult<'a> {
    pub fn evaluate(poll: &'a Poll) -> PollResult<'a> {
        let total_votes = poll.total_votes();

        let tally = poll
            .options
            .iter()
            .map(|option| OptionTally {
                option_id: option.id,
                text: &option.text,
                votes: option.votes,
                percentage: percentage(option.votes, total_votes),
            })
            .collect();

        PollResult {
            poll_id: poll.id,
            question: &poll.question,
            evaluated_at: Utc::now(),
            total_votes,
            tally,
        }
    }
}

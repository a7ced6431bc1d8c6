use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::id::Id;
use crate::error::{self, ValidationError};

/// Minimum number of non-blank options a poll must carry at creation.
pub const MIN_OPTIONS: usize = 2;

/// A question with a fixed, ordered set of options. The option list is set
/// at creation and never grows or shrinks afterwards; only the per-option
/// vote counters change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: Id,
    pub question: String,
    pub options: Vec<PollOption>,
    /// Id of the creating user.
    pub created_by: Id,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: Id,
    pub text: String,
    pub votes: u32,
}

impl PollOption {
    pub const fn new(id: Id, text: String) -> PollOption {
        PollOption {
            id,
            text,
            votes: 0,
        }
    }
}

impl Poll {
    pub fn new(
        id: Id,
        created_by: Id,
        CreatePollSettings { question, options }: CreatePollSettings,
    ) -> Poll {
        Poll {
            id,
            question,
            options: options
                .into_iter()
                .enumerate()
                .map(|(index, text)| PollOption::new(Id::from_index(index), text))
                .collect(),
            created_by,
        }
    }

    /// Total number of votes cast across all options of this poll.
    pub fn total_votes(&self) -> u32 {
        self.options.iter().map(|option| option.votes).sum()
    }

    pub fn option(&self, option_id: Id) -> Option<&PollOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    pub fn option_mut(&mut self, option_id: Id) -> Option<&mut PollOption> {
        self.options.iter_mut().find(|option| option.id == option_id)
    }
}

/// Poll-creation input exactly as supplied by the caller.
pub struct UnvalidatedCreatePollSettings {
    pub question: String,
    pub options: Vec<String>,
}

/// Poll-creation input that has passed validation: the question is non-empty
/// and at least [`MIN_OPTIONS`] option texts survived the blank filter.
pub struct CreatePollSettings {
    pub question: String,
    pub options: Vec<String>,
}

impl TryFrom<UnvalidatedCreatePollSettings> for CreatePollSettings {
    type Error = ValidationError;

    fn try_from(settings: UnvalidatedCreatePollSettings) -> Result<CreatePollSettings, Self::Error> {
        let UnvalidatedCreatePollSettings { question, options } = settings;

        if question.is_empty() {
            return Err(error::poll_question_empty());
        }

        // blank options are discarded, not errors; the texts that survive
        // are kept exactly as supplied, untrimmed
        let supplied = options.len();
        let options: Vec<String> = options
            .into_iter()
            .filter(|text| !text.trim().is_empty())
            .collect();
        if options.len() < supplied {
            debug!("discarded {} blank poll option(s)", supplied - options.len());
        }

        if options.len() < MIN_OPTIONS {
            return Err(error::poll_too_few_options(options.len()));
        }

        Ok(CreatePollSettings { question, options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(question: &str, options: &[&str]) -> UnvalidatedCreatePollSettings {
        UnvalidatedCreatePollSettings {
            question: String::from(question),
            options: options.iter().map(|text| String::from(*text)).collect(),
        }
    }

    #[test]
    fn blank_options_are_discarded_not_fatal() {
        let validated =
            CreatePollSettings::try_from(settings("Favorite color?", &["Red", "", "   ", "Blue"]))
                .unwrap();
        assert_eq!(validated.options, vec!["Red", "Blue"]);
    }

    #[test]
    fn surviving_texts_are_kept_untrimmed() {
        let validated =
            CreatePollSettings::try_from(settings("Favorite color?", &["  Red ", "Blue"])).unwrap();
        assert_eq!(validated.options, vec!["  Red ", "Blue"]);
    }

    #[test]
    fn fewer_than_two_surviving_options_rejected() {
        assert!(CreatePollSettings::try_from(settings("Favorite color?", &["Red"])).is_err());
        assert!(CreatePollSettings::try_from(settings("Favorite color?", &["Red", " "])).is_err());
        assert!(CreatePollSettings::try_from(settings("Favorite color?", &["", "  ", ""])).is_err());
    }

    #[test]
    fn only_the_empty_question_is_rejected() {
        assert!(CreatePollSettings::try_from(settings("", &["Red", "Blue"])).is_err());
        assert!(CreatePollSettings::try_from(settings("   ", &["Red", "Blue"])).is_ok());
    }

    #[test]
    fn new_poll_assigns_sequential_option_ids() {
        let validated =
            CreatePollSettings::try_from(settings("Favorite color?", &["Red", "Blue"])).unwrap();
        let poll = Poll::new(Id(1), Id(3), validated);

        assert_eq!(poll.id, 1);
        assert_eq!(poll.created_by, 3);
        assert_eq!(poll.options.len(), 2);
        assert_eq!(poll.options[0].id, 1);
        assert_eq!(poll.options[0].text, "Red");
        assert_eq!(poll.options[0].votes, 0);
        assert_eq!(poll.options[1].id, 2);
        assert_eq!(poll.options[1].text, "Blue");
        assert_eq!(poll.options[1].votes, 0);
    }

    #[test]
    fn total_votes_sums_all_options() {
        let validated =
            CreatePollSettings::try_from(settings("Favorite color?", &["Red", "Blue", "Green"]))
                .unwrap();
        let mut poll = Poll::new(Id(1), Id(1), validated);
        assert_eq!(poll.total_votes(), 0);

        poll.option_mut(Id(1)).unwrap().votes = 2;
        poll.option_mut(Id(3)).unwrap().votes = 1;
        assert_eq!(poll.total_votes(), 3);
        assert!(poll.option(Id(4)).is_none());
    }
}

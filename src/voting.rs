mod id;
mod poll;
mod tally;
mod user;

pub use id::Id;
pub use poll::{CreatePollSettings, Poll, PollOption, UnvalidatedCreatePollSettings, MIN_OPTIONS};
pub use tally::{percentage, OptionTally, PollResult};
pub use user::User;

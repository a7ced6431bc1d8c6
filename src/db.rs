use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::password;
use crate::error::{self, Error};
use crate::store::Store;
use crate::voting::{CreatePollSettings, Id, Poll, UnvalidatedCreatePollSettings, User};

/// Domain operations over an injected [`Store`], constructed once per
/// process and shared by reference.
///
/// Every mutating operation is one `read`, an in-memory change, and one
/// `write` of the full state. There is no locking across operations: two
/// concurrent votes on the same poll can race and one increment can be
/// lost. Individual writes are still atomic, so a racing reader sees the
/// old state or the new one, never a torn document.
pub struct Db {
    store: Arc<dyn Store>,
}

impl Db {
    pub fn new(store: Arc<dyn Store>) -> Db {
        Db { store }
    }

    /// Register a new account. The clear-text password is hashed before it
    /// touches the store; the email must not already be registered
    /// (case-sensitive comparison).
    pub async fn add_user(&self, email: &str, password: &str) -> Result<User, Error> {
        if email.is_empty() || password.is_empty() {
            return Err(error::credentials_missing().into());
        }

        let mut db = self.store.read().await?;
        if db.users.iter().any(|user| user.email == email) {
            return Err(error::user_email_taken(email).into());
        }

        let user = User::new(
            Id::from_index(db.users.len()),
            String::from(email),
            password::hash(password),
        );
        db.users.push(user.clone());
        self.store.write(&db).await?;

        info!("added user {} <{}>", user.id, user.email);
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let db = self.store.read().await?;
        Ok(db.users.into_iter().find(|user| user.email == email))
    }

    pub async fn get_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.store.read().await?.users)
    }

    /// Create a poll from a question and candidate option texts. Validation
    /// happens before the store is touched: a blank-filtered option list
    /// shorter than two entries or an empty question never reaches disk.
    pub async fn create_poll(
        &self,
        question: &str,
        options: Vec<String>,
        created_by: Id,
    ) -> Result<Poll, Error> {
        let settings = CreatePollSettings::try_from(UnvalidatedCreatePollSettings {
            question: String::from(question),
            options,
        })?;

        let mut db = self.store.read().await?;
        let poll = Poll::new(Id::from_index(db.polls.len()), created_by, settings);
        db.polls.push(poll.clone());
        self.store.write(&db).await?;

        info!("created poll {} with {} options", poll.id, poll.options.len());
        Ok(poll)
    }

    pub async fn get_polls(&self) -> Result<Vec<Poll>, Error> {
        Ok(self.store.read().await?.polls)
    }

    pub async fn get_poll_by_id(&self, id: Id) -> Result<Option<Poll>, Error> {
        let db = self.store.read().await?;
        Ok(db.polls.into_iter().find(|poll| poll.id == id))
    }

    /// Cast one vote. A missing poll or option is not-found and leaves the
    /// store untouched; otherwise exactly one counter goes up by one and
    /// the updated poll is returned.
    pub async fn vote_on_poll(&self, poll_id: Id, option_id: Id) -> Result<Poll, Error> {
        let mut db = self.store.read().await?;

        let poll = match db.polls.iter_mut().find(|poll| poll.id == poll_id) {
            Some(poll) => poll,
            None => {
                debug!("vote on missing poll {poll_id}");
                return Err(error::poll_not_found(poll_id).into());
            }
        };
        let option = match poll.option_mut(option_id) {
            Some(option) => option,
            None => {
                debug!("vote on missing option {option_id} of poll {poll_id}");
                return Err(error::poll_option_not_found(poll_id, option_id).into());
            }
        };

        option.votes += 1;
        let updated = poll.clone();
        self.store.write(&db).await?;

        info!("recorded vote for option {option_id} of poll {poll_id}");
        Ok(updated)
    }
}

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{self, AuthError};
use crate::voting::{Id, User};

/// How long a session stays valid unless revoked first.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Opaque login token handed to the presentation layer. The token is the
/// only thing a client ever holds; all claims stay server-side.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionToken(pub Uuid);

impl SessionToken {
    pub fn new() -> SessionToken {
        SessionToken(Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        SessionToken::new()
    }
}

impl Display for SessionToken {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verified claims for a logged-in user, resolved from a token by the
/// registry rather than parsed out of anything the client sent.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: Id,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// In-process session registry. Sessions are process state, not persisted
/// state: restarting the process logs everyone out.
pub struct Sessions {
    ttl: Duration,
    active: Mutex<HashMap<SessionToken, Session>>,
}

impl Sessions {
    pub fn new() -> Sessions {
        Sessions::with_ttl(Duration::hours(DEFAULT_TTL_HOURS))
    }

    pub fn with_ttl(ttl: Duration) -> Sessions {
        Sessions {
            ttl,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh session for a user whose credentials have already been
    /// checked.
    pub fn issue(&self, user: &User) -> Session {
        let now = Utc::now();
        let session = Session {
            token: SessionToken::new(),
            user_id: user.id,
            email: user.email.clone(),
            issued_at: now,
            expires_at: now + self.ttl,
        };

        // a poisoned lock still holds a structurally sound map
        let mut active = self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        active.insert(session.token, session.clone());
        session
    }

    /// Resolve a token to its claims. Unknown tokens fail; expired ones fail
    /// and are evicted.
    pub fn verify(&self, token: &SessionToken) -> Result<Session, AuthError> {
        let mut active = self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let session = match active.get(token) {
            Some(session) => session,
            None => return Err(error::session_unknown()),
        };
        if session.expires_at <= Utc::now() {
            active.remove(token);
            return Err(error::session_expired());
        }

        Ok(session.clone())
    }

    /// Drop a session. Returns whether one was active for the token.
    pub fn revoke(&self, token: &SessionToken) -> bool {
        let mut active = self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        active.remove(token).is_some()
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Sessions::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User::new(
            Id(1),
            String::from("ada@example.com"),
            String::from("sha256$aa$bb"),
        )
    }

    #[test]
    fn issued_session_carries_the_user_claims() {
        let sessions = Sessions::new();
        let session = sessions.issue(&ada());

        assert_eq!(session.user_id, 1);
        assert_eq!(session.email, "ada@example.com");
        assert!(session.expires_at > session.issued_at);

        let verified = sessions.verify(&session.token).unwrap();
        assert_eq!(verified.user_id, session.user_id);
        assert_eq!(verified.email, session.email);
    }

    #[test]
    fn unknown_token_fails_verification() {
        let sessions = Sessions::new();
        assert!(sessions.verify(&SessionToken::new()).is_err());
    }

    #[test]
    fn expired_session_fails_and_is_evicted() {
        let sessions = Sessions::with_ttl(Duration::hours(-1));
        let session = sessions.issue(&ada());

        let expired = sessions.verify(&session.token);
        assert_eq!(
            expired.unwrap_err().to_string(),
            "Auth error: session has expired"
        );

        // evicted on first failed check, unknown afterwards
        let unknown = sessions.verify(&session.token);
        assert_eq!(
            unknown.unwrap_err().to_string(),
            "Auth error: session token is not recognized"
        );
    }

    #[test]
    fn revoke_invalidates_the_token() {
        let sessions = Sessions::new();
        let session = sessions.issue(&ada());

        assert!(sessions.revoke(&session.token));
        assert!(sessions.verify(&session.token).is_err());
        assert!(!sessions.revoke(&session.token));
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let sessions = Sessions::new();
        let first = sessions.issue(&ada());
        let second = sessions.issue(&ada());

        assert_ne!(first.token, second.token);
        assert!(sessions.verify(&first.token).is_ok());
        assert!(sessions.verify(&second.token).is_ok());
    }
}

pub mod password;
mod session;

pub use session::{Session, SessionToken, Sessions, DEFAULT_TTL_HOURS};

use tracing::{info, warn};

use crate::db::Db;
use crate::error::{self, Error};

/// Authenticate credentials against the stored users and issue a session.
///
/// Missing fields are a validation error, an unknown email is not-found,
/// and a failed password check is an auth error.
pub async fn login(
    db: &Db,
    sessions: &Sessions,
    email: &str,
    password: &str,
) -> Result<Session, Error> {
    if email.is_empty() || password.is_empty() {
        return Err(error::credentials_missing().into());
    }

    let user = match db.find_user_by_email(email).await? {
        Some(user) => user,
        None => {
            warn!("rejected login for {email}: unknown email");
            return Err(error::user_not_found(email).into());
        }
    };

    if !password::verify(password, &user.password) {
        warn!("rejected login for {}: password mismatch", user.email);
        return Err(error::password_mismatch().into());
    }

    let session = sessions.issue(&user);
    info!("user {} logged in", user.id);
    Ok(session)
}

/// Revoke a session. Returns whether one was active for the token.
pub fn logout(sessions: &Sessions, token: &SessionToken) -> bool {
    let revoked = sessions.revoke(token);
    if revoked {
        info!("session revoked");
    }
    revoked
}

//! Server-side session management.
//!
//! A session maps an opaque token (carried in a cookie) to the
//! [`Principal`] that logged in. Sessions expire after an absolute
//! lifetime or after a period of inactivity. Failed logins are counted per
//! username and lock the username out for a while.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::verify_password;
use crate::db::User;

/// Session-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Invalid credentials (wrong username or password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username is locked due to too many failed attempts.
    #[error("account locked for {0} seconds")]
    AccountLocked(u64),

    /// Session has expired.
    #[error("session expired")]
    SessionExpired,

    /// Session not found.
    #[error("session not found")]
    SessionNotFound,
}

/// Default session duration (24 hours).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

/// Maximum login attempts before lockout.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Lockout duration (5 minutes).
pub const LOCKOUT_DURATION_SECS: u64 = 5 * 60;

/// The authenticated caller attached to a session.
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at.clone(),
        }
    }
}

/// Authentication session representing a logged-in user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Unique session token (UUID v4).
    pub token: String,
    /// The logged-in principal.
    pub principal: Principal,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session expires (absolute timeout).
    pub expires_at: DateTime<Utc>,
    last_activity: Instant,
}

impl AuthSession {
    /// Create a new session with the default duration.
    pub fn new(principal: Principal) -> Self {
        Self::with_duration(principal, Duration::from_secs(DEFAULT_SESSION_DURATION_SECS))
    }

    /// Create a new session with a custom duration.
    pub fn with_duration(principal: Principal, duration: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(duration).unwrap_or_default();

        Self {
            token: Uuid::new_v4().to_string(),
            principal,
            created_at: now,
            expires_at,
            last_activity: Instant::now(),
        }
    }

    /// Check if the session has expired (absolute timeout).
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check if the session has been idle too long.
    pub fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.last_activity.elapsed() >= idle_timeout
    }

    /// Check if the session is still valid (not expired and not idle).
    pub fn is_valid(&self, idle_timeout: Duration) -> bool {
        !self.is_expired() && !self.is_idle(idle_timeout)
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Result of a login attempt rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitResult {
    /// Login attempt is allowed.
    Allowed,
    /// Username is locked for the specified duration.
    Locked(Duration),
}

/// Failed login counter keyed by lowercase username.
#[derive(Debug)]
pub struct LoginLimiter {
    attempts: HashMap<String, Vec<Instant>>,
    max_attempts: u32,
    window: Duration,
    lockout: Duration,
}

impl Default for LoginLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginLimiter {
    /// Create a new limiter with default settings.
    pub fn new() -> Self {
        Self::with_config(MAX_LOGIN_ATTEMPTS, LOCKOUT_DURATION_SECS, LOCKOUT_DURATION_SECS)
    }

    /// Create a limiter with custom settings.
    pub fn with_config(max_attempts: u32, window_secs: u64, lockout_secs: u64) -> Self {
        Self {
            attempts: HashMap::new(),
            max_attempts,
            window: Duration::from_secs(window_secs),
            lockout: Duration::from_secs(lockout_secs),
        }
    }

    /// Check if a login attempt is allowed for the given username.
    pub fn check(&mut self, username: &str) -> LimitResult {
        let now = Instant::now();
        let window = self.window;
        let attempts = self.attempts.entry(username.to_lowercase()).or_default();

        attempts.retain(|t| now.duration_since(*t) < window);

        if attempts.len() >= self.max_attempts as usize {
            if let Some(oldest) = attempts.first() {
                let elapsed = now.duration_since(*oldest);
                if elapsed < self.lockout {
                    return LimitResult::Locked(self.lockout - elapsed);
                }
                attempts.clear();
            }
        }

        LimitResult::Allowed
    }

    /// Record a failed login attempt.
    pub fn record_failure(&mut self, username: &str) {
        let now = Instant::now();
        let window = self.window;
        let attempts = self.attempts.entry(username.to_lowercase()).or_default();

        attempts.retain(|t| now.duration_since(*t) < window);
        attempts.push(now);

        debug!(
            username = %username,
            attempt_count = attempts.len(),
            "Recorded failed login attempt"
        );
    }

    /// Clear all attempts for a username (call on successful login).
    pub fn clear(&mut self, username: &str) {
        self.attempts.remove(&username.to_lowercase());
    }

    /// Drop usernames whose attempts have all aged out.
    pub fn cleanup(&mut self) {
        let now = Instant::now();
        let window = self.window;
        self.attempts.retain(|_, attempts| {
            attempts.retain(|t| now.duration_since(*t) < window);
            !attempts.is_empty()
        });
    }
}

/// Session table keyed by token.
#[derive(Debug)]
pub struct SessionManager {
    sessions: HashMap<String, AuthSession>,
    limiter: LoginLimiter,
    session_duration: Duration,
    idle_timeout: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Create a new session manager with default settings.
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_SESSION_DURATION_SECS, DEFAULT_IDLE_TIMEOUT_SECS)
    }

    /// Create a session manager with a custom lifetime and idle timeout.
    pub fn with_timeouts(duration_secs: u64, idle_timeout_secs: u64) -> Self {
        Self {
            sessions: HashMap::new(),
            limiter: LoginLimiter::new(),
            session_duration: Duration::from_secs(duration_secs),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        }
    }

    /// Refuse a login attempt while the username is locked out.
    pub fn check_login(&mut self, username: &str) -> Result<(), SessionError> {
        if let LimitResult::Locked(remaining) = self.limiter.check(username) {
            warn!(
                username = %username,
                remaining_secs = remaining.as_secs(),
                "Login attempt blocked: username locked"
            );
            return Err(SessionError::AccountLocked(remaining.as_secs().max(1)));
        }
        Ok(())
    }

    /// Count a failed login against the username.
    pub fn record_failed_login(&mut self, username: &str) {
        self.limiter.record_failure(username);
    }

    /// Reset the username's failures and open a session for the user.
    pub fn finish_login(&mut self, user: &User) -> AuthSession {
        self.limiter.clear(&user.username);
        let session = self.create_session(Principal::from(user));

        info!(
            username = %user.username,
            user_id = user.id,
            "Login successful"
        );

        session
    }

    /// Attach a principal to a fresh session and return it.
    pub fn create_session(&mut self, principal: Principal) -> AuthSession {
        let session = AuthSession::with_duration(principal, self.session_duration);
        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Log out a session by token.
    pub fn logout(&mut self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some(session) => {
                info!(user_id = session.principal.id, "Session logged out");
                true
            }
            None => {
                debug!("Logout: session not found");
                false
            }
        }
    }

    /// Look up a session, refresh its activity time and return its principal.
    ///
    /// Invalid sessions are removed.
    pub fn touch_session(&mut self, token: &str) -> Result<Principal, SessionError> {
        let idle_timeout = self.idle_timeout;
        let session = self
            .sessions
            .get_mut(token)
            .ok_or(SessionError::SessionNotFound)?;

        if !session.is_valid(idle_timeout) {
            self.sessions.remove(token);
            return Err(SessionError::SessionExpired);
        }

        session.touch();
        Ok(session.principal.clone())
    }

    /// Remove expired and idle sessions. Returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.sessions.len();
        let idle_timeout = self.idle_timeout;

        self.sessions.retain(|_, s| s.is_valid(idle_timeout));
        self.limiter.cleanup();

        let removed = before - self.sessions.len();
        if removed > 0 {
            debug!(removed, "Cleaned up expired sessions");
        }
        removed
    }

    /// Get the number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Log in against a shared session table.
///
/// `user` is the account looked up by `username`, if any. The table is only
/// locked for the limiter check and for recording the outcome; the Argon2
/// verification runs on the blocking pool with the lock released.
pub async fn login(
    sessions: &Mutex<SessionManager>,
    username: &str,
    password: &str,
    user: Option<User>,
) -> Result<AuthSession, SessionError> {
    sessions.lock().await.check_login(username)?;

    let verified = match user {
        Some(user) => {
            let password = password.to_string();
            let hash = user.password.clone();
            let matched =
                tokio::task::spawn_blocking(move || verify_password(&password, &hash).is_ok())
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "Password verification task failed");
                        false
                    });
            if matched {
                Some(user)
            } else {
                warn!(username = %username, "Login failed: wrong password");
                None
            }
        }
        None => {
            warn!(username = %username, "Login failed: user not found");
            None
        }
    };

    let mut manager = sessions.lock().await;
    match verified {
        Some(user) => Ok(manager.finish_login(&user)),
        None => {
            manager.record_failed_login(username);
            Err(SessionError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use std::thread::sleep;

    fn principal(id: i64, username: &str) -> Principal {
        Principal {
            id,
            username: username.to_string(),
            email: format!("{username}@nate.com"),
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    fn user(id: i64, username: &str, password_hash: &str) -> User {
        User {
            id,
            username: username.to_string(),
            password: password_hash.to_string(),
            email: format!("{username}@nate.com"),
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_principal_from_user_drops_password() {
        let u = user(1, "ssar", "$argon2id$secret");
        let p = Principal::from(&u);

        assert_eq!(p, principal(1, "ssar"));
    }

    #[test]
    fn test_auth_session_new() {
        let session = AuthSession::new(principal(1, "ssar"));

        assert!(!session.token.is_empty());
        assert_eq!(session.principal.id, 1);
        assert!(!session.is_expired());
        assert!(!session.is_idle(Duration::from_secs(300)));
    }

    #[test]
    fn test_auth_session_token_uniqueness() {
        let s1 = AuthSession::new(principal(1, "ssar"));
        let s2 = AuthSession::new(principal(1, "ssar"));

        assert_ne!(s1.token, s2.token);
    }

    #[test]
    fn test_auth_session_zero_duration_is_expired() {
        let session = AuthSession::with_duration(principal(1, "ssar"), Duration::ZERO);
        assert!(session.is_expired());
    }

    #[test]
    fn test_auth_session_touch() {
        let mut session = AuthSession::new(principal(1, "ssar"));
        let idle_timeout = Duration::from_millis(50);

        sleep(Duration::from_millis(60));
        assert!(session.is_idle(idle_timeout));

        session.touch();
        assert!(!session.is_idle(idle_timeout));
    }

    #[test]
    fn test_login_limiter_locks_after_max_attempts() {
        let mut limiter = LoginLimiter::with_config(3, 60, 60);

        assert_eq!(limiter.check("ssar"), LimitResult::Allowed);
        limiter.record_failure("ssar");
        limiter.record_failure("SSAR");
        limiter.record_failure("ssar");

        match limiter.check("Ssar") {
            LimitResult::Locked(duration) => assert!(duration.as_secs() > 0),
            LimitResult::Allowed => panic!("Expected username to be locked"),
        }
    }

    #[test]
    fn test_login_limiter_clear() {
        let mut limiter = LoginLimiter::with_config(3, 60, 60);

        limiter.record_failure("ssar");
        limiter.record_failure("ssar");
        limiter.record_failure("ssar");
        assert!(matches!(limiter.check("ssar"), LimitResult::Locked(_)));

        limiter.clear("SSAR");
        assert_eq!(limiter.check("ssar"), LimitResult::Allowed);
    }

    #[test]
    fn test_login_limiter_cleanup() {
        let mut limiter = LoginLimiter::with_config(3, 1, 1);

        limiter.record_failure("ssar");
        sleep(Duration::from_millis(1100));
        limiter.cleanup();

        assert!(limiter.attempts.is_empty());
    }

    #[tokio::test]
    async fn test_login_success_and_failure() {
        let hash = hash_password("1234").unwrap();
        let ssar = user(1, "ssar", &hash);
        let sessions = Mutex::new(SessionManager::new());

        assert_eq!(
            login(&sessions, "ssar", "wrong", Some(ssar.clone()))
                .await
                .unwrap_err(),
            SessionError::InvalidCredentials
        );
        assert_eq!(
            login(&sessions, "nobody", "1234", None).await.unwrap_err(),
            SessionError::InvalidCredentials
        );

        let session = login(&sessions, "ssar", "1234", Some(ssar)).await.unwrap();
        assert_eq!(session.principal.username, "ssar");

        let mut manager = sessions.lock().await;
        assert_eq!(manager.session_count(), 1);
        assert_eq!(manager.touch_session(&session.token).unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_login_lockout() {
        let hash = hash_password("1234").unwrap();
        let ssar = user(1, "ssar", &hash);
        let sessions = Mutex::new(SessionManager::new());

        for _ in 0..MAX_LOGIN_ATTEMPTS {
            assert!(login(&sessions, "ssar", "wrong", Some(ssar.clone()))
                .await
                .is_err());
        }

        // Even the right password is refused while locked
        assert!(matches!(
            login(&sessions, "ssar", "1234", Some(ssar)).await,
            Err(SessionError::AccountLocked(_))
        ));
    }

    #[tokio::test]
    async fn test_login_releases_table_after_attempt() {
        let hash = hash_password("1234").unwrap();
        let ssar = user(1, "ssar", &hash);
        let sessions = Mutex::new(SessionManager::new());

        let _ = login(&sessions, "ssar", "wrong", Some(ssar.clone())).await;
        assert!(sessions.try_lock().is_ok());

        let session = login(&sessions, "ssar", "1234", Some(ssar)).await.unwrap();
        assert!(sessions.try_lock().is_ok());
        assert_eq!(sessions.lock().await.session_count(), 1);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_session_table_usable_during_verification() {
        let hash = hash_password("1234").unwrap();
        let ssar = user(1, "ssar", &hash);
        let sessions = std::sync::Arc::new(Mutex::new(SessionManager::new()));
        let existing = sessions.lock().await.create_session(principal(2, "cos"));

        let shared = sessions.clone();
        let attempt =
            tokio::spawn(async move { login(&shared, "ssar", "1234", Some(ssar)).await });

        // Other requests keep resolving their sessions while the login runs
        for _ in 0..10 {
            let principal = sessions.lock().await.touch_session(&existing.token).unwrap();
            assert_eq!(principal.username, "cos");
            tokio::task::yield_now().await;
        }

        assert!(attempt.await.unwrap().is_ok());
        assert_eq!(sessions.lock().await.session_count(), 2);
    }

    #[test]
    fn test_session_manager_create_and_logout() {
        let mut manager = SessionManager::new();
        let session = manager.create_session(principal(1, "ssar"));

        assert_eq!(
            manager.touch_session(&session.token).unwrap().username,
            "ssar"
        );
        assert!(manager.logout(&session.token));
        assert!(!manager.logout(&session.token));
        assert_eq!(
            manager.touch_session(&session.token).unwrap_err(),
            SessionError::SessionNotFound
        );
    }

    #[test]
    fn test_session_manager_expired_session_removed() {
        let mut manager = SessionManager::with_timeouts(0, 60);
        let session = manager.create_session(principal(1, "ssar"));

        assert_eq!(
            manager.touch_session(&session.token).unwrap_err(),
            SessionError::SessionExpired
        );
        assert_eq!(manager.session_count(), 0);
    }

    #[test]
    fn test_session_manager_cleanup_expired() {
        let mut manager = SessionManager::with_timeouts(60, 1);
        manager.create_session(principal(1, "ssar"));
        manager.create_session(principal(2, "cos"));

        sleep(Duration::from_millis(1100));
        let keep = manager.create_session(principal(3, "love"));

        assert_eq!(manager.cleanup_expired(), 2);
        assert_eq!(manager.session_count(), 1);
        assert!(manager.touch_session(&keep.token).is_ok());
    }

    #[test]
    fn test_session_error_display() {
        assert_eq!(
            SessionError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(
            SessionError::AccountLocked(300).to_string(),
            "account locked for 300 seconds"
        );
        assert_eq!(SessionError::SessionExpired.to_string(), "session expired");
        assert_eq!(
            SessionError::SessionNotFound.to_string(),
            "session not found"
        );
    }
}

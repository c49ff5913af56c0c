//! Application state management for Gatehouse.
//!
//! This module contains the core `App` struct that holds the current route,
//! the three auth forms, the session, and the API client, plus the actions
//! the screens trigger. Every screen change goes through the router guard;
//! every portal call goes through the API client.

use std::time::Instant;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, CodeKind};
use crate::auth::{CredentialStore, Session, SessionData};
use crate::config::Config;
use crate::router::{self, NavigationTarget, Route, Verdict};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the notice channel.
/// One notice per failed request; 32 is far more than a user can trigger
/// between two event-loop ticks.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input.
/// Portal usernames are short handles; 50 chars covers them with room.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for email input.
/// 254 is the RFC 5321 ceiling for a full address.
const MAX_EMAIL_LENGTH: usize = 254;

/// Emailed verification codes are exactly six digits
const CODE_LENGTH: usize = 6;

/// Password rule enforced at registration and reset (backend mirrors this)
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 20;

/// Seconds between verification-code requests for the same screen.
/// Matches the backend's per-address issue interval.
const ASK_CODE_COOLDOWN_SECS: u64 = 60;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Username,
    Password,
    RememberMe,
    Button,
}

impl LoginFocus {
    /// Get the next field (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::RememberMe,
            LoginFocus::RememberMe => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Username,
        }
    }

    /// Get the previous field (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Username => LoginFocus::Button,
            LoginFocus::Password => LoginFocus::Username,
            LoginFocus::RememberMe => LoginFocus::Password,
            LoginFocus::Button => LoginFocus::RememberMe,
        }
    }
}

/// Register form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterFocus {
    #[default]
    Username,
    Email,
    Code,
    SendCode,
    Password,
    Confirm,
    Button,
}

impl RegisterFocus {
    pub fn next(&self) -> Self {
        match self {
            RegisterFocus::Username => RegisterFocus::Email,
            RegisterFocus::Email => RegisterFocus::Code,
            RegisterFocus::Code => RegisterFocus::SendCode,
            RegisterFocus::SendCode => RegisterFocus::Password,
            RegisterFocus::Password => RegisterFocus::Confirm,
            RegisterFocus::Confirm => RegisterFocus::Button,
            RegisterFocus::Button => RegisterFocus::Username,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            RegisterFocus::Username => RegisterFocus::Button,
            RegisterFocus::Email => RegisterFocus::Username,
            RegisterFocus::Code => RegisterFocus::Email,
            RegisterFocus::SendCode => RegisterFocus::Code,
            RegisterFocus::Password => RegisterFocus::SendCode,
            RegisterFocus::Confirm => RegisterFocus::Password,
            RegisterFocus::Button => RegisterFocus::Confirm,
        }
    }
}

/// The password-reset screen walks two steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetStep {
    /// Confirm the emailed code
    #[default]
    Verify,
    /// Choose the new password
    Renew,
}

/// Forget form focus state; which fields exist depends on the step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForgetFocus {
    #[default]
    Email,
    Code,
    SendCode,
    Password,
    Confirm,
    Button,
}

impl ForgetFocus {
    /// Next field within the given step (wrapping around)
    pub fn next(&self, step: ResetStep) -> Self {
        match step {
            ResetStep::Verify => match self {
                ForgetFocus::Email => ForgetFocus::Code,
                ForgetFocus::Code => ForgetFocus::SendCode,
                ForgetFocus::SendCode => ForgetFocus::Button,
                _ => ForgetFocus::Email,
            },
            ResetStep::Renew => match self {
                ForgetFocus::Password => ForgetFocus::Confirm,
                ForgetFocus::Confirm => ForgetFocus::Button,
                _ => ForgetFocus::Password,
            },
        }
    }

    pub fn prev(&self, step: ResetStep) -> Self {
        match step {
            ResetStep::Verify => match self {
                ForgetFocus::Email => ForgetFocus::Button,
                ForgetFocus::Code => ForgetFocus::Email,
                ForgetFocus::SendCode => ForgetFocus::Code,
                _ => ForgetFocus::SendCode,
            },
            ResetStep::Renew => match self {
                ForgetFocus::Password => ForgetFocus::Button,
                ForgetFocus::Confirm => ForgetFocus::Password,
                _ => ForgetFocus::Confirm,
            },
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
    pub focus: LoginFocus,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub code: String,
    pub password: String,
    pub confirm: String,
    pub focus: RegisterFocus,
    pub error: Option<String>,
    /// When the last verification code was requested from this screen
    pub code_sent_at: Option<Instant>,
}

impl RegisterForm {
    /// Seconds left before another code may be requested
    pub fn code_cooldown_secs(&self) -> Option<u64> {
        cooldown_secs(self.code_sent_at, Instant::now())
    }
}

#[derive(Debug, Default)]
pub struct ForgetForm {
    pub step: ResetStep,
    pub email: String,
    pub code: String,
    pub password: String,
    pub confirm: String,
    pub focus: ForgetFocus,
    pub error: Option<String>,
    pub code_sent_at: Option<Instant>,
}

impl ForgetForm {
    pub fn code_cooldown_secs(&self) -> Option<u64> {
        cooldown_secs(self.code_sent_at, Instant::now())
    }
}

/// Remaining cooldown at `now`, or None once expired (or never started)
fn cooldown_secs(sent_at: Option<Instant>, now: Instant) -> Option<u64> {
    let sent_at = sent_at?;
    let elapsed = now.saturating_duration_since(sent_at).as_secs();
    if elapsed < ASK_CODE_COOLDOWN_SECS {
        Some(ASK_CODE_COOLDOWN_SECS - elapsed)
    } else {
        None
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,

    pub state: AppState,
    /// Current screen; only ever changed through the guard
    pub route: &'static Route,

    pub login: LoginForm,
    pub register: RegisterForm,
    pub forget: ForgetForm,

    /// Generic notices from the HTTP layer, drained into the status bar
    notice_rx: mpsc::Receiver<String>,
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance around an already-loaded config and
    /// session. The caller decides where those come from.
    pub fn new(config: Config, session: Session) -> Result<Self> {
        let (notice_tx, notice_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let mut api = ApiClient::new(config.base_url(), notice_tx)?;
        if let Some(token) = session.token() {
            api.set_token(token.to_string());
            debug!("Token restored from session");
        }

        // Prefill the login form: env vars win, then config, then keychain
        let username = std::env::var("GATEHOUSE_USERNAME")
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();
        let mut password = std::env::var("GATEHOUSE_PASSWORD").unwrap_or_default();
        let mut remember_me = false;
        if password.is_empty() && !username.is_empty() {
            if let Ok(stored) = CredentialStore::get_password(&username) {
                password = stored;
                remember_me = true;
            }
        }

        let focus = if username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };

        Ok(Self {
            config,
            session,
            api,

            state: AppState::Normal,
            route: router::START_ROUTE,

            login: LoginForm {
                username,
                password,
                remember_me,
                focus,
                error: None,
            },
            register: RegisterForm::default(),
            forget: ForgetForm::default(),

            notice_rx,
            status_message: None,
        })
    }

    /// Whether a token is present. Nothing else feeds this decision.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a path (startup deep link, redirects)
    pub fn navigate_to_path(&mut self, path: &str) {
        let route = router::resolve(path);
        self.apply_navigation(NavigationTarget::from_route(route), route);
    }

    /// Navigate to a named screen (in-app switches)
    pub fn navigate_to_name(&mut self, name: &str) {
        let route = router::find(name);
        self.apply_navigation(NavigationTarget::from_route(route), route);
    }

    fn apply_navigation(&mut self, target: NavigationTarget, route: Option<&'static Route>) {
        let destination = match router::check(target, self.is_authenticated()) {
            Verdict::Proceed => route,
            Verdict::Redirect(path) => router::resolve(path),
        };
        let Some(destination) = destination else {
            // Proceed without a matched route cannot come out of the table
            return;
        };
        if destination.name != self.route.name {
            debug!(from = self.route.name, to = destination.name, "Screen change");
            self.route = destination;
            self.reset_entered_screen();
        }
    }

    /// Fresh form state when a screen is entered, like a remounted page
    fn reset_entered_screen(&mut self) {
        match self.route.name {
            "welcome-register" => self.register = RegisterForm::default(),
            "welcome-forget" => self.forget = ForgetForm::default(),
            _ => {}
        }
    }

    // =========================================================================
    // Login / logout
    // =========================================================================

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let username = self.login.username.clone();
        let password = self.login.password.clone();

        if username.is_empty() || password.is_empty() {
            self.login.error = Some("Username and password required".to_string());
            return Ok(());
        }
        self.login.error = None;

        let resp = match self.api.login(&username, &password).await {
            Ok(resp) => resp,
            // Transport failure: the generic notice is already queued
            Err(e) => return Err(e),
        };

        if !resp.is_success() {
            warn!(code = resp.code, "Login rejected");
            self.login.error = Some(non_empty_or(resp.message, "Login failed"));
            return Ok(());
        }
        let Some(grant) = resp.data else {
            self.login.error = Some("Login response carried no session".to_string());
            return Ok(());
        };

        if self.login.remember_me {
            if let Err(e) = CredentialStore::store(&username, &password) {
                warn!(error = %e, "Failed to store credentials");
            }
        } else if let Err(e) = CredentialStore::delete(&username) {
            debug!(error = %e, "No stored credential to delete");
        }

        self.config.last_username = Some(username);
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        self.api.set_token(grant.token.clone());
        self.session.update(SessionData {
            token: grant.token,
            username: grant.username,
            role: grant.role,
            expire: grant.expire,
        });
        if let Err(e) = self.session.save() {
            warn!(error = %e, "Failed to save session");
        }

        self.login.password.clear();
        info!("Login successful");
        self.navigate_to_path(router::AUTHENTICATED_LANDING);
        Ok(())
    }

    /// Log out at the backend, then drop the session
    pub async fn attempt_logout(&mut self) -> Result<()> {
        let resp = match self.api.logout().await {
            Ok(resp) => resp,
            // Keep the session; the user can retry once the portal is back
            Err(e) => return Err(e),
        };

        if !resp.is_success() {
            self.status_message = Some(non_empty_or(resp.message, "Logout failed"));
            return Ok(());
        }

        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session file");
        }
        self.api.clear_token();
        info!("Logged out");
        self.navigate_to_path(router::PUBLIC_LANDING);
        Ok(())
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Submit the registration form
    pub async fn attempt_register(&mut self) -> Result<()> {
        if let Some(problem) = validate_register_form(
            &self.register.username,
            &self.register.email,
            &self.register.code,
            &self.register.password,
            &self.register.confirm,
        ) {
            self.register.error = Some(problem);
            return Ok(());
        }
        self.register.error = None;

        let resp = match self
            .api
            .register(
                &self.register.username,
                &self.register.email,
                &self.register.code,
                &self.register.password,
            )
            .await
        {
            Ok(resp) => resp,
            Err(e) => return Err(e),
        };

        if !resp.is_success() {
            self.register.error = Some(non_empty_or(resp.message, "Registration failed"));
            return Ok(());
        }

        info!("Account registered");
        self.status_message = Some("Account created, please log in".to_string());
        self.navigate_to_path(router::PUBLIC_LANDING);
        Ok(())
    }

    /// Request a verification code for the registration form
    pub async fn request_register_code(&mut self) -> Result<()> {
        if !looks_like_email(&self.register.email) {
            self.register.error = Some("Please enter a valid email address".to_string());
            return Ok(());
        }
        if self.register.code_cooldown_secs().is_some() {
            return Ok(());
        }
        self.register.error = None;

        let email = self.register.email.clone();
        let resp = match self.api.ask_code(&email, CodeKind::Register).await {
            Ok(resp) => resp,
            Err(e) => return Err(e),
        };

        if !resp.is_success() {
            self.register.error = Some(non_empty_or(resp.message, "Could not send the code"));
            return Ok(());
        }
        self.register.code_sent_at = Some(Instant::now());
        self.status_message = Some(format!("Verification code sent to {}", email));
        Ok(())
    }

    // =========================================================================
    // Password reset
    // =========================================================================

    /// Request a verification code for the reset form. The address is checked
    /// against the portal first so typos fail before an email goes out.
    pub async fn request_reset_code(&mut self) -> Result<()> {
        if !looks_like_email(&self.forget.email) {
            self.forget.error = Some("Please enter a valid email address".to_string());
            return Ok(());
        }
        if self.forget.code_cooldown_secs().is_some() {
            return Ok(());
        }
        self.forget.error = None;

        let email = self.forget.email.clone();
        let verify = match self.api.verify_account(&email).await {
            Ok(resp) => resp,
            Err(e) => return Err(e),
        };
        if !verify.is_success() {
            self.forget.error = Some(non_empty_or(verify.message, "No account for that address"));
            return Ok(());
        }

        let resp = match self.api.ask_code(&email, CodeKind::Reset).await {
            Ok(resp) => resp,
            Err(e) => return Err(e),
        };
        if !resp.is_success() {
            self.forget.error = Some(non_empty_or(resp.message, "Could not send the code"));
            return Ok(());
        }
        self.forget.code_sent_at = Some(Instant::now());
        self.status_message = Some(format!("Verification code sent to {}", email));
        Ok(())
    }

    /// Step one: confirm the emailed code
    pub async fn attempt_reset_confirm(&mut self) -> Result<()> {
        if !looks_like_email(&self.forget.email) {
            self.forget.error = Some("Please enter a valid email address".to_string());
            return Ok(());
        }
        if !is_verification_code(&self.forget.code) {
            self.forget.error = Some(format!("Verification code must be {} digits", CODE_LENGTH));
            return Ok(());
        }
        self.forget.error = None;

        let resp = match self
            .api
            .reset_confirm(&self.forget.email, &self.forget.code)
            .await
        {
            Ok(resp) => resp,
            Err(e) => return Err(e),
        };

        if !resp.is_success() {
            self.forget.error = Some(non_empty_or(resp.message, "Code rejected"));
            return Ok(());
        }
        self.forget.step = ResetStep::Renew;
        self.forget.focus = ForgetFocus::Password;
        Ok(())
    }

    /// Step two: set the new password
    pub async fn attempt_reset_password(&mut self) -> Result<()> {
        if let Some(problem) = validate_new_password(&self.forget.password, &self.forget.confirm) {
            self.forget.error = Some(problem);
            return Ok(());
        }
        self.forget.error = None;

        let resp = match self
            .api
            .reset_password(&self.forget.email, &self.forget.code, &self.forget.password)
            .await
        {
            Ok(resp) => resp,
            Err(e) => return Err(e),
        };

        if !resp.is_success() {
            self.forget.error = Some(non_empty_or(resp.message, "Reset failed"));
            return Ok(());
        }

        info!("Password reset completed");
        self.status_message = Some("Password reset, please log in".to_string());
        self.navigate_to_path(router::PUBLIC_LANDING);
        Ok(())
    }

    // =========================================================================
    // Notices
    // =========================================================================

    /// Drain notices queued by the HTTP layer into the status bar
    pub fn poll_notices(&mut self) {
        while let Ok(notice) = self.notice_rx.try_recv() {
            self.status_message = Some(notice);
        }
    }
}

// ============================================================================
// Input character acceptance (used by the key handlers)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted.
/// Limits are in chars, not bytes, so multi-byte input gets the full field.
pub fn can_add_username_char(current: &str, c: char) -> bool {
    current.chars().count() < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current: &str, c: char) -> bool {
    current.chars().count() < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check if an email character should be accepted
pub fn can_add_email_char(current: &str, c: char) -> bool {
    current.chars().count() < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

/// Verification code fields only take digits, up to the code length
pub fn can_add_code_char(current: &str, c: char) -> bool {
    current.chars().count() < CODE_LENGTH && c.is_ascii_digit()
}

// ============================================================================
// Form validation helpers
// ============================================================================

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Loose structural check so obvious typos fail before a request goes out.
/// The portal does the real validation.
fn looks_like_email(s: &str) -> bool {
    if s.is_empty() || s.chars().count() > MAX_EMAIL_LENGTH || s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Exactly six ASCII digits
fn is_verification_code(s: &str) -> bool {
    s.len() == CODE_LENGTH && s.chars().all(|c| c.is_ascii_digit())
}

/// Usernames are letters and digits only, like the portal enforces
fn is_valid_username(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

fn validate_new_password(password: &str, confirm: &str) -> Option<String> {
    let length = password.chars().count();
    if length < PASSWORD_MIN || length > PASSWORD_MAX {
        return Some(format!(
            "Password must be {}-{} characters",
            PASSWORD_MIN, PASSWORD_MAX
        ));
    }
    if password != confirm {
        return Some("Passwords do not match".to_string());
    }
    None
}

/// First problem with the registration form, or None when it can be sent
fn validate_register_form(
    username: &str,
    email: &str,
    code: &str,
    password: &str,
    confirm: &str,
) -> Option<String> {
    if username.is_empty() || email.is_empty() || code.is_empty() || password.is_empty() {
        return Some("All fields are required".to_string());
    }
    if username.chars().count() > MAX_USERNAME_LENGTH || !is_valid_username(username) {
        return Some("Username may only contain letters and digits".to_string());
    }
    if !looks_like_email(email) {
        return Some("Please enter a valid email address".to_string());
    }
    if !is_verification_code(code) {
        return Some(format!("Verification code must be {} digits", CODE_LENGTH));
    }
    validate_new_password(password, confirm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;

    fn test_app() -> App {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(dir.path().to_path_buf());
        let config = Config {
            base_url: Some("http://127.0.0.1:1".to_string()),
            last_username: None,
        };
        App::new(config, session).unwrap()
    }

    fn authenticated_app() -> App {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());
        session.update(SessionData {
            token: "tok".to_string(),
            username: "alice".to_string(),
            role: "user".to_string(),
            expire: Utc::now(),
        });
        let config = Config {
            base_url: Some("http://127.0.0.1:1".to_string()),
            last_username: None,
        };
        App::new(config, session).unwrap()
    }

    #[test]
    fn test_unauthenticated_navigation_stays_public() {
        let mut app = test_app();
        app.navigate_to_path("/index");
        assert_eq!(app.route.name, "welcome-login");

        app.navigate_to_path("/register");
        assert_eq!(app.route.name, "welcome-register");

        app.navigate_to_path("/nowhere");
        assert_eq!(app.route.name, "welcome-login");
    }

    #[test]
    fn test_authenticated_navigation_leaves_welcome() {
        let mut app = authenticated_app();
        app.navigate_to_path("/");
        assert_eq!(app.route.name, "index");

        app.navigate_to_name("welcome-forget");
        assert_eq!(app.route.name, "index");

        app.navigate_to_path("/nowhere");
        assert_eq!(app.route.name, "index");
    }

    #[test]
    fn test_entering_register_screen_resets_its_form() {
        let mut app = test_app();
        app.navigate_to_path("/register");
        app.register.username = "draft".to_string();
        app.register.error = Some("stale".to_string());

        app.navigate_to_path("/");
        app.navigate_to_path("/register");
        assert!(app.register.username.is_empty());
        assert!(app.register.error.is_none());
    }

    #[test]
    fn test_redirect_to_current_screen_keeps_form_state() {
        let mut app = test_app();
        app.navigate_to_path("/register");
        app.register.username = "draft".to_string();

        // Navigating to the screen already shown must not reset its form
        app.navigate_to_path("/register");
        assert_eq!(app.register.username, "draft");
    }

    #[test]
    fn test_cooldown_window() {
        let start = Instant::now();
        assert_eq!(cooldown_secs(None, start), None);
        assert_eq!(cooldown_secs(Some(start), start), Some(60));
        assert_eq!(
            cooldown_secs(Some(start), start + Duration::from_secs(59)),
            Some(1)
        );
        assert_eq!(cooldown_secs(Some(start), start + Duration::from_secs(60)), None);
        assert_eq!(cooldown_secs(Some(start), start + Duration::from_secs(600)), None);
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@example.com"));
        assert!(looks_like_email("first.last@mail.example.co"));
        assert!(!looks_like_email(""));
        assert!(!looks_like_email("nope"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("a@nodot"));
        assert!(!looks_like_email("a@.com")); // empty host
        assert!(!looks_like_email("a@b.")); // empty tld
        assert!(!looks_like_email("a b@example.com"));
        assert!(!looks_like_email("a@@example.com"));
    }

    #[test]
    fn test_verification_code_shape() {
        assert!(is_verification_code("123456"));
        assert!(!is_verification_code("12345"));
        assert!(!is_verification_code("1234567"));
        assert!(!is_verification_code("12345a"));
        assert!(!is_verification_code(""));
    }

    #[test]
    fn test_register_validation_order() {
        assert_eq!(
            validate_register_form("", "", "", "", ""),
            Some("All fields are required".to_string())
        );
        assert_eq!(
            validate_register_form("bad name!", "a@example.com", "123456", "secret1", "secret1"),
            Some("Username may only contain letters and digits".to_string())
        );
        assert_eq!(
            validate_register_form("alice", "bad", "123456", "secret1", "secret1"),
            Some("Please enter a valid email address".to_string())
        );
        assert_eq!(
            validate_register_form("alice", "a@example.com", "12", "secret1", "secret1"),
            Some("Verification code must be 6 digits".to_string())
        );
        assert_eq!(
            validate_register_form("alice", "a@example.com", "123456", "short", "short"),
            Some("Password must be 6-20 characters".to_string())
        );
        assert_eq!(
            validate_register_form("alice", "a@example.com", "123456", "secret1", "secret2"),
            Some("Passwords do not match".to_string())
        );
        assert_eq!(
            validate_register_form("alice", "a@example.com", "123456", "secret1", "secret1"),
            None
        );
    }

    #[test]
    fn test_new_password_rule_bounds() {
        assert!(validate_new_password("12345", "12345").is_some());
        assert!(validate_new_password("123456", "123456").is_none());
        assert!(validate_new_password(&"x".repeat(20), &"x".repeat(20)).is_none());
        assert!(validate_new_password(&"x".repeat(21), &"x".repeat(21)).is_some());
    }

    #[test]
    fn test_input_char_acceptance() {
        assert!(can_add_username_char("", 'a'));
        assert!(!can_add_username_char(&"a".repeat(MAX_USERNAME_LENGTH), 'a'));
        assert!(!can_add_username_char("", '\n'));
        assert!(can_add_password_char("", '!'));
        assert!(can_add_email_char("", '@'));
        assert!(!can_add_email_char("", ' '));
        assert!(can_add_code_char("", '7'));
        assert!(!can_add_code_char("", 'x'));
        assert!(!can_add_code_char("123456", '1'));
    }

    #[test]
    fn test_input_limits_count_chars_not_bytes() {
        // 49 CJK chars are 147 bytes; the 50th char must still fit
        let name = "名".repeat(MAX_USERNAME_LENGTH - 1);
        assert!(can_add_username_char(&name, '字'));
        assert!(!can_add_username_char(&"名".repeat(MAX_USERNAME_LENGTH), '字'));

        // 7 CJK chars are 21 bytes, still inside the 6-20 char rule
        let password = "温".repeat(PASSWORD_MIN + 1);
        assert!(validate_new_password(&password, &password).is_none());
    }

    #[test]
    fn test_focus_cycles_cover_all_fields() {
        let mut focus = LoginFocus::Username;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, LoginFocus::Username);

        let mut focus = RegisterFocus::Username;
        for _ in 0..7 {
            focus = focus.next();
        }
        assert_eq!(focus, RegisterFocus::Username);

        // Forget cycles stay within the fields of their step
        let mut focus = ForgetFocus::Email;
        for _ in 0..4 {
            focus = focus.next(ResetStep::Verify);
            assert!(!matches!(focus, ForgetFocus::Password | ForgetFocus::Confirm));
        }
        let mut focus = ForgetFocus::Password;
        for _ in 0..3 {
            focus = focus.next(ResetStep::Renew);
            assert!(matches!(
                focus,
                ForgetFocus::Password | ForgetFocus::Confirm | ForgetFocus::Button
            ));
        }
    }
}

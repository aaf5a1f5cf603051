use tracing::{info, warn};

use crate::backend::domain::commands::admin::{
    ValidateAdminPasswordCommand, ValidateAdminPasswordResult,
};

/// Environment variable that overrides the admin password.
const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Fallback password when no override is configured.
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Gates the admin dashboard behind a shared password.
///
/// This is UI gating only, not a security boundary: the comparison grants
/// access for the lifetime of the caller's in-memory session. There is no
/// token, no expiry, no lockout, and no attempt counting.
#[derive(Clone)]
pub struct AdminAuthService {
    password: String,
}

impl AdminAuthService {
    /// Create the service from the environment, falling back to the default
    /// password when `ADMIN_PASSWORD` is unset.
    pub fn from_env() -> Self {
        let password = std::env::var(ADMIN_PASSWORD_ENV)
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());
        Self { password }
    }

    /// Create the service with an explicit password (for testing)
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Verify an entered password. The comparison is exact; the entered
    /// value is not normalized.
    pub fn validate_password(
        &self,
        command: ValidateAdminPasswordCommand,
    ) -> ValidateAdminPasswordResult {
        let is_correct = command.password == self.password;

        if is_correct {
            info!("Admin password accepted");
            ValidateAdminPasswordResult {
                success: true,
                message: "Access granted".to_string(),
            }
        } else {
            warn!("Admin password rejected");
            ValidateAdminPasswordResult {
                success: false,
                message: "Invalid password".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_password_grants_access() {
        let service = AdminAuthService::with_password("letmein");

        let result = service.validate_password(ValidateAdminPasswordCommand {
            password: "letmein".to_string(),
        });
        assert!(result.success);
        assert_eq!(result.message, "Access granted");
    }

    #[test]
    fn test_incorrect_password_is_rejected() {
        let service = AdminAuthService::with_password("letmein");

        for wrong in ["", "letmein ", "LETMEIN", "admin123"] {
            let result = service.validate_password(ValidateAdminPasswordCommand {
                password: wrong.to_string(),
            });
            assert!(!result.success, "'{}' should be rejected", wrong);
            assert_eq!(result.message, "Invalid password");
        }
    }

    #[test]
    fn test_default_password_constant() {
        let service = AdminAuthService::with_password(DEFAULT_ADMIN_PASSWORD);

        let result = service.validate_password(ValidateAdminPasswordCommand {
            password: "admin123".to_string(),
        });
        assert!(result.success);
    }

    #[test]
    fn test_comparison_is_exact_not_trimmed() {
        let service = AdminAuthService::with_password("pass word");

        let exact = service.validate_password(ValidateAdminPasswordCommand {
            password: "pass word".to_string(),
        });
        assert!(exact.success);

        let padded = service.validate_password(ValidateAdminPasswordCommand {
            password: " pass word ".to_string(),
        });
        assert!(!padded.success);
    }
}

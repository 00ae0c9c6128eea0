//! Patron credentials and authentication
pub mod blocking;

use crate::errors::SfplError;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Credentials file looked up when none is given
pub const DEFAULT_CREDENTIALS_FILE: &str = "sfpl.config.json";
const USER_LEN: usize = 14;
const PIN_LEN: usize = 4;

/// Login information for catalog authentication
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginInfo {
    pub user: Box<str>,
    pub pin: Box<str>,
}

impl LoginInfo {
    /// Card numbers are 14 characters and PINs 4
    fn validate(self) -> Result<Self, SfplError> {
        if self.user.chars().count() != USER_LEN || self.pin.chars().count() != PIN_LEN {
            return Err(SfplError::CredentialsError(format!(
                "expected a {} character user and a {} character pin",
                USER_LEN, PIN_LEN
            )));
        }
        Ok(self)
    }
}

/// Get login information from a JSON file at provided path
///
/// # Arguments
/// * `path` - Path to a file shaped like `{"user": "...", "pin": "..."}`
///
/// # Example
/// ```no_run
/// use sfpl_api::networking::get_login_info;
/// let info = get_login_info("sfpl.config.json");
/// ```
pub fn get_login_info(path: impl AsRef<Path>) -> Result<LoginInfo, SfplError> {
    let path = path.as_ref();
    debug!("Loading credentials from {}", path.display());
    let file = fs::read_to_string(path)?;
    let info: LoginInfo = serde_json::from_str(&file)?;
    info.validate()
}

/// Use explicit credentials when both are given, otherwise read `path`
pub fn resolve_login_info(
    user: Option<&str>,
    pin: Option<&str>,
    path: impl AsRef<Path>,
) -> Result<LoginInfo, SfplError> {
    match (user, pin) {
        (Some(user), Some(pin)) => Ok(LoginInfo {
            user: user.into(),
            pin: pin.into(),
        }),
        _ => get_login_info(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn credentials_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_credentials() {
        let file = credentials_file(r#"{"user": "21223012345678", "pin": "1234"}"#);
        let info = get_login_info(file.path()).unwrap();
        assert_eq!(&*info.user, "21223012345678");
        assert_eq!(&*info.pin, "1234");
    }

    #[test]
    fn rejects_wrong_lengths() {
        let file = credentials_file(r#"{"user": "2122301234", "pin": "1234"}"#);
        assert!(matches!(
            get_login_info(file.path()),
            Err(SfplError::CredentialsError(_))
        ));
        let file = credentials_file(r#"{"user": "21223012345678", "pin": "12345"}"#);
        assert!(matches!(
            get_login_info(file.path()),
            Err(SfplError::CredentialsError(_))
        ));
    }

    #[test]
    fn rejects_malformed_json_and_missing_file() {
        let file = credentials_file(r#"{"user": "21223012345678"}"#);
        assert!(matches!(
            get_login_info(file.path()),
            Err(SfplError::SerdeError(_))
        ));
        assert!(matches!(
            get_login_info("/nonexistent/sfpl.config.json"),
            Err(SfplError::IoError(_))
        ));
    }

    #[test]
    fn explicit_credentials_win_over_file() {
        let info = resolve_login_info(Some("user"), Some("pin"), "/nonexistent").unwrap();
        assert_eq!(&*info.user, "user");
        let file = credentials_file(r#"{"user": "21223012345678", "pin": "1234"}"#);
        let info = resolve_login_info(Some("user"), None, file.path()).unwrap();
        assert_eq!(&*info.user, "21223012345678");
    }
}

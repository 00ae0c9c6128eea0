use thiserror::Error;
#[derive(Error, Debug)]
pub enum SfplError {
    #[error("Selector error: {0}")]
    SelectorError(String),
    #[error("regex error: {0}")]
    RegexError(String),
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    /// A page fetch answered with something other than 200.
    #[error("page came with status {0}")]
    UnexpectedStatus(u16),
    /// The login form was answered without the redirect to the patron pages.
    #[error("login refused (status {0}), check card number and PIN")]
    LoginRefused(u16),
    #[error("invalid input: {0}")]
    ValidationError(String),
    #[error("credentials error: {0}")]
    CredentialsError(String),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_login_is_not_reported_as_a_page_status() {
        let message = SfplError::LoginRefused(200).to_string();
        assert!(message.starts_with("login refused (status 200)"));
        assert!(!message.contains("page came with status"));
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Access key id is empty")]
    MissingAccessKey,
    #[error("Access key secret is empty")]
    MissingSecretKey,
    #[error("Neither {0}, nor {1} exists in the environment")]
    MissingEnvVar(String, String),
    #[error("Profile section [{0}] not found")]
    ConfigNotFound(String),
    #[error("Missing oss_access_key_id in profile section [{0}]")]
    ConfigMissingAccessKeyId(String),
    #[error("Missing oss_access_key_secret in profile section [{0}]")]
    ConfigMissingSecretKey(String),
    #[error("ini: {0}")]
    Ini(#[from] ini::Error),
    #[error("Invalid home dir")]
    HomeDir,
    #[error("No credentials in the environment or the profile file: {0}")]
    NotFound(Box<CredentialsError>),
}

use console::style;
use radiant_core::error::RadiantError;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Neither an API token nor a refresh token is configured
pub fn missing_credentials() -> CliError {
    CliError::new("No Radiant Earth credentials configured")
        .with_context("Must provide either a refresh token or an API token.")
        .with_suggestion("Set a refresh token: export RADIANT_REFRESH_TOKEN=\"<token>\"")
        .with_suggestion("Or set an API token: export RADIANT_API_TOKEN=\"<token>\"")
        .with_suggestion("Or add refresh_token = \"<token>\" to a config file passed with --config")
        .with_help("Run: radiant config")
}

/// The refresh token could not be exchanged
pub fn refresh_token_rejected(reason: &str) -> CliError {
    CliError::new("Could not obtain an API token")
        .with_context(format!("The token exchange did not return an API token.\n\nReason: {}", reason))
        .with_suggestion("Check that the refresh token is current and belongs to this host")
        .with_suggestion("Generate a new refresh token from your account settings")
        .with_help("Run: radiant config")
}

/// The config file could not be read or parsed
pub fn config_file_invalid(path: &Path, error: &RadiantError) -> CliError {
    CliError::new("Cannot load config file")
        .with_context(format!("Path: {}\n\nError: {}", path.display(), error))
        .with_suggestion("Check that the file exists and is valid TOML")
        .with_suggestion("Supported keys: host, scheme, refresh_token, api_token, timeout_secs, temp_dir")
        .with_help("Run: radiant --help")
}

/// A scene search was rejected before any request was made
pub fn invalid_scene_query(reason: &str) -> CliError {
    CliError::new("Invalid scene search")
        .with_context(reason.to_string())
        .with_suggestion("Pass exactly one of --shape <id> or --bbox minx,miny,maxx,maxy")
        .with_help("Run: radiant scenes --help")
}

/// A required setting resolved to nothing
pub fn config_missing(key: &str) -> CliError {
    CliError::new(format!("Missing required setting '{}'", key))
        .with_suggestion(format!("Set it in the environment: export RADIANT_{}=\"<value>\"", key.to_uppercase()))
        .with_suggestion(format!("Or add {} = \"<value>\" to a config file passed with --config", key))
        .with_help("Run: radiant config")
}

/// Caller input rejected before or by the platform
pub fn invalid_input(error: &RadiantError) -> CliError {
    CliError::new("Invalid input")
        .with_context(error.to_string())
        .with_suggestion("Check the ids, geometry and dates passed to the command")
}

/// Translate library errors that have a known remedy
pub fn from_radiant(error: RadiantError) -> anyhow::Error {
    let known = match &error {
        RadiantError::MissingCredentials => Some(missing_credentials()),
        RadiantError::RefreshToken { reason } => Some(refresh_token_rejected(reason)),
        RadiantError::InvalidSceneQuery { reason } => Some(invalid_scene_query(reason)),
        RadiantError::ConfigMissing { key } => Some(config_missing(key)),
        e if e.is_validation() => Some(invalid_input(e)),
        _ => None,
    };

    match known {
        Some(cli_error) => cli_error.into(),
        None => error.into(),
    }
}

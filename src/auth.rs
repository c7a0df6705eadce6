// ABOUTME: Credential resolution from env plus the OAuth2 code flow
// ABOUTME: CLI flag → TICKTICK_ACCESS_TOKEN env var, with .env support

use crate::api::truncate_str;
use crate::{Error, Result, TokenResponse};
use reqwest::blocking::Client;
use reqwest::Url;
use std::env;
use std::time::Duration;

/// Resolves the bearer token for export: `--token` flag first, then the
/// `TICKTICK_ACCESS_TOKEN` environment variable (quotes stripped).
pub fn resolve_token(cli_token: Option<String>) -> Result<String> {
    if let Some(token) = cli_token {
        return Ok(token);
    }

    if let Ok(token) = env::var("TICKTICK_ACCESS_TOKEN") {
        return Ok(strip_quotes(&token));
    }

    Err(Error::Config(
        "No access token found. Provide via --token or the TICKTICK_ACCESS_TOKEN env var \
         (run `tickmark auth` to obtain one)"
            .into(),
    ))
}

fn strip_quotes(value: &str) -> String {
    value.trim_matches(|c| c == '\'' || c == '"').to_string()
}

fn require_var(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Config(format!("environment variable {} is required but not set", name)))
}

#[derive(Debug, Clone)]
pub struct OauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl OauthConfig {
    /// Reads the four required OAuth values from the environment.
    /// Fails fast on the first missing one, before any network call.
    pub fn from_env() -> Result<Self> {
        Ok(OauthConfig {
            client_id: require_var("TICKTICK_CLIENT_ID")?,
            client_secret: require_var("TICKTICK_CLIENT_SECRET")?,
            redirect_uri: require_var("TICKTICK_REDIRECT_URI")?,
            scope: require_var("TICKTICK_SCOPE")?,
        })
    }
}

/// State tokens are timestamp-derived and never validated server-side.
pub fn generate_state() -> String {
    format!("ticktick_oauth_{}", chrono::Utc::now().timestamp())
}

pub struct OauthFlow {
    client: Client,
    base_url: String,
    config: OauthConfig,
}

impl OauthFlow {
    pub fn new(config: OauthConfig, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(OauthFlow {
            client,
            base_url: base_url.unwrap_or_else(|| "https://ticktick.com".into()),
            config,
        })
    }

    /// Builds the user-facing authorization URL (step 1 of the flow).
    pub fn authorize_url(&self, state: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/oauth/authorize", self.base_url),
            &[
                ("client_id", self.config.client_id.as_str()),
                ("scope", self.config.scope.as_str()),
                ("state", state),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
            ],
        )
        .map_err(|e| Error::Config(format!("invalid authorize URL: {}", e)))?;

        Ok(url.to_string())
    }

    /// Exchanges a pasted authorization code for a token (step 3).
    pub fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let endpoint = "/oauth/token";
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("scope", self.config.scope.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(Error::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                message: truncate_str(&message, 100),
            });
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(Error::Parse)
    }
}

/// Interactive driver for `tickmark auth`: print the authorization URL,
/// collect the pasted code, exchange it, and print the resulting token.
pub fn run_interactive(base_url: Option<String>) -> Result<()> {
    let config = OauthConfig::from_env()?;
    let flow = OauthFlow::new(config.clone(), base_url)?;

    println!("TickTick OAuth2 Access Token Generator");
    println!("======================================");
    println!("Client ID: {}", config.client_id);
    println!("Scope: {}", config.scope);
    println!("Redirect URI: {}", config.redirect_uri);
    println!();

    let state = generate_state();
    let auth_url = flow.authorize_url(&state)?;

    println!("Step 1: Authorization");
    println!("Please visit the following URL to authorize the application:");
    println!("\n{}\n", auth_url);

    if let Err(e) = open::that(&auth_url) {
        eprintln!("Could not open a browser ({}); open the URL manually.", e);
    }

    println!("After authorizing, you will be redirected to your redirect URI.");
    println!("Copy the 'code' parameter from the redirect URL and paste it below.");

    let code: String = dialoguer::Input::new()
        .with_prompt("Authorization code")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| Error::Input(format!("failed to read authorization code: {}", e)))?;
    let code = code.trim().to_string();

    if code.is_empty() {
        return Err(Error::Input("no authorization code provided".into()));
    }

    println!("\nStep 2: Received authorization code: {}", truncate_str(&code, 10));
    println!("\nStep 3: Exchanging authorization code for access token...");

    let token = flow.exchange_code(&code)?;

    println!();
    println!("SUCCESS! Access token obtained:");
    println!("Access Token: {}", token.access_token);
    if let Some(expires_in) = token.expires_in {
        println!("Expires in: {} seconds", expires_in);
    }
    if let Some(refresh_token) = &token.refresh_token {
        println!("Refresh Token: {}", refresh_token);
    }
    if let Some(scope) = &token.scope {
        println!("Granted Scope: {}", scope);
    }
    println!();
    println!("Set it as an environment variable:");
    println!("export TICKTICK_ACCESS_TOKEN='{}'", token.access_token);

    Ok(())
}

// # deens - DNS record editor
//
// Thin command line layer over deens-core. It is responsible for:
// 1. Parsing arguments and reading configuration from the environment
// 2. Initializing logging and the runtime
// 3. Registering the DNS client and resolving credentials
// 4. Running one locator or editor operation and mapping the outcome
//    to an exit code
//
// All record logic lives in deens-core.
//
// ## Configuration
//
// Flags override environment variables:
// - `DEENS_EMAIL` / `--email`: DNSimple account e-mail address
// - `DEENS_TOKEN` / `--token`: DNSimple API token
// - `DEENS_API_URL` / `--api-url`: API endpoint (optional)
// - `DEENS_CREDENTIALS_PATH` / `--credentials-path`: credential file
//   (default `$HOME/.config/deens/credentials.json`)
// - `DEENS_MODE=dry-run` / `--dry-run`: read, but only log writes
// - `DEENS_LOG_LEVEL`: trace, debug, info, warn, error (default warn)
//
// Credentials saved with `deens login` are used when neither e-mail nor
// token is given.
//
// ## Example
//
// ```bash
// deens login --email john.doe@example.com --token abc123
// deens create example.com --subdomain www --ip 2001:db8::1 --ttl 3600
// deens update example.com --subdomain www --ip 2001:db8::2
// deens delete example.com --subdomain www --type AAAA
// ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deens_core::config::{CredentialStoreConfig, DeensConfig, EditorConfig, ProviderConfig};
use deens_core::{
    ApiCredentials, ClientRegistry, CredentialStore, DnsClient, DnsEditor, DnsInfoProvider,
    Error as CoreError, RecordEditor, RecordLocator,
};
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the possible outcomes of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeensExitCode {
    /// The command succeeded
    Success = 0,
    /// Invalid arguments, configuration or input
    ConfigError = 1,
    /// The provider or the credential store failed
    RuntimeError = 2,
    /// Update found the address already set
    NoUpdateRequired = 3,
}

impl From<DeensExitCode> for ExitCode {
    fn from(code: DeensExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl DeensExitCode {
    /// Exit code for a failed command
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CoreError>() {
            Some(CoreError::NoUpdateRequired { .. }) => Self::NoUpdateRequired,
            Some(CoreError::InvalidInput(_) | CoreError::Config(_)) => Self::ConfigError,
            _ => Self::RuntimeError,
        }
    }
}

/// Manage the A and AAAA records of your subdomains
#[derive(Parser, Debug)]
#[command(name = "deens", version, about)]
struct Cli {
    /// DNSimple account e-mail address
    #[arg(long, env = "DEENS_EMAIL", global = true)]
    email: Option<String>,

    /// DNSimple API token
    #[arg(long, env = "DEENS_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// DNSimple API endpoint
    #[arg(long, env = "DEENS_API_URL", global = true)]
    api_url: Option<String>,

    /// Credential file used by login and logout
    #[arg(long, env = "DEENS_CREDENTIALS_PATH", global = true)]
    credentials_path: Option<PathBuf>,

    /// Perform lookups but only log changes
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List the domains of the account
    Domains,

    /// List the records of a domain
    Records {
        /// Domain name (e.g. example.com)
        domain: String,

        /// Only list records of this subdomain ("" for the bare domain)
        #[arg(short, long)]
        subdomain: Option<String>,
    },

    /// Create an address record for a subdomain
    Create {
        /// Domain name (e.g. example.com)
        domain: String,

        /// Subdomain name, empty for the bare domain
        #[arg(short, long, default_value = "")]
        subdomain: String,

        /// IPv4 or IPv6 address; selects an A or AAAA record
        #[arg(long)]
        ip: IpAddr,

        /// Time to live in seconds
        #[arg(long)]
        ttl: Option<u32>,
    },

    /// Point an existing address record at a new IP
    Update {
        /// Domain name (e.g. example.com)
        domain: String,

        /// Subdomain name, empty for the bare domain
        #[arg(short, long, default_value = "")]
        subdomain: String,

        /// IPv4 or IPv6 address; selects the A or AAAA record
        #[arg(long)]
        ip: IpAddr,
    },

    /// Delete an address record of a subdomain
    Delete {
        /// Domain name (e.g. example.com)
        domain: String,

        /// Subdomain name, empty for the bare domain
        #[arg(short, long, default_value = "")]
        subdomain: String,

        /// Record type: A or AAAA
        #[arg(long = "type")]
        record_type: String,
    },

    /// Save the given e-mail address and API token for later runs
    Login,

    /// Remove saved credentials
    Logout,
}

/// Settings taken from the environment and global flags
#[derive(Debug)]
struct Settings {
    credentials_path: PathBuf,
    api_url: Option<String>,
    dry_run: bool,
    log_level: Level,
}

impl Settings {
    /// Load settings from the parsed flags and environment variables
    fn from_env(cli: &Cli) -> Result<Self> {
        let credentials_path = match &cli.credentials_path {
            Some(path) => path.clone(),
            None => default_credentials_path(env::var("HOME").ok())?,
        };

        let dry_run = cli.dry_run || is_dry_run_mode(env::var("DEENS_MODE").ok().as_deref());

        let log_level = env::var("DEENS_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
        let log_level = parse_log_level(&log_level).ok_or_else(|| {
            CoreError::config(format!(
                "DEENS_LOG_LEVEL '{log_level}' is not valid. \
                Valid levels: trace, debug, info, warn, error"
            ))
        })?;

        Ok(Self {
            credentials_path,
            api_url: cli.api_url.clone(),
            dry_run,
            log_level,
        })
    }
}

fn default_credentials_path(home: Option<String>) -> Result<PathBuf> {
    match home {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home)
            .join(".config")
            .join("deens")
            .join("credentials.json")),
        _ => Err(CoreError::config(
            "HOME is not set. Set DEENS_CREDENTIALS_PATH or pass --credentials-path",
        )
        .into()),
    }
}

fn is_dry_run_mode(mode: Option<&str>) -> bool {
    mode.is_some_and(|m| m.eq_ignore_ascii_case("dry-run"))
}

fn parse_log_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version end up here too
            return if e.use_stderr() {
                DeensExitCode::ConfigError.into()
            } else {
                DeensExitCode::Success.into()
            };
        }
    };

    let settings = match Settings::from_env(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return DeensExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return DeensExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DeensExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(cli, settings).await {
            Ok(()) => DeensExitCode::Success,
            Err(e) => {
                let code = DeensExitCode::for_error(&e);
                if code == DeensExitCode::NoUpdateRequired {
                    eprintln!("{e}");
                } else {
                    eprintln!("Error: {e:#}");
                }
                code
            }
        }
    });

    code.into()
}

/// Run one command
async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let store_config = CredentialStoreConfig::File {
        path: settings.credentials_path.clone(),
    };
    let store = deens_core::store::open(&store_config)
        .await
        .context("Unable to open the credential store")?;

    match cli.command {
        Command::Login => {
            let credentials = ApiCredentials::new(
                cli.email.unwrap_or_default(),
                cli.token.unwrap_or_default(),
            )?;
            store.save_credentials(&credentials).await?;
            println!(
                "Saved credentials for {} to {}",
                credentials.email(),
                settings.credentials_path.display()
            );
            return Ok(());
        }
        Command::Logout => {
            store.delete_credentials().await?;
            println!("Removed saved credentials");
            return Ok(());
        }
        _ => {}
    }

    let credentials =
        resolve_credentials(cli.email.clone(), cli.token.clone(), store.as_ref()).await?;

    let config = DeensConfig {
        provider: ProviderConfig::Dnsimple {
            email: credentials.email().to_string(),
            token: credentials.token().to_string(),
            base_url: settings.api_url.clone(),
            dry_run: settings.dry_run,
        },
        credential_store: store_config,
        editor: EditorConfig::default(),
    };
    config.validate()?;

    let registry = ClientRegistry::new();
    register_clients(&registry);
    debug!("Available providers: {:?}", registry.list_providers());

    let client: Arc<dyn DnsClient> = Arc::from(registry.create_client(&config.provider)?);
    let locator = Arc::new(DnsInfoProvider::new(Arc::clone(&client)));
    let editor = DnsEditor::new(client, locator.clone());

    execute(cli.command, &config, locator.as_ref(), &editor).await
}

/// Credentials from flags or environment, else the saved ones
async fn resolve_credentials(
    email: Option<String>,
    token: Option<String>,
    store: &dyn CredentialStore,
) -> Result<ApiCredentials> {
    if email.is_some() || token.is_some() {
        return Ok(ApiCredentials::new(
            email.unwrap_or_default(),
            token.unwrap_or_default(),
        )?);
    }

    match store.get_credentials().await? {
        Some(credentials) => {
            debug!("Using saved credentials for {}", credentials.email());
            Ok(credentials)
        }
        None => Err(CoreError::config(
            "No credentials given. Run `deens login --email <EMAIL> --token <TOKEN>` \
            or set DEENS_EMAIL and DEENS_TOKEN",
        )
        .into()),
    }
}

fn register_clients(registry: &ClientRegistry) {
    #[cfg(feature = "dnsimple")]
    deens_provider_dnsimple::register(registry);

    #[cfg(not(feature = "dnsimple"))]
    let _ = registry;
}

/// Dispatch a record command to the locator or editor
async fn execute(
    command: Command,
    config: &DeensConfig,
    locator: &dyn RecordLocator,
    editor: &dyn RecordEditor,
) -> Result<()> {
    match command {
        Command::Domains => {
            for name in locator.list_domain_names().await? {
                println!("{name}");
            }
        }
        Command::Records { domain, subdomain } => {
            let records = match subdomain {
                Some(subdomain) => locator.list_subdomain_records(&domain, &subdomain).await?,
                None => locator.list_domain_records(&domain).await?,
            };
            for record in records {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    record.id, record.name, record.record_type, record.ttl, record.content
                );
            }
        }
        Command::Create {
            domain,
            subdomain,
            ip,
            ttl,
        } => {
            let ttl = ttl.unwrap_or(config.editor.default_ttl);
            editor
                .create_subdomain(&domain, &subdomain, ttl, Some(ip))
                .await?;
        }
        Command::Update {
            domain,
            subdomain,
            ip,
        } => {
            editor.update_subdomain(&domain, &subdomain, Some(ip)).await?;
        }
        Command::Delete {
            domain,
            subdomain,
            record_type,
        } => {
            editor
                .delete_subdomain(&domain, &subdomain, &record_type)
                .await?;
        }
        Command::Login | Command::Logout => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deens_core::MemoryCredentialStore;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deens").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_create() {
        let cli = parse(&[
            "create", "example.com", "--subdomain", "www", "--ip", "2001:db8::1", "--ttl", "3600",
        ]);

        assert_eq!(
            cli.command,
            Command::Create {
                domain: "example.com".to_string(),
                subdomain: "www".to_string(),
                ip: "2001:db8::1".parse().unwrap(),
                ttl: Some(3600),
            }
        );
    }

    #[test]
    fn test_subdomain_defaults_to_bare_domain() {
        let cli = parse(&["update", "example.com", "--ip", "192.0.2.1"]);
        match cli.command {
            Command::Update { subdomain, .. } => assert_eq!(subdomain, ""),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_type() {
        let cli = parse(&["delete", "example.com", "-s", "www", "--type", "AAAA"]);
        assert_eq!(
            cli.command,
            Command::Delete {
                domain: "example.com".to_string(),
                subdomain: "www".to_string(),
                record_type: "AAAA".to_string(),
            }
        );
    }

    #[test]
    fn test_records_subdomain_is_optional() {
        let cli = parse(&["records", "example.com"]);
        assert_eq!(
            cli.command,
            Command::Records {
                domain: "example.com".to_string(),
                subdomain: None,
            }
        );
    }

    #[test]
    fn test_login_takes_global_flags() {
        let cli = parse(&["login", "--email", "john.doe@example.com", "--token", "abc123"]);
        assert_eq!(cli.command, Command::Login);
        assert_eq!(cli.email.as_deref(), Some("john.doe@example.com"));
        assert_eq!(cli.token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_invalid_ip_is_rejected() {
        let result = Cli::try_parse_from(["deens", "create", "example.com", "--ip", "not-an-ip"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_exit_codes() {
        let no_update: anyhow::Error = CoreError::no_update_required("::1").into();
        assert_eq!(
            DeensExitCode::for_error(&no_update),
            DeensExitCode::NoUpdateRequired
        );

        let invalid: anyhow::Error = CoreError::invalid_input("bad").into();
        assert_eq!(DeensExitCode::for_error(&invalid), DeensExitCode::ConfigError);

        let config: anyhow::Error = CoreError::config("bad").into();
        assert_eq!(DeensExitCode::for_error(&config), DeensExitCode::ConfigError);

        let provider: anyhow::Error = CoreError::provider("dnsimple", "boom").into();
        assert_eq!(DeensExitCode::for_error(&provider), DeensExitCode::RuntimeError);

        let not_found: anyhow::Error = CoreError::not_found("www.example.com").into();
        assert_eq!(DeensExitCode::for_error(&not_found), DeensExitCode::RuntimeError);

        // Context does not hide the core error
        let wrapped = anyhow::Error::from(CoreError::no_update_required("::1")).context("update");
        assert_eq!(
            DeensExitCode::for_error(&wrapped),
            DeensExitCode::NoUpdateRequired
        );
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(DeensExitCode::Success as u8, 0);
        assert_eq!(DeensExitCode::ConfigError as u8, 1);
        assert_eq!(DeensExitCode::RuntimeError as u8, 2);
        assert_eq!(DeensExitCode::NoUpdateRequired as u8, 3);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("warn"), Some(Level::WARN));
        assert_eq!(parse_log_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_dry_run_mode() {
        assert!(is_dry_run_mode(Some("dry-run")));
        assert!(is_dry_run_mode(Some("DRY-RUN")));
        assert!(!is_dry_run_mode(Some("live")));
        assert!(!is_dry_run_mode(None));
    }

    #[test]
    fn test_default_credentials_path() {
        let path = default_credentials_path(Some("/home/john".to_string())).unwrap();
        assert_eq!(path, PathBuf::from("/home/john/.config/deens/credentials.json"));
        assert!(default_credentials_path(None).is_err());
    }

    #[tokio::test]
    async fn test_flags_override_saved_credentials() {
        let saved = ApiCredentials::new("saved@example.com", "saved").unwrap();
        let store = MemoryCredentialStore::with_credentials(saved);

        let credentials = resolve_credentials(
            Some("flag@example.com".to_string()),
            Some("flag".to_string()),
            &store,
        )
        .await
        .unwrap();

        assert_eq!(credentials.email(), "flag@example.com");
    }

    #[tokio::test]
    async fn test_saved_credentials_are_fallback() {
        let saved = ApiCredentials::new("saved@example.com", "saved").unwrap();
        let store = MemoryCredentialStore::with_credentials(saved);

        let credentials = resolve_credentials(None, None, &store).await.unwrap();
        assert_eq!(credentials.email(), "saved@example.com");
    }

    #[tokio::test]
    async fn test_partial_flags_are_invalid() {
        let store = MemoryCredentialStore::new();

        let err = resolve_credentials(Some("john.doe@example.com".to_string()), None, &store)
            .await
            .unwrap_err();
        assert_eq!(DeensExitCode::for_error(&err), DeensExitCode::ConfigError);
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let store = MemoryCredentialStore::new();

        let err = resolve_credentials(None, None, &store).await.unwrap_err();
        assert_eq!(DeensExitCode::for_error(&err), DeensExitCode::ConfigError);
        assert!(err.to_string().contains("deens login"));
    }
}

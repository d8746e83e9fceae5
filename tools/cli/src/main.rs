//! Passkeep CLI - Command line interface for vault operations.
//!
//! This tool is the interactive collaborator on top of the core: it
//! validates user input, prompts for passphrases without echo, resolves
//! duplicate-service decisions and formats listings. The cipher and
//! file-rewrite logic stay behind the session API.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use passkeep_common::{Error, Secret, VaultName};
use passkeep_store::StoreConfig;
use passkeep_vault::{VaultManager, VaultSession};

/// Characters allowed in vault and service names besides letters and digits.
const NAME_SPECIALS: &[char] = &['-', '_'];

/// Characters allowed in passphrases besides letters and digits.
const SECRET_SPECIALS: &[char] = &['-', '_', '@', '#'];

#[derive(Parser)]
#[command(name = "passkeep")]
#[command(about = "Passkeep - Passphrase-protected credential vaults")]
#[command(version)]
struct Cli {
    /// Storage root directory (defaults to the platform data directory).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered vaults.
    List,

    /// Generate a secure password without storing it.
    Generate {
        /// Service to embed in the password.
        service: String,
    },

    /// Create a new vault, optionally storing passwords right away.
    Create {
        /// Name of the new vault.
        vault: String,

        /// Services to generate and store passwords for.
        services: Vec<String>,
    },

    /// Generate and store a password for one service.
    Store {
        /// Vault to store into.
        vault: String,

        /// Service to generate a password for.
        service: String,
    },

    /// Generate and store passwords for several services.
    StoreMany {
        /// Vault to store into.
        vault: String,

        /// Services to generate passwords for.
        #[arg(required = true)]
        services: Vec<String>,
    },

    /// Replace a service's stored password with a new one.
    Regenerate {
        /// Vault holding the service.
        vault: String,

        /// Service to regenerate.
        service: String,
    },

    /// Delete a service's password from a vault.
    Delete {
        /// Vault holding the service.
        vault: String,

        /// Service to delete.
        service: String,
    },

    /// Decrypt a vault into a plaintext export file.
    Export {
        /// Vault to export.
        vault: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = StoreConfig::new(resolve_data_dir(cli.data_dir)?);
    let manager = VaultManager::new(config);

    match cli.command {
        Commands::List => cmd_list(&manager),
        Commands::Generate { service } => cmd_generate(&service),
        Commands::Create { vault, services } => cmd_create(&manager, &vault, &services),
        Commands::Store { vault, service } => cmd_store(&manager, &vault, &service),
        Commands::StoreMany { vault, services } => cmd_store_many(&manager, &vault, &services),
        Commands::Regenerate { vault, service } => cmd_regenerate(&manager, &vault, &service),
        Commands::Delete { vault, service } => cmd_delete(&manager, &vault, &service),
        Commands::Export { vault } => cmd_export(&manager, &vault),
    }
}

/// Pick the storage root: explicit flag first, platform data dir otherwise.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    let base = dirs::data_local_dir().context("Could not determine a data directory")?;
    Ok(base.join("passkeep"))
}

/// List vault names.
fn cmd_list(manager: &VaultManager) -> Result<()> {
    let names = manager.vault_names().context("Failed to read the registry")?;
    match join_names(&names) {
        Some(listing) => println!("{}", listing),
        None => println!("There are no vaults!"),
    }
    Ok(())
}

/// Generate a password without touching any vault.
fn cmd_generate(service: &str) -> Result<()> {
    validate_name("service name", service)?;
    println!("Your password is: {}", passkeep_cipher::generate(service));
    Ok(())
}

/// Create a new vault and optionally fill it.
fn cmd_create(manager: &VaultManager, vault: &str, services: &[String]) -> Result<()> {
    validate_name("vault name", vault)?;
    if manager.vault_exists(vault)? {
        bail!("There is already a vault with this name!");
    }
    for service in services {
        validate_name("service name", service)?;
    }

    let secret = prompt_secret("Insert the secret key for the new vault (do not share it): ")?;
    let confirm = prompt_secret("Confirm secret key: ")?;
    if secret.expose() != confirm.expose() {
        bail!("Secret keys do not match");
    }

    let session = manager
        .open(VaultName::new(vault)?, &secret)
        .context("Failed to create vault")?;
    println!("Vault '{}' successfully created!", session.name());

    if !services.is_empty() {
        let summary = session.store_many(services)?;
        report_summary(&summary);
    }
    Ok(())
}

/// Store one password, resolving duplicates interactively.
fn cmd_store(manager: &VaultManager, vault: &str, service: &str) -> Result<()> {
    validate_name("service name", service)?;
    let session = open_session(manager, vault)?;

    match session.store_one(service) {
        Ok(()) => {
            println!("Password for {} successfully added!", service);
            Ok(())
        }
        Err(Error::DuplicateService(_)) => {
            let question = format!(
                "There is already a password stored for service: '{}' in vault: '{}'.\nWould you like to override it with a newly generated password (y/n): ",
                service, vault
            );
            if confirm(&question)? {
                session.regenerate(service)?;
                println!("Password for {} successfully updated!", service);
            } else {
                println!("Operation aborted!");
            }
            Ok(())
        }
        Err(e) => Err(e).context("Failed to store password"),
    }
}

/// Store several passwords in one pass.
fn cmd_store_many(manager: &VaultManager, vault: &str, services: &[String]) -> Result<()> {
    for service in services {
        validate_name("service name", service)?;
    }
    let session = open_session(manager, vault)?;
    let summary = session
        .store_many(services)
        .context("Failed to store passwords")?;
    report_summary(&summary);
    Ok(())
}

/// Regenerate a stored password.
fn cmd_regenerate(manager: &VaultManager, vault: &str, service: &str) -> Result<()> {
    validate_name("service name", service)?;
    let session = open_session(manager, vault)?;
    session
        .regenerate(service)
        .context("Failed to regenerate password")?;
    println!("Password successfully re-generated!");
    Ok(())
}

/// Delete a stored password.
fn cmd_delete(manager: &VaultManager, vault: &str, service: &str) -> Result<()> {
    validate_name("service name", service)?;
    let session = open_session(manager, vault)?;
    session.delete(service).context("Failed to delete password")?;
    println!("Password successfully deleted!");
    Ok(())
}

/// Export a vault to its plaintext file.
fn cmd_export(manager: &VaultManager, vault: &str) -> Result<()> {
    let session = open_session(manager, vault)?;
    let path = session.export().context("Failed to export vault")?;
    println!(
        "Vault '{}' successfully decrypted!\nYou can find your passwords in this file: '{}'",
        vault,
        path.display()
    );
    Ok(())
}

/// Open a session on an existing vault, retrying on a wrong passphrase.
fn open_session(manager: &VaultManager, vault: &str) -> Result<VaultSession> {
    validate_name("vault name", vault)?;
    if !manager.vault_exists(vault)? {
        bail!("There are no vaults with this name!");
    }
    loop {
        let secret = prompt_secret("Insert the secret key of the vault: ")?;
        match manager.open(VaultName::new(vault)?, &secret) {
            Ok(session) => {
                println!("You are successfully authenticated to the vault {}.", vault);
                return Ok(session);
            }
            Err(Error::Authentication(msg)) => println!("{}", msg),
            Err(e) => return Err(e).context("Failed to open vault"),
        }
    }
}

/// Prompt for a passphrase without echoing it.
fn prompt_secret(prompt: &str) -> Result<Secret> {
    let raw = rpassword::prompt_password(prompt).context("Failed to read secret key")?;
    if !is_valid_string(&raw, SECRET_SPECIALS) {
        bail!("Invalid secret key value (it contains not allowed characters)");
    }
    Ok(Secret::new(raw))
}

/// Validate a vault or service name, rejecting foreign characters early.
fn validate_name(data_name: &str, value: &str) -> Result<()> {
    if !is_valid_string(value, NAME_SPECIALS) {
        bail!(
            "Invalid {} value (it contains not allowed characters)",
            data_name
        );
    }
    Ok(())
}

/// A valid input is non-empty, not purely numeric, and made of ASCII
/// letters, digits and the given specials.
fn is_valid_string(s: &str, specials: &[char]) -> bool {
    !s.is_empty()
        && !s.chars().all(|c| c.is_ascii_digit())
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || specials.contains(&c))
}

/// Ask a yes/no question on stdin.
fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_lowercase().starts_with('y'))
}

/// Format vault names as "a, b and c", a single name, or nothing.
fn join_names(names: &[String]) -> Option<String> {
    match names {
        [] => None,
        [single] => Some(single.clone()),
        [init @ .., last] => Some(format!("{} and {}", init.join(", "), last)),
    }
}

/// Print the outcome of a bulk store.
fn report_summary(summary: &passkeep_store::StoreSummary) {
    for service in &summary.stored {
        println!("Password for {} successfully added!", service);
    }
    for service in &summary.regenerated {
        println!("Password for {} successfully updated!", service);
    }
    println!("Passwords successfully saved in the vault!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_names_formats() {
        assert_eq!(join_names(&[]), None);
        assert_eq!(join_names(&["a".to_string()]).unwrap(), "a");
        assert_eq!(
            join_names(&["a".to_string(), "b".to_string()]).unwrap(),
            "a and b"
        );
        assert_eq!(
            join_names(&["a".to_string(), "b".to_string(), "c".to_string()]).unwrap(),
            "a, b and c"
        );
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("gmail", NAME_SPECIALS));
        assert!(is_valid_string("my-vault_2", NAME_SPECIALS));
        assert!(!is_valid_string("", NAME_SPECIALS));
        assert!(!is_valid_string("12345", NAME_SPECIALS));
        assert!(!is_valid_string("bad name", NAME_SPECIALS));
        assert!(!is_valid_string("dot.com", NAME_SPECIALS));
        assert!(is_valid_string("p@ss#word", SECRET_SPECIALS));
    }
}

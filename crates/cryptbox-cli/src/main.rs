//! cryptbox: client for the remote bundle encryption engine
//!
//! Commands:
//!   encrypt <paths>...      - seal files and folders into one bundle
//!   decrypt <bundle>        - open a bundle and show its integrity report
//!   ls <paths>...           - preview the selection grouped by folder
//!   keys x25519|rsa         - generate a key pair on the engine
//!   modes                   - list modes, algorithms, and required fields
//!   config show             - display current configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::ExposeSecret;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use cryptbox_controller::collect::collect_paths;
use cryptbox_controller::registry;
use cryptbox_controller::{
    password_strength, BundleController, CredentialField, DirectorySink, FileEntry, HttpEngine,
    Outcome, RemoteEngine, Strength, ROOT_FOLDER,
};
use cryptbox_core::config::CryptboxConfig;
use cryptbox_core::{Algorithm, Direction, IntegrityReport, KeyKind, KeyPair, Mode};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cryptbox",
    version,
    about = "Encrypt and decrypt file bundles with a remote engine",
    long_about = "cryptbox: select files, supply a password and/or keys, and let the engine \
                  produce an encrypted bundle or recover the original files"
)]
struct Cli {
    /// Path to config.toml
    #[arg(
        long,
        short = 'c',
        env = "CRYPTBOX_CONFIG",
        default_value = "~/.config/cryptbox/config.toml",
        global = true
    )]
    config: PathBuf,

    /// Engine base URL (overrides [engine].base_url)
    #[arg(long, env = "CRYPTBOX_ENGINE_URL", global = true)]
    engine_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CRYPTBOX_LOG", global = true)]
    log: Option<String>,

    /// Log format (json, text)
    #[arg(long, env = "CRYPTBOX_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum, PartialEq)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt files and directories into a single bundle
    ///
    /// Directories are walked recursively; their files keep their path
    /// relative to the directory's parent.
    Encrypt {
        /// Files or directories to include
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Encryption mode (default: [defaults].mode)
        #[arg(long, short = 'm')]
        mode: Option<Mode>,
        /// AEAD algorithm (default: [defaults].algorithm)
        #[arg(long, short = 'a')]
        algo: Option<Algorithm>,
        /// Password; prompted for when required and not given
        #[arg(long, env = "CRYPTBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Recipient X25519 public key (base64)
        #[arg(long)]
        recipient_x25519: Option<String>,
        /// File holding the recipient RSA public key (PEM)
        #[arg(long)]
        recipient_rsa: Option<PathBuf>,
        /// Write the bundle here instead of [output].dir
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },

    /// Decrypt a bundle
    Decrypt {
        /// Bundle produced by `cryptbox encrypt`
        bundle: PathBuf,
        /// Mode the bundle was encrypted with
        #[arg(long, short = 'm')]
        mode: Option<Mode>,
        /// Password; prompted for when required and not given
        #[arg(long, env = "CRYPTBOX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// X25519 private key (base64)
        #[arg(long, env = "CRYPTBOX_X25519_PRIVATE_KEY", hide_env_values = true)]
        private_key_x25519: Option<String>,
        /// File holding the RSA private key (PEM)
        #[arg(long)]
        rsa_private_key: Option<PathBuf>,
        /// Write the recovered archive here instead of [output].dir
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
        /// Also write the integrity report as JSON (overrides [output].report_file)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show what `encrypt` would send, grouped by folder
    Ls {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Collapse a folder in the listing (repeatable)
        #[arg(long)]
        collapse: Vec<String>,
    },

    /// Generate a key pair on the engine
    Keys {
        #[arg(value_enum)]
        kind: KeyKindArg,
        /// Write the pair into this directory instead of printing it
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Overwrite existing key files
        #[arg(long)]
        force: bool,
    },

    /// List encryption modes, algorithms, and the fields each mode requires
    Modes,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KeyKindArg {
    X25519,
    Rsa,
}

impl From<KeyKindArg> for KeyKind {
    fn from(arg: KeyKindArg) -> Self {
        match arg {
            KeyKindArg::X25519 => KeyKind::X25519,
            KeyKindArg::Rsa => KeyKind::Rsa,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_tilde(&cli.config);
    let mut config = load_config(&config_path).await?;

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = cli.log_format.clone().unwrap_or(if config.log.format == "json" {
        LogFormat::Json
    } else {
        LogFormat::Text
    });
    init_logging(&level, &format);
    debug!(config = %config_path.display(), exists = config_path.exists(), "configuration loaded");

    if let Some(url) = cli.engine_url {
        config.engine.base_url = url;
    }

    match cli.command {
        Commands::Encrypt {
            paths,
            mode,
            algo,
            password,
            recipient_x25519,
            recipient_rsa,
            output,
            force,
        } => {
            let args = EncryptArgs {
                paths,
                mode: mode.unwrap_or(config.defaults.mode),
                algo: algo.unwrap_or(config.defaults.algorithm),
                password,
                recipient_x25519,
                recipient_rsa,
                output,
                force,
            };
            cmd_encrypt(&config, args).await
        }
        Commands::Decrypt {
            bundle,
            mode,
            password,
            private_key_x25519,
            rsa_private_key,
            output,
            force,
            report,
        } => {
            let args = DecryptArgs {
                bundle,
                mode: mode.unwrap_or(config.defaults.mode),
                password,
                private_key_x25519,
                rsa_private_key,
                output,
                force,
                report,
            };
            cmd_decrypt(&config, args).await
        }
        Commands::Ls { paths, collapse } => cmd_ls(&config, &paths, &collapse),
        Commands::Keys {
            kind,
            out_dir,
            force,
        } => cmd_keys(&config, kind.into(), out_dir.as_deref(), force).await,
        Commands::Modes => cmd_modes(),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &config_path),
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

async fn load_config(path: &Path) -> Result<CryptboxConfig> {
    if path.exists() {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config: {}", path.display()))?;
        CryptboxConfig::from_toml(&content)
            .with_context(|| format!("parsing config: {}", path.display()))
    } else {
        Ok(CryptboxConfig::default())
    }
}

/// Expand `~` in path to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    match s.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_default();
            PathBuf::from(home).join(rest)
        }
        None => path.to_path_buf(),
    }
}

fn build_controller(
    config: &CryptboxConfig,
    output: Option<PathBuf>,
    force: bool,
) -> Result<BundleController<HttpEngine, DirectorySink>> {
    let engine = HttpEngine::new(&config.engine).context("configuring engine client")?;

    let mut output_config = config.output.clone();
    output_config.dir = expand_tilde(&output_config.dir);
    let mut sink = DirectorySink::from_config(&output_config).overwrite(force);
    if let Some(path) = output {
        sink = sink.with_target(path);
    }

    Ok(BundleController::new(engine, sink)
        .with_defaults(config.defaults.mode, config.defaults.algorithm))
}

// ── Credential input ──────────────────────────────────────────────────────────

/// Use the given password, or prompt for one when stdin is a terminal.
///
/// Returns `None` when neither is possible; the validator then reports the
/// missing password.
fn obtain_password(given: Option<String>, confirm: bool) -> Result<Option<String>> {
    if given.is_some() {
        return Ok(given);
    }
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }
    let first = rpassword::prompt_password("Password: ").context("reading password")?;
    if confirm {
        let again = rpassword::prompt_password("Confirm password: ").context("reading password")?;
        if again != first {
            anyhow::bail!("passwords do not match");
        }
    }
    Ok(Some(first))
}

fn read_pem(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading key file: {}", path.display()))
}

// ── Progress helpers ──────────────────────────────────────────────────────────

fn make_spinner(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{prefix:.bold} {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn fmt_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Drive one operation with a spinner and turn the outcome into a CLI result.
async fn run_operation(
    controller: &mut BundleController<HttpEngine, DirectorySink>,
    direction: Direction,
) -> Result<Option<IntegrityReport>> {
    let pb = make_spinner(direction.as_str());
    pb.set_message(direction.busy_status());
    let outcome = controller.run(direction).await;
    pb.finish_and_clear();

    match outcome {
        Outcome::Completed(done) => {
            println!("{}", controller.status());
            println!("  → {} ({})", done.location, fmt_bytes(done.archive_len as u64));
            Ok(done.report)
        }
        Outcome::Rejected(_) => anyhow::bail!("{}", controller.status()),
        Outcome::Failed(e) => Err(anyhow::Error::new(e).context(controller.status().to_string())),
        Outcome::Ignored => anyhow::bail!("another operation is already running"),
    }
}

// ── `cryptbox encrypt` ────────────────────────────────────────────────────────

#[derive(Debug)]
struct EncryptArgs {
    paths: Vec<PathBuf>,
    mode: Mode,
    algo: Algorithm,
    password: Option<String>,
    recipient_x25519: Option<String>,
    recipient_rsa: Option<PathBuf>,
    output: Option<PathBuf>,
    force: bool,
}

async fn cmd_encrypt(config: &CryptboxConfig, args: EncryptArgs) -> Result<()> {
    let mut controller = build_controller(config, args.output, args.force)?;
    controller.set_mode(args.mode);
    controller.set_algorithm(args.algo);

    let files = collect_paths(&args.paths, &config.selection)?;
    controller.selection_mut().add(files);
    let selection = controller.selection();
    println!(
        "Encrypting {} file(s), {} [{} / {}]",
        selection.len(),
        fmt_bytes(selection.total_bytes()),
        args.mode.label(),
        args.algo.label(),
    );

    if !selection.is_empty() && registry::requires(Direction::Encrypt, args.mode, CredentialField::Password) {
        if let Some(password) = obtain_password(args.password, true)? {
            let strength = password_strength(&password);
            if strength == Strength::Weak {
                eprintln!("warning: password strength: {}", strength.label());
            } else {
                println!("Password strength: {}", strength.label());
            }
            controller
                .credentials_mut()
                .set(CredentialField::Password, password);
        }
    }
    if let Some(key) = args.recipient_x25519 {
        controller
            .credentials_mut()
            .set(CredentialField::RecipientX25519Public, key.trim());
    }
    if let Some(path) = &args.recipient_rsa {
        controller
            .credentials_mut()
            .set(CredentialField::RecipientRsaPublic, read_pem(path)?);
    }

    run_operation(&mut controller, Direction::Encrypt).await?;
    Ok(())
}

// ── `cryptbox decrypt` ────────────────────────────────────────────────────────

#[derive(Debug)]
struct DecryptArgs {
    bundle: PathBuf,
    mode: Mode,
    password: Option<String>,
    private_key_x25519: Option<String>,
    rsa_private_key: Option<PathBuf>,
    output: Option<PathBuf>,
    force: bool,
    report: Option<PathBuf>,
}

async fn cmd_decrypt(config: &CryptboxConfig, args: DecryptArgs) -> Result<()> {
    let mut controller = build_controller(config, args.output, args.force)?;
    controller.set_mode(args.mode);

    let content = tokio::fs::read(&args.bundle)
        .await
        .with_context(|| format!("reading bundle: {}", args.bundle.display()))?;
    let name = args
        .bundle
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "bundle.zip".to_string());
    controller.attach_bundle(FileEntry::new(name, "", content));
    println!("Decrypting {} [{}]", args.bundle.display(), args.mode.label());

    if registry::requires(Direction::Decrypt, args.mode, CredentialField::Password) {
        if let Some(password) = obtain_password(args.password, false)? {
            controller
                .credentials_mut()
                .set(CredentialField::Password, password);
        }
    }
    if let Some(key) = args.private_key_x25519 {
        controller
            .credentials_mut()
            .set(CredentialField::X25519Private, key.trim());
    }
    if let Some(path) = &args.rsa_private_key {
        controller
            .credentials_mut()
            .set(CredentialField::RsaPrivate, read_pem(path)?);
    }

    let report = run_operation(&mut controller, Direction::Decrypt).await?;

    match &report {
        Some(report) => {
            print_report(report);
            let target = args
                .report
                .or_else(|| config.output.report_file.as_deref().map(expand_tilde));
            if let Some(path) = target {
                let json =
                    serde_json::to_string_pretty(report).context("serializing integrity report")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing report: {}", path.display()))?;
                info!(path = %path.display(), "integrity report written");
            }
        }
        None => println!("  (engine sent no integrity report)"),
    }
    Ok(())
}

fn print_report(report: &IntegrityReport) {
    println!(
        "Integrity: {}",
        if report.verified { "verified" } else { "NOT VERIFIED" }
    );
    for file in &report.files {
        println!("  {:<40} {:>10}  {}", file.name, fmt_bytes(file.size), file.sha256);
    }
}

// ── `cryptbox ls` ─────────────────────────────────────────────────────────────

fn cmd_ls(config: &CryptboxConfig, paths: &[PathBuf], collapse: &[String]) -> Result<()> {
    let mut selection = cryptbox_controller::FileSelection::new();
    selection.add(collect_paths(paths, &config.selection)?);
    for folder in collapse {
        if selection.is_expanded(folder) {
            selection.toggle_folder(folder);
        }
    }

    for group in selection.group_by_folder() {
        let marker = if selection.is_expanded(group.folder) { "▾" } else { "▸" };
        let label = if group.folder == ROOT_FOLDER {
            ROOT_FOLDER.to_string()
        } else {
            format!("{}/", group.folder)
        };
        println!("{marker} {label} ({} file(s))", group.items.len());
        if !selection.is_expanded(group.folder) {
            continue;
        }
        for item in &group.items {
            let size = selection.get(item.index).map(|e| e.size_bytes).unwrap_or(0);
            println!("    [{:>3}] {:<40} {:>10}", item.index, item.name, fmt_bytes(size));
        }
    }
    println!(
        "{} file(s), {}",
        selection.len(),
        fmt_bytes(selection.total_bytes())
    );
    Ok(())
}

// ── `cryptbox keys` ───────────────────────────────────────────────────────────

async fn cmd_keys(
    config: &CryptboxConfig,
    kind: KeyKind,
    out_dir: Option<&Path>,
    force: bool,
) -> Result<()> {
    let engine = HttpEngine::new(&config.engine).context("configuring engine client")?;
    let pb = make_spinner("keys");
    pb.set_message(format!("generating {} key pair", kind.as_str()));
    let pair = engine.generate_keys(kind).await;
    pb.finish_and_clear();
    let pair = pair.context("key generation failed")?;

    match out_dir {
        Some(dir) => {
            let (public, private) = write_key_files(&pair, dir, force)?;
            println!("Public key:  {}", public.display());
            println!("Private key: {}", private.display());
        }
        None => {
            println!("# public key");
            println!("{}", pair.public_key.trim_end());
            println!("# private key (keep this secret)");
            println!("{}", pair.private_key.expose_secret().trim_end());
        }
    }
    Ok(())
}

fn key_file_names(kind: KeyKind) -> (&'static str, &'static str) {
    match kind {
        KeyKind::X25519 => ("x25519.pub", "x25519.key"),
        KeyKind::Rsa => ("rsa_public.pem", "rsa_private.pem"),
    }
}

/// Write both halves into `dir`; the private file is owner-only on Unix.
fn write_key_files(pair: &KeyPair, dir: &Path, force: bool) -> Result<(PathBuf, PathBuf)> {
    use std::io::Write;

    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let (public_name, private_name) = key_file_names(pair.kind);
    let public_path = dir.join(public_name);
    let private_path = dir.join(private_name);

    let open = |path: &Path, private: bool| -> Result<std::fs::File> {
        let mut opts = std::fs::OpenOptions::new();
        opts.write(true);
        if force {
            opts.create(true).truncate(true);
        } else {
            opts.create_new(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            if private {
                opts.mode(0o600);
            }
        }
        #[cfg(not(unix))]
        let _ = private;
        opts.open(path)
            .with_context(|| format!("creating {} (use --force to overwrite)", path.display()))
    };

    let mut public = open(&public_path, false)?;
    let mut private = match open(&private_path, true) {
        Ok(file) => file,
        Err(e) => {
            drop(public);
            if !force {
                let _ = std::fs::remove_file(&public_path);
            }
            return Err(e);
        }
    };

    writeln!(public, "{}", pair.public_key.trim_end())
        .with_context(|| format!("writing {}", public_path.display()))?;
    writeln!(private, "{}", pair.private_key.expose_secret().trim_end())
        .with_context(|| format!("writing {}", private_path.display()))?;

    Ok((public_path, private_path))
}

// ── `cryptbox modes` ──────────────────────────────────────────────────────────

fn field_list(direction: Direction, mode: Mode) -> String {
    registry::required_fields(direction, mode)
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(" + ")
}

fn cmd_modes() -> Result<()> {
    println!("Modes:");
    for mode in Mode::ALL {
        println!("  {:<14} {}", mode.as_str(), mode.label());
        println!("  {:<14}   encrypt: {}", "", field_list(Direction::Encrypt, mode));
        println!("  {:<14}   decrypt: {}", "", field_list(Direction::Decrypt, mode));
    }
    println!();
    println!("Algorithms (encrypt only):");
    for algo in Algorithm::ALL {
        println!("  {:<20} {}", algo.as_str(), algo.label());
    }
    Ok(())
}

// ── `cryptbox config show` ────────────────────────────────────────────────────

fn cmd_config_show(config: &CryptboxConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use secrecy::SecretString;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt() {
        let cli = Cli::try_parse_from([
            "cryptbox",
            "encrypt",
            "docs",
            "notes.txt",
            "-m",
            "double-rsa",
            "-a",
            "aes-256-siv",
            "--recipient-rsa",
            "bob.pem",
        ])
        .unwrap();

        match cli.command {
            Commands::Encrypt {
                paths,
                mode,
                algo,
                recipient_rsa,
                force,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("docs"), PathBuf::from("notes.txt")]);
                assert_eq!(mode, Some(Mode::DoubleRsa));
                assert_eq!(algo, Some(Algorithm::Aes256Siv));
                assert_eq!(recipient_rsa, Some(PathBuf::from("bob.pem")));
                assert!(!force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = Cli::try_parse_from(["cryptbox", "decrypt", "b.zip", "-m", "triple-rsa"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_expand_tilde() {
        let home = std::env::var("HOME").unwrap_or_default();
        assert_eq!(
            expand_tilde(Path::new("~/.config/cryptbox/config.toml")),
            PathBuf::from(home).join(".config/cryptbox/config.toml")
        );
        assert_eq!(expand_tilde(Path::new("/etc/x")), PathBuf::from("/etc/x"));
    }

    #[test]
    fn test_fmt_bytes() {
        assert_eq!(fmt_bytes(512), "512 B");
        assert_eq!(fmt_bytes(1536), "1.5 KB");
        assert_eq!(fmt_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_write_key_files() {
        let tmp = tempfile::tempdir().unwrap();
        let pair = KeyPair {
            kind: KeyKind::X25519,
            public_key: "cHVibGlj".into(),
            private_key: SecretString::from("c2VjcmV0"),
        };

        let (public, private) = write_key_files(&pair, tmp.path(), false).unwrap();
        assert_eq!(public, tmp.path().join("x25519.pub"));
        assert_eq!(std::fs::read_to_string(&private).unwrap(), "c2VjcmV0\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&private).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        // Existing files are kept unless forced.
        assert!(write_key_files(&pair, tmp.path(), false).is_err());
        assert!(write_key_files(&pair, tmp.path(), true).is_ok());
    }

    #[test]
    fn test_existing_private_key_leaves_no_public_file() {
        let tmp = tempfile::tempdir().unwrap();
        let pair = KeyPair {
            kind: KeyKind::X25519,
            public_key: "cHVibGlj".into(),
            private_key: SecretString::from("c2VjcmV0"),
        };
        std::fs::write(tmp.path().join("x25519.key"), "old\n").unwrap();

        assert!(write_key_files(&pair, tmp.path(), false).is_err());
        assert!(!tmp.path().join("x25519.pub").exists());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("x25519.key")).unwrap(),
            "old\n"
        );
    }

    #[tokio::test]
    async fn test_missing_config_means_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config(&tmp.path().join("absent.toml")).await.unwrap();
        assert_eq!(config.engine.base_url, "http://localhost:8000");
    }
}

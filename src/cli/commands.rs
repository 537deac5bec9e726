//! Command handlers: one per subcommand

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{BackupEvent, BackupPlan, Catalog};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, ExtJsonMode};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::resolve_config_path;
use crate::domain::{Deadline, DocumentRenderer, ExcludeSet, OutputTarget};
use crate::infrastructure::di::ServiceContainer;

/// Flags of `mongobak backup`.
#[derive(Debug, Clone)]
pub struct BackupArgs<'a> {
    pub exclude: &'a str,
    pub output: Option<&'a Path>,
    pub db: Option<&'a str>,
    pub timeout: Duration,
    pub batch: u32,
    pub pretty: bool,
    pub mode: ExtJsonMode,
}

/// Run the parsed command against real implementations.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config_path = resolve_config_path(cli.config.as_deref())?;
    debug!("config path: {}", config_path.display());
    let container = ServiceContainer::new(config_path);
    execute_with(cli, &container)
}

/// Run the parsed command against the given container.
pub fn execute_with(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Commands::Connect { uri, db, timeout } => {
            cmd_connect(container, uri.as_deref(), db.as_deref(), *timeout)
        }
        Commands::List { db, timeout } => {
            cmd_list(container, db.as_deref(), *timeout, &mut io::stdout().lock())
        }
        Commands::Backup {
            exclude,
            output,
            db,
            timeout,
            batch,
            pretty,
            mode,
        } => cmd_backup(
            container,
            &BackupArgs {
                exclude,
                output: output.as_deref(),
                db: db.as_deref(),
                timeout: *timeout,
                batch: *batch,
                pretty: *pretty,
                mode: *mode,
            },
        ),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cmd_config_show(container, &mut io::stdout().lock()),
            ConfigCommands::Path => {
                output::info(&container.config_path().display());
                Ok(())
            }
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(skip(container))]
fn cmd_connect(
    container: &ServiceContainer,
    uri: Option<&str>,
    db: Option<&str>,
    timeout: Duration,
) -> CliResult<()> {
    let (uri, db) = match (uri, db) {
        (Some(uri), Some(db)) if !uri.is_empty() && !db.is_empty() => (uri, db),
        _ => return Err(CliError::Usage("connect requires --uri and --db".into())),
    };

    container.connect_service().connect(uri, db, timeout)?;
    output::action("OK", "connected and config saved.");
    Ok(())
}

/// `mongobak list`, printed to `out`.
#[instrument(skip(container, out))]
pub fn cmd_list(
    container: &ServiceContainer,
    db: Option<&str>,
    timeout: Duration,
    out: &mut impl Write,
) -> CliResult<()> {
    let settings = container.load_settings()?;
    let store = container.open_store(&settings, timeout)?;
    let catalog = container
        .catalog_service(store)
        .catalog(settings.database(db))?;

    write_catalog(out, &catalog).map_err(stdout_err)
}

/// Plain-text catalog listing: databases, a blank line, then collections.
pub fn write_catalog(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "Databases:")?;
    for name in &catalog.databases {
        writeln!(out, " - {name}")?;
    }
    writeln!(out)?;
    writeln!(out, "Collections in {:?}:", catalog.database)?;
    for name in &catalog.collections {
        writeln!(out, " - {name}")?;
    }
    out.flush()
}

#[instrument(skip(container))]
fn cmd_backup(container: &ServiceContainer, args: &BackupArgs<'_>) -> CliResult<()> {
    let output_path = match args.output {
        Some(path) if !path.as_os_str().is_empty() => expand_tilde(path),
        _ => return Err(CliError::Usage("backup requires --output".into())),
    };

    let settings = container.load_settings()?;
    let deadline = Deadline::from_timeout(args.timeout);
    let store = container.open_store(&settings, args.timeout)?;

    let plan = BackupPlan {
        database: settings.database(args.db).to_string(),
        output: output_path,
        exclude: ExcludeSet::from_csv(args.exclude),
        batch_size: (args.batch > 0).then_some(args.batch),
        renderer: DocumentRenderer::new(args.mode.with_pretty(args.pretty)),
        deadline,
    };
    debug!("plan: {:?}", plan);

    container
        .backup_service(store)
        .run(&plan, &mut print_backup_event)?;
    output::info("Backup complete.");
    Ok(())
}

/// `mongobak config show`, printed to `out`.
pub fn cmd_config_show(container: &ServiceContainer, out: &mut impl Write) -> CliResult<()> {
    let settings = container.load_settings()?;
    writeln!(out, "{}", settings.to_redacted_json()?).map_err(stdout_err)
}

fn stdout_err(e: io::Error) -> CliError {
    ApplicationError::io("write", Path::new("<stdout>"), e).into()
}

fn print_backup_event(event: BackupEvent<'_>) {
    match event {
        BackupEvent::Started { target } => match target {
            OutputTarget::Directory(dir) => {
                output::action("Writing one file per collection into", &dir.display())
            }
            OutputTarget::MergedFile(file) => {
                output::action("Writing merged output into", &file.display())
            }
        },
        BackupEvent::Skipped { collection } => {
            output::skipped("Skipping excluded collection", collection)
        }
        BackupEvent::CollectionStarted {
            collection,
            destination: Some(path),
        } => output::info(&format!("Backing up {} -> {}", collection, path.display())),
        BackupEvent::CollectionStarted {
            collection,
            destination: None,
        } => output::info(&format!("Backing up {collection} -> (merged)")),
        BackupEvent::CollectionFinished {
            collection,
            documents,
        } => output::done(&format!("{collection} ({documents} docs)")),
    }
}

/// Expand a leading `~` in a user-supplied path.
///
/// Non-UTF-8 paths pass through unchanged.
fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    }
}

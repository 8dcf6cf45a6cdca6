mod init;
pub use init::cmd_init;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::logging::{LogSettings, init_logging};
use crate::lookup::{StaticDirectory, TextDatePicker};
use crate::model::ChecklistConfig;
use crate::ops::script::{ScriptWarning, apply_script, parse_script};
use crate::ops::seed::seed_store;
use crate::ops::{EditController, ItemStore};

/// Everything a command needs: the loaded config and the seeded store
pub struct Session {
    pub config: ChecklistConfig,
    pub config_path: Option<PathBuf>,
    pub store: ItemStore,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        // Init writes the config, so it skips config discovery
        Some(Commands::Init(args)) => cmd_init(args),
        Some(Commands::List) => cmd_list(cli.config.as_deref(), json),
        Some(Commands::Apply(args)) => cmd_apply(cli.config.as_deref(), args, json),
        None => {
            let session = load_session(cli.config.as_deref())?;
            crate::tui::run(&session.config, session.store)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the config (explicit, discovered or default), start logging and
/// seed the store.
pub fn load_session(config_override: Option<&str>) -> Result<Session, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = config_io::load_config(config_override.map(Path::new), &cwd)?;

    let settings = LogSettings::resolve(&config.log);
    init_logging(&settings)?;
    info!(
        config = ?config_path,
        items = config.items.len(),
        users = config.users.len(),
        "session starting"
    );

    let directory = StaticDirectory::from_config(&config.users);
    let store = seed_store(&config.items, &directory)?;
    Ok(Session {
        config,
        config_path,
        store,
    })
}

fn print_checklist(
    session: &Session,
    warnings: &[ScriptWarning],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let title = &session.config.checklist.title;
    if json {
        let out = checklist_to_json(title, &session.store, warnings);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_checklist(title, &session.store) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn read_script(file: &str) -> Result<String, Box<dyn std::error::Error>> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).map_err(|e| format!("could not read {}: {}", file, e).into())
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(config: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session(config)?;
    print_checklist(&session, &[], json)
}

fn cmd_apply(
    config: Option<&str>,
    args: ApplyArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(config)?;
    let script = read_script(&args.file)?;
    let actions = parse_script(&script)?;
    debug!(actions = actions.len(), file = %args.file, "script parsed");

    let directory = StaticDirectory::from_config(&session.config.users);
    let dates = TextDatePicker::local();
    let mut edits = EditController::new();
    let warnings = apply_script(
        &mut session.store,
        &mut edits,
        &actions,
        &directory,
        &dates,
    )?;

    for w in &warnings {
        warn!(line = w.line, error = %w.error, "action rejected");
        eprintln!("warning: {}", w);
    }

    print_checklist(&session, &warnings, json)?;
    info!(
        actions = actions.len(),
        warnings = warnings.len(),
        progress = session.store.progress(),
        "script applied"
    );
    Ok(())
}

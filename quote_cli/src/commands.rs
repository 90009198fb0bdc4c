//! Command implementations

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use quote_core::analysis::{AnalysisRequest, JobId, JobStore, MockAnalyzer};
use quote_core::calculations::quote::{ColorOption, ProcessParameters};
use quote_core::catalog_config::CatalogConfig;
use quote_core::errors::{QuoteError, QuoteResult};
use quote_core::file_io::{load_history_or_default, save_history, FileLock};
use quote_core::geometry::{Accuracy, Dimensions, Geometry};
use quote_core::history::QuoteStore;
use quote_core::session::{AnalysisOutcome, QuoteSession};
use tracing::info;

use crate::args::{GlobalOpts, HistoryCommand, QuoteArgs};
use crate::report;

/// File name used when quoting without a CAD file
const UNTITLED: &str = "untitled.step";

pub fn quote(args: QuoteArgs, global: &GlobalOpts) -> QuoteResult<()> {
    let catalogs = CatalogConfig::load_or_builtin(global.catalog.as_deref())?;
    let color = ColorOption::from_str_flexible(&args.color)?;
    let material = args
        .material
        .clone()
        .unwrap_or_else(|| catalogs.materials.first().name.clone());
    if catalogs.materials.get(&material).is_none() {
        eprintln!(
            "note: material '{}' is not in the catalog, quoting as {}",
            material,
            catalogs.materials.first().name
        );
    }

    let mut session = QuoteSession::new(catalogs);
    session.set_parameters(ProcessParameters::new(material, args.quantity, args.cavities).with_color(color));

    match entered_geometry(&args)? {
        Some(geometry) => {
            session.begin_upload(args.file.clone().unwrap_or_else(|| UNTITLED.to_string()), JobId::new());
            session.set_geometry(geometry);
        }
        None => {
            let request = AnalysisRequest::new(args.file.clone().unwrap_or_else(|| UNTITLED.to_string()))?;
            let mut jobs = JobStore::new();
            let job = jobs.run(&MockAnalyzer::default(), request.clone());
            session.begin_upload(request.file_name, job);
            if session.poll(&jobs) == AnalysisOutcome::SubstitutedPlaceholder {
                eprintln!("note: analysis failed, quoting placeholder geometry");
            }
        }
    }

    let Some(breakdown) = session.breakdown() else {
        return Err(session
            .explain()
            .unwrap_or_else(|| QuoteError::not_computable("no quote available")));
    };

    let Some(saved) = session.snapshot() else {
        return Err(QuoteError::Internal {
            message: "breakdown present but snapshot unavailable".to_string(),
        });
    };

    if global.json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        report::print_quote(
            &saved.file_name,
            &saved.geometry,
            &saved.parameters,
            &saved.material_name,
            breakdown,
        );
    }

    if args.save {
        let id = with_history(global, |store| store.add(saved))?;
        if !global.json {
            println!();
            println!("Saved as {id}");
        }
    }
    Ok(())
}

pub fn materials(global: &GlobalOpts) -> QuoteResult<()> {
    let catalogs = CatalogConfig::load_or_builtin(global.catalog.as_deref())?;
    if global.json {
        println!("{}", serde_json::to_string_pretty(&catalogs.materials)?);
    } else {
        report::print_materials(&catalogs.materials);
    }
    Ok(())
}

pub fn machines(global: &GlobalOpts) -> QuoteResult<()> {
    let catalogs = CatalogConfig::load_or_builtin(global.catalog.as_deref())?;
    if global.json {
        println!("{}", serde_json::to_string_pretty(&catalogs.machines)?);
    } else {
        report::print_machines(&catalogs.machines);
    }
    Ok(())
}

pub fn catalog(global: &GlobalOpts) -> QuoteResult<()> {
    let catalogs = CatalogConfig::load_or_builtin(global.catalog.as_deref())?;
    if global.json {
        println!("{}", serde_json::to_string_pretty(&catalogs)?);
    } else {
        print!("{}", catalogs.to_toml_string()?);
    }
    Ok(())
}

pub fn history(cmd: HistoryCommand, global: &GlobalOpts) -> QuoteResult<()> {
    let path = history_path(global);
    match cmd {
        HistoryCommand::List => {
            let history = load_history_or_default(&path)?;
            if global.json {
                let entries: Vec<_> = history
                    .list()
                    .into_iter()
                    .map(|(id, quote)| serde_json::json!({ "id": id, "quote": quote }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if history.is_empty() {
                println!("No saved quotes in {}", path.display());
            } else {
                for (id, quote) in history.list() {
                    report::print_history_row(&id.to_string(), quote);
                }
            }
        }
        HistoryCommand::Show { id } => {
            let history = load_history_or_default(&path)?;
            let uuid = history.find_by_prefix(&id).ok_or_else(|| unknown_quote(&id))?;
            let quote = history.get(&uuid).ok_or_else(|| unknown_quote(&id))?;
            if global.json {
                println!("{}", serde_json::to_string_pretty(quote)?);
            } else {
                report::print_saved(&uuid.to_string(), quote);
            }
        }
        HistoryCommand::Delete { id } => {
            let removed = with_history(global, |store| {
                let uuid = store.history().find_by_prefix(&id)?;
                store.remove(&uuid).map(|quote| (uuid, quote))
            })?;
            let (uuid, quote) = removed.ok_or_else(|| unknown_quote(&id))?;
            if !global.json {
                println!("Deleted {} ({uuid})", quote.file_name);
            }
        }
    }
    Ok(())
}

fn unknown_quote(id: &str) -> QuoteError {
    QuoteError::invalid_input("id", id, "No saved quote matches this id (or the prefix is ambiguous)")
}

/// Load, modify and save the history under its lock.
fn with_history<R>(global: &GlobalOpts, f: impl FnOnce(&mut QuoteStore) -> R) -> QuoteResult<R> {
    let path = history_path(global);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| QuoteError::file_error("create directory", parent.display().to_string(), e.to_string()))?;
    }
    let _lock = FileLock::acquire(&path, current_user(global))?;

    let mut store = QuoteStore::new(load_history_or_default(&path)?);
    let result = f(&mut store);
    save_history(store.history(), &path)?;
    Ok(result)
}

fn history_path(global: &GlobalOpts) -> PathBuf {
    global.history.clone().unwrap_or_else(|| {
        directories::ProjectDirs::from("", "", "moldquote")
            .map(|dirs| dirs.data_dir().join("quotes.json"))
            .unwrap_or_else(|| PathBuf::from("quotes.json"))
    })
}

fn current_user(global: &GlobalOpts) -> String {
    global
        .user
        .clone()
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("USERNAME").ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Geometry typed by the user, if any. `None` means "ask the analyzer".
fn entered_geometry(args: &QuoteArgs) -> QuoteResult<Option<Geometry>> {
    let given = [args.volume, args.length, args.width, args.height, args.wall];
    if !args.interactive && given.iter().all(Option::is_none) {
        return Ok(None);
    }

    let fallback = Geometry::placeholder();
    let value = |v: Option<f64>, flag: &str, prompt: &str, default: f64| -> QuoteResult<f64> {
        match v {
            Some(v) => Ok(v),
            None if args.interactive => Ok(prompt_f64(prompt, default)),
            None => Err(QuoteError::invalid_input(
                flag,
                "missing",
                "Give all of --volume, --length, --width, --height and --wall, or use --interactive",
            )),
        }
    };

    let volume = value(args.volume, "--volume", "Part volume (cm³)", fallback.volume)?;
    let length = value(args.length, "--length", "Length (mm)", fallback.dimensions.length)?;
    let width = value(args.width, "--width", "Width (mm)", fallback.dimensions.width)?;
    let height = value(args.height, "--height", "Height (mm)", fallback.dimensions.height)?;
    let wall = value(args.wall, "--wall", "Wall thickness (mm)", fallback.wall_thickness)?;

    // A non-positive volume is reported by the calculator as not computable
    let geometry = Geometry::new(volume, Dimensions::new(length, width, height), wall, Accuracy::None);
    geometry.validate_measurements()?;
    info!(volume, length, width, height, wall, "Using entered geometry");
    Ok(Some(geometry))
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{prompt} [{default}]: ");
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use notebook_porter_config::Config;
use notebook_porter_engine::{
    BatchImport, JsonFileStore, Orientation, TableOptions, Workspace, WorkspaceStore,
    convert_source, export_file_name, import_markdown_files, import_tabular_files,
    parse_document, read_file, workspace_export_fallback, write_file,
};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "notebook-porter",
    version,
    about = "Move notebook documents in and out of fenced markdown and tables"
)]
struct Cli {
    /// Workspace file to use instead of the configured one
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import fenced markdown files (or pasted text) as documents
    Import {
        files: Vec<PathBuf>,

        /// Import this text instead of reading files. Reads stdin when nothing is given.
        #[arg(long)]
        text: Option<String>,
    },

    /// Write a document out as fenced markdown
    Export {
        /// Document id; the selected document when omitted
        #[arg(long)]
        id: Option<u64>,

        /// File name without extension; the document name when omitted
        #[arg(short, long)]
        output: Option<String>,

        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Turn delimited text or JSON files into variable declarations
    ImportTable {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(short, long)]
        separator: Option<char>,

        /// The first row is data, not column names
        #[arg(long)]
        no_headers: bool,

        /// Key records by column index even when there are headers
        #[arg(long)]
        index_keys: bool,

        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Render a one-column table as a flat array
        #[arg(long)]
        simplify: bool,

        /// Print the declarations instead of adding them to the workspace
        #[arg(long)]
        print: bool,

        /// Keep these options as the defaults for later imports
        #[arg(long)]
        remember: bool,
    },

    /// Replace the workspace with an exported one
    ImportWorkspace { file: PathBuf },

    /// Write the whole workspace out as JSON
    ExportWorkspace {
        #[arg(short, long)]
        output: Option<String>,

        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// List the documents in the workspace
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Row,
    Column,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Row => Orientation::Row,
            OrientationArg::Column => Orientation::Column,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());
    let mut config = Config::load_or_default()
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let workspace_path = cli
        .workspace
        .clone()
        .unwrap_or_else(|| config.workspace_path.clone());
    let store = JsonFileStore::new(workspace_path);
    log::debug!("Workspace store: {}", store.path().display());

    match cli.command {
        Command::Import { files, text } => import(&store, &files, text),
        Command::Export { id, output, dir } => export(&store, id, output.as_deref(), &dir),
        Command::ImportTable {
            files,
            separator,
            no_headers,
            index_keys,
            orientation,
            simplify,
            print,
            remember,
        } => {
            let mut options = config.tabular.clone();
            if let Some(separator) = separator {
                options.separator = separator;
            }
            if no_headers {
                options.has_headers = false;
            }
            if index_keys {
                options.use_header_names = false;
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if simplify {
                options.simplify_single_column = true;
            }
            options.validate()?;

            if remember {
                config.tabular = options.clone();
                config.save()?;
                log::info!("Saved table options to {}", config_path.display());
            }

            if print {
                print_tables(&files, &options)
            } else {
                import_tables(&store, &files, &options)
            }
        }
        Command::ImportWorkspace { file } => import_workspace(&store, &file),
        Command::ExportWorkspace { output, dir } => export_workspace(&store, output.as_deref(), &dir),
        Command::List => list(&store),
    }
}

fn import(store: &JsonFileStore, files: &[PathBuf], text: Option<String>) -> Result<()> {
    let batch = if files.is_empty() {
        let text = match text {
            Some(text) => text,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read stdin")?;
                buffer
            }
        };
        let document = parse_document(&text, None)?;
        BatchImport {
            documents: vec![document],
            failures: Vec::new(),
        }
    } else {
        if text.is_some() {
            bail!("Pass either files or --text, not both");
        }
        import_markdown_files(files)
    };

    commit(store, batch)
}

fn import_tables(store: &JsonFileStore, files: &[PathBuf], options: &TableOptions) -> Result<()> {
    commit(store, import_tabular_files(files, options))
}

fn print_tables(files: &[PathBuf], options: &TableOptions) -> Result<()> {
    for path in files {
        let content = read_file(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let declaration = convert_source(&file_name, &content, options)
            .with_context(|| format!("Failed to convert {}", path.display()))?;
        println!("{declaration}");
    }
    Ok(())
}

/// Merge whatever made it through into the workspace and report the rest
fn commit(store: &JsonFileStore, batch: BatchImport) -> Result<()> {
    for failure in &batch.failures {
        eprintln!("Skipped {}: {}", failure.file.display(), failure.error);
    }
    if !batch.any_succeeded() {
        bail!("Nothing was imported");
    }

    let mut workspace = store.load()?;
    let ids = workspace.apply_imports(batch.documents);
    store.save(&workspace)?;

    for id in ids {
        if let Some(document) = workspace.document(id) {
            println!("{id}\t{}", document.name);
        }
    }
    Ok(())
}

fn export(store: &JsonFileStore, id: Option<u64>, output: Option<&str>, dir: &Path) -> Result<()> {
    let workspace = store.load()?;
    let id = id.unwrap_or(workspace.selected_file);
    let markdown = workspace.export_markdown(Some(id))?;
    let fallback = workspace
        .document(id)
        .map(|document| document.name.as_str())
        .unwrap_or_default();

    let path = dir.join(export_file_name(output, fallback, "md"));
    write_file(&path, &markdown)?;
    log::info!("Exported document {id} to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

fn import_workspace(store: &JsonFileStore, file: &Path) -> Result<()> {
    let content = read_file(file)?;
    let workspace = Workspace::import_json(&content)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    store.save(&workspace)?;
    log::info!(
        "Imported workspace with {} files from {}",
        workspace.files.len(),
        file.display()
    );
    Ok(())
}

fn export_workspace(store: &JsonFileStore, output: Option<&str>, dir: &Path) -> Result<()> {
    let workspace = store.load()?;
    let json = workspace.to_json()?;

    let path = dir.join(export_file_name(
        output,
        &workspace_export_fallback(),
        "json",
    ));
    write_file(&path, &json)?;
    log::info!("Exported workspace to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

fn list(store: &JsonFileStore) -> Result<()> {
    let workspace = store.load()?;
    if workspace.files.is_empty() {
        println!("Workspace is empty");
        return Ok(());
    }

    for (id, document) in &workspace.files {
        let marker = if *id == workspace.selected_file { "*" } else { " " };
        println!("{marker} {id}\t{} ({} blocks)", document.name, document.len());
    }
    Ok(())
}

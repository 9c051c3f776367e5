//! drop-console CLI - strips console calls from JavaScript and TypeScript files

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use swc_plugin_drop_console::config::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
use swc_plugin_drop_console::{ConsoleFunction, DropConsole, PluginConfig};

#[derive(Parser)]
#[command(name = "drop-console")]
#[command(about = "Remove console call statements from JavaScript and TypeScript files")]
struct Cli {
    /// Files to transform
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Console methods to drop, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "log", value_parser = parse_function)]
    functions: Vec<ConsoleFunction>,

    /// Glob selecting the files to transform (repeatable)
    #[arg(long, default_value = DEFAULT_INCLUDE)]
    include: Vec<String>,

    /// Glob selecting the files to skip (repeatable)
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    exclude: Vec<String>,

    /// Do not write source maps
    #[arg(long)]
    no_source_map: bool,

    /// Directory for the transformed files and their `.map` files.
    /// Without it, a single file is transformed to stdout.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn parse_function(name: &str) -> Result<ConsoleFunction, String> {
    ConsoleFunction::from_name(name).ok_or_else(|| format!("unknown console method `{name}`"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.out_dir.is_none() && cli.files.len() > 1 {
        bail!("--out-dir is required when more than one file is given");
    }

    let config = PluginConfig::default()
        .with_functions(cli.functions)
        .with_include(cli.include)
        .with_exclude(cli.exclude)
        .with_source_map(!cli.no_source_map);
    let drop_console = DropConsole::new(config).context("Invalid options")?;

    for file in &cli.files {
        process_file(&drop_console, file, cli.out_dir.as_deref())?;
    }

    Ok(())
}

fn process_file(drop_console: &DropConsole, file: &Path, out_dir: Option<&Path>) -> Result<()> {
    let code = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let id = file.to_string_lossy();

    let (code, map) = match drop_console.transform(&code, &id) {
        Some(output) => {
            let map = output
                .map_json()
                .with_context(|| format!("Failed to serialize source map for {id}"))?;
            (output.code, map)
        }
        None => {
            info!("{id} left unchanged");
            (code, None)
        }
    };

    let Some(out_dir) = out_dir else {
        std::io::stdout()
            .write_all(code.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    };

    let file_name = file
        .file_name()
        .with_context(|| format!("{} has no file name", file.display()))?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let out_path = out_dir.join(file_name);
    fs::write(&out_path, code)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    if let Some(map) = map {
        let mut map_name = file_name.to_os_string();
        map_name.push(".map");
        let map_path = out_dir.join(map_name);
        fs::write(&map_path, map)
            .with_context(|| format!("Failed to write {}", map_path.display()))?;
    }

    info!("{id} -> {}", out_path.display());
    Ok(())
}

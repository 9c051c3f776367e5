//! Drops `console.*` call statements from JavaScript and TypeScript modules.
//!
//! Two entry points share the same matching rule:
//!
//! - [`transform`] and [`DropConsole::transform`] edit source text by byte
//!   range and regenerate a source map, for build tools that hand over text.
//! - `process_transform` is the SWC Wasm plugin entry (feature `plugin`) and
//!   edits the already-parsed program in place.

pub mod config;
pub mod edit;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod parse;
mod transform;

pub use config::{ConsoleFunction, PluginConfig};
pub use error::{DropConsoleError, Result};
pub use filter::{is_virtual_module, FileFilter};
pub use matcher::{is_console_call, is_console_statement};
pub use transform::{transform, DropConsole, DropConsoleTransformer, TransformOutput};

#[cfg(feature = "plugin")]
use swc_core::{
    ecma::ast::Program,
    plugin::{
        metadata::TransformPluginMetadataContextKind, plugin_transform,
        proxies::TransformPluginProgramMetadata,
    },
};

#[cfg(feature = "plugin")]
#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let config = match metadata.get_transform_plugin_config() {
        Some(json) => PluginConfig::from_json(&json),
        None => Ok(PluginConfig::default()),
    };
    let drop_console = match config.and_then(DropConsole::new) {
        Ok(drop_console) => drop_console,
        Err(err) => panic!("swc_plugin_drop_console: {err}"),
    };

    // Without a file name the module is treated like a virtual one.
    let filename = metadata.get_context(&TransformPluginMetadataContextKind::Filename);
    let skip = match filename.as_deref() {
        Some(id) => !drop_console.should_transform(id),
        None => drop_console.config().functions.is_empty(),
    };
    if skip {
        return program;
    }

    let removed = drop_console.transform_program(&mut program);
    log::trace!(
        "{}: dropped {removed} console call(s)",
        filename.as_deref().unwrap_or("<unknown>")
    );
    program
}

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::filter::FileFilter;

pub const DEFAULT_INCLUDE: &str = "**/*.{js,ts,jsx,tsx}";
pub const DEFAULT_EXCLUDE: &str = "**/node_modules/**";

/// Methods of the global `console` object that can be dropped.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ConsoleFunction {
    Assert,
    Clear,
    Context,
    Count,
    CountReset,
    CreateTask,
    Debug,
    Dir,
    Dirxml,
    Error,
    Group,
    GroupCollapsed,
    GroupEnd,
    Info,
    Log,
    Profile,
    ProfileEnd,
    Table,
    Time,
    TimeEnd,
    TimeLog,
    TimeStamp,
    Trace,
    Warn,
}

impl ConsoleFunction {
    pub const ALL: [ConsoleFunction; 24] = [
        Self::Assert,
        Self::Clear,
        Self::Context,
        Self::Count,
        Self::CountReset,
        Self::CreateTask,
        Self::Debug,
        Self::Dir,
        Self::Dirxml,
        Self::Error,
        Self::Group,
        Self::GroupCollapsed,
        Self::GroupEnd,
        Self::Info,
        Self::Log,
        Self::Profile,
        Self::ProfileEnd,
        Self::Table,
        Self::Time,
        Self::TimeEnd,
        Self::TimeLog,
        Self::TimeStamp,
        Self::Trace,
        Self::Warn,
    ];

    /// The property name as it is written after `console.`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assert => "assert",
            Self::Clear => "clear",
            Self::Context => "context",
            Self::Count => "count",
            Self::CountReset => "countReset",
            Self::CreateTask => "createTask",
            Self::Debug => "debug",
            Self::Dir => "dir",
            Self::Dirxml => "dirxml",
            Self::Error => "error",
            Self::Group => "group",
            Self::GroupCollapsed => "groupCollapsed",
            Self::GroupEnd => "groupEnd",
            Self::Info => "info",
            Self::Log => "log",
            Self::Profile => "profile",
            Self::ProfileEnd => "profileEnd",
            Self::Table => "table",
            Self::Time => "time",
            Self::TimeEnd => "timeEnd",
            Self::TimeLog => "timeLog",
            Self::TimeStamp => "timeStamp",
            Self::Trace => "trace",
            Self::Warn => "warn",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.as_str() == name)
    }
}

impl fmt::Display for ConsoleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginConfig {
    /// Glob patterns selecting the files to transform. `*` stays within one
    /// path segment, `**` crosses directories.
    #[serde(default = "default_include", deserialize_with = "one_or_many")]
    pub include: Vec<String>,

    /// Glob patterns selecting the files to leave alone. Checked before `include`.
    #[serde(default = "default_exclude", deserialize_with = "one_or_many")]
    pub exclude: Vec<String>,

    /// Whether a source map is generated alongside the transformed code.
    #[serde(default = "default_source_map")]
    pub source_map: bool,

    /// Console methods to drop. An empty list disables the transform.
    /// Names outside [`ConsoleFunction`] are rejected when the config is parsed.
    #[serde(default = "default_functions")]
    pub functions: Vec<ConsoleFunction>,
}

fn default_include() -> Vec<String> {
    vec![DEFAULT_INCLUDE.to_owned()]
}

fn default_exclude() -> Vec<String> {
    vec![DEFAULT_EXCLUDE.to_owned()]
}

fn default_source_map() -> bool {
    true
}

fn default_functions() -> Vec<ConsoleFunction> {
    vec![ConsoleFunction::Log]
}

/// Accepts either a single pattern or an array of patterns.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(pattern) => vec![pattern],
        OneOrMany::Many(patterns) => patterns,
    })
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: default_exclude(),
            source_map: default_source_map(),
            functions: default_functions(),
        }
    }
}

impl PluginConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_source_map(mut self, source_map: bool) -> Self {
        self.source_map = source_map;
        self
    }

    pub fn with_functions(mut self, functions: Vec<ConsoleFunction>) -> Self {
        self.functions = functions;
        self
    }

    /// Compiles `include` and `exclude` into a [`FileFilter`].
    pub fn validate(&self) -> Result<FileFilter> {
        FileFilter::new(self.include.as_slice(), self.exclude.as_slice())
    }
}

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::Result;

/// Virtual modules produced by other build plugins carry this prefix.
pub const VIRTUAL_MODULE_PREFIX: char = '\0';

pub fn is_virtual_module(id: &str) -> bool {
    id.starts_with(VIRTUAL_MODULE_PREFIX)
}

/// Include/exclude glob filter over module ids.
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// `None` when no include pattern was given.
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl FileFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        let include = if include.is_empty() {
            None
        } else {
            Some(build_glob_set(include)?)
        };

        Ok(Self {
            include,
            exclude: build_glob_set(exclude)?,
        })
    }

    /// An id is accepted when no exclude pattern matches and either the include
    /// list is empty or one of its patterns matches.
    pub fn matches(&self, id: &str) -> bool {
        let id = normalize_id(id);

        if self.exclude.is_match(&id) {
            return false;
        }

        self.include.as_ref().map_or(true, |include| include.is_match(&id))
    }

    /// Virtual modules bypass the include/exclude patterns.
    pub fn should_transform(&self, id: &str) -> bool {
        is_virtual_module(id) || self.matches(id)
    }
}

fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern.as_ref())
            .literal_separator(true)
            .build()?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Drops a `?query` suffix and uses `/` as the separator.
fn normalize_id(id: &str) -> String {
    let path = id.split_once('?').map_or(id, |(path, _)| path);
    path.replace('\\', "/")
}

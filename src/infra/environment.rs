// ============================================================
// Layer 6 — Backend Environment
// ============================================================
// The numeric backend reads its configuration from environment
// variables, and freezes it when it first initialises. Instead
// of mutating this process's environment, the variables are
// collected into a BackendEnv that the launcher exports into
// every child process.
//
// Contents:
//   MKL_THREADING_LAYER = GNU
//   THEANO_FLAGS        = mode=FAST_RUN,device=<dev>,floatX=float32,
//                         force_device=True,on_unused_input=warn,
//                         optimizer=fast_run[,dnn.enabled=True]
//
// A variable the caller already exported is never overridden.
//
// Deprecated: an `environment.sh` in the working directory may
// list extra library search paths (`export LD_LIBRARY_PATH=...`).
// Those are spliced ahead of the inherited value.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::domain::device::Device;

pub const THREADING_LAYER_VAR: &str = "MKL_THREADING_LAYER";
pub const BACKEND_FLAGS_VAR:   &str = "THEANO_FLAGS";
pub const LEGACY_ENV_FILE:     &str = "environment.sh";

/// Variables the legacy file is allowed to extend.
const SEARCH_PATH_VARS: [&str; 4] = ["PATH", "LD_LIBRARY_PATH", "LIBRARY_PATH", "CPATH"];

/// Composite flag string for the backend on `device`.
pub fn backend_flags(device: Device) -> String {
    let mut flags = format!(
        "mode=FAST_RUN,device={device},floatX=float32,force_device=True,\
         on_unused_input=warn,optimizer=fast_run"
    );
    if device.is_gpu() {
        flags.push_str(",dnn.enabled=True");
    }
    flags
}

/// Variables to export into backend processes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendEnv {
    vars: BTreeMap<String, String>,
}

impl BackendEnv {
    /// Compute the backend environment for `device`.
    ///
    /// `inherited` is the caller's environment; `legacy` the parsed
    /// `environment.sh`, if one was found.
    pub fn resolve(
        device:    Device,
        inherited: &HashMap<String, String>,
        legacy:    Option<&LegacyEnvFile>,
    ) -> Self {
        let mut vars = BTreeMap::new();

        if let Some(legacy) = legacy {
            for (name, value) in legacy.spliced(inherited) {
                vars.insert(name, value);
            }
        }

        let defaults = [
            (THREADING_LAYER_VAR, "GNU".to_string()),
            (BACKEND_FLAGS_VAR,   backend_flags(device)),
        ];
        for (name, value) in defaults {
            if inherited.contains_key(name) {
                tracing::debug!("{name} already set by caller, leaving it untouched");
            } else {
                vars.insert(name.to_string(), value);
            }
        }

        Self { vars }
    }

    /// Resolve against the real process environment and the legacy
    /// file in `cwd`.
    pub fn from_process(device: Device, cwd: &Path) -> Result<Self> {
        let inherited: HashMap<String, String> = std::env::vars().collect();
        let legacy = LegacyEnvFile::load(cwd)?;
        Ok(Self::resolve(device, &inherited, legacy.as_ref()))
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

// ─── Legacy environment file ─────────────────────────────────────────────────

/// Search-path assignments read from a deprecated `environment.sh`,
/// in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyEnvFile {
    entries: Vec<(String, Vec<String>)>,
}

impl LegacyEnvFile {
    /// Load `environment.sh` from `dir`. Ok(None) if there is none.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(LEGACY_ENV_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        tracing::warn!(
            "Reading '{}': loading library paths from this file is deprecated and will be removed. \
             Export the variables in your shell instead.",
            path.display()
        );
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        let file = Self::parse(&text);
        if file.is_empty() {
            tracing::debug!("No search-path assignments found in '{}'", path.display());
        }
        Ok(Some(file))
    }

    /// Parse `NAME=value` / `export NAME=value` lines. Only search-path
    /// variables are kept.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if !SEARCH_PATH_VARS.contains(&name) {
                tracing::debug!("Ignoring '{name}' in {LEGACY_ENV_FILE}");
                continue;
            }

            let value = unquote(value.trim());
            let self_refs = [format!("${name}"), format!("${{{name}}}")];
            let parts: Vec<String> = value
                .split(':')
                .filter(|p| !p.is_empty() && !self_refs.iter().any(|r| r == p))
                .map(str::to_string)
                .collect();
            if !parts.is_empty() {
                entries.push((name.to_string(), parts));
            }
        }

        Self { entries }
    }

    /// Final value of each variable after applying every entry, in
    /// order, ahead of the inherited value.
    fn spliced(&self, inherited: &HashMap<String, String>) -> BTreeMap<String, String> {
        let mut current: BTreeMap<String, String> = BTreeMap::new();

        for (name, parts) in &self.entries {
            let previous = current
                .get(name)
                .cloned()
                .or_else(|| inherited.get(name).cloned())
                .unwrap_or_default();

            let mut value = parts.join(":");
            if !previous.is_empty() {
                value.push(':');
                value.push_str(&previous);
            }
            current.insert(name.clone(), value);
        }

        current
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

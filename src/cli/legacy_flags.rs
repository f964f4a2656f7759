// ============================================================
// Layer 1 — Single-dash Flag Spellings
// ============================================================
// Users and existing scripts type `-newModel`, `-train`, `-dev`
// and so on with a single dash. clap only knows multi-letter
// flags with two dashes, so those spellings are rewritten
// before parsing:
//
//   -newModel cfg     → --newModel cfg
//   -dev=cuda0        → --dev=cuda0
//
// Only the known flag names are touched. Values and anything
// after a bare `--` pass through unchanged.

use std::ffi::OsString;

/// Multi-letter flags accepted with a single dash.
pub const LONG_FLAGS: [&str; 8] = [
    "newModel",
    "train",
    "test",
    "model",
    "dev",
    "pretrained",
    "layers",
    "resetOptimizer",
];

/// Rewrite single-dash long flags to their double-dash form.
/// The first item (program name) is kept as is.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        out.push(rewrite(&arg).unwrap_or(arg));
    }

    out
}

fn rewrite(arg: &OsString) -> Option<OsString> {
    let s = arg.to_str()?;
    let body = s.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    LONG_FLAGS
        .contains(&name)
        .then(|| OsString::from(format!("-{s}")))
}

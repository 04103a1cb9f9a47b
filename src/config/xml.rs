//! `config.xml` loading and the `--init-config` template.
//!
//! A missing file means defaults, unless `$EDMV_CONFIG` names it explicitly.
//! Unknown elements are an error so a misspelt option never silently does nothing.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{DEFAULT_DIFF_ARGS, DEFAULT_MISMATCH_DELAY};

use crate::listing::SortKey;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// On-disk shape; every element is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    editor: Option<String>,
    diff_args: Option<String>,
    safe: Option<bool>,
    fast: Option<bool>,
    #[serde(rename = "loop")]
    loop_mode: Option<bool>,
    recursive: Option<bool>,
    hidden: Option<bool>,
    sort: Option<String>,
    reverse: Option<bool>,
    recursive_delete: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    mismatch_delay_ms: Option<u64>,
}

// Numbers may be padded (`<x> 10 </x>`); anything unparsable counts as absent.
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<u64>().ok()))
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    cfg.editor = non_empty(parsed.editor);
    if let Some(args) = parsed.diff_args {
        cfg.diff_args = args.trim().to_string();
    }

    cfg.safe = parsed.safe.unwrap_or(false);
    cfg.fast = parsed.fast.unwrap_or(false);
    cfg.loop_mode = parsed.loop_mode.unwrap_or(false);
    cfg.recursive_delete = parsed.recursive_delete.unwrap_or(false);

    cfg.listing.recursive = parsed.recursive.unwrap_or(false);
    cfg.listing.hidden = parsed.hidden.unwrap_or(false);
    cfg.listing.reverse = parsed.reverse.unwrap_or(false);
    if let Some(s) = non_empty(parsed.sort) {
        cfg.listing.sort = s
            .parse::<SortKey>()
            .map_err(|e| anyhow::anyhow!("config <sort>: {e}"))?;
    }

    if let Some(s) = non_empty(parsed.log_level) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(|e| anyhow::anyhow!("config <log_level>: {e}"))?;
    }
    cfg.log_file = non_empty(parsed.log_file).map(PathBuf::from);

    cfg.mismatch_delay = parsed
        .mismatch_delay_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_MISMATCH_DELAY);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config '{}'", path.display()))
}

/// Load the effective file config: `$EDMV_CONFIG` or the default location.
/// Returns defaults when no file exists. An explicit `$EDMV_CONFIG` that does not exist is an error.
pub fn load_config() -> Result<Config> {
    let explicit = std::env::var_os(super::CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let Some(path) = default_config_path() else {
        debug!("no config location could be determined; using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        if explicit {
            bail!(
                "{} points to '{}', which does not exist",
                super::CONFIG_ENV,
                path.display()
            );
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }

    load_config_from_xml_path(&path)
}

/// Create a commented template config file (and its parent directory, best-effort 0700).
/// Refuses to overwrite an existing file or to write below a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("config already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/edmv.log".into());

    let content = format!(
        "<!--\n  edmv configuration (XML). CLI flags override these values.\n\n    editor             -> editor command line (default: $VISUAL, $EDITOR, vim)\n    diff_args          -> editor arguments for side-by-side compare mode\n    safe               -> never overwrite: pick \"name (2).ext\" instead\n    fast               -> skip the confirmation pass\n    loop               -> edit again after applying changes\n    recursive          -> list subdirectories too\n    hidden             -> include dot entries\n    sort               -> name | size | modified | accessed | extension | random\n    reverse            -> reverse the sort order\n    recursive_delete   -> allow deleting non-empty directories\n    log_level          -> quiet | normal | info | debug\n    log_file           -> optional log file (console logging continues)\n    mismatch_delay_ms  -> pause before reopening the editor after a line-count change\n-->\n<config>\n  <editor></editor>\n  <diff_args>{}</diff_args>\n  <safe>false</safe>\n  <fast>false</fast>\n  <loop>false</loop>\n  <recursive>false</recursive>\n  <hidden>false</hidden>\n  <sort>name</sort>\n  <reverse>false</reverse>\n  <recursive_delete>false</recursive_delete>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <mismatch_delay_ms>{}</mismatch_delay_ms>\n</config>\n",
        DEFAULT_DIFF_ARGS,
        suggested_log,
        DEFAULT_MISMATCH_DELAY.as_millis()
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

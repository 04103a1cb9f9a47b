use edmv::config::CONFIG_ENV;
use edmv::{LogLevel, SortKey, default_config_path, load_config};
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

struct EnvGuard;

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        unsafe { std::env::set_var(CONFIG_ENV, value) };
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe { std::env::remove_var(CONFIG_ENV) };
    }
}

#[test]
#[serial]
fn explicit_config_is_loaded() {
    let td = tempdir().unwrap();
    let p = td.path().join("edmv.xml");
    fs::write(
        &p,
        r#"<config>
  <fast>true</fast>
  <recursive>true</recursive>
  <sort>extension</sort>
  <recursive_delete>true</recursive_delete>
  <log_level>quiet</log_level>
  <mismatch_delay_ms>0</mismatch_delay_ms>
</config>"#,
    )
    .unwrap();
    let _g = EnvGuard::set(&p);

    assert_eq!(default_config_path(), Some(p.clone()));
    let cfg = load_config().unwrap();
    assert!(cfg.fast);
    assert!(cfg.listing.recursive);
    assert!(cfg.recursive_delete);
    assert_eq!(cfg.listing.sort, SortKey::Extension);
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert_eq!(cfg.mismatch_delay, Duration::ZERO);
}

#[test]
#[serial]
fn explicit_but_missing_config_is_an_error() {
    let td = tempdir().unwrap();
    let _g = EnvGuard::set(&td.path().join("absent.xml"));
    let err = load_config().unwrap_err();
    assert!(err.to_string().contains("does not exist"), "{err}");
}

#[test]
#[serial]
fn malformed_xml_is_an_error() {
    let td = tempdir().unwrap();
    let p = td.path().join("bad.xml");
    fs::write(&p, "<config><safe>maybe</safe></config>").unwrap();
    let _g = EnvGuard::set(&p);
    assert!(load_config().is_err());
}

#[test]
#[serial]
fn empty_values_fall_back_to_defaults() {
    let td = tempdir().unwrap();
    let p = td.path().join("c.xml");
    fs::write(&p, "<config>\n  <editor>   </editor>\n  <log_file></log_file>\n</config>\n").unwrap();
    let _g = EnvGuard::set(&p);
    let cfg = load_config().unwrap();
    assert!(cfg.editor.is_none());
    assert!(cfg.log_file.is_none());
    assert_eq!(cfg.diff_args, "-d");
}

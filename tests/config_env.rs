mod support;

use std::path::PathBuf;

use sentidash::app_dirs::{APP_DIR_NAME, AppDirs, CONFIG_HOME_ENV};
use sentidash::config::{self, AppConfig, CONFIG_FILE_NAME, DEFAULT_BATCH_SIZE};

#[test]
fn config_home_variable_moves_the_app_folder() {
    let temp = tempfile::tempdir().expect("tempdir");
    // SAFETY: no other test in this binary reads or writes the variable.
    unsafe {
        std::env::set_var(CONFIG_HOME_ENV, temp.path());
    }
    let resolved = AppDirs::resolve();
    let path = config::config_path();
    // SAFETY: as above.
    unsafe {
        std::env::remove_var(CONFIG_HOME_ENV);
    }

    assert_eq!(
        resolved.expect("resolve").root(),
        temp.path().join(APP_DIR_NAME)
    );
    assert_eq!(
        path.expect("config path"),
        temp.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
    );
}

#[test]
fn settings_persist_in_the_app_folder() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dirs = AppDirs::under(temp.path());
    let path = config::config_path_in(&dirs).expect("config path");
    assert_eq!(
        config::load_from_path(&path).expect("defaults").analysis.batch_size,
        DEFAULT_BATCH_SIZE
    );

    let mut updated = AppConfig::default();
    updated.last_upload_dir = Some(PathBuf::from("/data/reviews"));
    updated.analysis.batch_size = 25;
    config::save_to_path(&updated, &path).expect("save");
    assert!(path.is_file());
    assert_eq!(config::load_from_path(&path).expect("reload"), updated);
}

#[test]
fn zero_batch_size_is_clamped_on_load() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("nested").join(CONFIG_FILE_NAME);
    support::write_fixture(&path, "[analysis]\nbatch_size = 0\n");
    assert_eq!(config::load_from_path(&path).expect("load").analysis.batch_size, 1);
}

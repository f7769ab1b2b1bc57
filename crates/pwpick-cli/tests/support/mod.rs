use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub fn new_command_with_temp_home() -> (Command, TempDir) {
    let temp_home = TempDir::new().expect("temp home");
    let mut command = Command::cargo_bin("pwpick").expect("pwpick binary");
    command.env("HOME", temp_home.path());
    (command, temp_home)
}

pub fn write_config(home: &Path, raw: &str) {
    let config_dir = home.join(".config").join("pwpick");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(config_dir.join("config.toml"), raw).expect("write config");
}

pub fn write_listing(home: &Path, name: &str, raw: &str) -> PathBuf {
    let path = home.join(name);
    fs::write(&path, raw).expect("write listing");
    path
}

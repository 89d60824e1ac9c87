//! Shared test fixture: a temp project dir with a Tiltfile host.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tiltflags::config::{FlagsState, CONFIG_FILE_NAME};
use tiltflags::flags::{FlagsExtension, FlagsSettings};
use tiltflags::script::{CallArgs, ExecResult, ScriptHost};

pub struct Fixture {
    dir: TempDir,
    args: Vec<String>,
    state: FlagsState,
}

impl Fixture {
    pub fn new(state: FlagsState, args: &[&str]) -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            args: args.iter().map(|s| s.to_string()).collect(),
            state,
        }
    }

    pub fn join_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn file(&self, name: &str, contents: &str) {
        fs::write(self.join_path(name), contents).expect("Failed to write fixture file");
    }

    /// A fresh execution of the project's Tiltfile.
    pub fn host(&self) -> ScriptHost {
        ScriptHost::new(self.join_path("Tiltfile"))
            .with_extension(FlagsExtension::new(self.args.clone(), self.state))
    }

    /// The persisted config, decoded.
    pub fn config(&self) -> BTreeMap<String, Vec<String>> {
        let raw = fs::read_to_string(self.join_path(CONFIG_FILE_NAME))
            .expect("Failed to read tilt_config.json");
        serde_json::from_str(&raw).expect("tilt_config.json is not a string-list object")
    }

    pub fn write_config(&self, config: &BTreeMap<String, Vec<String>>) {
        let raw = serde_json::to_string(config).unwrap();
        self.file(CONFIG_FILE_NAME, &raw);
    }
}

pub fn define(host: &mut ScriptHost, name: &str) {
    host.call("flags.define_string_list", CallArgs::new().arg(name))
        .expect("define_string_list failed");
}

pub fn define_positional(host: &mut ScriptHost, name: &str) {
    host.call(
        "flags.define_string_list",
        CallArgs::new().arg(name).kwarg("args", true),
    )
    .expect("define_string_list failed");
}

pub fn settings(result: &ExecResult) -> &FlagsSettings {
    FlagsSettings::from_result(result).expect("flags settings missing from result")
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn string_map(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    pairs.iter().map(|(k, v)| (k.to_string(), strings(v))).collect()
}

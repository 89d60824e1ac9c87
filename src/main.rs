use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;

use tiltflags::config::FlagsState;
use tiltflags::flags::{FlagsExtension, FlagsSettings};
use tiltflags::model::Manifest;
use tiltflags::script::{CallArgs, CallError, ScriptHost, Value};

/// Host state file, next to `tilt_config.json`.
const STATE_FILE_NAME: &str = ".tilt_flags_state.json";

/// Drive a Tiltfile's flag definitions, parse and resource selection.
#[derive(Parser, Debug)]
#[command(name = "tilt-flags", version)]
struct Cli {
    /// Directory holding the Tiltfile and tilt_config.json
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Define a string-list flag (repeatable)
    #[arg(long = "flag", value_name = "NAME")]
    flags: Vec<String>,

    /// Define the flag that takes positional args
    #[arg(long, value_name = "NAME")]
    positional: Option<String>,

    /// Declare a resource (repeatable)
    #[arg(long = "manifest", value_name = "NAME")]
    manifests: Vec<String>,

    /// Select resources from the parsed values of this flag
    #[arg(long, value_name = "FLAG", conflicts_with = "no_parse")]
    select: Option<String>,

    /// Skip flags.parse; bare args then name resources directly
    #[arg(long)]
    no_parse: bool,

    /// Args for the Tiltfile, after `--`
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() {
    tiltflags::logging::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let state_path = cli.dir.join(STATE_FILE_NAME);
    let state = load_state(&state_path)?;

    let mut host = ScriptHost::new(cli.dir.join("Tiltfile"))
        .with_extension(FlagsExtension::new(cli.args.clone(), state));
    let outcome = execute(&mut host, &cli);
    let result = host.finish();

    for line in result.lines() {
        println!("{line}");
    }
    outcome?;

    let settings =
        FlagsSettings::from_result(&result).context("flags extension left no settings")?;
    save_state(&state_path, &settings.flags_state)?;

    let manifests: Vec<Manifest> = cli
        .manifests
        .iter()
        .map(|name| Manifest::new(name.as_str()))
        .collect();
    let active = settings.resources(&cli.args, &manifests);
    let names: Vec<&str> = active.iter().map(|m| m.name.as_str()).collect();
    println!("resources: {}", names.join(", "));
    Ok(())
}

/// The calls a Tiltfile would make, in order.
fn execute(host: &mut ScriptHost, cli: &Cli) -> Result<(), CallError> {
    if let Some(name) = &cli.positional {
        host.call(
            "flags.define_string_list",
            CallArgs::new().arg(name.as_str()).kwarg("args", true),
        )?;
    }
    for name in &cli.flags {
        host.call("flags.define_string_list", CallArgs::new().arg(name.as_str()))?;
    }

    if cli.no_parse {
        return Ok(());
    }

    let cfg = host.call("flags.parse", CallArgs::new())?;
    if let Value::Dict(entries) = &cfg {
        for (name, values) in entries {
            host.print(&[Value::from(format!("{name}={values}"))]);
        }
    }

    if let Some(flag) = &cli.select {
        let names = cfg.get_or(flag, Value::List(Vec::new()));
        host.call("flags.set_resources", CallArgs::new().arg(names))?;
    }
    Ok(())
}

fn load_state(path: &Path) -> anyhow::Result<FlagsState> {
    if !path.exists() {
        return Ok(FlagsState::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse state file '{}'", path.display()))
}

fn save_state(path: &Path, state: &FlagsState) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(path, content + "\n")
        .with_context(|| format!("failed to write state file '{}'", path.display()))
}

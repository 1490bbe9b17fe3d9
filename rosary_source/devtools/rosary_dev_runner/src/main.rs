use rosary_app::{ScriptCommand, ScriptedRunner, entry};
use std::{env, fs, path::PathBuf, process::ExitCode};

const DEFAULT_SCRIPT: &str = "next\nwait 1.2\nzoom-in\nwait 1.2\nnext\nwait 1.2\nreset\nwait 1.2\n";

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn current_dir_fallback() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = env::args().collect();

    let root = parse_flag_value(&args, "--path")
        .map(PathBuf::from)
        .unwrap_or_else(current_dir_fallback);
    let name = parse_flag_value(&args, "--name").unwrap_or_else(|| "Rosary".to_string());
    let clear_session = has_flag(&args, "--clear-session");

    let script = match parse_flag_value(&args, "--script") {
        Some(path) => match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                log::error!("failed to read script {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => DEFAULT_SCRIPT.to_string(),
    };
    let commands = match ScriptCommand::parse_script(&script) {
        Ok(commands) => commands,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut runner = match parse_flag_value(&args, "--fps").map(|raw| raw.parse::<f32>()) {
        Some(Ok(fps)) => ScriptedRunner::with_fps_cap(fps),
        Some(Err(err)) => {
            log::error!("invalid --fps: {err}");
            return ExitCode::FAILURE;
        }
        None => ScriptedRunner::new(),
    };

    let mut app = match entry::create_app_from_project_dir(&root, &name, clear_session) {
        Ok(app) => app,
        Err(err) => {
            log::error!("failed to start {name}: {err}");
            return ExitCode::FAILURE;
        }
    };

    runner.run(&mut app, &commands);
    ExitCode::SUCCESS
}

use std::env;
use std::sync::Arc;

use cantrip_core::config::expand_path;
use cantrip_core::{language, EchoEngine, Repl, ReplConfig};

mod repl;

fn help() -> ! {
    println!("Usage: cantrip [OPTIONS] [ENGINE]");
    println!();
    println!("Engines: lua (default), javascript, tengo");
    println!();
    println!("Options:");
    println!("  --plain           Use the basic line editor (no completion menu)");
    println!("  --no-highlight    Disable syntax highlighting");
    println!("  --no-multiline    Disable multi-line continuation");
    println!("  --history PATH    History file location (default: ~/.cantrip_history)");
    println!("  --no-history      Do not load or save a history file");
    println!("  --version         Show version");
    println!("  -h, --help        Show this help");
    std::process::exit(0);
}

fn unknown_option(opt: &str) -> ! {
    eprintln!("unknown option: {}", opt);
    help();
}

fn main() {
    let mut engine_name: Option<String> = None;
    let mut plain = false;
    let mut no_highlight = false;
    let mut no_multiline = false;
    let mut no_history = false;
    let mut history_path: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => help(),
            "--version" => {
                println!("cantrip {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--plain" => plain = true,
            "--no-highlight" => no_highlight = true,
            "--no-multiline" => no_multiline = true,
            "--no-history" => no_history = true,
            "--history" => match args.next() {
                Some(path) => history_path = Some(path),
                None => {
                    eprintln!("--history requires a path");
                    std::process::exit(1);
                }
            },
            opt if opt.starts_with('-') => unknown_option(opt),
            name => {
                if engine_name.is_some() {
                    eprintln!("only one engine may be given");
                    std::process::exit(1);
                }
                engine_name = Some(name.to_string());
            }
        }
    }

    let engine_name = engine_name.unwrap_or_else(|| "lua".to_string());
    if language::profile(&engine_name).is_none() {
        let supported: Vec<&str> = language::supported().iter().map(|p| p.name).collect();
        eprintln!(
            "unknown engine: {} (supported: {})",
            engine_name,
            supported.join(", ")
        );
        std::process::exit(1);
    }

    let mut config = ReplConfig::for_engine(engine_name.clone());
    if no_highlight {
        config.syntax_highlight = false;
    }
    if no_multiline {
        config.multi_line = false;
    }
    if no_history {
        config.history_file = None;
        config.save_history = false;
    }
    if let Some(path) = history_path {
        config.history_file = Some(expand_path(&path));
    }

    let engine = Arc::new(EchoEngine::new(engine_name));
    let mut session = match Repl::new(config, engine) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = if plain {
        session.run()
    } else {
        repl::run_interactive(&mut session)
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

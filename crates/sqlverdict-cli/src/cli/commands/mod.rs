use super::args::*;

pub mod evaluate;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const THRESHOLD_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Evaluate(args) => evaluate::run(args).await,
        Command::Init(args) => cmd_init(args),
        Command::Judges => {
            for name in sqlverdict_judges::default_registry().names() {
                println!("{}", name);
            }
            Ok(exit_codes::OK)
        }
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<i32> {
    if args.config.exists() {
        eprintln!("config {} already exists, leaving it untouched", args.config.display());
        return Ok(exit_codes::OK);
    }
    if let Some(parent) = args.config.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    sqlverdict_core::config::write_sample_config(&args.config)?;
    eprintln!("created {}", args.config.display());
    Ok(exit_codes::OK)
}

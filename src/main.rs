use anyhow::{bail, Result};
use pico_args::Arguments;
use promptline::*;
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
struct Args {
    command: Option<String>,
    config: Option<PathBuf>,
    theme: Option<String>,
    status: Option<i32>,
    duration: Option<u64>,
    dirstack: Option<usize>,
    help: bool,
    rest: Vec<String>,
}

impl Args {
    fn from_env() -> Result<Self> {
        let mut args = Arguments::from_env();

        let command = args.subcommand()?;
        let help = args.contains(["-h", "--help"]);
        let config = args
            .opt_value_from_str::<_, PathBuf>("--config")?
            .or_else(|| env::var("PROMPTLINE_CONFIG").ok().map(PathBuf::from));
        let theme = args.opt_value_from_str("--theme")?;
        let status = args.opt_value_from_str("--status")?;
        let duration = args.opt_value_from_str("--duration")?;
        let dirstack = args.opt_value_from_str("--dirstack")?;
        let rest = args
            .finish()
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        Ok(Self {
            command,
            config,
            theme,
            status,
            duration,
            dirstack,
            help,
            rest,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::from_env()?;

    let command = match args.command.as_deref() {
        Some(command) if !args.help => command,
        _ => {
            print_help();
            return Ok(());
        }
    };

    if command == "init" {
        let shell_name = args.rest.first().map(String::as_str).unwrap_or("zsh");
        let binary = env::current_exe()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "promptline".to_string());
        print!("{}", shell::init_script(shell_name, &binary)?);
        return Ok(());
    }

    let mut config = config::load_config(args.config.clone()).await?;
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }

    let mut session = PromptSession::new(&config, Arc::new(SystemRunner));
    if let Some(depth) = args.dirstack {
        session.set_dir_stack_depth(depth);
    }

    match command {
        "prompt" => {
            session.record_host_timing(args.status, args.duration);
            let rendered = session.render_prompt().await;
            write_prompt(&rendered, &mut io::stdout().lock(), &mut io::stderr().lock())?;
        }
        "right" => {
            println!("{}", session.render_right().await);
        }
        "serve" => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve::serve(&mut session, stdin, tokio::io::stdout()).await?;
        }
        other => bail!("unknown command: {} (see --help)", other),
    }

    Ok(())
}

fn print_help() {
    println!("promptline - toggle-driven shell prompt");
    println!();
    println!("USAGE:");
    println!("    promptline <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    prompt                 Print left and right prompts, one per line (transient line on stderr)");
    println!("    right                  Print only the right prompt");
    println!("    serve                  Answer preexec/precmd/render requests on stdin");
    println!("    init [zsh]             Print the shell hook script");
    println!();
    println!("OPTIONS:");
    println!("    --config <FILE>        Custom config file path");
    println!("    --theme <THEME>        Theme: dark, light, nord, plain [default: dark]");
    println!("    --status <CODE>        Exit code of the command that just finished");
    println!("    --duration <SECS>      How long that command ran");
    println!("    --dirstack <DEPTH>     Directory-stack depth");
    println!("    -h, --help             Show this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    PROMPTLINE_CONFIG      Override config path");
    println!("    PROMPTLINE_THEME       Override theme");
    println!("    PROMPTLINE_TIMEOUT_MS  Per-command timeout for external tools");
    println!("    PROMPTLINE_DISABLE     Comma-separated features to switch off");
    println!("    PROMPTLINE_DIRSTACK    Directory-stack depth");
    println!("    PROMPTLINE_DEBUG       Enable debug logging on stderr");
}

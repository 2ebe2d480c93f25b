//! Parley CLI entry point.

use parley_foundation::InvokerKind;
use parley_runtime::{Shell, ShellConfig, init_logging};
use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config_file: Option<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    invoker: Option<String>,
    console: bool,
    grants: Vec<String>,
    log_level: Option<String>,
    commands: Vec<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value_of(args: &[String], i: usize, flag: &str) -> Result<String, Box<dyn std::error::Error>> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--console" => config.console = true,
            flag @ ("-c" | "--config") => {
                i += 1;
                config.config_file = Some(PathBuf::from(value_of(&args, i, flag)?));
            }
            "--as" => {
                i += 1;
                config.invoker = Some(value_of(&args, i, "--as")?);
            }
            "--grant" => {
                i += 1;
                config.grants.push(value_of(&args, i, "--grant")?);
            }
            "--log" => {
                i += 1;
                config.log_level = Some(value_of(&args, i, "--log")?);
            }
            "--exec" => {
                i += 1;
                config.commands.push(value_of(&args, i, "--exec")?);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            command => config.commands.push(command.to_string()),
        }
        i += 1;
    }

    if config.console && config.invoker.is_some() {
        return Err("--console and --as cannot be combined".into());
    }

    Ok(config)
}

fn shell_config(cli: &CliConfig) -> Result<ShellConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config_file {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(name) = &cli.invoker {
        config = config.with_invoker(name.clone(), InvokerKind::Player);
    }
    if cli.console {
        config = config.with_invoker("CONSOLE", InvokerKind::Console);
    }
    for permission in &cli.grants {
        config = config.with_permission(permission.clone());
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level.clone());
    }
    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("parley {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = shell_config(&cli)?;
    init_logging(&config.log_level);

    let mut shell = Shell::new(&config)?;

    // Trailing commands run before stdin input and replace the shell
    for command in &cli.commands {
        shell.execute(command);
    }

    if cli.batch_mode {
        shell.run_batch(io::stdin().lock())?;
        return Ok(());
    }

    if !cli.commands.is_empty() {
        return Ok(());
    }

    shell.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mParley\x1b[0m - Command dispatch shell

\x1b[1mUSAGE:\x1b[0m
    parley [OPTIONS] [COMMANDS...]

\x1b[1mARGUMENTS:\x1b[0m
    [COMMANDS...]    Command lines to run instead of starting the shell

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -c, --config PATH    Load shell configuration from a TOML file
    -b, --batch          Run command lines read from stdin (no shell)
    --as NAME            Run commands as the named player
    --console            Run commands as the console
    --grant PERM         Grant a permission (repeatable)
    --log LEVEL          Default log filter (RUST_LOG overrides it)
    --exec COMMAND       Run a command line (repeatable)

\x1b[1mEXAMPLES:\x1b[0m
    parley                                   Start the shell as the console
    parley --as Alice                        Start the shell as player Alice
    parley --as Bob --exec \"/shop list 2\"    Run one command as Bob
    parley -b < script.txt                   Run a script of commands

\x1b[1mSHELL COMMANDS:\x1b[0m
    /shop list [all|admin|player] [page]    List shops
    /shop give <player> <amount>            Give currency (shop.give)
    /shop price <item> [price=...]          Show or change a price
    /shop reload                            Restore listings (shop.admin)
    /shop whoami                            Show who you are (players only)
    exit, quit, Ctrl+D                      Leave the shell"
    );
}

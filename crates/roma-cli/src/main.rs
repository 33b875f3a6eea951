use clap::Parser;
use miette::Result;
use roma_build::ProjectConfig;
use std::path::PathBuf;

mod signal;

#[derive(Parser, Debug)]
#[command(name = "roma")]
#[command(version, about = "Runtime Optimization and Memory Analysis")]
struct Cli {
    /// Project directory to operate on
    #[arg(value_name = "PROJECT_DIR")]
    project_dir: PathBuf,

    /// Language of the project (c, asm, cpp, py)
    #[arg(short, long)]
    language: String,

    /// Compile the project
    #[arg(short, long)]
    build: bool,

    /// Build, then run the binary under valgrind
    #[arg(short, long)]
    valgrind: bool,

    /// Remove the project's bin and log directories
    #[arg(short, long)]
    clean: bool,

    /// Compiler to use (gcc or clang)
    #[arg(long)]
    compiler: Option<String>,

    /// Compiler flags, replacing the defaults
    #[arg(long, allow_hyphen_values = true)]
    flags: Option<String>,

    /// Name of the output binary
    #[arg(long)]
    target: Option<String>,

    /// Arguments passed to the binary under valgrind
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    target_options: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Build,
    Valgrind,
    Clean,
}

impl Cli {
    /// The single requested action, or `None` unless exactly one action
    /// flag was given.
    fn action(&self) -> Option<Action> {
        match (self.build, self.valgrind, self.clean) {
            (true, false, false) => Some(Action::Build),
            (false, true, false) => Some(Action::Valgrind),
            (false, false, true) => Some(Action::Clean),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))?;

    signal::install()?;

    let cli = Cli::parse();

    let action = cli.action().ok_or_else(|| {
        miette::miette!("exactly one of --build, --valgrind, or --clean must be given")
    })?;

    let config = ProjectConfig {
        project_dir: cli.project_dir,
        compiler: cli.compiler,
        flags: cli.flags,
        target: cli.target,
        target_options: cli.target_options,
    };

    // The language registry is consulted before any toolchain exists, so an
    // unknown tag fails on its own.
    let toolchain = roma_build::toolchain_for(&cli.language, config)?;

    match action {
        Action::Build => {
            let binary = toolchain.build()?;
            println!("Build completed. Run with {}", binary.display());
        }
        Action::Valgrind => {
            let log = toolchain.memcheck()?;
            println!("Valgrind completed. Check {}", log.display());
        }
        Action::Clean => {
            if toolchain.clean()? {
                println!("Clean completed.");
            } else {
                println!("Nothing to clean.");
            }
        }
    }

    Ok(())
}

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use docnav::{
    config::{self, Config},
    logging::{self, LogConfig},
    render, script, History, MenuName, NavigationMenuSet, SelectState, Selection, SystemBrowser,
};

#[derive(Parser, Debug)]
#[command(name = "docnav", version, about = "Dropdown navigation for documentation pages")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON menu config. Defaults to `DOCNAV_CONFIG`, `docnav.json`, then the user config dir.
    #[arg(long, global = true, conflicts_with = "script")]
    config: Option<PathBuf>,

    /// Read the menus from a page's generated navigation script instead of a config.
    #[arg(long, global = true)]
    script: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints each menu with its number of entries.
    List,
    /// Prints the rows of one menu; row 0 is the prompt.
    Show {
        /// across, up, down0..down3 or current.
        menu: String,
    },
    /// Selects a displayed row and navigates to its destination.
    Select {
        menu: String,
        /// Displayed row (0 is the prompt and does nothing).
        #[arg(allow_negative_numbers = true)]
        index: i64,
        /// Open the destination in the default browser instead of printing it.
        #[arg(long)]
        open: bool,
        /// Directory relative destinations are resolved against (with --open).
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Prints the `<select>` markup for every menu.
    Render,
    /// Prints the config path that would be used (if any).
    ConfigPath,
}

struct Loaded {
    menus: NavigationMenuSet,
    root: Option<PathBuf>,
}

fn load(cli: &Cli) -> Result<Loaded> {
    if let Some(path) = cli.script.as_deref() {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let menus = script::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
        let menus = NavigationMenuSet::new(menus)?;
        return Ok(Loaded {
            menus,
            root: path.parent().map(|p| p.to_path_buf()),
        });
    }

    let cfg = match cli.config.as_deref() {
        Some(path) => config::load(path)?,
        None => config::load_optional()?.unwrap_or_else(Config::builtin),
    };
    Ok(Loaded {
        menus: cfg.to_menu_set()?,
        root: cfg.root,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&LogConfig::from_verbosity(cli.verbose))?;

    match &cli.command {
        Command::List => {
            let loaded = load(&cli)?;
            for menu in loaded.menus.menus() {
                println!("{} ({} entries)", menu.name(), menu.len());
            }
        }
        Command::Show { menu } => {
            let loaded = load(&cli)?;
            let name: MenuName = menu.parse()?;
            let Some(menu) = loaded.menus.menu(name) else {
                bail!("no menu '{name}' on this page");
            };
            for row in render::MenuSpec::for_menu(menu).rows {
                match row {
                    render::MenuRow::Placeholder(title) => println!("[0] <{title}>"),
                    render::MenuRow::Entry {
                        index, location, ..
                    } => println!("[{index}] {location}"),
                }
            }
        }
        Command::Select {
            menu,
            index,
            open,
            root,
        } => {
            let loaded = load(&cli)?;
            let name: MenuName = menu.parse()?;
            let mut widget = SelectState::new(*index);

            let outcome = if *open {
                let root = root
                    .clone()
                    .or(loaded.root)
                    .unwrap_or_else(|| PathBuf::from("."));
                let mut browser = SystemBrowser::new(root);
                loaded.menus.on_select(name, &mut widget, &mut browser)?
            } else {
                let mut history = History::default();
                let outcome = loaded.menus.on_select(name, &mut widget, &mut history)?;
                for location in history.visited() {
                    println!("{location}");
                }
                outcome
            };

            if let Selection::Rejected { index } = outcome {
                bail!("invalid selection index {index} for menu '{name}'");
            }
        }
        Command::Render => {
            let loaded = load(&cli)?;
            print!("{}", render::html(&loaded.menus));
        }
        Command::ConfigPath => {
            if let Some(path) = config::resolve_config_path() {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

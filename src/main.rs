mod calendar;
mod config;
mod font;
mod generate;
mod lang;
mod logging;
mod pdf;
mod theme;
use crate::calendar::year_days;
use crate::config::{Config, Orientation};
use crate::font::Font;
use crate::generate::{output_file_name, Generator};
use crate::lang::Language;
use crate::theme::{BORDER_COLOR, TEXT_COLOR};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Run {
        config: Config,
        target: Target,
        base_dir: PathBuf,
        verbosity: u8,
    },
    Help,
    Version,
}

/// Which calendars to generate
#[derive(Clone, Debug, Eq, PartialEq)]
enum Target {
    DefaultLanguage,
    Language(String),
    All,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut config = Config::default();
        let mut target = Target::DefaultLanguage;
        let mut base_dir = PathBuf::from(".");
        let mut verbosity = 0u8;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('a') | Arg::Long("all") => target = Target::All,
                Arg::Short('l') | Arg::Long("lang") => {
                    target = Target::Language(parser.value()?.string()?);
                }
                Arg::Short('y') | Arg::Long("year") => config.year = parser.value()?.parse()?,
                Arg::Long("columns") => config.columns = parser.value()?.parse()?,
                Arg::Long("rows") => config.rows = parser.value()?.parse()?,
                Arg::Long("paper") => config.page.paper = parser.value()?.parse()?,
                Arg::Long("portrait") => config.page.orientation = Orientation::Portrait,
                Arg::Long("border-color") => config.border_color = parser.value()?.parse()?,
                Arg::Long("text-color") => config.text_color = parser.value()?.parse()?,
                Arg::Short('C') | Arg::Long("base-dir") => {
                    base_dir = PathBuf::from(parser.value()?);
                }
                Arg::Short('o') | Arg::Long("output-dir") => {
                    config.output_dir = PathBuf::from(parser.value()?);
                }
                Arg::Long("font") => config.font_file = PathBuf::from(parser.value()?),
                Arg::Short('v') | Arg::Long("verbose") => verbosity = verbosity.saturating_add(1),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            config,
            target,
            base_dir,
            verbosity,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                config,
                target,
                base_dir,
                ..
            } => {
                // An unknown language is reported before anything is loaded
                // or written
                let language = match &target {
                    Target::DefaultLanguage => Some(Language::from_code(config.default_language)?),
                    Target::Language(code) => Some(Language::from_code(code)?),
                    Target::All => None,
                };
                let font_path = base_dir.join(&config.font_file);
                let font = Font::load(&font_path)
                    .with_context(|| format!("failed to load font from {}", font_path.display()))?;
                let out_dir = base_dir.join(&config.output_dir);
                let generator = Generator::new(&config, &font);
                if let Some(language) = language {
                    generator.write(language, &out_dir)?;
                    println!("Created: {}", output_file_name(config.year, Some(language.code)));
                } else {
                    let day_count = year_days(config.year)
                        .with_context(|| format!("unsupported year {}", config.year))?
                        .len();
                    println!(
                        "Generating {} calendars for {} languages...",
                        config.year,
                        Language::all().len()
                    );
                    println!(
                        "Format: {}, {}x{} grid, {day_count} cells",
                        config.page, config.columns, config.rows
                    );
                    println!();
                    let written = generator.write_all(&out_dir, |language, _| {
                        println!("Created: {}", output_file_name(config.year, Some(language.code)));
                    })?;
                    println!();
                    println!("Done! Generated {written} PDF files.");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: gridcal [<options>]");
                println!();
                println!("Printable one-cell-per-day grid calendar PDFs with localized month labels");
                println!();
                println!("Options:");
                println!("  -l, --lang <CODE>         Generate a single calendar for CODE [default: en]");
                println!("  -a, --all                 Generate one calendar per supported language");
                println!("  -y, --year <YEAR>         Calendar year [default: 2026]");
                println!("      --columns <N>         Grid columns [default: 25]");
                println!("      --rows <N>            Grid rows [default: 15]");
                println!("      --paper <a3|a4>       Paper size [default: a3]");
                println!("      --portrait            Use portrait instead of landscape orientation");
                println!("      --border-color <HEX>  Cell border color [default: {BORDER_COLOR}]");
                println!("      --text-color <HEX>    Label color [default: {TEXT_COLOR}]");
                println!("  -C, --base-dir <DIR>      Resolve relative paths against DIR [default: .]");
                println!("  -o, --output-dir <DIR>    Write PDFs to DIR [default: calendars]");
                println!("      --font <FILE>         TrueType font [default: \"Roboto Font/Roboto-Regular.ttf\"]");
                println!("  -v, --verbose             Show more diagnostics; repeat for more detail");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                println!();
                println!(
                    "Languages: {}",
                    Language::all()
                        .iter()
                        .map(|lang| lang.code)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let command = Command::from_parser(Parser::from_env())?;
    if let Command::Run { verbosity, .. } = command {
        logging::init(verbosity);
    }
    command.run()
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use astro_numerology::logger;
use astro_numerology::{
    CalendarDate, ContentConfig, ZodiacClassifier, ZodiacSign, destiny_number,
    life_path_number, parse_date,
};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser)]
#[command(name = "astro")]
#[command(about = "Zodiac signs, numerology numbers and daily horoscopes")]
struct Args {
    /// JSON file replacing the built-in zodiac ranges, interpretations or horoscopes
    #[arg(long, env = "ASTRO_CONTENT", global = true)]
    content: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a YYYY-MM-DD date
    ParseDate { date: String },
    /// Sun sign for a birth date
    Zodiac { date: String },
    /// Life path number for a birth date
    LifePath { date: String },
    /// Destiny number for a full name
    Destiny { name: String },
    /// Both numbers with their interpretations
    Reading {
        #[arg(long)]
        name: String,
        #[arg(long)]
        dob:  String,
    },
    /// Today's horoscope for a sign
    Horoscope {
        sign: ZodiacSign,
        /// Date to show instead of today
        #[arg(long)]
        date: Option<String>,
    },
    /// List every sign with its date range
    Signs,
}

struct Content {
    config:     ContentConfig,
    classifier: ZodiacClassifier,
}

impl Content {
    fn load(path: Option<&PathBuf>) -> Result<Self> {
        let config = match path {
            Some(path) => ContentConfig::load(path)
                .with_context(|| format!("loading content from {}", path.display()))?,
            None => ContentConfig::default(),
        };
        Ok(Self {
            classifier: config.classifier(),
            config,
        })
    }
}

fn date_arg(raw: &str) -> Result<CalendarDate> {
    parse_date(raw).with_context(|| format!("reading date {raw:?}"))
}

fn today() -> Result<CalendarDate> {
    let today = chrono::Utc::now().date_naive();
    CalendarDate::try_from(today).with_context(|| format!("using today's date {today}"))
}

fn emit(as_json: bool, value: &serde_json::Value, text: &str) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{text}");
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let content = Content::load(args.content.as_ref())?;
    let as_json = args.json;

    match args.command {
        Command::ParseDate { date } => {
            let date = date_arg(&date)?;
            emit(
                as_json,
                &json!({ "date": date, "leap_year": date.is_leap_year() }),
                &date.to_string(),
            )
        }
        Command::Zodiac { date } => {
            let date = date_arg(&date)?;
            let sign = content.classifier.classify(date);
            emit(
                as_json,
                &json!({ "date": date, "sign": sign, "element": sign.element() }),
                &format!("{} {sign} ({})", sign.symbol(), sign.element()),
            )
        }
        Command::LifePath { date } => {
            let date = date_arg(&date)?;
            let number = life_path_number(date)?;
            emit(
                as_json,
                &json!({ "date": date, "life_path": number, "master": number.is_master() }),
                &number.to_string(),
            )
        }
        Command::Destiny { name } => {
            let number = destiny_number(&name).with_context(|| format!("scoring {name:?}"))?;
            emit(
                as_json,
                &json!({ "name": name, "destiny": number, "master": number.is_master() }),
                &number.to_string(),
            )
        }
        Command::Reading { name, dob } => {
            let date = date_arg(&dob)?;
            let reading = content
                .config
                .interpretations
                .reading(&name, date)
                .with_context(|| format!("reading for {name:?}"))?;
            let sign = content.classifier.classify(date);
            let text = format!(
                "Sign: {sign}\nLife path {}: {}\nDestiny {}: {}",
                reading.life_path, reading.life_path_meaning, reading.destiny, reading.destiny_meaning
            );
            emit(as_json, &json!({ "sign": sign, "reading": reading }), &text)
        }
        Command::Horoscope { sign, date } => {
            let date = match date {
                Some(raw) => date_arg(&raw)?,
                None => today()?,
            };
            let dated = content
                .config
                .horoscopes
                .for_date(sign, date)
                .with_context(|| format!("no horoscope configured for {sign}"))?;
            let h = dated.horoscope;
            let text = format!(
                "{} {sign}, {date}\n{}\nLucky number: {}  Lucky color: {}  Mood: {}",
                sign.symbol(),
                h.description,
                h.lucky_number,
                h.lucky_color,
                h.mood
            );
            emit(as_json, &serde_json::to_value(&dated)?, &text)
        }
        Command::Signs => {
            let ranges = content.config.zodiac.ranges();
            let value = serde_json::to_value(ranges)?;
            let text = ranges
                .iter()
                .map(|range| {
                    format!(
                        "{} {:<12} {:<6} {}",
                        range.sign.symbol(),
                        range.sign.name(),
                        range.sign.element().to_string(),
                        range.describe()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            emit(as_json, &value, &text)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);
    tracing::debug!(content = ?args.content, "starting astro");
    run(args)
}

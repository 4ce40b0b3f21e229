use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use outfitter_engine::{OwnerId, PrecipitationType, SkyStatus, WeatherSnapshot};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Output format for `recommend`.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON document.
    #[default]
    Json,
    /// One garment id per line, followed by the source and score.
    Text,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Command-line interface for the `outfitter` application.
#[derive(Debug, Parser)]
#[command(
    name = "outfitter",
    version,
    about = "Weather-aware outfit recommendations from a wardrobe file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `outfitter` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommends one outfit and prints it as JSON.
    Recommend(RecommendArgs),
    /// Prints the effective engine configuration as TOML.
    Config {
        /// Config file (defaults to ~/.outfitter/config.toml when present).
        #[arg(long, value_name = "FILE", env = "OUTFITTER_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// JSON file holding an array of garments.
    #[arg(long, value_name = "FILE")]
    pub wardrobe: PathBuf,
    /// Owner whose garments are considered.
    #[arg(long, value_name = "UUID")]
    pub owner: OwnerId,
    /// Current temperature in °C.
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub temp: f64,
    /// Daily low in °C (defaults to --temp).
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub temp_min: Option<f64>,
    /// Daily high in °C (defaults to --temp).
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub temp_max: Option<f64>,
    /// Sky status: clear, partly-cloudy, cloudy, overcast.
    #[arg(long, default_value = "clear")]
    pub sky: SkyStatus,
    /// Precipitation type: none, rain, rain-snow, snow, shower.
    #[arg(long, default_value = "none")]
    pub precip: PrecipitationType,
    /// Expected precipitation in millimetres.
    #[arg(long, value_name = "MM", default_value_t = 0.0)]
    pub precip_amount: f64,
    /// Chance of precipitation in percent.
    #[arg(
        long,
        value_name = "PERCENT",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub precip_prob: u8,
    /// Forecast time (defaults to now).
    #[arg(long, value_name = "RFC3339", value_parser = parse_rfc3339)]
    pub at: Option<OffsetDateTime>,
    /// Season strictness from 1 (relaxed) to 5 (exact season only).
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub sensitivity: i32,
    /// Config file (defaults to ~/.outfitter/config.toml when present).
    #[arg(long, value_name = "FILE", env = "OUTFITTER_CONFIG")]
    pub config: Option<PathBuf>,
    /// Ask the language model first (needs OUTFITTER_ANTHROPIC_API_KEY).
    #[arg(long, default_value_t = false)]
    pub llm: bool,
    /// Seed for the sampling and fallback randomness.
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

fn parse_rfc3339(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(raw, &Rfc3339)
}

impl RecommendArgs {
    pub fn weather(&self, now: OffsetDateTime) -> WeatherSnapshot {
        WeatherSnapshot {
            sky: self.sky,
            precipitation: self.precip,
            precipitation_amount: self.precip_amount,
            precipitation_probability: self.precip_prob,
            temperature: self.temp,
            temperature_min: self.temp_min.unwrap_or(self.temp),
            temperature_max: self.temp_max.unwrap_or(self.temp),
            forecast_at: self.at.unwrap_or(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "00000000-0000-0000-0000-0000000a11ce";

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("outfitter").chain(args.iter().copied()))
    }

    fn recommend(args: &[&str]) -> RecommendArgs {
        match parse(args).unwrap().command {
            Commands::Recommend(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn recommend_defaults() {
        let args = recommend(&[
            "recommend",
            "--wardrobe",
            "w.json",
            "--owner",
            OWNER,
            "--temp",
            "12.5",
        ]);
        assert_eq!(args.sky, SkyStatus::Clear);
        assert_eq!(args.precip, PrecipitationType::None);
        assert_eq!(args.sensitivity, 3);
        assert!(!args.llm);
        assert!(args.format.is_json());

        let weather = args.weather(OffsetDateTime::UNIX_EPOCH);
        assert_eq!(weather.temperature_min, 12.5);
        assert_eq!(weather.forecast_at, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn recommend_accepts_negative_temperatures_and_weather() {
        let args = recommend(&[
            "recommend",
            "--wardrobe",
            "w.json",
            "--owner",
            OWNER,
            "--temp",
            "-3",
            "--temp-min",
            "-8",
            "--temp-max",
            "1",
            "--sky",
            "overcast",
            "--precip",
            "snow",
            "--precip-prob",
            "80",
            "--at",
            "2026-01-10T07:30:00Z",
            "--llm",
            "--format",
            "text",
        ]);
        let weather = args.weather(OffsetDateTime::UNIX_EPOCH);
        assert_eq!(weather.temperature, -3.0);
        assert_eq!(weather.temperature_min, -8.0);
        assert!(weather.is_snowy());
        assert_eq!(weather.season(), outfitter_engine::Season::Winter);
        assert!(args.llm);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn recommend_rejects_bad_values() {
        let with = |extra: &[&str]| {
            let mut args = vec!["recommend", "--wardrobe", "w.json", "--temp", "10"];
            args.extend_from_slice(extra);
            parse(&args)
        };
        assert!(with(&["--owner", "not-a-uuid"]).is_err());
        assert!(with(&["--owner", OWNER, "--sky", "purple"]).is_err());
        assert!(with(&["--owner", OWNER, "--precip-prob", "101"]).is_err());
        assert!(with(&["--owner", OWNER, "--at", "yesterday"]).is_err());
        assert!(with(&["--owner", OWNER]).is_ok());
    }

    #[test]
    fn config_command_parses() {
        let cli = parse(&["config", "--config", "/tmp/o.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { config: Some(_) }));
    }
}

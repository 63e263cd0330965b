use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use natal::{
    BirthData, ChartData, ChartEngine, EngineSettings, Fixture, PositionSourceKind,
    RetrogradeMode, WheelLayout,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "natal", author, version, about)]
struct Cli {
    /// Engine settings file (default: configs/natal.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Position source override: orbital, seeded_mock or fixture.
    #[arg(long, global = true)]
    source: Option<PositionSourceKind>,

    /// Retrograde mode override: never, motion_sign or seeded.
    #[arg(long, global = true)]
    retrograde: Option<RetrogradeMode>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Write output here instead of stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a natal chart as JSON.
    Chart(BirthArgs),
    /// The built-in demonstration chart.
    Sample,
    /// Wheel coordinates for a chart.
    Wheel {
        #[command(flatten)]
        birth: BirthArgs,

        /// Square canvas size in pixels.
        #[arg(long, default_value_t = 600.0)]
        size: f64,

        /// Put 0° Aries at the top instead of the ascendant on the left.
        #[arg(long)]
        aries_top: bool,
    },
}

#[derive(Args, Debug)]
struct BirthArgs {
    /// Birth data JSON file; replaces the individual flags.
    #[arg(long, conflicts_with_all = ["date", "time", "lat", "lon"])]
    input: Option<PathBuf>,

    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,

    /// HH:MM or HH:MM:SS, local clock time
    #[arg(long)]
    time: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// UTC, GMT or a fixed offset such as +05:30.
    #[arg(long, default_value = "UTC", allow_hyphen_values = true)]
    tz: String,

    #[arg(long)]
    name: Option<String>,
}

impl BirthArgs {
    fn birth_data(&self) -> anyhow::Result<BirthData> {
        if let Some(path) = &self.input {
            return read_birth_json(path);
        }
        let (Some(date), Some(time), Some(lat), Some(lon)) =
            (&self.date, &self.time, self.lat, self.lon)
        else {
            anyhow::bail!("Pass --input or all of --date, --time, --lat and --lon");
        };
        let birth = BirthData::new(date.as_str(), time.as_str(), lat, lon, self.tz.as_str());
        Ok(match &self.name {
            Some(name) => birth.with_name(name.as_str()),
            None => birth,
        })
    }
}

fn read_birth_json(path: &Path) -> anyhow::Result<BirthData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid birth data in {}", path.display()))
}

fn sample_birth() -> BirthData {
    BirthData::new("2000-01-01", "12:00", 40.7128, -74.0060, "UTC").with_name("Sample")
}

fn engine_settings(cli: &Cli) -> anyhow::Result<EngineSettings> {
    let mut settings = natal_config::load_engine_settings(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        settings.position_source = source;
    }
    if let Some(mode) = cli.retrograde {
        settings.retrograde = mode;
    }
    Ok(settings)
}

fn chart(engine: &ChartEngine, birth: &BirthData) -> anyhow::Result<ChartData> {
    engine
        .generate(birth)
        .with_context(|| format!("Chart for {} {} failed", birth.date, birth.time))
}

fn emit<T: Serialize>(value: &T, pretty: bool, out: Option<&Path>) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match out {
        Some(path) => {
            fs::write(path, text + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let out = cli.out.as_deref();

    match &cli.command {
        Command::Chart(birth) => {
            let engine = ChartEngine::new(&engine_settings(&cli)?);
            let chart = chart(&engine, &birth.birth_data()?)?;
            emit(&chart, cli.pretty, out)
        }
        Command::Sample => {
            let mut settings = engine_settings(&cli)?;
            if cli.source.is_none() {
                settings.position_source = PositionSourceKind::Fixture;
                settings.fixture = Fixture::sample();
            }
            let chart = chart(&ChartEngine::new(&settings), &sample_birth())?;
            emit(&chart, cli.pretty, out)
        }
        Command::Wheel {
            birth,
            size,
            aries_top,
        } => {
            if !(size.is_finite() && *size > 0.0) {
                anyhow::bail!("--size must be a positive number, got {}", size);
            }
            let engine = ChartEngine::new(&engine_settings(&cli)?);
            let chart = chart(&engine, &birth.birth_data()?)?;
            let layout = if *aries_top {
                WheelLayout::new(*size)
            } else {
                WheelLayout::new(*size).ascendant_left(&chart)
            };
            emit(&chart.wheel(&layout), cli.pretty, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_flags() {
        let cli = Cli::try_parse_from([
            "natal", "chart", "--date", "1990-06-15", "--time", "14:30", "--lat", "-33.9",
            "--lon", "151.2", "--tz", "+10:00", "--source", "seeded-mock", "--pretty",
        ])
        .unwrap();
        assert!(cli.pretty);
        assert_eq!(cli.source, Some(PositionSourceKind::SeededMock));
        let Command::Chart(birth) = &cli.command else {
            panic!("expected chart command");
        };
        let data = birth.birth_data().unwrap();
        assert_eq!(data.latitude, -33.9);
        assert_eq!(data.timezone, "+10:00");
        assert!(data.name.is_none());
    }

    #[test]
    fn test_missing_birth_fields_rejected() {
        let cli = Cli::try_parse_from(["natal", "chart", "--date", "1990-06-15"]).unwrap();
        let Command::Chart(birth) = &cli.command else {
            panic!("expected chart command");
        };
        assert!(birth.birth_data().is_err());
    }

    #[test]
    fn test_birth_from_json_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("birth.json");
        fs::write(
            &p,
            r#"{"date":"1984-11-02","time":"03:10","latitude":51.5,"longitude":-0.1,"timezone":"GMT","name":"Ada"}"#,
        )?;
        let birth = read_birth_json(&p)?;
        assert_eq!(birth.name.as_deref(), Some("Ada"));
        assert_eq!(birth.timezone, "GMT");
        Ok(())
    }

    #[test]
    fn test_sample_chart_uses_fixture() -> anyhow::Result<()> {
        let chart = chart(
            &ChartEngine::new(&EngineSettings::fixture(Fixture::sample())),
            &sample_birth(),
        )?;
        let sun = chart.body(natal::Body::Sun).map(|b| b.longitude);
        assert_eq!(sun, Some(15.0));
        Ok(())
    }

    #[test]
    fn test_emit_writes_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("chart.json");
        let chart = natal::generate_natal_chart(&sample_birth())?;
        emit(&chart, false, Some(&p))?;
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&p)?)?;
        assert_eq!(value["birthData"]["name"], "Sample");
        Ok(())
    }
}

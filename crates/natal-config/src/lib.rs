use natal::ephemeris::{Body, Fixture};
use natal::{AspectKind, AspectSettings, EngineSettings, PositionSourceKind, RetrogradeMode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_PATHS: [&str; 2] = ["configs/natal.toml", "../../configs/natal.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: EngineToml,
    #[serde(default)]
    aspects: AspectsToml,
    /// Body name to longitude, or to `{ longitude, speed }`.
    #[serde(default)]
    fixture: Option<BTreeMap<String, FixtureEntryToml>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EngineToml {
    #[serde(default)]
    position_source: Option<String>,
    #[serde(default)]
    retrograde: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AspectsToml {
    #[serde(default)]
    include_minor: Option<bool>,
    #[serde(default)]
    exact_threshold: Option<f64>,
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FixtureEntryToml {
    Longitude(f64),
    Point { longitude: f64, speed: Option<f64> },
}

/// Try common relative paths for `configs/natal.toml`.
pub fn read_natal_toml_text() -> Option<String> {
    for p in &DEFAULT_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("Loaded {}", p);
            return Some(c);
        }
    }
    None
}

/// Settings from `path`, or from the default locations when `path` is
/// `None`. Missing default files yield [`EngineSettings::default`]; a
/// missing explicit file is an error.
pub fn load_engine_settings(path: Option<&Path>) -> anyhow::Result<EngineSettings> {
    let text = match path {
        Some(p) => Some(
            fs::read_to_string(p)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", p.display()))?,
        ),
        None => read_natal_toml_text(),
    };
    match text {
        Some(text) => parse_engine_settings(&text),
        None => {
            log::debug!("No natal.toml found in {:?}; using defaults", DEFAULT_PATHS);
            Ok(EngineSettings::default())
        }
    }
}

pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;
    let RootConfigToml {
        engine,
        aspects,
        fixture,
    } = root;

    let mut settings = EngineSettings::default();

    if let Some(source) = engine.position_source {
        settings.position_source = source
            .parse::<PositionSourceKind>()
            .map_err(|e| anyhow::anyhow!("engine.position_source: {e}"))?;
    }
    if let Some(mode) = engine.retrograde {
        settings.retrograde = mode
            .parse::<RetrogradeMode>()
            .map_err(|e| anyhow::anyhow!("engine.retrograde: {e}"))?;
    }

    settings.aspects = aspect_settings(aspects)?;

    if let Some(entries) = fixture {
        settings.fixture = fixture_from_entries(entries)?;
        if settings.fixture.len() < Body::ALL.len() {
            log::warn!(
                "[fixture] lists {} of {} bodies; charts from it will fail",
                settings.fixture.len(),
                Body::ALL.len()
            );
        }
    }

    Ok(settings)
}

fn aspect_settings(cfg: AspectsToml) -> anyhow::Result<AspectSettings> {
    let mut settings = AspectSettings::default();
    if let Some(include_minor) = cfg.include_minor {
        settings.include_minor = include_minor;
    }
    if let Some(threshold) = cfg.exact_threshold {
        if !(threshold.is_finite() && threshold >= 0.0) {
            anyhow::bail!("aspects.exact_threshold must be a non-negative number, got {threshold}");
        }
        settings.exact_threshold = threshold;
    }
    for (key, orb) in cfg.orbs {
        let kind = key
            .parse::<AspectKind>()
            .map_err(|e| anyhow::anyhow!("aspects.orbs.{key}: {e}"))?;
        if !(orb.is_finite() && orb >= 0.0) {
            anyhow::bail!("aspects.orbs.{key} must be a non-negative number, got {orb}");
        }
        settings = settings.with_orb(kind, orb);
    }
    Ok(settings)
}

fn fixture_from_entries(entries: BTreeMap<String, FixtureEntryToml>) -> anyhow::Result<Fixture> {
    let mut fixture = Fixture::new();
    for (key, entry) in entries {
        let body = key
            .parse::<Body>()
            .map_err(|e| anyhow::anyhow!("fixture.{key}: {e}"))?;
        fixture = match entry {
            FixtureEntryToml::Longitude(longitude) => fixture.with(body, longitude),
            FixtureEntryToml::Point {
                longitude,
                speed: Some(speed),
            } => fixture.with_speed(body, longitude, speed),
            FixtureEntryToml::Point {
                longitude,
                speed: None,
            } => fixture.with(body, longitude),
        };
    }
    Ok(fixture)
}

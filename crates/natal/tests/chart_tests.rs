use natal::angle::normalize;
use natal::ephemeris::{Body, Fixture, RetrogradeMode};
use natal::houses::house_from_ascendant;
use natal::{
    generate_natal_chart, AspectKind, BirthData, ChartEngine, ChartError, EngineSettings,
    PositionSourceKind, Sign,
};

fn new_york_epoch() -> BirthData {
    BirthData::new("2000-01-01", "12:00", 40.7128, -74.0060, "UTC")
}

#[test]
fn test_epoch_reproduces_base_positions() {
    let chart = generate_natal_chart(&new_york_epoch()).unwrap();
    assert_eq!(chart.bodies.len(), 10);
    for body in &chart.bodies {
        assert_eq!(body.longitude, body.name.base_longitude(), "{}", body.name);
    }
    let sun = chart.body(Body::Sun).unwrap();
    assert_eq!(sun.sign, Sign::Capricorn);
    assert_eq!(sun.display_symbol, "☉");
}

#[test]
fn test_epoch_angles() {
    let chart = generate_natal_chart(&new_york_epoch()).unwrap();
    let expected_asc = normalize(180.0 + 40.7128 * 0.5);
    assert!((chart.ascendant - expected_asc).abs() < 1e-9);
    assert_eq!(chart.midheaven, normalize(chart.ascendant + 90.0));
    assert_eq!(chart.houses[0].cusp_longitude, chart.ascendant);
}

#[test]
fn test_houses_partition_and_membership() {
    let chart = generate_natal_chart(&BirthData::new("1975-08-21", "04:20", 51.5, -0.1, "UTC")).unwrap();
    assert_eq!(chart.houses.len(), 12);
    for (i, house) in chart.houses.iter().enumerate() {
        assert_eq!(house.number as usize, i + 1);
        let next = &chart.houses[(i + 1) % 12];
        assert!((normalize(next.cusp_longitude - house.cusp_longitude) - 30.0).abs() < 1e-9);
    }
    for body in &chart.bodies {
        assert!((1..=12).contains(&body.house));
        assert_eq!(body.house, house_from_ascendant(body.longitude, chart.ascendant));
    }
}

#[test]
fn test_regeneration_is_byte_identical() {
    let birth = BirthData::new("1992-02-29", "23:59", -37.81, 144.96, "+11:00").with_name("Test");
    for source in [PositionSourceKind::Orbital, PositionSourceKind::SeededMock, PositionSourceKind::Fixture] {
        let settings = EngineSettings {
            position_source: source,
            retrograde: RetrogradeMode::Seeded,
            ..EngineSettings::default()
        };
        let engine = ChartEngine::new(&settings);
        let a = engine.generate(&birth).unwrap().to_json(false).unwrap();
        let b = engine.generate(&birth).unwrap().to_json(false).unwrap();
        assert_eq!(a, b, "{:?}", source);
    }
}

#[test]
fn test_sample_fixture_chart() {
    let engine = ChartEngine::new(&EngineSettings::fixture(Fixture::sample()));
    let chart = engine.generate(&new_york_epoch()).unwrap();

    assert_eq!(chart.body(Body::Sun).unwrap().longitude, 15.0);
    assert_eq!(chart.body(Body::Venus).unwrap().sign, Sign::Pisces);

    // Sun 15 / Mars 180: 165° is nothing at default orbs
    assert!(chart.aspect_between(Body::Sun, Body::Mars).is_none());
    // Moon 120 / Jupiter 240: exact trine
    let trine = chart.aspect_between(Body::Jupiter, Body::Moon).unwrap();
    assert_eq!(trine.aspect_kind, AspectKind::Trine);
    assert!(trine.is_exact);
    // Mars 180 / Pluto 270: exact square
    assert_eq!(
        chart.aspect_between(Body::Mars, Body::Pluto).unwrap().aspect_kind,
        AspectKind::Square
    );
    // Sun 15 / Mercury 25: conjunction, 10° is outside 8° orb
    assert!(chart.aspect_between(Body::Sun, Body::Mercury).is_none());
}

#[test]
fn test_wire_shape_field_names() {
    let chart = generate_natal_chart(&new_york_epoch()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&chart.to_json(false).unwrap()).unwrap();

    for key in ["birthData", "bodies", "houses", "aspects", "ascendant", "midheaven"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    let body = &value["bodies"][0];
    assert_eq!(body["name"], "Sun");
    assert!(body.get("displaySymbol").is_some());
    assert!(value["houses"][0].get("cuspLongitude").is_some());
    assert_eq!(value["birthData"]["timezone"], "UTC");

    if let Some(aspect) = value["aspects"].as_array().and_then(|a| a.first()) {
        for key in ["bodyA", "bodyB", "aspectKind", "exactAngle", "orb", "isExact"] {
            assert!(aspect.get(key).is_some(), "missing {}", key);
        }
    }
}

#[test]
fn test_errors_abort_generation() {
    let engine = ChartEngine::default();

    let bad_time = BirthData::new("2000-01-01", "noon", 0.0, 0.0, "UTC");
    assert!(matches!(engine.generate(&bad_time), Err(ChartError::Parse { field: "time", .. })));

    let bad_lat = BirthData::new("2000-01-01", "12:00", -91.0, 0.0, "UTC");
    assert!(matches!(engine.generate(&bad_lat), Err(ChartError::InvalidCoordinate { .. })));

    let nan_lon = BirthData::new("2000-01-01", "12:00", 0.0, f64::NAN, "UTC");
    assert!(matches!(engine.generate(&nan_lon), Err(ChartError::NumericInput { .. })));

    let partial = ChartEngine::new(&EngineSettings::fixture(Fixture::new().with(Body::Sun, 1.0)));
    assert!(matches!(partial.generate(&new_york_epoch()), Err(ChartError::FixtureMissing { .. })));
}

#[test]
fn test_retrograde_motion_sign_uses_fixture_speed() {
    let fixture = Fixture::sample().with_speed(Body::Mercury, 25.0, -1.2);
    let settings = EngineSettings {
        retrograde: RetrogradeMode::MotionSign,
        ..EngineSettings::fixture(fixture)
    };
    let chart = ChartEngine::new(&settings).generate(&new_york_epoch()).unwrap();
    assert!(chart.body(Body::Mercury).unwrap().retrograde);
    assert!(!chart.body(Body::Sun).unwrap().retrograde);
}

#[test]
fn test_wheel_projection_covers_chart() {
    let chart = generate_natal_chart(&new_york_epoch()).unwrap();
    let layout = natal::WheelLayout::new(600.0).ascendant_left(&chart);
    let wheel = chart.wheel(&layout);

    assert_eq!(wheel.signs.len(), 12);
    assert_eq!(wheel.cusps.len(), 12);
    assert_eq!(wheel.bodies.len(), 10);
    assert_eq!(wheel.aspects.len(), chart.aspects.len());

    // house 1 spoke lies on the left horizon
    let first = &wheel.cusps[0];
    assert!((first.to.y - 300.0).abs() < 1e-9);
    assert!(first.to.x < 300.0);

    for p in &wheel.bodies {
        let dx = p.point.x - 300.0;
        let dy = p.point.y - 300.0;
        assert!(((dx * dx + dy * dy).sqrt() - layout.body_radius).abs() < 1e-9);
    }
}

use ticket_seed::config::{
    BusinessHours, CountRange, EntriesPerDay, GeneratorConfig, MAX_ENTRY_ID,
};
use ticket_seed::data::calendar::MonthDay;
use ticket_seed::data::datasets::TicketType;

fn assert_rejected(config: GeneratorConfig, needle: &str) {
    let err = config.validate().expect_err("config should be rejected");
    assert!(err.to_string().contains(needle), "expected '{needle}' in: {err}");
}

#[test]
fn default_config_is_valid() {
    GeneratorConfig::default().validate().expect("default config");
}

#[test]
fn rejects_negative_weights() {
    let mut config = GeneratorConfig::default();
    config.ticket_types[0].weekday_weight = -1.0;
    assert_rejected(config, "weekday_weight");
}

#[test]
fn rejects_duplicate_ticket_names() {
    let mut config = GeneratorConfig::default();
    config.ticket_types.push(TicketType::new("Ticket 50", 5_000, 1.0, 1.0));
    assert_rejected(config, "duplicate");
}

#[test]
fn rejects_all_zero_weight_table() {
    let mut config = GeneratorConfig::default();
    for ticket in &mut config.ticket_types {
        ticket.weekend_weight = 0.0;
    }
    assert_rejected(config, "weekend weights");
}

#[test]
fn rejects_inverted_count_range() {
    let config = GeneratorConfig {
        entries_per_day: EntriesPerDay {
            special: Some(CountRange::new(40, 25)),
            ..EntriesPerDay::default()
        },
        ..GeneratorConfig::default()
    };
    assert_rejected(config, "entries_per_day.special");
}

#[test]
fn rejects_bad_business_hours() {
    for hours in [BusinessHours { start: 22, end: 9 }, BusinessHours { start: 9, end: 24 }] {
        let config = GeneratorConfig {
            business_hours: hours,
            ..GeneratorConfig::default()
        };
        assert_rejected(config, "business_hours");
    }
}

#[test]
fn rejects_out_of_range_override_probability() {
    let config = GeneratorConfig {
        start_of_month_override: Some(1.5),
        ..GeneratorConfig::default()
    };
    assert_rejected(config, "start_of_month_override");
}

#[test]
fn override_requires_a_promotional_type() {
    let mut config = GeneratorConfig::default();
    config.ticket_types.retain(|ticket| !ticket.is_promotional());
    assert_rejected(config.clone(), "zero-price");

    config.start_of_month_override = None;
    config.validate().expect("no override, no promotional types needed");
}

#[test]
fn rejects_first_id_beyond_sqlite_integer() {
    let config = GeneratorConfig {
        first_id: u64::MAX - 5,
        ..GeneratorConfig::default()
    };
    assert_rejected(config, "first_id");

    let config = GeneratorConfig {
        first_id: MAX_ENTRY_ID,
        ..GeneratorConfig::default()
    };
    config.validate().expect("largest id is accepted");
}

#[test]
fn oversized_price_in_yaml_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("config.yaml");
    std::fs::write(
        &file,
        "ticket_types:\n  - name: Gold\n    price: 1.0e20\n    weekday_weight: 1\n",
    )
    .expect("write config");
    let err = GeneratorConfig::load(&file).expect_err("oversized price should fail");
    assert!(err.to_string().contains("exceeds the maximum"), "unexpected error: {err}");
}

#[test]
fn rejects_impossible_special_date() {
    let mut config = GeneratorConfig::default();
    config.special_dates.push(MonthDay::new(4, 31));
    assert_rejected(config, "special_dates");
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("config.yaml");
    std::fs::write(
        &file,
        r#"
ticket_types:
  - name: Standard
    price: 12.5
    weekday_weight: 3
    weekend_weight: 1
  - name: Comp
    price: 0
entries_per_day:
  weekday: { min: 1, max: 2 }
business_hours: { start: 10, end: 18 }
seed: 99
"#,
    )
    .expect("write config");

    let config = GeneratorConfig::load(&file).expect("config should load");
    assert_eq!(config.ticket_types.len(), 2);
    assert_eq!(config.ticket_types[0].price.cents(), 1250);
    assert!(config.ticket_types[1].is_promotional());
    assert_eq!(config.entries_per_day.weekday, CountRange::new(1, 2));
    assert_eq!(config.entries_per_day.weekend, EntriesPerDay::default().weekend);
    assert_eq!(config.business_hours, BusinessHours { start: 10, end: 18 });
    assert_eq!(config.special_dates, GeneratorConfig::default().special_dates);
    assert_eq!(config.seed, Some(99));
}

#[test]
fn unknown_yaml_keys_are_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("config.yaml");
    std::fs::write(&file, "tickets: []\n").expect("write config");
    let err = GeneratorConfig::load(&file).expect_err("unknown key should fail");
    assert!(err.to_string().contains("invalid config"), "unexpected error: {err}");
}

#[test]
fn negative_price_in_yaml_is_rejected() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("config.yaml");
    std::fs::write(
        &file,
        "ticket_types:\n  - name: Bad\n    price: -5\n    weekday_weight: 1\n",
    )
    .expect("write config");
    let err = GeneratorConfig::load(&file).expect_err("negative price should fail");
    assert!(err.to_string().contains("non-negative"), "unexpected error: {err}");
}

#[test]
fn yaml_rendering_loads_back_to_the_same_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("config.yaml");
    let config = GeneratorConfig::default();
    std::fs::write(&file, config.to_yaml().expect("render")).expect("write config");
    assert_eq!(GeneratorConfig::load(&file).expect("reload"), config);
}

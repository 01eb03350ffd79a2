use proptest::prelude::*;
use scalarbind::prelude::*;

fn unwrap_arrays() -> DecodeConfig {
    DecodeConfig::default().with_unwrap_single_value_arrays(true)
}

#[test]
fn single_element_arrays_unwrap_when_enabled() {
    assert_eq!(from_json_str::<i32>("[42]", &unwrap_arrays()).ok(), Some(42));

    for (json, config) in [
        ("[42, 43]", unwrap_arrays()),
        ("[42]", DecodeConfig::default()),
    ] {
        match from_json_str::<i32>(json, &config) {
            Err(Error::Decode(err)) => assert_eq!(err.kind, DecodeErrorKind::ShapeMismatch),
            other => panic!("{json}: expected shape mismatch, got {other:?}"),
        }
    }
}

#[test]
fn textual_null_follows_primitive_policy() {
    let lenient = DecodeConfig::default();
    let strict = DecodeConfig::default().with_fail_on_null_for_primitives(true);

    assert_eq!(from_json_str::<Option<i64>>("\"null\"", &lenient).ok(), Some(None));
    assert_eq!(from_json_str::<i64>("\"null\"", &lenient).ok(), Some(0));

    match from_json_str::<i64>("\"null\"", &strict) {
        Err(Error::Decode(err)) => {
            assert_eq!(err.kind, DecodeErrorKind::ConfigurationRejected);
        }
        other => panic!("expected configuration rejection, got {other:?}"),
    }
}

#[test]
fn configuration_loaded_from_toml_drives_decoding() {
    let config = DecodeConfig::from_toml_str(
        r#"
            use_long_for_ints = true
            recovery = "use_null"
        "#,
    )
    .expect("valid config");

    assert_eq!(
        decode_named("Number", "7", &config).ok(),
        Some(ScalarValue::Long(7))
    );
    assert_eq!(
        from_json_str::<Option<i32>>("\"seven\"", &config).ok(),
        Some(None)
    );
}

proptest! {
    #[test]
    fn integer_strings_round_trip(value in any::<i32>()) {
        let json = format!("\"{value}\"");

        prop_assert_eq!(from_json_str::<i32>(&json, &DecodeConfig::default()).ok(), Some(value));
    }

    #[test]
    fn padded_long_strings_round_trip(value in any::<i64>(), pad in 0usize..4) {
        let spaces = " ".repeat(pad);
        let json = format!("\"{spaces}{value}{spaces}\"");

        prop_assert_eq!(from_json_str::<i64>(&json, &DecodeConfig::default()).ok(), Some(value));
    }
}

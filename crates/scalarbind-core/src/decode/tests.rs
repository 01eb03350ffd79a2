use super::*;
use crate::{
    config::{DecodeConfig, RecoveryMode},
    error::DecodeErrorKind,
    token::{Token, TokenBuffer},
};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use scalarbind_primitives::ScalarKind;
use std::{
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

fn decode_with<D: ScalarDecoder + ?Sized>(
    decoder: &D,
    json: &str,
    config: &DecodeConfig,
) -> Result<Option<D::Output>, DecodeError> {
    let mut buffer = TokenBuffer::from_json_str(json).expect("valid json");

    decoder.decode(&mut buffer, &DecodeContext::new(config))
}

fn decode<D: ScalarDecoder + ?Sized>(
    decoder: &D,
    json: &str,
) -> Result<Option<D::Output>, DecodeError> {
    decode_with(decoder, json, &DecodeConfig::default())
}

fn error_kind<T>(result: Result<T, DecodeError>) -> DecodeErrorKind {
    match result {
        Ok(_) => panic!("expected a decode failure"),
        Err(err) => err.kind,
    }
}

//
// fast path
//

#[test]
fn natural_shapes_decode_directly() {
    // scalar coercion off: any policy consultation would fail
    let config = DecodeConfig::default().with_allow_coercion_of_scalars(false);

    assert_eq!(decode_with(&INT, "42", &config).ok(), Some(Some(42)));
    assert_eq!(decode_with(&LONG_WRAPPER, "-7", &config).ok(), Some(Some(-7)));
    assert_eq!(decode_with(&SHORT, "300", &config).ok(), Some(Some(300)));
    assert_eq!(decode_with(&DOUBLE, "2.5", &config).ok(), Some(Some(2.5)));
    assert_eq!(decode_with(&FLOAT_WRAPPER, "0.5", &config).ok(), Some(Some(0.5)));
    assert_eq!(decode_with(&BOOL, "true", &config).ok(), Some(Some(true)));
}

//
// strings
//

#[test]
fn numeric_strings_are_trimmed_and_parsed() {
    assert_eq!(decode(&INT, r#""42""#).ok(), Some(Some(42)));
    assert_eq!(decode(&INT, r#"" 42 ""#).ok(), Some(Some(42)));
    assert_eq!(decode(&INT_WRAPPER, "\"\\t-5\\n\"").ok(), Some(Some(-5)));
    assert_eq!(decode(&FLOAT, r#""1.5""#).ok(), Some(Some(1.5)));
}

#[test]
fn malformed_string_is_invalid_literal() {
    let err = decode(&INT, r#""4x""#).expect_err("not a number");

    assert_eq!(err.kind, DecodeErrorKind::InvalidLiteral);
    assert_eq!(err.literal.as_deref(), Some("4x"));
    assert_eq!(err.target, Some(TargetType::primitive(ScalarKind::Int)));
    assert!(err.message.contains("not a valid Integer value"), "{}", err.message);
}

#[test]
fn scalar_strings_rejected_when_scalar_coercion_is_off() {
    let config = DecodeConfig::default().with_allow_coercion_of_scalars(false);

    assert_eq!(
        error_kind(decode_with(&INT, r#""42""#, &config)),
        DecodeErrorKind::ConfigurationRejected
    );
}

#[test]
fn empty_string_fails_unless_configured() {
    assert_eq!(
        error_kind(decode(&INT_WRAPPER, r#""""#)),
        DecodeErrorKind::ShapeMismatch
    );

    let config = DecodeConfig::default()
        .with_default_coercion(InputShape::EmptyString, CoercionAction::SubstituteNull)
        .with_coercion(
            LogicalType::Float,
            InputShape::EmptyString,
            CoercionAction::SubstituteEmpty,
        );

    assert_eq!(decode_with(&INT_WRAPPER, r#""""#, &config).ok(), Some(None));
    assert_eq!(decode_with(&INT, r#""""#, &config).ok(), Some(Some(0)));
    assert_eq!(decode_with(&DOUBLE_WRAPPER, r#""""#, &config).ok(), Some(Some(0.0)));
}

#[test]
fn blank_string_follows_empty_string_rules() {
    let config = DecodeConfig::default().with_coercion(
        LogicalType::Integer,
        InputShape::EmptyString,
        CoercionAction::SubstituteNull,
    );
    assert_eq!(decode_with(&LONG_WRAPPER, r#""   ""#, &config).ok(), Some(None));

    let refused = config.with_accept_blank_as_empty(Some(false));
    assert_eq!(
        error_kind(decode_with(&LONG_WRAPPER, r#""   ""#, &refused)),
        DecodeErrorKind::ConfigurationRejected
    );
}

//
// ranges
//

#[test]
fn byte_admits_unsigned_values() {
    assert_eq!(decode(&BYTE, r#""255""#).ok(), Some(Some(-1)));
    assert_eq!(decode(&BYTE, "200").ok(), Some(Some(-56)));
    assert_eq!(decode(&BYTE_WRAPPER, r#""-128""#).ok(), Some(Some(-128)));
}

#[test]
fn out_of_range_literals_overflow() {
    assert_eq!(error_kind(decode(&BYTE, r#""1000""#)), DecodeErrorKind::RangeOverflow);
    assert_eq!(error_kind(decode(&BYTE, r#""256""#)), DecodeErrorKind::RangeOverflow);
    assert_eq!(error_kind(decode(&BYTE, "1000")), DecodeErrorKind::RangeOverflow);
    assert_eq!(error_kind(decode(&SHORT, r#""40000""#)), DecodeErrorKind::RangeOverflow);
    assert_eq!(
        error_kind(decode(&INT, r#""2147483648""#)),
        DecodeErrorKind::RangeOverflow
    );
    assert_eq!(
        error_kind(decode(&LONG, r#""9223372036854775808""#)),
        DecodeErrorKind::RangeOverflow
    );
}

#[test]
fn overflow_error_names_target() {
    let err = decode(&SHORT_WRAPPER, r#""40000""#).expect_err("overflow");

    assert_eq!(err.target, Some(TargetType::wrapper(ScalarKind::Short)));
    assert!(err.message.contains("Option<i16>"), "{}", err.message);
    assert!(err.message.contains("40000"), "{}", err.message);
}

//
// floating tokens for integral targets
//

#[test]
fn float_token_truncates_for_integral_targets() {
    assert_eq!(decode(&INT, "42.9").ok(), Some(Some(42)));
    assert_eq!(decode(&LONG, "-3.7").ok(), Some(Some(-3)));
    assert_eq!(error_kind(decode(&INT, "1e12")), DecodeErrorKind::RangeOverflow);
}

#[test]
fn float_token_rejected_when_conversion_disabled() {
    let config = DecodeConfig::default().with_accept_float_as_int(false);

    assert_eq!(
        error_kind(decode_with(&INT, "1.0", &config)),
        DecodeErrorKind::RangeOverflow
    );
    assert_eq!(
        error_kind(decode_with(&*BIG_INTEGER, "1.0", &config)),
        DecodeErrorKind::RangeOverflow
    );
}

#[test]
fn float_token_substitutes_when_configured() {
    let config = DecodeConfig::default().with_coercion(
        LogicalType::Integer,
        InputShape::FloatForIntegerTarget,
        CoercionAction::SubstituteNull,
    );

    assert_eq!(decode_with(&INT_WRAPPER, "1.5", &config).ok(), Some(None));
    assert_eq!(decode_with(&INT, "1.5", &config).ok(), Some(Some(0)));
}

#[test]
fn fractional_strings_follow_the_float_to_int_rule() {
    assert_eq!(decode(&INT, r#""1.0""#).ok(), Some(Some(1)));
    assert_eq!(decode(&INT_WRAPPER, r#"" 7.9 ""#).ok(), Some(Some(7)));
    assert_eq!(decode(&LONG, r#""-2.5e2""#).ok(), Some(Some(-250)));
    assert_eq!(decode(&BYTE, r#""200.5""#).ok(), Some(Some(-56)));
    assert_eq!(
        error_kind(decode(&BYTE, r#""300.5""#)),
        DecodeErrorKind::RangeOverflow
    );
    assert_eq!(
        error_kind(decode(&INT, r#""1e12""#)),
        DecodeErrorKind::RangeOverflow
    );
    assert_eq!(
        decode(&*BIG_INTEGER, r#""1e30""#).ok(),
        Some(BigInt::from_str("1000000000000000000000000000000").ok())
    );

    let refused = DecodeConfig::default().with_accept_float_as_int(false);
    assert_eq!(
        error_kind(decode_with(&INT, r#""1.0""#, &refused)),
        DecodeErrorKind::RangeOverflow
    );
    assert_eq!(
        error_kind(decode_with(&*BIG_INTEGER, r#""1.5""#, &refused)),
        DecodeErrorKind::RangeOverflow
    );
    // integer text never consults the float-to-int rule
    assert_eq!(decode_with(&INT, r#""12""#, &refused).ok(), Some(Some(12)));

    let to_null = DecodeConfig::default().with_coercion(
        LogicalType::Integer,
        InputShape::FloatForIntegerTarget,
        CoercionAction::SubstituteNull,
    );
    assert_eq!(decode_with(&SHORT_WRAPPER, r#""1.5""#, &to_null).ok(), Some(None));
}

//
// nulls
//

#[test]
fn textual_null_yields_null_substitute() {
    assert_eq!(decode(&INT_WRAPPER, r#""null""#).ok(), Some(None));
    assert_eq!(decode(&DOUBLE_WRAPPER, r#"" null ""#).ok(), Some(None));
    assert_eq!(decode(&INT, r#""null""#).ok(), Some(Some(0)));
}

#[test]
fn textual_null_for_primitive_rejected_when_configured() {
    let config = DecodeConfig::default().with_fail_on_null_for_primitives(true);

    assert_eq!(
        error_kind(decode_with(&INT, r#""null""#, &config)),
        DecodeErrorKind::ConfigurationRejected
    );
    assert_eq!(decode_with(&INT_WRAPPER, r#""null""#, &config).ok(), Some(None));
}

#[test]
fn null_token_uses_access_pattern() {
    assert_eq!(decode(&INT_WRAPPER, "null").ok(), Some(None));
    assert_eq!(decode(&BOOL, "null").ok(), Some(Some(false)));
    assert_eq!(decode(&CHAR, "null").ok(), Some(Some('\0')));

    let config = DecodeConfig::default().with_fail_on_null_for_primitives(true);
    let err = decode_with(&LONG, "null", &config).expect_err("null primitive");
    assert_eq!(err.kind, DecodeErrorKind::ConfigurationRejected);
    assert!(err.message.contains("fail_on_null_for_primitives"));
}

#[test]
fn null_value_rechecks_config_for_primitives() {
    let lenient = DecodeConfig::default();
    let strict = DecodeConfig::default().with_fail_on_null_for_primitives(true);

    assert_eq!(INT.null_value(&DecodeContext::new(&lenient)).ok(), Some(Some(0)));
    assert!(INT.null_value(&DecodeContext::new(&strict)).is_err());
    assert_eq!(
        INT_WRAPPER.null_value(&DecodeContext::new(&strict)).ok(),
        Some(None)
    );
    assert_eq!(INT_WRAPPER.empty_value(), Some(0));
}

#[test]
fn access_patterns_are_derived_at_construction() {
    assert_eq!(INT.spec().access, AccessPattern::Dynamic);
    assert_eq!(INT_WRAPPER.spec().access, AccessPattern::AlwaysNull);
    assert_eq!(NUMBER.spec().access, AccessPattern::AlwaysNull);

    let constant = DecoderSpec::new(TargetType::wrapper(ScalarKind::Int), Some(5), None);
    assert_eq!(constant.access, AccessPattern::Constant);
}

//
// IEEE specials
//

#[test]
#[allow(clippy::eq_op)]
fn ieee_special_strings_decode_for_floating_targets() {
    assert_eq!(decode(&DOUBLE, r#""Infinity""#).ok(), Some(Some(f64::INFINITY)));
    assert_eq!(
        decode(&DOUBLE, r#""-Infinity""#).ok(),
        Some(Some(f64::NEG_INFINITY))
    );
    assert_eq!(decode(&FLOAT_WRAPPER, r#""INF""#).ok(), Some(Some(f32::INFINITY)));

    let nan = decode(&DOUBLE, r#""NaN""#)
        .expect("NaN decodes")
        .expect("primitive value");
    assert!(nan.is_nan());
    assert_ne!(nan, nan);
}

#[test]
fn ieee_special_strings_are_invalid_for_integral_targets() {
    assert_eq!(
        error_kind(decode(&INT, r#""Infinity""#)),
        DecodeErrorKind::InvalidLiteral
    );
    assert_eq!(
        error_kind(decode(&*BIG_DECIMAL, r#""NaN""#)),
        DecodeErrorKind::InvalidLiteral
    );
}

//
// arrays
//

#[test]
fn single_value_array_unwraps_when_enabled() {
    let config = DecodeConfig::default().with_unwrap_single_value_arrays(true);
    let mut buffer = TokenBuffer::from_json_str("[42]").expect("valid json");

    let value = INT.decode(&mut buffer, &DecodeContext::new(&config));

    assert_eq!(value.ok(), Some(Some(42)));
    assert_eq!(buffer.current_shape(), Some(TokenShape::EndArray));
    assert_eq!(
        decode_with(&BOOL_WRAPPER, r#"["true"]"#, &config).ok(),
        Some(Some(true))
    );
}

#[test]
fn multi_value_array_is_shape_mismatch() {
    let config = DecodeConfig::default().with_unwrap_single_value_arrays(true);

    assert_eq!(
        error_kind(decode_with(&INT, "[42, 43]", &config)),
        DecodeErrorKind::ShapeMismatch
    );
}

#[test]
fn array_without_unwrap_is_shape_mismatch() {
    let err = decode(&INT, "[42]").expect_err("unwrap disabled");

    assert_eq!(err.kind, DecodeErrorKind::ShapeMismatch);
    assert!(err.message.contains("Array"), "{}", err.message);
}

#[test]
fn nested_array_is_shape_mismatch() {
    let config = DecodeConfig::default().with_unwrap_single_value_arrays(true);

    assert_eq!(
        error_kind(decode_with(&INT, "[[1]]", &config)),
        DecodeErrorKind::ShapeMismatch
    );
}

#[test]
fn empty_array_follows_policy() {
    assert_eq!(error_kind(decode(&INT, "[]")), DecodeErrorKind::ShapeMismatch);

    let config = DecodeConfig::default().with_accept_empty_array_as_null(true);
    assert_eq!(decode_with(&INT_WRAPPER, "[]", &config).ok(), Some(None));
    assert_eq!(decode_with(&INT, "[]", &config).ok(), Some(Some(0)));
}

#[test]
fn recovered_array_failures_leave_cursor_on_closing_bracket() {
    let config = DecodeConfig::default()
        .with_unwrap_single_value_arrays(true)
        .with_recovery(RecoveryMode::UseNull);
    let ctx = DecodeContext::new(&config);

    let mut buffer = TokenBuffer::from_json_str("[1, 2, 3]").expect("valid json");
    assert_eq!(INT_WRAPPER.decode(&mut buffer, &ctx).ok(), Some(None));
    assert_eq!(buffer.current(), Some(&Token::EndArray));
    assert_eq!(buffer.next_token().ok(), Some(None));

    let mut buffer =
        TokenBuffer::from_json_str(r#"[1, [2, {"a": [3]}], 4]"#).expect("valid json");
    assert_eq!(INT_WRAPPER.decode(&mut buffer, &ctx).ok(), Some(None));
    assert_eq!(buffer.current(), Some(&Token::EndArray));
    assert_eq!(buffer.next_token().ok(), Some(None));

    let mut buffer = TokenBuffer::from_json_str("[[1, 2], 3]").expect("valid json");
    assert_eq!(LONG.decode(&mut buffer, &ctx).ok(), Some(Some(0)));
    assert_eq!(buffer.current(), Some(&Token::EndArray));
    assert_eq!(buffer.next_token().ok(), Some(None));

    let no_unwrap = DecodeConfig::default().with_recovery(RecoveryMode::UseNull);
    let mut buffer = TokenBuffer::from_json_str("[7, 8]").expect("valid json");
    assert_eq!(
        INT_WRAPPER
            .decode(&mut buffer, &DecodeContext::new(&no_unwrap))
            .ok(),
        Some(None)
    );
    assert_eq!(buffer.current(), Some(&Token::EndArray));
    assert_eq!(buffer.next_token().ok(), Some(None));
}

//
// unexpected tokens
//

#[test]
fn unexpected_tokens_are_shape_mismatches() {
    let err = decode(&INT, "true").expect_err("boolean token");
    assert_eq!(err.kind, DecodeErrorKind::ShapeMismatch);
    assert!(err.message.contains("Boolean"), "{}", err.message);

    assert_eq!(error_kind(decode(&DOUBLE, "{}")), DecodeErrorKind::ShapeMismatch);
    assert_eq!(error_kind(decode(&BOOL, "1.5")), DecodeErrorKind::ShapeMismatch);

    let mut empty = TokenBuffer::new(Vec::new());
    let config = DecodeConfig::default();
    assert_eq!(
        error_kind(LONG.decode(&mut empty, &DecodeContext::new(&config))),
        DecodeErrorKind::ShapeMismatch
    );
}

//
// boolean
//

#[test]
fn boolean_strings_accept_three_spellings() {
    for (json, expected) in [
        (r#""true""#, true),
        (r#""True""#, true),
        (r#""TRUE""#, true),
        (r#""false""#, false),
        (r#"" False ""#, false),
        (r#""FALSE""#, false),
    ] {
        assert_eq!(decode(&BOOL, json).ok(), Some(Some(expected)), "json: {json}");
    }

    let err = decode(&BOOL_WRAPPER, r#""yes""#).expect_err("not a boolean");
    assert_eq!(err.kind, DecodeErrorKind::InvalidLiteral);
    assert!(err.message.contains("only \"true\" or \"false\" recognized"));
}

#[test]
fn boolean_from_integer_token() {
    assert_eq!(decode(&BOOL, "0").ok(), Some(Some(false)));
    assert_eq!(decode(&BOOL, "5").ok(), Some(Some(true)));
    assert_eq!(
        decode(&BOOL_WRAPPER, "99999999999999999999").ok(),
        Some(Some(true))
    );

    let config = DecodeConfig::default().with_coercion(
        LogicalType::Boolean,
        InputShape::IntegerForBooleanTarget,
        CoercionAction::Fail,
    );
    assert_eq!(
        error_kind(decode_with(&BOOL, "1", &config)),
        DecodeErrorKind::ShapeMismatch
    );
}

//
// char
//

#[test]
fn char_from_single_unit_strings() {
    assert_eq!(decode(&CHAR, r#""z""#).ok(), Some(Some('z')));
    assert_eq!(decode(&CHAR_WRAPPER, r#"" x ""#).ok(), Some(Some('x')));
    assert_eq!(decode(&CHAR, r#""é""#).ok(), Some(Some('é')));

    assert_eq!(
        error_kind(decode(&CHAR, r#""ab""#)),
        DecodeErrorKind::InvalidLiteral
    );
    // outside the basic multilingual plane: two code units
    assert_eq!(
        error_kind(decode(&CHAR, r#""😀""#)),
        DecodeErrorKind::InvalidLiteral
    );
}

#[test]
fn char_strings_go_through_the_string_policy() {
    // a lone space is blank text, never a character
    assert_eq!(
        error_kind(decode(&CHAR, r#"" ""#)),
        DecodeErrorKind::ShapeMismatch
    );
    assert_eq!(
        error_kind(decode(&CHAR, r#""  ""#)),
        DecodeErrorKind::ShapeMismatch
    );
    assert_eq!(decode(&CHAR_WRAPPER, r#"" ""#).ok(), None);

    let blank_as_empty = DecodeConfig::default().with_accept_blank_as_empty(Some(true));
    assert_eq!(
        decode_with(&CHAR, r#"" ""#, &blank_as_empty).ok(),
        decode_with(&CHAR, r#""  ""#, &blank_as_empty).ok()
    );

    let scalars_off = DecodeConfig::default().with_allow_coercion_of_scalars(false);
    assert_eq!(
        error_kind(decode_with(&CHAR, r#""a""#, &scalars_off)),
        DecodeErrorKind::ConfigurationRejected
    );
    assert_eq!(
        error_kind(decode_with(&CHAR_WRAPPER, r#""a""#, &scalars_off)),
        DecodeErrorKind::ConfigurationRejected
    );
}

#[test]
fn char_from_integer_code() {
    assert_eq!(decode(&CHAR, "65").ok(), Some(Some('A')));
    assert_eq!(
        error_kind(decode(&CHAR, "70000")),
        DecodeErrorKind::ShapeMismatch
    );
    assert_eq!(error_kind(decode(&CHAR, "-1")), DecodeErrorKind::ShapeMismatch);
    assert_eq!(
        error_kind(decode(&CHAR, "55296")),
        DecodeErrorKind::InvalidLiteral
    );

    let config = DecodeConfig::default().with_allow_coercion_of_scalars(false);
    assert_eq!(
        error_kind(decode_with(&CHAR, "65", &config)),
        DecodeErrorKind::ConfigurationRejected
    );
}

//
// big numbers
//

#[test]
fn big_integer_keeps_every_digit() {
    let expected = BigInt::from_str("123456789012345678901234567890").expect("valid");

    assert_eq!(
        decode(&*BIG_INTEGER, "123456789012345678901234567890").ok(),
        Some(Some(expected.clone()))
    );
    assert_eq!(
        decode(&*BIG_INTEGER, r#"" 123456789012345678901234567890 ""#).ok(),
        Some(Some(expected))
    );
    assert_eq!(
        decode(&*BIG_INTEGER, "7.9").ok(),
        Some(Some(BigInt::from(7)))
    );
    assert_eq!(decode(&*BIG_INTEGER, "null").ok(), Some(None));
    assert_eq!(
        decode(&*BIG_INTEGER, r#""1.5""#).ok(),
        Some(Some(BigInt::from(1)))
    );
    assert_eq!(
        error_kind(decode(&*BIG_INTEGER, r#""1.5x""#)),
        DecodeErrorKind::InvalidLiteral
    );
}

#[test]
fn big_decimal_is_exact() {
    assert_eq!(
        decode(&*BIG_DECIMAL, "0.1").ok(),
        Some(Some(BigDecimal::from_str("0.1").expect("valid")))
    );
    assert_eq!(
        decode(&*BIG_DECIMAL, r#""-12.50""#).ok(),
        Some(Some(BigDecimal::from_str("-12.50").expect("valid")))
    );
    assert_eq!(decode(&*BIG_DECIMAL, "3").ok(), Some(Some(BigDecimal::from(3))));
    assert_eq!(BIG_DECIMAL.empty_value(), Some(BigDecimal::from(0)));
}

#[test]
fn big_decimal_keeps_digits_beyond_fixed_width() {
    let integer = "123456789012345678901234567890";
    assert_eq!(
        decode(&*BIG_DECIMAL, integer)
            .ok()
            .flatten()
            .map(|d| d.to_string()),
        Some(integer.to_string())
    );

    let fraction = "0.12345678901234567890123456789012";
    assert_eq!(
        decode(&*BIG_DECIMAL, &format!("\"{fraction}\""))
            .ok()
            .flatten()
            .map(|d| d.to_string()),
        Some(fraction.to_string())
    );
    assert_eq!(
        decode(&*BIG_DECIMAL, "1e400").ok().flatten(),
        BigDecimal::from_str("1e400").ok()
    );
}

//
// any number
//

#[test]
fn number_picks_narrowest_integer_type() {
    assert_eq!(decode(&NUMBER, "42").ok(), Some(Some(ScalarValue::Int(42))));
    assert_eq!(
        decode(&NUMBER, "3000000000").ok(),
        Some(Some(ScalarValue::Long(3_000_000_000)))
    );
    assert_eq!(
        decode(&NUMBER, "99999999999999999999").ok(),
        Some(Some(ScalarValue::BigInteger(
            BigInt::from_str("99999999999999999999").expect("valid")
        )))
    );
    assert_eq!(decode(&NUMBER, r#""12""#).ok(), Some(Some(ScalarValue::Int(12))));
    assert_eq!(
        decode(&NUMBER, r#""3000000000""#).ok(),
        Some(Some(ScalarValue::Long(3_000_000_000)))
    );
}

#[test]
fn number_honors_integer_preferences() {
    let long = DecodeConfig::default().with_use_long_for_ints(true);
    assert_eq!(
        decode_with(&NUMBER, "42", &long).ok(),
        Some(Some(ScalarValue::Long(42)))
    );
    assert_eq!(
        decode_with(&NUMBER, r#""42""#, &long).ok(),
        Some(Some(ScalarValue::Long(42)))
    );

    let big = DecodeConfig::default().with_use_big_integer_for_ints(true);
    assert_eq!(
        decode_with(&NUMBER, "42", &big).ok(),
        Some(Some(ScalarValue::BigInteger(BigInt::from(42))))
    );
}

#[test]
fn number_floating_literals() {
    assert_eq!(decode(&NUMBER, "1.5").ok(), Some(Some(ScalarValue::Double(1.5))));
    assert_eq!(
        decode(&NUMBER, r#""2.25""#).ok(),
        Some(Some(ScalarValue::Double(2.25)))
    );

    let config = DecodeConfig::default().with_use_big_decimal_for_floats(true);
    assert_eq!(
        decode_with(&NUMBER, "1.5", &config).ok(),
        Some(Some(ScalarValue::BigDecimal(
            BigDecimal::from_str("1.5").expect("valid")
        )))
    );

    let exact = "1.00000000000000000000000000000001";
    assert_eq!(
        decode_with(&NUMBER, exact, &config).ok(),
        Some(Some(ScalarValue::BigDecimal(
            BigDecimal::from_str(exact).expect("valid")
        )))
    );
    assert_eq!(
        decode_with(&NUMBER, &format!("\"{exact}\""), &config).ok(),
        Some(Some(ScalarValue::BigDecimal(
            BigDecimal::from_str(exact).expect("valid")
        )))
    );
}

#[test]
fn number_ieee_specials_are_always_double() {
    let config = DecodeConfig::default().with_use_big_decimal_for_floats(true);

    assert_eq!(
        decode_with(&NUMBER, r#""-INF""#, &config).ok(),
        Some(Some(ScalarValue::Double(f64::NEG_INFINITY)))
    );

    let nan_token = TokenBuffer::new(vec![Token::float("NaN")]);
    let value = NUMBER
        .decode(&mut nan_token.clone(), &DecodeContext::new(&config))
        .expect("NaN token decodes");
    assert!(matches!(value, Some(ScalarValue::Double(v)) if v.is_nan()));
}

#[test]
fn number_null_and_garbage() {
    assert_eq!(decode(&NUMBER, "null").ok(), Some(None));
    assert_eq!(decode(&NUMBER, r#""null""#).ok(), Some(None));
    assert_eq!(
        error_kind(decode(&NUMBER, r#""abc""#)),
        DecodeErrorKind::InvalidLiteral
    );
}

//
// recovery
//

#[test]
fn ieee_specials_are_limited_to_floating_targets() {
    assert_eq!(DOUBLE.spec().ieee_special("-INF"), Some(f64::NEG_INFINITY));
    assert!(FLOAT_WRAPPER.spec().ieee_special("NaN").is_some_and(f64::is_nan));
    assert_eq!(NUMBER.spec().ieee_special("Infinity"), Some(f64::INFINITY));
    assert_eq!(INT.spec().ieee_special("Infinity"), None);
    assert_eq!(BIG_DECIMAL.spec().ieee_special("NaN"), None);
    assert_eq!(DOUBLE.spec().ieee_special("1.5"), None);
}

#[test]
fn recovery_mode_substitutes_values() {
    let use_null = DecodeConfig::default().with_recovery(RecoveryMode::UseNull);
    assert_eq!(decode_with(&INT_WRAPPER, r#""abc""#, &use_null).ok(), Some(None));
    assert_eq!(decode_with(&INT, r#""abc""#, &use_null).ok(), Some(Some(0)));

    let use_empty = DecodeConfig::default().with_recovery(RecoveryMode::UseEmpty);
    assert_eq!(
        decode_with(&DOUBLE_WRAPPER, "[1, 2]", &use_empty.with_unwrap_single_value_arrays(true))
            .ok(),
        Some(Some(0.0))
    );
}

#[test]
fn handler_replacement_must_match_output_type() {
    let config = DecodeConfig::default();
    let replace_int = |_: &DecodeError| Recovery::Replace(ScalarValue::Int(7));
    let replace_long = |_: &DecodeError| Recovery::Replace(ScalarValue::Long(7));

    let mut buffer = TokenBuffer::from_json_str(r#""abc""#).expect("valid json");
    let ctx = DecodeContext::new(&config).with_handler(&replace_int);
    assert_eq!(INT.decode(&mut buffer, &ctx).ok(), Some(Some(7)));

    let mut buffer = TokenBuffer::from_json_str(r#""abc""#).expect("valid json");
    let ctx = DecodeContext::new(&config).with_handler(&replace_long);
    assert_eq!(
        error_kind(INT.decode(&mut buffer, &ctx)),
        DecodeErrorKind::InvalidLiteral
    );
}

#[test]
fn handler_sees_each_reported_failure() {
    let seen = AtomicUsize::new(0);
    let handler = |err: &DecodeError| {
        assert_eq!(err.kind, DecodeErrorKind::RangeOverflow);
        seen.fetch_add(1, Ordering::SeqCst);
        Recovery::Propagate
    };

    let config = DecodeConfig::default();
    let mut buffer = TokenBuffer::from_json_str(r#""1000""#).expect("valid json");
    let ctx = DecodeContext::new(&config).with_handler(&handler);

    assert!(BYTE.decode(&mut buffer, &ctx).is_err());
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn invariant_violations_bypass_the_handler() {
    let config = DecodeConfig::default();
    let handler = |_: &DecodeError| Recovery::UseNull;
    let ctx = DecodeContext::new(&config).with_handler(&handler);

    assert_eq!(
        ctx.recover(&DecodeError::invariant("broken")),
        Recovery::Propagate
    );
    assert_eq!(
        ctx.recover(&DecodeError::shape_mismatch(
            TargetType::primitive(ScalarKind::Int),
            "bad"
        )),
        Recovery::UseNull
    );
}

//
// type erasure
//

#[test]
fn value_decoder_erases_output_type() {
    let config = DecodeConfig::default();
    let ctx = DecodeContext::new(&config);
    let decoder: &dyn ValueDecoder = &INT_WRAPPER;

    let mut buffer = TokenBuffer::from_json_str("42").expect("valid json");
    assert_eq!(
        decoder.decode_value(&mut buffer, &ctx).ok(),
        Some(ScalarValue::Int(42))
    );

    let mut buffer = TokenBuffer::from_json_str("null").expect("valid json");
    assert_eq!(
        decoder.decode_value(&mut buffer, &ctx).ok(),
        Some(ScalarValue::Null)
    );

    assert_eq!(decoder.target(), TargetType::wrapper(ScalarKind::Int));
    assert_eq!(decoder.logical_type(), LogicalType::Integer);
    assert_eq!(decoder.null_access_pattern(), AccessPattern::AlwaysNull);
}

#[test]
fn typed_decode_matches_plain_decode() {
    let config = DecodeConfig::default();
    let ctx = DecodeContext::new(&config);

    for json in ["42", r#""17""#, "null", r#""x""#] {
        let mut plain = TokenBuffer::from_json_str(json).expect("valid json");
        let mut typed = plain.clone();

        assert_eq!(
            LONG_WRAPPER.decode(&mut plain, &ctx).ok(),
            LONG_WRAPPER.decode_with_type(&mut typed, &ctx).ok(),
            "json: {json}"
        );
    }
}

//! End-to-end scenarios across parsing, conversion, arithmetic and rendering

use approx::assert_relative_eq;
use quanta_core::{codes, div_safe, QuantityError};
use quanta_units::{Quantity, SwiftConverter, UNITS};

fn q(text: &str) -> Quantity {
    Quantity::parse(text).unwrap()
}

// ========== Construction ==========

#[test]
fn test_parse_forms_agree() {
    let reference = q("1 m^2 kg^2 J^2/s^2");
    for text in ["1 m2 kg2 J2/s2", "1 m^2*kg^2*J^2/s^2", "1 m2 kg2 J2 s-2", "1 m**2 kg**2 J**2 s**-2"] {
        assert!(q(text).same(&reference), "{}", text);
    }
}

#[test]
fn test_canonical_units_reparse() {
    for text in ["m", "cm/s", "1/s", "kg*m/s2", "cm2*J3/s2*A2", "ug", "tempC", "degF/min", "KiB/s", "minch", "cday", "Gyr", "ktonne"] {
        let one = Quantity::parse(&format!("1 {}", text)).unwrap();
        let again = Quantity::parse(&format!("1 {}", one.units())).unwrap();
        assert!(again.same(&one), "{}", text);
        assert!(one.to(one.units()).unwrap().is_unchanged(), "{}", text);
    }
}

#[test]
fn test_prefixed_units_never_render_as_other_units() {
    let length = q("1 milliinch");
    assert_eq!(length.units(), "minch");
    assert_eq!(length.kind(), "length");
    assert!(q("1 minch").same(&length));
    assert_eq!(
        length.to("min").unwrap_err(),
        QuantityError::incompatible("minch", "min")
    );

    assert_eq!(q("2 centiday").units(), "cday");
    assert_eq!(q("2 kilotonne").to("t").unwrap().scalar(), 2000.0);
    assert_eq!(q("1 Gyr").kind(), "time");
    assert_eq!(q("1 Gy").kind(), "radiation");
}

#[test]
fn test_unknown_units() {
    for text in ["aa", "m/aa", "m-", "mmm", "3p0"] {
        let err = Quantity::parse(text).unwrap_err();
        assert_eq!(err.code(), codes::UNIT_NOT_RECOGNIZED, "{}", text);
    }
    assert!(Quantity::parse_or_none("aa").is_none());
}

#[test]
fn test_prefix_spellings() {
    let micro = q("1 ug");
    for text in ["1 mcg", "1 \u{00B5}g", "1 \u{03BC}g", "1 microgram"] {
        assert!(q(text).same(&micro), "{}", text);
    }
    assert_eq!(q("1 KiB").to("B").unwrap().scalar(), 1024.0);
    assert!(Quantity::parse("1 Kim").is_err());
}

// ========== Conversion ==========

#[test]
fn test_speed_rendering() {
    let speed = q("24.5 m/s");
    assert_eq!(speed.to_string_in("km/h", Some(1)).unwrap(), "88.2 km/h");
    assert_relative_eq!(
        q("2500 m/h").to("m/s").unwrap().scalar(),
        0.6944444444444444,
        max_relative = 1e-12
    );
}

#[test]
fn test_everyday_conversions() {
    assert_eq!(q("10 cm").to("ft").unwrap().scalar(), div_safe(0.1, 0.3048).unwrap());
    assert_eq!(q("1 mi").to("km").unwrap().scalar(), 1.609344);
    assert_relative_eq!(q("5 lb").to("kg").unwrap().scalar(), 2.26796185, max_relative = 1e-12);
    assert_eq!(q("1 kWh").to("J").unwrap().scalar(), 3600000.0);
    assert_eq!(q("2 m^3").to("l").unwrap().scalar(), 2000.0);
}

#[test]
fn test_two_thirds_meter() {
    let two_thirds = q("2 m").div(3).unwrap();
    assert_eq!(two_thirds.to_string_in("cm", Some(2)).unwrap(), "66.67 cm");
}

#[test]
fn test_temperature_round_trips() {
    assert_eq!(q("32 tempF").to("tempC").unwrap().scalar(), 0.0);
    assert_relative_eq!(q("460.67 degF").to("tempF").unwrap().scalar(), 1.0, max_relative = 1e-9);
    assert_relative_eq!(
        q("0 tempF").to("tempK").unwrap().scalar(),
        255.37222222222223,
        max_relative = 1e-12
    );
}

#[test]
fn test_reciprocal_units() {
    let resistance = q("0.05 ohm");
    let conductance = resistance.inverse().unwrap();
    assert_eq!(conductance.scalar(), 20.0);
    assert_eq!(conductance.to("S").unwrap().scalar(), 20.0);
    assert_eq!(q("10 ohm").to("S").unwrap().scalar(), 0.1);

    let squared = q("0.2 ohm^2").inverse().unwrap().to("S^2").unwrap().into_owned();
    assert_eq!(squared.scalar(), 5.0);
    assert_eq!(squared.units(), "S2");
    let back = squared.inverse().unwrap();
    assert_eq!(back.scalar(), 0.2);
    assert_eq!(back.units(), "1/S2");

    let per_cm = q("100 cm").inverse().unwrap();
    assert_eq!(per_cm.scalar(), 0.01);
    assert_eq!(per_cm.units(), "1/cm");
    assert_eq!(per_cm.to("1/m").unwrap().scalar(), 1.0);

    assert_relative_eq!(
        q("12 in").inverse().unwrap().to("ft").unwrap().scalar(),
        1.0,
        max_relative = 1e-12
    );
}

#[test]
fn test_swift_converter_matches_to() {
    let convert = SwiftConverter::new("MPa", "bar").unwrap();
    assert_eq!(
        convert.convert_all(&[250.0, 10.0, 15.0]).unwrap(),
        vec![2500.0, 100.0, 150.0]
    );
    for value in [1.0, 42.0, 0.5] {
        let expected = Quantity::parse(&format!("{} MPa", value))
            .unwrap()
            .to("bar")
            .unwrap()
            .scalar();
        assert_relative_eq!(convert.convert(value).unwrap(), expected, max_relative = 1e-12);
    }
}

// ========== Arithmetic ==========

#[test]
fn test_temperature_table() {
    assert_eq!(q("2tempC").sub("1.5tempK").unwrap().scalar(), 273.65);
    assert_eq!(q("2degC").add("2degF").unwrap().scalar(), 28.0 / 9.0);
    assert_eq!(q("2degC").add("3tempF").unwrap().scalar(), 6.6);

    let errors = [
        (q("2tempC").add("3tempF").unwrap_err(), codes::CANNOT_ADD_TEMPERATURES),
        (q("2degC").sub("3tempF").unwrap_err(), codes::CANNOT_SUBTRACT_FROM_DEGREE),
        (q("2tempC").mul("3 m").unwrap_err(), codes::CANNOT_MULTIPLY_TEMPERATURES),
        (q("2 m").div("3 tempC").unwrap_err(), codes::CANNOT_DIVIDE_TEMPERATURES),
    ];
    for (err, code) in errors {
        assert_eq!(err.code(), code);
    }
}

#[test]
fn test_zero_division_rules() {
    assert_eq!(q("2.5m").div("0m").unwrap_err(), QuantityError::DivideByZero);
    let zero = q("0m").div("2.5m").unwrap();
    assert_eq!(zero.scalar(), 0.0);
    assert!(zero.is_unitless());
}

#[test]
fn test_area_density() {
    let density = q("7.5kg").div("2.5m^2").unwrap();
    assert_eq!(density.to_string(), "3 kg/m2");
    assert_eq!(density.kind(), "area_density");
}

#[test]
fn test_mixed_operands() {
    let a = q("2.5 m");
    assert_eq!(a.add("30 cm").unwrap().to_string(), "2.8 m");
    assert_eq!(a.mul(2).unwrap().to_string(), "5 m");
    assert_eq!(a.div(&q("0.5 s")).unwrap().to_string(), "5 m/s");
    assert!(a.is_compatible("in"));
    assert!(!a.is_compatible("not a unit"));
}

#[test]
fn test_comparison_tolerates_conversion_noise() {
    let a = q("1 ft");
    let b = q("12 in");
    assert!(a.equals(&b).unwrap());
    assert_eq!(a, b);
    assert!(!a.same(&b));
    assert!(q("1 m").greater_than("1 ft").unwrap());
}

// ========== Rendering ==========

#[test]
fn test_to_prec_same_units() {
    let length = q("5.17 ft");
    let cases = [
        ("ft", "5 ft"),
        ("2 ft", "6 ft"),
        ("10 ft", "10 ft"),
        ("0.5 ft", "5 ft"),
        ("0.1 ft", "5.2 ft"),
        ("0.05 ft", "5.15 ft"),
        ("0.01 ft", "5.17 ft"),
        ("0.0001 ft", "5.17 ft"),
        ("0.25 ft", "5.25 ft"),
    ];
    for (precision, expected) in cases {
        assert_eq!(length.to_prec(&q(precision)).unwrap().to_string(), expected, "{}", precision);
        assert_eq!(length.to_string_prec(precision).unwrap(), expected, "{}", precision);
    }
}

#[test]
fn test_to_prec_prefixed_units() {
    let radius = q("6.3782 m");
    let cases = [
        ("dm", "6.4 m"),
        ("cm", "6.38 m"),
        ("mm", "6.378 m"),
        ("5 cm", "6.4 m"),
        ("0.1 m", "6.4 m"),
        ("0.01 m", "6.38 m"),
        ("0.001 m", "6.378 m"),
    ];
    for (precision, expected) in cases {
        assert_eq!(radius.to_string_prec(precision).unwrap(), expected, "{}", precision);
    }
}

#[test]
fn test_to_prec_compatible_units() {
    let pressure = q("1.146 MPa");
    for precision in ["0.1 bar", "0.01 MPa", "dbar"] {
        assert_eq!(pressure.to_string_prec(precision).unwrap(), "1.15 MPa", "{}", precision);
    }

    // steps that are not a whole number of feet keep full precision
    let length = q("5.171234568 ft");
    let cases = [
        ("m", "6.561679790026248 ft"),
        ("dm", "5.249343832020998 ft"),
        ("cm", "5.183727034120736 ft"),
        ("mm", "5.170603674540684 ft"),
    ];
    for (precision, expected) in cases {
        assert_eq!(length.to_string_prec(precision).unwrap(), expected, "{}", precision);
    }
}

#[test]
fn test_serde_round_trip() {
    let values = vec![q("2.5 m/s"), q("3"), q("-40 tempC")];
    let json = serde_json::to_string(&values).unwrap();
    assert_eq!(json, r#"["2.5 m/s","3","-40 tempC"]"#);
    let back: Vec<Quantity> = serde_json::from_str(&json).unwrap();
    for (a, b) in values.iter().zip(back.iter()) {
        assert!(a.same(b));
    }
}

#[test]
fn test_error_serialization() {
    let err = Quantity::parse("2 zz").unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "UnitNotRecognized");
    assert_eq!(err, QuantityError::unit_not_recognized("zz"));
}

// ========== Registry ==========

#[test]
fn test_registry_introspection() {
    assert!(UNITS.kinds().contains(&"conductance"));
    let lengths = UNITS.units_of_kind("length");
    assert!(lengths.contains(&"m"));
    assert!(lengths.contains(&"ft"));
    let aliases = UNITS.aliases("m").unwrap();
    assert!(aliases.contains(&"meter"));
    assert!(aliases.contains(&"metres"));
}

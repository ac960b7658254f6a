use super::*;

fn unit(text: &str) -> (UnitType, f64, String) {
    let info = normalize_unit(Some(text));
    (info.unit_type, info.value, info.description)
}

// -----------------------------------------------------------------------
// normalize_unit: absent input
// -----------------------------------------------------------------------

#[test]
fn empty_text_is_per_piece() {
    assert_eq!(normalize_unit(Some("")), UnitInfo::per_piece());
}

#[test]
fn absent_text_is_per_piece() {
    let info = normalize_unit(None);
    assert_eq!(info.unit_type, UnitType::Piece);
    assert_eq!(info.value, 1.0);
    assert_eq!(info.description, "per stuk");
}

#[test]
fn whitespace_only_text_is_per_piece() {
    assert_eq!(normalize_unit(Some("   ")), UnitInfo::per_piece());
}

// -----------------------------------------------------------------------
// normalize_unit: weight
// -----------------------------------------------------------------------

#[test]
fn weight_grams() {
    assert_eq!(
        unit("500 gram"),
        (UnitType::Weight, 500.0, "500 gram".to_owned())
    );
}

#[test]
fn weight_kilograms_upper_case() {
    assert_eq!(unit("1 KG"), (UnitType::Weight, 1000.0, "1 KG".to_owned()));
}

#[test]
fn weight_kilograms_scale_by_thousand() {
    for (text, kilograms) in [("2 kg", 2.0), ("1,5 kg", 1.5), ("0.75kg", 0.75), ("3 kilo", 3.0)] {
        let info = normalize_unit(Some(text));
        assert_eq!(info.unit_type, UnitType::Weight, "{text}");
        assert_eq!(info.value, kilograms * 1000.0, "{text}");
    }
}

#[test]
fn weight_short_gram_suffix() {
    assert_eq!(unit("190 g").1, 190.0);
    assert_eq!(unit("190g").1, 190.0);
    assert_eq!(unit("250 gr.").1, 250.0);
}

#[test]
fn weight_comma_decimal() {
    assert_eq!(unit("12,5 gram").1, 12.5);
}

#[test]
fn weight_kilogram_word_is_not_read_as_grams() {
    assert_eq!(unit("1 kilogram").1, 1000.0);
}

#[test]
fn weight_inside_longer_subtitle() {
    assert_eq!(
        unit("Ca. 400 g per bak"),
        (UnitType::Weight, 400.0, "Ca. 400 g per bak".to_owned())
    );
}

#[test]
fn description_is_trimmed_source_text() {
    assert_eq!(unit("  500 gram ").2, "500 gram");
}

// -----------------------------------------------------------------------
// normalize_unit: volume
// -----------------------------------------------------------------------

#[test]
fn volume_liters_scale_by_thousand() {
    for (text, liters) in [("1 L", 1.0), ("1,5 liter", 1.5), ("0,75 l", 0.75), ("2 ltr", 2.0)] {
        let info = normalize_unit(Some(text));
        assert_eq!(info.unit_type, UnitType::Volume, "{text}");
        assert_eq!(info.value, liters * 1000.0, "{text}");
    }
}

#[test]
fn volume_millilitres() {
    assert_eq!(unit("500 ml"), (UnitType::Volume, 500.0, "500 ml".to_owned()));
    assert_eq!(unit("330ML").1, 330.0);
}

#[test]
fn volume_millilitres_are_not_read_as_liters() {
    assert_eq!(unit("250 ml").1, 250.0);
}

#[test]
fn volume_centiliters() {
    assert_eq!(unit("33 cl"), (UnitType::Volume, 330.0, "33 cl".to_owned()));
}

#[test]
fn volume_multipack_takes_first_match() {
    assert_eq!(unit("6 x 330 ml").1, 330.0);
}

// -----------------------------------------------------------------------
// normalize_unit: piece and fallback
// -----------------------------------------------------------------------

#[test]
fn piece_explicit_count() {
    assert_eq!(unit("6 stuks"), (UnitType::Piece, 6.0, "6 stuks".to_owned()));
    assert_eq!(unit("1 stuk").1, 1.0);
    assert_eq!(unit("10 stukken").1, 10.0);
}

#[test]
fn piece_per_stuk() {
    assert_eq!(unit("Per stuk"), (UnitType::Piece, 1.0, "Per stuk".to_owned()));
}

#[test]
fn unrecognized_text_falls_back_to_package() {
    assert_eq!(
        unit("Doos"),
        (UnitType::Package, 1.0, "Doos".to_owned())
    );
}

#[test]
fn word_starting_with_unit_letter_is_not_a_unit() {
    assert_eq!(unit("2 glazen").0, UnitType::Package);
}

#[test]
fn weight_group_wins_over_volume_group() {
    assert_eq!(unit("500 g / 0,5 l").0, UnitType::Weight);
}

#[test]
fn parse_unit_reports_unrecognized() {
    assert!(parse_unit("Doos").is_none());
    assert!(parse_unit("").is_none());
    assert!(parse_unit("1 KG").is_some());
}

// -----------------------------------------------------------------------
// normalize_reference_unit
// -----------------------------------------------------------------------

#[test]
fn reference_kilo_is_one_kilogram() {
    let info = normalize_reference_unit("kilo");
    assert_eq!(info.unit_type, UnitType::Weight);
    assert_eq!(info.value, 1000.0);
    assert_eq!(info.description, "1 kilogram");
}

#[test]
fn reference_with_explicit_quantity() {
    let info = normalize_reference_unit("1 kilo");
    assert_eq!(info.value, 1000.0);
    assert_eq!(info.description, "1 kilogram");

    let info = normalize_reference_unit("100 gram");
    assert_eq!(info.unit_type, UnitType::Weight);
    assert_eq!(info.value, 100.0);
    assert_eq!(info.description, "100 gram");
}

#[test]
fn reference_liter_and_millilitre() {
    let liter = normalize_reference_unit("Liter");
    assert_eq!(liter.unit_type, UnitType::Volume);
    assert_eq!(liter.value, 1000.0);
    assert_eq!(liter.description, "1 liter");

    let ml = normalize_reference_unit("100 ml");
    assert_eq!(ml.value, 100.0);
    assert_eq!(ml.description, "100 milliliter");
}

#[test]
fn reference_millilitre_is_not_liter() {
    assert_eq!(normalize_reference_unit("milliliter").value, 1.0);
}

#[test]
fn reference_piece() {
    assert_eq!(normalize_reference_unit("stuk"), UnitInfo::per_piece());
    assert_eq!(normalize_reference_unit("per stuk"), UnitInfo::per_piece());
    let six = normalize_reference_unit("6 stuks");
    assert_eq!(six.value, 6.0);
    assert_eq!(six.description, "6 stuks");
}

#[test]
fn reference_unknown_keyword_falls_back_to_package() {
    let info = normalize_reference_unit("doos");
    assert_eq!(info.unit_type, UnitType::Package);
    assert_eq!(info.value, 1.0);
    assert_eq!(info.description, "doos");
    assert!(parse_reference_unit("doos").is_none());
}

#[test]
fn reference_free_text_uses_package_normalizer() {
    let info = normalize_reference_unit("per 2 x 500 g");
    assert_eq!(info.unit_type, UnitType::Weight);
    assert_eq!(info.value, 500.0);
}

#[test]
fn overlong_quantity_falls_back_to_package() {
    let text = format!("1{} g", "0".repeat(400));
    let info = normalize_unit(Some(&text));
    assert_eq!(info.unit_type, UnitType::Package);
    assert_eq!(info.value, 1.0);
    assert!(parse_unit(&text).is_none());
}

#[test]
fn quantity_overflowing_after_scaling_is_rejected() {
    let text = format!("1{} kg", "0".repeat(306));
    assert!(parse_unit(&text).is_none());
    assert_eq!(normalize_unit(Some(&text)).unit_type, UnitType::Package);
    assert!(parse_reference_unit(&text).is_none());
}

//! Unit tests for wt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn invalid_is_default_and_max() {
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert!(!EdgeId::INVALID.is_valid());
        assert!(EdgeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(EdgeId(7).to_string(), "EdgeId(7)");
        assert_eq!(NodeId::INVALID.to_string(), "NodeId(invalid)");
    }

    #[test]
    fn try_from_usize() {
        assert_eq!(NodeId::try_from(3usize).unwrap(), NodeId(3));
        assert!(EdgeId::try_from(u64::MAX as usize).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{ConfigValue, Configuration, CoreError};

    #[test]
    fn lenient_bool_coercion() {
        let config = Configuration::new()
            .with("a", true)
            .with("b", "TRUE")
            .with("c", "False")
            .with("d", 1)
            .with("e", "maybe");
        assert!(config.get_bool("a", false));
        assert!(config.get_bool("b", false));
        assert!(!config.get_bool("c", true));
        assert!(config.get_bool("d", false));
        // Uninterpretable text falls back to the default.
        assert!(config.get_bool("e", true));
        assert!(!config.get_bool("missing", false));
    }

    #[test]
    fn numeric_coercion() {
        let config = Configuration::new()
            .with("n", 2.5)
            .with("t", " 40 ")
            .with("b", true);
        assert_eq!(config.get_f64("n", 0.0), 2.5);
        assert_eq!(config.get_f64("t", 0.0), 40.0);
        assert_eq!(config.get_f64("b", -1.0), -1.0);
    }

    #[test]
    fn string_forms() {
        let config = Configuration::new().with("n", 3).with("b", false);
        assert_eq!(config.get_string("n", ""), "3");
        assert_eq!(config.get_string("b", ""), "false");
        assert_eq!(config.get_string("missing", "dflt"), "dflt");
    }

    #[test]
    fn insertion_order_preserved() {
        let config: Configuration = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut config = Configuration::new().with("a", 1).with("b", 2);
        let old = config.insert("a", 9);
        assert_eq!(old, Some(ConfigValue::Number(1.0)));
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(config.get_f64("a", 0.0), 9.0);
    }

    #[test]
    fn from_json_flat_object() {
        let config = Configuration::from_json_str(
            r#"{"weighting": "fastest", "custom_weightings": true, "weighting_#green_factor": 3}"#,
        )
        .unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("weighting"), Some(&ConfigValue::Text("fastest".into())));
        assert_eq!(config.get("custom_weightings"), Some(&ConfigValue::Bool(true)));
        assert_eq!(config.get_f64("weighting_#green_factor", 0.0), 3.0);
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["weighting", "custom_weightings", "weighting_#green_factor"]);
    }

    #[test]
    fn from_json_rejects_nested() {
        let err = Configuration::from_json_str(r#"{"weighting": {"name": "fastest"}}"#).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn from_query_string() {
        let config = Configuration::from_query("?weighting=fastest&edge_based=true").unwrap();
        assert_eq!(config.get_string("weighting", ""), "fastest");
        assert!(config.get_bool("edge_based", false));
    }

    #[test]
    fn from_query_decodes_modifier_keys() {
        let config =
            Configuration::from_query("weighting=fastest&custom_weightings=true&weighting_%23green_factor=3")
                .unwrap();
        assert!(config.contains_key("weighting_#green_factor"));
        assert!(!config.contains_key("weighting_%23green_factor"));
        assert_eq!(config.get_f64("weighting_#green_factor", 0.0), 3.0);
        assert!(config.get_bool("custom_weightings", false));
    }

    #[test]
    fn from_query_empty_key_is_error() {
        assert!(matches!(
            Configuration::from_query("=x"),
            Err(CoreError::Parse(_) | CoreError::Query(_))
        ));
    }
}

#[cfg(test)]
mod encoder {
    use crate::{FlagEncoder, PriorityCode, TravelCapability, TravelMode};

    #[test]
    fn mode_names_roundtrip() {
        assert_eq!(TravelMode::HeavyVehicle.as_str(), "heavyvehicle");
        assert_eq!("HeavyVehicle".parse::<TravelMode>().unwrap(), TravelMode::HeavyVehicle);
        assert_eq!("foot".parse::<TravelMode>().unwrap(), TravelMode::Walking);
        assert_eq!(TravelMode::RoadBike.to_string(), "racingbike");
        assert!("hovercraft".parse::<TravelMode>().is_err());
    }

    #[test]
    fn flag_encoder_capabilities() {
        let car = FlagEncoder::new(TravelMode::Car);
        assert!(!car.supports_turn_costs());
        assert!(!car.supports_priority_costing());
        assert_eq!(car.name(), "car");

        let hgv = FlagEncoder::new(TravelMode::HeavyVehicle).with_turn_costs(true);
        assert!(hgv.supports_turn_costs());
        assert!(hgv.supports_priority_costing());
        assert!(hgv.is_heavy_vehicle());
        assert!(!FlagEncoder::new(TravelMode::Bike).is_heavy_vehicle());
    }

    #[test]
    fn max_speed_override() {
        let bike = FlagEncoder::new(TravelMode::Bike);
        assert_eq!(bike.max_speed_kmh(), 30.0);
        assert_eq!(bike.with_max_speed(18.0).max_speed_kmh(), 18.0);
    }

    #[test]
    fn priority_scale() {
        assert_eq!(PriorityCode::Best.factor(), 1.0);
        assert_eq!(PriorityCode::default(), PriorityCode::Unchanged);
        assert_eq!(PriorityCode::from_value(0), PriorityCode::AvoidAtAllCosts);
        assert_eq!(PriorityCode::from_value(200), PriorityCode::Best);
        assert!(PriorityCode::Prefer > PriorityCode::AvoidIfPossible);
    }
}

#[cfg(test)]
mod time {
    use chrono::{NaiveDate, NaiveDateTime, Weekday};

    use crate::TimeWindow;

    /// 2024-01-01 is a Monday.
    fn at(day_of_month: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day_of_month)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn weekday_range() {
        let w: TimeWindow = "Mo-Fr 07:00-19:00".parse().unwrap();
        assert!(w.contains(at(1, 7, 0)));
        assert!(w.contains(at(5, 18, 59)));
        assert!(!w.contains(at(5, 19, 0)), "end is exclusive");
        assert!(!w.contains(at(6, 12, 0)), "saturday excluded");
    }

    #[test]
    fn day_list_and_whole_day() {
        let weekend: TimeWindow = "Sa,Su".parse().unwrap();
        assert!(weekend.contains(at(6, 0, 0)));
        assert!(weekend.contains(at(7, 23, 59)));
        assert!(!weekend.contains(at(8, 12, 0)));
    }

    #[test]
    fn overnight_wraps_into_next_day() {
        let w: TimeWindow = "Fr 22:00-06:00".parse().unwrap();
        assert!(w.contains(at(5, 23, 0)));
        assert!(w.contains(at(6, 5, 59)), "saturday morning belongs to friday night");
        assert!(!w.contains(at(5, 5, 0)), "friday morning belongs to thursday night");
    }

    #[test]
    fn daily_and_constructed_windows_agree() {
        let parsed: TimeWindow = "22:00-06:00".parse().unwrap();
        assert_eq!(parsed, TimeWindow::daily(22 * 60, 6 * 60));
        let built = TimeWindow::new([Weekday::Mon, Weekday::Tue], 0, 24 * 60);
        assert_eq!(built, "Mo-Tu".parse::<TimeWindow>().unwrap());
    }

    #[test]
    fn wrapping_day_range() {
        let w: TimeWindow = "Fr-Mo".parse().unwrap();
        assert!(w.contains(at(7, 12, 0)));
        assert!(w.contains(at(1, 12, 0)));
        assert!(!w.contains(at(3, 12, 0)));
    }

    #[test]
    fn rejects_malformed() {
        assert!("Mo-Fr 25:00-26:00".parse::<TimeWindow>().is_err());
        assert!("Xx 07:00-08:00".parse::<TimeWindow>().is_err());
        assert!("07:00".parse::<TimeWindow>().is_err());
        assert!("Mo 07:00-08:00 extra".parse::<TimeWindow>().is_err());
    }
}

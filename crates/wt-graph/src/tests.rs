//! Unit tests for wt-graph.
//!
//! All tests use hand-built networks or in-memory CSV.

#[cfg(test)]
mod helpers {
    use wt_core::{NodeId, PriorityCode, TravelMode};

    use crate::{EdgeSpec, RoadNetwork, RoadNetworkBuilder};

    /// Three edges in a line, 0 -1- 1 -2- 2 -3- 3, with bike speeds and a
    /// one-way third edge.
    pub fn line_network() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        let e0 = b.add_edge(EdgeSpec::new(NodeId(0), NodeId(1), 100.0).grade(5.0).green_index(0.9));
        let e1 = b.add_edge(EdgeSpec::new(NodeId(1), NodeId(2), 200.0).noise_level(0.4));
        let e2 = b.add_edge(EdgeSpec::new(NodeId(2), NodeId(3), 300.0));
        b.set_speed(TravelMode::Bike, e0, 18.0, 20.0).unwrap();
        b.set_speed(TravelMode::Bike, e1, 15.0, 15.0).unwrap();
        b.set_speed(TravelMode::Bike, e2, 12.0, 0.0).unwrap();
        b.set_priority(TravelMode::Bike, e1, PriorityCode::Prefer, PriorityCode::AvoidIfPossible)
            .unwrap();
        b.build()
    }
}

#[cfg(test)]
mod builder {
    use wt_core::{EdgeId, NodeId, PriorityCode, TravelMode};

    use crate::{EdgeSpec, EncodedValue, GraphError, RoadNetwork, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetwork::empty();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert_eq!(net.modes().count(), 0);
    }

    #[test]
    fn nodes_grow_with_edges() {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node();
        b.add_edge(EdgeSpec::new(n0, NodeId(4), 10.0));
        let net = b.build();
        assert_eq!(net.node_count(), 5);
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn directional_speed_and_priority() {
        let net = super::helpers::line_network();
        assert_eq!(net.speed(TravelMode::Bike, EdgeId(0), false), 18.0);
        assert_eq!(net.speed(TravelMode::Bike, EdgeId(0), true), 20.0);
        assert_eq!(net.speed(TravelMode::Bike, EdgeId(2), true), 0.0);
        assert_eq!(net.priority(TravelMode::Bike, EdgeId(1), false), PriorityCode::Prefer);
        assert_eq!(net.priority(TravelMode::Bike, EdgeId(1), true), PriorityCode::AvoidIfPossible);
        // Unset edges read the neutral code.
        assert_eq!(net.priority(TravelMode::Bike, EdgeId(0), false), PriorityCode::Unchanged);
    }

    #[test]
    fn unknown_mode_reads_closed() {
        let net = super::helpers::line_network();
        assert_eq!(net.speed(TravelMode::Car, EdgeId(0), false), 0.0);
        assert_eq!(net.priority(TravelMode::Car, EdgeId(0), false), PriorityCode::Unchanged);
    }

    #[test]
    fn optional_attributes_fill_with_zero() {
        let net = super::helpers::line_network();
        assert_eq!(net.grade(EdgeId(0), false), Some(5.0));
        assert_eq!(net.grade(EdgeId(0), true), Some(-5.0));
        assert_eq!(net.grade(EdgeId(1), false), Some(0.0));
        assert_eq!(net.green_index(EdgeId(0)), Some(0.9));
        assert_eq!(net.noise_level(EdgeId(2)), Some(0.0));
    }

    #[test]
    fn absent_attributes_are_none() {
        let mut b = RoadNetworkBuilder::new();
        let e = b.add_edge(EdgeSpec::new(NodeId(0), NodeId(1), 10.0));
        let net = b.build();
        assert_eq!(net.grade(e, false), None);
        assert_eq!(net.green_index(e), None);
        assert!(!net.has_encoded_value(TravelMode::Bike, EncodedValue::Grade));
    }

    #[test]
    fn encoded_value_set() {
        let net = super::helpers::line_network();
        let bike = TravelMode::Bike;
        assert!(net.has_encoded_value(bike, EncodedValue::Speed));
        assert!(net.has_encoded_value(bike, EncodedValue::Priority));
        assert!(net.has_encoded_value(bike, EncodedValue::Grade));
        assert!(net.has_encoded_value(bike, EncodedValue::GreenIndex));
        assert!(net.has_encoded_value(bike, EncodedValue::NoiseLevel));
        assert!(!net.has_encoded_value(bike, EncodedValue::ConditionalSpeed));
        assert!(!net.has_encoded_value(TravelMode::Walking, EncodedValue::Speed));
    }

    #[test]
    fn setters_reject_unknown_edge() {
        let mut b = RoadNetworkBuilder::new();
        let err = b.set_speed(TravelMode::Car, EdgeId(3), 50.0, 50.0).unwrap_err();
        assert!(matches!(err, GraphError::EdgeNotFound(EdgeId(3))));
    }

    #[test]
    fn endpoints_follow_direction() {
        let net = super::helpers::line_network();
        assert_eq!(net.endpoints(EdgeId(1), false), (NodeId(1), NodeId(2)));
        assert_eq!(net.endpoints(EdgeId(1), true), (NodeId(2), NodeId(1)));
    }
}

#[cfg(test)]
mod conditional {
    use chrono::NaiveDate;

    use wt_core::{EdgeId, NodeId, TimeWindow, TravelMode};

    use crate::{ConditionalSpeed, EdgeSpec, EncodedValue, RoadNetworkBuilder};

    #[test]
    fn parse_tag_form() {
        let rule: ConditionalSpeed = "30 @ (Mo-Fr 07:00-19:00)".parse().unwrap();
        assert_eq!(rule.speed_kmh, 30.0);
        assert_eq!(rule.window, "Mo-Fr 07:00-19:00".parse::<TimeWindow>().unwrap());

        let bare: ConditionalSpeed = "20@22:00-06:00".parse().unwrap();
        assert_eq!(bare.speed_kmh, 20.0);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("30 (Mo-Fr)".parse::<ConditionalSpeed>().is_err());
        assert!("fast @ (Mo)".parse::<ConditionalSpeed>().is_err());
        assert!("30 @ (Zz 07:00-08:00)".parse::<ConditionalSpeed>().is_err());
    }

    #[test]
    fn first_active_rule_wins() {
        let mut b = RoadNetworkBuilder::new();
        let e = b.add_edge(EdgeSpec::new(NodeId(0), NodeId(1), 100.0));
        b.set_speed(TravelMode::Car, e, 50.0, 50.0).unwrap();
        b.add_conditional_speed(TravelMode::Car, e, "30 @ (Mo-Fr 07:00-19:00)".parse().unwrap())
            .unwrap();
        b.add_conditional_speed(TravelMode::Car, e, "10 @ (Mo 08:00-09:00)".parse().unwrap())
            .unwrap();
        let net = b.build();

        assert!(net.has_encoded_value(TravelMode::Car, EncodedValue::ConditionalSpeed));
        assert_eq!(net.conditional_speeds(TravelMode::Car, e).len(), 2);

        // 2024-01-01 is a Monday.
        let monday_8 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(8, 30, 0).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap().and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(net.conditional_speed_at(TravelMode::Car, e, monday_8), Some(30.0));
        assert_eq!(net.conditional_speed_at(TravelMode::Car, e, sunday), None);
        assert_eq!(net.conditional_speed_at(TravelMode::Bike, e, monday_8), None);
        assert!(net.conditional_speeds(TravelMode::Car, EdgeId(9)).is_empty());
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use wt_core::{EdgeId, PriorityCode, TravelMode};

    use crate::{load_network_reader, EncodedValue, GraphError};

    const CSV: &str = "\
from,to,length_m,speed_kmh,reverse_speed_kmh,priority,grade_pct,green_index,noise_level,conditional_speed
0,1,120.0,50,40,5,1.5,0.2,0.7,
1,2,80.0,30,,,-2.0,,,20 @ (Mo-Fr 07:00-19:00); 10 @ (22:00-06:00)
";

    #[test]
    fn loads_rows_in_order() {
        let net = load_network_reader(Cursor::new(CSV), TravelMode::Car).unwrap();
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.distance(EdgeId(1)), 80.0);
        assert_eq!(net.speed(TravelMode::Car, EdgeId(0), true), 40.0);
        // Missing reverse speed mirrors the forward speed.
        assert_eq!(net.speed(TravelMode::Car, EdgeId(1), true), 30.0);
        assert_eq!(net.priority(TravelMode::Car, EdgeId(0), false), PriorityCode::Prefer);
        assert_eq!(net.grade(EdgeId(1), false), Some(-2.0));
        assert_eq!(net.green_index(EdgeId(1)), Some(0.0));
        assert_eq!(net.conditional_speeds(TravelMode::Car, EdgeId(1)).len(), 2);
        assert!(net.has_encoded_value(TravelMode::Car, EncodedValue::ConditionalSpeed));
    }

    #[test]
    fn minimal_columns() {
        let csv = "from,to,length_m,speed_kmh\n0,1,10,5\n";
        let net = load_network_reader(Cursor::new(csv), TravelMode::Walking).unwrap();
        assert_eq!(net.edge_count(), 1);
        assert!(!net.has_encoded_value(TravelMode::Walking, EncodedValue::Priority));
        assert!(!net.has_encoded_value(TravelMode::Walking, EncodedValue::Grade));
    }

    #[test]
    fn bad_rows_are_parse_errors() {
        let csv = "from,to,length_m,speed_kmh\n0,1,abc,5\n";
        let err = load_network_reader(Cursor::new(csv), TravelMode::Car).err().unwrap();
        assert!(matches!(err, GraphError::Parse(_)));

        let csv = "from,to,length_m,speed_kmh\n0,1,-4,5\n";
        let err = load_network_reader(Cursor::new(csv), TravelMode::Car).err().unwrap();
        assert!(matches!(err, GraphError::Parse(_)));
    }

    #[test]
    fn bad_conditional_rule_is_core_error() {
        let csv = "from,to,length_m,speed_kmh,conditional_speed\n0,1,10,5,oops\n";
        let err = load_network_reader(Cursor::new(csv), TravelMode::Car).err().unwrap();
        assert!(matches!(err, GraphError::Core(_)));
    }
}

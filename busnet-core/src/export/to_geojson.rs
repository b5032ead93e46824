use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use serde_json::json;

use crate::algo::Accessibility;
use crate::{Error, TransitNetwork, TravelTime};

/// Converts the network to a `GeoJSON` `FeatureCollection`.
///
/// Positioned nodes become `Point` features, followed by one `LineString`
/// per edge whose endpoints are both positioned. With `accessibility`, node
/// features carry their reachability count.
pub fn network_to_geojson(
    network: &TransitNetwork,
    accessibility: Option<&Accessibility>,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::with_capacity(network.node_count() + network.edge_count());
    let reachable = accessibility.map(Accessibility::counts_by_id);

    for (idx, point) in network.positioned_nodes() {
        features.push(create_node_feature(network, idx, point, reachable.as_ref())?);
    }

    for (_, a, b, edge) in network.edges() {
        let (Some(pa), Some(pb)) = (network.position(a), network.position(b)) else {
            continue;
        };
        features.push(create_edge_feature(
            network,
            (a, pa),
            (b, pb),
            edge.kind.as_str(),
            edge.weight,
            edge.color,
        )?);
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn network_to_geojson_string(
    network: &TransitNetwork,
    accessibility: Option<&Accessibility>,
) -> Result<String, Error> {
    serde_json::to_string(&network_to_geojson(network, accessibility)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_node_feature(
    network: &TransitNetwork,
    idx: NodeIndex,
    point: Point<f64>,
    reachable: Option<&HashMap<&str, usize>>,
) -> Result<Feature, Error> {
    let node = network.node(idx);
    let geometry = Geometry::new(GeoJsonValue::from(&point));

    let mut value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "feature_type": "node",
            "node_id": node.id,
            "degree": network.degree(idx),
            "synthetic": node.synthetic,
        }
    });
    if let Some(count) = reachable.and_then(|counts| counts.get(node.id.as_str())) {
        value["properties"]["reachable"] = json!(count);
    }

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_edge_feature(
    network: &TransitNetwork,
    (a, pa): (NodeIndex, Point<f64>),
    (b, pb): (NodeIndex, Point<f64>),
    kind: &str,
    weight: TravelTime,
    color: &str,
) -> Result<Feature, Error> {
    let line = LineString::from(vec![pa.0, pb.0]);
    let geometry = Geometry::new(GeoJsonValue::from(&line));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "feature_type": "edge",
            "from": network.node(a).id,
            "to": network.node(b).id,
            "kind": kind,
            "weight": weight,
            "color": color,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::CoordinateSystem;
    use crate::algo::calculate_accessibility;
    use crate::model::NetworkEdge;

    fn sample() -> TransitNetwork {
        let mut network = TransitNetwork::new(CoordinateSystem::Geographic);
        let a = network
            .add_node("a", Some(Point::new(-76.61, 39.29)), false)
            .unwrap();
        let b = network
            .add_node("b", Some(Point::new(-76.60, 39.30)), false)
            .unwrap();
        let c = network.add_node("c", None, false).unwrap();
        network.add_edge(a, b, NetworkEdge::transit(60.0, "#1f77b4"));
        network.add_edge(b, c, NetworkEdge::pedestrian(30.0));
        network
    }

    fn features(network: &TransitNetwork, accessibility: Option<&Accessibility>) -> Vec<Value> {
        let collection = network_to_geojson(network, accessibility).unwrap();
        match serde_json::to_value(&collection).unwrap() {
            Value::Object(mut map) => match map.remove("features") {
                Some(Value::Array(features)) => features,
                other => panic!("unexpected features {other:?}"),
            },
            other => panic!("unexpected collection {other:?}"),
        }
    }

    #[test]
    fn unpositioned_nodes_and_their_edges_are_omitted() {
        let features = features(&sample(), None);
        assert_eq!(features.len(), 3);

        let edge = &features[2];
        assert_eq!(edge["geometry"]["type"], "LineString");
        assert_eq!(edge["properties"]["kind"], "transit");
        assert_eq!(edge["properties"]["color"], "#1f77b4");
        assert_eq!(edge["properties"]["weight"], 60.0);
        assert_eq!(features[0]["geometry"]["type"], "Point");
    }

    #[test]
    fn node_features_carry_reachability() {
        let network = sample();
        let accessibility = calculate_accessibility(&network, 100.0).unwrap();
        let with = features(&network, Some(&accessibility));

        let node_b = &with[1]["properties"];
        assert_eq!(node_b["node_id"], "b");
        assert_eq!(node_b["degree"], 2);
        assert_eq!(node_b["reachable"], 2);

        let plain = features(&network, None);
        assert!(plain[1]["properties"].get("reachable").is_none());
    }

    #[test]
    fn nodes_missing_from_accessibility_have_no_count() {
        let network = sample();
        let accessibility = calculate_accessibility(&network, 100.0).unwrap();

        let mut augmented = network.clone();
        let d = augmented
            .add_node("d", Some(Point::new(-76.62, 39.28)), true)
            .unwrap();
        augmented.add_edge(d, NodeIndex::new(0), NetworkEdge::synthetic(10.0));

        let features = features(&augmented, Some(&accessibility));
        assert_eq!(features[0]["properties"]["reachable"], 2);
        assert_eq!(features[2]["properties"]["node_id"], "d");
        assert!(features[2]["properties"].get("reachable").is_none());
    }

    #[test]
    fn string_output_is_a_feature_collection() {
        let text = network_to_geojson_string(&sample(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 3);
    }
}

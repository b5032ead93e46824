//! Service coverage: the share of population points that have a network
//! node within a given radius.

use geo::Point;
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{Error, Length, SpatialIndex, TransitNetwork};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coverage {
    pub radius: Length,
    /// Fraction of population points covered, in `[0, 1]`
    pub ratio: f64,
}

/// Uniform random points within the bounding box of the positioned nodes
///
/// # Errors
///
/// Returns [`Error::EmptyNetwork`] if no node has a position
pub fn sample_population(
    network: &TransitNetwork,
    count: usize,
    seed: u64,
) -> Result<Vec<Point<f64>>, Error> {
    let rect = network.bounding_rect().ok_or(Error::EmptyNetwork)?;
    let (min, max) = (rect.min(), rect.max());

    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count)
        .map(|_| {
            Point::new(
                rng.random_range(min.x..=max.x),
                rng.random_range(min.y..=max.y),
            )
        })
        .collect())
}

/// Distance from each population point to its nearest positioned node
fn nearest_node_distances(
    network: &TransitNetwork,
    population: &[Point<f64>],
) -> Result<Vec<f64>, Error> {
    if population.is_empty() {
        return Err(Error::InvalidConfig(
            "population sample must not be empty".to_string(),
        ));
    }
    let points: Vec<Point<f64>> = network
        .positioned_nodes()
        .into_iter()
        .map(|(_, point)| point)
        .collect();
    if points.is_empty() {
        return Err(Error::EmptyNetwork);
    }

    let index = SpatialIndex::new(&points);
    population
        .iter()
        .map(|point| {
            index
                .nearest(*point)
                .map(|(_, distance)| distance)
                .ok_or(Error::EmptyNetwork)
        })
        .collect()
}

fn radius_value(network: &TransitNetwork, radius: Length) -> Result<f64, Error> {
    let value = radius.in_system(network.crs())?;
    if value < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "coverage radius must not be negative, got {radius}"
        )));
    }
    Ok(value)
}

#[allow(clippy::cast_precision_loss)]
fn covered_share(distances: &[f64], radius: f64) -> f64 {
    let covered = distances.iter().filter(|&&d| d <= radius).count();
    covered as f64 / distances.len() as f64
}

/// Share of `population` within `radius` of the nearest node position.
///
/// The radius is compared against raw coordinate distances, so it must be
/// given in the unit of the network's coordinate system.
///
/// # Errors
///
/// Fails on an empty population, a network without positions, a negative
/// radius, or a radius unit that does not match the network
pub fn coverage_ratio(
    network: &TransitNetwork,
    population: &[Point<f64>],
    radius: Length,
) -> Result<f64, Error> {
    let radius = radius_value(network, radius)?;
    let distances = nearest_node_distances(network, population)?;
    Ok(covered_share(&distances, radius))
}

/// [`coverage_ratio`] for several radii over the same population
pub fn coverage_ratios(
    network: &TransitNetwork,
    population: &[Point<f64>],
    radii: &[Length],
) -> Result<Vec<Coverage>, Error> {
    let values = radii
        .iter()
        .map(|radius| radius_value(network, *radius))
        .collect::<Result<Vec<_>, _>>()?;
    let distances = nearest_node_distances(network, population)?;

    let coverages = radii
        .iter()
        .zip(values)
        .map(|(radius, value)| Coverage {
            radius: *radius,
            ratio: covered_share(&distances, value),
        })
        .collect::<Vec<_>>();

    for coverage in &coverages {
        info!(
            "Coverage within {}: {:.1}%",
            coverage.radius,
            coverage.ratio * 100.0
        );
    }
    Ok(coverages)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::CoordinateSystem;

    fn grid_network() -> TransitNetwork {
        let mut network = TransitNetwork::new(CoordinateSystem::Projected);
        for (i, (x, y)) in [(0.0, 0.0), (1_000.0, 0.0), (0.0, 1_000.0), (1_000.0, 1_000.0)]
            .into_iter()
            .enumerate()
        {
            network.add_node(i.to_string(), Some(Point::new(x, y)), false);
        }
        network
    }

    #[test]
    fn population_is_seeded_and_inside_bounds() {
        let network = grid_network();
        let first = sample_population(&network, 200, 7).unwrap();
        let second = sample_population(&network, 200, 7).unwrap();
        assert_eq!(first, second);
        assert!(
            first
                .iter()
                .all(|p| (0.0..=1_000.0).contains(&p.x()) && (0.0..=1_000.0).contains(&p.y()))
        );
        assert_ne!(first, sample_population(&network, 200, 8).unwrap());
    }

    #[test]
    fn known_points_give_exact_ratio() {
        let network = grid_network();
        let population = [
            Point::new(10.0, 0.0),
            Point::new(500.0, 500.0),
            Point::new(1_000.0, 990.0),
            Point::new(0.0, 400.0),
        ];
        let ratio = coverage_ratio(&network, &population, Length::meters(100.0)).unwrap();
        assert_relative_eq!(ratio, 0.5);
    }

    #[test]
    fn coverage_grows_with_radius() {
        let network = grid_network();
        let population = sample_population(&network, 500, 42).unwrap();
        let radii = [0.0, 100.0, 200.0, 500.0, 1_000.0, 1e9].map(Length::meters);
        let coverages = coverage_ratios(&network, &population, &radii).unwrap();

        assert_relative_eq!(coverages[0].ratio, 0.0);
        for pair in coverages.windows(2) {
            assert!(pair[0].ratio <= pair[1].ratio);
        }
        assert_relative_eq!(coverages[5].ratio, 1.0);
    }

    #[test]
    fn single_radius_and_batch_agree() {
        let network = grid_network();
        let population = sample_population(&network, 100, 1).unwrap();
        let single = coverage_ratio(&network, &population, Length::meters(300.0)).unwrap();
        let batch = coverage_ratios(&network, &population, &[Length::meters(300.0)]).unwrap();
        assert_relative_eq!(single, batch[0].ratio);
    }

    #[test]
    fn invalid_inputs_are_errors() {
        let network = grid_network();
        let population = [Point::new(0.0, 0.0)];
        assert!(matches!(
            coverage_ratio(&network, &population, Length::degrees(0.01)),
            Err(Error::UnitMismatch { .. })
        ));
        assert!(matches!(
            coverage_ratio(&network, &population, Length::meters(-1.0)),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            coverage_ratio(&network, &[], Length::meters(1.0)),
            Err(Error::InvalidConfig(_))
        ));

        let empty = TransitNetwork::new(CoordinateSystem::Projected);
        assert!(matches!(
            sample_population(&empty, 10, 0),
            Err(Error::EmptyNetwork)
        ));
    }
}

//! Voronoi diagrams of points in the plane, built with Fortune's sweep line
//! algorithm, and the cell of each site as a polygon.
//!
//! https://en.wikipedia.org/wiki/Voronoi_diagram
//! https://en.wikipedia.org/wiki/Fortune%27s_algorithm

mod beachline;
mod config;
mod diagram;
mod edge;
mod error;
mod event;
mod fortune;
mod geometry;
mod logger;
mod parabola;
mod patch;

pub use crate::config::{Frame, VoronoiConfig};
pub use crate::diagram::{BoundedVoronoi, DiagramEdge, Voronoi};
pub use crate::edge::{BreakpointEdge, EdgeId};
pub use crate::error::{VoronoiError, VoronoiResult};
pub use crate::event::{CircleEvent, Event, EventQueue};
pub use crate::fortune::{fortune, fortune_with_logger, Sweep};
pub use crate::geometry::{breakpoint_x, circumcenter, distance, distance_to_parabola, rays_converge, Point};
pub use crate::logger::{DiscardLogger, PrintlnLogger, SkipReason, SweepLogMessage, SweepLogger, TracingLogger};
pub use crate::parabola::{FocusDirectrixParabola, QuadraticParabola};
pub use crate::patch::{extract_patches, Polygon};

/// Returns an error for the first site with a NaN or infinite coordinate.
fn check_sites(sites: &[Point]) -> VoronoiResult<()> {
    match sites.iter().enumerate().find(|(_, site)| !site.is_finite()) {
        Some((index, site)) => Err(VoronoiError::NonFiniteSite {
            index,
            x: site.x,
            y: site.y,
        }),
        None => Ok(()),
    }
}

/// The Voronoi diagram of the sites, with default settings.
///
/// Cells of sites on the convex hull are unbounded, so their patches only
/// hold the finite corners. Use [`build_bounded_voronoi`] for closed
/// patches everywhere.
pub fn build_voronoi(sites: &[Point]) -> VoronoiResult<Voronoi> {
    build_voronoi_with_logger(sites, &VoronoiConfig::default(), TracingLogger)
}

pub fn build_voronoi_with_logger<L>(sites: &[Point], config: &VoronoiConfig, logger: L) -> VoronoiResult<Voronoi>
where
    L: SweepLogger,
{
    config.validate()?;
    check_sites(sites)?;

    Ok(Voronoi::sweep(sites, &[], config.epsilon, logger))
}

/// The Voronoi diagram of the sites padded with four auxiliary sites around
/// them, so every site gets a closed patch.
pub fn build_bounded_voronoi(sites: &[Point], config: &VoronoiConfig) -> VoronoiResult<BoundedVoronoi> {
    build_bounded_voronoi_with_logger(sites, config, TracingLogger)
}

pub fn build_bounded_voronoi_with_logger<L>(
    sites: &[Point],
    config: &VoronoiConfig,
    logger: L,
) -> VoronoiResult<BoundedVoronoi>
where
    L: SweepLogger,
{
    config.validate()?;
    check_sites(sites)?;

    let frame = Frame::around(sites, config);
    let auxiliary = frame.auxiliary_sites(config.spread);
    if !auxiliary.iter().all(Point::is_finite) {
        return Err(VoronoiError::InvalidConfiguration {
            message: format!("auxiliary sites overflow with spread {} around {:?}", config.spread, frame),
        });
    }

    let voronoi = Voronoi::sweep(sites, &auxiliary, config.epsilon, logger);
    let real = voronoi.sites().len() - auxiliary.len();

    Ok(BoundedVoronoi::new(voronoi, real, frame, auxiliary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn non_finite_sites_are_rejected() {
        let sites = [Point::new(0.0, 0.0), Point::new(1.0, f64::NAN)];

        match build_voronoi(&sites) {
            Err(VoronoiError::NonFiniteSite { index: 1, x, .. }) => assert_eq!(x, 1.0),
            other => panic!("unexpected result {:?}", other.map(|v| v.sites().len())),
        }

        let infinite = [Point::new(f64::INFINITY, 0.0)];
        assert!(build_bounded_voronoi(&infinite, &VoronoiConfig::default()).is_err());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = VoronoiConfig::new().with_spread(0.0);

        assert!(matches!(
            build_bounded_voronoi(&[Point::new(0.0, 0.0)], &config),
            Err(VoronoiError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn auxiliary_sites_beyond_f64_are_rejected() {
        let sites = [Point::new(1e307, 0.0), Point::new(-1e307, 0.0)];

        assert!(matches!(
            build_bounded_voronoi(&sites, &VoronoiConfig::default()),
            Err(VoronoiError::InvalidConfiguration { .. })
        ));
        // The same sites are fine without padding.
        assert!(build_voronoi(&sites).is_ok());
    }

    #[test]
    fn empty_input_gives_empty_diagram() {
        let voronoi = build_voronoi(&[]).unwrap();

        assert!(voronoi.sites().is_empty());
        assert_eq!(voronoi.edges().count(), 0);
        assert!(voronoi.diagram_edges().is_empty());
        assert_eq!(voronoi.patch_of(0), None);
    }

    #[test]
    fn duplicates_share_a_patch() {
        let sites = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
        ];
        let voronoi = build_voronoi(&sites).unwrap();

        assert_eq!(voronoi.sites().len(), 3);
        assert_eq!(voronoi.patch_of(0), voronoi.patch_of(2));
        assert_eq!(voronoi.patch_of(0), voronoi.patch_at(Point::new(0.0, 0.0)));
        assert_eq!(voronoi.patch_of(4), None);
    }

    #[test]
    fn triangle_has_three_edges_around_the_circumcenter() {
        let sites = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)];
        let voronoi = build_voronoi(&sites).unwrap();

        let vertices = voronoi.vertices();
        assert_eq!(vertices.len(), 1);
        assert_relative_eq!(vertices[0].x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(vertices[0].y, 3.75, epsilon = 1e-9);

        let edges = voronoi.diagram_edges();
        assert_eq!(edges.len(), 3);
        for edge in &edges {
            assert!(!edge.is_bounded());
            let vertex = edge.from.or(edge.to).unwrap();
            assert_relative_eq!(vertex.x, 5.0, epsilon = 1e-9);
            assert_relative_eq!(vertex.y, 3.75, epsilon = 1e-9);
        }
    }

    #[test]
    fn bounded_diagram_hides_auxiliary_sites() {
        let sites = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let bounded = build_bounded_voronoi(&sites, &VoronoiConfig::default()).unwrap();

        assert_eq!(bounded.sites(), &sites);
        assert_eq!(bounded.patches().count(), 2);
        assert_eq!(bounded.diagram().sites().len(), 6);

        let auxiliary = bounded.auxiliary_sites()[0];
        assert!(bounded.patch_at(auxiliary).is_none());
        assert!(bounded.diagram().patch_at(auxiliary).is_some());
    }
}

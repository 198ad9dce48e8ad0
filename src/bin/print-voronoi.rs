use voronoi_fortune::{build_bounded_voronoi, build_bounded_voronoi_with_logger, Point, PrintlnLogger, VoronoiConfig};

fn generate_sites() -> [Point; 6] {
    [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
        Point::new(0.4, 0.7),
        Point::new(0.8, 0.3),
    ]
}

fn main() {
    let verbose = std::env::args().skip(1).any(|arg| arg == "-v" || arg == "--verbose");
    let sites = generate_sites();
    let config = VoronoiConfig::default();

    let result = if verbose {
        build_bounded_voronoi_with_logger(&sites, &config, PrintlnLogger)
    } else {
        build_bounded_voronoi(&sites, &config)
    };

    let voronoi = match result {
        Ok(voronoi) => voronoi,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    for (site, patch) in voronoi.patches() {
        println!("{} -> {} (area {:.4})", site, patch.corners(1e-9), patch.area());
    }
    println!("End of program.");
}

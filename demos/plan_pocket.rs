//! Plans a small pocket with two tenons and prints every pass.
//!
//! Run with `RUST_LOG=tenonkit=debug` to follow the planner's decisions.

use tenonkit::{
    plan_pocket, CutDirection, Endpoint, GeometryError, Point2, Polygon, Rotation,
};

fn main() -> Result<(), GeometryError> {
    // Default: WARN for everything, INFO for tenonkit.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("tenonkit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let boundary = Polygon::from_points(&[(0.0, 0.0), (0.0, 40.0), (60.0, 40.0), (60.0, 0.0)]);
    let square_tenon = Polygon::from_points(&[(10.0, 15.0), (10.0, 25.0), (20.0, 25.0), (20.0, 15.0)]);
    let round_tenon = Polygon::circle(Point2::new(42.0, 20.0), 6.0, Rotation::CounterClockwise);

    let plan = match plan_pocket(&boundary, &[square_tenon, round_tenon], 3.0, 0.5, 1.0, true) {
        Ok(plan) => plan,
        Err(err) => {
            let at = err.location();
            eprintln!("cannot plan pocket: {err} (mark at {}, {})", at.x, at.y);
            return Err(err);
        }
    };

    for (n, pass) in plan.passes().enumerate() {
        println!("pass {n}:");
        for region in pass {
            for (k, toolpath) in region.toolpath_loops(CutDirection::Climb).iter().enumerate() {
                let kind = if k == 0 { "wall" } else { "tenon" };
                println!("  {kind}:");
                for endpoint in toolpath {
                    match endpoint {
                        Endpoint::Straight { point } => {
                            println!("    line to ({:.3}, {:.3})", point.x, point.y);
                        }
                        Endpoint::Arc {
                            point,
                            center,
                            rotation,
                        } => println!(
                            "    {:?} arc to ({:.3}, {:.3}) around ({:.3}, {:.3})",
                            rotation, point.x, point.y, center.x, center.y
                        ),
                    }
                }
            }
        }
    }
    Ok(())
}

//! Classifies segment pairs and prints the result.
//!
//! Usage:
//! ```text
//! cargo run --example classify                                   # built-in pairs
//! cargo run --example classify -- 0 0 0 1 0 0  0.5 -1 0 0.5 1 0  # one custom pair
//! RUST_LOG=linesect=trace cargo run --example classify           # show branch decisions
//! ```

use linesect::math::Point3;
use linesect::operations::query::LineLineIntersect;
use linesect::Line3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything. Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = std::env::args()
        .skip(1)
        .map(|s| s.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;

    let pairs = if args.is_empty() {
        builtin_pairs()
    } else if let &[ax, ay, az, bx, by, bz, cx, cy, cz, dx, dy, dz] = args.as_slice() {
        vec![(
            "custom",
            Line3::new(Point3::new(ax, ay, az), Point3::new(bx, by, bz)),
            Line3::new(Point3::new(cx, cy, cz), Point3::new(dx, dy, dz)),
        )]
    } else {
        return Err(format!("expected 12 coordinates, got {}", args.len()).into());
    };

    for (name, a, b) in pairs {
        let result = LineLineIntersect::new(a, b).execute()?;
        println!("{name:>14}: {:?}", result.kind());
        println!("{:>14}  {result:?}", "");
    }
    Ok(())
}

fn builtin_pairs() -> Vec<(&'static str, Line3, Line3)> {
    let p = Point3::new;
    let x = Line3::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    vec![
        ("crossing", x, Line3::new(p(0.5, -1.0, 0.0), p(0.5, 1.0, 0.0))),
        ("gap", x, Line3::new(p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0))),
        ("continuation", x, Line3::new(p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0))),
        ("skew", x, Line3::new(p(0.0, 0.0, 1.0), p(1.0, 1.0, 2.0))),
        ("point", Line3::new(p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0)), x),
        ("back to back", x, Line3::new(p(0.0, 0.0, 0.0), p(-1.0, 0.0, 0.0))),
    ]
}

//! Load summary example for dualview
//!
//! Loads an OBJ file (or a built-in cube when no path is given) into the
//! dual viewer and prints:
//! - The load report
//! - The computed bounds and normalization scale
//! - Primitive counts for a first frame from both vantage points

use anyhow::Result;
use dualview_visualization::{DualViewer, SlotId};
use std::env;
use std::fs;

const CUBE_OBJ: &str = "\
# unit cube with quad faces
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
vn 0 0 -1
vn 0 0 1
vn -1 0 0
vn 1 0 0
vn 0 -1 0
vn 0 1 0
f 1//1 2//1 3//1 4//1
f 5//2 8//2 7//2 6//2
f 1//3 4//3 8//3 5//3
f 2//4 6//4 7//4 3//4
f 1//5 5//5 6//5 2//5
f 4//6 3//6 7//6 8//6
";

fn main() -> Result<()> {
    println!("dualview Load Example");
    println!("=====================");

    let (path, is_temp) = match env::args().nth(1) {
        Some(path) => (path, false),
        None => {
            let path = env::temp_dir().join("dualview_demo_cube.obj");
            fs::write(&path, CUBE_OBJ)?;
            println!("No file given, using a generated cube");
            (path.display().to_string(), true)
        }
    };

    let mut dual = DualViewer::new();
    let report = dual.load(&path);
    println!("\n{}", report.message);

    if report.success() {
        let viewer = dual.viewer(SlotId::Top);
        let bounds = viewer.bounds();
        println!("\nMesh:");
        println!(
            "- {} vertices, {} normals, {} faces",
            viewer.mesh().vertex_count(),
            viewer.mesh().normal_count(),
            viewer.mesh().face_count()
        );
        println!(
            "- center ({:.3}, {:.3}, {:.3}), extent {:.3}",
            bounds.center.x, bounds.center.y, bounds.center.z, bounds.extent
        );
        println!("- normalization scale {:.3}", bounds.normalization_scale());

        for slot in [SlotId::Top, SlotId::Bottom] {
            let label = dual.label(slot);
            let frame = dual.render(slot);
            println!("\n{label}");
            println!("- {} primitives in draw order", frame.primitives.len());
            println!(
                "- projection x [{:.1}, {:.1}] y [{:.1}, {:.1}]",
                frame.projection.left,
                frame.projection.right,
                frame.projection.bottom,
                frame.projection.top
            );
            if !frame.stats.is_clean() {
                println!(
                    "- skipped: {} triangles, {} normals, {} degenerate faces",
                    frame.stats.triangles_dropped,
                    frame.stats.normals_dropped,
                    frame.stats.degenerate_faces
                );
            }
        }
    }

    if is_temp {
        let _ = fs::remove_file(&path);
    }
    Ok(())
}

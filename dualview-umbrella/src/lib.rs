//! # dualview
//!
//! A dual-viewport triangular mesh viewer core.
//!
//! This is the umbrella crate that provides convenient access to the
//! dualview crate family. You can use this crate to get everything in one
//! place, or use the individual crates for more granular control over
//! dependencies.
//!
//! ## Features
//!
//! - **Core**: mesh, bounds, transform and error types (always enabled)
//! - **I/O**: OBJ-subset mesh loading
//! - **Visualization**: view state, render pipeline and the dual viewer
//!
//! ## Quick Start
//!
//! ```no_run
//! use dualview::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut dual = DualViewer::new();
//!     let report = dual.load("model.obj");
//!     if !report.success() {
//!         anyhow::bail!("{}", report.message);
//!     }
//!
//!     let frame = dual.render(SlotId::Top);
//!     println!("{} primitives to draw", frame.primitives.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io and visualization
//! - `io`: File format support
//! - `visualization`: Interactive viewing

// Re-export core functionality
pub use dualview_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use dualview_io as io;

#[cfg(feature = "visualization")]
pub use dualview_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use dualview_core::*;

    #[cfg(feature = "io")]
    pub use dualview_io::*;

    #[cfg(feature = "visualization")]
    pub use dualview_visualization::*;
}

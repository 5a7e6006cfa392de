//! 6×6 synthetic survey grid.
//!
//! Node layout (36 points, row=south→north, col=west→east, 10 km spacing):
//!
//! ```text
//!  col:  0    …    5
//!  row 5 R─┬─┬─┬─┬─R
//!        │ │ │ │ │ │
//!  row 0 R─┴─┴─┴─┴─R
//! ```
//!
//! Corner points carry recharge pads.  The two central north-south trunk
//! lines get elevated risk so demand events cluster there.

use patrol_net::{EdgeSpec, NetworkSpec, NodeSpec};

pub const ROWS: usize = 6;
pub const COLS: usize = 6;

/// Grid spacing in survey units (km).  One tick at 60 km/h covers one unit.
const SPACING: f64 = 10.0;

/// Build the grid as a survey spec, ready for [`patrol_net::build_network`].
pub fn build_spec() -> NetworkSpec {
    let mut nodes = Vec::with_capacity(ROWS * COLS);
    for row in 0..ROWS {
        for col in 0..COLS {
            let corner = (row == 0 || row == ROWS - 1) && (col == 0 || col == COLS - 1);
            nodes.push(NodeSpec {
                x: col as f64 * SPACING,
                y: row as f64 * SPACING,
                recharge: corner,
            });
        }
    }

    let mut edges = Vec::new();
    // East-west segments within each row.
    for row in 0..ROWS {
        for col in 0..COLS - 1 {
            edges.push(EdgeSpec {
                source: row * COLS + col,
                target: row * COLS + col + 1,
                risk: 1.0,
            });
        }
    }
    // North-south segments; columns 2 and 3 are the high-risk trunks.
    for row in 0..ROWS - 1 {
        for col in 0..COLS {
            let risk = if col == 2 || col == 3 { 3.0 } else { 1.0 };
            edges.push(EdgeSpec {
                source: row * COLS + col,
                target: (row + 1) * COLS + col,
                risk,
            });
        }
    }

    NetworkSpec { nodes, edges }
}

//! Formats a connectivity table as a CFL3D "1-1 blocking data" section.
//!
//! Entries are listed twice, once per side, with grid identifiers and all
//! node indices one based. The sequence number restarts for the second
//! side group, mirroring the layout solvers expect to paste into an input
//! deck.

use crate::connectivity::{BlockRange, ConnectivityTable, FaceMatch};

/// Render the table as a 1-1 blocking data section.
///
/// Entries are ordered by the first block's id; no trailing newline.
pub fn blocking_data_string(table: &ConnectivityTable) -> String {
    let mut ordered: Vec<&FaceMatch> = table.matches.iter().collect();
    ordered.sort_by_key(|m| m.block1);

    let header = "   NUMBER   GRID   :   ISTA   JSTA   KSTA   IEND   JEND   KEND   ISVA1   ISVA2";
    let mut lines = Vec::with_capacity(2 * ordered.len() + 5);
    lines.push("   1-1 BLOCKING DATA:".to_string());
    lines.push(format!("{:>10}", "NBLI"));
    lines.push(format!("{:>10}", ordered.len()));
    lines.push(header.to_string());
    for (n, m) in ordered.iter().enumerate() {
        lines.push(side_line(n + 1, m.block1, &m.range1));
    }
    lines.push(header.to_string());
    for (n, m) in ordered.iter().enumerate() {
        lines.push(side_line(n + 1, m.block2, &m.range2));
    }
    lines.join("\n")
}

fn side_line(number: usize, block: usize, range: &BlockRange) -> String {
    format!(
        "{:>9}{:>7}{:>11}{:>7}{:>7}{:>7}{:>7}{:>7}{:>8}{:>8}",
        number,
        block + 1,
        range.i.start,
        range.j.start,
        range.k.start,
        range.i.end,
        range.j.end,
        range.k.end,
        range.axis1.index() + 1,
        range.axis2.index() + 1
    )
}

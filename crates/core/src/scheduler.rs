//! Placement scheduler - docks column heads onto pending targets.
//!
//! A head docks only when its grid row is exactly the column's next target.
//! Columns fall at most one cell per tick, so a head can never step over a
//! pending row. At most one target per column is consumed per tick.

use log::trace;

use crate::column::RainColumn;
use crate::rng::RandomSource;
use crate::targets::TargetGrid;

/// Run one placement pass over `columns`. Returns the number of docks.
pub fn schedule<R: RandomSource>(
    columns: &mut [RainColumn],
    targets: &mut TargetGrid,
    rng: &mut R,
) -> usize {
    if !targets.has_remaining_targets() {
        return 0;
    }

    let mut docked = 0;
    for col in columns.iter_mut() {
        let Some(target) = targets.next_target(col.column()) else {
            continue;
        };
        if col.head_row() != Some(target) {
            continue;
        }
        if col.dock(target, rng).is_some() {
            targets.consume(col.column());
            docked += 1;
            trace!("docked column {} at row {}", col.column(), target);
        }
    }
    docked
}

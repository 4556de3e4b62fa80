//! Whole-matrix construction and edit-script recovery.

use crate::edit::EditColumn;

/// A dynamic-programming edit-distance matrix built column by column.
///
/// Column −1 is the initial column; columns `0..target_len` correspond to
/// target elements. When a bounded build exhausts its band partway
/// through, the remaining columns are stored empty, so
/// [`columns_count`](EditMatrix::columns_count) is always
/// `target_len + 1`.
#[derive(Debug, Clone)]
pub struct EditMatrix {
    columns: Vec<EditColumn>,
    source_len: usize,
    target_len: usize,
}

impl EditMatrix {
    /// Build the matrix for `source` (rows) against `target` (columns),
    /// keeping only cells within `max_distance`.
    pub fn from_edit_distance<C, F>(
        source: &[C],
        target: &[C],
        max_distance: f64,
        distance_fn: F,
    ) -> EditMatrix
    where
        F: Fn(&C, &C) -> f64,
    {
        Self::build(source, target, max_distance, None, distance_fn)
    }

    /// Build the matrix restricted to a diagonal band of the given margin
    /// in addition to the `max_distance` bound.
    pub fn from_edit_distance_banded<C, F>(
        source: &[C],
        target: &[C],
        max_distance: f64,
        diagonal_margin: usize,
        distance_fn: F,
    ) -> EditMatrix
    where
        F: Fn(&C, &C) -> f64,
    {
        Self::build(
            source,
            target,
            max_distance,
            Some(diagonal_margin),
            distance_fn,
        )
    }

    fn build<C, F>(
        source: &[C],
        target: &[C],
        max_distance: f64,
        margin: Option<usize>,
        distance_fn: F,
    ) -> EditMatrix
    where
        F: Fn(&C, &C) -> f64,
    {
        let mut columns = Vec::with_capacity(target.len() + 1);
        columns.push(match margin {
            None => EditColumn::initial(source.len(), max_distance),
            Some(margin) => EditColumn::initial_banded(source.len(), max_distance, margin),
        });
        for (index, next_char) in target.iter().enumerate() {
            let current = &columns[index];
            let next = match margin {
                None => current.create_next(source, max_distance, &distance_fn, next_char),
                Some(margin) => current.create_next_banded(
                    source,
                    max_distance,
                    index as isize,
                    margin,
                    &distance_fn,
                    next_char,
                ),
            };
            match next {
                Some(column) => columns.push(column),
                None => {
                    // The band died; every later column is empty too.
                    columns.resize(target.len() + 1, EditColumn::empty());
                    break;
                }
            }
        }
        EditMatrix {
            columns,
            source_len: source.len(),
            target_len: target.len(),
        }
    }

    /// The cell at (`row`, `column`), with `column == −1` addressing the
    /// initial column; +∞ outside the materialized band.
    #[inline]
    pub fn get(&self, row: isize, column: isize) -> f64 {
        let index = column + 1;
        if index < 0 || index >= self.columns.len() as isize {
            f64::INFINITY
        } else {
            self.columns[index as usize].get(row)
        }
    }

    /// Number of stored columns, including the initial one.
    pub fn columns_count(&self) -> usize {
        self.columns.len()
    }

    /// The distance between the full source and full target, or +∞ if the
    /// bounded band excluded the terminal cell.
    pub fn distance(&self) -> f64 {
        self.get(self.source_len as isize - 1, self.target_len as isize - 1)
    }
}

/// One step of an edit script transforming a source sequence into a
/// target sequence.
///
/// `source_index` positions the step over the source read left-to-right:
/// replacements and deletions name the source element they touch, and
/// insertions name the position at which the new element lands.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand<C> {
    /// Replace the source element at `source_index` with `character`.
    Replace {
        /// Index of the replaced source element.
        source_index: usize,
        /// The replacement element, taken from the target.
        character: C,
        /// The measured replacement cost.
        cost: f64,
    },
    /// Delete the source element at `source_index`.
    Delete {
        /// Index of the deleted source element.
        source_index: usize,
        /// Unit deletion cost.
        cost: f64,
    },
    /// Insert `character` so that it lands at `source_index`.
    Insert {
        /// Position at which the inserted element lands.
        source_index: usize,
        /// The inserted element, taken from the target.
        character: C,
        /// Unit insertion cost.
        cost: f64,
    },
}

impl<C> EditCommand<C> {
    /// The cost this command contributes to the script total.
    pub fn cost(&self) -> f64 {
        match self {
            EditCommand::Replace { cost, .. }
            | EditCommand::Delete { cost, .. }
            | EditCommand::Insert { cost, .. } => *cost,
        }
    }

    /// The source position the command acts on.
    pub fn source_index(&self) -> usize {
        match self {
            EditCommand::Replace { source_index, .. }
            | EditCommand::Delete { source_index, .. }
            | EditCommand::Insert { source_index, .. } => *source_index,
        }
    }
}

/// Recover a minimum-cost edit script turning `source` into `target`.
///
/// The full matrix is built without a distance bound, then traced back
/// from the terminal cell. Ties break replace > delete > insert, and a
/// replacement is only emitted when its measured cost is nonzero (a free
/// match consumes both elements silently). Commands are returned ordered
/// left-to-right over the source.
pub fn get_edit_commands<C, F>(source: &[C], target: &[C], distance_fn: F) -> Vec<EditCommand<C>>
where
    C: Clone,
    F: Fn(&C, &C) -> f64,
{
    let matrix = EditMatrix::from_edit_distance(source, target, f64::INFINITY, &distance_fn);
    let mut commands = Vec::new();
    let mut i = source.len() as isize - 1;
    let mut j = target.len() as isize - 1;
    while i > -1 || j > -1 {
        let here = matrix.get(i, j);
        let diagonal = if i > -1 && j > -1 {
            matrix.get(i - 1, j - 1)
        } else {
            f64::INFINITY
        };
        let above = if i > -1 {
            matrix.get(i - 1, j)
        } else {
            f64::INFINITY
        };
        let left = if j > -1 {
            matrix.get(i, j - 1)
        } else {
            f64::INFINITY
        };
        if diagonal <= left && diagonal <= above && diagonal <= here {
            let cost = distance_fn(&source[i as usize], &target[j as usize]);
            if cost > 0.0 {
                commands.push(EditCommand::Replace {
                    source_index: i as usize,
                    character: target[j as usize].clone(),
                    cost,
                });
            }
            i -= 1;
            j -= 1;
        } else if above <= left {
            commands.push(EditCommand::Delete {
                source_index: i as usize,
                cost: 1.0,
            });
            i -= 1;
        } else {
            commands.push(EditCommand::Insert {
                source_index: (i + 1) as usize,
                character: target[j as usize].clone(),
                cost: 1.0,
            });
            j -= 1;
        }
    }
    commands.reverse();
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::standard_distance;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Replay a script over `source`, right-to-left so indices stay valid.
    fn apply<C: Clone>(source: &[C], commands: &[EditCommand<C>]) -> Vec<C> {
        let mut result: Vec<C> = source.to_vec();
        for command in commands.iter().rev() {
            match command {
                EditCommand::Replace {
                    source_index,
                    character,
                    ..
                } => result[*source_index] = character.clone(),
                EditCommand::Delete { source_index, .. } => {
                    result.remove(*source_index);
                }
                EditCommand::Insert {
                    source_index,
                    character,
                    ..
                } => result.insert(*source_index, character.clone()),
            }
        }
        result
    }

    #[test]
    fn kitten_to_sitting_distance() {
        let matrix = EditMatrix::from_edit_distance(
            &chars("kitten"),
            &chars("sitting"),
            f64::INFINITY,
            standard_distance,
        );
        assert_eq!(matrix.distance(), 3.0);
        assert_eq!(matrix.columns_count(), 8);
    }

    #[test]
    fn kitten_to_sitting_script() {
        let commands = get_edit_commands(&chars("kitten"), &chars("sitting"), standard_distance);
        assert_eq!(
            commands,
            vec![
                EditCommand::Replace {
                    source_index: 0,
                    character: 's',
                    cost: 1.0
                },
                EditCommand::Replace {
                    source_index: 4,
                    character: 'i',
                    cost: 1.0
                },
                EditCommand::Insert {
                    source_index: 6,
                    character: 'g',
                    cost: 1.0
                },
            ]
        );
        let total: f64 = commands.iter().map(EditCommand::cost).sum();
        assert_eq!(total, 3.0);
    }

    #[test]
    fn script_replays_onto_target() {
        let source = chars("saturday");
        let target = chars("sunday");
        let commands = get_edit_commands(&source, &target, standard_distance);
        assert_eq!(apply(&source, &commands), target);
        let total: f64 = commands.iter().map(EditCommand::cost).sum();
        assert_eq!(
            total,
            crate::edit::edit_distance(&source, &target, standard_distance)
        );
    }

    #[test]
    fn empty_source_script_is_all_insertions() {
        let commands = get_edit_commands(&chars(""), &chars("abc"), standard_distance);
        assert_eq!(commands.len(), 3);
        assert!(commands
            .iter()
            .all(|c| matches!(c, EditCommand::Insert { .. })));
        assert_eq!(apply(&chars(""), &commands), chars("abc"));
    }

    #[test]
    fn empty_target_script_is_all_deletions() {
        let commands = get_edit_commands(&chars("abc"), &chars(""), standard_distance);
        assert_eq!(commands.len(), 3);
        assert!(commands
            .iter()
            .all(|c| matches!(c, EditCommand::Delete { .. })));
        assert_eq!(apply(&chars("abc"), &commands), chars(""));
    }

    #[test]
    fn bounded_build_pads_dead_columns() {
        let matrix = EditMatrix::from_edit_distance(
            &chars("aaaa"),
            &chars("bbbb"),
            1.0,
            standard_distance,
        );
        assert_eq!(matrix.columns_count(), 5);
        assert_eq!(matrix.distance(), f64::INFINITY);
    }

    #[test]
    fn banded_build_matches_full_for_wide_margin() {
        let source = chars("kitten");
        let target = chars("sitting");
        let full =
            EditMatrix::from_edit_distance(&source, &target, f64::INFINITY, standard_distance);
        let banded = EditMatrix::from_edit_distance_banded(
            &source,
            &target,
            f64::INFINITY,
            16,
            standard_distance,
        );
        assert_eq!(banded.distance(), full.distance());
    }

    #[test]
    fn matrix_cells_outside_band_are_infinite() {
        let matrix =
            EditMatrix::from_edit_distance(&chars("ab"), &chars("ab"), 0.0, standard_distance);
        assert_eq!(matrix.get(-1, -1), 0.0);
        assert_eq!(matrix.get(1, 1), 0.0);
        assert_eq!(matrix.get(0, 1), f64::INFINITY);
    }
}

//! Structural segment edits shared by preset building and session editing

use super::segment::{Segment, SegmentPatch};

/// Split `segment` into before / `year` / after pieces, patching only `year`
///
/// Pieces that would be empty are omitted. Every piece gets a fresh id.
/// Returns the segment unchanged (with a fresh id) when `year` is outside it.
pub fn split_around_year(
    segment: &Segment,
    year: i32,
    patch: &SegmentPatch,
    next_id: &mut impl FnMut() -> String,
) -> Vec<Segment> {
    if !segment.covers(year) {
        return vec![Segment {
            id: next_id(),
            ..segment.clone()
        }];
    }

    let mut pieces = Vec::with_capacity(3);
    if segment.start_year < year {
        pieces.push(Segment {
            id: next_id(),
            end_year: year - 1,
            ..segment.clone()
        });
    }

    let mut middle = Segment {
        id: next_id(),
        ..segment.clone()
    };
    middle.apply(patch);
    middle.start_year = year;
    middle.end_year = year;
    pieces.push(middle);

    if segment.end_year > year {
        pieces.push(Segment {
            id: next_id(),
            start_year: year + 1,
            ..segment.clone()
        });
    }
    pieces
}

/// Rebuild a segment list with `year` split out of whichever segments hold it
pub fn split_list_around_year(
    segments: &[Segment],
    year: i32,
    patch: &SegmentPatch,
    next_id: &mut impl FnMut() -> String,
) -> Vec<Segment> {
    segments
        .iter()
        .flat_map(|segment| split_around_year(segment, year, patch, next_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> impl FnMut() -> String {
        let mut counter = 0;
        move || {
            counter += 1;
            format!("id-{counter}")
        }
    }

    #[test]
    fn test_split_in_middle_makes_three_pieces() {
        let segment = Segment::new("s", 1, 10, 100.0, 40.0);
        let pieces = split_around_year(&segment, 4, &SegmentPatch::income(0.0), &mut ids());

        assert_eq!(pieces.len(), 3);
        assert_eq!((pieces[0].start_year, pieces[0].end_year), (1, 3));
        assert_eq!((pieces[1].start_year, pieces[1].end_year), (4, 4));
        assert_eq!((pieces[2].start_year, pieces[2].end_year), (5, 10));
        assert_eq!(pieces[0].annual_work_income, 100.0);
        assert_eq!(pieces[1].annual_work_income, 0.0);
        assert_eq!(pieces[1].annual_expenses, 40.0);
        assert_eq!(pieces[2].annual_work_income, 100.0);
    }

    #[test]
    fn test_split_at_edges_omits_empty_pieces() {
        let segment = Segment::new("s", 3, 6, 100.0, 40.0);
        let mut next_id = ids();

        let at_start = split_around_year(&segment, 3, &SegmentPatch::income(0.0), &mut next_id);
        assert_eq!(at_start.len(), 2);
        assert_eq!((at_start[0].start_year, at_start[0].end_year), (3, 3));

        let at_end = split_around_year(&segment, 6, &SegmentPatch::income(0.0), &mut next_id);
        assert_eq!(at_end.len(), 2);
        assert_eq!((at_end[1].start_year, at_end[1].end_year), (6, 6));
    }

    #[test]
    fn test_split_list_only_touches_owning_segment() {
        let segments = vec![
            Segment::new("a", 1, 2, 100.0, 40.0),
            Segment::new("b", 3, 8, 100.0, 30.0),
        ];
        let result = split_list_around_year(&segments, 5, &SegmentPatch::income(0.0), &mut ids());

        assert_eq!(result.len(), 4);
        assert_eq!((result[0].start_year, result[0].end_year), (1, 2));
        assert_eq!(result[2].annual_work_income, 0.0);
        assert_eq!(result[2].annual_expenses, 30.0);
        // fresh ids everywhere
        assert!(result.iter().all(|s| s.id.starts_with("id-")));
    }
}

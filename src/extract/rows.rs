//! Row grouping by vertical proximity.

use std::cmp::Ordering;

use crate::models::fragment::PositionedFragment;

/// Group a page's fragments into visual rows.
///
/// Fragments are sorted top-of-page first (larger `y` first in the source
/// coordinate convention) and a new row starts whenever the vertical gap
/// from the current row's anchor exceeds `row_threshold`. Fragments within
/// each row come out ordered left to right.
pub fn group_rows(
    mut fragments: Vec<PositionedFragment>,
    row_threshold: f32,
) -> Vec<Vec<PositionedFragment>> {
    fragments.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal));

    let mut rows: Vec<Vec<PositionedFragment>> = Vec::new();
    let mut anchor_y = f32::INFINITY;

    for frag in fragments {
        match rows.last_mut() {
            Some(row) if (anchor_y - frag.y).abs() <= row_threshold => row.push(frag),
            _ => {
                anchor_y = frag.y;
                rows.push(vec![frag]);
            }
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_by_proximity() {
        let fragments = vec![
            PositionedFragment::new("a", 0.0, 100.0),
            PositionedFragment::new("b", 10.0, 100.2),
            PositionedFragment::new("c", 20.0, 100.4),
            PositionedFragment::new("d", 0.0, 250.0),
        ];
        let rows = group_rows(fragments, 10.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1); // y=250 is higher on the page
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_rows_ordered_top_to_bottom() {
        let fragments = vec![
            PositionedFragment::new("low", 0.0, 50.0),
            PositionedFragment::new("high", 0.0, 700.0),
            PositionedFragment::new("mid", 0.0, 400.0),
        ];
        let rows = group_rows(fragments, 10.0);
        let texts: Vec<&str> = rows.iter().map(|r| r[0].text.as_str()).collect();
        assert_eq!(texts, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_fragments_ordered_left_to_right() {
        let fragments = vec![
            PositionedFragment::new("right", 300.0, 100.0),
            PositionedFragment::new("left", 10.0, 100.5),
            PositionedFragment::new("middle", 150.0, 99.5),
        ];
        let rows = group_rows(fragments, 10.0);
        assert_eq!(rows.len(), 1);
        let texts: Vec<&str> = rows[0].iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["left", "middle", "right"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_rows(Vec::new(), 10.0).is_empty());
    }
}

use tessel_primitives::Rect;

use super::LayoutKind;

/// Workspace area for a `width` x `height` terminal: everything between the
/// title row and the status row.
pub fn workspace_area(width: u16, height: u16) -> Rect {
	Rect::new(0, 1, width, height.saturating_sub(2))
}

/// Splits `extent` cells starting at `start` into `k` segments separated by
/// one-cell dividers.
///
/// Each segment gets `floor(available / k)` cells where `available` excludes
/// the dividers; the last segment absorbs the remainder. Returns
/// `(segments, divider_positions)`.
fn segments(start: u16, extent: u16, k: u16) -> (Vec<(u16, u16)>, Vec<u16>) {
	let gaps = k.saturating_sub(1);
	let available = extent.saturating_sub(gaps);
	let size = available / k;
	let mut segs = Vec::with_capacity(usize::from(k));
	let mut divs = Vec::with_capacity(usize::from(gaps));
	let mut pos = start;
	for i in 0..k {
		let len = if i + 1 == k { available - size * gaps } else { size };
		segs.push((pos, len));
		pos += len;
		if i + 1 < k {
			divs.push(pos);
			pos += 1;
		}
	}
	(segs, divs)
}

fn columns(area: Rect, k: u16) -> (Vec<Rect>, Vec<Rect>) {
	let (segs, divs) = segments(area.x, area.width, k);
	(
		segs.into_iter().map(|(x, w)| Rect::new(x, area.y, w, area.height)).collect(),
		divs.into_iter().map(|x| Rect::new(x, area.y, 1, area.height)).collect(),
	)
}

fn rows(area: Rect, k: u16) -> (Vec<Rect>, Vec<Rect>) {
	let (segs, divs) = segments(area.y, area.height, k);
	(
		segs.into_iter().map(|(y, h)| Rect::new(area.x, y, area.width, h)).collect(),
		divs.into_iter().map(|y| Rect::new(area.x, y, area.width, 1)).collect(),
	)
}

/// Splits `area` with `outer`, then splits the sub-areas selected by `inner`
/// with the second function. Pane order follows the outer split.
fn nested(
	area: Rect,
	outer: fn(Rect, u16) -> (Vec<Rect>, Vec<Rect>),
	inner: fn(Rect, u16) -> (Vec<Rect>, Vec<Rect>),
	inner_k: u16,
	split: &[bool],
) -> (Vec<Rect>, Vec<Rect>) {
	let (parts, mut divs) = outer(area, split.len() as u16);
	let mut panes = Vec::new();
	for (part, &split_it) in parts.into_iter().zip(split) {
		if split_it {
			let (sub, sub_divs) = inner(part, inner_k);
			panes.extend(sub);
			divs.extend(sub_divs);
		} else {
			panes.push(part);
		}
	}
	(panes, divs)
}

fn tile(kind: LayoutKind, area: Rect) -> (Vec<Rect>, Vec<Rect>) {
	match kind {
		LayoutKind::Single => (vec![area], Vec::new()),
		LayoutKind::Horizontal2 => columns(area, 2),
		LayoutKind::Horizontal3 => columns(area, 3),
		LayoutKind::Horizontal4 => columns(area, 4),
		LayoutKind::Vertical2 => rows(area, 2),
		LayoutKind::Grid2x2 => nested(area, rows, columns, 2, &[true, true]),
		LayoutKind::Grid2x3 => nested(area, rows, columns, 3, &[true, true]),
		LayoutKind::OneLeftTwoRight => nested(area, columns, rows, 2, &[false, true]),
		LayoutKind::TwoLeftOneRight => nested(area, columns, rows, 2, &[true, false]),
		LayoutKind::OneTopTwoBottom => nested(area, rows, columns, 2, &[false, true]),
		LayoutKind::TwoTopOneBottom => nested(area, rows, columns, 2, &[true, false]),
	}
}

/// Pane rectangles for `kind` inside `area`, one per pane in slot order.
pub fn dimensions(kind: LayoutKind, area: Rect) -> Vec<Rect> {
	tile(kind, area).0
}

/// Divider strips for `kind` inside `area`.
///
/// Vertical strips are one cell wide, horizontal strips one cell tall.
pub fn dividers(kind: LayoutKind, area: Rect) -> Vec<Rect> {
	tile(kind, area).1
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn remainder_goes_to_last_segment() {
		let (segs, divs) = segments(0, 80, 3);
		assert_eq!(segs, vec![(0, 26), (27, 26), (54, 26)]);
		assert_eq!(divs, vec![26, 53]);

		let (segs, divs) = segments(0, 81, 2);
		assert_eq!(segs, vec![(0, 40), (41, 40)]);
		assert_eq!(divs, vec![40]);

		let (segs, _) = segments(0, 82, 2);
		assert_eq!(segs, vec![(0, 40), (41, 41)]);
	}

	#[test]
	fn workspace_excludes_title_and_status() {
		assert_eq!(workspace_area(80, 24), Rect::new(0, 1, 80, 22));
		assert_eq!(workspace_area(80, 1), Rect::new(0, 1, 80, 0));
	}

	#[test]
	fn horizontal_two_splits_columns() {
		let area = Rect::new(0, 1, 80, 22);
		assert_eq!(
			dimensions(LayoutKind::Horizontal2, area),
			vec![Rect::new(0, 1, 39, 22), Rect::new(40, 1, 40, 22)]
		);
		assert_eq!(dividers(LayoutKind::Horizontal2, area), vec![Rect::new(39, 1, 1, 22)]);
	}

	#[test]
	fn composite_order() {
		let area = Rect::new(0, 1, 81, 23);
		let panes = dimensions(LayoutKind::OneLeftTwoRight, area);
		assert_eq!(panes.len(), 3);
		assert_eq!(panes[0], Rect::new(0, 1, 40, 23));
		assert_eq!(panes[1], Rect::new(41, 1, 40, 11));
		assert_eq!(panes[2], Rect::new(41, 13, 40, 11));

		let panes = dimensions(LayoutKind::TwoTopOneBottom, area);
		assert_eq!(panes[0], Rect::new(0, 1, 40, 11));
		assert_eq!(panes[1], Rect::new(41, 1, 40, 11));
		assert_eq!(panes[2], Rect::new(0, 13, 81, 11));
	}

	#[test]
	fn grid_is_row_major() {
		let panes = dimensions(LayoutKind::Grid2x3, Rect::new(0, 0, 62, 21));
		assert_eq!(panes.len(), 6);
		assert!(panes[0].y == panes[1].y && panes[1].y == panes[2].y);
		assert!(panes[3].y > panes[0].y);
		assert!(panes[0].x < panes[1].x && panes[1].x < panes[2].x);
	}
}

use image::Rgb;
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, BresenhamLineIter, Canvas},
    rect::Rect,
};
use tracing::warn;

use super::{
    bb::{BoxCoords, Corners},
    core::{max, min, PtF, PtI, TPtF, TPtI},
    polygon::Polygon,
};

/// Outline color used when the caller does not choose one.
pub const DEFAULT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Outline thickness in pixels of all drawing routines.
pub const STROKE_WIDTH: TPtI = 2;

// Coordinates further away from the canvas than this cannot influence any pixel.
const CANVAS_MARGIN: TPtI = 2 * STROKE_WIDTH;

fn clamp_to_canvas<C: Canvas>(im: &C, p: PtI) -> PtI {
    let (w, h) = im.dimensions();
    let clamp = |v: TPtI, size: u32| {
        let upper = TPtI::try_from(size)
            .unwrap_or(TPtI::MAX)
            .saturating_add(CANVAS_MARGIN);
        v.clamp(-CANVAS_MARGIN, upper)
    };
    PtI {
        x: clamp(p.x, w),
        y: clamp(p.y, h),
    }
}

/// Liang-Barsky clipping of the segment `p1`-`p2` to the canvas plus margin. Returns
/// `None` if the segment does not touch that area.
fn clip_to_canvas<C: Canvas>(im: &C, p1: PtF, p2: PtF) -> Option<(PtF, PtF)> {
    let (w, h) = im.dimensions();
    let margin = TPtF::from(CANVAS_MARGIN);
    let (x_min, y_min) = (-margin, -margin);
    let (x_max, y_max) = (TPtF::from(w) + margin, TPtF::from(h) + margin);
    let d = p2 - p1;
    let (mut t_enter, mut t_leave) = (0.0, 1.0);
    for (p, q) in [
        (-d.x, p1.x - x_min),
        (d.x, x_max - p1.x),
        (-d.y, p1.y - y_min),
        (d.y, y_max - p1.y),
    ] {
        if p == 0.0 {
            // parallel to this border and outside of it
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                if t > t_leave {
                    return None;
                }
                t_enter = max(t_enter, t);
            } else {
                if t < t_enter {
                    return None;
                }
                t_leave = min(t_leave, t);
            }
        }
    }
    let at = |t: TPtF| PtF {
        x: p1.x + t * d.x,
        y: p1.y + t * d.y,
    };
    let start = if t_enter > 0.0 { at(t_enter) } else { p1 };
    let end = if t_leave < 1.0 { at(t_leave) } else { p2 };
    Some((start, end))
}

fn size_between(from: TPtI, to: TPtI) -> u32 {
    // both ends are part of the rectangle
    u32::try_from(i64::from(to) - i64::from(from) + 1).unwrap_or(1)
}

/// Ring `offset` pixels outside the rectangle spanned by `min` and `max`.
fn outline_rect(min: PtI, max: PtI, offset: TPtI) -> Rect {
    let (x, y) = (min.x - offset, min.y - offset);
    let (x_max, y_max) = (max.x + offset, max.y + offset);
    Rect::at(x, y).of_size(size_between(x, x_max), size_between(y, y_max))
}

/// Draws the outline of an axis-aligned box. Coordinates are truncated to pixels, both
/// corners belong to the outline. The stroke is [`STROKE_WIDTH`] pixels wide and grows
/// outwards from the nominal outline. Pixels outside of the canvas are skipped.
///
/// The canvas is mutated in place and handed back for chaining.
pub fn draw_bbox<'a, C>(im: &'a mut C, coords: &BoxCoords, color: C::Pixel) -> &'a mut C
where
    C: Canvas,
    C::Pixel: 'static,
{
    let Corners { min, max } = coords.pixel_corners().normalized();
    let (min, max) = (clamp_to_canvas(im, min), clamp_to_canvas(im, max));
    for offset in 0..STROKE_WIDTH {
        draw_hollow_rect_mut(im, outline_rect(min, max, offset), color);
    }
    im
}

/// Draws the closed outline of a polygon, i.e., all edges between consecutive points and
/// the edge from the last point back to the first one. A square pen of
/// [`STROKE_WIDTH`] pixels is moved along each edge. Edges leaving the canvas are cut at
/// its border and keep their direction.
///
/// Without points nothing is drawn, a single point results in one pen dot.
pub fn draw_polygon<'a, C>(im: &'a mut C, polygon: &Polygon, color: C::Pixel) -> &'a mut C
where
    C: Canvas,
    C::Pixel: 'static,
{
    if polygon.len() < 3 {
        warn!(
            "drawing degenerate polygon with {} point(s)",
            polygon.len()
        );
    }
    let pen = STROKE_WIDTH as u32;
    for (p1, p2) in polygon.lineseg_iter() {
        let Some((p1, p2)) = clip_to_canvas(im, p1, p2) else {
            continue;
        };
        // no-op for clipped points apart from non-finite input
        let p1 = clamp_to_canvas(im, p1.trunc());
        let p2 = clamp_to_canvas(im, p2.trunc());
        for (x, y) in BresenhamLineIter::new(p1.into(), p2.into()) {
            draw_filled_rect_mut(im, Rect::at(x, y).of_size(pen, pen), color);
        }
    }
    im
}

#[cfg(test)]
use crate::bb::{BbFormat, BB};
#[cfg(test)]
use image::{ImageBuffer, Luma, RgbImage};

#[cfg(test)]
fn colored(im: &RgbImage, color: Rgb<u8>) -> Vec<(u32, u32)> {
    im.enumerate_pixels()
        .filter(|(_, _, p)| **p == color)
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[test]
fn test_bbox_xywh() {
    let color = Rgb([0, 255, 0]);
    let mut im = RgbImage::new(30, 30);
    let coords = BoxCoords::from_flat(&[5.0, 5.0, 10.0, 10.0], BbFormat::Xywh).unwrap();
    draw_bbox(&mut im, &coords, color);
    for (x, y) in [(5, 5), (15, 5), (5, 15), (15, 15), (10, 5), (5, 10), (15, 12)] {
        assert_eq!(*im.get_pixel(x, y), color, "({x}, {y})");
    }
    // second ring of the stroke
    for (x, y) in [(4, 4), (16, 16), (10, 4), (16, 10)] {
        assert_eq!(*im.get_pixel(x, y), color, "({x}, {y})");
    }
    for (x, y) in [(10, 10), (6, 6), (14, 14), (3, 3), (17, 17), (0, 0)] {
        assert_ne!(*im.get_pixel(x, y), color, "({x}, {y})");
    }
}

#[test]
fn test_bbox_formats_agree() {
    let mut im_xywh = RgbImage::new(30, 30);
    let mut im_xy = RgbImage::new(30, 30);
    let xywh = BoxCoords::Xywh(BB::from_arr(&[5.0, 5.0, 10.0, 10.0]));
    let xy = BoxCoords::Xy(Corners::from_arr(&[[5.0, 5.0], [15.0, 15.0]]));
    draw_bbox(&mut im_xywh, &xywh, DEFAULT_COLOR);
    draw_bbox(&mut im_xy, &xy, DEFAULT_COLOR);
    assert_eq!(im_xywh, im_xy);
    assert!(!colored(&im_xy, DEFAULT_COLOR).is_empty());
    // swapped corners describe the same box
    let mut im_swapped = RgbImage::new(30, 30);
    let swapped = BoxCoords::Xy(Corners::from_arr(&[[15.0, 15.0], [5.0, 5.0]]));
    draw_bbox(&mut im_swapped, &swapped, DEFAULT_COLOR);
    assert_eq!(im_swapped, im_xy);
}

#[test]
fn test_bbox_truncation_and_chaining() {
    let mut im = RgbImage::new(20, 20);
    let coords = BoxCoords::Xy(Corners::from_arr(&[[2.9, 2.9], [8.99, 8.5]]));
    let color = Rgb([1, 2, 3]);
    let returned = draw_bbox(&mut im, &coords, color);
    returned.put_pixel(0, 19, color);
    // truncated to (2, 2) and (8, 8), the outer ring lies at 1 and 9
    for p in [(2, 2), (8, 8), (1, 1), (9, 9)] {
        assert_eq!(*im.get_pixel(p.0, p.1), color, "{p:?}");
    }
    for p in [(0, 0), (10, 10), (7, 7), (3, 3)] {
        assert_ne!(*im.get_pixel(p.0, p.1), color, "{p:?}");
    }
    assert_eq!(*im.get_pixel(0, 19), color);
}

#[test]
fn test_bbox_out_of_bounds() {
    let mut im = RgbImage::new(10, 10);
    let coords = BoxCoords::Xywh(BB::from_arr(&[-5.0, 2.0, 1e12, 5.0]));
    draw_bbox(&mut im, &coords, DEFAULT_COLOR);
    assert_eq!(*im.get_pixel(0, 2), DEFAULT_COLOR);
    assert_eq!(*im.get_pixel(9, 7), DEFAULT_COLOR);
    assert_ne!(*im.get_pixel(5, 5), DEFAULT_COLOR);
    let mut im = RgbImage::new(10, 10);
    let far_away = BoxCoords::Xywh(BB::from_arr(&[100.0, 100.0, 5.0, 5.0]));
    draw_bbox(&mut im, &far_away, DEFAULT_COLOR);
    assert!(colored(&im, DEFAULT_COLOR).is_empty());
}

#[test]
fn test_bbox_gray() {
    let mut im = ImageBuffer::<Luma<u8>, Vec<u8>>::new(10, 10);
    let coords = BoxCoords::Xywh(BB::from_arr(&[2.0, 2.0, 4.0, 4.0]));
    draw_bbox(&mut im, &coords, Luma([200]));
    assert_eq!(im.get_pixel(2, 2)[0], 200);
    assert_eq!(im.get_pixel(4, 4)[0], 0);
}

#[test]
fn test_polygon_closed() {
    let color = Rgb([0, 0, 255]);
    let mut im = RgbImage::new(20, 20);
    let poly = Polygon::from(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]);
    draw_polygon(&mut im, &poly, color);
    for (x, y) in [(0, 0), (5, 0), (10, 0), (10, 5), (10, 10), (5, 10), (0, 10)] {
        assert_eq!(*im.get_pixel(x, y), color, "({x}, {y})");
    }
    // closing edge from the last point back to the first
    for y in 0..=10 {
        assert_eq!(*im.get_pixel(0, y), color, "(0, {y})");
    }
    // pen width
    assert_eq!(*im.get_pixel(5, 1), color);
    assert_eq!(*im.get_pixel(11, 5), color);
    for (x, y) in [(5, 5), (3, 7), (15, 15), (5, 12)] {
        assert_ne!(*im.get_pixel(x, y), color, "({x}, {y})");
    }
}

#[test]
fn test_polygon_open_chain_is_closed() {
    let color = Rgb([9, 9, 9]);
    let mut im = RgbImage::new(20, 20);
    let triangle = Polygon::from(vec![[2.0, 2.0], [12.0, 2.0], [2.0, 12.0]]);
    draw_polygon(&mut im, &triangle, color);
    // (2, 12) -> (2, 2) is the implicit closing edge
    for y in 2..=12 {
        assert_eq!(*im.get_pixel(2, y), color, "(2, {y})");
    }
    assert_eq!(*im.get_pixel(7, 7), color);
    assert_ne!(*im.get_pixel(5, 5), color);
}

#[test]
fn test_polygon_degenerate() {
    let mut im = RgbImage::new(10, 10);
    draw_polygon(&mut im, &Polygon::default(), DEFAULT_COLOR);
    assert!(colored(&im, DEFAULT_COLOR).is_empty());
    draw_polygon(&mut im, &Polygon::from(vec![[4.0, 4.0]]), DEFAULT_COLOR);
    assert_eq!(colored(&im, DEFAULT_COLOR), vec![(4, 4), (5, 4), (4, 5), (5, 5)]);
    let mut im = RgbImage::new(10, 10);
    let poly = Polygon::from(vec![[-100.0, 3.0], [1e10, 3.0]]);
    draw_polygon(&mut im, &poly, DEFAULT_COLOR);
    assert_eq!(*im.get_pixel(0, 3), DEFAULT_COLOR);
    assert_eq!(*im.get_pixel(9, 4), DEFAULT_COLOR);
}

#[test]
fn test_polygon_off_canvas() {
    let color = Rgb([0, 128, 255]);
    let mut im = RgbImage::new(20, 20);
    // crosses x = 0 at y = 100 / 11
    let poly = Polygon::from(vec![[-100.0, 0.0], [10.0, 10.0]]);
    draw_polygon(&mut im, &poly, color);
    let rows_at_left_border = (0..20)
        .filter(|y| *im.get_pixel(0, *y) == color)
        .collect::<Vec<_>>();
    assert!(!rows_at_left_border.is_empty());
    for y in rows_at_left_border {
        assert!((8..=10).contains(&y), "(0, {y})");
    }
    assert_eq!(*im.get_pixel(10, 10), color);
    assert_eq!(*im.get_pixel(5, 9), color);
    for y in 0..6 {
        assert_ne!(*im.get_pixel(0, y), color, "(0, {y})");
    }

    // edges that never touch the canvas are skipped
    let mut im = RgbImage::new(10, 10);
    let outside = Polygon::from(vec![[100.0, 100.0], [200.0, 100.0], [150.0, 1e12]]);
    draw_polygon(&mut im, &outside, DEFAULT_COLOR);
    assert!(colored(&im, DEFAULT_COLOR).is_empty());

    // a huge diagonal keeps its slope through the canvas
    let mut im = RgbImage::new(10, 10);
    let diagonal = Polygon::from(vec![[-1e9, -1e9], [1e9, 1e9]]);
    draw_polygon(&mut im, &diagonal, DEFAULT_COLOR);
    for i in 0..10 {
        assert_eq!(*im.get_pixel(i, i), DEFAULT_COLOR, "({i}, {i})");
    }
    assert_ne!(*im.get_pixel(0, 9), DEFAULT_COLOR);
    assert_ne!(*im.get_pixel(9, 0), DEFAULT_COLOR);
}

mod bb;
mod core;
mod draw;
mod polygon;
pub mod result;
pub use bb::{convert_bbox_coords, BbF, BbFormat, BbI, BoxCoords, Conversion, Corners, BB};
pub use core::{trunc_to_pixel, Calc, Point, PtF, PtI, TPtF, TPtI};
pub use draw::{draw_bbox, draw_polygon, DEFAULT_COLOR, STROKE_WIDTH};
use imageproc::drawing::Canvas;
pub use polygon::Polygon;
pub use result::{to_draw, DrawError, DrawResult, ErrorKind};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum GeoFig {
    BB(BoxCoords),
    Poly(Polygon),
}

impl GeoFig {
    pub fn draw<'a, C>(&self, im: &'a mut C, color: C::Pixel) -> &'a mut C
    where
        C: Canvas,
        C::Pixel: 'static,
    {
        match self {
            Self::BB(coords) => draw_bbox(im, coords, color),
            Self::Poly(poly) => draw_polygon(im, poly, color),
        }
    }
}
impl Default for GeoFig {
    fn default() -> Self {
        Self::BB(BoxCoords::Xywh(BbF::default()))
    }
}
impl From<BoxCoords> for GeoFig {
    fn from(coords: BoxCoords) -> Self {
        Self::BB(coords)
    }
}
impl From<Polygon> for GeoFig {
    fn from(poly: Polygon) -> Self {
        Self::Poly(poly)
    }
}

pub fn make_test_geos() -> Vec<GeoFig> {
    vec![
        BoxCoords::Xywh(BB::from_arr(&[0.0, 0.0, 10.0, 10.0])).into(),
        BoxCoords::Xy(Corners::from_arr(&[[5.0, 5.0], [15.0, 15.0]])).into(),
        Polygon::from(vec![[2.0, 2.0], [8.0, 2.0], [5.0, 8.0]]).into(),
    ]
}

#[test]
fn test_geofig_draw() {
    use image::{Rgb, RgbImage};
    let color = Rgb([10, 20, 30]);
    let geos = make_test_geos();
    let mut im = RgbImage::new(20, 20);
    for geo in &geos {
        geo.draw(&mut im, color);
    }
    let mut im_ref = RgbImage::new(20, 20);
    draw_bbox(&mut im_ref, &BoxCoords::Xywh(BB::from_arr(&[0.0, 0.0, 10.0, 10.0])), color);
    let corners = BoxCoords::Xy(Corners::from_arr(&[[5.0, 5.0], [15.0, 15.0]]));
    draw_polygon(
        draw_bbox(&mut im_ref, &corners, color),
        &Polygon::from(vec![[2.0, 2.0], [8.0, 2.0], [5.0, 8.0]]),
        color,
    );
    assert_eq!(im, im_ref);
}

#[test]
fn test_geofig_serde() {
    let geos = make_test_geos();
    let s = serde_json::to_string(&geos).unwrap();
    let geos_read: Vec<GeoFig> = serde_json::from_str(&s).unwrap();
    assert_eq!(geos, geos_read);
    assert_eq!(
        GeoFig::default(),
        GeoFig::BB(BoxCoords::Xywh(BB::from_arr(&[0.0; 4])))
    );
}

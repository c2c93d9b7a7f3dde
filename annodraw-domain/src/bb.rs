use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::core::{max, min, trunc_to_pixel, Calc, Point, TPtF, TPtI};
use crate::{
    drawerr,
    result::{DrawError, DrawResult},
};

pub type BbF = BB<TPtF>;
pub type BbI = BB<TPtI>;

/// Origin-size form, `(x, y)` is the top-left corner.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BB<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

impl<T> BB<T>
where
    T: Calc,
{
    /// `[x, y, w, h]`
    pub fn from_arr(a: &[T; 4]) -> Self {
        BB {
            x: a[0],
            y: a[1],
            w: a[2],
            h: a[3],
        }
    }
    pub fn to_arr(&self) -> [T; 4] {
        [self.x, self.y, self.w, self.h]
    }
    pub fn x_max(&self) -> T {
        self.x + self.w
    }
    pub fn y_max(&self) -> T {
        self.y + self.h
    }
    pub fn min(&self) -> Point<T> {
        Point {
            x: self.x,
            y: self.y,
        }
    }
    pub fn max(&self) -> Point<T> {
        Point {
            x: self.x_max(),
            y: self.y_max(),
        }
    }
    pub fn to_corners(&self) -> Corners<T> {
        Corners {
            min: self.min(),
            max: self.max(),
        }
    }
}

/// Corner form, top-left `min` and bottom-right `max`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Corners<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl<T> Corners<T>
where
    T: Calc,
{
    /// `[[x_min, y_min], [x_max, y_max]]`
    pub fn from_arr(a: &[[T; 2]; 2]) -> Self {
        Corners {
            min: a[0].into(),
            max: a[1].into(),
        }
    }
    pub fn to_arr(&self) -> [[T; 2]; 2] {
        [self.min.into(), self.max.into()]
    }
    pub fn to_bb(&self) -> BB<T> {
        BB {
            x: self.min.x,
            y: self.min.y,
            w: self.max.x - self.min.x,
            h: self.max.y - self.min.y,
        }
    }
    /// Swaps components such that `min` is component-wise not larger than `max`.
    pub fn normalized(&self) -> Self {
        Corners {
            min: Point {
                x: min(self.min.x, self.max.x),
                y: min(self.min.y, self.max.y),
            },
            max: Point {
                x: max(self.min.x, self.max.x),
                y: max(self.min.y, self.max.y),
            },
        }
    }
}

impl Corners<TPtF> {
    pub fn trunc(&self) -> Corners<TPtI> {
        Corners {
            min: self.min.trunc(),
            max: self.max.trunc(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BbFormat {
    /// `[[x_min, y_min], [x_max, y_max]]`
    #[default]
    Xy,
    /// `[x, y, w, h]`
    Xywh,
}

impl FromStr for BbFormat {
    type Err = DrawError;
    fn from_str(s: &str) -> DrawResult<Self> {
        match s.to_lowercase().as_str() {
            "xy" => Ok(BbFormat::Xy),
            "xywh" => Ok(BbFormat::Xywh),
            _ => Err(drawerr!(
                InvalidFormatOption,
                "only xy or xywh is supported as box format, got '{}'",
                s
            )),
        }
    }
}
impl Display for BbFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BbFormat::Xy => "xy",
            BbFormat::Xywh => "xywh",
        })
    }
}

/// Box coordinates in one of the two conventions. Components are real numbers, they
/// are truncated only when pixels are addressed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum BoxCoords {
    Xy(Corners<TPtF>),
    Xywh(BbF),
}

impl BoxCoords {
    pub fn format(&self) -> BbFormat {
        match self {
            BoxCoords::Xy(_) => BbFormat::Xy,
            BoxCoords::Xywh(_) => BbFormat::Xywh,
        }
    }

    /// Four numbers, `x_min, y_min, x_max, y_max` for [`BbFormat::Xy`] and `x, y, w, h`
    /// for [`BbFormat::Xywh`].
    pub fn from_flat(values: &[TPtF], format: BbFormat) -> DrawResult<Self> {
        let a: [TPtF; 4] = values.try_into().map_err(|_| {
            drawerr!(
                ShapeOrType,
                "a bounding box in {} format needs 4 values, got {}",
                format,
                values.len()
            )
        })?;
        Ok(match format {
            BbFormat::Xy => BoxCoords::Xy(Corners::from_arr(&[[a[0], a[1]], [a[2], a[3]]])),
            BbFormat::Xywh => BoxCoords::Xywh(BB::from_arr(&a)),
        })
    }

    /// Parses the bracket notation, `[[x_min, y_min], [x_max, y_max]]` or `[x, y, w, h]`.
    pub fn parse(s: &str, format: BbFormat) -> DrawResult<Self> {
        let err = |e: serde_json::Error| {
            drawerr!(
                ShapeOrType,
                "could not parse '{}' as bounding box in {} format, {}",
                s,
                format,
                e
            )
        };
        match format {
            BbFormat::Xy => {
                let a = serde_json::from_str::<[[TPtF; 2]; 2]>(s).map_err(err)?;
                Ok(BoxCoords::Xy(Corners::from_arr(&a)))
            }
            BbFormat::Xywh => {
                let a = serde_json::from_str::<[TPtF; 4]>(s).map_err(err)?;
                Ok(BoxCoords::Xywh(BB::from_arr(&a)))
            }
        }
    }

    /// Pixel corners as used for drawing. For origin-size input the far corner is computed
    /// before truncation.
    pub fn pixel_corners(&self) -> Corners<TPtI> {
        match self {
            BoxCoords::Xywh(bb) => bb.to_corners().trunc(),
            BoxCoords::Xy(c) => c.trunc(),
        }
    }
}

impl Display for BoxCoords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxCoords::Xy(c) => write!(
                f,
                "[[{}, {}], [{}, {}]]",
                c.min.x, c.min.y, c.max.x, c.max.y
            ),
            BoxCoords::Xywh(bb) => write!(f, "[{}, {}, {}, {}]", bb.x, bb.y, bb.w, bb.h),
        }
    }
}

impl From<Corners<TPtF>> for BoxCoords {
    fn from(c: Corners<TPtF>) -> Self {
        BoxCoords::Xy(c)
    }
}
impl From<BbF> for BoxCoords {
    fn from(bb: BbF) -> Self {
        BoxCoords::Xywh(bb)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    XyToXywh,
    XywhToXy,
}

impl FromStr for Conversion {
    type Err = DrawError;
    fn from_str(s: &str) -> DrawResult<Self> {
        match s.to_lowercase().as_str() {
            "xy_to_xywh" => Ok(Conversion::XyToXywh),
            "xywh_to_xy" => Ok(Conversion::XywhToXy),
            _ => Err(drawerr!(
                InvalidFormatOption,
                "only xy_to_xywh or xywh_to_xy is supported, got '{}'",
                s
            )),
        }
    }
}

impl Conversion {
    pub fn source(&self) -> BbFormat {
        match self {
            Conversion::XyToXywh => BbFormat::Xy,
            Conversion::XywhToXy => BbFormat::Xywh,
        }
    }

    /// Corner to origin-size truncates `x_min`, `y_min`, `w` and `h`. The other direction
    /// keeps fractions.
    pub fn apply(&self, bbox: &BoxCoords) -> DrawResult<BoxCoords> {
        match (self, bbox) {
            (Conversion::XyToXywh, BoxCoords::Xy(c)) => {
                let bb = c.to_bb();
                let truncated = BbI::from_arr(&bb.to_arr().map(trunc_to_pixel));
                Ok(BoxCoords::Xywh(BbF::from_arr(
                    &truncated.to_arr().map(f64::from),
                )))
            }
            (Conversion::XywhToXy, BoxCoords::Xywh(bb)) => Ok(BoxCoords::Xy(bb.to_corners())),
            _ => Err(drawerr!(
                ShapeOrType,
                "conversion {:?} expects a box in {} format, got {}",
                self,
                self.source(),
                bbox
            )),
        }
    }
}

/// Converts `bbox` between corner and origin-size form. `format` is `"xy_to_xywh"` or
/// `"xywh_to_xy"`, compared case-insensitively.
pub fn convert_bbox_coords(bbox: &BoxCoords, format: &str) -> DrawResult<BoxCoords> {
    let conversion = format.parse::<Conversion>()?;
    conversion.apply(bbox)
}

#[cfg(test)]
use crate::{result::ErrorKind, PtF, PtI};

#[cfg(test)]
fn xy(a: [[f64; 2]; 2]) -> BoxCoords {
    BoxCoords::Xy(Corners::from_arr(&a))
}
#[cfg(test)]
fn xywh(a: [f64; 4]) -> BoxCoords {
    BoxCoords::Xywh(BB::from_arr(&a))
}

#[test]
fn test_convert() {
    assert_eq!(
        convert_bbox_coords(&xy([[10.0, 20.0], [30.0, 50.0]]), "xy_to_xywh").unwrap(),
        xywh([10.0, 20.0, 20.0, 30.0])
    );
    assert_eq!(
        convert_bbox_coords(&xywh([10.0, 20.0, 20.0, 30.0]), "xywh_to_xy").unwrap(),
        xy([[10.0, 20.0], [30.0, 50.0]])
    );
    assert_eq!(
        convert_bbox_coords(&xy([[10.0, 20.0], [30.0, 50.0]]), "XY_TO_XYWH").unwrap(),
        convert_bbox_coords(&xy([[10.0, 20.0], [30.0, 50.0]]), "xy_to_xywh").unwrap(),
    );
    assert_eq!(
        convert_bbox_coords(&xywh([1.0, 2.0, 3.0, 4.0]), "Xywh_To_Xy").unwrap(),
        xy([[1.0, 2.0], [4.0, 6.0]])
    );
}

#[test]
fn test_convert_roundtrip() {
    for (x, y, w, h) in [(0, 0, 0, 0), (10, 20, 20, 30), (3, 7, 100, 1), (-5, 4, 9, 2)] {
        let bb = xywh([x, y, w, h].map(f64::from));
        let corners = convert_bbox_coords(&bb, "xywh_to_xy").unwrap();
        assert_eq!(convert_bbox_coords(&corners, "xy_to_xywh").unwrap(), bb);
    }
}

#[test]
fn test_convert_truncation_quirk() {
    // corner to origin-size truncates
    let c = xy([[1.7, 2.2], [5.9, 4.0]]);
    let bb = convert_bbox_coords(&c, "xy_to_xywh").unwrap();
    assert_eq!(bb, xywh([1.0, 2.0, 4.0, 1.0]));
    // origin-size to corner keeps fractions
    let bb = xywh([1.5, 2.25, 3.5, 0.5]);
    assert_eq!(
        convert_bbox_coords(&bb, "xywh_to_xy").unwrap(),
        xy([[1.5, 2.25], [5.0, 2.75]])
    );
    // and hence fractional input does not round trip
    let back = convert_bbox_coords(
        &convert_bbox_coords(&bb, "xywh_to_xy").unwrap(),
        "xy_to_xywh",
    )
    .unwrap();
    assert_eq!(back, xywh([1.0, 2.0, 3.0, 0.0]));
    assert_ne!(back, bb);
}

#[test]
fn test_convert_errors() {
    let c = xy([[10.0, 20.0], [30.0, 50.0]]);
    let e = convert_bbox_coords(&c, "bogus").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidFormatOption);
    assert!(e.msg().contains("xy_to_xywh") && e.msg().contains("xywh_to_xy"));
    let e = convert_bbox_coords(&c, "xywh_to_xy").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::ShapeOrType);
    let e = Conversion::XyToXywh
        .apply(&xywh([1.0, 2.0, 3.0, 4.0]))
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::ShapeOrType);
}

#[test]
fn test_format() {
    assert_eq!("xywh".parse::<BbFormat>().unwrap(), BbFormat::Xywh);
    assert_eq!("XY".parse::<BbFormat>().unwrap(), BbFormat::Xy);
    let e = "xyxy".parse::<BbFormat>().unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidFormatOption);
    assert_eq!(BbFormat::default(), BbFormat::Xy);
    assert_eq!(xywh([0.0; 4]).format(), BbFormat::Xywh);
}

#[test]
fn test_from_flat_and_parse() {
    assert_eq!(
        BoxCoords::from_flat(&[5.0, 5.0, 10.0, 10.0], BbFormat::Xywh).unwrap(),
        xywh([5.0, 5.0, 10.0, 10.0])
    );
    assert_eq!(
        BoxCoords::from_flat(&[5.0, 5.0, 15.0, 15.0], BbFormat::Xy).unwrap(),
        xy([[5.0, 5.0], [15.0, 15.0]])
    );
    let e = BoxCoords::from_flat(&[1.0, 2.0, 3.0], BbFormat::Xywh).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::ShapeOrType);

    let c = BoxCoords::parse("[[5, 5], [15.5, 15]]", BbFormat::Xy).unwrap();
    assert_eq!(c, xy([[5.0, 5.0], [15.5, 15.0]]));
    let c = BoxCoords::parse(" [5, 5, 10, 10] ", BbFormat::Xywh).unwrap();
    assert_eq!(c, xywh([5.0, 5.0, 10.0, 10.0]));
    for (s, format) in [
        ("[5, 5, 10, 10]", BbFormat::Xy),
        ("[[5, 5], [15, 15]]", BbFormat::Xywh),
        ("[5, 5, 10]", BbFormat::Xywh),
        ("[5, \"a\", 10, 10]", BbFormat::Xywh),
    ] {
        let e = BoxCoords::parse(s, format).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ShapeOrType);
    }
}

#[test]
fn test_display() {
    let c = xy([[10.0, 20.0], [30.5, 50.0]]);
    assert_eq!(format!("{c}"), "[[10, 20], [30.5, 50]]");
    assert_eq!(BoxCoords::parse(&c.to_string(), BbFormat::Xy).unwrap(), c);
    let bb = xywh([10.0, 20.0, 20.0, 30.0]);
    assert_eq!(format!("{bb}"), "[10, 20, 20, 30]");
}

#[test]
fn test_pixel_corners() {
    let from_xywh = xywh([5.0, 5.0, 10.0, 10.0]).pixel_corners();
    let from_xy = xy([[5.0, 5.0], [15.0, 15.0]]).pixel_corners();
    assert_eq!(from_xywh, from_xy);
    // the far corner is summed before truncation
    let c = xywh([0.6, 0.6, 0.6, 0.6]).pixel_corners();
    assert_eq!(c.max, PtI { x: 1, y: 1 });
    assert_eq!(c.min, PtI { x: 0, y: 0 });
    let c = Corners::from_arr(&[[9, 1], [2, 8]]).normalized();
    assert_eq!(c, Corners::from_arr(&[[2, 1], [9, 8]]));
    let p: PtF = (1.0, 2.0).into();
    assert_eq!(BB::from_arr(&[1.0, 2.0, 3.0, 4.0]).min(), p);
}

//! Annotation files are JSON lists of geometric figures, each with an optional color.
//!
//! ```json
//! [
//!   {"geo": {"BB": {"Xywh": {"x": 5.0, "y": 5.0, "w": 10.0, "h": 10.0}}}, "color": [0, 255, 0]},
//!   {"geo": {"Poly": {"points": [{"x": 0.0, "y": 0.0}, {"x": 9.0, "y": 0.0}, {"x": 4.0, "y": 7.0}]}}}
//! ]
//! ```
use crate::file_util;
use annodraw_domain::{DrawResult, GeoFig, drawerr, to_draw};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, path::Path};
use tracing::info;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Annotation {
    pub geo: GeoFig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}
impl Annotation {
    pub fn new(geo: GeoFig, color: Option<[u8; 3]>) -> Self {
        Self { geo, color }
    }
    pub fn color_or(&self, default_color: Rgb<u8>) -> Rgb<u8> {
        self.color.map(Rgb).unwrap_or(default_color)
    }
}

pub fn read_annotations<P>(path: P) -> DrawResult<Vec<Annotation>>
where
    P: AsRef<Path> + Debug,
{
    let s = file_util::read_to_string(&path)?;
    serde_json::from_str(&s).map_err(|e| drawerr!("could not parse annotations {:?}, {}", path, e))
}

pub fn write_annotations<P>(path: P, annotations: &[Annotation]) -> DrawResult<()>
where
    P: AsRef<Path> + Debug,
{
    let s = serde_json::to_string_pretty(annotations).map_err(to_draw)?;
    file_util::write(path, s)
}

/// Draws the annotations in the order given. Annotations without color are drawn with
/// `default_color`.
pub fn draw_annotations<'a>(
    im: &'a mut RgbImage,
    annotations: &[Annotation],
    default_color: Rgb<u8>,
) -> &'a mut RgbImage {
    info!("drawing {} annotations", annotations.len());
    for anno in annotations {
        anno.geo.draw(im, anno.color_or(default_color));
    }
    im
}

#[cfg(test)]
use crate::{defer_folder_removal, file_util::tmp_folder};
#[cfg(test)]
use annodraw_domain::make_test_geos;

#[test]
fn test_read_write() {
    let folder = tmp_folder("annotations_test_read_write").unwrap();
    defer_folder_removal!(&folder);
    let annos = make_test_geos()
        .into_iter()
        .enumerate()
        .map(|(i, geo)| Annotation::new(geo, if i == 0 { Some([0, 255, 0]) } else { None }))
        .collect::<Vec<_>>();
    let path = folder.join("annos.json");
    write_annotations(&path, &annos).unwrap();
    assert_eq!(read_annotations(&path).unwrap(), annos);
    file_util::write(&path, "[{\"color\": [1, 2, 3]}]").unwrap();
    assert!(read_annotations(&path).is_err());
}

#[test]
fn test_doc_format() {
    let s = r#"[
        {"geo": {"BB": {"Xywh": {"x": 5.0, "y": 5.0, "w": 10.0, "h": 10.0}}}, "color": [0, 255, 0]},
        {"geo": {"Poly": {"points": [{"x": 0.0, "y": 0.0}, {"x": 9.0, "y": 0.0}, {"x": 4.0, "y": 7.0}]}}}
    ]"#;
    let annos: Vec<Annotation> = serde_json::from_str(s).unwrap();
    assert_eq!(annos.len(), 2);
    assert_eq!(annos[0].color_or(Rgb([1, 1, 1])), Rgb([0, 255, 0]));
    assert_eq!(annos[1].color_or(Rgb([1, 1, 1])), Rgb([1, 1, 1]));
    let mut im = RgbImage::new(20, 20);
    draw_annotations(&mut im, &annos, Rgb([1, 1, 1]));
    assert_eq!(*im.get_pixel(15, 15), Rgb([0, 255, 0]));
    assert_eq!(*im.get_pixel(15, 5), Rgb([0, 255, 0]));
    assert_eq!(*im.get_pixel(0, 0), Rgb([1, 1, 1]));
    assert_eq!(*im.get_pixel(10, 10), Rgb([0, 0, 0]));
}

use crate::{
    annotations::{draw_annotations, read_annotations},
    image_util::{read_rgb8, save_image},
};
use annodraw_domain::{
    BoxCoords, Conversion, DrawResult, Polygon, convert_bbox_coords, draw_bbox, draw_polygon,
};
use image::Rgb;
use std::path::Path;
use tracing::info;

pub fn bbox_on_file(
    input: &Path,
    output: &Path,
    coords: &BoxCoords,
    color: Rgb<u8>,
) -> DrawResult<()> {
    let mut im = read_rgb8(input)?;
    info!("drawing box {coords} in {} format onto {input:?}", coords.format());
    save_image(draw_bbox(&mut im, coords, color), output)
}

pub fn polygon_on_file(
    input: &Path,
    output: &Path,
    polygon: &Polygon,
    color: Rgb<u8>,
) -> DrawResult<()> {
    let mut im = read_rgb8(input)?;
    info!("drawing polygon with {} points onto {input:?}", polygon.len());
    save_image(draw_polygon(&mut im, polygon, color), output)
}

pub fn annotate_file(
    input: &Path,
    output: &Path,
    annotations: &Path,
    default_color: Rgb<u8>,
) -> DrawResult<()> {
    let annos = read_annotations(annotations)?;
    let mut im = read_rgb8(input)?;
    save_image(draw_annotations(&mut im, &annos, default_color), output)
}

/// Returns the converted box in bracket notation. The expected notation of `coords`
/// follows from the source side of `format`.
pub fn convert(coords: &str, format: &str) -> DrawResult<String> {
    let source = format.parse::<Conversion>()?.source();
    let bbox = BoxCoords::parse(coords, source)?;
    let converted = convert_bbox_coords(&bbox, format)?;
    info!("converted {bbox} to {converted}");
    Ok(converted.to_string())
}

#[test]
fn test_convert() {
    use annodraw_domain::ErrorKind;
    assert_eq!(
        convert("[[10, 20], [30, 50]]", "xy_to_xywh").unwrap(),
        "[10, 20, 20, 30]"
    );
    assert_eq!(
        convert("[10, 20, 20, 30]", "XYWH_TO_XY").unwrap(),
        "[[10, 20], [30, 50]]"
    );
    assert_eq!(
        convert("[1.5, 2, 3, 4]", "xywh_to_xy").unwrap(),
        "[[1.5, 2], [4.5, 6]]"
    );
    assert_eq!(
        convert("[[10, 20], [30, 50]]", "bogus").unwrap_err().kind(),
        ErrorKind::InvalidFormatOption
    );
    assert_eq!(
        convert("[10, 20, 20, 30]", "xy_to_xywh").unwrap_err().kind(),
        ErrorKind::ShapeOrType
    );
}

#[cfg(test)]
use std::path::{Path, PathBuf};

#[cfg(test)]
use annolib::{
    Annotation, BbFormat, BoxCoords, DEFAULT_COLOR, GeoFig, Polygon,
    annotations::write_annotations,
    commands::{annotate_file, bbox_on_file, polygon_on_file},
    defer_folder_removal,
    file_util::tmp_folder,
    image_util::{read_rgb8, save_image},
    tracing_setup::init_tracing_for_tests,
};
#[cfg(test)]
use image::{Rgb, RgbImage};

#[cfg(test)]
fn blank_image(folder: &Path, name: &str) -> PathBuf {
    let path = folder.join(name);
    save_image(&RgbImage::new(30, 30), &path).unwrap();
    path
}

#[test]
fn test_bbox_on_file() {
    init_tracing_for_tests();
    let folder = tmp_folder("test_bbox_on_file").unwrap();
    defer_folder_removal!(&folder);
    let input = blank_image(&folder, "blank.png");

    let out_xywh = folder.join("xywh.png");
    let coords = BoxCoords::parse("[5, 5, 10, 10]", BbFormat::Xywh).unwrap();
    bbox_on_file(&input, &out_xywh, &coords, DEFAULT_COLOR).unwrap();
    let out_xy = folder.join("xy.png");
    let coords = BoxCoords::parse("[[5, 5], [15, 15]]", BbFormat::Xy).unwrap();
    bbox_on_file(&input, &out_xy, &coords, DEFAULT_COLOR).unwrap();

    let im = read_rgb8(&out_xywh).unwrap();
    assert_eq!(im, read_rgb8(&out_xy).unwrap());
    for (x, y) in [(5, 5), (15, 15), (5, 15), (15, 5), (10, 5)] {
        assert_eq!(*im.get_pixel(x, y), DEFAULT_COLOR, "({x}, {y})");
    }
    assert_ne!(*im.get_pixel(10, 10), DEFAULT_COLOR);
    // the input stays untouched
    assert_eq!(read_rgb8(&input).unwrap(), RgbImage::new(30, 30));
}

#[test]
fn test_polygon_on_file() {
    init_tracing_for_tests();
    let folder = tmp_folder("test_polygon_on_file").unwrap();
    defer_folder_removal!(&folder);
    let input = blank_image(&folder, "blank.png");
    let output = folder.join("poly.png");
    let color = Rgb([0, 200, 100]);
    let polygon: Polygon = "[[0, 0], [10, 0], [10, 10], [0, 10]]".parse().unwrap();
    polygon_on_file(&input, &output, &polygon, color).unwrap();
    let im = read_rgb8(&output).unwrap();
    assert_eq!(*im.get_pixel(0, 5), color);
    assert_eq!(*im.get_pixel(10, 5), color);
    assert_ne!(*im.get_pixel(5, 5), color);
}

#[test]
fn test_annotate_file() {
    init_tracing_for_tests();
    let folder = tmp_folder("test_annotate_file").unwrap();
    defer_folder_removal!(&folder);
    let input = blank_image(&folder, "blank.png");
    let output = folder.join("annotated.png");
    let annotations = folder.join("annos.json");
    let green = Rgb([0, 255, 0]);
    let annos = vec![
        Annotation::new(
            GeoFig::BB(BoxCoords::parse("[20, 20, 5, 5]", BbFormat::Xywh).unwrap()),
            Some(green.0),
        ),
        Annotation::new(
            GeoFig::Poly("[[2, 2], [12, 2], [2, 12]]".parse().unwrap()),
            None,
        ),
    ];
    write_annotations(&annotations, &annos).unwrap();
    let default_color = Rgb([7, 7, 7]);
    annotate_file(&input, &output, &annotations, default_color).unwrap();
    let im = read_rgb8(&output).unwrap();
    assert_eq!(*im.get_pixel(20, 20), green);
    assert_eq!(*im.get_pixel(25, 25), green);
    assert_eq!(*im.get_pixel(2, 7), default_color);
    assert_eq!(*im.get_pixel(22, 22), Rgb([0, 0, 0]));

    assert!(annotate_file(&input, &output, &folder.join("missing.json"), green).is_err());
}

#[test]
fn test_missing_input() {
    init_tracing_for_tests();
    let folder = tmp_folder("test_missing_input").unwrap();
    defer_folder_removal!(&folder);
    let coords = BoxCoords::parse("[5, 5, 10, 10]", BbFormat::Xywh).unwrap();
    let res = bbox_on_file(
        &folder.join("missing.png"),
        &folder.join("out.png"),
        &coords,
        DEFAULT_COLOR,
    );
    assert!(res.is_err());
    assert!(!folder.join("out.png").exists());
}

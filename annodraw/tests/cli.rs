#[cfg(test)]
use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

#[cfg(test)]
use annolib::{
    defer_folder_removal,
    file_util::{self, tmp_folder},
    image_util::{read_rgb8, save_image},
    tracing_setup::init_tracing_for_tests,
};
#[cfg(test)]
use image::{Rgb, RgbImage};

#[cfg(test)]
fn write_test_cfg(folder: &Path, color: &str) -> PathBuf {
    let cfg_path = folder.join("annodraw_cfg.toml");
    file_util::write(
        &cfg_path,
        format!("color = {color}\nlog_level = \"debug\"\nlog_to_file = false\n"),
    )
    .unwrap();
    cfg_path
}

#[cfg(test)]
fn annodraw(cfg: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_annodraw"))
        .arg("--cfg")
        .arg(cfg)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_convert() {
    init_tracing_for_tests();
    let folder = tmp_folder("cli_test_convert").unwrap();
    defer_folder_removal!(&folder);
    let cfg = write_test_cfg(&folder, "[255, 0, 0]");

    let out = annodraw(&cfg, &["convert", "[[10, 20], [30, 50]]", "--format", "xy_to_xywh"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "[10, 20, 20, 30]");

    let out = annodraw(&cfg, &["convert", "[10, 20, 20, 30]", "--format", "XYWH_TO_XY"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "[[10, 20], [30, 50]]");

    let out = annodraw(&cfg, &["convert", "[10, 20, 20, 30]", "--format", "bogus"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("xy_to_xywh"));
}

#[test]
fn test_bbox_with_cfg_color() {
    init_tracing_for_tests();
    let folder = tmp_folder("cli_test_bbox").unwrap();
    defer_folder_removal!(&folder);
    let cfg = write_test_cfg(&folder, "[0, 0, 255]");
    let input = folder.join("in.png");
    save_image(&RgbImage::new(20, 20), &input).unwrap();
    let output = folder.join("out.png");
    let (input_s, output_s) = (input.to_str().unwrap(), output.to_str().unwrap());

    let out = annodraw(
        &cfg,
        &["bbox", input_s, output_s, "--coords", "[2, 2, 5, 5]", "--format", "xywh"],
    );
    assert!(out.status.success());
    let im = read_rgb8(&output).unwrap();
    assert_eq!(*im.get_pixel(2, 2), Rgb([0, 0, 255]));
    assert_eq!(*im.get_pixel(7, 7), Rgb([0, 0, 255]));

    let out = annodraw(
        &cfg,
        &[
            "polygon", input_s, output_s, "--points", "[[1, 1], [9, 1], [9, 9]]", "--color",
            "0,255,0",
        ],
    );
    assert!(out.status.success());
    let im = read_rgb8(&output).unwrap();
    assert_eq!(*im.get_pixel(5, 1), Rgb([0, 255, 0]));

    // unknown box formats are rejected
    let out = annodraw(
        &cfg,
        &["bbox", input_s, output_s, "--coords", "[2, 2, 5, 5]", "--format", "xyxy"],
    );
    assert!(!out.status.success());
    // wrong arity
    let out = annodraw(
        &cfg,
        &["bbox", input_s, output_s, "--coords", "[2, 2, 5]", "--format", "xywh"],
    );
    assert!(!out.status.success());
}

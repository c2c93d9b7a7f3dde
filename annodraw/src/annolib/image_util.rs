use annodraw_domain::{DrawResult, drawerr, to_draw};
use image::{DynamicImage, ImageReader, RgbImage};
use std::{fmt::Debug, path::Path};
use tracing::debug;

pub fn read_image<P>(path: P) -> DrawResult<DynamicImage>
where
    P: AsRef<Path> + Debug,
{
    ImageReader::open(&path)
        .map_err(|e| drawerr!("could not open image {:?}. {:?}", path, e))?
        .with_guessed_format()
        .map_err(to_draw)?
        .decode()
        .map_err(|e| drawerr!("could not decode image {:?}. {:?}", path, e))
}

/// Drawing happens in 8 bit RGB, other color types are converted.
pub fn read_rgb8<P>(path: P) -> DrawResult<RgbImage>
where
    P: AsRef<Path> + Debug,
{
    let im = read_image(&path)?;
    debug!("read {:?} with color type {:?}", path, im.color());
    Ok(im.into_rgb8())
}

/// The file type is derived from the extension of `path`.
pub fn save_image<P>(im: &RgbImage, path: P) -> DrawResult<()>
where
    P: AsRef<Path> + Debug,
{
    im.save(&path)
        .map_err(|e| drawerr!("could not save image to {:?}. {:?}", path, e))
}

#[cfg(test)]
use crate::{defer_folder_removal, file_util::tmp_folder};

#[test]
fn test_read_save() {
    use image::{GrayImage, Luma, Rgb};
    let folder = tmp_folder("image_util_test_read_save").unwrap();
    defer_folder_removal!(&folder);
    let mut im = RgbImage::new(4, 3);
    im.put_pixel(1, 2, Rgb([1, 2, 3]));
    let path = folder.join("im.png");
    save_image(&im, &path).unwrap();
    assert_eq!(read_rgb8(&path).unwrap(), im);

    let mut gray = GrayImage::new(2, 2);
    gray.put_pixel(0, 1, Luma([77]));
    let gray_path = folder.join("gray.png");
    gray.save(&gray_path).unwrap();
    let read = read_rgb8(&gray_path).unwrap();
    assert_eq!(*read.get_pixel(0, 1), Rgb([77, 77, 77]));

    assert!(read_image(folder.join("missing.png")).is_err());
    assert!(save_image(&im, folder.join("im.unknown_ext")).is_err());
}

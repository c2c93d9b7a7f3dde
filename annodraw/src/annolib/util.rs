use annodraw_domain::{DrawResult, drawerr};
use image::Rgb;

pub fn version_label() -> String {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_DESC: &str = env!("GIT_DESC");
    #[allow(clippy::const_is_empty)]
    if GIT_DESC.is_empty() {
        format!("Version {VERSION}")
    } else {
        const GIT_DIRTY: &str = env!("GIT_DIRTY");
        let is_dirty = GIT_DIRTY == "true";
        format!(
            "Version {VERSION} ({}{})",
            &GIT_DESC,
            if is_dirty { " DIRTY" } else { "" }
        )
    }
}

/// Parses `r,g,b` with each channel in `0..=255`.
pub fn parse_color(s: &str) -> DrawResult<Rgb<u8>> {
    let channels = s
        .split(',')
        .map(|c| {
            c.trim()
                .parse::<u8>()
                .map_err(|e| drawerr!(ShapeOrType, "could not parse color channel '{}', {}", c, e))
        })
        .collect::<DrawResult<Vec<_>>>()?;
    let channels: [u8; 3] = channels.try_into().map_err(|v: Vec<u8>| {
        drawerr!(
            ShapeOrType,
            "a color needs 3 channels, got {} in '{}'",
            v.len(),
            s
        )
    })?;
    Ok(Rgb(channels))
}

#[test]
fn test_parse_color() {
    use annodraw_domain::ErrorKind;
    assert_eq!(parse_color("255,0,0").unwrap(), Rgb([255, 0, 0]));
    assert_eq!(parse_color(" 1, 2 ,3").unwrap(), Rgb([1, 2, 3]));
    for s in ["1,2", "1,2,3,4", "256,0,0", "a,b,c", ""] {
        assert_eq!(parse_color(s).unwrap_err().kind(), ErrorKind::ShapeOrType, "{s}");
    }
}

#[test]
fn test_version_label() {
    assert!(version_label().starts_with("Version "));
}

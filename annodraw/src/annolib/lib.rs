#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod annotations;
pub mod cfg;
pub mod commands;
pub mod file_util;
pub mod image_util;
pub mod result;
pub mod tracing_setup;
pub mod util;
pub use annodraw_domain::{
    BbFormat, BoxCoords, Conversion, DEFAULT_COLOR, DrawError, DrawResult, ErrorKind, GeoFig,
    Polygon, convert_bbox_coords, draw_bbox, draw_polygon,
};
pub use annotations::Annotation;
pub use util::{parse_color, version_label};

use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

/// Distinguishes the failures callers may want to react to differently.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum ErrorKind {
    /// A format or conversion string is none of the accepted literals.
    InvalidFormatOption,
    /// Coordinates cannot be brought into the expected arity or numeric type.
    ShapeOrType,
    Other,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct DrawError {
    kind: ErrorKind,
    msg: String,
}
impl DrawError {
    pub fn new(msg: &str) -> DrawError {
        DrawError::with_kind(ErrorKind::Other, msg)
    }
    pub fn with_kind(kind: ErrorKind, msg: &str) -> DrawError {
        DrawError {
            kind,
            msg: msg.to_string(),
        }
    }
    pub fn msg(&self) -> &str {
        &self.msg
    }
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}
impl Display for DrawError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}
impl Error for DrawError {}
impl From<&str> for DrawError {
    fn from(value: &str) -> Self {
        DrawError::new(value)
    }
}
/// Result type of annodraw with [`DrawError`](DrawError) as error type.
pub type DrawResult<U> = Result<U, DrawError>;

/// Creates a [`DrawError`](DrawError) with a formatted message. An [`ErrorKind`](ErrorKind)
/// can be passed as first argument, the default is `ErrorKind::Other`.
/// ```rust
/// use annodraw_domain::{drawerr, DrawError, ErrorKind};
/// assert_eq!(drawerr!("some error {}", 1), DrawError::new("some error 1"));
/// assert_eq!(drawerr!(ShapeOrType, "bad").kind(), ErrorKind::ShapeOrType);
/// ```
#[macro_export]
macro_rules! drawerr {
    ($kind:ident, $s:literal) => {
        $crate::result::DrawError::with_kind(
            $crate::result::ErrorKind::$kind,
            format!($s).as_str(),
        )
    };
    ($kind:ident, $s:literal, $( $exps:expr ),*) => {
        $crate::result::DrawError::with_kind(
            $crate::result::ErrorKind::$kind,
            format!($s, $($exps,)*).as_str(),
        )
    };
    ($s:literal) => {
        $crate::result::DrawError::new(format!($s).as_str())
    };
    ($s:literal, $( $exps:expr ),*) => {
        $crate::result::DrawError::new(format!($s, $($exps,)*).as_str())
    }
}

pub fn to_draw<E: Debug>(e: E) -> DrawError {
    drawerr!(
        "original error type is '{:?}', error message is '{:?}'",
        std::any::type_name::<E>(),
        e
    )
}

#[test]
fn test_kinds() {
    let e = drawerr!(InvalidFormatOption, "format {} unknown", "bogus");
    assert_eq!(e.kind(), ErrorKind::InvalidFormatOption);
    assert_eq!(e.msg(), "format bogus unknown");
    assert_eq!(DrawError::from("x").kind(), ErrorKind::Other);
    let e = to_draw(std::io::Error::other("disk"));
    assert_eq!(e.kind(), ErrorKind::Other);
    assert!(e.msg().contains("disk"));
}

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub trait Calc:
    Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Sized
    + PartialOrd
    + From<i16>
    + Clone
    + Copy
{
}
impl<T> Calc for T where
    T: Add<Output = Self>
        + Sub<Output = Self>
        + Mul<Output = Self>
        + Div<Output = Self>
        + Sized
        + PartialOrd
        + From<i16>
        + Clone
        + Copy
{
}

pub fn min<T>(x1: T, x2: T) -> T
where
    T: PartialOrd,
{
    if x2 < x1 {
        x2
    } else {
        x1
    }
}
pub fn max<T>(x1: T, x2: T) -> T
where
    T: PartialOrd,
{
    if x2 > x1 {
        x2
    } else {
        x1
    }
}

/// Coerces a coordinate to a pixel index. Fractions are truncated toward zero, values
/// outside of the `i32` range saturate and NaN becomes 0.
#[must_use]
pub fn trunc_to_pixel(v: TPtF) -> TPtI {
    v as TPtI
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Add for Point<T>
where
    T: Calc,
{
    type Output = Point<T>;
    fn add(self, rhs: Self) -> Self::Output {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl<T> Sub for Point<T>
where
    T: Calc,
{
    type Output = Point<T>;
    fn sub(self, rhs: Self) -> Self::Output {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T> From<(T, T)> for Point<T>
where
    T: Calc,
{
    fn from(value: (T, T)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}
impl<T> From<Point<T>> for (T, T)
where
    T: Calc,
{
    fn from(p: Point<T>) -> (T, T) {
        (p.x, p.y)
    }
}
impl<T> From<[T; 2]> for Point<T>
where
    T: Calc,
{
    fn from(a: [T; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }
}
impl<T> From<Point<T>> for [T; 2]
where
    T: Calc,
{
    fn from(p: Point<T>) -> Self {
        [p.x, p.y]
    }
}

pub type TPtF = f64;
pub type TPtI = i32;
pub type PtF = Point<TPtF>;
pub type PtI = Point<TPtI>;

impl PtF {
    /// Pixel position with each component truncated independently.
    #[must_use]
    pub fn trunc(&self) -> PtI {
        PtI {
            x: trunc_to_pixel(self.x),
            y: trunc_to_pixel(self.y),
        }
    }
}
impl From<PtI> for (f32, f32) {
    fn from(p: PtI) -> Self {
        (p.x as f32, p.y as f32)
    }
}

#[test]
fn test_trunc() {
    assert_eq!(trunc_to_pixel(2.9), 2);
    assert_eq!(trunc_to_pixel(-2.9), -2);
    assert_eq!(trunc_to_pixel(f64::NAN), 0);
    assert_eq!(trunc_to_pixel(1e12), i32::MAX);
    let p = PtF { x: 5.7, y: 0.2 };
    assert_eq!(p.trunc(), PtI { x: 5, y: 0 });
    let p: (f32, f32) = PtI { x: 3, y: 4 }.into();
    assert_eq!(p, (3.0, 4.0));
}

#[test]
fn test_arith() {
    let p1: PtF = (1.5, 2.0).into();
    let p2: PtF = [0.5, 1.0].into();
    assert_eq!(p1 + p2, PtF { x: 2.0, y: 3.0 });
    assert_eq!(p1 - p2, PtF { x: 1.0, y: 1.0 });
    assert_eq!(min(1, 2), 1);
    assert_eq!(max(1.0, 2.0), 2.0);
    let a: [f64; 2] = p1.into();
    assert_eq!(a, [1.5, 2.0]);
}

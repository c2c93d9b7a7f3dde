use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::core::{PtF, TPtF};
use crate::{
    drawerr,
    result::{DrawError, DrawResult},
};

/// Closed polygon. The order of the points defines the edges, the edge from the last
/// to the first point is implicit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    points: Vec<PtF>,
}

impl Polygon {
    pub fn from_vec(points: Vec<PtF>) -> Self {
        Self { points }
    }
    /// Interleaved coordinates `x1, y1, x2, y2, ...`
    pub fn from_flat(values: &[TPtF]) -> DrawResult<Self> {
        if values.len() % 2 != 0 {
            return Err(drawerr!(
                ShapeOrType,
                "cannot reshape {} values into (N, 1, 2) polygon points",
                values.len()
            ));
        }
        Ok(Self {
            points: values
                .chunks_exact(2)
                .map(|xy| PtF { x: xy[0], y: xy[1] })
                .collect(),
        })
    }
    pub fn points(&self) -> &[PtF] {
        &self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Pairs of consecutive points including the closing edge from the last point back
    /// to the first one. A single point yields one degenerate edge.
    #[allow(clippy::needless_lifetimes)]
    pub fn lineseg_iter<'a>(&'a self) -> impl Iterator<Item = (PtF, PtF)> + 'a {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

impl From<Vec<[TPtF; 2]>> for Polygon {
    fn from(points: Vec<[TPtF; 2]>) -> Self {
        Self::from_vec(points.into_iter().map(PtF::from).collect())
    }
}

impl FromStr for Polygon {
    type Err = DrawError;
    /// `[[x1, y1], [x2, y2], ...]`
    fn from_str(s: &str) -> DrawResult<Self> {
        let points = serde_json::from_str::<Vec<[TPtF; 2]>>(s).map_err(|e| {
            drawerr!(
                ShapeOrType,
                "could not parse '{}' into polygon points, {}",
                s,
                e
            )
        })?;
        Ok(points.into())
    }
}

#[cfg(test)]
use crate::result::ErrorKind;

#[test]
fn test_from_flat() {
    let poly = Polygon::from_flat(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]).unwrap();
    assert_eq!(poly.len(), 3);
    assert_eq!(poly.points()[1], PtF { x: 10.0, y: 0.0 });
    let e = Polygon::from_flat(&[0.0, 0.0, 10.0]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::ShapeOrType);
    assert!(Polygon::from_flat(&[]).unwrap().is_empty());
}

#[test]
fn test_from_str() {
    let poly: Polygon = "[[0, 0], [10, 0], [10, 10], [0, 10]]".parse().unwrap();
    assert_eq!(
        poly,
        Polygon::from(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]])
    );
    for s in ["[0, 0, 10, 0]", "[[0, 0, 1]]", "[[0, \"x\"]]", "polygon"] {
        let e = s.parse::<Polygon>().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ShapeOrType);
    }
}

#[test]
fn test_linesegs() {
    let poly = Polygon::from(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]);
    let segs = poly.lineseg_iter().collect::<Vec<_>>();
    assert_eq!(segs.len(), 4);
    assert_eq!(
        segs[3],
        (PtF { x: 0.0, y: 10.0 }, PtF { x: 0.0, y: 0.0 })
    );
    let single = Polygon::from(vec![[3.0, 4.0]]);
    assert_eq!(
        single.lineseg_iter().collect::<Vec<_>>(),
        vec![(PtF { x: 3.0, y: 4.0 }, PtF { x: 3.0, y: 4.0 })]
    );
    assert_eq!(Polygon::default().lineseg_iter().count(), 0);
    assert_eq!(poly.len(), 4);
}

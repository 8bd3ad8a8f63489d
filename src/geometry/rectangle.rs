use std::fmt::Display;
use std::ops::{Add, BitAnd, BitOr, Sub};
use std::str::FromStr;

use super::{parse_fields, Point, Size};
use crate::error::Error;

/// An axis-aligned region with a signed origin and an unsigned extent.
///
/// A rectangle with zero width or zero height is empty. `(0, 0, 0, 0)` is the
/// canonical empty rectangle returned by [`BitAnd`] when the operands do not
/// overlap, so the origin of an empty result carries no meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from two opposite corners.
    ///
    /// The origin is always `first`; the extent is the absolute distance to
    /// `second`. The corners are not reordered, so `from_points(b, a)` has a
    /// different origin than `from_points(a, b)`.
    pub fn from_points(first: Point, second: Point) -> Self {
        Rectangle {
            x: first.x,
            y: first.y,
            width: (second.x as i64 - first.x as i64).unsigned_abs() as u32,
            height: (second.y as i64 - first.y as i64).unsigned_abs() as u32,
        }
    }

    /// Builds a rectangle spanning the exclusive bounds `[x1, x2) x [y1, y2)`.
    fn from_bounds(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Rectangle {
            x: saturate_i32(x1),
            y: saturate_i32(y1),
            width: saturate_u32(x2 - x1),
            height: saturate_u32(y2 - y1),
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right bound.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom bound.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains_point(&self, point: Point) -> bool {
        let (x, y) = (point.x as i64, point.y as i64);
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }

    /// True if every point of `other` lies inside `self`.
    ///
    /// An empty `other` is contained in any rectangle.
    pub fn contains(&self, other: &Rectangle) -> bool {
        if other.is_empty() {
            return true;
        }
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn saturate_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

impl Add<Point> for Rectangle {
    type Output = Self;

    fn add(self, p: Point) -> Self::Output {
        Rectangle {
            x: self.x.saturating_add(p.x),
            y: self.y.saturating_add(p.y),
            ..self
        }
    }
}

impl Sub<Point> for Rectangle {
    type Output = Self;

    fn sub(self, p: Point) -> Self::Output {
        Rectangle {
            x: self.x.saturating_sub(p.x),
            y: self.y.saturating_sub(p.y),
            ..self
        }
    }
}

impl BitAnd for Rectangle {
    type Output = Self;

    fn bitand(self, other: Self) -> Self::Output {
        let x1 = (self.x as i64).max(other.x as i64);
        let y1 = (self.y as i64).max(other.y as i64);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x1 < x2 && y1 < y2 {
            Rectangle::from_bounds(x1, y1, x2, y2)
        } else {
            Rectangle::default()
        }
    }
}

impl BitOr for Rectangle {
    type Output = Self;

    fn bitor(self, other: Self) -> Self::Output {
        let x1 = (self.x as i64).min(other.x as i64);
        let y1 = (self.y as i64).min(other.y as i64);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Rectangle::from_bounds(x1, y1, x2, y2)
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}

impl FromStr for Rectangle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y, width, height] = parse_fields::<i64, 4>(
            s,
            [
                "Rectangle X",
                "Rectangle Y",
                "Rectangle Width",
                "Rectangle Height",
            ],
        )?;
        Ok(Rectangle {
            x: i32::try_from(x).map_err(|_| Error::ParsingOfTokenFailed("Rectangle X"))?,
            y: i32::try_from(y).map_err(|_| Error::ParsingOfTokenFailed("Rectangle Y"))?,
            width: u32::try_from(width)
                .map_err(|_| Error::ParsingOfTokenFailed("Rectangle Width"))?,
            height: u32::try_from(height)
                .map_err(|_| Error::ParsingOfTokenFailed("Rectangle Height"))?,
        })
    }
}

use std::ops::{Add, Sub};

use super::Image;
use crate::error::Error;

impl Image {
    fn zip_with(&self, other: &Image, op: fn(u8, u8) -> u8) -> crate::Result<Image> {
        if self.size() != other.size() {
            return Err(Error::ShapeMismatch(self.size(), other.size()));
        }
        Ok(Image {
            width: self.width,
            height: self.height,
            samples: self
                .samples
                .iter()
                .zip(other.samples.iter())
                .map(|(&a, &b)| op(a, b))
                .collect(),
        })
    }

    /// Sample-wise addition, clamped at 255.
    pub fn checked_add(&self, other: &Image) -> crate::Result<Image> {
        self.zip_with(other, u8::saturating_add)
    }

    /// Sample-wise subtraction, clamped at 0.
    pub fn checked_sub(&self, other: &Image) -> crate::Result<Image> {
        self.zip_with(other, u8::saturating_sub)
    }
}

impl Add for &Image {
    type Output = crate::Result<Image>;

    fn add(self, other: Self) -> Self::Output {
        self.checked_add(other)
    }
}

impl Sub for &Image {
    type Output = crate::Result<Image>;

    fn sub(self, other: Self) -> Self::Output {
        self.checked_sub(other)
    }
}

#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::geometry::Size;
    use crate::image::Image;

    fn sample_image() -> Image {
        Image::from_vec(2, 2, vec![10, 20, 30, 40]).unwrap()
    }

    #[test]
    fn add_saturates() {
        let result = (&sample_image() + &Image::ones(2, 2)).unwrap();
        assert_eq!(result, Image::ones(2, 2));

        let a = Image::from_vec(3, 1, vec![200, 1, 0]).unwrap();
        let b = Image::from_vec(3, 1, vec![100, 2, 0]).unwrap();
        assert_eq!(a.checked_add(&b).unwrap().as_slice(), &[255, 3, 0]);
    }

    #[test]
    fn subtract_saturates() {
        let result = (&Image::ones(2, 2) - &sample_image()).unwrap();
        assert_eq!(result.as_slice(), &[245, 235, 225, 215]);

        let a = Image::from_vec(3, 1, vec![50, 7, 0]).unwrap();
        let b = Image::from_vec(3, 1, vec![100, 2, 255]).unwrap();
        assert_eq!(a.checked_sub(&b).unwrap().as_slice(), &[0, 5, 0]);
    }

    #[test]
    fn operands_are_untouched() {
        let a = sample_image();
        let b = Image::ones(2, 2);
        let _ = (&a + &b).unwrap();
        let _ = (&a - &b).unwrap();
        assert_eq!(a, sample_image());
        assert_eq!(b, Image::ones(2, 2));
    }

    #[test]
    fn shape_mismatch() {
        let a = Image::zeros(2, 2);
        let b = Image::zeros(2, 3);
        match &a + &b {
            Err(Error::ShapeMismatch(left, right)) => {
                assert_eq!(left, Size::new(2, 2));
                assert_eq!(right, Size::new(2, 3));
            }
            other => panic!("Shape mismatch not detected: {:?}", other),
        }
        assert!(a.checked_sub(&Image::zeros(3, 2)).is_err());
        assert!(a.checked_sub(&Image::default()).is_err());
    }

    #[test]
    fn empty_operands() {
        let empty = Image::default();
        assert!((&empty + &empty).unwrap().is_empty());
    }
}

use std::fmt::Display;

/// Width and height of an image, detached from the image itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of samples covered, `None` if a buffer of that many bytes
    /// could not be allocated (more than `isize::MAX`).
    pub fn checked_area(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .filter(|&area| area <= isize::MAX as usize)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Size { width, height }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod test {
    use super::Size;

    #[test]
    fn area_and_emptiness() {
        let size = Size::new(7, 3);
        assert_eq!(size.area(), 21);
        assert!(!size.is_empty());
        assert!(Size::new(0, 3).is_empty());
        assert_eq!(Size::default(), Size::from((0, 0)));
    }

    #[test]
    fn area_of_largest_size() {
        let size = Size::new(u32::MAX, u32::MAX);
        assert_eq!(size.area(), u32::MAX as u64 * u32::MAX as u64);
        assert_eq!(size.checked_area(), None);
        assert_eq!(Size::new(u32::MAX, 1).checked_area(), Some(u32::MAX as usize));
    }

    #[test]
    fn display() {
        assert_eq!(Size::new(640, 480).to_string(), "640x480");
    }
}

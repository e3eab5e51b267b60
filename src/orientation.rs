//! Screen orientation and its memory access control (MADCTR) mapping

use crate::register::{MADCTR_MV, MADCTR_MX, MADCTR_MY};
use crate::Error;
use core::str::FromStr;

/// Rotation of the displayed image, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// native panel orientation
    #[default]
    Deg0,
    /// rows and columns exchanged, columns mirrored
    Deg90,
    /// upside down
    Deg180,
    /// rows and columns exchanged, rows mirrored
    Deg270,
}

impl Orientation {
    /// Value of the MADCTR data byte
    pub fn madctr(self) -> u8 {
        match self {
            Orientation::Deg0 => 0x00,
            Orientation::Deg90 => MADCTR_MV | MADCTR_MX,
            Orientation::Deg180 => MADCTR_MY | MADCTR_MX,
            Orientation::Deg270 => MADCTR_MV | MADCTR_MY,
        }
    }

    /// Rotation in degrees
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// true if the controller exchanges rows and columns
    pub fn is_landscape(self) -> bool {
        self.madctr() & MADCTR_MV != 0
    }
}

impl TryFrom<u16> for Orientation {
    type Error = Error;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Orientation::Deg0),
            90 => Ok(Orientation::Deg90),
            180 => Ok(Orientation::Deg180),
            270 => Ok(Orientation::Deg270),
            other => Err(Error::InvalidOrientation(other)),
        }
    }
}

/// Accepts "0", "90", "180" and "270", optionally prefixed with '_'
impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('_').unwrap_or(s);
        let degrees = digits
            .parse::<u16>()
            .map_err(|_| Error::InvalidOrientationName)?;
        Orientation::try_from(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::{_MADCTR_ML, _MADCTR_RGB};

    #[test]
    fn madctr_values() {
        assert_eq!(Orientation::Deg0.madctr(), 0x00);
        assert_eq!(Orientation::Deg90.madctr(), 0x60);
        assert_eq!(Orientation::Deg180.madctr(), 0xC0);
        assert_eq!(Orientation::Deg270.madctr(), 0xA0);
    }

    #[test]
    fn madctr_keeps_rgb_order_and_refresh_direction() {
        for orientation in [
            Orientation::Deg0,
            Orientation::Deg90,
            Orientation::Deg180,
            Orientation::Deg270,
        ] {
            assert_eq!(orientation.madctr() & (_MADCTR_RGB | _MADCTR_ML), 0);
        }
    }

    #[test]
    fn landscape() {
        assert!(!Orientation::Deg0.is_landscape());
        assert!(Orientation::Deg90.is_landscape());
        assert!(!Orientation::Deg180.is_landscape());
        assert!(Orientation::Deg270.is_landscape());
    }

    #[test]
    fn from_degrees() {
        for orientation in [
            Orientation::Deg0,
            Orientation::Deg90,
            Orientation::Deg180,
            Orientation::Deg270,
        ] {
            assert_eq!(Orientation::try_from(orientation.degrees()), Ok(orientation));
        }
        assert_eq!(Orientation::try_from(45u16), Err(Error::InvalidOrientation(45)));
        assert_eq!(Orientation::try_from(360u16), Err(Error::InvalidOrientation(360)));
    }

    #[test]
    fn from_str() {
        assert_eq!("_90".parse::<Orientation>(), Ok(Orientation::Deg90));
        assert_eq!("270".parse::<Orientation>(), Ok(Orientation::Deg270));
        assert_eq!("_0".parse::<Orientation>(), Ok(Orientation::Deg0));
        assert_eq!(
            "_45".parse::<Orientation>(),
            Err(Error::InvalidOrientation(45))
        );
        assert_eq!(
            "sideways".parse::<Orientation>(),
            Err(Error::InvalidOrientationName)
        );
    }
}

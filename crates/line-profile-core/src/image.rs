use crate::error::ProfileError;

/// Memory layout of the three channels inside an interleaved pixel triple.
///
/// Decoded buffers arrive in whatever order the codec produced; keeping the
/// order as an explicit tag at the view boundary avoids silent channel-swap
/// bugs when wiring up a new source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Triples stored as `[r, g, b]` (the `image` crate's `RgbImage` layout).
    Rgb,
    /// Triples stored as `[b, g, r]` (OpenCV-style buffers).
    Bgr,
}

/// A pixel's channel intensities, always in red/green/blue order regardless
/// of the source layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Borrowed view over a row-major interleaved 3-channel pixel buffer.
///
/// `data` holds `width * height` consecutive 3-byte triples, rows first.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    width: usize,
    height: usize,
    order: ChannelOrder,
    data: &'a [u8],
}

impl<'a> RgbImageView<'a> {
    /// Wrap an interleaved buffer, validating its length against the
    /// declared dimensions.
    pub fn new(
        width: usize,
        height: usize,
        order: ChannelOrder,
        data: &'a [u8],
    ) -> Result<Self, ProfileError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(ProfileError::InvalidBuffer {
                expected: usize::MAX,
                got: data.len(),
            })?;
        if data.len() != expected {
            return Err(ProfileError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    /// True if `(x, y)` addresses a pixel inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Read the channel triple at `(x, y)`, normalised to red/green/blue.
    pub fn rgb_at(&self, x: i32, y: i32) -> Result<Rgb, ProfileError> {
        if !self.contains(x, y) {
            return Err(ProfileError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = (y as usize * self.width + x as usize) * 3;
        let triple = &self.data[idx..idx + 3];
        Ok(match self.order {
            ChannelOrder::Rgb => Rgb {
                r: triple[0],
                g: triple[1],
                b: triple[2],
            },
            ChannelOrder::Bgr => Rgb {
                r: triple[2],
                g: triple[1],
                b: triple[0],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelOrder, RgbImageView};
    use crate::error::ProfileError;

    #[test]
    fn rejects_mismatched_buffer_length() {
        let data = vec![0u8; 11];
        let err = RgbImageView::new(2, 2, ChannelOrder::Rgb, &data).unwrap_err();
        assert_eq!(
            err,
            ProfileError::InvalidBuffer {
                expected: 12,
                got: 11
            }
        );
    }

    #[test]
    fn reads_triples_in_both_orders() {
        let data = [10u8, 20, 30, 40, 50, 60];

        let rgb = RgbImageView::new(2, 1, ChannelOrder::Rgb, &data).unwrap();
        let px = rgb.rgb_at(1, 0).unwrap();
        assert_eq!((px.r, px.g, px.b), (40, 50, 60));

        let bgr = RgbImageView::new(2, 1, ChannelOrder::Bgr, &data).unwrap();
        let px = bgr.rgb_at(0, 0).unwrap();
        assert_eq!((px.r, px.g, px.b), (30, 20, 10));
    }

    #[test]
    fn out_of_range_lookup_fails() {
        let data = vec![0u8; 12];
        let view = RgbImageView::new(2, 2, ChannelOrder::Rgb, &data).unwrap();
        assert!(view.rgb_at(1, 1).is_ok());
        assert!(matches!(
            view.rgb_at(2, 0),
            Err(ProfileError::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(matches!(
            view.rgb_at(0, -1),
            Err(ProfileError::OutOfBounds { .. })
        ));
    }
}

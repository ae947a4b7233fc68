use crate::Error;
use crate::image::{ImageView, ImageViewMut};

/// Owned channel-major pixel buffer: `channels` row-major planes of
/// `width x height` samples, stored back to back.
///
/// This is the in-memory shape the processing pipeline consumes and produces.
/// Channel planes are tightly packed (`stride == width`).
#[derive(Debug, Clone, PartialEq)]
pub struct Planar<T> {
    channels: usize,
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Planar<T> {
    pub fn from_vec(
        channels: usize,
        width: usize,
        height: usize,
        data: Vec<T>,
    ) -> Result<Self, Error> {
        let expected = channels
            .checked_mul(width)
            .and_then(|v| v.checked_mul(height))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            channels,
            width,
            height,
            data,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Borrows channel `c` as a read-only 2-D view.
    pub fn channel(&self, c: usize) -> ImageView<'_, T> {
        assert!(c < self.channels, "channel index out of bounds");
        let plane = self.width * self.height;
        let slice = &self.data[c * plane..(c + 1) * plane];
        ImageView::from_slice(self.width, self.height, self.width, slice)
            .expect("plane layout is validated at construction")
    }

    /// Borrows channel `c` as a mutable 2-D view.
    pub fn channel_mut(&mut self, c: usize) -> ImageViewMut<'_, T> {
        assert!(c < self.channels, "channel index out of bounds");
        let plane = self.width * self.height;
        let slice = &mut self.data[c * plane..(c + 1) * plane];
        ImageViewMut::from_slice_mut(self.width, self.height, self.width, slice)
            .expect("plane layout is validated at construction")
    }

    /// Splits the buffer into one mutable row-major plane slice per channel.
    pub fn planes_mut(&mut self) -> Vec<&mut [T]> {
        let plane = self.width * self.height;
        self.data.chunks_mut(plane).collect()
    }
}

impl<T: Clone> Planar<T> {
    pub fn new_fill(channels: usize, width: usize, height: usize, value: T) -> Self {
        let len = channels
            .checked_mul(width)
            .and_then(|v| v.checked_mul(height))
            .expect("planar buffer size overflow");
        Self {
            channels,
            width,
            height,
            data: vec![value; len],
        }
    }
}

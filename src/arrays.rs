use crate::common::{check_dimensions, Error};
use aligned_vec::{AVec, ConstAlign};
use std::ops::{Index, IndexMut};

const ALIGN: usize = 64;

/// Types for which the all-zero bit pattern is a valid value equal to zero.
///
/// # Safety
/// Implementors must be plain integers without padding or niches.
pub unsafe trait ZeroBits: Copy {}
unsafe impl ZeroBits for u8 {}
unsafe impl ZeroBits for u16 {}
unsafe impl ZeroBits for u32 {}
unsafe impl ZeroBits for i32 {}
unsafe impl ZeroBits for i64 {}
unsafe impl ZeroBits for usize {}

/// Row-major 2-D buffer with no stride or padding between rows.
///
/// Index `i` corresponds to `(x = i % width, y = i / width)`, so `width` is the number of
/// columns and `height` the number of rows.
#[derive(Debug)]
pub struct Array2D<T> {
    pub data: AVec<T, ConstAlign<ALIGN>>,
    pub width: usize,
    pub height: usize,
}

impl<T> Array2D<T> {
    pub fn from_slice(data: &[T], width: usize, height: usize) -> Result<Self, Error>
    where
        T: Clone,
    {
        check_dimensions(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data: AVec::from_slice(ALIGN, data),
        })
    }

    pub fn from_fill(value: T, width: usize, height: usize) -> Self
    where
        T: Clone + Copy,
    {
        let data: AVec<T, ConstAlign<ALIGN>> =
            AVec::from_iter(ALIGN, (0..width * height).map(|_| value));
        Self {
            width,
            height,
            data,
        }
    }

    /// Zero-initialized array allocated in one step.
    ///
    /// Aborts through `std::alloc::handle_alloc_error` when the allocation fails.
    pub fn zeroed(width: usize, height: usize) -> Self
    where
        T: ZeroBits,
    {
        Self {
            width,
            height,
            data: avec_fill_zeros(width * height),
        }
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    pub fn get_row(&self, row: usize) -> &[T] {
        debug_assert!(row < self.height);
        &self.data[(self.width * row)..(self.width * row + self.width)]
    }

    pub fn get_row_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(row < self.height);
        &mut self.data[(self.width * row)..(self.width * row + self.width)]
    }

    #[inline(always)]
    pub fn get_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            self.width > x,
            "Index ({x}, {y}) is out of bounds ({}, {})",
            self.width,
            self.height
        );
        debug_assert!(
            self.height > y,
            "Index ({x}, {y}) is out of bounds ({}, {})",
            self.width,
            self.height
        );
        self.width * y + x
    }

    #[inline(always)]
    pub fn get_x_y_index(&self, ind: usize) -> (usize, usize) {
        debug_assert!(ind < self.data.len());
        let y = ind / self.width;
        let x = ind % self.width;
        (x, y)
    }
}

impl<T> Index<(usize, usize)> for Array2D<T> {
    type Output = T;
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.data[self.get_index(x, y)]
    }
}
impl<T> IndexMut<(usize, usize)> for Array2D<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        let idx = self.get_index(x, y);
        &mut self.data[idx]
    }
}

#[inline(always)]
fn avec_fill_zeros<T: ZeroBits>(size: usize) -> AVec<T, ConstAlign<ALIGN>> {
    let size_of = std::mem::size_of::<T>();
    let size_bytes = match size.checked_mul(size_of) {
        Some(size_bytes) => size_bytes,
        None => panic!(
            "Number of elements {} overflowed u64 when size is in bytes. Can't allocate!",
            size
        ),
    };
    if size_bytes == 0 {
        return AVec::new(ALIGN);
    }
    let will_overflow = size_bytes > usize::MAX - (ALIGN - 1);
    let is_invalid_alloc = size_bytes > isize::MAX as usize;
    if will_overflow || is_invalid_alloc {
        panic!(
            "Number of elements {} of {} bytes can't be allocated!",
            size, size_bytes
        )
    }
    let layout = match std::alloc::Layout::from_size_align(size_bytes, ALIGN) {
        Ok(layout) => layout,
        Err(_) => panic!("Creation of layout for {size_bytes} bytes aligned to {ALIGN} failed!"),
    };
    let ptr_b = unsafe { std::alloc::alloc_zeroed(layout) };
    if ptr_b.is_null() {
        std::alloc::handle_alloc_error(layout);
    }
    // SAFETY: the block is zeroed, sized for `size` elements and aligned to `ALIGN`, which is
    // exactly what `AVec` would have allocated. Zero bits are a valid `T` by `ZeroBits`.
    unsafe { AVec::from_raw_parts(ptr_b as *mut T, ALIGN, size, size) }
}

#[cfg(test)]
mod tests {
    use super::Array2D;
    use crate::common::Error;

    #[test]
    fn array2d_index_test() {
        let mut arr: Array2D<i64> = Array2D::zeroed(1920, 1080);
        assert_eq!(arr.len(), 1920 * 1080);
        assert!(arr.as_slice().iter().all(|v| *v == 0));
        assert_eq!((155, 560), arr.get_x_y_index(arr.get_index(155, 560)));
        arr[(3, 2)] = 7;
        assert_eq!(arr.as_slice()[2 * 1920 + 3], 7);
        assert_eq!(arr.get_row(2)[3], 7);
        arr.get_row_mut(1)[0] = -1;
        assert_eq!(arr[(0, 1)], -1);
        arr.fill(5);
        assert!(arr.as_slice().iter().all(|v| *v == 5));
    }

    #[test]
    fn array2d_from_slice_test() {
        let arr = Array2D::from_slice(&[0u8, 1, 2, 3, 4, 5], 3, 2).unwrap();
        assert_eq!(arr[(2, 0)], 2);
        assert_eq!(arr[(0, 1)], 3);
        assert_eq!(
            Array2D::from_slice(&[0u8, 1, 2], 2, 2).unwrap_err(),
            Error::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn array2d_from_slice_overflowing_dimensions() {
        let empty: [u8; 0] = [];
        assert_eq!(
            Array2D::from_slice(&empty, 2, 1 << (usize::BITS - 1)).unwrap_err(),
            Error::DimensionMismatch {
                expected: usize::MAX,
                actual: 0
            }
        );
    }

    #[test]
    fn array2d_zeroed_empty() {
        let arr: Array2D<u8> = Array2D::zeroed(0, 5);
        assert!(arr.is_empty());
    }
}

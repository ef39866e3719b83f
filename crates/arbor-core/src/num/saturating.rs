// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! Saturating counters.
//!
//! Statistics are plain unsigned integers bumped from hot loops. The
//! `SaturatingCounter` trait gives them a by-value API that clamps at
//! `MAX` rather than wrapping (release) or panicking (debug).

/// By-value saturating increments for unsigned counters.
///
/// # Examples
///
/// ```rust
/// # use arbor_core::num::saturating::SaturatingCounter;
/// let hits: u8 = 254;
/// assert_eq!(hits.saturating_inc(), 255);
/// assert_eq!(hits.saturating_inc().saturating_inc(), 255);
/// assert_eq!(250u8.saturating_add_val(10), 255);
/// ```
pub trait SaturatingCounter: Sized + Copy {
    /// Adds `v`, clamping at the type's maximum.
    fn saturating_add_val(self, v: Self) -> Self;

    /// Adds one, clamping at the type's maximum.
    fn saturating_inc(self) -> Self;
}

macro_rules! impl_saturating_counter {
    ($($t:ty),* $(,)?) => {
        $(
            impl SaturatingCounter for $t {
                #[inline(always)]
                fn saturating_add_val(self, v: Self) -> Self {
                    <$t>::saturating_add(self, v)
                }

                #[inline(always)]
                fn saturating_inc(self) -> Self {
                    <$t>::saturating_add(self, 1)
                }
            }
        )*
    };
}

impl_saturating_counter!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_below_max() {
        assert_eq!(0u64.saturating_inc(), 1);
        assert_eq!(41usize.saturating_inc(), 42);
    }

    #[test]
    fn test_inc_clamps_at_max() {
        assert_eq!(u32::MAX.saturating_inc(), u32::MAX);
        assert_eq!(u64::MAX.saturating_inc(), u64::MAX);
    }

    #[test]
    fn test_add_val_clamps() {
        assert_eq!(10u16.saturating_add_val(5), 15);
        assert_eq!((u16::MAX - 1).saturating_add_val(5), u16::MAX);
    }
}

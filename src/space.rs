//! Space types that fix the inline capacity of [`InlineErasedBox`](crate::InlineErasedBox).
//!
//! Any `Sized` type works as a space: its size is the capacity and its alignment is the
//! maximum alignment of a model stored inline.

/// Space of 1 `usize`
pub type S1 = [usize; 1];
/// Space of 2 `usize`s
pub type S2 = [usize; 2];
/// Space of 4 `usize`s
pub type S4 = [usize; 4];
/// Space of 8 `usize`s
pub type S8 = [usize; 8];
/// Space of 16 `usize`s
pub type S16 = [usize; 16];
/// Space of 32 `usize`s
pub type S32 = [usize; 32];
/// Space of 64 `usize`s
pub type S64 = [usize; 64];

/// Raises the alignment of `Space` to 16 bytes without changing its capacity
/// (beyond rounding up to a multiple of 16).
#[repr(C, align(16))]
pub struct Aligned16<Space> {
    _space: Space,
}

/// 128 bytes aligned to 16, independent of the target's pointer width.
pub type DefaultSpace = Aligned16<[u8; 128]>;

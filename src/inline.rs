use alloc::string::String;
use core::any::type_name;
use core::cell::UnsafeCell;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, align_of, size_of, MaybeUninit};
use core::ptr;

use crate::error::CapacityError;
use crate::model::{Concept, Model};
use crate::space::DefaultSpace;
use crate::strategy::{DrawStrategy, SerializeStrategy};

/// Recovers the erased model that starts at `base`.
fn concept_of<M: Concept + 'static>(base: *mut u8) -> *mut dyn Concept {
    base.cast::<M>()
}

/// A type-erased shape whose model lives inline, inside the box itself.
///
/// The model (the shape plus its draw and serialize strategies) is placed in a buffer with the
/// size and alignment of `Space`. Constructing, cloning and dropping never allocate. A model
/// that does not fit is rejected before anything is written: at compile time by [`new`], at
/// run time by [`try_new`].
///
/// Moving an `InlineErasedBox` copies the whole buffer. It is not cheaper than the storage side
/// of a clone; use [`HeapErasedBox`](crate::HeapErasedBox) when values are moved around a lot
/// and the allocation per clone is acceptable.
///
/// [`new`]: InlineErasedBox::new
/// [`try_new`]: InlineErasedBox::try_new
pub struct InlineErasedBox<Space = DefaultSpace> {
    // Strategies may mutate themselves through `&self` (`Cell`, `RefCell`), so the buffer is
    // reached through `UnsafeCell` even from shared references.
    space: UnsafeCell<MaybeUninit<Space>>,
    // Set once, from the concrete model type, when the buffer is first written.
    concept: fn(*mut u8) -> *mut dyn Concept,
    // The payload may be `!Send`/`!Sync`.
    _marker: PhantomData<*const ()>,
}

impl<Space> InlineErasedBox<Space> {
    /// Places `shape` and its strategies inline.
    ///
    /// The capacity check happens at compile time; a model that does not fit `Space` fails to
    /// build:
    ///
    /// ```compile_fail
    /// use shapebox::InlineErasedBox;
    /// use shapebox::space::S1;
    ///
    /// let _ = InlineErasedBox::<S1>::new([0u8; 64], |_: &[u8; 64]| {}, |_: &[u8; 64]| String::new());
    /// ```
    ///
    /// # Example
    ///
    /// ```
    /// use shapebox::InlineErasedBox;
    ///
    /// let circle: InlineErasedBox = InlineErasedBox::new(
    ///     2.3f64,
    ///     |radius: &f64| println!("circle: radius={radius}"),
    ///     |radius: &f64| format!("circle:{radius}"),
    /// );
    ///
    /// circle.draw();
    /// assert_eq!(circle.serialize(), "circle:2.3");
    /// ```
    pub fn new<T, D, S>(shape: T, drawer: D, serializer: S) -> Self
    where
        T: Clone + 'static,
        D: DrawStrategy<T> + Clone + 'static,
        S: SerializeStrategy<T> + Clone + 'static,
    {
        const {
            assert!(
                Self::fits::<T, D, S>(),
                "shape model is too large or over-aligned for the inline space of `InlineErasedBox`"
            );
        }
        // SAFETY: the model fits, checked above.
        unsafe { Self::new_unchecked(Model::new(shape, drawer, serializer)) }
    }

    /// Places `shape` and its strategies inline, or hands them back in the error when the
    /// model does not fit `Space`.
    ///
    /// # Example
    ///
    /// ```
    /// use shapebox::InlineErasedBox;
    /// use shapebox::space::S1;
    ///
    /// let fit = InlineErasedBox::<S1>::try_new(1u32, |_: &u32| {}, |n: &u32| n.to_string());
    /// assert!(fit.is_ok());
    ///
    /// let oversize = InlineErasedBox::<S1>::try_new([7u64; 4], |_: &[u64; 4]| {}, |_: &[u64; 4]| String::new());
    /// let (shape, _, _) = oversize.unwrap_err().into_payload();
    /// assert_eq!(shape, [7u64; 4]);
    /// ```
    pub fn try_new<T, D, S>(
        shape: T,
        drawer: D,
        serializer: S,
    ) -> Result<Self, CapacityError<(T, D, S)>>
    where
        T: Clone + 'static,
        D: DrawStrategy<T> + Clone + 'static,
        S: SerializeStrategy<T> + Clone + 'static,
    {
        if !Self::fits::<T, D, S>() {
            let size = size_of::<Model<T, D, S>>();
            let align = align_of::<Model<T, D, S>>();
            tracing::debug!(
                target: "shapebox",
                shape = type_name::<T>(),
                size,
                align,
                capacity = Self::capacity(),
                "rejected shape that does not fit the inline space"
            );
            return Err(CapacityError::new(
                type_name::<T>(),
                (size, align),
                (Self::capacity(), Self::alignment()),
                (shape, drawer, serializer),
            ));
        }

        // SAFETY: the model fits, checked above.
        Ok(unsafe { Self::new_unchecked(Model::new(shape, drawer, serializer)) })
    }

    /// Returns `true` if a shape `T` with strategies `D` and `S` can be stored in `Space`.
    /// If `true`, [`InlineErasedBox::try_new`] is guaranteed to succeed.
    pub const fn fits<T, D, S>() -> bool {
        size_of::<Model<T, D, S>>() <= size_of::<Space>()
            && align_of::<Model<T, D, S>>() <= align_of::<Space>()
    }

    /// Size in bytes of the inline space.
    pub const fn capacity() -> usize {
        size_of::<Space>()
    }

    /// Largest model alignment the inline space supports.
    pub const fn alignment() -> usize {
        align_of::<Space>()
    }

    /// Draws the stored shape with its draw strategy.
    #[inline]
    pub fn draw(&self) {
        self.concept().do_draw()
    }

    /// Serializes the stored shape with its serialize strategy.
    #[inline]
    pub fn serialize(&self) -> String {
        self.concept().do_serialize()
    }

    /// Name of the erased shape type.
    pub fn shape_type_name(&self) -> &'static str {
        self.concept().type_name()
    }

    /// # Safety
    ///
    /// `M` must fit `Space` in both size and alignment.
    unsafe fn new_unchecked<M: Concept + 'static>(model: M) -> Self {
        debug_assert!(size_of::<M>() <= size_of::<Space>());
        debug_assert!(align_of::<M>() <= align_of::<Space>());

        let mut space = MaybeUninit::<Space>::uninit();
        let base = space.as_mut_ptr().cast::<u8>();
        // SAFETY: `base` is valid for writes of `M` and aligned for it, per the caller.
        unsafe { base.cast::<M>().write(model) };

        let concept: fn(*mut u8) -> *mut dyn Concept = concept_of::<M>;
        debug_assert!(ptr::addr_eq(concept(base), base));

        let this = InlineErasedBox {
            space: UnsafeCell::new(space),
            concept,
            _marker: PhantomData,
        };
        tracing::trace!(
            target: "shapebox",
            shape = this.shape_type_name(),
            size = size_of::<M>(),
            "constructed inline shape"
        );
        this
    }

    #[inline]
    pub(crate) fn concept(&self) -> &dyn Concept {
        let base = self.space.get().cast::<u8>();
        // SAFETY: a live model starts at `base` for as long as `self` exists.
        unsafe { &*(self.concept)(base) }
    }
}

impl<Space> Clone for InlineErasedBox<Space> {
    fn clone(&self) -> Self {
        let mut space = MaybeUninit::<Space>::uninit();
        // SAFETY: the fresh space has the layout of ours, so the model fits it as well.
        // If the clone panics, `space` stays uninitialized and nothing is dropped.
        unsafe { self.concept().clone_in_place(space.as_mut_ptr().cast()) };

        tracing::trace!(
            target: "shapebox",
            shape = self.shape_type_name(),
            "cloned inline shape"
        );
        InlineErasedBox {
            space: UnsafeCell::new(space),
            concept: self.concept,
            _marker: PhantomData,
        }
    }

    /// Clones `source` into a temporary first and only then drops the current model, so a
    /// panicking clone leaves `self` unchanged.
    fn clone_from(&mut self, source: &Self) {
        let copy = source.clone();
        drop(mem::replace(self, copy));
    }
}

impl<Space> Drop for InlineErasedBox<Space> {
    fn drop(&mut self) {
        let base = self.space.get_mut().as_mut_ptr().cast::<u8>();
        // SAFETY: the model is live and is dropped exactly once, here.
        unsafe { ptr::drop_in_place((self.concept)(base)) }
    }
}

impl<Space> fmt::Debug for InlineErasedBox<Space> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InlineErasedBox")
            .field("shape", &self.shape_type_name())
            .field("capacity", &Self::capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::InlineErasedBox;
    use crate::space::*;
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::string::String;
    use core::cell::Cell;

    #[test]
    fn test_basic() {
        let stacked: InlineErasedBox<S1> =
            InlineErasedBox::new(1234usize, |_: &usize| {}, |n: &usize| format!("{n}"));
        assert_eq!(stacked.serialize(), "1234");
        assert_eq!(stacked.shape_type_name(), "usize");
    }

    #[test]
    fn test_draw() {
        let drawn = Rc::new(Cell::new(0.0));
        let sink = drawn.clone();
        let circle: InlineErasedBox = InlineErasedBox::new(
            2.3f64,
            move |r: &f64| sink.set(*r),
            |r: &f64| format!("circle:{r}"),
        );

        circle.draw();
        assert_eq!(drawn.get(), 2.3);
    }

    #[test]
    fn test_drop() {
        #[derive(Clone)]
        struct Struct(Rc<Cell<bool>>);
        impl Drop for Struct {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let flag = Rc::new(Cell::new(false));
        let val: InlineErasedBox<S2> =
            InlineErasedBox::new(Struct(flag.clone()), |_: &Struct| {}, |_: &Struct| String::new());
        assert!(!flag.get());

        drop(val);
        assert!(flag.get());
    }

    #[test]
    fn test_dont_drop_space() {
        struct NoDrop(S4);
        impl Drop for NoDrop {
            fn drop(&mut self) {
                unreachable!();
            }
        }

        drop(InlineErasedBox::<NoDrop>::new(true, |_: &bool| {}, |_: &bool| String::new()));
    }

    #[test]
    fn test_oversize() {
        let fit = InlineErasedBox::<S1>::try_new(
            [0usize; 1],
            |_: &[usize; 1]| {},
            |_: &[usize; 1]| String::new(),
        );
        let oversize = InlineErasedBox::<S1>::try_new(
            [0usize; 2],
            |_: &[usize; 2]| {},
            |_: &[usize; 2]| String::new(),
        );
        assert!(fit.is_ok());

        let err = oversize.unwrap_err();
        assert_eq!(err.size(), 2 * core::mem::size_of::<usize>());
        assert_eq!(err.capacity(), core::mem::size_of::<usize>());
    }

    #[test]
    fn test_overaligned() {
        #[derive(Clone, Copy)]
        #[repr(align(32))]
        struct Wide(u8);

        assert!(!InlineErasedBox::<S8>::fits::<Wide, fn(&Wide), fn(&Wide) -> String>());
        let err = InlineErasedBox::<S8>::try_new(Wide(1), |_: &Wide| {}, |_: &Wide| String::new())
            .unwrap_err();
        assert_eq!(err.align(), 32);
        assert_eq!(err.max_align(), core::mem::align_of::<usize>());
    }

    #[test]
    fn test_clone() {
        let stacked: InlineErasedBox<S2> =
            InlineErasedBox::new([0usize, 1], |_: &[usize; 2]| {}, |a: &[usize; 2]| format!("{a:?}"));
        let copy = stacked.clone();
        drop(stacked);
        assert_eq!(copy.serialize(), "[0, 1]");
    }

    #[test]
    fn test_clone_from() {
        let mut target: InlineErasedBox =
            InlineErasedBox::new(1u8, |_: &u8| {}, |n: &u8| format!("u8:{n}"));
        let source: InlineErasedBox =
            InlineErasedBox::new(2u64, |_: &u64| {}, |n: &u64| format!("u64:{n}"));

        target.clone_from(&source);
        assert_eq!(target.serialize(), "u64:2");
        assert_eq!(source.serialize(), "u64:2");
    }

    #[test]
    fn test_zst() {
        let zst: InlineErasedBox<()> = InlineErasedBox::new((), |_: &()| {}, |_: &()| String::from("unit"));
        assert_eq!(zst.serialize(), "unit");
        assert_eq!(zst.clone().serialize(), "unit");
    }

    #[test]
    fn test_moved_box_still_dispatches() {
        let make = || -> InlineErasedBox<S4> {
            InlineErasedBox::new(4.1f64, |_: &f64| {}, |r: &f64| format!("circle:{r}"))
        };
        let mut boxes = alloc::vec::Vec::new();
        for _ in 0..8 {
            boxes.push(make());
        }
        // Pushing reallocates the vector and moves every box.
        assert!(boxes.iter().all(|b| b.serialize() == "circle:4.1"));
    }

    #[test]
    fn test_model_at_buffer_start() {
        let b: InlineErasedBox<S4> =
            InlineErasedBox::new(3u16, |_: &u16| {}, |n: &u16| format!("{n}"));
        let concept: *const _ = b.concept();
        assert!(core::ptr::addr_eq(concept, b.space.get()));
    }

    #[test]
    fn test_shape_mutated_by_draw() {
        let counter: InlineErasedBox<S2> = InlineErasedBox::new(
            Cell::new(0u32),
            |c: &Cell<u32>| c.set(c.get() + 1),
            |c: &Cell<u32>| format!("drawn {} times", c.get()),
        );
        counter.draw();
        counter.draw();
        assert_eq!(counter.serialize(), "drawn 2 times");

        let copy = counter.clone();
        counter.draw();
        assert_eq!(counter.serialize(), "drawn 3 times");
        assert_eq!(copy.serialize(), "drawn 2 times");
    }
}

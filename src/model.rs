use alloc::boxed::Box;
use alloc::string::String;
use core::any::type_name;

use crate::strategy::{DrawStrategy, SerializeStrategy};

/// Dispatch surface shared by both boxes. Never exposed to callers.
pub(crate) trait Concept {
    fn do_draw(&self);

    fn do_serialize(&self) -> String;

    /// Clones `self` into `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of the concrete model type and suitably aligned for it.
    /// Whatever `dst` held before is overwritten without being dropped.
    unsafe fn clone_in_place(&self, dst: *mut u8);

    fn clone_box(&self) -> Box<dyn Concept>;

    fn type_name(&self) -> &'static str;
}

/// The shape together with its strategies, owned by value.
#[derive(Clone)]
pub(crate) struct Model<T, D, S> {
    shape: T,
    drawer: D,
    serializer: S,
}

impl<T, D, S> Model<T, D, S> {
    #[inline]
    pub(crate) fn new(shape: T, drawer: D, serializer: S) -> Self {
        Model {
            shape,
            drawer,
            serializer,
        }
    }
}

impl<T, D, S> Concept for Model<T, D, S>
where
    T: Clone + 'static,
    D: DrawStrategy<T> + Clone + 'static,
    S: SerializeStrategy<T> + Clone + 'static,
{
    #[inline]
    fn do_draw(&self) {
        self.drawer.draw(&self.shape)
    }

    #[inline]
    fn do_serialize(&self) -> String {
        self.serializer.serialize(&self.shape)
    }

    unsafe fn clone_in_place(&self, dst: *mut u8) {
        // A panicking clone leaves `dst` untouched.
        let copy = self.clone();
        unsafe { dst.cast::<Self>().write(copy) }
    }

    fn clone_box(&self) -> Box<dyn Concept> {
        Box::new(self.clone())
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

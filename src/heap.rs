use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::inline::InlineErasedBox;
use crate::model::{Concept, Model};
use crate::strategy::{DrawStrategy, SerializeStrategy};

/// A type-erased shape whose model lives on the heap.
///
/// Same contract as [`InlineErasedBox`], without a capacity limit: any model size is
/// accepted. Every construction and every clone costs one allocation; moves only transfer the
/// pointer.
///
/// # Example
///
/// ```
/// use shapebox::HeapErasedBox;
///
/// // Far larger than any inline space in this crate.
/// let big = HeapErasedBox::new([1u8; 4096], |_: &[u8; 4096]| {}, |b: &[u8; 4096]| {
///     b.iter().map(|&x| u32::from(x)).sum::<u32>().to_string()
/// });
///
/// let copy = big.clone();
/// assert_eq!(copy.serialize(), "4096");
/// ```
pub struct HeapErasedBox {
    concept: Box<dyn Concept>,
}

impl HeapErasedBox {
    /// Moves `shape` and its strategies into a new heap allocation.
    pub fn new<T, D, S>(shape: T, drawer: D, serializer: S) -> Self
    where
        T: Clone + 'static,
        D: DrawStrategy<T> + Clone + 'static,
        S: SerializeStrategy<T> + Clone + 'static,
    {
        let concept: Box<dyn Concept> = Box::new(Model::new(shape, drawer, serializer));
        tracing::trace!(
            target: "shapebox",
            shape = concept.type_name(),
            "constructed heap shape"
        );
        HeapErasedBox { concept }
    }

    /// Draws the stored shape with its draw strategy.
    #[inline]
    pub fn draw(&self) {
        self.concept.do_draw()
    }

    /// Serializes the stored shape with its serialize strategy.
    #[inline]
    pub fn serialize(&self) -> String {
        self.concept.do_serialize()
    }

    /// Name of the erased shape type.
    pub fn shape_type_name(&self) -> &'static str {
        self.concept.type_name()
    }
}

impl Clone for HeapErasedBox {
    fn clone(&self) -> Self {
        tracing::trace!(
            target: "shapebox",
            shape = self.shape_type_name(),
            "cloned heap shape"
        );
        HeapErasedBox {
            concept: self.concept.clone_box(),
        }
    }

    /// Copy-and-swap: a panicking clone leaves `self` unchanged.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        core::mem::swap(&mut self.concept, &mut copy.concept);
    }
}

/// Copies the model of an inline box onto the heap, with a single allocation.
impl<Space> From<&InlineErasedBox<Space>> for HeapErasedBox {
    fn from(inline: &InlineErasedBox<Space>) -> Self {
        tracing::trace!(
            target: "shapebox",
            shape = inline.shape_type_name(),
            "copied inline shape to heap"
        );
        HeapErasedBox {
            concept: inline.concept().clone_box(),
        }
    }
}

impl fmt::Debug for HeapErasedBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HeapErasedBox")
            .field("shape", &self.shape_type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::HeapErasedBox;
    use crate::space::S1;
    use crate::InlineErasedBox;
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::string::String;
    use core::cell::Cell;

    #[test]
    fn test_basic() {
        let heaped = HeapErasedBox::new((0usize, 1usize), |_: &(usize, usize)| {}, |p: &(usize, usize)| {
            format!("{p:?}")
        });
        assert_eq!(heaped.serialize(), "(0, 1)");
    }

    #[test]
    fn test_no_size_ceiling() {
        let huge = HeapErasedBox::new([6usize; 10000], |_: &[usize; 10000]| {}, |a: &[usize; 10000]| {
            a.len().to_string()
        });
        assert_eq!(huge.clone().serialize(), "10000");
    }

    #[test]
    fn test_drop() {
        #[derive(Clone)]
        struct Struct(Rc<Cell<usize>>);
        impl Drop for Struct {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let val = HeapErasedBox::new(Struct(drops.clone()), |_: &Struct| {}, |_: &Struct| String::new());
        let copy = val.clone();
        assert_eq!(drops.get(), 0);

        drop(val);
        assert_eq!(drops.get(), 1);
        drop(copy);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn test_clone_from() {
        let mut target = HeapErasedBox::new('a', |_: &char| {}, |c: &char| format!("char:{c}"));
        let source = HeapErasedBox::new(7i32, |_: &i32| {}, |n: &i32| format!("i32:{n}"));

        target.clone_from(&source);
        assert_eq!(target.serialize(), "i32:7");
        assert_eq!(target.shape_type_name(), "i32");
    }

    #[test]
    fn test_from_inline() {
        let stacked: InlineErasedBox<S1> =
            InlineErasedBox::new(9u32, |_: &u32| {}, |n: &u32| format!("u32:{n}"));
        let heaped = HeapErasedBox::from(&stacked);

        drop(stacked);
        assert_eq!(heaped.serialize(), "u32:9");
    }
}

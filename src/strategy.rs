use alloc::string::String;

/// Draws a shape of type `T`.
///
/// Every `Fn(&T)` closure is a draw strategy. Named types can implement this trait for
/// several shape types at once:
///
/// ```
/// use shapebox::{DrawStrategy, HeapErasedBox};
///
/// #[derive(Clone)]
/// struct Circle(f64);
/// #[derive(Clone)]
/// struct Square(f64);
///
/// #[derive(Clone)]
/// struct ConsoleDrawer;
///
/// impl DrawStrategy<Circle> for ConsoleDrawer {
///     fn draw(&self, circle: &Circle) {
///         println!("circle: radius={}", circle.0);
///     }
/// }
///
/// impl DrawStrategy<Square> for ConsoleDrawer {
///     fn draw(&self, square: &Square) {
///         println!("square: side={}", square.0);
///     }
/// }
///
/// let c = HeapErasedBox::new(Circle(2.3), ConsoleDrawer, |c: &Circle| c.0.to_string());
/// let s = HeapErasedBox::new(Square(1.2), ConsoleDrawer, |s: &Square| s.0.to_string());
/// c.draw();
/// s.draw();
/// ```
pub trait DrawStrategy<T: ?Sized> {
    /// Performs the drawing.
    fn draw(&self, shape: &T);
}

impl<T: ?Sized, F: Fn(&T)> DrawStrategy<T> for F {
    #[inline]
    fn draw(&self, shape: &T) {
        self(shape)
    }
}

/// Produces a textual representation of a shape of type `T`.
///
/// Every `Fn(&T) -> String` closure is a serialize strategy.
pub trait SerializeStrategy<T: ?Sized> {
    /// Serializes `shape`.
    fn serialize(&self, shape: &T) -> String;
}

impl<T: ?Sized, F: Fn(&T) -> String> SerializeStrategy<T> for F {
    #[inline]
    fn serialize(&self, shape: &T) -> String {
        self(shape)
    }
}

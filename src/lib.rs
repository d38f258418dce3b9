//! # ShapeBox: value-semantic type erasure for shapes
//!
//! A "shape" in this crate is any clonable value bundled with two behavior objects: a draw
//! strategy and a serialize strategy. [`InlineErasedBox`] and [`HeapErasedBox`] hide the
//! concrete types of all three behind one uniform, clonable value, so shapes of different kinds
//! can live side by side in a `Vec` and be drawn or serialized without any common base type.
//!
//! ## Core Concept
//!
//! Both boxes share the same contract and differ only in where the erased model lives:
//!
//! - [`InlineErasedBox`] places it in a fixed-size buffer inside the box itself. Construction,
//!   cloning and dropping never touch the heap. The price is a capacity ceiling, fixed by the
//!   `Space` type parameter and enforced before anything is written.
//! - [`HeapErasedBox`] owns it through a [`Box`]. Any size is accepted, moves are a pointer copy,
//!   and every construction and clone costs one allocation.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapebox::InlineErasedBox;
//!
//! #[derive(Clone)]
//! struct Circle {
//!     radius: f64,
//! }
//!
//! #[derive(Clone)]
//! struct Square {
//!     side: f64,
//! }
//!
//! let shapes: Vec<InlineErasedBox> = vec![
//!     InlineErasedBox::new(
//!         Circle { radius: 2.3 },
//!         |c: &Circle| println!("circle: radius={}", c.radius),
//!         |c: &Circle| format!("circle:{}", c.radius),
//!     ),
//!     InlineErasedBox::new(
//!         Square { side: 1.2 },
//!         |s: &Square| println!("square: side={}", s.side),
//!         |s: &Square| format!("square:{}", s.side),
//!     ),
//! ];
//!
//! for shape in &shapes {
//!     shape.draw();
//! }
//!
//! let serialized: Vec<String> = shapes.iter().map(InlineErasedBox::serialize).collect();
//! assert_eq!(serialized, ["circle:2.3", "square:1.2"]);
//! ```
//!
//! ## Configuration
//!
//! ### Feature Flags
//!
//! - **`std`** (enabled by default)
//!   - Links to the standard library
//!   - Disable for `#![no_std]` environments: `default-features = false`. The crate still
//!     needs `alloc` for [`HeapErasedBox`] and for the `String` produced by serialization.
//!
//! ### Custom Space Types
//!
//! The inline capacity is the size and alignment of the `Space` parameter:
//!
//! ```rust
//! use shapebox::InlineErasedBox;
//! use shapebox::space::S4;
//!
//! // 32 bytes on 64-bit targets, usize-aligned
//! type SmallShape = InlineErasedBox<S4>;
//!
//! assert_eq!(SmallShape::capacity(), core::mem::size_of::<S4>());
//! assert!(SmallShape::fits::<f64, fn(&f64), fn(&f64) -> String>());
//! ```
//!
//! A model that does not fit is rejected at compile time by [`InlineErasedBox::new`] and at
//! run time, before any write, by [`InlineErasedBox::try_new`].

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(clippy::as_conversions)]

extern crate alloc;

mod error;
mod heap;
mod inline;
mod model;
pub mod space;
mod strategy;

pub use crate::error::CapacityError;
pub use crate::heap::HeapErasedBox;
pub use crate::inline::InlineErasedBox;
pub use crate::strategy::{DrawStrategy, SerializeStrategy};

use core::fmt;

/// Returned by [`InlineErasedBox::try_new`](crate::InlineErasedBox::try_new) when the model
/// does not fit the inline space.
///
/// Nothing has been written to any buffer when this error is produced; the rejected payload is
/// handed back untouched.
#[derive(thiserror::Error)]
#[error(
    "model `{shape}` needs {size} bytes aligned to {align}, \
     but the inline space holds {capacity} bytes aligned to {max_align}"
)]
pub struct CapacityError<P> {
    shape: &'static str,
    size: usize,
    align: usize,
    capacity: usize,
    max_align: usize,
    payload: P,
}

impl<P> CapacityError<P> {
    pub(crate) fn new(
        shape: &'static str,
        (size, align): (usize, usize),
        (capacity, max_align): (usize, usize),
        payload: P,
    ) -> Self {
        CapacityError {
            shape,
            size,
            align,
            capacity,
            max_align,
            payload,
        }
    }

    /// Size in bytes of the rejected model.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alignment of the rejected model.
    pub fn align(&self) -> usize {
        self.align
    }

    /// Size in bytes of the inline space.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Alignment of the inline space.
    pub fn max_align(&self) -> usize {
        self.max_align
    }

    /// Returns the rejected payload.
    pub fn into_payload(self) -> P {
        self.payload
    }
}

// Written by hand so that the payload does not need to be `Debug`.
impl<P> fmt::Debug for CapacityError<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CapacityError")
            .field("shape", &self.shape)
            .field("size", &self.size)
            .field("align", &self.align)
            .field("capacity", &self.capacity)
            .field("max_align", &self.max_align)
            .finish_non_exhaustive()
    }
}

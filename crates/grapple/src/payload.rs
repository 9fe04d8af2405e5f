//! Caller-defined drag payloads.

use std::any::Any;
use std::fmt;

/// Marker for values that can ride along with a drag.
///
/// There are no required members. Classifiers and resolvers that take a payload
/// receive it as `&dyn Draggable` and can discriminate by concrete type with
/// [`downcast_ref`](trait.Draggable.html#method.downcast_ref).
///
/// ```
/// use grapple::Draggable;
///
/// struct Card(u32);
/// impl Draggable for Card {}
///
/// let card: Box<dyn Draggable> = Box::new(Card(7));
/// assert_eq!(card.downcast_ref::<Card>().map(|c| c.0), Some(7));
/// assert!(!card.is::<String>());
/// ```
pub trait Draggable: Any + 'static {}

impl dyn Draggable {
    /// Borrow the payload as its concrete type, if it is one.
    pub fn downcast_ref<T: Draggable>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    pub fn is<T: Draggable>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }
}

impl fmt::Debug for dyn Draggable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Draggable { .. }")
    }
}

impl Draggable for String {}
impl Draggable for &'static str {}
impl Draggable for u32 {}
impl Draggable for u64 {}
impl Draggable for usize {}

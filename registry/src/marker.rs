//! Marker types that keep the blanket conversion impls apart.
//!
//! They only ever appear as type parameters of [`IntoProducer`](crate::IntoProducer),
//! [`IntoReceiver`](crate::IntoReceiver) and [`Callback`](crate::Callback), and
//! are inferred at the call site.

use std::marker::PhantomData;

/// A `&mut Option<Rc<I>>` slot to fill.
pub struct Fill;

/// A callback; `M` is the callback's own signature marker.
pub struct Invoke<M>(PhantomData<M>);

/// A reference whose pointee type is not known statically.
pub struct Untyped;

/// A plain value: neither callable nor a slot.
pub struct NotCallable;

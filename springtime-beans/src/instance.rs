//! Pointer types used to share bean instances. With the `threadsafe` feature (default) instances
//! are kept in [Arc](std::sync::Arc)s and must be `Send + Sync`; otherwise [Rc](std::rc::Rc) is
//! used.

use std::any::Any;
use std::error::Error;
#[cfg(not(feature = "threadsafe"))]
use std::rc::Rc;
#[cfg(feature = "threadsafe")]
use std::sync::Arc;

#[cfg(not(feature = "threadsafe"))]
pub type BeanInstancePtr<T> = Rc<T>;
#[cfg(feature = "threadsafe")]
pub type BeanInstancePtr<T> = Arc<T>;

#[cfg(not(feature = "threadsafe"))]
pub type BeanInstanceAnyPtr = BeanInstancePtr<dyn Any + 'static>;
#[cfg(feature = "threadsafe")]
pub type BeanInstanceAnyPtr = BeanInstancePtr<dyn Any + Send + Sync + 'static>;

/// Error type returned by custom bean constructors.
#[cfg(not(feature = "threadsafe"))]
pub type ErrorPtr = Rc<dyn Error + 'static>;
/// Error type returned by custom bean constructors.
#[cfg(feature = "threadsafe")]
pub type ErrorPtr = Arc<dyn Error + Send + Sync + 'static>;

//! Configuration-driven bean container, in the spirit of the Spring framework XML application
//! contexts.
//!
//! A document lists named beans, the type backing each of them and values for their fields -
//! either literals or references to other beans. The [container](container::BeanContainer) creates
//! every bean by its type name, assigns the fields by name and makes the result available by id:
//!
//! ```no_run
//! use springtime_beans::container::BeanContainer;
//! use springtime_beans::instance::BeanInstancePtr;
//! use springtime_beans::Bean;
//!
//! #[derive(Bean, Default)]
//! #[bean(names = ["Wheel"])]
//! struct Wheel {
//!     brand: String,
//! }
//!
//! #[derive(Bean, Default)]
//! #[bean(names = ["Car"])]
//! struct Car {
//!     wheel: Option<BeanInstancePtr<Wheel>>,
//! }
//!
//! let container = BeanContainer::from_location("beans.json").expect("invalid beans.json");
//! let car = container.get_bean_typed::<Car>("car").expect("missing car");
//! ```
//!
//! ### Features
//!
//! * `threadsafe` - use threadsafe pointers and `Send + Sync` trait bounds
//! * `derive` - `#[derive(Bean)]` support

pub mod bean;
pub mod config;
pub mod container;
pub mod definition;
pub mod error;
pub mod instance;
pub mod loader;
pub mod type_registry;

#[cfg(feature = "derive")]
pub use springtime_beans_derive::Bean;

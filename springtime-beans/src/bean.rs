//! One of the basic blocks of the container is a [Bean]. Beans are types which can be created by
//! name and have their fields assigned by name, regardless of field visibility.
//!
//! ## Declaring beans
//!
//! Any type which wants to be managed by the container needs to implement `Bean`. For convenience,
//! the trait can be automatically derived, along with static type registration, if the `derive`
//! feature is enabled:
//!
//! ```
//! use springtime_beans::instance::BeanInstancePtr;
//! use springtime_beans::Bean;
//!
//! #[derive(Bean, Default)]
//! #[bean(names = ["Wheel"])]
//! struct Wheel {
//!     brand: String,
//!     specification: String,
//! }
//!
//! #[derive(Bean, Default)]
//! #[bean(names = ["Car"])]
//! struct Car {
//!     // reference to another bean
//!     wheel: Option<BeanInstancePtr<Wheel>>,
//!     // optional literal, parsed with FromStr
//!     seats: Option<u8>,
//!     #[bean(name = "model")]
//!     model_name: String,
//!     #[bean(ignore)]
//!     cache: Vec<u8>,
//! }
//! ```
//!
//! ### Supported `#[bean]` struct configuration
//!
//! * `names = ["name"]` - register the type under given names, instead of the default
//! `module::path::Type`
//! * `constructor = "expr"` - call `expr()` returning `Result<Self, ErrorPtr>` instead of
//! `Default::default()`
//!
//! ### Supported `#[bean]` field configuration
//!
//! * `name = "name"` - use a different property name than the field identifier
//! * `ignore` - do not expose the field as a property
//!
//! ### Field kinds
//!
//! * `Option<BeanInstancePtr<T>>` - a reference to another bean of type `T`
//! * `Option<T>` - an optional literal; `T: FromStr`
//! * any other `T: FromStr` - a literal; `String` fields receive the value unmodified

use crate::error::PropertyError;
use crate::instance::{BeanInstanceAnyPtr, BeanInstancePtr, ErrorPtr};
use derivative::Derivative;
use std::any::type_name;
use std::str::FromStr;

/// What kind of value a property accepts.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum PropertyKind {
    Literal,
    Reference,
}

impl PropertyKind {
    fn describe(self) -> &'static str {
        match self {
            PropertyKind::Literal => "literal",
            PropertyKind::Reference => "reference",
        }
    }
}

/// A resolved value to be assigned to a property.
#[derive(Clone, Debug)]
pub enum PropertyValue<'a> {
    Literal(&'a str),
    Reference(BeanInstanceAnyPtr),
}

impl PropertyValue<'_> {
    #[inline]
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Literal(_) => PropertyKind::Literal,
            PropertyValue::Reference(_) => PropertyKind::Reference,
        }
    }
}

/// Assignment function for a single property of `T`.
pub type AssignFunction<T> = fn(target: &mut T, value: PropertyValue) -> Result<(), PropertyError>;

/// Single entry in a bean's setter table.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""), Copy(bound = ""))]
pub struct PropertySetter<T> {
    pub name: &'static str,
    pub kind: PropertyKind,
    #[derivative(Debug = "ignore")]
    pub assign: AssignFunction<T>,
}

/// Base trait for beans. Please see the module-level documentation for more information.
#[cfg(feature = "threadsafe")]
pub trait Bean: Send + Sync + Sized + 'static {
    /// Creates a new, unwired instance.
    fn create() -> Result<Self, ErrorPtr>;

    /// Returns the setter table of this type.
    fn property_setters() -> &'static [PropertySetter<Self>];
}

/// Base trait for beans. Please see the module-level documentation for more information.
#[cfg(not(feature = "threadsafe"))]
pub trait Bean: Sized + 'static {
    /// Creates a new, unwired instance.
    fn create() -> Result<Self, ErrorPtr>;

    /// Returns the setter table of this type.
    fn property_setters() -> &'static [PropertySetter<Self>];
}

/// Type-erased view of a bean under construction.
pub trait BeanObject {
    /// Checks if a property with given name exists.
    fn has_property(&self, name: &str) -> bool;

    /// Assigns the property with given name. Returns `Ok(false)` when no such property exists.
    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<bool, PropertyError>;

    /// Name of the concrete Rust type.
    fn type_name(&self) -> &'static str;

    /// Finishes construction and turns the bean into a shared instance.
    fn into_instance(self: Box<Self>) -> BeanInstanceAnyPtr;
}

impl<T: Bean> BeanObject for T {
    #[inline]
    fn has_property(&self, name: &str) -> bool {
        T::property_setters()
            .iter()
            .any(|setter| setter.name == name)
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<bool, PropertyError> {
        match T::property_setters()
            .iter()
            .find(|setter| setter.name == name)
        {
            Some(setter) if setter.kind != value.kind() => Err(PropertyError::IncompatibleProperty {
                expected: setter.kind.describe(),
                actual: value.kind().describe(),
            }),
            Some(setter) => (setter.assign)(self, value).map(|_| true),
            None => Ok(false),
        }
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    #[inline]
    fn into_instance(self: Box<Self>) -> BeanInstanceAnyPtr {
        BeanInstancePtr::new(*self) as BeanInstanceAnyPtr
    }
}

pub type BeanObjectPtr = Box<dyn BeanObject>;

/// Assigns a literal to a `FromStr` field.
pub fn assign_literal<F: FromStr>(target: &mut F, value: PropertyValue) -> Result<(), PropertyError> {
    *target = parse_literal(value)?;
    Ok(())
}

/// Assigns a literal to an optional `FromStr` field.
pub fn assign_optional_literal<F: FromStr>(
    target: &mut Option<F>,
    value: PropertyValue,
) -> Result<(), PropertyError> {
    *target = Some(parse_literal(value)?);
    Ok(())
}

/// Assigns a shared instance of another bean to a reference field.
#[cfg(feature = "threadsafe")]
pub fn assign_reference<R: Send + Sync + 'static>(
    target: &mut Option<BeanInstancePtr<R>>,
    value: PropertyValue,
) -> Result<(), PropertyError> {
    *target = Some(downcast_reference(value)?);
    Ok(())
}

/// Assigns a shared instance of another bean to a reference field.
#[cfg(not(feature = "threadsafe"))]
pub fn assign_reference<R: 'static>(
    target: &mut Option<BeanInstancePtr<R>>,
    value: PropertyValue,
) -> Result<(), PropertyError> {
    *target = Some(downcast_reference(value)?);
    Ok(())
}

fn parse_literal<F: FromStr>(value: PropertyValue) -> Result<F, PropertyError> {
    match value {
        PropertyValue::Literal(literal) => {
            literal
                .parse()
                .map_err(|_| PropertyError::InvalidLiteral {
                    value: literal.to_string(),
                    target_type: type_name::<F>(),
                })
        }
        PropertyValue::Reference(_) => Err(PropertyError::IncompatibleProperty {
            expected: PropertyKind::Literal.describe(),
            actual: PropertyKind::Reference.describe(),
        }),
    }
}

#[cfg(feature = "threadsafe")]
fn downcast_reference<R: Send + Sync + 'static>(
    value: PropertyValue,
) -> Result<BeanInstancePtr<R>, PropertyError> {
    match value {
        PropertyValue::Reference(instance) => instance
            .downcast::<R>()
            .map_err(|_| PropertyError::IncompatibleReference(type_name::<R>())),
        PropertyValue::Literal(_) => Err(PropertyError::IncompatibleProperty {
            expected: PropertyKind::Reference.describe(),
            actual: PropertyKind::Literal.describe(),
        }),
    }
}

#[cfg(not(feature = "threadsafe"))]
fn downcast_reference<R: 'static>(value: PropertyValue) -> Result<BeanInstancePtr<R>, PropertyError> {
    match value {
        PropertyValue::Reference(instance) => instance
            .downcast::<R>()
            .map_err(|_| PropertyError::IncompatibleReference(type_name::<R>())),
        PropertyValue::Literal(_) => Err(PropertyError::IncompatibleProperty {
            expected: PropertyKind::Reference.describe(),
            actual: PropertyKind::Literal.describe(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::bean::{
        assign_literal, assign_optional_literal, assign_reference, Bean, BeanObject,
        PropertyKind, PropertySetter, PropertyValue,
    };
    use crate::error::PropertyError;
    use crate::instance::{BeanInstanceAnyPtr, BeanInstancePtr, ErrorPtr};

    #[derive(Default, Debug)]
    struct Wheel {
        brand: String,
        pressure: Option<f32>,
    }

    #[derive(Default, Debug)]
    struct Car {
        wheel: Option<BeanInstancePtr<Wheel>>,
    }

    impl Bean for Wheel {
        fn create() -> Result<Self, ErrorPtr> {
            Ok(Self::default())
        }

        fn property_setters() -> &'static [PropertySetter<Self>] {
            const SETTERS: &[PropertySetter<Wheel>] = &[
                PropertySetter {
                    name: "brand",
                    kind: PropertyKind::Literal,
                    assign: |target, value| assign_literal(&mut target.brand, value),
                },
                PropertySetter {
                    name: "pressure",
                    kind: PropertyKind::Literal,
                    assign: |target, value| assign_optional_literal(&mut target.pressure, value),
                },
            ];
            SETTERS
        }
    }

    impl Bean for Car {
        fn create() -> Result<Self, ErrorPtr> {
            Ok(Self::default())
        }

        fn property_setters() -> &'static [PropertySetter<Self>] {
            const SETTERS: &[PropertySetter<Car>] = &[PropertySetter {
                name: "wheel",
                kind: PropertyKind::Reference,
                assign: |target, value| assign_reference(&mut target.wheel, value),
            }];
            SETTERS
        }
    }

    #[test]
    fn should_assign_literals() {
        let mut wheel = Wheel::create().unwrap();
        assert!(wheel
            .set_property("brand", PropertyValue::Literal("Michelin"))
            .unwrap());
        assert!(wheel
            .set_property("pressure", PropertyValue::Literal("2.5"))
            .unwrap());

        assert_eq!(wheel.brand, "Michelin");
        assert_eq!(wheel.pressure, Some(2.5));
    }

    #[test]
    fn should_report_unknown_property() {
        let mut wheel = Wheel::create().unwrap();
        assert!(wheel.has_property("brand"));
        assert!(!wheel.has_property("color"));
        assert!(!wheel
            .set_property("color", PropertyValue::Literal("black"))
            .unwrap());
    }

    #[test]
    fn should_reject_unparsable_literal() {
        let mut wheel = Wheel::create().unwrap();
        assert!(matches!(
            wheel
                .set_property("pressure", PropertyValue::Literal("high"))
                .unwrap_err(),
            PropertyError::InvalidLiteral { .. }
        ));
    }

    #[test]
    fn should_assign_same_reference() {
        let wheel = BeanInstancePtr::new(Wheel::default());
        let mut car = Car::create().unwrap();
        car.set_property(
            "wheel",
            PropertyValue::Reference(wheel.clone() as BeanInstanceAnyPtr),
        )
        .unwrap();

        assert!(BeanInstancePtr::ptr_eq(car.wheel.as_ref().unwrap(), &wheel));
    }

    #[test]
    fn should_reject_incompatible_reference() {
        let mut car = Car::create().unwrap();
        assert!(matches!(
            car.set_property(
                "wheel",
                PropertyValue::Reference(BeanInstancePtr::new(0_u8) as BeanInstanceAnyPtr),
            )
            .unwrap_err(),
            PropertyError::IncompatibleReference(..)
        ));
    }

    #[test]
    fn should_reject_literal_for_reference() {
        let mut car = Car::create().unwrap();
        assert_eq!(
            car.set_property("wheel", PropertyValue::Literal("frontWheel"))
                .unwrap_err(),
            PropertyError::IncompatibleProperty {
                expected: "reference",
                actual: "literal"
            }
        );
    }
}

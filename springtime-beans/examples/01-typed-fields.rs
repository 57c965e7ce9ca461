use springtime_beans::container::BeanContainerBuilder;
use springtime_beans::instance::{BeanInstancePtr, ErrorPtr};
use springtime_beans::definition::BeanDefinition;
use springtime_beans::Bean;

// without explicit names, types are registered under their full path: module_path!() + "::Engine"
#[derive(Bean, Default)]
struct Engine {
    // any FromStr type can be used for literals
    power: u32,
    // optional literals stay None when not configured
    turbo: Option<bool>,
}

#[derive(Bean)]
#[bean(names = ["Car"], constructor = "Car::new")]
struct Car {
    engine: Option<BeanInstancePtr<Engine>>,
    // property name can differ from the field name
    #[bean(name = "model")]
    model_name: String,
    // ignored fields cannot be configured
    #[bean(ignore)]
    trips: u32,
}

impl Car {
    fn new() -> Result<Self, ErrorPtr> {
        Ok(Self {
            engine: None,
            model_name: "unknown".to_string(),
            trips: 0,
        })
    }
}

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // definitions can also be built in code, instead of being read from a document
    let definitions = [
        BeanDefinition::new("engine", concat!(module_path!(), "::Engine"))
            .with_literal("power", "150")
            .with_literal("turbo", "true"),
        BeanDefinition::new("car", "Car")
            .with_literal("model", "Golf")
            .with_reference("engine", "engine"),
    ];

    let container = BeanContainerBuilder::new()
        .expect("error initializing BeanContainerBuilder")
        .build(&definitions)
        .expect("error creating BeanContainer");

    let car = container
        .get_bean_typed::<Car>("car")
        .expect("error retrieving car");
    let engine = car.engine.as_ref().expect("engine not wired");

    // prints "Golf with 150 HP (turbo: Some(true)) after 0 trips"
    println!(
        "{} with {} HP (turbo: {:?}) after {} trips",
        car.model_name, engine.power, engine.turbo, car.trips
    );
}

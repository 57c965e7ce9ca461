use springtime_beans::container::BeanContainer;
use springtime_beans::instance::BeanInstancePtr;
use springtime_beans::Bean;
use tracing_subscriber::EnvFilter;

// a plain bean with private literal fields - no setters required
#[derive(Bean, Default)]
#[bean(names = ["Wheel"])]
struct Wheel {
    brand: String,
    specification: String,
}

// a bean referencing another bean; references need to be optional, since the instance is created
// before the fields are assigned
#[derive(Bean, Default)]
#[bean(names = ["Car"])]
struct Car {
    wheel: Option<BeanInstancePtr<Wheel>>,
}

impl Car {
    fn describe(&self) {
        match &self.wheel {
            Some(wheel) => println!(
                "Car riding on {} {} tires",
                wheel.brand, wheel.specification
            ),
            None => println!("Car without wheels"),
        }
    }
}

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // beans are created in declaration order, so "frontWheel" needs to be declared before "car"
    let container =
        BeanContainer::from_location(concat!(env!("CARGO_MANIFEST_DIR"), "/examples/car.json"))
            .expect("error creating BeanContainer");

    let car = container
        .get_bean_typed::<Car>("car")
        .expect("error retrieving car");

    // prints "Car riding on Michelin 225/45R17 tires"
    car.describe();
}

// note: this example assumes you've analyzed the previous one

use autowire_di::container::Container;
use autowire_di::instance::instance;
use autowire_di::metadata::{AttributeMetadataReader, Injectable};
use autowire_di::scanner::Autowirer;
use autowire_di::Injectable;

#[derive(Injectable)]
// an explicit key replaces the type name as the binding key, and literal arguments replace
// resolution - they are passed to the constructor positionally
#[autowire(key = "pool", args = [8, "primary", [-1, 2]])]
// a custom constructor is called with field values in declaration order
#[injectable(constructor = "Pool::new")]
struct Pool {
    size: u16,
    name: String,
    offsets: Vec<i32>,
}

impl Pool {
    fn new(size: u16, name: String, offsets: Vec<i32>) -> Self {
        println!("Creating pool {name}");
        Self {
            size,
            name,
            offsets,
        }
    }
}

fn main() {
    let mut container = Container::new();

    // types can also be autowired one at a time, without scanning
    Autowirer::new(AttributeMetadataReader).autowire_type(&mut container, &Pool::reflect());

    // manual bindings live alongside autowired ones
    container.add("pool-monitor", |container| {
        let pool = container.get_typed::<Pool>("pool")?;
        Ok(instance(format!("{} ({})", pool.name, pool.size)))
    });

    // prints "Creating pool primary" only once
    let pool = container.get_typed::<Pool>("pool").expect("error getting pool");
    let monitor = container
        .get_typed::<String>("pool-monitor")
        .expect("error getting monitor");

    // prints "primary (8) [-1, 2]"
    println!("{} {:?}", monitor, pool.offsets);
}

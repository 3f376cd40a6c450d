use autowire::application::Application;
use autowire::config::ContainerConfig;
use autowire_di::value::Value;
use autowire_di::Injectable;
use std::any::type_name;
use std::sync::Arc;

// marked types in this file get picked up when scanning the examples directory
#[derive(Injectable)]
#[autowire]
struct Greeter {
    greeting: String,
}

#[derive(Injectable)]
#[autowire(key = "audience", args = [["world", "everyone"]])]
struct Audience {
    names: Vec<String>,
}

#[derive(Injectable)]
#[autowire]
struct Announcer {
    greeter: Arc<Greeter>,
}

fn main() {
    // config usually comes from autowire.json or AUTOWIRE_* variables via
    // Application::from_environment(); here it's built by hand
    let mut config = ContainerConfig::default();
    config.scan_directories = vec![concat!(env!("CARGO_MANIFEST_DIR"), "/examples").to_string()];
    config
        .parameters
        .insert("greeting".to_string(), Value::from("Hello"));

    let mut container = Application::from_config(config)
        .build()
        .expect("unable to build container");

    let announcer = container
        .get_typed::<Announcer>(type_name::<Announcer>())
        .expect("unable to get announcer");
    let audience = container
        .get_typed::<Audience>("audience")
        .expect("unable to get audience");

    for name in &audience.names {
        // prints "Hello, world!" and "Hello, everyone!"
        println!("{}, {}!", announcer.greeter.greeting, name);
    }
}

use autowire_di::container::Container;
use autowire_di::value::Value;
use autowire_di::Injectable;
use std::any::type_name;
use std::sync::Arc;

// types marked with #[autowire] get registered when the directory containing their source file
// is scanned
#[derive(Injectable)]
#[autowire]
struct Repository {
    // scalar fields are resolved by name from bound parameters
    table: String,
}

#[derive(Injectable)]
#[autowire]
struct Service {
    // other fields are dependencies, resolved by the fully-qualified name of the type behind the
    // pointer
    repository: Arc<Repository>,
}

// without #[autowire], a type is reflected but never registered
#[derive(Injectable)]
struct Ignored;

fn main() {
    let mut container = Container::new();
    container.add_parameters([("table", Value::from("users"))]);

    // this file lives in the examples directory, so scanning it registers everything above
    container.autowire_directory(concat!(env!("CARGO_MANIFEST_DIR"), "/examples"));

    assert!(!container.has(type_name::<Ignored>()));

    // nothing gets constructed until requested; dependencies are constructed along the way and
    // cached, so each key yields the same instance every time
    let service = container
        .get_typed::<Service>(type_name::<Service>())
        .expect("error getting service");
    let repository = container
        .get_typed::<Repository>(type_name::<Repository>())
        .expect("error getting repository");

    assert!(Arc::ptr_eq(&service.repository, &repository));

    // prints "Using table: users"
    println!("Using table: {}", service.repository.table);
}

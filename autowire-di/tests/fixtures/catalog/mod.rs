pub mod products;

use crate::fixtures::catalog::products::Products;
use autowire_di::Injectable;
use std::sync::Arc;

#[derive(Injectable)]
#[autowire]
pub struct Catalog {
    pub products: Arc<Products>,
}

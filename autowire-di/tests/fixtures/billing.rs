use crate::fixtures::catalog::Catalog;
use autowire_di::Injectable;
use std::sync::Arc;

#[derive(Injectable)]
#[autowire]
pub struct Invoice {
    pub currency: String,
    pub catalog: Arc<Catalog>,
}

#[allow(dead_code)]
#[derive(Injectable)]
pub struct Draft {
    pub currency: String,
}

use autowire_di::Injectable;

#[derive(Injectable)]
#[autowire]
pub struct Products;

#[derive(Injectable)]
#[autowire(key = "featured", args = [["sku-1", "sku-2"]])]
pub struct Featured {
    pub skus: Vec<String>,
}

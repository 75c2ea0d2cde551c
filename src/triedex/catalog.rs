use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use tracing::debug;

use super::utils::{symbol::Symbol, trie::Trie};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Product {
    id: Symbol,
    name: String,
    category: String,
    description: String,
    details: BTreeMap<String, String>,
}

impl Product {
    pub(crate) fn new<I, K, V>(
        id: &str,
        name: &str,
        category: &str,
        description: &str,
        details: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: Symbol::new(id),
            name: name.to_owned(),
            category: category.to_owned(),
            description: description.to_owned(),
            details: details
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub(crate) fn id(&self) -> Symbol {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn category(&self) -> &str {
        &self.category
    }

}

impl Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Product{{id='{}', name='{}', category='{}', description='{}', details={{",
            self.id, self.name, self.category, self.description
        )?;
        for (i, (key, value)) in self.details.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}}}")
    }
}

/// In-memory product store with a category index and an exact-text index.
///
/// The text index maps a product's name, its description and each detail
/// value, verbatim, to the product id. Only whole stored strings match.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    products: HashMap<Symbol, Product>,
    category_index: HashMap<String, BTreeMap<Symbol, String>>,
    text_index: Trie<Symbol>,
}

impl Catalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The two demo products: a laptop and a programming book.
    pub(crate) fn sample() -> Self {
        let mut catalog = Self::new();
        catalog.add_product(Product::new(
            "1",
            "Laptop",
            "Electronics",
            "Powerful laptop with high-resolution display",
            [("Processor", "Intel i7"), ("RAM", "16GB"), ("Storage", "512GB SSD")],
        ));
        catalog.add_product(Product::new(
            "2",
            "Java Programming",
            "Books",
            "Comprehensive guide to Java programming",
            [("Author", "John Doe"), ("Pages", "500"), ("ISBN", "123456789")],
        ));
        catalog
    }

    pub(crate) fn add_product(&mut self, product: Product) {
        let id = product.id();
        debug!(%id, name = product.name(), category = product.category(), "adding product");

        self.category_index
            .entry(product.category.clone())
            .or_default()
            .insert(id, product.name.clone());

        self.text_index.insert_with_payload(&product.name, id);
        self.text_index.insert_with_payload(&product.description, id);
        for value in product.details.values() {
            self.text_index.insert_with_payload(value, id);
        }

        self.products.insert(id, product);
    }

    pub(crate) fn product(&self, id: &str) -> Option<&Product> {
        Symbol::lookup(id).and_then(|id| self.products.get(&id))
    }

    pub(crate) fn search_by_category(&self, category: &str) -> BTreeMap<Symbol, String> {
        self.category_index
            .get(category)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn search_text(&self, query: &str) -> &[Symbol] {
        self.text_index.search_payloads(query)
    }

    pub(crate) fn len(&self) -> usize {
        self.products.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(symbols: &[Symbol]) -> Vec<&'static str> {
        symbols.iter().map(Symbol::as_str).collect()
    }

    #[test]
    fn exact_text_matches_only() {
        let catalog = Catalog::sample();
        assert_eq!(ids(catalog.search_text("Laptop")), vec!["1"]);
        assert!(catalog.search_text("Lap").is_empty());
        assert_eq!(
            ids(catalog.search_text("Powerful laptop with high-resolution display")),
            vec!["1"]
        );
        assert!(catalog.search_text("Powerful").is_empty());
        assert_eq!(ids(catalog.search_text("Java Programming")), vec!["2"]);
        assert_eq!(ids(catalog.search_text("John Doe")), vec!["2"]);
        assert!(catalog.search_text("Processor").is_empty());
        assert!(catalog.search_text("").is_empty());
    }

    #[test]
    fn shared_values_collect_every_id() {
        let mut catalog = Catalog::sample();
        catalog.add_product(Product::new(
            "3",
            "Workstation",
            "Electronics",
            "Tower",
            [("RAM", "16GB")],
        ));
        assert_eq!(ids(catalog.search_text("16GB")), vec!["1", "3"]);
        assert_eq!(ids(catalog.search_text("512GB SSD")), vec!["1"]);
    }

    #[test]
    fn category_index_lists_names_by_id() {
        let catalog = Catalog::sample();
        let electronics = catalog.search_by_category("Electronics");
        assert_eq!(electronics.len(), 1);
        assert_eq!(electronics.get(&Symbol::new("1")).map(String::as_str), Some("Laptop"));
        assert!(catalog.search_by_category("Garden").is_empty());
    }

    #[test]
    fn products_are_found_by_id() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 2);
        let book = catalog.product("2").unwrap();
        assert_eq!(book.name(), "Java Programming");
        assert_eq!(book.category(), "Books");
        assert_eq!(book.details.get("Pages").map(String::as_str), Some("500"));
        assert!(catalog.product("99").is_none());
    }

    #[test]
    fn re_adding_replaces_record() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.len(), 0);
        catalog.add_product(Product::new("7", "Desk", "Furniture", "Oak", [("Color", "Brown")]));
        catalog.add_product(Product::new("7", "Desk", "Furniture", "Walnut", [("Color", "Brown")]));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.product("7").unwrap().description, "Walnut");
        assert_eq!(ids(catalog.search_text("Brown")), vec!["7"]);
    }

    #[test]
    fn missing_ids_are_not_interned() {
        let catalog = Catalog::sample();
        for i in 0..100 {
            let id = format!("catalog-missing-{}", i);
            assert!(catalog.product(&id).is_none());
            assert!(Symbol::lookup(&id).is_none());
        }
    }

    #[test]
    fn moving_category_keeps_old_entry() {
        let mut catalog = Catalog::new();
        catalog.add_product(Product::new("8", "Lamp", "Furniture", "Brass", [("Bulb", "E27")]));
        catalog.add_product(Product::new("8", "Lamp", "Office", "Brass", [("Bulb", "E27")]));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.product("8").unwrap().category(), "Office");
        assert_eq!(catalog.search_by_category("Furniture").len(), 1);
        assert_eq!(catalog.search_by_category("Office").len(), 1);
    }

    #[test]
    fn display_lists_fields() {
        let product = Product::new("5", "Pen", "Office", "Blue ink", [("Ink", "Blue"), ("Color", "Black")]);
        assert_eq!(
            product.to_string(),
            "Product{id='5', name='Pen', category='Office', description='Blue ink', details={Color=Black, Ink=Blue}}"
        );
    }
}

use serde::Serialize;

/// Marketplace search links for a single garment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingLinks {
    pub amazon: String,
    pub flipkart: String,
    pub myntra: String,
    pub ajio: String,
}

pub fn shopping_links(name: &str, color: &str) -> ShoppingLinks {
    let query = format!("{name} {color}");
    let query = urlencoding::encode(query.trim());
    ShoppingLinks {
        amazon: format!("https://www.amazon.in/s?k={query}"),
        flipkart: format!("https://www.flipkart.com/search?q={query}"),
        myntra: format!("https://www.myntra.com/{query}"),
        ajio: format!("https://www.ajio.com/search/?text={query}"),
    }
}

/// Google Shopping search for a free-text query. Blank queries yield nothing.
pub fn search_link(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| {
        format!(
            "https://www.google.com/search?tbm=shop&q={}",
            urlencoding::encode(query)
        )
    })
}

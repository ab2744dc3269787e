use super::product::ScoredProduct;

pub const NO_PRODUCTS_FOUND: &str = "Товари не знайдені.";
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

const HEADER: &str = "ЗНАЙДЕНІ ТОВАРИ:\n\n";
const NO_NAME: &str = "Без назви";
const NOT_SPECIFIED: &str = "Не вказано";
const NO_DESCRIPTION: &str = "Немає опису";
const NO_SKU: &str = "N/A";
const IN_STOCK: &str = "В наявності";
const OUT_OF_STOCK: &str = "Немає в наявності";
const CURRENCY: &str = "грн";

/// Renders products as the catalog block the model sees. The wording is part
/// of the prompt, so placeholders must stay exactly as they are.
pub fn format_products(products: &[ScoredProduct]) -> String {
    if products.is_empty() {
        return NO_PRODUCTS_FOUND.to_string();
    }

    let mut context = String::from(HEADER);
    for (i, product) in products.iter().enumerate() {
        let record = &product.record;
        // `{:?}` keeps the fraction on whole amounts: 450.0, not 450
        let price = record
            .price
            .map(|p| format!("{:?}", p))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());
        let availability = if record.status.unwrap_or(false) {
            IN_STOCK
        } else {
            OUT_OF_STOCK
        };
        let description = record.description.as_deref().unwrap_or(NO_DESCRIPTION);

        context.push_str(&format!("{}. {}\n", i + 1, record.name.as_deref().unwrap_or(NO_NAME)));
        context.push_str(&format!("   Бренд: {}\n", record.brand.as_deref().unwrap_or(NOT_SPECIFIED)));
        context.push_str(&format!("   Ціна: {} {}\n", price, CURRENCY));
        context.push_str(&format!("   Наявність: {}\n", availability));
        context.push_str(&format!("   Опис: {}...\n", preview(description)));
        context.push_str(&format!("   SKU: {}\n", record.sku.as_deref().unwrap_or(NO_SKU)));
        context.push('\n');
    }

    context
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

use crate::models::{CafeInfo, MenuItems, ReceiptData};
use crate::page::{
    CURRENCY_SUFFIX, FIELD_CAFE_NAME, FIELD_MENU_ITEMS, FIELD_TOTAL_PRICE, FIELD_VISIT_DATE,
};

/// Render a number the way the page shows it: integral values without a
/// fractional part (`4500`, not `4500.0`).
pub fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Total price with the currency suffix. Absent or zero totals render empty.
pub fn format_total_price(total: Option<f64>) -> String {
    match total {
        Some(v) if v != 0.0 && !v.is_nan() => format!("{}{}", display_number(v), CURRENCY_SUFFIX),
        _ => String::new(),
    }
}

/// One `name: price원` line per item for list-form menus.
pub fn menu_items_text(items: &MenuItems) -> String {
    match items {
        MenuItems::Text(text) => text.clone(),
        MenuItems::List(list) => list
            .iter()
            .map(|item| match item.price {
                Some(price) => format!("{}: {}{}", item.name, display_number(price), CURRENCY_SUFFIX),
                None => item.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML content of a marker's info window.
///
/// Name and address come from OCR output, so they are escaped before being
/// handed to the widget as markup.
pub fn info_window_html(info: &CafeInfo) -> String {
    format!(
        r#"<div class="info-window"><h5>{}</h5><p>{}</p><p>평점: {}점</p></div>"#,
        escape_html(&info.name),
        escape_html(&info.address),
        display_number(info.rating)
    )
}

/// Display values for the OCR result inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultFields {
    pub cafe_name: String,
    pub visit_date: String,
    pub menu_items: String,
    pub total_price: String,
}

impl ResultFields {
    pub fn from_receipt(data: &ReceiptData) -> Self {
        ResultFields {
            cafe_name: data.store_name.clone().unwrap_or_default(),
            visit_date: data.visit_date.clone().unwrap_or_default(),
            menu_items: data.menu_items.as_ref().map(menu_items_text).unwrap_or_default(),
            total_price: format_total_price(data.total_price),
        }
    }

    /// Values keyed by the id of the input they populate.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (FIELD_CAFE_NAME, self.cafe_name.as_str()),
            (FIELD_VISIT_DATE, self.visit_date.as_str()),
            (FIELD_MENU_ITEMS, self.menu_items.as_str()),
            (FIELD_TOTAL_PRICE, self.total_price.as_str()),
        ]
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(id, _)| *id == field_id)
            .map(|(_, value)| value)
    }
}

//! Terminal tables for the CLI.

use atelier::{
    artworks::Artwork,
    cart::Cart,
    categories::{MenuItem, TreeNode},
    pricing::format_price,
    selection::ArtworkSelection,
};
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::domain::catalog::FetchState;

fn yes_no(flag: bool) -> String {
    let answer = if flag { "yes" } else { "no" };

    answer.to_string()
}

fn render(builder: Builder, right_aligned: Option<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());

    if let Some(column) = right_aligned {
        table.modify(Columns::new(column..=column), Alignment::right());
    }

    table.to_string()
}

/// Price and availability of the current selection.
pub fn selection_table(selection: &ArtworkSelection<'_>) -> String {
    let artwork = selection.artwork();
    let summary = selection.summary();
    let mut builder = Builder::default();

    builder.push_record(["Artwork".to_string(), artwork.name.clone()]);
    builder.push_record(["Category".to_string(), artwork.category.name.clone()]);
    builder.push_record([
        "Size".to_string(),
        selection.size().map(|size| size.label()).unwrap_or_default(),
    ]);
    builder.push_record([
        "Colour".to_string(),
        selection
            .variant()
            .map(|variant| variant.color_name.clone())
            .unwrap_or_default(),
    ]);
    builder.push_record(["Quantity".to_string(), selection.quantity().to_string()]);
    builder.push_record(["Price".to_string(), summary.formatted]);
    builder.push_record(["Out of stock".to_string(), yes_no(summary.is_out_of_stock)]);
    builder.push_record(["Can add to cart".to_string(), yes_no(summary.can_add_to_cart)]);
    builder.push_record([
        "Image".to_string(),
        selection.active_image().unwrap_or_default().to_string(),
    ]);

    render(builder, None)
}

/// One row per artwork.
pub fn artworks_table(artworks: &[Artwork], currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Id".to_string(),
        "Name".to_string(),
        "Category".to_string(),
        "Price".to_string(),
    ]);

    for artwork in artworks {
        builder.push_record([
            artwork.id.clone(),
            artwork.name.clone(),
            artwork.category.name.clone(),
            format_price(artwork.base_price, currency),
        ]);
    }

    render(builder, Some(3))
}

/// Cart lines with a subtotal row.
pub fn cart_table(cart: &Cart, currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Line".to_string(),
        "Title".to_string(),
        "Qty".to_string(),
        "Total".to_string(),
    ]);

    for item in cart.items() {
        builder.push_record([
            item.id.clone(),
            item.title.clone(),
            item.quantity.to_string(),
            format_price(item.line_total(), currency),
        ]);
    }

    builder.push_record([
        String::new(),
        "Subtotal".to_string(),
        cart.unit_count().to_string(),
        format_price(cart.subtotal(), currency),
    ]);

    render(builder, Some(3))
}

/// Menu forest, children indented under their parents.
pub fn menu_table(forest: &[TreeNode<MenuItem>]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Menu".to_string(), "Link".to_string()]);

    for root in forest {
        root.walk(0, &mut |depth, item: &MenuItem| {
            builder.push_record([
                format!("{}{}", "  ".repeat(depth), item.name),
                item.link.clone().unwrap_or_default(),
            ]);
        });
    }

    render(builder, None)
}

/// Status line for a catalog collection.
pub fn fetch_status<T>(state: &FetchState<Vec<T>>) -> String {
    match state {
        FetchState::Idle => "idle".to_string(),
        FetchState::Loading => "loading".to_string(),
        FetchState::Success(records) => format!("{} records", records.len()),
        FetchState::Error(message) => format!("error: {message}"),
    }
}

/// One row per catalog collection.
pub fn catalog_table(rows: &[(&str, String)]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Collection".to_string(), "Status".to_string()]);

    for (collection, status) in rows {
        builder.push_record([(*collection).to_string(), status.clone()]);
    }

    render(builder, None)
}

#[cfg(test)]
mod tests {
    use atelier::categories::build_tree;
    use rusty_money::iso;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test::helpers::{artwork_document, document};

    use super::*;

    #[test]
    fn selection_table_shows_price_and_state() -> TestResult {
        let artwork: Artwork = artwork_document("art-1", 1500).parse()?;
        let selection = ArtworkSelection::new(&artwork, iso::USD);

        let table = selection_table(&selection);

        assert!(table.contains("Artwork art-1"));
        assert!(table.contains("$1,500.00"));
        assert!(table.contains("/images/art-1.jpg"));

        Ok(())
    }

    #[test]
    fn menu_table_indents_children() -> TestResult {
        let items: Vec<MenuItem> = vec![
            document(json!({ "id": "shop", "name": "Shop", "link": "/shop" })).parse()?,
            document(json!({ "id": "prints", "name": "Prints", "parentId": "shop" })).parse()?,
        ];

        let table = menu_table(&build_tree(items));

        assert!(table.contains("Shop"));
        assert!(table.contains("  Prints"));
        assert!(table.contains("/shop"));

        Ok(())
    }

    #[test]
    fn fetch_status_describes_state() {
        assert_eq!(fetch_status::<u8>(&FetchState::Idle), "idle");
        assert_eq!(fetch_status(&FetchState::Success(vec![1, 2])), "2 records");
        assert_eq!(
            fetch_status::<u8>(&FetchState::Error("offline".to_string())),
            "error: offline"
        );
    }

    #[test]
    fn cart_table_totals_lines() -> TestResult {
        let artwork: Artwork = artwork_document("art-2", 250).parse()?;
        let mut selection = ArtworkSelection::new(&artwork, iso::GBP);
        let mut cart = Cart::new();

        selection.set_quantity(2)?;
        selection.add_to_cart(&mut cart, jiff::Timestamp::UNIX_EPOCH)?;

        let table = cart_table(&cart, iso::GBP);

        assert!(table.contains("Subtotal"));
        assert!(table.contains("£500.00"));

        Ok(())
    }
}

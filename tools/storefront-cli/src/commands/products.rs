//! Catalog listing command.

use anyhow::{Context as _, Result};
use storefront_commerce::prelude::*;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{stock_badge, Output};

const WIDTHS: [usize; 4] = [6, 36, 10, 16];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let mut listing = ctx.listing(args.page_size)?;
    listing.go_to(args.page).context("Invalid page")?;

    let catalog = ctx.catalog().await?;

    let spinner = ctx.output.spinner("Loading products...");
    let page = catalog
        .list_products(listing.page(), listing.page_size())
        .await
        .context("Failed to load products");
    spinner.finish_and_clear();
    let page = page?;
    listing.record(&page);

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    print_page(&ctx.output, &page, &listing);
    Ok(())
}

/// Print a listing page as a table with a paging footer.
pub fn print_page(output: &Output, page: &ProductPage, listing: &ListingState) {
    output.header(&format!(
        "Products (page {} of {})",
        listing.page(),
        listing.total_pages().max(1)
    ));

    if page.is_empty() {
        output.info("No products on this page");
        return;
    }

    output.table_header(&["ID", "TITLE", "PRICE", "STOCK"], &WIDTHS);
    for product in &page.products {
        output.table_row(
            &[
                product.id.as_str(),
                &product.title,
                &product.price.to_string(),
                &stock_badge(product.stock),
            ],
            &WIDTHS,
        );
    }

    output.info(&format!(
        "Showing {}-{} of {}",
        listing.start_item(),
        listing.end_item(),
        listing.total()
    ));
    if listing.has_next() {
        output.debug(&format!("Next: --page {}", listing.page() + 1));
    }
}

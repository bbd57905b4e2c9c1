//! Product details command.

use anyhow::{Context as _, Result};
use storefront_commerce::prelude::*;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{stock_badge, Output};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id.trim());
    let catalog = ctx.catalog().await?;

    let spinner = ctx.output.spinner("Loading product...");
    let product = catalog
        .get_product(&id)
        .await
        .with_context(|| format!("Failed to load product {}", id));
    spinner.finish_and_clear();
    let product = product?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    print_product(&ctx.output, &product);
    Ok(())
}

pub fn print_product(output: &Output, product: &Product) {
    output.header(&product.title);
    output.kv("id", product.id.as_str());
    output.kv("price", &product.price.to_string());
    output.kv("stock", &stock_badge(product.stock));
    if !product.thumbnail.is_empty() {
        output.kv("image", &product.thumbnail);
    }
    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }
}

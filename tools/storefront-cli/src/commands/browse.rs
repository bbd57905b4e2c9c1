//! Interactive catalog browser.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use storefront_commerce::prelude::*;

use super::product::print_product;
use super::products::print_page;
use super::BrowseArgs;
use crate::context::Context;
use crate::output::{cart_badge, line_summary, Output};
use crate::session::Session;

const CART_WIDTHS: [usize; 4] = [32, 10, 8, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NextPage,
    PrevPage,
    ViewProduct,
    AddToCart,
    ViewCart,
    SortCart,
    UpdateQuantity,
    RemoveItem,
    ClearCart,
    PageSize,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::NextPage => "Next page",
            Action::PrevPage => "Previous page",
            Action::ViewProduct => "View product",
            Action::AddToCart => "Add to cart",
            Action::ViewCart => "View cart",
            Action::SortCart => "Sort cart",
            Action::UpdateQuantity => "Change quantity",
            Action::RemoveItem => "Remove item",
            Action::ClearCart => "Clear cart",
            Action::PageSize => "Change page size",
            Action::Quit => "Quit",
        }
    }
}

/// Actions that make sense in the current state.
fn menu(session: &Session) -> Vec<Action> {
    let mut actions = Vec::new();
    if session.listing().has_next() {
        actions.push(Action::NextPage);
    }
    if session.listing().has_prev() {
        actions.push(Action::PrevPage);
    }
    if !session.page().is_empty() {
        actions.push(Action::ViewProduct);
        actions.push(Action::AddToCart);
    }
    actions.push(Action::ViewCart);
    if !session.cart().is_empty() {
        actions.extend([
            Action::SortCart,
            Action::UpdateQuantity,
            Action::RemoveItem,
            Action::ClearCart,
        ]);
    }
    actions.push(Action::PageSize);
    actions.push(Action::Quit);
    actions
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("browse is interactive and does not support --json");
    }

    let mut listing = ctx.listing(args.page_size)?;
    listing.go_to(args.page).context("Invalid page")?;

    let catalog = ctx.catalog().await?;
    let mut session = Session::new(catalog, ctx.currency()?, listing);

    let spinner = ctx.output.spinner("Loading products...");
    let loaded = session.load_page().await.map(|_| ());
    spinner.finish_and_clear();
    loaded.context("Failed to load products")?;

    loop {
        print_page(&ctx.output, session.page(), session.listing());

        let actions = menu(&session);
        let labels: Vec<&str> = actions.iter().map(Action::label).collect();
        let choice = Select::new()
            .with_prompt(format!("{} What next?", cart_badge(session.badge())))
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::NextPage => navigate(&ctx.output, session.next_page().await),
            Action::PrevPage => navigate(&ctx.output, session.prev_page().await),
            Action::ViewProduct => view_product(&mut session, &ctx.output).await?,
            Action::AddToCart => {
                if let Some(product) = pick_product(&session, "Add which product?")? {
                    add(&mut session, &ctx.output, &product);
                }
            }
            Action::ViewCart => print_cart(&ctx.output, &session),
            Action::SortCart => sort_cart(&mut session, &ctx.output)?,
            Action::UpdateQuantity => update_quantity(&mut session, &ctx.output)?,
            Action::RemoveItem => {
                if let Some(item) = pick_line(&session, "Remove which item?")? {
                    if session.remove_item(&item.id) {
                        ctx.output.success("Item removed from cart");
                    }
                }
            }
            Action::ClearCart => {
                let confirmed = Confirm::new()
                    .with_prompt("Remove everything from the cart?")
                    .default(false)
                    .interact()?;
                if confirmed {
                    session.clear_cart();
                    ctx.output.success("Cart cleared");
                }
            }
            Action::PageSize => {
                let size: u32 = Input::new()
                    .with_prompt("Products per page")
                    .default(session.listing().page_size())
                    .interact_text()?;
                if let Err(e) = session.set_page_size(size).await {
                    ctx.output.error(&format!("{:#}", e));
                }
            }
            Action::Quit => break,
        }
    }

    if !session.cart().is_empty() {
        print_cart(&ctx.output, &session);
    }
    Ok(())
}

fn navigate<E: std::fmt::Display>(output: &Output, result: Result<bool, E>) {
    if let Err(e) = result {
        output.error(&format!("Failed to load products: {}", e));
    }
}

fn add(session: &mut Session, output: &Output, product: &Product) {
    match session.add_to_cart(product) {
        Ok(()) => output.success(&format!("Added {} to cart", product.title)),
        Err(e) => output.warn(&e.to_string()),
    }
}

async fn view_product(session: &mut Session, output: &Output) -> Result<()> {
    let Some(summary) = pick_product(session, "View which product?")? else {
        return Ok(());
    };

    let spinner = output.spinner("Loading product...");
    let fetched = session.product(&summary.id).await;
    spinner.finish_and_clear();

    let product = match fetched {
        Ok(product) => product,
        Err(e) => {
            output.error(&format!("Failed to load product {}: {}", summary.id, e));
            return Ok(());
        }
    };

    print_product(output, &product);
    if product.is_in_stock() {
        let add_it = Confirm::new()
            .with_prompt("Add to cart?")
            .default(false)
            .interact()?;
        if add_it {
            add(session, output, &product);
        }
    }
    Ok(())
}

fn sort_cart(session: &mut Session, output: &Output) -> Result<()> {
    let columns = [
        SortColumn::Product,
        SortColumn::Price,
        SortColumn::Quantity,
        SortColumn::Total,
    ];
    let labels: Vec<&str> = columns.iter().map(SortColumn::as_str).collect();
    let choice = Select::new()
        .with_prompt("Sort by")
        .items(&labels)
        .interact()?;

    let sort = session.sort_by(columns[choice]);
    if sort.is_sorted() {
        output.info(&format!("Sorted by {} ({})", sort.column, sort.direction));
    } else {
        output.info("Cart in insertion order");
    }
    print_cart(output, session);
    Ok(())
}

fn update_quantity(session: &mut Session, output: &Output) -> Result<()> {
    let Some(item) = pick_line(session, "Change which item?")? else {
        return Ok(());
    };

    let quantity: i64 = Input::new()
        .with_prompt(format!("Quantity (1-{})", item.stock))
        .default(item.quantity)
        .interact_text()?;

    match session.update_quantity(&item.id, quantity) {
        Ok(()) => output.success("Quantity updated"),
        Err(e) => output.warn(&e.to_string()),
    }
    Ok(())
}

fn pick_product(session: &Session, prompt: &str) -> Result<Option<Product>> {
    let products = &session.page().products;
    let mut items: Vec<String> = products
        .iter()
        .map(|p| format!("{} ({})", p.title, p.price))
        .collect();
    items.push("Back".to_string());

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(products.get(choice).cloned())
}

fn pick_line(session: &Session, prompt: &str) -> Result<Option<CartLineItem>> {
    let rows = session.cart_rows();
    let mut items: Vec<String> = rows.iter().map(line_summary).collect();
    items.push("Back".to_string());

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(rows.into_iter().nth(choice))
}

fn print_cart(output: &Output, session: &Session) {
    output.header(&format!("Cart {}", cart_badge(session.badge())));

    let rows = session.cart_rows();
    if rows.is_empty() {
        output.info("Your cart is empty");
        return;
    }

    output.table_header(&["PRODUCT", "PRICE", "QTY", "TOTAL"], &CART_WIDTHS);
    for item in &rows {
        output.table_row(
            &[
                &item.title,
                &item.price.to_string(),
                &item.quantity.to_string(),
                &item.line_total().to_string(),
            ],
            &CART_WIDTHS,
        );
    }
    output.kv("Total", &session.cart().total().to_string());
}

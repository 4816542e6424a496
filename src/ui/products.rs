use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::{
    api::products::ProductController,
    model::{apperror::ApplicationError, money::round_money, products::Product},
    ui::console::Console,
};

const MENU: &str = "\n--- Product Catalog ---
1. Add product
2. View product by id
3. View all products
4. Update product
5. Delete product
6. Exit";

/**
 * Runs the product catalog menu until the user exits.
 */
pub async fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, controller: &ProductController) -> Result<(), ApplicationError> {
    loop {
        console.write_line(MENU)?;
        match console.prompt("Choose an option: ")?.as_str() {
            "1" => {
                let product_id: i32 = console.read_value("Product id: ")?;
                let name = console.prompt("Name: ")?;
                let category = console.prompt("Category: ")?;
                let price: Decimal = console.read_value("Price: ")?;
                let stock_quantity: i32 = console.read_value("Stock quantity: ")?;
                let response = controller.add_product(Product::new(product_id, name, category, price, stock_quantity)).await;
                console.show(&response, |product| format!("Product added: {product}"))?;
            }
            "2" => {
                let product_id: i32 = console.read_value("Product id: ")?;
                console.show(&controller.get_product_by_id(product_id).await, Product::to_string)?;
            }
            "3" => {
                let response = controller.get_all_products().await;
                console.show(&response, |products| products.iter().map(Product::to_string).collect::<Vec<String>>().join("\n"))?;
            }
            "4" => update_product(console, controller).await?,
            "5" => {
                let product_id: i32 = console.read_value("Product id: ")?;
                console.show(&controller.delete_product_by_id(product_id).await, |product_id| format!("Product with the Id {product_id} deleted"))?;
            }
            "6" => return Ok(()),
            _ => console.write_line("Invalid choice.")?,
        }
    }
}

/**
 * Shows the current product and asks for new values. Blank answers keep the current value.
 */
async fn update_product<R: BufRead, W: Write>(console: &mut Console<R, W>, controller: &ProductController) -> Result<(), ApplicationError> {
    let product_id: i32 = console.read_value("Product id: ")?;
    let response = controller.get_product_by_id(product_id).await;
    if !console.show(&response, Product::to_string)? {
        return Ok(());
    }
    let current = response.into_result()?;
    let name = Some(console.prompt(&format!("Name [{}]: ", current.name))?).filter(|name| !name.is_empty()).unwrap_or(current.name);
    let category = Some(console.prompt(&format!("Category [{}]: ", current.category))?).filter(|category| !category.is_empty()).unwrap_or(current.category);
    let price = console.read_optional_value::<Decimal>(&format!("Price [{:.2}]: ", round_money(current.price)))?.unwrap_or(current.price);
    let stock_quantity = console.read_optional_value::<i32>(&format!("Stock quantity [{}]: ", current.stock_quantity))?.unwrap_or(current.stock_quantity);
    let response = controller.update_product(Product::new(current.id, name, category, price, stock_quantity)).await;
    console.show(&response, |product| format!("Product updated: {product}"))?;
    Ok(())
}

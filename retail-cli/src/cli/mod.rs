//! Command-line interface
//!
//! Subcommands map one-to-one onto service calls. Results are printed as
//! pretty JSON; errors are printed as a single `Error:` line and the process
//! still exits cleanly.

use crate::core::AppState;
use crate::db::models::{
    CustomerCreate, CustomerUpdate, PaymentMethod, ProductCreate, ProductUpdate,
};
use crate::services::ItemRequest;
use crate::utils::{AppError, AppResult};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

const LIST_LIMIT: i64 = 100;

#[derive(Parser, Debug)]
#[command(name = "retail", version)]
#[command(about = "Retail management CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Product catalog commands
    #[command(subcommand)]
    Product(ProductCommand),
    /// Customer commands
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Order lifecycle commands
    #[command(subcommand)]
    Order(OrderCommand),
    /// Payment commands
    #[command(subcommand)]
    Payment(PaymentCommand),
    /// Sales reports
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand, Debug)]
enum ProductCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = 0)]
        stock: i64,
        #[arg(long)]
        category: Option<String>,
    },
    List,
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sku: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum CustomerCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        city: Option<String>,
    },
    List,
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    Search {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    Create {
        #[arg(long)]
        customer: i64,
        /// Order line as prod_id:qty; repeat for multiple lines
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
    Show {
        #[arg(long)]
        order: i64,
    },
    Cancel {
        #[arg(long)]
        order: i64,
    },
    Complete {
        #[arg(long)]
        order: i64,
    },
    List {
        #[arg(long)]
        customer: i64,
    },
}

#[derive(Subcommand, Debug)]
enum PaymentCommand {
    /// Create the pending payment row for an order
    Pending {
        #[arg(long)]
        order: i64,
        #[arg(long)]
        amount: Decimal,
    },
    Process {
        #[arg(long)]
        order: i64,
        #[arg(long)]
        method: PaymentMethod,
    },
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    TopProducts {
        #[arg(long, default_value_t = 5)]
        top_n: usize,
    },
    Revenue,
    CustomerOrders,
    FrequentCustomers {
        #[arg(long, default_value_t = 2)]
        min_orders: usize,
    },
}

/// Execute the parsed command, rendering any error as a printed line
pub async fn run(cli: Cli, state: &AppState) {
    if let Err(err) = dispatch(cli.command, state).await {
        println!("Error: {err}");
    }
}

async fn dispatch(command: Command, state: &AppState) -> AppResult<()> {
    match command {
        Command::Product(cmd) => product(cmd, state).await,
        Command::Customer(cmd) => customer(cmd, state).await,
        Command::Order(cmd) => order(cmd, state).await,
        Command::Payment(cmd) => payment(cmd, state).await,
        Command::Report(cmd) => report(cmd, state).await,
    }
}

async fn product(cmd: ProductCommand, state: &AppState) -> AppResult<()> {
    match cmd {
        ProductCommand::Add {
            name,
            sku,
            price,
            stock,
            category,
        } => {
            let created = state
                .products
                .add(ProductCreate {
                    name,
                    sku,
                    price,
                    stock: Some(stock),
                    category,
                })
                .await?;
            print_labelled("Created product:", &created)
        }
        ProductCommand::List => {
            let products = state.products.list(LIST_LIMIT).await?;
            print_value(&products)
        }
        ProductCommand::Update {
            id,
            name,
            sku,
            price,
            stock,
            category,
        } => {
            let updated = state
                .products
                .update(
                    id,
                    ProductUpdate {
                        name,
                        sku,
                        price,
                        stock,
                        category,
                    },
                )
                .await?;
            print_labelled("Updated product:", &updated)
        }
        ProductCommand::Delete { id } => {
            let deleted = state.products.delete(id).await?;
            print_labelled("Deleted product:", &deleted)
        }
    }
}

async fn customer(cmd: CustomerCommand, state: &AppState) -> AppResult<()> {
    match cmd {
        CustomerCommand::Add {
            name,
            email,
            phone,
            city,
        } => {
            let created = state
                .customers
                .add(CustomerCreate {
                    name,
                    email,
                    phone,
                    city,
                })
                .await?;
            print_labelled("Created customer:", &created)
        }
        CustomerCommand::List => {
            let customers = state.customers.list(LIST_LIMIT).await?;
            print_value(&customers)
        }
        CustomerCommand::Update { id, phone, city } => {
            let updated = state
                .customers
                .update(id, CustomerUpdate { phone, city })
                .await?;
            print_labelled("Updated customer:", &updated)
        }
        CustomerCommand::Delete { id } => {
            let deleted = state.customers.delete(id).await?;
            print_labelled("Deleted customer:", &deleted)
        }
        CustomerCommand::Search { email, city } => {
            let found = state
                .customers
                .search(email.as_deref(), city.as_deref())
                .await?;
            print_value(&found)
        }
    }
}

async fn order(cmd: OrderCommand, state: &AppState) -> AppResult<()> {
    match cmd {
        OrderCommand::Create { customer, items } => {
            let items = items
                .iter()
                .map(|spec| parse_item(spec))
                .collect::<AppResult<Vec<_>>>()?;
            let details = state.orders.create_order(customer, &items).await?;
            print_labelled("Order created:", &details)
        }
        OrderCommand::Show { order } => {
            let details = state.orders.get_order_details(order).await?;
            print_value(&details)
        }
        OrderCommand::Cancel { order } => {
            state.orders.cancel_order(order).await?;
            state.payments.refund(order).await?;
            println!("Order cancelled and payment refunded");
            Ok(())
        }
        OrderCommand::Complete { order } => {
            state.orders.complete_order(order).await?;
            println!("Order completed");
            Ok(())
        }
        OrderCommand::List { customer } => {
            let orders = state.orders.list_by_customer(customer).await?;
            print_value(&orders)
        }
    }
}

async fn payment(cmd: PaymentCommand, state: &AppState) -> AppResult<()> {
    match cmd {
        PaymentCommand::Pending { order, amount } => {
            let payment = state.payments.create_pending(order, amount).await?;
            print_labelled("Pending payment created:", &payment)
        }
        PaymentCommand::Process { order, method } => {
            let payment = state.payments.process(order, method).await?;
            print_labelled("Payment processed:", &payment)
        }
    }
}

async fn report(cmd: ReportCommand, state: &AppState) -> AppResult<()> {
    match cmd {
        ReportCommand::TopProducts { top_n } => {
            let top = state.reports.top_selling_products(top_n).await?;
            print_value(&top)
        }
        ReportCommand::Revenue => {
            let revenue = state.reports.total_revenue_last_month().await?;
            print_value(&serde_json::json!({ "total_revenue": revenue }))
        }
        ReportCommand::CustomerOrders => {
            let counts = state.reports.orders_by_customer().await?;
            print_value(&counts)
        }
        ReportCommand::FrequentCustomers { min_orders } => {
            let frequent = state.reports.frequent_customers(min_orders).await?;
            print_value(&frequent)
        }
    }
}

/// Parse an order line given as `prod_id:qty`
fn parse_item(spec: &str) -> AppResult<ItemRequest> {
    let (prod, qty) = spec.split_once(':').ok_or_else(|| {
        AppError::Validation(format!("Invalid item '{spec}' (expected prod_id:qty)"))
    })?;
    let prod_id = prod
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid product id in item '{spec}'")))?;
    let quantity = qty
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid quantity in item '{spec}'")))?;
    Ok(ItemRequest { prod_id, quantity })
}

fn print_labelled<T: Serialize>(label: &str, value: &T) -> AppResult<()> {
    println!("{label} {}", to_pretty(value)?);
    Ok(())
}

fn print_value<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", to_pretty(value)?);
    Ok(())
}

fn to_pretty<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to render output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_spec_parses_id_and_quantity() {
        let item = parse_item("3:2").unwrap();
        assert_eq!(item.prod_id, 3);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn malformed_item_specs_are_rejected() {
        assert!(matches!(parse_item("3"), Err(AppError::Validation(_))));
        assert!(matches!(parse_item("a:2"), Err(AppError::Validation(_))));
        assert!(matches!(parse_item("3:b"), Err(AppError::Validation(_))));
    }
}

//! Terminal client for the catalog backend.
//!
//! Renders the product list and an add-product form, talking only to the
//! HTTP API. The list is refetched whenever the refresh counter changes
//! (startup and after every mutating action). Failures surface as one-line
//! notices; there are no retries.

use std::io::{self, BufRead, Write};

use serde::Deserialize;

/// A product record as returned by the backend.
#[derive(Deserialize, Debug, Clone)]
struct ProductView {
    id: String,
    name: String,
    price: f64,
    description: String,
    created_at: String,
}

struct Client {
    http: reqwest::Client,
    base_url: String,
    /// Bumped after every mutating action; each change triggers a refetch.
    refresh: u32,
    products: Vec<ProductView>,
}

impl Client {
    fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            refresh: 0,
            products: Vec::new(),
        }
    }

    /// Fetches the product list. Server order (newest first) is kept as-is.
    async fn fetch_products(&mut self) -> Result<(), reqwest::Error> {
        let products = self
            .http
            .get(format!("{}/products", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<ProductView>>()
            .await?;
        self.products = products;
        Ok(())
    }

    async fn create_product(
        &self,
        name: &str,
        price: f64,
        description: &str,
    ) -> Result<(), reqwest::Error> {
        self.http
            .post(format!("{}/products", self.base_url))
            .json(&sonic_rs::json!({
                "name": name,
                "price": price,
                "description": description
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<(), reqwest::Error> {
        self.http
            .delete(format!("{}/products/{}", self.base_url, id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn render_list(&self) {
        if self.products.is_empty() {
            println!("(no products)");
            return;
        }
        for (index, product) in self.products.iter().enumerate() {
            println!(
                "{:>3}. {} - ${:.2}\n     {}\n     added {}",
                index + 1,
                product.name,
                product.price,
                product.description,
                product.created_at
            );
        }
    }
}

/// Transient notice, the terminal stand-in for a toast.
fn notice(message: &str) {
    eprintln!("! {}", message);
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn refresh_and_render(client: &mut Client) {
    client.refresh += 1;
    match client.fetch_products().await {
        Ok(()) => client.render_list(),
        Err(_) => notice("Error fetching products"),
    }
}

async fn add_flow(client: &mut Client) -> io::Result<()> {
    let name = prompt("name: ")?;
    let price_input = prompt("price: ")?;
    let description = prompt("description: ")?;

    let price: f64 = match price_input.parse() {
        Ok(value) => value,
        Err(_) => {
            notice("Price must be a number");
            return Ok(());
        }
    };

    match client.create_product(&name, price, &description).await {
        Ok(()) => {
            println!("Product added");
            refresh_and_render(client).await;
        }
        Err(_) => notice("Error adding product"),
    }
    Ok(())
}

async fn delete_flow(client: &mut Client, argument: &str) {
    let index: usize = match argument.parse::<usize>() {
        Ok(n) if n >= 1 && n <= client.products.len() => n - 1,
        _ => {
            notice("delete takes a number from the list");
            return;
        }
    };

    let id = client.products[index].id.clone();
    match client.delete_product(&id).await {
        Ok(()) => {
            println!("Product deleted");
            refresh_and_render(client).await;
        }
        Err(_) => notice("Error deleting product"),
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let base_url = std::env::var("CATALOG_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

    println!("Product Management — {}", base_url);
    println!("commands: add, delete <n>, refresh, quit");
    println!();

    let mut client = Client::new(base_url);
    refresh_and_render(&mut client).await;

    loop {
        let line = prompt("> ")?;
        let (command, argument) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "" => {}
            "add" => add_flow(&mut client).await?,
            "delete" => delete_flow(&mut client, argument).await,
            "refresh" | "list" => refresh_and_render(&mut client).await,
            "quit" | "exit" => break,
            _ => notice("unknown command; try add, delete <n>, refresh, quit"),
        }
    }

    Ok(())
}

use std::fs;

use template_storefront::domain::catalog::{Catalog, ProductLookup, ProductRegistry, FREE_TEMPLATE_ID};
use template_storefront::infra::StorefrontSettings;
use template_storefront::storage::{JsonFileStore, KeyValueStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Optional env vars (defaults in parentheses):\n\
           STOREFRONT_STATE_FILE (storefront_state.json)\n\
           STOREFRONT_BIND_ADDR (0.0.0.0:3000)\n\
           SEARCH_DEBOUNCE_MS (300)\n\
           CART_DUPLICATE_POLICY (increment | reject)\n"
    );
    std::process::exit(2);
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let settings = StorefrontSettings::from_env();

    println!("> Preflight:");
    println!("  STOREFRONT_STATE_FILE={}", settings.state_file.display());
    println!("  STOREFRONT_BIND_ADDR={}", settings.bind_addr);
    println!("  SEARCH_DEBOUNCE_MS={}", settings.search_debounce.as_millis());
    println!("  CART_DUPLICATE_POLICY={:?}", settings.duplicate_policy);

    settings
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .map_err(|e| anyhow::anyhow!("STOREFRONT_BIND_ADDR is not a socket address: {}", e))?;

    // Built-in catalog
    let catalog = Catalog::builtin();
    if let Err(errors) = catalog.validate() {
        for e in &errors {
            eprintln!("  Catalog error: {}", e);
        }
        return Err(anyhow::anyhow!(
            "Built-in catalog is invalid ({} problems)",
            errors.len()
        ));
    }
    println!("  Catalog: {} products (ok).", catalog.len());

    let registry = ProductRegistry::storefront(&catalog);
    if !registry.contains(FREE_TEMPLATE_ID) {
        return Err(anyhow::anyhow!("Product lookup is missing '{}'", FREE_TEMPLATE_ID));
    }
    println!("  Product lookup: {} ids (ok).", registry.list_ids().len());

    // State file
    let path = &settings.state_file;
    if path.exists() {
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        if serde_json::from_str::<serde_json::Value>(&raw).is_err() {
            eprintln!(
                "  Warning: {} is not valid JSON; the server will start from an empty state.",
                path.display()
            );
        } else {
            println!("  State file readable.");
        }
    } else {
        println!("  State file does not exist yet; it will be created on the first write.");
    }
    let store = JsonFileStore::open(path);
    store
        .ping()
        .map_err(|e| anyhow::anyhow!("State file not reachable: {}", e))?;
    if let Some(updated_at) = store.updated_at() {
        println!("  Last write: {}", updated_at.to_rfc3339());
    }

    println!("> Preflight OK.");
    Ok(())
}

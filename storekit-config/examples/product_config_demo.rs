//! Product configuration demo
//!
//! Writes a grouped product document to a temporary directory and reads it back

use std::fs;
use storekit_config::{ConfigError, ConfigLoader, ConfigResult, PropertyFile};
use tempfile::TempDir;

fn main() -> ConfigResult<()> {
    println!("StoreKit product configuration demo");

    let temp_dir = TempDir::new().map_err(ConfigError::FileReadError)?;

    let document = r#"
Products:
  - com.example.nonconsumable.flowers.large
  - com.example.nonconsumable.flowers.small
  - com.example.consumable.plant.installation
Subscriptions:
  - Group: vip
    Products:
      - com.example.gold
      - com.example.silver
      - com.example.bronze
  - Group: standard
    Products:
      - com.example.sub1
      - com.example.sub2
"#;
    fs::write(temp_dir.path().join("Products.yaml"), document)?;

    let source = PropertyFile::new(temp_dir.path());
    let mut loader = ConfigLoader::new();

    match loader.read_product_ids(&source, None) {
        Some(ids) => {
            println!("Products ({}):", ids.len());
            for id in &ids {
                println!("   {}", id);
            }
        }
        None => println!("No products configured"),
    }

    if let Some(groups) = loader.read_subscription_groups(&source, None) {
        for info in groups {
            println!("Subscription group '{}': {:?}", info.group, info.product_ids);
        }
    }

    Ok(())
}

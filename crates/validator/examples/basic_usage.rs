//! Basic usage example for rulebook-validator

use rulebook_validator::prelude::*;
use serde_json::json;

fn main() -> Result<(), RuleError> {
    let registry = Registry::builder()
        .rule("isEven", Predicate::nullary(|n: i64| n % 2 == 0))
        .alias("even", "isEven")
        .build()?;

    for token in ["between:1,10", "even", "in:3,5,7", "min:abc"] {
        match registry.invoke_token(&json!(4), token) {
            Ok(true) => println!("✓ 4 passes '{token}'"),
            Ok(false) => println!("✗ 4 fails '{token}'"),
            Err(e) => println!("! '{token}' could not be applied: {e}"),
        }
    }

    Ok(())
}

//! `carpet-quote options`: list option values with their descriptions.

use anyhow::Result;
use carpet_core::OptionValue;
use carpet_db::Database;

use crate::cli::OptionsArgs;

pub async fn run(db: &Database, args: &OptionsArgs) -> Result<()> {
    let types = match &args.option_type {
        Some(name) => vec![name.clone()],
        None => db.options().list_types().await?,
    };

    for option_type in types {
        let values = db.options().list_values(&option_type).await?;
        println!("{}", option_type);
        if values.is_empty() {
            println!("    (no values)");
        }
        for value in &values {
            println!("    {}", format_value(value));
        }
    }
    Ok(())
}

fn format_value(value: &OptionValue) -> String {
    match &value.description {
        Some(description) => format!("{:<14} {:<16} {}", value.name, value.presentation, description),
        None => format!("{:<14} {}", value.name, value.presentation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(description: Option<&str>) -> OptionValue {
        OptionValue {
            id: "id".to_string(),
            option_type: "Type".to_string(),
            name: "raummass".to_string(),
            presentation: "Raummaß".to_string(),
            description: description.map(str::to_string),
            position: 0,
            updated_at: Default::default(),
        }
    }

    #[test]
    fn test_description_is_appended() {
        let line = format_value(&value(Some("Beliebige Breite")));
        assert!(line.starts_with("raummass"));
        assert!(line.ends_with("Beliebige Breite"));
    }

    #[test]
    fn test_value_without_description() {
        assert_eq!(format_value(&value(None)).trim_end(), "raummass       Raummaß");
    }
}

//! `carpet-quote rules`: list registered pricing rules and their options.

use anyhow::Result;
use carpet_core::RuleTable;

pub fn run(rules: &RuleTable) -> Result<()> {
    for name in rules.names() {
        let rule = rules.require(name)?;
        println!("{}  {}", name, rule.description());
        for option in rule.options() {
            println!("    {} ({})", option.name, option.presentation);
        }
    }
    Ok(())
}

//! CLI Commands Listing
//!
//! Prints the registered command table.

use anyhow::Result;
use mowa_commands::CommandTable;
use serde::Serialize;

use crate::terminal_output::{render_table, Column};

#[derive(Debug, Serialize)]
struct CommandRow<'a> {
    phrase: &'a str,
    arity: usize,
    description: &'a str,
}

fn rows(table: &CommandTable) -> Vec<CommandRow<'_>> {
    table
        .all()
        .iter()
        .map(|entry| CommandRow {
            phrase: entry.phrase.as_str(),
            arity: entry.arity().count(),
            description: &entry.description,
        })
        .collect()
}

pub fn render(table: &CommandTable, json: bool) -> Result<String> {
    let rows = rows(table);
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    let columns = [Column::left("Phrase"), Column::right("Params"), Column::left("Description")];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.phrase.to_string(), r.arity.to_string(), r.description.to_string()])
        .collect();
    Ok(render_table(&columns, &cells))
}

pub fn run(table: &CommandTable, json: bool) -> Result<()> {
    print!("{}", render(table, json)?);
    if json {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::builtin_options;
    use crate::config::Settings;
    use mowa_config::MowaConfig;
    use mowa_core::Platform;

    fn table() -> CommandTable {
        let cfg = mowa_config::apply_all_defaults(MowaConfig::default());
        let settings = Settings::resolve(&cfg, Platform::Linux, |_| None);
        mowa_commands::builtin_table(&builtin_options(&settings)).unwrap()
    }

    #[test]
    fn json_lists_every_command_in_order() {
        let out = render(&table(), true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 11);
        assert_eq!(items[0]["phrase"], "otwórz przeglądarkę");
        assert_eq!(items[0]["arity"], 0);
        assert!(items.iter().any(|i| i["phrase"] == "sprawdź pogodę" && i["arity"] == 1));
    }

    #[test]
    fn table_has_header_and_rows() {
        let out = render(&table(), false).unwrap();
        assert!(out.lines().next().unwrap().contains("Phrase"));
        assert_eq!(out.lines().count(), 13);
    }
}
